//! Symbolic icon names mapped to rendered glyphs.
//!
//! Views refer to icons by name; unknown names fall back through an
//! optional alternate before landing on a generic placeholder, so a
//! renamed icon never breaks a view.

/// A resolved icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    /// The name that actually resolved (primary, fallback, or "circle").
    pub name: &'static str,
    /// The glyph to render.
    pub glyph: char,
}

/// The placeholder used when nothing resolves.
const PLACEHOLDER: Icon = Icon {
    name: "circle",
    glyph: '\u{25CF}',
};

const ICONS: &[(&str, char)] = &[
    ("save", '\u{1F4BE}'),
    ("send", '\u{27A4}'),
    ("download", '\u{2B07}'),
    ("upload", '\u{2B06}'),
    ("image", '\u{1F5BC}'),
    ("rotate-cw", '\u{21BB}'),
    ("search", '\u{1F50D}'),
    ("x", '\u{2715}'),
    ("arrow-left", '\u{2190}'),
    ("layout-grid", '\u{25A6}'),
    ("phone", '\u{260E}'),
];

/// Resolve a symbolic icon name, trying `fallback` if the primary is
/// unknown.
#[must_use]
pub fn glyph(name: &str, fallback: Option<&str>) -> Icon {
    lookup(name)
        .or_else(|| fallback.and_then(lookup))
        .unwrap_or(PLACEHOLDER)
}

fn lookup(name: &str) -> Option<Icon> {
    ICONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(name, glyph)| Icon { name, glyph })
}
