//! Element templates and placed elements - the building blocks of designs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DesignError, DesignResult};

/// Nominal edge length in canvas units of an element at scale 1.0.
pub const BASE_SIZE: f32 = 100.0;

/// Maximum length of a template identifier.
pub const MAX_TEMPLATE_ID_LEN: usize = 64;

/// Unique identifier for a placed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated identifier of an element template.
///
/// Template IDs are 1-64 characters, alphanumeric plus hyphen and
/// underscore. They are stable across export/import and refer to entries
/// in a [`TemplateLibrary`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateId(String);

impl TemplateId {
    /// Create a template ID, validating the character set and length.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::InvalidTemplateId`] if the ID is empty,
    /// longer than 64 characters, or contains invalid characters.
    pub fn new(id: impl Into<String>) -> DesignResult<Self> {
        let id = id.into();
        if id.is_empty() || id.len() > MAX_TEMPLATE_ID_LEN {
            return Err(DesignError::InvalidTemplateId(id));
        }
        if !id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
            return Err(DesignError::InvalidTemplateId(id));
        }
        Ok(Self(id))
    }

    /// The ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TemplateId {
    type Error = DesignError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TemplateId> for String {
    fn from(id: TemplateId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category of monument part a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    /// A stone/stele shape.
    Stone,
    /// An engraved or applied cross.
    Cross,
    /// Floral ornament.
    Flower,
    /// A portrait photograph.
    Portrait,
    /// An epitaph text block.
    Epitaph,
    /// Name lettering (surname, name, patronymic).
    Lettering,
    /// Birth and death dates.
    Dates,
}

/// A reusable monument part available for placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTemplate {
    /// Stable identifier referenced by placed elements.
    pub id: TemplateId,
    /// Human-readable name shown in the part library.
    pub name: String,
    /// Part category.
    pub category: TemplateCategory,
    /// Optional source image. Templates without one render as a labelled
    /// placeholder rather than failing.
    pub image_url: Option<String>,
}

impl ElementTemplate {
    /// Create a template with no image.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a valid template ID.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: TemplateCategory,
    ) -> DesignResult<Self> {
        Ok(Self {
            id: TemplateId::new(id)?,
            name: name.into(),
            category,
            image_url: None,
        })
    }

    /// Set the source image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// One positioned, rotated, scaled instance of a template within a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedElement {
    /// Unique identifier within the editing session.
    pub id: ElementId,
    /// The template this element instantiates.
    pub template: TemplateId,
    /// X position of the top-left corner, in canvas units.
    pub x: f32,
    /// Y position of the top-left corner, in canvas units.
    pub y: f32,
    /// Rotation about the element center, in degrees, normalized to `[0, 360)`.
    pub rotation: f32,
    /// Uniform scale factor. Footprint is `BASE_SIZE * scale` square.
    pub scale: f32,
    /// Layering order. Unique within a design; higher draws on top.
    pub z_order: i32,
}

impl PlacedElement {
    /// Create a placed element at the given position with defaults.
    #[must_use]
    pub fn new(template: TemplateId, x: f32, y: f32, z_order: i32) -> Self {
        Self {
            id: ElementId::new(),
            template,
            x,
            y,
            rotation: 0.0,
            scale: 1.0,
            z_order,
        }
    }

    /// Edge length of the element footprint in canvas units.
    #[must_use]
    pub fn size(&self) -> f32 {
        BASE_SIZE * self.scale
    }

    /// Center of the element footprint.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        let half = self.size() / 2.0;
        (self.x + half, self.y + half)
    }

    /// Check whether a point in canvas coordinates falls in the footprint.
    ///
    /// Hit testing ignores rotation; the unrotated bounding square is used,
    /// which matches how drag grabs behave in the editor.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let size = self.size();
        x >= self.x && x <= self.x + size && y >= self.y && y <= self.y + size
    }
}

/// Lookup table of available templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: HashMap<TemplateId, ElementTemplate>,
}

impl TemplateLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in part set shipped with the storefront: the nine stone
    /// shapes plus one entry per decorative category.
    #[must_use]
    pub fn builtin() -> Self {
        let mut library = Self::new();
        let stones = [
            ("stone-vertical", "Vertical"),
            ("stone-horizontal", "Horizontal"),
            ("stone-exclusive", "Exclusive"),
            ("stone-classic", "Classic"),
            ("stone-cross", "Cross"),
            ("stone-wave", "Wave"),
            ("stone-arch", "Arch"),
            ("stone-double", "Double"),
            ("stone-book", "Book"),
        ];
        for (id, name) in stones {
            library.insert_builtin(id, name, TemplateCategory::Stone);
        }
        library.insert_builtin("cross-orthodox", "Orthodox cross", TemplateCategory::Cross);
        library.insert_builtin("flower-rose", "Rose branch", TemplateCategory::Flower);
        library.insert_builtin("portrait", "Portrait", TemplateCategory::Portrait);
        library.insert_builtin("epitaph", "Epitaph", TemplateCategory::Epitaph);
        library.insert_builtin("lettering", "Name lettering", TemplateCategory::Lettering);
        library.insert_builtin("dates", "Dates", TemplateCategory::Dates);
        library
    }

    fn insert_builtin(&mut self, id: &str, name: &str, category: TemplateCategory) {
        if let Ok(template) = ElementTemplate::new(id, name, category) {
            self.templates.insert(template.id.clone(), template);
        }
    }

    /// Register a template, replacing any existing entry with the same ID.
    pub fn register(&mut self, template: ElementTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Look up a template by ID.
    #[must_use]
    pub fn get(&self, id: &TemplateId) -> Option<&ElementTemplate> {
        self.templates.get(id)
    }

    /// Whether the library contains a template with the given ID.
    #[must_use]
    pub fn contains(&self, id: &TemplateId) -> bool {
        self.templates.contains_key(id)
    }

    /// Iterate over all templates.
    pub fn templates(&self) -> impl Iterator<Item = &ElementTemplate> {
        self.templates.values()
    }

    /// Templates in a given category.
    pub fn by_category(
        &self,
        category: TemplateCategory,
    ) -> impl Iterator<Item = &ElementTemplate> {
        self.templates
            .values()
            .filter(move |t| t.category == category)
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_validation() {
        assert!(TemplateId::new("stone-vertical").is_ok());
        assert!(TemplateId::new("a_b-C3").is_ok());
        assert!(TemplateId::new("").is_err());
        assert!(TemplateId::new("has space").is_err());
        assert!(TemplateId::new("x".repeat(65)).is_err());
    }

    #[test]
    fn test_contains_point_scales_with_footprint() {
        let id = TemplateId::new("portrait").expect("valid id");
        let mut element = PlacedElement::new(id, 100.0, 100.0, 0);
        assert!(element.contains_point(150.0, 150.0));
        assert!(!element.contains_point(250.0, 150.0));

        element.scale = 2.0;
        assert!(element.contains_point(250.0, 150.0));
    }

    #[test]
    fn test_builtin_library_has_nine_stones() {
        let library = TemplateLibrary::builtin();
        assert_eq!(library.by_category(TemplateCategory::Stone).count(), 9);
        let id = TemplateId::new("stone-book").expect("valid id");
        assert!(library.contains(&id));
    }
}
