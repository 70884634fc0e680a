//! Design export to a flattened raster image.
//!
//! The design is laid out into an SVG string, elements in z-order, then
//! rasterized with resvg/tiny-skia and PNG-encoded. Templates without a
//! usable image render as a labelled placeholder rather than failing.

use std::fmt::Write;

use memorial_core::{Design, ElementTemplate, PlacedElement, TemplateLibrary};

use crate::error::{RenderError, RenderResult};

/// Configuration for raster export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
}

impl Default for ExportConfig {
    /// The storefront's fixed 3:4 print export on a black background.
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1600,
            background: [0, 0, 0, 255],
        }
    }
}

/// Exports a [`Design`] to SVG and PNG.
#[derive(Debug, Clone)]
pub struct DesignExporter {
    config: ExportConfig,
}

impl DesignExporter {
    /// Create an exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with the default print configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render the design to PNG bytes.
    ///
    /// A pure read of the design; the editable model is never touched.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or PNG encoding fails.
    pub fn render_png(&self, design: &Design, library: &TemplateLibrary) -> RenderResult<Vec<u8>> {
        let svg = self.render_svg(design, library);
        let pixmap = self.rasterize(&svg)?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Render the design to an SVG string.
    ///
    /// Coordinates are scaled from canvas space to the configured output
    /// size; elements are drawn bottom-to-top by z-order with rotation
    /// applied about each element's center.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn render_svg(&self, design: &Design, library: &TemplateLibrary) -> String {
        let out_w = self.config.width.max(1);
        let out_h = self.config.height.max(1);
        let scale_x = out_w as f32 / design.width();
        let scale_y = out_h as f32 / design.height();

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {out_w} {out_h}\">",
        );

        let bg = &self.config.background;
        let bg_alpha = f32::from(bg[3]) / 255.0;
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"rgba({},{},{},{bg_alpha})\"/>",
            bg[0], bg[1], bg[2],
        );

        for element in design.elements_by_z() {
            render_element_svg(&mut svg, element, library.get(&element.template), scale_x, scale_y);
        }

        svg.push_str("</svg>");
        svg
    }

    fn rasterize(&self, svg: &str) -> RenderResult<tiny_skia::Pixmap> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg, &options)
            .map_err(|e| RenderError::Svg(e.to_string()))?;

        let mut pixmap = tiny_skia::Pixmap::new(self.config.width.max(1), self.config.height.max(1))
            .ok_or_else(|| RenderError::Export("failed to allocate pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        Ok(pixmap)
    }
}

/// Render a single placed element.
fn render_element_svg(
    svg: &mut String,
    element: &PlacedElement,
    template: Option<&ElementTemplate>,
    scale_x: f32,
    scale_y: f32,
) {
    let x = element.x * scale_x;
    let y = element.y * scale_y;
    let w = element.size() * scale_x;
    let h = element.size() * scale_y;
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;

    let _ = write!(
        svg,
        "<g transform=\"rotate({} {cx} {cy})\">",
        element.rotation,
    );

    match template.and_then(|t| t.image_url.as_deref()) {
        Some(url) => {
            let href = escape_xml(url);
            let _ = write!(
                svg,
                "<image x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" href=\"{href}\"/>",
            );
        }
        None => {
            // Missing media is not an error: draw a labelled placeholder.
            let label = template.map_or_else(
                || element.template.to_string(),
                |t| t.name.clone(),
            );
            let escaped = escape_xml(&label);
            let font_size = (h / 6.0).clamp(10.0, 48.0);
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"#2a2a2a\" stroke=\"#777\" stroke-width=\"1\"/>\
                 <text x=\"{cx}\" y=\"{cy}\" font-size=\"{font_size}\" fill=\"#bbb\" font-family=\"sans-serif\" text-anchor=\"middle\" dominant-baseline=\"middle\">{escaped}</text>",
            );
        }
    }

    svg.push_str("</g>");
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
