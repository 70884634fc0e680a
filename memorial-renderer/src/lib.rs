//! # Memorial Renderer
//!
//! Renders a [`memorial_core::Design`] to a flattened raster image for
//! sharing and printing. The output is write-only with respect to the
//! editable model: no design metadata is embedded and an exported PNG
//! cannot be reimported.
//!
//! Rendering goes through an SVG intermediate which is rasterized with
//! resvg/tiny-skia.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;

pub use error::{RenderError, RenderResult};
pub use export::{DesignExporter, ExportConfig};
