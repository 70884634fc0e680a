//! # Memorial Core
//!
//! Design model for the monument constructor: element templates, placed
//! elements, the editing session, the canonical interchange schema, and
//! local-device persistence for designs and gallery state.
//!
//! The [`Design`] is owned exclusively by one editing session. Toolbar and
//! gesture operations are requests against that single owner; there are no
//! concurrent writers. Wholesale replacement (import) bumps a generation
//! counter so that stale in-flight request results can be discarded.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod design;
pub mod editor;
pub mod element;
pub mod error;
pub mod gallery;
pub mod schema;
pub mod store;

pub use design::Design;
pub use editor::{DragOutcome, EditorSession};
pub use element::{
    ElementId, ElementTemplate, PlacedElement, TemplateCategory, TemplateId, TemplateLibrary,
    BASE_SIZE,
};
pub use error::{DesignError, DesignResult};
pub use gallery::{EventBus, GalleryItem, Lightbox, MediaKind, Subscription, UiEvent};
pub use schema::{DesignDocument, PlacedElementRecord, SCHEMA_VERSION};
pub use store::{DesignStore, SavedDesign, StoreError, DESIGNS_KEY, GALLERY_KEY};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
