//! # Memorial App
//!
//! The storefront session layer: owns the editing session, local store,
//! raster exporter, and backend client, and exposes the canvas toolbar
//! operations over them. Everything runs on the single UI event queue;
//! the only asynchronous suspension points are the backend calls, whose
//! results are checked against the design generation so an intervening
//! import discards stale responses.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod icon;
pub mod notify;
pub mod session;

pub use icon::{glyph, Icon};
pub use notify::{Notification, Notifications, Severity};
pub use session::{
    DesignExport, EstimateOutcome, ImportError, PendingCalculation, PngExport, StudioError,
    StudioSession,
};
