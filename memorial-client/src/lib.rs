//! # Memorial Client
//!
//! The storefront's typed boundary to its external backend functions:
//! product catalog, gallery feed, lead capture, and the design price
//! calculation service, plus the analytics bootstrap.
//!
//! Every response shape is an explicit validated record; malformed
//! payloads are rejected at the boundary instead of propagating undefined
//! fields. All requests are best-effort and single-attempt: failures are
//! surfaced for the user to retry, never retried automatically.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod calculation;
pub mod client;
pub mod error;
pub mod gallery;
pub mod leads;
pub mod products;

pub use analytics::{AnalyticsEvent, DEFAULT_COUNTER_ID};
pub use calculation::PriceEstimate;
pub use client::{Endpoints, StorefrontClient};
pub use error::{ApiError, ApiResult};
pub use leads::{LeadReceipt, LeadRequest, LeadSource};
pub use products::{search, Product, SearchOutcome, MIN_QUERY_LEN, SEARCH_RESULT_CAP};
