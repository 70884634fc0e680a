//! Analytics bootstrap with an idempotent initialize-once contract.
//!
//! The storefront reports page hits and conversion goals to a third-party
//! counter. Initialization is process-wide and guarded: the first call
//! installs the counter, repeats are safe no-ops, and there is no
//! teardown. Reporting calls made before initialization are silently
//! dropped, mirroring how the tag script behaves before it loads.
//!
//! Events are queued in-process; the embedding shell drains them to the
//! actual transport.

use std::sync::{Mutex, OnceLock};

/// Default counter ID baked into the storefront build.
pub const DEFAULT_COUNTER_ID: u64 = 106_114_603;

/// One reported analytics event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    /// A page hit.
    Hit {
        /// Counter the hit belongs to.
        counter_id: u64,
        /// Page URL.
        url: String,
    },
    /// A conversion goal was reached.
    Goal {
        /// Counter the goal belongs to.
        counter_id: u64,
        /// Goal identifier.
        target: String,
    },
}

struct Analytics {
    counter_id: u64,
    pending: Mutex<Vec<AnalyticsEvent>>,
}

static ANALYTICS: OnceLock<Analytics> = OnceLock::new();

/// Initialize the analytics counter.
///
/// Idempotent: the first call installs the counter and returns `true`;
/// every later call is a no-op returning `false`, regardless of the ID it
/// passes.
pub fn init(counter_id: u64) -> bool {
    let mut installed = false;
    let analytics = ANALYTICS.get_or_init(|| {
        installed = true;
        Analytics {
            counter_id,
            pending: Mutex::new(Vec::new()),
        }
    });
    if installed {
        tracing::info!(counter_id = analytics.counter_id, "analytics initialized");
    }
    installed
}

/// The installed counter ID, if initialization has happened.
#[must_use]
pub fn counter_id() -> Option<u64> {
    ANALYTICS.get().map(|a| a.counter_id)
}

/// Report a page hit. No-op before [`init`].
pub fn hit(url: impl Into<String>) {
    let Some(analytics) = ANALYTICS.get() else {
        return;
    };
    let event = AnalyticsEvent::Hit {
        counter_id: analytics.counter_id,
        url: url.into(),
    };
    push(analytics, event);
}

/// Report a reached conversion goal. No-op before [`init`].
pub fn reach_goal(target: impl Into<String>) {
    let Some(analytics) = ANALYTICS.get() else {
        return;
    };
    let event = AnalyticsEvent::Goal {
        counter_id: analytics.counter_id,
        target: target.into(),
    };
    push(analytics, event);
}

/// Drain all queued events for delivery. Empty before [`init`].
#[must_use]
pub fn drain_events() -> Vec<AnalyticsEvent> {
    let Some(analytics) = ANALYTICS.get() else {
        return Vec::new();
    };
    let mut pending = analytics
        .pending
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    std::mem::take(&mut *pending)
}

fn push(analytics: &Analytics, event: AnalyticsEvent) {
    tracing::debug!(?event, "analytics event");
    analytics
        .pending
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .push(event);
}
