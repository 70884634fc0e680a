//! Transient user notifications.
//!
//! Every failure in the storefront degrades to one of these; nothing is
//! fatal to the process. The queue is FIFO and drained by the shell that
//! renders the toasts.

use std::collections::VecDeque;

/// How a notification should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// A completed action.
    Success,
    /// A reported failure. The user stays able to interact and retry.
    Error,
}

/// One transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Styling severity.
    pub severity: Severity,
    /// Short title.
    pub title: String,
    /// Longer detail line.
    pub detail: String,
}

impl Notification {
    /// Build a notification.
    #[must_use]
    pub fn new(severity: Severity, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// FIFO queue of pending notifications.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notification.
    pub fn push(&mut self, severity: Severity, title: impl Into<String>, detail: impl Into<String>) {
        self.queue.push_back(Notification::new(severity, title, detail));
    }

    /// Take the oldest pending notification.
    pub fn pop(&mut self) -> Option<Notification> {
        self.queue.pop_front()
    }

    /// Number of pending notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
