//! Gallery items and the full-screen lightbox overlay.
//!
//! The lightbox subscribes to the global input-event stream for as long as
//! it is open; dropping it (closing the overlay) deterministically releases
//! the subscription.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use serde::{Deserialize, Serialize};

/// Kind of media a gallery item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A still image.
    Image,
    /// A video clip.
    Video,
}

/// One entry in the works gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Stable identifier.
    pub id: String,
    /// Media kind.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Media URL.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Short description.
    pub desc: String,
}

impl GalleryItem {
    /// Create an image item.
    #[must_use]
    pub fn image(
        id: impl Into<String>,
        url: impl Into<String>,
        title: impl Into<String>,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: MediaKind::Image,
            url: url.into(),
            title: title.into(),
            desc: desc.into(),
        }
    }

    /// The built-in gallery shown when no items have been saved locally.
    #[must_use]
    pub fn default_items() -> Vec<Self> {
        vec![
            Self::image(
                "default-1",
                "https://cdn.example.com/gallery/vertical-stele.jpg",
                "Vertical stele",
                "Black gabbro, hand-engraved portrait",
            ),
            Self::image(
                "default-2",
                "https://cdn.example.com/gallery/double-monument.jpg",
                "Double monument",
                "Family composition with flower bed",
            ),
            Self::image(
                "default-3",
                "https://cdn.example.com/gallery/memorial-complex.jpg",
                "Memorial complex",
                "Granite paving and fencing",
            ),
        ]
    }
}

/// A global UI input event relevant to overlay dismissal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// The Escape key was pressed.
    EscapeKey,
    /// A pointer-down happened; `inside_overlay` says whether it landed
    /// within the open overlay's content area.
    PointerDown {
        /// Whether the press landed inside the overlay content.
        inside_overlay: bool,
    },
}

type Handler = Box<dyn Fn(&UiEvent) + Send>;

/// Process-wide input-event stream for overlay components.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Arc<Mutex<Vec<(u64, Handler)>>>,
    next_id: Arc<Mutex<u64>>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler for the lifetime of the returned guard.
    ///
    /// The handler is removed when the [`Subscription`] is dropped.
    #[must_use]
    pub fn subscribe(&self, handler: impl Fn(&UiEvent) + Send + 'static) -> Subscription {
        let id = {
            let mut next = self.next_id.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            *next += 1;
            *next
        };
        self.handlers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((id, Box::new(handler)));
        Subscription {
            id,
            handlers: Arc::downgrade(&self.handlers),
        }
    }

    /// Dispatch an event to every live subscriber, in subscription order.
    pub fn dispatch(&self, event: &UiEvent) {
        let handlers = self
            .handlers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for (_, handler) in handlers.iter() {
            handler(event);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Guard for a handler registered on an [`EventBus`]. Unsubscribes on drop.
pub struct Subscription {
    id: u64,
    handlers: Weak<Mutex<Vec<(u64, Handler)>>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            handlers
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Full-screen single-item overlay, dismissible by Escape or a click
/// outside the content area.
#[derive(Debug)]
pub struct Lightbox {
    item: GalleryItem,
    dismissed: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl Lightbox {
    /// Open the overlay over `item`, holding an input subscription for the
    /// overlay's lifetime.
    #[must_use]
    pub fn open(item: GalleryItem, bus: &EventBus) -> Self {
        let dismissed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&dismissed);
        let subscription = bus.subscribe(move |event| {
            let dismiss = matches!(
                event,
                UiEvent::EscapeKey
                    | UiEvent::PointerDown {
                        inside_overlay: false
                    }
            );
            if dismiss {
                flag.store(true, Ordering::SeqCst);
            }
        });
        Self {
            item,
            dismissed,
            _subscription: subscription,
        }
    }

    /// The item being shown.
    #[must_use]
    pub fn item(&self) -> &GalleryItem {
        &self.item
    }

    /// Whether a dismissal input has arrived. The owner drops the lightbox
    /// when this turns true, which releases the subscription.
    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> GalleryItem {
        GalleryItem::image("g1", "https://example.com/a.jpg", "A", "desc")
    }

    #[test]
    fn test_escape_dismisses() {
        let bus = EventBus::new();
        let lightbox = Lightbox::open(item(), &bus);
        assert!(!lightbox.is_dismissed());

        bus.dispatch(&UiEvent::EscapeKey);
        assert!(lightbox.is_dismissed());
    }

    #[test]
    fn test_click_outside_dismisses_inside_does_not() {
        let bus = EventBus::new();
        let lightbox = Lightbox::open(item(), &bus);

        bus.dispatch(&UiEvent::PointerDown {
            inside_overlay: true,
        });
        assert!(!lightbox.is_dismissed());

        bus.dispatch(&UiEvent::PointerDown {
            inside_overlay: false,
        });
        assert!(lightbox.is_dismissed());
    }

    #[test]
    fn test_subscription_released_on_close() {
        let bus = EventBus::new();
        let lightbox = Lightbox::open(item(), &bus);
        assert_eq!(bus.subscriber_count(), 1);

        drop(lightbox);
        assert_eq!(bus.subscriber_count(), 0);
        // Dispatch after close must not panic or resurrect the handler.
        bus.dispatch(&UiEvent::EscapeKey);
    }
}
