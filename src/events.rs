//! Inbound page events.
//!
//! Events are produced by the browser adapter's listeners:
//! - DOM input (clicks, scroll, pointer and focus moves, form submit)
//! - Document lifecycle (load, visibility changes)
//! - Intersection observers (elements entering the viewport)
//!
//! They are consumed by the pump, which hands them to the
//! [`AppService`](crate::app::service::AppService) one at a time in FIFO
//! order.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ DOM listener │────▶│              │     │              │
//! │ Observer     │────▶│  EventQueue  │────▶│  Pump        │
//! │ Lifecycle    │────▶│  (bounded)   │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::Deque;
use log::warn;

use crate::observers::WatchTarget;
use crate::widgets::form::ContactForm;

/// Maximum number of pending events between two pump ticks.
pub const EVENT_QUEUE_CAP: usize = 64;

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    // ── Document lifecycle ────────────────────────────────
    /// The window `load` event fired.
    Loaded,
    /// The page became hidden (`true`) or visible again (`false`).
    VisibilityChanged { hidden: bool },

    // ── Scrolling / navigation ────────────────────────────
    /// Window scrolled to this vertical offset (px).
    Scrolled { y: f64 },
    /// Mobile navigation toggle clicked.
    NavToggleClicked,
    /// A navigation link was clicked.
    NavLinkClicked(usize),
    /// A click landed outside both the navigation menu and its toggle.
    ClickedOutsideNav,
    /// An in-page anchor was clicked. `target_top` is the absolute top
    /// offset of the element the anchor points to, if it exists.
    AnchorClicked { href: String, target_top: Option<f64> },
    /// Back-to-top button clicked.
    BackToTopClicked,

    // ── Widgets ───────────────────────────────────────────
    /// Theme toggle clicked.
    ThemeToggleClicked,
    /// Portfolio filter button clicked.
    FilterClicked(usize),
    /// Carousel previous control.
    CarouselPrevious,
    /// Carousel next control.
    CarouselNext,
    /// Carousel indicator clicked.
    IndicatorClicked(usize),
    /// Pointer entered (`true`) or left (`false`) the carousel region.
    CarouselHover(bool),
    /// Keyboard focus entered (`true`) or left (`false`) the carousel region.
    CarouselFocus(bool),
    /// The contact form was submitted with these raw field values.
    FormSubmitted(ContactForm),

    // ── Observers ─────────────────────────────────────────
    /// A watched element crossed its visibility threshold.
    Intersected { target: WatchTarget, visible: bool },
}

/// Bounded FIFO of pending page events.
///
/// Listeners push, the pump drains. A scroll right behind another scroll
/// replaces it, since only the latest offset matters, so a scroll burst
/// takes one slot. When full, new events are dropped and counted rather
/// than growing without bound.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: Deque<PageEvent, EVENT_QUEUE_CAP>,
    dropped: u32,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event. Returns `false` if the queue is full (event dropped).
    pub fn push(&mut self, event: PageEvent) -> bool {
        if let (PageEvent::Scrolled { y }, Some(PageEvent::Scrolled { y: last })) =
            (&event, self.queue.back_mut())
        {
            *last = *y;
            return true;
        }
        match self.queue.push_back(event) {
            Ok(()) => true,
            Err(event) => {
                self.dropped = self.dropped.saturating_add(1);
                warn!("Event queue full, dropped {:?}", event);
                false
            }
        }
    }

    /// Pop the oldest event.
    pub fn pop(&mut self) -> Option<PageEvent> {
        self.queue.pop_front()
    }

    /// Drain all pending events into a callback, oldest first.
    pub fn drain(&mut self, mut handler: impl FnMut(PageEvent)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total events dropped because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
