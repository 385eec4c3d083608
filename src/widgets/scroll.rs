//! Scroll-linked behaviours: compact header, back-to-top button and
//! in-page anchor scrolling.
//!
//! Scroll events arrive far faster than the page needs to react, so both
//! scroll consumers sit behind a [`Throttle`]: the first event opens a
//! window, later events only update the recorded offset, and when the window
//! closes the consumer sees the latest offset.

use crate::app::ports::DomPort;
use crate::scheduler::{Scheduler, TimerId, TimerTag};

// ───────────────────────────────────────────────────────────────
// Throttle
// ───────────────────────────────────────────────────────────────

/// Trailing-edge throttle over a scroll offset.
#[derive(Debug)]
pub struct Throttle {
    window_ms: u64,
    tag: TimerTag,
    pending: Option<TimerId>,
    latest: f64,
}

impl Throttle {
    pub fn new(window_ms: u64, tag: TimerTag) -> Self {
        Self {
            window_ms,
            tag,
            pending: None,
            latest: 0.0,
        }
    }

    /// Record an offset; opens a window if none is open.
    pub fn offer(&mut self, y: f64, timers: &mut Scheduler) {
        self.latest = y;
        if self.pending.is_none() {
            self.pending = Some(timers.schedule_once(self.window_ms, self.tag));
        }
    }

    /// The window closed: yields the latest offset if `id` is ours.
    pub fn on_timer(&mut self, id: TimerId) -> Option<f64> {
        if self.pending != Some(id) {
            return None;
        }
        self.pending = None;
        Some(self.latest)
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self, timers: &mut Scheduler) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Header scroll state
// ───────────────────────────────────────────────────────────────

/// Compact header once the page is scrolled past a threshold.
#[derive(Debug)]
pub struct HeaderScroll {
    throttle: Throttle,
    threshold_px: f64,
    scrolled: bool,
}

impl HeaderScroll {
    pub fn new(threshold_px: f64, throttle_ms: u64) -> Self {
        Self {
            throttle: Throttle::new(throttle_ms, TimerTag::HeaderThrottle),
            threshold_px,
            scrolled: false,
        }
    }

    pub fn on_scroll(&mut self, y: f64, timers: &mut Scheduler) {
        self.throttle.offer(y, timers);
    }

    /// Returns `true` if the timer belonged to this throttle.
    pub fn on_timer(&mut self, id: TimerId, dom: &mut impl DomPort) -> bool {
        let Some(y) = self.throttle.on_timer(id) else {
            return false;
        };
        let scrolled = y > self.threshold_px;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            dom.set_header_scrolled(scrolled);
        }
        true
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn teardown(&mut self, timers: &mut Scheduler) {
        self.throttle.cancel(timers);
    }
}

// ───────────────────────────────────────────────────────────────
// Back-to-top
// ───────────────────────────────────────────────────────────────

/// Back-to-top button: visible past a threshold, scrolls home on click.
#[derive(Debug)]
pub struct BackToTop {
    throttle: Throttle,
    threshold_px: f64,
    visible: bool,
}

impl BackToTop {
    pub fn new(threshold_px: f64, throttle_ms: u64) -> Self {
        Self {
            throttle: Throttle::new(throttle_ms, TimerTag::BackToTopThrottle),
            threshold_px,
            visible: false,
        }
    }

    pub fn on_scroll(&mut self, y: f64, timers: &mut Scheduler) {
        self.throttle.offer(y, timers);
    }

    pub fn on_timer(&mut self, id: TimerId, dom: &mut impl DomPort) -> bool {
        let Some(y) = self.throttle.on_timer(id) else {
            return false;
        };
        let visible = y > self.threshold_px;
        if visible != self.visible {
            self.visible = visible;
            dom.set_back_to_top_visible(visible);
        }
        true
    }

    pub fn on_click(&self, dom: &mut impl DomPort) {
        dom.scroll_to(0.0);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn teardown(&mut self, timers: &mut Scheduler) {
        self.throttle.cancel(timers);
    }
}

// ───────────────────────────────────────────────────────────────
// Anchor smooth scroll
// ───────────────────────────────────────────────────────────────

/// In-page anchor links, offset for the fixed header.
#[derive(Debug, Clone, Copy)]
pub struct AnchorScroll {
    offset_px: f64,
}

impl AnchorScroll {
    pub fn new(offset_px: f64) -> Self {
        Self { offset_px }
    }

    /// Whether a click on this `href` is handled here (and the browser's
    /// default jump must be suppressed). A bare `#` is left alone.
    pub fn intercepts(href: &str) -> bool {
        href.starts_with('#') && href != "#"
    }

    /// Scroll destination for a clicked anchor, if there is one.
    pub fn destination(&self, href: &str, target_top: Option<f64>) -> Option<f64> {
        if !Self::intercepts(href) {
            return None;
        }
        target_top.map(|top| (top - self.offset_px).max(0.0))
    }

    /// Returns `true` if the page scrolled.
    pub fn on_click(&self, href: &str, target_top: Option<f64>, dom: &mut impl DomPort) -> bool {
        match self.destination(href, target_top) {
            Some(top) => {
                dom.scroll_to(top);
                true
            }
            None => false,
        }
    }
}
