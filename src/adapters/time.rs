//! Page clock adapter.
//!
//! Provides the millisecond page time the pump feeds to the scheduler.
//!
//! - **`feature = "web"`**: `performance.now()` (monotonic), with
//!   `Date.now()` only when the Performance API is missing.
//! - **otherwise**: `std::time::Instant`, for host-side runs and tests.
//!
//! Raw elapsed time goes through a [`StepClamp`]: page time moves forward by
//! at most `max_step_ms` per reading, so a machine sleep or a long-throttled
//! tab is treated as suspended time instead of being replayed in one pump.

use log::debug;

/// Raw elapsed milliseconds to page milliseconds, one bounded step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepClamp {
    max_step_ms: u64,
    last_raw_ms: u64,
    page_ms: u64,
}

impl StepClamp {
    pub fn new(max_step_ms: u64) -> Self {
        Self {
            max_step_ms: max_step_ms.max(1),
            last_raw_ms: 0,
            page_ms: 0,
        }
    }

    /// Feed the latest raw reading; returns the new page time.
    ///
    /// A raw value behind the previous one leaves page time unchanged.
    pub fn advance(&mut self, raw_ms: u64) -> u64 {
        let delta = raw_ms.saturating_sub(self.last_raw_ms);
        self.last_raw_ms = self.last_raw_ms.max(raw_ms);
        if delta > self.max_step_ms {
            debug!(
                "Clock jumped {} ms; page time advances {} ms",
                delta, self.max_step_ms
            );
        }
        self.page_ms += delta.min(self.max_step_ms);
        self.page_ms
    }
}

/// Milliseconds of page time since the behaviours started.
pub struct PageClock {
    #[cfg(feature = "web")]
    performance: Option<web_sys::Performance>,
    #[cfg(feature = "web")]
    origin_ms: f64,
    #[cfg(not(feature = "web"))]
    start: std::time::Instant,
    clamp: StepClamp,
}

impl PageClock {
    pub fn new(max_step_ms: u64) -> Self {
        #[cfg(feature = "web")]
        let performance = web_sys::window().and_then(|w| w.performance());
        #[cfg(feature = "web")]
        let origin_ms = read_js(performance.as_ref());
        Self {
            #[cfg(feature = "web")]
            performance,
            #[cfg(feature = "web")]
            origin_ms,
            #[cfg(not(feature = "web"))]
            start: std::time::Instant::now(),
            clamp: StepClamp::new(max_step_ms),
        }
    }

    /// Current page time. Never goes backwards.
    pub fn now_ms(&mut self) -> u64 {
        let raw = self.raw_ms();
        self.clamp.advance(raw)
    }

    #[cfg(feature = "web")]
    fn raw_ms(&self) -> u64 {
        (read_js(self.performance.as_ref()) - self.origin_ms).max(0.0) as u64
    }

    #[cfg(not(feature = "web"))]
    fn raw_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[cfg(feature = "web")]
fn read_js(performance: Option<&web_sys::Performance>) -> f64 {
    performance.map_or_else(js_sys::Date::now, web_sys::Performance::now)
}
