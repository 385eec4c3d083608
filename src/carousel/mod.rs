//! Testimonial carousel controller.
//!
//! ```text
//!              pause(reason)                       resume(reason)
//!   ┌─────────┐ ───────────▶ ┌────────┐  set empty / last-event-wins
//!   │ Running │              │ Paused │ ──────────────────────────┐
//!   └─────────┘ ◀─────────── └────────┘                           │
//!        ▲            start_autoplay()                            │
//!        └────────────────────────────────────────────────────────┘
//!
//!   current index: show_slide / next / previous / indicator click,
//!   allowed in both states
//! ```
//!
//! `Running` is exactly "an auto-advance timer is pending". Starting always
//! cancels the previous timer first, so at most one is ever outstanding.

pub mod pause;

use log::debug;

use crate::app::ports::DomPort;
use crate::scheduler::{Scheduler, TimerId, TimerTag};

use pause::{PausePolicy, PauseReason, PauseSet};

/// The slice of the page the carousel writes to.
pub trait SlideView {
    fn mark_slide(&mut self, index: usize, active: bool);
    fn mark_indicator(&mut self, index: usize, active: bool);
}

impl<T: DomPort + ?Sized> SlideView for T {
    fn mark_slide(&mut self, index: usize, active: bool) {
        self.set_slide_active(index, active);
    }

    fn mark_indicator(&mut self, index: usize, active: bool) {
        self.set_indicator_active(index, active);
    }
}

/// Auto-advance state, orthogonal to the current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselState {
    Running,
    Paused,
}

pub struct Carousel {
    slide_count: usize,
    indicator_count: usize,
    current: usize,
    timer: Option<TimerId>,
    interval_ms: u64,
    policy: PausePolicy,
    paused: PauseSet,
}

impl Carousel {
    /// The slide count is fixed for the life of the page.
    pub fn new(
        slide_count: usize,
        indicator_count: usize,
        interval_ms: u64,
        policy: PausePolicy,
    ) -> Self {
        Self {
            slide_count,
            indicator_count,
            current: 0,
            timer: None,
            interval_ms,
            policy,
            paused: PauseSet::empty(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn state(&self) -> CarouselState {
        if self.timer.is_some() {
            CarouselState::Running
        } else {
            CarouselState::Paused
        }
    }

    pub fn pause_reasons(&self) -> PauseSet {
        self.paused
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    // ── Navigation ────────────────────────────────────────────

    /// Activate one slide and its indicator.
    ///
    /// `index >= N` wraps to 0 and `index < 0` wraps to N-1. With no slides
    /// this does nothing.
    pub fn show_slide(&mut self, index: isize, view: &mut impl SlideView) {
        if self.slide_count == 0 {
            return;
        }
        let n = self.slide_count as isize;
        let target = if index >= n {
            0
        } else if index < 0 {
            self.slide_count - 1
        } else {
            index as usize
        };

        for i in 0..self.slide_count {
            view.mark_slide(i, false);
        }
        for i in 0..self.indicator_count {
            view.mark_indicator(i, false);
        }
        view.mark_slide(target, true);
        if target < self.indicator_count {
            view.mark_indicator(target, true);
        }
        self.current = target;
    }

    pub fn next(&mut self, view: &mut impl SlideView) {
        self.show_slide(self.current as isize + 1, view);
    }

    pub fn previous(&mut self, view: &mut impl SlideView) {
        self.show_slide(self.current as isize - 1, view);
    }

    // ── Auto-advance ──────────────────────────────────────────

    /// (Re)start auto-advance. Any pending timer is cancelled first.
    pub fn start_autoplay(&mut self, timers: &mut Scheduler) {
        self.stop_autoplay(timers);
        if self.slide_count == 0 {
            return;
        }
        self.timer = Some(timers.schedule_repeating(self.interval_ms, TimerTag::CarouselAdvance));
    }

    /// Cancel auto-advance. Safe to call when not running.
    pub fn stop_autoplay(&mut self, timers: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
    }

    /// Handle a fired timer. Returns `true` if it was ours.
    pub fn on_timer(&mut self, id: TimerId, view: &mut impl SlideView) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.next(view);
        true
    }

    // ── Pause triggers ────────────────────────────────────────

    pub fn pause(&mut self, reason: PauseReason, timers: &mut Scheduler) {
        self.paused.insert(reason);
        self.stop_autoplay(timers);
        debug!("Carousel: paused ({reason})");
    }

    /// Clear one pause reason and resume according to the policy.
    pub fn resume(&mut self, reason: PauseReason, timers: &mut Scheduler) {
        let had = self.paused.remove(reason);
        match self.policy {
            PausePolicy::LastEventWins => {
                self.paused.clear();
                self.start_autoplay(timers);
            }
            PausePolicy::Tracked => {
                if !self.paused.is_empty() {
                    debug!("Carousel: {reason} cleared, still paused by {:#05b}", self.paused.bits());
                    return;
                }
                if had || self.timer.is_none() {
                    self.start_autoplay(timers);
                }
            }
        }
    }

    /// Release the timer for good.
    pub fn teardown(&mut self, timers: &mut Scheduler) {
        self.stop_autoplay(timers);
        self.paused.clear();
    }
}
