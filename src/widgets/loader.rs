//! Loading screen.
//!
//! ```text
//!   Showing ──load──▶ Waiting ──LoaderFade──▶ Fading ──LoaderRemove──▶ Removed
//!            (delay = max(0, min_display - elapsed))   (fade_ms)
//! ```

use log::debug;

use crate::app::ports::DomPort;
use crate::scheduler::{Scheduler, TimerId, TimerTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Showing,
    Waiting,
    Fading,
    Removed,
}

#[derive(Debug)]
pub struct Loader {
    phase: LoaderPhase,
    shown_at_ms: u64,
    min_display_ms: u64,
    fade_ms: u64,
    timer: Option<TimerId>,
}

impl Loader {
    /// `shown_at_ms` is the scheduler time the page started.
    pub fn new(shown_at_ms: u64, min_display_ms: u64, fade_ms: u64) -> Self {
        Self {
            phase: LoaderPhase::Showing,
            shown_at_ms,
            min_display_ms,
            fade_ms,
            timer: None,
        }
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// The document finished loading. Later calls are ignored.
    pub fn on_loaded(&mut self, timers: &mut Scheduler) {
        if self.phase != LoaderPhase::Showing {
            return;
        }
        let elapsed = timers.now_ms().saturating_sub(self.shown_at_ms);
        let delay = self.min_display_ms.saturating_sub(elapsed);
        debug!("Loader: fading in {} ms", delay);
        self.timer = Some(timers.schedule_once(delay, TimerTag::LoaderFade));
        self.phase = LoaderPhase::Waiting;
    }

    /// Advance on our own timers. Returns the new phase if it changed.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        timers: &mut Scheduler,
        dom: &mut impl DomPort,
    ) -> Option<LoaderPhase> {
        if self.timer != Some(id) {
            return None;
        }
        match self.phase {
            LoaderPhase::Waiting => {
                dom.fade_out_loader();
                self.timer = Some(timers.schedule_once(self.fade_ms, TimerTag::LoaderRemove));
                self.phase = LoaderPhase::Fading;
            }
            LoaderPhase::Fading => {
                dom.remove_loader();
                self.timer = None;
                self.phase = LoaderPhase::Removed;
            }
            LoaderPhase::Showing | LoaderPhase::Removed => return None,
        }
        Some(self.phase)
    }

    pub fn teardown(&mut self, timers: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
    }
}
