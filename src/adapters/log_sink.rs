//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade (the browser console once `console_log` is installed).
//! An analytics adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] on one line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { features } => {
                info!("START | {} features: {:?}", features.len(), features);
            }
            AppEvent::FeatureSkipped(feature) => {
                info!("SKIP  | {:?}", feature);
            }
            AppEvent::LoaderHidden => {
                info!("LOAD  | loader removed");
            }
            AppEvent::ThemeApplied(theme) => {
                info!("THEME | {}", theme);
            }
            AppEvent::NavMenu(open) => {
                info!("NAV   | menu {}", if *open { "open" } else { "closed" });
            }
            AppEvent::SectionActive(id) => {
                info!("NAV   | section #{}", id);
            }
            AppEvent::FilterApplied { filter, shown } => {
                info!("FILTR | {} ({} shown)", filter, shown);
            }
            AppEvent::SlideChanged { from, to } => {
                info!("SLIDE | {} -> {}", from, to);
            }
            AppEvent::PlaybackChanged(state) => {
                info!("SLIDE | {:?}", state);
            }
            AppEvent::FormRejected(reason) => {
                info!("FORM  | rejected: {}", reason);
            }
            AppEvent::FormSent => {
                info!("FORM  | sent");
            }
            AppEvent::FormFailed(e) => {
                warn!("FORM  | failed: {}", e);
            }
            AppEvent::TornDown { cancelled_timers } => {
                info!("STOP  | {} timers cancelled", cancelled_timers);
            }
        }
    }
}
