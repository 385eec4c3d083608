//! Port traits: the hexagonal boundary between page logic and the browser.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (DOM writer, local storage, submission relay, event
//! sinks, config sources) implement these traits. The
//! [`AppService`](super::service::AppService) consumes them via generics, so
//! the domain core never touches `web_sys` directly.
//!
//! The DOM port is write-only and addressed by structural role, not by
//! markup. Anything the domain needs to *read* from the page arrives either
//! in the [`PageLayout`](super::layout::PageLayout) discovered at start or
//! inside a [`PageEvent`](crate::events::PageEvent).

use crate::config::PageConfig;
use crate::observers::WatchTarget;
use crate::scheduler::{Scheduler, TimerId, TimerTag};
use crate::widgets::form::{ContactForm, FormStatus};
use crate::widgets::particles::{ParticleId, ParticleStyle};
use crate::widgets::theme::Theme;

// ───────────────────────────────────────────────────────────────
// DOM port (driven adapter: domain → page)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to change what the page shows.
///
/// Indices refer to the order the adapter reported in the page layout.
/// Out-of-range indices must be ignored by implementations.
pub trait DomPort {
    /// Start the loader fade-out transition.
    fn fade_out_loader(&mut self);

    /// Take the loader out of the layout entirely.
    fn remove_loader(&mut self);

    /// Toggle the compact ("scrolled") header state.
    fn set_header_scrolled(&mut self, scrolled: bool);

    /// Open or close the mobile navigation menu (including `aria-expanded`).
    fn set_nav_open(&mut self, open: bool);

    /// Mark one navigation link active or inactive.
    fn set_nav_link_active(&mut self, index: usize, active: bool);

    /// Apply the colour theme to the document and swap the toggle icon.
    fn apply_theme(&mut self, theme: Theme);

    /// Replace the animated hero text.
    fn set_typed_text(&mut self, text: &str);

    /// Append one particle to the particle container.
    fn spawn_particle(&mut self, id: ParticleId, style: &ParticleStyle);

    /// Remove a particle if it is still attached.
    fn remove_particle(&mut self, id: ParticleId);

    /// Mark a filter button selected (`aria-selected`) or not.
    fn set_filter_selected(&mut self, index: usize, selected: bool);

    /// Show (with the fade-in transition) or hide a portfolio item.
    fn set_portfolio_item_visible(&mut self, index: usize, visible: bool);

    /// Mark a carousel slide active or inactive.
    fn set_slide_active(&mut self, index: usize, active: bool);

    /// Mark a carousel indicator active or inactive.
    fn set_indicator_active(&mut self, index: usize, active: bool);

    /// Put the submit control into (or out of) its "Sending..." state.
    fn set_form_busy(&mut self, busy: bool);

    /// Show a status message below the contact form.
    fn show_form_status(&mut self, status: &FormStatus);

    /// Hide the contact form status message.
    fn hide_form_status(&mut self);

    /// Clear every contact form field.
    fn reset_form(&mut self);

    /// Show or hide the back-to-top button.
    fn set_back_to_top_visible(&mut self, visible: bool);

    /// Smooth-scroll the window to an absolute offset.
    fn scroll_to(&mut self, top_px: f64);

    /// Play the reveal animation on a watched element.
    fn reveal(&mut self, index: usize);

    /// Start the fill animation of a skill bar.
    fn fill_skill_bar(&mut self, index: usize);

    /// Record that a lazily loaded image entered the viewport.
    fn mark_image_seen(&mut self, index: usize);

    /// Detach the intersection watcher from one element.
    fn stop_watching(&mut self, target: WatchTarget);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ local storage)
// ───────────────────────────────────────────────────────────────

/// Persistent string key-value storage (browser local storage).
///
/// Only the theme preference is persisted; values must round-trip exactly.
pub trait StoragePort {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Returns `Ok(())` even if the key didn't exist.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Submission port (driven adapter: domain → message relay)
// ───────────────────────────────────────────────────────────────

/// The external collaborator that actually delivers a contact message
/// (an email relay API in a real deployment).
pub trait SubmitPort {
    /// Deliver a validated message.
    fn deliver(&mut self, form: &ContactForm) -> Result<(), SubmitError>;
}

/// Everything the service needs from the page side, bundled so one adapter
/// object can be passed around (the browser adapter implements all three).
pub trait PagePorts: DomPort + StoragePort + SubmitPort {}

impl<T: DomPort + StoragePort + SubmitPort> PagePorts for T {}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (console, analytics).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads page configuration.
///
/// Returns [`PageConfig::default()`] when the page carries no override.
/// Callers validate the result with [`PageConfig::validate`].
pub trait ConfigPort {
    fn load(&self) -> Result<PageConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Timer delegate (decouples the scheduler from the widgets)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the scheduler invokes when a timer fires.
///
/// The scheduler itself is handed back so the delegate can start or cancel
/// timers from inside the callback.
pub trait TimerDelegate {
    fn on_timer_fired(&mut self, timers: &mut Scheduler, id: TimerId, tag: TimerTag);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The embedded document is not valid JSON for [`PageConfig`].
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is disabled (private mode, sandboxed iframe, no window).
    Unavailable,
    /// Quota exceeded.
    Full,
    /// Any other backend failure.
    Backend(String),
}

/// Errors from [`SubmitPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The relay could not be reached.
    Unreachable,
    /// The relay answered with a rejection.
    Rejected(String),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Full => write!(f, "storage full"),
            Self::Backend(msg) => write!(f, "backend error: {}", msg),
        }
    }
}

impl core::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unreachable => write!(f, "relay unreachable"),
            Self::Rejected(reason) => write!(f, "relay rejected message: {}", reason),
        }
    }
}
