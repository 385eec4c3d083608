//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them: log to the console, forward to analytics,
//! or record them in a test.

use crate::app::ports::SubmitError;
use crate::carousel::CarouselState;
use crate::widgets::form::ValidationError;
use crate::widgets::theme::Theme;

use super::startup::Feature;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service started; carries the features that initialised.
    Started { features: Vec<Feature> },

    /// A feature was skipped because its page roles are missing.
    FeatureSkipped(Feature),

    /// The loading screen is gone.
    LoaderHidden,

    /// A theme was applied (at start or by the user).
    ThemeApplied(Theme),

    /// The mobile menu opened (`true`) or closed (`false`).
    NavMenu(bool),

    /// A section scrolled into view.
    SectionActive(String),

    /// A portfolio filter was applied.
    FilterApplied { filter: String, shown: usize },

    /// The carousel moved between slides.
    SlideChanged { from: usize, to: usize },

    /// Carousel auto-advance started or stopped.
    PlaybackChanged(CarouselState),

    /// A form submission failed validation.
    FormRejected(ValidationError),

    /// A contact message was delivered.
    FormSent,

    /// Delivering a contact message failed.
    FormFailed(SubmitError),

    /// Every timer was released.
    TornDown { cancelled_timers: usize },
}
