//! Inbound commands to the application service.
//!
//! Programmatic requests from outside the page's own listeners: the
//! functions exported to JavaScript, or a test driving the service. The
//! [`AppService`](super::service::AppService) interprets and acts upon
//! them the same way it handles the equivalent user input.

use crate::widgets::theme::Theme;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Apply and persist a theme.
    SetTheme(Theme),

    /// Flip the theme, as the toggle button does.
    ToggleTheme,

    /// Jump the carousel to a slide (wraps like an indicator click).
    ShowSlide(isize),

    /// Advance the carousel one slide.
    NextSlide,

    /// Move the carousel back one slide.
    PreviousSlide,

    /// (Re)start carousel auto-advance.
    StartAutoplay,

    /// Stop carousel auto-advance.
    StopAutoplay,

    /// Apply a portfolio filter by its value (`all`, a category).
    Filter(String),
}
