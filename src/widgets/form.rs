//! Contact form: validation, delayed delivery and status display.
//!
//! ```text
//!   Idle ──submit (valid)──▶ Sending ──FormDelivery──▶ deliver() ──▶ Idle
//!     │                        │                         ok: success + reset
//!     │ submit (invalid)       │ submit: ignored         err: error, keep values
//!     ▼                        ▼
//!   error status           (one delivery in flight)
//!
//!   every status: shown now, hidden after display_ms (one hide timer)
//! ```
//!
//! Teardown cancels the pending delivery, so a late completion can never
//! reach a page that is gone.

use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::Regex;

use crate::app::ports::{DomPort, SubmitError, SubmitPort};
use crate::scheduler::{Scheduler, TimerId, TimerTag};

pub const MSG_MISSING_FIELDS: &str = "Please fill in all required fields.";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MSG_SENT: &str = "Message sent successfully! I'll get back to you soon.";
pub const MSG_SEND_FAILED: &str = "Sorry, there was an error sending your message. Please try again.";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex"));

/// `local@domain.tld` with no whitespace and exactly the `@` structure the
/// page accepts.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

// ───────────────────────────────────────────────────────────────
// Fields and validation
// ───────────────────────────────────────────────────────────────

/// Raw (or trimmed) contact form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            name: name.to_owned(),
            email: email.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
        }
    }

    /// Copy with every field trimmed.
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.name.trim(),
            self.email.trim(),
            self.subject.trim(),
            self.message.trim(),
        )
    }

    /// Trim, then check required fields and the email format.
    /// Returns the trimmed form on success.
    pub fn validate(&self) -> Result<Self, ValidationError> {
        let form = self.trimmed();
        if form.name.is_empty()
            || form.email.is_empty()
            || form.subject.is_empty()
            || form.message.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&form.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields,
    InvalidEmail,
}

impl ValidationError {
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingFields => MSG_MISSING_FIELDS,
            Self::InvalidEmail => MSG_INVALID_EMAIL,
        }
    }
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

// ───────────────────────────────────────────────────────────────
// Status
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    /// CSS modifier class.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Message shown below the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormStatus {
    pub kind: StatusKind,
    pub message: &'static str,
}

impl FormStatus {
    pub const fn error(message: &'static str) -> Self {
        Self {
            kind: StatusKind::Error,
            message,
        }
    }

    pub const fn success(message: &'static str) -> Self {
        Self {
            kind: StatusKind::Success,
            message,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// What happened to a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the error status is showing.
    Rejected(ValidationError),
    /// Valid; delivery is scheduled.
    Sending,
    /// A delivery is already in flight.
    Ignored,
}

/// Result of a completed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed(SubmitError),
}

pub struct FormController {
    submit_delay_ms: u64,
    display_ms: u64,
    in_flight: Option<(TimerId, ContactForm)>,
    hide_timer: Option<TimerId>,
    status: Option<FormStatus>,
}

impl FormController {
    pub fn new(submit_delay_ms: u64, display_ms: u64) -> Self {
        Self {
            submit_delay_ms,
            display_ms,
            in_flight: None,
            hide_timer: None,
            status: None,
        }
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Status currently on screen.
    pub fn status(&self) -> Option<FormStatus> {
        self.status
    }

    pub fn submit(
        &mut self,
        raw: &ContactForm,
        timers: &mut Scheduler,
        dom: &mut impl DomPort,
    ) -> SubmitOutcome {
        if self.in_flight.is_some() {
            debug!("Form: submit ignored, delivery in flight");
            return SubmitOutcome::Ignored;
        }
        match raw.validate() {
            Err(e) => {
                self.show_status(FormStatus::error(e.message()), timers, dom);
                SubmitOutcome::Rejected(e)
            }
            Ok(form) => {
                dom.set_form_busy(true);
                let id = timers.schedule_once(self.submit_delay_ms, TimerTag::FormDelivery);
                self.in_flight = Some((id, form));
                SubmitOutcome::Sending
            }
        }
    }

    /// Show a status and (re)start its hide countdown.
    pub fn show_status(&mut self, status: FormStatus, timers: &mut Scheduler, dom: &mut impl DomPort) {
        if let Some(old) = self.hide_timer.take() {
            timers.cancel(old);
        }
        dom.show_form_status(&status);
        self.status = Some(status);
        self.hide_timer = Some(timers.schedule_once(self.display_ms, TimerTag::FormStatusHide));
    }

    /// Delivery or hide timer fired. Returns the delivery result when a
    /// delivery completed.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        timers: &mut Scheduler,
        ports: &mut (impl DomPort + SubmitPort),
    ) -> Option<Delivery> {
        if self.hide_timer == Some(id) {
            self.hide_timer = None;
            self.status = None;
            ports.hide_form_status();
            return None;
        }

        let form = match self.in_flight.take() {
            Some((pending, form)) if pending == id => form,
            other => {
                self.in_flight = other;
                return None;
            }
        };

        let delivery = match ports.deliver(&form) {
            Ok(()) => {
                info!("Form: message delivered");
                self.show_status(FormStatus::success(MSG_SENT), timers, ports);
                ports.reset_form();
                Delivery::Sent
            }
            Err(e) => {
                warn!("Form: delivery failed: {e}");
                self.show_status(FormStatus::error(MSG_SEND_FAILED), timers, ports);
                Delivery::Failed(e)
            }
        };
        ports.set_form_busy(false);
        Some(delivery)
    }

    /// Drop the in-flight delivery and the hide countdown.
    pub fn teardown(&mut self, timers: &mut Scheduler) {
        if let Some((id, _)) = self.in_flight.take() {
            timers.cancel(id);
            debug!("Form: in-flight delivery discarded");
        }
        if let Some(id) = self.hide_timer.take() {
            timers.cancel(id);
        }
    }
}
