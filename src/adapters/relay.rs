//! Simulated message relay.
//!
//! The page has no backend: delivery "succeeds" once the form controller's
//! latency timer has elapsed. The relay can be scripted to fail so the
//! error path is reachable in tests and demos.

use log::info;

use crate::app::ports::{SubmitError, SubmitPort};
use crate::widgets::form::ContactForm;

#[derive(Debug, Default)]
pub struct SimulatedRelay {
    fail_with: Option<SubmitError>,
    delivered: Vec<ContactForm>,
}

impl SimulatedRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following delivery fail with `error`.
    pub fn failing(error: SubmitError) -> Self {
        Self {
            fail_with: Some(error),
            delivered: Vec::new(),
        }
    }

    /// Messages accepted so far.
    pub fn delivered(&self) -> &[ContactForm] {
        &self.delivered
    }
}

impl SubmitPort for SimulatedRelay {
    fn deliver(&mut self, form: &ContactForm) -> Result<(), SubmitError> {
        if let Some(e) = &self.fail_with {
            return Err(e.clone());
        }
        info!("Relay: message from {} <{}>: {}", form.name, form.email, form.subject);
        self.delivered.push(form.clone());
        Ok(())
    }
}
