//! Contact form: validation → delayed delivery → status → auto-hide.

use super::mock_page::{DomCall, EventLog, RecordingPage};

use folio::adapters::relay::SimulatedRelay;
use folio::app::events::AppEvent;
use folio::app::layout::PageLayout;
use folio::app::ports::SubmitError;
use folio::app::service::AppService;
use folio::config::PageConfig;
use folio::events::PageEvent;
use folio::widgets::form::{
    ContactForm, FormStatus, ValidationError, MSG_INVALID_EMAIL, MSG_MISSING_FIELDS,
    MSG_SEND_FAILED, MSG_SENT,
};

fn form_layout() -> PageLayout {
    PageLayout {
        has_contact_form: true,
        has_form_status: true,
        ..PageLayout::default()
    }
}

fn make_app(page: RecordingPage) -> (AppService, RecordingPage, EventLog) {
    let mut page = page;
    let mut app = AppService::new(PageConfig::default(), form_layout());
    let mut sink = EventLog::new();
    app.start(&mut page, &mut sink);
    (app, page, sink)
}

fn submit(name: &str, email: &str, subject: &str, message: &str) -> PageEvent {
    PageEvent::FormSubmitted(ContactForm::new(name, email, subject, message))
}

#[test]
fn valid_message_is_delivered_after_delay() {
    let (mut app, mut page, mut sink) = make_app(RecordingPage::new());

    app.handle_event(
        submit("  Ada ", "ada@example.com", "Hello", "Let's talk "),
        &mut page,
        &mut sink,
    );
    assert_eq!(page.calls.last(), Some(&DomCall::FormBusy(true)));
    assert!(page.relay.delivered().is_empty());

    app.tick(1499, &mut page, &mut sink);
    assert!(page.relay.delivered().is_empty());

    app.tick(1500, &mut page, &mut sink);
    assert_eq!(
        page.relay.delivered(),
        &[ContactForm::new("Ada", "ada@example.com", "Hello", "Let's talk")]
    );
    assert_eq!(page.last_status(), Some(FormStatus::success(MSG_SENT)));
    assert!(page.has(&DomCall::ResetForm));
    assert_eq!(page.calls.last(), Some(&DomCall::FormBusy(false)));
    assert!(sink.has(&AppEvent::FormSent));

    // Success message hides itself after five seconds.
    app.tick(6499, &mut page, &mut sink);
    assert!(page.status_visible);
    app.tick(6500, &mut page, &mut sink);
    assert!(!page.status_visible);
    assert_eq!(app.form_status(), None);
}

#[test]
fn missing_fields_are_rejected_without_sending() {
    let (mut app, mut page, mut sink) = make_app(RecordingPage::new());

    app.handle_event(submit("Ada", "ada@example.com", "   ", "hi"), &mut page, &mut sink);
    assert_eq!(page.last_status(), Some(FormStatus::error(MSG_MISSING_FIELDS)));
    assert!(sink.has(&AppEvent::FormRejected(ValidationError::MissingFields)));
    assert!(!page.has(&DomCall::FormBusy(true)));

    app.tick(5000, &mut page, &mut sink);
    assert_eq!(page.calls.last(), Some(&DomCall::HideStatus));
    assert!(page.relay.delivered().is_empty());
}

#[test]
fn malformed_email_is_rejected() {
    let (mut app, mut page, mut sink) = make_app(RecordingPage::new());

    for email in ["ada", "ada@example", "a da@example.com", "@example.com"] {
        app.handle_event(submit("Ada", email, "Hi", "Hello"), &mut page, &mut sink);
        assert_eq!(
            page.last_status(),
            Some(FormStatus::error(MSG_INVALID_EMAIL)),
            "{email:?} must be rejected"
        );
    }
    assert_eq!(
        sink.count(|e| *e == AppEvent::FormRejected(ValidationError::InvalidEmail)),
        4
    );
}

#[test]
fn resubmit_while_sending_is_ignored() {
    let (mut app, mut page, mut sink) = make_app(RecordingPage::new());

    app.handle_event(submit("Ada", "ada@example.com", "One", "First"), &mut page, &mut sink);
    app.tick(500, &mut page, &mut sink);
    app.handle_event(submit("Ada", "ada@example.com", "Two", "Second"), &mut page, &mut sink);
    app.tick(5000, &mut page, &mut sink);

    assert_eq!(page.relay.delivered().len(), 1);
    assert_eq!(page.relay.delivered()[0].subject, "One");
    assert_eq!(page.count(|c| *c == DomCall::FormBusy(true)), 1);
}

#[test]
fn relay_failure_keeps_the_fields() {
    let relay = SimulatedRelay::failing(SubmitError::Unreachable);
    let (mut app, mut page, mut sink) = make_app(RecordingPage::with_relay(relay));

    app.handle_event(submit("Ada", "ada@example.com", "Hi", "Hello"), &mut page, &mut sink);
    app.tick(1500, &mut page, &mut sink);

    assert_eq!(page.last_status(), Some(FormStatus::error(MSG_SEND_FAILED)));
    assert!(sink.has(&AppEvent::FormFailed(SubmitError::Unreachable)));
    assert!(!page.has(&DomCall::ResetForm));
    assert_eq!(page.calls.last(), Some(&DomCall::FormBusy(false)));

    // The form is usable again.
    app.handle_event(submit("Ada", "ada@example.com", "Hi", "Hello"), &mut page, &mut sink);
    assert_eq!(page.count(|c| *c == DomCall::FormBusy(true)), 2);
}

#[test]
fn newer_status_restarts_the_hide_countdown() {
    let (mut app, mut page, mut sink) = make_app(RecordingPage::new());

    app.handle_event(submit("", "", "", ""), &mut page, &mut sink);
    app.tick(3000, &mut page, &mut sink);
    app.handle_event(submit("Ada", "nope", "Hi", "Hello"), &mut page, &mut sink);

    app.tick(7999, &mut page, &mut sink);
    assert!(page.status_visible, "first countdown must not hide the newer message");
    app.tick(8000, &mut page, &mut sink);
    assert!(!page.status_visible);
    assert_eq!(page.count(|c| *c == DomCall::HideStatus), 1);
}

#[test]
fn teardown_discards_in_flight_delivery() {
    let (mut app, mut page, mut sink) = make_app(RecordingPage::new());

    app.handle_event(submit("Ada", "ada@example.com", "Hi", "Hello"), &mut page, &mut sink);
    app.tick(1000, &mut page, &mut sink);
    app.teardown(&mut page, &mut sink);
    app.tick(10_000, &mut page, &mut sink);

    assert!(page.relay.delivered().is_empty());
    assert!(!sink.has(&AppEvent::FormSent));
}

#[test]
fn status_element_is_required() {
    let layout = PageLayout {
        has_form_status: false,
        ..form_layout()
    };
    let mut app = AppService::new(PageConfig::default(), layout);
    let mut page = RecordingPage::new();
    let mut sink = EventLog::new();
    app.start(&mut page, &mut sink);

    app.handle_event(submit("", "", "", ""), &mut page, &mut sink);
    assert_eq!(page.last_status(), None);
}
