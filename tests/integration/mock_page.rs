//! Recording page adapter for integration tests.
//!
//! Records every DOM write so tests can assert on the full history, keeps
//! enough derived state (active slide, visible items, theme) for the common
//! assertions, and backs storage and submission with the host adapters.

use folio::adapters::relay::SimulatedRelay;
use folio::adapters::storage::MemoryStorage;
use folio::app::events::AppEvent;
use folio::app::layout::PageLayout;
use folio::app::ports::{
    DomPort, EventSink, StorageError, StoragePort, SubmitError, SubmitPort,
};
use folio::observers::WatchTarget;
use folio::widgets::form::{ContactForm, FormStatus};
use folio::widgets::particles::{ParticleId, ParticleStyle};
use folio::widgets::theme::Theme;
use std::collections::BTreeSet;

// ── DOM call record ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DomCall {
    FadeOutLoader,
    RemoveLoader,
    HeaderScrolled(bool),
    NavOpen(bool),
    NavLinkActive(usize, bool),
    Theme(Theme),
    TypedText(String),
    SpawnParticle(u32),
    RemoveParticle(u32),
    FilterSelected(usize, bool),
    ItemVisible(usize, bool),
    SlideActive(usize, bool),
    IndicatorActive(usize, bool),
    FormBusy(bool),
    ShowStatus(FormStatus),
    HideStatus,
    ResetForm,
    BackToTop(bool),
    ScrollTo(f64),
    Reveal(usize),
    FillSkillBar(usize),
    ImageSeen(usize),
    StopWatching(WatchTarget),
}

// ── RecordingPage ─────────────────────────────────────────────

pub struct RecordingPage {
    pub calls: Vec<DomCall>,
    pub storage: MemoryStorage,
    pub relay: SimulatedRelay,
    pub particles: BTreeSet<u32>,
    pub active_slide: Option<usize>,
    pub active_indicator: Option<usize>,
    pub status_visible: bool,
}

#[allow(dead_code)]
impl RecordingPage {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            storage: MemoryStorage::new(),
            relay: SimulatedRelay::new(),
            particles: BTreeSet::new(),
            active_slide: None,
            active_indicator: None,
            status_visible: false,
        }
    }

    pub fn with_storage(storage: MemoryStorage) -> Self {
        Self {
            storage,
            ..Self::new()
        }
    }

    pub fn with_relay(relay: SimulatedRelay) -> Self {
        Self {
            relay,
            ..Self::new()
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&DomCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn has(&self, call: &DomCall) -> bool {
        self.calls.contains(call)
    }

    /// Last theme applied to the document.
    pub fn theme(&self) -> Option<Theme> {
        self.calls.iter().rev().find_map(|c| match c {
            DomCall::Theme(t) => Some(*t),
            _ => None,
        })
    }

    /// Last text written to the typing element.
    pub fn typed_text(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            DomCall::TypedText(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn last_status(&self) -> Option<FormStatus> {
        self.calls.iter().rev().find_map(|c| match c {
            DomCall::ShowStatus(s) => Some(*s),
            _ => None,
        })
    }

    /// Item visibility after the most recent filter run.
    pub fn item_visible(&self, index: usize) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            DomCall::ItemVisible(i, v) if *i == index => Some(*v),
            _ => None,
        })
    }
}

impl Default for RecordingPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DomPort for RecordingPage {
    fn fade_out_loader(&mut self) {
        self.calls.push(DomCall::FadeOutLoader);
    }

    fn remove_loader(&mut self) {
        self.calls.push(DomCall::RemoveLoader);
    }

    fn set_header_scrolled(&mut self, scrolled: bool) {
        self.calls.push(DomCall::HeaderScrolled(scrolled));
    }

    fn set_nav_open(&mut self, open: bool) {
        self.calls.push(DomCall::NavOpen(open));
    }

    fn set_nav_link_active(&mut self, index: usize, active: bool) {
        self.calls.push(DomCall::NavLinkActive(index, active));
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.calls.push(DomCall::Theme(theme));
    }

    fn set_typed_text(&mut self, text: &str) {
        self.calls.push(DomCall::TypedText(text.to_owned()));
    }

    fn spawn_particle(&mut self, id: ParticleId, _style: &ParticleStyle) {
        self.particles.insert(id.0);
        self.calls.push(DomCall::SpawnParticle(id.0));
    }

    fn remove_particle(&mut self, id: ParticleId) {
        self.particles.remove(&id.0);
        self.calls.push(DomCall::RemoveParticle(id.0));
    }

    fn set_filter_selected(&mut self, index: usize, selected: bool) {
        self.calls.push(DomCall::FilterSelected(index, selected));
    }

    fn set_portfolio_item_visible(&mut self, index: usize, visible: bool) {
        self.calls.push(DomCall::ItemVisible(index, visible));
    }

    fn set_slide_active(&mut self, index: usize, active: bool) {
        if active {
            self.active_slide = Some(index);
        } else if self.active_slide == Some(index) {
            self.active_slide = None;
        }
        self.calls.push(DomCall::SlideActive(index, active));
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if active {
            self.active_indicator = Some(index);
        } else if self.active_indicator == Some(index) {
            self.active_indicator = None;
        }
        self.calls.push(DomCall::IndicatorActive(index, active));
    }

    fn set_form_busy(&mut self, busy: bool) {
        self.calls.push(DomCall::FormBusy(busy));
    }

    fn show_form_status(&mut self, status: &FormStatus) {
        self.status_visible = true;
        self.calls.push(DomCall::ShowStatus(*status));
    }

    fn hide_form_status(&mut self) {
        self.status_visible = false;
        self.calls.push(DomCall::HideStatus);
    }

    fn reset_form(&mut self) {
        self.calls.push(DomCall::ResetForm);
    }

    fn set_back_to_top_visible(&mut self, visible: bool) {
        self.calls.push(DomCall::BackToTop(visible));
    }

    fn scroll_to(&mut self, top_px: f64) {
        self.calls.push(DomCall::ScrollTo(top_px));
    }

    fn reveal(&mut self, index: usize) {
        self.calls.push(DomCall::Reveal(index));
    }

    fn fill_skill_bar(&mut self, index: usize) {
        self.calls.push(DomCall::FillSkillBar(index));
    }

    fn mark_image_seen(&mut self, index: usize) {
        self.calls.push(DomCall::ImageSeen(index));
    }

    fn stop_watching(&mut self, target: WatchTarget) {
        self.calls.push(DomCall::StopWatching(target));
    }
}

impl StoragePort for RecordingPage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove(key)
    }
}

impl SubmitPort for RecordingPage {
    fn deliver(&mut self, form: &ContactForm) -> Result<(), SubmitError> {
        self.relay.deliver(form)
    }
}

// ── Event sink ────────────────────────────────────────────────

pub struct EventLog {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn has(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Layouts ───────────────────────────────────────────────────

/// A page carrying every role, shaped like the portfolio template.
#[allow(dead_code)]
pub fn full_layout() -> PageLayout {
    PageLayout {
        has_loader: true,
        has_header: true,
        has_nav_toggle: true,
        has_nav_menu: true,
        nav_link_hrefs: ["#home", "#about", "#portfolio", "#contact"]
            .map(String::from)
            .to_vec(),
        section_ids: ["home", "about", "portfolio", "testimonials", "contact"]
            .map(String::from)
            .to_vec(),
        has_back_to_top: true,
        anchor_count: 6,
        has_typed_text: true,
        has_particles: true,
        filter_values: ["all", "web", "mobile"].map(String::from).to_vec(),
        item_categories: ["web", "mobile", "web", "design"].map(String::from).to_vec(),
        slide_count: 3,
        indicator_count: 3,
        has_contact_form: true,
        has_form_status: true,
        reveal_count: 4,
        skill_bar_count: 3,
        lazy_image_count: 2,
        prefers_dark: false,
        page_hidden: false,
        already_loaded: false,
        seed: 42,
    }
}
