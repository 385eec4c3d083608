//! The browser page: [`DomPort`] over `web_sys`, [`StoragePort`] over
//! `localStorage`, [`SubmitPort`] over the simulated relay.

use std::collections::HashMap;

use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, ScrollBehavior, ScrollToOptions,
    Storage, Window,
};

use crate::adapters::relay::SimulatedRelay;
use crate::adapters::storage::MemoryStorage;
use crate::app::ports::{DomPort, StorageError, StoragePort, SubmitError, SubmitPort};
use crate::observers::{WatchGroup, WatchTarget};
use crate::widgets::form::{ContactForm, FormStatus};
use crate::widgets::particles::{ParticleId, ParticleStyle};
use crate::widgets::theme::Theme;

use super::discover::Elements;

const SENDING_LABEL: &str = "<i class=\"fas fa-spinner fa-spin\"></i> Sending...";

enum Backing {
    Local(Storage),
    Memory(MemoryStorage),
}

pub struct WebPage {
    window: Window,
    document: Document,
    pub(super) elements: Elements,
    particles: HashMap<ParticleId, Element>,
    observers: HashMap<WatchGroup, IntersectionObserver>,
    submit_label: Option<String>,
    storage: Backing,
    relay: SimulatedRelay,
}

impl WebPage {
    pub(super) fn new(window: Window, document: Document, elements: Elements) -> Self {
        let storage = match window.local_storage() {
            Ok(Some(s)) => Backing::Local(s),
            _ => {
                warn!("localStorage unavailable; theme choice lasts for this visit only");
                Backing::Memory(MemoryStorage::new())
            }
        };
        Self {
            window,
            document,
            elements,
            particles: HashMap::new(),
            observers: HashMap::new(),
            submit_label: None,
            storage,
            relay: SimulatedRelay::new(),
        }
    }

    pub(super) fn window(&self) -> &Window {
        &self.window
    }

    pub(super) fn document(&self) -> &Document {
        &self.document
    }

    pub(super) fn attach_observer(&mut self, group: WatchGroup, observer: IntersectionObserver) {
        if let Some(old) = self.observers.insert(group, observer) {
            old.disconnect();
        }
    }

    /// Stop every intersection observer.
    pub(super) fn disconnect_observers(&mut self) {
        for (_, observer) in self.observers.drain() {
            observer.disconnect();
        }
    }
}

fn soft(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!("DOM {what}: {e:?}");
    }
}

fn set_class(el: Option<&Element>, class: &str, on: bool) {
    if let Some(el) = el {
        soft(class, el.class_list().toggle_with_force(class, on).map(drop));
    }
}

fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        soft(property, html.style().set_property(property, value));
    }
}

fn bool_attr(on: bool) -> &'static str {
    if on { "true" } else { "false" }
}

impl DomPort for WebPage {
    fn fade_out_loader(&mut self) {
        set_class(self.elements.loader.as_ref(), "fade-out", true);
    }

    fn remove_loader(&mut self) {
        if let Some(loader) = &self.elements.loader {
            set_style(loader, "display", "none");
        }
    }

    fn set_header_scrolled(&mut self, scrolled: bool) {
        set_class(self.elements.header.as_ref(), "scrolled", scrolled);
    }

    fn set_nav_open(&mut self, open: bool) {
        set_class(self.elements.nav_toggle.as_ref(), "active", open);
        set_class(self.elements.nav_menu.as_ref(), "active", open);
        if let Some(toggle) = &self.elements.nav_toggle {
            soft("aria-expanded", toggle.set_attribute("aria-expanded", bool_attr(open)));
        }
    }

    fn set_nav_link_active(&mut self, index: usize, active: bool) {
        set_class(self.elements.nav_links.get(index), "active", active);
    }

    fn apply_theme(&mut self, theme: Theme) {
        if let Some(root) = self.document.document_element() {
            soft("data-theme", root.set_attribute("data-theme", theme.as_str()));
        }
        if let Some(icon) = &self.elements.theme_icon {
            let list = icon.class_list();
            soft("icon", list.remove_1(theme.toggled().icon_class()));
            soft("icon", list.add_1(theme.icon_class()));
        }
    }

    fn set_typed_text(&mut self, text: &str) {
        if let Some(el) = &self.elements.typed_text {
            el.set_text_content(Some(text));
        }
    }

    fn spawn_particle(&mut self, id: ParticleId, style: &ParticleStyle) {
        let Some(container) = &self.elements.particles else {
            return;
        };
        let particle = match self.document.create_element("div") {
            Ok(el) => el,
            Err(e) => {
                warn!("Particle {}: {e:?}", id.0);
                return;
            }
        };
        particle.set_class_name("particle");
        soft("particle style", particle.set_attribute("style", &style.to_css()));
        soft("particle", container.append_child(&particle).map(drop));
        self.particles.insert(id, particle);
    }

    fn remove_particle(&mut self, id: ParticleId) {
        if let Some(particle) = self.particles.remove(&id) {
            particle.remove();
        }
    }

    fn set_filter_selected(&mut self, index: usize, selected: bool) {
        let button = self.elements.filter_buttons.get(index);
        set_class(button, "active", selected);
        if let Some(button) = button {
            soft("aria-selected", button.set_attribute("aria-selected", bool_attr(selected)));
        }
    }

    fn set_portfolio_item_visible(&mut self, index: usize, visible: bool) {
        let Some(item) = self.elements.portfolio_items.get(index) else {
            return;
        };
        if !visible {
            set_class(Some(item), "hide", true);
            return;
        }
        set_class(Some(item), "hide", false);
        set_style(item, "opacity", "0");
        set_style(item, "transform", "translateY(20px)");
        // Reading the layout commits the start state so the transition runs.
        if let Some(html) = item.dyn_ref::<HtmlElement>() {
            let _ = html.offset_width();
        }
        set_style(item, "transition", "opacity 0.4s ease, transform 0.4s ease");
        set_style(item, "opacity", "1");
        set_style(item, "transform", "translateY(0)");
    }

    fn set_slide_active(&mut self, index: usize, active: bool) {
        set_class(self.elements.slides.get(index), "active", active);
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        set_class(self.elements.indicators.get(index), "active", active);
    }

    fn set_form_busy(&mut self, busy: bool) {
        let Some(button) = &self.elements.submit_button else {
            return;
        };
        if busy {
            self.submit_label.get_or_insert_with(|| button.inner_html());
            button.set_inner_html(SENDING_LABEL);
        } else if let Some(label) = self.submit_label.take() {
            button.set_inner_html(&label);
        }
        button.set_disabled(busy);
    }

    fn show_form_status(&mut self, status: &FormStatus) {
        if let Some(el) = &self.elements.form_status {
            el.set_text_content(Some(status.message));
            el.set_class_name(&format!("form-status {}", status.kind.as_str()));
            set_style(el, "display", "block");
        }
    }

    fn hide_form_status(&mut self) {
        if let Some(el) = &self.elements.form_status {
            set_style(el, "display", "none");
        }
    }

    fn reset_form(&mut self) {
        if let Some(form) = &self.elements.form {
            form.reset();
        }
    }

    fn set_back_to_top_visible(&mut self, visible: bool) {
        set_class(self.elements.back_to_top.as_ref(), "show", visible);
    }

    fn scroll_to(&mut self, top_px: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top_px);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn reveal(&mut self, index: usize) {
        set_class(self.elements.reveal.get(index), "aos-animate", true);
    }

    fn fill_skill_bar(&mut self, index: usize) {
        if let Some(bar) = self.elements.skill_bars.get(index) {
            set_style(bar, "animation", "fillSkill 1.5s ease-in-out forwards");
        }
    }

    fn mark_image_seen(&mut self, index: usize) {
        // Native lazy loading fetches the image; nothing to write.
        debug!("Lazy image {} in view", index);
    }

    fn stop_watching(&mut self, target: WatchTarget) {
        let group = target.group();
        let (Some(observer), Some(el)) = (
            self.observers.get(&group),
            self.elements.group(group).get(target.index()),
        ) else {
            return;
        };
        observer.unobserve(el);
    }
}

fn storage_error(e: &JsValue) -> StorageError {
    let name = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.name()))
        .unwrap_or_default();
    if name == "QuotaExceededError" {
        StorageError::Full
    } else {
        StorageError::Backend(format!("{e:?}"))
    }
}

impl StoragePort for WebPage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.storage {
            Backing::Local(s) => s.get_item(key).map_err(|e| storage_error(&e)),
            Backing::Memory(m) => m.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match &mut self.storage {
            Backing::Local(s) => s.set_item(key, value).map_err(|e| storage_error(&e)),
            Backing::Memory(m) => m.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match &mut self.storage {
            Backing::Local(s) => s.remove_item(key).map_err(|e| storage_error(&e)),
            Backing::Memory(m) => m.remove(key),
        }
    }
}

impl SubmitPort for WebPage {
    fn deliver(&mut self, form: &ContactForm) -> Result<(), SubmitError> {
        self.relay.deliver(form)
    }
}
