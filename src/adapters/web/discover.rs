//! Page discovery: find every role the behaviours use and build the
//! [`PageLayout`] the core starts from.

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlFormElement, Window};

use crate::app::layout::PageLayout;
use crate::observers::WatchGroup;

/// Handles to every element the page behaviours touch, by role.
#[derive(Default)]
pub(super) struct Elements {
    pub loader: Option<Element>,
    pub header: Option<Element>,
    pub nav_toggle: Option<Element>,
    pub nav_menu: Option<Element>,
    pub nav_links: Vec<Element>,
    pub sections: Vec<Element>,
    pub theme_toggle: Option<Element>,
    pub theme_icon: Option<Element>,
    pub typed_text: Option<Element>,
    pub particles: Option<Element>,
    pub filter_buttons: Vec<Element>,
    pub portfolio_items: Vec<Element>,
    pub slides: Vec<Element>,
    pub indicators: Vec<Element>,
    pub prev_button: Option<Element>,
    pub next_button: Option<Element>,
    pub slider: Option<Element>,
    pub form: Option<HtmlFormElement>,
    pub form_status: Option<Element>,
    pub submit_button: Option<HtmlButtonElement>,
    pub back_to_top: Option<Element>,
    pub anchors: Vec<Element>,
    pub reveal: Vec<Element>,
    pub skill_bars: Vec<Element>,
    pub lazy_images: Vec<Element>,
}

impl Elements {
    pub fn query(document: &Document) -> Self {
        let theme_toggle = document.get_element_by_id("theme-toggle");
        let theme_icon = theme_toggle.as_ref().and_then(|t| t.query_selector("i").ok().flatten());
        let form = document
            .get_element_by_id("contact-form")
            .and_then(|f| f.dyn_into::<HtmlFormElement>().ok());
        let submit_button = form
            .as_ref()
            .and_then(|f| f.query_selector(".btn-submit").ok().flatten())
            .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());

        Self {
            loader: one(document, ".loader-wrapper"),
            header: document.get_element_by_id("header"),
            nav_toggle: document.get_element_by_id("nav-toggle"),
            nav_menu: document.get_element_by_id("nav-menu"),
            nav_links: all(document, ".nav-link"),
            sections: all(document, "section[id]"),
            theme_toggle,
            theme_icon,
            typed_text: one(document, ".typed-text"),
            particles: document.get_element_by_id("particles"),
            filter_buttons: all(document, ".filter-btn"),
            portfolio_items: all(document, ".portfolio-item"),
            slides: all(document, ".testimonial-item"),
            indicators: all(document, ".dot"),
            prev_button: one(document, ".prev-btn"),
            next_button: one(document, ".next-btn"),
            slider: one(document, ".testimonials-slider"),
            form,
            form_status: document.get_element_by_id("form-status"),
            submit_button,
            back_to_top: document.get_element_by_id("back-to-top"),
            anchors: all(document, "a[href^=\"#\"]"),
            reveal: all(document, "[data-aos]"),
            skill_bars: all(document, ".skill-progress"),
            lazy_images: all(document, "img[loading='lazy']"),
        }
    }

    /// Elements watched by one intersection group, in index order.
    pub fn group(&self, group: WatchGroup) -> &[Element] {
        match group {
            WatchGroup::Sections => &self.sections,
            WatchGroup::Reveal => &self.reveal,
            WatchGroup::SkillBars => &self.skill_bars,
            WatchGroup::LazyImages => &self.lazy_images,
        }
    }

    pub fn layout(&self, window: &Window, document: &Document) -> PageLayout {
        let prefers_dark = window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .is_some_and(|mq| mq.matches());

        let layout = PageLayout {
            has_loader: self.loader.is_some(),
            has_header: self.header.is_some(),
            has_nav_toggle: self.nav_toggle.is_some(),
            has_nav_menu: self.nav_menu.is_some(),
            nav_link_hrefs: attrs(&self.nav_links, "href"),
            section_ids: self.sections.iter().map(Element::id).collect(),
            has_back_to_top: self.back_to_top.is_some(),
            anchor_count: self.anchors.len(),
            has_typed_text: self.typed_text.is_some(),
            has_particles: self.particles.is_some(),
            filter_values: attrs(&self.filter_buttons, "data-filter"),
            item_categories: attrs(&self.portfolio_items, "data-category"),
            slide_count: self.slides.len(),
            indicator_count: self.indicators.len(),
            has_contact_form: self.form.is_some(),
            has_form_status: self.form_status.is_some(),
            reveal_count: self.reveal.len(),
            skill_bar_count: self.skill_bars.len(),
            lazy_image_count: self.lazy_images.len(),
            prefers_dark,
            page_hidden: document.hidden(),
            already_loaded: document.ready_state() == "complete",
            seed: (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64,
        };
        debug!("Discovered layout: {:?}", layout);
        layout
    }
}

fn one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            warn!("Selector {selector}: {e:?}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// One attribute per element; a missing attribute reads as empty.
fn attrs(elements: &[Element], name: &str) -> Vec<String> {
    elements
        .iter()
        .map(|el| el.get_attribute(name).unwrap_or_default())
        .collect()
}
