//! DOM listeners and intersection observers.
//!
//! Every browser callback turns into one [`PageEvent`] handed to `post`.
//! Listeners detach themselves when dropped.

use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node,
};

use crate::events::PageEvent;
use crate::observers::WatchGroup;
use crate::widgets::form::ContactForm;
use crate::widgets::scroll::AnchorScroll;

use super::page::WebPage;

pub(super) type Post = Rc<dyn Fn(PageEvent)>;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// One attached event listener.
pub(super) struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// One intersection observer and the callback it reports to.
struct Watch {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for Watch {
    fn drop(&mut self) {
        // Must stop before the callback is freed.
        self.observer.disconnect();
    }
}

/// Everything attached to the page. Dropping it detaches all listeners and
/// disconnects every observer.
#[derive(Default)]
pub(super) struct Listeners {
    listeners: Vec<Listener>,
    watches: Vec<Watch>,
}

impl Listeners {
    pub fn len(&self) -> usize {
        self.listeners.len() + self.watches.len()
    }

    fn on(&mut self, target: &EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) {
        match Listener::attach(target, kind, handler) {
            Ok(l) => self.listeners.push(l),
            Err(e) => warn!("Listener {kind}: {e:?}"),
        }
    }

    /// Forward `kind` on `target` as a fixed event.
    fn forward(&mut self, target: &EventTarget, kind: &'static str, post: &Post, event: PageEvent) {
        let post = Rc::clone(post);
        self.on(target, kind, move |_| post(event.clone()));
    }

    /// Attach every listener the discovered page needs.
    pub fn attach(page: &mut WebPage, post: &Post) -> Self {
        let mut set = Self::default();
        let window = page.window().clone();
        let document = page.document().clone();
        let el = &page.elements;

        set.forward(&window, "load", post, PageEvent::Loaded);
        {
            let post = Rc::clone(post);
            let w = window.clone();
            set.on(&window, "scroll", move |_| {
                post(PageEvent::Scrolled {
                    y: w.scroll_y().unwrap_or(0.0),
                });
            });
        }
        {
            let post = Rc::clone(post);
            let d = document.clone();
            set.on(&document, "visibilitychange", move |_| {
                post(PageEvent::VisibilityChanged { hidden: d.hidden() });
            });
        }

        // Navigation
        if let Some(toggle) = &el.nav_toggle {
            set.forward(toggle, "click", post, PageEvent::NavToggleClicked);
        }
        for (i, link) in el.nav_links.iter().enumerate() {
            set.forward(link, "click", post, PageEvent::NavLinkClicked(i));
        }
        if let (Some(menu), Some(toggle)) = (el.nav_menu.clone(), el.nav_toggle.clone()) {
            let post = Rc::clone(post);
            set.on(&document, "click", move |e| {
                let inside = e
                    .target()
                    .and_then(|t| t.dyn_into::<Node>().ok())
                    .is_some_and(|n| menu.contains(Some(&n)) || toggle.contains(Some(&n)));
                if !inside {
                    post(PageEvent::ClickedOutsideNav);
                }
            });
        }
        for anchor in &el.anchors {
            let post = Rc::clone(post);
            let d = document.clone();
            let a = anchor.clone();
            set.on(anchor, "click", move |e| {
                let href = a.get_attribute("href").unwrap_or_default();
                if !AnchorScroll::intercepts(&href) {
                    return;
                }
                e.prevent_default();
                let target_top = d
                    .query_selector(&href)
                    .ok()
                    .flatten()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    .map(|t| f64::from(t.offset_top()));
                post(PageEvent::AnchorClicked { href, target_top });
            });
        }
        if let Some(btn) = &el.back_to_top {
            set.forward(btn, "click", post, PageEvent::BackToTopClicked);
        }
        if let Some(toggle) = &el.theme_toggle {
            set.forward(toggle, "click", post, PageEvent::ThemeToggleClicked);
        }

        // Portfolio
        for (i, btn) in el.filter_buttons.iter().enumerate() {
            set.forward(btn, "click", post, PageEvent::FilterClicked(i));
        }

        // Testimonials
        if let Some(btn) = &el.prev_button {
            set.forward(btn, "click", post, PageEvent::CarouselPrevious);
        }
        if let Some(btn) = &el.next_button {
            set.forward(btn, "click", post, PageEvent::CarouselNext);
        }
        for (i, dot) in el.indicators.iter().enumerate() {
            set.forward(dot, "click", post, PageEvent::IndicatorClicked(i));
        }
        if let Some(slider) = &el.slider {
            set.forward(slider, "mouseenter", post, PageEvent::CarouselHover(true));
            set.forward(slider, "mouseleave", post, PageEvent::CarouselHover(false));
            set.forward(slider, "focusin", post, PageEvent::CarouselFocus(true));
            set.forward(slider, "focusout", post, PageEvent::CarouselFocus(false));
        }

        // Contact
        if let Some(form) = el.form.clone() {
            let post = Rc::clone(post);
            let f = form.clone();
            set.on(&form, "submit", move |e| {
                e.prevent_default();
                match web_sys::FormData::new_with_form(&f) {
                    Ok(data) => {
                        let field = |name: &str| data.get(name).as_string().unwrap_or_default();
                        post(PageEvent::FormSubmitted(ContactForm::new(
                            &field("name"),
                            &field("email"),
                            &field("subject"),
                            &field("message"),
                        )));
                    }
                    Err(e) => warn!("Form data: {e:?}"),
                }
            });
        }

        for group in WatchGroup::ALL {
            set.watch(page, group, post);
        }
        set
    }

    /// One observer per group, reporting each crossing by element index.
    fn watch(&mut self, page: &mut WebPage, group: WatchGroup, post: &Post) {
        let targets: Vec<Element> = page.elements.group(group).to_vec();
        if targets.is_empty() {
            return;
        }
        let opts = group.options();
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(opts.threshold));
        init.set_root_margin(opts.root_margin);

        let post = Rc::clone(post);
        let watched = targets.clone();
        let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                if let Some(index) = watched.iter().position(|el| *el == target) {
                    post(PageEvent::Intersected {
                        target: group.target(index),
                        visible: entry.is_intersecting(),
                    });
                }
            }
        });

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for el in &targets {
                    observer.observe(el);
                }
                page.attach_observer(group, observer.clone());
                self.watches.push(Watch {
                    observer,
                    _callback: callback,
                });
            }
            Err(e) => warn!("Observer {:?}: {e:?}", group),
        }
    }
}
