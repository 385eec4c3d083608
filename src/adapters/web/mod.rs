//! Browser adapter and wasm entry point.
//!
//! ```text
//!   DOM listeners ─┐                     ┌─▶ WebPage (DomPort, StoragePort, SubmitPort)
//!   observers ─────┼─▶ EventQueue ─▶ AppService
//!   pump interval ─┘      (tick)         └─▶ LogEventSink
//! ```
//!
//! Listeners only enqueue. Every pump first advances the scheduler to the
//! page clock and then drains the queue, right away when the runtime is
//! free, otherwise on the next interval tick.

mod discover;
mod listeners;
mod page;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context};
use gloo_timers::callback::Interval;
use log::{info, warn};
use wasm_bindgen::prelude::*;

use crate::adapters::config_source::{JsonConfigSource, CONFIG_ELEMENT_ID};
use crate::adapters::log_sink::LogEventSink;
use crate::adapters::time::PageClock;
use crate::app::commands::AppCommand;
use crate::app::service::AppService;
use crate::config::{load_config, PageConfig};
use crate::events::{EventQueue, PageEvent};
use crate::widgets::theme::Theme;

use discover::Elements;
use listeners::{Listeners, Post};
pub use page::WebPage;

struct Runtime {
    service: AppService,
    page: WebPage,
    sink: LogEventSink,
    clock: PageClock,
}

struct Shared {
    runtime: RefCell<Runtime>,
    queue: RefCell<EventQueue>,
}

impl Shared {
    fn post(&self, event: PageEvent) {
        self.queue.borrow_mut().push(event);
        self.pump();
    }

    /// Advance timers to the page clock, then drain queued events. A
    /// re-entrant call (a DOM write that dispatches synchronously) leaves
    /// the work to the outer one.
    fn pump(&self) {
        let Ok(mut rt) = self.runtime.try_borrow_mut() else {
            return;
        };
        let Runtime {
            service,
            page,
            sink,
            clock,
        } = &mut *rt;
        let now = clock.now_ms();
        service.pump(now, || self.queue.borrow_mut().pop(), page, sink);
    }

    fn command(&self, cmd: AppCommand) {
        match self.runtime.try_borrow_mut() {
            Ok(mut rt) => {
                let Runtime { service, page, sink, .. } = &mut *rt;
                service.handle_command(cmd, page, sink);
            }
            Err(_) => warn!("Command {:?} dropped: runtime busy", cmd),
        }
    }
}

/// A running page: the shared core plus what keeps it fed.
struct Session {
    shared: Rc<Shared>,
    _listeners: Listeners,
    _pump: Interval,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let cb = Closure::once_into_js(|| {
            if let Err(e) = boot() {
                log::error!("Boot failed: {e:#}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())?;
        Ok(())
    } else {
        boot().map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }
}

fn read_config(document: &web_sys::Document) -> PageConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    match load_config(&JsonConfigSource::new(raw)) {
        Ok(config) => config,
        Err(e) => {
            warn!("Config rejected ({e}); using defaults");
            PageConfig::default()
        }
    }
}

fn boot() -> anyhow::Result<()> {
    if SESSION.with(|s| s.borrow().is_some()) {
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window.document().ok_or_else(|| anyhow!("no document"))?;

    let config = read_config(&document);
    let pump_ms = config.pump_interval_ms;
    let max_step_ms = config.max_pump_step_ms;
    let elements = Elements::query(&document);
    let layout = elements.layout(&window, &document);

    let shared = Rc::new(Shared {
        runtime: RefCell::new(Runtime {
            service: AppService::new(config, layout),
            page: WebPage::new(window, document, elements),
            sink: LogEventSink::new(),
            clock: PageClock::new(max_step_ms),
        }),
        queue: RefCell::new(EventQueue::new()),
    });

    let weak = Rc::downgrade(&shared);
    let post: Post = Rc::new(move |event| {
        if let Some(shared) = weak.upgrade() {
            shared.post(event);
        }
    });

    let listeners = {
        let mut rt = shared
            .runtime
            .try_borrow_mut()
            .context("runtime busy during boot")?;
        let Runtime {
            service, page, sink, ..
        } = &mut *rt;
        let listeners = Listeners::attach(page, &post);
        service.start(page, sink);
        listeners
    };
    info!("Attached {} listeners, pump every {} ms", listeners.len(), pump_ms);

    let tick = Rc::downgrade(&shared);
    let pump = Interval::new(pump_ms, move || {
        if let Some(shared) = tick.upgrade() {
            shared.pump();
        }
    });

    SESSION.with(|s| {
        *s.borrow_mut() = Some(Session {
            shared,
            _listeners: listeners,
            _pump: pump,
        });
    });
    Ok(())
}

fn with_session(f: impl FnOnce(&Session)) {
    SESSION.with(|s| match s.borrow().as_ref() {
        Some(session) => f(session),
        None => warn!("Page behaviours not running"),
    });
}

/// Stop every behaviour, cancel every timer and detach every listener.
#[wasm_bindgen]
pub fn teardown() {
    let Some(session) = SESSION.with(|s| s.borrow_mut().take()) else {
        return;
    };
    match session.shared.runtime.try_borrow_mut() {
        Ok(mut rt) => {
            let Runtime { service, page, sink, .. } = &mut *rt;
            service.teardown(page, sink);
            page.disconnect_observers();
        }
        Err(_) => warn!("Teardown while runtime busy; detaching listeners and observers only"),
    }
    session.shared.queue.borrow_mut().clear();
    // Dropping the session disconnects the observers even when the runtime
    // was busy above.
    drop(session);
}

/// Switch to `"light"` or `"dark"` and remember the choice.
#[wasm_bindgen(js_name = setTheme)]
pub fn set_theme(name: &str) -> Result<(), JsValue> {
    let theme = name
        .parse::<Theme>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    with_session(|s| s.shared.command(AppCommand::SetTheme(theme)));
    Ok(())
}

#[wasm_bindgen(js_name = nextSlide)]
pub fn next_slide() {
    with_session(|s| s.shared.command(AppCommand::NextSlide));
}

#[wasm_bindgen(js_name = previousSlide)]
pub fn previous_slide() {
    with_session(|s| s.shared.command(AppCommand::PreviousSlide));
}

/// Show only portfolio items of one category (`"all"` shows everything).
#[wasm_bindgen(js_name = filterPortfolio)]
pub fn filter_portfolio(value: &str) {
    with_session(|s| s.shared.command(AppCommand::Filter(value.to_owned())));
}
