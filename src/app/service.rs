//! Application service: the hexagonal core.
//!
//! [`AppService`] owns every widget, the scheduler and the visibility
//! watcher. It exposes a browser-agnostic API: page events in, fired
//! timers in, port calls out. All I/O flows through port traits injected at
//! call sites, so the whole page is testable with a mock adapter.
//!
//! ```text
//!   PageEvent ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                 │         AppService         │
//!  AppCommand ──▶ │ widgets · carousel · timers│
//!                 └────────────┬───────────────┘
//!                              ▼
//!                 DomPort · StoragePort · SubmitPort
//! ```

use log::{debug, info};

use crate::carousel::pause::PauseReason;
use crate::carousel::Carousel;
use crate::config::PageConfig;
use crate::events::PageEvent;
use crate::observers::{Crossing, VisibilityWatcher, WatchTarget};
use crate::scheduler::{Scheduler, TimerId, TimerTag};
use crate::widgets::form::{Delivery, FormStatus, SubmitOutcome};
use crate::widgets::loader::LoaderPhase;
use crate::widgets::theme::Theme;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::layout::PageLayout;
use super::ports::{DomPort, EventSink, PagePorts, TimerDelegate};
use super::startup::{run_feature_table, InitCtx, Widgets};

/// Logged once when the behaviours start.
const BANNER: [&str; 2] = [
    "Welcome to the portfolio!",
    "Looking for a developer? Let's create something amazing together!",
];

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all page behaviour.
pub struct AppService {
    config: PageConfig,
    layout: PageLayout,
    timers: Scheduler,
    widgets: Widgets,
    watcher: VisibilityWatcher,
    started: bool,
    torn_down: bool,
}

impl AppService {
    /// Construct the service from configuration and the discovered layout.
    ///
    /// Does **not** start anything. Call [`start`](Self::start) next.
    pub fn new(config: PageConfig, layout: PageLayout) -> Self {
        Self {
            config,
            layout,
            timers: Scheduler::new(),
            widgets: Widgets::default(),
            watcher: VisibilityWatcher::new(),
            started: false,
            torn_down: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run the feature table. Idempotent.
    pub fn start(&mut self, ports: &mut impl PagePorts, sink: &mut impl EventSink) {
        if self.started {
            return;
        }
        self.started = true;
        for line in BANNER {
            info!("{line}");
        }

        let mut ctx = InitCtx {
            config: &self.config,
            layout: &self.layout,
            timers: &mut self.timers,
            ports,
        };
        let (features, skipped) = run_feature_table(&mut self.widgets, &mut ctx);

        for feature in skipped {
            sink.emit(&AppEvent::FeatureSkipped(feature));
        }
        if let Some(theme) = &self.widgets.theme {
            sink.emit(&AppEvent::ThemeApplied(theme.current()));
        }
        info!("AppService started with {} features", features.len());
        sink.emit(&AppEvent::Started { features });
    }

    /// Release every timer and discard any in-flight submission.
    /// Returns the number of timers cancelled. Later events are ignored.
    pub fn teardown(&mut self, ports: &mut impl PagePorts, sink: &mut impl EventSink) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;
        let pending = self.timers.pending_count();

        let w = &mut self.widgets;
        if let Some(loader) = w.loader.as_mut() {
            loader.teardown(&mut self.timers);
        }
        if let Some(header) = w.header.as_mut() {
            header.teardown(&mut self.timers);
        }
        if let Some(btt) = w.back_to_top.as_mut() {
            btt.teardown(&mut self.timers);
        }
        if let Some(typing) = w.typing.as_mut() {
            typing.stop(&mut self.timers);
        }
        if let Some(particles) = w.particles.as_mut() {
            particles.teardown(&mut self.timers, ports);
        }
        if let Some(carousel) = w.carousel.as_mut() {
            carousel.teardown(&mut self.timers);
        }
        if let Some(form) = w.form.as_mut() {
            form.teardown(&mut self.timers);
        }
        let stray = self.timers.cancel_all();
        if stray > 0 {
            debug!("AppService: {} unowned timers cancelled", stray);
        }
        self.watcher.clear();

        info!("AppService torn down, {} timers released", pending);
        sink.emit(&AppEvent::TornDown {
            cancelled_timers: pending,
        });
        pending
    }

    // ── Time ──────────────────────────────────────────────────

    /// Fire every timer due up to `now_ms`. Returns how many fired.
    pub fn tick(&mut self, now_ms: u64, ports: &mut impl PagePorts, sink: &mut impl EventSink) -> usize {
        if self.torn_down {
            return 0;
        }
        let mut dispatch = Dispatch {
            widgets: &mut self.widgets,
            ports,
            sink,
        };
        self.timers.run_until(now_ms, &mut dispatch)
    }

    /// One host pump: bring the timers up to `now_ms` first, then handle
    /// every queued event against that time. Returns how many timers fired.
    pub fn pump(
        &mut self,
        now_ms: u64,
        mut next_event: impl FnMut() -> Option<PageEvent>,
        ports: &mut impl PagePorts,
        sink: &mut impl EventSink,
    ) -> usize {
        let fired = self.tick(now_ms, ports, sink);
        while let Some(event) = next_event() {
            self.handle_event(event, ports, sink);
        }
        fired
    }

    // ── Event handling ────────────────────────────────────────

    /// React to one page event.
    pub fn handle_event(
        &mut self,
        event: PageEvent,
        ports: &mut impl PagePorts,
        sink: &mut impl EventSink,
    ) {
        if self.torn_down {
            debug!("AppService: {:?} after teardown ignored", event);
            return;
        }
        match event {
            PageEvent::Loaded => {
                if let Some(loader) = self.widgets.loader.as_mut() {
                    loader.on_loaded(&mut self.timers);
                }
            }
            PageEvent::VisibilityChanged { hidden } => {
                self.layout.page_hidden = hidden;
                self.drive_carousel(ports, sink, |c, timers, _| {
                    if hidden {
                        c.pause(PauseReason::Hidden, timers);
                    } else {
                        c.resume(PauseReason::Hidden, timers);
                    }
                });
                if let Some(particles) = self.widgets.particles.as_mut() {
                    particles.set_hidden(hidden, &mut self.timers);
                }
            }
            PageEvent::Scrolled { y } => {
                if let Some(header) = self.widgets.header.as_mut() {
                    header.on_scroll(y, &mut self.timers);
                }
                if let Some(btt) = self.widgets.back_to_top.as_mut() {
                    btt.on_scroll(y, &mut self.timers);
                }
            }
            PageEvent::NavToggleClicked => {
                if let Some(nav) = self.widgets.nav.as_mut() {
                    let open = nav.toggle(ports);
                    sink.emit(&AppEvent::NavMenu(open));
                }
            }
            PageEvent::NavLinkClicked(_) | PageEvent::ClickedOutsideNav => {
                if let Some(nav) = self.widgets.nav.as_mut() {
                    if nav.close(ports) {
                        sink.emit(&AppEvent::NavMenu(false));
                    }
                }
            }
            PageEvent::AnchorClicked { href, target_top } => {
                if let Some(anchors) = self.widgets.anchors {
                    if !anchors.on_click(&href, target_top, ports) {
                        debug!("Anchor {} has no target", href);
                    }
                }
            }
            PageEvent::BackToTopClicked => {
                if let Some(btt) = self.widgets.back_to_top.as_ref() {
                    btt.on_click(ports);
                }
            }
            PageEvent::ThemeToggleClicked => self.toggle_theme(ports, sink),
            PageEvent::FilterClicked(index) => {
                if let Some(filter) = self.widgets.filter.as_mut() {
                    if let Some((value, shown)) = filter.select(index, ports) {
                        sink.emit(&AppEvent::FilterApplied {
                            filter: value.to_owned(),
                            shown,
                        });
                    }
                }
            }
            PageEvent::CarouselPrevious => self.drive_carousel(ports, sink, |c, _, p| c.previous(p)),
            PageEvent::CarouselNext => self.drive_carousel(ports, sink, |c, _, p| c.next(p)),
            PageEvent::IndicatorClicked(index) => {
                self.drive_carousel(ports, sink, |c, _, p| c.show_slide(index as isize, p));
            }
            PageEvent::CarouselHover(inside) => self.pause_trigger(PauseReason::Hover, inside, ports, sink),
            PageEvent::CarouselFocus(inside) => self.pause_trigger(PauseReason::Focus, inside, ports, sink),
            PageEvent::FormSubmitted(raw) => {
                if let Some(form) = self.widgets.form.as_mut() {
                    if let SubmitOutcome::Rejected(reason) = form.submit(&raw, &mut self.timers, ports) {
                        sink.emit(&AppEvent::FormRejected(reason));
                    }
                }
            }
            PageEvent::Intersected { target, visible } => self.on_intersection(target, visible, ports, sink),
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        ports: &mut impl PagePorts,
        sink: &mut impl EventSink,
    ) {
        if self.torn_down {
            return;
        }
        match cmd {
            AppCommand::SetTheme(theme) => self.set_theme(theme, ports, sink),
            AppCommand::ToggleTheme => self.toggle_theme(ports, sink),
            AppCommand::ShowSlide(index) => self.drive_carousel(ports, sink, |c, _, p| c.show_slide(index, p)),
            AppCommand::NextSlide => self.drive_carousel(ports, sink, |c, _, p| c.next(p)),
            AppCommand::PreviousSlide => self.drive_carousel(ports, sink, |c, _, p| c.previous(p)),
            AppCommand::StartAutoplay => self.drive_carousel(ports, sink, |c, t, _| c.start_autoplay(t)),
            AppCommand::StopAutoplay => self.drive_carousel(ports, sink, |c, t, _| c.stop_autoplay(t)),
            AppCommand::Filter(value) => {
                if let Some(filter) = self.widgets.filter.as_mut() {
                    match filter.select_value(&value, ports) {
                        Some((value, shown)) => sink.emit(&AppEvent::FilterApplied {
                            filter: value.to_owned(),
                            shown,
                        }),
                        None => debug!("Filter {:?} not on the page", value),
                    }
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn timers(&self) -> &Scheduler {
        &self.timers
    }

    pub fn widgets(&self) -> &Widgets {
        &self.widgets
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.widgets.carousel.as_ref()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.widgets.theme.as_ref().map(|t| t.current())
    }

    pub fn form_status(&self) -> Option<FormStatus> {
        self.widgets.form.as_ref().and_then(|f| f.status())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ── Internal ──────────────────────────────────────────────

    /// Run `f` on the carousel and report index or playback changes.
    fn drive_carousel<P: PagePorts>(
        &mut self,
        ports: &mut P,
        sink: &mut impl EventSink,
        f: impl FnOnce(&mut Carousel, &mut Scheduler, &mut P),
    ) {
        let Some(carousel) = self.widgets.carousel.as_mut() else {
            return;
        };
        let (from, was) = (carousel.current_index(), carousel.state());
        f(carousel, &mut self.timers, ports);
        let (to, now) = (carousel.current_index(), carousel.state());
        if from != to {
            sink.emit(&AppEvent::SlideChanged { from, to });
        }
        if was != now {
            sink.emit(&AppEvent::PlaybackChanged(now));
        }
    }

    fn pause_trigger<P: PagePorts>(
        &mut self,
        reason: PauseReason,
        active: bool,
        ports: &mut P,
        sink: &mut impl EventSink,
    ) {
        self.drive_carousel(ports, sink, |c, timers, _| {
            if active {
                c.pause(reason, timers);
            } else {
                c.resume(reason, timers);
            }
        });
    }

    fn toggle_theme(&mut self, ports: &mut impl PagePorts, sink: &mut impl EventSink) {
        if let Some(theme) = self.widgets.theme.as_mut() {
            let now = theme.toggle(ports);
            sink.emit(&AppEvent::ThemeApplied(now));
        }
    }

    fn set_theme(&mut self, theme: Theme, ports: &mut impl PagePorts, sink: &mut impl EventSink) {
        if let Some(pref) = self.widgets.theme.as_mut() {
            pref.set(theme, ports);
            sink.emit(&AppEvent::ThemeApplied(theme));
        }
    }

    fn on_intersection(
        &mut self,
        target: WatchTarget,
        visible: bool,
        ports: &mut impl PagePorts,
        sink: &mut impl EventSink,
    ) {
        let crossing = self.watcher.observe(target, visible);
        if crossing == Crossing::Ignored {
            return;
        }
        let w = &mut self.widgets;
        match target {
            WatchTarget::Section(i) => {
                if let Some(sections) = w.sections.as_mut() {
                    if let Some(id) = sections.on_section_visible(i, ports) {
                        sink.emit(&AppEvent::SectionActive(id.to_owned()));
                    }
                }
            }
            WatchTarget::Reveal(i) if w.reveal => ports.reveal(i),
            WatchTarget::SkillBar(i) if w.skill_bars => ports.fill_skill_bar(i),
            WatchTarget::LazyImage(i) if w.lazy_images => ports.mark_image_seen(i),
            _ => debug!("Intersection for disabled feature: {:?}", target),
        }
        if crossing == Crossing::FireAndDetach {
            ports.stop_watching(target);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Timer dispatch
// ───────────────────────────────────────────────────────────────

/// Routes fired timers to the widget that owns them.
struct Dispatch<'a, P, S> {
    widgets: &'a mut Widgets,
    ports: &'a mut P,
    sink: &'a mut S,
}

impl<P: PagePorts, S: EventSink> TimerDelegate for Dispatch<'_, P, S> {
    fn on_timer_fired(&mut self, timers: &mut Scheduler, id: TimerId, tag: TimerTag) {
        let w = &mut *self.widgets;
        let ports = &mut *self.ports;
        let handled = match tag {
            TimerTag::LoaderFade | TimerTag::LoaderRemove => match w.loader.as_mut() {
                Some(loader) => match loader.on_timer(id, timers, ports) {
                    Some(LoaderPhase::Removed) => {
                        self.sink.emit(&AppEvent::LoaderHidden);
                        true
                    }
                    Some(_) => true,
                    None => false,
                },
                None => false,
            },
            TimerTag::HeaderThrottle => w.header.as_mut().is_some_and(|h| h.on_timer(id, ports)),
            TimerTag::BackToTopThrottle => w.back_to_top.as_mut().is_some_and(|b| b.on_timer(id, ports)),
            TimerTag::TypingStep => w.typing.as_mut().is_some_and(|t| t.on_timer(id, timers, ports)),
            TimerTag::ParticleSpawn | TimerTag::ParticleExpire(_) => w
                .particles
                .as_mut()
                .is_some_and(|p| p.on_timer(id, tag, timers, ports)),
            TimerTag::CarouselAdvance => match w.carousel.as_mut() {
                Some(carousel) => {
                    let from = carousel.current_index();
                    let ours = carousel.on_timer(id, ports);
                    let to = carousel.current_index();
                    if ours && from != to {
                        self.sink.emit(&AppEvent::SlideChanged { from, to });
                    }
                    ours
                }
                None => false,
            },
            TimerTag::FormDelivery | TimerTag::FormStatusHide => match w.form.as_mut() {
                Some(form) => {
                    match form.on_timer(id, timers, ports) {
                        Some(Delivery::Sent) => self.sink.emit(&AppEvent::FormSent),
                        Some(Delivery::Failed(e)) => self.sink.emit(&AppEvent::FormFailed(e)),
                        None => {}
                    }
                    true
                }
                None => false,
            },
        };
        if !handled {
            debug!("Timer {:?} ({:?}) had no owner", id, tag);
        }
    }
}
