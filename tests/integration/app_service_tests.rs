//! Integration tests for the AppService → widgets → DOM pipeline.
//!
//! These run on the host and drive the service the way the browser adapter
//! does: page events in, virtual time advanced with `tick`, DOM writes
//! recorded by the mock page.

use super::mock_page::{full_layout, DomCall, EventLog, RecordingPage};

use folio::adapters::storage::MemoryStorage;
use folio::app::commands::AppCommand;
use folio::app::events::AppEvent;
use folio::app::layout::PageLayout;
use folio::app::ports::StoragePort;
use folio::app::service::AppService;
use folio::app::startup::Feature;
use folio::config::PageConfig;
use folio::events::PageEvent;
use folio::observers::WatchTarget;
use folio::widgets::theme::Theme;

fn make_app(layout: PageLayout) -> (AppService, RecordingPage, EventLog) {
    make_app_with(layout, RecordingPage::new())
}

fn make_app_with(layout: PageLayout, mut page: RecordingPage) -> (AppService, RecordingPage, EventLog) {
    let mut app = AppService::new(PageConfig::default(), layout);
    let mut sink = EventLog::new();
    app.start(&mut page, &mut sink);
    (app, page, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn full_page_starts_every_feature() {
    let (app, page, sink) = make_app(full_layout());
    assert!(app.is_started());

    let started = sink.events.iter().find_map(|e| match e {
        AppEvent::Started { features } => Some(features.clone()),
        _ => None,
    });
    assert_eq!(started.map(|f| f.len()), Some(Feature::COUNT));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FeatureSkipped(_))), 0);

    // First slide and indicator active, light theme applied, burst spawned.
    assert_eq!(page.active_slide, Some(0));
    assert_eq!(page.active_indicator, Some(0));
    assert_eq!(page.theme(), Some(Theme::Light));
    assert_eq!(page.particles.len(), 20);
}

#[test]
fn start_is_idempotent() {
    let (mut app, mut page, mut sink) = make_app(full_layout());
    let calls = page.calls.len();
    let pending = app.timers().pending_count();

    app.start(&mut page, &mut sink);

    assert_eq!(page.calls.len(), calls, "second start must not touch the page");
    assert_eq!(app.timers().pending_count(), pending);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Started { .. })), 1);
}

#[test]
fn missing_roles_skip_features_without_failing() {
    let layout = PageLayout {
        has_header: true,
        slide_count: 0,
        ..PageLayout::default()
    };
    let (app, page, sink) = make_app(layout);

    assert!(sink.has(&AppEvent::FeatureSkipped(Feature::Carousel)));
    assert!(sink.has(&AppEvent::FeatureSkipped(Feature::ContactForm)));
    assert!(!sink.has(&AppEvent::FeatureSkipped(Feature::HeaderScroll)));
    assert!(app.carousel().is_none());
    assert_eq!(page.count(|c| matches!(c, DomCall::SlideActive(..))), 0);
}

// ── Loader ────────────────────────────────────────────────────

#[test]
fn loader_respects_minimum_display_then_fades() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    app.handle_event(PageEvent::Loaded, &mut page, &mut sink);
    app.tick(799, &mut page, &mut sink);
    assert!(!page.has(&DomCall::FadeOutLoader));

    app.tick(800, &mut page, &mut sink);
    assert!(page.has(&DomCall::FadeOutLoader));
    assert!(!page.has(&DomCall::RemoveLoader));

    app.tick(1300, &mut page, &mut sink);
    assert!(page.has(&DomCall::RemoveLoader));
    assert!(sink.has(&AppEvent::LoaderHidden));
}

#[test]
fn slow_load_fades_immediately() {
    let (mut app, mut page, mut sink) = make_app(full_layout());
    app.tick(3000, &mut page, &mut sink);
    assert!(!page.has(&DomCall::FadeOutLoader), "no fade before load");

    app.handle_event(PageEvent::Loaded, &mut page, &mut sink);
    app.tick(3000, &mut page, &mut sink);
    assert!(page.has(&DomCall::FadeOutLoader));
}

#[test]
fn already_loaded_document_needs_no_load_event() {
    let layout = PageLayout {
        already_loaded: true,
        ..full_layout()
    };
    let (mut app, mut page, mut sink) = make_app(layout);
    app.tick(1300, &mut page, &mut sink);
    assert!(page.has(&DomCall::RemoveLoader));
}

// ── Scrolling ─────────────────────────────────────────────────

#[test]
fn header_reacts_to_latest_offset_in_window() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    app.handle_event(PageEvent::Scrolled { y: 10.0 }, &mut page, &mut sink);
    app.handle_event(PageEvent::Scrolled { y: 120.0 }, &mut page, &mut sink);
    app.tick(10, &mut page, &mut sink);
    assert_eq!(page.count(|c| *c == DomCall::HeaderScrolled(true)), 1);

    // Still past the threshold: no redundant write.
    app.handle_event(PageEvent::Scrolled { y: 200.0 }, &mut page, &mut sink);
    app.tick(20, &mut page, &mut sink);
    assert_eq!(page.count(|c| matches!(c, DomCall::HeaderScrolled(_))), 1);

    app.handle_event(PageEvent::Scrolled { y: 50.0 }, &mut page, &mut sink);
    app.tick(30, &mut page, &mut sink);
    assert!(page.has(&DomCall::HeaderScrolled(false)), "50 px is not past 50 px");
}

#[test]
fn back_to_top_shows_past_threshold_and_scrolls_home() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    app.handle_event(PageEvent::Scrolled { y: 450.0 }, &mut page, &mut sink);
    app.tick(99, &mut page, &mut sink);
    assert!(!page.has(&DomCall::BackToTop(true)));
    app.tick(100, &mut page, &mut sink);
    assert!(page.has(&DomCall::BackToTop(true)));

    app.handle_event(PageEvent::BackToTopClicked, &mut page, &mut sink);
    assert_eq!(page.calls.last(), Some(&DomCall::ScrollTo(0.0)));
}

#[test]
fn anchor_click_scrolls_below_fixed_header() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    let click = |href: &str, top: Option<f64>| PageEvent::AnchorClicked {
        href: href.to_owned(),
        target_top: top,
    };
    app.handle_event(click("#about", Some(500.0)), &mut page, &mut sink);
    assert_eq!(page.calls.last(), Some(&DomCall::ScrollTo(420.0)));

    app.handle_event(click("#home", Some(30.0)), &mut page, &mut sink);
    assert_eq!(page.calls.last(), Some(&DomCall::ScrollTo(0.0)));

    page.clear();
    app.handle_event(click("#missing", None), &mut page, &mut sink);
    app.handle_event(click("#", Some(100.0)), &mut page, &mut sink);
    assert_eq!(page.count(|c| matches!(c, DomCall::ScrollTo(_))), 0);
}

// ── Navigation ────────────────────────────────────────────────

#[test]
fn nav_toggle_link_and_outside_click() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    app.handle_event(PageEvent::NavToggleClicked, &mut page, &mut sink);
    assert_eq!(page.calls.last(), Some(&DomCall::NavOpen(true)));
    assert!(sink.has(&AppEvent::NavMenu(true)));

    app.handle_event(PageEvent::NavLinkClicked(2), &mut page, &mut sink);
    assert_eq!(page.calls.last(), Some(&DomCall::NavOpen(false)));

    // Closed menu: an outside click writes nothing.
    page.clear();
    app.handle_event(PageEvent::ClickedOutsideNav, &mut page, &mut sink);
    assert!(page.calls.is_empty());

    app.handle_event(PageEvent::NavToggleClicked, &mut page, &mut sink);
    app.handle_event(PageEvent::ClickedOutsideNav, &mut page, &mut sink);
    assert_eq!(page.calls.last(), Some(&DomCall::NavOpen(false)));
}

#[test]
fn visible_section_highlights_its_link() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    app.handle_event(
        PageEvent::Intersected {
            target: WatchTarget::Section(1),
            visible: true,
        },
        &mut page,
        &mut sink,
    );
    assert!(page.has(&DomCall::NavLinkActive(1, true)));
    assert!(page.has(&DomCall::NavLinkActive(0, false)));
    assert!(sink.has(&AppEvent::SectionActive("about".into())));

    // "testimonials" has no link: every link is cleared.
    page.clear();
    app.handle_event(
        PageEvent::Intersected {
            target: WatchTarget::Section(3),
            visible: true,
        },
        &mut page,
        &mut sink,
    );
    assert_eq!(page.count(|c| matches!(c, DomCall::NavLinkActive(_, true))), 0);
    assert_eq!(page.count(|c| matches!(c, DomCall::NavLinkActive(_, false))), 4);

    // Leaving view is not a crossing into view.
    page.clear();
    app.handle_event(
        PageEvent::Intersected {
            target: WatchTarget::Section(0),
            visible: false,
        },
        &mut page,
        &mut sink,
    );
    assert!(page.calls.is_empty());
}

// ── Theme ─────────────────────────────────────────────────────

#[test]
fn stored_theme_wins_over_system_preference() {
    let mut storage = MemoryStorage::new();
    storage.set("theme", "dark").unwrap();
    let page = RecordingPage::with_storage(storage);

    let (app, page, sink) = make_app_with(full_layout(), page);
    assert_eq!(app.theme(), Some(Theme::Dark));
    assert_eq!(page.theme(), Some(Theme::Dark));
    assert!(sink.has(&AppEvent::ThemeApplied(Theme::Dark)));
}

#[test]
fn system_dark_preference_applies_without_storage() {
    let layout = PageLayout {
        prefers_dark: true,
        ..full_layout()
    };
    let (app, page, _) = make_app(layout);
    assert_eq!(app.theme(), Some(Theme::Dark));
    assert_eq!(page.theme(), Some(Theme::Dark));
}

#[test]
fn toggle_flips_and_persists() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    app.handle_event(PageEvent::ThemeToggleClicked, &mut page, &mut sink);
    assert_eq!(app.theme(), Some(Theme::Dark));
    assert_eq!(page.theme(), Some(Theme::Dark));
    assert_eq!(page.get("theme"), Ok(Some("dark".into())));

    app.handle_event(PageEvent::ThemeToggleClicked, &mut page, &mut sink);
    assert_eq!(page.get("theme"), Ok(Some("light".into())));
}

#[test]
fn toggle_still_applies_when_storage_is_unavailable() {
    let page = RecordingPage::with_storage(MemoryStorage::unavailable());
    let (mut app, mut page, mut sink) = make_app_with(full_layout(), page);
    assert_eq!(app.theme(), Some(Theme::Light));

    app.handle_event(PageEvent::ThemeToggleClicked, &mut page, &mut sink);
    assert_eq!(page.theme(), Some(Theme::Dark));
    assert!(sink.has(&AppEvent::ThemeApplied(Theme::Dark)));
}

// ── Typing ────────────────────────────────────────────────────

#[test]
fn typing_starts_after_delay_and_types_one_char_per_step() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    app.tick(999, &mut page, &mut sink);
    assert_eq!(page.typed_text(), None);

    app.tick(1000, &mut page, &mut sink);
    assert_eq!(page.typed_text(), Some("W"));

    app.tick(1150, &mut page, &mut sink);
    assert_eq!(page.typed_text(), Some("We"));
}

// ── Particles ─────────────────────────────────────────────────

#[test]
fn particles_spawn_periodically_and_expire() {
    let (mut app, mut page, mut sink) = make_app(full_layout());
    assert_eq!(page.particles.len(), 20);

    app.tick(400, &mut page, &mut sink);
    assert_eq!(page.particles.len(), 21);

    // The initial burst expires at 12 s; spawns at 400..=12000 remain.
    for now in (800..=12_000).step_by(400) {
        app.tick(now, &mut page, &mut sink);
    }
    assert!(!page.particles.contains(&0));
    assert_eq!(page.particles.len(), 30);
}

#[test]
fn hidden_page_pauses_particle_spawning() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    app.handle_event(PageEvent::VisibilityChanged { hidden: true }, &mut page, &mut sink);
    app.tick(2000, &mut page, &mut sink);
    assert_eq!(page.count(|c| matches!(c, DomCall::SpawnParticle(_))), 20);

    app.handle_event(PageEvent::VisibilityChanged { hidden: false }, &mut page, &mut sink);
    app.tick(2400, &mut page, &mut sink);
    assert_eq!(page.count(|c| matches!(c, DomCall::SpawnParticle(_))), 21);
}

// ── Portfolio filter ──────────────────────────────────────────

#[test]
fn filter_click_shows_matching_items() {
    let (mut app, mut page, mut sink) = make_app(full_layout());

    app.handle_event(PageEvent::FilterClicked(1), &mut page, &mut sink);
    assert!(page.has(&DomCall::FilterSelected(1, true)));
    assert!(page.has(&DomCall::FilterSelected(0, false)));
    assert_eq!(page.item_visible(0), Some(true));
    assert_eq!(page.item_visible(1), Some(false));
    assert_eq!(page.item_visible(2), Some(true));
    assert_eq!(page.item_visible(3), Some(false));
    assert!(sink.has(&AppEvent::FilterApplied {
        filter: "web".into(),
        shown: 2
    }));

    app.handle_command(AppCommand::Filter("all".into()), &mut page, &mut sink);
    assert!((0..4).all(|i| page.item_visible(i) == Some(true)));

    // Unknown filter value: nothing changes.
    page.clear();
    app.handle_command(AppCommand::Filter("games".into()), &mut page, &mut sink);
    assert!(page.calls.is_empty());
}

// ── Observed elements ─────────────────────────────────────────

#[test]
fn reveal_fires_each_time_skill_bar_only_once() {
    let (mut app, mut page, mut sink) = make_app(full_layout());
    let seen = |target| PageEvent::Intersected { target, visible: true };

    app.handle_event(seen(WatchTarget::Reveal(2)), &mut page, &mut sink);
    app.handle_event(seen(WatchTarget::Reveal(2)), &mut page, &mut sink);
    assert_eq!(page.count(|c| *c == DomCall::Reveal(2)), 2);
    assert!(!page.has(&DomCall::StopWatching(WatchTarget::Reveal(2))));

    app.handle_event(seen(WatchTarget::SkillBar(0)), &mut page, &mut sink);
    app.handle_event(seen(WatchTarget::SkillBar(0)), &mut page, &mut sink);
    assert_eq!(page.count(|c| *c == DomCall::FillSkillBar(0)), 1);
    assert!(page.has(&DomCall::StopWatching(WatchTarget::SkillBar(0))));

    app.handle_event(seen(WatchTarget::LazyImage(1)), &mut page, &mut sink);
    assert!(page.has(&DomCall::ImageSeen(1)));
    assert!(page.has(&DomCall::StopWatching(WatchTarget::LazyImage(1))));
}

// ── Teardown ──────────────────────────────────────────────────

#[test]
fn teardown_releases_everything_and_ignores_later_events() {
    let (mut app, mut page, mut sink) = make_app(full_layout());
    assert!(app.timers().pending_count() > 0);

    let cancelled = app.teardown(&mut page, &mut sink);
    assert!(cancelled > 0);
    assert_eq!(app.timers().pending_count(), 0);
    assert!(page.particles.is_empty(), "particles must leave the page");
    assert!(sink.has(&AppEvent::TornDown {
        cancelled_timers: cancelled
    }));

    page.clear();
    assert_eq!(app.tick(60_000, &mut page, &mut sink), 0);
    app.handle_event(PageEvent::ThemeToggleClicked, &mut page, &mut sink);
    app.handle_command(AppCommand::NextSlide, &mut page, &mut sink);
    assert!(page.calls.is_empty());

    assert_eq!(app.teardown(&mut page, &mut sink), 0, "second teardown is a no-op");
}
