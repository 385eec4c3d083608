//! Feature table: ordering, presence checks and independent init.

use super::mock_page::{full_layout, EventLog, RecordingPage};

use folio::app::events::AppEvent;
use folio::app::layout::PageLayout;
use folio::app::service::AppService;
use folio::app::startup::{build_feature_table, run_feature_table, Feature, InitCtx, Widgets};
use folio::config::PageConfig;
use folio::scheduler::Scheduler;

#[test]
fn table_rows_follow_feature_order() {
    let table = build_feature_table::<RecordingPage>();
    for (i, row) in table.iter().enumerate() {
        assert_eq!(row.feature as usize, i, "row {} ({}) out of order", i, row.name);
    }
    let mut names: Vec<_> = table.iter().map(|r| r.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Feature::COUNT, "feature names must be unique");
}

#[test]
fn empty_page_enables_only_theme() {
    let config = PageConfig::default();
    let layout = PageLayout::default();
    let mut timers = Scheduler::new();
    let mut page = RecordingPage::new();
    let mut widgets = Widgets::default();
    let mut ctx = InitCtx {
        config: &config,
        layout: &layout,
        timers: &mut timers,
        ports: &mut page,
    };

    let (started, skipped) = run_feature_table(&mut widgets, &mut ctx);

    assert_eq!(started, vec![Feature::Theme]);
    assert_eq!(skipped.len(), Feature::COUNT - 1);
    assert!(widgets.theme.is_some());
    assert!(widgets.carousel.is_none());
    assert_eq!(timers.pending_count(), 0);
}

#[test]
fn full_page_schedules_only_self_driven_timers() {
    let config = PageConfig::default();
    let layout = full_layout();
    let mut timers = Scheduler::new();
    let mut page = RecordingPage::new();
    let mut widgets = Widgets::default();
    let mut ctx = InitCtx {
        config: &config,
        layout: &layout,
        timers: &mut timers,
        ports: &mut page,
    };
    run_feature_table(&mut widgets, &mut ctx);

    // Typing start, carousel interval, particle spawner and one expiry per
    // burst particle. The loader waits for the load event.
    let expected = 1 + 1 + 1 + usize::from(config.particle_initial_count);
    assert_eq!(timers.pending_count(), expected);
}

#[test]
fn mobile_nav_needs_both_toggle_and_menu() {
    let layout = PageLayout {
        has_nav_toggle: true,
        ..PageLayout::default()
    };
    let mut app = AppService::new(PageConfig::default(), layout);
    let mut page = RecordingPage::new();
    let mut sink = EventLog::new();
    app.start(&mut page, &mut sink);

    assert!(sink.has(&AppEvent::FeatureSkipped(Feature::MobileNav)));
    assert!(app.widgets().nav.is_none());
}

#[test]
fn portfolio_filter_needs_buttons_and_items() {
    let layout = PageLayout {
        filter_values: vec!["all".into()],
        ..PageLayout::default()
    };
    let mut app = AppService::new(PageConfig::default(), layout);
    let mut page = RecordingPage::new();
    let mut sink = EventLog::new();
    app.start(&mut page, &mut sink);

    assert!(app.widgets().filter.is_none());
    assert!(sink.has(&AppEvent::FeatureSkipped(Feature::PortfolioFilter)));
}
