//! Feature initialisation table.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  FeatureTable                                                │
//! │  ┌──────────────────┬────────────────────┬────────────────┐  │
//! │  │ Feature          │ present(layout)    │ init(widgets)  │  │
//! │  ├──────────────────┼────────────────────┼────────────────┤  │
//! │  │ Loader           │ loader role        │ fn(w, ctx)     │  │
//! │  │ Carousel         │ slides > 0         │ fn(w, ctx)     │  │
//! │  │ ...              │ ...                │ ...            │  │
//! │  └──────────────────┴────────────────────┴────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Features are independent, so the table can run in any order. A feature
//! whose roles are missing from the [`PageLayout`] is skipped.

use log::debug;

use crate::carousel::pause::PauseReason;
use crate::carousel::Carousel;
use crate::config::PageConfig;
use crate::scheduler::Scheduler;
use crate::widgets::filter::PortfolioFilter;
use crate::widgets::form::FormController;
use crate::widgets::loader::Loader;
use crate::widgets::nav::{NavMenu, SectionHighlighter};
use crate::widgets::particles::ParticleField;
use crate::widgets::scroll::{AnchorScroll, BackToTop, HeaderScroll};
use crate::widgets::theme::ThemePreference;
use crate::widgets::typing::{TypingTimings, Typewriter};

use super::layout::PageLayout;
use super::ports::PagePorts;

// ---------------------------------------------------------------------------
// Feature identity
// ---------------------------------------------------------------------------

/// Every independently initialised page behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Feature {
    Loader = 0,
    HeaderScroll = 1,
    MobileNav = 2,
    SectionHighlight = 3,
    Theme = 4,
    Typing = 5,
    Particles = 6,
    PortfolioFilter = 7,
    Carousel = 8,
    ContactForm = 9,
    BackToTop = 10,
    AnchorScroll = 11,
    Reveal = 12,
    SkillBars = 13,
    LazyImages = 14,
}

impl Feature {
    /// Total number of features, used to size the table array.
    pub const COUNT: usize = 15;
}

// ---------------------------------------------------------------------------
// Widget slots
// ---------------------------------------------------------------------------

/// Every widget the page may run. `None` means the feature is off.
#[derive(Default)]
pub struct Widgets {
    pub loader: Option<Loader>,
    pub header: Option<HeaderScroll>,
    pub nav: Option<NavMenu>,
    pub sections: Option<SectionHighlighter>,
    pub theme: Option<ThemePreference>,
    pub typing: Option<Typewriter>,
    pub particles: Option<ParticleField>,
    pub filter: Option<PortfolioFilter>,
    pub carousel: Option<Carousel>,
    pub form: Option<FormController>,
    pub back_to_top: Option<BackToTop>,
    pub anchors: Option<AnchorScroll>,
    pub reveal: bool,
    pub skill_bars: bool,
    pub lazy_images: bool,
}

/// Everything an init routine may touch.
pub struct InitCtx<'a, P> {
    pub config: &'a PageConfig,
    pub layout: &'a PageLayout,
    pub timers: &'a mut Scheduler,
    pub ports: &'a mut P,
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Whether the page carries the roles a feature needs.
pub type PresentFn = fn(&PageLayout) -> bool;

/// Build the feature's widget and start its timers.
pub type InitFn<P> = fn(&mut Widgets, &mut InitCtx<'_, P>);

/// One row of the feature table.
pub struct FeatureDescriptor<P> {
    pub feature: Feature,
    pub name: &'static str,
    pub present: PresentFn,
    pub init: InitFn<P>,
}

/// Build the table. Order is irrelevant; it follows the page top to bottom.
pub fn build_feature_table<P: PagePorts>() -> [FeatureDescriptor<P>; Feature::COUNT] {
    [
        FeatureDescriptor {
            feature: Feature::Loader,
            name: "loader",
            present: |l| l.has_loader,
            init: init_loader::<P>,
        },
        FeatureDescriptor {
            feature: Feature::HeaderScroll,
            name: "header scroll",
            present: |l| l.has_header,
            init: init_header::<P>,
        },
        FeatureDescriptor {
            feature: Feature::MobileNav,
            name: "mobile nav",
            present: |l| l.has_nav_toggle && l.has_nav_menu,
            init: init_nav::<P>,
        },
        FeatureDescriptor {
            feature: Feature::SectionHighlight,
            name: "section highlight",
            present: |l| !l.section_ids.is_empty(),
            init: init_sections::<P>,
        },
        FeatureDescriptor {
            feature: Feature::Theme,
            name: "theme",
            present: |_| true,
            init: init_theme::<P>,
        },
        FeatureDescriptor {
            feature: Feature::Typing,
            name: "typing",
            present: |l| l.has_typed_text,
            init: init_typing::<P>,
        },
        FeatureDescriptor {
            feature: Feature::Particles,
            name: "particles",
            present: |l| l.has_particles,
            init: init_particles::<P>,
        },
        FeatureDescriptor {
            feature: Feature::PortfolioFilter,
            name: "portfolio filter",
            present: |l| !l.filter_values.is_empty() && !l.item_categories.is_empty(),
            init: init_filter::<P>,
        },
        FeatureDescriptor {
            feature: Feature::Carousel,
            name: "carousel",
            present: |l| l.slide_count > 0,
            init: init_carousel::<P>,
        },
        FeatureDescriptor {
            feature: Feature::ContactForm,
            name: "contact form",
            present: |l| l.has_contact_form && l.has_form_status,
            init: init_form::<P>,
        },
        FeatureDescriptor {
            feature: Feature::BackToTop,
            name: "back to top",
            present: |l| l.has_back_to_top,
            init: init_back_to_top::<P>,
        },
        FeatureDescriptor {
            feature: Feature::AnchorScroll,
            name: "anchor scroll",
            present: |l| l.anchor_count > 0,
            init: init_anchors::<P>,
        },
        FeatureDescriptor {
            feature: Feature::Reveal,
            name: "reveal",
            present: |l| l.reveal_count > 0,
            init: init_reveal::<P>,
        },
        FeatureDescriptor {
            feature: Feature::SkillBars,
            name: "skill bars",
            present: |l| l.skill_bar_count > 0,
            init: init_skill_bars::<P>,
        },
        FeatureDescriptor {
            feature: Feature::LazyImages,
            name: "lazy images",
            present: |l| l.lazy_image_count > 0,
            init: init_lazy_images::<P>,
        },
    ]
}

/// Run every present feature's init. Returns `(started, skipped)`.
pub fn run_feature_table<P: PagePorts>(
    widgets: &mut Widgets,
    ctx: &mut InitCtx<'_, P>,
) -> (Vec<Feature>, Vec<Feature>) {
    let mut started = Vec::new();
    let mut skipped = Vec::new();
    for row in build_feature_table::<P>() {
        if (row.present)(ctx.layout) {
            (row.init)(widgets, ctx);
            started.push(row.feature);
        } else {
            debug!("Startup: {} skipped, page roles missing", row.name);
            skipped.push(row.feature);
        }
    }
    (started, skipped)
}

// ---------------------------------------------------------------------------
// Init routines
// ---------------------------------------------------------------------------

fn init_loader<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    let mut loader = Loader::new(
        ctx.timers.now_ms(),
        ctx.config.loader_min_display_ms,
        ctx.config.loader_fade_ms,
    );
    if ctx.layout.already_loaded {
        loader.on_loaded(ctx.timers);
    }
    w.loader = Some(loader);
}

fn init_header<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    w.header = Some(HeaderScroll::new(
        ctx.config.header_scroll_threshold_px,
        ctx.config.header_throttle_ms,
    ));
}

fn init_nav<P: PagePorts>(w: &mut Widgets, _ctx: &mut InitCtx<'_, P>) {
    w.nav = Some(NavMenu::new());
}

fn init_sections<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    w.sections = Some(SectionHighlighter::new(
        ctx.layout.nav_link_hrefs.clone(),
        ctx.layout.section_ids.clone(),
    ));
}

fn init_theme<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    let pref = ThemePreference::resolve(
        &ctx.config.theme_storage_key,
        &*ctx.ports,
        ctx.layout.prefers_dark,
    );
    pref.apply(&mut *ctx.ports);
    w.theme = Some(pref);
}

fn init_typing<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    let mut typing = Typewriter::new(&ctx.config.typing_phrases, TypingTimings::from(ctx.config));
    typing.start(ctx.timers);
    w.typing = Some(typing);
}

fn init_particles<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    let mut field = ParticleField::new(
        ctx.layout.seed,
        ctx.config.particle_initial_count,
        ctx.config.particle_interval_ms,
        ctx.config.particle_lifetime_ms,
    );
    field.start(ctx.timers, &mut *ctx.ports);
    if ctx.layout.page_hidden {
        field.set_hidden(true, ctx.timers);
    }
    w.particles = Some(field);
}

fn init_filter<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    w.filter = Some(PortfolioFilter::new(
        ctx.layout.filter_values.clone(),
        ctx.layout.item_categories.clone(),
    ));
}

fn init_carousel<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    let mut carousel = Carousel::new(
        ctx.layout.slide_count,
        ctx.layout.indicator_count,
        ctx.config.carousel_interval_ms,
        ctx.config.carousel_pause_policy,
    );
    carousel.show_slide(0, &mut *ctx.ports);
    carousel.start_autoplay(ctx.timers);
    if ctx.layout.page_hidden {
        carousel.pause(PauseReason::Hidden, ctx.timers);
    }
    w.carousel = Some(carousel);
}

fn init_form<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    w.form = Some(FormController::new(
        ctx.config.form_submit_delay_ms,
        ctx.config.form_status_display_ms,
    ));
}

fn init_back_to_top<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    w.back_to_top = Some(BackToTop::new(
        ctx.config.back_to_top_threshold_px,
        ctx.config.back_to_top_throttle_ms,
    ));
}

fn init_anchors<P: PagePorts>(w: &mut Widgets, ctx: &mut InitCtx<'_, P>) {
    w.anchors = Some(AnchorScroll::new(ctx.config.anchor_offset_px));
}

fn init_reveal<P: PagePorts>(w: &mut Widgets, _ctx: &mut InitCtx<'_, P>) {
    w.reveal = true;
}

fn init_skill_bars<P: PagePorts>(w: &mut Widgets, _ctx: &mut InitCtx<'_, P>) {
    w.skill_bars = true;
}

fn init_lazy_images<P: PagePorts>(w: &mut Widgets, _ctx: &mut InitCtx<'_, P>) {
    w.lazy_images = true;
}
