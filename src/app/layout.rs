//! Structural roles discovered in the page.
//!
//! The browser adapter fills this in once at start by querying the
//! document. Tests build it by hand. Every count of zero (or `false` flag)
//! turns the matching feature off.

/// What the page contains, by role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    // --- Chrome ---
    pub has_loader: bool,
    pub has_header: bool,
    pub has_nav_toggle: bool,
    pub has_nav_menu: bool,
    /// `href` of each navigation link, in document order.
    pub nav_link_hrefs: Vec<String>,
    /// `id` of each section, in document order.
    pub section_ids: Vec<String>,
    pub has_back_to_top: bool,
    /// In-page anchors (`href` starting with `#`), nav links included.
    pub anchor_count: usize,

    // --- Hero ---
    pub has_typed_text: bool,
    pub has_particles: bool,

    // --- Portfolio ---
    /// `data-filter` of each filter button.
    pub filter_values: Vec<String>,
    /// `data-category` of each portfolio item.
    pub item_categories: Vec<String>,

    // --- Testimonials ---
    pub slide_count: usize,
    pub indicator_count: usize,

    // --- Contact ---
    pub has_contact_form: bool,
    pub has_form_status: bool,

    // --- Observed elements ---
    pub reveal_count: usize,
    pub skill_bar_count: usize,
    pub lazy_image_count: usize,

    // --- Environment ---
    /// OS-level dark colour scheme preference.
    pub prefers_dark: bool,
    /// Page already hidden when the behaviours start.
    pub page_hidden: bool,
    /// Document already fully loaded when the behaviours start.
    pub already_loaded: bool,
    /// Seed for the particle generator.
    pub seed: u64,
}
