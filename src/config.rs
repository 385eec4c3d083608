//! Page configuration parameters
//!
//! All tunable timings and texts for the page behaviours.
//! Values can be overridden by a JSON document embedded in the page; any
//! field left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::carousel::pause::PausePolicy;

/// Core page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    // --- Loader ---
    /// Minimum time the loading screen stays up (milliseconds)
    pub loader_min_display_ms: u64,
    /// Delay between the fade-out and removing the loader (milliseconds)
    pub loader_fade_ms: u64,

    // --- Header / scrolling ---
    /// Scroll offset (px) past which the header switches to its compact state
    pub header_scroll_threshold_px: f64,
    /// Throttle window for header scroll handling (milliseconds)
    pub header_throttle_ms: u64,
    /// Scroll offset (px) past which the back-to-top button shows
    pub back_to_top_threshold_px: f64,
    /// Throttle window for back-to-top scroll handling (milliseconds)
    pub back_to_top_throttle_ms: u64,
    /// Fixed header height subtracted from anchor scroll targets (px)
    pub anchor_offset_px: f64,

    // --- Typing effect ---
    /// Phrases cycled by the typing effect
    pub typing_phrases: Vec<String>,
    /// Delay after typing one character (milliseconds)
    pub typing_char_ms: u64,
    /// Delay after deleting one character (milliseconds)
    pub typing_delete_ms: u64,
    /// Pause at the end of a fully typed phrase (milliseconds)
    pub typing_hold_ms: u64,
    /// Pause before typing the next phrase (milliseconds)
    pub typing_next_phrase_ms: u64,
    /// Delay before the first character appears (milliseconds)
    pub typing_start_delay_ms: u64,

    // --- Particles ---
    /// Period between particle spawns (milliseconds)
    pub particle_interval_ms: u64,
    /// Particles spawned immediately at start
    pub particle_initial_count: u16,
    /// Particle lifetime before removal (milliseconds)
    pub particle_lifetime_ms: u64,

    // --- Carousel ---
    /// Auto-advance period (milliseconds)
    pub carousel_interval_ms: u64,
    /// How overlapping pause triggers combine
    pub carousel_pause_policy: PausePolicy,

    // --- Contact form ---
    /// Simulated submission latency (milliseconds)
    pub form_submit_delay_ms: u64,
    /// How long a status message stays visible (milliseconds)
    pub form_status_display_ms: u64,

    // --- Preferences ---
    /// Local-storage key holding the theme preference
    pub theme_storage_key: String,

    // --- Host ---
    /// Period of the host pump that advances timers (milliseconds)
    pub pump_interval_ms: u32,
    /// Most page time one pump may advance; longer gaps (sleep, throttled
    /// tab) count as suspended time (milliseconds)
    pub max_pump_step_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            // Loader
            loader_min_display_ms: 800,
            loader_fade_ms: 500,

            // Header / scrolling
            header_scroll_threshold_px: 50.0,
            header_throttle_ms: 10,
            back_to_top_threshold_px: 300.0,
            back_to_top_throttle_ms: 100,
            anchor_offset_px: 80.0,

            // Typing
            typing_phrases: [
                "Web Developer",
                "UI/UX Designer",
                "Frontend Expert",
                "Problem Solver",
                "Creative Thinker",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            typing_char_ms: 150,
            typing_delete_ms: 50,
            typing_hold_ms: 2000,
            typing_next_phrase_ms: 500,
            typing_start_delay_ms: 1000,

            // Particles
            particle_interval_ms: 400,
            particle_initial_count: 20,
            particle_lifetime_ms: 12_000,

            // Carousel
            carousel_interval_ms: 5000,
            carousel_pause_policy: PausePolicy::Tracked,

            // Contact form
            form_submit_delay_ms: 1500,
            form_status_display_ms: 5000,

            // Preferences
            theme_storage_key: "theme".into(),

            // Host
            pump_interval_ms: 10,
            max_pump_step_ms: 1000,
        }
    }
}

impl PageConfig {
    /// Range-check every field.
    ///
    /// Invalid values are rejected, never clamped: a page shipping a typo in
    /// its embedded config should fall back to defaults loudly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1000..=60_000).contains(&self.carousel_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "carousel_interval_ms must be 1000–60000",
            ));
        }
        if !(50..=5000).contains(&self.particle_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "particle_interval_ms must be 50–5000",
            ));
        }
        if self.particle_initial_count > 200 {
            return Err(ConfigError::ValidationFailed(
                "particle_initial_count must be 0–200",
            ));
        }
        if !(1000..=120_000).contains(&self.particle_lifetime_ms) {
            return Err(ConfigError::ValidationFailed(
                "particle_lifetime_ms must be 1000–120000",
            ));
        }
        if self.typing_phrases.is_empty() || self.typing_phrases.iter().any(String::is_empty) {
            return Err(ConfigError::ValidationFailed(
                "typing_phrases must be non-empty strings",
            ));
        }
        if self.typing_char_ms == 0 || self.typing_delete_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "typing_char_ms and typing_delete_ms must be > 0",
            ));
        }
        if self.header_throttle_ms == 0 || self.back_to_top_throttle_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "scroll throttle windows must be > 0",
            ));
        }
        if !self.header_scroll_threshold_px.is_finite()
            || !self.back_to_top_threshold_px.is_finite()
            || !self.anchor_offset_px.is_finite()
        {
            return Err(ConfigError::ValidationFailed(
                "scroll thresholds and offsets must be finite",
            ));
        }
        if self.form_status_display_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "form_status_display_ms must be > 0",
            ));
        }
        if self.theme_storage_key.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "theme_storage_key must not be blank",
            ));
        }
        if !(1..=100).contains(&self.pump_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "pump_interval_ms must be 1–100",
            ));
        }
        if self.max_pump_step_ms < u64::from(self.pump_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "max_pump_step_ms must be >= pump_interval_ms",
            ));
        }
        Ok(())
    }
}

/// Load and validate configuration through a [`ConfigPort`].
pub fn load_config(port: &impl ConfigPort) -> crate::Result<PageConfig> {
    let config = port.load()?;
    config.validate()?;
    Ok(config)
}
