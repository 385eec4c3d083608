//! Colour theme preference.
//!
//! Resolution order at start:
//! 1. a valid value stored under the theme key (`light` / `dark`),
//! 2. the OS preference (`prefers-color-scheme: dark`),
//! 3. `light`.
//!
//! Toggling applies the new theme first and persists it second, so a
//! storage failure never leaves the page showing the wrong theme.

use core::fmt;
use core::str::FromStr;

use log::{info, warn};

use crate::app::ports::{DomPort, StoragePort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Exact persisted / `data-theme` value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon class shown on the toggle: a sun while dark, a moon while light.
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fa-moon",
            Self::Dark => "fa-sun",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored theme value that is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme {:?}", self.0)
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Where the active theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Stored,
    System,
    Fallback,
    User,
}

/// Theme state plus the storage key it persists under.
#[derive(Debug)]
pub struct ThemePreference {
    key: String,
    current: Theme,
    source: ThemeSource,
}

impl ThemePreference {
    /// Resolve the initial theme. Never fails: unreadable or invalid
    /// storage falls through to the OS preference.
    pub fn resolve(key: &str, storage: &impl StoragePort, prefers_dark: bool) -> Self {
        let stored = match storage.get(key) {
            Ok(Some(raw)) => match raw.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    warn!("Theme: ignoring stored value: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Theme: storage read failed: {e}");
                None
            }
        };

        let (current, source) = match stored {
            Some(theme) => (theme, ThemeSource::Stored),
            None if prefers_dark => (Theme::Dark, ThemeSource::System),
            None => (Theme::Light, ThemeSource::Fallback),
        };
        Self {
            key: key.to_owned(),
            current,
            source,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn source(&self) -> ThemeSource {
        self.source
    }

    /// Push the current theme to the page.
    pub fn apply(&self, dom: &mut impl DomPort) {
        dom.apply_theme(self.current);
    }

    /// Apply and persist `theme`.
    pub fn set(&mut self, theme: Theme, ports: &mut (impl DomPort + StoragePort)) {
        self.current = theme;
        self.source = ThemeSource::User;
        ports.apply_theme(theme);
        if let Err(e) = ports.set(&self.key, theme.as_str()) {
            warn!("Theme: could not persist {theme}: {e}");
        }
        info!("Theme: {theme}");
    }

    /// Flip the theme. Returns the new one.
    pub fn toggle(&mut self, ports: &mut (impl DomPort + StoragePort)) -> Theme {
        let next = self.current.toggled();
        self.set(next, ports);
        next
    }
}
