//! Unified error type for the page behaviour layer.
//!
//! Each port defines its own narrow error enum. Storage and submission
//! failures are recovered where they happen (logged, surfaced as events);
//! only configuration loading can fail the boot path, through `Error`.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Failures that reach the boot path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
