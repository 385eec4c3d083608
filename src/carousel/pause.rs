//! Pause reasons for the carousel.
//!
//! Several independent triggers can hold the carousel paused at the same
//! time: the pointer is over it, keyboard focus is inside it, the tab is in
//! the background. The reasons are tracked as a bitmask so the carousel only
//! resumes when *every* reason has cleared.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One source of a carousel pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PauseReason {
    /// Pointer is over the carousel region.
    Hover = 0b0000_0001,
    /// Keyboard focus is inside the carousel region.
    Focus = 0b0000_0010,
    /// The page is hidden (background tab).
    Hidden = 0b0000_0100,
}

impl PauseReason {
    pub const ALL: [Self; 3] = [Self::Hover, Self::Focus, Self::Hidden];

    /// Return the bitmask for this reason.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hover => write!(f, "hover"),
            Self::Focus => write!(f, "focus"),
            Self::Hidden => write!(f, "page hidden"),
        }
    }
}

/// Set of currently active pause reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PauseSet(u8);

impl PauseSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add a reason. Returns `true` if it was not already present.
    pub fn insert(&mut self, reason: PauseReason) -> bool {
        let was = self.contains(reason);
        self.0 |= reason.mask();
        !was
    }

    /// Remove a reason. Returns `true` if it was present.
    pub fn remove(&mut self, reason: PauseReason) -> bool {
        let was = self.contains(reason);
        self.0 &= !reason.mask();
        was
    }

    pub fn contains(self, reason: PauseReason) -> bool {
        self.0 & reason.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Iterate the active reasons in declaration order.
    pub fn iter(self) -> impl Iterator<Item = PauseReason> {
        PauseReason::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

/// How overlapping pause triggers combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PausePolicy {
    /// Resume only when no pause reason is left.
    #[default]
    Tracked,
    /// Every resume trigger restarts auto-advance, even if another pause
    /// reason still holds.
    LastEventWins,
}
