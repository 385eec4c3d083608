//! Viewport intersection watchers.
//!
//! One primitive serves four features. The browser adapter owns the actual
//! `IntersectionObserver`s (one per group, configured from
//! [`WatchGroup::options`]) and forwards every crossing as a
//! [`PageEvent::Intersected`](crate::events::PageEvent::Intersected). The
//! [`VisibilityWatcher`] decides whether a crossing fires its feature and
//! whether the element must be detached afterwards.
//!
//! | group       | mode       | threshold | root margin           |
//! |-------------|------------|-----------|-----------------------|
//! | sections    | continuous | 0         | `-20% 0px -60% 0px`   |
//! | reveal      | continuous | 0.1       | `0px 0px -50px 0px`   |
//! | skill bars  | once       | 0.5       | `0px 0px -50px 0px`   |
//! | lazy images | once       | 0         | `0px`                 |

use std::collections::HashSet;

/// One watched element, addressed by group and position in that group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchTarget {
    Section(usize),
    Reveal(usize),
    SkillBar(usize),
    LazyImage(usize),
}

impl WatchTarget {
    pub fn group(self) -> WatchGroup {
        match self {
            Self::Section(_) => WatchGroup::Sections,
            Self::Reveal(_) => WatchGroup::Reveal,
            Self::SkillBar(_) => WatchGroup::SkillBars,
            Self::LazyImage(_) => WatchGroup::LazyImages,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Section(i) | Self::Reveal(i) | Self::SkillBar(i) | Self::LazyImage(i) => i,
        }
    }
}

/// A family of elements sharing one observer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchGroup {
    Sections,
    Reveal,
    SkillBars,
    LazyImages,
}

/// Whether a watcher keeps firing after the first crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    /// Fire on the first crossing, then detach.
    Once,
    /// Fire on every crossing into view.
    Continuous,
}

/// `IntersectionObserver` options for one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl WatchGroup {
    pub const ALL: [Self; 4] = [Self::Sections, Self::Reveal, Self::SkillBars, Self::LazyImages];

    pub fn mode(self) -> WatchMode {
        match self {
            Self::Sections | Self::Reveal => WatchMode::Continuous,
            Self::SkillBars | Self::LazyImages => WatchMode::Once,
        }
    }

    pub fn options(self) -> WatchOptions {
        match self {
            Self::Sections => WatchOptions {
                threshold: 0.0,
                root_margin: "-20% 0px -60% 0px",
            },
            Self::Reveal => WatchOptions {
                threshold: 0.1,
                root_margin: "0px 0px -50px 0px",
            },
            Self::SkillBars => WatchOptions {
                threshold: 0.5,
                root_margin: "0px 0px -50px 0px",
            },
            Self::LazyImages => WatchOptions {
                threshold: 0.0,
                root_margin: "0px",
            },
        }
    }

    /// Wrap a position in this group as a target.
    pub fn target(self, index: usize) -> WatchTarget {
        match self {
            Self::Sections => WatchTarget::Section(index),
            Self::Reveal => WatchTarget::Reveal(index),
            Self::SkillBars => WatchTarget::SkillBar(index),
            Self::LazyImages => WatchTarget::LazyImage(index),
        }
    }
}

/// Outcome of one reported crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Not visible, or already detached: nothing to do.
    Ignored,
    /// Run the feature.
    Fire,
    /// Run the feature, then stop watching the element.
    FireAndDetach,
}

/// Domain-side bookkeeping of which elements are still watched.
#[derive(Debug, Default)]
pub struct VisibilityWatcher {
    detached: HashSet<WatchTarget>,
}

impl VisibilityWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_watching(&self, target: WatchTarget) -> bool {
        !self.detached.contains(&target)
    }

    /// Classify a crossing reported by the observer.
    pub fn observe(&mut self, target: WatchTarget, visible: bool) -> Crossing {
        if !visible || self.detached.contains(&target) {
            return Crossing::Ignored;
        }
        match target.group().mode() {
            WatchMode::Continuous => Crossing::Fire,
            WatchMode::Once => {
                self.detached.insert(target);
                Crossing::FireAndDetach
            }
        }
    }

    /// Stop tracking everything (page teardown).
    pub fn clear(&mut self) {
        self.detached.clear();
    }
}
