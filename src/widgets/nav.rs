//! Navigation: mobile menu and active-section highlighting.

use crate::app::ports::DomPort;

/// Mobile navigation menu open/closed state.
#[derive(Debug, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu. Returns the new state.
    pub fn toggle(&mut self, dom: &mut impl DomPort) -> bool {
        self.open = !self.open;
        dom.set_nav_open(self.open);
        self.open
    }

    /// Close the menu if it is open. Returns `true` if it was open.
    pub fn close(&mut self, dom: &mut impl DomPort) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        dom.set_nav_open(false);
        true
    }
}

/// Marks the nav link for the section currently in view.
#[derive(Debug)]
pub struct SectionHighlighter {
    link_hrefs: Vec<String>,
    section_ids: Vec<String>,
    active: Option<usize>,
}

impl SectionHighlighter {
    pub fn new(link_hrefs: Vec<String>, section_ids: Vec<String>) -> Self {
        Self {
            link_hrefs,
            section_ids,
            active: None,
        }
    }

    /// Section `index` entered view. Clears every link, then activates the
    /// first one whose `href` is `#<section id>` if there is one.
    /// Returns the section id.
    pub fn on_section_visible(&mut self, index: usize, dom: &mut impl DomPort) -> Option<&str> {
        let id = self.section_ids.get(index)?;
        let wanted = format!("#{id}");
        self.active = None;
        for (i, href) in self.link_hrefs.iter().enumerate() {
            let hit = self.active.is_none() && *href == wanted;
            dom.set_nav_link_active(i, hit);
            if hit {
                self.active = Some(i);
            }
        }
        Some(id.as_str())
    }

    /// Index of the link currently marked active.
    pub fn active_link(&self) -> Option<usize> {
        self.active
    }
}
