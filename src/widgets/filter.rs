//! Portfolio category filter.

use crate::app::ports::DomPort;

/// Filter value that matches every item.
pub const SHOW_ALL: &str = "all";

#[derive(Debug)]
pub struct PortfolioFilter {
    /// `data-filter` of each button.
    filters: Vec<String>,
    /// `data-category` of each item.
    categories: Vec<String>,
    selected: Option<usize>,
}

impl PortfolioFilter {
    pub fn new(filters: Vec<String>, categories: Vec<String>) -> Self {
        Self {
            filters,
            categories,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether an item with `category` passes `filter`.
    pub fn matches(filter: &str, category: &str) -> bool {
        filter == SHOW_ALL || filter == category
    }

    /// Button `index` clicked. Returns the filter value and how many items
    /// remain visible, or `None` for an unknown button.
    pub fn select(&mut self, index: usize, dom: &mut impl DomPort) -> Option<(&str, usize)> {
        let filter = self.filters.get(index)?;
        for i in 0..self.filters.len() {
            dom.set_filter_selected(i, i == index);
        }
        let mut shown = 0;
        for (i, category) in self.categories.iter().enumerate() {
            let visible = Self::matches(filter, category);
            dom.set_portfolio_item_visible(i, visible);
            shown += usize::from(visible);
        }
        self.selected = Some(index);
        Some((filter.as_str(), shown))
    }

    /// Apply a filter by value rather than by button.
    pub fn select_value(&mut self, value: &str, dom: &mut impl DomPort) -> Option<(&str, usize)> {
        let index = self.filters.iter().position(|f| f == value)?;
        self.select(index, dom)
    }
}
