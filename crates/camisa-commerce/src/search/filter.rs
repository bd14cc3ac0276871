//! Filter and sort state shared by the catalog views.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort options for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Name A-Z, accent-insensitive.
    NameAsc,
    /// New arrivals first.
    Newness,
    /// Offers first.
    Offers,
    /// Store order.
    #[default]
    None,
}

impl SortMode {
    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::NameAsc => "name-asc",
            SortMode::Newness => "newness",
            SortMode::Offers => "offers",
            SortMode::None => "none",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::NameAsc => "Nombre: A-Z",
            SortMode::Newness => "Novedades",
            SortMode::Offers => "Ofertas",
            SortMode::None => "Destacados",
        }
    }

    /// Parse a wire name. Anything unrecognized means no sorting.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "name-asc" => SortMode::NameAsc,
            "newness" => SortMode::Newness,
            "offers" => SortMode::Offers,
            _ => SortMode::None,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// User-selected filters, shared by all three category views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_sizes: BTreeSet<String>,
    pub active_subcategory: Option<String>,
    pub search_term: String,
    pub sort: SortMode,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the size if absent, remove it if present.
    pub fn toggle_size(&mut self, size: &str) {
        if !self.selected_sizes.remove(size) {
            self.selected_sizes.insert(size.to_string());
        }
    }

    /// Activate a subcategory; selecting the active one again clears it.
    pub fn select_subcategory(&mut self, name: &str) {
        if self.active_subcategory.as_deref() == Some(name) {
            self.active_subcategory = None;
        } else {
            self.active_subcategory = Some(name.to_string());
        }
    }

    pub fn clear_subcategory(&mut self) {
        self.active_subcategory = None;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    /// Reset every filter and the sort.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn with_size(mut self, size: &str) -> Self {
        self.toggle_size(size);
        self
    }

    pub fn with_subcategory(mut self, name: &str) -> Self {
        self.active_subcategory = Some(name.to_string());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Normalized search term, `None` when blank.
    pub fn normalized_search(&self) -> Option<String> {
        let term = self.search_term.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    /// Whether any filter (not the sort) is active.
    pub fn has_filters(&self) -> bool {
        !self.selected_sizes.is_empty()
            || self.active_subcategory.as_deref().is_some_and(|s| !s.is_empty())
            || self.normalized_search().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!(SortMode::parse("name-asc"), SortMode::NameAsc);
        assert_eq!(SortMode::parse("Newness"), SortMode::Newness);
        assert_eq!(SortMode::parse("offers"), SortMode::Offers);
        assert_eq!(SortMode::parse("price-desc"), SortMode::None);
        assert_eq!("".parse::<SortMode>().unwrap(), SortMode::None);
    }

    #[test]
    fn test_toggle_size() {
        let mut filters = FilterState::new();
        filters.toggle_size("M");
        filters.toggle_size("L");
        filters.toggle_size("M");
        assert_eq!(filters.selected_sizes.len(), 1);
        assert!(filters.selected_sizes.contains("L"));
    }

    #[test]
    fn test_subcategory_toggle_round_trip() {
        let mut filters = FilterState::new();
        filters.select_subcategory("Anime y Manga");
        assert_eq!(filters.active_subcategory.as_deref(), Some("Anime y Manga"));

        filters.select_subcategory("Minimalistas");
        assert_eq!(filters.active_subcategory.as_deref(), Some("Minimalistas"));

        filters.select_subcategory("Minimalistas");
        assert_eq!(filters.active_subcategory, None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut filters = FilterState::new()
            .with_size("S")
            .with_subcategory("Escudos")
            .with_search("logo")
            .with_sort(SortMode::Offers);
        assert!(filters.has_filters());

        filters.clear();
        assert_eq!(filters, FilterState::default());
        assert!(!filters.has_filters());
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filters = FilterState::new().with_search("   ");
        assert_eq!(filters.normalized_search(), None);
        assert_eq!(
            FilterState::new().with_search("  Rock ").normalized_search().as_deref(),
            Some("rock")
        );
    }
}
