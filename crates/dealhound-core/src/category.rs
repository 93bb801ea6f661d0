//! Product category types.
//!
//! Categories drive the guided conversation fan-out: each supported category
//! has its own slot sequence, relevance rules, and query minimum. Unsupported
//! categories stay on the menu but loop back with a friendly message.

use serde::{Deserialize, Serialize};

/// The category menu shown at the start of the guided flow, row by row.
pub const CATEGORY_MENU: &[&[&str]] =
    &[&["Phones", "Gaming", "Laptops"], &["TVs", "Cameras", "Headphones"]];

/// A product category selectable from the tracking menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Phones,
    Gaming,
    Laptops,
    Tvs,
    Cameras,
    Headphones,
}

impl Category {
    /// Parses a category from its exact menu label.
    ///
    /// Returns `None` for anything that is not one of the fixed menu choices;
    /// the caller re-prompts without advancing the stage.
    pub fn from_menu_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Phones" => Some(Self::Phones),
            "Gaming" => Some(Self::Gaming),
            "Laptops" => Some(Self::Laptops),
            "TVs" => Some(Self::Tvs),
            "Cameras" => Some(Self::Cameras),
            "Headphones" => Some(Self::Headphones),
            _ => None,
        }
    }

    /// The user-facing menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phones => "Phones",
            Self::Gaming => "Gaming",
            Self::Laptops => "Laptops",
            Self::Tvs => "TVs",
            Self::Cameras => "Cameras",
            Self::Headphones => "Headphones",
        }
    }

    /// Whether the category has a tracking sub-flow.
    ///
    /// TVs and cameras are on the menu but not yet trackable; selecting them
    /// loops back to the category question.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Tvs | Self::Cameras)
    }

    /// Minimum number of non-skipped slots required before a catalog search
    /// is allowed to run for this category.
    pub fn min_query_slots(&self) -> usize {
        match self {
            Self::Phones | Self::Laptops => 2,
            Self::Gaming | Self::Headphones => 1,
            // Never queried; kept total so callers need no unwrap.
            Self::Tvs | Self::Cameras => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_menu_label() {
        for label in CATEGORY_MENU.iter().flat_map(|row| row.iter()) {
            let category = Category::from_menu_label(label).unwrap();
            assert_eq!(category.label(), *label);
        }
    }

    #[test]
    fn rejects_unknown_labels() {
        assert_eq!(Category::from_menu_label("xyz"), None);
        assert_eq!(Category::from_menu_label("phones"), None);
        assert_eq!(Category::from_menu_label(""), None);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(Category::from_menu_label("  Gaming "), Some(Category::Gaming));
    }

    #[test]
    fn tv_and_camera_are_menu_only() {
        assert!(!Category::Tvs.is_supported());
        assert!(!Category::Cameras.is_supported());
        assert!(Category::Phones.is_supported());
        assert!(Category::Headphones.is_supported());
    }

    #[test]
    fn query_minimums_per_category() {
        assert_eq!(Category::Phones.min_query_slots(), 2);
        assert_eq!(Category::Laptops.min_query_slots(), 2);
        assert_eq!(Category::Gaming.min_query_slots(), 1);
        assert_eq!(Category::Headphones.min_query_slots(), 1);
    }
}
