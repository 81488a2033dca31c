//! Region and shell configuration.
//!
//! Both structs deserialize from partial documents, so hosts can keep their
//! select defaults in JSON or TOML and override single fields:
//!
//! ```
//! use compact_select::config::RegionConfig;
//!
//! let config: RegionConfig = serde_json::from_str(r#"{ "multiple": true }"#).unwrap();
//! assert!(config.multiple);
//! assert!(!config.closes_on_select());
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::MenuPlacement;
use crate::model::SelectionMode;

/// Configuration of one region.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Multiple selection instead of single.
    pub multiple: bool,
    /// Close the overlay after a selection. Defaults to `true` in single
    /// mode and `false` in multiple mode.
    pub close_on_select: Option<bool>,
    /// Refuse deselects that would leave nothing selected.
    pub disallow_empty_selection: bool,
    /// Maximum number of visible options.
    pub size_limit: Option<usize>,
    /// Grid navigation, with focusable controls inside rows.
    pub grid: bool,
    /// Wrap focus from last to first option. Only honored when the region
    /// has no siblings.
    pub should_focus_wrap: bool,
}

impl RegionConfig {
    /// Single-selection defaults.
    pub fn single() -> Self {
        Self::default()
    }

    /// Multiple-selection defaults.
    pub fn multiple() -> Self {
        Self {
            multiple: true,
            ..Self::default()
        }
    }

    /// Set whether the overlay closes after a selection.
    pub fn with_close_on_select(mut self, close: bool) -> Self {
        self.close_on_select = Some(close);
        self
    }

    /// Set whether deselecting the last key is refused.
    pub fn with_disallow_empty_selection(mut self, disallow: bool) -> Self {
        self.disallow_empty_selection = disallow;
        self
    }

    /// Set the maximum number of visible options.
    pub fn with_size_limit(mut self, limit: usize) -> Self {
        self.size_limit = Some(limit);
        self
    }

    /// Use grid navigation.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Set whether focus wraps inside a lone region.
    pub fn with_focus_wrap(mut self, wrap: bool) -> Self {
        self.should_focus_wrap = wrap;
        self
    }

    /// The selection mode this config describes.
    pub fn selection_mode(&self) -> SelectionMode {
        if self.multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }

    /// Whether a selection closes the overlay, after applying the
    /// mode-dependent default.
    pub fn closes_on_select(&self) -> bool {
        self.close_on_select.unwrap_or(!self.multiple)
    }
}

/// Configuration of the trigger and overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Show a search box above the regions.
    pub searchable: bool,
    /// Placeholder of the search box.
    pub search_placeholder: String,
    /// Trigger text when nothing is selected.
    pub trigger_placeholder: String,
    /// Text shown when every option is hidden.
    pub empty_message: String,
    /// Offer a clear button on the trigger.
    pub clearable: bool,
    /// Menu placement relative to the trigger.
    pub placement: MenuPlacement,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            searchable: false,
            search_placeholder: "Search".to_string(),
            trigger_placeholder: "None".to_string(),
            empty_message: "No options found".to_string(),
            clearable: false,
            placement: MenuPlacement::default(),
        }
    }
}

impl ShellConfig {
    /// Show a search box.
    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Set the search box placeholder.
    pub fn with_search_placeholder(mut self, text: impl Into<String>) -> Self {
        self.search_placeholder = text.into();
        self
    }

    /// Set the trigger placeholder.
    pub fn with_trigger_placeholder(mut self, text: impl Into<String>) -> Self {
        self.trigger_placeholder = text.into();
        self
    }

    /// Set the empty-state message.
    pub fn with_empty_message(mut self, text: impl Into<String>) -> Self {
        self.empty_message = text.into();
        self
    }

    /// Offer a clear button.
    pub fn with_clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    /// Set the menu placement.
    pub fn with_placement(mut self, placement: MenuPlacement) -> Self {
        self.placement = placement;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_on_select_defaults() {
        assert!(RegionConfig::single().closes_on_select());
        assert!(!RegionConfig::multiple().closes_on_select());
        assert!(
            RegionConfig::multiple()
                .with_close_on_select(true)
                .closes_on_select()
        );
    }

    #[test]
    fn test_shell_config_partial_json() {
        let config: ShellConfig =
            serde_json::from_str(r#"{ "searchable": true, "placement": "top_end" }"#).unwrap();
        assert!(config.searchable);
        assert_eq!(config.placement, MenuPlacement::TopEnd);
        assert_eq!(config.trigger_placeholder, "None");
        assert_eq!(config.empty_message, "No options found");
    }

    #[test]
    fn test_region_config_round_trip() {
        let config = RegionConfig::multiple().with_size_limit(50).with_grid(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: RegionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.selection_mode(), SelectionMode::Multiple);
    }
}
