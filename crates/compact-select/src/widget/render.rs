//! Render rows handed to the drawing layer.
//!
//! A region flattens its visible options into a sequence of [`RenderRow`]s.
//! Drawing, icons, checkboxes and highlight styling are up to the host; the
//! rows carry everything needed to do it, including the search match span.

use crate::model::{Key, MatchSpan};

/// One visible option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    /// The option's key.
    pub key: Key,
    /// Text to display.
    pub label: String,
    /// Secondary descriptive text.
    pub details: Option<String>,
    /// The option can't be selected or focused.
    pub disabled: bool,
    /// The option is selected.
    pub selected: bool,
    /// Keyboard focus is on this row or one of its children.
    pub focused: bool,
    /// The focused interactive child, in grid mode.
    pub focused_child: Option<usize>,
    /// Number of individually focusable controls in the row.
    pub interactive_children: usize,
    /// Where the search matched in the label, in characters.
    pub match_span: Option<MatchSpan>,
    /// The section holding this option, if any.
    pub section: Option<Key>,
}

/// A section header. Its options follow it as [`RenderRow::Option`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRow {
    /// The section's key.
    pub section_key: Key,
    /// Header text, if any.
    pub label: Option<String>,
    /// Keys of the section's visible options.
    pub child_keys: Vec<Key>,
    /// Whether to draw the "Select All" / "Unselect All" button.
    pub show_toggle_all_button: bool,
    /// Every enabled visible option in the section is selected. Drives the
    /// toggle button's "Select All" / "Unselect All" text.
    pub all_selected: bool,
}

/// A row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRow {
    /// An option row.
    Option(OptionRow),
    /// A section header row.
    Section(SectionRow),
}

impl RenderRow {
    /// The option or section key of this row.
    pub fn key(&self) -> &Key {
        match self {
            Self::Option(row) => &row.key,
            Self::Section(row) => &row.section_key,
        }
    }

    /// The option row, if this is one.
    pub fn as_option(&self) -> Option<&OptionRow> {
        match self {
            Self::Option(row) => Some(row),
            Self::Section(_) => None,
        }
    }

    /// The section row, if this is one.
    pub fn as_section(&self) -> Option<&SectionRow> {
        match self {
            Self::Section(row) => Some(row),
            Self::Option(_) => None,
        }
    }
}
