//! Input and focus event types.
//!
//! The controller does not talk to a windowing system. The host translates
//! its own keyboard events into [`KeyPressEvent`]s and applies the
//! [`FocusRequest`]s the controller emits back to its widgets.

use crate::model::Key;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// The keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Focus the previous option.
    ArrowUp,
    /// Focus the next option; opens a closed trigger.
    ArrowDown,
    /// Focus the previous interactive child of a grid row.
    ArrowLeft,
    /// Focus the next interactive child of a grid row.
    ArrowRight,
    /// Focus the first option.
    Home,
    /// Focus the last option.
    End,
    /// Move focus up by a page of options.
    PageUp,
    /// Move focus down by a page of options.
    PageDown,
    /// Activate the focused option.
    Enter,
    /// Activate the focused option.
    Space,
    /// Close the overlay.
    Escape,
    /// Close the overlay and let focus move on.
    Tab,
    /// Delete in the search box. Not handled by the lists.
    Backspace,
    /// Any other key; printable input arrives in [`KeyPressEvent::text`].
    Other,
}

/// Key press event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: KeyCode,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press, empty for non-printable keys.
    pub text: String,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: KeyCode, modifiers: KeyboardModifiers, text: impl Into<String>) -> Self {
        Self {
            key,
            modifiers,
            text: text.into(),
        }
    }

    /// A key press with no modifiers and no text.
    pub fn key(key: KeyCode) -> Self {
        Self::new(key, KeyboardModifiers::NONE, "")
    }

    /// A printable character press.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(KeyCode::Other, KeyboardModifiers::NONE, text)
    }
}

/// Direction of linear focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    /// Down the list.
    Next,
    /// Up the list.
    Previous,
}

/// A focusable element inside the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusTarget {
    /// Index of the region holding the option.
    pub region: usize,
    /// The option's key.
    pub key: Key,
    /// Interactive child within the row (grid mode), `None` for the row.
    pub child: Option<usize>,
}

impl FocusTarget {
    /// Focus on an option row.
    pub fn row(region: usize, key: Key) -> Self {
        Self {
            region,
            key,
            child: None,
        }
    }
}

/// A request for the host to move keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusRequest {
    /// Focus the trigger button.
    Trigger,
    /// Focus the search box.
    SearchBox,
    /// Focus an option row or one of its children.
    Option(FocusTarget),
}

/// What a region did with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The region consumed the key.
    Handled,
    /// The region has no use for the key.
    Ignored,
    /// Focus sits on the region's edge; the next region should take it.
    Boundary(FocusDirection),
    /// Enter or Space on the focused option.
    Activate(Key),
}

impl KeyOutcome {
    /// Whether the key was consumed.
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
