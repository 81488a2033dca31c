//! The trigger and overlay shell.
//!
//! [`CompactSelect`] is what a host embeds: a trigger button showing the
//! aggregated label, an overlay menu holding the regions, and optionally a
//! search box. The shell coordinates and positions; every selection rule
//! lives in the regions and the composite controller.
//!
//! # Example
//!
//! ```
//! use compact_select::prelude::*;
//!
//! let mut select = CompactSelect::new(ShellConfig::default().with_searchable(true))
//!     .with_region(Region::new(RegionConfig::single()).with_items(vec![
//!         SelectOption::new("apple", "Apple").into(),
//!         SelectOption::new("banana", "Banana").into(),
//!     ]));
//!
//! select.activate_trigger();
//! select.after_render();
//! select.set_search("ban");
//! select.handle_key(&KeyPressEvent::key(KeyCode::Enter));
//!
//! assert!(!select.is_open());
//! assert_eq!(select.trigger_label().text, "Banana");
//! ```

use compact_select_core::Signal;
use compact_select_core::logging::targets;

use super::composite::{CompositeController, TriggerLabel};
use super::events::{FocusRequest, KeyCode, KeyOutcome, KeyPressEvent};
use super::region::Region;
use crate::config::ShellConfig;
use crate::geometry::{Point, Rect, Size};
use crate::model::SelectValue;

/// A compact select: trigger, overlay menu and search box.
///
/// # Signals
///
/// - `on_clear`: Emitted when the clear button clears the selection
pub struct CompactSelect<V: SelectValue> {
    config: ShellConfig,
    composite: CompositeController<V>,
    pending_focus: bool,

    /// Emitted by [`clear_selection`](Self::clear_selection).
    pub on_clear: Signal<()>,
}

impl<V: SelectValue> CompactSelect<V> {
    /// Create a shell with no regions.
    pub fn new(config: ShellConfig) -> Self {
        let composite = CompositeController::new(config.trigger_placeholder.clone());
        Self {
            config,
            composite,
            pending_focus: false,
            on_clear: Signal::new(),
        }
    }

    /// Add a region using builder pattern.
    pub fn with_region(mut self, region: Region<V>) -> Self {
        self.composite.add_region(region);
        self
    }

    /// The shell configuration.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The composite controller.
    pub fn composite(&self) -> &CompositeController<V> {
        &self.composite
    }

    /// The composite controller, mutably.
    pub fn composite_mut(&mut self) -> &mut CompositeController<V> {
        &mut self.composite
    }

    /// The trigger label.
    pub fn trigger_label(&self) -> &TriggerLabel {
        self.composite.trigger_label()
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.composite.is_open()
    }

    // =========================================================================
    // Open / Close
    // =========================================================================

    /// Trigger clicked or activated: toggles the overlay. Opening defers
    /// focus placement to [`after_render`](Self::after_render).
    pub fn activate_trigger(&mut self) {
        if self.composite.is_open() {
            self.close();
        } else if self.composite.open() {
            tracing::debug!(target: targets::OVERLAY, "overlay opened");
            self.pending_focus = true;
        }
    }

    /// Escape pressed. Returns whether it closed the overlay.
    pub fn press_escape(&mut self) -> bool {
        self.close()
    }

    /// Pointer pressed outside the overlay and trigger.
    pub fn click_outside(&mut self) -> bool {
        self.close()
    }

    /// Close the overlay. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        self.pending_focus = false;
        let closed = self.composite.close();
        if closed {
            tracing::debug!(target: targets::OVERLAY, "overlay closed");
        }
        closed
    }

    /// The overlay's rows exist now: place the deferred open focus.
    ///
    /// Focus goes to the first selected option, else the first focusable
    /// option. A searchable shell with nothing focusable focuses its search
    /// box instead.
    pub fn after_render(&mut self) -> Option<FocusRequest> {
        if !std::mem::take(&mut self.pending_focus) || !self.composite.is_open() {
            return None;
        }
        if let Some(target) = self.composite.focus_initial() {
            return Some(FocusRequest::Option(target));
        }
        if self.config.searchable {
            self.composite.focus_requested.emit(FocusRequest::SearchBox);
            return Some(FocusRequest::SearchBox);
        }
        None
    }

    /// Whether open focus is still waiting for a render.
    pub fn has_pending_focus(&self) -> bool {
        self.pending_focus
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// The search string.
    pub fn search(&self) -> String {
        self.composite.search()
    }

    /// Search box text changed.
    pub fn set_search(&mut self, text: &str) {
        self.composite.set_search(text);
    }

    /// Search box gained focus.
    pub fn search_focused(&mut self) {
        self.composite.search_focused();
    }

    /// Search box lost focus.
    pub fn search_blurred(&mut self) {
        self.composite.search_blurred();
    }

    /// Whether the menu width should stay fixed, so filtering doesn't make
    /// it jump.
    pub fn is_width_locked(&self) -> bool {
        self.composite.state().is_searching()
    }

    /// The empty-state message, while the overlay is open and every option
    /// is hidden.
    pub fn empty_message(&self) -> Option<&str> {
        (self.composite.is_open() && !self.composite.has_visible_options())
            .then_some(self.config.empty_message.as_str())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Clear every region and emit `on_clear`. Regions that disallow empty
    /// selection keep theirs.
    pub fn clear_selection(&mut self) {
        let changed = self.composite.clear_all();
        tracing::debug!(target: targets::OVERLAY, changed, "selection cleared");
        self.on_clear.emit(());
    }

    /// Whether the trigger should show its clear button.
    pub fn shows_clear_button(&self) -> bool {
        self.config.clearable && !self.trigger_label().is_placeholder
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key press on the trigger or inside the overlay.
    pub fn handle_key(&mut self, event: &KeyPressEvent) -> KeyOutcome {
        if !self.composite.is_open() {
            return match event.key {
                KeyCode::ArrowDown | KeyCode::ArrowUp | KeyCode::Enter | KeyCode::Space => {
                    self.activate_trigger();
                    KeyOutcome::Handled
                }
                _ => KeyOutcome::Ignored,
            };
        }

        match event.key {
            KeyCode::Escape => {
                self.close();
                KeyOutcome::Handled
            }
            KeyCode::Tab => {
                self.close();
                KeyOutcome::Ignored
            }
            _ => self.composite.handle_key(event),
        }
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Where to put the menu's top-left corner.
    pub fn menu_position(&self, trigger: Rect, menu: Size, viewport: Rect) -> Point {
        self.config
            .placement
            .calculate_position(trigger, menu, Some(viewport))
    }
}

static_assertions::assert_impl_all!(CompactSelect<String>: Send, Sync);
