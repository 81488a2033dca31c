//! Composite controller: several regions behaving as one list.
//!
//! [`CompositeController`] owns the regions of one overlay, the shared
//! search string and the open/close state. It hands keyboard focus from
//! one region to the next when a region reports a boundary, and aggregates
//! every region's selection into the trigger label.
//!
//! # Notification order
//!
//! One selection gesture notifies in a fixed order:
//!
//! 1. the region's selection manager mutates (`selection_changed`)
//! 2. the composite's per-region cache is updated
//! 3. the trigger label is recomputed (`label_changed`)
//! 4. the region's `on_change` fires
//! 5. the overlay closes, if the region closes on select
//!
//! # State machine
//!
//! ```text
//! Closed --open()--> Open { searching: false }
//! Open { searching: false } --search_focused()--> Open { searching: true }
//! Open { searching: true } --search_blurred() with empty search--> Open { searching: false }
//! Open { .. } --close()--> Closed
//! ```

use std::fmt;

use compact_select_core::logging::targets;
use compact_select_core::{Property, Signal};

use super::events::{FocusDirection, FocusRequest, FocusTarget, KeyCode, KeyOutcome, KeyPressEvent};
use super::region::{Region, RegionSelection};
use crate::error::{Result, SelectError};
use crate::model::{Key, OptionPredicate, SelectItem, SelectOption, SelectValue, SelectionOutcome};

/// Open/close state of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    /// `searching` locks the menu width while the user types.
    Open { searching: bool },
}

impl OverlayState {
    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Whether the overlay is open with the search box in use.
    pub fn is_searching(&self) -> bool {
        matches!(self, Self::Open { searching: true })
    }
}

/// The text shown on the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerLabel {
    /// First selected option's label, or the placeholder.
    pub text: String,
    /// Number of further selected options, when more than one is selected.
    pub badge: Option<usize>,
    /// Whether `text` is the placeholder.
    pub is_placeholder: bool,
}

impl TriggerLabel {
    /// The label for an empty selection.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
            is_placeholder: true,
        }
    }

    /// Aggregate selected options into a label.
    pub fn from_selection<'a, V: 'a>(
        placeholder: &str,
        selected: impl IntoIterator<Item = &'a SelectOption<V>>,
    ) -> Self {
        let mut selected = selected.into_iter();
        let Some(first) = selected.next() else {
            return Self::placeholder(placeholder);
        };
        let rest = selected.count();
        Self {
            text: first.label.clone(),
            badge: (rest > 0).then_some(rest),
            is_placeholder: false,
        }
    }
}

impl fmt::Display for TriggerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.badge {
            Some(badge) => write!(f, "{} +{}", self.text, badge),
            None => f.write_str(&self.text),
        }
    }
}

/// Owns the regions of one overlay and coordinates them.
///
/// Regions are addressed by index, in the order they were added.
///
/// # Signals
///
/// - `label_changed`: Emitted when the trigger label changes
/// - `state_changed`: Emitted when the overlay opens, closes or starts searching
/// - `focus_requested`: Emitted when keyboard focus should move
/// - `search_changed`: Emitted when the search string changes
pub struct CompositeController<V: SelectValue> {
    regions: Vec<Region<V>>,
    selected_by_region: Vec<RegionSelection<V>>,
    state: OverlayState,
    search: Property<String>,
    placeholder: String,
    label: TriggerLabel,

    /// Emitted when the trigger label changes.
    pub label_changed: Signal<TriggerLabel>,
    /// Emitted when the overlay state changes.
    pub state_changed: Signal<OverlayState>,
    /// Emitted when keyboard focus should move.
    pub focus_requested: Signal<FocusRequest>,
    /// Emitted when the search string changes.
    pub search_changed: Signal<String>,
}

impl<V: SelectValue> CompositeController<V> {
    /// Create a controller with no regions.
    pub fn new(placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self {
            regions: Vec::new(),
            selected_by_region: Vec::new(),
            state: OverlayState::Closed,
            search: Property::default(),
            label: TriggerLabel::placeholder(placeholder.clone()),
            placeholder,
            label_changed: Signal::new(),
            state_changed: Signal::new(),
            focus_requested: Signal::new(),
            search_changed: Signal::new(),
        }
    }

    /// Add a region using builder pattern.
    pub fn with_region(mut self, region: Region<V>) -> Self {
        self.add_region(region);
        self
    }

    // =========================================================================
    // Regions
    // =========================================================================

    /// Add a region and return its index.
    pub fn add_region(&mut self, mut region: Region<V>) -> usize {
        region.set_search(&self.search.get());
        self.selected_by_region.push(region.selected_options());
        self.regions.push(region);
        self.update_siblings();
        self.recompute_label();
        self.regions.len() - 1
    }

    /// Remove and return a region. Later regions shift down by one.
    pub fn remove_region(&mut self, index: usize) -> Result<Region<V>> {
        self.check_index(index)?;
        let region = self.regions.remove(index);
        self.selected_by_region.remove(index);
        self.update_siblings();
        self.recompute_label();
        Ok(region)
    }

    /// Number of regions.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// The region at `index`.
    pub fn region(&self, index: usize) -> Result<&Region<V>> {
        self.regions
            .get(index)
            .ok_or_else(|| SelectError::region_out_of_bounds(index, self.regions.len()))
    }

    /// All regions, in order.
    pub fn regions(&self) -> &[Region<V>] {
        &self.regions
    }

    /// Replace a region's options.
    pub fn set_items(&mut self, index: usize, items: &[SelectItem<V>]) -> Result<()> {
        self.check_index(index)?;
        self.regions[index].set_items(items);
        self.sync_region(index);
        Ok(())
    }

    /// Replace a region's disabled predicate.
    pub fn set_option_disabled(
        &mut self,
        index: usize,
        predicate: Option<OptionPredicate<V>>,
    ) -> Result<()> {
        self.check_index(index)?;
        self.regions[index].set_option_disabled(predicate);
        self.sync_region(index);
        Ok(())
    }

    /// Re-derive a region's selection from an externally controlled value.
    ///
    /// Updates the trigger label but does not fire the region's `on_change`.
    pub fn set_value<I>(&mut self, index: usize, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
    {
        self.check_index(index)?;
        self.regions[index].set_value(values);
        self.sync_region(index);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.regions.len() {
            Ok(())
        } else {
            Err(SelectError::region_out_of_bounds(index, self.regions.len()))
        }
    }

    fn update_siblings(&mut self) {
        let has_siblings = self.regions.len() > 1;
        for region in &mut self.regions {
            region.set_has_siblings(has_siblings);
        }
    }

    fn sync_region(&mut self, index: usize) {
        self.selected_by_region[index] = self.regions[index].selected_options();
        self.recompute_label();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The cached selection of every region, by index.
    pub fn selected_by_region(&self) -> &[RegionSelection<V>] {
        &self.selected_by_region
    }

    /// Every selected option across regions, region by region.
    pub fn selected_options(&self) -> impl Iterator<Item = &SelectOption<V>> {
        self.selected_by_region
            .iter()
            .flat_map(|selection| selection.as_slice())
    }

    /// The current trigger label.
    pub fn trigger_label(&self) -> &TriggerLabel {
        &self.label
    }

    /// Select `key` in region `index`, as a user gesture.
    ///
    /// Closes the overlay afterwards if the region closes on select and the
    /// key was not disabled.
    pub fn select(&mut self, index: usize, key: &Key) -> Result<SelectionOutcome> {
        self.check_index(index)?;
        let outcome = self.regions[index].apply_select(key)?;
        tracing::debug!(target: targets::COMPOSITE, region = index, key = %key, ?outcome, "select");
        self.finish_gesture(index, outcome, true);
        Ok(outcome)
    }

    /// Select-all / unselect-all over a section, as ONE change.
    pub fn toggle_section(&mut self, index: usize, section: &Key) -> Result<SelectionOutcome> {
        self.check_index(index)?;
        let outcome = self.regions[index].apply_toggle_section(section)?;
        tracing::debug!(
            target: targets::COMPOSITE,
            region = index,
            section = %section,
            ?outcome,
            "toggle section"
        );
        self.finish_gesture(index, outcome, true);
        Ok(outcome)
    }

    /// Select every enabled option of a region. Multiple mode only.
    pub fn select_all(&mut self, index: usize) -> Result<SelectionOutcome> {
        self.check_index(index)?;
        let outcome = self.regions[index].apply_select_all()?;
        self.finish_gesture(index, outcome, false);
        Ok(outcome)
    }

    /// Deselect everything in a region. Multiple mode only.
    pub fn clear_region(&mut self, index: usize) -> Result<SelectionOutcome> {
        self.check_index(index)?;
        let outcome = self.regions[index].apply_clear()?;
        self.finish_gesture(index, outcome, false);
        Ok(outcome)
    }

    /// Deselect everything in every region, in either mode. Regions that
    /// disallow empty selection keep theirs. Returns whether anything
    /// changed.
    pub fn clear_all(&mut self) -> bool {
        let changed: Vec<usize> = (0..self.regions.len())
            .filter(|&index| self.regions[index].apply_reset().is_changed())
            .collect();
        if changed.is_empty() {
            return false;
        }
        for &index in &changed {
            self.selected_by_region[index] = self.regions[index].selected_options();
        }
        self.recompute_label();
        for &index in &changed {
            self.regions[index].emit_change();
        }
        true
    }

    fn finish_gesture(&mut self, index: usize, outcome: SelectionOutcome, allow_close: bool) {
        if outcome.is_changed() {
            self.selected_by_region[index] = self.regions[index].selected_options();
            self.recompute_label();
            self.regions[index].emit_change();
        }
        if allow_close
            && outcome.is_accepted()
            && self.regions[index].closes_on_select()
            && self.state.is_open()
        {
            self.close();
        }
    }

    fn recompute_label(&mut self) {
        let label = TriggerLabel::from_selection(&self.placeholder, self.selected_options());
        if label != self.label {
            tracing::trace!(target: targets::COMPOSITE, label = %label, "trigger label changed");
            self.label = label.clone();
            self.label_changed.emit(label);
        }
    }

    // =========================================================================
    // Overlay State
    // =========================================================================

    /// The overlay state.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Open the overlay. Initial focus is placed separately, see
    /// [`focus_initial`](Self::focus_initial). Returns `false` if already
    /// open.
    pub fn open(&mut self) -> bool {
        if self.state.is_open() {
            return false;
        }
        self.set_state(OverlayState::Open { searching: false });
        true
    }

    /// Close the overlay: reset the search, drop option focus and hand
    /// focus back to the trigger. Returns `false` if already closed.
    pub fn close(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.set_state(OverlayState::Closed);
        self.set_search("");
        for region in &mut self.regions {
            region.clear_focus();
        }
        self.focus_requested.emit(FocusRequest::Trigger);
        true
    }

    /// The search box gained focus.
    pub fn search_focused(&mut self) {
        if self.state == (OverlayState::Open { searching: false }) {
            self.set_state(OverlayState::Open { searching: true });
        }
    }

    /// The search box lost focus. Searching only ends if nothing was typed.
    pub fn search_blurred(&mut self) {
        if self.state.is_searching() && self.search.with(String::is_empty) {
            self.set_state(OverlayState::Open { searching: false });
        }
    }

    fn set_state(&mut self, state: OverlayState) {
        if self.state != state {
            tracing::debug!(target: targets::COMPOSITE, from = ?self.state, to = ?state, "overlay state");
            self.state = state;
            self.state_changed.emit(state);
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// The shared search string.
    pub fn search(&self) -> String {
        self.search.get()
    }

    /// Apply a search string to every region.
    pub fn set_search(&mut self, search: &str) {
        if !self.search.set(search.to_string()) {
            return;
        }
        for region in &mut self.regions {
            region.set_search(search);
        }
        // The search box keeps keyboard focus; option focus follows the
        // filtered list without a focus request.
        if self.state.is_open() && self.focused().is_none() {
            if let Some(region) = self
                .regions
                .iter_mut()
                .find(|region| region.first_focusable_key().is_some())
            {
                region.enter_focus(FocusDirection::Next);
            }
        }
        self.search_changed.emit(search.to_string());
    }

    /// Whether any region has a visible option.
    pub fn has_visible_options(&self) -> bool {
        self.regions
            .iter()
            .any(|region| region.visible_option_count() > 0)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The option holding keyboard focus.
    pub fn focused(&self) -> Option<FocusTarget> {
        self.regions.iter().enumerate().find_map(|(index, region)| {
            region.focused().map(|focus| FocusTarget {
                region: index,
                key: focus.key.clone(),
                child: focus.child,
            })
        })
    }

    /// Focus an option row. Focus leaves every other region.
    pub fn focus_option(&mut self, index: usize, key: &Key) -> Result<bool> {
        self.check_index(index)?;
        if !self.regions[index].focus_key(key)? {
            return Ok(false);
        }
        self.clear_focus_except(index);
        self.request_focus_on(index);
        Ok(true)
    }

    /// Place the initial focus of an opened overlay: the first selected
    /// option across regions, else the first focusable option.
    pub fn focus_initial(&mut self) -> Option<FocusTarget> {
        let selected = self.regions.iter().enumerate().find_map(|(index, region)| {
            region
                .first_selected_focusable_key()
                .map(|key| (index, key.clone()))
        });
        let target = selected.or_else(|| {
            self.regions.iter().enumerate().find_map(|(index, region)| {
                region.first_focusable_key().map(|key| (index, key.clone()))
            })
        });

        let (index, key) = target?;
        match self.regions[index].focus_key(&key) {
            Ok(true) => {
                self.clear_focus_except(index);
                self.request_focus_on(index)
            }
            _ => None,
        }
    }

    /// Route a key press to the focused region, handing focus across
    /// regions at boundaries.
    pub fn handle_key(&mut self, event: &KeyPressEvent) -> KeyOutcome {
        let Some(index) = self.regions.iter().position(|region| region.focused().is_some()) else {
            return self.enter_from_outside(event);
        };

        match self.regions[index].handle_key(event) {
            KeyOutcome::Boundary(direction) => {
                self.hand_off(index, direction);
                KeyOutcome::Handled
            }
            KeyOutcome::Activate(key) => {
                if let Err(error) = self.select(index, &key) {
                    tracing::warn!(target: targets::COMPOSITE, %error, "activation failed");
                }
                KeyOutcome::Handled
            }
            KeyOutcome::Handled => {
                self.request_focus_on(index);
                KeyOutcome::Handled
            }
            KeyOutcome::Ignored => KeyOutcome::Ignored,
        }
    }

    /// Arrow keys with nothing focused enter the first or last region.
    fn enter_from_outside(&mut self, event: &KeyPressEvent) -> KeyOutcome {
        let direction = match event.key {
            KeyCode::ArrowDown | KeyCode::Home => FocusDirection::Next,
            KeyCode::ArrowUp | KeyCode::End => FocusDirection::Previous,
            _ => return KeyOutcome::Ignored,
        };
        let count = self.regions.len();
        let order: Vec<usize> = match direction {
            FocusDirection::Next => (0..count).collect(),
            FocusDirection::Previous => (0..count).rev().collect(),
        };
        for index in order {
            if self.regions[index].enter_focus(direction) {
                self.request_focus_on(index);
                return KeyOutcome::Handled;
            }
        }
        KeyOutcome::Ignored
    }

    /// Move focus from region `from` to the next region in `direction` that
    /// has a focusable option, wrapping around. Focus stays put if there is
    /// none.
    fn hand_off(&mut self, from: usize, direction: FocusDirection) {
        let count = self.regions.len();
        let target = (1..count)
            .map(|step| match direction {
                FocusDirection::Next => (from + step) % count,
                FocusDirection::Previous => (from + count - step) % count,
            })
            .find(|&index| self.regions[index].first_focusable_key().is_some());

        let Some(index) = target else {
            tracing::trace!(target: targets::COMPOSITE, region = from, "no region to hand focus to");
            return;
        };
        self.regions[from].clear_focus();
        self.regions[index].enter_focus(direction);
        tracing::trace!(
            target: targets::COMPOSITE,
            from,
            to = index,
            ?direction,
            "focus handed across regions"
        );
        self.request_focus_on(index);
    }

    fn clear_focus_except(&mut self, keep: usize) {
        for (index, region) in self.regions.iter_mut().enumerate() {
            if index != keep {
                region.clear_focus();
            }
        }
    }

    fn request_focus_on(&self, index: usize) -> Option<FocusTarget> {
        let focus = self.regions[index].focused()?;
        let target = FocusTarget {
            region: index,
            key: focus.key.clone(),
            child: focus.child,
        };
        self.focus_requested
            .emit(FocusRequest::Option(target.clone()));
        Some(target)
    }
}

static_assertions::assert_impl_all!(CompositeController<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegionConfig;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn key(name: &str) -> Key {
        Key::from(name)
    }

    fn region(config: RegionConfig, names: &[&'static str]) -> Region<&'static str> {
        Region::new(config).with_items(
            names
                .iter()
                .map(|name| SelectOption::new(*name, name.to_uppercase()).into())
                .collect(),
        )
    }

    fn two_regions() -> CompositeController<&'static str> {
        CompositeController::new("None")
            .with_region(region(RegionConfig::single(), &["a", "b"]))
            .with_region(region(RegionConfig::multiple(), &["c", "d", "e"]))
    }

    #[test]
    fn test_trigger_label_display() {
        let label = TriggerLabel {
            text: "A".into(),
            badge: Some(2),
            is_placeholder: false,
        };
        assert_eq!(label.to_string(), "A +2");
        assert_eq!(TriggerLabel::placeholder("None").to_string(), "None");
    }

    #[test]
    fn test_label_aggregates_regions() {
        let mut composite = two_regions();
        assert!(composite.trigger_label().is_placeholder);

        composite.select(0, &key("a")).unwrap();
        composite.select(1, &key("c")).unwrap();
        composite.select(1, &key("d")).unwrap();

        let label = composite.trigger_label();
        assert_eq!(label.text, "A");
        assert_eq!(label.badge, Some(2));
    }

    #[test]
    fn test_notification_order() {
        let mut composite = two_regions();
        let log = Arc::new(Mutex::new(Vec::new()));

        let log_clone = log.clone();
        composite.label_changed.connect(move |_| log_clone.lock().push("label"));
        let log_clone = log.clone();
        composite
            .region(0)
            .unwrap()
            .on_change
            .connect(move |_| log_clone.lock().push("on_change"));
        let log_clone = log.clone();
        composite.state_changed.connect(move |state| {
            if !state.is_open() {
                log_clone.lock().push("close");
            }
        });

        composite.open();
        composite.select(0, &key("b")).unwrap();
        assert_eq!(*log.lock(), vec!["label", "on_change", "close"]);
    }

    #[test]
    fn test_close_resets_search_and_requests_trigger_focus() {
        let mut composite = two_regions();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = requests.clone();
        composite
            .focus_requested
            .connect(move |request| requests_clone.lock().push(request.clone()));

        composite.open();
        composite.set_search("c");
        assert!(composite.region(0).unwrap().first_focusable_key().is_none());
        assert!(composite.close());
        assert_eq!(composite.search(), "");
        assert!(composite.region(0).unwrap().first_focusable_key().is_some());
        assert_eq!(requests.lock().last(), Some(&FocusRequest::Trigger));
        assert!(!composite.close());
    }

    #[test]
    fn test_searching_state() {
        let mut composite = two_regions();
        composite.open();
        composite.search_focused();
        assert_eq!(composite.state(), OverlayState::Open { searching: true });
        composite.set_search("d");
        composite.search_blurred();
        assert!(composite.state().is_searching());
        composite.set_search("");
        composite.search_blurred();
        assert_eq!(composite.state(), OverlayState::Open { searching: false });
    }

    #[test]
    fn test_boundary_handoff_wraps() {
        let mut composite = two_regions();
        composite.open();
        composite.focus_option(0, &key("b")).unwrap();

        composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowDown));
        assert_eq!(composite.focused(), Some(FocusTarget::row(1, key("c"))));

        composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowUp));
        assert_eq!(composite.focused(), Some(FocusTarget::row(0, key("b"))));

        composite.focus_option(1, &key("e")).unwrap();
        composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowDown));
        assert_eq!(composite.focused(), Some(FocusTarget::row(0, key("a"))));
    }

    #[test]
    fn test_handoff_skips_empty_regions() {
        let mut composite = CompositeController::new("None")
            .with_region(region(RegionConfig::single(), &["a"]))
            .with_region(region(RegionConfig::single(), &["b"]))
            .with_region(region(RegionConfig::single(), &["c"]));
        composite.open();
        composite.set_items(1, &[]).unwrap();

        composite.focus_option(0, &key("a")).unwrap();
        composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowDown));
        assert_eq!(composite.focused(), Some(FocusTarget::row(2, key("c"))));
    }

    #[test]
    fn test_duplicate_keys_still_hand_off() {
        let mut composite = CompositeController::new("None")
            .with_region(region(RegionConfig::single(), &["a", "b", "a"]))
            .with_region(region(RegionConfig::multiple(), &["c"]));
        composite.open();
        composite.focus_option(0, &key("a")).unwrap();

        composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowDown));
        assert_eq!(composite.focused(), Some(FocusTarget::row(0, key("b"))));
        composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowDown));
        assert_eq!(composite.focused(), Some(FocusTarget::row(1, key("c"))));
    }

    #[test]
    fn test_single_region_stays_put() {
        let mut composite =
            CompositeController::new("None").with_region(region(RegionConfig::single(), &["a", "b"]));
        composite.open();
        composite.focus_option(0, &key("b")).unwrap();
        assert_eq!(
            composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowDown)),
            KeyOutcome::Handled
        );
        assert_eq!(composite.focused(), Some(FocusTarget::row(0, key("b"))));
    }

    #[test]
    fn test_enter_selects_and_closes_single() {
        let mut composite = two_regions();
        composite.open();
        composite.focus_option(0, &key("a")).unwrap();
        composite.handle_key(&KeyPressEvent::key(KeyCode::Enter));
        assert!(composite.region(0).unwrap().is_selected(&key("a")));
        assert!(!composite.is_open());
    }

    #[test]
    fn test_multiple_region_stays_open() {
        let mut composite = two_regions();
        composite.open();
        composite.select(1, &key("c")).unwrap();
        assert!(composite.is_open());
    }

    #[test]
    fn test_initial_focus_prefers_selection() {
        let mut composite = two_regions();
        composite.set_value(1, ["d"]).unwrap();
        composite.open();
        assert_eq!(
            composite.focus_initial(),
            Some(FocusTarget::row(1, key("d")))
        );

        composite.set_value(1, Vec::<&str>::new()).unwrap();
        composite.close();
        composite.open();
        assert_eq!(
            composite.focus_initial(),
            Some(FocusTarget::row(0, key("a")))
        );
    }

    #[test]
    fn test_region_out_of_bounds() {
        let mut composite = two_regions();
        assert_eq!(
            composite.select(5, &key("a")),
            Err(SelectError::region_out_of_bounds(5, 2))
        );
        assert!(composite.remove_region(1).is_ok());
        assert_eq!(composite.region_count(), 1);
    }

    #[test]
    fn test_clear_all_respects_disallow_empty() {
        let mut composite = CompositeController::new("None")
            .with_region(region(RegionConfig::single(), &["a"]))
            .with_region(region(
                RegionConfig::multiple().with_disallow_empty_selection(true),
                &["b"],
            ));
        composite.select(0, &key("a")).unwrap();
        composite.select(1, &key("b")).unwrap();
        assert!(composite.clear_all());
        assert!(composite.region(0).unwrap().selected_options().is_empty());
        assert_eq!(composite.trigger_label().text, "B");
    }
}
