//! Selection state for a single region.
//!
//! [`SelectionManager`] tracks which keys of one region are selected. It
//! knows nothing about option values or labels: the owning region turns
//! keys back into options when it reports a change.
//!
//! # Example
//!
//! ```
//! use compact_select::model::{Key, SelectionManager, SelectionMode};
//!
//! let mut selection = SelectionManager::new(SelectionMode::Multiple);
//! selection.set_collection(vec!["a".into(), "b".into()]);
//!
//! selection.selection_changed.connect(|(selected, deselected)| {
//!     println!("Selection changed: +{} -{}", selected.len(), deselected.len());
//! });
//!
//! selection.select(&Key::from("a")).unwrap();
//! assert!(selection.is_selected(&Key::from("a")));
//! ```

use std::collections::HashSet;

use compact_select_core::Signal;
use compact_select_core::logging::targets;
use serde::{Deserialize, Serialize};

use super::key::Key;
use crate::error::{Result, SelectError};

/// How many keys a region may hold selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// At most one key (default).
    #[default]
    Single,
    /// Any number of keys.
    Multiple,
}

/// The result of a selection operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selected set changed.
    Changed,
    /// The operation was valid but left the selected set as it was.
    Unchanged,
    /// The operation targeted a disabled key.
    Rejected,
}

impl SelectionOutcome {
    /// Whether the selected set changed.
    pub fn is_changed(self) -> bool {
        self == Self::Changed
    }

    /// Whether the operation was accepted, changed or not.
    pub fn is_accepted(self) -> bool {
        self != Self::Rejected
    }
}

/// A snapshot of the selected keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedKeys {
    /// Every enabled key, including keys added to the collection later.
    All,
    /// An explicit set, in selection order.
    Keys(Vec<Key>),
}

/// Manages selection state for one region.
///
/// # Signals
///
/// - `selection_changed`: Emitted when selection changes, with (selected, deselected) keys
pub struct SelectionManager {
    /// Current selection mode.
    mode: SelectionMode,

    /// Whether a deselect may leave nothing selected.
    disallow_empty: bool,

    /// Whether "select all" is in effect.
    all: bool,

    /// Set of selected keys for O(1) lookup.
    selected_ids: HashSet<Key>,

    /// Selected keys in selection order.
    selected_order: Vec<Key>,

    /// Leaf keys of the collection, in traversal order.
    collection: Vec<Key>,

    /// Keys that can't be selected.
    disabled: HashSet<Key>,

    /// Emitted when selection changes. Args: (selected, deselected)
    ///
    /// For hosts that track keys rather than options, reached through
    /// `Region::selection()`. Regions act on the returned
    /// [`SelectionOutcome`] and report options through their own `on_change`.
    pub selection_changed: Signal<(Vec<Key>, Vec<Key>)>,
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

impl SelectionManager {
    /// Creates a new, empty selection manager.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            disallow_empty: false,
            all: false,
            selected_ids: HashSet::new(),
            selected_order: Vec::new(),
            collection: Vec::new(),
            disabled: HashSet::new(),
            selection_changed: Signal::new(),
        }
    }

    /// Set whether a deselect may leave nothing selected.
    pub fn with_disallow_empty_selection(mut self, disallow: bool) -> Self {
        self.disallow_empty = disallow;
        self
    }

    /// Seed uncontrolled state. Emits nothing.
    pub fn with_default_value<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.replace_keys(keys.into_iter().map(Into::into).collect());
        self
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Gets the selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether multiple keys may be selected.
    pub fn is_multiple(&self) -> bool {
        self.mode == SelectionMode::Multiple
    }

    /// Whether a deselect may leave nothing selected.
    pub fn disallows_empty_selection(&self) -> bool {
        self.disallow_empty
    }

    /// Replace the collection's leaf keys.
    ///
    /// Selected keys missing from the new collection are kept, so a
    /// controlled value survives options arriving late.
    pub fn set_collection(&mut self, keys: Vec<Key>) {
        self.collection = keys;
    }

    /// Replace the set of disabled keys.
    pub fn set_disabled_keys(&mut self, disabled: HashSet<Key>) {
        self.disabled = disabled;
    }

    /// Whether `key` is disabled.
    pub fn is_disabled(&self, key: &Key) -> bool {
        self.disabled.contains(key)
    }

    // =========================================================================
    // Selection Queries
    // =========================================================================

    /// Checks if a key is selected.
    pub fn is_selected(&self, key: &Key) -> bool {
        if self.all {
            return !self.disabled.contains(key) && self.collection.contains(key);
        }
        self.selected_ids.contains(key)
    }

    /// Returns the number of selected keys.
    pub fn selected_count(&self) -> usize {
        if self.all {
            return self.enabled_keys().count();
        }
        self.selected_order.len()
    }

    /// Returns true if any key is selected.
    pub fn has_selection(&self) -> bool {
        self.selected_count() > 0
    }

    /// Returns the selected keys, in selection order.
    pub fn selected_keys(&self) -> Vec<Key> {
        if self.all {
            return self.enabled_keys().cloned().collect();
        }
        self.selected_order.clone()
    }

    /// Returns the selection, distinguishing "select all".
    pub fn selection(&self) -> SelectedKeys {
        if self.all {
            SelectedKeys::All
        } else {
            SelectedKeys::Keys(self.selected_order.clone())
        }
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Select `key`.
    ///
    /// Single mode replaces the selection; re-selecting the selected key is
    /// a no-op. Multiple mode toggles membership, except that a deselect
    /// which would empty the set is refused when empty selection is
    /// disallowed.
    pub fn select(&mut self, key: &Key) -> Result<SelectionOutcome> {
        if !self.collection.contains(key) {
            return Err(SelectError::UnknownKey(key.clone()));
        }
        if self.disabled.contains(key) {
            tracing::debug!(target: targets::SELECTION, key = %key, "ignoring select of disabled key");
            return Ok(SelectionOutcome::Rejected);
        }

        match self.mode {
            SelectionMode::Single => {
                if self.is_selected(key) && self.selected_count() == 1 {
                    return Ok(SelectionOutcome::Unchanged);
                }
                let deselected = self.selected_keys();
                self.replace_keys(vec![key.clone()]);
                Ok(self.commit(vec![key.clone()], deselected))
            }
            SelectionMode::Multiple => {
                self.materialize_all();
                if self.selected_ids.contains(key) {
                    if self.disallow_empty && self.selected_order.len() == 1 {
                        tracing::debug!(
                            target: targets::SELECTION,
                            key = %key,
                            "refusing to deselect the last selected key"
                        );
                        return Ok(SelectionOutcome::Unchanged);
                    }
                    self.remove_key(key);
                    Ok(self.commit(Vec::new(), vec![key.clone()]))
                } else {
                    self.add_key(key.clone());
                    Ok(self.commit(vec![key.clone()], Vec::new()))
                }
            }
        }
    }

    /// Select every enabled key. Multiple mode only.
    pub fn select_all(&mut self) -> Result<SelectionOutcome> {
        if !self.is_multiple() {
            return Err(SelectError::requires_multiple("select_all"));
        }
        let newly_selected: Vec<Key> = self
            .enabled_keys()
            .filter(|key| !self.is_selected(key))
            .cloned()
            .collect();
        self.all = true;
        self.selected_ids.clear();
        self.selected_order.clear();
        Ok(self.commit(newly_selected, Vec::new()))
    }

    /// Deselect everything. Multiple mode only.
    ///
    /// A no-op when empty selection is disallowed.
    pub fn clear(&mut self) -> Result<SelectionOutcome> {
        if !self.is_multiple() {
            return Err(SelectError::requires_multiple("clear"));
        }
        Ok(self.reset())
    }

    /// Deselect everything in either mode.
    ///
    /// A no-op when empty selection is disallowed.
    pub fn reset(&mut self) -> SelectionOutcome {
        if !self.has_selection() {
            return SelectionOutcome::Unchanged;
        }
        if self.disallow_empty {
            tracing::debug!(target: targets::SELECTION, "empty selection disallowed, keeping selection");
            return SelectionOutcome::Unchanged;
        }
        let deselected = self.selected_keys();
        self.replace_keys(Vec::new());
        self.commit(Vec::new(), deselected)
    }

    /// Select-all / unselect-all over `keys` as one change.
    ///
    /// Disabled keys are skipped. If every remaining key is already
    /// selected they are all deselected, otherwise the missing ones are
    /// selected. Multiple mode only.
    pub fn toggle_keys(&mut self, keys: &[Key]) -> Result<SelectionOutcome> {
        if !self.is_multiple() {
            return Err(SelectError::requires_multiple("toggle_keys"));
        }
        if let Some(unknown) = keys.iter().find(|key| !self.collection.contains(key)) {
            return Err(SelectError::UnknownKey(unknown.clone()));
        }

        let enabled: Vec<&Key> = keys
            .iter()
            .filter(|key| !self.disabled.contains(*key))
            .collect();
        if enabled.is_empty() {
            return Ok(SelectionOutcome::Unchanged);
        }

        self.materialize_all();
        let all_selected = enabled.iter().all(|key| self.selected_ids.contains(*key));
        if all_selected {
            let remaining = self
                .selected_order
                .iter()
                .filter(|key| !enabled.contains(key))
                .count();
            if remaining == 0 && self.disallow_empty {
                tracing::debug!(
                    target: targets::SELECTION,
                    "refusing batch deselect that would empty the selection"
                );
                return Ok(SelectionOutcome::Unchanged);
            }
            let deselected: Vec<Key> = enabled.into_iter().cloned().collect();
            for key in &deselected {
                self.remove_key(key);
            }
            Ok(self.commit(Vec::new(), deselected))
        } else {
            let selected: Vec<Key> = enabled
                .into_iter()
                .filter(|key| !self.selected_ids.contains(*key))
                .cloned()
                .collect();
            for key in &selected {
                self.add_key(key.clone());
            }
            Ok(self.commit(selected, Vec::new()))
        }
    }

    /// Re-derive the selection from an externally controlled value.
    ///
    /// Emits nothing: the host already knows about its own value. Single
    /// mode keeps only the first key.
    pub fn set_value<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.replace_keys(keys.into_iter().map(Into::into).collect());
        tracing::trace!(
            target: targets::SELECTION,
            count = self.selected_order.len(),
            "synced controlled value"
        );
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn enabled_keys(&self) -> impl Iterator<Item = &Key> {
        self.collection
            .iter()
            .filter(|key| !self.disabled.contains(*key))
    }

    /// Turn a pending "select all" into an explicit key set.
    fn materialize_all(&mut self) {
        if self.all {
            let keys: Vec<Key> = self.enabled_keys().cloned().collect();
            self.all = false;
            self.replace_keys(keys);
        }
    }

    fn replace_keys(&mut self, mut keys: Vec<Key>) {
        if self.mode == SelectionMode::Single {
            keys.truncate(1);
        }
        self.all = false;
        self.selected_ids.clear();
        self.selected_order.clear();
        for key in keys {
            self.add_key(key);
        }
    }

    fn add_key(&mut self, key: Key) {
        if self.selected_ids.insert(key.clone()) {
            self.selected_order.push(key);
        }
    }

    fn remove_key(&mut self, key: &Key) {
        if self.selected_ids.remove(key) {
            self.selected_order.retain(|k| k != key);
        }
    }

    fn commit(&self, selected: Vec<Key>, deselected: Vec<Key>) -> SelectionOutcome {
        if selected.is_empty() && deselected.is_empty() {
            return SelectionOutcome::Unchanged;
        }
        tracing::debug!(
            target: targets::SELECTION,
            selected = selected.len(),
            deselected = deselected.len(),
            "selection changed"
        );
        self.selection_changed.emit((selected, deselected));
        SelectionOutcome::Changed
    }
}

static_assertions::assert_impl_all!(SelectionManager: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn keys(names: &[&str]) -> Vec<Key> {
        names.iter().map(|name| Key::from(*name)).collect()
    }

    fn manager(mode: SelectionMode) -> SelectionManager {
        let mut manager = SelectionManager::new(mode);
        manager.set_collection(keys(&["a", "b", "c", "d"]));
        manager
    }

    #[test]
    fn test_single_select_replaces() {
        let mut selection = manager(SelectionMode::Single);
        assert_eq!(selection.select(&"a".into()), Ok(SelectionOutcome::Changed));
        assert_eq!(selection.select(&"b".into()), Ok(SelectionOutcome::Changed));
        assert_eq!(selection.selected_keys(), keys(&["b"]));
        assert_eq!(selection.select(&"b".into()), Ok(SelectionOutcome::Unchanged));
        assert_eq!(selection.selected_count(), 1);
    }

    #[test]
    fn test_single_mode_cardinality() {
        let mut selection =
            manager(SelectionMode::Single).with_disallow_empty_selection(true);
        for name in ["a", "c", "c", "b", "d", "a"] {
            selection.select(&name.into()).unwrap();
            assert_eq!(selection.selected_count(), 1);
        }
    }

    #[test]
    fn test_disabled_key_rejected() {
        let mut selection = manager(SelectionMode::Multiple);
        selection.set_disabled_keys(keys(&["b"]).into_iter().collect());
        assert_eq!(selection.select(&"b".into()), Ok(SelectionOutcome::Rejected));
        assert!(!selection.has_selection());
    }

    #[test]
    fn test_unknown_key_is_error() {
        let mut selection = manager(SelectionMode::Single);
        assert_eq!(
            selection.select(&"z".into()),
            Err(SelectError::UnknownKey("z".into()))
        );
    }

    #[test]
    fn test_multiple_toggles() {
        let mut selection = manager(SelectionMode::Multiple);
        selection.select(&"a".into()).unwrap();
        selection.select(&"c".into()).unwrap();
        assert_eq!(selection.selected_keys(), keys(&["a", "c"]));
        selection.select(&"a".into()).unwrap();
        assert_eq!(selection.selected_keys(), keys(&["c"]));
    }

    #[test]
    fn test_disallow_empty_keeps_last_key() {
        let mut selection =
            manager(SelectionMode::Multiple).with_disallow_empty_selection(true);
        selection.select(&"a".into()).unwrap();
        assert_eq!(selection.select(&"a".into()), Ok(SelectionOutcome::Unchanged));
        assert_eq!(selection.selected_keys(), keys(&["a"]));
        assert_eq!(selection.clear(), Ok(SelectionOutcome::Unchanged));
        assert!(selection.is_selected(&"a".into()));
    }

    #[test]
    fn test_select_all_and_clear_require_multiple() {
        let mut selection = manager(SelectionMode::Single);
        assert_eq!(
            selection.select_all(),
            Err(SelectError::requires_multiple("select_all"))
        );
        assert_eq!(
            selection.clear(),
            Err(SelectError::requires_multiple("clear"))
        );
    }

    #[test]
    fn test_select_all_skips_disabled() {
        let mut selection = manager(SelectionMode::Multiple);
        selection.set_disabled_keys(keys(&["b"]).into_iter().collect());
        selection.select_all().unwrap();
        assert_eq!(selection.selection(), SelectedKeys::All);
        assert_eq!(selection.selected_keys(), keys(&["a", "c", "d"]));
        assert!(!selection.is_selected(&"b".into()));

        // Toggling one key off turns "all" into an explicit set.
        selection.select(&"c".into()).unwrap();
        assert_eq!(selection.selected_keys(), keys(&["a", "d"]));
    }

    #[test]
    fn test_toggle_keys_batches() {
        let mut selection = manager(SelectionMode::Multiple);
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        selection.selection_changed.connect(move |change| {
            events_clone.lock().push(change.clone());
        });

        selection.select(&"a".into()).unwrap();
        selection.toggle_keys(&keys(&["a", "b"])).unwrap();
        assert_eq!(selection.selected_keys(), keys(&["a", "b"]));
        selection.toggle_keys(&keys(&["a", "b"])).unwrap();
        assert!(!selection.has_selection());

        let events = events.lock();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], (keys(&["b"]), Vec::new()));
        assert_eq!(events[2], (Vec::new(), keys(&["a", "b"])));
    }

    #[test]
    fn test_toggle_keys_respects_disallow_empty() {
        let mut selection =
            manager(SelectionMode::Multiple).with_disallow_empty_selection(true);
        selection.toggle_keys(&keys(&["a", "b"])).unwrap();
        assert_eq!(
            selection.toggle_keys(&keys(&["a", "b"])),
            Ok(SelectionOutcome::Unchanged)
        );
        assert_eq!(selection.selected_count(), 2);
    }

    #[test]
    fn test_set_value_is_silent() {
        let mut selection = manager(SelectionMode::Single);
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        selection.selection_changed.connect(move |_| {
            *count_clone.lock() += 1;
        });

        selection.set_value(["b", "c"]);
        assert_eq!(selection.selected_keys(), keys(&["b"]));
        assert_eq!(*count.lock(), 0);

        selection.select(&"a".into()).unwrap();
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_default_value_seeds() {
        let selection = SelectionManager::new(SelectionMode::Multiple)
            .with_default_value(["a", "b"]);
        assert_eq!(selection.selected_keys(), keys(&["a", "b"]));
    }

    #[test]
    fn test_reset_works_in_single_mode() {
        let mut selection = manager(SelectionMode::Single);
        selection.select(&"a".into()).unwrap();
        assert_eq!(selection.reset(), SelectionOutcome::Changed);
        assert!(!selection.has_selection());
        assert_eq!(selection.reset(), SelectionOutcome::Unchanged);
    }
}
