//! A single navigable option list.
//!
//! A [`Region`] owns one option collection, its resolved disabled and
//! hidden keys, and its own [`SelectionManager`]. Regions know nothing
//! about their siblings: when keyboard focus reaches an edge they report
//! [`KeyOutcome::Boundary`] and let the composite decide where focus goes.
//!
//! # Example
//!
//! ```
//! use compact_select::config::RegionConfig;
//! use compact_select::model::{Key, SelectOption};
//! use compact_select::widget::Region;
//!
//! let mut region = Region::new(RegionConfig::single()).with_items(vec![
//!     SelectOption::new("apple", "Apple").into(),
//!     SelectOption::new("banana", "Banana").into(),
//! ]);
//!
//! region.on_change.connect(|selection| {
//!     println!("Selected: {:?}", selection.first().map(|option| &option.label));
//! });
//!
//! region.select(&Key::from("banana")).unwrap();
//! assert_eq!(region.selected_options().len(), 1);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use compact_select_core::Signal;
use compact_select_core::logging::{span_names, targets};

use super::events::{FocusDirection, KeyCode, KeyOutcome, KeyPressEvent, KeyboardModifiers};
use super::render::{OptionRow, RenderRow, SectionRow};
use crate::config::RegionConfig;
use crate::error::{Result, SelectError};
use crate::model::{
    CollectionNode, FlatOptions, Key, OptionPredicate, ResolveParams, ResolvedKeys, SelectItem,
    SelectOption, SelectValue, SelectionManager, SelectionMode, SelectionOutcome, normalize,
    resolve,
};

/// Number of options PageUp/PageDown move by.
const PAGE_STEP: usize = 10;

/// Navigation semantics of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Rows are atomic.
    #[default]
    ListBox,
    /// Rows may hold individually focusable controls.
    GridList,
}

/// The selected options of one region, in collection order.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionSelection<V> {
    Single(Option<SelectOption<V>>),
    Multiple(Vec<SelectOption<V>>),
}

/// Payload of [`Region::on_change`].
pub type SelectionChange<V> = RegionSelection<V>;

impl<V> RegionSelection<V> {
    /// An empty selection for `mode`.
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multiple => Self::Multiple(Vec::new()),
        }
    }

    /// The selected options as a slice.
    pub fn as_slice(&self) -> &[SelectOption<V>] {
        match self {
            Self::Single(option) => option.as_slice(),
            Self::Multiple(options) => options,
        }
    }

    /// Number of selected options.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// The first selected option.
    pub fn first(&self) -> Option<&SelectOption<V>> {
        self.as_slice().first()
    }
}

impl<V: Clone> RegionSelection<V> {
    /// The selected values.
    pub fn values(&self) -> Vec<V> {
        self.as_slice()
            .iter()
            .map(|option| option.value.clone())
            .collect()
    }
}

/// Keyboard focus inside a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFocus {
    /// The focused option.
    pub key: Key,
    /// The focused interactive child (grid mode), `None` for the row itself.
    pub child: Option<usize>,
}

/// One listbox or gridlist inside the overlay.
///
/// # Signals
///
/// - `on_change`: Emitted once per logical selection change with the
///   region's full selection.
pub struct Region<V: SelectValue> {
    config: RegionConfig,
    options: FlatOptions<V>,
    resolved: ResolvedKeys,
    selection: SelectionManager,
    /// Leaf keys in collection order, first occurrence of each key only.
    navigation_keys: Vec<Key>,
    is_option_disabled: Option<OptionPredicate<V>>,
    search: String,
    focused: Option<RegionFocus>,
    has_siblings: bool,

    /// Emitted when the selection changes through interaction.
    pub on_change: Signal<SelectionChange<V>>,
}

impl<V: SelectValue> Region<V> {
    /// Create an empty region.
    pub fn new(config: RegionConfig) -> Self {
        let selection = SelectionManager::new(config.selection_mode())
            .with_disallow_empty_selection(config.disallow_empty_selection);
        Self {
            config,
            options: FlatOptions::default(),
            resolved: ResolvedKeys::default(),
            selection,
            navigation_keys: Vec::new(),
            is_option_disabled: None,
            search: String::new(),
            focused: None,
            has_siblings: false,
            on_change: Signal::new(),
        }
    }

    /// Set the options using builder pattern.
    pub fn with_items(mut self, items: Vec<SelectItem<V>>) -> Self {
        self.set_items(&items);
        self
    }

    /// Set the disabled predicate using builder pattern.
    pub fn with_option_disabled<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&SelectOption<V>) -> bool + Send + Sync + 'static,
    {
        self.set_option_disabled(Some(Arc::new(predicate)));
        self
    }

    /// Seed the uncontrolled selection using builder pattern.
    pub fn with_default_value<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        self.set_value(values);
        self
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replace the option snapshot.
    pub fn set_items(&mut self, items: &[SelectItem<V>]) {
        self.options = normalize(items);
        tracing::debug!(
            target: targets::REGION,
            options = self.options.len(),
            "options replaced"
        );
        self.refresh();
    }

    /// Replace the disabled predicate.
    pub fn set_option_disabled(&mut self, predicate: Option<OptionPredicate<V>>) {
        self.is_option_disabled = predicate;
        self.refresh();
    }

    /// Apply a search string. Focus on an option the search hides is dropped.
    pub fn set_search(&mut self, search: &str) {
        if self.search == search {
            return;
        }
        self.search = search.to_string();
        self.refresh();
    }

    /// Re-derive the selection from an externally controlled value. Emits
    /// nothing.
    pub fn set_value<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        let keys: Vec<Key> = values
            .into_iter()
            .map(|value| self.key_for_value(&value))
            .collect();
        self.selection.set_value(keys);
    }

    pub(crate) fn set_has_siblings(&mut self, has_siblings: bool) {
        self.has_siblings = has_siblings;
    }

    fn key_for_value(&self, value: &V) -> Key {
        self.options
            .leaves()
            .find(|option| &option.value == value)
            .map(|option| option.key.clone())
            .unwrap_or_else(|| value.to_key())
    }

    fn refresh(&mut self) {
        self.resolved = resolve(ResolveParams {
            options: &self.options,
            is_option_disabled: self.is_option_disabled.as_ref(),
            search: &self.search,
            size_limit: self.config.size_limit,
        });

        let mut seen = HashSet::new();
        self.navigation_keys = self
            .options
            .leaf_keys()
            .iter()
            .filter(|key| seen.insert(*key))
            .cloned()
            .collect();
        self.selection.set_collection(self.navigation_keys.clone());
        self.selection
            .set_disabled_keys(self.resolved.disabled.clone());

        let stale = self
            .focused
            .as_ref()
            .is_some_and(|focus| !self.is_focusable(&focus.key));
        if stale {
            tracing::trace!(target: targets::REGION, "focused option became unfocusable");
            self.focused = None;
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The region's configuration.
    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// Listbox or gridlist navigation.
    pub fn list_mode(&self) -> ListMode {
        if self.config.grid {
            ListMode::GridList
        } else {
            ListMode::ListBox
        }
    }

    /// The normalized options.
    pub fn options(&self) -> &FlatOptions<V> {
        &self.options
    }

    /// The resolved disabled and hidden keys.
    pub fn resolved(&self) -> &ResolvedKeys {
        &self.resolved
    }

    /// The region's selection state.
    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// The search string currently applied.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether a selection should close the overlay.
    pub fn closes_on_select(&self) -> bool {
        self.config.closes_on_select()
    }

    /// Checks if a key is selected.
    pub fn is_selected(&self, key: &Key) -> bool {
        self.selection.is_selected(key)
    }

    /// Number of options neither hidden by search nor by the size limit.
    pub fn visible_option_count(&self) -> usize {
        self.navigation_keys
            .iter()
            .filter(|key| !self.resolved.is_hidden(key))
            .count()
    }

    /// The selected options, in collection order.
    pub fn selected_options(&self) -> RegionSelection<V> {
        let options: Vec<SelectOption<V>> = self
            .navigation_keys
            .iter()
            .filter(|key| self.selection.is_selected(key))
            .filter_map(|key| self.options.option(key))
            .map(|option| option.as_ref().clone())
            .collect();

        match self.selection.selection_mode() {
            SelectionMode::Single => RegionSelection::Single(options.into_iter().next()),
            SelectionMode::Multiple => RegionSelection::Multiple(options),
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether focus may land on `key`.
    pub fn is_focusable(&self, key: &Key) -> bool {
        self.options.contains(key) && !self.resolved.is_unfocusable(key)
    }

    /// The first option that is neither disabled nor hidden.
    pub fn first_focusable_key(&self) -> Option<&Key> {
        self.navigation_keys
            .iter()
            .find(|key| self.is_focusable(key))
    }

    /// The last option that is neither disabled nor hidden.
    pub fn last_focusable_key(&self) -> Option<&Key> {
        self.navigation_keys
            .iter()
            .rev()
            .find(|key| self.is_focusable(key))
    }

    /// The first selected option focus may land on.
    pub fn first_selected_focusable_key(&self) -> Option<&Key> {
        self.navigation_keys
            .iter()
            .find(|key| self.is_focusable(key) && self.selection.is_selected(key))
    }

    /// The focused option.
    pub fn focused(&self) -> Option<&RegionFocus> {
        self.focused.as_ref()
    }

    /// Focus an option row. Returns `false` if the option is disabled or
    /// hidden.
    pub fn focus_key(&mut self, key: &Key) -> Result<bool> {
        if !self.options.contains(key) {
            return Err(SelectError::UnknownKey(key.clone()));
        }
        if !self.is_focusable(key) {
            return Ok(false);
        }
        self.set_focus(key.clone(), None);
        Ok(true)
    }

    /// Focus the option focus enters from when moving in `direction`: the
    /// first for [`FocusDirection::Next`], the last for
    /// [`FocusDirection::Previous`]. Returns `false` if nothing is focusable.
    pub fn enter_focus(&mut self, direction: FocusDirection) -> bool {
        let key = match direction {
            FocusDirection::Next => self.first_focusable_key(),
            FocusDirection::Previous => self.last_focusable_key(),
        };
        match key.cloned() {
            Some(key) => {
                self.set_focus(key, None);
                true
            }
            None => false,
        }
    }

    /// Drop keyboard focus.
    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    fn set_focus(&mut self, key: Key, child: Option<usize>) {
        tracing::trace!(target: targets::REGION, key = %key, ?child, "focus moved");
        self.focused = Some(RegionFocus { key, child });
    }

    fn adjacent_focusable(&self, from: &Key, direction: FocusDirection) -> Option<&Key> {
        let keys = &self.navigation_keys;
        let index = keys.iter().position(|key| key == from)?;
        match direction {
            FocusDirection::Next => keys[index + 1..].iter().find(|key| self.is_focusable(key)),
            FocusDirection::Previous => keys[..index]
                .iter()
                .rev()
                .find(|key| self.is_focusable(key)),
        }
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key press.
    ///
    /// Arrow keys never wrap past an edge when the region has siblings; the
    /// region reports [`KeyOutcome::Boundary`] instead. Enter and Space on a
    /// focused row report [`KeyOutcome::Activate`]; selecting is up to the
    /// caller.
    pub fn handle_key(&mut self, event: &KeyPressEvent) -> KeyOutcome {
        let grid = self.list_mode() == ListMode::GridList;
        match event.key {
            KeyCode::ArrowDown => self.move_focus(FocusDirection::Next),
            KeyCode::ArrowUp => self.move_focus(FocusDirection::Previous),
            KeyCode::Home => self.jump(FocusDirection::Next),
            KeyCode::End => self.jump(FocusDirection::Previous),
            KeyCode::PageDown => self.move_page(FocusDirection::Next),
            KeyCode::PageUp => self.move_page(FocusDirection::Previous),
            KeyCode::ArrowRight if grid => self.move_child(FocusDirection::Next),
            KeyCode::ArrowLeft if grid => self.move_child(FocusDirection::Previous),
            KeyCode::Enter | KeyCode::Space => match &self.focused {
                Some(focus) if focus.child.is_none() => KeyOutcome::Activate(focus.key.clone()),
                _ => KeyOutcome::Ignored,
            },
            KeyCode::Other => self.typeahead(&event.text, event.modifiers),
            _ => KeyOutcome::Ignored,
        }
    }

    fn move_focus(&mut self, direction: FocusDirection) -> KeyOutcome {
        let Some(current) = self.focused.as_ref().map(|focus| focus.key.clone()) else {
            return if self.enter_focus(direction) {
                KeyOutcome::Handled
            } else {
                KeyOutcome::Boundary(direction)
            };
        };

        if let Some(key) = self.adjacent_focusable(&current, direction).cloned() {
            self.set_focus(key, None);
            return KeyOutcome::Handled;
        }

        if self.config.should_focus_wrap && !self.has_siblings {
            self.enter_focus(direction);
            KeyOutcome::Handled
        } else {
            KeyOutcome::Boundary(direction)
        }
    }

    fn jump(&mut self, direction: FocusDirection) -> KeyOutcome {
        if self.enter_focus(direction) {
            KeyOutcome::Handled
        } else {
            KeyOutcome::Ignored
        }
    }

    fn move_page(&mut self, direction: FocusDirection) -> KeyOutcome {
        let Some(mut current) = self.focused.as_ref().map(|focus| focus.key.clone()) else {
            return self.jump(direction);
        };
        for _ in 0..PAGE_STEP {
            match self.adjacent_focusable(&current, direction) {
                Some(key) => current = key.clone(),
                None => break,
            }
        }
        self.set_focus(current, None);
        KeyOutcome::Handled
    }

    fn move_child(&mut self, direction: FocusDirection) -> KeyOutcome {
        let Some(focus) = self.focused.as_mut() else {
            return KeyOutcome::Ignored;
        };
        let count = self
            .options
            .option(&focus.key)
            .map_or(0, |option| option.interactive_children);

        let child = match (direction, focus.child) {
            (FocusDirection::Next, None) if count > 0 => Some(0),
            (FocusDirection::Next, Some(index)) if index + 1 < count => Some(index + 1),
            (FocusDirection::Previous, Some(0)) => None,
            (FocusDirection::Previous, Some(index)) => Some(index - 1),
            _ => return KeyOutcome::Ignored,
        };
        focus.child = child;
        KeyOutcome::Handled
    }

    /// Jump to the next option whose text starts with the typed character.
    fn typeahead(&mut self, text: &str, modifiers: KeyboardModifiers) -> KeyOutcome {
        if modifiers.control || modifiers.meta || modifiers.alt {
            return KeyOutcome::Ignored;
        }
        let mut chars = text.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return KeyOutcome::Ignored;
        };
        if ch.is_whitespace() || ch.is_control() {
            return KeyOutcome::Ignored;
        }
        let prefix: String = ch.to_lowercase().collect();

        let keys = &self.navigation_keys;
        let start = self
            .focused
            .as_ref()
            .and_then(|focus| keys.iter().position(|key| key == &focus.key))
            .map_or(0, |index| index + 1);

        let found = (0..keys.len())
            .map(|offset| &keys[(start + offset) % keys.len()])
            .find(|key| {
                self.is_focusable(key)
                    && self.options.option(key).is_some_and(|option| {
                        option.searchable_text().to_lowercase().starts_with(&prefix)
                    })
            })
            .cloned();

        match found {
            Some(key) => {
                self.set_focus(key, None);
                KeyOutcome::Handled
            }
            None => KeyOutcome::Ignored,
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select `key` and emit `on_change` if the selection changed.
    pub fn select(&mut self, key: &Key) -> Result<SelectionOutcome> {
        let outcome = self.apply_select(key)?;
        self.notify_if_changed(outcome);
        Ok(outcome)
    }

    /// Select every enabled option. Multiple mode only.
    pub fn select_all(&mut self) -> Result<SelectionOutcome> {
        let outcome = self.selection.select_all()?;
        self.notify_if_changed(outcome);
        Ok(outcome)
    }

    /// Deselect everything. Multiple mode only.
    pub fn clear(&mut self) -> Result<SelectionOutcome> {
        let outcome = self.selection.clear()?;
        self.notify_if_changed(outcome);
        Ok(outcome)
    }

    /// Select-all / unselect-all over a section's enabled, visible options,
    /// as one change.
    pub fn toggle_section(&mut self, section: &Key) -> Result<SelectionOutcome> {
        let outcome = self.apply_toggle_section(section)?;
        self.notify_if_changed(outcome);
        Ok(outcome)
    }

    pub(crate) fn apply_select(&mut self, key: &Key) -> Result<SelectionOutcome> {
        let span = tracing::debug_span!(target: targets::REGION, span_names::SELECT, key = %key);
        let _enter = span.enter();
        self.selection.select(key)
    }

    pub(crate) fn apply_select_all(&mut self) -> Result<SelectionOutcome> {
        self.selection.select_all()
    }

    pub(crate) fn apply_clear(&mut self) -> Result<SelectionOutcome> {
        self.selection.clear()
    }

    pub(crate) fn apply_reset(&mut self) -> SelectionOutcome {
        self.selection.reset()
    }

    pub(crate) fn apply_toggle_section(&mut self, section: &Key) -> Result<SelectionOutcome> {
        let span = tracing::debug_span!(
            target: targets::REGION,
            span_names::TOGGLE_SECTION,
            section = %section
        );
        let _enter = span.enter();

        let node = self
            .options
            .section(section)
            .ok_or_else(|| SelectError::UnknownSection(section.clone()))?;
        let keys: Vec<Key> = node
            .child_keys()
            .filter(|key| !self.resolved.is_hidden(key))
            .cloned()
            .collect();
        self.selection.toggle_keys(&keys)
    }

    pub(crate) fn emit_change(&self) {
        self.on_change.emit(self.selected_options());
    }

    fn notify_if_changed(&self, outcome: SelectionOutcome) {
        if outcome.is_changed() {
            self.emit_change();
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The visible rows, in display order. Suppressed sections and hidden
    /// options are left out.
    pub fn rows(&self) -> Vec<RenderRow> {
        let mut rows = Vec::new();
        for node in self.options.nodes() {
            match node {
                CollectionNode::Leaf(option) => {
                    if !self.resolved.is_hidden(&option.key) {
                        rows.push(RenderRow::Option(self.option_row(option, None)));
                    }
                }
                CollectionNode::Section(section) => {
                    if self.resolved.is_hidden(&section.key) {
                        continue;
                    }
                    let visible: Vec<&Arc<SelectOption<V>>> = section
                        .children
                        .iter()
                        .filter(|option| !self.resolved.is_hidden(&option.key))
                        .collect();
                    let mut enabled = visible
                        .iter()
                        .filter(|option| !self.resolved.is_disabled(&option.key))
                        .peekable();
                    let all_selected = enabled.peek().is_some()
                        && enabled.all(|option| self.selection.is_selected(&option.key));

                    rows.push(RenderRow::Section(SectionRow {
                        section_key: section.key.clone(),
                        label: section.label.clone(),
                        child_keys: visible.iter().map(|option| option.key.clone()).collect(),
                        show_toggle_all_button: section.show_toggle_all_button,
                        all_selected,
                    }));
                    rows.extend(
                        visible
                            .iter()
                            .map(|option| RenderRow::Option(self.option_row(option, Some(&section.key)))),
                    );
                }
            }
        }
        rows
    }

    fn option_row(&self, option: &SelectOption<V>, section: Option<&Key>) -> OptionRow {
        let focus = self
            .focused
            .as_ref()
            .filter(|focus| focus.key == option.key);
        OptionRow {
            key: option.key.clone(),
            label: option.label.clone(),
            details: option.details.clone(),
            disabled: self.resolved.is_disabled(&option.key),
            selected: self.selection.is_selected(&option.key),
            focused: focus.is_some(),
            focused_child: focus.and_then(|focus| focus.child),
            interactive_children: option.interactive_children,
            match_span: self.resolved.match_span(&option.key),
            section: section.cloned(),
        }
    }
}

static_assertions::assert_impl_all!(Region<String>: Send, Sync);
