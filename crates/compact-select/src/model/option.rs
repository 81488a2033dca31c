//! Option model: caller-supplied options and sections, and their
//! normalized, key-addressable form.
//!
//! Callers hand a region a fresh `Vec<SelectItem<V>>` whenever their data
//! changes. [`normalize`] turns that snapshot into [`FlatOptions`], a
//! read-only collection that navigation, filtering and selection all work
//! against. Normalizing is a pure function of its input: the same items
//! always produce the same keys in the same order.
//!
//! # Example
//!
//! ```
//! use compact_select::model::{normalize, SelectItem, SelectOption, SelectSection};
//!
//! let items: Vec<SelectItem<&str>> = vec![
//!     SelectOption::new("any", "Any").into(),
//!     SelectSection::new(vec![
//!         SelectOption::new("apple", "Apple"),
//!         SelectOption::new("banana", "Banana"),
//!     ])
//!     .with_label("Fruit")
//!     .into(),
//! ];
//!
//! let options = normalize(&items);
//! assert_eq!(options.len(), 3);
//! assert!(options.option(&"banana".into()).is_some());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use compact_select_core::logging::{dev_diagnostics_enabled, targets};

use super::key::{Key, SelectValue};

// ============================================================================
// Caller input
// ============================================================================

/// A single selectable option.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption<V> {
    /// Unique key within the collection. Defaults to the value's key.
    pub key: Key,
    /// The value reported back through `on_change`.
    pub value: V,
    /// Display label.
    pub label: String,
    /// Text matched by search instead of the label, when set.
    pub text_value: Option<String>,
    /// Secondary descriptive text.
    pub details: Option<String>,
    /// Whether this option can't be selected or focused.
    pub disabled: bool,
    /// Number of individually focusable controls inside the row (grid mode).
    pub interactive_children: usize,
}

impl<V: SelectValue> SelectOption<V> {
    /// Create an option keyed by its value.
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            key: value.to_key(),
            value,
            label: label.into(),
            text_value: None,
            details: None,
            disabled: false,
            interactive_children: 0,
        }
    }
}

impl<V> SelectOption<V> {
    /// Set an explicit key.
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the text search matches against.
    pub fn with_text_value(mut self, text: impl Into<String>) -> Self {
        self.text_value = Some(text.into());
        self
    }

    /// Set secondary descriptive text.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Set whether the option is disabled.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the number of focusable controls inside the row.
    pub fn with_interactive_children(mut self, count: usize) -> Self {
        self.interactive_children = count;
        self
    }

    /// The text search matches against: `text_value` if set, else `label`.
    pub fn searchable_text(&self) -> &str {
        self.text_value.as_deref().unwrap_or(&self.label)
    }
}

/// A titled group of options. Sections do not nest.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectSection<V> {
    /// Section key. Unkeyed sections get `section-{index}`.
    pub key: Option<Key>,
    /// Header label.
    pub label: Option<String>,
    /// The options in this section, in display order.
    pub options: Vec<SelectOption<V>>,
    /// Disables every option inside, regardless of their own flags.
    pub disabled: bool,
    /// Whether the header offers a select-all/unselect-all toggle.
    pub show_toggle_all_button: bool,
}

impl<V> SelectSection<V> {
    /// Create an unlabeled section.
    pub fn new(options: Vec<SelectOption<V>>) -> Self {
        Self {
            key: None,
            label: None,
            options,
            disabled: false,
            show_toggle_all_button: false,
        }
    }

    /// Set the section key.
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the header label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Disable the whole section.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Show the select-all/unselect-all toggle in the header.
    pub fn with_toggle_all_button(mut self, show: bool) -> Self {
        self.show_toggle_all_button = show;
        self
    }
}

/// One entry of the caller's option list: a plain option or a section.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem<V> {
    /// A top-level option.
    Option(SelectOption<V>),
    /// A section of options.
    Section(SelectSection<V>),
}

impl<V> From<SelectOption<V>> for SelectItem<V> {
    fn from(option: SelectOption<V>) -> Self {
        Self::Option(option)
    }
}

impl<V> From<SelectSection<V>> for SelectItem<V> {
    fn from(section: SelectSection<V>) -> Self {
        Self::Section(section)
    }
}

// ============================================================================
// Normalized collection
// ============================================================================

/// A normalized section: header data plus its leaf options.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionNode<V> {
    /// Resolved section key.
    pub key: Key,
    /// Header label.
    pub label: Option<String>,
    /// Whether the section disables its children.
    pub disabled: bool,
    /// Whether the header offers a select-all toggle.
    pub show_toggle_all_button: bool,
    /// Child options in display order.
    pub children: Vec<Arc<SelectOption<V>>>,
}

impl<V> SectionNode<V> {
    /// Keys of the child options, in order.
    pub fn child_keys(&self) -> impl Iterator<Item = &Key> {
        self.children.iter().map(|option| &option.key)
    }
}

/// An addressable item of the normalized collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionNode<V> {
    /// A selectable option.
    Leaf(Arc<SelectOption<V>>),
    /// A section wrapping its own ordered children.
    Section(SectionNode<V>),
}

impl<V> CollectionNode<V> {
    /// The node's key.
    pub fn key(&self) -> &Key {
        match self {
            Self::Leaf(option) => &option.key,
            Self::Section(section) => &section.key,
        }
    }

    /// Whether this node is a section.
    pub fn is_section(&self) -> bool {
        matches!(self, Self::Section(_))
    }
}

/// The normalized option collection of one region.
///
/// Built by [`normalize`]; never mutated afterwards. Key lookups are
/// last-write-wins when the caller supplied duplicate keys.
#[derive(Debug, Clone)]
pub struct FlatOptions<V> {
    nodes: Vec<CollectionNode<V>>,
    by_key: HashMap<Key, Arc<SelectOption<V>>>,
    section_of: HashMap<Key, Key>,
    leaf_keys: Vec<Key>,
}

impl<V> Default for FlatOptions<V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            by_key: HashMap::new(),
            section_of: HashMap::new(),
            leaf_keys: Vec::new(),
        }
    }
}

impl<V: PartialEq> PartialEq for FlatOptions<V> {
    fn eq(&self, other: &Self) -> bool {
        // The lookup maps are derived from the nodes.
        self.nodes == other.nodes
    }
}

impl<V> FlatOptions<V> {
    /// The top-level nodes, in caller order.
    pub fn nodes(&self) -> &[CollectionNode<V>] {
        &self.nodes
    }

    /// All keys in traversal order: each section's key precedes its children.
    pub fn traversal_keys(&self) -> Vec<&Key> {
        let mut keys = Vec::with_capacity(self.leaf_keys.len() + self.nodes.len());
        for node in &self.nodes {
            keys.push(node.key());
            if let CollectionNode::Section(section) = node {
                keys.extend(section.child_keys());
            }
        }
        keys
    }

    /// Leaf option keys in traversal order.
    pub fn leaf_keys(&self) -> &[Key] {
        &self.leaf_keys
    }

    /// Leaf options in traversal order.
    pub fn leaves(&self) -> impl Iterator<Item = &Arc<SelectOption<V>>> {
        self.nodes.iter().flat_map(|node| match node {
            CollectionNode::Leaf(option) => std::slice::from_ref(option).iter(),
            CollectionNode::Section(section) => section.children.iter(),
        })
    }

    /// Look up an option by key.
    pub fn option(&self, key: &Key) -> Option<&Arc<SelectOption<V>>> {
        self.by_key.get(key)
    }

    /// Whether `key` names a leaf option.
    pub fn contains(&self, key: &Key) -> bool {
        self.by_key.contains_key(key)
    }

    /// Look up a section by key.
    pub fn section(&self, key: &Key) -> Option<&SectionNode<V>> {
        self.nodes.iter().find_map(|node| match node {
            CollectionNode::Section(section) if &section.key == key => Some(section),
            _ => None,
        })
    }

    /// The key of the section containing `key`, if it is inside one.
    pub fn section_of(&self, key: &Key) -> Option<&Key> {
        self.section_of.get(key)
    }

    /// Number of leaf options.
    pub fn len(&self) -> usize {
        self.leaf_keys.len()
    }

    /// Whether there are no leaf options.
    pub fn is_empty(&self) -> bool {
        self.leaf_keys.is_empty()
    }
}

/// Normalize a caller option snapshot into a [`FlatOptions`] collection.
///
/// Options and sections keep the caller's order. Unkeyed sections are keyed
/// `section-{index}` by their position in `items`.
pub fn normalize<V: Clone>(items: &[SelectItem<V>]) -> FlatOptions<V> {
    let mut flat = FlatOptions::default();

    for (index, item) in items.iter().enumerate() {
        match item {
            SelectItem::Option(option) => {
                let option = Arc::new(option.clone());
                flat.register_leaf(&option, None);
                flat.nodes.push(CollectionNode::Leaf(option));
            }
            SelectItem::Section(section) => {
                let key = section
                    .key
                    .clone()
                    .unwrap_or_else(|| Key::new(format!("section-{index}")));
                let children: Vec<_> = section
                    .options
                    .iter()
                    .map(|option| Arc::new(option.clone()))
                    .collect();
                for child in &children {
                    flat.register_leaf(child, Some(&key));
                }
                flat.nodes.push(CollectionNode::Section(SectionNode {
                    key,
                    label: section.label.clone(),
                    disabled: section.disabled,
                    show_toggle_all_button: section.show_toggle_all_button,
                    children,
                }));
            }
        }
    }

    flat
}

impl<V> FlatOptions<V> {
    fn register_leaf(&mut self, option: &Arc<SelectOption<V>>, section: Option<&Key>) {
        let key = option.key.clone();
        let previous = self.by_key.insert(key.clone(), Arc::clone(option));
        if previous.is_some() && dev_diagnostics_enabled() {
            tracing::warn!(
                target: targets::MODEL,
                key = %key,
                "duplicate option key; later option wins key lookups"
            );
        }
        match section {
            Some(section) => {
                self.section_of.insert(key.clone(), section.clone());
            }
            None => {
                self.section_of.remove(&key);
            }
        }
        self.leaf_keys.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> Vec<SelectItem<&'static str>> {
        vec![
            SelectOption::new("any", "Any fruit").into(),
            SelectSection::new(vec![
                SelectOption::new("apple", "Apple"),
                SelectOption::new("banana", "Banana"),
            ])
            .with_label("Common")
            .into(),
            SelectSection::new(vec![SelectOption::new("durian", "Durian")])
                .with_key("exotic")
                .into(),
        ]
    }

    #[test]
    fn test_normalize_preserves_order() {
        let flat = normalize(&fruit());
        let keys: Vec<&str> = flat.traversal_keys().iter().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["any", "section-1", "apple", "banana", "exotic", "durian"]
        );
        let leaves: Vec<&str> = flat.leaf_keys().iter().map(Key::as_str).collect();
        assert_eq!(leaves, vec!["any", "apple", "banana", "durian"]);
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let items = fruit();
        let first = normalize(&items);
        let second = normalize(&items);
        assert_eq!(first, second);
        assert_eq!(first.traversal_keys(), second.traversal_keys());
    }

    #[test]
    fn test_section_lookup() {
        let flat = normalize(&fruit());
        let section = flat.section(&Key::from("section-1")).unwrap();
        assert_eq!(section.label.as_deref(), Some("Common"));
        assert_eq!(section.children.len(), 2);
        assert_eq!(
            flat.section_of(&Key::from("banana")),
            Some(&Key::from("section-1"))
        );
        assert_eq!(flat.section_of(&Key::from("any")), None);
        assert!(flat.section(&Key::from("apple")).is_none());
    }

    #[test]
    fn test_key_defaults_to_value() {
        let option = SelectOption::new(7u8, "Seven");
        assert_eq!(option.key, Key::from("7"));
        let option = option.with_key("lucky");
        assert_eq!(option.key, Key::from("lucky"));
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let items: Vec<SelectItem<&str>> = vec![
            SelectOption::new("a", "First").into(),
            SelectOption::new("a", "Second").into(),
        ];
        let flat = normalize(&items);
        assert_eq!(flat.option(&Key::from("a")).unwrap().label, "Second");
        assert_eq!(flat.leaf_keys().len(), 2);
    }

    #[test]
    fn test_searchable_text_prefers_text_value() {
        let option = SelectOption::new("us", "🇺🇸 United States").with_text_value("United States");
        assert_eq!(option.searchable_text(), "United States");
        let option = SelectOption::new("ca", "Canada");
        assert_eq!(option.searchable_text(), "Canada");
    }
}
