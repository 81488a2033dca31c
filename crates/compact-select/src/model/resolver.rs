//! Disabled and hidden key resolution.
//!
//! Given a region's normalized options, the caller's disabled predicate, the
//! current search string and an optional size limit, [`resolve`] works out
//! which keys are disabled, which are hidden, and where the search matched
//! inside each visible option's text.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use compact_select_core::logging::{span_names, targets};

use super::key::Key;
use super::option::{CollectionNode, FlatOptions, SelectOption};

/// Caller-supplied predicate marking options disabled.
///
/// A panic inside the predicate is not caught.
pub type OptionPredicate<V> = Arc<dyn Fn(&SelectOption<V>) -> bool + Send + Sync>;

/// Position of the search match within an option's searchable text.
///
/// Both fields count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    /// Index of the first matched character.
    pub start: usize,
    /// Number of matched characters.
    pub len: usize,
}

impl MatchSpan {
    /// Character index one past the match.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Inputs to [`resolve`].
pub struct ResolveParams<'a, V> {
    /// The region's normalized options.
    pub options: &'a FlatOptions<V>,
    /// Extra disabled predicate.
    pub is_option_disabled: Option<&'a OptionPredicate<V>>,
    /// Current search string. Empty hides nothing.
    pub search: &'a str,
    /// Maximum number of visible options.
    pub size_limit: Option<usize>,
}

impl<V> fmt::Debug for ResolveParams<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveParams")
            .field("option_count", &self.options.len())
            .field("has_predicate", &self.is_option_disabled.is_some())
            .field("search", &self.search)
            .field("size_limit", &self.size_limit)
            .finish()
    }
}

/// The result of resolving a region's options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedKeys {
    /// Options that can't be selected or focused.
    pub disabled: HashSet<Key>,
    /// Options filtered out by search or the size limit, plus suppressed
    /// section keys.
    pub hidden: HashSet<Key>,
    /// Search match spans of visible options.
    pub matches: HashMap<Key, MatchSpan>,
}

impl ResolvedKeys {
    /// Whether `key` is disabled.
    pub fn is_disabled(&self, key: &Key) -> bool {
        self.disabled.contains(key)
    }

    /// Whether `key` is hidden.
    pub fn is_hidden(&self, key: &Key) -> bool {
        self.hidden.contains(key)
    }

    /// Whether focus must skip `key`. Hidden options are never focusable.
    pub fn is_unfocusable(&self, key: &Key) -> bool {
        self.is_disabled(key) || self.is_hidden(key)
    }

    /// The search match span for `key`, if any.
    pub fn match_span(&self, key: &Key) -> Option<MatchSpan> {
        self.matches.get(key).copied()
    }
}

/// Resolve disabled and hidden keys for one region.
pub fn resolve<V>(params: ResolveParams<'_, V>) -> ResolvedKeys {
    let span = tracing::debug_span!(
        target: targets::MODEL,
        span_names::RESOLVE,
        options = params.options.len(),
        search_len = params.search.len(),
    );
    let _enter = span.enter();

    let mut resolved = ResolvedKeys::default();
    let needle = fold_case(params.search);

    // Disabled and search passes.
    for node in params.options.nodes() {
        match node {
            CollectionNode::Leaf(option) => {
                resolve_leaf(&mut resolved, option, false, &params, &needle);
            }
            CollectionNode::Section(section) => {
                for child in &section.children {
                    resolve_leaf(&mut resolved, child, section.disabled, &params, &needle);
                }
            }
        }
    }

    if let Some(limit) = params.size_limit {
        apply_size_limit(&mut resolved, params.options, limit);
    }

    // Sections with no visible children are suppressed.
    for node in params.options.nodes() {
        if let CollectionNode::Section(section) = node {
            if section.child_keys().all(|key| resolved.hidden.contains(key)) {
                resolved.hidden.insert(section.key.clone());
            }
        }
    }

    resolved.matches.retain(|key, _| !resolved.hidden.contains(key));

    tracing::trace!(
        target: targets::MODEL,
        disabled = resolved.disabled.len(),
        hidden = resolved.hidden.len(),
        "resolved option keys"
    );
    resolved
}

fn resolve_leaf<V>(
    resolved: &mut ResolvedKeys,
    option: &SelectOption<V>,
    section_disabled: bool,
    params: &ResolveParams<'_, V>,
    needle: &str,
) {
    let predicate_disabled = params
        .is_option_disabled
        .is_some_and(|predicate| predicate(option));
    if option.disabled || section_disabled || predicate_disabled {
        resolved.disabled.insert(option.key.clone());
    }

    if needle.is_empty() {
        return;
    }
    match find_match(option.searchable_text(), needle) {
        Some(span) => {
            resolved.matches.insert(option.key.clone(), span);
        }
        None => {
            resolved.hidden.insert(option.key.clone());
        }
    }
}

/// Single left-to-right walk over the post-filter sequence. A section counts
/// its visible children; once an item would exceed the limit, everything
/// from there on is hidden except the overflowing section's visible prefix.
fn apply_size_limit<V>(resolved: &mut ResolvedKeys, options: &FlatOptions<V>, limit: usize) {
    let mut running = 0usize;
    let mut overflowed = false;

    for node in options.nodes() {
        match node {
            CollectionNode::Leaf(option) => {
                if resolved.hidden.contains(&option.key) {
                    continue;
                }
                if overflowed || running + 1 > limit {
                    overflowed = true;
                    resolved.hidden.insert(option.key.clone());
                } else {
                    running += 1;
                }
            }
            CollectionNode::Section(section) => {
                let visible: Vec<&Key> = section
                    .child_keys()
                    .filter(|key| !resolved.hidden.contains(*key))
                    .collect();
                let keep = if overflowed {
                    0
                } else if running + visible.len() > limit {
                    overflowed = true;
                    limit - running
                } else {
                    visible.len()
                };
                running += keep;
                for key in visible.into_iter().skip(keep) {
                    resolved.hidden.insert(key.clone());
                }
            }
        }
    }

    if overflowed {
        tracing::debug!(target: targets::MODEL, limit, "size limit reached");
    }
}

/// Lowercase one character at a time, so a needle and the text it is
/// searched in fold identically.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive substring search reporting a span in characters of the
/// original `text`.
fn find_match(text: &str, needle: &str) -> Option<MatchSpan> {
    // Lowercasing can expand a character, so track where each lowered
    // character came from.
    let mut lowered = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (index, ch) in text.chars().enumerate() {
        for lower in ch.to_lowercase() {
            lowered.push(lower);
            origin.push(index);
        }
    }

    let byte_start = lowered.find(needle)?;
    let start = lowered[..byte_start].chars().count();
    let needle_chars = needle.chars().count();
    let first = origin[start];
    let last = origin[start + needle_chars - 1];
    Some(MatchSpan {
        start: first,
        len: last + 1 - first,
    })
}
