//! Behavioral properties of the select controller.

mod common;

use compact_select::model::{ResolveParams, normalize, resolve};
use compact_select::prelude::*;

use common::{init_tracing, items};

fn key(name: &str) -> Key {
    Key::from(name)
}

#[test]
fn test_normalization_is_idempotent() {
    init_tracing();
    let input: Vec<SelectItem<&str>> = vec![
        SelectOption::new("z", "Zucchini").into(),
        SelectSection::new(vec![
            SelectOption::new("b", "Banana"),
            SelectOption::new("a", "Apple"),
        ])
        .into(),
        SelectSection::new(vec![SelectOption::new("k", "Kale")])
            .with_key("greens")
            .into(),
    ];

    let first = normalize(&input);
    let second = normalize(&input);
    assert_eq!(first.traversal_keys(), second.traversal_keys());
    assert_eq!(first, second);

    // Caller order, no sorting.
    let leaves: Vec<&str> = first.leaf_keys().iter().map(Key::as_str).collect();
    assert_eq!(leaves, vec!["z", "b", "a", "k"]);
}

#[test]
fn test_disabled_section_disables_every_child() {
    let options = normalize(&[SelectSection::new(vec![
        SelectOption::new("a", "Apple"),
        SelectOption::new("b", "Banana").with_disabled(false),
        SelectOption::new("c", "Cherry").with_disabled(true),
    ])
    .with_disabled(true)
    .into()]);

    let resolved = resolve(ResolveParams {
        options: &options,
        is_option_disabled: None,
        search: "",
        size_limit: None,
    });
    for name in ["a", "b", "c"] {
        assert!(resolved.is_disabled(&key(name)), "{name} should be disabled");
    }
}

#[test]
fn test_single_mode_holds_at_most_one_key() {
    let mut region = Region::new(RegionConfig::single().with_disallow_empty_selection(true))
        .with_items(items(&[("a", "A"), ("b", "B"), ("c", "C")]));
    assert_eq!(region.selection().selected_count(), 0);

    for name in ["b", "b", "a", "c", "a", "a"] {
        region.select(&key(name)).unwrap();
        assert_eq!(region.selection().selected_count(), 1);
    }
    assert!(region.is_selected(&key("a")));
}

#[test]
fn test_disallow_empty_keeps_last_multiple_key() {
    let mut region = Region::new(RegionConfig::multiple().with_disallow_empty_selection(true))
        .with_items(items(&[("a", "A"), ("b", "B")]));
    let changes = common::record_changes(&region);

    region.select(&key("a")).unwrap();
    assert_eq!(
        region.select(&key("a")),
        Ok(SelectionOutcome::Unchanged)
    );
    assert!(region.is_selected(&key("a")));
    assert_eq!(changes.lock().len(), 1);
}

#[test]
fn test_hidden_keys_are_never_focus_bounds() {
    let mut region = Region::new(RegionConfig::single()).with_items(items(&[
        ("a", "Apple"),
        ("b", "Banana"),
        ("c", "Cantaloupe"),
        ("d", "Dill"),
    ]));
    region.set_search("an");

    let resolved = region.resolved().clone();
    assert!(resolved.is_hidden(&key("a")));
    assert!(resolved.is_hidden(&key("d")));
    assert_eq!(region.first_focusable_key(), Some(&key("b")));
    assert_eq!(region.last_focusable_key(), Some(&key("c")));
    for hidden in &resolved.hidden {
        assert_ne!(region.first_focusable_key(), Some(hidden));
        assert_ne!(region.last_focusable_key(), Some(hidden));
    }
}

#[test]
fn test_boundary_handoff_between_two_regions() {
    init_tracing();
    let mut composite = CompositeController::new("None")
        .with_region(Region::new(RegionConfig::single()).with_items(items(&[("a", "A"), ("b", "B")])))
        .with_region(Region::new(RegionConfig::single()).with_items(items(&[("c", "C"), ("d", "D")])));
    composite.open();

    let last_of_first = composite.region(0).unwrap().last_focusable_key().cloned().unwrap();
    composite.focus_option(0, &last_of_first).unwrap();

    composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowDown));
    assert_eq!(composite.focused(), Some(FocusTarget::row(1, key("c"))));

    composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowUp));
    assert_eq!(composite.focused(), Some(FocusTarget::row(0, key("b"))));

    // End of the last region wraps to the start of the first.
    composite.focus_option(1, &key("d")).unwrap();
    composite.handle_key(&KeyPressEvent::key(KeyCode::ArrowDown));
    assert_eq!(composite.focused(), Some(FocusTarget::row(0, key("a"))));
}

#[test]
fn test_label_aggregates_across_regions() {
    let mut composite = CompositeController::new("None")
        .with_region(Region::new(RegionConfig::single()).with_items(items(&[("a", "A")])))
        .with_region(
            Region::new(RegionConfig::multiple()).with_items(items(&[("b", "B"), ("c", "C")])),
        );

    composite.select(0, &key("a")).unwrap();
    composite.select(1, &key("b")).unwrap();
    composite.select(1, &key("c")).unwrap();

    let label = composite.trigger_label();
    assert_eq!(label.text, "A");
    assert_eq!(label.badge, Some(2));
    assert_eq!(label.to_string(), "A +2");
}

#[test]
fn test_size_limit_walk() {
    let mut region = Region::new(RegionConfig::single().with_size_limit(3)).with_items(vec![
        SelectOption::new("a", "Apple").into(),
        SelectSection::new(vec![
            SelectOption::new("b", "Banana"),
            SelectOption::new("c", "Cherry"),
            SelectOption::new("d", "Date"),
        ])
        .with_key("s1")
        .into(),
        SelectSection::new(vec![SelectOption::new("e", "Elderberry")])
            .with_key("s2")
            .into(),
    ]);

    let keys: Vec<Key> = region.rows().iter().map(|row| row.key().clone()).collect();
    assert_eq!(keys, vec![key("a"), key("s1"), key("b"), key("c")]);

    // The limit counts what the search left visible.
    region.set_search("rr");
    let keys: Vec<Key> = region.rows().iter().map(|row| row.key().clone()).collect();
    assert_eq!(keys, vec![key("s1"), key("c"), key("s2"), key("e")]);
}
