use chart3d::core::category::{CategoryIndex, assign};

#[test]
fn assign_preserves_first_seen_order() {
    let (mapping, count) = assign(["b", "a", "b", "c"]);
    assert_eq!(count, 3);
    assert_eq!(mapping["b"], 0);
    assert_eq!(mapping["a"], 1);
    assert_eq!(mapping["c"], 2);
    assert_eq!(mapping.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
}

#[test]
fn repeats_reuse_the_existing_index() {
    let mut index = CategoryIndex::new();
    assert_eq!(index.index_of("north"), 0);
    assert_eq!(index.index_of("south"), 1);
    assert_eq!(index.index_of("north"), 0);
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("south"), Some(1));
    assert_eq!(index.get("east"), None);
}

#[test]
fn axes_keep_independent_counters() {
    let mut x = CategoryIndex::new();
    let mut y = CategoryIndex::new();
    x.index_of("a");
    x.index_of("b");
    assert_eq!(y.index_of("b"), 0);
    assert_eq!(x.get("b"), Some(1));
}

#[test]
fn empty_sequence_has_no_categories() {
    let (mapping, count) = assign(std::iter::empty());
    assert!(mapping.is_empty());
    assert_eq!(count, 0);
}
