//! Integration tests for combining and splitting delegates.
//!
//! `merge` copies entry handles from another delegate and leaves it untouched,
//! `unmerge` removes them again, and `take_from` moves a whole list out.

use multicast_delegate::Delegate;

fn add_one(x: i32) -> i32 {
    x + 1
}

fn double(x: i32) -> i32 {
    x * 2
}

fn negate(x: i32) -> i32 {
    -x
}

#[test]
fn test_merge_appends_in_source_order() {
    let target = Delegate::from_fn(negate);
    let source = Delegate::from_fn(add_one);
    source.add(double);
    let source_before = source.entries();

    target.merge(&source);

    assert_eq!(target.invoke(5), vec![-5, 6, 10]);
    assert_eq!(source.entries(), source_before);
    assert_eq!(&target.entries()[1..], &source_before[..]);
}

#[test]
fn test_merge_is_a_snapshot() {
    let target: Delegate<i32, i32> = Delegate::new();
    let source = Delegate::from_fn(add_one);

    target.merge(&source);
    source.add(double);

    // Later additions to the source are not linked into the target.
    assert_eq!(target.invoke(1), vec![2]);
}

#[test]
fn test_merge_chains() {
    let a = Delegate::from_fn(add_one);
    let b = Delegate::from_fn(double);
    let target: Delegate<i32, i32> = Delegate::new();

    target.merge(&a).merge(&b).merge(&a);

    assert_eq!(target.invoke(3), vec![4, 6, 4]);
}

#[test]
fn test_unmerge_removes_merged_entries() {
    let target = Delegate::from_fn(negate);
    let source = Delegate::from_fn(add_one);
    source.add(double);

    target.merge(&source);
    target.unmerge(&source);

    assert_eq!(target.invoke(5), vec![-5]);
    assert_eq!(source.len(), 2);
}

#[test]
fn test_unmerge_after_double_merge_removes_latest_copies() {
    let target: Delegate<i32, i32> = Delegate::new();
    let source = Delegate::from_fn(add_one);
    let local = target.add(double);

    target.merge(&source);
    target.add(negate);
    target.merge(&source);

    // [double, add_one, negate, add_one] -> [double, add_one, negate]
    target.unmerge(&source);
    assert_eq!(target.invoke(2), vec![4, 3, -2]);
    assert!(target.contains(&local));
}

#[test]
fn test_unmerge_unrelated_is_noop() {
    let target = Delegate::from_fn(add_one);
    let unrelated = Delegate::from_fn(add_one);

    target.unmerge(&unrelated);
    assert_eq!(target.len(), 1);
}

#[test]
fn test_take_from_moves_everything() {
    let source = Delegate::from_fn(add_one);
    source.add(double);
    let before = source.entries();

    let moved = Delegate::take_from(&source);

    assert_eq!(moved.entries(), before);
    assert!(source.is_empty());
    assert!(source.invoke(1).is_empty());
}

#[test]
fn test_take_from_empty_source() {
    let source: Delegate<i32, i32> = Delegate::new();
    let moved = Delegate::take_from(&source);

    assert!(moved.is_empty());
    assert!(source.is_empty());
}

#[test]
fn test_entries_dropped_with_delegate() {
    use std::sync::Arc;

    let state = Arc::new(());
    let delegate: Delegate<(), usize> = Delegate::new();
    let captured = state.clone();
    delegate.add(move |()| Arc::strong_count(&captured));

    assert_eq!(Arc::strong_count(&state), 2);
    drop(delegate);
    assert_eq!(Arc::strong_count(&state), 1);
}

#[test]
fn test_merged_entry_outlives_source() {
    let target: Delegate<i32, i32> = Delegate::new();
    {
        let source = Delegate::from_fn(double);
        target.merge(&source);
    }

    assert_eq!(target.invoke(21), vec![42]);
}
