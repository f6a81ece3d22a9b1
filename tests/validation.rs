//! Dynamically typed construction through `try_merge_*`.

use std::any::Any;
use std::rc::Rc;

use weak_merge::prelude::*;
use weak_merge::validate::{is_weak_map, is_weak_set};
use weak_merge::{
    Error, MergedWeakMap, MergedWeakSet, SharedWeakMap, SharedWeakSet, WeakKeyMap, WeakKeySet,
    try_merge_weak_maps, try_merge_weak_sets,
};

fn weak_map(entries: &[(&Rc<str>, u32)]) -> Rc<WeakKeyMap<str, u32>> {
    let entries = entries.iter().map(|(key, value)| ((*key).clone(), *value));
    return Rc::new(WeakKeyMap::from_entries(entries));
}

fn any<T: Any>(value: Rc<T>) -> Rc<dyn Any> {
    return value;
}

// =============================================================================
// Maps
// =============================================================================

#[test]
fn accepts_weak_maps_and_merged_maps() {
    let a: Rc<str> = Rc::from("a");
    let b: Rc<str> = Rc::from("b");
    let plain = weak_map(&[(&a, 1)]);
    let merged: Rc<MergedWeakMap<str, u32>> = Rc::new(MergedWeakMap::new([weak_map(&[(&b, 2)])]));

    let candidates: Vec<Rc<dyn Any>> = vec![any(plain.clone()), any(merged)];
    let view = try_merge_weak_maps::<str, u32, _>(candidates).unwrap();

    assert_eq!(view.get(&a), Some(1));
    assert_eq!(view.get(&b), Some(2));

    view.delete(&a);
    assert!(plain.has(&a));
}

#[test]
fn dynamic_merge_keeps_priority() {
    let a: Rc<str> = Rc::from("a");
    let candidates: Vec<Rc<dyn Any>> = vec![any(weak_map(&[(&a, 1)])), any(weak_map(&[(&a, 2)]))];

    let view = try_merge_weak_maps::<str, u32, _>(candidates).unwrap();
    assert_eq!(view.get(&a), Some(2));
}

#[test]
fn dynamic_views_are_themselves_valid_candidates() {
    let a: Rc<str> = Rc::from("a");
    let inner = try_merge_weak_maps::<str, u32, _>([any(weak_map(&[(&a, 1)]))]).unwrap();
    let inner = any(Rc::new(inner));
    assert!(is_weak_map::<str, u32>(&*inner));

    let outer = try_merge_weak_maps::<str, u32, _>([inner]).unwrap();
    assert_eq!(outer.get(&a), Some(1));
}

#[test]
fn shared_handles_admit_any_weak_map() {
    let a: Rc<str> = Rc::from("a");
    let b: Rc<str> = Rc::from("b");

    let inner: Rc<MergedWeakMap<str, u32>> = Rc::new(MergedWeakMap::new([weak_map(&[(&a, 1)])]));
    let nested: MergedWeakMap<str, u32, Rc<MergedWeakMap<str, u32>>> =
        MergedWeakMap::new([inner.clone()]);
    let owned: MergedWeakMap<str, u32, WeakKeyMap<str, u32>> =
        MergedWeakMap::new([WeakKeyMap::from_entries([(b.clone(), 2)])]);

    let nested: SharedWeakMap<str, u32> = Rc::new(nested);
    let owned: SharedWeakMap<str, u32> = Rc::new(owned);
    let candidates: Vec<Rc<dyn Any>> = vec![any(Rc::new(nested)), any(Rc::new(owned))];
    assert!(candidates.iter().all(|candidate| is_weak_map::<str, u32>(&**candidate)));

    let view = try_merge_weak_maps::<str, u32, _>(candidates).unwrap();
    assert_eq!(view.get(&a), Some(1));
    assert_eq!(view.get(&b), Some(2));

    inner.set(&a, 5);
    assert_eq!(view.get(&a), Some(5));
}

#[test]
fn rejects_a_single_invalid_candidate() {
    let candidates: Vec<Rc<dyn Any>> = vec![
        any(weak_map(&[])),
        any(Rc::new(WeakKeySet::<str>::new())),
        any(weak_map(&[])),
    ];

    let error = try_merge_weak_maps::<str, u32, _>(candidates).unwrap_err();
    assert_eq!(
        error,
        Error::InvalidArgument { operation: "merge_weak_maps", expected: "weak maps", index: 1 }
    );
    assert!(error.to_string().contains("merge_weak_maps expects weak maps"));
}

#[test]
fn rejects_maps_of_other_types() {
    let wrong = any(Rc::new(WeakKeyMap::<str, String>::new()));
    assert!(!is_weak_map::<str, u32>(&*wrong));
    assert!(try_merge_weak_maps::<str, u32, _>([wrong]).is_err());
}

#[test]
fn empty_candidate_list_is_valid() {
    let view = try_merge_weak_maps::<str, u32, _>(Vec::new()).unwrap();
    assert!(!view.has(&Rc::from("a")));
}

// =============================================================================
// Sets
// =============================================================================

#[test]
fn accepts_weak_sets_and_merged_sets() {
    let a: Rc<str> = Rc::from("a");
    let b: Rc<str> = Rc::from("b");
    let plain = Rc::new(WeakKeySet::from_values([a.clone()]));
    let merged: Rc<MergedWeakSet<str>> =
        Rc::new(MergedWeakSet::new([Rc::new(WeakKeySet::from_values([b.clone()]))]));

    let candidates: Vec<Rc<dyn Any>> = vec![any(plain.clone()), any(merged)];
    let view = try_merge_weak_sets::<str, _>(candidates).unwrap();

    assert!(view.has(&a));
    assert!(view.has(&b));

    view.delete(&a);
    assert!(plain.has(&a));
}

#[test]
fn shared_handles_admit_any_weak_set() {
    let a: Rc<str> = Rc::from("a");
    let owned: MergedWeakSet<str, WeakKeySet<str>> =
        MergedWeakSet::new([WeakKeySet::from_values([a.clone()])]);
    let handle: SharedWeakSet<str> = Rc::new(owned);

    let candidate = any(Rc::new(handle));
    assert!(is_weak_set::<str>(&*candidate));
    assert!(!is_weak_map::<str, u32>(&*candidate));

    let view = try_merge_weak_sets::<str, _>([candidate]).unwrap();
    assert!(view.has(&a));
}

#[test]
fn rejects_non_sets() {
    let candidates: Vec<Rc<dyn Any>> = vec![
        any(Rc::new(WeakKeySet::<str>::new())),
        any(Rc::new(WeakKeySet::<str>::new())),
        any(Rc::new(WeakKeyMap::<str, u32>::new())),
    ];

    let error = try_merge_weak_sets::<str, _>(candidates).unwrap_err();
    assert_eq!(
        error.to_string(),
        "merge_weak_sets expects weak sets (argument 2 is not one)"
    );
}

#[test]
fn predicate_is_total() {
    let values: Vec<Rc<dyn Any>> = vec![
        any(Rc::new(())),
        any(Rc::new("weak set")),
        any(Rc::new(vec![1, 2, 3])),
        any(Rc::new(WeakKeySet::<u64>::new())),
    ];
    for value in &values {
        assert!(!is_weak_set::<str>(&**value));
        assert!(!is_weak_map::<str, u32>(&**value));
    }
}
