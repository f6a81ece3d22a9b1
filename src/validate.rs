//! Runtime checks that a dynamically typed value is a weak collection.
//!
//! Typed construction needs none of this: the compiler already proves that
//! every source of a [`MergedWeakMap`] is a [`WeakMapLike`]. These
//! predicates back the `try_merge_*` constructors, which accept
//! `Rc<dyn Any>` candidates.
//!
//! Any implementation of the traits can pass through by boxing its shared
//! handle: an `Rc<dyn Any>` holding a [`SharedWeakMap`] or
//! [`SharedWeakSet`] is always accepted.

use std::any::Any;
use std::rc::Rc;

use crate::merge::MergedWeakMap;
use crate::merge::MergedWeakSet;
use crate::weak::SharedWeakMap;
use crate::weak::SharedWeakSet;
use crate::weak::WeakKeyMap;
use crate::weak::WeakKeySet;

/// Whether `candidate` is a weak map from `Rc<K>` to `V`.
///
/// Accepts [`WeakKeyMap`], the merged maps this crate builds, and a
/// [`SharedWeakMap`] handle to any other implementation.
pub fn is_weak_map<K, V>(candidate: &dyn Any) -> bool
where
    K: ?Sized + 'static,
    V: 'static,
{
    return candidate.is::<WeakKeyMap<K, V>>()
        || candidate.is::<MergedWeakMap<K, V>>()
        || candidate.is::<MergedWeakMap<K, V, SharedWeakMap<K, V>>>()
        || candidate.is::<SharedWeakMap<K, V>>();
}

/// Whether `candidate` is a weak set over `Rc<T>`.
///
/// Accepts [`WeakKeySet`], the merged sets this crate builds, and a
/// [`SharedWeakSet`] handle to any other implementation.
pub fn is_weak_set<T>(candidate: &dyn Any) -> bool
where
    T: ?Sized + 'static,
{
    return candidate.is::<WeakKeySet<T>>()
        || candidate.is::<MergedWeakSet<T>>()
        || candidate.is::<MergedWeakSet<T, SharedWeakSet<T>>>()
        || candidate.is::<SharedWeakSet<T>>();
}

pub(crate) fn into_weak_map<K, V>(candidate: Rc<dyn Any>) -> Option<SharedWeakMap<K, V>>
where
    K: ?Sized + 'static,
    V: Clone + 'static,
{
    let candidate = match candidate.downcast::<WeakKeyMap<K, V>>() {
        Ok(map) => return Some(map),
        Err(other) => other,
    };
    let candidate = match candidate.downcast::<MergedWeakMap<K, V>>() {
        Ok(map) => return Some(map),
        Err(other) => other,
    };
    let candidate = match candidate.downcast::<MergedWeakMap<K, V, SharedWeakMap<K, V>>>() {
        Ok(map) => return Some(map),
        Err(other) => other,
    };
    return candidate.downcast::<SharedWeakMap<K, V>>().ok().map(Rc::unwrap_or_clone);
}

pub(crate) fn into_weak_set<T>(candidate: Rc<dyn Any>) -> Option<SharedWeakSet<T>>
where
    T: ?Sized + 'static,
{
    let candidate = match candidate.downcast::<WeakKeySet<T>>() {
        Ok(set) => return Some(set),
        Err(other) => other,
    };
    let candidate = match candidate.downcast::<MergedWeakSet<T>>() {
        Ok(set) => return Some(set),
        Err(other) => other,
    };
    let candidate = match candidate.downcast::<MergedWeakSet<T, SharedWeakSet<T>>>() {
        Ok(set) => return Some(set),
        Err(other) => other,
    };
    return candidate.downcast::<SharedWeakSet<T>>().ok().map(Rc::unwrap_or_clone);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_weak_maps() {
        let plain: WeakKeyMap<str, u32> = WeakKeyMap::new();
        let merged: MergedWeakMap<str, u32> = MergedWeakMap::new([]);
        assert!(is_weak_map::<str, u32>(&plain));
        assert!(is_weak_map::<str, u32>(&merged));
    }

    #[test]
    fn rejects_other_values() {
        let set: WeakKeySet<str> = WeakKeySet::new();
        let wrong_value: WeakKeyMap<str, i64> = WeakKeyMap::new();
        assert!(!is_weak_map::<str, u32>(&set));
        assert!(!is_weak_map::<str, u32>(&wrong_value));
        assert!(!is_weak_map::<str, u32>(&42u32));
        assert!(!is_weak_set::<str>(&wrong_value));
        assert!(!is_weak_set::<str>(&"set"));
    }

    #[test]
    fn recognizes_weak_sets() {
        let plain: WeakKeySet<str> = WeakKeySet::new();
        let merged: MergedWeakSet<str> = MergedWeakSet::new([]);
        assert!(is_weak_set::<str>(&plain));
        assert!(is_weak_set::<str>(&merged));
    }

    #[test]
    fn converts_recognized_candidates() {
        let plain: Rc<dyn Any> = Rc::new(WeakKeySet::<str>::new());
        let other: Rc<dyn Any> = Rc::new(0u8);
        assert!(into_weak_set::<str>(plain).is_some());
        assert!(into_weak_set::<str>(other).is_none());
    }

    #[test]
    fn accepts_shared_handles() {
        let owned: MergedWeakMap<str, u32, WeakKeyMap<str, u32>> = MergedWeakMap::new([]);
        let handle: SharedWeakMap<str, u32> = Rc::new(owned);
        assert!(is_weak_map::<str, u32>(&handle));

        let candidate: Rc<dyn Any> = Rc::new(handle);
        assert!(into_weak_map::<str, u32>(candidate).is_some());

        let owned: MergedWeakSet<str, WeakKeySet<str>> = MergedWeakSet::new([]);
        let handle: SharedWeakSet<str> = Rc::new(owned);
        assert!(is_weak_set::<str>(&handle));
        assert!(!is_weak_map::<str, u32>(&handle));
    }
}
