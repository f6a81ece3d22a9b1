//! Overlay views merging several weak collections into one.
//!
//! Both views share one layout: a write layer the view owns, a tombstone
//! layer recording what was deleted through the view, and the list of
//! sources consulted on a miss. Each key or value moves through three
//! states:
//!
//! - untouched: visibility comes from the sources alone;
//! - written: the write layer is authoritative;
//! - tombstoned: absent, whatever the sources say.
//!
//! A touched key never becomes untouched again, which keeps the view
//! behaving like a single flat collection.

mod map;
mod set;

use std::any::Any;
use std::rc::Rc;

pub use map::MergedWeakMap;
pub use set::MergedWeakSet;

use crate::error::Error;
use crate::error::Result;
use crate::validate;
use crate::weak::SharedWeakMap;
use crate::weak::SharedWeakSet;
use crate::weak::WeakMapLike;
use crate::weak::WeakSetLike;

/// Merge `sources` into one weak map; later sources win on conflicts.
pub fn merge_weak_maps<K, V, S, I>(sources: I) -> MergedWeakMap<K, V, S>
where
    K: ?Sized,
    S: WeakMapLike<K, V>,
    I: IntoIterator<Item = S>,
{
    return MergedWeakMap::new(sources);
}

/// Merge `sources` into one weak set.
pub fn merge_weak_sets<T, S, I>(sources: I) -> MergedWeakSet<T, S>
where
    T: ?Sized,
    S: WeakSetLike<T>,
    I: IntoIterator<Item = S>,
{
    return MergedWeakSet::new(sources);
}

/// Merge dynamically typed candidates into one weak map.
///
/// Fails with [`Error::InvalidArgument`] on the first candidate that is not
/// a weak map over `K` and `V`, see [`validate::is_weak_map`].
pub fn try_merge_weak_maps<K, V, I>(
    candidates: I,
) -> Result<MergedWeakMap<K, V, SharedWeakMap<K, V>>>
where
    K: ?Sized + 'static,
    V: Clone + 'static,
    I: IntoIterator<Item = Rc<dyn Any>>,
{
    let mut sources = Vec::new();
    for (index, candidate) in candidates.into_iter().enumerate() {
        let Some(source) = validate::into_weak_map::<K, V>(candidate) else {
            return Err(Error::InvalidArgument {
                operation: "merge_weak_maps",
                expected: "weak maps",
                index,
            });
        };
        sources.push(source);
    }
    return Ok(MergedWeakMap::new(sources));
}

/// Merge dynamically typed candidates into one weak set.
///
/// Fails with [`Error::InvalidArgument`] on the first candidate that is not
/// a weak set over `T`, see [`validate::is_weak_set`].
pub fn try_merge_weak_sets<T, I>(
    candidates: I,
) -> Result<MergedWeakSet<T, SharedWeakSet<T>>>
where
    T: ?Sized + 'static,
    I: IntoIterator<Item = Rc<dyn Any>>,
{
    let mut sources = Vec::new();
    for (index, candidate) in candidates.into_iter().enumerate() {
        let Some(source) = validate::into_weak_set::<T>(candidate) else {
            return Err(Error::InvalidArgument {
                operation: "merge_weak_sets",
                expected: "weak sets",
                index,
            });
        };
        sources.push(source);
    }
    return Ok(MergedWeakSet::new(sources));
}
