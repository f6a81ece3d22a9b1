use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::config::TableConfig;
use crate::weak::WeakKeyMap;
use crate::weak::WeakKeySet;
use crate::weak::WeakMapLike;
use crate::weak::WeakSetLike;

/// A read-through view merging several weak maps into one.
///
/// Reads consult, in order: the tombstones of keys deleted through the
/// view, the view's own write layer, then the sources from the
/// last-supplied to the first. Writes and deletes only touch the view's
/// own layers, so the sources are never mutated, while later changes to a
/// source stay visible for keys the view has not touched.
///
/// ```
/// use std::rc::Rc;
/// use weak_merge::prelude::*;
/// use weak_merge::{MergedWeakMap, WeakKeyMap};
///
/// let (a, b) = (Rc::new("a"), Rc::new("b"));
/// let first = Rc::new(WeakKeyMap::from_entries([(a.clone(), 1), (b.clone(), 2)]));
/// let second = Rc::new(WeakKeyMap::from_entries([(a.clone(), 10)]));
///
/// let merged: MergedWeakMap<&str, i32> = MergedWeakMap::new([first.clone(), second]);
/// assert_eq!(merged.get(&a), Some(10));
///
/// merged.delete(&b);
/// assert!(!merged.has(&b));
/// assert!(first.has(&b));
/// ```
pub struct MergedWeakMap<K: ?Sized, V, S = Rc<WeakKeyMap<K, V>>> {
    written: WeakKeyMap<K, V>,
    deleted: WeakKeySet<K>,
    /// Highest priority first.
    sources: SmallVec<[S; 4]>,
}

impl<K: ?Sized, V, S> MergedWeakMap<K, V, S>
where
    S: WeakMapLike<K, V>,
{
    /// Merge `sources`; on conflicting keys the later source wins.
    pub fn new<I>(sources: I) -> MergedWeakMap<K, V, S>
    where
        I: IntoIterator<Item = S>,
    {
        return Self::with_config(sources, &TableConfig::default());
    }

    /// Merge `sources`, sizing the write and tombstone layers with `config`.
    pub fn with_config<I>(sources: I, config: &TableConfig) -> MergedWeakMap<K, V, S>
    where
        I: IntoIterator<Item = S>,
    {
        let mut sources: SmallVec<[S; 4]> = sources.into_iter().collect();
        sources.reverse();
        log::debug!("merging {} weak maps", sources.len());

        return MergedWeakMap {
            written: WeakKeyMap::with_config(config),
            deleted: WeakKeySet::with_config(config),
            sources,
        };
    }
}

impl<K: ?Sized, V: Clone, S> WeakMapLike<K, V> for MergedWeakMap<K, V, S>
where
    S: WeakMapLike<K, V>,
{
    fn has(&self, key: &Rc<K>) -> bool {
        if self.deleted.has(key) {
            return false;
        }
        return self.written.has(key) || self.sources.iter().any(|source| source.has(key));
    }

    fn get(&self, key: &Rc<K>) -> Option<V> {
        if self.deleted.has(key) {
            return None;
        }
        if let Some(value) = self.written.get(key) {
            return Some(value);
        }
        return self.sources.iter().find_map(|source| source.get(key));
    }

    fn insert(&self, key: &Rc<K>, value: V) {
        self.deleted.delete(key);
        self.written.insert(key, value);
    }

    /// Hide `key` from the view. Returns whether the view held it.
    fn delete(&self, key: &Rc<K>) -> bool {
        let present = self.has(key);
        self.written.delete(key);
        self.deleted.insert(key);
        return present;
    }
}

impl<K: ?Sized, V, S> fmt::Debug for MergedWeakMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_struct("MergedWeakMap")
            .field("sources", &self.sources.len())
            .finish_non_exhaustive();
    }
}
