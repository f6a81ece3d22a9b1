use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::config::TableConfig;
use crate::weak::WeakKeySet;
use crate::weak::WeakSetLike;

/// A read-through view merging several weak sets into one.
///
/// A value is a member when it was added through the view, or when any
/// source holds it, unless it was deleted through the view since. Sources
/// are consulted in the order supplied; membership carries no payload, so the
/// order has no observable effect.
pub struct MergedWeakSet<T: ?Sized, S = Rc<WeakKeySet<T>>> {
    added: WeakKeySet<T>,
    deleted: WeakKeySet<T>,
    sources: SmallVec<[S; 4]>,
}

impl<T: ?Sized, S> MergedWeakSet<T, S>
where
    S: WeakSetLike<T>,
{
    /// Merge `sources` into one set.
    pub fn new<I>(sources: I) -> MergedWeakSet<T, S>
    where
        I: IntoIterator<Item = S>,
    {
        return Self::with_config(sources, &TableConfig::default());
    }

    /// Merge `sources`, sizing the write and tombstone layers with `config`.
    pub fn with_config<I>(sources: I, config: &TableConfig) -> MergedWeakSet<T, S>
    where
        I: IntoIterator<Item = S>,
    {
        let sources: SmallVec<[S; 4]> = sources.into_iter().collect();
        log::debug!("merging {} weak sets", sources.len());

        return MergedWeakSet {
            added: WeakKeySet::with_config(config),
            deleted: WeakKeySet::with_config(config),
            sources,
        };
    }
}

impl<T: ?Sized, S> WeakSetLike<T> for MergedWeakSet<T, S>
where
    S: WeakSetLike<T>,
{
    fn has(&self, value: &Rc<T>) -> bool {
        if self.deleted.has(value) {
            return false;
        }
        return self.added.has(value) || self.sources.iter().any(|source| source.has(value));
    }

    fn insert(&self, value: &Rc<T>) {
        self.deleted.delete(value);
        self.added.insert(value);
    }

    fn delete(&self, value: &Rc<T>) -> bool {
        let present = self.has(value);
        self.added.delete(value);
        self.deleted.insert(value);
        return present;
    }
}

impl<T: ?Sized, S> fmt::Debug for MergedWeakSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_struct("MergedWeakSet")
            .field("sources", &self.sources.len())
            .finish_non_exhaustive();
    }
}
