//! Weak collections keyed by reference identity.
//!
//! Rust has no weak-keyed containers in `std`, so this module provides the
//! two primitive collections the merged views are built on and layered
//! over, together with the traits that describe them:
//!
//! - [`WeakMapLike`] / [`WeakKeyMap`]: `Rc<K>` to `V`, keys held weakly.
//! - [`WeakSetLike`] / [`WeakKeySet`]: membership of `Rc<T>`, held weakly.
//!
//! Neither collection can be iterated or asked for its size. Members are
//! compared by allocation, never by value.
//!
//! Mutating methods take `&self`: collections are shared through `Rc`
//! handles, and a mutation through one handle is visible through every
//! other, the same way a merged view observes its sources.

mod map;
mod set;
pub(crate) mod table;

use std::rc::Rc;

pub use map::WeakKeyMap;
pub use set::WeakKeySet;

/// A mapping from weakly held keys to values.
pub trait WeakMapLike<K: ?Sized, V> {
    /// Whether `key` has an entry.
    fn has(&self, key: &Rc<K>) -> bool;

    /// A clone of the value stored for `key`.
    fn get(&self, key: &Rc<K>) -> Option<V>;

    /// Store `value` for `key`, replacing any previous value.
    fn insert(&self, key: &Rc<K>, value: V);

    /// Remove the entry for `key`, returning whether it was present.
    fn delete(&self, key: &Rc<K>) -> bool;

    /// Chaining form of [`insert`](WeakMapLike::insert).
    fn set(&self, key: &Rc<K>, value: V) -> &Self
    where
        Self: Sized,
    {
        self.insert(key, value);
        return self;
    }
}

/// A set of weakly held members.
pub trait WeakSetLike<T: ?Sized> {
    /// Whether `value` is a member.
    fn has(&self, value: &Rc<T>) -> bool;

    /// Make `value` a member.
    fn insert(&self, value: &Rc<T>);

    /// Remove `value`, returning whether it was a member.
    fn delete(&self, value: &Rc<T>) -> bool;

    /// Chaining form of [`insert`](WeakSetLike::insert).
    fn add(&self, value: &Rc<T>) -> &Self
    where
        Self: Sized,
    {
        self.insert(value);
        return self;
    }
}

/// A type-erased shared weak map, usable as a merge source.
pub type SharedWeakMap<K, V> = Rc<dyn WeakMapLike<K, V>>;

/// A type-erased shared weak set, usable as a merge source.
pub type SharedWeakSet<T> = Rc<dyn WeakSetLike<T>>;

impl<K: ?Sized, V, M: WeakMapLike<K, V> + ?Sized> WeakMapLike<K, V> for Rc<M> {
    #[inline]
    fn has(&self, key: &Rc<K>) -> bool {
        return (**self).has(key);
    }

    #[inline]
    fn get(&self, key: &Rc<K>) -> Option<V> {
        return (**self).get(key);
    }

    #[inline]
    fn insert(&self, key: &Rc<K>, value: V) {
        (**self).insert(key, value);
    }

    #[inline]
    fn delete(&self, key: &Rc<K>) -> bool {
        return (**self).delete(key);
    }
}

impl<T: ?Sized, S: WeakSetLike<T> + ?Sized> WeakSetLike<T> for Rc<S> {
    #[inline]
    fn has(&self, value: &Rc<T>) -> bool {
        return (**self).has(value);
    }

    #[inline]
    fn insert(&self, value: &Rc<T>) {
        (**self).insert(value);
    }

    #[inline]
    fn delete(&self, value: &Rc<T>) -> bool {
        return (**self).delete(value);
    }
}
