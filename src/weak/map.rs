use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::TableConfig;

use super::WeakMapLike;
use super::table::Table;

/// A map from `Rc<K>` to `V` that does not keep its keys alive.
///
/// Keys are compared by allocation. Once the last strong reference to a
/// key is dropped, its entry can no longer be observed; the slot and its
/// value are reclaimed by a later sweep (see [`TableConfig`]).
///
/// Values are held strongly. A value that owns an `Rc` to its own key keeps
/// that key alive for as long as the entry exists.
///
/// ```
/// use std::rc::Rc;
/// use weak_merge::prelude::*;
/// use weak_merge::WeakKeyMap;
///
/// let map: WeakKeyMap<&str, u32> = WeakKeyMap::new();
/// let key = Rc::new("key");
///
/// map.set(&key, 1).set(&key, 2);
/// assert_eq!(map.get(&key), Some(2));
/// assert!(!map.has(&Rc::new("key")));
/// ```
pub struct WeakKeyMap<K: ?Sized, V> {
    table: RefCell<Table<K, V>>,
}

impl<K: ?Sized, V> Default for WeakKeyMap<K, V> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<K: ?Sized, V> WeakKeyMap<K, V> {
    /// Create an empty map.
    pub fn new() -> WeakKeyMap<K, V> {
        return Self::with_config(&TableConfig::default());
    }

    /// Create an empty map with custom table settings.
    pub fn with_config(config: &TableConfig) -> WeakKeyMap<K, V> {
        return WeakKeyMap { table: RefCell::new(Table::new(config)) };
    }

    /// Create a map holding `entries`; later entries overwrite earlier ones.
    pub fn from_entries<I>(entries: I) -> WeakKeyMap<K, V>
    where
        I: IntoIterator<Item = (Rc<K>, V)>,
    {
        let map = Self::new();
        for (key, value) in entries {
            map.store(&key, value);
        }
        return map;
    }

    fn store(&self, key: &Rc<K>, value: V) {
        // Bound so they drop after the borrow guard.
        let (_displaced, _swept) = {
            let mut table = self.table.borrow_mut();
            let displaced = table.insert(key, value);
            (displaced, table.sweep_if_due())
        };
    }
}

impl<K: ?Sized, V: Clone> WeakMapLike<K, V> for WeakKeyMap<K, V> {
    fn has(&self, key: &Rc<K>) -> bool {
        return self.table.borrow().contains(key);
    }

    fn get(&self, key: &Rc<K>) -> Option<V> {
        return self.table.borrow().get(key).cloned();
    }

    fn insert(&self, key: &Rc<K>, value: V) {
        self.store(key, value);
    }

    fn delete(&self, key: &Rc<K>) -> bool {
        let removed = self.table.borrow_mut().remove(key);
        return removed.is_some();
    }
}

impl<K: ?Sized, V> fmt::Debug for WeakKeyMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_struct("WeakKeyMap").finish_non_exhaustive();
    }
}
