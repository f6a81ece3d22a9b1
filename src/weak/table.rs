//! Identity table shared by [`WeakKeyMap`](super::WeakKeyMap) and
//! [`WeakKeySet`](super::WeakKeySet).
//!
//! Slots are keyed by the address of the key's allocation. A slot holds a
//! `Weak<K>`, which keeps the allocation (though not the value) alive, so
//! no other `Rc` can be created at the same address while the slot exists.
//! An address hit is therefore always the very same key.

use std::rc::Rc;
use std::rc::Weak;

use rustc_hash::FxHashMap;

use crate::config::TableConfig;

/// The identity of a key: the address of its `Rc` allocation.
#[inline]
pub(crate) fn address<K: ?Sized>(key: &Rc<K>) -> usize {
    return Rc::as_ptr(key).cast::<()>() as usize;
}

/// One entry of the table.
pub(crate) struct Slot<K: ?Sized, V> {
    key: Weak<K>,
    value: V,
}

impl<K: ?Sized, V> Slot<K, V> {
    #[inline]
    fn is_dead(&self) -> bool {
        return self.key.strong_count() == 0;
    }
}

pub(crate) struct Table<K: ?Sized, V> {
    slots: FxHashMap<usize, Slot<K, V>>,
    /// Insertions since the last sweep.
    inserts: usize,
    /// Insertions that trigger the next sweep.
    next_sweep: usize,
    min_sweep_interval: usize,
}

impl<K: ?Sized, V> Table<K, V> {
    pub(crate) fn new(config: &TableConfig) -> Table<K, V> {
        let mut slots = FxHashMap::default();
        slots.reserve(config.initial_capacity);
        let min_sweep_interval = config.min_sweep_interval.max(1);
        return Table {
            slots,
            inserts: 0,
            next_sweep: min_sweep_interval,
            min_sweep_interval,
        };
    }

    #[inline]
    pub(crate) fn contains(&self, key: &Rc<K>) -> bool {
        return self.slots.contains_key(&address(key));
    }

    #[inline]
    pub(crate) fn get(&self, key: &Rc<K>) -> Option<&V> {
        return self.slots.get(&address(key)).map(|slot| &slot.value);
    }

    /// Insert or overwrite, returning the displaced value.
    ///
    /// The caller must drop the result only after releasing any borrow of
    /// the table.
    pub(crate) fn insert(&mut self, key: &Rc<K>, value: V) -> Option<V> {
        self.inserts += 1;
        let slot = Slot { key: Rc::downgrade(key), value };
        return self.slots.insert(address(key), slot).map(|old| old.value);
    }

    pub(crate) fn remove(&mut self, key: &Rc<K>) -> Option<V> {
        return self.slots.remove(&address(key)).map(|slot| slot.value);
    }

    /// Reclaim dead slots once enough insertions have accumulated.
    ///
    /// Returns the reclaimed slots so they can be dropped outside the
    /// borrow, since dropping a value may run arbitrary code.
    pub(crate) fn sweep_if_due(&mut self) -> Vec<Slot<K, V>> {
        if self.inserts < self.next_sweep {
            return Vec::new();
        }

        let dead: Vec<usize> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.is_dead())
            .map(|(&addr, _)| addr)
            .collect();

        let mut swept = Vec::with_capacity(dead.len());
        for addr in dead {
            if let Some(slot) = self.slots.remove(&addr) {
                swept.push(slot);
            }
        }

        self.inserts = 0;
        self.next_sweep = self.slots.len().max(self.min_sweep_interval);
        if !swept.is_empty() {
            log::trace!(
                "swept {} dead weak entries, {} live",
                swept.len(),
                self.slots.len()
            );
        }
        return swept;
    }

    /// Number of slots, dead ones included.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        return self.slots.len();
    }
}
