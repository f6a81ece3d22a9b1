use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::TableConfig;

use super::WeakSetLike;
use super::table::Table;

/// A set of `Rc<T>` that does not keep its members alive.
///
/// Membership is by allocation: two `Rc`s with equal contents are
/// different members.
pub struct WeakKeySet<T: ?Sized> {
    table: RefCell<Table<T, ()>>,
}

impl<T: ?Sized> Default for WeakKeySet<T> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<T: ?Sized> WeakKeySet<T> {
    /// Create an empty set.
    pub fn new() -> WeakKeySet<T> {
        return Self::with_config(&TableConfig::default());
    }

    /// Create an empty set with custom table settings.
    pub fn with_config(config: &TableConfig) -> WeakKeySet<T> {
        return WeakKeySet { table: RefCell::new(Table::new(config)) };
    }

    /// Create a set holding `values`.
    pub fn from_values<I>(values: I) -> WeakKeySet<T>
    where
        I: IntoIterator<Item = Rc<T>>,
    {
        let set = Self::new();
        for value in values {
            set.insert(&value);
        }
        return set;
    }
}

impl<T: ?Sized> WeakSetLike<T> for WeakKeySet<T> {
    fn has(&self, value: &Rc<T>) -> bool {
        return self.table.borrow().contains(value);
    }

    fn insert(&self, value: &Rc<T>) {
        let mut table = self.table.borrow_mut();
        table.insert(value, ());
        // Sweeping a set only drops `Weak`s, which never runs user code.
        table.sweep_if_due();
    }

    fn delete(&self, value: &Rc<T>) -> bool {
        return self.table.borrow_mut().remove(value).is_some();
    }
}

impl<T: ?Sized> fmt::Debug for WeakKeySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_struct("WeakKeySet").finish_non_exhaustive();
    }
}
