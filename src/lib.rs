//! Weak Merge - read-through views over several weak collections.
//!
//! A [`MergedWeakMap`] presents any number of weak-keyed maps as a single
//! map, and a [`MergedWeakSet`] does the same for weak sets. The view owns
//! a write layer and a set of tombstones; the source collections are only
//! ever read. Keys and members are compared by `Rc` identity and are never
//! kept alive by any collection in this crate.
//!
//! # Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use weak_merge::prelude::*;
//! use weak_merge::{merge_weak_maps, MergedWeakMap, WeakKeyMap};
//!
//! let (a, b, c, d) = (Rc::new("a"), Rc::new("b"), Rc::new("c"), Rc::new("d"));
//!
//! let first = Rc::new(WeakKeyMap::from_entries([(a.clone(), 1), (b.clone(), 2)]));
//! let second = Rc::new(WeakKeyMap::from_entries([(c.clone(), 3)]));
//!
//! let merged: MergedWeakMap<&str, i32> = merge_weak_maps([first.clone(), second.clone()]);
//! assert_eq!(merged.get(&c), Some(3));
//!
//! // Deleting hides the key from the view only.
//! merged.delete(&a);
//! assert!(!merged.has(&a));
//! assert!(first.has(&a));
//!
//! // Writes land in the view's own layer.
//! merged.set(&d, 5);
//! assert_eq!(merged.get(&d), Some(5));
//! assert!(!first.has(&d) && !second.has(&d));
//! ```

pub mod config;
pub mod error;
pub mod merge;
pub mod validate;
pub mod weak;

pub use config::TableConfig;
pub use error::Error;
pub use error::Result;
pub use merge::MergedWeakMap;
pub use merge::MergedWeakSet;
pub use merge::merge_weak_maps;
pub use merge::merge_weak_sets;
pub use merge::try_merge_weak_maps;
pub use merge::try_merge_weak_sets;
pub use weak::SharedWeakMap;
pub use weak::SharedWeakSet;
pub use weak::WeakKeyMap;
pub use weak::WeakKeySet;
pub use weak::WeakMapLike;
pub use weak::WeakSetLike;

/// The collection traits, for glob import.
pub mod prelude {
    pub use crate::weak::WeakMapLike;
    pub use crate::weak::WeakSetLike;
}
