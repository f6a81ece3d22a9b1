//! AFL fuzz harness for merged weak maps and sets.
//!
//! Decodes the input into a handful of sources plus a command sequence,
//! then checks that the merged views agree with flat collections holding
//! the same entries, and that no source changed.

use std::rc::Rc;

use afl::fuzz;
use weak_merge::prelude::*;
use weak_merge::{MergedWeakMap, MergedWeakSet, WeakKeyMap, WeakKeySet};

const NUM_KEYS: usize = 16;
const NUM_SOURCES: usize = 4;

#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Seed `source` with `key -> value` before the views are built.
    Seed { source: u8, key: u8, value: u8 },
    Has { key: u8 },
    Get { key: u8 },
    Set { key: u8, value: u8 },
    Delete { key: u8 },
    /// Write straight into a source after the views exist.
    Leak { source: u8, key: u8, value: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        let (&tag, rest) = bytes.split_first()?;
        let key = |b: u8| b % NUM_KEYS as u8;
        let source = |b: u8| b % NUM_SOURCES as u8;

        match tag % 6 {
            0 if rest.len() >= 3 => {
                let op =
                    FuzzOp::Seed { source: source(rest[0]), key: key(rest[1]), value: rest[2] };
                Some((op, &rest[3..]))
            }
            1 if !rest.is_empty() => Some((FuzzOp::Has { key: key(rest[0]) }, &rest[1..])),
            2 if !rest.is_empty() => Some((FuzzOp::Get { key: key(rest[0]) }, &rest[1..])),
            3 if rest.len() >= 2 => {
                Some((FuzzOp::Set { key: key(rest[0]), value: rest[1] }, &rest[2..]))
            }
            4 if !rest.is_empty() => Some((FuzzOp::Delete { key: key(rest[0]) }, &rest[1..])),
            5 if rest.len() >= 3 => {
                let op =
                    FuzzOp::Leak { source: source(rest[0]), key: key(rest[1]), value: rest[2] };
                Some((op, &rest[3..]))
            }
            _ => None,
        }
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        let keys: Vec<Rc<u8>> = (0..NUM_KEYS as u8).map(Rc::new).collect();

        let mut ops = Vec::new();
        let mut remaining = data;
        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            ops.push(op);
            remaining = rest;
        }

        // Sources are seeded from the Seed ops; everything else runs after.
        let maps: Vec<Rc<WeakKeyMap<u8, u8>>> =
            (0..NUM_SOURCES).map(|_| Rc::new(WeakKeyMap::new())).collect();
        let sets: Vec<Rc<WeakKeySet<u8>>> =
            (0..NUM_SOURCES).map(|_| Rc::new(WeakKeySet::new())).collect();
        for op in &ops {
            if let FuzzOp::Seed { source, key, value } = *op {
                maps[source as usize].set(&keys[key as usize], value);
                sets[source as usize].add(&keys[key as usize]);
            }
        }

        let merged_map: MergedWeakMap<u8, u8> = MergedWeakMap::new(maps.iter().cloned());
        let merged_set: MergedWeakSet<u8> = MergedWeakSet::new(sets.iter().cloned());

        // Written through the view: Some(Some(v)) set, Some(None) deleted.
        let mut overlay: Vec<Option<Option<u8>>> = vec![None; NUM_KEYS];

        let expected_map = |overlay: &[Option<Option<u8>>], key: usize| match overlay[key] {
            Some(written) => written,
            None => maps.iter().rev().find_map(|m| m.get(&keys[key])),
        };
        let expected_set = |overlay: &[Option<Option<u8>>], key: usize| match overlay[key] {
            Some(written) => written.is_some(),
            None => sets.iter().any(|s| s.has(&keys[key])),
        };

        for op in &ops {
            match *op {
                FuzzOp::Seed { .. } => {}
                FuzzOp::Has { key } => {
                    let key = key as usize;
                    let map_has = expected_map(&overlay, key).is_some();
                    assert_eq!(merged_map.has(&keys[key]), map_has);
                    assert_eq!(merged_set.has(&keys[key]), expected_set(&overlay, key));
                }
                FuzzOp::Get { key } => {
                    let key = key as usize;
                    assert_eq!(merged_map.get(&keys[key]), expected_map(&overlay, key));
                }
                FuzzOp::Set { key, value } => {
                    let key = key as usize;
                    merged_map.set(&keys[key], value);
                    merged_set.add(&keys[key]);
                    overlay[key] = Some(Some(value));
                }
                FuzzOp::Delete { key } => {
                    let key = key as usize;
                    let map_had = expected_map(&overlay, key).is_some();
                    let set_had = expected_set(&overlay, key);
                    assert_eq!(merged_map.delete(&keys[key]), map_had);
                    assert_eq!(merged_set.delete(&keys[key]), set_had);
                    overlay[key] = Some(None);
                }
                FuzzOp::Leak { source, key, value } => {
                    maps[source as usize].set(&keys[key as usize], value);
                    sets[source as usize].add(&keys[key as usize]);
                }
            }
        }
    });
}
