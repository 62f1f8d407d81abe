//! Lookup index construction
//!
//! Two index shapes cover every join in the pipeline:
//!
//! - [`UniqueIndex`] maps a normalized key to one reference record. Key
//!   collisions are resolved by a [`CollisionPolicy`].
//! - [`MultiIndex`] maps a normalized key to every record producing it, in
//!   source order. The first record is the primary candidate.
//!
//! Indices borrow the loaded collection and are immutable once built.

use std::collections::hash_map::Entry;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde_json::Value;
use smallvec::SmallVec;

use super::normalize::{KeySet, normalize_keys};
use crate::error::{EnrichError, Result};

/// Extracts one raw key field from a reference record
pub type KeyRule<T> = fn(&T) -> Option<&Value>;

/// What a single-valued index does when two records produce the same key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// The later record replaces the earlier one
    #[default]
    LastWins,
    /// The earlier record is kept
    FirstWins,
    /// The build fails with [`EnrichError::DuplicateKey`]
    Reject,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "last-wins" | "last" => Ok(Self::LastWins),
            "first-wins" | "first" => Ok(Self::FirstWins),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown collision policy '{other}'")),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LastWins => "last-wins",
            Self::FirstWins => "first-wins",
            Self::Reject => "reject",
        })
    }
}

/// All distinct keys a record produces under the given rules, in rule order
fn record_keys<T>(record: &T, rules: &[KeyRule<T>]) -> KeySet {
    let mut keys = KeySet::new();
    for rule in rules {
        for key in normalize_keys(rule(record)) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

/// Single-valued lookup index
#[derive(Debug, PartialEq)]
pub struct UniqueIndex<'a, T> {
    name: &'static str,
    entries: FxHashMap<String, &'a T>,
    collisions: usize,
}

impl<'a, T> UniqueIndex<'a, T> {
    /// Build the index from a reference collection
    ///
    /// Records whose rules yield no key contribute nothing. Collisions between
    /// different records are counted and resolved by `policy`.
    pub fn build(
        name: &'static str,
        records: &'a [T],
        rules: &[KeyRule<T>],
        policy: CollisionPolicy,
    ) -> Result<Self> {
        let mut entries: FxHashMap<String, &'a T> = FxHashMap::default();
        let mut collisions = 0usize;
        let mut keyless = 0usize;

        for record in records {
            let keys = record_keys(record, rules);
            if keys.is_empty() {
                keyless += 1;
                continue;
            }

            for key in keys {
                match entries.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(record);
                    }
                    Entry::Occupied(mut slot) => {
                        if std::ptr::eq(*slot.get(), record) {
                            continue;
                        }
                        collisions += 1;
                        log::debug!("Key '{}' collides in index '{name}'", slot.key());
                        match policy {
                            CollisionPolicy::LastWins => {
                                slot.insert(record);
                            }
                            CollisionPolicy::FirstWins => {}
                            CollisionPolicy::Reject => {
                                return Err(EnrichError::DuplicateKey {
                                    index: name,
                                    key: slot.key().clone(),
                                });
                            }
                        }
                    }
                }
            }
        }

        log::info!(
            "Indexed {} keys for {name} ({} records, {keyless} without key)",
            entries.len(),
            records.len()
        );
        if collisions > 0 {
            log::warn!("{collisions} key collisions in {name} resolved as {policy}");
        }

        Ok(Self {
            name,
            entries,
            collisions,
        })
    }

    /// Record stored under a normalized key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a T> {
        self.entries.get(key).copied()
    }

    /// First key of `keys` present in the index, with its record
    #[must_use]
    pub fn lookup_any<'k>(&self, keys: &'k [String]) -> Option<(&'k str, &'a T)> {
        keys.iter()
            .find_map(|key| self.get(key).map(|record| (key.as_str(), record)))
    }

    /// Name used in logs and errors
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of collisions seen during the build
    #[must_use]
    pub const fn collisions(&self) -> usize {
        self.collisions
    }

    /// Indexed keys in sorted order
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries
            .keys()
            .map(String::as_str)
            .sorted_unstable()
            .collect_vec()
    }
}

/// Every candidate stored under one key of a [`MultiIndex`]
#[derive(Debug)]
pub struct Candidates<'i, 'a, T> {
    primary: &'a T,
    all: &'i [&'a T],
}

impl<'i, 'a, T> Candidates<'i, 'a, T> {
    fn from_slice(all: &'i [&'a T]) -> Option<Self> {
        all.first().map(|&primary| Self { primary, all })
    }

    /// The authoritative candidate: first in source order
    #[must_use]
    pub const fn primary(&self) -> &'a T {
        self.primary
    }

    /// How many records share the key
    #[must_use]
    pub const fn count(&self) -> usize {
        self.all.len()
    }

    /// Whether more than one record shares the key
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        self.all.len() > 1
    }

    /// All candidates in source order
    pub fn iter(&self) -> impl Iterator<Item = &'a T> {
        self.all.iter().copied()
    }
}

/// Ordered one-to-many lookup index
#[derive(Debug, PartialEq)]
pub struct MultiIndex<'a, T> {
    name: &'static str,
    entries: FxHashMap<String, SmallVec<[&'a T; 1]>>,
}

impl<'a, T> MultiIndex<'a, T> {
    /// Build the index from a reference collection
    ///
    /// Every record is appended to the list of each key it produces, so
    /// lists preserve the order of the collection.
    #[must_use]
    pub fn build(name: &'static str, records: &'a [T], rules: &[KeyRule<T>]) -> Self {
        let mut entries: FxHashMap<String, SmallVec<[&'a T; 1]>> = FxHashMap::default();

        for record in records {
            for key in record_keys(record, rules) {
                entries.entry(key).or_default().push(record);
            }
        }

        let ambiguous = entries.values().filter(|list| list.len() > 1).count();
        log::info!(
            "Indexed {} keys for {name} ({} records, {ambiguous} keys with several candidates)",
            entries.len(),
            records.len()
        );

        Self { name, entries }
    }

    /// Candidates stored under a normalized key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Candidates<'_, 'a, T>> {
        self.entries
            .get(key)
            .and_then(|list| Candidates::from_slice(list.as_slice()))
    }

    /// First key of `keys` present in the index, with its candidates
    #[must_use]
    pub fn lookup_any<'k>(&self, keys: &'k [String]) -> Option<(&'k str, Candidates<'_, 'a, T>)> {
        keys.iter()
            .find_map(|key| self.get(key).map(|found| (key.as_str(), found)))
    }

    /// Name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
