//! In-memory counter registry.
//!
//! Counters live in a sharded `DashMap<String, u64>`. Each operation holds at
//! most one shard guard for its whole check-and-mutate step, so operations on
//! the same name serialize while operations on other shards proceed.
//!
//! Lookups of an unknown name are reported as `NameConflict`, the same kind
//! as a duplicate create.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Result, TallyError};

/// Snapshot of one counter, detached from the registry.
///
/// Serializes as a single-entry object keyed by the name: `{"foo": 3}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub name: String,
    pub count: u64,
}

impl Counter {
    fn new(name: &str, count: u64) -> Self {
        Self { name: name.to_owned(), count }
    }
}

impl Serialize for Counter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.count)?;
        map.end()
    }
}

/// Body of a read: the count rendered as a string, `{"count": "3"}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CountReading {
    pub count: String,
}

impl From<u64> for CountReading {
    fn from(count: u64) -> Self {
        Self { count: count.to_string() }
    }
}

/// Registry of named counters:
/// - `name -> count`
#[derive(Default)]
pub struct CounterRegistry {
    counters: DashMap<String, u64>,
}

impl CounterRegistry {
    pub fn new() -> Self {
        Self { counters: DashMap::new() }
    }

    /// Register `name` at zero. Fails if the name is already taken; the
    /// existing counter is left untouched.
    pub fn create(&self, name: &str) -> Result<Counter> {
        match self.counters.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(TallyError::exists(name)),
            Entry::Vacant(slot) => {
                slot.insert(0);
                Ok(Counter::new(name, 0))
            }
        }
    }

    /// Add one to an existing counter and return the new value.
    pub fn increment(&self, name: &str) -> Result<Counter> {
        let mut count = self
            .counters
            .get_mut(name)
            .ok_or_else(|| TallyError::missing(name))?;
        // saturates at u64::MAX
        *count = count.saturating_add(1);
        Ok(Counter::new(name, *count))
    }

    /// Current value of an existing counter.
    pub fn read(&self, name: &str) -> Result<u64> {
        self.counters
            .get(name)
            .map(|c| *c.value())
            .ok_or_else(|| TallyError::missing(name))
    }

    /// Remove `name` if present. Returns whether a counter was removed;
    /// removing an unknown name is not an error.
    pub fn delete(&self, name: &str) -> bool {
        self.counters.remove(name).is_some()
    }

    /// Number of live counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
