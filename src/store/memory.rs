use super::{StoreError, UpstreamStore};
use std::collections::{BTreeMap, BTreeSet};

/// In-process set store with Redis `SADD` semantics
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    sets: BTreeMap<String, BTreeSet<String>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members of the set `key`, in sorted order
    pub fn members(&self, key: &str) -> Vec<&str> {
        self.sets
            .get(key)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names of all non-empty sets
    pub fn keys(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    /// Number of add operations performed, including ones that found the
    /// member already present
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl UpstreamStore for MemoryStore {
    fn add_member(&mut self, key: &str, member: &str) -> Result<bool, StoreError> {
        self.writes += 1;
        Ok(self
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string()))
    }
}
