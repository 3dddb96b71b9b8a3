//! # In-Memory World State
//!
//! A `WorldState` backed by an ordered map. The CLI host loads one from a
//! snapshot file per invocation; tests use it directly.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::world_state::{StateEntry, StoreError, WorldState};

/// Thread-safe, cloneable in-memory world state.
///
/// Clones share the same underlying map. The lock is `parking_lot` and is
/// never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorldState {
    data: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryWorldState {
    /// Create an empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world state pre-populated with `entries`.
    pub fn from_entries(entries: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            data: Arc::new(RwLock::new(entries)),
        }
    }

    /// Copy out every entry, ordered by key.
    pub fn entries(&self) -> BTreeMap<String, Vec<u8>> {
        self.data.read().clone()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl WorldState for MemoryWorldState {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.data.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.data.write().remove(key);
        Ok(())
    }

    async fn scan(&self, start_key: &str, end_key: &str) -> Result<Vec<StateEntry>, StoreError> {
        let start = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key)
        };
        let end = if end_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end_key)
        };
        // BTreeMap::range panics on an inverted range.
        if !start_key.is_empty() && !end_key.is_empty() && start_key > end_key {
            return Ok(Vec::new());
        }

        let guard = self.data.read();
        let entries = guard
            .range::<str, _>((start, end))
            .map(|(key, value)| StateEntry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn populated() -> MemoryWorldState {
        let state = MemoryWorldState::new();
        for key in ["b", "a", "d", "c"] {
            state.put(key, key.as_bytes().to_vec()).await.unwrap();
        }
        state
    }

    fn keys(entries: &[StateEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    #[tokio::test]
    async fn get_put_delete() {
        let state = MemoryWorldState::new();
        assert_eq!(state.get("k").await.unwrap(), None);
        state.put("k", b"v".to_vec()).await.unwrap();
        assert_eq!(state.get("k").await.unwrap(), Some(b"v".to_vec()));
        state.delete("k").await.unwrap();
        assert_eq!(state.get("k").await.unwrap(), None);
        // Deleting again is fine.
        state.delete("k").await.unwrap();
    }

    #[tokio::test]
    async fn unbounded_scan_is_key_ordered() {
        let state = populated().await;
        let all = state.scan("", "").await.unwrap();
        assert_eq!(keys(&all), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn bounded_scan_is_half_open() {
        let state = populated().await;
        assert_eq!(keys(&state.scan("b", "d").await.unwrap()), vec!["b", "c"]);
        assert_eq!(keys(&state.scan("c", "").await.unwrap()), vec!["c", "d"]);
        assert_eq!(keys(&state.scan("", "b").await.unwrap()), vec!["a"]);
    }

    #[tokio::test]
    async fn degenerate_ranges_are_empty() {
        let state = populated().await;
        assert!(state.scan("c", "c").await.unwrap().is_empty());
        assert!(state.scan("d", "a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let state = MemoryWorldState::new();
        let other = state.clone();
        state.put("shared", b"1".to_vec()).await.unwrap();
        assert_eq!(other.len(), 1);
        assert!(!other.is_empty());
    }

    #[test]
    fn from_entries_round_trips() {
        let mut map = BTreeMap::new();
        map.insert("x".to_string(), b"1".to_vec());
        let state = MemoryWorldState::from_entries(map.clone());
        assert_eq!(state.entries(), map);
    }
}
