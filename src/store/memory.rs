//! In-memory [`NameStore`] for tests and throwaway sessions.
//!
//! Records live in a `Vec` behind a `std::sync::RwLock`; nothing is
//! persisted.

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::NameRecord;

use super::{NameStore, Snapshots};

pub struct InMemoryNameStore {
    records: RwLock<Vec<NameRecord>>,
    snapshots: Snapshots,
}

impl InMemoryNameStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Seed the store; later duplicates of a name win.
    pub fn with_records(records: Vec<NameRecord>) -> Self {
        let mut seeded: Vec<NameRecord> = Vec::with_capacity(records.len());
        for record in records {
            seeded.retain(|r| r.name != record.name);
            seeded.push(record);
        }
        Self {
            snapshots: Snapshots::new(seeded.clone()),
            records: RwLock::new(seeded),
        }
    }
}

impl Default for InMemoryNameStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("in-memory name store lock poisoned")
}

#[async_trait]
impl NameStore for InMemoryNameStore {
    async fn get_all(&self) -> Result<Vec<NameRecord>> {
        Ok(self.records.read().map_err(poisoned)?.clone())
    }

    async fn get(&self, name: &str) -> Result<Option<NameRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().find(|r| r.name == name).cloned())
    }

    // Publishing happens under the write guard so snapshots go out in write order.
    async fn upsert(&self, record: &NameRecord) -> Result<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.retain(|r| r.name != record.name);
        records.push(record.clone());
        self.snapshots.publish(records.clone());
        Ok(())
    }

    async fn delete(&self, record: &NameRecord) -> Result<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|r| r.name != record.name);
        if records.len() != before {
            self.snapshots.publish(records.clone());
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Vec<NameRecord>> {
        self.snapshots.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(name: &str, age: i64) -> NameRecord {
        NameRecord {
            name: name.to_string(),
            age,
            gender: None,
            nationality: Vec::new(),
        }
    }

    #[tokio::test]
    async fn upsert_same_key_keeps_one_latest() {
        let store = InMemoryNameStore::new();
        store.upsert(&record("Bob", 30)).await.unwrap();
        store.upsert(&record("Amy", 20)).await.unwrap();
        store.upsert(&record("Bob", 31)).await.unwrap();

        let all = store.get_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Amy", "Bob"]);
        assert_eq!(all[1].age, 31);
    }

    #[tokio::test]
    async fn subscribers_see_initial_and_updates() {
        let store = InMemoryNameStore::with_records(vec![record("Amy", 20)]);
        let mut rx = store.subscribe();
        assert_eq!(rx.borrow().len(), 1);

        store.upsert(&record("Bob", 30)).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 2);

        store.delete(&record("Amy", 0)).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_slice(), &[record("Bob", 30)]);
    }

    #[tokio::test]
    async fn delete_missing_is_noop() {
        let store = InMemoryNameStore::new();
        let rx = store.subscribe();
        store.delete(&record("Ghost", 0)).await.unwrap();
        assert!(!rx.has_changed().unwrap());
        assert!(store.get("Ghost").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_upserts_publish_full_set() {
        for _ in 0..50 {
            let store = Arc::new(InMemoryNameStore::new());
            let handles: Vec<_> = (0..50)
                .map(|i| {
                    let store = store.clone();
                    tokio::spawn(async move { store.upsert(&record(&format!("N{}", i), i)).await })
                })
                .collect();
            for h in handles {
                h.await.unwrap().unwrap();
            }

            let all = store.get_all().await.unwrap();
            assert_eq!(all.len(), 50);
            assert_eq!(*store.subscribe().borrow(), all);
        }
    }

    #[tokio::test]
    async fn seeding_dedups() {
        let store = InMemoryNameStore::with_records(vec![record("Bob", 1), record("Bob", 2)]);
        let all = store.get_all().await.unwrap();
        assert_eq!(all, vec![record("Bob", 2)]);
    }
}
