//! Persistent cache of looked-up names.
//!
//! The [`NameStore`] trait is the storage seam used by the view controller.
//! Records are keyed by their normalized name and kept in write order
//! (oldest first). Re-inserting a name replaces the record and moves it to
//! the end.
//!
//! Every store also publishes its full ordered contents through a
//! `tokio::sync::watch` channel: the value seen at subscription time is the
//! current state and each mutation replaces it with a fresh snapshot.
//!
//! | Implementation | Use |
//! |----------------|-----|
//! | [`SqliteNameStore`] | Persistent cache backing the CLI |
//! | [`InMemoryNameStore`] | Tests and throwaway sessions |

pub mod memory;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::NameRecord;

pub use memory::InMemoryNameStore;
pub use sqlite::SqliteNameStore;

/// Keyed, ordered, observable storage for [`NameRecord`]s.
#[async_trait]
pub trait NameStore: Send + Sync {
    /// All records in write order (oldest first).
    async fn get_all(&self) -> Result<Vec<NameRecord>>;

    /// The record stored under `name`, if any.
    async fn get(&self, name: &str) -> Result<Option<NameRecord>>;

    /// Insert or replace the record keyed by `record.name`.
    async fn upsert(&self, record: &NameRecord) -> Result<()>;

    /// Remove the record keyed by `record.name`. Absent keys are a no-op.
    async fn delete(&self, record: &NameRecord) -> Result<()>;

    /// Observe the ordered contents of the store.
    fn subscribe(&self) -> watch::Receiver<Vec<NameRecord>>;
}

/// Snapshot publisher shared by the store implementations.
pub(crate) struct Snapshots {
    tx: watch::Sender<Vec<NameRecord>>,
}

impl Snapshots {
    pub(crate) fn new(initial: Vec<NameRecord>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub(crate) fn publish(&self, records: Vec<NameRecord>) {
        // send_replace stores the value even when nobody is subscribed
        self.tx.send_replace(records);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Vec<NameRecord>> {
        self.tx.subscribe()
    }
}
