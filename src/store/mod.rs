mod connection;
mod entries;
mod migrations;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::{EntryPatch, JournalEntry, NewEntry};

pub use sqlite::SqliteEntryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entry {0} not found")]
    NotFound(String),
    #[error("store write failed")]
    Persistence(#[source] anyhow::Error),
}

/// Live owner-scoped snapshot stream plus its release handle.
///
/// Each received item is a full snapshot of the owner's entries, delivered
/// once on subscribe and again after every mutation touching that owner.
/// Snapshot ordering is unspecified; sort before display. Unsubscribing is
/// idempotent and also happens on drop.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Vec<JournalEntry>>,
    cancel: Box<dyn Fn() + Send + Sync>,
}

impl Subscription {
    pub fn new(
        rx: mpsc::UnboundedReceiver<Vec<JournalEntry>>,
        cancel: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            rx,
            cancel: Box::new(cancel),
        }
    }

    /// Waits for the next snapshot. `None` means the store dropped the
    /// subscription (store shut down or unsubscribed elsewhere).
    pub async fn recv(&mut self) -> Option<Vec<JournalEntry>> {
        self.rx.recv().await
    }

    pub fn unsubscribe(&self) {
        (self.cancel)();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        (self.cancel)();
    }
}

/// Durable, owner-partitioned collection of journal entries with realtime
/// snapshot delivery.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Persists a new entry, assigning a fresh id and the creation time.
    async fn create(&self, entry: NewEntry) -> Result<String, StoreError>;

    /// Overwrites text/emotion/keywords of an existing entry; the id, owner,
    /// and creation time are untouched. `NotFound` if the id is absent.
    async fn update(&self, entry_id: &str, patch: EntryPatch) -> Result<(), StoreError>;

    /// Deletes an entry. Removing an id that is already gone is a no-op.
    async fn remove(&self, entry_id: &str) -> Result<(), StoreError>;

    /// Opens a snapshot stream for one owner's entries. Fires immediately
    /// with the current snapshot.
    async fn subscribe(&self, user_id: &str) -> Result<Subscription, StoreError>;
}
