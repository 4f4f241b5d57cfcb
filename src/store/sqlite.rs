use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::{EntryPatch, JournalEntry, NewEntry};

use super::{connection::Database, EntryStore, StoreError, Subscription};

struct Watcher {
    user_id: String,
    tx: mpsc::UnboundedSender<Vec<JournalEntry>>,
}

#[derive(Default)]
struct WatcherRegistry {
    next_id: u64,
    active: HashMap<u64, Watcher>,
}

fn lock_registry(registry: &Mutex<WatcherRegistry>) -> MutexGuard<'_, WatcherRegistry> {
    match registry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// SQLite-backed entry store. Every successful mutation re-queries the
/// owner's snapshot and fans it out to that owner's subscribers.
pub struct SqliteEntryStore {
    db: Database,
    watchers: Arc<Mutex<WatcherRegistry>>,
}

impl SqliteEntryStore {
    pub fn open(db_path: PathBuf) -> Result<Self, StoreError> {
        let db = Database::open(db_path).map_err(StoreError::Persistence)?;
        Ok(Self {
            db,
            watchers: Arc::new(Mutex::new(WatcherRegistry::default())),
        })
    }

    async fn notify_owner(&self, user_id: &str) {
        let snapshot = match self.db.list_entries_for_user(user_id).await {
            Ok(entries) => entries,
            Err(err) => {
                // Subscribers keep their last snapshot; the write itself
                // already succeeded.
                warn!("failed to load snapshot for user {user_id}: {err:#}");
                return;
            }
        };

        let mut registry = lock_registry(&self.watchers);
        registry.active.retain(|id, watcher| {
            if watcher.user_id != user_id {
                return true;
            }
            let delivered = watcher.tx.send(snapshot.clone()).is_ok();
            if !delivered {
                debug!("pruning dead subscriber {id} for user {user_id}");
            }
            delivered
        });
    }
}

#[async_trait]
impl EntryStore for SqliteEntryStore {
    async fn create(&self, entry: NewEntry) -> Result<String, StoreError> {
        let record = JournalEntry {
            id: Uuid::new_v4().to_string(),
            user_id: entry.user_id,
            text: entry.text,
            emotion: entry.emotion,
            keywords: entry.keywords,
            timestamp: Some(Utc::now()),
        };

        self.db
            .insert_entry(&record)
            .await
            .map_err(StoreError::Persistence)?;

        self.notify_owner(&record.user_id).await;
        Ok(record.id)
    }

    async fn update(&self, entry_id: &str, patch: EntryPatch) -> Result<(), StoreError> {
        let existing = self
            .db
            .get_entry(entry_id)
            .await
            .map_err(StoreError::Persistence)?
            .ok_or_else(|| StoreError::NotFound(entry_id.to_string()))?;

        let rows = self
            .db
            .update_entry(entry_id, patch)
            .await
            .map_err(StoreError::Persistence)?;
        if rows == 0 {
            return Err(StoreError::NotFound(entry_id.to_string()));
        }

        self.notify_owner(&existing.user_id).await;
        Ok(())
    }

    async fn remove(&self, entry_id: &str) -> Result<(), StoreError> {
        // An already-gone entry is not an error; there is nothing to undo.
        let existing = match self
            .db
            .get_entry(entry_id)
            .await
            .map_err(StoreError::Persistence)?
        {
            Some(entry) => entry,
            None => return Ok(()),
        };

        self.db
            .delete_entry(entry_id)
            .await
            .map_err(StoreError::Persistence)?;

        self.notify_owner(&existing.user_id).await;
        Ok(())
    }

    async fn subscribe(&self, user_id: &str) -> Result<Subscription, StoreError> {
        let initial = self
            .db
            .list_entries_for_user(user_id)
            .await
            .map_err(StoreError::Persistence)?;

        let (tx, rx) = mpsc::unbounded_channel();
        let watcher_id = {
            let mut registry = lock_registry(&self.watchers);
            let watcher_id = registry.next_id;
            registry.next_id += 1;
            registry.active.insert(
                watcher_id,
                Watcher {
                    user_id: user_id.to_string(),
                    tx: tx.clone(),
                },
            );
            watcher_id
        };

        // First delivery carries the current snapshot.
        let _ = tx.send(initial);

        let watchers = Arc::clone(&self.watchers);
        Ok(Subscription::new(rx, move || {
            lock_registry(&watchers).active.remove(&watcher_id);
        }))
    }
}
