use std::sync::Arc;

use log::{info, warn};
use tokio::{sync::watch, task::JoinHandle};

use crate::models::{sort_newest_first, JournalEntry, UserSession};
use crate::store::EntryStore;

/// Ties the store subscription to the session lifecycle: while a user is
/// signed in their entries are streamed, sorted newest-first, onto a watch
/// channel; signing out unsubscribes and clears the published snapshot.
///
/// A failed or ended subscription keeps the last-known snapshot on display
/// and waits for the next session transition; it never tears the gate down.
pub struct SessionGate {
    snapshots: watch::Receiver<Vec<JournalEntry>>,
    task: JoinHandle<()>,
}

impl SessionGate {
    pub fn spawn(
        store: Arc<dyn EntryStore>,
        sessions: watch::Receiver<Option<UserSession>>,
    ) -> Self {
        let (tx, rx) = watch::channel(Vec::new());
        let task = tokio::spawn(run_gate(store, sessions, tx));
        Self {
            snapshots: rx,
            task,
        }
    }

    /// Display feed: the signed-in user's entries, newest first; empty when
    /// signed out.
    pub fn snapshots(&self) -> watch::Receiver<Vec<JournalEntry>> {
        self.snapshots.clone()
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_gate(
    store: Arc<dyn EntryStore>,
    mut sessions: watch::Receiver<Option<UserSession>>,
    tx: watch::Sender<Vec<JournalEntry>>,
) {
    loop {
        let current = sessions.borrow_and_update().clone();
        match current {
            None => {
                let _ = tx.send(Vec::new());
                if sessions.changed().await.is_err() {
                    break;
                }
            }
            Some(user) => match store.subscribe(&user.user_id).await {
                Ok(mut subscription) => {
                    info!("watching entries for user {}", user.user_id);
                    loop {
                        tokio::select! {
                            changed = sessions.changed() => {
                                subscription.unsubscribe();
                                if changed.is_err() {
                                    return;
                                }
                                break;
                            }
                            snapshot = subscription.recv() => match snapshot {
                                Some(mut entries) => {
                                    sort_newest_first(&mut entries);
                                    let _ = tx.send(entries);
                                }
                                None => {
                                    warn!(
                                        "entry subscription for user {} ended; keeping last snapshot",
                                        user.user_id
                                    );
                                    if sessions.changed().await.is_err() {
                                        return;
                                    }
                                    break;
                                }
                            }
                        }
                    }
                }
                Err(err) => {
                    warn!("could not subscribe entries for user {}: {err}", user.user_id);
                    if sessions.changed().await.is_err() {
                        break;
                    }
                }
            },
        }
    }
}
