use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};

use async_trait::async_trait;
use log::{debug, info, warn};
use thiserror::Error;

use crate::classifier::{ClassifierError, EmotionClassifier};
use crate::models::{EntryPatch, JournalEntry, NewEntry};
use crate::store::{EntryStore, StoreError};

use super::editor::EditorState;

#[derive(Debug, Error)]
pub enum SaveError {
    /// The analysis call did not succeed; nothing was written.
    #[error("entry analysis failed")]
    Classification(#[source] ClassifierError),
    /// Analysis succeeded but the entry was not durably saved; the caller
    /// may retry with the preserved draft.
    #[error("entry could not be saved")]
    Persistence(#[source] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(String),
    Updated(String),
    /// Empty draft or a save already in flight; nothing happened.
    Skipped,
}

/// External yes/no prompt guarding entry deletion.
#[async_trait]
pub trait ConfirmDelete: Send + Sync {
    async fn confirm(&self, entry: &JournalEntry) -> bool;
}

/// Drives a draft through classification into the store, for one signed-in
/// user. At most one save is in flight per controller; extra calls are
/// ignored, not queued.
#[derive(Clone)]
pub struct JournalController {
    user_id: String,
    store: Arc<dyn EntryStore>,
    classifier: Arc<dyn EmotionClassifier>,
    editor: Arc<Mutex<EditorState>>,
    saving: Arc<AtomicBool>,
}

impl JournalController {
    pub fn new(
        user_id: impl Into<String>,
        store: Arc<dyn EntryStore>,
        classifier: Arc<dyn EmotionClassifier>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            store,
            classifier,
            editor: Arc::new(Mutex::new(EditorState::default())),
            saving: Arc::new(AtomicBool::new(false)),
        }
    }

    fn editor(&self) -> MutexGuard<'_, EditorState> {
        match self.editor.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.editor().draft = text.into();
    }

    pub fn draft(&self) -> String {
        self.editor().draft.clone()
    }

    pub fn begin_edit(&self, entry: &JournalEntry) {
        self.editor().begin_edit(entry);
    }

    /// Pure local reset; no store or network effect.
    pub fn cancel_edit(&self) {
        self.editor().reset();
    }

    pub fn editing_id(&self) -> Option<String> {
        self.editor().editing.as_ref().map(|entry| entry.id.clone())
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Classifies the current draft and writes it through the store, as a
    /// create or as an update of the active edit target. On failure the
    /// draft and edit target survive for a retry.
    pub async fn save(&self) -> Result<SaveOutcome, SaveError> {
        let (text, editing) = {
            let editor = self.editor();
            (editor.draft.clone(), editor.editing.clone())
        };

        if text.trim().is_empty() {
            return Ok(SaveOutcome::Skipped);
        }

        if self
            .saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("save ignored; another save is in flight");
            return Ok(SaveOutcome::Skipped);
        }

        let result = self.classify_and_persist(text, editing).await;
        self.saving.store(false, Ordering::SeqCst);

        match result {
            Ok(outcome) => {
                self.editor().reset();
                Ok(outcome)
            }
            Err(err) => {
                warn!("save failed, draft preserved: {err}");
                Err(err)
            }
        }
    }

    async fn classify_and_persist(
        &self,
        text: String,
        editing: Option<JournalEntry>,
    ) -> Result<SaveOutcome, SaveError> {
        let classification = self
            .classifier
            .analyze(&text)
            .await
            .map_err(SaveError::Classification)?;

        match editing {
            Some(target) => {
                let patch = EntryPatch {
                    text,
                    emotion: classification.emotion,
                    keywords: classification.keywords,
                };
                self.store
                    .update(&target.id, patch)
                    .await
                    .map_err(SaveError::Persistence)?;
                info!("updated entry {}", target.id);
                Ok(SaveOutcome::Updated(target.id))
            }
            None => {
                let entry = NewEntry {
                    user_id: self.user_id.clone(),
                    text,
                    emotion: classification.emotion,
                    keywords: classification.keywords,
                };
                let id = self
                    .store
                    .create(entry)
                    .await
                    .map_err(SaveError::Persistence)?;
                info!("created entry {id}");
                Ok(SaveOutcome::Created(id))
            }
        }
    }

    /// Deletes an entry after the external confirmation boundary says yes.
    /// Returns whether the entry was removed; a declined prompt means zero
    /// store interaction. Irreversible.
    pub async fn delete(
        &self,
        entry: &JournalEntry,
        prompt: &dyn ConfirmDelete,
    ) -> Result<bool, StoreError> {
        if !prompt.confirm(entry).await {
            return Ok(false);
        }

        self.store.remove(&entry.id).await?;
        info!("deleted entry {}", entry.id);
        Ok(true)
    }
}
