//! Core of a personal emotion-journaling client: the entry lifecycle
//! (draft → remote classification → durable entry), an owner-scoped
//! realtime entry store, the session gate that scopes visibility to the
//! signed-in user, and the pure analytics folds behind the dashboard.
//!
//! Presentation is not here. A UI shell wires an [`auth::IdentityProvider`]
//! and a [`store::EntryStore`] into a [`journal::JournalController`] and an
//! [`auth::SessionGate`], then renders the snapshots and the
//! [`analytics`] aggregates however it likes.

pub mod analytics;
pub mod auth;
pub mod classifier;
pub mod config;
pub mod journal;
pub mod models;
pub mod store;

pub use analytics::{daily_activity, emotion_distribution, keyword_focus};
pub use auth::{IdentityProvider, SessionGate};
pub use classifier::{Classification, ClassifierError, EmotionClassifier, HttpClassifier};
pub use config::{ConfigError, JournalConfig};
pub use journal::{ConfirmDelete, JournalController, SaveError, SaveOutcome};
pub use models::{Emotion, EntryPatch, JournalEntry, NewEntry, UserSession};
pub use store::{EntryStore, SqliteEntryStore, StoreError, Subscription};
