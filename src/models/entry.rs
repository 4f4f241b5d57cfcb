use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emotion label attached to an entry by the analysis service.
///
/// The service normally answers with one of the five core labels, but it can
/// emit others (Fear, Surprise, Disgust, ...). Those are carried verbatim in
/// `Other` so that tallies never silently drop a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Love,
    Neutral,
    Other(String),
}

impl Emotion {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Joy" => Emotion::Joy,
            "Sadness" => Emotion::Sadness,
            "Anger" => Emotion::Anger,
            "Love" => Emotion::Love,
            "Neutral" => Emotion::Neutral,
            other => Emotion::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Emotion::Joy => "Joy",
            Emotion::Sadness => "Sadness",
            Emotion::Anger => "Anger",
            Emotion::Love => "Love",
            Emotion::Neutral => "Neutral",
            Emotion::Other(label) => label,
        }
    }
}

impl From<String> for Emotion {
    fn from(label: String) -> Self {
        Emotion::from_label(&label)
    }
}

impl From<Emotion> for String {
    fn from(emotion: Emotion) -> Self {
        emotion.as_str().to_string()
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored journal entry. `emotion` and `keywords` are always derived from
/// the current `text`; `id`, `user_id`, and `timestamp` never change after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub emotion: Emotion,
    pub keywords: Vec<String>,
    /// Creation time assigned by the store. `None` only for snapshot rows
    /// whose server time has not resolved yet.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Input for `EntryStore::create`. The store assigns the id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub user_id: String,
    pub text: String,
    pub emotion: Emotion,
    pub keywords: Vec<String>,
}

/// The only fields an edit may overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    pub text: String,
    pub emotion: Emotion,
    pub keywords: Vec<String>,
}

/// Display order: newest first. Entries without a resolved timestamp are
/// treated as just written and sort before everything else.
pub fn sort_newest_first(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| match (&a.timestamp, &b.timestamp) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(lhs), Some(rhs)) => rhs.cmp(lhs),
    });
}
