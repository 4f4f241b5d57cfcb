use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::models::{Emotion, EntryPatch, JournalEntry};

use super::connection::Database;

fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

fn parse_keywords(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|err| anyhow!("invalid keywords column: {err}"))
}

fn row_to_entry(row: &Row) -> Result<JournalEntry> {
    let created_at: String = row.get("created_at")?;
    let emotion: String = row.get("emotion")?;
    let keywords: String = row.get("keywords")?;

    Ok(JournalEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        text: row.get("text")?,
        emotion: Emotion::from_label(&emotion),
        keywords: parse_keywords(&keywords)?,
        timestamp: Some(parse_datetime(&created_at, "created_at")?),
    })
}

impl Database {
    pub async fn insert_entry(&self, entry: &JournalEntry) -> Result<()> {
        let record = entry.clone();
        let created_at = record
            .timestamp
            .ok_or_else(|| anyhow!("entry {} has no creation time", record.id))?;
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO entries (id, user_id, text, emotion, keywords, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.user_id,
                    record.text,
                    record.emotion.as_str(),
                    serde_json::to_string(&record.keywords)?,
                    created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Overwrites the derived fields of an entry. Returns the number of rows
    /// touched so the caller can distinguish a missing id.
    pub async fn update_entry(&self, entry_id: &str, patch: EntryPatch) -> Result<usize> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE entries
                 SET text = ?1,
                     emotion = ?2,
                     keywords = ?3
                 WHERE id = ?4",
                params![
                    patch.text,
                    patch.emotion.as_str(),
                    serde_json::to_string(&patch.keywords)?,
                    entry_id,
                ],
            )?;
            Ok(rows_affected)
        })
        .await
    }

    pub async fn delete_entry(&self, entry_id: &str) -> Result<usize> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM entries WHERE id = ?1", params![entry_id])?;
            Ok(rows_affected)
        })
        .await
    }

    pub async fn get_entry(&self, entry_id: &str) -> Result<Option<JournalEntry>> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, text, emotion, keywords, created_at
                 FROM entries
                 WHERE id = ?1",
            )?;

            let mut rows = stmt.query(params![entry_id])?;
            let entry = match rows.next()? {
                Some(row) => Some(row_to_entry(row)?),
                None => None,
            };
            Ok(entry)
        })
        .await
    }

    /// All entries owned by one user. No ordering is promised; display code
    /// sorts by timestamp itself.
    pub async fn list_entries_for_user(&self, user_id: &str) -> Result<Vec<JournalEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, text, emotion, keywords, created_at
                 FROM entries
                 WHERE user_id = ?1",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(row_to_entry(row)?);
            }

            Ok(entries)
        })
        .await
    }
}
