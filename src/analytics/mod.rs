//! Pure folds over a user's entries for the dashboard. No I/O, no state;
//! the same input sequence always produces the same output.

use std::collections::{BTreeMap, HashMap};

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::models::{Emotion, JournalEntry};

/// The activity chart keeps only this many most-recent days.
pub const ACTIVITY_WINDOW_DAYS: usize = 15;

/// Default number of keywords on the focus chart.
pub const KEYWORD_TOP_N: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

/// Top keywords plus the maximum count over ALL keywords, so every spoke of
/// the chart shares one scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordFocus {
    pub top: Vec<KeywordCount>,
    pub max: u64,
}

/// Tally of entries per emotion. Labels outside the core set tally under
/// their literal value (`Emotion::Other`), never dropped.
pub fn emotion_distribution(entries: &[JournalEntry]) -> HashMap<Emotion, u64> {
    let mut counts = HashMap::new();
    for entry in entries {
        *counts.entry(entry.emotion.clone()).or_insert(0) += 1;
    }
    counts
}

/// Entries per calendar day (viewer-local), ascending, truncated to the most
/// recent `ACTIVITY_WINDOW_DAYS` days. Entries whose creation time has not
/// resolved are excluded.
pub fn daily_activity(entries: &[JournalEntry]) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for entry in entries {
        let Some(timestamp) = entry.timestamp else {
            continue;
        };
        let day = timestamp.with_timezone(&Local).date_naive();
        *per_day.entry(day).or_insert(0) += 1;
    }

    let mut days: Vec<DailyCount> = per_day
        .into_iter()
        .map(|(day, count)| DailyCount { day, count })
        .collect();
    if days.len() > ACTIVITY_WINDOW_DAYS {
        days.drain(..days.len() - ACTIVITY_WINDOW_DAYS);
    }
    days
}

/// Flattens keywords across all entries, tallies them, and keeps the
/// `top_n` most frequent. Ties keep first-encountered order. `max` is the
/// highest count among all keywords (0 when there are none), not just the
/// returned ones.
pub fn keyword_focus(entries: &[JournalEntry], top_n: usize) -> KeywordFocus {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<KeywordCount> = Vec::new();

    for entry in entries {
        for keyword in &entry.keywords {
            match first_seen.get(keyword.as_str()) {
                Some(&slot) => tallies[slot].count += 1,
                None => {
                    first_seen.insert(keyword.as_str(), tallies.len());
                    tallies.push(KeywordCount {
                        keyword: keyword.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    let max = tallies.iter().map(|tally| tally.count).max().unwrap_or(0);
    // Stable sort keeps first-encounter order within equal counts.
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies.truncate(top_n);

    KeywordFocus { top: tallies, max }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn entry_with_emotion(label: &str) -> JournalEntry {
        JournalEntry {
            id: format!("id-{label}"),
            user_id: "user-1".into(),
            text: String::new(),
            emotion: Emotion::from_label(label),
            keywords: Vec::new(),
            timestamp: None,
        }
    }

    fn entry_with_keywords(keywords: &[&str]) -> JournalEntry {
        JournalEntry {
            id: "id".into(),
            user_id: "user-1".into(),
            text: String::new(),
            emotion: Emotion::Neutral,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            timestamp: None,
        }
    }

    fn entry_at(timestamp: Option<DateTime<Utc>>) -> JournalEntry {
        JournalEntry {
            id: "id".into(),
            user_id: "user-1".into(),
            text: String::new(),
            emotion: Emotion::Neutral,
            keywords: Vec::new(),
            timestamp,
        }
    }

    fn local_midday(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn distribution_tallies_by_label() {
        let entries = vec![
            entry_with_emotion("Joy"),
            entry_with_emotion("Joy"),
            entry_with_emotion("Sadness"),
        ];

        let counts = emotion_distribution(&entries);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&Emotion::Joy], 2);
        assert_eq!(counts[&Emotion::Sadness], 1);
    }

    #[test]
    fn distribution_keeps_unrecognized_labels_literally() {
        let entries = vec![entry_with_emotion("Fear"), entry_with_emotion("Fear")];

        let counts = emotion_distribution(&entries);
        assert_eq!(counts[&Emotion::Other("Fear".into())], 2);
    }

    #[test]
    fn daily_activity_truncates_to_most_recent_days() {
        // 20 distinct days, two entries on the newest one.
        let mut entries: Vec<JournalEntry> = (1..=20)
            .map(|day| entry_at(Some(local_midday(2024, 3, day))))
            .collect();
        entries.push(entry_at(Some(local_midday(2024, 3, 20))));
        entries.push(entry_at(None));

        let activity = daily_activity(&entries);

        assert_eq!(activity.len(), ACTIVITY_WINDOW_DAYS);
        // Oldest five days truncated, ascending order preserved.
        assert_eq!(
            activity[0].day,
            Local
                .with_ymd_and_hms(2024, 3, 6, 12, 0, 0)
                .unwrap()
                .date_naive()
        );
        assert!(activity.windows(2).all(|pair| pair[0].day < pair[1].day));
        assert_eq!(activity.last().unwrap().count, 2);
    }

    #[test]
    fn daily_activity_excludes_unresolved_timestamps() {
        let entries = vec![entry_at(None), entry_at(None)];
        assert!(daily_activity(&entries).is_empty());
    }

    #[test]
    fn keyword_focus_ranks_and_shares_the_global_max() {
        let entries = vec![
            entry_with_keywords(&["a", "a", "b"]),
            entry_with_keywords(&["c", "c", "c"]),
        ];

        let focus = keyword_focus(&entries, 2);

        assert_eq!(focus.max, 3);
        assert_eq!(focus.top.len(), 2);
        assert_eq!(focus.top[0].keyword, "c");
        assert_eq!(focus.top[0].count, 3);
        assert_eq!(focus.top[1].keyword, "a");
        assert_eq!(focus.top[1].count, 2);
    }

    #[test]
    fn keyword_ties_keep_first_encounter_order() {
        let entries = vec![entry_with_keywords(&["walk", "rain", "walk", "rain"])];

        let focus = keyword_focus(&entries, KEYWORD_TOP_N);
        let order: Vec<&str> = focus.top.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(order, vec!["walk", "rain"]);
    }

    #[test]
    fn keyword_focus_over_nothing_is_empty_with_zero_max() {
        let focus = keyword_focus(&[], KEYWORD_TOP_N);
        assert!(focus.top.is_empty());
        assert_eq!(focus.max, 0);
    }
}
