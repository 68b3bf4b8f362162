//! Read-only history snapshot for analysis runs
//!
//! A run takes one snapshot of the full journal/twig history at the start
//! and computes every score against it, so concurrent writes during the run
//! cannot skew results.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::db::Database;
use crate::error::Result;
use crate::models::{JournalEntry, Mood, SleepQuality, Twig, TwigKind};

/// Everything logged on a single day
#[derive(Debug, Clone, Default)]
pub struct DayRecord {
    pub entries: Vec<JournalEntry>,
    pub twigs: Vec<Twig>,
}

impl DayRecord {
    /// The day's logged moods, from mood twigs and journal entry moods
    pub fn moods(&self) -> Vec<Mood> {
        let mut moods: Vec<Mood> = self.twigs.iter().filter_map(|t| t.mood()).collect();
        moods.extend(self.entries.iter().filter_map(|e| e.mood));
        moods
    }

    /// Worst sleep quality logged that day, if any
    pub fn sleep_quality(&self) -> Option<SleepQuality> {
        self.twigs
            .iter()
            .filter_map(|t| t.sleep_quality())
            .max_by_key(|q| match q {
                SleepQuality::Great => 0,
                SleepQuality::Good => 1,
                SleepQuality::Fair => 2,
                SleepQuality::Poor => 3,
            })
    }

    /// Whether any logged mood that day was a dip
    pub fn had_negative_mood(&self) -> bool {
        self.moods().iter().any(|m| m.is_negative())
    }
}

/// Immutable snapshot of all history, bucketed by day
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    pub entries: Vec<JournalEntry>,
    pub twigs: Vec<Twig>,
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl HistorySnapshot {
    /// Load the full current history from the database
    pub fn load(db: &Database) -> Result<Self> {
        let entries = db.all_journal_entries()?;
        let twigs = db.all_twigs()?;
        Ok(Self::from_records(entries, twigs))
    }

    /// Build a snapshot from already-loaded records (used heavily in tests)
    pub fn from_records(entries: Vec<JournalEntry>, twigs: Vec<Twig>) -> Self {
        let mut days: BTreeMap<NaiveDate, DayRecord> = BTreeMap::new();
        for entry in &entries {
            days.entry(entry.date).or_default().entries.push(entry.clone());
        }
        for twig in &twigs {
            days.entry(twig.date).or_default().twigs.push(twig.clone());
        }
        Self {
            entries,
            twigs,
            days,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.twigs.is_empty()
    }

    /// Days with any record, in chronological order
    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &DayRecord)> {
        self.days.iter()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    /// Most recent day with any record
    pub fn latest_day(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    /// Twigs of a given kind across the whole history, oldest first
    pub fn twigs_of_kind(&self, kind: TwigKind) -> impl Iterator<Item = &Twig> {
        self.twigs.iter().filter(move |t| t.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn twig(d: u32, kind: TwigKind, value: &str) -> Twig {
        Twig {
            id: 0,
            date: day(d),
            kind,
            value: value.to_string(),
            note: None,
            created_at: Utc::now(),
        }
    }

    fn entry(d: u32, body: &str, mood: Option<Mood>) -> JournalEntry {
        JournalEntry {
            id: 0,
            date: day(d),
            body: body.to_string(),
            mood,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_day_bucketing() {
        let snapshot = HistorySnapshot::from_records(
            vec![entry(1, "first", None), entry(2, "second", Some(Mood::Low))],
            vec![twig(1, TwigKind::Sleep, "poor")],
        );

        assert_eq!(snapshot.days().count(), 2);
        let d1 = snapshot.day(day(1)).unwrap();
        assert_eq!(d1.entries.len(), 1);
        assert_eq!(d1.twigs.len(), 1);
        assert_eq!(snapshot.latest_day(), Some(day(2)));
    }

    #[test]
    fn test_day_record_moods_and_sleep() {
        let snapshot = HistorySnapshot::from_records(
            vec![entry(3, "rough one", Some(Mood::Low))],
            vec![
                twig(3, TwigKind::Mood, "anxious"),
                twig(3, TwigKind::Sleep, "fair"),
                twig(3, TwigKind::Sleep, "poor"),
            ],
        );

        let record = snapshot.day(day(3)).unwrap();
        assert_eq!(record.moods().len(), 2);
        assert!(record.had_negative_mood());
        assert_eq!(record.sleep_quality(), Some(SleepQuality::Poor));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = HistorySnapshot::from_records(vec![], vec![]);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.latest_day(), None);
    }
}
