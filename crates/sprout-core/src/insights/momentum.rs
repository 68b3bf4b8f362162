//! Journaling momentum detector
//!
//! Finds runs of consecutive days with at least one journal entry. Streaks
//! are evidence that the habit is holding; evidence is the total number of
//! days inside qualifying streaks so it keeps growing as streaks recur.

use chrono::NaiveDate;

use crate::error::Result;

use super::engine::{AnalysisContext, Detector};
use super::types::{InsightCategory, PatternSignal};

/// Minimum consecutive days for a run to count as a streak
const MIN_STREAK_DAYS: u32 = 3;

pub struct MomentumDetector;

impl MomentumDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MomentumDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MomentumDetector {
    fn category(&self) -> InsightCategory {
        InsightCategory::Momentum
    }

    fn name(&self) -> &'static str {
        "Journaling Momentum"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<PatternSignal>> {
        // Days with at least one full journal entry, in order
        let days: Vec<NaiveDate> = ctx
            .snapshot
            .days()
            .filter(|(_, record)| !record.entries.is_empty())
            .map(|(date, _)| *date)
            .collect();

        if days.is_empty() {
            return Ok(vec![]);
        }

        let mut streaks: Vec<(NaiveDate, u32)> = Vec::new(); // (end date, length)
        let mut run_start = days[0];
        let mut prev = days[0];

        for &date in &days[1..] {
            if (date - prev).num_days() > 1 {
                streaks.push((prev, (prev - run_start).num_days() as u32 + 1));
                run_start = date;
            }
            prev = date;
        }
        streaks.push((prev, (prev - run_start).num_days() as u32 + 1));

        let qualifying: Vec<&(NaiveDate, u32)> = streaks
            .iter()
            .filter(|(_, len)| *len >= MIN_STREAK_DAYS)
            .collect();

        if qualifying.is_empty() {
            return Ok(vec![]);
        }

        let evidence: u32 = qualifying.iter().map(|(_, len)| len).sum();
        let longest = qualifying.iter().map(|(_, len)| *len).max().unwrap_or(0);
        let latest_end = qualifying.iter().map(|(end, _)| *end).max();

        let mut signal = PatternSignal::new(
            InsightCategory::Momentum,
            "momentum:journaling_streak",
            evidence,
            format!(
                "You journal in streaks, and your longest run is {} days",
                longest
            ),
        )
        .with_detail(format!(
            "{} streak(s) of {}+ consecutive days, {} streak days in total.",
            qualifying.len(),
            MIN_STREAK_DAYS,
            evidence
        ))
        .with_experiment("Pick a fixed time of day to journal and see if the streaks stretch")
        .with_data(serde_json::json!({
            "streaks": qualifying.len(),
            "longest_streak_days": longest,
            "streak_days_total": evidence,
        }));
        if let Some(date) = latest_end {
            signal = signal.with_latest_evidence(date);
        }

        Ok(vec![signal])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JournalEntry;
    use crate::policy::StrengthPolicy;
    use crate::snapshot::HistorySnapshot;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn entry(d: u32) -> JournalEntry {
        JournalEntry {
            id: 0,
            date: day(d),
            body: "wrote something".to_string(),
            mood: None,
            created_at: Utc::now(),
        }
    }

    fn ctx(entries: Vec<JournalEntry>) -> AnalysisContext {
        AnalysisContext::new(
            HistorySnapshot::from_records(entries, vec![]),
            StrengthPolicy::default(),
            day(25),
        )
    }

    #[test]
    fn test_detects_single_streak() {
        let entries = (1..=5).map(entry).collect();

        let detector = MomentumDetector::new();
        let signals = detector.detect(&ctx(entries)).unwrap();

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].evidence_count, 5);
        assert_eq!(signals[0].data["longest_streak_days"], 5);
        assert_eq!(signals[0].latest_evidence, Some(day(5)));
        assert!(signals[0].summary.contains("longest run is 5 days"));
    }

    #[test]
    fn test_counts_days_across_multiple_streaks() {
        // Days 1-3 and 10-13: two qualifying streaks, 7 streak days
        let mut entries: Vec<JournalEntry> = (1..=3).map(entry).collect();
        entries.extend((10..=13).map(entry));

        let detector = MomentumDetector::new();
        let signals = detector.detect(&ctx(entries)).unwrap();

        assert_eq!(signals[0].evidence_count, 7);
        assert_eq!(signals[0].data["streaks"], 2);
    }

    #[test]
    fn test_short_runs_do_not_qualify() {
        // Two-day runs only
        let entries = vec![entry(1), entry(2), entry(5), entry(6)];

        let detector = MomentumDetector::new();
        assert!(detector.detect(&ctx(entries)).unwrap().is_empty());
    }

    #[test]
    fn test_multiple_entries_one_day_count_once() {
        let mut entries: Vec<JournalEntry> = (1..=3).map(entry).collect();
        entries.push(entry(2));

        let detector = MomentumDetector::new();
        let signals = detector.detect(&ctx(entries)).unwrap();
        assert_eq!(signals[0].evidence_count, 3);
    }
}
