//! Time-of-day clustering detector
//!
//! Looks at when mood dips are logged. If a majority of them land in one
//! part of the day, that is worth surfacing.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::{DayPart, TwigKind};

use super::engine::{AnalysisContext, Detector};
use super::types::{InsightCategory, PatternSignal};

/// Share of all mood dips one day part must hold to count as a cluster
const CLUSTER_SHARE: f64 = 0.5;

pub struct TimeOfDayDetector;

impl TimeOfDayDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeOfDayDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for TimeOfDayDetector {
    fn category(&self) -> InsightCategory {
        InsightCategory::TimeOfDay
    }

    fn name(&self) -> &'static str {
        "Time of Day"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<PatternSignal>> {
        let mut by_part: HashMap<DayPart, u32> = HashMap::new();
        let mut latest: HashMap<DayPart, chrono::NaiveDate> = HashMap::new();
        let mut total = 0u32;

        for twig in ctx.snapshot.twigs_of_kind(TwigKind::Mood) {
            let Some(mood) = twig.mood() else { continue };
            if !mood.is_negative() {
                continue;
            }
            let part = DayPart::from_timestamp(twig.created_at);
            *by_part.entry(part).or_insert(0) += 1;
            latest
                .entry(part)
                .and_modify(|d| *d = (*d).max(twig.date))
                .or_insert(twig.date);
            total += 1;
        }

        if total == 0 {
            return Ok(vec![]);
        }

        let mut signals = Vec::new();
        for part in DayPart::all() {
            let count = by_part.get(part).copied().unwrap_or(0);
            if count == 0 || (count as f64) / (total as f64) < CLUSTER_SHARE {
                continue;
            }

            let mut signal = PatternSignal::new(
                InsightCategory::TimeOfDay,
                format!("time_of_day:{}:low", part),
                count,
                format!("Most of your mood dips are logged in the {}", part),
            )
            .with_detail(format!(
                "{} of {} logged dips landed in the {}.",
                count, total, part
            ))
            .with_experiment(format!(
                "Plan something restorative for the {} and see if the pattern softens",
                part
            ))
            .with_data(serde_json::json!({
                "day_part": part.as_str(),
                "dips_in_part": count,
                "dips_total": total,
            }));
            if let Some(date) = latest.get(part) {
                signal = signal.with_latest_evidence(*date);
            }
            signals.push(signal);
        }

        Ok(signals)
    }
}
