//! Sleep/mood correlation detector
//!
//! Scans the day-bucketed history for co-occurrences of poor sleep and a
//! mood dip on the same day, and for the mirror pattern of good sleep and
//! a positive mood.

use crate::error::Result;
use crate::models::{Mood, SleepQuality};

use super::engine::{AnalysisContext, Detector};
use super::types::{InsightCategory, PatternSignal};

pub struct SleepMoodDetector;

impl SleepMoodDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SleepMoodDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SleepMoodDetector {
    fn category(&self) -> InsightCategory {
        InsightCategory::Sleep
    }

    fn name(&self) -> &'static str {
        "Sleep & Mood"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<PatternSignal>> {
        let mut signals = Vec::new();

        let mut poor_sleep_days = 0u32;
        let mut poor_low_days = 0u32;
        let mut poor_low_latest = None;
        let mut good_up_days = 0u32;
        let mut good_up_latest = None;

        for (date, record) in ctx.snapshot.days() {
            let Some(sleep) = record.sleep_quality() else {
                continue;
            };
            let moods = record.moods();
            if moods.is_empty() {
                continue;
            }

            match sleep {
                SleepQuality::Poor => {
                    poor_sleep_days += 1;
                    if record.had_negative_mood() {
                        poor_low_days += 1;
                        poor_low_latest = Some(*date);
                    }
                }
                SleepQuality::Great | SleepQuality::Good => {
                    if moods.iter().any(|m| matches!(m, Mood::Great | Mood::Good)) {
                        good_up_days += 1;
                        good_up_latest = Some(*date);
                    }
                }
                SleepQuality::Fair => {}
            }
        }

        if poor_low_days > 0 {
            let mut signal = PatternSignal::new(
                InsightCategory::Sleep,
                "sleep:poor->mood:negative",
                poor_low_days,
                "Your mood tends to dip on days after poor sleep",
            )
            .with_detail(format!(
                "Of {} poor-sleep days, {} also had a low, anxious, or irritable mood logged.",
                poor_sleep_days, poor_low_days
            ))
            .with_experiment("Try winding down 30 minutes earlier for a week and watch how your mood logs shift")
            .with_data(serde_json::json!({
                "poor_sleep_days": poor_sleep_days,
                "matched_days": poor_low_days,
            }));
            if let Some(date) = poor_low_latest {
                signal = signal.with_latest_evidence(date);
            }
            signals.push(signal);
        }

        if good_up_days > 0 {
            let mut signal = PatternSignal::new(
                InsightCategory::Sleep,
                "sleep:good->mood:positive",
                good_up_days,
                "Good sleep shows up alongside your better moods",
            )
            .with_data(serde_json::json!({ "matched_days": good_up_days }));
            if let Some(date) = good_up_latest {
                signal = signal.with_latest_evidence(date);
            }
            signals.push(signal);
        }

        Ok(signals)
    }
}
