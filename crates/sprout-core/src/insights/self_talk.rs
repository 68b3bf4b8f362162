//! Harsh self-talk detector
//!
//! Scans journal bodies for recurring harsh self-talk phrasing. Each entry
//! counts once no matter how many phrases it contains.

use crate::error::Result;

use super::engine::{AnalysisContext, Detector};
use super::types::{InsightCategory, PatternSignal};

/// Phrases that mark harsh self-talk, matched case-insensitively
const HARSH_PHRASES: &[&str] = &[
    "i always mess",
    "i never get",
    "i can't do anything",
    "i'm such a failure",
    "i'm so stupid",
    "i'm useless",
    "what's wrong with me",
    "i should have known better",
];

pub struct SelfTalkDetector;

impl SelfTalkDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SelfTalkDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SelfTalkDetector {
    fn category(&self) -> InsightCategory {
        InsightCategory::SelfTalk
    }

    fn name(&self) -> &'static str {
        "Self-Talk"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<PatternSignal>> {
        let mut matched_entries = 0u32;
        let mut latest = None;
        let mut phrase_counts: Vec<(&str, u32)> = Vec::new();

        for entry in &ctx.snapshot.entries {
            let body = entry.body.to_lowercase();
            let hits: Vec<&str> = HARSH_PHRASES
                .iter()
                .copied()
                .filter(|p| body.contains(p))
                .collect();
            if hits.is_empty() {
                continue;
            }

            matched_entries += 1;
            latest = Some(latest.map_or(entry.date, |d: chrono::NaiveDate| d.max(entry.date)));
            for hit in hits {
                match phrase_counts.iter_mut().find(|(p, _)| *p == hit) {
                    Some((_, count)) => *count += 1,
                    None => phrase_counts.push((hit, 1)),
                }
            }
        }

        if matched_entries == 0 {
            return Ok(vec![]);
        }

        phrase_counts.sort_by(|a, b| b.1.cmp(&a.1));
        let top_phrases: Vec<&str> = phrase_counts.iter().take(3).map(|(p, _)| *p).collect();

        let mut signal = PatternSignal::new(
            InsightCategory::SelfTalk,
            "self_talk:harsh",
            matched_entries,
            "Harsh self-talk keeps showing up in your entries",
        )
        .with_detail(format!(
            "{} entries contain phrases like \"{}\".",
            matched_entries,
            top_phrases.join("\", \"")
        ))
        .with_experiment(
            "Next time one of these phrases comes up, try rewriting it as you'd say it to a friend",
        )
        .with_data(serde_json::json!({
            "matched_entries": matched_entries,
            "top_phrases": top_phrases,
        }));
        if let Some(date) = latest {
            signal = signal.with_latest_evidence(date);
        }

        Ok(vec![signal])
    }
}
