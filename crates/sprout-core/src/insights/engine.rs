//! Insight Engine - orchestrates pattern detection and persistence

use chrono::NaiveDate;

use crate::db::{Database, UpsertOutcome};
use crate::policy::StrengthPolicy;
use crate::snapshot::HistorySnapshot;
use crate::Result;

use super::momentum::MomentumDetector;
use super::self_talk::SelfTalkDetector;
use super::sleep_mood::SleepMoodDetector;
use super::time_of_day::TimeOfDayDetector;
use super::types::{InsightCategory, PatternSignal};

/// Context provided to pattern detectors
pub struct AnalysisContext {
    /// Read-only snapshot of the full history, taken at run start
    pub snapshot: HistorySnapshot,
    /// Policy mapping evidence to confidence and strength tiers
    pub policy: StrengthPolicy,
    /// "Today" for recency weighting (injectable for tests)
    pub today: NaiveDate,
}

impl AnalysisContext {
    pub fn new(snapshot: HistorySnapshot, policy: StrengthPolicy, today: NaiveDate) -> Self {
        Self {
            snapshot,
            policy,
            today,
        }
    }

    /// Snapshot the database's current history and load the policy
    pub fn from_db(db: &Database) -> Result<Self> {
        let snapshot = HistorySnapshot::load(db)?;
        let policy = StrengthPolicy::load()?;
        Ok(Self::new(snapshot, policy, chrono::Local::now().date_naive()))
    }
}

/// Trait for pattern detectors
///
/// Detectors are pure functions of the snapshot: they recount evidence from
/// the full history each run rather than working from deltas.
pub trait Detector: Send + Sync {
    /// Category this detector reports under
    fn category(&self) -> InsightCategory;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Scan the snapshot and report recurring patterns
    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<PatternSignal>>;
}

/// Counts from one analysis run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// New insights created this run
    pub created: usize,
    /// Existing insights that gained evidence
    pub reinforced: usize,
    /// Signals that matched an insight but moved nothing
    pub unchanged: usize,
}

/// The main insight engine that orchestrates detection
pub struct InsightEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with built-in detectors
    pub fn new() -> Self {
        let mut engine = Self { detectors: vec![] };

        // Register built-in detectors
        engine.register(Box::new(SleepMoodDetector::new()));
        engine.register(Box::new(TimeOfDayDetector::new()));
        engine.register(Box::new(MomentumDetector::new()));
        engine.register(Box::new(SelfTalkDetector::new()));

        engine
    }

    /// Register a pattern detector
    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Run all detectors and collect signals that clear the evidence threshold
    ///
    /// Detection is best-effort: a failing detector is logged and skipped,
    /// and insufficient history yields an empty result, never an error.
    pub fn detect_all(&self, ctx: &AnalysisContext) -> Vec<PatternSignal> {
        let mut all_signals = vec![];

        if ctx.snapshot.is_empty() {
            return all_signals;
        }

        for detector in &self.detectors {
            match detector.detect(ctx) {
                Ok(signals) => {
                    tracing::debug!(
                        detector = detector.name(),
                        count = signals.len(),
                        "Pattern detection complete"
                    );
                    all_signals.extend(
                        signals
                            .into_iter()
                            .filter(|s| s.evidence_count >= ctx.policy.min_evidence),
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        detector = detector.name(),
                        error = %e,
                        "Pattern detection failed"
                    );
                }
            }
        }

        // Strongest evidence first, then by key for a stable order
        all_signals.sort_by(|a, b| {
            b.evidence_count
                .cmp(&a.evidence_count)
                .then_with(|| a.pattern_key.cmp(&b.pattern_key))
        });

        all_signals
    }

    /// Run all detectors and persist the results
    ///
    /// For each qualifying signal, the insight row is upserted with the
    /// policy's confidence and tier for the recounted evidence; stored scores
    /// only ever move forward.
    pub fn run(&self, db: &Database, ctx: &AnalysisContext) -> Result<RunSummary> {
        let signals = self.detect_all(ctx);
        let mut summary = RunSummary::default();

        for signal in &signals {
            let confidence =
                ctx.policy
                    .confidence(signal.evidence_count, signal.latest_evidence, ctx.today);
            let strength = ctx.policy.tier(signal.evidence_count, confidence);

            match db.upsert_insight(signal, confidence, strength) {
                Ok((_, UpsertOutcome::Created)) => summary.created += 1,
                Ok((_, UpsertOutcome::Reinforced)) => summary.reinforced += 1,
                Ok((_, UpsertOutcome::Unchanged)) => summary.unchanged += 1,
                Err(e) => {
                    tracing::warn!(
                        key = signal.pattern_key,
                        error = %e,
                        "Failed to persist insight"
                    );
                }
            }
        }

        tracing::info!(
            created = summary.created,
            reinforced = summary.reinforced,
            unchanged = summary.unchanged,
            "Insight analysis complete"
        );
        Ok(summary)
    }

    /// Get the categories of registered detectors
    pub fn categories(&self) -> Vec<InsightCategory> {
        self.detectors.iter().map(|d| d.category()).collect()
    }
}
