//! Core types for the Insight Engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories of patterns the engine can surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Correlation,
    Trigger,
    Recovery,
    Cycle,
    Social,
    Activity,
    Sleep,
    TimeOfDay,
    Environment,
    Momentum,
    Avoidance,
    SelfTalk,
    BodyMind,
    Growth,
    WarningSign,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correlation => "correlation",
            Self::Trigger => "trigger",
            Self::Recovery => "recovery",
            Self::Cycle => "cycle",
            Self::Social => "social",
            Self::Activity => "activity",
            Self::Sleep => "sleep",
            Self::TimeOfDay => "time_of_day",
            Self::Environment => "environment",
            Self::Momentum => "momentum",
            Self::Avoidance => "avoidance",
            Self::SelfTalk => "self_talk",
            Self::BodyMind => "body_mind",
            Self::Growth => "growth",
            Self::WarningSign => "warning_sign",
        }
    }

    pub fn all() -> &'static [InsightCategory] {
        &[
            Self::Correlation,
            Self::Trigger,
            Self::Recovery,
            Self::Cycle,
            Self::Social,
            Self::Activity,
            Self::Sleep,
            Self::TimeOfDay,
            Self::Environment,
            Self::Momentum,
            Self::Avoidance,
            Self::SelfTalk,
            Self::BodyMind,
            Self::Growth,
            Self::WarningSign,
        ]
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "correlation" => Ok(Self::Correlation),
            "trigger" => Ok(Self::Trigger),
            "recovery" => Ok(Self::Recovery),
            "cycle" => Ok(Self::Cycle),
            "social" => Ok(Self::Social),
            "activity" => Ok(Self::Activity),
            "sleep" => Ok(Self::Sleep),
            "time_of_day" => Ok(Self::TimeOfDay),
            "environment" => Ok(Self::Environment),
            "momentum" => Ok(Self::Momentum),
            "avoidance" => Ok(Self::Avoidance),
            "self_talk" => Ok(Self::SelfTalk),
            "body_mind" => Ok(Self::BodyMind),
            "growth" => Ok(Self::Growth),
            "warning_sign" => Ok(Self::WarningSign),
            _ => Err(format!("Unknown insight category: {}", s)),
        }
    }
}

/// How well-evidenced an insight is
///
/// Tiers only ever move forward; an insight that stops being reinforced
/// keeps its last-achieved tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    /// First crossed the minimum-evidence threshold
    Emerging,
    /// Recurring often enough to be worth watching
    Developing,
    /// Consistently reinforced over time
    Established,
    /// Very well evidenced
    Strong,
}

impl Strength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emerging => "emerging",
            Self::Developing => "developing",
            Self::Established => "established",
            Self::Strong => "strong",
        }
    }

    /// Numeric rank for ordering (higher = stronger)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Emerging => 1,
            Self::Developing => 2,
            Self::Established => 3,
            Self::Strong => 4,
        }
    }

    /// The stronger of two tiers
    pub fn max(self, other: Strength) -> Strength {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emerging" => Ok(Self::Emerging),
            "developing" => Ok(Self::Developing),
            "established" => Ok(Self::Established),
            "strong" => Ok(Self::Strong),
            _ => Err(format!("Unknown strength: {}", s)),
        }
    }
}

/// User's reaction to an insight (last write wins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserReaction {
    Helpful,
    Surprising,
    AlreadyKnew,
    NotApplicable,
}

impl UserReaction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Helpful => "helpful",
            Self::Surprising => "surprising",
            Self::AlreadyKnew => "already_knew",
            Self::NotApplicable => "not_applicable",
        }
    }
}

impl fmt::Display for UserReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserReaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "helpful" => Ok(Self::Helpful),
            "surprising" => Ok(Self::Surprising),
            "already_knew" => Ok(Self::AlreadyKnew),
            "not_applicable" => Ok(Self::NotApplicable),
            _ => Err(format!("Unknown reaction: {}", s)),
        }
    }
}

/// A pattern detected in history, before persistence
///
/// Detectors recount evidence from the full snapshot on every run, so the
/// same history always yields the same signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSignal {
    /// Category of the detected pattern
    pub category: InsightCategory,
    /// Unique key within the category for deduplication
    /// (e.g., "sleep:poor->mood:negative")
    pub pattern_key: String,
    /// Total count of supporting observations across the whole snapshot
    pub evidence_count: u32,
    /// Date of the most recent supporting observation
    pub latest_evidence: Option<chrono::NaiveDate>,
    /// One-line pattern statement shown to the user
    pub summary: String,
    /// Optional longer explanation
    pub detail: Option<String>,
    /// Optional suggested experiment to test the pattern
    pub suggested_experiment: Option<String>,
    /// Detector-specific structured data
    pub data: serde_json::Value,
}

impl PatternSignal {
    pub fn new(
        category: InsightCategory,
        pattern_key: impl Into<String>,
        evidence_count: u32,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            category,
            pattern_key: pattern_key.into(),
            evidence_count,
            latest_evidence: None,
            summary: summary.into(),
            detail: None,
            suggested_experiment: None,
            data: serde_json::Value::Null,
        }
    }

    pub fn with_latest_evidence(mut self, date: chrono::NaiveDate) -> Self {
        self.latest_evidence = Some(date);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_experiment(mut self, experiment: impl Into<String>) -> Self {
        self.suggested_experiment = Some(experiment.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// A persisted insight record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: i64,
    pub category: InsightCategory,
    pub pattern_key: String,
    pub strength: Strength,
    pub confidence: f64,
    pub times_reinforced: u32,
    pub summary: String,
    pub detail: Option<String>,
    pub suggested_experiment: Option<String>,
    /// Provenance tag (e.g., "heuristic")
    pub source: String,
    pub data: serde_json::Value,
    pub first_detected: DateTime<Utc>,
    pub last_reinforced: DateTime<Utc>,
    /// True until the user acknowledges the insight
    pub is_new: bool,
    pub user_reaction: Option<UserReaction>,
}
