//! Core types for the Verification/Diagnostic Harness

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Mood;

/// Kinds of verification challenges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeCategory {
    /// Should the response state today's numbers correctly?
    DataAccuracy,
    /// Should the response connect data across domains (sleep, mood, activity)?
    CrossDomain,
    /// Should the response reference patterns over weeks, not just today?
    LongTermCorrelation,
    /// Should the response be framed supportively?
    MentalHealthFraming,
}

impl ChallengeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataAccuracy => "data_accuracy",
            Self::CrossDomain => "cross_domain",
            Self::LongTermCorrelation => "long_term_correlation",
            Self::MentalHealthFraming => "mental_health_framing",
        }
    }

    pub fn all() -> &'static [ChallengeCategory] {
        &[
            Self::DataAccuracy,
            Self::CrossDomain,
            Self::LongTermCorrelation,
            Self::MentalHealthFraming,
        ]
    }
}

impl fmt::Display for ChallengeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChallengeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data_accuracy" => Ok(Self::DataAccuracy),
            "cross_domain" => Ok(Self::CrossDomain),
            "long_term_correlation" => Ok(Self::LongTermCorrelation),
            "mental_health_framing" => Ok(Self::MentalHealthFraming),
            _ => Err(format!("Unknown challenge category: {}", s)),
        }
    }
}

/// A generated verification challenge
///
/// Held by the caller for the session; replaced wholesale by the next
/// challenge, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub category: ChallengeCategory,
    /// The prompt to paste into the AI under test
    pub prefilled_prompt: String,
    /// What a correctly grounded answer should reference
    pub expected_data: String,
}

/// A snapshot of the user's real data a grounded response should reflect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSnapshot {
    pub date: NaiveDate,
    /// Previews of today's journal entries
    pub journal_previews: Vec<String>,
    /// Journal entries logged today
    pub journal_count: u32,
    /// Twigs logged today
    pub twig_count: u32,
    /// Recurring life-context words drawn from recent entries and custom twigs
    pub life_context_keywords: Vec<String>,
    /// Moods logged over the recent window
    pub recent_moods: Vec<Mood>,
}

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckFinding {
    /// A satisfied check, e.g. "Correctly stated journal count"
    Positive(String),
    /// A failed check, e.g. "Contains sad emoji"
    Issue(String),
}

/// Result of verifying one response
///
/// Recomputed fresh on every run; never merged with a previous result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True exactly when no issues were found
    pub passed: bool,
    pub positives: Vec<String>,
    pub issues: Vec<String>,
}

impl VerificationReport {
    pub fn from_findings(findings: Vec<CheckFinding>) -> Self {
        let mut positives = Vec::new();
        let mut issues = Vec::new();
        for finding in findings {
            match finding {
                CheckFinding::Positive(note) => positives.push(note),
                CheckFinding::Issue(note) => issues.push(note),
            }
        }
        Self {
            passed: issues.is_empty(),
            positives,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for cat in ChallengeCategory::all() {
            assert_eq!(ChallengeCategory::from_str(cat.as_str()).unwrap(), *cat);
        }
    }

    #[test]
    fn test_report_passed_iff_no_issues() {
        let clean = VerificationReport::from_findings(vec![CheckFinding::Positive("ok".into())]);
        assert!(clean.passed);

        let flagged = VerificationReport::from_findings(vec![
            CheckFinding::Positive("ok".into()),
            CheckFinding::Issue("bad".into()),
        ]);
        assert!(!flagged.passed);
        assert_eq!(flagged.positives.len(), 1);
        assert_eq!(flagged.issues.len(), 1);
    }
}
