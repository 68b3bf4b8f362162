//! Strength policy for the Insight Engine
//!
//! The numeric thresholds that map reinforcement counts and confidence to
//! strength tiers are policy, not hidden constants. They are loaded with a
//! two-layer resolution:
//! 1. Check for an override in the data dir (~/.local/share/sprout/config/policy.toml)
//! 2. Fall back to embedded defaults (compiled into the binary)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::insights::Strength;

/// Embedded default policy (compiled into binary)
const DEFAULT_POLICY: &str = include_str!("../../../config/policy.toml");

/// Cutoffs a tier requires. Both must be met.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TierCutoff {
    pub min_reinforced: u32,
    pub min_confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct EvidenceSection {
    min_evidence: u32,
    smoothing: f64,
    recency_window_days: i64,
    recency_bonus: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct TiersSection {
    developing: TierCutoff,
    established: TierCutoff,
    strong: TierCutoff,
}

#[derive(Debug, Clone, Deserialize)]
struct PolicyFile {
    evidence: EvidenceSection,
    tiers: TiersSection,
}

/// Policy mapping evidence to insight confidence and strength tiers
#[derive(Debug, Clone)]
pub struct StrengthPolicy {
    /// Minimum supporting observations before a pattern becomes an insight
    pub min_evidence: u32,
    /// Smoothing constant for the saturating confidence curve
    pub smoothing: f64,
    /// Evidence within this window of the run earns the recency bonus
    pub recency_window_days: i64,
    pub recency_bonus: f64,
    pub developing: TierCutoff,
    pub established: TierCutoff,
    pub strong: TierCutoff,
}

impl Default for StrengthPolicy {
    fn default() -> Self {
        // The embedded config is validated by tests, so a parse failure here
        // would be a packaging bug.
        Self::from_toml_str(DEFAULT_POLICY).expect("embedded policy.toml is invalid")
    }
}

impl StrengthPolicy {
    /// Parse a policy from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: PolicyFile =
            toml::from_str(text).map_err(|e| Error::Policy(format!("parse error: {}", e)))?;
        let policy = Self {
            min_evidence: file.evidence.min_evidence,
            smoothing: file.evidence.smoothing,
            recency_window_days: file.evidence.recency_window_days,
            recency_bonus: file.evidence.recency_bonus,
            developing: file.tiers.developing,
            established: file.tiers.established,
            strong: file.tiers.strong,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Load the policy: data-dir override if present, embedded default otherwise
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::override_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Self::from_toml_str(DEFAULT_POLICY)
    }

    /// Load a policy from a TOML file on disk
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading policy file");
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Path to the user's policy override file, if a data dir exists
    pub fn override_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("sprout").join("config").join("policy.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.min_evidence == 0 {
            return Err(Error::Policy("min_evidence must be at least 1".into()));
        }
        if self.smoothing <= 0.0 {
            return Err(Error::Policy("smoothing must be positive".into()));
        }
        let ordered = self.developing.min_reinforced <= self.established.min_reinforced
            && self.established.min_reinforced <= self.strong.min_reinforced;
        if !ordered {
            return Err(Error::Policy(
                "tier reinforcement cutoffs must be non-decreasing".into(),
            ));
        }
        Ok(())
    }

    /// Confidence for a pattern with `evidence_count` supporting observations
    ///
    /// Saturating curve in [0,1], monotone in evidence, with a small bonus
    /// when the latest evidence is recent relative to `today`.
    pub fn confidence(
        &self,
        evidence_count: u32,
        latest_evidence: Option<NaiveDate>,
        today: NaiveDate,
    ) -> f64 {
        let n = evidence_count as f64;
        let base = n / (n + self.smoothing);
        let bonus = match latest_evidence {
            Some(date) if (today - date).num_days() <= self.recency_window_days => {
                self.recency_bonus
            }
            _ => 0.0,
        };
        (base + bonus).min(1.0)
    }

    /// Strength tier for a given reinforcement count and confidence
    pub fn tier(&self, times_reinforced: u32, confidence: f64) -> Strength {
        let meets = |c: &TierCutoff| times_reinforced >= c.min_reinforced && confidence >= c.min_confidence;
        if meets(&self.strong) {
            Strength::Strong
        } else if meets(&self.established) {
            Strength::Established
        } else if meets(&self.developing) {
            Strength::Developing
        } else {
            Strength::Emerging
        }
    }
}
