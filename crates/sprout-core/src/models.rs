//! Domain models for Sprout

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Logged mood values
///
/// A closed enumeration so lookup tables (like the verification lexicon)
/// can be matched exhaustively instead of falling back on missing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Neutral,
    Low,
    Anxious,
    Irritable,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Low => "low",
            Self::Anxious => "anxious",
            Self::Irritable => "irritable",
        }
    }

    /// Words an AI response would plausibly use when referring to this mood.
    ///
    /// Used by the verification harness to check mood-word grounding.
    pub fn lexicon(&self) -> &'static [&'static str] {
        match self {
            Self::Great => &["great", "wonderful", "fantastic", "thriving", "energized"],
            Self::Good => &["good", "positive", "upbeat", "content", "well"],
            Self::Neutral => &["neutral", "okay", "steady", "even", "balanced"],
            Self::Low => &["low", "down", "sad", "heavy", "drained", "blue"],
            Self::Anxious => &["anxious", "worried", "nervous", "on edge", "tense"],
            Self::Irritable => &["irritable", "frustrated", "annoyed", "short-tempered"],
        }
    }

    /// Moods that count as a dip for pattern detection
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Low | Self::Anxious | Self::Irritable)
    }

    pub fn all() -> &'static [Mood] {
        &[
            Self::Great,
            Self::Good,
            Self::Neutral,
            Self::Low,
            Self::Anxious,
            Self::Irritable,
        ]
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "great" => Ok(Self::Great),
            "good" => Ok(Self::Good),
            "neutral" | "okay" => Ok(Self::Neutral),
            "low" | "down" | "sad" => Ok(Self::Low),
            "anxious" => Ok(Self::Anxious),
            "irritable" => Ok(Self::Irritable),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logged sleep quality values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Great,
    Good,
    Fair,
    Poor,
}

impl SleepQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl std::str::FromStr for SleepQuality {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "great" => Ok(Self::Great),
            "good" => Ok(Self::Good),
            "fair" | "ok" | "okay" => Ok(Self::Fair),
            "poor" | "bad" => Ok(Self::Poor),
            _ => Err(format!("Unknown sleep quality: {}", s)),
        }
    }
}

impl std::fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of quick log ("twig")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwigKind {
    Mood,
    Sleep,
    Energy,
    Custom,
}

impl TwigKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mood => "mood",
            Self::Sleep => "sleep",
            Self::Energy => "energy",
            Self::Custom => "custom",
        }
    }
}

impl std::str::FromStr for TwigKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mood" => Ok(Self::Mood),
            "sleep" => Ok(Self::Sleep),
            "energy" => Ok(Self::Energy),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown twig kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TwigKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Part of day, derived from a timestamp's hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        match ts.hour() {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    pub fn all() -> &'static [DayPart] {
        &[Self::Morning, Self::Afternoon, Self::Evening, Self::Night]
    }
}

impl std::fmt::Display for DayPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A full journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub body: String,
    pub mood: Option<Mood>,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Short preview of the entry body, used in snapshots and listings
    pub fn preview(&self, max_chars: usize) -> String {
        if self.body.chars().count() <= max_chars {
            self.body.clone()
        } else {
            let cut: String = self.body.chars().take(max_chars).collect();
            format!("{}…", cut.trim_end())
        }
    }
}

/// A journal entry to be inserted
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub date: NaiveDate,
    pub body: String,
    pub mood: Option<Mood>,
}

/// A quick log entry (mood, sleep, energy, or custom metric)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Twig {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: TwigKind,
    pub value: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Twig {
    /// Parse the value as a mood, if this is a mood twig
    pub fn mood(&self) -> Option<Mood> {
        if self.kind != TwigKind::Mood {
            return None;
        }
        self.value.parse().ok()
    }

    /// Parse the value as a sleep quality, if this is a sleep twig
    pub fn sleep_quality(&self) -> Option<SleepQuality> {
        if self.kind != TwigKind::Sleep {
            return None;
        }
        self.value.parse().ok()
    }
}

/// A twig to be inserted
#[derive(Debug, Clone)]
pub struct NewTwig {
    pub date: NaiveDate,
    pub kind: TwigKind,
    pub value: String,
    pub note: Option<String>,
}
