//! Sprout Core Library
//!
//! Shared functionality for the Sprout journaling tool:
//! - Database access and migrations (encrypted SQLite)
//! - Journal entry and twig (quick log) storage
//! - Insight Engine: heuristic pattern detection over logged history
//! - Strength policy: configurable evidence-to-tier mapping
//! - Verification harness: checks whether an AI response is grounded in
//!   the user's real data or generic filler

pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod policy;
pub mod snapshot;
pub mod verify;

pub use db::{Database, UpsertOutcome};
pub use error::{Error, Result};
pub use insights::{
    AnalysisContext, Detector, Insight, InsightCategory, InsightEngine, PatternSignal, RunSummary,
    Strength, UserReaction,
};
pub use models::{
    DayPart, JournalEntry, Mood, NewJournalEntry, NewTwig, SleepQuality, Twig, TwigKind,
};
pub use policy::StrengthPolicy;
pub use snapshot::{DayRecord, HistorySnapshot};
pub use verify::{
    generate_challenge, verify_response, Challenge, ChallengeCategory, CheckFinding, DataSnapshot,
    VerificationReport,
};
