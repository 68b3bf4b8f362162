//! Insight Engine - turns journal/twig history into ranked pattern insights
//!
//! ## Architecture
//!
//! - `engine` - The InsightEngine that runs detectors against a history
//!   snapshot and persists what they find
//! - `types` - Categories, strength tiers, signals, and the persisted record
//! - Detectors: `sleep_mood`, `time_of_day`, `momentum`, `self_talk`
//!
//! Detectors recount evidence from the full history each run, which makes a
//! run idempotent: the same history always produces the same scores, and
//! stored scores only ever move forward.

mod engine;
mod momentum;
mod self_talk;
mod sleep_mood;
mod time_of_day;
mod types;

pub use engine::{AnalysisContext, Detector, InsightEngine, RunSummary};
pub use momentum::MomentumDetector;
pub use self_talk::SelfTalkDetector;
pub use sleep_mood::SleepMoodDetector;
pub use time_of_day::TimeOfDayDetector;
pub use types::{Insight, InsightCategory, PatternSignal, Strength, UserReaction};
