//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init/status/reset and shared utilities (open_db)
//! - `journal` - Journal entry commands (add, list)
//! - `twigs` - Quick-log commands (log, list)
//! - `insights` - Insight commands (analyze, list, show, ack, react, count)
//! - `verify` - AI grounding verification commands (challenge, check)

pub mod core;
pub mod insights;
pub mod journal;
pub mod twigs;
pub mod verify;

// Re-export command functions for main.rs
pub use core::*;
pub use insights::*;
pub use journal::*;
pub use twigs::*;
pub use verify::*;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Parse an optional YYYY-MM-DD argument, defaulting to today
pub fn resolve_date(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
