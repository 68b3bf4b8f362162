//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sprout - Private wellness journal with pattern insights
#[derive(Parser)]
#[command(name = "sprout")]
#[command(about = "Self-hosted wellness journal and insight engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "sprout.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set SPROUT_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status (encryption, size, entry counts)
    Status,

    /// Delete all journal entries, twigs, and insights
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Manage journal entries
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },

    /// Quick one-line logs (mood, sleep, energy, custom)
    Twig {
        #[command(subcommand)]
        action: TwigAction,
    },

    /// Detected patterns in your history
    Insights {
        #[command(subcommand)]
        action: Option<InsightsAction>,
    },

    /// Check whether an AI response is grounded in your data
    Verify {
        #[command(subcommand)]
        action: VerifyAction,
    },
}

#[derive(Subcommand)]
pub enum JournalAction {
    /// Add a journal entry
    Add {
        /// Entry text
        body: String,

        /// Mood at time of writing: great, good, neutral, low, anxious, irritable
        #[arg(short, long)]
        mood: Option<String>,

        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List recent journal entries
    List {
        /// Maximum entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum TwigAction {
    /// Log a quick observation
    Log {
        /// What to log: mood, sleep, energy, or a custom label
        kind: String,

        /// The value (e.g. "low", "poor", "7", "gym")
        value: String,

        /// Optional free-text note
        #[arg(short, long)]
        note: Option<String>,

        /// Log date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List recent twigs
    List {
        /// Maximum twigs to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum InsightsAction {
    /// Run pattern detection over the full history
    Analyze,

    /// List all insights, strongest first
    List,

    /// Show one insight in full detail
    Show {
        /// Insight id
        id: i64,
    },

    /// Mark an insight as seen
    Ack {
        /// Insight id
        id: i64,
    },

    /// Mark every insight as seen
    AckAll,

    /// Record how an insight landed
    React {
        /// Insight id
        id: i64,

        /// Reaction: helpful, surprising, already-knew, not-applicable
        reaction: String,
    },

    /// Count unseen insights
    Count,
}

#[derive(Subcommand)]
pub enum VerifyAction {
    /// Generate a diagnostic prompt to paste into the AI under test
    Challenge {
        /// Challenge category: data-accuracy, cross-domain,
        /// long-term-correlation, mental-health-framing
        #[arg(short, long, default_value = "data-accuracy")]
        category: String,

        /// Emit the challenge as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score an AI response against your real data
    Check {
        /// Challenge category the response answers
        #[arg(short, long, default_value = "data-accuracy")]
        category: String,

        /// The AI response text
        #[arg(short, long)]
        response: Option<String>,

        /// Read the AI response from a file
        #[arg(long, conflicts_with = "response")]
        response_file: Option<PathBuf>,
    },
}
