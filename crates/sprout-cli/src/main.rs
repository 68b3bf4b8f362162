//! Sprout CLI - Private wellness journal
//!
//! Usage:
//!   sprout init                       Initialize database
//!   sprout journal add "..."          Write a journal entry
//!   sprout twig log mood low          Quick one-line log
//!   sprout insights analyze           Detect patterns in your history
//!   sprout verify challenge           Test whether an AI reads your data

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
        Commands::Reset { yes } => commands::cmd_reset(&cli.db, yes, cli.no_encrypt),
        Commands::Journal { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                JournalAction::Add { body, mood, date } => {
                    commands::cmd_journal_add(&db, &body, mood.as_deref(), date.as_deref())
                }
                JournalAction::List { limit } => commands::cmd_journal_list(&db, limit),
            }
        }
        Commands::Twig { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                TwigAction::Log {
                    kind,
                    value,
                    note,
                    date,
                } => commands::cmd_twig_log(&db, &kind, &value, note.as_deref(), date.as_deref()),
                TwigAction::List { limit } => commands::cmd_twig_list(&db, limit),
            }
        }
        Commands::Insights { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(InsightsAction::List) => commands::cmd_insights_list(&db),
                Some(InsightsAction::Analyze) => commands::cmd_insights_analyze(&db),
                Some(InsightsAction::Show { id }) => commands::cmd_insights_show(&db, id),
                Some(InsightsAction::Ack { id }) => commands::cmd_insights_ack(&db, id),
                Some(InsightsAction::AckAll) => commands::cmd_insights_ack_all(&db),
                Some(InsightsAction::React { id, reaction }) => {
                    commands::cmd_insights_react(&db, id, &reaction)
                }
                Some(InsightsAction::Count) => commands::cmd_insights_count(&db),
            }
        }
        Commands::Verify { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                VerifyAction::Challenge { category, json } => {
                    commands::cmd_verify_challenge(&db, &category, json)
                }
                VerifyAction::Check {
                    category,
                    response,
                    response_file,
                } => commands::cmd_verify_check(
                    &db,
                    &category,
                    response.as_deref(),
                    response_file.as_deref(),
                ),
            }
        }
    }
}
