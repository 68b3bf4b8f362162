//! Journal entry command implementations

use anyhow::Result;
use sprout_core::db::Database;
use sprout_core::models::{Mood, NewJournalEntry};

use super::truncate;

pub fn cmd_journal_add(
    db: &Database,
    body: &str,
    mood: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let date = super::resolve_date(date)?;
    let mood = mood
        .map(|m| m.parse::<Mood>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let id = db.add_journal_entry(&NewJournalEntry {
        date,
        body: body.to_string(),
        mood,
    })?;

    println!("🌱 Entry #{} saved for {}", id, date);
    if let Some(m) = mood {
        println!("   Mood: {}", m.as_str());
    }

    Ok(())
}

pub fn cmd_journal_list(db: &Database, limit: usize) -> Result<()> {
    let entries = db.list_journal_entries(limit)?;

    if entries.is_empty() {
        println!("No journal entries yet. Write one with:");
        println!("  sprout journal add \"How today went...\"");
        return Ok(());
    }

    println!();
    println!("📓 Recent Entries");
    println!("   ─────────────────────────────────────────────────────────────");

    for entry in entries {
        let mood_str = entry
            .mood
            .map(|m| format!(" [{}]", m.as_str()))
            .unwrap_or_default();
        println!(
            "   #{:<4} {} {}{}",
            entry.id,
            entry.date,
            truncate(&entry.body, 48),
            mood_str
        );
    }

    Ok(())
}
