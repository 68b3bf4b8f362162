//! Quick-log (twig) command implementations

use anyhow::Result;
use sprout_core::db::Database;
use sprout_core::models::{NewTwig, TwigKind};

use super::truncate;

pub fn cmd_twig_log(
    db: &Database,
    kind: &str,
    value: &str,
    note: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let date = super::resolve_date(date)?;

    // Unknown kinds become custom metrics, keeping the label in the value
    let (kind, value) = match kind.parse::<TwigKind>() {
        Ok(k) => (k, value.to_string()),
        Err(_) => (TwigKind::Custom, format!("{}: {}", kind, value)),
    };

    let id = db.add_twig(&NewTwig {
        date,
        kind,
        value: value.clone(),
        note: note.map(String::from),
    })?;

    println!("🌿 Twig #{} logged for {}: {} = {}", id, date, kind.as_str(), value);

    Ok(())
}

pub fn cmd_twig_list(db: &Database, limit: usize) -> Result<()> {
    let twigs = db.list_twigs(limit)?;

    if twigs.is_empty() {
        println!("No twigs yet. Log one with:");
        println!("  sprout twig log mood low");
        return Ok(());
    }

    println!();
    println!("🌿 Recent Twigs");
    println!("   ─────────────────────────────────────────────────────────────");

    for twig in twigs {
        let note_str = twig
            .note
            .as_deref()
            .map(|n| format!(" ({})", truncate(n, 30)))
            .unwrap_or_default();
        println!(
            "   #{:<4} {} {:>7}: {}{}",
            twig.id,
            twig.date,
            twig.kind.as_str(),
            twig.value,
            note_str
        );
    }

    Ok(())
}
