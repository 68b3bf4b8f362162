//! Verification command implementations
//!
//! These commands form a manual test loop for AI integrations: `challenge`
//! generates a prompt grounded in the user's real data, the user pastes it
//! into the AI under test, and `check` scores the response.

use std::path::Path;

use anyhow::{Context, Result};
use sprout_core::db::Database;
use sprout_core::verify::{generate_challenge, verify_response, ChallengeCategory, DataSnapshot};

fn parse_category(s: &str) -> Result<ChallengeCategory> {
    // Accept both "data-accuracy" and "data_accuracy"
    s.to_lowercase()
        .replace('-', "_")
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
}

pub fn cmd_verify_challenge(db: &Database, category: &str, json: bool) -> Result<()> {
    let category = parse_category(category)?;
    let today = chrono::Local::now().date_naive();
    let snapshot = DataSnapshot::build(db, today)?;

    let challenge = generate_challenge(category, &snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&challenge)?);
        return Ok(());
    }

    println!();
    println!("🎯 Challenge ({})", challenge.category.as_str());
    println!("   ─────────────────────────────────────────────────────────────");
    println!();
    println!("Paste this prompt into the AI under test:");
    println!();
    println!("{}", challenge.prefilled_prompt);
    println!();
    println!("A grounded answer should reference:");
    println!("  {}", challenge.expected_data);
    println!();
    println!("Then score the response with:");
    println!(
        "  sprout verify check --category {} --response \"...\"",
        challenge.category.as_str()
    );

    Ok(())
}

pub fn cmd_verify_check(
    db: &Database,
    category: &str,
    response: Option<&str>,
    response_file: Option<&Path>,
) -> Result<()> {
    let category = parse_category(category)?;

    let response = match (response, response_file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read response file: {}", path.display()))?,
        (None, None) => anyhow::bail!("Provide the AI response via --response or --response-file"),
    };

    let today = chrono::Local::now().date_naive();
    let snapshot = DataSnapshot::build(db, today)?;
    let challenge = generate_challenge(category, &snapshot);
    let report = verify_response(&challenge, &response, &snapshot);

    println!();
    println!("🔬 Verification Report ({})", category.as_str());
    println!("   ─────────────────────────────────────────────────────────────");

    for positive in &report.positives {
        println!("   ✅ {}", positive);
    }
    for issue in &report.issues {
        println!("   ❌ {}", issue);
    }

    println!();
    if report.passed {
        println!("✅ PASSED - the response appears grounded in your data.");
    } else {
        println!(
            "❌ FAILED - {} issue(s) found. The AI may not be reading your data.",
            report.issues.len()
        );
    }

    Ok(())
}
