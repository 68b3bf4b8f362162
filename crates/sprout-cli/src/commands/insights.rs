//! Insight command implementations

use anyhow::{Context, Result};
use sprout_core::db::Database;
use sprout_core::insights::{AnalysisContext, InsightEngine, UserReaction};

use super::truncate;

pub fn cmd_insights_analyze(db: &Database) -> Result<()> {
    println!("🔍 Analyzing your history for patterns...");

    let ctx = AnalysisContext::from_db(db)?;
    if ctx.snapshot.is_empty() {
        println!("   Nothing logged yet. Add some entries first.");
        return Ok(());
    }

    let engine = InsightEngine::new();
    let summary = engine.run(db, &ctx)?;

    println!();
    println!("📊 Analysis Results");
    println!("   ─────────────────────────────");
    println!("   ✨ New insights: {}", summary.created);
    println!("   💪 Reinforced: {}", summary.reinforced);
    println!("   Unchanged: {}", summary.unchanged);

    if summary.created > 0 {
        println!();
        println!("Run 'sprout insights list' to see what was found.");
    } else if summary.reinforced == 0 {
        println!();
        println!("No new patterns. Keep logging and check back in a few days.");
    }

    Ok(())
}

pub fn cmd_insights_list(db: &Database) -> Result<()> {
    let insights = db.list_insights()?;

    if insights.is_empty() {
        println!("No insights yet. Run 'sprout insights analyze' after logging a few days.");
        return Ok(());
    }

    println!();
    println!("💡 Insights");
    println!("   ─────────────────────────────────────────────────────────────");

    for insight in insights {
        let new_marker = if insight.is_new { "●" } else { " " };
        println!(
            "   {} #{:<4} [{:>11}] {}",
            new_marker,
            insight.id,
            insight.strength.as_str(),
            truncate(&insight.summary, 52)
        );
    }

    println!();
    println!("   ● = unseen. 'sprout insights show <id>' for details.");

    Ok(())
}

pub fn cmd_insights_show(db: &Database, id: i64) -> Result<()> {
    let insight = db
        .get_insight(id)?
        .with_context(|| format!("No insight with id {}", id))?;

    println!();
    println!("💡 Insight #{}", insight.id);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Category: {}", insight.category.as_str());
    println!(
        "   Strength: {} (confidence {:.0}%, seen {} times)",
        insight.strength.as_str(),
        insight.confidence * 100.0,
        insight.times_reinforced
    );
    println!("   First detected: {}", insight.first_detected.format("%Y-%m-%d"));
    println!("   Last reinforced: {}", insight.last_reinforced.format("%Y-%m-%d"));
    println!();
    println!("   {}", insight.summary);

    if let Some(detail) = &insight.detail {
        println!();
        println!("   {}", detail);
    }

    if let Some(experiment) = &insight.suggested_experiment {
        println!();
        println!("   🧪 Try this: {}", experiment);
    }

    if let Some(reaction) = insight.user_reaction {
        println!();
        println!("   Your reaction: {}", reaction.as_str());
    }

    println!();
    Ok(())
}

pub fn cmd_insights_ack(db: &Database, id: i64) -> Result<()> {
    db.acknowledge_insight(id)?;
    println!("✅ Insight #{} marked as seen.", id);
    Ok(())
}

pub fn cmd_insights_ack_all(db: &Database) -> Result<()> {
    db.acknowledge_all_insights()?;
    println!("✅ All insights marked as seen.");
    Ok(())
}

pub fn cmd_insights_react(db: &Database, id: i64, reaction: &str) -> Result<()> {
    // Accept both "already-knew" and "already_knew"
    let reaction: UserReaction = reaction
        .to_lowercase()
        .replace('-', "_")
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    db.record_insight_reaction(id, reaction)?;

    println!("✅ Recorded '{}' for insight #{}.", reaction.as_str(), id);
    Ok(())
}

pub fn cmd_insights_count(db: &Database) -> Result<()> {
    let count = db.count_new_insights()?;
    println!("{}", count);
    Ok(())
}
