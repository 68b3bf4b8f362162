//! Integration tests for sprout-core
//!
//! These tests exercise the full log → analyze → acknowledge workflow and
//! the verification harness against a populated database.

use chrono::NaiveDate;

use sprout_core::{
    db::Database,
    generate_challenge,
    insights::{AnalysisContext, InsightCategory, InsightEngine, Strength, UserReaction},
    models::{Mood, NewJournalEntry, NewTwig, TwigKind},
    policy::StrengthPolicy,
    snapshot::HistorySnapshot,
    verify::{verify_response, ChallengeCategory, DataSnapshot},
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

/// Log one poor-sleep day with a low mood journal entry
fn log_rough_day(db: &Database, date: NaiveDate) {
    db.add_twig(&NewTwig {
        date,
        kind: TwigKind::Sleep,
        value: "poor".to_string(),
        note: None,
    })
    .expect("Failed to add sleep twig");
    db.add_journal_entry(&NewJournalEntry {
        date,
        body: "Slept badly again, everything felt heavier than it should".to_string(),
        mood: Some(Mood::Low),
    })
    .expect("Failed to add journal entry");
}

fn analysis_ctx(db: &Database, today: NaiveDate) -> AnalysisContext {
    AnalysisContext::new(
        HistorySnapshot::load(db).expect("Failed to load snapshot"),
        StrengthPolicy::default(),
        today,
    )
}

// =============================================================================
// Insight Engine Properties
// =============================================================================

#[test]
fn test_analysis_is_idempotent_without_new_data() {
    let db = Database::in_memory().unwrap();
    for d in 1..=4 {
        log_rough_day(&db, day(d));
    }

    let engine = InsightEngine::new();
    engine.run(&db, &analysis_ctx(&db, day(5))).unwrap();
    let before = db.list_insights().unwrap();
    assert!(!before.is_empty());

    let summary = engine.run(&db, &analysis_ctx(&db, day(5))).unwrap();
    assert_eq!(summary.created, 0);
    assert_eq!(summary.reinforced, 0);

    let after = db.list_insights().unwrap();
    assert_eq!(before.len(), after.len());
    for b in &before {
        let a = after
            .iter()
            .find(|a| a.pattern_key == b.pattern_key)
            .expect("insight should survive rerun");
        assert_eq!(b.strength, a.strength);
        assert_eq!(b.confidence, a.confidence);
        assert_eq!(b.times_reinforced, a.times_reinforced);
    }
}

#[test]
fn test_strength_never_decreases_across_runs() {
    let db = Database::in_memory().unwrap();
    let engine = InsightEngine::new();

    let mut last_ranks: Vec<(String, u8)> = Vec::new();
    for week in 0..4u32 {
        for offset in 1..=3 {
            log_rough_day(&db, day(week * 7 + offset));
        }
        engine.run(&db, &analysis_ctx(&db, day(week * 7 + 4))).unwrap();

        let insights = db.list_insights().unwrap();
        for insight in &insights {
            if let Some((_, old_rank)) = last_ranks
                .iter()
                .find(|(key, _)| *key == insight.pattern_key)
            {
                assert!(insight.strength.rank() >= *old_rank);
            }
        }
        last_ranks = insights
            .iter()
            .map(|i| (i.pattern_key.clone(), i.strength.rank()))
            .collect();
    }
}

#[test]
fn test_three_rough_days_emerge_then_six_develop() {
    let db = Database::in_memory().unwrap();
    let engine = InsightEngine::new();

    // Week one: three poor-sleep days with low mood
    for d in 1..=3 {
        log_rough_day(&db, day(d));
    }
    engine.run(&db, &analysis_ctx(&db, day(4))).unwrap();

    let sleep = db
        .list_insights()
        .unwrap()
        .into_iter()
        .find(|i| i.category == InsightCategory::Sleep && i.pattern_key.contains("poor"))
        .expect("sleep insight should exist");
    assert_eq!(sleep.times_reinforced, 3);
    assert_eq!(sleep.strength, Strength::Emerging);
    assert!(sleep.is_new);

    // Week two: an identical second week reinforces it
    for d in 8..=10 {
        log_rough_day(&db, day(d));
    }
    engine.run(&db, &analysis_ctx(&db, day(11))).unwrap();

    let sleep = db.get_insight(sleep.id).unwrap().unwrap();
    assert_eq!(sleep.times_reinforced, 6);
    assert_eq!(sleep.strength, Strength::Developing);
}

#[test]
fn test_acknowledge_all_zeroes_new_count() {
    let db = Database::in_memory().unwrap();
    for d in 1..=4 {
        log_rough_day(&db, day(d));
    }

    let engine = InsightEngine::new();
    engine.run(&db, &analysis_ctx(&db, day(5))).unwrap();
    assert!(db.count_new_insights().unwrap() > 0);

    db.acknowledge_all_insights().unwrap();
    assert_eq!(db.count_new_insights().unwrap(), 0);
}

#[test]
fn test_reaction_is_last_write_wins_and_inert() {
    let db = Database::in_memory().unwrap();
    for d in 1..=3 {
        log_rough_day(&db, day(d));
    }

    let engine = InsightEngine::new();
    engine.run(&db, &analysis_ctx(&db, day(4))).unwrap();

    let insight = db.list_insights().unwrap().remove(0);
    db.record_insight_reaction(insight.id, UserReaction::Helpful)
        .unwrap();
    db.record_insight_reaction(insight.id, UserReaction::NotApplicable)
        .unwrap();

    let updated = db.get_insight(insight.id).unwrap().unwrap();
    assert_eq!(updated.user_reaction, Some(UserReaction::NotApplicable));
    assert_eq!(updated.strength, insight.strength);
    assert_eq!(updated.confidence, insight.confidence);
}

#[test]
fn test_empty_history_runs_clean() {
    let db = Database::in_memory().unwrap();
    let engine = InsightEngine::new();

    let summary = engine.run(&db, &analysis_ctx(&db, day(1))).unwrap();
    assert_eq!(summary.created, 0);
    assert!(db.list_insights().unwrap().is_empty());
}

#[test]
fn test_clear_history_is_the_only_pruning_path() {
    let db = Database::in_memory().unwrap();
    for d in 1..=4 {
        log_rough_day(&db, day(d));
    }

    let engine = InsightEngine::new();
    engine.run(&db, &analysis_ctx(&db, day(5))).unwrap();
    assert!(!db.list_insights().unwrap().is_empty());

    db.clear_history().unwrap();
    assert!(db.list_insights().unwrap().is_empty());
    assert!(db.list_journal_entries(10).unwrap().is_empty());
    assert!(db.list_twigs(10).unwrap().is_empty());
}

// =============================================================================
// Verification Harness over real data
// =============================================================================

#[test]
fn test_data_accuracy_round_trip_against_database() {
    let db = Database::in_memory().unwrap();
    db.add_journal_entry(&NewJournalEntry {
        date: day(10),
        body: "Long call with my brother about the house renovation".to_string(),
        mood: Some(Mood::Good),
    })
    .unwrap();
    db.add_twig(&NewTwig {
        date: day(10),
        kind: TwigKind::Mood,
        value: "good".to_string(),
        note: None,
    })
    .unwrap();

    let snapshot = DataSnapshot::build(&db, day(10)).unwrap();
    assert_eq!(snapshot.journal_count, 1);
    assert_eq!(snapshot.twig_count, 1);

    let challenge = generate_challenge(ChallengeCategory::DataAccuracy, &snapshot);
    let report = verify_response(
        &challenge,
        "You wrote 1 journal entry about the renovation and logged 1 quick note.",
        &snapshot,
    );

    assert!(report.passed, "issues: {:?}", report.issues);
    assert!(report
        .positives
        .iter()
        .any(|p| p.contains("Correctly stated journal count")));
}

#[test]
fn test_generic_response_fails_against_real_data() {
    let db = Database::in_memory().unwrap();
    for d in 1..=3 {
        db.add_journal_entry(&NewJournalEntry {
            date: day(d),
            body: "Another stressful deadline at the office".to_string(),
            mood: Some(Mood::Anxious),
        })
        .unwrap();
    }

    let snapshot = DataSnapshot::build(&db, day(3)).unwrap();
    let challenge = generate_challenge(ChallengeCategory::CrossDomain, &snapshot);
    let report = verify_response(
        &challenge,
        "It seems like life gets busy sometimes. Many people struggle with balance.",
        &snapshot,
    );

    assert!(!report.passed);
    assert!(report.issues.iter().any(|i| i.contains("life context")));
}
