//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use sprout_core::db::Database;
use sprout_core::models::{Mood, NewJournalEntry, TwigKind};

use crate::commands::{self, resolve_date, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn seed_week(db: &Database) {
    for d in 1..=3 {
        let date = NaiveDate::from_ymd_opt(2026, 5, d).unwrap();
        commands::cmd_twig_log(db, "sleep", "poor", None, Some(&date.to_string())).unwrap();
        db.add_journal_entry(&NewJournalEntry {
            date,
            body: "Dragged through the whole day after a rough night".to_string(),
            mood: Some(Mood::Low),
        })
        .unwrap();
    }
}

// ========== Journal Command Tests ==========

#[test]
fn test_cmd_journal_add_and_list() {
    let db = setup_test_db();
    commands::cmd_journal_add(&db, "Walked by the river before work", Some("good"), None)
        .unwrap();

    let entries = db.list_journal_entries(10).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].mood, Some(Mood::Good));

    assert!(commands::cmd_journal_list(&db, 10).is_ok());
}

#[test]
fn test_cmd_journal_add_rejects_bad_mood() {
    let db = setup_test_db();
    let result = commands::cmd_journal_add(&db, "test", Some("ecstatic"), None);
    assert!(result.is_err());
    assert!(db.list_journal_entries(10).unwrap().is_empty());
}

#[test]
fn test_cmd_journal_add_rejects_bad_date() {
    let db = setup_test_db();
    let result = commands::cmd_journal_add(&db, "test", None, Some("05/01/2026"));
    assert!(result.is_err());
}

// ========== Twig Command Tests ==========

#[test]
fn test_cmd_twig_log_known_kind() {
    let db = setup_test_db();
    commands::cmd_twig_log(&db, "sleep", "poor", Some("up at 3am"), None).unwrap();

    let twigs = db.list_twigs(10).unwrap();
    assert_eq!(twigs.len(), 1);
    assert_eq!(twigs[0].kind, TwigKind::Sleep);
    assert_eq!(twigs[0].value, "poor");
}

#[test]
fn test_cmd_twig_log_unknown_kind_becomes_custom() {
    let db = setup_test_db();
    commands::cmd_twig_log(&db, "exercise", "gym", None, None).unwrap();

    let twigs = db.list_twigs(10).unwrap();
    assert_eq!(twigs[0].kind, TwigKind::Custom);
    assert_eq!(twigs[0].value, "exercise: gym");
}

// ========== Insight Command Tests ==========

#[test]
fn test_cmd_insights_analyze_and_list() {
    let db = setup_test_db();
    seed_week(&db);

    commands::cmd_insights_analyze(&db).unwrap();
    assert!(!db.list_insights().unwrap().is_empty());

    assert!(commands::cmd_insights_list(&db).is_ok());
}

#[test]
fn test_cmd_insights_analyze_empty_db() {
    let db = setup_test_db();
    commands::cmd_insights_analyze(&db).unwrap();
    assert!(db.list_insights().unwrap().is_empty());
}

#[test]
fn test_cmd_insights_ack_flow() {
    let db = setup_test_db();
    seed_week(&db);
    commands::cmd_insights_analyze(&db).unwrap();

    let insight = db.list_insights().unwrap().remove(0);
    assert!(insight.is_new);

    commands::cmd_insights_ack(&db, insight.id).unwrap();
    let updated = db.get_insight(insight.id).unwrap().unwrap();
    assert!(!updated.is_new);
}

#[test]
fn test_cmd_insights_react_accepts_hyphenated() {
    let db = setup_test_db();
    seed_week(&db);
    commands::cmd_insights_analyze(&db).unwrap();

    let insight = db.list_insights().unwrap().remove(0);
    commands::cmd_insights_react(&db, insight.id, "already-knew").unwrap();

    let updated = db.get_insight(insight.id).unwrap().unwrap();
    assert!(updated.user_reaction.is_some());
}

#[test]
fn test_cmd_insights_react_unknown_insight() {
    let db = setup_test_db();
    let result = commands::cmd_insights_react(&db, 999, "helpful");
    assert!(result.is_err());
}

#[test]
fn test_cmd_insights_ack_unknown_insight() {
    let db = setup_test_db();
    assert!(commands::cmd_insights_ack(&db, 999).is_err());
}

#[test]
fn test_cmd_insights_show_unknown_id() {
    let db = setup_test_db();
    assert!(commands::cmd_insights_show(&db, 42).is_err());
}

// ========== Verify Command Tests ==========

#[test]
fn test_cmd_verify_challenge_all_categories() {
    let db = setup_test_db();
    seed_week(&db);

    for category in [
        "data-accuracy",
        "cross-domain",
        "long-term-correlation",
        "mental-health-framing",
    ] {
        assert!(commands::cmd_verify_challenge(&db, category, false).is_ok());
        assert!(commands::cmd_verify_challenge(&db, category, true).is_ok());
    }
}

#[test]
fn test_cmd_verify_challenge_bad_category() {
    let db = setup_test_db();
    assert!(commands::cmd_verify_challenge(&db, "vibes", false).is_err());
}

#[test]
fn test_cmd_verify_check_requires_a_response() {
    let db = setup_test_db();
    let result = commands::cmd_verify_check(&db, "data-accuracy", None, None);
    assert!(result.is_err());
}

#[test]
fn test_cmd_verify_check_scores_a_response() {
    let db = setup_test_db();
    seed_week(&db);

    let result = commands::cmd_verify_check(
        &db,
        "mental-health-framing",
        Some("You've been logging consistently. That takes real effort."),
        None,
    );
    assert!(result.is_ok());
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer string here", 10), "a much ...");
}

#[test]
fn test_resolve_date() {
    let date = resolve_date(Some("2026-05-01")).unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    assert!(resolve_date(Some("not-a-date")).is_err());
    assert!(resolve_date(None).is_ok());
}
