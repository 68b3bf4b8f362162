//! Insight record database operations
//!
//! Insights are upserted by (category, pattern_key). Scoring
//! fields only ever move forward: reinforcement counts, confidence, and
//! strength are clamped against the stored record so a re-detection run can
//! never downgrade an insight.

use rusqlite::params;

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::insights::{Insight, InsightCategory, PatternSignal, Strength, UserReaction};

/// What an upsert did to the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new insight was created (pattern first crossed the evidence threshold)
    Created,
    /// An existing insight gained supporting evidence
    Reinforced,
    /// No scoring field moved (same history re-analyzed)
    Unchanged,
}

impl Database {
    /// Upsert an insight by its (category, pattern_key)
    ///
    /// `confidence` and `strength` are the engine's proposal for the signal's
    /// current evidence; stored values are only ever raised, never lowered.
    /// `last_reinforced_at` advances only when the reinforcement count grows.
    pub fn upsert_insight(
        &self,
        signal: &PatternSignal,
        confidence: f64,
        strength: Strength,
    ) -> Result<(i64, UpsertOutcome)> {
        let conn = self.conn()?;
        let now = format_datetime(chrono::Utc::now());
        let data_json = serde_json::to_string(&signal.data)?;

        let existing = conn
            .query_row(
                r#"
                SELECT id, times_reinforced, confidence, strength
                FROM insights
                WHERE category = ? AND pattern_key = ?
                "#,
                params![signal.category.as_str(), signal.pattern_key],
                |row| {
                    let strength_str: String = row.get(3)?;
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)? as u32,
                        row.get::<_, f64>(2)?,
                        strength_str.parse().unwrap_or(Strength::Emerging),
                    ))
                },
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;

        if let Some((id, old_reinforced, old_confidence, old_strength)) = existing {
            let new_reinforced = old_reinforced.max(signal.evidence_count);
            let new_confidence = old_confidence.max(confidence);
            let new_strength = old_strength.max(strength);

            let unchanged = new_reinforced == old_reinforced
                && new_confidence == old_confidence
                && new_strength == old_strength;
            let reinforced = new_reinforced > old_reinforced;

            conn.execute(
                r#"
                UPDATE insights
                SET times_reinforced = ?,
                    confidence = ?,
                    strength = ?,
                    summary = ?,
                    detail = ?,
                    suggested_experiment = ?,
                    data = ?,
                    last_reinforced_at = CASE WHEN ? THEN ? ELSE last_reinforced_at END
                WHERE id = ?
                "#,
                params![
                    new_reinforced as i64,
                    new_confidence,
                    new_strength.as_str(),
                    signal.summary,
                    signal.detail,
                    signal.suggested_experiment,
                    data_json,
                    reinforced,
                    now,
                    id
                ],
            )?;

            let outcome = if unchanged {
                UpsertOutcome::Unchanged
            } else {
                UpsertOutcome::Reinforced
            };
            return Ok((id, outcome));
        }

        conn.execute(
            r#"
            INSERT INTO insights (
                category, pattern_key, strength, confidence, times_reinforced,
                summary, detail, suggested_experiment, source, data,
                first_detected_at, last_reinforced_at, is_new
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'heuristic', ?, ?, ?, 1)
            "#,
            params![
                signal.category.as_str(),
                signal.pattern_key,
                strength.as_str(),
                confidence,
                signal.evidence_count as i64,
                signal.summary,
                signal.detail,
                signal.suggested_experiment,
                data_json,
                now,
                now
            ],
        )?;

        Ok((conn.last_insert_rowid(), UpsertOutcome::Created))
    }

    /// List all insights, strongest and most recently reinforced first
    pub fn list_insights(&self) -> Result<Vec<Insight>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, category, pattern_key, strength, confidence, times_reinforced,
                   summary, detail, suggested_experiment, source, data,
                   first_detected_at, last_reinforced_at, is_new, user_reaction
            FROM insights
            ORDER BY
                CASE strength
                    WHEN 'strong' THEN 1
                    WHEN 'established' THEN 2
                    WHEN 'developing' THEN 3
                    ELSE 4
                END,
                last_reinforced_at DESC
            "#,
        )?;

        let rows = stmt.query_map([], row_to_insight)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Get a single insight by id
    pub fn get_insight(&self, id: i64) -> Result<Option<Insight>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            r#"
            SELECT id, category, pattern_key, strength, confidence, times_reinforced,
                   summary, detail, suggested_experiment, source, data,
                   first_detected_at, last_reinforced_at, is_new, user_reaction
            FROM insights
            WHERE id = ?
            "#,
            params![id],
            row_to_insight,
        );

        match result {
            Ok(insight) => Ok(Some(insight)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Mark a single insight as seen. Idempotent for an existing insight.
    pub fn acknowledge_insight(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let updated =
            conn.execute("UPDATE insights SET is_new = 0 WHERE id = ?", params![id])?;
        if updated == 0 {
            return Err(Error::NotFound(format!("insight {}", id)));
        }
        Ok(())
    }

    /// Mark every insight as seen. Idempotent.
    pub fn acknowledge_all_insights(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("UPDATE insights SET is_new = 0", [])?;
        Ok(())
    }

    /// Record the user's reaction to an insight. Last write wins; scoring
    /// fields are untouched.
    pub fn record_insight_reaction(&self, id: i64, reaction: UserReaction) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE insights SET user_reaction = ? WHERE id = ?",
            params![reaction.as_str(), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("insight {}", id)));
        }
        Ok(())
    }

    /// Count of unacknowledged insights
    pub fn count_new_insights(&self) -> Result<u32> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM insights WHERE is_new = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }
}

fn row_to_insight(row: &rusqlite::Row) -> rusqlite::Result<Insight> {
    let category_str: String = row.get(1)?;
    let strength_str: String = row.get(3)?;
    let data_json: String = row.get(10)?;
    let first_str: String = row.get(11)?;
    let last_str: String = row.get(12)?;
    let reaction_str: Option<String> = row.get(14)?;

    Ok(Insight {
        id: row.get(0)?,
        category: category_str.parse().unwrap_or(InsightCategory::Correlation),
        pattern_key: row.get(2)?,
        strength: strength_str.parse().unwrap_or(Strength::Emerging),
        confidence: row.get(4)?,
        times_reinforced: row.get::<_, i64>(5)? as u32,
        summary: row.get(6)?,
        detail: row.get(7)?,
        suggested_experiment: row.get(8)?,
        source: row.get(9)?,
        data: serde_json::from_str(&data_json).unwrap_or_default(),
        first_detected: parse_datetime(&first_str),
        last_reinforced: parse_datetime(&last_str),
        is_new: row.get(13)?,
        user_reaction: reaction_str.and_then(|s| s.parse().ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sleep_signal(evidence: u32) -> PatternSignal {
        PatternSignal::new(
            InsightCategory::Sleep,
            "sleep:poor->mood:negative",
            evidence,
            "Mood tends to dip after poor sleep",
        )
    }

    #[test]
    fn test_upsert_creates_then_reinforces() {
        let db = Database::in_memory().unwrap();

        let (id1, outcome) = db
            .upsert_insight(&sleep_signal(3), 0.43, Strength::Emerging)
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Created);

        let (id2, outcome) = db
            .upsert_insight(&sleep_signal(6), 0.6, Strength::Developing)
            .unwrap();
        assert_eq!(id1, id2);
        assert_eq!(outcome, UpsertOutcome::Reinforced);

        let insight = db.get_insight(id1).unwrap().unwrap();
        assert_eq!(insight.times_reinforced, 6);
        assert_eq!(insight.strength, Strength::Developing);
        assert!(insight.is_new);
    }

    #[test]
    fn test_upsert_same_evidence_is_unchanged() {
        let db = Database::in_memory().unwrap();

        db.upsert_insight(&sleep_signal(4), 0.5, Strength::Emerging)
            .unwrap();
        let before = db.list_insights().unwrap().remove(0);

        let (_, outcome) = db
            .upsert_insight(&sleep_signal(4), 0.5, Strength::Emerging)
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Unchanged);

        let after = db.list_insights().unwrap().remove(0);
        assert_eq!(after.times_reinforced, before.times_reinforced);
        assert_eq!(after.confidence, before.confidence);
        assert_eq!(after.strength, before.strength);
        assert_eq!(after.last_reinforced, before.last_reinforced);
    }

    #[test]
    fn test_upsert_never_regresses_scores() {
        let db = Database::in_memory().unwrap();

        db.upsert_insight(&sleep_signal(8), 0.7, Strength::Developing)
            .unwrap();
        // Weaker proposal (pattern supported by fewer observations now)
        let (_, outcome) = db
            .upsert_insight(&sleep_signal(5), 0.5, Strength::Emerging)
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Unchanged);

        let insight = db.list_insights().unwrap().remove(0);
        assert_eq!(insight.times_reinforced, 8);
        assert_eq!(insight.confidence, 0.7);
        assert_eq!(insight.strength, Strength::Developing);
    }

    #[test]
    fn test_acknowledge_clears_new_flag() {
        let db = Database::in_memory().unwrap();

        let (id, _) = db
            .upsert_insight(&sleep_signal(3), 0.4, Strength::Emerging)
            .unwrap();
        db.upsert_insight(
            &PatternSignal::new(InsightCategory::Momentum, "momentum:streak", 4, "Streak"),
            0.5,
            Strength::Emerging,
        )
        .unwrap();

        assert_eq!(db.count_new_insights().unwrap(), 2);

        db.acknowledge_insight(id).unwrap();
        assert_eq!(db.count_new_insights().unwrap(), 1);
        // Idempotent
        db.acknowledge_insight(id).unwrap();
        assert_eq!(db.count_new_insights().unwrap(), 1);

        db.acknowledge_all_insights().unwrap();
        assert_eq!(db.count_new_insights().unwrap(), 0);
    }

    #[test]
    fn test_writes_to_missing_insight_are_not_found() {
        let db = Database::in_memory().unwrap();

        assert!(matches!(
            db.acknowledge_insight(999),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            db.record_insight_reaction(999, UserReaction::Helpful),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_reaction_last_write_wins() {
        let db = Database::in_memory().unwrap();

        let (id, _) = db
            .upsert_insight(&sleep_signal(3), 0.4, Strength::Emerging)
            .unwrap();

        db.record_insight_reaction(id, UserReaction::Surprising)
            .unwrap();
        db.record_insight_reaction(id, UserReaction::AlreadyKnew)
            .unwrap();

        let insight = db.get_insight(id).unwrap().unwrap();
        assert_eq!(insight.user_reaction, Some(UserReaction::AlreadyKnew));
        assert_eq!(insight.strength, Strength::Emerging);
    }

    #[test]
    fn test_clear_history_prunes_insights() {
        let db = Database::in_memory().unwrap();

        db.upsert_insight(&sleep_signal(3), 0.4, Strength::Emerging)
            .unwrap();
        assert_eq!(db.list_insights().unwrap().len(), 1);

        db.clear_history().unwrap();
        assert!(db.list_insights().unwrap().is_empty());
    }

    #[test]
    fn test_list_orders_by_strength() {
        let db = Database::in_memory().unwrap();

        db.upsert_insight(&sleep_signal(3), 0.4, Strength::Emerging)
            .unwrap();
        db.upsert_insight(
            &PatternSignal::new(InsightCategory::Momentum, "momentum:streak", 20, "Streak"),
            0.9,
            Strength::Established,
        )
        .unwrap();

        let insights = db.list_insights().unwrap();
        assert_eq!(insights[0].strength, Strength::Established);
        assert_eq!(insights[1].strength, Strength::Emerging);
    }
}
