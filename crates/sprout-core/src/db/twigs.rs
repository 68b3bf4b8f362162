//! Twig (quick log) database operations

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewTwig, Twig, TwigKind};

impl Database {
    /// Insert a twig, returning its id
    pub fn add_twig(&self, twig: &NewTwig) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO twigs (date, kind, value, note) VALUES (?, ?, ?, ?)",
            params![
                twig.date.format("%Y-%m-%d").to_string(),
                twig.kind.as_str(),
                twig.value,
                twig.note,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List twigs, most recent first
    pub fn list_twigs(&self, limit: usize) -> Result<Vec<Twig>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, kind, value, note, created_at
            FROM twigs
            ORDER BY date DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![limit as i64], row_to_twig)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// All twigs, oldest first (for analysis snapshots)
    pub fn all_twigs(&self) -> Result<Vec<Twig>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, kind, value, note, created_at
            FROM twigs
            ORDER BY date ASC, id ASC
            "#,
        )?;

        let rows = stmt.query_map([], row_to_twig)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Twigs for a single day
    pub fn twigs_on(&self, date: NaiveDate) -> Result<Vec<Twig>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, kind, value, note, created_at
            FROM twigs
            WHERE date = ?
            ORDER BY id ASC
            "#,
        )?;

        let rows = stmt.query_map(params![date.format("%Y-%m-%d").to_string()], row_to_twig)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Count of twigs for a single day
    pub fn count_twigs_on(&self, date: NaiveDate) -> Result<u32> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM twigs WHERE date = ?",
            params![date.format("%Y-%m-%d").to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }
}

fn row_to_twig(row: &rusqlite::Row) -> rusqlite::Result<Twig> {
    let date_str: String = row.get(1)?;
    let kind_str: String = row.get(2)?;
    let created_str: String = row.get(5)?;

    Ok(Twig {
        id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| chrono::Utc::now().date_naive()),
        kind: kind_str.parse().unwrap_or(TwigKind::Custom),
        value: row.get(3)?,
        note: row.get(4)?,
        created_at: parse_datetime(&created_str),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_add_and_list_twigs() {
        let db = Database::in_memory().unwrap();

        db.add_twig(&NewTwig {
            date: day(1),
            kind: TwigKind::Sleep,
            value: "poor".to_string(),
            note: None,
        })
        .unwrap();
        db.add_twig(&NewTwig {
            date: day(2),
            kind: TwigKind::Mood,
            value: "low".to_string(),
            note: Some("rough morning".to_string()),
        })
        .unwrap();

        let twigs = db.list_twigs(10).unwrap();
        assert_eq!(twigs.len(), 2);
        assert_eq!(twigs[0].kind, TwigKind::Mood);
        assert_eq!(twigs[0].note.as_deref(), Some("rough morning"));
    }

    #[test]
    fn test_twigs_on_day() {
        let db = Database::in_memory().unwrap();

        for kind in [TwigKind::Sleep, TwigKind::Mood] {
            db.add_twig(&NewTwig {
                date: day(7),
                kind,
                value: "poor".to_string(),
                note: None,
            })
            .unwrap();
        }

        assert_eq!(db.count_twigs_on(day(7)).unwrap(), 2);
        assert_eq!(db.count_twigs_on(day(8)).unwrap(), 0);
        assert_eq!(db.twigs_on(day(7)).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_custom() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        conn.execute(
            "INSERT INTO twigs (date, kind, value) VALUES ('2026-03-01', 'mystery', 'x')",
            [],
        )
        .unwrap();
        drop(conn);

        let twigs = db.list_twigs(1).unwrap();
        assert_eq!(twigs[0].kind, TwigKind::Custom);
    }
}
