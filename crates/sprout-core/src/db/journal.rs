//! Journal entry database operations

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{JournalEntry, NewJournalEntry};

impl Database {
    /// Insert a journal entry, returning its id
    pub fn add_journal_entry(&self, entry: &NewJournalEntry) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO journal_entries (date, body, mood) VALUES (?, ?, ?)",
            params![
                entry.date.format("%Y-%m-%d").to_string(),
                entry.body,
                entry.mood.map(|m| m.as_str()),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List journal entries, most recent first
    pub fn list_journal_entries(&self, limit: usize) -> Result<Vec<JournalEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, body, mood, created_at
            FROM journal_entries
            ORDER BY date DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![limit as i64], row_to_journal_entry)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// All journal entries, oldest first (for analysis snapshots)
    pub fn all_journal_entries(&self) -> Result<Vec<JournalEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, body, mood, created_at
            FROM journal_entries
            ORDER BY date ASC, id ASC
            "#,
        )?;

        let rows = stmt.query_map([], row_to_journal_entry)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Journal entries for a single day
    pub fn journal_entries_on(&self, date: NaiveDate) -> Result<Vec<JournalEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, body, mood, created_at
            FROM journal_entries
            WHERE date = ?
            ORDER BY id ASC
            "#,
        )?;

        let rows = stmt.query_map(
            params![date.format("%Y-%m-%d").to_string()],
            row_to_journal_entry,
        )?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Count of journal entries for a single day
    pub fn count_journal_entries_on(&self, date: NaiveDate) -> Result<u32> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM journal_entries WHERE date = ?",
            params![date.format("%Y-%m-%d").to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }
}

fn row_to_journal_entry(row: &rusqlite::Row) -> rusqlite::Result<JournalEntry> {
    let date_str: String = row.get(1)?;
    let mood_str: Option<String> = row.get(3)?;
    let created_str: String = row.get(4)?;

    Ok(JournalEntry {
        id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| chrono::Utc::now().date_naive()),
        body: row.get(2)?,
        mood: mood_str.and_then(|s| s.parse().ok()),
        created_at: parse_datetime(&created_str),
    })
}
