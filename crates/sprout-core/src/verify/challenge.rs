//! Data snapshot assembly and challenge generation

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::db::Database;
use crate::error::Result;
use crate::models::TwigKind;

use super::types::{Challenge, ChallengeCategory, DataSnapshot};

/// How far back to look for recent moods
const MOOD_WINDOW_DAYS: i64 = 7;
/// How many recent entries feed the life-context keyword list
const CONTEXT_ENTRY_WINDOW: usize = 10;
/// Cap on the keyword list
const MAX_KEYWORDS: usize = 20;

/// Common words that carry no life context
const STOPWORDS: &[&str] = &[
    "about", "after", "again", "could", "doing", "every", "feeling", "going", "maybe", "might",
    "other", "really", "should", "something", "their", "there", "these", "thing", "things",
    "think", "though", "today", "wanted", "where", "which", "while", "would",
];

impl DataSnapshot {
    /// Build a snapshot of the user's data for a given day
    ///
    /// A storage failure here is a typed error the caller surfaces as its own
    /// state; it is not a failed verification.
    pub fn build(db: &Database, date: NaiveDate) -> Result<Self> {
        let todays_entries = db.journal_entries_on(date)?;
        let journal_previews = todays_entries.iter().map(|e| e.preview(120)).collect();
        let journal_count = db.count_journal_entries_on(date)?;
        let twig_count = db.count_twigs_on(date)?;

        // Life-context keywords: words that recur across recent entries,
        // plus the names of custom metrics the user tracks
        let recent_entries = db.list_journal_entries(CONTEXT_ENTRY_WINDOW)?;
        let mut freq: HashMap<String, u32> = HashMap::new();
        for entry in &recent_entries {
            for word in content_words(&entry.body) {
                *freq.entry(word).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(String, u32)> = freq
            .into_iter()
            .filter(|(_, count)| *count >= 2)
            .collect();
        // Most recurrent first, ties broken by word so the cap is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let mut life_context_keywords: Vec<String> =
            ranked.into_iter().map(|(word, _)| word).collect();

        let all_twigs = db.list_twigs(200)?;
        for twig in &all_twigs {
            if twig.kind == TwigKind::Custom {
                let value = twig.value.to_lowercase();
                if value.len() > 4 && !life_context_keywords.contains(&value) {
                    life_context_keywords.push(value);
                }
            }
        }
        life_context_keywords.truncate(MAX_KEYWORDS);

        // Recent moods from twigs and journal entries in the window
        let cutoff = date - Duration::days(MOOD_WINDOW_DAYS);
        let mut recent_moods = Vec::new();
        for twig in &all_twigs {
            if twig.date >= cutoff && twig.date <= date {
                if let Some(mood) = twig.mood() {
                    if !recent_moods.contains(&mood) {
                        recent_moods.push(mood);
                    }
                }
            }
        }
        for entry in &recent_entries {
            if entry.date >= cutoff && entry.date <= date {
                if let Some(mood) = entry.mood {
                    if !recent_moods.contains(&mood) {
                        recent_moods.push(mood);
                    }
                }
            }
        }

        Ok(Self {
            date,
            journal_previews,
            journal_count,
            twig_count,
            life_context_keywords,
            recent_moods,
        })
    }
}

/// Lowercased words longer than 4 characters, stopwords removed
pub(crate) fn content_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 4)
        .filter(|w| !STOPWORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}

/// Generate a challenge for a category, referencing the snapshot's real data
pub fn generate_challenge(category: ChallengeCategory, snapshot: &DataSnapshot) -> Challenge {
    let (prefilled_prompt, expected_data) = match category {
        ChallengeCategory::DataAccuracy => (
            format!(
                "How many journal entries and quick logs did I record on {}? \
                 Mention the exact numbers and one thing I wrote about.",
                snapshot.date.format("%B %-d")
            ),
            format!(
                "The exact counts: {} journal entr{}, {} twig{}, and a word from today's entries.",
                snapshot.journal_count,
                if snapshot.journal_count == 1 { "y" } else { "ies" },
                snapshot.twig_count,
                if snapshot.twig_count == 1 { "" } else { "s" },
            ),
        ),
        ChallengeCategory::CrossDomain => (
            "Looking at my recent logs, how does my sleep connect to my mood and \
             the rest of what's going on in my life right now?"
                .to_string(),
            format!(
                "References to your life context ({}) tied to logged sleep and mood.",
                if snapshot.life_context_keywords.is_empty() {
                    "none on record yet".to_string()
                } else {
                    snapshot.life_context_keywords.join(", ")
                }
            ),
        ),
        ChallengeCategory::LongTermCorrelation => (
            "Over the past few weeks, what pattern do you see between what I've been \
             dealing with and how my mood has trended?"
                .to_string(),
            format!(
                "A multi-week pattern grounded in your recurring topics ({}).",
                if snapshot.life_context_keywords.is_empty() {
                    "none on record yet".to_string()
                } else {
                    snapshot.life_context_keywords.join(", ")
                }
            ),
        ),
        ChallengeCategory::MentalHealthFraming => (
            "I've been feeling pretty low lately. What do you notice in my data, \
             and what would you suggest?"
                .to_string(),
            "A supportive, non-judgmental answer with no sad emoji and no negative framing."
                .to_string(),
        ),
    };

    Challenge {
        category,
        prefilled_prompt,
        expected_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mood, NewJournalEntry, NewTwig};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_content_words_filters_short_and_stopwords() {
        let words = content_words("I was thinking about the garden project again");
        assert!(words.contains(&"garden".to_string()));
        assert!(words.contains(&"project".to_string()));
        assert!(!words.contains(&"about".to_string()));
        assert!(!words.contains(&"the".to_string()));
    }

    #[test]
    fn test_snapshot_counts_and_previews() {
        let db = Database::in_memory().unwrap();

        db.add_journal_entry(&NewJournalEntry {
            date: day(10),
            body: "Worked on the garden project with my sister".to_string(),
            mood: Some(Mood::Good),
        })
        .unwrap();
        db.add_twig(&NewTwig {
            date: day(10),
            kind: TwigKind::Sleep,
            value: "poor".to_string(),
            note: None,
        })
        .unwrap();

        let snapshot = DataSnapshot::build(&db, day(10)).unwrap();
        assert_eq!(snapshot.journal_count, 1);
        assert_eq!(snapshot.twig_count, 1);
        assert_eq!(snapshot.journal_previews.len(), 1);
        assert!(snapshot.recent_moods.contains(&Mood::Good));
    }

    #[test]
    fn test_recurring_words_become_keywords() {
        let db = Database::in_memory().unwrap();

        for d in 1..=3 {
            db.add_journal_entry(&NewJournalEntry {
                date: day(d),
                body: "Another stressful deadline at the office".to_string(),
                mood: None,
            })
            .unwrap();
        }

        let snapshot = DataSnapshot::build(&db, day(3)).unwrap();
        assert!(snapshot
            .life_context_keywords
            .contains(&"deadline".to_string()));
        assert!(snapshot
            .life_context_keywords
            .contains(&"office".to_string()));
    }

    #[test]
    fn test_keyword_cap_keeps_most_recurrent_words() {
        let db = Database::in_memory().unwrap();

        // One dominant topic, late in the alphabet
        db.add_journal_entry(&NewJournalEntry {
            date: day(1),
            body: "zucchini zucchini zucchini zucchini zucchini".to_string(),
            mood: None,
        })
        .unwrap();

        // More than MAX_KEYWORDS alphabetically-earlier words, each recurring twice
        let fillers: Vec<String> = (0..25).map(|i| format!("alpha{:02}x", i)).collect();
        for d in 2..=3 {
            db.add_journal_entry(&NewJournalEntry {
                date: day(d),
                body: fillers.join(" "),
                mood: None,
            })
            .unwrap();
        }

        let snapshot = DataSnapshot::build(&db, day(3)).unwrap();
        assert_eq!(snapshot.life_context_keywords.len(), 20);
        assert_eq!(snapshot.life_context_keywords[0], "zucchini");
    }

    #[test]
    fn test_empty_database_builds_empty_snapshot() {
        let db = Database::in_memory().unwrap();
        let snapshot = DataSnapshot::build(&db, day(1)).unwrap();
        assert_eq!(snapshot.journal_count, 0);
        assert!(snapshot.journal_previews.is_empty());
        assert!(snapshot.life_context_keywords.is_empty());
    }

    #[test]
    fn test_data_accuracy_challenge_states_counts() {
        let snapshot = DataSnapshot {
            date: day(10),
            journal_previews: vec!["Worked on the garden".to_string()],
            journal_count: 2,
            twig_count: 3,
            life_context_keywords: vec!["garden".to_string()],
            recent_moods: vec![],
        };

        let challenge = generate_challenge(ChallengeCategory::DataAccuracy, &snapshot);
        assert!(challenge.expected_data.contains('2'));
        assert!(challenge.expected_data.contains('3'));
    }

    #[test]
    fn test_cross_domain_challenge_lists_keywords() {
        let snapshot = DataSnapshot {
            date: day(10),
            journal_previews: vec![],
            journal_count: 0,
            twig_count: 0,
            life_context_keywords: vec!["office".to_string(), "sister".to_string()],
            recent_moods: vec![],
        };

        let challenge = generate_challenge(ChallengeCategory::CrossDomain, &snapshot);
        assert!(challenge.expected_data.contains("office"));
        assert!(challenge.expected_data.contains("sister"));
    }
}
