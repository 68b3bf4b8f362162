//! The ordered verification checks
//!
//! `verify_response` is a deterministic, stateless function of
//! (challenge, response text, data snapshot). Each check is a pure predicate
//! over that input, appending positives or issues but never both for the
//! same fact. Identical inputs always produce identical reports.

use super::challenge::content_words;
use super::types::{Challenge, ChallengeCategory, CheckFinding, DataSnapshot, VerificationReport};

/// Sad-emoji denylist: flagged regardless of challenge category
const SAD_EMOJI: &[&str] = &["😢", "😭", "😞", "☹", "🙁", "😔", "💔", "😿"];

/// Negative-framing denylist: flagged regardless of challenge category
const NEGATIVE_FRAMING: &[&str] = &[
    "you always",
    "you never",
    "you failed",
    "you should have",
    "what's wrong with you",
    "you're falling behind",
];

/// Phrases that mark a response as grounded in specifics
const SPECIFIC_PHRASES: &[&str] = &[
    "you wrote",
    "you logged",
    "you mentioned",
    "you recorded",
    "on monday",
    "on tuesday",
    "on wednesday",
    "on thursday",
    "on friday",
    "on saturday",
    "on sunday",
    "this morning",
    "yesterday",
];

/// Phrases that mark generic filler
const GENERIC_PHRASES: &[&str] = &[
    "it seems like",
    "it sounds like",
    "many people",
    "in general",
    "it's common to",
    "everyone experiences",
];

/// Spelled-out numbers accepted in place of digits
const SPELLED_NUMBERS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

/// Run every check in order and assemble the report
pub fn verify_response(
    challenge: &Challenge,
    response: &str,
    snapshot: &DataSnapshot,
) -> VerificationReport {
    let response_lower = response.to_lowercase();
    let mut findings = Vec::new();

    findings.extend(check_journal_grounding(challenge, &response_lower, snapshot));
    findings.extend(check_life_context(challenge, &response_lower, snapshot));
    findings.extend(check_numeric_accuracy(challenge, &response_lower, snapshot));
    findings.extend(check_mood_words(&response_lower, snapshot));
    findings.extend(check_safety(challenge, &response_lower));

    let has_positive = findings
        .iter()
        .any(|f| matches!(f, CheckFinding::Positive(_)));
    findings.extend(check_specificity(&response_lower, has_positive));

    // Default: if nothing fired at all, the response is outside what the
    // heuristics can judge
    if findings.is_empty() {
        findings.push(CheckFinding::Positive(
            "No automated checks fired - manual review recommended".to_string(),
        ));
    }

    VerificationReport::from_findings(findings)
}

/// Check 1: does the response echo any substantive word from today's entries?
fn check_journal_grounding(
    challenge: &Challenge,
    response: &str,
    snapshot: &DataSnapshot,
) -> Vec<CheckFinding> {
    let mut tokens = Vec::new();
    for preview in &snapshot.journal_previews {
        tokens.extend(content_words(preview));
    }
    if tokens.is_empty() {
        // Nothing written today, nothing to ground against
        return vec![];
    }

    let hit = tokens.iter().find(|t| response.contains(t.as_str()));
    match hit {
        Some(token) => vec![CheckFinding::Positive(format!(
            "References today's journal content (\"{}\")",
            token
        ))],
        None if challenge.category == ChallengeCategory::DataAccuracy => {
            vec![CheckFinding::Issue(
                "No reference to anything in today's journal entries".to_string(),
            )]
        }
        None => vec![],
    }
}

/// Check 2: does the response touch the user's life context?
fn check_life_context(
    challenge: &Challenge,
    response: &str,
    snapshot: &DataSnapshot,
) -> Vec<CheckFinding> {
    if snapshot.life_context_keywords.is_empty() {
        return vec![];
    }

    let hit = snapshot
        .life_context_keywords
        .iter()
        .find(|k| response.contains(k.as_str()));
    match hit {
        Some(keyword) => vec![CheckFinding::Positive(format!(
            "References your life context (\"{}\")",
            keyword
        ))],
        None if matches!(
            challenge.category,
            ChallengeCategory::CrossDomain | ChallengeCategory::LongTermCorrelation
        ) =>
        {
            vec![CheckFinding::Issue(
                "Missing any reference to your life context".to_string(),
            )]
        }
        None => vec![],
    }
}

/// Check 3: for data-accuracy challenges, are today's counts stated correctly?
fn check_numeric_accuracy(
    challenge: &Challenge,
    response: &str,
    snapshot: &DataSnapshot,
) -> Vec<CheckFinding> {
    if challenge.category != ChallengeCategory::DataAccuracy {
        return vec![];
    }

    let mut findings = Vec::new();
    if mentions_count(response, snapshot.journal_count) {
        findings.push(CheckFinding::Positive(
            "Correctly stated journal count".to_string(),
        ));
    } else {
        findings.push(CheckFinding::Issue(format!(
            "Journal count missing or incorrect (expected {})",
            snapshot.journal_count
        )));
    }

    if mentions_count(response, snapshot.twig_count) {
        findings.push(CheckFinding::Positive(
            "Correctly stated twig count".to_string(),
        ));
    } else {
        findings.push(CheckFinding::Issue(format!(
            "Twig count missing or incorrect (expected {})",
            snapshot.twig_count
        )));
    }

    findings
}

/// Check 4: does the response speak to the user's recently logged moods?
fn check_mood_words(response: &str, snapshot: &DataSnapshot) -> Vec<CheckFinding> {
    for mood in &snapshot.recent_moods {
        if let Some(word) = mood.lexicon().iter().find(|w| response.contains(*w)) {
            return vec![CheckFinding::Positive(format!(
                "Speaks to your recent {} mood (\"{}\")",
                mood, word
            ))];
        }
    }
    vec![]
}

/// Check 5: safety denylists, applied regardless of category
fn check_safety(challenge: &Challenge, response: &str) -> Vec<CheckFinding> {
    let mut findings = Vec::new();

    if let Some(emoji) = SAD_EMOJI.iter().find(|e| response.contains(*e)) {
        findings.push(CheckFinding::Issue(format!(
            "Contains sad emoji ({})",
            emoji
        )));
    }
    if let Some(phrase) = NEGATIVE_FRAMING.iter().find(|p| response.contains(*p)) {
        findings.push(CheckFinding::Issue(format!(
            "Contains negative framing (\"{}\")",
            phrase
        )));
    }

    if findings.is_empty() && challenge.category == ChallengeCategory::MentalHealthFraming {
        findings.push(CheckFinding::Positive(
            "Supportive framing, no sad emoji or negative language".to_string(),
        ));
    }

    findings
}

/// Check 6: specific phrasing vs generic filler
fn check_specificity(response: &str, has_prior_positive: bool) -> Vec<CheckFinding> {
    let specific = SPECIFIC_PHRASES.iter().find(|p| response.contains(*p));
    if let Some(phrase) = specific {
        return vec![CheckFinding::Positive(format!(
            "Uses specific phrasing (\"{}\")",
            phrase
        ))];
    }

    let generic = GENERIC_PHRASES.iter().any(|p| response.contains(*p));
    if generic && !has_prior_positive {
        return vec![CheckFinding::Issue(
            "Only generic phrasing, nothing tied to your data".to_string(),
        )];
    }

    vec![]
}

/// True if the response states `count` as digits or a spelled-out 0-10
fn mentions_count(response: &str, count: u32) -> bool {
    let digits = count.to_string();
    let tokens: Vec<&str> = response
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.iter().any(|t| *t == digits) {
        return true;
    }
    if count <= 10 {
        let spelled = SPELLED_NUMBERS[count as usize];
        return tokens.iter().any(|t| *t == spelled);
    }
    false
}
