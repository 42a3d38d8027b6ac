//! Condition matching.
//!
//! [`match_conditions`] scores catalog entries against a symptom description and returns at
//! most [`MAX_MATCHES`] candidates, best first. Inputs mentioning "headache" take a dedicated
//! differential path that weighs migraine against tension headache and only brings in
//! influenza or hypertension on supporting evidence. Everything else goes through weighted
//! keyword scoring over the whole catalog.
//!
//! The weights and thresholds here are hand-tuned; changing any of them changes which report
//! a user sees.

use crate::catalog::{Catalog, ConditionId, ConditionRecord, SeverityTier};
use crate::constants::{MAX_MATCHES, MIN_CONFIDENT_SCORE, MIN_INCLUSION_SCORE};
use crate::IntakeResult;
use serde::{Deserialize, Serialize};

/// A candidate condition for one query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub condition_id: ConditionId,
    pub display_name: String,
    pub score: u32,
    pub matched_keywords: Vec<String>,
    pub severity: SeverityTier,
}

impl MatchResult {
    fn from_record(record: &ConditionRecord, score: u32, matched_keywords: Vec<String>) -> Self {
        Self {
            condition_id: record.id,
            display_name: record.display_name.to_string(),
            score,
            matched_keywords,
            severity: record.severity,
        }
    }
}

const HEADACHE: &str = "headache";

const MIGRAINE_INDICATORS: &[(&str, u32)] = &[
    ("throbbing", 3),
    ("pulsating", 3),
    ("one side", 3),
    ("light sensitivity", 3),
    ("sound sensitivity", 3),
    ("aura", 4),
    ("visual disturbance", 3),
    ("nausea", 2),
    ("vomiting", 2),
];

const TENSION_INDICATORS: &[(&str, u32)] = &[
    ("pressure", 3),
    ("tight", 3),
    ("band", 3),
    ("stress", 2),
    ("tension", 3),
    ("both sides", 2),
    ("mild to moderate", 2),
];

const FLU_INDICATORS: &[&str] = &["fever", "body aches", "chills", "fatigue", "cough"];

const HYPERTENSION_INDICATORS: &[&str] = &["high blood pressure", "hypertension", "bp"];

/// Migraine is only offered once its indicators reach this total.
const MIGRAINE_THRESHOLD: u32 = 4;
/// Influenza needs at least this many flu indicators alongside the headache.
const FLU_MIN_INDICATORS: u32 = 2;
const HEADACHE_BASE_SCORE: u32 = 5;
const FLU_BASE_SCORE: u32 = 3;
const HYPERTENSION_SCORE: u32 = 4;

/// Rank catalog conditions against `text`.
///
/// # Errors
///
/// The headache path names migraine, tension headache, influenza and hypertension directly;
/// if one of those it needs is missing from `catalog` this returns
/// [`crate::IntakeError::UnknownCondition`]. The standard catalog never fails.
pub fn match_conditions(catalog: &Catalog, text: &str) -> IntakeResult<Vec<MatchResult>> {
    let lowered = text.to_lowercase();

    let matches = if lowered.contains(HEADACHE) {
        match_headache(catalog, &lowered)?
    } else {
        match_general(catalog, &lowered)
    };

    tracing::debug!(
        candidates = matches.len(),
        top = ?matches.first().map(|m| m.condition_id),
        "condition matching finished"
    );
    Ok(matches)
}

/// Weight of a symptom keyword hit for a given condition.
fn symptom_weight(keyword: &str, condition: ConditionId) -> u32 {
    match keyword {
        HEADACHE => match condition {
            ConditionId::Influenza => 1,
            ConditionId::TensionHeadache | ConditionId::Migraine | ConditionId::Hypertension => 4,
            _ => 2,
        },
        "high fever" | "body aches" | "chills" => 3,
        "severe headache" | "throbbing pain" | "aura" => 4,
        "band-like pressure" | "tight neck muscles" => 4,
        _ => 2,
    }
}

fn score_record(record: &ConditionRecord, lowered: &str) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut matched = Vec::new();

    for keyword in record.symptom_keywords {
        if lowered.contains(keyword) {
            score += symptom_weight(keyword, record.id);
            matched.push((*keyword).to_string());
        }
    }

    if lowered.contains(&record.display_name.to_lowercase()) {
        score += 6;
    }

    score += 2 * record
        .related_keywords
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count() as u32;

    (score, matched)
}

fn match_general(catalog: &Catalog, lowered: &str) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = catalog
        .iter()
        .filter_map(|record| {
            let (score, matched) = score_record(record, lowered);
            (score >= MIN_INCLUSION_SCORE)
                .then(|| MatchResult::from_record(record, score, matched))
        })
        .collect();

    // Stable: ties stay in catalog order.
    matches.sort_by(|a, b| b.score.cmp(&a.score));

    match matches.first() {
        Some(top) if top.score >= MIN_CONFIDENT_SCORE => {
            matches.truncate(MAX_MATCHES);
            matches
        }
        _ => Vec::new(),
    }
}

fn indicator_hits(lowered: &str, indicators: &[(&'static str, u32)]) -> (u32, Vec<String>) {
    let mut matched = vec![HEADACHE.to_string()];
    let mut score = 0;
    for (indicator, weight) in indicators {
        if lowered.contains(indicator) {
            score += weight;
            matched.push((*indicator).to_string());
        }
    }
    (score, matched)
}

fn match_headache(catalog: &Catalog, lowered: &str) -> IntakeResult<Vec<MatchResult>> {
    let mut matches = Vec::with_capacity(4);

    let (migraine_score, migraine_hits) = indicator_hits(lowered, MIGRAINE_INDICATORS);
    if migraine_score >= MIGRAINE_THRESHOLD {
        matches.push(MatchResult::from_record(
            catalog.get(ConditionId::Migraine)?,
            HEADACHE_BASE_SCORE + migraine_score,
            migraine_hits,
        ));
    }

    // Tension headache is the default explanation and is always offered.
    let (tension_score, tension_hits) = indicator_hits(lowered, TENSION_INDICATORS);
    matches.push(MatchResult::from_record(
        catalog.get(ConditionId::TensionHeadache)?,
        HEADACHE_BASE_SCORE + tension_score,
        tension_hits,
    ));

    let flu_hits: Vec<&str> = FLU_INDICATORS
        .iter()
        .copied()
        .filter(|indicator| lowered.contains(indicator))
        .collect();
    let flu_count = flu_hits.len() as u32;
    if flu_count >= FLU_MIN_INDICATORS {
        let mut matched = vec![HEADACHE.to_string()];
        matched.extend(flu_hits.iter().map(|hit| hit.to_string()));
        matches.push(MatchResult::from_record(
            catalog.get(ConditionId::Influenza)?,
            FLU_BASE_SCORE + flu_count,
            matched,
        ));
    }

    if HYPERTENSION_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
    {
        matches.push(MatchResult::from_record(
            catalog.get(ConditionId::Hypertension)?,
            HYPERTENSION_SCORE,
            vec![HEADACHE.to_string()],
        ));
    }

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(MAX_MATCHES);
    Ok(matches)
}
