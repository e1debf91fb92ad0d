//! studyforge-merge: Fold a new batch of cards into the merged corpus.
//!
//! New records are normalized to [`CorpusCard`]s and placed ahead of the
//! existing ones, so on deduplication the new copy survives. Practice
//! questions carried by the new file are written to their own file in a
//! separate pass over the same input.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::Value;
use studyforge_core::domain::EXAM_TAGS;
use studyforge_core::error::InputError;
use studyforge_core::model::{CorpusCard, Domain, PracticeQuestionSet};
use studyforge_core::practice::extract_practice_questions;
use studyforge_core::store::{read_json, read_json_optional, write_json_atomic};

/// Root shapes the merge tool understands, for error messages.
pub const ACCEPTED_SHAPES: &[&str] = &[
    "an array",
    "{ cards }",
    "{ flashcards }",
    "{ flashcards: { \"Domain N\": [...] } }",
];

/// A record as found in an input file, with the domain implied by its
/// position in a domain-keyed map.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord<'a> {
    pub value: &'a Value,
    pub domain_hint: Option<Domain>,
}

/// Flatten any accepted root shape into records.
pub fn input_records<'a>(root: &'a Value, path: &Path) -> Result<Vec<InputRecord<'a>>> {
    let plain = |items: &'a Vec<Value>| -> Vec<InputRecord<'a>> {
        items
            .iter()
            .map(|value| InputRecord {
                value,
                domain_hint: None,
            })
            .collect()
    };

    if let Some(items) = root.as_array() {
        return Ok(plain(items));
    }
    if let Some(items) = root.get("cards").and_then(Value::as_array) {
        return Ok(plain(items));
    }
    match root.get("flashcards") {
        Some(Value::Array(items)) => Ok(plain(items)),
        Some(Value::Object(by_domain)) => {
            let mut out = Vec::new();
            for (domain_name, items) in by_domain {
                let Some(items) = items.as_array() else {
                    continue;
                };
                let domain_hint = Domain::from_name(domain_name);
                out.extend(items.iter().map(|value| InputRecord { value, domain_hint }));
            }
            Ok(out)
        }
        _ => Err(InputError::unsupported_shape(path, ACCEPTED_SHAPES).into()),
    }
}

fn field<'a>(value: &'a Value, primary: &str, alias: &str) -> &'a str {
    value
        .get(primary)
        .and_then(Value::as_str)
        .or_else(|| value.get(alias).and_then(Value::as_str))
        .map(str::trim)
        .unwrap_or_default()
}

/// Normalize one record; `None` when front or back is missing.
pub fn normalize_record(record: &InputRecord<'_>) -> Option<CorpusCard> {
    let front = field(record.value, "front", "question");
    let back = field(record.value, "back", "answer");
    if front.is_empty() || back.is_empty() {
        return None;
    }

    let mut tags: Vec<String> = match record.value.get("tags").and_then(Value::as_array) {
        Some(tags) => tags.iter().filter_map(Value::as_str).map(str::to_string).collect(),
        None => EXAM_TAGS.iter().map(|t| t.to_string()).collect(),
    };
    if let Some(domain) = record.domain_hint {
        let tag = format!("domain-{domain}");
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    let domain = record
        .domain_hint
        .or_else(|| record.value.get("domain").and_then(Domain::from_json));

    Some(CorpusCard {
        front: front.to_string(),
        back: back.to_string(),
        tags,
        domain,
    })
}

/// Parse and normalize every usable card in a JSON root.
pub fn cards_from_value(root: &Value, path: &Path) -> Result<Vec<CorpusCard>> {
    Ok(input_records(root, path)?
        .iter()
        .filter_map(normalize_record)
        .collect())
}

/// Keep the first card for each lowercase (front, back) pair.
pub fn dedupe_by_front_back(cards: Vec<CorpusCard>) -> Vec<CorpusCard> {
    let mut seen = HashSet::with_capacity(cards.len());
    cards
        .into_iter()
        .filter(|c| seen.insert((c.front.to_lowercase(), c.back.to_lowercase())))
        .collect()
}

/// New cards first, then existing ones, optionally deduplicated.
pub fn merge_cards(new: Vec<CorpusCard>, existing: Vec<CorpusCard>, dedupe: bool) -> Vec<CorpusCard> {
    let mut merged = new;
    merged.extend(existing);
    if dedupe {
        dedupe_by_front_back(merged)
    } else {
        merged
    }
}

/// File locations and switches for one merge run.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub new: PathBuf,
    pub existing: PathBuf,
    pub out: PathBuf,
    pub practice_out: PathBuf,
    pub dedupe: bool,
}

/// Outcome of a merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub new_cards: usize,
    pub existing_cards: usize,
    pub total: usize,
    /// Whether the existing file was present.
    pub existing_found: bool,
    /// Practice questions written to the side file; zero means none was written.
    pub practice_questions: usize,
}

/// Read, merge, and write the corpus, then the practice-question side file.
pub fn run_merge(opts: &MergeOptions) -> Result<MergeReport> {
    let new_root: Value = read_json(&opts.new)?;
    let new_cards = cards_from_value(&new_root, &opts.new)?;

    let existing: Option<Value> = read_json_optional(&opts.existing)?;
    let existing_found = existing.is_some();
    let existing_cards = match &existing {
        Some(root) => cards_from_value(root, &opts.existing)?,
        None => {
            tracing::warn!(
                "existing file {} not found, using new file only",
                opts.existing.display()
            );
            Vec::new()
        }
    };

    let mut report = MergeReport {
        new_cards: new_cards.len(),
        existing_cards: existing_cards.len(),
        existing_found,
        ..Default::default()
    };

    let merged = merge_cards(new_cards, existing_cards, opts.dedupe);
    report.total = merged.len();
    write_json_atomic(&opts.out, &merged)?;
    tracing::debug!(path = %opts.out.display(), total = report.total, "wrote merged corpus");

    if let Some(pq) = new_root.get("practice_questions") {
        let questions = extract_practice_questions(pq);
        if !questions.is_empty() {
            report.practice_questions = questions.len();
            write_json_atomic(&opts.practice_out, &PracticeQuestionSet::new(questions))?;
        }
    }

    Ok(report)
}
