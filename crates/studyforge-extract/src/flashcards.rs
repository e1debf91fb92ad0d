//! Flashcard generation.
//!
//! Accepts either pre-authored card records or raw study notes, normalizes
//! both into [`Flashcard`]s, assigns every card a domain, drops duplicate
//! question/answer pairs, and draws a blueprint-weighted sample.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use rand::Rng;
use regex::Regex;
use serde_json::Value;
use studyforge_core::domain::{resolve_domain, EXAM_TAGS};
use studyforge_core::error::InputError;
use studyforge_core::model::{Domain, Flashcard, RawCorpus};
use studyforge_core::sampling::{stratified_sample, SamplePlan, SampleReport};
use studyforge_core::store::read_json;
use studyforge_core::text::{content_id, dedupe_key, normalize_whitespace, tag_slug};

/// Root shapes the flashcard generator understands, for error messages.
pub const ACCEPTED_SHAPES: &[&str] = &[
    "an array of { front, back, tags }",
    "an object with { domains: [...] }",
    "an object with { cards: [...] }",
];

const MIN_BULLET_CHARS: usize = 20;
const RECORD_SOURCE: &str = "practice-exams";
const NOTES_SOURCE: &str = "study-notes";

static HEADING_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:continued|example|types|overview|many and varied|and much more)\b")
        .expect("valid regex")
});

/// A parsed flashcard input file.
#[derive(Debug, Clone)]
pub enum FlashcardInput {
    /// Pre-authored `{ front, back, ... }` records.
    Records(Vec<Value>),
    /// Hierarchical study notes.
    Corpus(RawCorpus),
}

impl FlashcardInput {
    /// Classify a JSON root: a sequence, then `domains`, then `cards`.
    pub fn detect(value: Value, path: &Path) -> Result<Self> {
        match value {
            Value::Array(records) => Ok(FlashcardInput::Records(records)),
            Value::Object(mut map) => {
                if map.get("domains").is_some_and(Value::is_array) {
                    let corpus = serde_json::from_value(Value::Object(map))
                        .with_context(|| format!("failed to read study notes: {}", path.display()))?;
                    Ok(FlashcardInput::Corpus(corpus))
                } else if let Some(Value::Array(records)) = map.remove("cards") {
                    Ok(FlashcardInput::Records(records))
                } else {
                    Err(InputError::unsupported_shape(path, ACCEPTED_SHAPES).into())
                }
            }
            _ => Err(InputError::unsupported_shape(path, ACCEPTED_SHAPES).into()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let value: Value = read_json(path)?;
        Self::detect(value, path)
    }

    /// Normalize into flashcards, before deduplication.
    pub fn into_cards(self) -> Vec<Flashcard> {
        match self {
            FlashcardInput::Records(records) => cards_from_records(&records),
            FlashcardInput::Corpus(corpus) => cards_from_corpus(&corpus),
        }
    }
}

fn text_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(normalize_whitespace)
        .unwrap_or_default()
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Cards from pre-authored records. Records without a front or back are skipped.
pub fn cards_from_records(records: &[Value]) -> Vec<Flashcard> {
    let mut cards = Vec::with_capacity(records.len());
    for record in records {
        if !record.is_object() {
            continue;
        }
        let question = text_field(record, "front");
        let answer = text_field(record, "back");
        if question.is_empty() || answer.is_empty() {
            continue;
        }

        let tags = record
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(normalize_whitespace)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let explicit = record.get("domain").and_then(Domain::from_json);
        let domain = resolve_domain(explicit, &question, &answer);
        let id = record
            .get("id")
            .and_then(scalar_string)
            .unwrap_or_else(|| content_id("card", &[&question, &answer]));

        cards.push(Flashcard {
            id,
            tags,
            source: record
                .get("source")
                .and_then(scalar_string)
                .unwrap_or_else(|| RECORD_SOURCE.to_string()),
            domain,
            section: record
                .get("section")
                .and_then(Value::as_str)
                .map(str::to_string),
            question,
            answer,
        });
    }
    cards
}

/// Whether a note bullet is worth a card.
fn keep_bullet(bullet: &str) -> bool {
    bullet.chars().count() >= MIN_BULLET_CHARS
        && bullet.chars().any(|c| c.is_ascii_alphabetic())
        && !HEADING_WORDS.is_match(bullet)
}

/// One card per surviving bullet of the study notes.
pub fn cards_from_corpus(corpus: &RawCorpus) -> Vec<Flashcard> {
    let mut cards = Vec::new();
    for raw_domain in &corpus.domains {
        let domain_name = normalize_whitespace(raw_domain.name.as_deref().unwrap_or_default());
        let explicit = raw_domain.domain();

        for section in &raw_domain.sections {
            let section_name = normalize_whitespace(&section.name);

            for raw in &section.bullets {
                let bullet = normalize_whitespace(raw);
                if !keep_bullet(&bullet) {
                    continue;
                }

                let question = format!("What should you know about: {bullet}?");
                let mut tags: Vec<String> = EXAM_TAGS.iter().map(|t| t.to_string()).collect();
                tags.extend(
                    [domain_name.as_str(), section_name.as_str()]
                        .into_iter()
                        .filter(|name| !name.is_empty())
                        .map(tag_slug),
                );

                cards.push(Flashcard {
                    id: content_id("notes", &[&domain_name, &section_name, &bullet]),
                    domain: resolve_domain(explicit, &question, &bullet),
                    question,
                    answer: bullet,
                    tags,
                    source: NOTES_SOURCE.to_string(),
                    section: (!section_name.is_empty()).then(|| section_name.clone()),
                });
            }
        }
    }
    cards
}

/// Keep the first card for each normalized (question, answer) pair.
///
/// Returns the surviving cards and how many were dropped.
pub fn dedupe_cards(cards: Vec<Flashcard>) -> (Vec<Flashcard>, usize) {
    let before = cards.len();
    let mut seen = HashSet::with_capacity(before);
    let kept: Vec<Flashcard> = cards
        .into_iter()
        .filter(|c| seen.insert((dedupe_key(&c.question), dedupe_key(&c.answer))))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

/// Result of one flashcard generator run.
#[derive(Debug, Clone)]
pub struct FlashcardRun {
    pub cards: Vec<Flashcard>,
    /// Cards produced by normalization, before deduplication.
    pub normalized: usize,
    pub duplicates: usize,
    pub report: SampleReport,
}

/// Normalize, deduplicate, and sample.
pub fn generate_flashcards<R: Rng + ?Sized>(
    input: FlashcardInput,
    plan: &SamplePlan,
    rng: &mut R,
) -> FlashcardRun {
    let cards = input.into_cards();
    let normalized = cards.len();
    let (unique, duplicates) = dedupe_cards(cards);
    let (cards, report) = stratified_sample(unique, |c: &Flashcard| c.domain, plan, rng);

    tracing::info!(
        normalized,
        duplicates,
        sampled = cards.len(),
        "generated flashcards"
    );

    FlashcardRun {
        cards,
        normalized,
        duplicates,
        report,
    }
}
