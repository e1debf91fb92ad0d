//! Read-only view over the generated study files.
//!
//! [`StudyData::load`] is the single initialization step: it reads the base
//! corpus (required) and each optional generated file, substitutes an empty
//! default for any optional file that does not exist, and builds one
//! immutable view. The fallback chain is:
//!
//! - flashcards: generated set, else cards stored in the base corpus;
//! - practice questions: static file plus generated MCQs, else the
//!   questions embedded in a base corpus object (a flat-array base has none).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::config::PathsConfig;
use crate::model::{Domain, PracticeQuestion, PracticeQuestionSet, Question, QuestionSet, RawCorpus};
use crate::practice::extract_practice_questions;
use crate::store::{read_json, read_json_optional};
use crate::text::truncate_chars;

/// Files the view is assembled from.
#[derive(Debug, Clone)]
pub struct StudyDataPaths {
    pub base: PathBuf,
    pub flashcards: PathBuf,
    pub questions: PathBuf,
    pub practice_questions: PathBuf,
}

impl From<&PathsConfig> for StudyDataPaths {
    fn from(paths: &PathsConfig) -> Self {
        Self {
            base: paths.raw_corpus.clone(),
            flashcards: paths.flashcards.clone(),
            questions: paths.questions.clone(),
            practice_questions: paths.practice_questions.clone(),
        }
    }
}

/// A flashcard as the study pages display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyCard {
    pub id: String,
    pub question: String,
    pub answer: String,
    /// `None` when the card is not tied to a domain.
    pub domain: Option<Domain>,
    pub section: Option<String>,
}

/// Counts for one domain row of the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainStats {
    pub domain: Domain,
    pub name: String,
    pub flashcards: usize,
    pub questions: usize,
}

/// The loaded, immutable study data.
#[derive(Debug, Clone)]
pub struct StudyData {
    metadata: Value,
    domain_names: BTreeMap<Domain, String>,
    flashcards: Vec<StudyCard>,
    practice_questions: Vec<PracticeQuestion>,
}

impl StudyData {
    /// Load every source and build the view.
    pub fn load(paths: &StudyDataPaths) -> Result<Self> {
        let base: Value = read_json(&paths.base).context("failed to load base study data")?;
        let generated_cards: Option<Value> = read_json_optional(&paths.flashcards)?;
        let generated_questions: Option<QuestionSet> = read_json_optional(&paths.questions)?;
        let static_questions: Option<PracticeQuestionSet> =
            read_json_optional(&paths.practice_questions)?;

        for (label, path, present) in [
            ("flashcards", &paths.flashcards, generated_cards.is_some()),
            ("questions", &paths.questions, generated_questions.is_some()),
            ("practice questions", &paths.practice_questions, static_questions.is_some()),
        ] {
            if !present {
                tracing::debug!("no generated {label} at {}", path.display());
            }
        }

        Self::from_sources(
            base,
            generated_cards,
            generated_questions,
            static_questions,
            &paths.base,
        )
    }

    fn from_sources(
        base: Value,
        generated_cards: Option<Value>,
        generated_questions: Option<QuestionSet>,
        static_questions: Option<PracticeQuestionSet>,
        base_path: &Path,
    ) -> Result<Self> {
        let base_is_array = base.is_array();

        let mut flashcards = generated_cards
            .as_ref()
            .and_then(card_array)
            .map(|cards| cards.iter().enumerate().filter_map(|(i, c)| study_card(c, i, true)).collect::<Vec<_>>())
            .unwrap_or_default();
        if flashcards.is_empty() {
            flashcards = card_array(&base)
                .map(|cards| {
                    cards
                        .iter()
                        .enumerate()
                        .filter_map(|(i, c)| study_card(c, i, false))
                        .collect()
                })
                .unwrap_or_default();
        }

        let mut practice_questions: Vec<PracticeQuestion> =
            static_questions.map(|s| s.questions).unwrap_or_default();
        if let Some(set) = generated_questions {
            practice_questions.extend(set.questions.iter().filter_map(mcq_to_practice));
        }
        if practice_questions.is_empty() && !base_is_array {
            if let Some(embedded) = base.get("practice_questions") {
                practice_questions = extract_practice_questions(embedded);
            }
        }

        let mut domain_names: BTreeMap<Domain, String> = Domain::ALL
            .iter()
            .map(|d| (*d, d.name().to_string()))
            .collect();
        if !base_is_array && base.get("domains").is_some() {
            let corpus: RawCorpus = serde_json::from_value(base.clone())
                .with_context(|| format!("failed to read domains from {}", base_path.display()))?;
            for raw in &corpus.domains {
                if let (Some(d), Some(name)) = (raw.domain(), raw.name.as_ref()) {
                    domain_names.insert(d, name.clone());
                }
            }
        }

        let metadata = if base_is_array {
            Value::Null
        } else {
            base.get("metadata").cloned().unwrap_or(Value::Null)
        };

        tracing::info!(
            flashcards = flashcards.len(),
            questions = practice_questions.len(),
            "study data loaded"
        );

        Ok(Self {
            metadata,
            domain_names,
            flashcards,
            practice_questions,
        })
    }

    pub fn metadata(&self) -> &Value {
        &self.metadata
    }

    pub fn flashcards(&self) -> &[StudyCard] {
        &self.flashcards
    }

    pub fn practice_questions(&self) -> &[PracticeQuestion] {
        &self.practice_questions
    }

    /// Cards in `domain`; `None` selects everything.
    pub fn flashcards_in_domain(&self, domain: Option<Domain>) -> Vec<&StudyCard> {
        self.flashcards
            .iter()
            .filter(|c| domain.is_none() || c.domain == domain)
            .collect()
    }

    /// Practice questions in `domain`; `None` selects everything.
    pub fn questions_in_domain(&self, domain: Option<Domain>) -> Vec<&PracticeQuestion> {
        self.practice_questions
            .iter()
            .filter(|q| domain.map_or(true, |d| q.domain == d))
            .collect()
    }

    /// Per-domain card and question counts, in domain order.
    pub fn domain_stats(&self) -> Vec<DomainStats> {
        Domain::ALL
            .iter()
            .map(|&d| DomainStats {
                domain: d,
                name: self.domain_names[&d].clone(),
                flashcards: self.flashcards.iter().filter(|c| c.domain == Some(d)).count(),
                questions: self.practice_questions.iter().filter(|q| q.domain == d).count(),
            })
            .collect()
    }
}

/// The card list of a generated file, a `{cards}`/`{flashcards}` object, or a bare array.
fn card_array(value: &Value) -> Option<&Vec<Value>> {
    value
        .as_array()
        .or_else(|| value.get("cards").and_then(Value::as_array))
        .or_else(|| value.get("flashcards").and_then(Value::as_array))
}

fn study_card(card: &Value, position: usize, generated: bool) -> Option<StudyCard> {
    let field = |primary: &str, alt: &str| {
        card.get(primary)
            .or_else(|| card.get(alt))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let question = field("question", "front")?;
    let answer = field("answer", "back")?;
    let id = card
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            if generated {
                format!("card-{}", truncate_chars(&question, 8))
            } else {
                format!("card-{position}")
            }
        });
    Some(StudyCard {
        id,
        domain: card.get("domain").and_then(Domain::from_json),
        section: card.get("section").and_then(Value::as_str).map(str::to_string),
        question,
        answer,
    })
}

fn mcq_to_practice(question: &Question) -> Option<PracticeQuestion> {
    let mcq = question.as_mcq()?;
    Some(PracticeQuestion {
        id: mcq.id.clone(),
        question: mcq.prompt.clone(),
        options: mcq.choices.clone(),
        correct_index: mcq.answer_index,
        explanation: mcq.explanation.clone(),
        domain: mcq.domain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{McqQuestion, ShortQuestion};
    use crate::store::write_json_atomic;
    use serde_json::json;

    fn paths(dir: &Path) -> StudyDataPaths {
        StudyDataPaths {
            base: dir.join("base.json"),
            flashcards: dir.join("flashcards.json"),
            questions: dir.join("questions.json"),
            practice_questions: dir.join("practice.json"),
        }
    }

    fn mcq(id: &str, domain: Domain) -> Question {
        Question::Mcq(McqQuestion {
            id: id.into(),
            source_card_id: "c".into(),
            prompt: "Which?".into(),
            choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer_index: 2,
            explanation: "c is right".into(),
            domain,
            tags: vec![],
            difficulty: 1,
        })
    }

    #[test]
    fn only_base_corpus_uses_embedded_practice_questions() {
        let dir = tempfile::tempdir().unwrap();
        let p = paths(dir.path());
        write_json_atomic(
            &p.base,
            &json!({
                "domains": [{"domain_num": 2, "name": "Threats", "sections": []}],
                "practice_questions": {
                    "Domain 2": [{"question": "Q", "options": {"A": "x", "B": "y"}, "correct": "B"}]
                }
            }),
        )
        .unwrap();

        let data = StudyData::load(&p).unwrap();
        assert!(data.flashcards().is_empty());
        assert_eq!(data.practice_questions().len(), 1);
        let stats = data.domain_stats();
        assert_eq!(stats[1].name, "Threats");
        assert_eq!(stats[1].questions, 1);
    }

    #[test]
    fn generated_files_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let p = paths(dir.path());
        write_json_atomic(
            &p.base,
            &json!({
                "domains": [],
                "practice_questions": {"Domain 1": [{"question": "Q", "options": {"A": "x", "B": "y"}}]}
            }),
        )
        .unwrap();
        write_json_atomic(
            &p.flashcards,
            &json!({"generatedAt": "2025-01-01T00:00:00Z", "count": 1, "cards": [
                {"id": "c1", "question": "What is SPF?", "answer": "Sender Policy Framework", "domain": "3"}
            ]}),
        )
        .unwrap();
        let short = Question::Short(ShortQuestion {
            id: "s".into(),
            source_card_id: "c".into(),
            prompt: "Define".into(),
            answer: "x".into(),
            domain: Domain::Three,
            tags: vec![],
            difficulty: 1,
        });
        write_json_atomic(
            &p.questions,
            &QuestionSet::new(vec![mcq("q1", Domain::Three), short]),
        )
        .unwrap();

        let data = StudyData::load(&p).unwrap();
        assert_eq!(data.flashcards().len(), 1);
        assert_eq!(data.flashcards()[0].domain, Some(Domain::Three));
        // Generated MCQs replace the embedded questions; short items are not quiz material.
        assert_eq!(data.practice_questions().len(), 1);
        assert_eq!(data.practice_questions()[0].correct_index, 2);
        assert_eq!(data.questions_in_domain(Some(Domain::Three)).len(), 1);
        assert!(data.questions_in_domain(Some(Domain::One)).is_empty());
    }

    #[test]
    fn flat_array_base_has_no_embedded_questions() {
        let dir = tempfile::tempdir().unwrap();
        let p = paths(dir.path());
        write_json_atomic(
            &p.base,
            &json!([{"front": "A", "back": "B"}, {"front": "C", "back": "D", "domain": "4"}]),
        )
        .unwrap();

        let data = StudyData::load(&p).unwrap();
        assert_eq!(data.flashcards().len(), 2);
        assert_eq!(data.flashcards()[0].id, "card-0");
        assert!(data.practice_questions().is_empty());
        assert_eq!(data.flashcards_in_domain(Some(Domain::Four)).len(), 1);
        assert_eq!(data.flashcards_in_domain(None).len(), 2);
        assert!(data.metadata().is_null());
    }

    #[test]
    fn missing_base_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StudyData::load(&paths(dir.path())).is_err());
    }
}
