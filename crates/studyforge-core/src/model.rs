//! Core data model types for studyforge.
//!
//! These are the records passed between pipeline stages through JSON files:
//! the raw study corpus, concepts, flashcards, questions, and the merged
//! corpus cards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InputError;

/// One of the five top-level exam domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    /// General security concepts.
    One,
    /// Threats, vulnerabilities, and mitigations.
    Two,
    /// Security architecture.
    Three,
    /// Security operations and incident response.
    Four,
    /// Governance, risk, and compliance.
    Five,
}

impl Domain {
    /// All domains in ascending order.
    pub const ALL: [Domain; 5] = [
        Domain::One,
        Domain::Two,
        Domain::Three,
        Domain::Four,
        Domain::Five,
    ];

    /// The domain number, 1 through 5.
    pub fn number(self) -> u8 {
        match self {
            Domain::One => 1,
            Domain::Two => 2,
            Domain::Three => 3,
            Domain::Four => 4,
            Domain::Five => 5,
        }
    }

    /// Zero-based position, handy for fixed-size per-domain tables.
    pub fn index(self) -> usize {
        usize::from(self.number() - 1)
    }

    pub fn from_number(n: u64) -> Option<Domain> {
        match n {
            1 => Some(Domain::One),
            2 => Some(Domain::Two),
            3 => Some(Domain::Three),
            4 => Some(Domain::Four),
            5 => Some(Domain::Five),
            _ => None,
        }
    }

    /// Exam display name.
    pub fn name(self) -> &'static str {
        match self {
            Domain::One => "General Security Concepts",
            Domain::Two => "Threats, Vulnerabilities, and Mitigations",
            Domain::Three => "Security Architecture",
            Domain::Four => "Operations and Incident Response",
            Domain::Five => "Governance, Risk, and Compliance",
        }
    }

    /// Lenient conversion from a JSON value: `3`, `"3"`, and `" 3 "` all work.
    pub fn from_json(value: &serde_json::Value) -> Option<Domain> {
        match value {
            serde_json::Value::Number(n) => n.as_u64().and_then(Domain::from_number),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// First digit in a name like `"Domain 4: Security Operations"`.
    pub fn from_name(name: &str) -> Option<Domain> {
        name.chars()
            .find(|c| c.is_ascii_digit())
            .and_then(|c| c.to_digit(10))
            .and_then(|d| Domain::from_number(u64::from(d)))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for Domain {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Domain::from_number)
            .ok_or_else(|| InputError::InvalidDomain(s.to_string()))
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Domain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Domain::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid domain: {value}")))
    }
}

// ---------------------------------------------------------------------------
// Raw corpus
// ---------------------------------------------------------------------------

/// A number that corpus files write as `1`, `1.2`, or `"1.2"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{n}"),
            Label::Float(n) => write!(f, "{n}"),
            Label::Text(s) => f.write_str(s),
        }
    }
}

/// Hierarchical study notes: domains, sections, bullets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCorpus {
    #[serde(default)]
    pub domains: Vec<RawDomain>,
    /// Embedded practice questions keyed by domain name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_questions: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDomain {
    #[serde(default)]
    pub domain_num: Option<Label>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

impl RawDomain {
    /// The exam domain this block belongs to, from its number or its name.
    pub fn domain(&self) -> Option<Domain> {
        let from_num = self.domain_num.as_ref().and_then(|label| match label {
            Label::Number(n) => u64::try_from(*n).ok().and_then(Domain::from_number),
            Label::Float(n) => Domain::from_name(&n.to_string()),
            Label::Text(s) => Domain::from_name(s),
        });
        from_num.or_else(|| self.name.as_deref().and_then(Domain::from_name))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub section_num: Option<Label>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

// ---------------------------------------------------------------------------
// Concepts
// ---------------------------------------------------------------------------

/// How much the extractor trusts a concept's definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub confidence: Confidence,
}

/// One atomic term and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    /// Kebab-case slug of the term; unique within a dictionary.
    pub concept_id: String,
    pub term: String,
    pub definition: String,
    /// Display form of the domain, e.g. `"2.0"`.
    pub domain: String,
    pub section: String,
    #[serde(default)]
    pub notes: String,
    pub source: ConceptSource,
}

// ---------------------------------------------------------------------------
// Flashcards
// ---------------------------------------------------------------------------

/// A question/answer study unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: String,
    pub domain: Domain,
    #[serde(default)]
    pub section: Option<String>,
}

/// Output of the flashcard generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSet {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub cards: Vec<Flashcard>,
}

impl FlashcardSet {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            generated_at: Utc::now(),
            count: cards.len(),
            cards,
        }
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// A generated quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Question {
    Mcq(McqQuestion),
    Short(ShortQuestion),
}

impl Question {
    pub fn id(&self) -> &str {
        match self {
            Question::Mcq(q) => &q.id,
            Question::Short(q) => &q.id,
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            Question::Mcq(q) => q.domain,
            Question::Short(q) => q.domain,
        }
    }

    pub fn as_mcq(&self) -> Option<&McqQuestion> {
        match self {
            Question::Mcq(q) => Some(q),
            Question::Short(_) => None,
        }
    }
}

/// Multiple choice item with exactly four choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McqQuestion {
    pub id: String,
    pub source_card_id: String,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
    pub explanation: String,
    pub domain: Domain,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: u8,
}

impl McqQuestion {
    /// The text of the correct choice.
    pub fn correct_choice(&self) -> Option<&str> {
        self.choices.get(self.answer_index).map(String::as_str)
    }
}

/// Free-text item: define the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortQuestion {
    pub id: String,
    pub source_card_id: String,
    pub prompt: String,
    pub answer: String,
    pub domain: Domain,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: u8,
}

/// Output of the question generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            generated_at: Utc::now(),
            count: questions.len(),
            questions,
        }
    }
}

// ---------------------------------------------------------------------------
// Merged corpus and practice questions
// ---------------------------------------------------------------------------

/// A normalized card as stored in the merged corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusCard {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}

/// A hand-written multiple choice question shipped with the notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
    pub domain: Domain,
}

/// The practice-question side file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PracticeQuestionSet {
    pub questions: Vec<PracticeQuestion>,
    pub count: usize,
}

impl PracticeQuestionSet {
    pub fn new(questions: Vec<PracticeQuestion>) -> Self {
        Self {
            count: questions.len(),
            questions,
        }
    }
}

/// Count items per domain, in domain order.
pub fn domain_distribution<T>(items: &[T], domain_of: impl Fn(&T) -> Domain) -> BTreeMap<Domain, usize> {
    let mut dist = BTreeMap::new();
    for item in items {
        *dist.entry(domain_of(item)).or_insert(0) += 1;
    }
    dist
}
