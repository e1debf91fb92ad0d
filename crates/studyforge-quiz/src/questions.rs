//! Question generation from a flashcard deck.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde_json::Value;
use studyforge_core::domain::{resolve_domain, EXAM_TAGS};
use studyforge_core::error::InputError;
use studyforge_core::model::{Domain, McqQuestion, Question, ShortQuestion};
use studyforge_core::sampling::{stratified_sample, SamplePlan, SampleReport};
use studyforge_core::store::read_json;
use studyforge_core::text::{content_id, normalize_whitespace, truncate_chars};

use crate::distractors::AnswerPool;

/// Scenario framings rotated by card index.
pub const SCENARIO_STEMS: [&str; 5] = [
    "A security analyst needs to explain the concept to management. Which of the following best describes",
    "During a security review, the team discusses a key concept. Which statement correctly defines",
    "An incident response document requires clear definitions. Which of the following accurately describes",
    "For the Security+ exam, a candidate must understand terminology. Which option best defines",
    "In a compliance audit, the auditor asks about a security concept. Which of the following is the correct definition of",
];

pub const ACCEPTED_SHAPES: &[&str] = &[
    "an object with { cards: [...] }",
    "an object with { flashcards: [...] }",
    "an array of flashcards",
];

const CHOICES: usize = 4;
const MIN_ANSWER_CHARS: usize = 10;
const SNIPPET_CHARS: usize = 60;
/// Minimum length of deck answers used to pad an MCQ that is short of choices.
const MIN_PADDING_CHARS: usize = 20;

static WHAT_IS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^What is\s+(.+?)\s*\??$").expect("valid regex"));

/// The `X` in a "What is X?" prompt.
pub fn extract_term(question: &str) -> Option<&str> {
    WHAT_IS
        .captures(question.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
}

/// A flashcard as read by the question generator.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCard {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub tags: Option<Vec<String>>,
    pub domain: Option<Domain>,
}

impl SourceCard {
    /// Accepts both `question`/`answer` and `front`/`back` field names.
    pub fn from_value(value: &Value) -> Option<Self> {
        let text = |primary: &str, alias: &str| {
            value
                .get(primary)
                .or_else(|| value.get(alias))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default()
        };
        if !value.is_object() {
            return None;
        }
        let question = text("question", "front");
        let answer = text("answer", "back");
        let id = match value.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => content_id("card", &[&question, &answer]),
        };
        let tags = value.get("tags").and_then(Value::as_array).map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });
        Some(Self {
            id,
            domain: value.get("domain").and_then(Domain::from_json),
            question,
            answer,
            tags,
        })
    }

    fn tags_or_default(&self) -> Vec<String> {
        self.tags
            .clone()
            .unwrap_or_else(|| EXAM_TAGS.iter().map(|t| t.to_string()).collect())
    }

    fn resolved_domain(&self) -> Domain {
        resolve_domain(self.domain, &self.question, &self.answer)
    }
}

/// Read a flashcard file: `{ cards }`, `{ flashcards }`, or a bare array.
pub fn load_source_cards(path: &Path) -> Result<Vec<SourceCard>> {
    let value: Value = read_json(path)?;
    let records = match &value {
        Value::Array(items) => items,
        Value::Object(map) => match map
            .get("cards")
            .or_else(|| map.get("flashcards"))
            .and_then(Value::as_array)
        {
            Some(items) => items,
            None => return Err(InputError::unsupported_shape(path, ACCEPTED_SHAPES).into()),
        },
        _ => return Err(InputError::unsupported_shape(path, ACCEPTED_SHAPES).into()),
    };
    Ok(records.iter().filter_map(SourceCard::from_value).collect())
}

fn difficulty(index: usize) -> u8 {
    // index % 3 is always below 3.
    1 + (index % 3) as u8
}

fn prompt_for(term: Option<&str>, answer: &str, index: usize) -> String {
    match term {
        Some(term) => format!("{} {term}?", SCENARIO_STEMS[index % SCENARIO_STEMS.len()]),
        None => format!(
            "Which of the following best describes the concept in this definition: \"{}...\"?",
            truncate_chars(answer, SNIPPET_CHARS)
        ),
    }
}

/// Build one MCQ, or `None` when four distinct choices cannot be found.
pub fn generate_mcq<R: Rng + ?Sized>(
    card: &SourceCard,
    pool: &AnswerPool,
    index: usize,
    rng: &mut R,
) -> Option<McqQuestion> {
    let correct = normalize_whitespace(&card.answer);
    let term = extract_term(&card.question);

    let mut choices: Vec<String> = vec![correct.clone()];
    for d in pool.distractors(&correct, term, rng) {
        if !choices.contains(&d) {
            choices.push(d);
        }
    }
    let padding = pool
        .answers()
        .iter()
        .filter(|a| a.chars().count() > MIN_PADDING_CHARS);
    for a in padding {
        if choices.len() >= CHOICES {
            break;
        }
        if !choices.contains(a) {
            choices.push(a.clone());
        }
    }
    if choices.len() < CHOICES {
        return None;
    }
    choices.truncate(CHOICES);
    choices.shuffle(rng);

    let answer_index = match choices.iter().position(|c| c.trim() == correct.trim()) {
        Some(i) => i,
        None => {
            let slot = rng.gen_range(0..choices.len());
            choices[slot] = correct.clone();
            slot
        }
    };

    let definition = card.answer.trim();
    let explanation = match term {
        Some(term) => format!("{term} is the correct answer. {definition}"),
        None => format!("The correct answer is: {definition}"),
    };

    Some(McqQuestion {
        id: format!("q-{}-mcq", card.id),
        source_card_id: card.id.clone(),
        prompt: prompt_for(term, &card.answer, index),
        choices,
        answer_index,
        explanation,
        domain: card.resolved_domain(),
        tags: card.tags_or_default(),
        difficulty: difficulty(index),
    })
}

/// Build a short-answer item for "What is X?" cards.
pub fn generate_short(card: &SourceCard, index: usize) -> Option<ShortQuestion> {
    let term = extract_term(&card.question)?;
    Some(ShortQuestion {
        id: format!("q-{}-short", card.id),
        source_card_id: card.id.clone(),
        prompt: format!("Define the following Security+ term: {term}"),
        answer: card.answer.clone(),
        domain: card.resolved_domain(),
        tags: card.tags_or_default(),
        difficulty: difficulty(index),
    })
}

/// Knobs for one generator run.
#[derive(Debug, Clone)]
pub struct QuestionOptions {
    /// Only the first `max_cards` cards are considered.
    pub max_cards: usize,
    pub plan: SamplePlan,
    /// Append short-answer items for the cards behind the sampled MCQs.
    pub include_short: bool,
}

/// Result of one question generator run.
#[derive(Debug, Clone, Default)]
pub struct QuestionRun {
    pub questions: Vec<Question>,
    pub cards_considered: usize,
    /// Cards without a question or with an answer under ten characters.
    pub skipped_cards: usize,
    /// Cards for which four distinct choices could not be assembled.
    pub skipped_mcqs: usize,
    pub mcqs_generated: usize,
    pub shorts_generated: usize,
    pub report: SampleReport,
}

/// Generate MCQs (and short items) for a deck and sample the final set.
pub fn generate_questions<R: Rng + ?Sized>(
    cards: &[SourceCard],
    options: &QuestionOptions,
    rng: &mut R,
) -> QuestionRun {
    let limited = &cards[..cards.len().min(options.max_cards)];
    let pool = AnswerPool::new(limited.iter().map(|c| c.answer.as_str()));

    let mut run = QuestionRun {
        cards_considered: limited.len(),
        ..Default::default()
    };
    let mut mcqs = Vec::new();
    let mut shorts = Vec::new();

    for (index, card) in limited.iter().enumerate() {
        if card.question.trim().is_empty() || card.answer.chars().count() < MIN_ANSWER_CHARS {
            run.skipped_cards += 1;
            continue;
        }
        match generate_mcq(card, &pool, index, rng) {
            Some(mcq) => mcqs.push(mcq),
            None => run.skipped_mcqs += 1,
        }
        if let Some(short) = generate_short(card, index) {
            shorts.push(short);
        }
    }
    run.mcqs_generated = mcqs.len();
    run.shorts_generated = shorts.len();

    let (sampled, report) = stratified_sample(mcqs, |q: &McqQuestion| q.domain, &options.plan, rng);
    run.report = report;

    let sampled_cards: HashSet<String> = sampled.iter().map(|q| q.source_card_id.clone()).collect();
    run.questions = sampled.into_iter().map(Question::Mcq).collect();
    if options.include_short {
        run.questions.extend(
            shorts
                .into_iter()
                .filter(|s| sampled_cards.contains(&s.source_card_id))
                .map(Question::Short),
        );
    }

    tracing::info!(
        considered = run.cards_considered,
        mcqs = run.mcqs_generated,
        sampled = run.report.total(),
        skipped = run.skipped_cards + run.skipped_mcqs,
        "generated questions"
    );
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use studyforge_core::domain::question_plan;
    use studyforge_core::sampling::{DomainTargets, TopUp};

    fn card(id: &str, question: &str, answer: &str) -> SourceCard {
        SourceCard {
            id: id.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            tags: None,
            domain: None,
        }
    }

    fn deck() -> Vec<SourceCard> {
        vec![
            card("dmarc", "What is DMARC?", "An email policy that builds on SPF and DKIM results."),
            card("fw", "What is a firewall?", "A device that filters network traffic by rule."),
            card("vpn", "What is a VPN?", "An encrypted tunnel across an untrusted network."),
            card("tok", "What should you know about: tokens?", "Tokenization swaps sensitive values for surrogates."),
            card("seg", "Define segmentation", "Segmentation divides a network into isolated zones."),
            card("tiny", "What is X?", "short"),
        ]
    }

    fn options(total: usize) -> QuestionOptions {
        QuestionOptions {
            max_cards: 600,
            plan: SamplePlan {
                targets: DomainTargets([total; 5]),
                total,
                top_up: TopUp::AnyLeftover,
            },
            include_short: false,
        }
    }

    #[test]
    fn extract_term_matches_what_is_only() {
        assert_eq!(extract_term("What is DMARC?"), Some("DMARC"));
        assert_eq!(extract_term("what is  zero trust ?"), Some("zero trust"));
        assert_eq!(extract_term("What is a honeypot"), Some("a honeypot"));
        assert_eq!(extract_term("What should you know about: X?"), None);
        assert_eq!(extract_term("Define DMARC"), None);
    }

    #[test]
    fn dmarc_mcq_uses_curated_distractors() {
        let cards = deck();
        let pool = AnswerPool::new(cards.iter().map(|c| c.answer.as_str()));
        let mut rng = StdRng::seed_from_u64(11);
        let mcq = generate_mcq(&cards[0], &pool, 0, &mut rng).unwrap();
        let wrong: HashSet<&str> = mcq
            .choices
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != mcq.answer_index)
            .map(|(_, c)| c.as_str())
            .collect();
        assert_eq!(wrong, HashSet::from(["SPF", "DKIM", "S/MIME"]));
        assert!(mcq.prompt.starts_with(SCENARIO_STEMS[0]));
        assert!(mcq.prompt.ends_with(" DMARC?"));
        assert_eq!(
            mcq.explanation,
            "DMARC is the correct answer. An email policy that builds on SPF and DKIM results."
        );
        assert_eq!(mcq.domain, Domain::Three);
        assert_eq!(mcq.tags, vec!["security-plus", "sy0-701"]);
        assert_eq!(mcq.id, "q-dmarc-mcq");
    }

    #[test]
    fn every_mcq_is_well_formed() {
        let cards = deck();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let run = generate_questions(&cards, &options(100), &mut rng);
            for q in &run.questions {
                let mcq = q.as_mcq().unwrap();
                assert_eq!(mcq.choices.len(), 4);
                let unique: HashSet<_> = mcq.choices.iter().collect();
                assert_eq!(unique.len(), 4);
                let source = cards.iter().find(|c| c.id == mcq.source_card_id).unwrap();
                assert_eq!(
                    mcq.choices[mcq.answer_index],
                    normalize_whitespace(&source.answer)
                );
            }
        }
    }

    #[test]
    fn generic_stem_for_cards_without_term() {
        let cards = deck();
        let pool = AnswerPool::new(cards.iter().map(|c| c.answer.as_str()));
        let mut rng = StdRng::seed_from_u64(2);
        let mcq = generate_mcq(&cards[3], &pool, 3, &mut rng).unwrap();
        assert!(mcq
            .prompt
            .starts_with("Which of the following best describes the concept in this definition: \""));
        assert!(mcq.explanation.starts_with("The correct answer is: "));
        assert_eq!(mcq.difficulty, 1);
        assert!(generate_short(&cards[3], 3).is_none());
    }

    #[test]
    fn short_items_only_for_what_is_cards() {
        let cards = deck();
        let short = generate_short(&cards[1], 4).unwrap();
        assert_eq!(short.prompt, "Define the following Security+ term: a firewall");
        assert_eq!(short.id, "q-fw-short");
        assert_eq!(short.difficulty, 2);
        assert!(generate_short(&cards[4], 0).is_none());
    }

    #[test]
    fn thin_deck_skips_mcqs_it_cannot_fill() {
        let cards = vec![
            card("a", "What is A?", "The first answer is long enough."),
            card("b", "What is B?", "The second answer is long enough."),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let run = generate_questions(&cards, &options(10), &mut rng);
        assert!(run.questions.is_empty());
        assert_eq!(run.skipped_mcqs, 2);
    }

    #[test]
    fn short_answers_and_empty_questions_are_skipped() {
        let cards = deck();
        let mut rng = StdRng::seed_from_u64(4);
        let run = generate_questions(&cards, &options(100), &mut rng);
        assert_eq!(run.skipped_cards, 1);
        assert_eq!(run.mcqs_generated, 5);
        assert_eq!(run.shorts_generated, 3);
        assert_eq!(run.questions.len(), 5);
    }

    #[test]
    fn include_short_appends_items_for_sampled_cards() {
        let cards = deck();
        let mut rng = StdRng::seed_from_u64(4);
        let mut opts = options(100);
        opts.include_short = true;
        let run = generate_questions(&cards, &opts, &mut rng);
        let shorts = run
            .questions
            .iter()
            .filter(|q| matches!(q, Question::Short(_)))
            .count();
        assert_eq!(shorts, 3);
    }

    #[test]
    fn max_cards_limits_input() {
        let cards = deck();
        let mut rng = StdRng::seed_from_u64(4);
        let mut opts = options(100);
        opts.max_cards = 2;
        let run = generate_questions(&cards, &opts, &mut rng);
        assert_eq!(run.cards_considered, 2);
    }

    #[test]
    fn final_sample_respects_question_plan() {
        let cards: Vec<SourceCard> = (0..400)
            .map(|i| SourceCard {
                domain: Domain::from_number(i % 5 + 1),
                ..card(
                    &format!("c{i}"),
                    &format!("What is term number {i}?"),
                    &format!("Definition number {i} with enough words to count."),
                )
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(8);
        let opts = QuestionOptions {
            max_cards: 600,
            plan: question_plan(),
            include_short: false,
        };
        let run = generate_questions(&cards, &opts, &mut rng);
        assert_eq!(run.questions.len(), 295);
        let plan = question_plan();
        for (domain, n) in run.report.quota {
            assert!(n <= plan.targets.get(domain));
        }
    }

    #[test]
    fn source_card_reads_both_field_styles() {
        let a = SourceCard::from_value(&json!({"id": "x", "front": "What is SPF?", "back": "Sender policy."}))
            .unwrap();
        assert_eq!(a.question, "What is SPF?");
        let b = SourceCard::from_value(&json!({"question": "Q", "answer": "A", "domain": "4"})).unwrap();
        assert_eq!(b.domain, Some(Domain::Four));
        assert!(b.id.starts_with("card-"));
        assert!(SourceCard::from_value(&json!("nope")).is_none());
    }

    #[test]
    fn load_rejects_unknown_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        std::fs::write(&path, r#"{"items": []}"#).unwrap();
        let err = load_source_cards(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported JSON format"));

        std::fs::write(&path, r#"{"cards": [{"question": "Q", "answer": "A"}]}"#).unwrap();
        assert_eq!(load_source_cards(&path).unwrap().len(), 1);
    }
}
