//! Practice questions embedded in study-note files.
//!
//! The notes carry a `practice_questions` map keyed by domain name, each
//! entry shaped `{ question, options: {A, B, C, D}, correct, explanation }`.

use serde_json::Value;

use crate::model::{Domain, PracticeQuestion};

const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// Parse a `practice_questions` map into flat practice questions.
///
/// Entries without an options object, or with fewer than two non-empty
/// options, are skipped. Anything that is not a map yields nothing.
pub fn extract_practice_questions(value: &Value) -> Vec<PracticeQuestion> {
    let Some(by_domain) = value.as_object() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for (domain_name, entries) in by_domain {
        let Some(entries) = entries.as_array() else {
            continue;
        };
        let domain = Domain::from_name(domain_name).unwrap_or(Domain::One);

        for (i, entry) in entries.iter().enumerate() {
            if let Some(q) = parse_entry(entry, domain, i) {
                out.push(q);
            }
        }
    }

    tracing::debug!(count = out.len(), "extracted practice questions");
    out
}

fn parse_entry(entry: &Value, domain: Domain, position: usize) -> Option<PracticeQuestion> {
    let opts = entry.get("options")?.as_object()?;

    // (letter, text) for every present option, in A-D order.
    let present: Vec<(&str, String)> = OPTION_LETTERS
        .iter()
        .filter_map(|&letter| {
            let text = opts.get(letter)?.as_str()?.trim();
            (!text.is_empty()).then(|| (letter, text.to_string()))
        })
        .collect();
    if present.len() < 2 {
        return None;
    }

    let correct_letter = entry
        .get("correct")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_uppercase())
        .unwrap_or_else(|| "A".to_string());
    let correct_index = present
        .iter()
        .position(|(letter, _)| *letter == correct_letter)
        .unwrap_or(0);

    let options: Vec<String> = present.into_iter().map(|(_, text)| text).collect();
    let explanation = entry
        .get("explanation")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| options[correct_index].clone());

    Some(PracticeQuestion {
        id: format!("static-{domain}-{position}"),
        question: entry
            .get("question")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
        options,
        correct_index,
        explanation,
        domain,
    })
}
