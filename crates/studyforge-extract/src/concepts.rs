//! Concept dictionary extraction.
//!
//! Walks a [`RawCorpus`] section by section. A section whose title has a
//! curated definition becomes a concept directly; every bullet is then
//! tried against the dash rule ("Term - definition") and, failing a dash,
//! the copula rule ("X is/are Y"). The first concept for a slug wins.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use studyforge_core::model::{Concept, ConceptSource, Confidence, RawCorpus, RawDomain, RawSection};
use studyforge_core::text::{kebab_slug, title_case};

use crate::curated::curated_definition;
use crate::rules::{
    definition_rejection, first_rejection, has_case_noise, term_rejection, PREDICATE_RULES,
};

static DASH_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.+?)\s+[-–—]\s+(.+)$").expect("valid regex"));
static COPULA_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+(?:is|are)\s+(.+)$").expect("valid regex"));
static CONTINUED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\(continued\)\s*").expect("valid regex"));

const SOURCE_KIND: &str = "pdf";
const MIN_BULLET_CHARS: usize = 30;
/// Bullets longer than this earn high confidence without a curated override.
const HIGH_CONFIDENCE_CHARS: usize = 60;

/// Which extraction rule produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// `Term - definition`
    Dash,
    /// `Subject is/are predicate`
    Copula,
}

/// A term/definition pair that passed every quality rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub rule: ExtractionRule,
    pub term: String,
    pub definition: String,
}

/// Counters reported after a dictionary run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub total_bullets: usize,
    pub skipped: usize,
    pub curated: usize,
    pub dash_rule: usize,
    pub copula_rule: usize,
    /// Valid candidates dropped because their slug was already taken.
    pub duplicates: usize,
    /// Skipped bullets by the name of the rule that rejected them.
    pub rejections: BTreeMap<&'static str, usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ConceptDictionary {
    pub concepts: Vec<Concept>,
    pub stats: ExtractionStats,
}

impl ConceptDictionary {
    /// Concept counts keyed by domain number (`"1"`, `"2"`, ...).
    pub fn per_domain(&self) -> BTreeMap<String, usize> {
        let mut out = BTreeMap::new();
        for c in &self.concepts {
            let d = c.domain.split('.').next().unwrap_or_default().to_string();
            *out.entry(d).or_insert(0) += 1;
        }
        out
    }
}

/// Try both extraction rules on one trimmed bullet.
///
/// A bullet with a spaced dash is judged by the dash rule alone. On
/// rejection the name of the failing rule is returned.
pub fn extract_candidate(bullet: &str) -> Result<Candidate, &'static str> {
    let t = bullet.trim();
    if t.chars().count() < MIN_BULLET_CHARS {
        return Err("too-short");
    }

    if let Some(caps) = DASH_FORM.captures(t) {
        let term = caps[1].trim();
        let definition = caps[2].trim();
        if let Some(rule) = term_rejection(term).or_else(|| definition_rejection(definition)) {
            return Err(rule);
        }
        return Ok(Candidate {
            rule: ExtractionRule::Dash,
            term: term.to_string(),
            definition: definition.to_string(),
        });
    }

    if let Some(caps) = COPULA_FORM.captures(t) {
        let subject = caps[1].trim();
        let predicate = caps[2].trim();
        if let Some(rule) = first_rejection(PREDICATE_RULES, predicate) {
            return Err(rule);
        }
        if let Some(rule) = term_rejection(subject) {
            return Err(rule);
        }
        if has_case_noise(t) {
            return Err("case-noise");
        }
        if let Some(rule) = definition_rejection(t) {
            return Err(rule);
        }
        return Ok(Candidate {
            rule: ExtractionRule::Copula,
            term: subject.to_string(),
            definition: t.to_string(),
        });
    }

    Err("no-pattern")
}

struct Builder {
    concepts: Vec<Concept>,
    taken: HashSet<String>,
    stats: ExtractionStats,
}

impl Builder {
    /// Insert unless the slug is empty or already taken.
    fn insert(&mut self, concept: Concept) -> bool {
        if concept.concept_id.is_empty() || !self.taken.insert(concept.concept_id.clone()) {
            return false;
        }
        self.concepts.push(concept);
        true
    }

    fn reject(&mut self, rule: &'static str) {
        self.stats.skipped += 1;
        *self.stats.rejections.entry(rule).or_insert(0) += 1;
        tracing::debug!(rule, "bullet rejected");
    }
}

fn domain_label(domain: &RawDomain, position: usize) -> String {
    let number = match &domain.domain_num {
        Some(label) => label.to_string(),
        None => domain
            .domain()
            .map(|d| d.to_string())
            .unwrap_or_else(|| (position + 1).to_string()),
    };
    format!("{number}.0")
}

fn section_label(section: &RawSection, name: &str) -> String {
    section
        .section_num
        .as_ref()
        .map(|n| n.to_string())
        .unwrap_or_else(|| name.to_string())
}

fn concept(
    slug: String,
    term: &str,
    definition: &str,
    domain: &str,
    section: &str,
    confidence: Confidence,
) -> Concept {
    Concept {
        concept_id: slug,
        term: title_case(term),
        definition: definition.to_string(),
        domain: domain.to_string(),
        section: section.to_string(),
        notes: String::new(),
        source: ConceptSource {
            kind: SOURCE_KIND.to_string(),
            confidence,
        },
    }
}

/// Build the concept dictionary for a whole corpus.
pub fn build_concept_dictionary(corpus: &RawCorpus) -> ConceptDictionary {
    let mut b = Builder {
        concepts: Vec::new(),
        taken: HashSet::new(),
        stats: ExtractionStats::default(),
    };

    for (position, raw_domain) in corpus.domains.iter().enumerate() {
        let domain = domain_label(raw_domain, position);

        for section in &raw_domain.sections {
            let section_name = CONTINUED.replace_all(&section.name, " ").trim().to_string();
            let section_id = section_label(section, &section_name);

            let section_slug = kebab_slug(&section_name);
            if let Some(definition) = curated_definition(&section_slug) {
                let c = concept(
                    section_slug,
                    &section_name,
                    definition,
                    &domain,
                    &section_id,
                    Confidence::High,
                );
                if b.insert(c) {
                    b.stats.curated += 1;
                }
            }

            for bullet in &section.bullets {
                b.stats.total_bullets += 1;
                let candidate = match extract_candidate(bullet) {
                    Ok(c) => c,
                    Err(rule) => {
                        b.reject(rule);
                        continue;
                    }
                };

                let slug = kebab_slug(&candidate.term);
                let curated = curated_definition(&slug);
                // Dash bullets are trusted outright; copula sentences need length.
                let confidence = if curated.is_some()
                    || candidate.rule == ExtractionRule::Dash
                    || bullet.trim().chars().count() > HIGH_CONFIDENCE_CHARS
                {
                    Confidence::High
                } else {
                    Confidence::Medium
                };
                let definition = curated.unwrap_or(candidate.definition.as_str());
                let c = concept(slug, &candidate.term, definition, &domain, &section_id, confidence);

                if b.insert(c) {
                    match candidate.rule {
                        ExtractionRule::Dash => b.stats.dash_rule += 1,
                        ExtractionRule::Copula => b.stats.copula_rule += 1,
                    }
                } else {
                    b.stats.duplicates += 1;
                }
            }
        }
    }

    // Stable sort keeps first-seen order within a section.
    b.concepts
        .sort_by(|x, y| x.domain.cmp(&y.domain).then_with(|| x.section.cmp(&y.section)));

    tracing::debug!(
        concepts = b.concepts.len(),
        bullets = b.stats.total_bullets,
        skipped = b.stats.skipped,
        "built concept dictionary"
    );

    ConceptDictionary {
        concepts: b.concepts,
        stats: b.stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn corpus(value: serde_json::Value) -> RawCorpus {
        serde_json::from_value(value).unwrap()
    }

    fn one_section(bullets: &[&str]) -> RawCorpus {
        corpus(json!({
            "domains": [{
                "domain_num": 1,
                "name": "General Security Concepts",
                "sections": [{"section_num": "1.2", "name": "Security Concepts", "bullets": bullets}]
            }]
        }))
    }

    #[test]
    fn dash_bullet_with_curated_override() {
        let dict = build_concept_dictionary(&one_section(&[
            "Non-repudiation - the assurance that a party cannot deny having performed an action.",
        ]));
        assert_eq!(dict.concepts.len(), 1);
        let c = &dict.concepts[0];
        assert_eq!(c.concept_id, "non-repudiation");
        assert_eq!(c.source.confidence, Confidence::High);
        assert_eq!(c.source.kind, "pdf");
        assert_eq!(c.domain, "1.0");
        assert_eq!(c.section, "1.2");
        assert_eq!(Some(c.definition.as_str()), curated_definition("non-repudiation"));
        assert_eq!(dict.stats.dash_rule, 1);
    }

    #[test]
    fn heading_bullet_is_discarded() {
        let dict = build_concept_dictionary(&one_section(&["Example overview of threats"]));
        assert!(dict.concepts.is_empty());
        assert_eq!(dict.stats.total_bullets, 1);
        assert_eq!(dict.stats.skipped, 1);
    }

    #[test]
    fn heading_denylist_applies_to_long_bullets() {
        assert_eq!(
            extract_candidate("Examples of attacks is a heading that covers many different things"),
            Err("heading-or-short")
        );
    }

    #[test]
    fn copula_bullet_uses_whole_sentence() {
        let bullet = "Tokenization is the replacement of sensitive data with a non-sensitive surrogate value.";
        let dict = build_concept_dictionary(&one_section(&[bullet]));
        assert_eq!(dict.concepts.len(), 1);
        let c = &dict.concepts[0];
        assert_eq!(c.concept_id, "tokenization");
        assert_eq!(c.term, "Tokenization");
        assert_eq!(c.definition, bullet);
        assert_eq!(c.source.confidence, Confidence::High);
        assert_eq!(dict.stats.copula_rule, 1);
    }

    #[test]
    fn short_dash_bullet_is_still_high_confidence() {
        let bullet = "Decoy net - a set of fake hosts that can lure in attackers.";
        assert!(bullet.chars().count() <= HIGH_CONFIDENCE_CHARS);
        let dict = build_concept_dictionary(&one_section(&[bullet]));
        assert_eq!(dict.concepts.len(), 1);
        let c = &dict.concepts[0];
        assert_eq!(c.concept_id, "decoy-net");
        assert_eq!(c.definition, "a set of fake hosts that can lure in attackers.");
        assert_eq!(c.source.confidence, Confidence::High);
    }

    #[test]
    fn numeric_section_labels_are_accepted() {
        let dict = build_concept_dictionary(&corpus(json!({
            "domains": [{
                "domain_num": 1,
                "sections": [{"section_num": 1.2, "name": "Notes", "bullets": [
                    "Tokenization is the replacement of sensitive data with a non-sensitive surrogate value."
                ]}]
            }]
        })));
        assert_eq!(dict.concepts.len(), 1);
        assert_eq!(dict.concepts[0].section, "1.2");
        assert_eq!(dict.concepts[0].domain, "1.0");
    }

    #[test]
    fn short_copula_sentence_gets_medium_confidence() {
        let bullet = "A honeycomb is a decoy system designed to lure attackers.";
        let dict = build_concept_dictionary(&one_section(&[bullet]));
        assert_eq!(dict.concepts.len(), 1);
        assert_eq!(dict.concepts[0].source.confidence, Confidence::Medium);
    }

    #[test]
    fn copula_rejects_case_noise_and_weak_predicates() {
        assert_eq!(
            extract_candidate("SecurityPolicy objects are the containers for firewall rule definitions."),
            Err("case-noise")
        );
        assert_eq!(
            extract_candidate("The result is cascading failures across many connected systems."),
            Err("weak-predicate")
        );
    }

    #[test]
    fn dash_match_does_not_fall_back_to_copula() {
        assert!(matches!(
            extract_candidate("the firewall - is a device that is placed between networks always."),
            Err("bare-article-noun")
        ));
    }

    #[test]
    fn curated_section_title_becomes_concept() {
        let dict = build_concept_dictionary(&corpus(json!({
            "domains": [{
                "domain_num": 1,
                "sections": [{"section_num": "1.4", "name": "Zero Trust (continued)", "bullets": [
                    "Zero Trust - a model where every single request is verified before access is granted."
                ]}]
            }]
        })));
        assert_eq!(dict.concepts.len(), 1);
        assert_eq!(dict.concepts[0].term, "Zero Trust");
        assert_eq!(dict.stats.curated, 1);
        assert_eq!(dict.stats.duplicates, 1);
    }

    #[test]
    fn first_extraction_wins() {
        let dict = build_concept_dictionary(&one_section(&[
            "Tokenization is the replacement of sensitive data with a non-sensitive surrogate value.",
            "Tokenization - swaps card numbers for random tokens that can be mapped back later.",
        ]));
        assert_eq!(dict.concepts.len(), 1);
        assert!(dict.concepts[0].definition.starts_with("Tokenization is"));
        assert_eq!(dict.stats.duplicates, 1);
    }

    #[test]
    fn concept_ids_are_unique() {
        let dict = build_concept_dictionary(&one_section(&[
            "Tokenization is the replacement of sensitive data with a non-sensitive surrogate value.",
            "Salting is the addition of random data to a password before it is hashed.",
            "Salting - the addition of random data to each password before hashing happens.",
        ]));
        let ids: HashSet<_> = dict.concepts.iter().map(|c| &c.concept_id).collect();
        assert_eq!(ids.len(), dict.concepts.len());
    }

    #[test]
    fn output_sorted_by_domain_then_section() {
        let dict = build_concept_dictionary(&corpus(json!({
            "domains": [
                {"domain_num": 3, "sections": [{"section_num": "3.1", "name": "x", "bullets": [
                    "Segmentation is the practice of dividing a network into isolated zones for control."
                ]}]},
                {"domain_num": 1, "sections": [
                    {"section_num": "1.4", "name": "y", "bullets": [
                        "Tokenization is the replacement of sensitive data with a non-sensitive surrogate value."
                    ]},
                    {"section_num": "1.2", "name": "z", "bullets": [
                        "Salting is the addition of random data to a password before it is hashed."
                    ]}
                ]}
            ]
        })));
        let order: Vec<(&str, &str)> = dict
            .concepts
            .iter()
            .map(|c| (c.domain.as_str(), c.section.as_str()))
            .collect();
        assert_eq!(order, vec![("1.0", "1.2"), ("1.0", "1.4"), ("3.0", "3.1")]);
        assert_eq!(dict.per_domain().get("1"), Some(&2));
    }

    #[test]
    fn missing_domain_number_uses_name() {
        let dict = build_concept_dictionary(&corpus(json!({
            "domains": [{"name": "Domain 4: Security Operations", "sections": [{"name": "Ops", "bullets": [
                "Quarantine is the isolation of a suspicious file so that it cannot execute."
            ]}]}]
        })));
        assert_eq!(dict.concepts[0].domain, "4.0");
        assert_eq!(dict.concepts[0].section, "Ops");
    }
}
