//! Quality rules for extracted terms and definitions.
//!
//! Each check is a named entry in an ordered table. A candidate is rejected
//! by the first rule that fires, and the rule's name is reported so the
//! extractor can count rejections by cause.

use std::sync::LazyLock;

use regex::Regex;

/// A named rejection rule: `rejects` returns `true` when the text fails it.
pub struct Rule {
    pub name: &'static str,
    pub rejects: fn(&str) -> bool,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid rule regex")
}

static PRONOUN_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)^(?:most|some|many|where|what|how|that|this|these|those|we|they|there|someone|everyone|nothing|no system)\b")
});
static BARE_ARTICLE_NOUN: LazyLock<Regex> = LazyLock::new(|| re(r"^(?:the|a|an)\s+\w+$"));
static THE_GENERIC_NOUN: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^the\s+(?:database|vulnerabilities|attackers|good|bad)\b"));
static CONNECTOR_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)^(?:once|ensure|manages|automatically|no|attackers|other|stronger)\s")
});

static HEADING_OPENER: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^(?:example|examples|types|overview|continued|and much more)\b"));
static FILLER_OPENER: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^(?:this may|there's a|get ready|time to)\b"));
static VERB: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)\b(?:is|are|was|were|have|has|had|do|does|did|can|cannot|could|will|would|may|might|must|prevent|ensures?|protects?|allows?|denies?|provides?|requires?|means?|refers?|describes?|includes?|covers?|applies?|implements?|manages?|determines?|validates?|identifies?|monitors?|blocks?|captures?|exchanges?|binds?|mimics?)\b")
});
static PLURAL_PRONOUN_OPENER: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^(?:they|we|there)\s+"));
static DANGLING_CAPITAL: LazyLock<Regex> = LazyLock::new(|| re(r"\s+[A-Z][a-z]+\s*$"));
static COMMA_SPLIT: LazyLock<Regex> = LazyLock::new(|| re(r",\s*"));

static WEAK_PREDICATE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^(?:cascading|something else)"));
static CASE_NOISE: LazyLock<Regex> = LazyLock::new(|| re(r"[a-z][A-Z]|[A-Z][a-z]{2,}[A-Z]"));

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Whether the text contains one of the recognised verbs.
pub fn has_verb(text: &str) -> bool {
    VERB.is_match(text)
}

/// Three or more comma parts averaging under 30 characters.
pub fn is_list(text: &str) -> bool {
    let parts: Vec<&str> = COMMA_SPLIT.split(text).collect();
    if parts.len() < 3 {
        return false;
    }
    let total: usize = parts.iter().map(|p| char_len(p.trim())).sum();
    (total as f64 / parts.len() as f64) < 30.0
}

/// Two words or fewer, or five or fewer without a verb.
pub fn is_fragment(text: &str) -> bool {
    let words = word_count(text);
    (words <= 5 && !has_verb(text)) || words <= 2
}

/// Text that is a heading, filler, or too short to carry a definition.
pub fn must_skip(text: &str) -> bool {
    let t = text.trim();
    t.is_empty()
        || char_len(t) < 30
        || HEADING_OPENER.is_match(t)
        || FILLER_OPENER.is_match(t)
        || t.ends_with(':')
        || t.starts_with('?')
}

/// Rules a term must pass, checked in order against the trimmed term.
pub const TERM_RULES: &[Rule] = &[
    Rule {
        name: "term-length",
        rejects: |t| {
            let n = char_len(t);
            !(2..=50).contains(&n)
        },
    },
    Rule {
        name: "pronoun-opener",
        rejects: |t| PRONOUN_OPENER.is_match(t),
    },
    Rule {
        name: "bare-article-noun",
        rejects: |t| BARE_ARTICLE_NOUN.is_match(t),
    },
    Rule {
        name: "generic-the-noun",
        rejects: |t| THE_GENERIC_NOUN.is_match(t),
    },
    Rule {
        name: "connector-opener",
        rejects: |t| CONNECTOR_OPENER.is_match(t),
    },
    Rule {
        name: "too-many-words",
        rejects: |t| word_count(t) > 6,
    },
    Rule {
        name: "generic-single-word",
        rejects: |t| word_count(t) == 1 && t.starts_with(|c: char| c.is_ascii_lowercase()),
    },
];

/// Rules a definition must pass, checked in order.
pub const DEFINITION_RULES: &[Rule] = &[
    Rule {
        name: "heading-or-short",
        rejects: must_skip,
    },
    Rule {
        name: "comma-list",
        rejects: is_list,
    },
    Rule {
        name: "fragment",
        rejects: is_fragment,
    },
    Rule {
        name: "no-verb",
        rejects: |t| !has_verb(t),
    },
    Rule {
        name: "definition-length",
        rejects: |t| char_len(t) < 40,
    },
    Rule {
        name: "pronoun-opener",
        rejects: |t| PLURAL_PRONOUN_OPENER.is_match(t.trim()),
    },
    Rule {
        name: "dangling-capital",
        rejects: |t| DANGLING_CAPITAL.is_match(t) && !t.trim().ends_with('.'),
    },
];

/// Extra rules for the predicate of an "X is/are Y" sentence.
pub const PREDICATE_RULES: &[Rule] = &[
    Rule {
        name: "predicate-length",
        rejects: |p| char_len(p) < 25,
    },
    Rule {
        name: "weak-predicate",
        rejects: |p| WEAK_PREDICATE.is_match(p),
    },
];

/// Name of the first rule in `rules` that rejects `text`.
pub fn first_rejection(rules: &[Rule], text: &str) -> Option<&'static str> {
    rules.iter().find(|r| (r.rejects)(text)).map(|r| r.name)
}

pub fn term_rejection(term: &str) -> Option<&'static str> {
    first_rejection(TERM_RULES, term.trim())
}

pub fn definition_rejection(text: &str) -> Option<&'static str> {
    first_rejection(DEFINITION_RULES, text)
}

pub fn is_valid_term(term: &str) -> bool {
    term_rejection(term).is_none()
}

pub fn is_complete_definition(text: &str) -> bool {
    definition_rejection(text).is_none()
}

/// Mixed-case runs typical of OCR or markup artifacts ("securityPolicy", "FirewallRules").
pub fn has_case_noise(text: &str) -> bool {
    CASE_NOISE.is_match(text)
}
