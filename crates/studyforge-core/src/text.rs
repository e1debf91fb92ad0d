//! Text normalization helpers shared by every pipeline stage.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*").expect("valid regex"));
static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid regex"));
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid regex"));
static NON_ALNUM_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Acronyms that keep their canonical casing in titles.
const ACRONYMS: &[&str] = &[
    "IoT", "XSS", "SQL", "DNS", "IP", "VPN", "API", "MFA", "PKI", "AAA", "CIA", "NIST", "SCAP",
    "TOCTOU", "TPM", "DLP", "FIM", "IAM", "NGFW", "NAT", "SAST", "BIA", "AD", "SLA", "IOC",
];

static ACRONYM_WORDS: LazyLock<(Regex, HashMap<String, &'static str>)> = LazyLock::new(|| {
    let pattern = format!(r"(?i)\b(?:{})\b", ACRONYMS.join("|"));
    let canonical = ACRONYMS
        .iter()
        .map(|a| (a.to_lowercase(), *a))
        .collect::<HashMap<_, _>>();
    (Regex::new(&pattern).expect("valid regex"), canonical)
});

/// Collapse every whitespace run to a single space and trim.
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Lowercased, whitespace-normalized form used for duplicate detection.
pub fn dedupe_key(s: &str) -> String {
    normalize_whitespace(s).to_lowercase()
}

/// Kebab-case key for a term: parentheticals and punctuation dropped.
///
/// `"Cross-site Scripting (XSS)"` becomes `"cross-site-scripting"`.
pub fn kebab_slug(s: &str) -> String {
    let without_parens = PARENTHETICAL.replace_all(s, " ");
    let cleaned = NON_SLUG_CHARS.replace_all(&without_parens, "");
    let dashed = WHITESPACE.replace_all(cleaned.trim(), "-").to_lowercase();
    let collapsed = DASH_RUNS.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

/// Tag-style slug: lowercase alphanumeric runs joined by dashes, max 60 chars.
pub fn tag_slug(s: &str) -> String {
    let lower = normalize_whitespace(s).to_lowercase();
    let dashed = NON_ALNUM_RUNS.replace_all(&lower, "-");
    truncate_chars(dashed.trim_matches('-'), 60).to_string()
}

/// Capitalize each word, keeping well-known acronyms in their usual casing.
pub fn title_case(s: &str) -> String {
    let titled = s
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");

    let (re, canonical) = &*ACRONYM_WORDS;
    re.replace_all(&titled, |caps: &regex::Captures<'_>| {
        let word = &caps[0];
        canonical
            .get(&word.to_lowercase())
            .map(|c| (*c).to_string())
            .unwrap_or_else(|| word.to_string())
    })
    .into_owned()
}

/// The first `max` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Stable content id: `<prefix>-<first 12 hex chars of sha256(parts joined by "||")>`.
pub fn content_id(prefix: &str, parts: &[&str]) -> String {
    let digest = Sha256::digest(parts.join("||").as_bytes());
    let hex = hex::encode(digest);
    format!("{prefix}-{}", &hex[..12])
}
