//! Distractor sourcing for multiple-choice items.

use rand::seq::SliceRandom;
use rand::Rng;

use studyforge_core::text::{normalize_whitespace, truncate_chars};

/// Commonly confused terms: lookup key to three plausible wrong answers.
pub const DISTRACTOR_BANK: &[(&str, [&str; 3])] = &[
    ("dmarc", ["SPF", "DKIM", "S/MIME"]),
    ("spf", ["DMARC", "DKIM", "BGP"]),
    ("dkim", ["SPF", "DMARC", "DNSSEC"]),
    ("mtbf", ["MTTR", "RTO", "RPO"]),
    ("mttr", ["MTBF", "RTO", "RPO"]),
    ("rto", ["RPO", "MTBF", "MTTR"]),
    ("rpo", ["RTO", "MTBF", "MTTR"]),
    ("sle", ["ALE", "ARO", "EF"]),
    ("ale", ["SLE", "ARO", "EF"]),
    ("aro", ["SLE", "ALE", "EF"]),
    ("phishing", ["Spear phishing", "Whaling", "Vishing"]),
    ("spear phishing", ["Phishing", "Whaling", "Vishing"]),
    ("whaling", ["Phishing", "Spear phishing", "Vishing"]),
    ("vishing", ["Phishing", "Smishing", "Spear phishing"]),
    ("smishing", ["Phishing", "Vishing", "Spear phishing"]),
    ("ids", ["IPS", "SIEM", "Firewall"]),
    ("ips", ["IDS", "SIEM", "Firewall"]),
    ("hashing", ["Encryption", "Encoding", "Obfuscation"]),
    ("encryption", ["Hashing", "Encoding", "Obfuscation"]),
    ("symmetric", ["Asymmetric", "Hashing", "PKI"]),
    ("asymmetric", ["Symmetric", "Hashing", "PKI"]),
    ("tpm", ["HSM", "UEFI", "Secure Boot"]),
    ("hsm", ["TPM", "UEFI", "Secure Boot"]),
    ("reconnaissance", ["Scanning", "Enumeration", "Exploitation"]),
    ("passive reconnaissance", ["Active reconnaissance", "Scanning", "Enumeration"]),
    ("active reconnaissance", ["Passive reconnaissance", "Scanning", "Exploitation"]),
    ("siem", ["IDS", "IPS", "SOAR"]),
    ("soar", ["SIEM", "IDS", "IPS"]),
    ("sso", ["MFA", "Federation", "LDAP"]),
    ("mfa", ["SSO", "Federation", "LDAP"]),
    ("ldap", ["RADIUS", "Kerberos", "SAML"]),
    ("radius", ["LDAP", "Kerberos", "TACACS+"]),
    ("kerberos", ["LDAP", "RADIUS", "SAML"]),
    ("xss", ["SQL injection", "CSRF", "Buffer overflow"]),
    ("sql injection", ["XSS", "CSRF", "LDAP injection"]),
    ("csrf", ["XSS", "SQL injection", "Clickjacking"]),
    ("ransomware", ["Spyware", "Trojan", "Worm"]),
    ("trojan", ["Ransomware", "Worm", "Spyware"]),
    ("worm", ["Virus", "Trojan", "Ransomware"]),
    ("virus", ["Worm", "Trojan", "Ransomware"]),
];

const KEY_CHARS: usize = 50;
/// Answers at or below this length are too thin to pose as a wrong choice.
pub const MIN_DISTRACTOR_CHARS: usize = 15;
const WANTED: usize = 3;

/// Lookup key: lowercased, whitespace-normalized, at most 50 characters.
pub fn lookup_key(text: &str) -> String {
    let normalized = normalize_whitespace(text).to_lowercase();
    truncate_chars(&normalized, KEY_CHARS).to_string()
}

fn long_enough(answer: &str) -> bool {
    answer.chars().count() > MIN_DISTRACTOR_CHARS
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric();
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

/// Bank entry for a key: an exact match, else the longest bank key that
/// appears in it as a whole word.
pub fn bank_entry(key: &str) -> Option<&'static [&'static str; 3]> {
    if let Some((_, entry)) = DISTRACTOR_BANK.iter().find(|(k, _)| *k == key) {
        return Some(entry);
    }
    DISTRACTOR_BANK
        .iter()
        .filter(|(k, _)| contains_word(key, k))
        .max_by_key(|(k, _)| k.len())
        .map(|(_, entry)| entry)
}

/// Unique, whitespace-normalized answers of the deck in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct AnswerPool {
    answers: Vec<String>,
}

impl AnswerPool {
    pub fn new<'a>(answers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let answers = answers
            .into_iter()
            .map(normalize_whitespace)
            .filter(|a| !a.is_empty() && seen.insert(a.clone()))
            .collect();
        Self { answers }
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Three wrong answers for `correct`, or fewer if the deck runs dry.
    ///
    /// The bank is consulted with `term` when one was extracted, else with
    /// the answer itself. Without a bank entry, other deck answers longer
    /// than [`MIN_DISTRACTOR_CHARS`] that are not a prefix of the correct
    /// answer are drawn at random.
    pub fn distractors<R: Rng + ?Sized>(
        &self,
        correct: &str,
        term: Option<&str>,
        rng: &mut R,
    ) -> Vec<String> {
        let key = lookup_key(term.unwrap_or(correct));

        let candidates: Vec<&str> = match bank_entry(&key) {
            Some(entry) => entry.iter().copied().filter(|d| *d != correct).collect(),
            None => self
                .answers
                .iter()
                .map(String::as_str)
                .filter(|a| *a != correct && !correct.starts_with(*a) && long_enough(*a))
                .collect(),
        };

        let mut picked: Vec<String> = candidates
            .choose_multiple(rng, WANTED)
            .map(|s| s.to_string())
            .collect();

        if picked.len() < WANTED {
            let mut extra: Vec<&str> = self
                .answers
                .iter()
                .map(String::as_str)
                .filter(|a| *a != correct && long_enough(*a) && !picked.iter().any(|p| p == a))
                .collect();
            extra.shuffle(rng);
            let missing = WANTED - picked.len();
            picked.extend(extra.into_iter().take(missing).map(str::to_string));
        }

        picked
    }
}
