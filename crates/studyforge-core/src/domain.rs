//! Exam blueprint and keyword-based domain inference.
//!
//! The blueprint weights (12/24/13/29/22 percent) drive both samplers. The
//! keyword table is an ordered rule list: domains 2 through 5 are tested
//! first and domain 1, whose vocabulary is the most generic, is tested last
//! and is also the fallback when nothing matches.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Domain;
use crate::sampling::{DomainTargets, SamplePlan, TopUp};

/// Tags every generated card and merged record carries.
pub const EXAM_TAGS: [&str; 2] = ["security-plus", "sy0-701"];

/// Flashcard quotas: 300 cards split by exam weight.
pub const FLASHCARD_TARGETS: DomainTargets = DomainTargets([36, 72, 39, 87, 66]);
pub const FLASHCARD_TOTAL: usize = 300;

/// Question quotas: 295 MCQs split by exam weight.
pub const QUESTION_TARGETS: DomainTargets = DomainTargets([35, 71, 38, 86, 65]);
pub const QUESTION_TOTAL: usize = 295;

/// Order in which under-filled flashcard quotas borrow from other domains.
pub const FALLBACK_ORDER: [Domain; 5] = [
    Domain::Four,
    Domain::Two,
    Domain::Five,
    Domain::Three,
    Domain::One,
];

/// Default plan for the flashcard sampler.
pub fn flashcard_plan() -> SamplePlan {
    SamplePlan {
        targets: FLASHCARD_TARGETS,
        total: FLASHCARD_TOTAL,
        top_up: TopUp::DomainOrder(FALLBACK_ORDER.to_vec()),
    }
}

/// Default plan for the question sampler.
pub fn question_plan() -> SamplePlan {
    SamplePlan {
        targets: QUESTION_TARGETS,
        total: QUESTION_TOTAL,
        top_up: TopUp::AnyLeftover,
    }
}

/// One entry of the keyword table.
pub struct KeywordRule {
    pub domain: Domain,
    pub pattern: Regex,
}

impl KeywordRule {
    fn new(domain: Domain, keywords: &str) -> Self {
        let pattern = Regex::new(&format!(r"(?i)\b(?:{keywords})\b")).expect("valid keyword regex");
        Self { domain, pattern }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Keyword rules in priority order: 2, 3, 4, 5, then 1.
pub static DOMAIN_KEYWORDS: LazyLock<Vec<KeywordRule>> = LazyLock::new(|| {
    vec![
        KeywordRule::new(
            Domain::Two,
            "phishing|ransomware|malware|trojan|worm|virus|reconnaissance|vulnerability|exploit|\
             social engineering|on-path|man-in-the-middle|SQL injection|XSS|CSRF|threat actor|\
             organized crime|nation-state|brute force|DDoS|keylogger|honeypot|watering hole|OSINT|\
             penetration test|default credentials|buffer overflow|replay attack|DNS poisoning|\
             smishing|hacktivist|side.?loading|jailbreak|misinformation|resource consumption|\
             rogue access|collision|enumeration|insecure protocols|misconfiguration|\
             open permissions|partially known|exfiltration|embedded system|escape|end-of-life|\
             spoofing|credential stuffing|privilege escalation|backdoor|rootkit|spyware|adware|\
             botnet|attack|attacker|blocked|intercept|impersonation|circumvent|malicious|inject|\
             script",
        ),
        KeywordRule::new(
            Domain::Three,
            "DMARC|SPF|DKIM|firewall|network security|identity|authentication|federation|LDAP|\
             RADIUS|Kerberos|MFA|SSO|SAML|VPN|NAT|segmentation|VLAN|SASE|802\\.1X|IPsec|WPA3|WAF|\
             load balancer|jump server|containerization|blockchain|digital signature|OCSP|HSM|\
             secure enclave|TPM|wireless|biometric|AAA|something you know|something you have|\
             air gap|fail open|HTTPS|COPE|BYOD|smart card|development lifecycle|\
             posture assessment|record.?level|journaling|traffic flow|port number|\
             protected segment|access point",
        ),
        KeywordRule::new(
            Domain::Four,
            "incident response|forensics|SIEM|SOAR|monitoring|recovery|backup|root cause|MTBF|\
             MTTR|RTO|RPO|BIA|IOC|containment|escalation|tabletop exercise|chain of custody|\
             alert tuning|NetFlow|hardening|patch|remediation|onboarding|offboarding|MDM|\
             antivirus|quarantine|HIPS|file integrity|FIM|DLP|backout plan|disconnect|disabling|\
             account|false negative|disaster recovery|outage|breach|configuration enforcement|\
             availability|system availability|emergency|dispatching|continuity|\
             alternative.*process|log entries|detect|validation|patching|vulnerability scan",
        ),
        KeywordRule::new(
            Domain::Five,
            "policy|compliance|governance|audit|regulation|risk management|MOA|SLA|NDA|\
             regulated|data owner|data custodian|due care|risk appetite|acceptance|\
             self-assessment|responsibility matrix|conflict of interest|data sovereignty|privacy|\
             user training|shadow IT|SLE|ALE|ARO|EF|exposure factor|uptime|automation|\
             formal document|partnership|governmental|disclosure",
        ),
        KeywordRule::new(
            Domain::One,
            "CIA|confidentiality|integrity|availability|security controls|asset|zero trust|\
             physical security|obfuscation|hashing|encryption|symmetric|asymmetric|PKI|\
             non-repudiation|deterrent|detective|preventive|corrective|compensating|masking|\
             tokenization|salting|least privilege|discretionary|access control vestibule|\
             change management|gap analysis|create hash|complexity|verifies.*file|mitigate|\
             race condition|removable media|trustworthiness",
        ),
    ]
});

/// The first domain whose keywords appear in `text`, or domain 1.
pub fn infer_domain(text: &str) -> Domain {
    DOMAIN_KEYWORDS
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.domain)
        .unwrap_or(Domain::One)
}

/// Use the explicit domain when present, otherwise infer from question and answer.
pub fn resolve_domain(explicit: Option<Domain>, question: &str, answer: &str) -> Domain {
    explicit.unwrap_or_else(|| infer_domain(&format!("{question} {answer}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_sum_to_totals() {
        assert_eq!(FLASHCARD_TARGETS.sum(), FLASHCARD_TOTAL);
        assert_eq!(QUESTION_TARGETS.sum(), QUESTION_TOTAL);
    }

    #[test]
    fn phishing_card_lands_in_domain_two() {
        let d = resolve_domain(
            None,
            "What is phishing?",
            "Phishing is a social engineering attack delivered by email.",
        );
        assert_eq!(d, Domain::Two);
    }

    #[test]
    fn explicit_domain_wins() {
        let d = resolve_domain(Some(Domain::Five), "What is phishing?", "An attack.");
        assert_eq!(d, Domain::Five);
    }

    #[test]
    fn priority_order_prefers_specific_domains() {
        // "encryption" is a domain 1 keyword, "VPN" a domain 3 keyword.
        assert_eq!(infer_domain("A VPN uses encryption"), Domain::Three);
        assert_eq!(infer_domain("Symmetric encryption uses one key"), Domain::One);
    }

    #[test]
    fn unmatched_text_defaults_to_domain_one() {
        assert_eq!(infer_domain("Completely unrelated words here"), Domain::One);
    }

    #[test]
    fn keywords_respect_word_boundaries() {
        // "NAT" must not fire inside "natural".
        assert_eq!(infer_domain("natural language"), Domain::One);
        assert_eq!(infer_domain("NAT hides internal addresses"), Domain::Three);
    }

    #[test]
    fn keyword_order_is_two_three_four_five_one() {
        let order: Vec<Domain> = DOMAIN_KEYWORDS.iter().map(|r| r.domain).collect();
        assert_eq!(
            order,
            vec![Domain::Two, Domain::Three, Domain::Four, Domain::Five, Domain::One]
        );
    }
}
