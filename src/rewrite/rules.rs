//! Regex tables for the softening stages
//!
//! Order inside each table matters: a rule sees the output of the rules
//! before it.

use regex::Regex;
use std::sync::OnceLock;

/// A named pattern-to-replacement transformation
pub struct SofteningRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl SofteningRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

static GRAMMAR_RULES: OnceLock<Vec<SofteningRule>> = OnceLock::new();
static GENERALIZATION_RULES: OnceLock<Vec<SofteningRule>> = OnceLock::new();
static EXCLAMATION_RUN: OnceLock<Regex> = OnceLock::new();
static QUESTION_RUN: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();

/// Second-person accusations and blame, rewritten impersonally
pub fn grammar_rules() -> &'static [SofteningRule] {
    GRAMMAR_RULES.get_or_init(|| {
        vec![
            SofteningRule::new(
                "you-never",
                r"(?i)\btu\s+(?:ne\s+|n['’])?(\w+)\s+jamais\b",
                "il serait bien de ${1} plus souvent",
            ),
            SofteningRule::new(
                "you-always",
                r"(?i)\btu\s+(\w+)\s+toujours\b",
                "il arrive que l'on ${1}",
            ),
            SofteningRule::new(
                "why-do-you",
                r"(?i)\bpourquoi\s+(?:est-ce\s+que\s+|est-ce\s+qu['’])?tu\s+(?:ne\s+|n['’])?",
                "serait-il possible de ",
            ),
            SofteningRule::new(
                "stop",
                r"(?i)\barr[eê]te\s+(?:de\s+|d['’])",
                "il serait préférable de ne pas ",
            ),
            SofteningRule::new(
                "you-must",
                r"(?i)\b(?:tu\s+dois|vous\s+devez)\s+",
                "il serait bien de ",
            ),
            SofteningRule::new(
                "your-fault",
                r"(?i)\b(?:(?:c['’]est|tout\s+est)\s+(?:de\s+)?(?:ta|votre)\s+faute|par\s+(?:ta|votre)\s+faute)",
                "pour le bien de notre enfant, cherchons une solution",
            ),
            SofteningRule::new(
                "because-of-you",
                r"(?i)\bà\s+cause\s+de\s+(?:toi|vous)\b",
                "dans l'intérêt de notre enfant",
            ),
        ]
    })
}

/// Absolute quantifiers, softened
pub fn generalization_rules() -> &'static [SofteningRule] {
    GENERALIZATION_RULES.get_or_init(|| {
        vec![
            SofteningRule::new("always", r"(?i)\btoujours\b", "parfois"),
            SofteningRule::new("never", r"(?i)\bjamais\b", "rarement"),
            SofteningRule::new("all-the-time", r"(?i)\btout\s+le\s+temps\b", "parfois"),
        ]
    })
}

/// Any `!` (with the space French typography puts before it)
pub fn exclamation_run() -> &'static Regex {
    EXCLAMATION_RUN.get_or_init(|| Regex::new(r"\s*!+").unwrap())
}

pub fn question_run() -> &'static Regex {
    QUESTION_RUN.get_or_init(|| Regex::new(r"\?{2,}").unwrap())
}

pub fn whitespace_run() -> &'static Regex {
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").unwrap())
}
