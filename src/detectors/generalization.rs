//! Generalization detector
//!
//! Absolute quantifiers ("toujours", "jamais", "rien", ...) turn one event
//! into a character judgement.

use crate::detectors::base::{Detector, MessageText};
use crate::models::{Signal, SignalSet};
use regex::Regex;
use std::sync::OnceLock;

static GENERALIZING: OnceLock<Regex> = OnceLock::new();

fn generalizing_pattern() -> &'static Regex {
    GENERALIZING.get_or_init(|| {
        Regex::new(r"\b(?:tous|toutes|personne|rien|jamais|toujours|tout le temps)\b").unwrap()
    })
}

pub struct GeneralizationDetector;

impl Detector for GeneralizationDetector {
    fn name(&self) -> &'static str {
        "generalization"
    }

    fn description(&self) -> &'static str {
        "Detects absolute quantifiers"
    }

    fn detect(&self, message: &MessageText<'_>) -> SignalSet {
        let mut signals = SignalSet::new();
        if generalizing_pattern().is_match(&message.folded) {
            signals.insert(Signal::Generalization);
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged(text: &str) -> bool {
        GeneralizationDetector
            .detect(&MessageText::new(text))
            .contains(Signal::Generalization)
    }

    #[test]
    fn test_generalizing_words() {
        assert!(flagged("Tu oublies TOUJOURS son sac"));
        assert!(flagged("tu ne fais jamais les devoirs"));
        assert!(flagged("c'est tout le temps pareil"));
    }

    #[test]
    fn test_whole_words_only() {
        assert!(!flagged("Il a dû tousser toute la nuit"));
        assert!(!flagged("personnel soignant"));
    }
}
