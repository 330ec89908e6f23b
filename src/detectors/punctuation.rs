//! Punctuation excess detector

use crate::detectors::base::{Detector, MessageText};
use crate::models::{Signal, SignalSet};

/// More than this many `!` in one message is excessive
const MAX_EXCLAMATIONS: usize = 2;

pub struct PunctuationExcessDetector;

impl Detector for PunctuationExcessDetector {
    fn name(&self) -> &'static str {
        "punctuation-excess"
    }

    fn description(&self) -> &'static str {
        "Detects runs of exclamation marks"
    }

    fn detect(&self, message: &MessageText<'_>) -> SignalSet {
        let mut signals = SignalSet::new();
        let total = message.raw.matches('!').count();
        if total > MAX_EXCLAMATIONS || message.raw.contains("!!") {
            signals.insert(Signal::PunctuationExcess);
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged(text: &str) -> bool {
        PunctuationExcessDetector
            .detect(&MessageText::new(text))
            .contains(Signal::PunctuationExcess)
    }

    #[test]
    fn test_run_of_two() {
        assert!(flagged("Réponds !!"));
    }

    #[test]
    fn test_three_scattered() {
        assert!(flagged("Non! Jamais! Stop!"));
    }

    #[test]
    fn test_single_and_pair_apart_are_fine() {
        assert!(!flagged("Super !"));
        assert!(!flagged("Bonjour ! À demain !"));
    }
}
