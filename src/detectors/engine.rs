//! Pattern detection engine
//!
//! The `PatternDetector` runs every registered detector over one message and
//! unions their signal sets. Detectors share nothing mutable, so a single
//! `PatternDetector` can serve any number of concurrent callers.

use crate::detectors::base::{Detector, MessageText};
use crate::models::SignalSet;
use std::sync::Arc;
use tracing::debug;

/// Orchestrates tension detection across all registered detectors
pub struct PatternDetector {
    detectors: Vec<Arc<dyn Detector>>,
}

impl PatternDetector {
    /// Create an engine with an explicit detector list
    pub fn new(detectors: Vec<Arc<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// Register an additional detector
    pub fn register(&mut self, detector: Arc<dyn Detector>) {
        self.detectors.push(detector);
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Detect all signals in `text`.
    ///
    /// Empty or whitespace-only input is a valid "nothing to flag" case and
    /// yields an empty set.
    pub fn detect(&self, text: &str) -> SignalSet {
        let message = MessageText::new(text);
        if message.is_blank() {
            return SignalSet::new();
        }

        let mut signals = SignalSet::new();
        for detector in &self.detectors {
            let found = detector.detect(&message);
            if !found.is_empty() {
                debug!("{} found {:?}", detector.name(), found.tags());
            }
            signals.extend(found);
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::default_detectors;
    use crate::lexicon::TriggerLexicon;
    use crate::models::{Signal, TriggerCategory};

    fn engine() -> PatternDetector {
        PatternDetector::new(default_detectors(TriggerLexicon::builtin()))
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(engine().detect("").is_empty());
        assert!(engine().detect("   \n").is_empty());
    }

    #[test]
    fn test_neutral_message_yields_empty_set() {
        let signals = engine().detect("Bonjour, je récupère Léa vendredi à 17h. Bonne soirée.");
        assert!(signals.is_empty());
        assert_eq!(signals.tension_count(), 0);
    }

    #[test]
    fn test_reference_message() {
        let signals =
            engine().detect("Tu es encore en retard comme d'habitude, tu ne penses qu'à toi !!");
        assert_eq!(
            signals.categories(),
            vec![TriggerCategory::Reproach, TriggerCategory::Manipulation]
        );
        assert!(signals.contains(Signal::PunctuationExcess));
        assert_eq!(signals.len(), 3);
        assert_eq!(signals.tension_count(), 4);
    }

    #[test]
    fn test_detector_order_does_not_change_result() {
        let text = "ÉVIDEMMENT, TU NE VIENS JAMAIS ??? CONTRAIREMENT À MOI !!!";
        let forward = engine().detect(text);

        let mut reversed = default_detectors(TriggerLexicon::builtin());
        reversed.reverse();
        let backward = PatternDetector::new(reversed).detect(text);

        assert_eq!(forward, backward);
        assert!(forward.contains(Signal::AllCaps));
        assert!(forward.contains(Signal::Generalization));
        assert!(forward.contains(Signal::RhetoricalQuestion));
        assert!(forward.contains(Signal::NegativeComparison));
        assert!(forward.contains(Signal::PunctuationExcess));
        assert!(forward.contains(Signal::Trigger(TriggerCategory::Sarcasm)));
    }

    #[test]
    fn test_detect_is_idempotent() {
        let text = "Tu mens, c'est ta faute !!!";
        assert_eq!(engine().detect(text), engine().detect(text));
    }
}
