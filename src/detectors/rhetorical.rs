//! Rhetorical question detector

use crate::detectors::base::{Detector, MessageText};
use crate::models::{Signal, SignalSet};

/// Openers that turn a question into a reproach
const RHETORICAL_OPENERS: &[&str] = &[
    "tu trouves ça normal",
    "tu te rends compte",
    "tu te moques de moi",
    "c'est normal ça",
];

pub struct RhetoricalQuestionDetector;

impl Detector for RhetoricalQuestionDetector {
    fn name(&self) -> &'static str {
        "rhetorical-question"
    }

    fn description(&self) -> &'static str {
        "Detects stacked or rhetorical questions"
    }

    fn detect(&self, message: &MessageText<'_>) -> SignalSet {
        let mut signals = SignalSet::new();
        let questions = message.raw.matches('?').count();
        let rhetorical_opener = questions > 0
            && RHETORICAL_OPENERS
                .iter()
                .any(|o| message.folded.contains(o));
        if questions >= 2 || rhetorical_opener {
            signals.insert(Signal::RhetoricalQuestion);
        }
        signals
    }
}
