//! Trigger phrase detector
//!
//! Scans the message for lexicon phrases and reports one `trigger:<category>`
//! signal per category with at least one hit.

use crate::detectors::base::{Detector, MessageText};
use crate::lexicon::TriggerLexicon;
use crate::models::{Signal, SignalSet};
use std::sync::Arc;

pub struct TriggerPhraseDetector {
    lexicon: Arc<TriggerLexicon>,
}

impl TriggerPhraseDetector {
    pub fn new(lexicon: Arc<TriggerLexicon>) -> Self {
        Self { lexicon }
    }
}

impl Detector for TriggerPhraseDetector {
    fn name(&self) -> &'static str {
        "trigger-phrases"
    }

    fn description(&self) -> &'static str {
        "Detects reproach, sarcasm, accusation and manipulation phrases"
    }

    fn detect(&self, message: &MessageText<'_>) -> SignalSet {
        let mut signals = SignalSet::new();
        for entry in self
            .lexicon
            .entries()
            .iter()
            .filter(|e| message.folded.contains(&e.phrase))
        {
            signals.insert(Signal::Trigger(entry.category));
            signals.record_phrase(entry.phrase.clone());
        }
        signals
    }
}
