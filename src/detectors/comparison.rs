//! Negative comparison detector

use crate::detectors::base::{Detector, MessageText};
use crate::models::{Signal, SignalSet};

const COMPARISON_PHRASES: &[&str] = &[
    "contrairement à",
    "au moins lui",
    "au moins elle",
    "lui au moins",
    "elle au moins",
];

pub struct NegativeComparisonDetector;

impl Detector for NegativeComparisonDetector {
    fn name(&self) -> &'static str {
        "negative-comparison"
    }

    fn description(&self) -> &'static str {
        "Detects unfavourable comparisons with other people"
    }

    fn detect(&self, message: &MessageText<'_>) -> SignalSet {
        let mut signals = SignalSet::new();
        if COMPARISON_PHRASES.iter().any(|p| message.folded.contains(p)) {
            signals.insert(Signal::NegativeComparison);
        }
        signals
    }
}
