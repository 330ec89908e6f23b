//! All-caps detector
//!
//! A message counts as shouted when it has at least one cased letter and
//! every cased letter is uppercase.

use crate::detectors::base::{Detector, MessageText};
use crate::models::{Signal, SignalSet};

pub struct AllCapsDetector;

impl Detector for AllCapsDetector {
    fn name(&self) -> &'static str {
        "all-caps"
    }

    fn description(&self) -> &'static str {
        "Detects messages written entirely in capitals"
    }

    fn detect(&self, message: &MessageText<'_>) -> SignalSet {
        let mut signals = SignalSet::new();
        let mut cased = false;
        for c in message.raw.chars() {
            if c.is_lowercase() {
                return signals;
            }
            cased |= c.is_uppercase();
        }
        if cased {
            signals.insert(Signal::AllCaps);
        }
        signals
    }
}
