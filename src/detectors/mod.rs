//! Tension detectors
//!
//! This module provides the detector framework and the detectors that scan a
//! message for tension indicators.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PatternDetector                         │
//! │  - Registers detectors                                      │
//! │  - Folds the message once                                   │
//! │  - Unions every detector's signals into one SignalSet       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Detector Trait                         │
//! │  - name(): Unique identifier                                │
//! │  - description(): Human-readable description                │
//! │  - detect(message): Signals found in one message            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Detectors
//!
//! - `TriggerPhraseDetector` - lexicon phrases, one signal per category
//! - `PunctuationExcessDetector` - `!!` runs or more than two `!`
//! - `AllCapsDetector` - whole message in capitals
//! - `GeneralizationDetector` - "toujours", "jamais", "rien", ...
//! - `RhetoricalQuestionDetector` - stacked or rhetorical questions
//! - `NegativeComparisonDetector` - "contrairement à", "elle au moins", ...

mod all_caps;
mod base;
mod comparison;
mod engine;
mod generalization;
mod punctuation;
mod rhetorical;
mod trigger_phrases;

pub use all_caps::AllCapsDetector;
pub use base::{Detector, MessageText};
pub use comparison::NegativeComparisonDetector;
pub use engine::PatternDetector;
pub use generalization::GeneralizationDetector;
pub use punctuation::PunctuationExcessDetector;
pub use rhetorical::RhetoricalQuestionDetector;
pub use trigger_phrases::TriggerPhraseDetector;

use crate::lexicon::TriggerLexicon;
use std::sync::Arc;

/// Create the default set of detectors
pub fn default_detectors(lexicon: Arc<TriggerLexicon>) -> Vec<Arc<dyn Detector>> {
    vec![
        Arc::new(TriggerPhraseDetector::new(lexicon)),
        Arc::new(PunctuationExcessDetector),
        Arc::new(AllCapsDetector),
        Arc::new(GeneralizationDetector),
        Arc::new(RhetoricalQuestionDetector),
        Arc::new(NegativeComparisonDetector),
    ]
}

/// Create a `PatternDetector` with all default detectors
pub fn create_default_engine(lexicon: Arc<TriggerLexicon>) -> PatternDetector {
    PatternDetector::new(default_detectors(lexicon))
}
