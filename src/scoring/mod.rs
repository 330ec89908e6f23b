//! Impact scoring
//!
//! Converts a `SignalSet` into a bounded integer score and a qualitative
//! level, independent of any external model.
//!
//! # Scoring Formula
//!
//! ```text
//! score = 2 × (trigger categories + generalization + rhetorical question + negative comparison)
//!       + 1 if punctuation excess
//!       + 3 if all caps
//!
//! level = high      if score >= 6
//!         moderate  if score >= 3
//!         low       otherwise
//! ```
//!
//! Weights and thresholds come from [`ScoringConfig`] so they can be tuned
//! per deployment and asserted exactly in tests.

mod sentiment;

pub use sentiment::{calm_score, classify_sentiment, POSITIVE_MARKERS};

use crate::config::ScoringConfig;
use crate::models::{ImpactLevel, ImpactScore, Signal, SignalSet};

pub const DEFAULT_CATEGORY_WEIGHT: u32 = 2;
pub const DEFAULT_PUNCTUATION_WEIGHT: u32 = 1;
pub const DEFAULT_ALL_CAPS_WEIGHT: u32 = 3;
pub const DEFAULT_HIGH_THRESHOLD: u32 = 6;
pub const DEFAULT_MODERATE_THRESHOLD: u32 = 3;

/// Pure scorer over detected signals
#[derive(Debug, Clone, Default)]
pub struct ImpactScorer {
    config: ScoringConfig,
}

impl ImpactScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Weight contributed by a single signal
    pub fn weight(&self, signal: Signal) -> u32 {
        match signal {
            Signal::Trigger(_)
            | Signal::Generalization
            | Signal::RhetoricalQuestion
            | Signal::NegativeComparison => self.config.category_weight,
            Signal::PunctuationExcess => self.config.punctuation_weight,
            Signal::AllCaps => self.config.all_caps_weight,
        }
    }

    /// Score a message from its signals. `raw_text` is accepted so callers
    /// pass the same pair they detected on; blank text always scores zero.
    pub fn score(&self, signals: &SignalSet, raw_text: &str) -> ImpactScore {
        if raw_text.trim().is_empty() {
            return ImpactScore::default();
        }
        let score = signals
            .iter()
            .map(|s| self.weight(*s))
            .fold(0u32, u32::saturating_add);
        ImpactScore {
            score,
            level: self.level(score),
        }
    }

    pub fn level(&self, score: u32) -> ImpactLevel {
        if score >= self.config.high_threshold {
            ImpactLevel::High
        } else if score >= self.config.moderate_threshold {
            ImpactLevel::Moderate
        } else {
            ImpactLevel::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TriggerCategory;

    fn set(signals: &[Signal]) -> SignalSet {
        let mut s = SignalSet::new();
        for sig in signals {
            s.insert(*sig);
        }
        s
    }

    #[test]
    fn test_empty_signals_score_zero() {
        let scorer = ImpactScorer::default();
        let impact = scorer.score(&SignalSet::new(), "Bonjour");
        assert_eq!(impact.score, 0);
        assert_eq!(impact.level, ImpactLevel::Low);
    }

    #[test]
    fn test_level_boundaries() {
        let scorer = ImpactScorer::default();
        assert_eq!(scorer.level(6), ImpactLevel::High);
        assert_eq!(scorer.level(5), ImpactLevel::Moderate);
        assert_eq!(scorer.level(3), ImpactLevel::Moderate);
        assert_eq!(scorer.level(2), ImpactLevel::Low);
    }

    #[test]
    fn test_three_categories_is_high() {
        let scorer = ImpactScorer::default();
        let signals = set(&[
            Signal::Trigger(TriggerCategory::Reproach),
            Signal::Trigger(TriggerCategory::Sarcasm),
            Signal::Trigger(TriggerCategory::Accusation),
        ]);
        let impact = scorer.score(&signals, "x");
        assert_eq!(impact.score, 6);
        assert_eq!(impact.level, ImpactLevel::High);
    }

    #[test]
    fn test_two_categories_plus_punctuation_is_moderate() {
        let scorer = ImpactScorer::default();
        let signals = set(&[
            Signal::Trigger(TriggerCategory::Reproach),
            Signal::Trigger(TriggerCategory::Manipulation),
            Signal::PunctuationExcess,
        ]);
        let impact = scorer.score(&signals, "x");
        assert_eq!(impact.score, 5);
        assert_eq!(impact.level, ImpactLevel::Moderate);
    }

    #[test]
    fn test_all_caps_alone_is_moderate() {
        let impact = ImpactScorer::default().score(&set(&[Signal::AllCaps]), "ALLO");
        assert_eq!(impact.score, 3);
        assert_eq!(impact.level, ImpactLevel::Moderate);
    }

    #[test]
    fn test_custom_thresholds() {
        let scorer = ImpactScorer::new(ScoringConfig {
            high_threshold: 10,
            moderate_threshold: 5,
            ..Default::default()
        });
        assert_eq!(scorer.level(6), ImpactLevel::Moderate);
        assert_eq!(scorer.level(4), ImpactLevel::Low);
    }
}
