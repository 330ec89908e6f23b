//! Rule-based sentiment classification
//!
//! No model inference: the sentiment is derived from the detected signals,
//! the impact score and a small set of warm markers.

use crate::models::{ImpactLevel, ImpactScore, Sentiment, SignalSet};

/// Words that make an otherwise neutral message read as warm
pub const POSITIVE_MARKERS: &[&str] = &[
    "merci",
    "d'accord",
    "avec plaisir",
    "bonne journée",
    "bonne soirée",
    "bravo",
    "super",
    "content",
    "contente",
];

pub fn classify_sentiment(signals: &SignalSet, impact: &ImpactScore, folded: &str) -> Sentiment {
    if !signals.categories().is_empty() || impact.level >= ImpactLevel::Moderate {
        return Sentiment::Hostile;
    }
    if signals.is_empty() && POSITIVE_MARKERS.iter().any(|m| folded.contains(m)) {
        return Sentiment::Positive;
    }
    Sentiment::Neutral
}

/// Calm score in [0, 1]: 0.5 is neutral, each impact point costs 0.05 and
/// each warm marker adds 0.1.
pub fn calm_score(impact: &ImpactScore, folded: &str) -> f64 {
    let warmth = POSITIVE_MARKERS
        .iter()
        .filter(|m| folded.contains(*m))
        .count() as f64;
    (0.5 - 0.05 * impact.score as f64 + 0.1 * warmth).clamp(0.0, 1.0)
}
