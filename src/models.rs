//! Core data models for Leo
//!
//! These values are produced fresh for every request and handed back to the
//! caller as plain data. Nothing here owns persistent state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Category tag attached to every lexicon phrase
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TriggerCategory {
    Reproach,
    Sarcasm,
    Accusation,
    Manipulation,
}

impl TriggerCategory {
    pub const ALL: [TriggerCategory; 4] = [
        TriggerCategory::Reproach,
        TriggerCategory::Sarcasm,
        TriggerCategory::Accusation,
        TriggerCategory::Manipulation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCategory::Reproach => "reproach",
            TriggerCategory::Sarcasm => "sarcasm",
            TriggerCategory::Accusation => "accusation",
            TriggerCategory::Manipulation => "manipulation",
        }
    }
}

impl fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected tension indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    Trigger(TriggerCategory),
    PunctuationExcess,
    AllCaps,
    Generalization,
    RhetoricalQuestion,
    NegativeComparison,
}

impl Signal {
    /// Stable tag used in JSON output (`trigger:<category>`, `all_caps`, ...)
    pub fn tag(&self) -> String {
        match self {
            Signal::Trigger(category) => format!("trigger:{}", category),
            Signal::PunctuationExcess => "punctuation_excess".to_string(),
            Signal::AllCaps => "all_caps".to_string(),
            Signal::Generalization => "generalization".to_string(),
            Signal::RhetoricalQuestion => "rhetorical_question".to_string(),
            Signal::NegativeComparison => "negative_comparison".to_string(),
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        if let Some(category) = tag.strip_prefix("trigger:") {
            return TriggerCategory::ALL
                .into_iter()
                .find(|c| c.as_str() == category)
                .map(Signal::Trigger);
        }
        match tag {
            "punctuation_excess" => Some(Signal::PunctuationExcess),
            "all_caps" => Some(Signal::AllCaps),
            "generalization" => Some(Signal::Generalization),
            "rhetorical_question" => Some(Signal::RhetoricalQuestion),
            "negative_comparison" => Some(Signal::NegativeComparison),
            _ => None,
        }
    }

    /// Whether this signal comes from the lexicon scan
    pub fn is_trigger(&self) -> bool {
        matches!(self, Signal::Trigger(_))
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl Serialize for Signal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

impl<'de> Deserialize<'de> for Signal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Signal::from_tag(&tag)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown signal tag '{}'", tag)))
    }
}

/// Set of signals detected in one message
///
/// `signals` is deduplicated per category. `matched_phrases` keeps every
/// distinct lexicon phrase that was found, since guidance strength depends
/// on how many separate tension points a message carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub signals: BTreeSet<Signal>,
    #[serde(default)]
    pub matched_phrases: BTreeSet<String>,
}

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, signal: Signal) -> bool {
        self.signals.insert(signal)
    }

    pub fn record_phrase(&mut self, phrase: impl Into<String>) {
        self.matched_phrases.insert(phrase.into());
    }

    pub fn contains(&self, signal: Signal) -> bool {
        self.signals.contains(&signal)
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter()
    }

    /// Trigger categories present, in category order
    pub fn categories(&self) -> Vec<TriggerCategory> {
        self.signals
            .iter()
            .filter_map(|s| match s {
                Signal::Trigger(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Number of separate tension points: each matched phrase plus each
    /// structural (non-lexicon) signal.
    pub fn tension_count(&self) -> usize {
        let structural = self.signals.iter().filter(|s| !s.is_trigger()).count();
        self.matched_phrases.len() + structural
    }

    pub fn tags(&self) -> Vec<String> {
        self.signals.iter().map(Signal::tag).collect()
    }

    /// Merge another set into this one
    pub fn extend(&mut self, other: SignalSet) {
        self.signals.extend(other.signals);
        self.matched_phrases.extend(other.matched_phrases);
    }
}

/// Qualitative level of potential emotional impact
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "low"),
            ImpactLevel::Moderate => write!(f, "moderate"),
            ImpactLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImpactScore {
    pub score: u32,
    pub level: ImpactLevel,
}

/// How a rewrite option was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteMethod {
    RuleBased,
    FormalTemplate,
    Generated,
}

impl fmt::Display for RewriteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteMethod::RuleBased => write!(f, "rule_based"),
            RewriteMethod::FormalTemplate => write!(f, "formal_template"),
            RewriteMethod::Generated => write!(f, "generated"),
        }
    }
}

/// A proposed alternative phrasing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteOption {
    pub text: String,
    pub method: RewriteMethod,
    /// Confidence from 0.0 to 1.0
    pub confidence: f64,
    pub description: String,
}

impl RewriteOption {
    pub fn new(
        text: impl Into<String>,
        method: RewriteMethod,
        confidence: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            method,
            confidence: confidence.clamp(0.0, 1.0),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Hostile,
    #[default]
    Neutral,
    Positive,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Hostile => write!(f, "hostile"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Positive => write!(f, "positive"),
        }
    }
}

/// Read-only summary of one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Calm score from 0.0 (very tense) to 1.0 (warm); 0.5 is neutral
    pub score: f64,
    pub signals: SignalSet,
    pub impact: ImpactScore,
    pub recommendation: String,
}

/// Degradations that happened while serving a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    EmptyInput,
    CollaboratorFailure { message: String },
    ValidationRejection { rejected: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RephraseResult {
    pub original: String,
    pub options: Vec<RewriteOption>,
    pub analysis: AnalysisResult,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

/// How a recipient is likely to perceive a message (values sum to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perception {
    pub aggressive: f64,
    pub vague: f64,
    pub informative: f64,
    pub reassuring: f64,
}

impl Default for Perception {
    fn default() -> Self {
        Self {
            aggressive: 0.1,
            vague: 0.2,
            informative: 0.4,
            reassuring: 0.3,
        }
    }
}

/// Preview of a message's emotional impact, without rewriting it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorReport {
    pub impact_score: u32,
    pub impact_level: ImpactLevel,
    pub signals: SignalSet,
    pub recommendation: String,
    pub suggested_changes: Vec<String>,
    pub perception: Perception,
    pub mirror_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_tags_roundtrip() {
        let signals = [
            Signal::Trigger(TriggerCategory::Sarcasm),
            Signal::PunctuationExcess,
            Signal::AllCaps,
            Signal::Generalization,
            Signal::RhetoricalQuestion,
            Signal::NegativeComparison,
        ];
        for signal in signals {
            assert_eq!(Signal::from_tag(&signal.tag()), Some(signal));
        }
        assert_eq!(Signal::from_tag("trigger:anger"), None);
    }

    #[test]
    fn test_signal_set_serializes_as_tags() {
        let mut set = SignalSet::new();
        set.insert(Signal::Trigger(TriggerCategory::Reproach));
        set.insert(Signal::AllCaps);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["signals"][0], "trigger:reproach");
        assert_eq!(json["signals"][1], "all_caps");
    }

    #[test]
    fn test_tension_count_counts_phrases_not_categories() {
        let mut set = SignalSet::new();
        set.insert(Signal::Trigger(TriggerCategory::Reproach));
        set.record_phrase("encore");
        set.record_phrase("comme d'habitude");
        set.insert(Signal::PunctuationExcess);
        assert_eq!(set.len(), 2);
        assert_eq!(set.tension_count(), 3);
    }

    #[test]
    fn test_rewrite_option_clamps_confidence() {
        let opt = RewriteOption::new("Bonjour.", RewriteMethod::Generated, 1.7, "x");
        assert_eq!(opt.confidence, 1.0);
    }
}
