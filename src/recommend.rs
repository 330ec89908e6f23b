//! User-facing guidance
//!
//! Pure mappings from detection state to French guidance strings. The
//! thresholds here are part of the contract and are tested at their
//! boundaries.

use crate::models::{ImpactLevel, Perception, RewriteOption, Sentiment, SignalSet};

/// Above this many tension points, rewriting is strongly recommended
pub const STRONG_RECOMMENDATION_THRESHOLD: usize = 3;

/// Impact scores above this get a list of suggested changes
pub const SUGGESTED_CHANGES_THRESHOLD: u32 = 2;

pub const MIRROR_PROMPT: &str = "Et si on te l'envoyait, tu le vivrais comment ?";

pub const ALREADY_APPROPRIATE: &str = "Votre message est déjà approprié pour la communication.";
pub const STRONG: &str = "Votre message contient plusieurs éléments de tension. Nous recommandons fortement d'utiliser une des reformulations proposées.";
pub const SOFT: &str = "Votre message pourrait être mal interprété. Une reformulation pourrait améliorer la communication.";
pub const OPTIONAL: &str = "Votre message est assez neutre. Les reformulations sont optionnelles.";
pub const EMPTY_MESSAGE: &str = "Message vide : rien à reformuler.";

const SUGGESTED_CHANGES: [&str; 4] = [
    "Utiliser un ton plus neutre",
    "Éviter les accusations directes",
    "Centrer sur l'intérêt de l'enfant",
    "Ajouter une formule de politesse",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Guidance attached to a rephrase result
    pub fn recommend(&self, signals: &SignalSet, options: &[RewriteOption]) -> &'static str {
        if options.is_empty() {
            return ALREADY_APPROPRIATE;
        }
        match signals.tension_count() {
            n if n > STRONG_RECOMMENDATION_THRESHOLD => STRONG,
            0 => OPTIONAL,
            _ => SOFT,
        }
    }

    pub fn empty_message(&self) -> &'static str {
        EMPTY_MESSAGE
    }

    pub fn mirror_guidance(&self, level: ImpactLevel) -> &'static str {
        match level {
            ImpactLevel::High => {
                "Ce message risque de créer des tensions. Une reformulation est fortement recommandée."
            }
            ImpactLevel::Moderate => {
                "Ce message pourrait être mal perçu. Considérez une reformulation."
            }
            ImpactLevel::Low => "Ce message semble approprié pour la communication.",
        }
    }

    /// Question-style advice for `analyze`
    pub fn analysis_guidance(&self, sentiment: Sentiment, signals: &SignalSet) -> &'static str {
        if sentiment == Sentiment::Hostile || !signals.is_empty() {
            "Ce message contient des signaux de tension. Voulez-vous l'adoucir ?"
        } else if sentiment == Sentiment::Positive {
            "Message positif, bon pour la communication."
        } else {
            "Message neutre, prêt à être envoyé."
        }
    }

    pub fn suggested_changes(&self, impact_score: u32) -> Vec<String> {
        if impact_score > SUGGESTED_CHANGES_THRESHOLD {
            SUGGESTED_CHANGES.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        }
    }

    /// Likely perception of a message by its recipient
    pub fn perception(&self, sentiment: Sentiment, signals: &SignalSet) -> Perception {
        if sentiment == Sentiment::Hostile {
            Perception {
                aggressive: 0.6,
                vague: 0.1,
                informative: 0.2,
                reassuring: 0.1,
            }
        } else if !signals.is_empty() {
            Perception {
                aggressive: 0.4,
                vague: 0.4,
                informative: 0.2,
                reassuring: 0.0,
            }
        } else {
            Perception::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RewriteMethod, Signal, TriggerCategory};

    fn option() -> RewriteOption {
        RewriteOption::new("Bonjour. Merci.", RewriteMethod::RuleBased, 0.8, "x")
    }

    fn signals_with_tension(n: usize) -> SignalSet {
        let mut set = SignalSet::new();
        set.insert(Signal::Trigger(TriggerCategory::Reproach));
        for i in 0..n {
            set.record_phrase(format!("phrase {}", i));
        }
        set
    }

    #[test]
    fn test_no_options_means_appropriate() {
        let r = RecommendationEngine::new();
        assert_eq!(r.recommend(&signals_with_tension(5), &[]), ALREADY_APPROPRIATE);
    }

    #[test]
    fn test_strength_boundary() {
        let r = RecommendationEngine::new();
        let opts = [option()];
        assert_eq!(r.recommend(&signals_with_tension(3), &opts), SOFT);
        assert_eq!(r.recommend(&signals_with_tension(4), &opts), STRONG);
        assert_eq!(r.recommend(&signals_with_tension(1), &opts), SOFT);
        assert_eq!(r.recommend(&SignalSet::new(), &opts), OPTIONAL);
    }

    #[test]
    fn test_mirror_guidance_by_level() {
        let r = RecommendationEngine::new();
        assert!(r.mirror_guidance(ImpactLevel::High).contains("fortement"));
        assert!(r.mirror_guidance(ImpactLevel::Moderate).contains("Considérez"));
        assert!(r.mirror_guidance(ImpactLevel::Low).contains("approprié"));
    }

    #[test]
    fn test_suggested_changes_threshold() {
        let r = RecommendationEngine::new();
        assert!(r.suggested_changes(2).is_empty());
        assert_eq!(r.suggested_changes(3).len(), 4);
    }

    #[test]
    fn test_perception_sums_to_one() {
        let r = RecommendationEngine::new();
        let mut caps = SignalSet::new();
        caps.insert(Signal::AllCaps);
        for p in [
            r.perception(Sentiment::Hostile, &caps),
            r.perception(Sentiment::Neutral, &caps),
            r.perception(Sentiment::Neutral, &SignalSet::new()),
        ] {
            let total = p.aggressive + p.vague + p.informative + p.reassuring;
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_analysis_guidance() {
        let r = RecommendationEngine::new();
        let empty = SignalSet::new();
        assert!(r
            .analysis_guidance(Sentiment::Hostile, &empty)
            .contains("adoucir"));
        assert!(r
            .analysis_guidance(Sentiment::Positive, &empty)
            .starts_with("Message positif"));
        assert!(r
            .analysis_guidance(Sentiment::Neutral, &empty)
            .starts_with("Message neutre"));
    }
}
