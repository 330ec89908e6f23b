//! End-to-end properties of the mediation pipeline, through the public API

use leo::ai::{AiError, AiResult, Generator, Prompt, PromptKind, TimeoutGenerator};
use leo::config::{LeoConfig, ScoringConfig, ValidationConfig};
use leo::lexicon::TriggerLexicon;
use leo::models::{ImpactLevel, Notice, RewriteMethod, Signal, SignalSet, TriggerCategory};
use leo::rewrite::{RuleRewriter, Stage};
use leo::scoring::ImpactScorer;
use leo::validate::OptionValidator;
use leo::Mediator;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const REFERENCE: &str = "Tu es encore en retard comme d'habitude, tu ne penses qu'à toi !!";

const SAMPLES: &[&str] = &[
    REFERENCE,
    "Évidemment, c'est ta faute si les enfants vont souffrir !!!",
    "Tu ne comprends rien, tu fais exprès ???",
    "Bien sûr, génial, parfait... c'est ça.",
    "Si tu m'aimais tu ne mentirais pas, tu mens TOUT LE TEMPS",
    "Contrairement à toi, elle au moins elle prévient.",
    "Pourquoi est-ce que tu ne réponds jamais ?",
    "Je récupère Léa samedi à 10h. Merci",
];

#[test]
fn test_rewrite_leaves_no_trigger_and_is_stable() {
    let lexicon = TriggerLexicon::builtin();
    let rewriter = RuleRewriter::new(Arc::clone(&lexicon));
    for text in SAMPLES {
        let once = rewriter.rewrite(text);
        assert!(!lexicon.contains_trigger(&once), "{} -> {}", text, once);
        assert_eq!(
            rewriter.apply_stage(Stage::LexiconSubstitution, &once),
            once,
            "second pass substituted again in {}",
            once
        );
    }
}

#[test]
fn test_every_option_passes_validation() {
    let mediator = Mediator::builtin();
    let validator = OptionValidator::new(TriggerLexicon::builtin(), ValidationConfig::default());
    for text in SAMPLES {
        let result = mediator.rephrase(text, None);
        assert!(result.options.len() <= 3);
        for option in &result.options {
            assert!(
                validator.validate(&option.text, &result.analysis.signals),
                "invalid option {:?}",
                option.text
            );
            assert!(!option.text.contains("!!"));
            assert!(!option.text.contains("???"));
        }
        let confidences: Vec<f64> = result.options.iter().map(|o| o.confidence).collect();
        assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn test_score_thresholds() {
    let scorer = ImpactScorer::new(ScoringConfig::default());

    let mut three_categories = SignalSet::new();
    three_categories.insert(Signal::Trigger(TriggerCategory::Reproach));
    three_categories.insert(Signal::Trigger(TriggerCategory::Sarcasm));
    three_categories.insert(Signal::Trigger(TriggerCategory::Accusation));
    let impact = scorer.score(&three_categories, "x");
    assert_eq!(impact.score, 6);
    assert_eq!(impact.level, ImpactLevel::High);

    assert_eq!(scorer.level(5), ImpactLevel::Moderate);
    assert_eq!(scorer.level(3), ImpactLevel::Moderate);
    assert_eq!(scorer.level(2), ImpactLevel::Low);

    let nothing = scorer.score(&SignalSet::new(), "Bonjour");
    assert_eq!(nothing.score, 0);
    assert_eq!(nothing.level, ImpactLevel::Low);
}

#[test]
fn test_reference_message_end_to_end() {
    let mediator = Mediator::builtin();
    let result = mediator.rephrase(REFERENCE, None);

    assert_eq!(
        result.analysis.signals.categories(),
        vec![TriggerCategory::Reproach, TriggerCategory::Manipulation]
    );
    assert!(result.analysis.signals.contains(Signal::PunctuationExcess));

    let rule = result
        .options
        .iter()
        .find(|o| o.method == RewriteMethod::RuleBased)
        .expect("rule-based option");
    let lower = rule.text.to_lowercase();
    assert!(!lower.contains("encore"));
    assert!(!lower.contains("comme d'habitude"));
    assert!(!lower.contains("tu ne penses qu'à toi"));
    assert!(rule.text.ends_with(". Merci."));
    assert!(result.recommendation.contains("fortement"));
}

#[test]
fn test_empty_input() {
    let mediator = Mediator::builtin();
    let result = mediator.rephrase("", None);
    assert!(result.options.is_empty());
    assert!(result.recommendation.starts_with("Message vide"));
    assert_eq!(result.notices, vec![Notice::EmptyInput]);
}

struct CountingGenerator {
    calls: AtomicUsize,
}

impl Generator for CountingGenerator {
    fn generate(&self, prompt: &Prompt) -> AiResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match prompt.kind {
            PromptKind::Rephrase => Ok(vec!["Peux-tu me prévenir la prochaine fois ?".to_string()]),
            PromptKind::Responses => Err(AiError::Unavailable("quota".to_string())),
        }
    }
}

#[test]
fn test_generator_shared_across_operations() {
    let generator = Arc::new(CountingGenerator {
        calls: AtomicUsize::new(0),
    });
    let mediator = Mediator::builtin().with_generator(Arc::clone(&generator));

    let result = mediator.rephrase(REFERENCE, Some("garde alternée"));
    assert_eq!(result.options[0].method, RewriteMethod::Generated);

    // responses fail over to templates
    let replies = mediator.suggest_responses("Samedi 10h ?", None);
    assert_eq!(replies.len(), 3);
    assert!(replies
        .iter()
        .all(|r| r.method == RewriteMethod::FormalTemplate));

    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
}

struct Sleepy;

impl Generator for Sleepy {
    fn generate(&self, _prompt: &Prompt) -> AiResult<Vec<String>> {
        std::thread::sleep(Duration::from_secs(2));
        Ok(Vec::new())
    }
}

#[test]
fn test_timeout_keeps_rule_based_options() {
    let mediator =
        Mediator::builtin().with_generator(TimeoutGenerator::new(Sleepy, Duration::from_millis(50)));
    let result = mediator.rephrase(REFERENCE, None);
    assert!(!result.options.is_empty());
    assert!(result
        .notices
        .iter()
        .any(|n| matches!(n, Notice::CollaboratorFailure { .. })));
}

#[test]
fn test_scoring_config_is_honored() {
    let mut config = LeoConfig::default();
    config.scoring.all_caps_weight = 6;
    let mediator = Mediator::new(TriggerLexicon::builtin(), &config);
    let analysis = mediator.analyze("JE SERAI LA A DIX HEURES");
    assert_eq!(analysis.impact.score, 6);
    assert_eq!(analysis.impact.level, ImpactLevel::High);
}
