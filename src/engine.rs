//! Mediation engine
//!
//! `Mediator` wires the pure components together and exposes the four
//! operations callers use. It holds only read-only state, so one instance can
//! serve any number of threads at once.
//!
//! ```text
//! text ─▶ PatternDetector ─▶ ImpactScorer ─────────────────▶ analyze / mirror
//!            │
//!            ├─▶ RuleRewriter ─┐
//!            ├─▶ TemplateComposer ─┼─▶ OptionValidator ─▶ RecommendationEngine ─▶ rephrase
//!            └─▶ Generator (optional) ┘
//! ```

use crate::ai::{AiClient, Generator, LlmGenerator, Prompt, TimeoutGenerator};
use crate::config::LeoConfig;
use crate::detectors::{create_default_engine, MessageText, PatternDetector};
use crate::lexicon::TriggerLexicon;
use crate::models::{
    AnalysisResult, MirrorReport, Notice, RephraseResult, RewriteMethod, RewriteOption,
    Sentiment, SignalSet,
};
use crate::recommend::{RecommendationEngine, MIRROR_PROMPT};
use crate::rewrite::{RuleRewriter, StageTrace};
use crate::scoring::{calm_score, classify_sentiment, ImpactScorer};
use crate::templates::TemplateComposer;
use crate::validate::{OptionValidator, TEMPLATE_CONFIDENCE};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Neutral calm score reported for empty input
const NEUTRAL_CALM_SCORE: f64 = 0.5;

pub struct Mediator {
    lexicon: Arc<TriggerLexicon>,
    detector: PatternDetector,
    scorer: ImpactScorer,
    rewriter: RuleRewriter,
    templates: TemplateComposer,
    validator: OptionValidator,
    recommender: RecommendationEngine,
    generator: Option<Arc<dyn Generator>>,
    generated_confidence: f64,
}

impl Mediator {
    /// Rule-based mediator over `lexicon`, tuned by `config`. The `[ai]`
    /// section is ignored here; see [`Mediator::from_config`].
    pub fn new(lexicon: Arc<TriggerLexicon>, config: &LeoConfig) -> Self {
        Self {
            detector: create_default_engine(Arc::clone(&lexicon)),
            scorer: ImpactScorer::new(config.scoring.clone()),
            rewriter: RuleRewriter::new(Arc::clone(&lexicon)),
            templates: TemplateComposer::new(),
            validator: OptionValidator::new(Arc::clone(&lexicon), config.validation.clone()),
            recommender: RecommendationEngine::new(),
            generator: None,
            generated_confidence: config.ai.generated_confidence,
            lexicon,
        }
    }

    /// Built-in lexicon and default settings
    pub fn builtin() -> Self {
        Self::new(TriggerLexicon::builtin(), &LeoConfig::default())
    }

    /// Build everything a config describes: custom lexicon, and the LLM
    /// generator when `[ai] enabled = true`.
    ///
    /// A generator that cannot be built (unknown backend, missing key) is
    /// reported and left out; the mediator still works rule-based.
    pub fn from_config(config: &LeoConfig) -> Result<Self> {
        let lexicon = match &config.lexicon.path {
            Some(path) => Arc::new(
                TriggerLexicon::load(path)
                    .with_context(|| format!("Failed to load lexicon {}", path.display()))?,
            ),
            None => TriggerLexicon::builtin(),
        };
        info!("Lexicon ready with {} phrases", lexicon.len());

        let mediator = Self::new(lexicon, config);
        if !config.ai.enabled {
            return Ok(mediator);
        }

        match AiClient::from_settings(&config.ai) {
            Ok(client) => {
                info!("Generator enabled ({:?}, {})", client.backend(), client.model());
                let timeout = Duration::from_secs(config.ai.timeout_secs);
                Ok(mediator.with_generator(TimeoutGenerator::new(LlmGenerator::new(client), timeout)))
            }
            Err(e) => {
                warn!("Generator disabled: {}", e);
                Ok(mediator)
            }
        }
    }

    pub fn with_generator(mut self, generator: impl Generator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn lexicon(&self) -> &TriggerLexicon {
        &self.lexicon
    }

    /// Signals only, for callers that need the raw detection
    pub fn detect(&self, text: &str) -> SignalSet {
        self.detector.detect(text)
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let message = MessageText::new(text);
        if message.is_blank() {
            return AnalysisResult {
                sentiment: Sentiment::Neutral,
                score: NEUTRAL_CALM_SCORE,
                recommendation: self.recommender.empty_message().to_string(),
                ..Default::default()
            };
        }

        let signals = self.detector.detect(text);
        let impact = self.scorer.score(&signals, text);
        let sentiment = classify_sentiment(&signals, &impact, &message.folded);
        let recommendation = self
            .recommender
            .analysis_guidance(sentiment, &signals)
            .to_string();

        AnalysisResult {
            sentiment,
            score: calm_score(&impact, &message.folded),
            signals,
            impact,
            recommendation,
        }
    }

    pub fn rephrase(&self, text: &str, context: Option<&str>) -> RephraseResult {
        let analysis = self.analyze(text);
        if text.trim().is_empty() {
            return RephraseResult {
                original: text.to_string(),
                options: Vec::new(),
                recommendation: self.recommender.empty_message().to_string(),
                analysis,
                notices: vec![Notice::EmptyInput],
            };
        }

        let rule_based = self.rewriter.rewrite(text);
        let template = self.templates.compose(text);

        let mut notices = Vec::new();
        let generated = self.collaborate(&Prompt::rephrase(text, &analysis, context), &mut notices);

        let assembled = self.validator.combine(
            text,
            &rule_based,
            &template,
            &generated,
            self.generated_confidence,
        );
        if assembled.rejected > 0 {
            notices.push(Notice::ValidationRejection {
                rejected: assembled.rejected,
            });
        }

        let recommendation = self
            .recommender
            .recommend(&analysis.signals, &assembled.options)
            .to_string();
        debug!(
            "rephrase: {} signal(s), {} option(s), {} rejected",
            analysis.signals.len(),
            assembled.options.len(),
            assembled.rejected
        );

        RephraseResult {
            original: text.to_string(),
            options: assembled.options,
            analysis,
            recommendation,
            notices,
        }
    }

    /// Preview the emotional impact of `text` without rewriting it
    pub fn mirror(&self, text: &str) -> MirrorReport {
        let message = MessageText::new(text);
        let signals = self.detector.detect(text);
        let impact = self.scorer.score(&signals, text);
        let sentiment = classify_sentiment(&signals, &impact, &message.folded);

        MirrorReport {
            impact_score: impact.score,
            impact_level: impact.level,
            recommendation: self.recommender.mirror_guidance(impact.level).to_string(),
            suggested_changes: self.recommender.suggested_changes(impact.score),
            perception: self.recommender.perception(sentiment, &signals),
            mirror_prompt: MIRROR_PROMPT.to_string(),
            signals,
        }
    }

    /// Reply suggestions for a received message. Empty input gets none.
    pub fn suggest_responses(&self, received: &str, context: Option<&str>) -> Vec<RewriteOption> {
        if received.trim().is_empty() {
            return Vec::new();
        }

        let mut notices = Vec::new();
        let generated = self.collaborate(&Prompt::responses(received, context), &mut notices);

        let mut options: Vec<RewriteOption> = generated
            .into_iter()
            .map(|text| {
                RewriteOption::new(
                    text.trim(),
                    RewriteMethod::Generated,
                    self.generated_confidence,
                    "Réponse générée",
                )
            })
            .chain(self.templates.responses(received).into_iter().map(|text| {
                RewriteOption::new(
                    text,
                    RewriteMethod::FormalTemplate,
                    TEMPLATE_CONFIDENCE,
                    "Réponse centrée sur l'enfant",
                )
            }))
            .filter(|o| match self.validator.check(&o.text) {
                Ok(()) => true,
                Err(reason) => {
                    debug!("Dropping reply candidate: {}", reason);
                    false
                }
            })
            .collect();

        options.dedup_by(|a, b| a.text == b.text);
        options.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        options.truncate(self.validator.config().max_options);
        options
    }

    /// Intermediate output of every rewrite stage
    pub fn explain(&self, text: &str) -> Vec<StageTrace> {
        self.rewriter.trace(text)
    }

    /// Ask the generator, if any. Failures become notices and zero candidates.
    fn collaborate(&self, prompt: &Prompt, notices: &mut Vec<Notice>) -> Vec<String> {
        let Some(generator) = &self.generator else {
            return Vec::new();
        };
        match generator.generate(prompt) {
            Ok(candidates) => {
                debug!("{} proposed {} candidate(s)", generator.name(), candidates.len());
                candidates
            }
            Err(e) => {
                warn!("Generator failed, continuing rule-based: {}", e);
                notices.push(Notice::CollaboratorFailure {
                    message: e.to_string(),
                });
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiError, AiResult};
    use crate::models::{ImpactLevel, Signal, TriggerCategory};
    use crate::recommend::{EMPTY_MESSAGE, STRONG};

    const REFERENCE: &str = "Tu es encore en retard comme d'habitude, tu ne penses qu'à toi !!";

    struct Stub(Vec<&'static str>);

    impl Generator for Stub {
        fn generate(&self, _prompt: &Prompt) -> AiResult<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    struct Failing;

    impl Generator for Failing {
        fn generate(&self, _prompt: &Prompt) -> AiResult<Vec<String>> {
            Err(AiError::ApiError {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    struct Slow;

    impl Generator for Slow {
        fn generate(&self, _prompt: &Prompt) -> AiResult<Vec<String>> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(vec!["Je serai là à 18h.".to_string()])
        }
    }

    #[test]
    fn test_mediator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mediator>();
    }

    #[test]
    fn test_reference_rephrase() {
        let m = Mediator::builtin();
        let result = m.rephrase(REFERENCE, None);

        assert_eq!(
            result.analysis.signals.categories(),
            vec![TriggerCategory::Reproach, TriggerCategory::Manipulation]
        );
        assert!(result.analysis.signals.contains(Signal::PunctuationExcess));
        assert_eq!(result.analysis.sentiment, Sentiment::Hostile);
        assert_eq!(result.recommendation, STRONG);

        let rule = &result.options[0];
        assert_eq!(rule.method, RewriteMethod::RuleBased);
        assert_eq!(rule.confidence, 0.8);
        assert!(rule.text.ends_with(". Merci."));
        assert!(!m.lexicon().contains_trigger(&rule.text));
        assert_eq!(result.options[1].method, RewriteMethod::FormalTemplate);
        assert!(result.notices.is_empty());
    }

    #[test]
    fn test_empty_rephrase() {
        let m = Mediator::builtin();
        let result = m.rephrase("   ", None);
        assert!(result.options.is_empty());
        assert_eq!(result.recommendation, EMPTY_MESSAGE);
        assert_eq!(result.notices, vec![Notice::EmptyInput]);
    }

    #[test]
    fn test_all_caps_without_triggers() {
        let m = Mediator::builtin();
        let analysis = m.analyze("JE SERAI LA A DIX HEURES");
        assert!(analysis.signals.contains(Signal::AllCaps));
        assert!(analysis.impact.score >= 3);
        assert!(analysis.impact.level >= ImpactLevel::Moderate);
    }

    #[test]
    fn test_calm_message() {
        let m = Mediator::builtin();
        let analysis = m.analyze("Je récupère Léa samedi à 10h.");
        assert!(analysis.signals.is_empty());
        assert_eq!(analysis.impact.score, 0);
        assert_eq!(analysis.impact.level, ImpactLevel::Low);
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_generated_candidates_rank_first() {
        let m = Mediator::builtin().with_generator(Stub(vec![
            "Peux-tu me prévenir en cas de retard ?",
            "Encore ce retard !!",
        ]));
        let result = m.rephrase(REFERENCE, None);
        assert_eq!(result.options.len(), 3);
        assert_eq!(result.options[0].method, RewriteMethod::Generated);
        assert_eq!(result.options[0].confidence, 0.9);
        assert_eq!(
            result.notices,
            vec![Notice::ValidationRejection { rejected: 1 }]
        );
    }

    #[test]
    fn test_generated_question_run_is_dropped() {
        let m = Mediator::builtin().with_generator(Stub(vec!["Tu viens quand ??"]));
        let result = m.rephrase("Tu es encore en retard !!", None);
        assert!(result.options.iter().all(|o| !o.text.contains("??")));
        assert!(result
            .options
            .iter()
            .all(|o| o.method != RewriteMethod::Generated));
        assert_eq!(
            result.notices,
            vec![Notice::ValidationRejection { rejected: 1 }]
        );
    }

    #[test]
    fn test_failing_generator_degrades() {
        let m = Mediator::builtin().with_generator(Failing);
        let result = m.rephrase(REFERENCE, None);
        assert!(!result.options.is_empty());
        assert!(result
            .options
            .iter()
            .all(|o| o.method != RewriteMethod::Generated));
        assert!(matches!(
            result.notices.as_slice(),
            [Notice::CollaboratorFailure { .. }]
        ));
    }

    #[test]
    fn test_slow_generator_times_out() {
        let m = Mediator::builtin()
            .with_generator(TimeoutGenerator::new(Slow, Duration::from_millis(20)));
        let result = m.rephrase(REFERENCE, None);
        assert_eq!(result.options[0].method, RewriteMethod::RuleBased);
        assert!(matches!(
            &result.notices[0],
            Notice::CollaboratorFailure { message } if message.contains("within")
        ));
    }

    #[test]
    fn test_mirror_reference() {
        let m = Mediator::builtin();
        let report = m.mirror(REFERENCE);
        // two categories + punctuation excess
        assert_eq!(report.impact_score, 5);
        assert_eq!(report.impact_level, ImpactLevel::Moderate);
        assert_eq!(report.suggested_changes.len(), 4);
        assert_eq!(report.mirror_prompt, MIRROR_PROMPT);
        assert_eq!(report.perception.aggressive, 0.6);
    }

    #[test]
    fn test_mirror_empty() {
        let report = Mediator::builtin().mirror("");
        assert_eq!(report.impact_score, 0);
        assert_eq!(report.impact_level, ImpactLevel::Low);
        assert!(report.suggested_changes.is_empty());
    }

    #[test]
    fn test_suggest_responses() {
        let m = Mediator::builtin();
        let replies = m.suggest_responses("C'est urgent, rappelle-moi", None);
        assert_eq!(replies.len(), 3);
        assert!(replies
            .iter()
            .all(|r| r.method == RewriteMethod::FormalTemplate));
        assert!(replies[0].text.contains("urgent"));
        assert!(m.suggest_responses("", None).is_empty());
    }

    #[test]
    fn test_suggest_responses_with_generator() {
        let m = Mediator::builtin().with_generator(Stub(vec!["D'accord pour samedi, à 10h."]));
        let replies = m.suggest_responses("Samedi 10h ?", Some("garde alternée"));
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0].method, RewriteMethod::Generated);
        assert_eq!(replies[1].method, RewriteMethod::FormalTemplate);
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let m = Arc::new(Mediator::builtin());
        let expected = m.rephrase(REFERENCE, None);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let m = Arc::clone(&m);
                std::thread::spawn(move || m.rephrase(REFERENCE, None))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_from_config_with_missing_key_stays_rule_based() {
        let mut config = LeoConfig::default();
        config.ai.enabled = true;
        config.ai.backend = Some("deepinfra".to_string());
        // DEEPINFRA_API_KEY is not part of the test environment
        if std::env::var("DEEPINFRA_API_KEY").is_err() {
            let m = Mediator::from_config(&config).unwrap();
            assert!(!m.has_generator());
        }
    }

    #[test]
    fn test_from_config_custom_lexicon() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.toml");
        std::fs::write(
            &path,
            "[[entry]]\nphrase = \"n'importe quoi\"\nreplacement = \"une idée à revoir\"\ncategory = \"accusation\"\n",
        )
        .unwrap();
        let mut config = LeoConfig::default();
        config.lexicon.path = Some(path);
        let m = Mediator::from_config(&config).unwrap();
        assert_eq!(m.lexicon().len(), 1);
        let analysis = m.analyze("C'est n'importe quoi");
        assert_eq!(
            analysis.signals.categories(),
            vec![TriggerCategory::Accusation]
        );
        // "encore" is not in this lexicon
        assert!(m.analyze("encore").signals.categories().is_empty());
    }
}
