//! Option validation and assembly
//!
//! Every candidate rewrite, whatever produced it, goes through the same
//! predicate before it can reach the caller.

use crate::config::ValidationConfig;
use crate::lexicon::TriggerLexicon;
use crate::models::{RewriteMethod, RewriteOption, SignalSet};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::debug;

pub const RULE_BASED_CONFIDENCE: f64 = 0.8;
pub const TEMPLATE_CONFIDENCE: f64 = 0.7;

/// Why a candidate was dropped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("candidate is shorter than {min} characters")]
    TooShort { min: usize },

    #[error("candidate is longer than {max} characters")]
    TooLong { max: usize },

    #[error("candidate still contains trigger phrase '{0}'")]
    ResidualTrigger(String),

    #[error("candidate contains a run of '!' or '?'")]
    PunctuationRun,
}

/// Options that survived validation, plus how many candidates were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembled {
    pub options: Vec<RewriteOption>,
    pub rejected: usize,
}

pub struct OptionValidator {
    lexicon: Arc<TriggerLexicon>,
    config: ValidationConfig,
}

static PUNCTUATION_RUN: OnceLock<Regex> = OnceLock::new();

fn punctuation_run() -> &'static Regex {
    PUNCTUATION_RUN.get_or_init(|| Regex::new(r"!{2,}|\?{2,}").unwrap())
}

impl OptionValidator {
    pub fn new(lexicon: Arc<TriggerLexicon>, config: ValidationConfig) -> Self {
        Self { lexicon, config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn check(&self, candidate: &str) -> Result<(), Rejection> {
        let len = candidate.trim().chars().count();
        if len < self.config.min_length {
            return Err(Rejection::TooShort {
                min: self.config.min_length,
            });
        }
        if len > self.config.max_length {
            return Err(Rejection::TooLong {
                max: self.config.max_length,
            });
        }
        if let Some(entry) = self.lexicon.first_match(candidate) {
            return Err(Rejection::ResidualTrigger(entry.phrase.clone()));
        }
        if punctuation_run().is_match(candidate) {
            return Err(Rejection::PunctuationRun);
        }
        Ok(())
    }

    /// Pure predicate. `original_signals` is accepted so callers can pass
    /// the detection context along, but the checks only look at the candidate.
    pub fn validate(&self, candidate: &str, _original_signals: &SignalSet) -> bool {
        self.check(candidate).is_ok()
    }

    /// Assemble the final ranked option list.
    ///
    /// Rule-based output comes first when it changed something, then the
    /// template when it differs from the rule-based text, then generated
    /// candidates. Ties in confidence keep that order.
    pub fn combine(
        &self,
        original: &str,
        rule_based: &str,
        template: &str,
        generated: &[String],
        generated_confidence: f64,
    ) -> Assembled {
        let mut candidates = Vec::with_capacity(2 + generated.len());
        if rule_based.trim() != original.trim() {
            candidates.push(RewriteOption::new(
                rule_based,
                RewriteMethod::RuleBased,
                RULE_BASED_CONFIDENCE,
                "Reformulation par règles",
            ));
        }
        if template.trim() != rule_based.trim() {
            candidates.push(RewriteOption::new(
                template,
                RewriteMethod::FormalTemplate,
                TEMPLATE_CONFIDENCE,
                "Version formelle",
            ));
        }
        for text in generated {
            candidates.push(RewriteOption::new(
                text.trim(),
                RewriteMethod::Generated,
                generated_confidence,
                "Reformulation générée",
            ));
        }

        let mut assembled = Assembled::default();
        for candidate in candidates {
            if let Err(reason) = self.check(&candidate.text) {
                debug!("Dropping {} candidate: {}", candidate.method, reason);
                assembled.rejected += 1;
                continue;
            }
            if assembled.options.iter().any(|o| o.text == candidate.text) {
                continue;
            }
            assembled.options.push(candidate);
        }

        // sort_by is stable, so equal confidences keep insertion order
        assembled
            .options
            .sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        assembled.options.truncate(self.config.max_options);
        assembled
    }
}
