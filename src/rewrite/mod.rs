//! Rule-based rewriter
//!
//! Applies an explicit, ordered pipeline of named stages. Each stage sees the
//! output of the one before it:
//!
//! ```text
//! input ─▶ LexiconSubstitution ─▶ GrammaticalSoftening ─▶ GeneralizationSoftening
//!       ─▶ PunctuationNormalization ─▶ WhitespaceNormalization ─▶ PolitenessClosure
//! ```
//!
//! The rewriter never fails. Input whitespace is collapsed first so that a
//! line break cannot hide a trigger phrase, and a final sweep guarantees the
//! output carries no lexicon phrase.

mod rules;

pub use rules::{generalization_rules, grammar_rules, SofteningRule};

use crate::lexicon::{fold, TriggerLexicon};
use std::sync::Arc;
use tracing::debug;

/// Substitution passes before giving up on a phrase that keeps reappearing
const MAX_SUBSTITUTION_PASSES: usize = 4;

/// Courtesy markers; a message containing one gets no closing phrase
pub const COURTESY_MARKERS: &[&str] = &["merci", "cordialement", "s'il te plaît", "s'il vous plaît"];

/// Closing phrase appended by the politeness stage
pub const COURTESY_CLOSER: &str = "Merci.";

/// One named transformation of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    LexiconSubstitution,
    GrammaticalSoftening,
    GeneralizationSoftening,
    PunctuationNormalization,
    WhitespaceNormalization,
    PolitenessClosure,
    /// Runs after the pipeline, only when a later stage formed a lexicon phrase
    ResidualSweep,
}

impl Stage {
    /// The fixed pipeline order
    pub const PIPELINE: [Stage; 6] = [
        Stage::LexiconSubstitution,
        Stage::GrammaticalSoftening,
        Stage::GeneralizationSoftening,
        Stage::PunctuationNormalization,
        Stage::WhitespaceNormalization,
        Stage::PolitenessClosure,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::LexiconSubstitution => "lexicon-substitution",
            Stage::GrammaticalSoftening => "grammatical-softening",
            Stage::GeneralizationSoftening => "generalization-softening",
            Stage::PunctuationNormalization => "punctuation-normalization",
            Stage::WhitespaceNormalization => "whitespace-normalization",
            Stage::PolitenessClosure => "politeness-closure",
            Stage::ResidualSweep => "residual-sweep",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of one stage, for `--explain` style tracing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTrace {
    pub stage: Stage,
    pub output: String,
}

pub struct RuleRewriter {
    lexicon: Arc<TriggerLexicon>,
}

impl RuleRewriter {
    pub fn new(lexicon: Arc<TriggerLexicon>) -> Self {
        Self { lexicon }
    }

    /// Rewrite `text` through the whole pipeline
    pub fn rewrite(&self, text: &str) -> String {
        let out = Stage::PIPELINE
            .iter()
            .fold(normalize_whitespace(text), |acc, stage| {
                self.apply_stage(*stage, &acc)
            });
        self.sweep_residual_triggers(&out)
    }

    /// Rewrite and keep every intermediate result. The last step's output
    /// is always what `rewrite` returns.
    pub fn trace(&self, text: &str) -> Vec<StageTrace> {
        let mut current = normalize_whitespace(text);
        let mut steps = Vec::with_capacity(Stage::PIPELINE.len() + 1);
        for stage in Stage::PIPELINE {
            current = self.apply_stage(stage, &current);
            steps.push(StageTrace {
                stage,
                output: current.clone(),
            });
        }
        let swept = self.sweep_residual_triggers(&current);
        if swept != current {
            steps.push(StageTrace {
                stage: Stage::ResidualSweep,
                output: swept,
            });
        }
        steps
    }

    /// Apply a single stage in isolation
    pub fn apply_stage(&self, stage: Stage, text: &str) -> String {
        match stage {
            Stage::LexiconSubstitution => self.substitute_until_clean(text),
            Stage::GrammaticalSoftening => grammar_rules()
                .iter()
                .fold(text.to_string(), |acc, rule| rule.apply(&acc)),
            Stage::GeneralizationSoftening => generalization_rules()
                .iter()
                .fold(text.to_string(), |acc, rule| rule.apply(&acc)),
            Stage::PunctuationNormalization => normalize_punctuation(text),
            Stage::WhitespaceNormalization => normalize_whitespace(text),
            Stage::PolitenessClosure => close_politely(text),
            Stage::ResidualSweep => self.sweep_residual_triggers(text),
        }
    }

    fn substitute_until_clean(&self, text: &str) -> String {
        let mut out = text.to_string();
        for _ in 0..MAX_SUBSTITUTION_PASSES {
            if !self.lexicon.contains_trigger(&out) {
                break;
            }
            out = self.lexicon.substitute(&out);
        }
        out
    }

    /// A later stage can join words into a phrase; substitute once more if so
    fn sweep_residual_triggers(&self, text: &str) -> String {
        match self.lexicon.first_match(text) {
            Some(entry) => {
                debug!("residual trigger '{}' after pipeline, sweeping", entry.phrase);
                normalize_whitespace(&self.substitute_until_clean(text))
            }
            None => text.to_string(),
        }
    }
}

fn normalize_punctuation(text: &str) -> String {
    let text = rules::exclamation_run().replace_all(text, ".");
    rules::question_run().replace_all(&text, "?").into_owned()
}

fn normalize_whitespace(text: &str) -> String {
    rules::whitespace_run()
        .replace_all(text, " ")
        .trim()
        .to_string()
}

/// Append the courtesy closer unless the text already has a courtesy marker.
/// A trailing `?` counts as terminal, so a question keeps its mark and gets
/// no extra period before the closer.
fn close_politely(text: &str) -> String {
    let folded = fold(text);
    if COURTESY_MARKERS.iter().any(|m| folded.contains(m)) {
        return text.to_string();
    }

    let body = text.trim_end_matches([',', ';', ':', ' ']);
    if !body.chars().any(char::is_alphanumeric) {
        return COURTESY_CLOSER.to_string();
    }

    let mut out = body.to_string();
    if !out.ends_with(['.', '?']) {
        out.push('.');
    }
    out.push(' ');
    out.push_str(COURTESY_CLOSER);
    out
}
