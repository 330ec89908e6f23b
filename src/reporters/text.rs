//! Text (terminal) reporter with colors and formatting

use super::Report;
use crate::models::{
    AnalysisResult, ImpactLevel, MirrorReport, Notice, RephraseResult, RewriteMethod,
    RewriteOption, Sentiment, SignalSet,
};
use crate::rewrite::StageTrace;
use anyhow::Result;
use console::{style, StyledObject};

const RULE: &str = "──────────────────────────────────────";

/// Render report as formatted terminal output
pub fn render(report: Report<'_>) -> Result<String> {
    let out = match report {
        Report::Analysis(r) => render_analysis(r),
        Report::Rephrase(r) => render_rephrase(r),
        Report::Mirror(r) => render_mirror(r),
        Report::Responses(r) => render_options("RÉPONSES SUGGÉRÉES", r),
        Report::Explain(steps) => render_explain(steps),
    };
    Ok(out)
}

fn level_style(level: ImpactLevel) -> StyledObject<String> {
    let s = style(level.to_string());
    match level {
        ImpactLevel::High => s.red().bold(),
        ImpactLevel::Moderate => s.yellow().bold(),
        ImpactLevel::Low => s.green(),
    }
}

fn sentiment_style(sentiment: Sentiment) -> StyledObject<String> {
    let s = style(sentiment.to_string());
    match sentiment {
        Sentiment::Hostile => s.red(),
        Sentiment::Neutral => s.cyan(),
        Sentiment::Positive => s.green(),
    }
}

fn method_tag(method: RewriteMethod) -> &'static str {
    match method {
        RewriteMethod::RuleBased => "[R]",
        RewriteMethod::FormalTemplate => "[T]",
        RewriteMethod::Generated => "[G]",
    }
}

fn header(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n", style(title).bold()));
    out.push_str(&format!("{}\n", style(RULE).dim()));
}

fn push_signals(out: &mut String, signals: &SignalSet) {
    if signals.is_empty() {
        out.push_str(&format!("Signaux: {}\n", style("aucun").dim()));
    } else {
        out.push_str(&format!("Signaux: {}\n", signals.tags().join(", ")));
    }
}

fn render_analysis(r: &AnalysisResult) -> String {
    let mut out = String::new();
    header(&mut out, "Analyse");
    out.push_str(&format!(
        "Sentiment: {}  Calme: {:.2}  Impact: {} ({})\n",
        sentiment_style(r.sentiment),
        r.score,
        style(r.impact.score).bold(),
        level_style(r.impact.level)
    ));
    push_signals(&mut out, &r.signals);
    out.push_str(&format!("\n{}\n", r.recommendation));
    out
}

fn render_rephrase(r: &RephraseResult) -> String {
    let mut out = String::new();
    header(&mut out, "Reformulation");
    out.push_str(&format!("{} {}\n", style("Original:").bold(), r.original.trim()));
    out.push_str(&format!(
        "Sentiment: {}  Impact: {} ({})\n",
        sentiment_style(r.analysis.sentiment),
        style(r.analysis.impact.score).bold(),
        level_style(r.analysis.impact.level)
    ));
    push_signals(&mut out, &r.analysis.signals);
    out.push('\n');

    out.push_str(&render_options("OPTIONS", &r.options));
    out.push_str(&format!("{}\n", r.recommendation));

    for notice in &r.notices {
        let line = match notice {
            Notice::EmptyInput => continue,
            Notice::CollaboratorFailure { message } => {
                format!("Génération indisponible: {}", message)
            }
            Notice::ValidationRejection { rejected } => {
                format!("{} proposition(s) écartée(s) par la validation", rejected)
            }
        };
        out.push_str(&format!("{}\n", style(line).dim()));
    }
    out
}

fn render_options(title: &str, options: &[RewriteOption]) -> String {
    let mut out = String::new();
    if options.is_empty() {
        return out;
    }
    out.push_str(&format!("{}\n", style(title).bold()));
    for (i, option) in options.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {} {}  {}\n",
            i + 1,
            style(method_tag(option.method)).cyan(),
            option.text,
            style(format!("({:.0}%)", option.confidence * 100.0)).dim()
        ));
    }
    out.push('\n');
    out
}

fn render_mirror(r: &MirrorReport) -> String {
    let mut out = String::new();
    header(&mut out, "Mode miroir");
    out.push_str(&format!(
        "Impact: {} ({})\n",
        style(r.impact_score).bold(),
        level_style(r.impact_level)
    ));
    push_signals(&mut out, &r.signals);

    let p = &r.perception;
    out.push_str(&format!(
        "Perception: agressif {:.0}%  flou {:.0}%  informatif {:.0}%  rassurant {:.0}%\n\n",
        p.aggressive * 100.0,
        p.vague * 100.0,
        p.informative * 100.0,
        p.reassuring * 100.0
    ));
    out.push_str(&format!("{}\n", r.recommendation));

    if !r.suggested_changes.is_empty() {
        out.push_str(&format!("\n{}\n", style("SUGGESTIONS").bold()));
        for change in &r.suggested_changes {
            out.push_str(&format!("  - {}\n", change));
        }
    }
    out.push_str(&format!("\n{}\n", style(&r.mirror_prompt).italic()));
    out
}

fn render_explain(steps: &[StageTrace]) -> String {
    let mut out = String::new();
    header(&mut out, "Étapes de réécriture");
    for step in steps {
        out.push_str(&format!(
            "  {:<26} {}\n",
            style(step.stage.name()).dim(),
            step.output
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Mediator;
    use crate::reporters::tests::{sample_rephrase, SAMPLE};

    #[test]
    fn test_text_rephrase_lists_options() {
        let result = sample_rephrase();
        let out = render(Report::Rephrase(&result)).unwrap();
        assert!(out.contains("OPTIONS"));
        assert!(out.contains(&result.options[0].text));
        assert!(out.contains(&result.recommendation));
    }

    #[test]
    fn test_text_mirror() {
        let report = Mediator::builtin().mirror(SAMPLE);
        let out = render(Report::Mirror(&report)).unwrap();
        assert!(out.contains("SUGGESTIONS"));
        assert!(out.contains("tu le vivrais comment"));
    }

    #[test]
    fn test_text_empty_responses_render_nothing() {
        assert_eq!(render(Report::Responses(&[])).unwrap(), "");
    }
}
