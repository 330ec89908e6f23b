//! Single-message commands: analyze, rephrase, mirror, respond

use anyhow::Result;
use leo::engine::Mediator;
use leo::reporters::{self, OutputFormat, Report};
use tracing::info;

pub fn analyze(mediator: &Mediator, text: &str, format: OutputFormat) -> Result<()> {
    let result = mediator.analyze(text);
    print(Report::Analysis(&result), format)
}

pub fn rephrase(
    mediator: &Mediator,
    text: &str,
    context: Option<&str>,
    explain: bool,
    format: OutputFormat,
) -> Result<()> {
    let result = mediator.rephrase(text, context);
    info!("{} option(s) for a {}-char message", result.options.len(), text.chars().count());
    print(Report::Rephrase(&result), format)?;

    if explain {
        let steps = mediator.explain(text);
        print(Report::Explain(&steps), format)?;
    }
    Ok(())
}

pub fn mirror(mediator: &Mediator, text: &str, format: OutputFormat) -> Result<()> {
    let report = mediator.mirror(text);
    print(Report::Mirror(&report), format)
}

pub fn respond(
    mediator: &Mediator,
    received: &str,
    context: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let options = mediator.suggest_responses(received, context);
    print(Report::Responses(&options), format)
}

fn print(report: Report<'_>, format: OutputFormat) -> Result<()> {
    let out = reporters::render(report, format)?;
    if !out.is_empty() {
        println!("{}", out);
    }
    Ok(())
}
