//! Batch command - one message per line, processed in parallel

use anyhow::{bail, Context, Result};
use leo::engine::Mediator;
use leo::reporters::{self, Report};
use rayon::prelude::*;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::info;

pub fn run(mediator: &Mediator, file: &Path, mode: &str) -> Result<()> {
    let content = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read messages from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };

    let start = Instant::now();
    let lines = process(mediator, &content, mode)?;
    for line in &lines {
        println!("{}", line);
    }
    info!(
        "Processed {} message(s) in {:.2?}",
        lines.len(),
        start.elapsed()
    );
    Ok(())
}

/// Run `mode` on every non-blank line. Output order matches input order.
pub fn process(mediator: &Mediator, content: &str, mode: &str) -> Result<Vec<String>> {
    if !matches!(mode, "analyze" | "rephrase" | "mirror" | "respond") {
        bail!("Unknown batch mode '{}'", mode);
    }

    let messages: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

    messages
        .par_iter()
        .map(|text| match mode {
            "analyze" => reporters::render_line(Report::Analysis(&mediator.analyze(text))),
            "mirror" => reporters::render_line(Report::Mirror(&mediator.mirror(text))),
            "respond" => {
                let options = mediator.suggest_responses(text, None);
                reporters::render_line(Report::Responses(&options))
            }
            _ => reporters::render_line(Report::Rephrase(&mediator.rephrase(text, None))),
        })
        .collect()
}
