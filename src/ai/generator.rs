//! Generator collaborator
//!
//! The engine only sees the [`Generator`] trait. [`LlmGenerator`] is the
//! real implementation over [`AiClient`]; [`TimeoutGenerator`] bounds the
//! latency of any generator by running it on a worker thread.

use super::{AiClient, AiError, AiResult, Prompt};
use crossbeam_channel::{bounded, RecvTimeoutError};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::debug;

/// Source of extra candidate texts
pub trait Generator: Send + Sync {
    fn name(&self) -> &str {
        "generator"
    }

    /// Produce candidates for `prompt`. An empty list is a normal answer.
    fn generate(&self, prompt: &Prompt) -> AiResult<Vec<String>>;
}

impl<G: Generator + ?Sized> Generator for Arc<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&self, prompt: &Prompt) -> AiResult<Vec<String>> {
        (**self).generate(prompt)
    }
}

static NUMBERED_LINE: OnceLock<Regex> = OnceLock::new();

fn numbered_line() -> &'static Regex {
    NUMBERED_LINE.get_or_init(|| Regex::new(r"^\s*(\d+)\s*[.)]\s*(.+?)\s*$").unwrap())
}

/// Extract items `1.` to `max.` from a model answer, in order of appearance
pub fn parse_numbered(content: &str, max: usize) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let caps = numbered_line().captures(line)?;
            let n: usize = caps[1].parse().ok()?;
            if n == 0 || n > max {
                return None;
            }
            let text = caps[2].trim_matches(|c| c == '"' || c == '«' || c == '»').trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .take(max)
        .collect()
}

pub struct LlmGenerator {
    client: AiClient,
}

impl LlmGenerator {
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }
}

impl Generator for LlmGenerator {
    fn name(&self) -> &str {
        self.client.model()
    }

    fn generate(&self, prompt: &Prompt) -> AiResult<Vec<String>> {
        let content = self.client.complete(prompt)?;
        let items = parse_numbered(&content, prompt.kind.expected_items());
        debug!(
            "{} returned {} numbered item(s)",
            self.client.model(),
            items.len()
        );
        Ok(items)
    }
}

/// Wraps a generator with a wall-clock deadline.
///
/// A late answer is discarded; the worker thread finishes on its own.
pub struct TimeoutGenerator {
    inner: Arc<dyn Generator>,
    timeout: Duration,
}

impl TimeoutGenerator {
    pub fn new(inner: impl Generator + 'static, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Generator for TimeoutGenerator {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn generate(&self, prompt: &Prompt) -> AiResult<Vec<String>> {
        let (tx, rx) = bounded(1);
        let inner = Arc::clone(&self.inner);
        let prompt = prompt.clone();

        std::thread::Builder::new()
            .name("leo-generator".to_string())
            .spawn(move || {
                // receiver may be gone after a timeout
                let _ = tx.send(inner.generate(&prompt));
            })
            .map_err(|e| AiError::Unavailable(format!("failed to spawn worker: {}", e)))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(AiError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(AiError::Unavailable(
                "generator worker exited without answering".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;

    struct Fixed(Vec<String>);

    impl Generator for Fixed {
        fn generate(&self, _prompt: &Prompt) -> AiResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct Slow;

    impl Generator for Slow {
        fn generate(&self, _prompt: &Prompt) -> AiResult<Vec<String>> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(vec!["trop tard".to_string()])
        }
    }

    struct Panics;

    impl Generator for Panics {
        fn generate(&self, _prompt: &Prompt) -> AiResult<Vec<String>> {
            panic!("boom")
        }
    }

    fn prompt() -> Prompt {
        Prompt::rephrase("Bonjour", &AnalysisResult::default(), None)
    }

    #[test]
    fn test_parse_numbered() {
        let content = "Voici deux propositions :\n1. Je serai là à 18h.\n2) \"Peux-tu confirmer l'horaire ?\"\n3. En trop";
        assert_eq!(
            parse_numbered(content, 2),
            vec!["Je serai là à 18h.", "Peux-tu confirmer l'horaire ?"]
        );
    }

    #[test]
    fn test_parse_numbered_ignores_noise() {
        assert!(parse_numbered("Désolé, je ne peux pas.", 3).is_empty());
        assert!(parse_numbered("1.   \n0. zéro", 3).is_empty());
    }

    #[test]
    fn test_timeout_passes_fast_answer() {
        let g = TimeoutGenerator::new(
            Fixed(vec!["Bonjour, à samedi.".to_string()]),
            Duration::from_secs(5),
        );
        assert_eq!(g.generate(&prompt()).unwrap(), vec!["Bonjour, à samedi."]);
    }

    #[test]
    fn test_timeout_fires() {
        let g = TimeoutGenerator::new(Slow, Duration::from_millis(20));
        assert!(matches!(g.generate(&prompt()), Err(AiError::Timeout(_))));
    }

    #[test]
    fn test_worker_panic_is_unavailable() {
        let g = TimeoutGenerator::new(Panics, Duration::from_secs(5));
        assert!(matches!(g.generate(&prompt()), Err(AiError::Unavailable(_))));
    }
}
