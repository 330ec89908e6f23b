//! Base detector trait and types
//!
//! This module defines the core abstractions for tension detection:
//! - `Detector` trait that all detectors must implement
//! - `MessageText` carrying the raw and case-folded views of a message

use crate::lexicon::fold;
use crate::models::SignalSet;

/// A message prepared once for every detector
#[derive(Debug, Clone)]
pub struct MessageText<'a> {
    /// Text as typed by the user
    pub raw: &'a str,
    /// Case-folded text (lowercase, ASCII apostrophes)
    pub folded: String,
}

impl<'a> MessageText<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            folded: fold(raw),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// Trait for all tension detectors
///
/// Each detector looks for one family of indicators and reports the
/// signals it found. Detectors are pure: the same message always yields the
/// same signals, and running them in any order gives the same union.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct ShoutingDetector;
///
/// impl Detector for ShoutingDetector {
///     fn name(&self) -> &'static str {
///         "shouting"
///     }
///
///     fn description(&self) -> &'static str {
///         "Detects messages typed in capitals"
///     }
///
///     fn detect(&self, message: &MessageText<'_>) -> SignalSet {
///         SignalSet::new()
///     }
/// }
/// ```
pub trait Detector: Send + Sync {
    /// Unique identifier for this detector (e.g., "punctuation-excess")
    fn name(&self) -> &'static str;

    /// Human-readable description of what this detector finds
    fn description(&self) -> &'static str;

    /// Run detection on one message
    fn detect(&self, message: &MessageText<'_>) -> SignalSet;
}
