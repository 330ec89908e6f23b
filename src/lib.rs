//! Leo - rule-based mediation for co-parenting messages
//!
//! Detects tension signals in French messages (reproach, sarcasm,
//! accusation, manipulation, shouting, generalizations), scores their likely
//! emotional impact, and proposes neutral rewrites centered on the child.
//!
//! ```rust,ignore
//! use leo::engine::Mediator;
//!
//! let mediator = Mediator::builtin();
//! let result = mediator.rephrase("Tu es encore en retard !!", None);
//! println!("{}", result.options[0].text);
//! ```

pub mod ai;
pub mod config;
pub mod detectors;
pub mod engine;
pub mod lexicon;
pub mod models;
pub mod recommend;
pub mod reporters;
pub mod rewrite;
pub mod scoring;
pub mod templates;
pub mod validate;

pub use engine::Mediator;
