//! Situational templates
//!
//! Two fixed tables: formal alternatives keyed by the intent of an outgoing
//! message, and reply suggestions keyed by the tone of a received one. Both
//! are classified by keyword stems matched at the start of a word, in a fixed
//! order where the first match wins.

use crate::lexicon::fold;
use serde::Serialize;
use std::fmt;

/// What an outgoing message is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Pickup,
    Delay,
    Difficulty,
    Health,
    Generic,
}

impl Intent {
    /// Classification order; keyword sets overlap so this is significant
    pub const ORDER: [Intent; 4] = [
        Intent::Pickup,
        Intent::Delay,
        Intent::Difficulty,
        Intent::Health,
    ];

    fn stems(&self) -> &'static [&'static str] {
        match self {
            Intent::Pickup => &["récupér", "cherch", "prend"],
            Intent::Delay => &["retard", "attend"],
            Intent::Difficulty => &["problème", "souci", "difficult"],
            Intent::Health => &["médecin", "docteur", "santé", "malade"],
            Intent::Generic => &[],
        }
    }

    /// The formal sentence for this intent
    pub fn template(&self) -> &'static str {
        match self {
            Intent::Pickup => "Je souhaiterais organiser la récupération de notre enfant selon les modalités convenues. Merci de me confirmer les détails.",
            Intent::Delay => "Il y a eu un contretemps. Je vous tiendrai informé(e) de l'heure d'arrivée. Merci de votre compréhension.",
            Intent::Difficulty => "Il semble y avoir une situation qui nécessite notre attention. Pourrions-nous en discuter dans l'intérêt de notre enfant ?",
            Intent::Health => "Je vous informe d'une question concernant la santé de notre enfant. Merci de me tenir au courant de votre côté également.",
            Intent::Generic => "J'ai un point à aborder concernant notre enfant. Pourrions-nous en discuter de manière constructive ? Merci.",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Pickup => "pickup",
            Intent::Delay => "delay",
            Intent::Difficulty => "difficulty",
            Intent::Health => "health",
            Intent::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Tone of a received message, for reply suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyTone {
    Urgent,
    Agreement,
    Generic,
}

impl ReplyTone {
    fn stems(&self) -> &'static [&'static str] {
        match self {
            ReplyTone::Urgent => &["urgent", "important", "problème"],
            ReplyTone::Agreement => &["merci", "accord", "ok", "bien"],
            ReplyTone::Generic => &[],
        }
    }

    pub fn replies(&self) -> [&'static str; 3] {
        match self {
            ReplyTone::Urgent => [
                "J'ai bien reçu ton message urgent. Pour le bien de notre enfant, je vais traiter cela rapidement.",
                "Merci de m'avoir alerté. Dans l'intérêt de notre enfant, nous devons résoudre cela ensemble.",
                "J'ai pris note de l'urgence. Je reviens vers toi rapidement pour le bien-être de notre enfant.",
            ],
            ReplyTone::Agreement => [
                "Merci pour ton message. Cela convient très bien pour notre enfant.",
                "J'ai bien reçu. Merci pour ta collaboration dans l'intérêt de notre enfant.",
                "Entendu, cela convient bien pour le bien-être de notre enfant.",
            ],
            ReplyTone::Generic => [
                "J'ai bien reçu ton message. Pour le bien de notre enfant, pourrions-nous discuter de cela calmement ?",
                "Merci pour ton message. Dans l'intérêt de notre enfant, je propose que nous trouvions une solution ensemble.",
                "J'ai pris note de ton message. Pour éviter tout malentendu, pourrions-nous clarifier ce point ?",
            ],
        }
    }
}

/// True if any word of `folded` starts with one of `stems`
fn has_stem(folded: &str, stems: &[&str]) -> bool {
    folded
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| stems.iter().any(|stem| word.starts_with(stem)))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateComposer;

impl TemplateComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> Intent {
        let folded = fold(text);
        Intent::ORDER
            .into_iter()
            .find(|intent| has_stem(&folded, intent.stems()))
            .unwrap_or(Intent::Generic)
    }

    /// Formal alternative for `text`. Preserves intent, not wording.
    pub fn compose(&self, text: &str) -> String {
        self.classify(text).template().to_string()
    }

    pub fn reply_tone(&self, received: &str) -> ReplyTone {
        let folded = fold(received);
        [ReplyTone::Urgent, ReplyTone::Agreement]
            .into_iter()
            .find(|tone| has_stem(&folded, tone.stems()))
            .unwrap_or(ReplyTone::Generic)
    }

    /// Three reply suggestions for a received message
    pub fn responses(&self, received: &str) -> Vec<String> {
        self.reply_tone(received)
            .replies()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::TriggerLexicon;

    #[test]
    fn test_intent_classification() {
        let c = TemplateComposer::new();
        assert_eq!(c.classify("Je viens chercher Léa samedi"), Intent::Pickup);
        assert_eq!(c.classify("Tu es en retard"), Intent::Delay);
        assert_eq!(c.classify("On a un souci avec l'école"), Intent::Difficulty);
        assert_eq!(c.classify("Elle est malade depuis hier"), Intent::Health);
        assert_eq!(c.classify("Bonjour"), Intent::Generic);
    }

    #[test]
    fn test_first_matching_intent_wins() {
        let c = TemplateComposer::new();
        // pickup and delay both present
        assert_eq!(
            c.classify("Tu peux récupérer Léa, je suis en retard"),
            Intent::Pickup
        );
        assert_eq!(
            c.classify("En retard chez le médecin"),
            Intent::Delay
        );
    }

    #[test]
    fn test_stems_match_word_start_only() {
        let c = TemplateComposer::new();
        assert_eq!(c.classify("Je ne comprends pas"), Intent::Generic);
        assert_eq!(c.classify("Il PREND le bus"), Intent::Pickup);
        assert_eq!(c.classify("J'attends ta réponse"), Intent::Delay);
    }

    #[test]
    fn test_compose_is_fixed_sentence() {
        let c = TemplateComposer::new();
        assert_eq!(c.compose("médecin mardi"), Intent::Health.template());
        assert_eq!(c.compose("docteur jeudi"), c.compose("santé"));
    }

    #[test]
    fn test_reply_tones() {
        let c = TemplateComposer::new();
        assert_eq!(c.reply_tone("C'est URGENT"), ReplyTone::Urgent);
        assert_eq!(c.reply_tone("ok pour samedi"), ReplyTone::Agreement);
        assert_eq!(c.reply_tone("Samedi 10h."), ReplyTone::Generic);
        assert_eq!(c.responses("Samedi 10h.").len(), 3);
    }

    #[test]
    fn test_tables_are_trigger_free() {
        let lexicon = TriggerLexicon::builtin();
        let intents = Intent::ORDER.into_iter().chain([Intent::Generic]);
        for intent in intents {
            assert!(!lexicon.contains_trigger(intent.template()), "{}", intent);
        }
        for tone in [ReplyTone::Urgent, ReplyTone::Agreement, ReplyTone::Generic] {
            for reply in tone.replies() {
                assert!(!lexicon.contains_trigger(reply), "{}", reply);
            }
        }
    }
}
