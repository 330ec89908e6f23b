//! Mediation prompts for the generative collaborator

use crate::models::AnalysisResult;

const MEDIATION_ROLE: &str = "Tu es un assistant spécialisé dans la médiation parentale.";

const REPHRASE_SYSTEM: &str = "Ton rôle est de reformuler les messages entre parents séparés \
     pour les rendre neutres, apaisés et centrés sur l'intérêt de l'enfant.\n\n\
     Règles à respecter:\n\
     - Préserver le contenu informatif essentiel\n\
     - Éliminer l'agressivité, les reproches et les accusations\n\
     - Utiliser un ton neutre et respectueux\n\
     - Centrer sur l'intérêt de l'enfant quand c'est pertinent\n\
     - Phrases courtes et claires\n\
     - Une seule information principale par message\n\
     - Pas de points d'exclamation ni de questions rhétoriques";

const RESPONSES_SYSTEM: &str = "Génère des réponses appropriées à des messages entre parents séparés.\n\n\
     Les réponses doivent être:\n\
     - Centrées sur l'intérêt de l'enfant\n\
     - Neutres et respectueuses\n\
     - Informatives et constructives\n\
     - Courtes et claires";

/// What the prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Rephrase,
    Responses,
}

impl PromptKind {
    /// Number of numbered items the model is asked to produce
    pub fn expected_items(&self) -> usize {
        match self {
            PromptKind::Rephrase => 2,
            PromptKind::Responses => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// Ask for reformulations of an outgoing message
    pub fn rephrase(message: &str, analysis: &AnalysisResult, context: Option<&str>) -> Self {
        let signals = analysis.signals.tags();
        let signals = if signals.is_empty() {
            "aucun".to_string()
        } else {
            signals.join(", ")
        };

        let mut user = format!(
            "Message à reformuler: \"{}\"\n\nSentiment détecté: {}\nSignaux détectés: {}\n",
            message.trim(),
            analysis.sentiment,
            signals
        );
        push_context(&mut user, context);
        user.push_str("\nPropose 2 reformulations différentes, numérotées 1. et 2.");

        Self {
            kind: PromptKind::Rephrase,
            system: format!("{} {}", MEDIATION_ROLE, REPHRASE_SYSTEM),
            user,
        }
    }

    /// Ask for replies to a received message
    pub fn responses(received: &str, context: Option<&str>) -> Self {
        let mut user = format!("Message reçu: \"{}\"\n", received.trim());
        push_context(&mut user, context);
        user.push_str("\nPropose 3 réponses différentes, numérotées 1., 2., et 3.");

        Self {
            kind: PromptKind::Responses,
            system: format!("{} {}", MEDIATION_ROLE, RESPONSES_SYSTEM),
            user,
        }
    }
}

fn push_context(user: &mut String, context: Option<&str>) {
    if let Some(ctx) = context.map(str::trim).filter(|c| !c.is_empty()) {
        user.push_str(&format!("Contexte: {}\n", ctx));
    }
}
