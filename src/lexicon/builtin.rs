//! Built-in French lexicon
//!
//! Phrases are stored case-folded. Replacements must never contain a phrase
//! of this table (checked when the lexicon is built).

use crate::models::TriggerCategory::{self, Accusation, Manipulation, Reproach, Sarcasm};

pub(super) const BUILTIN_ENTRIES: &[(&str, &str, TriggerCategory)] = &[
    // Reproach
    ("comme d'habitude", "comme convenu précédemment", Reproach),
    ("encore", "à nouveau", Reproach),
    ("à cause de toi", "en raison de cette situation", Reproach),
    ("t'as qu'à", "il serait possible de", Reproach),
    ("tu m'énerves", "cette situation est difficile", Reproach),
    // Sarcasm
    ("bien sûr", "en effet", Sarcasm),
    ("évidemment", "naturellement", Sarcasm),
    ("c'est ça", "d'accord", Sarcasm),
    ("parfait", "entendu", Sarcasm),
    ("génial", "noté", Sarcasm),
    // Accusation
    ("tu fais exprès", "il semble y avoir un malentendu", Accusation),
    ("tu mens", "nos souvenirs semblent différer", Accusation),
    ("tu ne comprends rien", "il y a peut-être besoin de clarification", Accusation),
    ("c'est ta faute", "cette situation nécessite notre attention", Accusation),
    // Manipulation
    ("si tu m'aimais", "si nous voulons avancer ensemble", Manipulation),
    (
        "tu ne penses qu'à toi",
        "j'aimerais que nous pensions aussi aux besoins de l'enfant",
        Manipulation,
    ),
    ("les enfants vont souffrir", "les enfants ont besoin de stabilité", Manipulation),
];
