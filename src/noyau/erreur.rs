// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - ErreurSyntaxe : rejet par la validation, avec position (0-based, saisie brute).
// - ErreurCalcul  : tout ce que la façade peut renvoyer.
//
// Contrat UI : la PREMIÈRE suite de chiffres du message est la position à pointer.
// Donc aucun autre chiffre avant la position dans les messages ci-dessous.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurSyntaxe {
    #[error("Erreur : expression vide")]
    Vide,

    #[error("Erreur ! Parenthèses manquantes pour une puissance négative ! Position : {position}")]
    PuissanceNegative { position: usize },

    #[error("Erreur ! Argument de fonction manquant ! Position entre : {ouvrante} et {fermante}")]
    ArgumentManquant { ouvrante: usize, fermante: usize },

    #[error("Erreur ! Parenthèse fermante sans ouvrante ! Position : {position}")]
    FermanteOrpheline { position: usize },

    #[error("Erreur ! Parenthèse non fermée ! Position : {position}")]
    OuvranteNonFermee { position: usize },

    #[error("Erreur ! Nombre avec des symboles incorrects après le point ! Position : {position}")]
    PointInvalide { position: usize },

    #[error("Erreur ! Forme exponentielle invalide ! Position : {position}")]
    ExposantInvalide { position: usize },

    #[error("Erreur ! Parenthèse ouvrante attendue après « {nom} » ! Position : {position}")]
    FonctionSansParenthese { nom: &'static str, position: usize },

    #[error("Erreur : symboles incorrects ou expression mal composée ! Position : {position}")]
    SymboleInattendu { position: usize },

    #[error("Erreur : expression incomplète, opérande attendu ! Position : {position}")]
    FinInattendue { position: usize },
}

impl ErreurSyntaxe {
    /// Position signalée (première position pour ArgumentManquant).
    pub fn position(&self) -> Option<usize> {
        use ErreurSyntaxe::*;
        match self {
            Vide => None,
            ArgumentManquant { ouvrante, .. } => Some(*ouvrante),
            PuissanceNegative { position }
            | FermanteOrpheline { position }
            | OuvranteNonFermee { position }
            | PointInvalide { position }
            | ExposantInvalide { position }
            | FonctionSansParenthese { position, .. }
            | SymboleInattendu { position }
            | FinInattendue { position } => Some(*position),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error(transparent)]
    Syntaxe(#[from] ErreurSyntaxe),

    #[error("NaN obtenu, entrée probablement invalide (partie réelle et imaginaire, logarithme d’un nombre négatif…) !")]
    ResultatNaN,

    /// Incohérence entre étapes (ne doit pas arriver après validation).
    #[error("Erreur : expression incorrecte !")]
    Incorrecte { detail: &'static str },
}

impl ErreurCalcul {
    pub fn position(&self) -> Option<usize> {
        match self {
            ErreurCalcul::Syntaxe(e) => e.position(),
            _ => None,
        }
    }
}

/// Première suite de chiffres d’un message, lue comme une position.
///
/// Pour tout `ErreurCalcul`, `position_dans_message(&e.to_string()) == e.position()`.
pub fn position_dans_message(msg: &str) -> Option<usize> {
    let debut = msg.find(|c: char| c.is_ascii_digit())?;
    let reste = &msg[debut..];
    let fin = reste
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(reste.len());
    reste[..fin].parse().ok()
}
