//! Noyau : évaluation (pipeline réel)
//!
//! saisie -> Texte (sans espaces) -> validation -> jetons -> RPN -> valeur
//!
//! Deux sorties :
//! - `eval_expression`  : Result typé + démarche (jetons, RPN) pour l’UI
//! - `parse_expression` : couple (valeur, message), NaN + message en cas d’échec
//!
//! Aucun état partagé entre deux appels.

use tracing::{debug, warn};

use super::curseur::Texte;
use super::erreur::ErreurCalcul;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{evaluer_rpn, to_rpn};
use super::validation::valider;

/// Message de succès renvoyé par `parse_expression`.
pub const MESSAGE_SUCCES: &str = "Succès !";

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une expression et retourne la valeur + la démarche.
///
/// - erreur de syntaxe : `ErreurCalcul::Syntaxe` (avec position)
/// - résultat NaN      : `ErreurCalcul::ResultatNaN` (pas de position)
/// - ±∞ est un résultat valide (ex: 1/0)
pub fn eval_expression(saisie: &str) -> Result<(f64, DemarcheNoyau), ErreurCalcul> {
    // 1) Texte + validation
    let texte = Texte::depuis_saisie(saisie);
    valider(&texte)?;

    // 2) Jetons
    let jetons = tokenize(&texte)?;
    let jetons_txt = format_tokens(&jetons);

    // 3) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    debug!(jetons = %jetons_txt, rpn = %rpn_txt, "expression convertie");

    // 4) Valeur
    let valeur = evaluer_rpn(&rpn)?;
    if valeur.is_nan() {
        return Err(ErreurCalcul::ResultatNaN);
    }

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
    };
    Ok((valeur, d))
}

/// Point d’entrée "historique" : jamais d’erreur remontée, toujours (valeur, message).
/// En cas d’échec la valeur est NaN et le message décrit la cause
/// (avec la position pour les erreurs de syntaxe).
pub fn parse_expression(saisie: &str) -> (f64, String) {
    let r = eval_expression(saisie);
    if let Err(ErreurCalcul::Incorrecte { detail }) = &r {
        warn!(saisie, detail, "incohérence interne après validation");
    }
    valeur_et_message(&r)
}

/// Ramène un résultat typé au couple (valeur, message) : NaN + message en cas d’échec.
pub fn valeur_et_message(r: &Result<(f64, DemarcheNoyau), ErreurCalcul>) -> (f64, String) {
    match r {
        Ok((v, _)) => {
            debug!(valeur = v, "évaluation réussie");
            (*v, MESSAGE_SUCCES.to_string())
        }
        Err(e) => {
            debug!(erreur = %e, position = ?e.position(), "évaluation refusée");
            (f64::NAN, e.to_string())
        }
    }
}
