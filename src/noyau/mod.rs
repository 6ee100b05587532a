//! Noyau RPN (f64)
//!
//! Organisation interne :
//! - curseur.rs    : texte sans espaces + curseur borné (primitives de scan)
//! - validation.rs : grammaire (automate signe / opérande / opérateur, pile de portées)
//! - jetons.rs     : découpage en lexèmes + signe unaire
//! - rpn.rs        : shunting-yard + évaluation par pile
//! - format.rs     : affichage "%g"
//! - erreur.rs     : erreurs (syntaxe avec position, NaN)
//! - eval.rs       : pipeline complet

pub mod curseur;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::{eval_expression, parse_expression, valeur_et_message};
