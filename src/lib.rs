//! Calculatrice RPN : noyau d’évaluation d’expressions (f64).
//!
//! `noyau::parse_expression("2+3*4")` renvoie `(14.0, "Succès !")`.
//! En cas d’échec : `(NaN, message)`, le message contient la position fautive
//! (0-based, dans la saisie brute) pour les erreurs de syntaxe.

pub mod noyau;
