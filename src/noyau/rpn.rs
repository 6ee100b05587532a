// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Lexeme en RPN (postfix), directement dans l’ordre gauche -> droite
// - Puis évaluer la RPN avec une pile d’opérandes (f64)
//
// Règles:
// - priorités : + - (1) < * / (2) < ^ (3) < fonctions (4)
// - à priorité égale on dépile d’abord => TOUT est associatif à gauche, y compris ^ :
//   "2^3^2" => "2 3 ^ 2 ^" => 64
// - le moins unaire est déjà réécrit par le découpage ("0 x -"), rien à faire ici

use tracing::trace;

use super::erreur::ErreurCalcul;
use super::jetons::{Genre, Lexeme};

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Sqrt, ParOuvrante, Nombre(2), Plus, Nombre(2), ParFermante]
///   rpn:    [Nombre(2), Nombre(2), Plus, Sqrt]
pub fn to_rpn(tokens: &[Lexeme]) -> Result<Vec<Lexeme>, ErreurCalcul> {
    let mut out: Vec<Lexeme> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Lexeme> = Vec::new();

    for tok in tokens.iter().copied() {
        match tok.genre {
            Genre::Nombre => out.push(tok),

            Genre::ParOuvrante => ops.push(tok),

            Genre::ParFermante => {
                // dépile jusqu’à '(' (la '(' ne sort jamais)
                loop {
                    match ops.pop() {
                        Some(top) if top.genre == Genre::ParOuvrante => break,
                        Some(top) => out.push(top),
                        None => {
                            return Err(ErreurCalcul::Incorrecte {
                                detail: "parenthèse fermante sans ouvrante",
                            })
                        }
                    }
                }
            }

            // opérateurs binaires + fonctions
            _ => {
                while let Some(top) = ops.last() {
                    if top.genre == Genre::ParOuvrante || top.priorite < tok.priorite {
                        break;
                    }
                    out.push(*top);
                    ops.pop();
                }
                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op.genre == Genre::ParOuvrante {
            return Err(ErreurCalcul::Incorrecte {
                detail: "parenthèses non fermées",
            });
        }
        out.push(op);
    }

    trace!(n = out.len(), "rpn produite");
    Ok(out)
}

/// Évalue une RPN.
///
/// Le résultat peut être NaN ou ±∞ : c’est la façade qui décide quoi en faire.
pub fn evaluer_rpn(rpn: &[Lexeme]) -> Result<f64, ErreurCalcul> {
    let mut pile: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok.genre {
            Genre::Nombre => pile.push(tok.valeur),

            Genre::Fonction(f) => {
                let x = pile.pop().ok_or(ErreurCalcul::Incorrecte {
                    detail: "fonction sans argument",
                })?;
                pile.push(f.appliquer(x));
            }

            Genre::Plus | Genre::Moins | Genre::Fois | Genre::Divise | Genre::Puissance => {
                // l’ordre compte pour - / ^ : d’abord la droite
                let b = pile.pop().ok_or(ErreurCalcul::Incorrecte {
                    detail: "opérande droit manquant",
                })?;
                let a = pile.pop().ok_or(ErreurCalcul::Incorrecte {
                    detail: "opérande gauche manquant",
                })?;

                let v = match tok.genre {
                    Genre::Plus => a + b,
                    Genre::Moins => a - b,
                    Genre::Fois => a * b,
                    Genre::Divise => a / b,
                    _ => a.powf(b),
                };
                pile.push(v);
            }

            Genre::ParOuvrante | Genre::ParFermante => {
                return Err(ErreurCalcul::Incorrecte {
                    detail: "parenthèse inattendue en RPN",
                })
            }
        }
    }

    match (pile.pop(), pile.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurCalcul::Incorrecte {
            detail: "pile finale invalide",
        }),
    }
}
