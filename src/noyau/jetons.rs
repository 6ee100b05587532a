// src/noyau/jetons.rs

use tracing::trace;

use super::curseur::{Curseur, Texte};
use super::erreur::ErreurCalcul;

/// Fonctions unaires reconnues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Cos,
    Sin,
    Tan,
    Sqrt,
    Ln,
    Log,
    Abs,
    Sqr,
}

impl Fonction {
    /// Ordre de reconnaissance : `sqrt` AVANT `sqr` (préfixe commun).
    pub const TOUTES: [Fonction; 8] = [
        Fonction::Sqrt,
        Fonction::Sqr,
        Fonction::Cos,
        Fonction::Sin,
        Fonction::Tan,
        Fonction::Log,
        Fonction::Abs,
        Fonction::Ln,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Cos => "cos",
            Fonction::Sin => "sin",
            Fonction::Tan => "tan",
            Fonction::Sqrt => "sqrt",
            Fonction::Ln => "ln",
            Fonction::Log => "log",
            Fonction::Abs => "abs",
            Fonction::Sqr => "sqr",
        }
    }

    /// NOTE: `log` est le logarithme naturel, comme `ln`.
    /// `sqr` = carré (x²), à ne pas confondre avec `sqrt`.
    pub fn appliquer(self, v: f64) -> f64 {
        match self {
            Fonction::Cos => v.cos(),
            Fonction::Sin => v.sin(),
            Fonction::Tan => v.tan(),
            Fonction::Sqrt => v.sqrt(),
            Fonction::Ln | Fonction::Log => v.ln(),
            Fonction::Abs => v.abs(),
            Fonction::Sqr => v.powi(2),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Genre {
    Nombre,
    ParOuvrante,
    ParFermante,
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    Fonction(Fonction),
}

impl Genre {
    /// 0 : nombres/parenthèses ; 1 : + - ; 2 : * / ; 3 : ^ ; 4 : fonctions.
    pub fn priorite(self) -> u8 {
        match self {
            Genre::Nombre | Genre::ParOuvrante | Genre::ParFermante => 0,
            Genre::Plus | Genre::Moins => 1,
            Genre::Fois | Genre::Divise => 2,
            Genre::Puissance => 3,
            Genre::Fonction(_) => 4,
        }
    }
}

/// Lexème : valeur (nombres seulement), priorité, genre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lexeme {
    pub valeur: f64,
    pub priorite: u8,
    pub genre: Genre,
}

impl Lexeme {
    pub fn nombre(valeur: f64) -> Self {
        Self {
            valeur,
            priorite: 0,
            genre: Genre::Nombre,
        }
    }

    pub fn de_genre(genre: Genre) -> Self {
        Self {
            valeur: 0.0,
            priorite: genre.priorite(),
            genre,
        }
    }
}

/// Tokenize un texte DÉJÀ validé.
///
/// Signe unaire : en tout début de texte, ou juste après une '(' suivie d’un signe,
/// on émet un `0` implicite avant le `+`/`-` : "-x" devient "0 - x".
pub fn tokenize(texte: &Texte) -> Result<Vec<Lexeme>, ErreurCalcul> {
    let mut out = Vec::new();
    let mut cur = texte.curseur();

    // premier caractère = signe => unaire
    let mut signe_unaire = matches!(cur.courant(), Some('+' | '-'));

    while let Some(c) = cur.courant() {
        match c {
            '0'..='9' => out.push(lire_nombre(&mut cur)?),

            '+' | '-' => {
                if signe_unaire {
                    out.push(Lexeme::nombre(0.0));
                    signe_unaire = false;
                }
                let g = if c == '+' { Genre::Plus } else { Genre::Moins };
                out.push(Lexeme::de_genre(g));
                cur.avancer();
            }
            '*' => {
                out.push(Lexeme::de_genre(Genre::Fois));
                cur.avancer();
            }
            '/' => {
                out.push(Lexeme::de_genre(Genre::Divise));
                cur.avancer();
            }
            '^' => {
                out.push(Lexeme::de_genre(Genre::Puissance));
                cur.avancer();
            }

            '(' => {
                out.push(Lexeme::de_genre(Genre::ParOuvrante));
                if matches!(cur.suivant(), Some('+' | '-')) {
                    signe_unaire = true;
                }
                cur.avancer();
            }
            ')' => {
                out.push(Lexeme::de_genre(Genre::ParFermante));
                cur.avancer();
            }

            _ => {
                let Some(f) = cur.nom_fonction() else {
                    return Err(ErreurCalcul::Incorrecte {
                        detail: "caractère inattendu au découpage",
                    });
                };
                out.push(Lexeme::de_genre(Genre::Fonction(f)));
                cur.avancer_de(f.nom().len());
            }
        }
    }

    trace!(n = out.len(), "jetons produits");
    Ok(out)
}

/// Mantisse + exposant optionnel, lus comme un seul f64.
fn lire_nombre(cur: &mut Curseur<'_>) -> Result<Lexeme, ErreurCalcul> {
    let debut = cur.pos();

    while cur.courant_est_chiffre() || cur.courant_est('.') {
        cur.avancer();
    }
    if cur.courant_est_exposant() {
        cur.avancer();
        cur.est_signe();
        cur.lire_chiffres();
    }

    let brut = cur.texte().tranche(debut, cur.pos());
    let valeur = brut.parse::<f64>().map_err(|_| ErreurCalcul::Incorrecte {
        detail: "nombre illisible",
    })?;
    Ok(Lexeme::nombre(valeur))
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Lexeme]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t.genre {
            Genre::Nombre => format!("{}", t.valeur),
            Genre::Fonction(f) => f.nom().to_string(),

            Genre::Plus => "+".to_string(),
            Genre::Moins => "-".to_string(),
            Genre::Fois => "*".to_string(),
            Genre::Divise => "/".to_string(),
            Genre::Puissance => "^".to_string(),

            Genre::ParOuvrante => "(".to_string(),
            Genre::ParFermante => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
