// src/noyau/validation.rs
//
// Validation (grammaire) avant tout calcul
// ----------------------------------------
// Ordre (le premier diagnostic gagne) :
// 1) texte vide
// 2) "^-" (puissance négative sans parenthèses)
// 3) "()" + équilibre des parenthèses
// 4) automate signe / opérande / opérateur, pile de portées pour le corps des fonctions
//
// Positions : 0-based, dans la saisie brute (voir Texte::origine).

use tracing::trace;

use super::curseur::{Curseur, Texte};
use super::erreur::ErreurSyntaxe;

/// Valide le texte complet.
pub fn valider(texte: &Texte) -> Result<(), ErreurSyntaxe> {
    if texte.is_empty() {
        return Err(ErreurSyntaxe::Vide);
    }

    verifier_puissance_negative(texte)?;
    verifier_parentheses(texte)?;

    let mut cur = texte.curseur();
    verifier_ordre(&mut cur)?;

    trace!(texte = %texte.tranche(0, texte.len()), "validation ok");
    Ok(())
}

fn verifier_puissance_negative(texte: &Texte) -> Result<(), ErreurSyntaxe> {
    for i in 0..texte.len() {
        if texte.get(i) == Some('^') && texte.get(i + 1) == Some('-') {
            return Err(ErreurSyntaxe::PuissanceNegative {
                position: texte.origine(i + 1),
            });
        }
    }
    Ok(())
}

/// "()" interdit ; le compteur ne doit jamais passer sous zéro et doit finir à zéro.
fn verifier_parentheses(texte: &Texte) -> Result<(), ErreurSyntaxe> {
    // positions des '(' encore ouvertes
    let mut ouvertes: Vec<usize> = Vec::new();

    for i in 0..texte.len() {
        match texte.get(i) {
            Some('(') if texte.get(i + 1) == Some(')') => {
                return Err(ErreurSyntaxe::ArgumentManquant {
                    ouvrante: texte.origine(i),
                    fermante: texte.origine(i + 1),
                });
            }
            Some('(') => ouvertes.push(i),
            Some(')') => {
                if ouvertes.pop().is_none() {
                    return Err(ErreurSyntaxe::FermanteOrpheline {
                        position: texte.origine(i),
                    });
                }
            }
            _ => {}
        }
    }

    match ouvertes.pop() {
        Some(i) => Err(ErreurSyntaxe::OuvranteNonFermee {
            position: texte.origine(i),
        }),
        None => Ok(()),
    }
}

/// État des portes d’une portée (texte entier ou corps de fonction).
#[derive(Clone, Copy, Debug)]
struct Portee {
    signe_permis: bool,
    operande_permis: bool,
    operateur_permis: bool,
    // parenthèses ouvertes dans le corps d’une fonction, celle du nom comprise
    profondeur: usize,
}

impl Portee {
    fn ouverte() -> Self {
        Self {
            signe_permis: true,
            operande_permis: true,
            operateur_permis: false,
            profondeur: 1,
        }
    }

    fn apres_signe(&mut self) {
        self.signe_permis = false;
        self.operande_permis = true;
        self.operateur_permis = false;
    }

    fn apres_operande(&mut self) {
        self.signe_permis = false;
        self.operande_permis = false;
        self.operateur_permis = true;
    }

    fn apres_operateur(&mut self) {
        self.signe_permis = false;
        self.operande_permis = true;
        self.operateur_permis = false;
    }
}

/// Automate principal, itératif.
///
/// Chaque `nom(` empile la portée appelante et ouvre celle du corps ;
/// la ')' qui ramène la profondeur du corps à zéro la dépile, et la fonction
/// entière compte alors comme un opérande pour l’appelante.
fn verifier_ordre(cur: &mut Curseur<'_>) -> Result<(), ErreurSyntaxe> {
    let mut appelantes: Vec<Portee> = Vec::new();
    let mut p = Portee::ouverte();

    while let Some(c) = cur.courant() {
        match c {
            '(' => {
                if !p.operande_permis {
                    return Err(inattendu(cur));
                }
                p.signe_permis = true;
                if !appelantes.is_empty() {
                    p.profondeur += 1;
                }
                cur.avancer();
            }
            ')' => {
                // un opérande doit venir d’être complété
                if !p.operateur_permis {
                    return Err(inattendu(cur));
                }
                if !appelantes.is_empty() {
                    p.profondeur -= 1;
                    if p.profondeur == 0 {
                        if let Some(appelante) = appelantes.pop() {
                            p = appelante;
                            p.apres_operande();
                        }
                    }
                }
                cur.avancer();
            }
            _ if p.signe_permis && cur.est_signe() => p.apres_signe(),
            _ if p.operande_permis && est_nombre(cur)? => p.apres_operande(),
            _ if p.operande_permis && entre_dans_fonction(cur)? => {
                appelantes.push(p);
                p = Portee::ouverte();
            }
            _ if p.operateur_permis && cur.est_operateur() => p.apres_operateur(),
            _ => return Err(inattendu(cur)),
        }
    }

    if !p.operateur_permis {
        return Err(ErreurSyntaxe::FinInattendue {
            position: cur.origine(),
        });
    }
    // corps de fonction jamais refermé
    if !appelantes.is_empty() {
        return Err(inattendu(cur));
    }
    Ok(())
}

fn inattendu(cur: &Curseur<'_>) -> ErreurSyntaxe {
    ErreurSyntaxe::SymboleInattendu {
        position: cur.origine(),
    }
}

/// Littéral numérique : chiffres, au plus un '.', puis exposant optionnel.
/// Ok(false) si le curseur n’est pas sur un chiffre (rien consommé).
fn est_nombre(cur: &mut Curseur<'_>) -> Result<bool, ErreurSyntaxe> {
    if !cur.courant_est_chiffre() {
        return Ok(false);
    }

    let mut point_vu = false;
    loop {
        cur.lire_chiffres();
        if !cur.courant_est('.') {
            break;
        }
        let suivant_chiffre = cur.suivant().is_some_and(|c| c.is_ascii_digit());
        if point_vu || !suivant_chiffre {
            return Err(ErreurSyntaxe::PointInvalide {
                position: cur.origine(),
            });
        }
        point_vu = true;
        cur.avancer();
    }

    verifier_exposant(cur)?;
    Ok(true)
}

/// `e`/`E`, signe optionnel, puis au moins un chiffre.
fn verifier_exposant(cur: &mut Curseur<'_>) -> Result<(), ErreurSyntaxe> {
    if !cur.courant_est_exposant() {
        return Ok(());
    }

    let marqueur = cur.origine();
    cur.avancer();
    cur.est_signe();

    if cur.lire_chiffres() == 0 {
        return Err(ErreurSyntaxe::ExposantInvalide { position: marqueur });
    }
    Ok(())
}

/// Nom de fonction suivi de "(" : consomme les deux.
/// Ok(false) si aucun nom connu (rien consommé).
fn entre_dans_fonction(cur: &mut Curseur<'_>) -> Result<bool, ErreurSyntaxe> {
    let Some(f) = cur.nom_fonction() else {
        return Ok(false);
    };
    cur.avancer_de(f.nom().len());

    if !cur.courant_est('(') {
        return Err(ErreurSyntaxe::FonctionSansParenthese {
            nom: f.nom(),
            position: cur.origine(),
        });
    }
    cur.avancer();
    trace!(fonction = f.nom(), "corps de fonction");
    Ok(true)
}
