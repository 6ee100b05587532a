// src/noyau/curseur.rs
//
// Texte d’entrée + curseur borné
// ------------------------------
// - Texte   : saisie sans espaces, immuable pendant une évaluation.
//             Garde pour chaque caractère sa position dans la saisie brute
//             (les messages d’erreur pointent vers ce que l’utilisateur a tapé).
// - Curseur : seul état mutable du scan. Ne dépasse jamais la longueur du texte;
//             lire à la fin renvoie None (jamais de lecture hors bornes).
//
// Les primitives `est_*` avancent au-delà d’une construction complète,
// ou laissent le curseur inchangé.

use super::jetons::Fonction;

/// Saisie nettoyée (espaces retirés) + table des positions d’origine.
#[derive(Clone, Debug, Default)]
pub struct Texte {
    car: Vec<char>,
    origine: Vec<usize>,
    longueur_source: usize,
}

impl Texte {
    /// Retire les blancs et mémorise la position (en caractères) de chaque caractère gardé.
    pub fn depuis_saisie(saisie: &str) -> Self {
        let mut car = Vec::with_capacity(saisie.len());
        let mut origine = Vec::with_capacity(saisie.len());
        let mut longueur_source = 0;

        for (i, c) in saisie.chars().enumerate() {
            longueur_source = i + 1;
            if c.is_whitespace() {
                continue;
            }
            car.push(c);
            origine.push(i);
        }

        Self {
            car,
            origine,
            longueur_source,
        }
    }

    pub fn len(&self) -> usize {
        self.car.len()
    }

    pub fn is_empty(&self) -> bool {
        self.car.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<char> {
        self.car.get(i).copied()
    }

    /// Position dans la saisie brute. Au-delà de la fin : longueur de la saisie.
    pub fn origine(&self, i: usize) -> usize {
        self.origine
            .get(i)
            .copied()
            .unwrap_or(self.longueur_source)
    }

    /// Tranche [debut, fin) en String (bornée au texte).
    pub fn tranche(&self, debut: usize, fin: usize) -> String {
        let fin = fin.min(self.car.len());
        let debut = debut.min(fin);
        self.car[debut..fin].iter().collect()
    }

    pub fn curseur(&self) -> Curseur<'_> {
        Curseur {
            texte: self,
            pos: 0,
        }
    }
}

/// Curseur de scan sur un `Texte`.
#[derive(Clone, Copy, Debug)]
pub struct Curseur<'a> {
    texte: &'a Texte,
    pos: usize,
}

impl<'a> Curseur<'a> {
    pub fn texte(&self) -> &'a Texte {
        self.texte
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Position du curseur dans la saisie brute.
    pub fn origine(&self) -> usize {
        self.texte.origine(self.pos)
    }

    pub fn courant(&self) -> Option<char> {
        self.texte.get(self.pos)
    }

    pub fn suivant(&self) -> Option<char> {
        self.texte.get(self.pos + 1)
    }

    pub fn avancer(&mut self) {
        self.avancer_de(1);
    }

    pub fn avancer_de(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.texte.len());
    }

    pub fn courant_est(&self, c: char) -> bool {
        self.courant() == Some(c)
    }

    pub fn courant_est_chiffre(&self) -> bool {
        self.courant().is_some_and(|c| c.is_ascii_digit())
    }

    /// `+` ou `-` : consomme.
    pub fn est_signe(&mut self) -> bool {
        if matches!(self.courant(), Some('+' | '-')) {
            self.avancer();
            return true;
        }
        false
    }

    /// Opérateur binaire (`+ - * / ^`) : consomme.
    pub fn est_operateur(&mut self) -> bool {
        if self.est_signe() {
            return true;
        }
        if matches!(self.courant(), Some('*' | '/' | '^')) {
            self.avancer();
            return true;
        }
        false
    }

    /// Avance sur une suite de chiffres, renvoie combien ont été lus.
    pub fn lire_chiffres(&mut self) -> usize {
        let debut = self.pos;
        while self.courant_est_chiffre() {
            self.avancer();
        }
        self.pos - debut
    }

    /// Marqueur d’exposant (`e` / `E`) sous le curseur ?
    pub fn courant_est_exposant(&self) -> bool {
        matches!(self.courant(), Some('e' | 'E'))
    }

    /// Nom de fonction connu à la position courante (sans avancer).
    /// `sqrt` est testé avant `sqr`.
    pub fn nom_fonction(&self) -> Option<Fonction> {
        Fonction::TOUTES
            .iter()
            .copied()
            .find(|f| self.commence_par(f.nom()))
    }

    pub fn commence_par(&self, motif: &str) -> bool {
        motif
            .chars()
            .enumerate()
            .all(|(k, c)| self.texte.get(self.pos + k) == Some(c))
    }
}
