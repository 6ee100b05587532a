//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, statut, précision, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici : du noyau, seule la lecture de position dans un message.
//! - Actions déterministes, sans effet de bord caché.
//! - Précision d’affichage bornée.

use calculatrice_rpn::noyau::erreur::position_dans_message;

/// Chiffres significatifs affichés par défaut.
const PRECISION_DEFAUT: usize = 15;

/// Bornes de la précision (au-delà de 17, un f64 n’a plus rien à dire).
pub const PRECISION_MIN: usize = 1;
pub const PRECISION_MAX: usize = 17;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // valeur formatée ("nan" en cas d’échec)
    pub statut: String,   // message du noyau (succès / erreur avec position)
    pub en_erreur: bool,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub precision: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
    // Position (en caractères) où placer le curseur de l’entrée à la prochaine frame.
    pub curseur_demande: Option<usize>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            statut: String::new(),
            en_erreur: false,
            demarche: Demarche::default(),
            precision: PRECISION_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
            curseur_demande: None,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + précision par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.precision = PRECISION_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.curseur_demande = None;
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + statut + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.statut.clear();
        self.en_erreur = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Échec : résultat "nan", statut = message du noyau, curseur vers la position signalée.
    ///
    /// Comme la fenêtre d’origine : la position est la PREMIÈRE suite de chiffres du message.
    pub fn set_erreur(&mut self, resultat: impl Into<String>, msg: impl Into<String>) {
        self.statut = msg.into();
        self.resultat = resultat.into();
        self.en_erreur = true;

        // démarche non fiable si l’évaluation échoue
        self.demarche = Demarche::default();

        self.curseur_demande = position_dans_message(&self.statut);
        self.focus_entree = true;
    }

    /// Succès : valeur formatée + statut + démarche.
    pub fn set_resultat(
        &mut self,
        resultat: impl Into<String>,
        statut: impl Into<String>,
        demarche: Demarche,
    ) {
        self.resultat = resultat.into();
        self.statut = statut.into();
        self.en_erreur = false;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision.clamp(PRECISION_MIN, PRECISION_MAX);
        self.focus_entree = true;
    }
}
