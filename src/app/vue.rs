// src/app/vue.rs
//
// Vue (UI egui), natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Erreur de syntaxe : le curseur de l’entrée est placé à la position signalée
// - Tactile : gros boutons, focus redonné après clic (focus_entree)

use eframe::egui;
use tracing::debug;

use calculatrice_rpn::noyau::format::format_g;
use calculatrice_rpn::noyau::{eval_expression, valeur_et_message};

use super::etat::{AppCalc, Demarche, PRECISION_MAX, PRECISION_MIN};

/// Motifs retirés d’un coup par DEL.
const MOTIFS_FONCTIONS: [&str; 8] = [
    "sqrt(", "sqr(", "sin(", "cos(", "tan(", "log(", "abs(", "ln(",
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice RPN");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Expression :");

        let mut sortie = egui::TextEdit::singleline(&mut self.entree)
            .desired_width(ui.available_width())
            .hint_text("Ex: sqrt(abs(-9)), (2+3)*4, 1.5e-3*ln(10)")
            .id_salt("entree_edit")
            .code_editor()
            .show(ui);

        // Erreur positionnée : on déplace le curseur (borné à la longueur de l’entrée)
        if let Some(pos) = self.curseur_demande.take() {
            let pos = pos.min(self.entree.chars().count());
            let ccursor = egui::text::CCursor::new(pos);
            sortie
                .state
                .cursor
                .set_char_range(Some(egui::text::CCursorRange::one(ccursor)));
            sortie.state.store(ui.ctx(), sortie.response.id);
            self.focus_entree = true;
        }

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            sortie.response.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        // Un champ singleline perd le focus sur Enter : on teste lost_focus().
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if sortie.response.lost_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        // Actions + précision
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + statut + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("Précision :");
            let mut p = self.precision;
            let resp = ui.add(
                egui::DragValue::new(&mut p)
                    .speed(1)
                    .range(PRECISION_MIN..=PRECISION_MAX)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_precision(p);
            }
        });

        ui.add_space(8.0);

        // Touches rapides + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            for motif in MOTIFS_FONCTIONS {
                let nom = motif.trim_end_matches('(');
                self.bouton_insert(ui, nom, motif, InsertKind::Func);
            }

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_rpn")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "e", "e", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d’un coup un nom de fonction complet ("sqrt(", "ln(", ...).
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // Retire tokens connus
        for pat in MOTIFS_FONCTIONS {
            if self.entree.ends_with(pat) {
                let garde = self.entree.len() - pat.len();
                self.entree.truncate(garde);
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                return;
            }
        }

        // Sinon : un caractère
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);

        ui.add_space(6.0);

        ui.label("Statut :");
        if self.en_erreur {
            ui.colored_label(ui.visuals().error_fg_color, &self.statut);
        } else {
            ui.monospace(&self.statut);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::OpenParen | InsertKind::Func => {
                // les espaces sont ignorés par le noyau : purement visuel
                if let Some(c) = self.entree.chars().rev().find(|c| !c.is_whitespace()) {
                    if matches!(c, '+' | '-' | '*' | '/' | '^') {
                        self.entree.push(' ');
                    }
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() && !self.entree.ends_with('(') {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Digit => {
                // chiffres: pas d’espaces auto
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Évalue l’expression via le noyau, puis dépose résultat/statut/démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        debug!(entree = %self.entree, "évaluation demandée");

        let r = eval_expression(&self.entree);
        let (valeur, msg) = valeur_et_message(&r);
        let affiche = format_g(valeur, self.precision);

        match r {
            Ok((_, d_noyau)) => {
                let d_ui = Demarche {
                    jetons: d_noyau.jetons,
                    rpn: d_noyau.rpn,
                };
                self.set_resultat(affiche, msg, d_ui);
            }
            Err(_) => self.set_erreur(affiche, msg),
        }
        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
