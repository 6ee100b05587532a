//! Fenêtre de la calculatrice : état (`etat`) + vue egui (`vue`).

pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Échap : comme "C", l’entrée seulement
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| self.ui(ui));
    }
}
