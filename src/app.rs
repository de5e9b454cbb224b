// src/app.rs
//
// Calculatrice Aurore — module App (racine)
// -----------------------------------------
// Rôle:
// - Déclarer les sous-modules (config.rs + etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)

pub mod config;
pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Clavier avant le dessin : l’écran reflète la frame courante.
        self.gerer_clavier(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::central_panel(&ctx.style()).inner_margin(egui::Margin::same(22)),
            )
            .show(ctx, |ui| {
                self.ui(ui);
            });
    }
}
