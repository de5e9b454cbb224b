// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Écran (affichage + aperçu) au-dessus d’une grille 4 colonnes
// - Rangée utilitaire : ⌫ . ^ (^ insère **)
// - Clavier : chiffres/opérateurs, Enter évalue, Backspace efface, Escape remet à zéro
// - Thème sombre par défaut (fond #0f1226, texte #e6f1ff, accent violet/bleu)
//
// Note :
// - Le clavier passe par Event::Text : pas de TextEdit, donc pas de focus à gérer.

use eframe::egui;
use egui::{Color32, CornerRadius, RichText};

use super::config::Theme;
use super::etat::{AppCalc, Role, Touche, TOUCHES};

struct Palette {
    fond: Color32,
    ecran: Color32,
    texte: Color32,
    apercu: Color32,
    chiffre: Color32,
    op: Color32,
    accent: Color32,
    texte_accent: Color32,
}

const SOMBRE: Palette = Palette {
    fond: Color32::from_rgb(0x0f, 0x12, 0x26),
    ecran: Color32::from_rgb(0x16, 0x1a, 0x36),
    texte: Color32::from_rgb(0xe6, 0xf1, 0xff),
    apercu: Color32::from_rgb(0x8f, 0x9b, 0xc4),
    chiffre: Color32::from_rgb(0x1e, 0x23, 0x45),
    op: Color32::from_rgb(0x2a, 0x2f, 0x5a),
    accent: Color32::from_rgb(0x6d, 0x3a, 0xff),
    texte_accent: Color32::WHITE,
};

const CLAIR: Palette = Palette {
    fond: Color32::from_rgb(0xf2, 0xf4, 0xfb),
    ecran: Color32::WHITE,
    texte: Color32::from_rgb(0x12, 0x16, 0x2e),
    apercu: Color32::from_rgb(0x5a, 0x63, 0x85),
    chiffre: Color32::from_rgb(0xe3, 0xe7, 0xf5),
    op: Color32::from_rgb(0xd2, 0xd8, 0xf0),
    accent: Color32::from_rgb(0x3a, 0x65, 0xff),
    texte_accent: Color32::WHITE,
};

fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Sombre => &SOMBRE,
        Theme::Clair => &CLAIR,
    }
}

const TAILLE_TOUCHE: [f32; 2] = [84.0, 64.0];
const ESPACEMENT: f32 = 14.0;

impl AppCalc {
    /// À appeler une fois (création) : visuals selon le thème configuré.
    pub fn appliquer_theme(&self, ctx: &egui::Context) {
        let p = palette(self.theme);
        let mut visuals = match self.theme {
            Theme::Sombre => egui::Visuals::dark(),
            Theme::Clair => egui::Visuals::light(),
        };
        visuals.panel_fill = p.fond;
        visuals.window_fill = p.fond;
        visuals.override_text_color = Some(p.texte);
        ctx.set_visuals(visuals);
    }

    /// Clavier global (natif + web).
    pub fn gerer_clavier(&mut self, ctx: &egui::Context) {
        let (texte, entree, retour, echap) = ctx.input(|i| {
            let texte: String = i
                .events
                .iter()
                .filter_map(|ev| match ev {
                    egui::Event::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect();
            (
                texte,
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Backspace),
                i.key_pressed(egui::Key::Escape),
            )
        });

        for c in texte.chars() {
            self.key_input(c);
        }
        if retour {
            self.backspace();
        }
        if echap {
            self.clear();
        }
        if entree {
            self.egal();
        }
    }

    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let p = palette(self.theme);
        ui.spacing_mut().item_spacing = egui::vec2(ESPACEMENT, ESPACEMENT);

        self.ui_ecran(ui, p);
        ui.add_space(4.0);

        if let Some(t) = ui_grille(ui, p) {
            self.on_touche(&t);
        }

        ui.add_space(4.0);
        self.ui_utilitaires(ui, p);
    }

    fn ui_ecran(&self, ui: &mut egui::Ui, p: &Palette) {
        egui::Frame::group(ui.style())
            .fill(p.ecran)
            .corner_radius(CornerRadius::same(14))
            .inner_margin(egui::Margin::symmetric(16, 12))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);

                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.add(
                        egui::Label::new(
                            RichText::new(&self.affichage)
                                .size(34.0)
                                .monospace()
                                .color(p.texte),
                        )
                        .truncate(),
                    );
                    // hauteur stable même sans aperçu
                    let apercu = if self.apercu.is_empty() { " " } else { self.apercu.as_str() };
                    ui.label(RichText::new(apercu).size(16.0).monospace().color(p.apercu));
                });
            });
    }

    fn ui_utilitaires(&mut self, ui: &mut egui::Ui, p: &Palette) {
        let largeur = (ui.available_width() - 2.0 * ESPACEMENT) / 3.0;
        ui.horizontal(|ui| {
            if bouton(ui, "⌫", [largeur, 48.0], p.op, p.texte).clicked() {
                self.backspace();
            }
            if bouton(ui, ".", [largeur, 48.0], p.op, p.texte).clicked() {
                self.append_token(".");
            }
            if bouton(ui, "^", [largeur, 48.0], p.op, p.texte)
                .on_hover_text("Puissance (**)")
                .clicked()
            {
                self.append_token("**");
            }
        });
    }
}

/// Grille 5×4 ; renvoie la touche cliquée (au plus une par frame).
fn ui_grille(ui: &mut egui::Ui, p: &Palette) -> Option<Touche> {
    let mut clic = None;
    egui::Grid::new("grille_touches_aurore")
        .num_columns(4)
        .spacing([ESPACEMENT, ESPACEMENT])
        .show(ui, |ui| {
            for (i, t) in TOUCHES.iter().enumerate() {
                let (fond, texte) = if t.est_accent() {
                    (p.accent, p.texte_accent)
                } else if t.role == Role::Chiffre {
                    (p.chiffre, p.texte)
                } else {
                    (p.op, p.texte)
                };
                if bouton(ui, t.libelle, TAILLE_TOUCHE, fond, texte).clicked() {
                    clic = Some(*t);
                }
                if i % 4 == 3 {
                    ui.end_row();
                }
            }
        });
    clic
}

fn bouton(
    ui: &mut egui::Ui,
    libelle: &str,
    taille: [f32; 2],
    fond: Color32,
    texte: Color32,
) -> egui::Response {
    ui.add_sized(
        taille,
        egui::Button::new(RichText::new(libelle).size(22.0).strong().color(texte))
            .fill(fond)
            .corner_radius(CornerRadius::same(14)),
    )
}
