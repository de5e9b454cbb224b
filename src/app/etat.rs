//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’écran de la calculatrice (affichage + aperçu) et les actions
//! des touches (AC, ±, %, ⌫, =) sans logique de dessin.
//!
//! Contrats :
//! - Toute évaluation passe par le noyau (`evaluate_avec`) : aucune arithmétique ici.
//! - L’affichage garde les glyphes ×, ÷, − ; le noyau les assainit lui-même.
//! - Le bouton ^ insère `**` (seul opérateur de puissance de la grammaire).

use tracing::debug;

use super::config::{AppConfig, Theme};
use crate::noyau::{evaluate_avec, format_resultat, EvalError, Politique};

/// Écran au démarrage / après AC.
pub const AFFICHAGE_INITIAL: &str = "0";

/// Indicateur d’échec générique (l’UI ne distingue pas les genres d’erreur).
pub const MESSAGE_ERREUR: &str = "Erreur";

/// Opérateurs soumis au garde-fou “pas deux opérateurs de suite”.
const OPERATEURS: [&str; 5] = ["+", "−", "×", "÷", "**"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Chiffre,
    Op,
    Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Touche {
    pub libelle: &'static str,
    pub valeur: &'static str,
    pub role: Role,
}

const fn touche(libelle: &'static str, valeur: &'static str, role: Role) -> Touche {
    Touche {
        libelle,
        valeur,
        role,
    }
}

/// Grille principale, 4 colonnes.
pub const TOUCHES: [Touche; 20] = [
    touche("AC", "AC", Role::Action),
    touche("±", "NEG", Role::Action),
    touche("%", "%", Role::Op),
    touche("÷", "÷", Role::Op),
    //
    touche("7", "7", Role::Chiffre),
    touche("8", "8", Role::Chiffre),
    touche("9", "9", Role::Chiffre),
    touche("×", "×", Role::Op),
    //
    touche("4", "4", Role::Chiffre),
    touche("5", "5", Role::Chiffre),
    touche("6", "6", Role::Chiffre),
    touche("−", "−", Role::Op),
    //
    touche("1", "1", Role::Chiffre),
    touche("2", "2", Role::Chiffre),
    touche("3", "3", Role::Chiffre),
    touche("+", "+", Role::Op),
    //
    touche("(", "(", Role::Op),
    touche("0", "0", Role::Chiffre),
    touche(")", ")", Role::Op),
    touche("=", "=", Role::Action),
];

impl Touche {
    /// Touches mises en avant (couleur d’accent).
    pub fn est_accent(&self) -> bool {
        matches!(self.valeur, "=" | "+" | "−" | "×" | "÷")
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- écran ---
    pub affichage: String,
    pub apercu: String,

    // --- paramètres (config) ---
    pub decimales: usize,
    pub politique: Politique,
    pub theme: Theme,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_config(&AppConfig::default())
    }
}

impl AppCalc {
    pub fn avec_config(config: &AppConfig) -> Self {
        Self {
            affichage: AFFICHAGE_INITIAL.to_string(),
            apercu: String::new(),
            decimales: config.affichage.decimales,
            politique: config.politique,
            theme: config.affichage.theme,
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Dispatch d’une touche de la grille.
    pub fn on_touche(&mut self, t: &Touche) {
        match t.valeur {
            "AC" => self.clear(),
            "NEG" => self.toggle_negate(),
            "=" => self.egal(),
            "%" => self.pourcent(),
            v => self.append_token(v),
        }
    }

    /// Clavier : * / - deviennent leurs glyphes ; le reste hors liste est ignoré.
    pub fn key_input(&mut self, key: char) {
        let token = match key {
            '*' => "×".to_string(),
            '/' => "÷".to_string(),
            '-' => "−".to_string(),
            '0'..='9' | '+' | '(' | ')' | '.' => key.to_string(),
            _ => return,
        };
        self.append_token(&token);
    }

    pub fn append_token(&mut self, token: &str) {
        if self.affichage == AFFICHAGE_INITIAL && !matches!(token, "." | "(" | ")") {
            self.affichage.clear();
        }

        // Pas deux opérateurs de suite : on retire le dernier caractère
        if OPERATEURS.contains(&token) && OPERATEURS.iter().any(|op| self.affichage.ends_with(op)) {
            self.affichage.pop();
        }

        self.affichage.push_str(token);
        self.update_preview();
    }

    /// ⌫ : un caractère ; revient à "0" s’il n’en reste qu’un.
    pub fn backspace(&mut self) {
        if self.affichage.chars().count() > 1 {
            self.affichage.pop();
        } else {
            self.affichage = AFFICHAGE_INITIAL.to_string();
        }
        self.update_preview();
    }

    /// AC : remise à zéro totale.
    pub fn clear(&mut self) {
        self.affichage = AFFICHAGE_INITIAL.to_string();
        self.apercu.clear();
    }

    /// ± : ajoute / retire un − en tête.
    pub fn toggle_negate(&mut self) {
        if let Some(reste) = self.affichage.strip_prefix('−') {
            self.affichage = reste.to_string();
        } else if self.affichage != AFFICHAGE_INITIAL {
            self.affichage.insert(0, '−');
        }
        self.update_preview();
    }

    /// % : pourcentage de l’écran (glue UI : "expr/100" soumis au noyau).
    pub fn pourcent(&mut self) {
        let expr = format!("{}/100", self.affichage.replace('%', ""));
        self.remplacer_par_resultat(&expr);
    }

    /// = : évalue l’écran.
    pub fn egal(&mut self) {
        let expr = self.affichage.clone();
        self.remplacer_par_resultat(&expr);
    }

    /* ------------------------ Noyau ------------------------ */

    fn evaluer(&self, expr: &str) -> Result<String, EvalError> {
        evaluate_avec(expr, &self.politique).map(|v| format_resultat(v, self.decimales))
    }

    fn remplacer_par_resultat(&mut self, expr: &str) {
        match self.evaluer(expr) {
            Ok(texte) => {
                self.affichage = texte;
                self.apercu.clear();
            }
            Err(e) => {
                debug!(expr, erreur = %e, "évaluation échouée");
                self.apercu = MESSAGE_ERREUR.to_string();
            }
        }
    }

    /// Aperçu en direct : résultat si l’écran s’évalue, sinon vide.
    fn update_preview(&mut self) {
        self.apercu = self.evaluer(&self.affichage).unwrap_or_default();
    }
}
