// src/noyau/politique.rs
//
// Garde-fous anti-DoS du noyau.
//
// Les seuils de puissance (1e6, 10) sont des heuristiques : aucune nécessité
// mathématique, seulement une borne sur le coût de `**`. Ils restent réglables
// via `Politique` (et le fichier de config côté app).

use serde::Deserialize;

/// |base| maximale acceptée par `**`.
pub const BASE_MAX: f64 = 1e6;

/// |exposant| maximal accepté par `**`.
pub const EXPOSANT_MAX: f64 = 10.0;

/// Profondeur maximale de l’arbre (récursion de l’évaluateur).
pub const PROFONDEUR_MAX: usize = 256;

/// Longueur maximale de l’entrée, en caractères.
pub const LONGUEUR_MAX: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Politique {
    pub base_max: f64,
    pub exposant_max: f64,
    pub profondeur_max: usize,
    pub longueur_max: usize,
}

impl Default for Politique {
    fn default() -> Self {
        Self {
            base_max: BASE_MAX,
            exposant_max: EXPOSANT_MAX,
            profondeur_max: PROFONDEUR_MAX,
            longueur_max: LONGUEUR_MAX,
        }
    }
}

impl Politique {
    /// Vrai si `base ** exposant` dépasse le garde-fou.
    pub fn puissance_refusee(&self, base: f64, exposant: f64) -> bool {
        base.abs() > self.base_max || exposant.abs() > self.exposant_max
    }
}
