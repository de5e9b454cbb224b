// src/app/config.rs
//
// Configuration TOML (optionnelle) :
//
//   [politique]
//   base_max = 1e6
//   exposant_max = 10
//   profondeur_max = 256
//   longueur_max = 4096
//
//   [affichage]
//   decimales = 10
//   theme = "sombre"   # ou "clair"
//
// Fichier absent => défauts. Fichier invalide => avertissement + défauts.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::noyau::format::{DECIMALES_DEFAUT, DECIMALES_MAX};
use crate::noyau::Politique;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Sombre,
    Clair,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Affichage {
    pub decimales: usize,
    pub theme: Theme,
}

impl Default for Affichage {
    fn default() -> Self {
        Self {
            decimales: DECIMALES_DEFAUT,
            theme: Theme::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub politique: Politique,
    pub affichage: Affichage,
}

impl AppConfig {
    pub fn depuis_toml(texte: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(texte)?;
        config.affichage.decimales = config.affichage.decimales.min(DECIMALES_MAX);
        Ok(config)
    }

    pub fn lire(chemin: &Path) -> Result<Self, ConfigError> {
        let texte = std::fs::read_to_string(chemin)?;
        Self::depuis_toml(&texte)
    }

    /// Chemin explicite, sinon chemin par défaut ; jamais d’échec.
    pub fn charger(explicite: Option<&Path>) -> Self {
        let chemin = match explicite.map(Path::to_path_buf).or_else(chemin_par_defaut) {
            Some(c) => c,
            None => return Self::default(),
        };

        if explicite.is_none() && !chemin.exists() {
            debug!(chemin = %chemin.display(), "pas de fichier de configuration");
            return Self::default();
        }

        match Self::lire(&chemin) {
            Ok(config) => {
                info!(chemin = %chemin.display(), "configuration chargée");
                config
            }
            Err(e) => {
                warn!(chemin = %chemin.display(), erreur = %e, "configuration ignorée");
                Self::default()
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn chemin_par_defaut() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aurore").join("aurore.toml"))
}

#[cfg(target_arch = "wasm32")]
pub fn chemin_par_defaut() -> Option<PathBuf> {
    None
}
