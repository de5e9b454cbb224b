// src/noyau/registre.rs
//
// Registre FERMÉ des constantes et fonctions accessibles depuis une expression.
// Tables `static` : construites à la compilation, partagées en lecture seule,
// aucune API d’ajout. Avec la grammaire fermée, c’est tout l’argument de sûreté.

use std::f64::consts;

use super::erreurs::ArithError;

/// Nombre d’arguments accepté.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arite {
    Exacte(usize),
    Entre(usize, usize),
}

impl Arite {
    pub fn accepte(self, n: usize) -> bool {
        match self {
            Arite::Exacte(k) => n == k,
            Arite::Entre(min, max) => (min..=max).contains(&n),
        }
    }

    fn libelle(self) -> &'static str {
        match self {
            Arite::Exacte(1) => "1",
            Arite::Entre(1, 2) => "1 ou 2",
            // seules arités présentes dans la table
            _ => "?",
        }
    }
}

/// Fonction pure : arguments déjà évalués -> valeur ou erreur de domaine.
pub struct Fonction {
    pub nom: &'static str,
    pub arite: Arite,
    appliquer: fn(&[f64]) -> Result<f64, ArithError>,
}

impl Fonction {
    /// Vérifie l’arité puis applique.
    pub fn appeler(&self, args: &[f64]) -> Result<f64, ArithError> {
        if !self.arite.accepte(args.len()) {
            return Err(ArithError::Arity {
                fonction: self.nom,
                attendu: self.arite.libelle(),
                recu: args.len(),
            });
        }
        (self.appliquer)(args)
    }
}

impl std::fmt::Debug for Fonction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fonction")
            .field("nom", &self.nom)
            .field("arite", &self.arite)
            .finish()
    }
}

static CONSTANTES: [(&str, f64); 2] = [("pi", consts::PI), ("e", consts::E)];

static FONCTIONS: [Fonction; 8] = [
    Fonction {
        nom: "sqrt",
        arite: Arite::Exacte(1),
        appliquer: sqrt,
    },
    Fonction {
        nom: "sin",
        arite: Arite::Exacte(1),
        appliquer: sin,
    },
    Fonction {
        nom: "cos",
        arite: Arite::Exacte(1),
        appliquer: cos,
    },
    Fonction {
        nom: "tan",
        arite: Arite::Exacte(1),
        appliquer: tan,
    },
    Fonction {
        nom: "log",
        arite: Arite::Entre(1, 2),
        appliquer: log,
    },
    Fonction {
        nom: "log10",
        arite: Arite::Exacte(1),
        appliquer: log10,
    },
    Fonction {
        nom: "abs",
        arite: Arite::Exacte(1),
        appliquer: abs,
    },
    Fonction {
        nom: "round",
        arite: Arite::Entre(1, 2),
        appliquer: round,
    },
];

/// Constante nommée, si enregistrée.
pub fn constante(nom: &str) -> Option<f64> {
    CONSTANTES.iter().find(|(n, _)| *n == nom).map(|(_, v)| *v)
}

/// Fonction nommée, si enregistrée.
pub fn fonction(nom: &str) -> Option<&'static Fonction> {
    FONCTIONS.iter().find(|f| f.nom == nom)
}

/// Tous les noms accessibles (constantes puis fonctions).
pub fn noms() -> impl Iterator<Item = &'static str> {
    CONSTANTES
        .iter()
        .map(|(n, _)| *n)
        .chain(FONCTIONS.iter().map(|f| f.nom))
}

/* ------------------------ Implémentations ------------------------ */

fn sqrt(a: &[f64]) -> Result<f64, ArithError> {
    if a[0] < 0.0 {
        return Err(ArithError::Domain {
            fonction: "sqrt",
            cause: "argument négatif",
        });
    }
    Ok(a[0].sqrt())
}

fn sin(a: &[f64]) -> Result<f64, ArithError> {
    trig("sin", a[0], f64::sin)
}

fn cos(a: &[f64]) -> Result<f64, ArithError> {
    trig("cos", a[0], f64::cos)
}

fn tan(a: &[f64]) -> Result<f64, ArithError> {
    trig("tan", a[0], f64::tan)
}

fn abs(a: &[f64]) -> Result<f64, ArithError> {
    Ok(a[0].abs())
}

fn trig(fonction: &'static str, x: f64, f: fn(f64) -> f64) -> Result<f64, ArithError> {
    // NaN traverse (NaN en sortie), seul l’infini est hors domaine
    if x.is_infinite() {
        return Err(ArithError::Domain {
            fonction,
            cause: "argument infini",
        });
    }
    Ok(f(x))
}

/// ln(x) si x > 0 (NaN passe : NaN en sortie).
fn ln_positif(fonction: &'static str, x: f64) -> Result<f64, ArithError> {
    if x <= 0.0 {
        return Err(ArithError::Domain {
            fonction,
            cause: "argument non positif",
        });
    }
    Ok(x.ln())
}

/// log(x) naturel, ou log(x, base).
fn log(a: &[f64]) -> Result<f64, ArithError> {
    let num = ln_positif("log", a[0])?;
    match a.get(1) {
        None => Ok(num),
        Some(&base) => {
            let den = ln_positif("log", base)?;
            if den == 0.0 {
                return Err(ArithError::DivisionByZero);
            }
            Ok(num / den)
        }
    }
}

fn log10(a: &[f64]) -> Result<f64, ArithError> {
    ln_positif("log10", a[0]).map(|_| a[0].log10())
}

/// round(x) : au plus proche, égalité vers le pair ; round(x, n) : à n décimales.
fn round(a: &[f64]) -> Result<f64, ArithError> {
    let x = a[0];
    match a.get(1) {
        None => {
            if x.is_nan() {
                return Err(ArithError::Domain {
                    fonction: "round",
                    cause: "NaN",
                });
            }
            if x.is_infinite() {
                return Err(ArithError::Overflow);
            }
            Ok(x.round_ties_even())
        }
        Some(&n) => {
            if !n.is_finite() || n.fract() != 0.0 {
                return Err(ArithError::Domain {
                    fonction: "round",
                    cause: "nombre de décimales non entier",
                });
            }
            if !x.is_finite() || x == 0.0 {
                return Ok(x);
            }
            // au-delà, l’échelle sort des f64
            if n > 308.0 {
                return Ok(x);
            }
            if n < -308.0 {
                return Ok(0.0f64.copysign(x));
            }
            // n < 0 : on divise par 10^-n (10^n n’est pas exact)
            let echelle = 10f64.powi(n.abs() as i32);
            if n >= 0.0 {
                let y = x * echelle;
                if y.is_infinite() {
                    return Ok(x);
                }
                Ok(y.round_ties_even() / echelle)
            } else {
                Ok((x / echelle).round_ties_even() * echelle)
            }
        }
    }
}
