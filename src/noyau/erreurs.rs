// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du noyau.
// Chaque genre reste distinct jusqu’à l’appelant (pas de “downgrade” silencieux).

use thiserror::Error;

/// Erreur de syntaxe : jetons mal formés, parenthèses, opérateur orphelin,
/// limites de taille (longueur / imbrication).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{message}{}", .position.map(|p| format!(" (position {p})")).unwrap_or_default())]
pub struct SyntaxError {
    pub message: String,
    /// Position (en caractères) du jeton fautif, si connue.
    pub position: Option<usize>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    pub fn at(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position: Some(position),
        }
    }
}

/// Échecs arithmétiques : division par zéro, garde-fou puissance, domaine, arité.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ArithError {
    #[error("division par zéro")]
    DivisionByZero,

    #[error("exposant trop grand")]
    ExponentTooLarge,

    #[error("{fonction} : domaine invalide ({cause})")]
    Domain {
        fonction: &'static str,
        cause: &'static str,
    },

    #[error("{fonction} : attend {attendu} argument(s), reçu {recu}")]
    Arity {
        fonction: &'static str,
        attendu: &'static str,
        recu: usize,
    },

    #[error("résultat complexe (base négative, exposant non entier)")]
    ComplexResult,

    #[error("dépassement de capacité")]
    Overflow,
}

/// Erreur publique de `evaluate`.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum EvalError {
    #[error("syntaxe invalide : {0}")]
    Syntax(#[from] SyntaxError),

    #[error("noeud interdit : {0}")]
    DisallowedNode(&'static str),

    #[error("identifiant inconnu : {0}")]
    UnknownIdentifier(String),

    #[error("fonction non autorisée : {0}")]
    FunctionNotAllowed(String),

    #[error("erreur arithmétique : {0}")]
    Arithmetic(#[from] ArithError),
}
