//! Noyau — évaluation (pipeline réel)
//!
//! sanitize -> tokenize -> RPN -> Expr -> (validation + évaluation récursive) -> f64
//!
//! La validation des genres de noeuds est faite PENDANT la descente, une fois par
//! noeud : le `match` liste explicitement les genres autorisés, tout le reste tombe
//! dans le bras par défaut et est refusé.

use tracing::{debug, trace};

use super::arith::{division, floor_div, modulo, puissance};
use super::assainir::sanitize;
use super::erreurs::{EvalError, SyntaxError};
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::politique::Politique;
use super::registre;
use super::rpn::parse_avec;

/// API publique : évalue une expression brute (glyphes ×, ÷, − acceptés).
///
/// Résultat exact (non arrondi) : le formatage reste à la charge de l’appelant.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    evaluate_avec(expression, &Politique::default())
}

/// Comme `evaluate`, avec des garde-fous explicites.
pub fn evaluate_avec(expression: &str, politique: &Politique) -> Result<f64, EvalError> {
    let propre = sanitize(expression);
    trace!(entree = %expression, assainie = %propre, "évaluation");

    let arbre = parse_avec(&propre, politique).inspect_err(|e| {
        debug!(entree = %expression, erreur = %e, "syntaxe refusée");
    })?;
    trace!(arbre = %arbre, "arbre");

    evaluate_tree(&arbre, politique).inspect_err(|e| {
        debug!(entree = %expression, erreur = %e, "évaluation refusée");
    })
}

/// Évalue un arbre déjà construit.
pub fn evaluate_tree(arbre: &Expr, politique: &Politique) -> Result<f64, EvalError> {
    eval_noeud(arbre, politique, 1)
}

// le bras par défaut ne devient atteignable qu’avec un nouveau genre de noeud
#[allow(unreachable_patterns)]
fn eval_noeud(e: &Expr, politique: &Politique, profondeur: usize) -> Result<f64, EvalError> {
    // arbre construit hors parser : on borne quand même la récursion
    if profondeur > politique.profondeur_max {
        return Err(SyntaxError::new(format!(
            "imbrication trop profonde (max {})",
            politique.profondeur_max
        ))
        .into());
    }
    let sous = |x: &Expr| eval_noeud(x, politique, profondeur + 1);

    match e {
        Expr::Nombre(v) => Ok(*v),

        Expr::Unaire(op, x) => {
            let v = sous(x)?;
            Ok(match op {
                OpUnaire::Plus => v,
                OpUnaire::Neg => -v,
            })
        }

        Expr::Binaire(op, a, b) => {
            let l = sous(a)?;
            let r = sous(b)?;
            let v = match op {
                OpBinaire::Add => l + r,
                OpBinaire::Sub => l - r,
                OpBinaire::Mul => l * r,
                OpBinaire::Div => division(l, r)?,
                OpBinaire::FloorDiv => floor_div(l, r)?,
                OpBinaire::Mod => modulo(l, r)?,
                OpBinaire::Pow => puissance(l, r, politique)?,
            };
            Ok(v)
        }

        Expr::Appel(nom, args) => {
            let f = registre::fonction(nom)
                .ok_or_else(|| EvalError::FunctionNotAllowed(nom.clone()))?;
            // gauche -> droite
            let valeurs = args.iter().map(sous).collect::<Result<Vec<_>, _>>()?;
            Ok(f.appeler(&valeurs)?)
        }

        Expr::Ident(nom) => {
            registre::constante(nom).ok_or_else(|| EvalError::UnknownIdentifier(nom.clone()))
        }

        // Liste blanche : tout genre non traité ci-dessus est refusé.
        autre => Err(EvalError::DisallowedNode(autre.genre())),
    }
}
