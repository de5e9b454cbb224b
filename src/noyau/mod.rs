//! Noyau sandboxé Aurore
//!
//! Organisation interne :
//! - assainir.rs  : glyphes ×, ÷, − -> *, /, -
//! - jetons.rs    : tokenisation
//! - rpn.rs       : shunting-yard + construction Expr (parser)
//! - expr.rs      : arbre d’expression (genres fermés)
//! - registre.rs  : constantes + fonctions autorisées (table statique)
//! - arith.rs     : floor-div / modulo / puissance gardée
//! - politique.rs : garde-fous anti-DoS
//! - erreurs.rs   : taxonomie des erreurs
//! - eval.rs      : validation + évaluation
//! - format.rs    : affichage côté appelant

pub mod arith;
pub mod assainir;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod politique;
pub mod registre;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;


// API publique minimale
pub use erreurs::EvalError;
pub use eval::{evaluate, evaluate_avec};
pub use format::format_resultat;
pub use politique::Politique;
