// src/noyau/expr.rs
//
// Arbre d’expression (immuable, construit par rpn.rs, consommé une fois par eval.rs).
// Ensemble de genres FERMÉ : Nombre, Unaire, Binaire, Appel, Ident.
// Tout genre ajouté plus tard est refusé par l’évaluateur tant qu’il n’y est pas traité.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    Plus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl OpBinaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::FloorDiv => "//",
            OpBinaire::Mod => "%",
            OpBinaire::Pow => "**",
        }
    }

    /// Précédence shunting-yard (plus grand = plus serré).
    pub fn precedence(self) -> u8 {
        match self {
            OpBinaire::Add | OpBinaire::Sub => 1,
            OpBinaire::Mul | OpBinaire::Div | OpBinaire::FloorDiv | OpBinaire::Mod => 2,
            OpBinaire::Pow => 4,
        }
    }

    pub fn associatif_droite(self) -> bool {
        matches!(self, OpBinaire::Pow)
    }
}

/// Le moins/plus unaire se place entre `*` et `**` : -2**2 == -(2**2).
pub const PRECEDENCE_UNAIRE: u8 = 3;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Unaire(OpUnaire, Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    Appel(String, Vec<Expr>),
    Ident(String),
}

impl Expr {
    /// Nom du genre de noeud (messages d’erreur, traces).
    pub fn genre(&self) -> &'static str {
        match self {
            Expr::Nombre(_) => "Nombre",
            Expr::Unaire(..) => "Unaire",
            Expr::Binaire(..) => "Binaire",
            Expr::Appel(..) => "Appel",
            Expr::Ident(_) => "Ident",
        }
    }
}

/// Forme entièrement parenthésée (traces / tests).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(v) => write!(f, "{v}"),
            Expr::Ident(nom) => f.write_str(nom),
            Expr::Unaire(OpUnaire::Neg, x) => write!(f, "(-{x})"),
            Expr::Unaire(OpUnaire::Plus, x) => write!(f, "(+{x})"),
            Expr::Binaire(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
            Expr::Appel(nom, args) => {
                write!(f, "{nom}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}
