// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> Expr
// Objectif:
// - Convertir une suite de Jeton en RPN (postfix), en validant la grammaire au passage
// - Puis reconstruire Expr (profondeur bornée)
//
// Règles:
// - Ident suivi de '(' => appel de fonction (nombre d’arguments compté en RPN)
// - Ident seul        => identifiant (constante)
// - '+'/'-' quand on n’attend PAS d’opérateur => unaire (préfixe)
// - précédences : + - (1) < * / // % (2) < unaire (3) < ** (4, associatif à droite)
//
// C’est la grammaire fermée qui sert de frontière de sûreté : aucun '=', '.', '[', ';'
// ni littéral chaîne ne franchit tokenize(), et to_rpn() refuse toute suite mal formée.

use tracing::{trace, warn};

use super::erreurs::SyntaxError;
use super::expr::{Expr, OpBinaire, OpUnaire, PRECEDENCE_UNAIRE};
use super::jetons::{format_tokens, tokenize, Jeton, Tok};
use super::politique::Politique;

/// Élément de la forme postfixée.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Ident(String),
    Unaire(OpUnaire),
    Binaire(OpBinaire),
    /// nom + nombre d’arguments
    Appel(String, usize),
}

/// Pile d’opérateurs du shunting-yard.
#[derive(Debug)]
enum Pile {
    Unaire(OpUnaire),
    Binaire(OpBinaire),
    LPar { pos: usize },
    // `argc` compte les virgules déjà vues
    Fonction { nom: String, pos: usize, argc: usize },
}

impl Pile {
    fn precedence(&self) -> Option<u8> {
        match self {
            Pile::Unaire(_) => Some(PRECEDENCE_UNAIRE),
            Pile::Binaire(op) => Some(op.precedence()),
            Pile::LPar { .. } | Pile::Fonction { .. } => None,
        }
    }

    fn vers_rpn(self) -> Option<Rpn> {
        match self {
            Pile::Unaire(op) => Some(Rpn::Unaire(op)),
            Pile::Binaire(op) => Some(Rpn::Binaire(op)),
            Pile::LPar { .. } | Pile::Fonction { .. } => None,
        }
    }
}

fn op_binaire(tok: &Tok) -> Option<OpBinaire> {
    match tok {
        Tok::Plus => Some(OpBinaire::Add),
        Tok::Minus => Some(OpBinaire::Sub),
        Tok::Star => Some(OpBinaire::Mul),
        Tok::Slash => Some(OpBinaire::Div),
        Tok::DoubleSlash => Some(OpBinaire::FloorDiv),
        Tok::Percent => Some(OpBinaire::Mod),
        Tok::DoubleStar => Some(OpBinaire::Pow),
        _ => None,
    }
}

/// Dépile les opérateurs jusqu’à la prochaine '(' ou fonction (non dépilée).
fn depiler_groupe(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) {
    while ops.last().is_some_and(|top| top.precedence().is_some()) {
        if let Some(r) = ops.pop().and_then(Pile::vers_rpn) {
            out.push(r);
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Ident("round"), LPar, Num(2.5), Comma, Num(1), RPar, Star, Num(2)]
///   rpn:    [Num(2.5), Num(1), Appel("round", 2), Num(2), Binaire(Mul)]
pub fn to_rpn(jetons: &[Jeton]) -> Result<Vec<Rpn>, SyntaxError> {
    if jetons.is_empty() {
        return Err(SyntaxError::new("expression vide"));
    }

    let mut out: Vec<Rpn> = Vec::with_capacity(jetons.len());
    let mut ops: Vec<Pile> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Faux => on attend un opérande (donc +/- sont unaires).
    let mut prev_was_value = false;

    let mut iter = jetons.iter().peekable();
    while let Some(j) = iter.next() {
        let pos = j.pos;

        match &j.tok {
            Tok::Num(v) => {
                if prev_was_value {
                    return Err(SyntaxError::at("opérateur manquant", pos));
                }
                out.push(Rpn::Num(*v));
                prev_was_value = true;
            }

            Tok::Ident(nom) => {
                if prev_was_value {
                    return Err(SyntaxError::at("opérateur manquant", pos));
                }
                if matches!(iter.peek(), Some(Jeton { tok: Tok::LPar, .. })) {
                    // appel : la '(' est absorbée par le cadre Fonction
                    iter.next();
                    ops.push(Pile::Fonction {
                        nom: nom.clone(),
                        pos,
                        argc: 0,
                    });
                    prev_was_value = false;
                } else {
                    out.push(Rpn::Ident(nom.clone()));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(SyntaxError::at("opérateur manquant avant '('", pos));
                }
                ops.push(Pile::LPar { pos });
            }

            Tok::Comma => {
                if !prev_was_value {
                    return Err(SyntaxError::at("argument manquant", pos));
                }
                depiler_groupe(&mut ops, &mut out);
                match ops.last_mut() {
                    Some(Pile::Fonction { argc, .. }) => *argc += 1,
                    _ => {
                        return Err(SyntaxError::at("virgule hors d’un appel de fonction", pos));
                    }
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                if prev_was_value {
                    depiler_groupe(&mut ops, &mut out);
                    match ops.pop() {
                        Some(Pile::LPar { .. }) => {}
                        Some(Pile::Fonction { nom, argc, .. }) => {
                            out.push(Rpn::Appel(nom, argc + 1));
                        }
                        _ => {
                            return Err(SyntaxError::at("parenthèse fermante sans ouvrante", pos));
                        }
                    }
                } else {
                    // pas de valeur : seul f() est admis, rien ne doit rester en attente
                    match ops.pop() {
                        Some(Pile::Fonction { nom, argc: 0, .. }) => out.push(Rpn::Appel(nom, 0)),
                        Some(Pile::LPar { .. }) => {
                            return Err(SyntaxError::at("parenthèses vides", pos));
                        }
                        Some(Pile::Fonction { .. }) => {
                            return Err(SyntaxError::at("argument manquant", pos));
                        }
                        Some(Pile::Unaire(_) | Pile::Binaire(_)) => {
                            return Err(SyntaxError::at("opérande manquant", pos));
                        }
                        None => {
                            return Err(SyntaxError::at("parenthèse fermante sans ouvrante", pos));
                        }
                    }
                }
                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                let op = if j.tok == Tok::Minus {
                    OpUnaire::Neg
                } else {
                    OpUnaire::Plus
                };
                // préfixe : rien à dépiler
                ops.push(Pile::Unaire(op));
            }

            tok => {
                let op = op_binaire(tok)
                    .ok_or_else(|| SyntaxError::at("jeton inattendu", pos))?;
                if !prev_was_value {
                    return Err(SyntaxError::at(
                        format!("opérateur '{}' sans opérande gauche", op.symbole()),
                        pos,
                    ));
                }

                // dépile tant que la précédence/associativité l’exige
                while let Some(p_top) = ops.last().and_then(Pile::precedence) {
                    let doit_pop = if op.associatif_droite() {
                        p_top > op.precedence()
                    } else {
                        p_top >= op.precedence()
                    };
                    if !doit_pop {
                        break;
                    }
                    if let Some(r) = ops.pop().and_then(Pile::vers_rpn) {
                        out.push(r);
                    }
                }

                ops.push(Pile::Binaire(op));
                prev_was_value = false;
            }
        }
    }

    if !prev_was_value {
        let fin = jetons.last().map_or(0, |j| j.pos);
        return Err(SyntaxError::at("expression incomplète", fin));
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match top {
            Pile::LPar { pos } | Pile::Fonction { pos, .. } => {
                return Err(SyntaxError::at("parenthèses non fermées", pos));
            }
            autre => out.extend(autre.vers_rpn()),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN, en bornant la profondeur de l’arbre.
pub fn from_rpn(rpn: Vec<Rpn>, profondeur_max: usize) -> Result<Expr, SyntaxError> {
    // (noeud, profondeur du sous-arbre)
    let mut st: Vec<(Expr, usize)> = Vec::new();
    let invalide = || SyntaxError::new("expression invalide");

    for item in rpn {
        let (e, prof) = match item {
            Rpn::Num(v) => (Expr::Nombre(v), 1),
            Rpn::Ident(nom) => (Expr::Ident(nom), 1),

            Rpn::Unaire(op) => {
                let (x, p) = st.pop().ok_or_else(invalide)?;
                (Expr::Unaire(op, Box::new(x)), p + 1)
            }

            Rpn::Binaire(op) => {
                let (b, pb) = st.pop().ok_or_else(invalide)?;
                let (a, pa) = st.pop().ok_or_else(invalide)?;
                (Expr::Binaire(op, Box::new(a), Box::new(b)), pa.max(pb) + 1)
            }

            Rpn::Appel(nom, n) => {
                if st.len() < n {
                    return Err(invalide());
                }
                let args = st.split_off(st.len() - n);
                let p = args.iter().map(|(_, p)| *p).max().unwrap_or(0) + 1;
                (Expr::Appel(nom, args.into_iter().map(|(a, _)| a).collect()), p)
            }
        };

        if prof > profondeur_max {
            warn!(profondeur_max, "expression refusée : imbrication trop profonde");
            return Err(SyntaxError::new(format!(
                "imbrication trop profonde (max {profondeur_max})"
            )));
        }
        st.push((e, prof));
    }

    if st.len() != 1 {
        return Err(invalide());
    }
    st.pop().map(|(e, _)| e).ok_or_else(invalide)
}

/// Parser complet : chaîne assainie -> Expr (politique par défaut).
#[cfg_attr(not(test), allow(dead_code))]
pub fn parse(sanitized: &str) -> Result<Expr, SyntaxError> {
    parse_avec(sanitized, &Politique::default())
}

/// Parser complet avec garde-fous explicites (longueur, profondeur).
pub fn parse_avec(sanitized: &str, politique: &Politique) -> Result<Expr, SyntaxError> {
    let longueur = sanitized.chars().count();
    if longueur > politique.longueur_max {
        warn!(longueur, max = politique.longueur_max, "expression refusée : entrée trop longue");
        return Err(SyntaxError::new(format!(
            "entrée trop longue ({longueur} caractères, max {})",
            politique.longueur_max
        )));
    }

    let jetons = tokenize(sanitized)?;
    trace!(jetons = %format_tokens(&jetons), "tokenisation");

    let rpn = to_rpn(&jetons)?;
    from_rpn(rpn, politique.profondeur_max)
}
