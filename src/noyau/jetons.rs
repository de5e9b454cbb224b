// src/noyau/jetons.rs

use super::erreurs::SyntaxError;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes : le registre tranchera à l’évaluation.
    Ident(String),

    Plus,
    Minus,
    Star,
    DoubleStar, // **
    Slash,
    DoubleSlash, // //
    Percent,

    LPar,
    RPar,
    Comma,
}

/// Jeton + position (en caractères) dans l’entrée.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

/// Tokenize une chaîne (déjà assainie) en jetons.
/// Supporte:
/// - nombres : 12, 3.5, 3., .5, 1e3, 2.5E-4
/// - opérateurs + - * ** / // %
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (sensibles à la casse)
///
/// Tout autre caractère (=, ., [, ", ;, ^ …) est refusé ici.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, SyntaxError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let pos = i;
        let suivant = chars.get(i + 1).copied();

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '%' => Some(Tok::Percent),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(Jeton { tok, pos });
            i += 1;
            continue;
        }

        // Opérateurs doublables : * / **, / / //
        if c == '*' || c == '/' {
            let double = suivant == Some(c);
            let tok = match (c, double) {
                ('*', true) => Tok::DoubleStar,
                ('*', false) => Tok::Star,
                ('/', true) => Tok::DoubleSlash,
                _ => Tok::Slash,
            };
            out.push(Jeton { tok, pos });
            i += if double { 2 } else { 1 };
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Jeton {
                tok: Tok::Ident(word),
                pos,
            });
            continue;
        }

        // Nombre : chiffres, ou '.' suivi d’un chiffre
        let debut_nombre =
            c.is_ascii_digit() || (c == '.' && suivant.is_some_and(|d| d.is_ascii_digit()));
        if debut_nombre {
            let (valeur, fin) = lire_nombre(&chars, i)?;
            out.push(Jeton {
                tok: Tok::Num(valeur),
                pos,
            });
            i = fin;
            continue;
        }

        return Err(SyntaxError::at(format!("caractère inattendu: '{c}'"), pos));
    }

    Ok(out)
}

/// Lit un littéral à partir de `start` : partie entière, fraction, exposant.
/// Retourne (valeur, index de fin).
fn lire_nombre(chars: &[char], start: usize) -> Result<(f64, usize), SyntaxError> {
    let mut i = start;
    let chiffres = |i: &mut usize| {
        let d = *i;
        while *i < chars.len() && chars[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - d
    };

    chiffres(&mut i);

    if i < chars.len() && chars[i] == '.' {
        i += 1;
        chiffres(&mut i);
    }

    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        i += 1;
        if i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
            i += 1;
        }
        if chiffres(&mut i) == 0 {
            return Err(SyntaxError::at("nombre invalide (exposant vide)", start));
        }
    }

    // "12abc", "1.2.3", "3_0" : littéral collé à autre chose
    if let Some(&c) = chars.get(i) {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            return Err(SyntaxError::at("nombre invalide", start));
        }
    }

    let texte: String = chars[start..i].iter().collect();
    let valeur = texte
        .parse::<f64>()
        .map_err(|_| SyntaxError::at("nombre invalide", start))?;
    Ok((valeur, i))
}

/// Format utilitaire (traces) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    let mut out = Vec::new();
    for j in jetons {
        let s = match &j.tok {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::DoubleStar => "**".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::DoubleSlash => "//".to_string(),
            Tok::Percent => "%".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Comma => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
