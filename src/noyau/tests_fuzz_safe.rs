//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs attendues (division par zéro, domaine, garde-fou puissance…)
//! - invariant clé : une entrée hors alphabet autorisé n’est JAMAIS évaluée

use std::time::{Duration, Instant};

use super::erreurs::{ArithError, EvalError};
use super::evaluate;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn choose<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &EvalError) -> bool {
    // Liste blanche : erreurs *normales* pour un fuzz dans la grammaire.
    matches!(
        e,
        EvalError::Arithmetic(
            ArithError::DivisionByZero
                | ArithError::ExponentTooLarge
                | ArithError::Domain { .. }
                | ArithError::ComplexResult
                | ArithError::Overflow
        )
    )
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        3 => format!(".{}", 1 + rng.pick(9)),
        4 => format!("{}e{}", 1 + rng.pick(9), rng.pick(4)),
        _ => format!("{}", rng.pick(1000)),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 | 1 => gen_nombre(rng),
        2 => rng.choose(&["pi", "e"]).to_string(),
        _ => format!("−{}", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(7) {
        0 => gen_atom(rng),
        1 => {
            let op = rng.choose(&["+", "-", "*", "/", "//", "%", "**", "×", "÷", "−"]);
            format!(
                "({}{op}{})",
                gen_expr(rng, depth - 1),
                gen_expr(rng, depth - 1)
            )
        }
        2 => format!("-{}", gen_expr(rng, depth - 1)),
        3 => {
            let f = rng.choose(&["sqrt", "sin", "cos", "tan", "log", "log10", "abs", "round"]);
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        4 => {
            let f = rng.choose(&["log", "round"]);
            format!(
                "{f}({}, {})",
                gen_expr(rng, depth - 1),
                gen_atom(rng)
            )
        }
        _ => format!(
            "{} {} {}",
            gen_expr(rng, depth - 1),
            rng.choose(&["+", "*", "-"]),
            gen_expr(rng, depth - 1)
        ),
    }
}

/// Mélange de fragments “pythonesques” hors grammaire.
fn gen_hostile(rng: &mut Rng) -> String {
    const FRAGMENTS: [&str; 16] = [
        "__import__", "os", ".", "system", "(", ")", "'ls'", "[0]", "=", ";", "lambda", ":",
        "1", "+", "getattr", "\"x\"",
    ];
    let n = 1 + rng.pick(8) as usize;
    (0..n)
        .map(|_| FRAGMENTS[rng.pick(FRAGMENTS.len() as u32) as usize])
        .collect()
}

/// Vrai si un '.' ne touche aucun chiffre (donc ne fait partie d’aucun littéral).
fn point_hors_nombre(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars.iter().enumerate().any(|(i, &c)| {
        let chiffre = |j: Option<usize>| {
            j.and_then(|j| chars.get(j)).is_some_and(|d| d.is_ascii_digit())
        };
        c == '.' && !chiffre(i.checked_sub(1)) && !chiffre(Some(i + 1))
    })
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_dans_la_grammaire() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        let r1 = evaluate(&expr);
        let r2 = evaluate(&expr);

        match (&r1, &r2) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.to_bits(), b.to_bits(), "non déterministe: {expr:?}");
                seen_ok += 1;
            }
            (Err(e), _) => {
                assert_eq!(r1, r2, "non déterministe: {expr:?}");
                assert!(
                    is_erreur_attendue(e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
            _ => panic!("non déterministe: {expr:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_fragments_hostiles_jamais_evalues() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..500 {
        budget(t0, max);

        let s = gen_hostile(&mut rng);
        // "1." et ".1" sont des littéraux : le point seul n’est pas hostile
        let hors_grammaire = ["'", "\"", "[", "=", ";", ":"]
            .iter()
            .any(|f| s.contains(f))
            || point_hors_nombre(&s);

        match evaluate(&s) {
            Ok(v) => assert!(
                !hors_grammaire,
                "entrée hors grammaire évaluée: {s:?} -> {v}"
            ),
            Err(e) => {
                if hors_grammaire {
                    assert!(
                        matches!(e, EvalError::Syntax(_)),
                        "attendu SyntaxError pour {s:?}, obtenu {e}"
                    );
                }
            }
        }
    }
}

#[test]
fn fuzz_safe_point_decimal_n_est_pas_hostile() {
    assert!(!point_hors_nombre("1."));
    assert!(!point_hors_nombre(".1+1"));
    assert!(point_hors_nombre("os.system"));
    assert!(point_hors_nombre("1+."));

    assert_eq!(evaluate("1."), Ok(1.0));
    for s in ["os.system", "(.)", "1+."] {
        assert!(matches!(evaluate(s), Err(EvalError::Syntax(_))), "{s:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 500);
    budget(t0, max);

    let v = evaluate(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 500*(1/2) = 250
    assert_eq!(v, 250.0);
}

#[test]
fn fuzz_safe_imbrication_adverse_bornee() {
    // Chaînes longues de négations / puissances : refus typé, pas de débordement de pile.
    for motif in ["-", "+", "−"] {
        let s = format!("{}1", motif.repeat(4000));
        assert!(matches!(evaluate(&s), Err(EvalError::Syntax(_))), "motif {motif:?}");
    }

    let tour = format!("{}2", "2**".repeat(1000));
    assert!(matches!(evaluate(&tour), Err(EvalError::Syntax(_))));

    let enorme = "1+".repeat(5000) + "1";
    assert!(matches!(evaluate(&enorme), Err(EvalError::Syntax(_))));
}
