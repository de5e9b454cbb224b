//! Tests scientifiques (campagne) : invariants numériques + limites contrôlées.
//!
//! But : vérifier que l’évaluateur respecte l’arithmétique attendue.
//! - plancher (//, %) sur toutes les combinaisons de signes
//! - identités trig / log sur une grille bornée
//! - garde-fou puissance exactement aux seuils
//! - budget temps global

use std::time::{Duration, Instant};

use super::erreurs::{ArithError, EvalError};
use super::{evaluate, evaluate_avec, Politique};

fn eval_ok(expr: &str) -> f64 {
    evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() <= 1e-9 * attendu.abs().max(1.0),
        "expr={expr:?} : {v} != {attendu}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Plancher ------------------------ */

#[test]
fn sci_identite_division_euclidienne() {
    // a == b*(a//b) + a%b, et a%b du signe de b
    let t0 = Instant::now();
    for a in -12..=12 {
        for b in [-5, -3, -2, -1, 1, 2, 3, 7] {
            budget(t0, Duration::from_millis(300));
            let q = eval_ok(&format!("({a})//({b})"));
            let r = eval_ok(&format!("({a})%({b})"));
            assert_eq!((b as f64) * q + r, a as f64, "a={a} b={b}");
            assert!(r == 0.0 || (r > 0.0) == (b > 0), "a={a} b={b} r={r}");
            assert!(r.abs() < (b as f64).abs(), "a={a} b={b} r={r}");
        }
    }
}

#[test]
fn sci_plancher_fractionnaire() {
    assert_eq!(eval_ok("-7.5 // 2"), -4.0);
    assert_eq!(eval_ok("-7.5 % 2"), 0.5);
    assert_eq!(eval_ok("5.5 % -2"), -0.5);
    assert_eq!(eval_ok("1 // 0.5"), 2.0);
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence() {
    assert_eq!(eval_ok("2 + 3 * 4"), 14.0);
    assert_eq!(eval_ok("(2 + 3) * 4"), 20.0);
    assert_eq!(eval_ok("2 * 3 ** 2"), 18.0);
    assert_eq!(eval_ok("100 / 10 / 5"), 2.0);
    assert_eq!(eval_ok("100 // 7 % 5"), 4.0);
    assert_eq!(eval_ok("10 - 4 - 3"), 3.0);
    assert_eq!(eval_ok("-3 ** 2"), -9.0);
    assert_eq!(eval_ok("(-3) ** 2"), 9.0);
    assert_eq!(eval_ok("2 ** 3 ** 2"), 512.0);
    assert_eq!(eval_ok("- - 4"), 4.0);
    assert_eq!(eval_ok("+4"), 4.0);
}

/* ------------------------ Identités ------------------------ */

#[test]
fn sci_identites_trig() {
    for k in -8..=8 {
        let x = k as f64 / 3.0;
        assert_proche(&format!("sin({x})**2 + cos({x})**2"), 1.0);
        assert_proche(&format!("sin(-({x})) + sin({x})"), 0.0);
    }
    assert_proche("tan(pi/4)", 1.0);
    assert_proche("sin(pi/6)", 0.5);
}

#[test]
fn sci_identites_log() {
    assert_proche("log(e)", 1.0);
    assert_proche("log(e**3)", 3.0);
    assert_proche("log10(1000)", 3.0);
    assert_proche("log(8, 2)", 3.0);
    assert_proche("log(2) + log(5)", std::f64::consts::LN_10);
}

#[test]
fn sci_fonctions_diverses() {
    assert_eq!(eval_ok("abs(-3.5)"), 3.5);
    assert_eq!(eval_ok("round(2.5)"), 2.0);
    assert_eq!(eval_ok("round(-0.5)"), -0.0);
    assert_eq!(eval_ok("round(7.46, 1) * 10"), 75.0);
    assert_eq!(eval_ok("sqrt(2)**2 // 1"), 2.0);
    assert_proche("round(pi, 3)", 3.142);
}

/* ------------------------ Garde-fou puissance : seuils exacts ------------------------ */

#[test]
fn sci_seuils_puissance() {
    // exactement au seuil : accepté
    assert_eq!(eval_ok("1000000 ** 1"), 1e6);
    assert_eq!(eval_ok("(-1000000) ** 2"), 1e12);
    assert_eq!(eval_ok("3 ** 10"), 59049.0);
    assert_eq!(eval_ok("2 ** -10"), 0.0009765625);

    // juste au-delà : refusé, quel que soit le signe
    for s in ["1000000.5 ** 1", "(-1000001) ** 2", "2 ** 10.5", "2 ** -10.01", "0 ** 11"] {
        assert_eq!(
            evaluate(s),
            Err(EvalError::Arithmetic(ArithError::ExponentTooLarge)),
            "{s:?}"
        );
    }
}

#[test]
fn sci_politique_reglable() {
    let stricte = Politique {
        base_max: 10.0,
        exposant_max: 2.0,
        ..Politique::default()
    };
    assert_eq!(evaluate_avec("10 ** 2", &stricte), Ok(100.0));
    assert_eq!(
        evaluate_avec("11 ** 2", &stricte),
        Err(EvalError::Arithmetic(ArithError::ExponentTooLarge))
    );
    assert_eq!(
        evaluate_avec("2 ** 3", &stricte),
        Err(EvalError::Arithmetic(ArithError::ExponentTooLarge))
    );
}

/* ------------------------ Littéraux ------------------------ */

#[test]
fn sci_litteraux_sans_troncature() {
    assert_eq!(eval_ok("0.1 + 0.2"), 0.1 + 0.2);
    assert_eq!(eval_ok("7 / 2"), 3.5);
    assert_eq!(eval_ok("1.5e3"), 1500.0);
    assert_eq!(eval_ok(".5 + 3."), 3.5);
    assert_eq!(eval_ok("  12  "), 12.0);
}
