//! Tests scientifiques (campagne) : valeurs connues + invariants.
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - `^` est associatif à GAUCHE : "2^3^2" = (2^3)^2 = 64 (et pas 512).
//! - `log` est le logarithme naturel (comme `ln`).
//! - le signe n’est permis qu’en début de portée (début, ou juste après "(") :
//!   "2*-3" est refusé, "2*(-3)" est accepté.
//! - ±∞ passe (1/0), NaN est refusé.

use std::time::{Duration, Instant};

use super::erreur::{ErreurCalcul, ErreurSyntaxe};
use super::eval::MESSAGE_SUCCES;
use super::parse_expression;

fn eval_ok(expr: &str) -> f64 {
    let (v, msg) = parse_expression(expr);
    assert_eq!(msg, MESSAGE_SUCCES, "expr={expr:?}");
    v
}

fn assert_valeur(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    let tol = 1e-12 * attendu.abs().max(1.0);
    assert!((v - attendu).abs() <= tol, "expr={expr:?} v={v} attendu={attendu}");
}

fn assert_nan(expr: &str) {
    let (v, msg) = parse_expression(expr);
    assert!(v.is_nan(), "expr={expr:?}");
    assert_eq!(msg, ErreurCalcul::ResultatNaN.to_string(), "expr={expr:?}");
}

fn assert_syntaxe(expr: &str, attendu: ErreurSyntaxe) {
    let (v, msg) = parse_expression(expr);
    assert!(v.is_nan(), "expr={expr:?}");
    assert_eq!(msg, attendu.to_string(), "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Valeurs connues ------------------------ */

#[test]
fn sci_priorites_et_associativite() {
    assert_valeur("2+3*4", 14.0);
    assert_valeur("(2+3)*4", 20.0);
    assert_valeur("2^3^2", 64.0);
    assert_valeur("2*3^2", 18.0);
    assert_valeur("100/10/5", 2.0);
    assert_valeur("2-3-4", -5.0);
    assert_valeur("2-(3-4)", 3.0);
}

#[test]
fn sci_signe_unaire() {
    assert_valeur("-5+3", -2.0);
    assert_valeur("(-2)^2", 4.0);
    assert_valeur("+7", 7.0);
    assert_valeur("2*(-3)", -6.0);
    assert_valeur("-(-(3))", 3.0);
    assert_valeur("(+2)*(-2)", -4.0);
}

#[test]
fn sci_fonctions() {
    assert_valeur("sqrt(abs(-9))", 3.0);
    assert_valeur("sqr(3)", 9.0);
    assert_valeur("sqrt(2)^2", 2.0);
    assert_valeur("cos(0)", 1.0);
    assert_valeur("sin(0)+tan(0)", 0.0);
    assert_valeur("ln(1)", 0.0);
    assert_valeur("log(1)", 0.0);
    assert_valeur("abs(-1.5e2)", 150.0);
    // fonction avant ^ : sqr(2)^3 = 4^3
    assert_valeur("sqr(2)^3", 64.0);
    assert_valeur("2^sqr(2)", 16.0);
}

#[test]
fn sci_expression_de_demo() {
    let attendu = ((-(1f64.cos() / (2f64.powi(2) - (-0.5) * 2f64.sqrt()))).abs()
        / 10f64.ln()
        + (2f64.powi(2) * 1f64.sin())
        - 1.234e-3)
        + 1f64.tan();
    assert_valeur(
        "((abs(-(cos(1) / (2^2 - (-0.5) * (sqrt(2)))) / ln(10) + (2^2 * sin(1)) - 1.234e-3)) + (tan(1)))",
        attendu,
    );
}

#[test]
fn sci_infini_passe() {
    assert_eq!(eval_ok("1/0"), f64::INFINITY);
    assert_eq!(eval_ok("-1/0"), f64::NEG_INFINITY);
    assert_eq!(eval_ok("0^(-1)"), f64::INFINITY);
}

/* ------------------------ Échecs ------------------------ */

#[test]
fn sci_domaine_nan() {
    assert_nan("log(-1)");
    assert_nan("ln(-2)");
    assert_nan("sqrt(-1)");
    assert_nan("(-8)^(1/3)");
    assert_nan("0/0");
    assert_nan("1/0-1/0");
}

#[test]
fn sci_syntaxe() {
    assert_syntaxe("2+", ErreurSyntaxe::FinInattendue { position: 2 });
    assert_syntaxe(
        "()",
        ErreurSyntaxe::ArgumentManquant {
            ouvrante: 0,
            fermante: 1,
        },
    );
    assert_syntaxe("2^-3", ErreurSyntaxe::PuissanceNegative { position: 2 });
    assert_syntaxe("", ErreurSyntaxe::Vide);
    assert_syntaxe("2*-3", ErreurSyntaxe::SymboleInattendu { position: 2 });
    assert_syntaxe("3 + 4.", ErreurSyntaxe::PointInvalide { position: 5 });
}

#[test]
fn sci_premier_diagnostic_gagne() {
    // "^-" est vu avant le déséquilibre des parenthèses
    assert_syntaxe("(2^-3", ErreurSyntaxe::PuissanceNegative { position: 3 });
    // "()" est vu avant l’automate
    assert_syntaxe("2x+()", ErreurSyntaxe::ArgumentManquant { ouvrante: 3, fermante: 4 });
}

/* ------------------------ Invariants ------------------------ */

#[test]
fn sci_idempotence() {
    for s in ["2+3*4", "log(-1)", "2+", "sqrt(abs(-9))", "1/0", "()", ""] {
        let a = parse_expression(s);
        let b = parse_expression(s);
        assert_eq!(a.1, b.1, "expr={s:?}");
        assert!(
            a.0 == b.0 || (a.0.is_nan() && b.0.is_nan()),
            "expr={s:?}"
        );
    }
}

#[test]
fn sci_somme_longue_lineaire() {
    // 2000 termes : doit rester rapide (scans linéaires)
    let start = Instant::now();
    let s = vec!["1"; 2000].join("+");
    assert_valeur(&s, 2000.0);
    budget(start, Duration::from_secs(2));
}

#[test]
fn sci_imbrication_profonde() {
    let start = Instant::now();
    let n = 200;
    let s = format!("{}2{}", "abs(".repeat(n), ")".repeat(n));
    assert_valeur(&s, 2.0);

    let s = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_valeur(&s, 1.0);
    budget(start, Duration::from_secs(2));
}

#[test]
fn sci_imbrication_de_fonctions_tres_profonde() {
    let start = Instant::now();
    let n = 100_000;
    let s = format!("{}2{}", "abs(".repeat(n), ")".repeat(n));
    assert_valeur(&s, 2.0);
    budget(start, Duration::from_secs(10));
}
