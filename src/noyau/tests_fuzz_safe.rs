//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : parenthèses valides <=> profondeur jamais négative et nulle à la fin

use std::time::{Duration, Instant};

use super::curseur::Texte;
use super::erreur::{position_dans_message, ErreurCalcul, ErreurSyntaxe};
use super::eval::MESSAGE_SUCCES;
use super::validation::valider;
use super::{eval_expression, parse_expression};

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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// "1+1+...+1" avec des parenthèses aléatoires autour des atomes
/// (ouvrantes avant un atome, fermantes après) : seule l’imbrication peut être fausse.
fn gen_parentheses(rng: &mut Rng, atomes: usize) -> String {
    let mut s = String::new();
    for i in 0..atomes {
        for _ in 0..rng.pick(3) {
            s.push('(');
        }
        s.push('1');
        for _ in 0..rng.pick(3) {
            s.push(')');
        }
        if i + 1 < atomes {
            s.push('+');
        }
    }
    s
}

fn profondeur_correcte(s: &str) -> bool {
    let mut p: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => p += 1,
            ')' => {
                p -= 1;
                if p < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    p == 0
}

/// Expression valide par construction (profondeur bornée).
fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 || rng.pick(4) == 0 {
        return gen_nombre(rng);
    }
    match rng.pick(4) {
        0 => {
            let op = ["+", "-", "*", "/", "^"][rng.pick(5) as usize];
            format!(
                "{}{op}{}",
                gen_expr(rng, profondeur - 1),
                gen_expr(rng, profondeur - 1)
            )
        }
        1 => {
            let signe = if rng.coin() { "-" } else { "+" };
            format!("({signe}{})", gen_expr(rng, profondeur - 1))
        }
        2 => {
            let f = ["sin", "cos", "tan", "ln", "log", "sqrt", "sqr", "abs"][rng.pick(8) as usize];
            format!("{f}({})", gen_expr(rng, profondeur - 1))
        }
        _ => format!("({})", gen_expr(rng, profondeur - 1)),
    }
}

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(100);
    match rng.pick(3) {
        0 => format!("{entier}"),
        1 => format!("{entier}.{}", rng.pick(1000)),
        _ => format!("{entier}e{}{}", if rng.coin() { "-" } else { "" }, rng.pick(5)),
    }
}

const ALPHABET: &[char] = &[
    '0', '1', '9', '.', '+', '-', '*', '/', '^', '(', ')', 'e', 'E', ' ', 's', 'i', 'n', 'q',
    'r', 't', 'l', 'o', 'g', 'a', 'b', 'c', 'x', '#', 'π',
];

fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_parentheses_equilibrees() {
    let start = Instant::now();
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..3000 {
        let n = 1 + rng.pick(6) as usize;
        let s = gen_parentheses(&mut rng, n);
        let ok = valider(&Texte::depuis_saisie(&s)).is_ok();
        assert_eq!(ok, profondeur_correcte(&s), "s={s:?}");

        if ok {
            let (v, msg) = parse_expression(&s);
            assert_eq!(msg, MESSAGE_SUCCES, "s={s:?}");
            assert_eq!(v, n as f64, "s={s:?}");
        }
        budget(start, Duration::from_secs(5));
    }
}

#[test]
fn fuzz_expressions_valides_toujours_acceptees() {
    let start = Instant::now();
    let mut rng = Rng::new(42);

    for _ in 0..2000 {
        let s = gen_expr(&mut rng, 5);
        match eval_expression(&s) {
            Ok((v, _)) => assert!(!v.is_nan(), "s={s:?}"),
            // domaine (ln négatif, racine négative, 0/0...) : normal
            Err(ErreurCalcul::ResultatNaN) => {}
            Err(e) => panic!("s={s:?} refusée: {e}"),
        }
        budget(start, Duration::from_secs(5));
    }
}

#[test]
fn fuzz_bruit_sans_panique_et_deterministe() {
    let start = Instant::now();
    let mut rng = Rng::new(7);

    for _ in 0..5000 {
        let n = rng.pick(24) as usize;
        let s = gen_bruit(&mut rng, n);

        let (v1, m1) = parse_expression(&s);
        let (v2, m2) = parse_expression(&s);
        assert_eq!(m1, m2, "s={s:?}");
        assert!(v1 == v2 || (v1.is_nan() && v2.is_nan()), "s={s:?}");

        // jamais d’incohérence interne : tout ce qui passe la validation se calcule
        if let Err(ErreurCalcul::Incorrecte { detail }) = eval_expression(&s) {
            panic!("s={s:?} incohérence: {detail}");
        }
        budget(start, Duration::from_secs(5));
    }
}

#[test]
fn fuzz_positions_dans_la_saisie() {
    let mut rng = Rng::new(99);

    for _ in 0..2000 {
        let n = rng.pick(16) as usize;
        let s = gen_bruit(&mut rng, n);
        let longueur = s.chars().count();

        let r = eval_expression(&s);
        if let Err(e) = &r {
            // le curseur de l’UI lit la position dans le message
            assert_eq!(position_dans_message(&e.to_string()), e.position(), "s={s:?}");
        }
        if let Err(ErreurCalcul::Syntaxe(e)) = r {
            if let Some(p) = e.position() {
                assert!(p <= longueur, "s={s:?} p={p}");
            }
            if e == ErreurSyntaxe::Vide {
                assert!(s.trim().is_empty(), "s={s:?}");
            }
        }
    }
}
