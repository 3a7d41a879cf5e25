//! Tests de propriétés (campagne) : invariants du simplificateur + limites contrôlées.
//!
//! But : vérifier les garanties de rendu sur beaucoup de valeurs, sans faire chauffer la machine.
//! - RNG déterministe (seed fixe)
//! - budget temps global
//! - familles de valeurs : rationnels simples, multiples de π et e,
//!   bruit quelconque, bruit autour de 0
//!
//! Invariant clé : le résultat est à moins de ε de v, OU c’est exactement le repli décimal de v.

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_complex::Complex64;

use super::constantes::Constante;
use super::expr::Expr;
use super::latex::format_latex;
use super::parametres::Parametres;
use super::simplificateur::{rendre_scalaire, simplifier};
use super::valeur::Scalaire;

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
    /// Uniforme dans [-1, 1].
    fn unit(&mut self) -> f64 {
        (self.next_u32() as f64 / u32::MAX as f64) * 2.0 - 1.0
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Générateurs ------------------------ */

fn gen_valeur(rng: &mut Rng) -> f64 {
    let q = f64::from(rng.pick(12) + 1);
    let p = f64::from(rng.pick(41)) - 20.0;
    match rng.pick(5) {
        0 => p / q,
        1 => p * std::f64::consts::PI / q,
        2 => p * std::f64::consts::E / q,
        3 => rng.unit() * 10f64.powi(rng.pick(12) as i32 - 6),
        _ => p / q + rng.unit() * 1e-9,
    }
}

/* ------------------------ Vérifications ------------------------ */

fn assert_dans_tolerance_ou_decimal(v: f64, p: &Parametres) {
    let e = simplifier(Scalaire::Reel(v), p);
    if e == Expr::decimal(v, p.chiffres_significatifs) {
        return;
    }
    let z = e
        .evaluer()
        .unwrap_or_else(|| panic!("v={v:e} : candidat non évaluable {e}"));
    let ecart = (z - Complex64::new(v, 0.0)).norm();
    assert!(
        ecart <= p.tolerance_zero,
        "v={v:e} : {e} à {ecart:e} (> {:e})",
        p.tolerance_zero
    );
}

fn assert_denominateur_borne(v: f64, p: &Parametres) {
    if let Some(r) = simplifier(Scalaire::Reel(v), p).comme_rationnel() {
        assert!(
            r.denom() <= &BigInt::from(p.denominateur_max),
            "v={v:e} : dénominateur {} > {}",
            r.denom(),
            p.denominateur_max
        );
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn prop_zero_sous_la_tolerance() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);
    let p = Parametres::default();
    let mut rng = Rng::new(0x5EED_0001);

    for _ in 0..500 {
        budget(t0, max);
        let v = rng.unit() * p.tolerance_zero * 0.999;
        assert!(simplifier(Scalaire::Reel(v), &p).est_zero(), "v={v:e}");
    }
}

#[test]
fn prop_tolerance_ou_repli_decimal() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);
    let p = Parametres::default();
    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..400 {
        budget(t0, max);
        assert_dans_tolerance_ou_decimal(gen_valeur(&mut rng), &p);
    }
}

#[test]
fn prop_denominateurs_bornes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);
    let mut rng = Rng::new(0xBADC0DE_u64);

    for d in [1_u64, 7, 100, 10_000] {
        let p = Parametres::default().avec_denominateur_max(d);
        for _ in 0..100 {
            budget(t0, max);
            assert_denominateur_borne(gen_valeur(&mut rng), &p);
        }
    }
}

#[test]
fn prop_complexe_a_partie_imaginaire_nulle() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);
    let p = Parametres::default();
    let mut rng = Rng::new(0xFACADE_u64);

    for _ in 0..200 {
        budget(t0, max);
        let v = gen_valeur(&mut rng);
        let bruit = rng.unit() * 1e-15;
        assert_eq!(
            simplifier(Scalaire::Complexe(Complex64::new(v, bruit)), &p),
            simplifier(Scalaire::Reel(v), &p),
            "v={v:e}"
        );
    }
}

#[test]
fn prop_multiples_entiers_des_constantes_symboliques() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);
    let p = Parametres::default();

    for c in [Constante::Pi, Constante::E] {
        for k in 1..=1000_i64 {
            if k % 100 == 0 {
                budget(t0, max);
            }
            let v = k as f64 * c.valeur();
            let e = simplifier(Scalaire::Reel(v), &p);
            assert_eq!(e, Expr::fois(Expr::entier(k), Expr::Const(c)), "k = {k}, c = {c:?}");

            let e = simplifier(Scalaire::Reel(-v), &p);
            assert_eq!(e, Expr::fois(Expr::entier(-k), Expr::Const(c)), "k = -{k}, c = {c:?}");
        }
    }
}

#[test]
fn prop_determinisme() {
    let p = Parametres::default();
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);
    for _ in 0..100 {
        let (va, vb) = (gen_valeur(&mut a), gen_valeur(&mut b));
        assert_eq!(rendre_scalaire(va.into(), &p), rendre_scalaire(vb.into(), &p));
    }
}

/* ------------------------ Exemples de référence ------------------------ */

#[test]
fn sci_exemples_de_reference() {
    let p = Parametres::default();
    let l = |v: f64| format_latex(&simplifier(Scalaire::Reel(v), &p));

    assert_eq!(l(3.14159265358979), r"\pi");
    assert_eq!(l(0.3333333333333333), r"\frac{1}{3}");
    assert_eq!(l(1e-16), "0");
    assert_eq!(l(0.1 + 0.2), r"\frac{3}{10}");
    assert_eq!(l(std::f64::consts::SQRT_2), "1.414");
}

#[test]
fn sci_entiers_grands_sans_perte() {
    let p = Parametres::default();
    for n in [i64::MAX, i64::MIN, (1 << 53) + 1] {
        assert_eq!(
            format_latex(&simplifier(Scalaire::Entier(n), &p)),
            n.to_string()
        );
    }
}

#[test]
fn sci_chiffres_du_repli() {
    let v = std::f64::consts::SQRT_2;
    for (k, attendu) in [(1, "1"), (2, "1.4"), (4, "1.414"), (8, "1.4142136")] {
        let p = Parametres::default().avec_chiffres(k);
        assert_eq!(format_latex(&simplifier(Scalaire::Reel(v), &p)), attendu, "k={k}");
    }
}
