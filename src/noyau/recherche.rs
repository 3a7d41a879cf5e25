// src/noyau/recherche.rs
//
// Reconnaissance rationnel / constante (contrainte, déterministe).
//
// Familles de candidats, pour chaque constante c permise :
// - p/q           : réduites de la fraction continue de v
// - (p/q)·c       : réduites de v/c, q ≤ DENOMINATEUR_CONSTANTE
// - p/(q·c)       : réduites de v·c (refusé ensuite au dénominateur, mais construit)
// - (p + t·c)/q   : petite combinaison affine, q ≤ Q_AFFINE, |t| ≤ T_AFFINE
//
// Le candidat retenu est le moins complexe parmi ceux à moins de `tolerance` de v
// (écart toujours mesuré sur la valeur, jamais sur le quotient v/c).
// Les portes de validation (dénominateur, constante au dénominateur…) sont ailleurs :
// ici on cherche, on ne juge pas.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use super::constantes::{Constante, ConstantesPermises};
use super::erreurs::Repli;
use super::expr::Expr;

/// Au-delà, une réduite n’a plus de sens pour un f64 (≈ 2^53).
const DENOMINATEUR_RECHERCHE: u64 = 1 << 53;

/// Coefficient rationnel devant une constante : petit, sinon c’est du bruit
/// qu’aucune porte ne rattraperait (seul le rationnel pur est borné par D).
const DENOMINATEUR_CONSTANTE: u64 = 1000;

/// Garde-fou : une fraction continue de f64 converge bien avant.
const MAX_TERMES: usize = 64;

const Q_AFFINE: i64 = 12;
const T_AFFINE: i64 = 12;

/// Cherche une forme close pour `v`. Err si v non fini ou si rien ne tombe dans la tolérance.
pub fn rechercher(
    v: f64,
    tolerance: f64,
    constantes: ConstantesPermises,
) -> Result<Expr, Repli> {
    if !v.is_finite() {
        return Err(Repli::NonFini);
    }

    let mut candidats: Vec<Expr> = Vec::new();

    if let Some(r) = meilleur_rationnel(v, tolerance) {
        candidats.push(Expr::Rat(r));
    }

    for c in constantes.iter() {
        candidats.extend(candidats_pour(v, tolerance, c));
    }

    // min_by_key garde le premier en cas d’égalité : rationnel d’abord, puis ordre π, e
    candidats
        .into_iter()
        .min_by_key(Expr::complexite)
        .ok_or(Repli::AucunCandidat)
}

fn candidats_pour(v: f64, tolerance: f64, c: Constante) -> Vec<Expr> {
    let cv = c.valeur();
    let mut out = Vec::new();

    // (p/q)·c : réduites de v/c, écart mesuré sur r·c
    if let Some(r) = reduite_telle(v / cv, DENOMINATEUR_CONSTANTE, |approx| {
        (approx * cv - v).abs() <= tolerance
    }) {
        if !r.is_zero() {
            out.push(Expr::fois(Expr::Rat(r), Expr::Const(c)));
        }
    }

    // p/(q·c) : réduites de v·c, écart mesuré sur r/c
    if let Some(r) = reduite_telle(v * cv, DENOMINATEUR_CONSTANTE, |approx| {
        (approx / cv - v).abs() <= tolerance
    }) {
        if !r.is_zero() {
            let (p, q) = (r.numer().clone(), r.denom().clone());
            out.push(Expr::sur(
                Expr::Rat(BigRational::from_integer(p)),
                Expr::fois(Expr::Rat(BigRational::from_integer(q)), Expr::Const(c)),
            ));
        }
    }

    if let Some(e) = affine(v, tolerance, c) {
        out.push(e);
    }

    out
}

/// (p + t·c)/q avec p ≠ 0 et t ≠ 0 ; premier trouvé en parcourant q puis |t| croissants.
fn affine(v: f64, tolerance: f64, c: Constante) -> Option<Expr> {
    let cv = c.valeur();

    for q in 1..=Q_AFFINE {
        for t_abs in 1..=T_AFFINE {
            for t in [t_abs, -t_abs] {
                let w = v * q as f64 - t as f64 * cv;
                let p = w.round();
                if p == 0.0 || p.abs() > 1e15 {
                    continue;
                }
                let approx = (p + t as f64 * cv) / q as f64;
                if (approx - v).abs() > tolerance {
                    continue;
                }
                let p = p.to_i64()?;
                let terme_rat = Expr::rationnel(p, q);
                let terme_c = Expr::fois(Expr::rationnel(t, q), Expr::Const(c));
                return Some(Expr::plus(terme_rat, terme_c));
            }
        }
    }
    None
}

/* ------------------------ Fractions continues ------------------------ */

/// Première réduite de `x` à moins de `tolerance`.
pub fn meilleur_rationnel(x: f64, tolerance: f64) -> Option<BigRational> {
    reduite_proche(x, tolerance, DENOMINATEUR_RECHERCHE)
}

fn reduite_proche(x: f64, tolerance: f64, denominateur_max: u64) -> Option<BigRational> {
    reduite_telle(x, denominateur_max, |approx| (approx - x).abs() <= tolerance)
}

/// Première réduite de `x` (dénominateur ≤ `denominateur_max`) dont la valeur flottante
/// satisfait `accepte`.
fn reduite_telle(
    x: f64,
    denominateur_max: u64,
    accepte: impl Fn(f64) -> bool,
) -> Option<BigRational> {
    if !x.is_finite() {
        return None;
    }
    let limite = BigInt::from(denominateur_max);

    reduites(x, &limite)
        .into_iter()
        .find(|r| r.to_f64().is_some_and(&accepte))
}

/// Réduites h_n/k_n de x, jusqu’à dépasser `limite` au dénominateur.
pub fn reduites(x: f64, limite: &BigInt) -> Vec<BigRational> {
    let mut out = Vec::new();

    // h_{-1}=1, h_{-2}=0 ; k_{-1}=0, k_{-2}=1
    let (mut h0, mut h1) = (BigInt::zero(), BigInt::one());
    let (mut k0, mut k1) = (BigInt::one(), BigInt::zero());

    let mut reste = x;
    for _ in 0..MAX_TERMES {
        let a_f = reste.floor();
        let a = match BigInt::from_f64(a_f) {
            Some(a) => a,
            None => break,
        };

        let h = &a * &h1 + &h0;
        let k = &a * &k1 + &k0;

        if k.is_positive() && &k > limite {
            break;
        }

        out.push(BigRational::new(h.clone(), k.clone()));

        h0 = std::mem::replace(&mut h1, h);
        k0 = std::mem::replace(&mut k1, k);

        let frac = reste - a_f;
        if frac == 0.0 {
            break;
        }
        reste = 1.0 / frac;
        if !reste.is_finite() {
            break;
        }
    }

    out
}
