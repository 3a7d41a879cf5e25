//! Noyau : simplification scalaire (pipeline réel)
//!
//! complexe ? -> (re, im) récursif
//! |v| < ε    -> 0 exact (avant toute recherche)
//! recherche  -> candidat (rationnel / constante)
//! portes     -> tolérance, dénominateur ≤ D, coefficients ≤ 10^17,
//!               pas de constante au dénominateur, forme reconnue
//! sinon      -> repli décimal à k chiffres
//!
//! Ne panique pas, ne renvoie pas d’erreur : chaque échec choisit le repli décimal.

use std::fmt::Write;

use log::debug;
use num_bigint::BigInt;
use num_complex::Complex64;

use super::erreurs::{ErreurRendu, Repli};
use super::expr::Expr;
use super::latex::Latex;
use super::parametres::Parametres;
use super::recherche::rechercher;
use super::valeur::Scalaire;

/// Un f64 ne porte pas plus de 17 chiffres significatifs.
const NUMERATEUR_MAX: u64 = 100_000_000_000_000_000;

/// API publique : meilleure forme close de `valeur`, ou son arrondi décimal.
pub fn simplifier(valeur: Scalaire, p: &Parametres) -> Expr {
    match valeur {
        Scalaire::Complexe(z) => simplifier_complexe(z, p),
        Scalaire::Reel(v) => simplifier_reel(v, p),
        Scalaire::Entier(n) => simplifier_entier(n, p),
    }
}

/// Rendu LaTeX d’un scalaire (sans délimiteurs $…$). None si la mise en forme échoue.
pub fn rendre_scalaire(valeur: Scalaire, p: &Parametres) -> Option<String> {
    match latex_scalaire(valeur, p) {
        Ok(s) => Some(s),
        Err(e) => {
            debug!("rendu scalaire abandonné ({valeur}) : {e}");
            None
        }
    }
}

pub(crate) fn latex_scalaire(valeur: Scalaire, p: &Parametres) -> Result<String, ErreurRendu> {
    let expr = simplifier(valeur, p);
    let mut out = String::new();
    write!(out, "{}", Latex(&expr))?;
    Ok(out)
}

/* ------------------------ Décomposition complexe ------------------------ */

fn simplifier_complexe(z: Complex64, p: &Parametres) -> Expr {
    let re = simplifier_reel(z.re, p);
    let im = simplifier_reel(z.im, p);

    if im.est_zero() {
        return re;
    }
    let partie_im = Expr::fois(im, Expr::I);
    if re.est_zero() {
        return partie_im;
    }
    Expr::plus(re, partie_im)
}

/* ------------------------ Entiers : exacts, sans aller-retour flottant ------------------------ */

fn simplifier_entier(n: i64, p: &Parametres) -> Expr {
    if (n as f64).abs() < p.tolerance_zero {
        return Expr::zero();
    }
    Expr::entier(n)
}

/* ------------------------ Réels ------------------------ */

fn simplifier_reel(v: f64, p: &Parametres) -> Expr {
    // priorité absolue : le bruit autour de 0 ne devient jamais un rationnel non nul
    if v.abs() < p.tolerance_zero {
        return Expr::zero();
    }

    match candidat_valide(v, p) {
        Ok(c) => c,
        Err(raison) => {
            debug!("repli décimal pour {v:e} : {raison}");
            Expr::decimal(v, p.chiffres_significatifs)
        }
    }
}

/// Recherche + portes de validation. Err = raison du repli.
fn candidat_valide(v: f64, p: &Parametres) -> Result<Expr, Repli> {
    let candidat = rechercher(v, p.tolerance_zero, p.constantes)?;

    // a) ré-évaluation numérique dans la tolérance
    let approx = candidat.evaluer().ok_or(Repli::EvaluationImpossible)?;
    let ecart = (approx - Complex64::new(v, 0.0)).norm();
    if !(ecart <= p.tolerance_zero) {
        return Err(Repli::HorsTolerance {
            ecart,
            tolerance: p.tolerance_zero,
        });
    }

    // b) rationnel pur : dénominateur borné
    if let Some(r) = candidat.comme_rationnel() {
        if r.denom() > &BigInt::from(p.denominateur_max) {
            return Err(Repli::DenominateurTropGrand {
                denominateur: r.denom().to_string(),
                max: p.denominateur_max,
            });
        }
    }

    // coefficients à plus de 17 chiffres : bruit de représentation, pas une forme close
    let numerateur = candidat.numerateur_max();
    if numerateur > BigInt::from(NUMERATEUR_MAX) {
        return Err(Repli::NumerateurTropGrand {
            numerateur: numerateur.to_string(),
            max: NUMERATEUR_MAX,
        });
    }

    // c) pas de constante au dénominateur (2/π, 1/e…)
    if candidat.denominateur().contient_une(p.constantes) {
        return Err(Repli::ConstanteAuDenominateur);
    }

    // d) ni rationnel, ni construit sur une constante permise => refus
    if candidat.comme_rationnel().is_none() && !candidat.contient_une(p.constantes) {
        return Err(Repli::FormeNonReconnue);
    }

    Ok(candidat)
}
