// src/noyau/expr.rs
//
// Expression candidate (résultat de la simplification).
// - Rat     : rationnel exact (entier si dénominateur 1)
// - Const   : constante nommée (π, e)
// - I       : unité imaginaire
// - Decimal : repli décimal (valeur + chiffres significatifs)
//
// IMPORTANT :
// - les constructeurs `plus` / `fois` replient les neutres (x+0, 1*x, 0*x)
// - `evaluer` ne panique jamais : None si division par zéro ou non fini

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;

use super::constantes::{Constante, ConstantesPermises};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Rat(BigRational),
    Const(Constante),
    I,
    Decimal { valeur: f64, chiffres: usize },

    Add(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn zero() -> Expr {
        Expr::Rat(BigRational::zero())
    }

    pub fn entier(n: i64) -> Expr {
        Expr::Rat(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn rationnel(p: i64, q: i64) -> Expr {
        Expr::Rat(BigRational::new(BigInt::from(p), BigInt::from(q)))
    }

    pub fn decimal(valeur: f64, chiffres: usize) -> Expr {
        Expr::Decimal { valeur, chiffres }
    }

    /// Zéro exact (un Decimal 0.0 n’est PAS le zéro symbolique).
    pub fn est_zero(&self) -> bool {
        matches!(self, Expr::Rat(r) if r.is_zero())
    }

    pub fn comme_rationnel(&self) -> Option<&BigRational> {
        match self {
            Expr::Rat(r) => Some(r),
            _ => None,
        }
    }

    /* ------------------------ Constructeurs repliés ------------------------ */

    pub fn plus(a: Expr, b: Expr) -> Expr {
        match (a, b) {
            (Expr::Rat(x), Expr::Rat(y)) => Expr::Rat(x + y),
            (a, b) if b.est_zero() => a,
            (a, b) if a.est_zero() => b,
            (a, b) => Expr::Add(Box::new(a), Box::new(b)),
        }
    }

    pub fn fois(a: Expr, b: Expr) -> Expr {
        match (a, b) {
            (Expr::Rat(x), Expr::Rat(y)) => Expr::Rat(x * y),
            (a, b) if a.est_zero() || b.est_zero() => Expr::zero(),
            (Expr::Rat(x), b) if x.is_one() => b,
            (a, Expr::Rat(y)) if y.is_one() => a,
            (a, b) => Expr::Mul(Box::new(a), Box::new(b)),
        }
    }

    pub fn sur(a: Expr, b: Expr) -> Expr {
        match (a, b) {
            (Expr::Rat(x), Expr::Rat(y)) if !y.is_zero() => Expr::Rat(x / y),
            (a, Expr::Rat(y)) if y.is_one() => a,
            (a, b) => Expr::Div(Box::new(a), Box::new(b)),
        }
    }

    /* ------------------------ Évaluation numérique ------------------------ */

    pub fn evaluer(&self) -> Option<Complex64> {
        use Expr::*;

        let z = match self {
            Rat(r) => Complex64::new(rationnel_en_f64(r)?, 0.0),
            Const(c) => Complex64::new(c.valeur(), 0.0),
            I => Complex64::i(),
            Decimal { valeur, .. } => Complex64::new(*valeur, 0.0),
            Add(a, b) => a.evaluer()? + b.evaluer()?,
            Mul(a, b) => a.evaluer()? * b.evaluer()?,
            Div(a, b) => {
                let d = b.evaluer()?;
                if d.norm() == 0.0 {
                    return None;
                }
                a.evaluer()? / d
            }
        };

        if z.re.is_finite() && z.im.is_finite() {
            Some(z)
        } else {
            None
        }
    }

    /* ------------------------ Inspection structurelle ------------------------ */

    pub fn contient(&self, c: Constante) -> bool {
        use Expr::*;
        match self {
            Const(k) => *k == c,
            Rat(_) | I | Decimal { .. } => false,
            Add(a, b) | Mul(a, b) | Div(a, b) => a.contient(c) || b.contient(c),
        }
    }

    pub fn contient_une(&self, constantes: ConstantesPermises) -> bool {
        constantes.iter().any(|c| self.contient(c))
    }

    /// Forme numérateur / dénominateur (sans mise au même dénominateur des sommes).
    ///
    /// - p/q       -> (p, q)
    /// - a/b       -> (num(a)·den(b), den(a)·num(b))
    /// - a·b       -> (num(a)·num(b), den(a)·den(b))
    /// - a+b, etc. -> (expr, 1)
    pub fn num_denom(&self) -> (Expr, Expr) {
        use Expr::*;
        match self {
            Rat(r) => (
                Rat(BigRational::from_integer(r.numer().clone())),
                Rat(BigRational::from_integer(r.denom().clone())),
            ),
            Mul(a, b) => {
                let (na, da) = a.num_denom();
                let (nb, db) = b.num_denom();
                (Expr::fois(na, nb), Expr::fois(da, db))
            }
            Div(a, b) => {
                let (na, da) = a.num_denom();
                let (nb, db) = b.num_denom();
                (Expr::fois(na, db), Expr::fois(da, nb))
            }
            Const(_) | I | Decimal { .. } | Add(_, _) => (self.clone(), Expr::entier(1)),
        }
    }

    pub fn denominateur(&self) -> Expr {
        self.num_denom().1
    }

    /// Complexité (plus petit = plus “simple”) : taille binaire des rationnels + nœuds.
    pub fn complexite(&self) -> u64 {
        use Expr::*;
        match self {
            Rat(r) => r.numer().bits().max(1) + r.denom().bits(),
            Const(_) | I => 2,
            Decimal { .. } => u64::MAX / 4,
            Add(a, b) | Mul(a, b) | Div(a, b) => 1 + a.complexite() + b.complexite(),
        }
    }

    /// Plus grand |numérateur| parmi les feuilles rationnelles (0 s’il n’y en a pas).
    pub fn numerateur_max(&self) -> BigInt {
        use Expr::*;
        match self {
            Rat(r) => r.numer().abs(),
            Const(_) | I | Decimal { .. } => BigInt::zero(),
            Add(a, b) | Mul(a, b) | Div(a, b) => a.numerateur_max().max(b.numerateur_max()),
        }
    }
}

fn rationnel_en_f64(r: &BigRational) -> Option<f64> {
    if let Some(x) = r.to_f64() {
        return Some(x);
    }
    // numérateur / dénominateur énormes : division en flottants
    let n = r.numer().to_f64()?;
    let d = r.denom().to_f64()?;
    Some(n / d)
}

/* ------------------------ Affichage debug (pas “joli” final) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Rat(r) => {
                let n = r.numer();
                let d = r.denom();
                if d.is_one() {
                    write!(f, "{n}")
                } else {
                    write!(f, "{n}/{d}")
                }
            }
            Const(Constante::Pi) => write!(f, "π"),
            Const(Constante::E) => write!(f, "e"),
            I => write!(f, "i"),
            Decimal { valeur, chiffres } => {
                write!(f, "{:.*e}", chiffres.saturating_sub(1), valeur)
            }
            Add(a, b) => write!(f, "({a}+{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
        }
    }
}
