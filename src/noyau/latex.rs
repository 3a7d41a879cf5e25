// src/noyau/latex.rs

use num_rational::BigRational;
use num_traits::{One, Signed};

use std::fmt;

use super::decimal::format_decimal;
use super::expr::Expr;

/* ------------------------ Helpers rationnels ------------------------ */

fn format_rat_latex(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        return format!("{n}");
    }
    if n.is_negative() {
        format!(r"- \frac{{{}}}{{{d}}}", -n)
    } else {
        format!(r"\frac{{{n}}}{{{d}}}")
    }
}

/// Coefficient d’un produit “coeff · symboles”.
enum Coeff {
    Rat(BigRational),
    Decimal(f64, usize),
}

/// Tente de reconnaître coeff·(π, e, i)… ; None si le produit contient une somme/division.
fn as_coeff_symboles(e: &Expr) -> Option<(Coeff, Vec<&'static str>)> {
    use Expr::*;

    match e {
        Rat(r) => Some((Coeff::Rat(r.clone()), Vec::new())),
        Decimal { valeur, chiffres } => Some((Coeff::Decimal(*valeur, *chiffres), Vec::new())),
        Const(c) => Some((Coeff::Rat(BigRational::one()), vec![c.latex()])),
        I => Some((Coeff::Rat(BigRational::one()), vec!["i"])),
        Mul(a, b) => {
            let (ca, mut sa) = as_coeff_symboles(a)?;
            let (cb, sb) = as_coeff_symboles(b)?;
            let c = match (ca, cb) {
                (Coeff::Rat(x), Coeff::Rat(y)) => Coeff::Rat(x * y),
                (Coeff::Rat(x), Coeff::Decimal(v, k)) | (Coeff::Decimal(v, k), Coeff::Rat(x))
                    if x.is_one() =>
                {
                    Coeff::Decimal(v, k)
                }
                _ => return None,
            };
            sa.extend(sb);
            Some((c, sa))
        }
        Add(_, _) | Div(_, _) => None,
    }
}

/// (p/q)·S -> pS/q ; S/q si |p|=1 ; “- ” devant si négatif.
fn format_coeff_symboles(c: &Coeff, symboles: &[&str]) -> String {
    let s = symboles.join(" ");

    match c {
        Coeff::Decimal(v, k) => {
            let d = format_decimal(*v, *k);
            if s.is_empty() {
                d
            } else {
                format!("{d} {s}")
            }
        }
        Coeff::Rat(r) => {
            if s.is_empty() {
                return format_rat_latex(r);
            }
            let p = r.numer();
            let q = r.denom();
            let p_abs = p.abs();

            let num = if p_abs.is_one() {
                s
            } else {
                format!("{p_abs} {s}")
            };
            let corps = if q.is_one() {
                num
            } else {
                format!(r"\frac{{{num}}}{{{q}}}")
            };
            if p.is_negative() {
                format!("- {corps}")
            } else {
                corps
            }
        }
    }
}

fn entre_parentheses_si_somme(e: &Expr) -> String {
    match e {
        Expr::Add(_, _) => format!(r"\left({}\right)", format_latex(e)),
        _ => format_latex(e),
    }
}

/* ------------------------ Affichage LaTeX “joli” ------------------------ */

/// Formate l’expression en LaTeX (style proche des carnets : \frac, \pi, i).
pub fn format_latex(e: &Expr) -> String {
    use Expr::*;

    match e {
        Rat(r) => format_rat_latex(r),
        Decimal { valeur, chiffres } => format_decimal(*valeur, *chiffres),
        Const(c) => c.latex().to_string(),
        I => "i".to_string(),

        Mul(a, b) => {
            if let Some((c, symboles)) = as_coeff_symboles(e) {
                return format_coeff_symboles(&c, &symboles);
            }
            format!(
                "{} {}",
                entre_parentheses_si_somme(a),
                entre_parentheses_si_somme(b)
            )
        }

        Div(a, b) => {
            // - p / x  => - \frac{p}{x}
            if let Rat(r) = a.as_ref() {
                if r.is_negative() {
                    let p: BigRational = -r.clone();
                    return format!(
                        r"- \frac{{{}}}{{{}}}",
                        format_rat_latex(&p),
                        format_latex(b)
                    );
                }
            }
            format!(r"\frac{{{}}}{{{}}}", format_latex(a), format_latex(b))
        }

        // a + (-b) => a - b
        Add(a, b) => {
            let sa = format_latex(a);
            let sb = format_latex(b);
            if let Some(reste) = sb.strip_prefix("- ") {
                format!("{sa} - {reste}")
            } else if let Some(reste) = sb.strip_prefix('-') {
                format!("{sa} - {reste}")
            } else {
                format!("{sa} + {sb}")
            }
        }
    }
}

/// Adaptateur Display : `write!(s, "{}", Latex(&e))`.
pub struct Latex<'a>(pub &'a Expr);

impl fmt::Display for Latex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_latex(self.0))
    }
}
