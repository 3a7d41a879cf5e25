//! Noyau Q-pur (affichage)
//!
//! Organisation interne :
//! - parametres.rs     : tolérance, dénominateur max, chiffres, fenêtre de troncature
//! - constantes.rs     : ensemble figé des constantes reconnues (π, e)
//! - valeur.rs         : Scalaire / Tableau / Valeur (entrées brutes)
//! - expr.rs           : expression candidate (Rat, constantes, i, décimal)
//! - recherche.rs      : reconnaissance rationnel / constante (fractions continues)
//! - simplificateur.rs : pipeline complet + portes de validation
//! - decimal.rs        : repli décimal à k chiffres significatifs
//! - latex.rs          : affichage LaTeX “joli” (\frac{\pi}{2}, 1 + 2 i…)
//! - matrice.rs        : rendu des tableaux 0D/1D/2D + troncature (⋮ ⋯ ⋱)
//! - jetons.rs         : tokenisation des littéraux du carnet
//! - rpn.rs            : shunting-yard + évaluation numérique
//! - lecture.rs        : littéraux → Valeur (listes imbriquées, arange, zeros…)
//! - erreurs.rs        : erreurs typées (rendu, lecture, replis)

pub mod constantes;
pub mod decimal;
pub mod erreurs;
pub mod expr;
pub mod jetons;
pub mod latex;
pub mod lecture;
pub mod matrice;
pub mod parametres;
pub mod recherche;
pub mod rpn;
pub mod simplificateur;
pub mod valeur;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use constantes::{Constante, ConstantesPermises};
pub use expr::Expr;
pub use lecture::lire_valeur;
pub use matrice::rendre_tableau;
pub use parametres::{FenetreTroncature, Parametres};
pub use simplificateur::{rendre_scalaire, simplifier};
pub use valeur::{Scalaire, Tableau, TypeValeur, Valeur};
