// src/noyau/valeur.rs
//
// Valeurs brutes reçues par le carnet.
// - Scalaire : entier / réel / complexe (le *type* compte : 1+0j reste complexe)
// - Tableau  : ndarray n-D étiqueté par type d’élément
// - Valeur   : ce qu’une cellule produit (clé de dispatch = TypeValeur)

use ndarray::ArrayD;
use num_complex::Complex64;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalaire {
    Entier(i64),
    Reel(f64),
    Complexe(Complex64),
}

impl Scalaire {
    pub fn en_complexe(self) -> Complex64 {
        match self {
            Scalaire::Entier(n) => Complex64::new(n as f64, 0.0),
            Scalaire::Reel(x) => Complex64::new(x, 0.0),
            Scalaire::Complexe(z) => z,
        }
    }

    /// Partie réelle en f64 (l’imaginaire est ignoré).
    pub fn en_reel(self) -> f64 {
        self.en_complexe().re
    }

    pub fn type_valeur(self) -> TypeValeur {
        match self {
            Scalaire::Entier(_) => TypeValeur::Entier,
            Scalaire::Reel(_) => TypeValeur::Reel,
            Scalaire::Complexe(_) => TypeValeur::Complexe,
        }
    }

    /* ------------------------ Arithmétique (lecture du carnet) ------------------------ */

    // Promotion : Entier -> Reel -> Complexe. Entier déborde => Reel.

    pub fn additionner(self, autre: Scalaire) -> Scalaire {
        match (self, autre) {
            (Scalaire::Entier(a), Scalaire::Entier(b)) => a
                .checked_add(b)
                .map_or(Scalaire::Reel(a as f64 + b as f64), Scalaire::Entier),
            (a, b) => Scalaire::promouvoir(a, b, |x, y| x + y, |x, y| x + y),
        }
    }

    pub fn soustraire(self, autre: Scalaire) -> Scalaire {
        match (self, autre) {
            (Scalaire::Entier(a), Scalaire::Entier(b)) => a
                .checked_sub(b)
                .map_or(Scalaire::Reel(a as f64 - b as f64), Scalaire::Entier),
            (a, b) => Scalaire::promouvoir(a, b, |x, y| x - y, |x, y| x - y),
        }
    }

    pub fn multiplier(self, autre: Scalaire) -> Scalaire {
        match (self, autre) {
            (Scalaire::Entier(a), Scalaire::Entier(b)) => a
                .checked_mul(b)
                .map_or(Scalaire::Reel(a as f64 * b as f64), Scalaire::Entier),
            (a, b) => Scalaire::promouvoir(a, b, |x, y| x * y, |x, y| x * y),
        }
    }

    pub fn negatif(self) -> Scalaire {
        match self {
            Scalaire::Entier(n) => n
                .checked_neg()
                .map_or(Scalaire::Reel(-(n as f64)), Scalaire::Entier),
            Scalaire::Reel(x) => Scalaire::Reel(-x),
            Scalaire::Complexe(z) => Scalaire::Complexe(-z),
        }
    }

    /// Division “vraie” : 1/2 donne 0.5 (jamais une division entière).
    pub fn diviser(self, autre: Scalaire) -> Scalaire {
        match (self, autre) {
            (Scalaire::Complexe(_), _) | (_, Scalaire::Complexe(_)) => {
                Scalaire::Complexe(self.en_complexe() / autre.en_complexe())
            }
            (a, b) => Scalaire::Reel(a.en_reel() / b.en_reel()),
        }
    }

    pub fn puissance(self, exposant: Scalaire) -> Scalaire {
        match (self, exposant) {
            (Scalaire::Entier(a), Scalaire::Entier(n)) if n >= 0 => u32::try_from(n)
                .ok()
                .and_then(|n| a.checked_pow(n))
                .map_or(Scalaire::Reel((a as f64).powf(n as f64)), Scalaire::Entier),
            (Scalaire::Complexe(_), _) | (_, Scalaire::Complexe(_)) => {
                Scalaire::Complexe(self.en_complexe().powc(exposant.en_complexe()))
            }
            (a, b) => {
                let r = a.en_reel().powf(b.en_reel());
                if r.is_nan() && a.en_reel() < 0.0 {
                    // base négative, exposant fractionnaire => branche principale complexe
                    Scalaire::Complexe(a.en_complexe().powc(b.en_complexe()))
                } else {
                    Scalaire::Reel(r)
                }
            }
        }
    }

    fn promouvoir(
        a: Scalaire,
        b: Scalaire,
        reel: impl Fn(f64, f64) -> f64,
        complexe: impl Fn(Complex64, Complex64) -> Complex64,
    ) -> Scalaire {
        match (a, b) {
            (Scalaire::Complexe(_), _) | (_, Scalaire::Complexe(_)) => {
                Scalaire::Complexe(complexe(a.en_complexe(), b.en_complexe()))
            }
            _ => Scalaire::Reel(reel(a.en_reel(), b.en_reel())),
        }
    }
}

impl From<i64> for Scalaire {
    fn from(n: i64) -> Self {
        Scalaire::Entier(n)
    }
}

impl From<i32> for Scalaire {
    fn from(n: i32) -> Self {
        Scalaire::Entier(n as i64)
    }
}

impl From<f64> for Scalaire {
    fn from(x: f64) -> Self {
        Scalaire::Reel(x)
    }
}

impl From<Complex64> for Scalaire {
    fn from(z: Complex64) -> Self {
        Scalaire::Complexe(z)
    }
}

/// Représentation par défaut (repli quand aucun formateur ne répond).
impl fmt::Display for Scalaire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalaire::Entier(n) => write!(f, "{n}"),
            Scalaire::Reel(x) => write!(f, "{x:?}"),
            Scalaire::Complexe(z) => {
                let signe = if z.im.is_sign_negative() { '-' } else { '+' };
                write!(f, "({:?}{signe}{:?}j)", z.re, z.im.abs())
            }
        }
    }
}

/* ------------------------ Tableaux ------------------------ */

/// Tableau n-D étiqueté par type d’élément (équivalent d’un dtype).
///
/// `Texte` et `Objet` existent pour que le carnet puisse les produire ; le rendu
/// matriciel les refuse.
#[derive(Clone, Debug, PartialEq)]
pub enum Tableau {
    Entier(ArrayD<i64>),
    Reel(ArrayD<f64>),
    Complexe(ArrayD<Complex64>),
    Texte(ArrayD<String>),
    /// Éléments hétérogènes, conservés sous leur représentation textuelle.
    Objet(ArrayD<String>),
}

impl Tableau {
    pub fn forme(&self) -> &[usize] {
        match self {
            Tableau::Entier(a) => a.shape(),
            Tableau::Reel(a) => a.shape(),
            Tableau::Complexe(a) => a.shape(),
            Tableau::Texte(a) => a.shape(),
            Tableau::Objet(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.forme().len()
    }

    pub fn len(&self) -> usize {
        self.forme().iter().product()
    }

    pub fn est_vide(&self) -> bool {
        self.len() == 0
    }

    pub fn type_element(&self) -> &'static str {
        match self {
            Tableau::Entier(_) => "int64",
            Tableau::Reel(_) => "float64",
            Tableau::Complexe(_) => "complex128",
            Tableau::Texte(_) => "str",
            Tableau::Objet(_) => "object",
        }
    }

    pub fn est_numerique(&self) -> bool {
        matches!(
            self,
            Tableau::Entier(_) | Tableau::Reel(_) | Tableau::Complexe(_)
        )
    }

    /// Vue uniforme en scalaires ; None si le type n’est pas numérique.
    pub fn en_scalaires(&self) -> Option<ArrayD<Scalaire>> {
        match self {
            Tableau::Entier(a) => Some(a.mapv(Scalaire::Entier)),
            Tableau::Reel(a) => Some(a.mapv(Scalaire::Reel)),
            Tableau::Complexe(a) => Some(a.mapv(Scalaire::Complexe)),
            Tableau::Texte(_) | Tableau::Objet(_) => None,
        }
    }
}

impl From<ArrayD<i64>> for Tableau {
    fn from(a: ArrayD<i64>) -> Self {
        Tableau::Entier(a)
    }
}

impl From<ArrayD<f64>> for Tableau {
    fn from(a: ArrayD<f64>) -> Self {
        Tableau::Reel(a)
    }
}

impl From<ArrayD<Complex64>> for Tableau {
    fn from(a: ArrayD<Complex64>) -> Self {
        Tableau::Complexe(a)
    }
}

impl From<ArrayD<String>> for Tableau {
    fn from(a: ArrayD<String>) -> Self {
        Tableau::Texte(a)
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tableau::Entier(a) => write!(f, "{a}"),
            Tableau::Reel(a) => write!(f, "{a}"),
            Tableau::Complexe(a) => write!(f, "{a}"),
            Tableau::Texte(a) => write!(f, "{a}"),
            Tableau::Objet(a) => write!(f, "{a}"),
        }
    }
}

/* ------------------------ Valeur de cellule ------------------------ */

/// Clé du registre d’affichage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeValeur {
    Complexe,
    Reel,
    Entier,
    Tableau,
    Texte,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Scalaire(Scalaire),
    Tableau(Tableau),
    Texte(String),
}

impl Valeur {
    pub fn type_valeur(&self) -> TypeValeur {
        match self {
            Valeur::Scalaire(s) => s.type_valeur(),
            Valeur::Tableau(_) => TypeValeur::Tableau,
            Valeur::Texte(_) => TypeValeur::Texte,
        }
    }
}

impl From<Scalaire> for Valeur {
    fn from(s: Scalaire) -> Self {
        Valeur::Scalaire(s)
    }
}

impl From<Tableau> for Valeur {
    fn from(t: Tableau) -> Self {
        Valeur::Tableau(t)
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Scalaire(s) => write!(f, "{s}"),
            Valeur::Tableau(t) => write!(f, "{t}"),
            Valeur::Texte(s) => write!(f, "{s:?}"),
        }
    }
}
