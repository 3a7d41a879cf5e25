//! Paramètres réglables du noyau.
//!
//! Les valeurs par défaut sont des constantes de module, lues à chaque appel via
//! `Parametres::default()`. Un appelant peut surcharger appel par appel avec les
//! setters chaînables. Aucun fichier de configuration, aucune variable d’environnement.

use super::constantes::ConstantesPermises;

/// Seuil absolu : |x| < TOLERANCE_ZERO => 0 exact. Sert aussi de tolérance de validation.
pub const TOLERANCE_ZERO: f64 = 1e-14;

/// Dénominateur maximal accepté pour un candidat rationnel pur.
pub const DENOMINATEUR_MAX: u64 = 10_000;

/// Chiffres significatifs du repli décimal.
pub const CHIFFRES_SIGNIFICATIFS: usize = 4;

/// Garde-fou : un f64 ne porte pas plus de 17 chiffres utiles.
pub const CHIFFRES_MAX: usize = 17;

/// Fenêtre de troncature par défaut (lignes, colonnes).
pub const FENETRE_DEFAUT: FenetreTroncature = FenetreTroncature {
    lignes_max: 6,
    colonnes_max: 6,
};

/// Nombre maximal d’éléments affichés avant l’insertion d’une ellipse.
///
/// La dernière ligne (colonne) est toujours conservée : une fenêtre de 6 montre
/// 5 éléments de tête, l’ellipse, puis le dernier élément.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FenetreTroncature {
    pub lignes_max: usize,
    pub colonnes_max: usize,
}

impl FenetreTroncature {
    pub const fn new(lignes_max: usize, colonnes_max: usize) -> Self {
        Self {
            lignes_max,
            colonnes_max,
        }
    }
}

impl Default for FenetreTroncature {
    fn default() -> Self {
        FENETRE_DEFAUT
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parametres {
    pub tolerance_zero: f64,
    pub denominateur_max: u64,
    pub chiffres_significatifs: usize,
    pub constantes: ConstantesPermises,
    pub fenetre: FenetreTroncature,
}

impl Default for Parametres {
    fn default() -> Self {
        Self {
            tolerance_zero: TOLERANCE_ZERO,
            denominateur_max: DENOMINATEUR_MAX,
            chiffres_significatifs: CHIFFRES_SIGNIFICATIFS,
            constantes: ConstantesPermises::default(),
            fenetre: FENETRE_DEFAUT,
        }
    }
}

impl Parametres {
    /// Tolérance négative ou NaN : on garde la valeur par défaut.
    pub fn avec_tolerance(mut self, tolerance: f64) -> Self {
        if tolerance >= 0.0 {
            self.tolerance_zero = tolerance;
        }
        self
    }

    pub fn avec_denominateur_max(mut self, denominateur_max: u64) -> Self {
        self.denominateur_max = denominateur_max.max(1);
        self
    }

    /// Borné à [1, CHIFFRES_MAX].
    pub fn avec_chiffres(mut self, chiffres: usize) -> Self {
        self.chiffres_significatifs = chiffres.clamp(1, CHIFFRES_MAX);
        self
    }

    pub fn avec_constantes(mut self, constantes: ConstantesPermises) -> Self {
        self.constantes = constantes;
        self
    }

    pub fn avec_fenetre(mut self, fenetre: FenetreTroncature) -> Self {
        self.fenetre = fenetre;
        self
    }
}
