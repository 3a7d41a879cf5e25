// src/noyau/constantes.rs
//
// Ensemble figé des constantes “communes” acceptées dans une forme symbolique.
// - ordre fixe : π puis e (déterminisme de la recherche)
// - valeur Copy, immuable : pas de liste partagée entre appels

use std::f64::consts;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    /// Ordre de parcours canonique.
    pub const TOUTES: [Constante; 2] = [Constante::Pi, Constante::E];

    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => consts::PI,
            Constante::E => consts::E,
        }
    }

    pub fn latex(self) -> &'static str {
        match self {
            Constante::Pi => r"\pi",
            Constante::E => "e",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Constante::Pi => 0b01,
            Constante::E => 0b10,
        }
    }
}

/// Sous-ensemble de {π, e}.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstantesPermises(u8);

impl ConstantesPermises {
    pub const AUCUNE: ConstantesPermises = ConstantesPermises(0);
    pub const TOUTES: ConstantesPermises = ConstantesPermises(0b11);

    pub fn avec(self, c: Constante) -> Self {
        ConstantesPermises(self.0 | c.bit())
    }

    pub fn sans(self, c: Constante) -> Self {
        ConstantesPermises(self.0 & !c.bit())
    }

    pub fn contient(self, c: Constante) -> bool {
        self.0 & c.bit() != 0
    }

    pub fn est_vide(self) -> bool {
        self.0 == 0
    }

    /// Parcours dans l’ordre fixe (π, e).
    pub fn iter(self) -> impl Iterator<Item = Constante> {
        Constante::TOUTES
            .into_iter()
            .filter(move |c| self.contient(*c))
    }
}

impl Default for ConstantesPermises {
    fn default() -> Self {
        ConstantesPermises::TOUTES
    }
}

impl FromIterator<Constante> for ConstantesPermises {
    fn from_iter<I: IntoIterator<Item = Constante>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ConstantesPermises::AUCUNE, |acc, c| acc.avec(c))
    }
}
