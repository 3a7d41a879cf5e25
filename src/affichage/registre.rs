// src/affichage/registre.rs
//
// Table de dispatch par type d’exécution (équivalent d’un `for_type`).
// - une entrée par TypeValeur, la dernière inscription gagne
// - pas d’entrée ou gestionnaire qui renvoie None => affichage par défaut

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::surface::Gestionnaire;
use crate::noyau::{TypeValeur, Valeur};

#[derive(Default)]
pub struct Registre {
    gestionnaires: HashMap<TypeValeur, Gestionnaire>,
}

impl Registre {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installe le gestionnaire de `type_valeur` (remplace l’ancien s’il existe).
    pub fn pour_type(&mut self, type_valeur: TypeValeur, gestionnaire: Gestionnaire) {
        if self.gestionnaires.insert(type_valeur, gestionnaire).is_some() {
            debug!("gestionnaire {type_valeur:?} remplacé");
        }
    }

    /// Rendu via le gestionnaire du type de `v` ; None si aucun ou s’il refuse.
    pub fn formater(&self, v: &Valeur) -> Option<String> {
        let g = self.gestionnaires.get(&v.type_valeur())?;
        g(v)
    }

    pub fn contient(&self, type_valeur: TypeValeur) -> bool {
        self.gestionnaires.contains_key(&type_valeur)
    }

    pub fn len(&self) -> usize {
        self.gestionnaires.len()
    }

    pub fn est_vide(&self) -> bool {
        self.gestionnaires.is_empty()
    }
}

impl fmt::Debug for Registre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<String> = self
            .gestionnaires
            .keys()
            .map(|t| format!("{t:?}"))
            .collect();
        types.sort();
        f.debug_struct("Registre").field("types", &types).finish()
    }
}
