// src/affichage/surface.rs

use crate::noyau::{TypeValeur, Valeur};

/// Gestionnaire d’affichage : LaTeX entre `$…$`, ou None => affichage par défaut.
pub type Gestionnaire = Box<dyn Fn(&Valeur) -> Option<String>>;

/// Ce que l’environnement du carnet offre aux formateurs.
pub trait SurfaceAffichage {
    /// Résolution des figures (dpi).
    fn fixer_resolution(&mut self, dpi: u32);

    /// Émet un fragment HTML (feuille de style) vers la surface.
    fn afficher_html(&mut self, html: &str);

    /// Installe (ou remplace) le gestionnaire d’un type.
    fn enregistrer(&mut self, type_valeur: TypeValeur, gestionnaire: Gestionnaire);
}
