// src/affichage/init.rs
//
// Initialisation unique des formateurs :
// 1) résolution des figures
// 2) feuille de style (thème VS Code : fonds transparents, couleurs de l’éditeur)
// 3) gestionnaires LaTeX pour Complexe / Reel / Entier / Tableau
//
// Relancer l’initialisation remplace les mêmes entrées.

use log::info;

use super::surface::SurfaceAffichage;
use crate::noyau::{rendre_scalaire, rendre_tableau, Parametres, TypeValeur, Valeur};

/// Résolution des figures (dpi).
pub const RESOLUTION_FIGURES: u32 = 120;

/// Types scalaires pris en charge (l’ordre n’a pas d’importance).
pub const TYPES_SCALAIRES: [TypeValeur; 3] =
    [TypeValeur::Complexe, TypeValeur::Reel, TypeValeur::Entier];

pub const STYLE_VSCODE: &str = r#"
<style>
    .cell-output-ipywidget-background {
        background-color: transparent !important;
    }
    .jp-OutputArea-output {
        background-color: transparent !important;
    }
    :root {
        --jp-widgets-color: var(--vscode-editor-foreground);
        --jp-widgets-font-size: var(--vscode-editor-font-size);
    }
</style>
"#;

/// Point d’entrée : paramètres par défaut, lus à chaque appel de gestionnaire.
pub fn initialiser_formateurs<S: SurfaceAffichage + ?Sized>(surface: &mut S) {
    initialiser_formateurs_avec(surface, Parametres::default());
}

pub fn initialiser_formateurs_avec<S: SurfaceAffichage + ?Sized>(surface: &mut S, p: Parametres) {
    surface.fixer_resolution(RESOLUTION_FIGURES);
    surface.afficher_html(STYLE_VSCODE);
    enregistrer_gestionnaires(surface, p);
    info!(
        "formateurs installés ({} dpi, {} chiffres, fenêtre {}×{})",
        RESOLUTION_FIGURES,
        p.chiffres_significatifs,
        p.fenetre.lignes_max,
        p.fenetre.colonnes_max
    );
}

/// Seulement les gestionnaires (reconfiguration sans réémettre le style).
pub fn enregistrer_gestionnaires<S: SurfaceAffichage + ?Sized>(surface: &mut S, p: Parametres) {
    for t in TYPES_SCALAIRES {
        surface.enregistrer(
            t,
            Box::new(move |v: &Valeur| match v {
                Valeur::Scalaire(s) => rendre_scalaire(*s, &p).map(en_mode_math),
                _ => None,
            }),
        );
    }

    surface.enregistrer(
        TypeValeur::Tableau,
        Box::new(move |v: &Valeur| match v {
            Valeur::Tableau(t) => rendre_tableau(t, &p).map(en_mode_math),
            _ => None,
        }),
    );
}

fn en_mode_math(latex: String) -> String {
    format!("${latex}$")
}
