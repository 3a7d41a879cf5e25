//! Formateur Q-pur
//!
//! Affichage mathématique (LaTeX) des valeurs numériques d’un carnet interactif :
//! - noyau     : simplification scalaire (rationnels, multiples de π / e) + rendu matriciel
//! - affichage : registre par type, surface d’affichage, initialisation des formateurs
//!
//! Le noyau n’expose que des fonctions pures : aucun état global, aucune dépendance
//! vers le registre. Le registre appartient à la surface (le carnet).

pub mod affichage;
pub mod noyau;

pub use affichage::{initialiser_formateurs, Carnet, Registre, SurfaceAffichage};
pub use noyau::{
    rendre_scalaire, rendre_tableau, simplifier, Parametres, Scalaire, Tableau, Valeur,
};
