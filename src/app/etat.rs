//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état du carnet (entrée, historique, erreur, réglages d’affichage)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune lecture ni rendu ici : tout passe par `Carnet`.
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur les chiffres et la fenêtre de troncature.

use formateur_qpur::noyau::parametres::{
    CHIFFRES_MAX, CHIFFRES_SIGNIFICATIFS, FENETRE_DEFAUT,
};
use formateur_qpur::noyau::{FenetreTroncature, Parametres};
use formateur_qpur::Carnet;

/// Garde-fou : au-delà, la grille n’est plus lisible dans la fenêtre.
const FENETRE_MAX: usize = 30;

#[derive(Debug)]
pub struct AppCarnet {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- carnet (registre + historique) ---
    pub carnet: Carnet,

    // --- sorties ---
    pub erreur: String, // message si la cellule est illisible

    // --- paramètres ---
    pub chiffres: usize,
    pub lignes_max: usize,
    pub colonnes_max: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCarnet {
    fn default() -> Self {
        Self {
            entree: String::new(),
            carnet: Carnet::avec_formateurs(Parametres::default()),
            erreur: String::new(),
            chiffres: CHIFFRES_SIGNIFICATIFS,
            lignes_max: FENETRE_DEFAUT.lignes_max,
            colonnes_max: FENETRE_DEFAUT.colonnes_max,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCarnet {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + historique + réglages par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.chiffres = CHIFFRES_SIGNIFICATIFS;
        self.lignes_max = FENETRE_DEFAUT.lignes_max;
        self.colonnes_max = FENETRE_DEFAUT.colonnes_max;
        self.carnet = Carnet::avec_formateurs(self.parametres());
        self.erreur.clear();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher à l’historique).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer l’historique + erreur (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.carnet.effacer();
        self.erreur.clear();
        self.focus_entree = true;
    }

    /// Paramètres courants du rendu.
    pub fn parametres(&self) -> Parametres {
        Parametres::default()
            .avec_chiffres(self.chiffres)
            .avec_fenetre(FenetreTroncature::new(self.lignes_max, self.colonnes_max))
    }

    /// Évalue l’entrée courante comme une cellule du carnet.
    ///
    /// Choix UX : une entrée illisible reste dans l’historique (sortie en erreur)
    /// ET le message est recopié sous le champ.
    pub fn evaluer_entree(&mut self) {
        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.erreur = "Entrée vide".to_string();
            self.focus_entree = true;
            return;
        }

        let cellule = self.carnet.evaluer(&s);
        self.erreur = match &cellule.sortie {
            formateur_qpur::affichage::Sortie::Erreur(e) => e.clone(),
            _ => String::new(),
        };
        self.focus_entree = true;
    }

    /// Garde-fou : limite les chiffres significatifs (1..=17).
    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.clamp(1, CHIFFRES_MAX);
        self.appliquer();
    }

    /// Garde-fou : fenêtre de troncature (1..=30 sur chaque axe).
    pub fn set_fenetre(&mut self, lignes: usize, colonnes: usize) {
        self.lignes_max = lignes.clamp(1, FENETRE_MAX);
        self.colonnes_max = colonnes.clamp(1, FENETRE_MAX);
        self.appliquer();
    }

    fn appliquer(&mut self) {
        let p = self.parametres();
        self.carnet.reconfigurer(p);
        self.focus_entree = true;
    }
}
