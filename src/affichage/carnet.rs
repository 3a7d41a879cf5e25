// src/affichage/carnet.rs
//
// Carnet : surface d’affichage concrète.
// - lit la cellule (lecture.rs), garde la valeur
// - demande le rendu au registre ; refus => représentation par défaut
// - historique des cellules, re-rendu complet après reconfiguration

use log::debug;

use super::init::{enregistrer_gestionnaires, initialiser_formateurs_avec};
use super::registre::Registre;
use super::surface::{Gestionnaire, SurfaceAffichage};
use crate::noyau::{lire_valeur, Parametres, TypeValeur, Valeur};

/// Ce qu’une cellule affiche.
#[derive(Clone, Debug, PartialEq)]
pub enum Sortie {
    /// Rendu d’un gestionnaire (`$…$`).
    Latex(String),
    /// Représentation par défaut (aucun gestionnaire, ou refus).
    Defaut(String),
    /// Entrée illisible.
    Erreur(String),
}

#[derive(Clone, Debug)]
pub struct Cellule {
    pub entree: String,
    pub valeur: Option<Valeur>,
    pub sortie: Sortie,
}

#[derive(Debug, Default)]
pub struct Carnet {
    registre: Registre,
    resolution: Option<u32>,
    styles: Vec<String>,
    cellules: Vec<Cellule>,
}

impl SurfaceAffichage for Carnet {
    fn fixer_resolution(&mut self, dpi: u32) {
        self.resolution = Some(dpi);
    }

    fn afficher_html(&mut self, html: &str) {
        self.styles.push(html.to_string());
    }

    fn enregistrer(&mut self, type_valeur: TypeValeur, gestionnaire: Gestionnaire) {
        self.registre.pour_type(type_valeur, gestionnaire);
    }
}

impl Carnet {
    /// Carnet nu : aucun formateur, tout passe par l’affichage par défaut.
    pub fn new() -> Self {
        Self::default()
    }

    /// Carnet initialisé (résolution, style, gestionnaires).
    pub fn avec_formateurs(p: Parametres) -> Self {
        let mut c = Self::new();
        initialiser_formateurs_avec(&mut c, p);
        c
    }

    /// Remplace les gestionnaires puis re-rend l’historique.
    pub fn reconfigurer(&mut self, p: Parametres) {
        enregistrer_gestionnaires(self, p);
        self.rafraichir();
    }

    pub fn afficher(&self, v: &Valeur) -> Sortie {
        match self.registre.formater(v) {
            Some(latex) => Sortie::Latex(latex),
            None => Sortie::Defaut(v.to_string()),
        }
    }

    /// Évalue une cellule et l’ajoute à l’historique.
    pub fn evaluer(&mut self, entree: &str) -> &Cellule {
        let cellule = match lire_valeur(entree) {
            Ok(v) => {
                let sortie = self.afficher(&v);
                debug!("cellule {:?} ({:?}) -> {sortie:?}", entree, v.type_valeur());
                Cellule {
                    entree: entree.to_string(),
                    valeur: Some(v),
                    sortie,
                }
            }
            Err(e) => Cellule {
                entree: entree.to_string(),
                valeur: None,
                sortie: Sortie::Erreur(e.to_string()),
            },
        };
        self.cellules.push(cellule);
        &self.cellules[self.cellules.len() - 1]
    }

    pub fn rafraichir(&mut self) {
        let sorties: Vec<Option<Sortie>> = self
            .cellules
            .iter()
            .map(|c| c.valeur.as_ref().map(|v| self.afficher(v)))
            .collect();
        for (c, s) in self.cellules.iter_mut().zip(sorties) {
            if let Some(s) = s {
                c.sortie = s;
            }
        }
    }

    pub fn effacer(&mut self) {
        self.cellules.clear();
    }

    pub fn cellules(&self) -> &[Cellule] {
        &self.cellules
    }

    pub fn resolution(&self) -> Option<u32> {
        self.resolution
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn registre(&self) -> &Registre {
        &self.registre
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affichage::init::STYLE_VSCODE;

    fn carnet() -> Carnet {
        Carnet::avec_formateurs(Parametres::default())
    }

    #[test]
    fn initialisation() {
        let c = carnet();
        assert_eq!(c.resolution(), Some(120));
        assert_eq!(c.styles(), &[STYLE_VSCODE.to_string()]);
        assert_eq!(c.registre().len(), 4);
    }

    #[test]
    fn scalaires_en_latex() {
        let mut c = carnet();
        assert_eq!(c.evaluer("pi").sortie, Sortie::Latex(r"$\pi$".into()));
        assert_eq!(c.evaluer("1/3").sortie, Sortie::Latex(r"$\frac{1}{3}$".into()));
        assert_eq!(c.evaluer("1 + 0j").sortie, Sortie::Latex("$1$".into()));
        assert_eq!(c.evaluer("2j").sortie, Sortie::Latex("$2 i$".into()));
        assert_eq!(c.cellules().len(), 4);
    }

    #[test]
    fn tableaux() {
        let mut c = carnet();
        match &c.evaluer("arange(10)").sortie {
            Sortie::Latex(s) => {
                assert!(s.contains(r"\vdots"));
                assert!(s.ends_with(r"9\end{matrix}\right]$"));
            }
            autre => panic!("obtenu {autre:?}"),
        }
        match &c.evaluer("zeros((8, 8))").sortie {
            Sortie::Latex(s) => assert!(s.contains(r"\ddots")),
            autre => panic!("obtenu {autre:?}"),
        }
    }

    #[test]
    fn repli_affichage_par_defaut() {
        let mut c = carnet();
        assert_eq!(c.evaluer("'abc'").sortie, Sortie::Defaut("\"abc\"".into()));
        assert_eq!(
            c.evaluer("zeros((2, 2, 2))").sortie,
            Sortie::Defaut(lire_valeur("zeros((2, 2, 2))").unwrap().to_string())
        );
        assert!(matches!(c.evaluer("[]").sortie, Sortie::Defaut(_)));
        assert!(matches!(c.evaluer("['a', 1]").sortie, Sortie::Defaut(_)));
    }

    #[test]
    fn carnet_nu_tout_par_defaut() {
        let mut c = Carnet::new();
        assert_eq!(c.evaluer("0.5").sortie, Sortie::Defaut("0.5".into()));
        assert_eq!(c.evaluer("1 - 2j").sortie, Sortie::Defaut("(1.0-2.0j)".into()));
    }

    #[test]
    fn erreurs_de_lecture() {
        let mut c = carnet();
        assert!(matches!(c.evaluer("x + 1").sortie, Sortie::Erreur(_)));
        assert!(matches!(c.evaluer("[1, 2").sortie, Sortie::Erreur(_)));
    }

    #[test]
    fn reconfiguration_re_rend_l_historique() {
        let mut c = carnet();
        c.evaluer("0.123456789");
        c.evaluer("x");
        c.reconfigurer(Parametres::default().avec_chiffres(2));

        assert_eq!(c.cellules()[0].sortie, Sortie::Latex("$0.12$".into()));
        assert!(matches!(c.cellules()[1].sortie, Sortie::Erreur(_)));
        // le style n’est pas réémis
        assert_eq!(c.styles().len(), 1);
    }

    #[test]
    fn effacer() {
        let mut c = carnet();
        c.evaluer("1");
        c.effacer();
        assert!(c.cellules().is_empty());
    }
}
