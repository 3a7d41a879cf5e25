// src/noyau/matrice.rs
//
// Rendu matriciel (0D / 1D / 2D) avec troncature.
//
// - 0D : délègue au rendu scalaire
// - 1D : vecteur colonne ; au-delà de la fenêtre : tête, \vdots, dernier
// - 2D : grille ; chaque axe qui dépasse est tronqué indépendamment
//        (ligne d’ellipse : \vdots aux bords, colonne d’ellipse : \cdots aux bords,
//         croisement : \ddots, le reste vide)
//
// Toute erreur (forme, type, fenêtre, indice) => None : le carnet garde son affichage par défaut.

use std::fmt::Write;

use log::debug;
use ndarray::{ArrayD, IxDyn};

use super::erreurs::ErreurRendu;
use super::parametres::Parametres;
use super::simplificateur::latex_scalaire;
use super::valeur::{Scalaire, Tableau};

/// Position conservée sur un axe tronqué.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Indice {
    Element(usize),
    Ellipse,
}

/// Cellule de remplissage introduite par la troncature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marqueur {
    Vertical,
    Horizontal,
    Diagonal,
    Vide,
}

impl Marqueur {
    fn latex(self) -> &'static str {
        match self {
            Marqueur::Vertical => r"\vdots",
            Marqueur::Horizontal => r"\cdots",
            Marqueur::Diagonal => r"\ddots",
            Marqueur::Vide => "",
        }
    }
}

/// API publique : LaTeX du tableau (sans $…$), ou None si non rendable.
pub fn rendre_tableau(t: &Tableau, p: &Parametres) -> Option<String> {
    match construire(t, p) {
        Ok(s) => Some(s),
        Err(e) => {
            debug!("tableau {:?} non rendu : {e}", t.forme());
            None
        }
    }
}

fn construire(t: &Tableau, p: &Parametres) -> Result<String, ErreurRendu> {
    let ndim = t.ndim();
    if ndim > 2 {
        return Err(ErreurRendu::DimensionNonSupportee { ndim });
    }
    let a = t.en_scalaires().ok_or(ErreurRendu::TypeNonNumerique {
        type_element: t.type_element(),
    })?;
    if t.est_vide() {
        return Err(ErreurRendu::TableauVide);
    }

    match ndim {
        0 => {
            let s = a.iter().next().copied().ok_or(ErreurRendu::TableauVide)?;
            latex_scalaire(s, p)
        }
        1 => vecteur(&a, p),
        _ => grille(&a, p),
    }
}

/* ------------------------ Troncature ------------------------ */

/// n ≤ cap : tout ; sinon cap-1 éléments de tête, l’ellipse, le dernier.
fn indices_tronques(n: usize, cap: usize, p: &Parametres) -> Result<Vec<Indice>, ErreurRendu> {
    if cap == 0 {
        return Err(ErreurRendu::FenetreInvalide {
            lignes: p.fenetre.lignes_max,
            colonnes: p.fenetre.colonnes_max,
        });
    }
    if n <= cap {
        return Ok((0..n).map(Indice::Element).collect());
    }
    let mut out: Vec<Indice> = (0..cap - 1).map(Indice::Element).collect();
    out.push(Indice::Ellipse);
    out.push(Indice::Element(n - 1));
    Ok(out)
}

/// Marqueur d’une case d’ellipse.
///
/// Croisement des deux ellipses : `\ddots`. Ligne d’ellipse : `\vdots` dans la première et
/// la dernière colonne seulement. Colonne d’ellipse : `\cdots` dans la première et la
/// dernière ligne seulement. Toutes les autres cases d’ellipse restent vides.
fn marqueur(ligne: Indice, colonne: Indice, bord_ligne: bool, bord_colonne: bool) -> Marqueur {
    match (ligne, colonne) {
        (Indice::Ellipse, Indice::Ellipse) => Marqueur::Diagonal,
        (Indice::Ellipse, _) if bord_colonne => Marqueur::Vertical,
        (_, Indice::Ellipse) if bord_ligne => Marqueur::Horizontal,
        _ => Marqueur::Vide,
    }
}

/* ------------------------ Mise en page ------------------------ */

fn element(a: &ArrayD<Scalaire>, indice: &[usize]) -> Result<Scalaire, ErreurRendu> {
    a.get(IxDyn(indice))
        .copied()
        .ok_or_else(|| ErreurRendu::IndiceHorsBornes {
            indice: indice.to_vec(),
            forme: a.shape().to_vec(),
        })
}

fn envelopper(lignes: &[String]) -> Result<String, ErreurRendu> {
    let mut out = String::new();
    write!(
        out,
        r"\left[\begin{{matrix}}{}\end{{matrix}}\right]",
        lignes.join(r"\\")
    )?;
    Ok(out)
}

fn vecteur(a: &ArrayD<Scalaire>, p: &Parametres) -> Result<String, ErreurRendu> {
    let n = a.shape()[0];
    let lignes = indices_tronques(n, p.fenetre.lignes_max, p)?
        .into_iter()
        .map(|i| match i {
            Indice::Element(i) => latex_scalaire(element(a, &[i])?, p),
            Indice::Ellipse => Ok(Marqueur::Vertical.latex().to_string()),
        })
        .collect::<Result<Vec<_>, _>>()?;
    envelopper(&lignes)
}

fn grille(a: &ArrayD<Scalaire>, p: &Parametres) -> Result<String, ErreurRendu> {
    let forme = a.shape();
    let lignes_idx = indices_tronques(forme[0], p.fenetre.lignes_max, p)?;
    let colonnes_idx = indices_tronques(forme[1], p.fenetre.colonnes_max, p)?;
    let derniere_ligne = lignes_idx.len() - 1;
    let derniere_colonne = colonnes_idx.len() - 1;

    let mut lignes = Vec::with_capacity(lignes_idx.len());
    for (pl, &li) in lignes_idx.iter().enumerate() {
        let bord_ligne = pl == 0 || pl == derniere_ligne;
        let mut cellules = Vec::with_capacity(colonnes_idx.len());

        for (pc, &ci) in colonnes_idx.iter().enumerate() {
            let bord_colonne = pc == 0 || pc == derniere_colonne;
            let cellule = match (li, ci) {
                (Indice::Element(i), Indice::Element(j)) => {
                    latex_scalaire(element(a, &[i, j])?, p)?
                }
                _ => marqueur(li, ci, bord_ligne, bord_colonne).latex().to_string(),
            };
            cellules.push(cellule);
        }
        lignes.push(cellules.join(" & "));
    }
    envelopper(&lignes)
}
