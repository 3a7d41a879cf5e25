// src/noyau/erreurs.rs
//
// Trois familles, aucune ne remonte hors des fonctions de rendu publiques :
// - Repli        : le candidat symbolique est refusé => repli décimal
// - ErreurRendu  : le rendu est abandonné => None (affichage par défaut)
// - ErreurLecture: l’entrée du carnet n’est pas un littéral valide

use thiserror::Error;

/// Raison d’un repli décimal (journalisée, jamais exposée à l’appelant).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Repli {
    #[error("valeur non finie")]
    NonFini,
    #[error("aucun candidat symbolique")]
    AucunCandidat,
    #[error("candidat non évaluable")]
    EvaluationImpossible,
    #[error("écart {ecart:e} au-delà de la tolérance {tolerance:e}")]
    HorsTolerance { ecart: f64, tolerance: f64 },
    #[error("dénominateur {denominateur} > {max}")]
    DenominateurTropGrand { denominateur: String, max: u64 },
    #[error("numérateur {numerateur} > {max} (au-delà de la précision d’un f64)")]
    NumerateurTropGrand { numerateur: String, max: u64 },
    #[error("constante au dénominateur")]
    ConstanteAuDenominateur,
    #[error("forme ni rationnelle ni construite sur une constante permise")]
    FormeNonReconnue,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurRendu {
    #[error("dimension {ndim} non supportée (max 2)")]
    DimensionNonSupportee { ndim: usize },
    #[error("tableau vide")]
    TableauVide,
    #[error("type d’élément non numérique : {type_element}")]
    TypeNonNumerique { type_element: &'static str },
    #[error("fenêtre de troncature invalide ({lignes}×{colonnes})")]
    FenetreInvalide { lignes: usize, colonnes: usize },
    #[error("indice {indice:?} hors bornes pour la forme {forme:?}")]
    IndiceHorsBornes {
        indice: Vec<usize>,
        forme: Vec<usize>,
    },
    #[error("échec de mise en forme LaTeX")]
    Formatage,
}

impl From<std::fmt::Error> for ErreurRendu {
    fn from(_: std::fmt::Error) -> Self {
        ErreurRendu::Formatage
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurLecture {
    #[error("Entrée vide")]
    EntreeVide,
    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),
    #[error("nombre invalide: {0}")]
    NombreInvalide(String),
    #[error("texte non terminé")]
    TexteNonTermine,
    #[error("parenthèses non fermées")]
    ParentheseNonFermee,
    #[error("crochets non fermés")]
    CrochetNonFerme,
    #[error("expression invalide")]
    ExpressionInvalide,
    #[error("jeton inattendu: {0}")]
    JetonInattendu(String),
    #[error("identifiant inconnu: {0}")]
    IdentifiantInconnu(String),
    #[error("{fonction} : {raison}")]
    Argument {
        fonction: &'static str,
        raison: &'static str,
    },
    #[error("liste irrégulière (formes incompatibles)")]
    FormeIrreguliere,
    #[error("tableau trop grand ({0} éléments)")]
    TropGrand(usize),
    #[error("imbrication trop profonde (max {0} niveaux)")]
    ImbricationTropProfonde(usize),
}
