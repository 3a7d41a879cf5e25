//! Affichage : la colle entre le noyau et la surface du carnet.
//!
//! - surface.rs  : trait SurfaceAffichage (résolution, style, enregistrement)
//! - registre.rs : table de dispatch TypeValeur -> gestionnaire
//! - init.rs     : initialisation unique des formateurs (120 dpi, style, 4 gestionnaires)
//! - carnet.rs   : surface concrète (cellules, historique, repli par défaut)

pub mod carnet;
pub mod init;
pub mod registre;
pub mod surface;

pub use carnet::{Carnet, Cellule, Sortie};
pub use init::{enregistrer_gestionnaires, initialiser_formateurs, initialiser_formateurs_avec};
pub use registre::Registre;
pub use surface::{Gestionnaire, SurfaceAffichage};
