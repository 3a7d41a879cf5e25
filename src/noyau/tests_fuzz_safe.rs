//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler lecture -> rendu sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - tailles bornées (profondeur, nombre d’éléments)
//! - budget temps global
//! - on accepte les erreurs de lecture attendues (identifiant inconnu, forme irrégulière, etc.)
//! - invariant clé : un rendu matriciel ne dépasse jamais la fenêtre (+1 pour l’ellipse)

use std::time::{Duration, Instant};

use super::erreurs::ErreurLecture;
use super::lecture::lire_valeur;
use super::matrice::rendre_tableau;
use super::parametres::Parametres;
use super::simplificateur::rendre_scalaire;
use super::valeur::{Tableau, Valeur};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurLecture) -> bool {
    // Liste blanche : erreurs *normales* pour un fuzz, le générateur produit
    // volontairement des cellules mal formées.
    matches!(
        e,
        ErreurLecture::FormeIrreguliere
            | ErreurLecture::IdentifiantInconnu(_)
            | ErreurLecture::ExpressionInvalide
            | ErreurLecture::JetonInattendu(_)
            | ErreurLecture::Argument { .. }
    )
}

/// Rendu tel que le carnet le ferait : None => affichage par défaut.
fn rendre(v: &Valeur, p: &Parametres) -> Option<String> {
    match v {
        Valeur::Scalaire(s) => rendre_scalaire(*s, p),
        Valeur::Tableau(t) => rendre_tableau(t, p),
        Valeur::Texte(_) => None,
    }
}

fn check_invariant_fenetre(t: &Tableau, rendu: &Option<String>, p: &Parametres) {
    let Some(s) = rendu else {
        return;
    };
    if t.ndim() == 0 {
        return;
    }
    let lignes = s.matches(r"\\").count() + 1;
    assert!(
        lignes <= p.fenetre.lignes_max + 1,
        "{lignes} lignes pour la forme {:?}",
        t.forme()
    );
    if let Some(premiere) = s.split(r"\\").next() {
        let colonnes = premiere.matches(" & ").count() + 1;
        assert!(colonnes <= p.fenetre.colonnes_max + 1, "{colonnes} colonnes");
    }
}

/* ------------------------ Génération de cellules (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(8) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(20) as i64 - 10),
        2 => format!("{}/{}", rng.pick(9), rng.pick(8) + 1),
        3 => format!("{}*pi/{}", rng.pick(7) as i64 - 3, rng.pick(6) + 1),
        4 => "e".to_string(),
        5 => format!("{}.{}", rng.pick(100), rng.pick(1000)),
        6 => format!("{}j", rng.pick(5)),
        _ => "1e-16".to_string(),
    }
}

fn gen_scalaire(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }
    match rng.pick(7) {
        0 => gen_nombre(rng),
        1 => format!("({}+{})", gen_scalaire(rng, depth - 1), gen_scalaire(rng, depth - 1)),
        2 => format!("({}-{})", gen_scalaire(rng, depth - 1), gen_scalaire(rng, depth - 1)),
        3 => format!("({}*{})", gen_scalaire(rng, depth - 1), gen_scalaire(rng, depth - 1)),
        4 => format!("({}/{})", gen_scalaire(rng, depth - 1), gen_scalaire(rng, depth - 1)),
        5 => format!("sqrt({})", gen_scalaire(rng, depth - 1)),
        // volontairement hors domaine
        _ => "x".to_string(),
    }
}

fn gen_liste(rng: &mut Rng, lignes: u32, colonnes: u32) -> String {
    let ligne = |rng: &mut Rng| {
        let n = if rng.pick(10) == 0 { colonnes + 1 } else { colonnes };
        let items: Vec<String> = (0..n).map(|_| gen_scalaire(rng, 1)).collect();
        format!("[{}]", items.join(", "))
    };
    if lignes == 0 {
        return ligne(rng);
    }
    let rows: Vec<String> = (0..lignes).map(|_| ligne(rng)).collect();
    format!("[{}]", rows.join(", "))
}

fn gen_cellule(rng: &mut Rng) -> String {
    match rng.pick(8) {
        0 | 1 => gen_scalaire(rng, 3),
        2 => {
            let colonnes = rng.pick(12) + 1;
            gen_liste(rng, 0, colonnes)
        }
        3 => {
            let (lignes, colonnes) = (rng.pick(10) + 1, rng.pick(10) + 1);
            gen_liste(rng, lignes, colonnes)
        }
        4 => format!("arange({})", rng.pick(30)),
        5 => format!("zeros(({}, {}))", rng.pick(10) + 1, rng.pick(10) + 1),
        6 => {
            if rng.coin() {
                format!("eye({})", rng.pick(9))
            } else {
                let (a, b, c) = (rng.pick(3) + 1, rng.pick(3) + 1, rng.pick(3) + 1);
                format!("ones(({a}, {b}, {c}))")
            }
        }
        _ => "['a', 'b']".to_string(),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_lecture_et_rendu_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(3000);
    let p = Parametres::default();

    // Même seed => mêmes cellules => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;
    let mut seen_none = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let cellule = gen_cellule(&mut rng);

        match lire_valeur(&cellule) {
            Ok(v) => {
                let rendu = rendre(&v, &p);
                if let Valeur::Tableau(t) = &v {
                    check_invariant_fenetre(t, &rendu, &p);
                }
                if rendu.is_none() {
                    seen_none += 1;
                }
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: cellule={cellule:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
    assert!(seen_none > 0, "aucun refus de rendu vu (3D, textes…)");
}

#[test]
fn fuzz_safe_determinisme() {
    let p = Parametres::default();
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..60 {
        let (ca, cb) = (gen_cellule(&mut a), gen_cellule(&mut b));
        assert_eq!(ca, cb);
        let ra = lire_valeur(&ca).ok().and_then(|v| rendre(&v, &p));
        let rb = lire_valeur(&cb).ok().and_then(|v| rendre(&v, &p));
        assert_eq!(ra, rb, "cellule={ca:?}");
    }
}

#[test]
fn fuzz_safe_grand_tableau_reste_compact() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);
    let p = Parametres::default();

    let v = lire_valeur("zeros((500, 500))").unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    let Valeur::Tableau(t) = &v else {
        panic!("attendu un tableau");
    };
    let rendu = rendre_tableau(t, &p);
    budget(t0, max);

    check_invariant_fenetre(t, &rendu, &p);
    assert!(rendu.is_some_and(|s| s.contains(r"\ddots")));
}

#[test]
fn fuzz_safe_imbrication_profonde_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 30 niveaux de crochets : forme (1, 1, …, 1), refusée au rendu (> 2D)
    let cellule = format!("{}1{}", "[".repeat(30), "]".repeat(30));
    let v = lire_valeur(&cellule).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    match &v {
        Valeur::Tableau(t) => {
            assert_eq!(t.ndim(), 30);
            assert_eq!(rendre_tableau(t, &Parametres::default()), None);
        }
        autre => panic!("attendu un tableau, obtenu {autre:?}"),
    }
}

#[test]
fn fuzz_safe_imbrication_extreme_refusee_vite() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let cellule = format!("{}1{}", "[".repeat(20_000), "]".repeat(20_000));
    let r = lire_valeur(&cellule);
    budget(t0, max);

    assert!(
        matches!(r, Err(ErreurLecture::ImbricationTropProfonde(_))),
        "obtenu {r:?}"
    );
}

#[test]
fn fuzz_safe_axe_nul_sans_panique() {
    for cellule in [
        "zeros((0, 1000000000000, 1000000000000))",
        "ones((1000000000000, 0, 1000000000000))",
        "zeros((0, 9223372036854775807, 9223372036854775807))",
    ] {
        let r = lire_valeur(cellule);
        assert!(matches!(r, Err(ErreurLecture::TropGrand(_))), "{cellule} : {r:?}");
    }
}
