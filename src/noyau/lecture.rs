// src/noyau/lecture.rs
//
// Littéraux du carnet -> Valeur
//
// Formes reconnues:
// - expression scalaire        : 0.5, 1 + 2j, pi / 2, sqrt(2) / 2
// - texte seul                 : 'abc'
// - listes imbriquées          : [[1, 2], [3, 4.5]]  (forme induite, dtype promu)
// - constructeurs de tableaux  : array, arange, zeros, ones, eye, linspace
//
// Promotion des listes (comme un dtype):
// - que des nombres : Entier -> Reel -> Complexe
// - que des textes  : Texte
// - mélange         : Objet
// - aucun élément   : Reel (forme (0,), (1, 0)…)

use ndarray::{Array2, ArrayD, IxDyn};
use num_complex::Complex64;

use super::erreurs::ErreurLecture;
use super::jetons::{format_tokens, tokenize, Tok};
use super::rpn::evaluer_tokens;
use super::valeur::{Scalaire, Tableau, Valeur};

/// Garde-fou : au-delà, le carnet refuse de construire le tableau.
pub const MAX_ELEMENTS: usize = 1_000_000;

/// Listes imbriquées : au-delà, la lecture (récursive) refuse la cellule.
pub const PROFONDEUR_MAX: usize = 32;

/// linspace sans troisième argument.
const LINSPACE_DEFAUT: usize = 50;

/// API publique : lit une cellule.
pub fn lire_valeur(entree: &str) -> Result<Valeur, ErreurLecture> {
    let s = entree.trim();
    if s.is_empty() {
        return Err(ErreurLecture::EntreeVide);
    }

    let tokens = tokenize(s)?;
    verifier_profondeur(&tokens)?;

    if let [Tok::Texte(t)] = tokens.as_slice() {
        return Ok(Valeur::Texte(t.clone()));
    }

    if let Some(Tok::LBrack) = tokens.first() {
        let (noeud, fin) = lire_liste(&tokens, 0)?;
        if fin != tokens.len() {
            return Err(jeton_inattendu(&tokens[fin]));
        }
        return Ok(Valeur::Tableau(tableau_depuis(&noeud)?));
    }

    if let [Tok::Ident(nom), Tok::LPar, ..] = tokens.as_slice() {
        if est_constructeur(nom) {
            let fin = fermeture(&tokens, 1).ok_or(ErreurLecture::ParentheseNonFermee)?;
            if fin + 1 != tokens.len() {
                return Err(jeton_inattendu(&tokens[fin + 1]));
            }
            let args = decouper(&tokens[2..fin])?;
            return Ok(Valeur::Tableau(construire(nom, &args)?));
        }
    }

    Ok(Valeur::Scalaire(evaluer_tokens(&tokens)?))
}

fn jeton_inattendu(t: &Tok) -> ErreurLecture {
    ErreurLecture::JetonInattendu(format_tokens(std::slice::from_ref(t)))
}

/* ------------------------ Découpage ------------------------ */

/// Un seul passage, avant toute descente récursive dans les crochets.
fn verifier_profondeur(tokens: &[Tok]) -> Result<(), ErreurLecture> {
    let mut profondeur = 0usize;
    for t in tokens {
        match t {
            Tok::LBrack => {
                profondeur += 1;
                if profondeur > PROFONDEUR_MAX {
                    return Err(ErreurLecture::ImbricationTropProfonde(PROFONDEUR_MAX));
                }
            }
            Tok::RBrack => profondeur = profondeur.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Indice du jeton fermant celui ouvert en `ouvrant` ( ( ou [ ).
fn fermeture(tokens: &[Tok], ouvrant: usize) -> Option<usize> {
    let mut profondeur = 0usize;
    for (i, t) in tokens.iter().enumerate().skip(ouvrant) {
        match t {
            Tok::LPar | Tok::LBrack => profondeur += 1,
            Tok::RPar | Tok::RBrack => {
                profondeur = profondeur.checked_sub(1)?;
                if profondeur == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Découpe aux virgules de premier niveau. Une virgule finale est tolérée.
fn decouper(tokens: &[Tok]) -> Result<Vec<&[Tok]>, ErreurLecture> {
    let mut out = Vec::new();
    let mut profondeur: i32 = 0;
    let mut debut = 0;

    for (i, t) in tokens.iter().enumerate() {
        match t {
            Tok::LPar | Tok::LBrack => profondeur += 1,
            Tok::RPar | Tok::RBrack => profondeur -= 1,
            Tok::Comma if profondeur == 0 => {
                if i == debut {
                    return Err(ErreurLecture::JetonInattendu(",".into()));
                }
                out.push(&tokens[debut..i]);
                debut = i + 1;
            }
            _ => {}
        }
        if profondeur < 0 {
            return Err(jeton_inattendu(t));
        }
    }
    if debut < tokens.len() {
        out.push(&tokens[debut..]);
    }
    Ok(out)
}

/* ------------------------ Listes imbriquées ------------------------ */

#[derive(Clone, Debug, PartialEq)]
enum Element {
    Nombre(Scalaire),
    Texte(String),
}

#[derive(Clone, Debug, PartialEq)]
enum Noeud {
    Feuille(Element),
    Liste(Vec<Noeud>),
}

/// Lit `[ ... ]` à partir de `debut` ; renvoie le nœud et l’indice après le `]`.
fn lire_liste(tokens: &[Tok], debut: usize) -> Result<(Noeud, usize), ErreurLecture> {
    let fin = fermeture(tokens, debut).ok_or(ErreurLecture::CrochetNonFerme)?;
    if !matches!(tokens[fin], Tok::RBrack) {
        return Err(ErreurLecture::CrochetNonFerme);
    }

    let mut enfants = Vec::new();
    for morceau in decouper(&tokens[debut + 1..fin])? {
        enfants.push(lire_element(morceau)?);
    }
    Ok((Noeud::Liste(enfants), fin + 1))
}

fn lire_element(tokens: &[Tok]) -> Result<Noeud, ErreurLecture> {
    match tokens {
        [Tok::Texte(t)] => Ok(Noeud::Feuille(Element::Texte(t.clone()))),
        [Tok::LBrack, ..] => {
            let (n, fin) = lire_liste(tokens, 0)?;
            if fin != tokens.len() {
                return Err(jeton_inattendu(&tokens[fin]));
            }
            Ok(n)
        }
        _ => Ok(Noeud::Feuille(Element::Nombre(evaluer_tokens(tokens)?))),
    }
}

fn forme_de(n: &Noeud) -> Result<Vec<usize>, ErreurLecture> {
    match n {
        Noeud::Feuille(_) => Ok(Vec::new()),
        Noeud::Liste(enfants) => {
            let Some(premier) = enfants.first() else {
                return Ok(vec![0]);
            };
            let f = forme_de(premier)?;
            for e in &enfants[1..] {
                if forme_de(e)? != f {
                    return Err(ErreurLecture::FormeIrreguliere);
                }
            }
            let mut out = vec![enfants.len()];
            out.extend(f);
            Ok(out)
        }
    }
}

fn feuilles<'a>(n: &'a Noeud, out: &mut Vec<&'a Element>) {
    match n {
        Noeud::Feuille(e) => out.push(e),
        Noeud::Liste(enfants) => enfants.iter().for_each(|e| feuilles(e, out)),
    }
}

fn tableau_depuis(n: &Noeud) -> Result<Tableau, ErreurLecture> {
    let forme = forme_de(n)?;
    let mut elements = Vec::new();
    feuilles(n, &mut elements);
    verifier_taille(elements.len())?;

    let nombres: Option<Vec<Scalaire>> = elements
        .iter()
        .map(|e| match e {
            Element::Nombre(s) => Some(*s),
            Element::Texte(_) => None,
        })
        .collect();

    match nombres {
        Some(v) => tableau_numerique(&forme, v),
        None => {
            let tous_textes = elements.iter().all(|e| matches!(e, Element::Texte(_)));
            let textes: Vec<String> = elements
                .iter()
                .map(|e| match e {
                    Element::Texte(t) => t.clone(),
                    Element::Nombre(s) => s.to_string(),
                })
                .collect();
            let a = en_array(&forme, textes)?;
            Ok(if tous_textes {
                Tableau::Texte(a)
            } else {
                Tableau::Objet(a)
            })
        }
    }
}

fn en_array<T>(forme: &[usize], donnees: Vec<T>) -> Result<ArrayD<T>, ErreurLecture> {
    ArrayD::from_shape_vec(IxDyn(forme), donnees).map_err(|_| ErreurLecture::FormeIrreguliere)
}

fn tableau_numerique(forme: &[usize], v: Vec<Scalaire>) -> Result<Tableau, ErreurLecture> {
    let complexe = v.iter().any(|s| matches!(s, Scalaire::Complexe(_)));
    let reel = v.iter().any(|s| matches!(s, Scalaire::Reel(_)));

    if complexe {
        let d: Vec<Complex64> = v.into_iter().map(Scalaire::en_complexe).collect();
        return Ok(Tableau::Complexe(en_array(forme, d)?));
    }
    if reel || v.is_empty() {
        let d: Vec<f64> = v.into_iter().map(Scalaire::en_reel).collect();
        return Ok(Tableau::Reel(en_array(forme, d)?));
    }
    let d: Vec<i64> = v
        .into_iter()
        .filter_map(|s| match s {
            Scalaire::Entier(n) => Some(n),
            _ => None,
        })
        .collect();
    Ok(Tableau::Entier(en_array(forme, d)?))
}

fn verifier_taille(n: usize) -> Result<(), ErreurLecture> {
    if n > MAX_ELEMENTS {
        return Err(ErreurLecture::TropGrand(n));
    }
    Ok(())
}

/* ------------------------ Constructeurs ------------------------ */

fn est_constructeur(nom: &str) -> bool {
    matches!(
        nom,
        "array" | "arange" | "zeros" | "ones" | "eye" | "identity" | "linspace"
    )
}

fn construire(nom: &str, args: &[&[Tok]]) -> Result<Tableau, ErreurLecture> {
    match nom {
        "array" => match args {
            [liste] if matches!(liste.first(), Some(Tok::LBrack)) => match lire_element(liste)? {
                n @ Noeud::Liste(_) => tableau_depuis(&n),
                Noeud::Feuille(_) => Err(ErreurLecture::ExpressionInvalide),
            },
            // array(3) : tableau 0D
            [expr] => tableau_numerique(&[], vec![evaluer_tokens(expr)?]),
            _ => Err(argument("array", "un seul argument attendu")),
        },
        "arange" => arange(args),
        "zeros" => rempli("zeros", args, 0.0),
        "ones" => rempli("ones", args, 1.0),
        "eye" | "identity" => {
            let [n] = args else {
                return Err(argument("eye", "un seul argument attendu"));
            };
            let n = dimension("eye", evaluer_tokens(n)?)?;
            verifier_taille(n.saturating_mul(n))?;
            Ok(Tableau::Reel(Array2::<f64>::eye(n).into_dyn()))
        }
        "linspace" => linspace(args),
        autre => Err(ErreurLecture::IdentifiantInconnu(autre.to_string())),
    }
}

fn argument(fonction: &'static str, raison: &'static str) -> ErreurLecture {
    ErreurLecture::Argument { fonction, raison }
}

fn dimension(fonction: &'static str, s: Scalaire) -> Result<usize, ErreurLecture> {
    match s {
        Scalaire::Entier(n) => {
            usize::try_from(n).map_err(|_| argument(fonction, "dimension négative"))
        }
        _ => Err(argument(fonction, "dimension entière attendue")),
    }
}

/// zeros(3), zeros(2, 3), zeros((2, 3)), zeros([2, 3])
fn dimensions(fonction: &'static str, args: &[&[Tok]]) -> Result<Vec<usize>, ErreurLecture> {
    let morceaux: Vec<&[Tok]> = match args {
        [seul] if matches!(seul.first(), Some(Tok::LPar | Tok::LBrack))
            && fermeture(seul, 0) == Some(seul.len() - 1) =>
        {
            decouper(&seul[1..seul.len() - 1])?
        }
        _ => args.to_vec(),
    };
    if morceaux.is_empty() {
        return Err(argument(fonction, "au moins une dimension attendue"));
    }
    morceaux
        .into_iter()
        .map(|m| dimension(fonction, evaluer_tokens(m)?))
        .collect()
}

fn rempli(fonction: &'static str, args: &[&[Tok]], v: f64) -> Result<Tableau, ErreurLecture> {
    let forme = dimensions(fonction, args)?;
    let n = forme
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(ErreurLecture::TropGrand(usize::MAX))?;
    verifier_taille(n)?;
    // ndarray borne aussi le produit des axes non nuls : (0, 10^12, 10^12) est refusée
    let non_nuls = forme
        .iter()
        .filter(|&&d| d != 0)
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(ErreurLecture::TropGrand(usize::MAX))?;
    verifier_taille(non_nuls)?;
    Ok(Tableau::Reel(ArrayD::from_elem(IxDyn(&forme), v)))
}

fn arange(args: &[&[Tok]]) -> Result<Tableau, ErreurLecture> {
    let valeurs = args
        .iter()
        .map(|a| evaluer_tokens(a))
        .collect::<Result<Vec<_>, _>>()?;

    let (debut, fin, pas) = match valeurs.as_slice() {
        [fin] => (Scalaire::Entier(0), *fin, Scalaire::Entier(1)),
        [debut, fin] => (*debut, *fin, Scalaire::Entier(1)),
        [debut, fin, pas] => (*debut, *fin, *pas),
        _ => return Err(argument("arange", "1 à 3 arguments attendus")),
    };
    if valeurs.iter().any(|s| matches!(s, Scalaire::Complexe(_))) {
        return Err(argument("arange", "arguments réels attendus"));
    }

    if let (Scalaire::Entier(a), Scalaire::Entier(b), Scalaire::Entier(p)) = (debut, fin, pas) {
        if p == 0 {
            return Err(argument("arange", "pas nul"));
        }
        let n = nombre_de_pas(a as f64, b as f64, p as f64);
        verifier_taille(n)?;
        let v: Vec<i64> = (0..n as i64)
            .map(|i| a.saturating_add(i.saturating_mul(p)))
            .collect();
        return Ok(Tableau::Entier(en_array(&[n], v)?));
    }

    let (a, b, p) = (debut.en_reel(), fin.en_reel(), pas.en_reel());
    if p == 0.0 || !p.is_finite() || !a.is_finite() || !b.is_finite() {
        return Err(argument("arange", "bornes et pas finis, pas non nul"));
    }
    let n = nombre_de_pas(a, b, p);
    verifier_taille(n)?;
    let v: Vec<f64> = (0..n).map(|i| a + i as f64 * p).collect();
    Ok(Tableau::Reel(en_array(&[n], v)?))
}

/// ceil((b - a) / p), borné à 0.
fn nombre_de_pas(a: f64, b: f64, p: f64) -> usize {
    let n = ((b - a) / p).ceil();
    if n.is_nan() || n <= 0.0 {
        0
    } else if n >= (MAX_ELEMENTS + 1) as f64 {
        MAX_ELEMENTS + 1
    } else {
        n as usize
    }
}

fn linspace(args: &[&[Tok]]) -> Result<Tableau, ErreurLecture> {
    let (a, b, n) = match args {
        [a, b] => (evaluer_tokens(a)?, evaluer_tokens(b)?, LINSPACE_DEFAUT),
        [a, b, n] => (
            evaluer_tokens(a)?,
            evaluer_tokens(b)?,
            dimension("linspace", evaluer_tokens(n)?)?,
        ),
        _ => return Err(argument("linspace", "2 ou 3 arguments attendus")),
    };
    verifier_taille(n)?;

    let (a, b) = (a.en_reel(), b.en_reel());
    let v: Vec<f64> = match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let pas = (b - a) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { b } else { a + i as f64 * pas })
                .collect()
        }
    };
    Ok(Tableau::Reel(en_array(&[n], v)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tableau(s: &str) -> Tableau {
        match lire_valeur(s).unwrap() {
            Valeur::Tableau(t) => t,
            autre => panic!("attendu un tableau, obtenu {autre:?}"),
        }
    }

    #[test]
    fn scalaires() {
        assert_eq!(lire_valeur("42").unwrap(), Valeur::Scalaire(Scalaire::Entier(42)));
        assert_eq!(lire_valeur(" 0.5 ").unwrap(), Valeur::Scalaire(Scalaire::Reel(0.5)));
        assert_eq!(
            lire_valeur("1 + 0j").unwrap(),
            Valeur::Scalaire(Scalaire::Complexe(Complex64::new(1.0, 0.0)))
        );
    }

    #[test]
    fn texte_seul() {
        assert_eq!(lire_valeur("'bonjour'").unwrap(), Valeur::Texte("bonjour".into()));
    }

    #[test]
    fn entree_vide() {
        assert_eq!(lire_valeur("   "), Err(ErreurLecture::EntreeVide));
    }

    #[test]
    fn listes_et_promotion() {
        let t = tableau("[1, 2, 3]");
        assert_eq!(t.forme(), &[3]);
        assert_eq!(t.type_element(), "int64");

        let t = tableau("[[1, 2], [3, 4.5]]");
        assert_eq!(t.forme(), &[2, 2]);
        assert_eq!(t.type_element(), "float64");

        let t = tableau("[1, 2j]");
        assert_eq!(t.type_element(), "complex128");

        let t = tableau("[1, 2,]");
        assert_eq!(t.forme(), &[2]);
    }

    #[test]
    fn listes_de_textes() {
        assert_eq!(tableau("['a', 'b']").type_element(), "str");
        let t = tableau("[1, 'a']");
        assert_eq!(t.type_element(), "object");
        assert!(!t.est_numerique());
    }

    #[test]
    fn listes_vides() {
        let t = tableau("[]");
        assert_eq!(t.forme(), &[0]);
        assert_eq!(t.type_element(), "float64");
        assert_eq!(tableau("[[]]").forme(), &[1, 0]);
    }

    #[test]
    fn trois_dimensions() {
        let t = tableau("[[[1], [2]], [[3], [4]]]");
        assert_eq!(t.forme(), &[2, 2, 1]);
    }

    #[test]
    fn forme_irreguliere() {
        assert_eq!(lire_valeur("[[1, 2], [3]]"), Err(ErreurLecture::FormeIrreguliere));
        assert_eq!(lire_valeur("[1, [2]]"), Err(ErreurLecture::FormeIrreguliere));
    }

    #[test]
    fn crochets() {
        assert_eq!(lire_valeur("[1, 2"), Err(ErreurLecture::CrochetNonFerme));
        assert!(lire_valeur("[1, 2] 3").is_err());
        assert!(lire_valeur("[1,, 2]").is_err());
    }

    #[test]
    fn expressions_dans_les_listes() {
        match tableau("[pi/2, sqrt(4)]") {
            Tableau::Reel(a) => {
                assert_eq!(a[[0]], std::f64::consts::PI / 2.0);
                assert_eq!(a[[1]], 2.0);
            }
            autre => panic!("obtenu {autre:?}"),
        }
    }

    #[test]
    fn arange_entier_et_reel() {
        match tableau("np.arange(10)") {
            Tableau::Entier(a) => {
                assert_eq!(a.iter().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<i64>>())
            }
            autre => panic!("obtenu {autre:?}"),
        }
        match tableau("arange(1, 7, 2)") {
            Tableau::Entier(a) => assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]),
            autre => panic!("obtenu {autre:?}"),
        }
        match tableau("arange(0, 1, 0.25)") {
            Tableau::Reel(a) => {
                assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![0.0, 0.25, 0.5, 0.75])
            }
            autre => panic!("obtenu {autre:?}"),
        }
        assert_eq!(tableau("arange(5, 0)").forme(), &[0]);
        assert!(matches!(
            lire_valeur("arange(0, 3, 0)"),
            Err(ErreurLecture::Argument { fonction: "arange", .. })
        ));
    }

    #[test]
    fn zeros_ones_eye() {
        let t = tableau("zeros((8, 8))");
        assert_eq!(t.forme(), &[8, 8]);
        assert_eq!(tableau("ones(2, 3)").forme(), &[2, 3]);
        assert_eq!(tableau("zeros([2, 2, 2])").forme(), &[2, 2, 2]);
        match tableau("eye(3)") {
            Tableau::Reel(a) => {
                assert_eq!(a[[1, 1]], 1.0);
                assert_eq!(a[[0, 1]], 0.0);
            }
            autre => panic!("obtenu {autre:?}"),
        }
        assert!(matches!(
            lire_valeur("zeros(-1)"),
            Err(ErreurLecture::Argument { fonction: "zeros", .. })
        ));
    }

    #[test]
    fn linspace_bornes_incluses() {
        match tableau("linspace(0, 1, 5)") {
            Tableau::Reel(a) => assert_eq!(
                a.iter().copied().collect::<Vec<_>>(),
                vec![0.0, 0.25, 0.5, 0.75, 1.0]
            ),
            autre => panic!("obtenu {autre:?}"),
        }
        assert_eq!(tableau("linspace(0, 1)").forme(), &[50]);
    }

    #[test]
    fn array_explicite() {
        assert_eq!(tableau("np.array([[1, 2], [3, 4]])").forme(), &[2, 2]);
        let t = tableau("array(3.5)");
        assert_eq!(t.ndim(), 0);
    }

    #[test]
    fn garde_fou_taille() {
        assert!(matches!(
            lire_valeur("zeros(100000, 100000)"),
            Err(ErreurLecture::TropGrand(_))
        ));
        assert!(matches!(lire_valeur("arange(1e9)"), Err(ErreurLecture::TropGrand(_))));
    }

    #[test]
    fn axe_nul_et_axes_geants() {
        assert!(matches!(
            lire_valeur("zeros((0, 1000000000000, 1000000000000))"),
            Err(ErreurLecture::TropGrand(_))
        ));
        assert!(matches!(lire_valeur("ones(0, 2000000)"), Err(ErreurLecture::TropGrand(_))));
        assert_eq!(tableau("zeros((0, 1000))").forme(), &[0, 1000]);
    }

    #[test]
    fn imbrication_bornee() {
        let profonde = |n: usize| format!("{}1{}", "[".repeat(n), "]".repeat(n));
        assert_eq!(tableau(&profonde(PROFONDEUR_MAX)).ndim(), PROFONDEUR_MAX);
        assert_eq!(
            lire_valeur(&profonde(PROFONDEUR_MAX + 1)),
            Err(ErreurLecture::ImbricationTropProfonde(PROFONDEUR_MAX))
        );
        assert_eq!(
            lire_valeur(&format!("array({})", profonde(100))),
            Err(ErreurLecture::ImbricationTropProfonde(PROFONDEUR_MAX))
        );
        // à plat, pas de limite
        assert_eq!(tableau(&format!("[{}]", vec!["[1]"; 200].join(", "))).forme(), &[200, 1]);
    }

    #[test]
    fn identifiant_inconnu() {
        assert_eq!(
            lire_valeur("foo(1)"),
            Err(ErreurLecture::IdentifiantInconnu("foo".into()))
        );
    }
}
