// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> Scalaire
// Objectif:
// - Convertir une suite de Tok (expression scalaire) en RPN (postfix)
// - Puis l’évaluer numériquement, avec les règles de type du carnet
//
// Règles:
// - Ident(name):
//    - si name ∈ FONCTIONS => fonction unaire (postfixée en RPN)
//    - si name ∈ {pi, e, inf, nan} => constante numérique
//    - sinon => IdentifiantInconnu
// - Moins unaire:
//    - opérateur préfixe Neg, entre * et ^ : "-2^2" = -(2^2), "2*-3" = 2*(-3)
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.
// - Crochets, virgules et textes n’ont rien à faire ici : lecture.rs les découpe avant.

use num_complex::Complex64;

use super::erreurs::ErreurLecture;
use super::jetons::{format_tokens, Tok};
use super::valeur::Scalaire;

const FONCTIONS: [&str; 8] = ["sqrt", "sin", "cos", "tan", "exp", "log", "ln", "abs"];

#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Valeur(Scalaire),
    Binaire(Tok),
    Neg,
    Fonction(String),
}

#[derive(Clone, Debug)]
enum Op {
    Binaire(Tok),
    Neg,
    Fonction(String),
    ParG,
}

fn precedence(op: &Op) -> i32 {
    match op {
        Op::Binaire(Tok::Plus | Tok::Minus) => 10,
        Op::Binaire(Tok::Star | Tok::Slash) => 20,
        Op::Neg => 25,
        Op::Binaire(Tok::Caret) => 30,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    FONCTIONS.contains(&name)
}

fn constante(name: &str) -> Option<Scalaire> {
    match name {
        "pi" => Some(Scalaire::Reel(std::f64::consts::PI)),
        "e" => Some(Scalaire::Reel(std::f64::consts::E)),
        "inf" => Some(Scalaire::Reel(f64::INFINITY)),
        "nan" => Some(Scalaire::Reel(f64::NAN)),
        _ => None,
    }
}

fn en_op(op: Op) -> Option<Rpn> {
    match op {
        Op::Binaire(t) => Some(Rpn::Binaire(t)),
        Op::Neg => Some(Rpn::Neg),
        Op::Fonction(f) => Some(Rpn::Fonction(f)),
        Op::ParG => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("pi"), Slash, Num(2), RPar]
///   rpn:    [Valeur(π), Valeur(2), Binaire(Slash), Fonction("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurLecture> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Op> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(s) => {
                out.push(Rpn::Valeur(s));
                prev_was_value = true;
            }
            Tok::Imag(v) => {
                out.push(Rpn::Valeur(Scalaire::Complexe(Complex64::new(0.0, v))));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Op::Fonction(name));
                    prev_was_value = false;
                } else if let Some(c) = constante(&name) {
                    out.push(Rpn::Valeur(c));
                    prev_was_value = true;
                } else {
                    return Err(ErreurLecture::IdentifiantInconnu(name));
                }
            }

            Tok::LPar => {
                ops.push(Op::ParG);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ferme = false;
                while let Some(top) = ops.pop() {
                    match en_op(top) {
                        Some(r) => out.push(r),
                        None => {
                            ferme = true;
                            break;
                        }
                    }
                }
                if !ferme {
                    return Err(ErreurLecture::JetonInattendu(")".into()));
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Op::Fonction(_)) = ops.last() {
                    if let Some(f) = ops.pop().and_then(en_op) {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                // préfixe : ne dépile rien
                ops.push(Op::Neg);
            }
            Tok::Plus if !prev_was_value => {
                // +x : neutre
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let courant = Op::Binaire(tok.clone());
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Op::ParG | Op::Fonction(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&courant);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(r) = ops.pop().and_then(en_op) {
                        out.push(r);
                    }
                }

                ops.push(courant);
                prev_was_value = false;
            }

            Tok::Texte(_) | Tok::LBrack | Tok::RBrack | Tok::Comma => {
                return Err(ErreurLecture::JetonInattendu(format_tokens(&[tok])));
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match en_op(op) {
            Some(r) => out.push(r),
            None => return Err(ErreurLecture::ParentheseNonFermee),
        }
    }

    Ok(out)
}

/// Évalue une RPN en scalaire.
pub fn evaluer_rpn(rpn: &[Rpn]) -> Result<Scalaire, ErreurLecture> {
    let mut st: Vec<Scalaire> = Vec::new();

    for r in rpn {
        match r {
            Rpn::Valeur(s) => st.push(*s),

            Rpn::Binaire(t) => {
                let b = st.pop().ok_or(ErreurLecture::ExpressionInvalide)?;
                let a = st.pop().ok_or(ErreurLecture::ExpressionInvalide)?;

                let v = match t {
                    Tok::Plus => a.additionner(b),
                    Tok::Minus => a.soustraire(b),
                    Tok::Star => a.multiplier(b),
                    Tok::Slash => a.diviser(b),
                    Tok::Caret => a.puissance(b),
                    autre => {
                        return Err(ErreurLecture::JetonInattendu(format_tokens(
                            std::slice::from_ref(autre),
                        )))
                    }
                };
                st.push(v);
            }

            Rpn::Neg => {
                let x = st.pop().ok_or(ErreurLecture::ExpressionInvalide)?;
                st.push(x.negatif());
            }

            Rpn::Fonction(name) => {
                let x = st.pop().ok_or(ErreurLecture::ExpressionInvalide)?;
                st.push(appliquer(name, x)?);
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurLecture::ExpressionInvalide);
    }
    st.pop().ok_or(ErreurLecture::ExpressionInvalide)
}

/// Expression scalaire complète : tokens -> RPN -> valeur.
pub fn evaluer_tokens(tokens: &[Tok]) -> Result<Scalaire, ErreurLecture> {
    if tokens.is_empty() {
        return Err(ErreurLecture::ExpressionInvalide);
    }
    evaluer_rpn(&to_rpn(tokens)?)
}

/* ------------------------ Fonctions ------------------------ */

fn appliquer(name: &str, x: Scalaire) -> Result<Scalaire, ErreurLecture> {
    let r = match (name, x) {
        ("abs", Scalaire::Entier(n)) => n
            .checked_abs()
            .map_or(Scalaire::Reel((n as f64).abs()), Scalaire::Entier),
        ("abs", s) => Scalaire::Reel(s.en_complexe().norm()),

        (_, Scalaire::Complexe(z)) => Scalaire::Complexe(fonction_complexe(name, z)?),

        // racine / logarithme d’un réel négatif : branche principale complexe
        ("sqrt" | "log" | "ln", s) if s.en_reel() < 0.0 => {
            Scalaire::Complexe(fonction_complexe(name, s.en_complexe())?)
        }

        (_, s) => {
            let v = s.en_reel();
            Scalaire::Reel(match name {
                "sqrt" => v.sqrt(),
                "sin" => v.sin(),
                "cos" => v.cos(),
                "tan" => v.tan(),
                "exp" => v.exp(),
                "log" | "ln" => v.ln(),
                _ => return Err(ErreurLecture::IdentifiantInconnu(name.to_string())),
            })
        }
    };
    Ok(r)
}

fn fonction_complexe(name: &str, z: Complex64) -> Result<Complex64, ErreurLecture> {
    Ok(match name {
        "sqrt" => z.sqrt(),
        "sin" => z.sin(),
        "cos" => z.cos(),
        "tan" => z.tan(),
        "exp" => z.exp(),
        "log" | "ln" => z.ln(),
        _ => return Err(ErreurLecture::IdentifiantInconnu(name.to_string())),
    })
}
