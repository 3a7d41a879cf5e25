// src/noyau/jetons.rs

use super::erreurs::ErreurLecture;
use super::valeur::Scalaire;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(Scalaire),
    /// Littéral imaginaire : 2j, 0.5j, 1e-3j
    Imag(f64),
    Texte(String),

    // Fonctions, constantes et constructeurs de tableaux : tranché à la lecture.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    LPar,
    RPar,
    LBrack,
    RBrack,
    Comma,
}

/// Tokenize une cellule du carnet.
/// Supporte:
/// - entiers (12), réels (1.5, .5, 2., 1e-3, 6.02E23)
/// - imaginaires avec suffixe j/J (2j, 1.5e3j)
/// - textes entre ' ou "
/// - opérateurs + - * / ^ et ** (puissance)
/// - ( ) [ ] ,
/// - identifiants [a-zA-Z_][a-zA-Z0-9_.]* (np.pi, np.arange…)
/// - π (équivaut à ident("pi")), √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurLecture> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Ponctuation
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '[' => Some(Tok::LBrack),
            ']' => Some(Tok::RBrack),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // * ou **
        if c == '*' {
            if i + 1 < chars.len() && chars[i + 1] == '*' {
                out.push(Tok::Caret);
                i += 2;
            } else {
                out.push(Tok::Star);
                i += 1;
            }
            continue;
        }

        if c == 'π' {
            out.push(Tok::Ident("pi".to_string()));
            i += 1;
            continue;
        }
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Texte : pas d’échappement, juste le délimiteur
        if c == '\'' || c == '"' {
            let start = i + 1;
            let mut j = start;
            while j < chars.len() && chars[j] != c {
                j += 1;
            }
            if j >= chars.len() {
                return Err(ErreurLecture::TexteNonTermine);
            }
            out.push(Tok::Texte(chars[start..j].iter().collect()));
            i = j + 1;
            continue;
        }

        // Identifiants ASCII (le préfixe "np." est retiré)
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.')
            {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word
                .strip_prefix("numpy.")
                .or_else(|| word.strip_prefix("np."))
                .unwrap_or(&word);
            out.push(Tok::Ident(w.to_string()));
            continue;
        }

        if c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit())
        {
            let (tok, fin) = lire_nombre(&chars, i)?;
            out.push(tok);
            i = fin;
            continue;
        }

        return Err(ErreurLecture::CaractereInattendu(c));
    }

    Ok(out)
}

/// Nombre à partir de `start` : renvoie le jeton et l’indice qui suit.
fn lire_nombre(chars: &[char], start: usize) -> Result<(Tok, usize), ErreurLecture> {
    let mut i = start;
    let mut reel = false;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '_') {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        reel = true;
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }

    // exposant : seulement si suivi d’un chiffre (éventuellement signé)
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            reel = true;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let texte: String = chars[start..i].iter().filter(|&&c| c != '_').collect();

    if i < chars.len() && (chars[i] == 'j' || chars[i] == 'J') {
        let v: f64 = texte
            .parse()
            .map_err(|_| ErreurLecture::NombreInvalide(texte.clone()))?;
        return Ok((Tok::Imag(v), i + 1));
    }

    let tok = if reel {
        let v: f64 = texte
            .parse()
            .map_err(|_| ErreurLecture::NombreInvalide(texte.clone()))?;
        Tok::Num(Scalaire::Reel(v))
    } else {
        match texte.parse::<i64>() {
            Ok(n) => Tok::Num(Scalaire::Entier(n)),
            // au-delà d’i64 : réel, comme un flottant du carnet
            Err(_) => {
                let v: f64 = texte
                    .parse()
                    .map_err(|_| ErreurLecture::NombreInvalide(texte.clone()))?;
                Tok::Num(Scalaire::Reel(v))
            }
        }
    };
    Ok((tok, i))
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(s) => s.to_string(),
            Tok::Imag(v) => format!("{v:?}j"),
            Tok::Texte(s) => format!("{s:?}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::LBrack => "[".to_string(),
            Tok::RBrack => "]".to_string(),
            Tok::Comma => ",".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
