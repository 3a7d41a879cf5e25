// src/noyau/decimal.rs
//
// Repli décimal : arrondi à k chiffres significatifs, texte LaTeX.
// - fixe si -5 < exposant < k   (3.142, 0.0001235, 1235)
// - scientifique sinon          (1.235 \cdot 10^{4})
// - zéros finaux retirés        (0.5 et non 0.5000)

/// Décompose l’arrondi de `v` : (négatif, chiffres sans point, exposant décimal).
fn arrondi_significatif(v: f64, chiffres: usize) -> (bool, String, i32) {
    let k = chiffres.max(1);
    // {:e} arrondit correctement sur l’expansion décimale exacte du f64
    let s = format!("{:.*e}", k - 1, v.abs());
    let (mantisse, exposant) = s.split_once('e').unwrap_or((s.as_str(), "0"));
    let exposant: i32 = exposant.parse().unwrap_or(0);
    let mut digits: String = mantisse.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        digits.push('0');
    }
    (v.is_sign_negative() && v != 0.0, digits, exposant)
}

fn sans_zeros_finaux(s: &str) -> &str {
    s.trim_end_matches('0')
}

fn format_fixe(digits: &str, exposant: i32) -> String {
    if exposant >= 0 {
        let n_int = exposant as usize + 1;
        let mut entier = String::with_capacity(n_int);
        let mut frac = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i < n_int {
                entier.push(c);
            } else {
                frac.push(c);
            }
        }
        while entier.len() < n_int {
            entier.push('0');
        }
        let frac = sans_zeros_finaux(&frac);
        if frac.is_empty() {
            entier
        } else {
            format!("{entier}.{frac}")
        }
    } else {
        let zeros = "0".repeat((-exposant - 1) as usize);
        let frac = sans_zeros_finaux(digits);
        if frac.is_empty() {
            return "0".to_string();
        }
        format!("0.{zeros}{frac}")
    }
}

fn format_scientifique(digits: &str, exposant: i32) -> String {
    let (tete, reste) = digits.split_at(1);
    let reste = sans_zeros_finaux(reste);
    let mantisse = if reste.is_empty() {
        tete.to_string()
    } else {
        format!("{tete}.{reste}")
    };
    format!(r"{mantisse} \cdot 10^{{{exposant}}}")
}

/// Texte LaTeX de `v` arrondi à `chiffres` chiffres significatifs.
pub fn format_decimal(v: f64, chiffres: usize) -> String {
    if v.is_nan() {
        return r"\text{NaN}".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 {
            r"\infty".to_string()
        } else {
            r"- \infty".to_string()
        };
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let k = chiffres.max(1) as i32;
    let (negatif, digits, exposant) = arrondi_significatif(v, chiffres);

    let corps = if exposant > -5 && exposant < k {
        format_fixe(&digits, exposant)
    } else {
        format_scientifique(&digits, exposant)
    };

    if negatif {
        format!("-{corps}")
    } else {
        corps
    }
}
