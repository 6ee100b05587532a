// src/noyau/format.rs
//
// Affichage des résultats, façon "%g" :
// - `chiffres` chiffres significatifs
// - notation scientifique si l’exposant décimal est < -4 ou >= chiffres
// - zéros finaux retirés

/// Nombre maximum de chiffres significatifs utiles pour un f64.
pub const CHIFFRES_MAX: usize = 17;

pub fn format_g(v: f64, chiffres: usize) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let p = chiffres.clamp(1, CHIFFRES_MAX);

    // "{:e}" arrondit déjà à p chiffres significatifs : on y lit l’exposant final
    let sci = format!("{:.*e}", p - 1, v);
    let Some((mantisse, exp)) = sci.split_once('e') else {
        return v.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= p as i32 {
        let signe = if exp < 0 { '-' } else { '+' };
        format!("{}e{signe}{:02}", sans_zeros_finaux(mantisse), exp.abs())
    } else {
        let decimales = (p as i32 - 1 - exp).max(0) as usize;
        sans_zeros_finaux(&format!("{:.*}", decimales, v))
    }
}

fn sans_zeros_finaux(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
