// src/noyau/format.rs
//
// Formatage côté appelant (affichage). Le noyau rend un f64 exact ;
// l’arrondi d’affichage n’a lieu qu’ici.

/// Décimales affichées par défaut.
pub const DECIMALES_DEFAUT: usize = 10;

/// Borne haute (au-delà, le f64 n’a plus de chiffres significatifs à montrer).
pub const DECIMALES_MAX: usize = 15;

/// Formate un résultat pour l’affichage :
/// - entier fini : sans partie fractionnaire (4, -4, 1024)
/// - sinon : `decimales` chiffres, zéros puis point finaux retirés
/// - NaN / ±∞ : nan, inf, -inf
pub fn format_resultat(v: f64, decimales: usize) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v.fract() == 0.0 {
        // -0.0 s’affiche 0
        if v == 0.0 {
            return "0".to_string();
        }
        return format!("{v:.0}");
    }

    let decimales = decimales.min(DECIMALES_MAX);
    let texte = format!("{v:.decimales$}");
    if !texte.contains('.') {
        return texte;
    }
    texte.trim_end_matches('0').trim_end_matches('.').to_string()
}
