// src/noyau/assainir.rs
//
// Glyphes d’affichage -> opérateurs ASCII.
// Travaille sur des `char` (points de code), jamais sur des octets.

/// Table fixe : (glyphe, remplacement).
const GLYPHES: [(char, char); 3] = [
    ('×', '*'), // U+00D7
    ('÷', '/'), // U+00F7
    ('−', '-'), // U+2212
];

/// Remplace ×, ÷, − par *, /, - et retire les espaces de bord.
pub fn sanitize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            GLYPHES
                .iter()
                .find(|(g, _)| *g == c)
                .map_or(c, |(_, ascii)| *ascii)
        })
        .collect()
}
