//! Country name normalization.

/// Common short names mapped to the country names TMDB returns in
/// `production_countries`.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("us", "United States of America"),
    ("canada", "Canada"),
    ("uk", "United Kingdom"),
    ("france", "France"),
    ("germany", "Germany"),
    ("india", "India"),
    ("china", "China"),
    ("japan", "Japan"),
    ("australia", "Australia"),
    ("mexico", "Mexico"),
    ("brazil", "Brazil"),
];

/// Splits a comma-separated country list into trimmed, title-cased names.
///
/// Empty entries are dropped; duplicates are kept.
#[must_use]
pub fn parse_countries(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(title_case)
        .collect()
}

/// Maps a requested country to the TMDB country name.
///
/// Known aliases are looked up case-insensitively; anything else is
/// title-cased and passed through.
#[must_use]
pub fn normalize_country(name: &str) -> String {
    let trimmed = name.trim();
    let key = trimmed.to_lowercase();
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or_else(|| title_case(trimmed), |(_, canonical)| String::from(*canonical))
}

/// Normalizes every requested country, preserving order.
#[must_use]
pub fn normalize_countries(names: &[String]) -> Vec<String> {
    names.iter().map(|n| normalize_country(n)).collect()
}

/// Returns whether any requested country matches a production country,
/// ignoring case.
#[must_use]
pub fn matches_any_country(requested: &[String], production: &[String]) -> bool {
    requested.iter().any(|wanted| {
        production
            .iter()
            .any(|have| have.to_lowercase() == wanted.to_lowercase())
    })
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
///
/// `"united states"` becomes `"United States"`, `"côte d'ivoire"` becomes
/// `"Côte D'Ivoire"`.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
