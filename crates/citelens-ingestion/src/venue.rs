//! Venue normalization — raw free-text venue strings to canonical labels.

use lazy_static::lazy_static;
use regex::Regex;

/// Ordered alias table; first match wins, so the more specific full names
/// come before the bare acronyms they contain.
const VENUE_ALIASES: &[(&str, &str)] = &[
    ("neural information processing systems", "NeurIPS"),
    ("neurips", "NeurIPS"),
    ("nips", "NeurIPS"),
    ("international conference on machine learning", "ICML"),
    ("icml", "ICML"),
    ("international conference on learning representations", "ICLR"),
    ("iclr", "ICLR"),
    ("computer vision and pattern recognition", "CVPR"),
    ("cvpr", "CVPR"),
    ("aaai", "AAAI"),
    ("arxiv", "arXiv"),
    ("acm", "ACM"),
    ("ieee", "IEEE"),
    ("proceedings", "Conference"),
    ("workshop", "Workshop"),
    ("journal", "Journal"),
    ("neural networks", "Neural Networks"),
];

const SENTINEL_UNPUBLISHED: &str = "Unpublished";
const MAX_PLAIN_LEN: usize = 50;

lazy_static! {
    static ref ACRONYM_RE: Regex = Regex::new(r"\b([A-Z]{3,})\b").unwrap();
    static ref YEAR_RE: Regex = Regex::new(r"\d{4}").unwrap();
    static ref TRAILING_PUNCT_RE: Regex = Regex::new(r"[,:.]+$").unwrap();
}

/// Map a raw venue string to a canonical short label.
///
/// Resolution order: alias table (case-insensitive substring, table order),
/// then an all-caps acronym token, then the input with year tokens and
/// trailing punctuation stripped (truncated at the first comma/semicolon
/// when too long). Always returns a non-empty string; empty or whitespace
/// input yields `"Unpublished"`.
pub fn normalize_venue(raw: &str) -> String {
    if raw.trim().is_empty() {
        return SENTINEL_UNPUBLISHED.to_string();
    }

    let lower = raw.to_lowercase();
    for (alias, canonical) in VENUE_ALIASES {
        if lower.contains(alias) {
            return (*canonical).to_string();
        }
    }

    if let Some(caps) = ACRONYM_RE.captures(raw) {
        return caps[1].to_string();
    }

    let without_year = YEAR_RE.replace_all(raw, "");
    let stripped = TRAILING_PUNCT_RE.replace(without_year.trim(), "");
    let stripped = stripped.trim();

    if stripped.len() > MAX_PLAIN_LEN {
        let first_part = stripped
            .split([',', ';'])
            .next()
            .unwrap_or(stripped)
            .trim();
        if !first_part.is_empty() {
            return first_part.to_string();
        }
    }

    if stripped.is_empty() {
        raw.to_string()
    } else {
        stripped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_match_is_case_insensitive() {
        assert_eq!(normalize_venue("Advances in Neural Information Processing Systems"), "NeurIPS");
        assert_eq!(normalize_venue("NEURIPS 2023"), "NeurIPS");
        assert_eq!(normalize_venue("nips workshop track"), "NeurIPS");
        assert_eq!(normalize_venue("Proc. ICML"), "ICML");
    }

    #[test]
    fn test_normalization_is_idempotent_for_canonical_labels() {
        for (_, canonical) in super::VENUE_ALIASES {
            assert_eq!(normalize_venue(canonical), *canonical);
        }
        assert_eq!(normalize_venue("NeurIPS 2023"), "NeurIPS");
        assert_eq!(normalize_venue(&normalize_venue("NeurIPS 2023")), "NeurIPS");
    }

    #[test]
    fn test_empty_input_is_unpublished() {
        assert_eq!(normalize_venue(""), "Unpublished");
        assert_eq!(normalize_venue("   "), "Unpublished");
    }

    #[test]
    fn test_acronym_extraction() {
        assert_eq!(normalize_venue("Symposium on Theory, SOSP"), "SOSP");
    }

    #[test]
    fn test_year_and_trailing_punctuation_stripped() {
        assert_eq!(normalize_venue("Annual Symposium 2022,"), "Annual Symposium");
    }

    #[test]
    fn test_long_venue_truncates_at_first_separator() {
        let long = "Some extremely long venue name that goes on and on, second part; third part";
        assert_eq!(
            normalize_venue(long),
            "Some extremely long venue name that goes on and on"
        );
    }

    #[test]
    fn test_never_returns_empty() {
        assert_eq!(normalize_venue("2023"), "2023");
    }
}
