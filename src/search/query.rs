//! Query qualifiers
//!
//! Extracts rank qualifiers from raw query text and infers a category tag
//! from the remaining words.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::CatalogIndex;
use crate::text::min_distance;

/// A fuzzy category word must be within this distance of a known type tag.
const MAX_TYPE_DISTANCE: usize = 2;

static RANK_QUALIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:rank\s*(\d+)|r\s*(\d+))\b").unwrap());
static TRAILING_RANK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*$").unwrap());

/// Extract an optional rank qualifier: `rank N` / `rN` anywhere in the
/// text, or a bare trailing integer. Returns the rank and the residual
/// name-only query with the qualifier stripped.
pub fn extract_rank(raw: &str) -> (Option<u32>, String) {
    if let Some(caps) = RANK_QUALIFIER_RE.captures(raw) {
        let digits = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
        if let Some(rank) = digits.and_then(|d| d.parse().ok()) {
            let residual = RANK_QUALIFIER_RE.replace_all(raw, "").trim().to_string();
            return (Some(rank), residual);
        }
    }
    if let Some(caps) = TRAILING_RANK_RE.captures(raw.trim()) {
        if let Ok(rank) = caps[1].parse() {
            let residual = TRAILING_RANK_RE.replace(raw.trim(), "").trim().to_string();
            return (Some(rank), residual);
        }
    }
    (None, raw.to_string())
}

/// Infer a category tag from residual query tokens: an exact match against
/// a known type wins; otherwise the closest known type within
/// `MAX_TYPE_DISTANCE` is used as a soft boost.
pub fn infer_type_boost(tokens: &[String], index: &CatalogIndex) -> Option<String> {
    for tok in tokens {
        if index.has_type(tok) {
            return Some(tok.clone());
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for tok in tokens {
        for kind in index.known_types() {
            let d = min_distance(tok, kind);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((kind, d));
            }
        }
    }
    best.filter(|&(_, d)| d <= MAX_TYPE_DISTANCE)
        .map(|(kind, _)| kind.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;

    fn index_with_types(kinds: &[&str]) -> CatalogIndex {
        let items = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let mut item = Item::new(format!("Item {i}"), 1);
                item.kind = Some(kind.to_string());
                item
            })
            .collect();
        CatalogIndex::build(items)
    }

    #[test]
    fn test_extract_rank_word_forms() {
        assert_eq!(extract_rank("katana rank 7"), (Some(7), "katana".to_string()));
        assert_eq!(extract_rank("katana r7"), (Some(7), "katana".to_string()));
        assert_eq!(extract_rank("r 3 katana"), (Some(3), "katana".to_string()));
    }

    #[test]
    fn test_extract_rank_trailing_integer() {
        assert_eq!(extract_rank("katana 7"), (Some(7), "katana".to_string()));
        assert_eq!(extract_rank("7"), (Some(7), String::new()));
    }

    #[test]
    fn test_extract_rank_absent() {
        assert_eq!(extract_rank("battle axe"), (None, "battle axe".to_string()));
        // An interior integer is not a qualifier.
        assert_eq!(
            extract_rank("7 league boots"),
            (None, "7 league boots".to_string())
        );
    }

    #[test]
    fn test_type_boost_exact_token() {
        let index = index_with_types(&["axe", "sword"]);
        let tokens = vec!["battle".to_string(), "axe".to_string()];
        assert_eq!(infer_type_boost(&tokens, &index), Some("axe".to_string()));
    }

    #[test]
    fn test_type_boost_fuzzy_within_two() {
        let index = index_with_types(&["sword", "axe"]);
        let tokens = vec!["swrod".to_string()];
        assert_eq!(infer_type_boost(&tokens, &index), Some("sword".to_string()));
    }

    #[test]
    fn test_type_boost_too_far() {
        let index = index_with_types(&["sword", "axe"]);
        let tokens = vec!["gauntlet".to_string()];
        assert_eq!(infer_type_boost(&tokens, &index), None);
    }
}
