//! Query resolution
//!
//! `search` is the single entry point: normalize, split off a rank
//! qualifier, infer a category, then either pool by (type, rank) or score
//! the whole catalog. No-match and ambiguous-match are normal outcomes.

use crate::catalog::{CatalogIndex, Item};
use crate::text::{normalize, tokenize};

use super::query::{extract_rank, infer_type_boost};
use super::score::{score_candidate, RANK_POOL_SCORE, TYPE_BOOST_BONUS};

/// A candidate item with its comparison-only score.
#[derive(Debug, Clone)]
pub struct Scored<'a> {
    pub item: &'a Item,
    pub score: i32,
}

/// Outcome of one query.
#[derive(Debug, Default)]
pub struct SearchResult<'a> {
    /// Items whose normalized name equals the query exactly.
    pub exact: Vec<&'a Item>,
    /// Ranked candidates, best first, when there is no exact match.
    pub suggestions: Vec<Scored<'a>>,
}

impl<'a> SearchResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.suggestions.is_empty()
    }

    /// The confident pick: the first exact match, or the sole suggestion.
    pub fn single(&self) -> Option<&'a Item> {
        if let Some(item) = self.exact.first() {
            return Some(item);
        }
        match self.suggestions.as_slice() {
            [only] => Some(only.item),
            _ => None,
        }
    }
}

/// Resolve a raw query against the catalog, returning at most `limit`
/// suggestions.
pub fn search<'a>(index: &'a CatalogIndex, raw_query: &str, limit: usize) -> SearchResult<'a> {
    let query = normalize(raw_query);
    if query.is_empty() {
        return SearchResult::default();
    }
    let query_tokens = tokenize(raw_query);

    let (requested_rank, residual) = extract_rank(raw_query);
    let residual_query = normalize(&residual);
    let residual_tokens = tokenize(&residual);
    let type_boost = infer_type_boost(&residual_tokens, index);

    if let Some(rank) = requested_rank {
        // The result is restricted to that rank. Prefer the type of an item
        // the residual names exactly; otherwise the inferred category word.
        // With neither, refuse to guess across the whole catalog.
        let target_type = index
            .by_name(&residual_query)
            .and_then(|item| item.kind.clone().filter(|k| !k.is_empty()))
            .or(type_boost);
        let Some(kind) = target_type else {
            return SearchResult::default();
        };
        let suggestions = index
            .by_type_and_rank(&kind, rank)
            .into_iter()
            .take(limit)
            .map(|item| Scored {
                item,
                score: RANK_POOL_SCORE,
            })
            .collect();
        return SearchResult {
            exact: Vec::new(),
            suggestions,
        };
    }

    let exact: Vec<&Item> = index
        .iter()
        .filter(|(_, entry)| entry.normalized_name == query)
        .map(|(item, _)| item)
        .collect();
    if !exact.is_empty() {
        return SearchResult {
            exact,
            suggestions: Vec::new(),
        };
    }

    let mut scored: Vec<Scored> = index
        .iter()
        .map(|(item, entry)| {
            let mut score = score_candidate(entry, &query, &query_tokens);
            if let Some(boost) = type_boost.as_deref() {
                if item.kind_matches(boost) {
                    score += TYPE_BOOST_BONUS;
                }
            }
            Scored { item, score }
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);

    SearchResult {
        exact: Vec::new(),
        suggestions: scored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(name: &str, rank: u32, kind: &str) -> Item {
        let mut item = Item::new(name, rank);
        item.kind = Some(kind.to_string());
        item
    }

    fn sample_index() -> CatalogIndex {
        CatalogIndex::build(vec![
            weapon("Battle Axe", 5, "axe"),
            weapon("Iron Axe", 5, "axe"),
            weapon("Iron Sword", 3, "sword"),
            Item::new("Fire Stone", 3),
        ])
    }

    #[test]
    fn test_exact_match_is_sole_result() {
        let index = sample_index();
        let result = search(&index, "battle axe", 5);
        assert_eq!(result.exact.len(), 1);
        assert_eq!(result.exact[0].name, "Battle Axe");
        assert!(result.suggestions.is_empty());
        assert_eq!(result.single().unwrap().name, "Battle Axe");
    }

    #[test]
    fn test_typo_yields_suggestion() {
        let index = sample_index();
        let result = search(&index, "batle axe", 5);
        assert!(result.exact.is_empty());
        assert_eq!(result.suggestions[0].item.name, "Battle Axe");
    }

    #[test]
    fn test_rank_qualified_category_pool() {
        let index = sample_index();
        let result = search(&index, "axe r5", 5);
        assert!(result.exact.is_empty());
        let names: Vec<&str> = result
            .suggestions
            .iter()
            .map(|s| s.item.name.as_str())
            .collect();
        assert_eq!(names, vec!["Battle Axe", "Iron Axe"]);
        assert!(result.suggestions.iter().all(|s| s.score == RANK_POOL_SCORE));
    }

    #[test]
    fn test_rank_qualified_by_exact_name() {
        let index = sample_index();
        // The residual names an item exactly; its type restricts the pool.
        let result = search(&index, "battle axe rank 5", 5);
        let names: Vec<&str> = result
            .suggestions
            .iter()
            .map(|s| s.item.name.as_str())
            .collect();
        assert_eq!(names, vec!["Battle Axe", "Iron Axe"]);
    }

    #[test]
    fn test_bare_rank_query_refuses_to_guess() {
        let index = sample_index();
        assert!(search(&index, "r5", 5).is_empty());
        assert!(search(&index, "rank 5", 5).is_empty());
    }

    #[test]
    fn test_rank_qualified_empty_pool() {
        let index = sample_index();
        assert!(search(&index, "axe r9", 5).is_empty());
    }

    #[test]
    fn test_empty_query() {
        let index = sample_index();
        assert!(search(&index, "", 5).is_empty());
        assert!(search(&index, " --- ", 5).is_empty());
    }

    #[test]
    fn test_limit_is_honored() {
        let index = sample_index();
        let result = search(&index, "iron", 1);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn test_type_word_boosts_matching_items() {
        let index = sample_index();
        let result = search(&index, "iron axe thing", 5);
        assert_eq!(result.suggestions[0].item.name, "Iron Axe");
    }
}
