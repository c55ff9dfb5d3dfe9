//! Candidate scoring
//!
//! Additive integer scores, comparison-only ordinals rather than
//! probabilities. Exact normalized equality is checked by the caller before
//! scoring and short-circuits the whole scan.

use crate::catalog::IndexEntry;
use crate::text::min_distance;

/// Conceptual score of an exact normalized-name match.
pub const EXACT_SCORE: i32 = 1000;
/// Fixed score for every member of a rank-qualified (type, rank) pool.
pub const RANK_POOL_SCORE: i32 = 999;
/// Bonus for items whose type matches the inferred category word.
pub const TYPE_BOOST_BONUS: i32 = 120;

const PREFIX_BONUS: i32 = 400;
const SUBSTRING_BONUS: i32 = 220;
const TOKEN_EXACT_BONUS: i32 = 60;
const TOKEN_PREFIX_BONUS: i32 = 40;
const NAME_SIMILARITY_SCALE: f64 = 220.0;
const TOKEN_SIMILARITY_SCALE: f64 = 120.0;

/// Score one catalog entry against a normalized query and its tokens.
pub fn score_candidate(entry: &IndexEntry, query: &str, query_tokens: &[String]) -> i32 {
    let name = &entry.normalized_name;
    if name == query {
        return EXACT_SCORE;
    }

    let mut score = 0;
    if name.starts_with(query) {
        score += PREFIX_BONUS;
    }
    if name.contains(query) {
        score += SUBSTRING_BONUS;
    }

    for qt in query_tokens {
        for tok in &entry.tokens {
            if tok.starts_with(qt.as_str()) {
                score += TOKEN_PREFIX_BONUS;
            }
            if tok == qt {
                score += TOKEN_EXACT_BONUS;
            }
        }
    }

    // Whole-string similarity, scaled to 0..=220. Normalized names are
    // ASCII, so byte length is character length.
    if !query.is_empty() {
        let dist = min_distance(name, query);
        let max_len = name.len().max(query.len()).max(1);
        let sim = 1.0 - dist as f64 / max_len as f64;
        score += (sim * NAME_SIMILARITY_SCALE).floor() as i32;
    }

    // Best per-token similarity, scaled to 0..=120 against the longer of
    // the two tokens.
    for qt in query_tokens {
        let mut best: Option<(usize, usize)> = None;
        for tok in &entry.tokens {
            let d = min_distance(tok, qt);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, tok.len()));
            }
        }
        if let Some((dist, tok_len)) = best {
            let max_len = qt.len().max(tok_len).max(1);
            let sim = 1.0 - (dist as f64 / max_len as f64).min(1.0);
            score += (sim * TOKEN_SIMILARITY_SCALE).floor() as i32;
        }
    }

    score
}
