//! Typo-tolerant item search
//!
//! Turns a raw query into an exact match, a ranked candidate list, or an
//! empty result. Rank qualifiers ("r8", "rank 8", a trailing integer) and
//! category words are recognized and handled on a dedicated path.

pub mod matcher;
pub mod query;
pub mod score;

pub use matcher::{search, Scored, SearchResult};
pub use query::{extract_rank, infer_type_boost};
pub use score::{score_candidate, EXACT_SCORE, RANK_POOL_SCORE, TYPE_BOOST_BONUS};
