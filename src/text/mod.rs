//! Text canonicalization and string distances
//!
//! Everything the matcher compares goes through `normalize` first, so the
//! rest of the crate can treat names and queries as plain lowercase ASCII.

pub mod distance;
pub mod normalize;

pub use distance::{levenshtein, min_distance, osa_distance};
pub use normalize::{normalize, tokenize};
