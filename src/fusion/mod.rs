//! Recipe fusion analysis
//!
//! Recursively expands a two-ingredient recipe into a bounded dependency
//! tree under a stopping policy, then aggregates the leaves into ingredient
//! totals with optional store pricing.

pub mod resolver;
pub mod totals;
pub mod tree;

pub use resolver::{expand, ExpandPolicy, NodeBudget, Visited, DEFAULT_NODE_BUDGET};
pub use totals::{collect_leaves, priced_totals, totals, TotalRow};
pub use tree::FusionNode;

use crate::catalog::{CatalogIndex, Item, Recipe};

/// Result of one fusion analysis: the expanded ingredient pair plus the
/// aggregated totals over both trees.
#[derive(Debug)]
pub struct FusionAnalysis {
    /// 1-based index of the recipe actually used, after clamping.
    pub recipe_index: usize,
    pub recipe: Recipe,
    pub left: FusionNode,
    pub right: FusionNode,
    pub rows: Vec<TotalRow>,
    /// Sum of `count * price` over priced rows; present when a store tier
    /// is active.
    pub grand_total: Option<u64>,
}

/// Expand the item's chosen recipe (1-based index, clamped to the available
/// range) under the given policy and aggregate the result. Returns `None`
/// when the item has no well-formed recipe to expand.
pub fn analyze_fusion(
    index: &CatalogIndex,
    item: &Item,
    recipe_index: Option<usize>,
    policy: &ExpandPolicy,
    budget_limit: u32,
) -> Option<FusionAnalysis> {
    let recipes: Vec<_> = item
        .sorted_recipes()
        .into_iter()
        .filter_map(|r| r.pair().map(|pair| (r, pair)))
        .collect();
    if recipes.is_empty() {
        return None;
    }
    let chosen = recipe_index.unwrap_or(1).clamp(1, recipes.len());
    let (recipe, (a, b)) = recipes[chosen - 1];

    let mut budget = NodeBudget::new(budget_limit);
    let visited = Visited::new();
    let left = expand(index, a, policy, &mut budget, &visited);
    let right = expand(index, b, policy, &mut budget, &visited);

    let mut leaves = Vec::new();
    collect_leaves(&left, &mut leaves);
    collect_leaves(&right, &mut leaves);

    let (rows, grand_total) = match policy.store_level {
        Some(store_level) => {
            let (rows, total) = priced_totals(&leaves, index, store_level);
            (rows, Some(total))
        }
        None => (totals(&leaves), None),
    };

    Some(FusionAnalysis {
        recipe_index: chosen,
        recipe: recipe.clone(),
        left,
        right,
        rows,
        grand_total,
    })
}
