//! Recursive recipe expansion
//!
//! Each call resolves one ingredient reference: stop on a satisfied policy,
//! a dangling reference, a repeated ingredient along the current path, or
//! an exhausted node budget; otherwise pick a recipe and recurse into its
//! two ingredients. Dataset defects surface as flagged leaves, never as
//! errors.

use std::collections::HashSet;

use crate::catalog::{CatalogIndex, Ingredient};

use super::FusionNode;

/// Default hard cap on resolver calls for one top-level resolution.
pub const DEFAULT_NODE_BUDGET: u32 = 5000;

/// Ingredients already expanded along the current root-to-leaf path, keyed
/// by resolved (name, rank). Cloned before each child recursion, so a
/// repeat across the two sibling branches of one recipe is not a cycle.
pub type Visited = HashSet<(String, u32)>;

/// Stopping policy for one resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandPolicy {
    /// Stop recursing once an ingredient's own rank is at or below this.
    pub fuse_rank_limit: Option<u32>,
    /// Stop recursing once the ingredient is purchasable at this store tier.
    pub store_level: Option<u8>,
}

impl ExpandPolicy {
    pub fn is_active(&self) -> bool {
        self.fuse_rank_limit.is_some() || self.store_level.is_some()
    }
}

/// Hard cap on resolver calls, shared by every call of one resolution,
/// including speculative candidate expansions that end up discarded.
#[derive(Debug)]
pub struct NodeBudget {
    remaining: u32,
}

impl NodeBudget {
    pub fn new(limit: u32) -> Self {
        Self { remaining: limit }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn try_take(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Expand one ingredient reference into a fusion tree.
pub fn expand(
    index: &CatalogIndex,
    ingredient: &Ingredient,
    policy: &ExpandPolicy,
    budget: &mut NodeBudget,
    visited: &Visited,
) -> FusionNode {
    if !budget.try_take() {
        return FusionNode::truncated(&ingredient.name, ingredient.rank);
    }

    if let Some(limit) = policy.fuse_rank_limit {
        if ingredient.rank <= limit {
            return FusionNode::leaf(&ingredient.name, ingredient.rank);
        }
    }

    let Some(item) = index.by_name(&ingredient.name) else {
        return FusionNode::missing(&ingredient.name, ingredient.rank);
    };

    if let Some(store_level) = policy.store_level {
        if item.price_at_store(store_level).is_some() {
            return FusionNode::leaf(&ingredient.name, ingredient.rank);
        }
    }

    let key = (item.name.clone(), item.rank);
    if visited.contains(&key) {
        return FusionNode::cycle(&ingredient.name, ingredient.rank);
    }
    let mut visited = visited.clone();
    visited.insert(key);

    // Malformed recipes are skipped, never expanded.
    let recipes: Vec<_> = item
        .sorted_recipes()
        .into_iter()
        .filter_map(|r| r.pair().map(|pair| (r, pair)))
        .collect();

    let mut node = FusionNode::new(&ingredient.name, ingredient.rank);

    // With an active policy, try each candidate recipe in order and adopt
    // the first whose sub-trees fully satisfy it.
    if policy.is_active() {
        for &(recipe, (a, b)) in &recipes {
            let left = expand(index, a, policy, budget, &visited);
            let right = expand(index, b, policy, budget, &visited);
            if satisfies_policy(index, policy, &left, &right) {
                node.children = vec![left, right];
                node.recipe = Some(recipe.clone());
                return node;
            }
        }
    }

    // No policy, or no candidate satisfied it: the first sorted recipe,
    // expanded one level.
    match recipes.first() {
        Some(&(recipe, (a, b))) => {
            let left = expand(index, a, policy, budget, &visited);
            let right = expand(index, b, policy, budget, &visited);
            node.children = vec![left, right];
            node.recipe = Some(recipe.clone());
        }
        None => node.leaf = true,
    }
    node
}

/// Full policy satisfaction over a candidate pair of sub-trees. The rank
/// limit takes precedence when both policy fields are set.
fn satisfies_policy(
    index: &CatalogIndex,
    policy: &ExpandPolicy,
    left: &FusionNode,
    right: &FusionNode,
) -> bool {
    if let Some(limit) = policy.fuse_rank_limit {
        return leaves_within_rank(&[left, right], limit);
    }
    if let Some(store_level) = policy.store_level {
        return leaves_purchasable(index, &[left, right], store_level);
    }
    false
}

/// Every leaf's rank is at or below the limit.
fn leaves_within_rank(nodes: &[&FusionNode], limit: u32) -> bool {
    let mut stack: Vec<&FusionNode> = nodes.to_vec();
    while let Some(node) = stack.pop() {
        if !node.children.is_empty() {
            stack.extend(node.children.iter());
        } else if node.rank > limit {
            return false;
        }
    }
    true
}

/// Every leaf resolves to an item purchasable at the given tier.
fn leaves_purchasable(index: &CatalogIndex, nodes: &[&FusionNode], store_level: u8) -> bool {
    let mut stack: Vec<&FusionNode> = nodes.to_vec();
    while let Some(node) = stack.pop() {
        if !node.children.is_empty() {
            stack.extend(node.children.iter());
        } else {
            let purchasable = index
                .by_name(&node.name)
                .and_then(|item| item.price_at_store(store_level))
                .is_some();
            if !purchasable {
                return false;
            }
        }
    }
    true
}
