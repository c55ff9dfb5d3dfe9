//! Fusion dependency trees

use crate::catalog::Recipe;

/// One node of a resolved fusion tree: a leaf, or exactly two children plus
/// the recipe they were expanded under.
#[derive(Debug, Clone)]
pub struct FusionNode {
    pub name: String,
    pub rank: u32,
    pub children: Vec<FusionNode>,
    pub recipe: Option<Recipe>,
    /// Expansion stopped here: base item or a satisfied stopping policy.
    pub leaf: bool,
    /// The ingredient reference did not resolve in the catalog.
    pub missing: bool,
    /// The ingredient was already visited along this path.
    pub cycle: bool,
    /// The node budget ran out before this node could be looked up.
    pub truncated: bool,
}

impl FusionNode {
    pub(crate) fn new(name: &str, rank: u32) -> Self {
        Self {
            name: name.to_string(),
            rank,
            children: Vec::new(),
            recipe: None,
            leaf: false,
            missing: false,
            cycle: false,
            truncated: false,
        }
    }

    pub(crate) fn leaf(name: &str, rank: u32) -> Self {
        Self {
            leaf: true,
            ..Self::new(name, rank)
        }
    }

    pub(crate) fn missing(name: &str, rank: u32) -> Self {
        Self {
            missing: true,
            ..Self::leaf(name, rank)
        }
    }

    pub(crate) fn cycle(name: &str, rank: u32) -> Self {
        Self {
            cycle: true,
            ..Self::leaf(name, rank)
        }
    }

    pub(crate) fn truncated(name: &str, rank: u32) -> Self {
        Self {
            truncated: true,
            ..Self::leaf(name, rank)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
