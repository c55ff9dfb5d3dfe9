//! Item data model
//!
//! Deserialized once from the dataset and immutable thereafter. Optional
//! fields may be absent; malformed recipes (anything but two ingredients)
//! are tolerated at load and skipped wherever a pair is required.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Store tiers run 1 through 5.
pub const MAX_STORE_LEVEL: u8 = 5;

/// A craftable catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    /// Crafting tier; higher generally requires more fusion.
    #[serde(default)]
    pub rank: u32,
    /// Lowercase category tag ("axe", "robe", "scroll", ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Stat code -> value, displayed in sorted key order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Consumed to promote a character's rank rather than equipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_up: Option<bool>,
    /// Classes the rank-up applies to, in guide order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_up_for: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipes: Vec<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// Provenance id from the guide; unused at runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// A fusion recipe. Well-formed only with exactly two ingredients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

/// A reference to another item by name and rank, resolved against the
/// catalog at expansion time. May dangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub rank: u32,
}

/// Store price: one price valid at every tier, or a per-tier list with
/// null gaps for tiers that do not stock the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Flat(u32),
    Tiered(Vec<Option<u32>>),
}

impl Item {
    pub fn new(name: impl Into<String>, rank: u32) -> Self {
        Self {
            name: name.into(),
            rank,
            kind: None,
            stats: None,
            description: None,
            rank_up: None,
            rank_up_for: None,
            recipes: Vec::new(),
            price: None,
            section: None,
        }
    }

    /// Category tag comparison, case-insensitive.
    pub fn kind_matches(&self, tag: &str) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|k| k.eq_ignore_ascii_case(tag))
    }

    /// Effective unit price at the given store tier, if purchasable there.
    ///
    /// Tiers unlock monotonically: for a per-tier list the effective price
    /// is the latest non-null entry at index <= tier.
    pub fn price_at_store(&self, store_level: u8) -> Option<u32> {
        match self.price.as_ref()? {
            Price::Flat(p) => Some(*p),
            Price::Tiered(tiers) => tiers
                .iter()
                .take(store_level as usize)
                .filter_map(|t| *t)
                .last(),
        }
    }

    /// Recipes in deterministic "simplest first" order.
    pub fn sorted_recipes(&self) -> Vec<&Recipe> {
        let mut out: Vec<&Recipe> = self.recipes.iter().collect();
        out.sort_by(|a, b| compare_recipes(a, b));
        out
    }
}

impl Recipe {
    /// The two ingredients, when the recipe is well-formed.
    pub fn pair(&self) -> Option<(&Ingredient, &Ingredient)> {
        match self.ingredients.as_slice() {
            [a, b] => Some((a, b)),
            _ => None,
        }
    }

    fn max_rank(&self) -> u32 {
        self.ingredients.iter().map(|i| i.rank).max().unwrap_or(0)
    }

    fn rank_sum(&self) -> u32 {
        self.ingredients.iter().map(|i| i.rank).sum()
    }

    fn label(&self) -> String {
        let name = |idx: usize| {
            self.ingredients
                .get(idx)
                .map(|i| i.name.as_str())
                .unwrap_or("")
        };
        format!("{} + {}", name(0), name(1))
    }
}

/// Order recipes by max ingredient rank, then sum of ranks, then the
/// "ingredient1 + ingredient2" label.
fn compare_recipes(a: &Recipe, b: &Recipe) -> Ordering {
    a.max_rank()
        .cmp(&b.max_rank())
        .then(a.rank_sum().cmp(&b.rank_sum()))
        .then_with(|| a.label().cmp(&b.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(a: (&str, u32), b: (&str, u32)) -> Recipe {
        Recipe {
            ingredients: vec![
                Ingredient {
                    name: a.0.to_string(),
                    rank: a.1,
                },
                Ingredient {
                    name: b.0.to_string(),
                    rank: b.1,
                },
            ],
        }
    }

    #[test]
    fn test_price_flat() {
        let mut item = Item::new("Tonic", 1);
        item.price = Some(Price::Flat(50));
        assert_eq!(item.price_at_store(1), Some(50));
        assert_eq!(item.price_at_store(5), Some(50));
    }

    #[test]
    fn test_price_tiered_latest_wins() {
        let mut item = Item::new("Elixir", 3);
        item.price = Some(Price::Tiered(vec![None, Some(200), None, Some(180)]));
        assert_eq!(item.price_at_store(1), None); // tier 1 entry is null
        assert_eq!(item.price_at_store(2), Some(200));
        assert_eq!(item.price_at_store(3), Some(200)); // gap keeps the last price
        assert_eq!(item.price_at_store(4), Some(180));
        assert_eq!(item.price_at_store(5), Some(180)); // list shorter than tier
    }

    #[test]
    fn test_price_absent() {
        let item = Item::new("Relic", 9);
        assert_eq!(item.price_at_store(5), None);
    }

    #[test]
    fn test_recipe_pair_rejects_malformed() {
        let mut r = recipe(("Ingot", 1), ("Coal", 1));
        assert!(r.pair().is_some());
        r.ingredients.pop();
        assert!(r.pair().is_none());
    }

    #[test]
    fn test_sorted_recipes_simplest_first() {
        let mut item = Item::new("Flame Sword", 6);
        item.recipes = vec![
            recipe(("Dragon Fang", 5), ("Ember", 1)),
            recipe(("Iron Sword", 3), ("Fire Stone", 3)),
            recipe(("Iron Sword", 3), ("Ember", 1)),
        ];
        let sorted = item.sorted_recipes();
        // Max rank 3 beats max rank 5; lower rank sum breaks the tie.
        assert_eq!(sorted[0].ingredients[1].name, "Ember");
        assert_eq!(sorted[1].ingredients[1].name, "Fire Stone");
        assert_eq!(sorted[2].ingredients[0].name, "Dragon Fang");
    }

    #[test]
    fn test_sorted_recipes_label_tiebreak() {
        let mut item = Item::new("Charm", 4);
        item.recipes = vec![
            recipe(("Topaz", 2), ("Silver", 2)),
            recipe(("Opal", 2), ("Silver", 2)),
        ];
        let sorted = item.sorted_recipes();
        assert_eq!(sorted[0].ingredients[0].name, "Opal");
    }

    #[test]
    fn test_item_from_json() {
        let json = r#"{
            "name": "War Axe",
            "rank": 6,
            "type": "axe",
            "stats": {"ATK": 42},
            "rankUp": false,
            "recipes": [{"ingredients": [
                {"name": "Battle Axe", "rank": 5},
                {"name": "Whetstone", "rank": 2}
            ]}],
            "price": [null, 900]
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind.as_deref(), Some("axe"));
        assert_eq!(item.stats.as_ref().unwrap()["ATK"], 42);
        assert_eq!(item.price_at_store(2), Some(900));
        assert_eq!(item.recipes[0].pair().unwrap().0.name, "Battle Axe");
    }
}
