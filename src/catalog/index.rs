//! Derived catalog index
//!
//! Built once after the dataset loads and read-only from then on. Holds the
//! normalized-name map (last-loaded wins on collisions; the source data may
//! contain near-duplicate display names), the
//! type -> rank -> items grouping for rank-qualified category queries, and
//! per-item token lists for the scorer.

use std::collections::HashMap;

use crate::text::{normalize, tokenize};

use super::Item;

/// Search-ready view of one catalog item.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub normalized_name: String,
    pub tokens: Vec<String>,
}

/// Read-only lookup structures derived from the loaded dataset.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    items: Vec<Item>,
    /// Parallel to `items`.
    entries: Vec<IndexEntry>,
    /// Normalized name -> item position; later items overwrite earlier ones.
    name_map: HashMap<String, usize>,
    /// Lowercased type tag -> rank -> item positions, insertion order kept.
    type_rank: HashMap<String, HashMap<u32, Vec<usize>>>,
    /// Type tags in first-seen order, for deterministic fuzzy inference.
    types: Vec<String>,
}

impl CatalogIndex {
    pub fn build(items: Vec<Item>) -> Self {
        let mut index = CatalogIndex {
            entries: Vec::with_capacity(items.len()),
            ..Default::default()
        };

        for (pos, item) in items.iter().enumerate() {
            index.entries.push(IndexEntry {
                normalized_name: normalize(&item.name),
                tokens: tokenize(&item.name),
            });
            index
                .name_map
                .insert(index.entries[pos].normalized_name.clone(), pos);

            let Some(kind) = item.kind.as_deref() else {
                continue;
            };
            let kind = kind.to_lowercase();
            if kind.is_empty() {
                continue;
            }
            if !index.type_rank.contains_key(&kind) {
                index.types.push(kind.clone());
            }
            index
                .type_rank
                .entry(kind)
                .or_default()
                .entry(item.rank)
                .or_default()
                .push(pos);
        }

        index.items = items;
        index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items paired with their search entries, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&Item, &IndexEntry)> {
        self.items.iter().zip(self.entries.iter())
    }

    /// Exact lookup by normalized name.
    pub fn by_name(&self, name: &str) -> Option<&Item> {
        self.name_map
            .get(&normalize(name))
            .map(|&pos| &self.items[pos])
    }

    /// Every item of the given (type, rank) pair, in load order.
    pub fn by_type_and_rank(&self, kind: &str, rank: u32) -> Vec<&Item> {
        self.type_rank
            .get(&kind.to_lowercase())
            .and_then(|ranks| ranks.get(&rank))
            .map(|positions| positions.iter().map(|&pos| &self.items[pos]).collect())
            .unwrap_or_default()
    }

    pub fn has_type(&self, kind: &str) -> bool {
        self.type_rank.contains_key(&kind.to_lowercase())
    }

    /// Known type tags in first-seen order.
    pub fn known_types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed_item(name: &str, rank: u32, kind: &str) -> Item {
        let mut item = Item::new(name, rank);
        item.kind = Some(kind.to_string());
        item
    }

    #[test]
    fn test_by_name_normalizes() {
        let index = CatalogIndex::build(vec![Item::new("Battle Axe", 5)]);
        assert!(index.by_name("  BATTLE--AXE ").is_some());
        assert!(index.by_name("battle hammer").is_none());
    }

    #[test]
    fn test_name_collision_last_wins() {
        let mut first = Item::new("Holy Water", 2);
        first.description = Some("old".to_string());
        let mut second = Item::new("Holy  Water", 2);
        second.description = Some("new".to_string());

        let index = CatalogIndex::build(vec![first, second]);
        let found = index.by_name("holy water").unwrap();
        assert_eq!(found.description.as_deref(), Some("new"));
        assert_eq!(index.len(), 2); // both items remain in the catalog
    }

    #[test]
    fn test_type_rank_grouping_keeps_load_order() {
        let index = CatalogIndex::build(vec![
            typed_item("Battle Axe", 5, "axe"),
            typed_item("Iron Sword", 5, "sword"),
            typed_item("Iron Axe", 5, "axe"),
        ]);
        let axes = index.by_type_and_rank("axe", 5);
        assert_eq!(axes.len(), 2);
        assert_eq!(axes[0].name, "Battle Axe");
        assert_eq!(axes[1].name, "Iron Axe");
        assert!(index.by_type_and_rank("axe", 6).is_empty());
        assert!(index.by_type_and_rank("robe", 5).is_empty());
    }

    #[test]
    fn test_known_types_first_seen_order() {
        let index = CatalogIndex::build(vec![
            typed_item("Battle Axe", 5, "axe"),
            typed_item("Iron Sword", 5, "sword"),
            typed_item("Iron Axe", 4, "axe"),
        ]);
        let types: Vec<&str> = index.known_types().collect();
        assert_eq!(types, vec!["axe", "sword"]);
    }
}
