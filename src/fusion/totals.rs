//! Leaf aggregation
//!
//! Flattens a resolved tree's leaves into a count-by-(name, rank) table,
//! optionally priced at a store tier.

use std::collections::HashMap;

use crate::catalog::CatalogIndex;

use super::FusionNode;

/// One row of the ingredient totals table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalRow {
    pub count: u64,
    pub name: String,
    pub rank: u32,
    /// Effective unit price at the requested tier, when one was requested.
    pub price: Option<u32>,
    pub purchasable: bool,
}

/// Collect every countable leaf. Missing and cycle leaves are excluded;
/// truncated leaves still count as real ingredients.
pub fn collect_leaves(node: &FusionNode, out: &mut Vec<(String, u32)>) {
    if !node.children.is_empty() {
        for child in &node.children {
            collect_leaves(child, out);
        }
    } else if !node.missing && !node.cycle {
        out.push((node.name.clone(), node.rank));
    }
}

/// Group leaves by (name, rank), sorted by rank then name.
pub fn totals(leaves: &[(String, u32)]) -> Vec<TotalRow> {
    count_rows(leaves)
        .into_iter()
        .map(|((name, rank), count)| TotalRow {
            count,
            name,
            rank,
            price: None,
            purchasable: false,
        })
        .collect()
}

/// Like `totals`, with each row priced at the given store tier and the
/// grand total summed over priced rows. Unpriced rows contribute nothing.
pub fn priced_totals(
    leaves: &[(String, u32)],
    index: &CatalogIndex,
    store_level: u8,
) -> (Vec<TotalRow>, u64) {
    let mut grand_total = 0u64;
    let rows = count_rows(leaves)
        .into_iter()
        .map(|((name, rank), count)| {
            let price = index
                .by_name(&name)
                .and_then(|item| item.price_at_store(store_level));
            if let Some(price) = price {
                grand_total += count * u64::from(price);
            }
            TotalRow {
                count,
                name,
                rank,
                price,
                purchasable: price.is_some(),
            }
        })
        .collect();
    (rows, grand_total)
}

fn count_rows(leaves: &[(String, u32)]) -> Vec<((String, u32), u64)> {
    let mut counts: HashMap<(String, u32), u64> = HashMap::new();
    for (name, rank) in leaves {
        *counts.entry((name.clone(), *rank)).or_default() += 1;
    }
    let mut rows: Vec<_> = counts.into_iter().collect();
    rows.sort_by(|((an, ar), _), ((bn, br), _)| ar.cmp(br).then_with(|| an.cmp(bn)));
    rows
}
