//! Console rendering
//!
//! All renderers return formatted lines; printing is the REPL's job, which
//! keeps the output testable and the traversal order stable.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Ingredient, Item, Recipe};
use crate::fusion::{FusionNode, TotalRow};

static RANK_UP_DESC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rank\s*up\s*item").unwrap());

/// `Name (RN)` form used in recipe lines and trees.
pub fn ingredient_label(ingredient: &Ingredient) -> String {
    if ingredient.rank > 0 {
        format!("{} (R{})", ingredient.name, ingredient.rank)
    } else {
        ingredient.name.clone()
    }
}

/// `a (R1) + b (R2)` form for one recipe.
pub fn recipe_label(recipe: &Recipe) -> String {
    recipe
        .ingredients
        .iter()
        .map(ingredient_label)
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Item header with optional type tag: `Name (Rank N) [type]`.
pub fn item_heading(item: &Item) -> String {
    let kind = item
        .kind
        .as_deref()
        .map(|k| format!(" [{k}]"))
        .unwrap_or_default();
    format!("{} (Rank {}){}", item.name, item.rank, kind)
}

/// Full item summary: heading, description, rank-up note, stats, and the
/// sorted recipe table.
pub fn summarize_item(item: &Item) -> Vec<String> {
    let mut lines = vec![item_heading(item)];

    let description = item.description.as_deref().unwrap_or("");
    if !description.is_empty() {
        lines.push(description.to_string());
    }
    // Skip the note when the description already carries it.
    if item.rank_up.unwrap_or(false) && !RANK_UP_DESC_RE.is_match(description) {
        match item.rank_up_for.as_deref() {
            Some(classes) if !classes.is_empty() => {
                lines.push(format!("Rank Up Item for: {}", classes.join(" / ")));
            }
            _ => lines.push("Rank Up Item".to_string()),
        }
    }
    if let Some(stats) = item.stats.as_ref().filter(|s| !s.is_empty()) {
        let pairs: Vec<String> = stats.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        lines.push(format!("Stats: {}", pairs.join(", ")));
    }

    let recipes = item.sorted_recipes();
    lines.push(format!("Recipes to create: {}", recipes.len()));
    if !recipes.is_empty() {
        let rows: Vec<Vec<String>> = recipes
            .iter()
            .enumerate()
            .map(|(i, recipe)| {
                let ing = |idx: usize| {
                    recipe
                        .ingredients
                        .get(idx)
                        .map(ingredient_label)
                        .unwrap_or_default()
                };
                vec![(i + 1).to_string(), ing(0), ing(1)]
            })
            .collect();
        lines.extend(render_table(&["#", "Ingredient 1", "Ingredient 2"], &rows, None));
    }
    lines
}

/// Indented fusion tree, two spaces per depth, with an `= a + b` line under
/// each expanded node.
pub fn fusion_tree(node: &FusionNode) -> Vec<String> {
    let mut lines = Vec::new();
    push_tree(node, "", &mut lines);
    lines
}

fn push_tree(node: &FusionNode, indent: &str, lines: &mut Vec<String>) {
    let is_end = node.children.is_empty() && !node.missing && !node.cycle;
    let marker = if node.missing {
        " [missing]"
    } else if node.cycle {
        " [cycle]"
    } else if is_end {
        " [END]"
    } else {
        ""
    };
    lines.push(format!("{indent}{} (R{}){marker}", node.name, node.rank));

    if node.children.is_empty() {
        return;
    }
    if let Some(recipe) = &node.recipe {
        lines.push(format!("{indent}  = {}", recipe_label(recipe)));
    }
    let child_indent = format!("{indent}  ");
    for child in &node.children {
        push_tree(child, &child_indent, lines);
    }
}

/// `Count | Item | Rank` table.
pub fn totals_table(rows: &[TotalRow]) -> Vec<String> {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.count.to_string(), r.name.clone(), r.rank.to_string()])
        .collect();
    render_table(&["Count", "Item", "Rank"], &body, None)
}

/// `Count | Item | Rank | Price` table with a `Total price` footer row.
/// Unpriced rows show `-`.
pub fn priced_totals_table(rows: &[TotalRow], grand_total: u64) -> Vec<String> {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.count.to_string(),
                r.name.clone(),
                r.rank.to_string(),
                r.price.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    let footer = vec![
        String::new(),
        "Total price".to_string(),
        String::new(),
        grand_total.to_string(),
    ];
    render_table(&["Count", "Item", "Rank", "Price"], &body, Some(footer))
}

fn render_table(headers: &[&str], rows: &[Vec<String>], footer: Option<Vec<String>>) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows.iter().chain(footer.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let border: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .chain(std::iter::once("+".to_string()))
        .collect();
    let format_row = |cells: &[String]| -> String {
        let mut line = String::new();
        for (cell, &width) in cells.iter().zip(&widths) {
            line.push_str(&format!("| {cell:<width$} "));
        }
        line.push('|');
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![border.clone(), format_row(&header_cells), border.clone()];
    for row in rows {
        lines.push(format_row(row));
    }
    lines.push(border.clone());
    if let Some(footer) = footer {
        lines.push(format_row(&footer));
        lines.push(border);
    }
    lines
}
