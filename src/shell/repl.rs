//! Interactive query loop
//!
//! One query or one fusion analysis runs to completion before the next
//! line is read; there is nothing concurrent here by design.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::catalog::{CatalogIndex, Item};
use crate::fusion::{analyze_fusion, ExpandPolicy, DEFAULT_NODE_BUDGET};
use crate::search::search;

use super::flags::{parse_flags, QueryFlags};
use super::render;

const SUGGESTION_LIMIT: usize = 5;
const FULL_SUGGESTION_LIMIT: usize = 50;

/// Run the interactive shell until `quit`, `exit`, EOF, or interrupt.
pub fn run(index: &CatalogIndex) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(input);
                match input.to_ascii_lowercase().as_str() {
                    "help" => print_help(),
                    "quit" | "exit" => break,
                    _ => handle_query(index, input),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    println!("Bye.");
    Ok(())
}

fn handle_query(index: &CatalogIndex, input: &str) {
    let (flags, query) = parse_flags(input);
    let limit = if flags.full {
        FULL_SUGGESTION_LIMIT
    } else {
        SUGGESTION_LIMIT
    };
    let result = search(index, &query, limit);

    if let Some(item) = result.single() {
        if flags.fusion_requested() {
            show_fusion(index, item, &flags);
        } else {
            print_lines(render::summarize_item(item));
        }
    } else if !result.suggestions.is_empty() {
        println!("No exact match. Did you mean:");
        for (i, s) in result.suggestions.iter().enumerate() {
            let kind = s
                .item
                .kind
                .as_deref()
                .map(|k| format!(" [{k}]"))
                .unwrap_or_default();
            println!("  {}. {} (Rank {}){}", i + 1, s.item.name, s.item.rank, kind);
        }
        println!("Enter full name to see details.");
    } else {
        println!("No matches.");
    }
}

fn show_fusion(index: &CatalogIndex, item: &Item, flags: &QueryFlags) {
    let policy = ExpandPolicy {
        fuse_rank_limit: flags.fuse_rank_limit,
        store_level: flags.store_level,
    };
    let Some(analysis) =
        analyze_fusion(index, item, flags.recipe_index, &policy, DEFAULT_NODE_BUDGET)
    else {
        // Nothing to fuse: fall back to the plain summary.
        print_lines(render::summarize_item(item));
        return;
    };

    println!("{}", render::item_heading(item));
    println!(
        "Recipe {}: {}",
        analysis.recipe_index,
        render::recipe_label(&analysis.recipe)
    );
    print_lines(render::fusion_tree(&analysis.left));
    print_lines(render::fusion_tree(&analysis.right));

    if analysis.rows.is_empty() {
        return;
    }
    println!("Totals:");
    match analysis.grand_total {
        Some(total) => print_lines(render::priced_totals_table(&analysis.rows, total)),
        None => print_lines(render::totals_table(&analysis.rows)),
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  help           Show this help");
    println!("  quit / exit    Exit the app");
    println!("  <query>        Search items by name (partial match, typo-tolerant)");
    println!();
    println!("Filters:");
    println!("  - Append rank: \"r8\" or \"rank 8\" or trailing number (e.g., \"katana r7\")");
    println!("  - Exact item name: \"battle axe\"; name + rank: \"battle axe r7\"");
    println!();
    println!("Options:");
    println!("  --full                 Show up to 50 suggestions instead of top 5");
    println!("  --fuse [N]             Enter fusion mode. Optional N selects recipe index (1-based)");
    println!("  --recipe [N]           Same as --fuse [N]");
    println!("  --depth N              Alias of --fuse-rank N; leaves must be rank <= N");
    println!("  --fuse-rank N          Leaves must be rank <= N");
    println!("  --store N              Price analysis at store level N (1..5).");
    println!("                         With --store, totals show Price and Total price.");
    println!("                         With --depth and --store, unpriced items are treated as owned");
    println!();
    println!("Examples:");
    println!("  golden apple --fuse");
    println!("  golden apple --fuse 2");
    println!("  golden apple --fuse --depth 3");
    println!("  golden apple --fuse --store 3");
}
