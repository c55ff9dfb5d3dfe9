//! Fusion-guide parsing
//!
//! The guide is a numbered plain-text document (usually wrapped in HTML
//! `<pre>` blocks): `N.M - Title` group headings, `N.M.K - Name (Rank R)`
//! item headers, `|`-framed stat blocks under divider lines, and
//! `a (R1) + b (R2)` recipe lines.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Ingredient, Item, Recipe};

use super::categories;

static PRE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static GROUP_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\.\d+)\s*-\s*(.+?)\s*$").unwrap());
static ITEM_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+\.\d+\.\d+)\s*-\s*(.+?)\s*\(\s*rank\s*(\d+)\s*\)\s*(?:-\s*(.*))?$")
        .unwrap()
});
static RANK_MARK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*rank\s*\d+\s*\)").unwrap());
static INGREDIENT_RANK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*r(?:ank)?\s*(\d+)\s*\)").unwrap());
static SECTION_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+\s*-").unwrap());
static STAT_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([A-Z][A-Z0-9 ]+)\s+(-?\d+)").unwrap());
static RANK_UP_DESC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rank\s*up\s*item").unwrap());
static RANK_UP_FOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)for\s*:\s*(.+)$").unwrap());

/// Pull the guide text out of an HTML export: the concatenated `<pre>`
/// blocks with tags stripped, or the whole document stripped of tags when
/// there are none. Line endings are normalized.
pub fn extract_text(document: &str) -> String {
    let blocks: Vec<String> = PRE_BLOCK_RE
        .captures_iter(document)
        .map(|caps| strip_tags(&caps[1]))
        .collect();
    let text = if blocks.is_empty() {
        strip_tags(document)
    } else {
        blocks.join("\n")
    };
    text.replace("\r\n", "\n")
}

fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Parse the guide text into catalog items.
pub fn parse_guide(text: &str) -> Vec<Item> {
    let group_map = group_categories(text);
    let mut items: Vec<Item> = Vec::new();
    let mut current: Option<Item> = None;
    let mut in_stats = false;

    for raw in text.lines() {
        let line = raw.trim_end();

        if let Some(caps) = ITEM_HEADER_RE.captures(line) {
            if let Some(done) = current.take() {
                items.push(done);
            }
            in_stats = false;
            current = Some(start_item(&caps, &group_map));
            continue;
        }

        let Some(item) = current.as_mut() else {
            continue;
        };

        let condensed: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if condensed.len() >= 5
            && condensed
                .chars()
                .all(|c| matches!(c, 'o' | 'O' | '0' | '-' | '=' | '_'))
        {
            in_stats = true;
            continue;
        }
        if in_stats && line.contains('|') {
            if let Some(stats) = parse_stats_line(line) {
                item.stats.get_or_insert_with(BTreeMap::new).extend(stats);
            }
            continue;
        }
        if in_stats && line.trim().is_empty() {
            in_stats = false;
            continue;
        }

        if line.contains('+') && !line.contains('=') {
            if let Some(recipe) = parse_recipe_line(line) {
                item.recipes.push(recipe);
            }
        }
    }
    if let Some(done) = current.take() {
        items.push(done);
    }

    // Last-resort category inference from item names.
    for item in &mut items {
        if item.kind.is_none() {
            item.kind = categories::category_for_name(&item.name).map(str::to_string);
        }
    }
    items
}

/// Map `N.M` groups to categories from the group headings. Item header
/// lines are skipped; the first labelled heading per group wins.
fn group_categories(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for raw in text.lines() {
        let line = raw.trim_end();
        if RANK_MARK_RE.is_match(line) {
            continue;
        }
        let Some(caps) = GROUP_TITLE_RE.captures(line) else {
            continue;
        };
        if map.contains_key(&caps[1]) {
            continue;
        }
        if let Some(category) = categories::category_for_title(&caps[2]) {
            map.insert(caps[1].to_string(), category.to_string());
        }
    }
    // The shields group heading is unlabelled in known guides.
    map.entry("4.1".to_string())
        .or_insert_with(|| "shield".to_string());
    map
}

fn start_item(caps: &regex::Captures<'_>, group_map: &HashMap<String, String>) -> Item {
    let section = caps[1].to_string();
    let rank = caps[3].parse().unwrap_or(0);
    let description = caps
        .get(4)
        .map(|m| m.as_str().trim().to_string())
        .filter(|d| !d.is_empty());

    let group = section
        .rsplit_once('.')
        .map(|(group, _)| group.to_string())
        .unwrap_or_default();
    let kind = if section.starts_with("1.") {
        // Weapon groups use the fixed sub-group table; the headings for
        // them are inconsistent across guides.
        group
            .split('.')
            .nth(1)
            .and_then(|minor| minor.parse().ok())
            .and_then(categories::weapon_category)
            .map(str::to_string)
    } else {
        categories::group_category(&group)
            .map(str::to_string)
            .or_else(|| group_map.get(&group).cloned())
    };

    let desc_text = description.as_deref().unwrap_or("");
    let rank_up = RANK_UP_DESC_RE.is_match(desc_text)
        || group == "5.3"
        || kind.as_deref() == Some("rankup");
    let rank_up_for: Vec<String> = RANK_UP_FOR_RE
        .captures(desc_text)
        .map(|caps| {
            caps[1]
                .split(['/', ','])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut item = Item::new(caps[2].trim(), rank);
    item.section = Some(section);
    item.kind = kind;
    item.description = description;
    item.rank_up = rank_up.then_some(true);
    item.rank_up_for = (!rank_up_for.is_empty()).then_some(rank_up_for);
    item
}

fn parse_stats_line(line: &str) -> Option<BTreeMap<String, i32>> {
    let inner = line.trim();
    let inner = inner.strip_prefix('|').unwrap_or(inner);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut stats = BTreeMap::new();
    for part in inner.split('/') {
        if let Some(caps) = STAT_PAIR_RE.captures(part.trim()) {
            if let Ok(value) = caps[2].parse() {
                stats.insert(caps[1].trim().to_string(), value);
            }
        }
    }
    (!stats.is_empty()).then_some(stats)
}

fn parse_recipe_line(line: &str) -> Option<Recipe> {
    let parts: Vec<&str> = line.split('+').collect();
    let [left, right] = parts.as_slice() else {
        return None;
    };
    // A wrapped pair of item headers also contains '+' sometimes; reject
    // anything that still looks like a section reference.
    if SECTION_PREFIX_RE.is_match(left) || SECTION_PREFIX_RE.is_match(right) {
        return None;
    }
    let parse_side = |side: &str| -> Option<Ingredient> {
        let rank = INGREDIENT_RANK_RE.captures(side)?[1].parse().ok()?;
        let name = INGREDIENT_RANK_RE.replace_all(side, "").trim().to_string();
        Some(Ingredient { name, rank })
    };
    let ingredients = vec![parse_side(left)?, parse_side(right)?];
    Some(Recipe { ingredients })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDE: &str = "\
2.1 - Katanas
=================

1.1.1 - Rusty Katana (Rank 1)
o----------------------------o
| ATK 5 / HIT 2              |
o----------------------------o

1.1.2 - Steel Katana (Rank 3) - A dependable blade
  Rusty Katana (R1) + Whetstone (Rank 2)
  Rusty Katana (R1) + Iron Shard (R1)

5.3 - Class Change Items
5.3.1 - Hero Badge (Rank 7) - Rank Up Item for: Soldier / Knight

5.2 - Scroll
5.2.1 - Fire Scroll (Rank 2)

6.1 - Oddments
6.1.1 - Silver Talisman (Rank 4)
";

    #[test]
    fn test_extract_text_prefers_pre_blocks() {
        let html = "<html><b>junk</b><pre>line one\r\n</pre><pre><i>line</i> two</pre></html>";
        assert_eq!(extract_text(html), "line one\n\nline two");
        assert_eq!(extract_text("<b>no pre\r\n</b>"), "no pre\n");
    }

    #[test]
    fn test_parse_guide_items_and_stats() {
        let items = parse_guide(GUIDE);
        assert_eq!(items.len(), 5);

        let rusty = &items[0];
        assert_eq!(rusty.name, "Rusty Katana");
        assert_eq!(rusty.rank, 1);
        assert_eq!(rusty.kind.as_deref(), Some("katana")); // from the 1.X table
        assert_eq!(rusty.section.as_deref(), Some("1.1.1"));
        let stats = rusty.stats.as_ref().unwrap();
        assert_eq!(stats["ATK"], 5);
        assert_eq!(stats["HIT"], 2);
    }

    #[test]
    fn test_parse_guide_recipes() {
        let items = parse_guide(GUIDE);
        let steel = &items[1];
        assert_eq!(steel.description.as_deref(), Some("A dependable blade"));
        assert_eq!(steel.recipes.len(), 2);
        let (a, b) = steel.recipes[0].pair().unwrap();
        assert_eq!((a.name.as_str(), a.rank), ("Rusty Katana", 1));
        assert_eq!((b.name.as_str(), b.rank), ("Whetstone", 2));
    }

    #[test]
    fn test_parse_guide_rank_up() {
        let items = parse_guide(GUIDE);
        let badge = &items[2];
        assert_eq!(badge.kind.as_deref(), Some("rankup"));
        assert_eq!(badge.rank_up, Some(true));
        assert_eq!(
            badge.rank_up_for.as_deref(),
            Some(["Soldier".to_string(), "Knight".to_string()].as_slice())
        );
    }

    #[test]
    fn test_parse_guide_group_and_name_categories() {
        let items = parse_guide(GUIDE);
        // 5.2 is in the fixed group table.
        assert_eq!(items[3].kind.as_deref(), Some("scroll"));
        // 6.1 is unlabelled; the name fallback kicks in.
        assert_eq!(items[4].kind.as_deref(), Some("accessory"));
    }

    #[test]
    fn test_recipe_line_rejects_section_references() {
        assert!(parse_recipe_line("1.1.2 - Foo (R2) + 1.1.3 - Bar (R3)").is_none());
        assert!(parse_recipe_line("A (R1) + B (R2) + C (R3)").is_none());
        assert!(parse_recipe_line("A (R1) + B").is_none());
    }
}
