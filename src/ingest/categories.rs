//! Category inference tables
//!
//! Ordered (keywords, category) tables evaluated top to bottom; the first
//! match wins. Plain data, so guide quirks are fixed by editing a table
//! rather than code.

use crate::text::normalize;

/// Section-title words, for group headings like `1.4 - Axes`.
const TITLE_CATEGORIES: &[(&[&str], &str)] = &[
    (&["katana", "katanas"], "katana"),
    (&["sword", "swords"], "sword"),
    (&["bow", "bows"], "bow"),
    (&["axe", "axes"], "axe"),
    (&["spear", "spears"], "spear"),
    (&["knife", "knives"], "knife"),
    (&["gauntlet", "gauntlets", "glove", "gloves", "mittens"], "glove"),
    (&["shoe", "shoes", "boot", "boots"], "shoe"),
    (&["staff", "staves", "rod", "rods", "wand", "wands"], "staff"),
    (&["agryrion"], "agryrion"),
    (&["helmet", "helmets"], "helmet"),
    (&["hat", "hats"], "hat"),
    (&["robe", "robes"], "robe"),
    (&["armor", "armors", "armour", "mail", "mails"], "armor"),
    (&["shield", "shields"], "shield"),
    (&["ring", "rings"], "ring"),
    (&["amulet", "amulets"], "amulet"),
    (&["accessory", "accessories"], "accessory"),
    (&["scroll", "scrolls"], "scroll"),
    (&["class", "change"], "rankup"),
    (&["recovery"], "recovery"),
];

/// Weapon sub-groups 1.1 through 1.9, in guide order. The table of
/// contents labels these inconsistently, so the mapping is fixed.
const WEAPON_SUBGROUPS: &[&str] = &[
    "katana", "sword", "bow", "axe", "spear", "knife", "glove", "staff", "agryrion",
];

/// Groups whose heading does not name the category.
const GROUP_CATEGORIES: &[(&str, &str)] = &[
    ("5.2", "scroll"),
    ("4.2", "glove"),
    ("4.3", "shoe"),
    ("5.3", "rankup"),
];

/// Name substrings, the last-resort inference for items whose group gave
/// no category.
const NAME_CATEGORIES: &[(&[&str], &str)] = &[
    (&["helmet", "hat", "turban", "mask", "hachimaki", "hachigane"], "helmet"),
    (&["robe", "garb", "shawl"], "robe"),
    (&["mail", "armor", "armour", "plate"], "armor"),
    (&["shield"], "shield"),
    (&["ring", "charm", "amulet", "talisman", "anklet", "earrings"], "accessory"),
    (&["boots", "shoes"], "shoe"),
    (&["potion", "elixir", "antidote", "holy water", "whistle"], "recovery"),
];

pub(crate) fn category_for_title(title: &str) -> Option<&'static str> {
    let normalized = normalize(title);
    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
    for (keywords, category) in TITLE_CATEGORIES {
        if *category == "rankup" && normalized.contains("rank up") {
            return Some(category);
        }
        if keywords.iter().any(|k| words.iter().any(|w| w == k)) {
            return Some(category);
        }
    }
    None
}

/// Category for a `1.<minor>` weapon section.
pub(crate) fn weapon_category(minor: u32) -> Option<&'static str> {
    minor
        .checked_sub(1)
        .and_then(|idx| WEAPON_SUBGROUPS.get(idx as usize))
        .copied()
}

pub(crate) fn group_category(group: &str) -> Option<&'static str> {
    GROUP_CATEGORIES
        .iter()
        .find(|(g, _)| *g == group)
        .map(|&(_, category)| category)
}

pub(crate) fn category_for_name(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    NAME_CATEGORIES
        .iter()
        .find(|(substrings, _)| substrings.iter().any(|s| lower.contains(s)))
        .map(|&(_, category)| category)
}
