//! Prompt builders for the material matcher and item decomposition.
//!
//! Every prompt asks for a strict, prose-free answer so the parsers in
//! [`crate::parsing`] can validate it mechanically.

use procplan_core::reference::{curated_manufacturer_lines, CommodityTable, CompanyDirectory};

use crate::parsing::{NONE_TOKEN, NO_MATCH_TOKEN};

/// Maximum number of components requested for one item.
pub const MAX_COMPONENTS: usize = 10;

/// A system instruction plus the user request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

const STRICT_FORMATTER: &str = "You are a strict data formatter. \
Return ONLY the requested data. Do not add explanations, descriptions, \
introductions, numbering or markdown.";

pub fn commodity_prompt(material: &str, commodities: &CommodityTable) -> PromptPair {
    let table = commodities
        .entries()
        .iter()
        .map(|e| format!("{}: {}", e.symbol, e.display_name))
        .collect::<Vec<_>>()
        .join("\n");

    let system = format!(
        "{STRICT_FORMATTER}\n\n\
Rules:\n\
1. Answer with exactly one symbol from the list below, or {NO_MATCH_TOKEN}\n\
2. Choose a symbol only if its commodity is the same material as the request\n\
3. Answer {NO_MATCH_TOKEN} for products, alloys or anything not in the list\n\n\
Available commodities (SYMBOL: name):\n{table}"
    );

    PromptPair {
        system,
        user: format!("Commodity symbol for: {}", material),
    }
}

pub fn manufacturer_prompt(
    material: &str,
    companies: &CompanyDirectory,
    count: usize,
) -> PromptPair {
    let hints = curated_manufacturer_lines().join("\n");
    let listed = companies
        .entries()
        .iter()
        .map(|e| format!("{}, {}", e.name, e.symbol))
        .collect::<Vec<_>>()
        .join("\n");

    let system = format!(
        "{STRICT_FORMATTER}\n\n\
STRICT FORMAT RULES:\n\
1. Return at most {count} companies from the available companies list\n\
2. Each line MUST be in format: Company Name, SYMBOL\n\
3. Do not use parentheses, dashes, colons or semicolons\n\
4. If no company produces the material, return exactly: {NONE_TOKEN}\n\n\
Example correct response:\n\
Dow Inc., DOW\n\
DuPont de Nemours Inc., DD\n\n\
Well-known producers by sector (for reference only):\n{hints}\n\n\
Available companies:\n{listed}"
    );

    PromptPair {
        system,
        user: format!("Return {} manufacturers for: {}", count, material),
    }
}

pub fn similarity_prompt(material: &str, candidates: &[&str]) -> PromptPair {
    let list = candidates.join("\n");

    let system = format!(
        "{STRICT_FORMATTER}\n\n\
Rules:\n\
1. Answer with exactly one material name copied from the list below, or {NO_MATCH_TOKEN}\n\
2. Pick the material whose market price best tracks the requested material\n\
3. Answer {NO_MATCH_TOKEN} if none is related\n\n\
Available materials:\n{list}"
    );

    PromptPair {
        system,
        user: format!("Most similar material to: {}", material),
    }
}

pub fn composition_prompt(item: &str) -> PromptPair {
    let system = format!(
        "{STRICT_FORMATTER}\n\n\
You estimate the raw material composition of manufactured items by weight.\n\
Rules:\n\
1. Return at most {MAX_COMPONENTS} lines\n\
2. Each line MUST be in format: Material, percentage\n\
3. Use generic material names such as Steel, Aluminum, Plastic, Glass, Copper\n\
4. Percentages are plain numbers without a percent sign\n\n\
Example correct response:\n\
Aluminum, 35\n\
Plastic, 30\n\
Glass, 20\n\
Copper, 15"
    );

    PromptPair {
        system,
        user: format!("Material composition of: {}", item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commodity_prompt_lists_table() {
        let prompt = commodity_prompt("Gold", &CommodityTable::standard());
        assert!(prompt.system.contains("XAUUSD: Gold"));
        assert!(prompt.system.contains("NATURAL_GAS: Natural Gas"));
        assert!(prompt.system.contains(NO_MATCH_TOKEN));
        assert_eq!(prompt.user, "Commodity symbol for: Gold");
    }

    #[test]
    fn test_manufacturer_prompt_includes_directory_and_hints() {
        let companies = CompanyDirectory::from_pairs([("AA", "Alcoa Corporation Common Stock")]);
        let prompt = manufacturer_prompt("Aluminum", &companies, 3);

        assert!(prompt.system.contains("Alcoa Corporation Common Stock, AA"));
        assert!(prompt.system.contains("Metals & Mining:\nBHP Group, BHP"));
        assert!(prompt.system.contains("Alcoa Corporation, AA"));
        assert!(prompt.system.contains("at most 3 companies"));
        assert_eq!(prompt.user, "Return 3 manufacturers for: Aluminum");
    }

    #[test]
    fn test_similarity_prompt_lists_candidates() {
        let prompt = similarity_prompt("Stainless Steel", &["Steel", "Copper"]);
        assert!(prompt.system.contains("Steel\nCopper"));
        assert!(prompt.user.ends_with("Stainless Steel"));
    }

    #[test]
    fn test_composition_prompt() {
        let prompt = composition_prompt("Laptop");
        assert!(prompt.system.contains("Material, percentage"));
        assert_eq!(prompt.user, "Material composition of: Laptop");
    }
}
