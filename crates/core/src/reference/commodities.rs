//! Commodity symbols supported by the quote provider.

use serde::Serialize;

/// Provider symbol and the material name it prices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommodityEntry {
    pub symbol: String,
    pub display_name: String,
}

/// Symbol -> display name, in a fixed order.
const STANDARD_COMMODITIES: [(&str, &str); 14] = [
    // Precious metals, priced as currency pairs
    ("XAUUSD", "Gold"),
    ("XAGUSD", "Silver"),
    ("XPTUSD", "Platinum"),
    ("XPDUSD", "Palladium"),
    // Energy, base metals and agriculture
    ("WTI", "Crude Oil (WTI)"),
    ("BRENT", "Crude Oil (Brent)"),
    ("NATURAL_GAS", "Natural Gas"),
    ("COPPER", "Copper"),
    ("ALUMINUM", "Aluminum"),
    ("WHEAT", "Wheat"),
    ("CORN", "Corn"),
    ("COTTON", "Cotton"),
    ("SUGAR", "Sugar"),
    ("COFFEE", "Coffee"),
];

/// Static commodity table offered to the matcher.
#[derive(Clone, Debug)]
pub struct CommodityTable {
    entries: Vec<CommodityEntry>,
}

impl CommodityTable {
    /// The built-in commodity list.
    pub fn standard() -> Self {
        Self::from_pairs(STANDARD_COMMODITIES)
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(symbol, display_name)| CommodityEntry {
                symbol: symbol.to_string(),
                display_name: display_name.to_string(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CommodityEntry] {
        &self.entries
    }

    /// Look up an entry by symbol, ignoring case and surrounding whitespace.
    pub fn get(&self, symbol: &str) -> Option<&CommodityEntry> {
        let symbol = symbol.trim();
        self.entries
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Whether `symbol` is a known commodity whose display name equals `material`.
    ///
    /// Exact case-insensitive comparison only.
    pub fn accepts(&self, symbol: &str, material: &str) -> bool {
        self.get(symbol)
            .map(|e| e.display_name.to_lowercase() == material.trim().to_lowercase())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommodityTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = CommodityTable::standard();
        assert_eq!(table.len(), 14);
        assert_eq!(table.get("XAUUSD").unwrap().display_name, "Gold");
        assert_eq!(table.get(" natural_gas ").unwrap().symbol, "NATURAL_GAS");
        assert!(table.get("STEEL").is_none());
    }

    #[test]
    fn test_accepts_exact_display_name_only() {
        let table = CommodityTable::standard();
        assert!(table.accepts("XAUUSD", "Gold"));
        assert!(table.accepts("xauusd", "gold"));
        assert!(table.accepts("COPPER", " Copper "));

        assert!(!table.accepts("XAGUSD", "Gold"));
        assert!(!table.accepts("WTI", "Crude Oil"));
        assert!(!table.accepts("UNKNOWN", "Gold"));
    }

    #[test]
    fn test_accepts_folds_non_ascii_case() {
        let table = CommodityTable::from_pairs([("XAUUSD", "Édelmetall"), ("NICKEL", "Niquel")]);
        assert!(table.accepts("XAUUSD", "ÉDELMETALL"));
        assert!(table.accepts("XAUUSD", "édelmetall"));
        assert!(!table.accepts("NICKEL", "Níquel"));
    }
}
