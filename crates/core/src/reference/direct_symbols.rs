//! Materials with a known tradable proxy (ETF or bellwether producer).

/// Material -> symbol
const STANDARD_DIRECT_SYMBOLS: [(&str, &str); 18] = [
    ("Steel", "SLX"),
    ("Copper", "CPER"),
    ("Aluminum", "AA"),
    ("Plastic", "LYB"),
    ("Glass", "GLW"),
    ("Rubber", "GT"),
    ("Lithium", "LIT"),
    ("Gold", "GLD"),
    ("Silver", "SLV"),
    ("Platinum", "PPLT"),
    ("Palladium", "PALL"),
    ("Uranium", "URA"),
    ("Rare Earth Metals", "REMX"),
    ("Timber", "WOOD"),
    ("Cement", "CX"),
    ("Paper", "IP"),
    ("Crude Oil", "USO"),
    ("Natural Gas", "UNG"),
];

/// Static material -> symbol table.
#[derive(Clone, Debug)]
pub struct DirectSymbolTable {
    entries: Vec<(String, String)>,
}

impl DirectSymbolTable {
    pub fn standard() -> Self {
        Self::from_pairs(STANDARD_DIRECT_SYMBOLS)
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(material, symbol)| (material.to_string(), symbol.to_string()))
            .collect();
        Self { entries }
    }

    /// Exact, case-insensitive lookup by material name.
    pub fn lookup(&self, material: &str) -> Option<&str> {
        let material = material.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| key.to_lowercase() == material)
            .map(|(_, symbol)| symbol.as_str())
    }

    /// Material keys in table order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DirectSymbolTable {
    fn default() -> Self {
        Self::standard()
    }
}
