//! Reference tables consulted by the pricing pipeline.
//!
//! - [`commodities`] - commodity symbol -> display name
//! - [`listings`] - company directory loaded from exchange listing files
//! - [`direct_symbols`] - material -> tradable proxy symbol
//! - [`manufacturers`] - curated producer list used as a prompt hint
//!
//! All tables are built once at startup and are read-only afterwards.

pub mod commodities;
pub mod direct_symbols;
pub mod listings;
pub mod manufacturers;

use std::path::Path;

pub use commodities::{CommodityEntry, CommodityTable};
pub use direct_symbols::DirectSymbolTable;
pub use listings::{CompanyDirectory, CompanyEntry};
pub use manufacturers::{curated_manufacturer_lines, CURATED_MANUFACTURERS};

/// The immutable lookup tables shared by every pricing request.
#[derive(Clone, Debug, Default)]
pub struct ReferenceTables {
    pub commodities: CommodityTable,
    pub companies: CompanyDirectory,
    pub direct_symbols: DirectSymbolTable,
}

impl ReferenceTables {
    /// Standard commodity and direct-symbol tables with the given company directory.
    pub fn new(companies: CompanyDirectory) -> Self {
        Self {
            commodities: CommodityTable::standard(),
            companies,
            direct_symbols: DirectSymbolTable::standard(),
        }
    }

    /// Standard tables with the company directory loaded from `listings_dir`.
    pub fn with_listings(listings_dir: &Path) -> Self {
        Self::new(CompanyDirectory::load(listings_dir))
    }
}
