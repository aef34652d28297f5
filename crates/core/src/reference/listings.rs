//! Company directory loaded from exchange listing files.
//!
//! Listing files are pipe-delimited with a header row. Column 0 holds the
//! symbol and column 1 the company name; remaining columns are ignored.

use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;
use log::{error, info};
use serde::Serialize;

use crate::constants::LISTING_FILES;
use crate::errors::{Error, Result};

/// Footer row written at the end of NASDAQ listing files.
const FOOTER_PREFIX: &str = "File Creation Time";

/// A listed company. The name is the join key; the symbol is opaque.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompanyEntry {
    pub symbol: String,
    pub name: String,
}

/// Company name -> symbol table, in first-insertion order.
#[derive(Clone, Debug, Default)]
pub struct CompanyDirectory {
    entries: Vec<CompanyEntry>,
    by_name: HashMap<String, usize>,
}

impl CompanyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from `(symbol, name)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut directory = Self::new();
        for (symbol, name) in pairs {
            directory.insert(symbol, name);
        }
        directory
    }

    /// Insert a company. A repeated name keeps its position and takes the new symbol.
    pub fn insert(&mut self, symbol: &str, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        match self.by_name.get(name) {
            Some(&idx) => self.entries[idx].symbol = symbol.trim().to_string(),
            None => {
                self.by_name.insert(name.to_string(), self.entries.len());
                self.entries.push(CompanyEntry {
                    symbol: symbol.trim().to_string(),
                    name: name.to_string(),
                });
            }
        }
    }

    /// Load and merge the standard listing files from `dir`.
    ///
    /// Never fails: if any file is missing or malformed the error is logged and
    /// an empty directory is returned.
    pub fn load(dir: &Path) -> Self {
        match Self::try_load(dir) {
            Ok(directory) => {
                info!(
                    "Loaded {} companies from exchange listings in {}",
                    directory.len(),
                    dir.display()
                );
                directory
            }
            Err(e) => {
                error!("Error loading company data: {}", e);
                Self::new()
            }
        }
    }

    /// Load and merge the standard listing files, later files winning on collision.
    pub fn try_load(dir: &Path) -> Result<Self> {
        let mut directory = Self::new();
        for file in LISTING_FILES {
            directory.merge_listing(&dir.join(file))?;
        }
        Ok(directory)
    }

    fn merge_listing(&mut self, path: &Path) -> Result<()> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_path(path)
            .map_err(|e| listing_error(path, e))?;

        for record in reader.records() {
            let record = record.map_err(|e| listing_error(path, e))?;
            if record.len() < 2 {
                continue;
            }
            let symbol = &record[0];
            if symbol.starts_with(FOOTER_PREFIX) {
                continue;
            }
            self.insert(symbol, &record[1]);
        }

        Ok(())
    }

    /// Resolve a company name suggested by the matcher.
    ///
    /// Tries an exact case-insensitive name match first, then substring
    /// containment in either direction. The first hit in directory order wins.
    pub fn resolve(&self, candidate: &str) -> Option<&CompanyEntry> {
        let candidate = candidate.trim().to_lowercase();
        if candidate.is_empty() {
            return None;
        }

        let exact = self
            .entries
            .iter()
            .find(|e| e.name.to_lowercase() == candidate);
        if exact.is_some() {
            return exact;
        }

        self.entries.iter().find(|e| {
            let name = e.name.to_lowercase();
            name.contains(&candidate) || candidate.contains(&name)
        })
    }

    pub fn entries(&self) -> &[CompanyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn listing_error(path: &Path, e: csv::Error) -> Error {
    Error::ConfigIO(format!("Failed to read listing {}: {}", path.display(), e))
}
