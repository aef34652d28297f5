//! Process-wide material price cache with a fixed expiry window.

use std::time::Duration;

use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;
use tokio::time::Instant;

#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    price: Decimal,
    stored_at: Instant,
}

/// Material name -> last fetched price.
///
/// Entries older than the expiry window are never served; they stay in the map
/// until overwritten. Concurrent writers for the same material are allowed and
/// the last one wins.
#[derive(Debug)]
pub struct QuoteCache {
    entries: DashMap<String, CacheEntry>,
    expiry: Duration,
}

impl QuoteCache {
    pub fn new(expiry: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            expiry,
        }
    }

    /// Return the cached price if it is younger than the expiry window.
    pub fn get(&self, material: &str) -> Option<Decimal> {
        let entry = *self.entries.get(material)?;
        if entry.stored_at.elapsed() < self.expiry {
            Some(entry.price)
        } else {
            debug!("Cached price for '{}' expired", material);
            None
        }
    }

    /// Store a price stamped with the current time, replacing any previous entry.
    pub fn put(&self, material: &str, price: Decimal) {
        self.entries.insert(
            material.to_string(),
            CacheEntry {
                price,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
