use rust_decimal::Decimal;

/// Price assigned to a material when every resolution stage fails
pub const DEFAULT_PRICE: Decimal = Decimal::ONE_HUNDRED;

/// Currency all quotes are expressed in
pub const PRICING_CURRENCY: &str = "USD";

/// Maximum age of a cached price, in seconds
pub const DEFAULT_CACHE_EXPIRY_SECS: u64 = 3600;

/// Minimum spacing between provider calls, in seconds (5 calls per minute)
pub const DEFAULT_RATE_LIMIT_DELAY_SECS: u64 = 12;

/// Number of manufacturer candidates requested from the matcher
pub const DEFAULT_MANUFACTURER_COUNT: usize = 3;

/// Exchange listing files merged into the company directory, in load order
pub const LISTING_FILES: [&str; 2] = ["nasdaqlisted.txt", "otherlisted.txt"];
