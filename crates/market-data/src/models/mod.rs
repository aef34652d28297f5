//! Market data models
//!
//! - `types` - Type aliases for common identifiers (Currency, Ticker)
//! - `symbol` - Tradable symbol tagged union (Symbol)
//! - `quote` - Latest price returned by a provider (Quote)

mod quote;
mod symbol;
mod types;

pub use quote::Quote;
pub use symbol::Symbol;
pub use types::{Currency, Ticker};
