use std::borrow::Cow;
use std::sync::Arc;

/// Currency code (ISO 4217) - mostly static
pub type Currency = Cow<'static, str>;

/// Provider-specific ticker discovered at runtime
pub type Ticker = Arc<str>;
