//! # fx_exchange
//!
//! Currency conversion and formatting over a static, in-memory table of
//! exchange rates expressed against one base currency.
//!
//! ## Example
//!
//! ```rust
//! use fx_exchange::prelude::*;
//!
//! let mut engine = ExchangeEngine::new();
//!
//! let best = engine.find_best_exchange(100.0, "USD", &["EUR", "GBP", "JPY"]).unwrap();
//! assert_eq!(best.currency, Currency::JPY);
//!
//! engine.update_exchange_rate("EUR", 0.92).unwrap();
//! assert_eq!(engine.format_currency(1234.56, "EUR").unwrap(), "€1,234.56");
//! ```

pub mod currency;
pub mod engine;
pub mod error;
pub mod format;
pub mod rate_table;
pub mod snapshot;
pub mod utils;

pub use currency::{Currency, SymbolPlacement};
pub use engine::{BestExchange, CurrencyComparison, ExchangeEngine};
pub use error::{ExchangeError, Result};
pub use format::FormatOptions;
pub use rate_table::{CurrencyRecord, RateTable, SnapshotEntry};
pub use snapshot::RateSnapshot;
pub use utils::{convert_currency, format_currency, get_exchange_rate, get_supported_currencies};

pub mod prelude {
    //! Commonly used types
    pub use crate::currency::{Currency, SymbolPlacement};
    pub use crate::engine::{BestExchange, CurrencyComparison, ExchangeEngine};
    pub use crate::error::{ExchangeError, Result};
    pub use crate::format::FormatOptions;
    pub use crate::rate_table::{CurrencyRecord, RateTable};
}
