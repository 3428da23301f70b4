//! Quick-access helpers over a default-configured engine
//!
//! Each call builds its own [`ExchangeEngine`] with the built-in rates, so
//! results never depend on earlier calls or on any shared state.

use crate::currency::Currency;
use crate::engine::ExchangeEngine;
use crate::error::Result;

/// Convert using the built-in rates
///
/// # Example
/// ```
/// use fx_exchange::convert_currency;
///
/// let jpy = convert_currency(10.0, "USD", "JPY").unwrap();
/// assert_eq!(jpy, 1100.0);
/// ```
pub fn convert_currency(amount: f64, from_code: &str, to_code: &str) -> Result<f64> {
    ExchangeEngine::new().convert(amount, from_code, to_code)
}

/// Exchange rate between two currencies using the built-in rates
pub fn get_exchange_rate(from_code: &str, to_code: &str) -> Result<f64> {
    ExchangeEngine::new().get_exchange_rate(from_code, to_code)
}

/// Format an amount with the currency's symbol
pub fn format_currency(amount: f64, code: &str) -> Result<String> {
    ExchangeEngine::new().format_currency(amount, code)
}

pub fn get_supported_currencies() -> Vec<Currency> {
    ExchangeEngine::new().supported_currencies()
}
