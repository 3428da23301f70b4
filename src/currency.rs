//! Built-in currency registry (ISO 4217 codes)
//!
//! Every currency the rate table can hold is listed here together with its
//! display symbol, name, symbol placement and sample rate against USD.

use crate::error::{ExchangeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the symbol goes relative to the formatted number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolPlacement {
    /// `$1,234.56`
    Prefix,
    /// `1,234.56 kr`
    Suffix,
}

/// Supported currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD, // US Dollar
    EUR, // Euro
    GBP, // British Pound Sterling
    JPY, // Japanese Yen
    CAD, // Canadian Dollar
    AUD, // Australian Dollar
    CHF, // Swiss Franc
    CNY, // Chinese Yuan
    INR, // Indian Rupee
    BRL, // Brazilian Real
    MXN, // Mexican Peso
    KRW, // South Korean Won
    SGD, // Singapore Dollar
    HKD, // Hong Kong Dollar
    NOK, // Norwegian Krone
    SEK, // Swedish Krona
    DKK, // Danish Krone
    PLN, // Polish Zloty
    CZK, // Czech Koruna
    HUF, // Hungarian Forint
}

/// Registry row: code, symbol, name, placement, sample rate per 1 USD
type RegistryEntry = (Currency, &'static str, &'static str, &'static str, SymbolPlacement, f64);

static REGISTRY: [RegistryEntry; 20] = {
    use Currency::*;
    use SymbolPlacement::{Prefix, Suffix};
    [
        (USD, "USD", "$", "US Dollar", Prefix, 1.0),
        (EUR, "EUR", "€", "Euro", Prefix, 0.85),
        (GBP, "GBP", "£", "British Pound Sterling", Prefix, 0.73),
        (JPY, "JPY", "¥", "Japanese Yen", Prefix, 110.0),
        (CAD, "CAD", "C$", "Canadian Dollar", Prefix, 1.25),
        (AUD, "AUD", "A$", "Australian Dollar", Prefix, 1.35),
        (CHF, "CHF", "CHF", "Swiss Franc", Prefix, 0.92),
        (CNY, "CNY", "¥", "Chinese Yuan", Prefix, 6.45),
        (INR, "INR", "₹", "Indian Rupee", Prefix, 74.5),
        (BRL, "BRL", "R$", "Brazilian Real", Prefix, 5.2),
        (MXN, "MXN", "$", "Mexican Peso", Prefix, 20.1),
        (KRW, "KRW", "₩", "South Korean Won", Prefix, 1180.0),
        (SGD, "SGD", "S$", "Singapore Dollar", Prefix, 1.35),
        (HKD, "HKD", "HK$", "Hong Kong Dollar", Prefix, 7.8),
        (NOK, "NOK", "kr", "Norwegian Krone", Suffix, 8.6),
        (SEK, "SEK", "kr", "Swedish Krona", Suffix, 8.9),
        (DKK, "DKK", "kr", "Danish Krone", Suffix, 6.3),
        (PLN, "PLN", "zł", "Polish Zloty", Suffix, 3.9),
        (CZK, "CZK", "Kč", "Czech Koruna", Suffix, 21.5),
        (HUF, "HUF", "Ft", "Hungarian Forint", Suffix, 295.0),
    ]
};

impl Currency {
    fn entry(&self) -> &'static RegistryEntry {
        // REGISTRY is declared in variant order
        &REGISTRY[*self as usize]
    }

    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        self.entry().1
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        self.entry().2
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        self.entry().3
    }

    pub fn placement(&self) -> SymbolPlacement {
        self.entry().4
    }

    /// Sample rate against one US Dollar used by the default table
    pub fn default_rate(&self) -> f64 {
        self.entry().5
    }

    /// Parse from ISO code (case-insensitive)
    pub fn from_code(code: &str) -> Result<Self> {
        REGISTRY
            .iter()
            .find(|entry| entry.1.eq_ignore_ascii_case(code))
            .map(|entry| entry.0)
            .ok_or_else(|| ExchangeError::UnsupportedCurrency(code.to_string()))
    }

    /// Get all built-in currencies
    pub fn all() -> Vec<Currency> {
        REGISTRY.iter().map(|entry| entry.0).collect()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::from_code(s)
    }
}
