//! In-memory rate table
//!
//! Stores one [`CurrencyRecord`] per supported currency, with every rate
//! expressed against a single base currency (rate 1.0). Conversions between
//! two non-base currencies pivot through the base.

use crate::currency::{Currency, SymbolPlacement};
use crate::error::{ExchangeError, Result};
use hashbrown::HashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// One supported currency and its current rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRecord {
    pub code: Currency,
    /// Units of this currency per one unit of the base currency
    pub rate: f64,
    pub symbol: &'static str,
    pub name: &'static str,
    pub placement: SymbolPlacement,
}

impl CurrencyRecord {
    /// Build a record from the registry metadata
    pub fn new(code: Currency, rate: f64) -> Result<Self> {
        validate_rate(code, rate)?;
        Ok(Self {
            code,
            rate,
            symbol: code.symbol(),
            name: code.name(),
            placement: code.placement(),
        })
    }
}

/// Pure-data copy of one record, as produced by [`RateTable::snapshot`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEntry {
    pub rate: f64,
    pub symbol: String,
    pub name: String,
}

/// Rate table keyed by currency code
#[derive(Debug, Clone)]
pub struct RateTable {
    records: HashMap<Currency, CurrencyRecord>,
    base_currency: Currency,
}

fn validate_rate(code: Currency, rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ExchangeError::InvalidRate {
            currency: code.code().to_string(),
            rate,
        });
    }
    Ok(())
}

impl RateTable {
    /// Create a table from explicit records
    ///
    /// The base currency must be among the records with a rate of exactly 1.0.
    pub fn from_records(
        base_currency: Currency,
        records: impl IntoIterator<Item = CurrencyRecord>,
    ) -> Result<Self> {
        let mut map = HashMap::new();
        for record in records {
            validate_rate(record.code, record.rate)?;
            map.insert(record.code, record);
        }

        match map.get(&base_currency) {
            Some(record) if record.rate == 1.0 => {}
            Some(record) => {
                return Err(ExchangeError::InvalidRate {
                    currency: base_currency.code().to_string(),
                    rate: record.rate,
                })
            }
            None => return Err(ExchangeError::UnsupportedCurrency(base_currency.to_string())),
        }

        Ok(Self {
            records: map,
            base_currency,
        })
    }

    /// Base currency of the table
    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a code to a currency held by this table
    pub fn resolve(&self, code: &str) -> Result<Currency> {
        let currency = Currency::from_code(code)?;
        if self.records.contains_key(&currency) {
            Ok(currency)
        } else {
            Err(ExchangeError::UnsupportedCurrency(currency.to_string()))
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.resolve(code).is_ok()
    }

    /// Look up the record for a code
    pub fn lookup(&self, code: &str) -> Result<&CurrencyRecord> {
        let currency = Currency::from_code(code)?;
        self.records
            .get(&currency)
            .ok_or_else(|| ExchangeError::UnsupportedCurrency(currency.to_string()))
    }

    /// Rate of a code against the base currency
    pub fn rate_of(&self, code: &str) -> Result<f64> {
        self.lookup(code).map(|record| record.rate)
    }

    /// Replace one stored rate
    pub fn update_rate(&mut self, code: &str, new_rate: f64) -> Result<()> {
        let currency = self.resolve(code)?;
        self.check_update(currency, new_rate)?;

        if let Some(record) = self.records.get_mut(&currency) {
            log::debug!("{} rate {} -> {}", currency, record.rate, new_rate);
            record.rate = new_rate;
        }
        Ok(())
    }

    /// Replace several rates at once; nothing is applied if any entry is rejected
    pub fn update_rates<'a>(
        &mut self,
        rates: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<usize> {
        let mut validated = Vec::new();
        for (code, rate) in rates {
            let currency = self.resolve(code)?;
            self.check_update(currency, rate)?;
            validated.push((currency, rate));
        }

        for (currency, rate) in &validated {
            if let Some(record) = self.records.get_mut(currency) {
                record.rate = *rate;
            }
        }
        Ok(validated.len())
    }

    fn check_update(&self, currency: Currency, rate: f64) -> Result<()> {
        validate_rate(currency, rate)?;
        // The base currency is pinned at 1.0
        if currency == self.base_currency && rate != 1.0 {
            return Err(ExchangeError::InvalidRate {
                currency: currency.to_string(),
                rate,
            });
        }
        Ok(())
    }

    /// All currencies held by the table, sorted by registry order
    pub fn all_codes(&self) -> Vec<Currency> {
        let mut codes: Vec<Currency> = self.records.keys().copied().collect();
        codes.sort();
        codes
    }

    /// Every rate against the base currency
    pub fn rates(&self) -> BTreeMap<Currency, f64> {
        self.records
            .iter()
            .map(|(code, record)| (*code, record.rate))
            .collect()
    }

    /// Pure-data copy suitable for persistence
    pub fn snapshot(&self) -> BTreeMap<String, SnapshotEntry> {
        self.records
            .values()
            .map(|record| {
                (
                    record.code.to_string(),
                    SnapshotEntry {
                        rate: record.rate,
                        symbol: record.symbol.to_string(),
                        name: record.name.to_string(),
                    },
                )
            })
            .collect()
    }

    /// Replace the whole mapping and base currency from persisted rates
    ///
    /// Every entry is validated before anything is applied; on error the
    /// table is left exactly as it was.
    pub fn load_snapshot(&mut self, rates: &BTreeMap<String, f64>, base_currency: &str) -> Result<()> {
        let mut records = HashMap::with_capacity(rates.len());

        for (code, &rate) in rates {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ExchangeError::InvalidSnapshot(format!(
                    "malformed currency code '{}'",
                    code
                )));
            }
            let currency = Currency::from_code(code).map_err(|_| {
                ExchangeError::InvalidSnapshot(format!("unknown currency '{}'", code))
            })?;
            let record = CurrencyRecord::new(currency, rate).map_err(|_| {
                ExchangeError::InvalidSnapshot(format!("invalid rate {} for {}", rate, code))
            })?;
            if records.insert(currency, record).is_some() {
                return Err(ExchangeError::InvalidSnapshot(format!(
                    "duplicate currency '{}'",
                    code
                )));
            }
        }

        let base = Currency::from_code(base_currency)
            .ok()
            .filter(|currency| records.contains_key(currency))
            .ok_or_else(|| {
                ExchangeError::InvalidSnapshot(format!(
                    "base currency '{}' is not among the rates",
                    base_currency
                ))
            })?;

        let base_rate = records[&base].rate;
        if base_rate != 1.0 {
            return Err(ExchangeError::InvalidSnapshot(format!(
                "base currency {} must have rate 1.0, got {}",
                base, base_rate
            )));
        }

        self.records = records;
        self.base_currency = base;
        Ok(())
    }
}

impl Default for RateTable {
    /// Built-in table: USD base and the sample rates of every registry currency
    fn default() -> Self {
        let records = Currency::all()
            .into_iter()
            .map(|code| CurrencyRecord {
                code,
                rate: code.default_rate(),
                symbol: code.symbol(),
                name: code.name(),
                placement: code.placement(),
            })
            .map(|record| (record.code, record))
            .collect();

        Self {
            records,
            base_currency: Currency::USD,
        }
    }
}
