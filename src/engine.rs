//! Exchange engine: conversion, comparison and formatting over a rate table

use crate::currency::Currency;
use crate::error::{ExchangeError, Result};
use crate::format::{format_amount, FormatOptions};
use crate::rate_table::{CurrencyRecord, RateTable};
use crate::snapshot::RateSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// One row of [`ExchangeEngine::compare_currencies`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyComparison {
    pub currency: Currency,
    pub converted_amount: f64,
    /// Pairwise rate from the comparison base to `currency`
    pub rate: f64,
    pub formatted: String,
}

/// Winner of [`ExchangeEngine::find_best_exchange`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestExchange {
    pub currency: Currency,
    pub amount: f64,
    pub rate: f64,
    pub formatted: String,
}

/// Currency exchange engine
///
/// Owns its [`RateTable`]; there is no shared or global state. The engine
/// does no locking, so callers sharing one across threads must wrap it in a
/// mutex themselves.
///
/// # Example
/// ```
/// use fx_exchange::ExchangeEngine;
///
/// let engine = ExchangeEngine::new();
/// let eur = engine.convert(100.0, "USD", "EUR").unwrap();
/// assert!((eur - 85.0).abs() < 1e-9);
/// assert_eq!(engine.format_currency(1234.56, "EUR").unwrap(), "€1,234.56");
/// ```
#[derive(Debug, Clone)]
pub struct ExchangeEngine {
    table: RateTable,
    base_currency: Currency,
    last_updated: DateTime<Utc>,
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ExchangeError::InvalidAmount(amount));
    }
    Ok(())
}

impl ExchangeEngine {
    /// Create engine with the built-in table (USD base)
    pub fn new() -> Self {
        Self::with_rate_table(RateTable::default())
    }

    /// Create engine around an existing rate table
    pub fn with_rate_table(table: RateTable) -> Self {
        Self {
            base_currency: table.base_currency(),
            table,
            last_updated: Utc::now(),
        }
    }

    pub fn rate_table(&self) -> &RateTable {
        &self.table
    }

    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }

    /// When the rates last changed
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Supported currencies, in registry order
    pub fn supported_currencies(&self) -> Vec<Currency> {
        self.table.all_codes()
    }

    pub fn is_valid_currency(&self, code: &str) -> bool {
        self.table.contains(code)
    }

    pub fn currency_name(&self, code: &str) -> Result<&'static str> {
        self.table.lookup(code).map(|record| record.name)
    }

    pub fn currency_symbol(&self, code: &str) -> Result<&'static str> {
        self.table.lookup(code).map(|record| record.symbol)
    }

    /// Rate from one currency to another, pivoting through the base currency
    pub fn get_exchange_rate(&self, from_code: &str, to_code: &str) -> Result<f64> {
        let from_rate = self.table.rate_of(from_code)?;
        let to_rate = self.table.rate_of(to_code)?;
        let rate = to_rate / from_rate;
        if !rate.is_finite() {
            return Err(ExchangeError::InvalidRate {
                currency: to_code.to_uppercase(),
                rate,
            });
        }
        Ok(rate)
    }

    /// Convert an amount between two currencies
    ///
    /// Zero converts to zero; negative or non-finite amounts are rejected.
    pub fn convert(&self, amount: f64, from_code: &str, to_code: &str) -> Result<f64> {
        validate_amount(amount)?;
        let from = self.table.lookup(from_code)?;
        let to = self.table.lookup(to_code)?;

        if from.code == to.code {
            return Ok(amount);
        }

        let converted = amount * to.rate / from.rate;
        if !converted.is_finite() {
            // Overflows f64 under the current rates
            return Err(ExchangeError::InvalidAmount(amount));
        }
        log::debug!("{} {} -> {} {}", amount, from.code, converted, to.code);
        Ok(converted)
    }

    /// Convert one amount into several currencies, in the requested order
    ///
    /// Fails as a whole if any target is unsupported. Repeated targets keep
    /// their first position.
    pub fn convert_multiple<S: AsRef<str>>(
        &self,
        amount: f64,
        from_code: &str,
        to_codes: &[S],
    ) -> Result<Vec<(Currency, f64)>> {
        validate_amount(amount)?;
        let targets = self.resolve_targets(to_codes)?;

        targets
            .into_iter()
            .map(|to| {
                self.convert(amount, from_code, to.code())
                    .map(|converted| (to, converted))
            })
            .collect()
    }

    /// Compare what an amount is worth in each of `codes`
    pub fn compare_currencies<S: AsRef<str>>(
        &self,
        amount: f64,
        base_code: &str,
        codes: &[S],
    ) -> Result<Vec<CurrencyComparison>> {
        let conversions = self.convert_multiple(amount, base_code, codes)?;

        conversions
            .into_iter()
            .map(|(currency, converted_amount)| -> Result<CurrencyComparison> {
                let record = self.table.lookup(currency.code())?;
                Ok(CurrencyComparison {
                    currency,
                    converted_amount,
                    rate: self.get_exchange_rate(base_code, currency.code())?,
                    formatted: format_amount(converted_amount, record, &FormatOptions::default()),
                })
            })
            .collect()
    }

    /// Pick the target yielding the largest converted amount
    ///
    /// Ties go to the earliest candidate.
    pub fn find_best_exchange<S: AsRef<str>>(
        &self,
        amount: f64,
        from_code: &str,
        to_codes: &[S],
    ) -> Result<BestExchange> {
        if to_codes.is_empty() {
            return Err(ExchangeError::EmptyCandidateList);
        }

        let mut best: Option<(Currency, f64, f64)> = None;
        for (currency, converted) in self.convert_multiple(amount, from_code, to_codes)? {
            let rate = self.get_exchange_rate(from_code, currency.code())?;
            // Rank by rate: amount is a common factor and may be zero
            match best {
                Some((_, _, best_rate)) if rate <= best_rate => {}
                _ => best = Some((currency, converted, rate)),
            }
        }

        let (currency, amount, rate) = best.ok_or(ExchangeError::EmptyCandidateList)?;
        let record = self.table.lookup(currency.code())?;
        Ok(BestExchange {
            currency,
            amount,
            rate,
            formatted: format_amount(amount, record, &FormatOptions::default()),
        })
    }

    /// Format an amount as e.g. `€1,234.56`
    pub fn format_currency(&self, amount: f64, code: &str) -> Result<String> {
        self.format_currency_with(amount, code, &FormatOptions::default())
    }

    /// Format with explicit options
    pub fn format_currency_with(
        &self,
        amount: f64,
        code: &str,
        options: &FormatOptions,
    ) -> Result<String> {
        let record = self.table.lookup(code)?;
        if !amount.is_finite() {
            return Err(ExchangeError::InvalidAmount(amount));
        }
        Ok(format_amount(amount, record, options))
    }

    pub fn lookup(&self, code: &str) -> Result<&CurrencyRecord> {
        self.table.lookup(code)
    }

    /// Set the rate of one currency against the base
    pub fn update_exchange_rate(&mut self, code: &str, rate: f64) -> Result<()> {
        self.table.update_rate(code, rate).map_err(|e| {
            log::warn!("Rejected rate update {} = {}: {}", code, rate, e);
            e
        })?;
        self.last_updated = Utc::now();
        Ok(())
    }

    /// Set several rates; none are applied if any is rejected
    pub fn update_multiple_rates(&mut self, rates: &BTreeMap<String, f64>) -> Result<()> {
        let applied = self
            .table
            .update_rates(rates.iter().map(|(code, rate)| (code.as_str(), *rate)))
            .map_err(|e| {
                log::warn!("Rejected batch rate update: {}", e);
                e
            })?;
        log::info!("Updated {} rates", applied);
        self.last_updated = Utc::now();
        Ok(())
    }

    /// Every current rate against the base currency
    pub fn get_all_rates(&self) -> BTreeMap<Currency, f64> {
        self.table.rates()
    }

    /// Write the current rates to a JSON snapshot file
    pub fn export_rates(&self, destination: impl AsRef<Path>) -> Result<()> {
        let snapshot = RateSnapshot {
            date: Some(Utc::now()),
            base_currency: self.base_currency.to_string(),
            rates: self
                .table
                .snapshot()
                .into_iter()
                .map(|(code, entry)| (code, entry.rate))
                .collect(),
        };
        snapshot.write_to(destination.as_ref())
    }

    /// Replace all rates from a JSON snapshot file
    ///
    /// The table is untouched if the file cannot be read, parsed or validated.
    pub fn import_rates(&mut self, source: impl AsRef<Path>) -> Result<()> {
        let source = source.as_ref();
        let snapshot = RateSnapshot::read_from(source)?;

        self.table
            .load_snapshot(&snapshot.rates, &snapshot.base_currency)
            .map_err(|e| {
                log::warn!("Rejected snapshot {}: {}", source.display(), e);
                e
            })?;

        self.base_currency = self.table.base_currency();
        self.last_updated = snapshot.date.unwrap_or_else(Utc::now);
        log::info!(
            "Imported {} rates (base {}) from {}",
            self.table.len(),
            self.base_currency,
            source.display()
        );
        Ok(())
    }

    /// Resolve target codes, dropping repeats, before any conversion runs
    fn resolve_targets<S: AsRef<str>>(&self, codes: &[S]) -> Result<Vec<Currency>> {
        let mut seen = HashSet::new();
        let mut targets = Vec::with_capacity(codes.len());
        for code in codes {
            let currency = self.table.resolve(code.as_ref())?;
            if seen.insert(currency) {
                targets.push(currency);
            }
        }
        Ok(targets)
    }
}

impl Default for ExchangeEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convert() {
        let engine = ExchangeEngine::new();
        assert_relative_eq!(engine.convert(100.0, "USD", "EUR").unwrap(), 85.0);
        assert_relative_eq!(engine.convert(85.0, "EUR", "USD").unwrap(), 100.0);
        // Pivot through USD: 100 EUR -> GBP = 100 * 0.73 / 0.85
        assert_relative_eq!(
            engine.convert(100.0, "EUR", "GBP").unwrap(),
            100.0 * 0.73 / 0.85
        );
    }

    #[test]
    fn test_convert_identity_and_zero() {
        let engine = ExchangeEngine::new();
        assert_eq!(engine.convert(123.45, "JPY", "jpy").unwrap(), 123.45);
        assert_eq!(engine.convert(0.0, "USD", "KRW").unwrap(), 0.0);
    }

    #[test]
    fn test_convert_invalid_amount() {
        let engine = ExchangeEngine::new();
        for amount in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                engine.convert(amount, "USD", "EUR"),
                Err(ExchangeError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn test_convert_overflow_is_an_error() {
        let mut engine = ExchangeEngine::new();
        engine.update_exchange_rate("EUR", 1e-320).unwrap();

        assert!(matches!(
            engine.convert(1e10, "EUR", "JPY"),
            Err(ExchangeError::InvalidAmount(_))
        ));
        assert!(matches!(
            engine.get_exchange_rate("EUR", "JPY"),
            Err(ExchangeError::InvalidRate { .. })
        ));
        assert!(engine.find_best_exchange(1.0, "EUR", &["JPY"]).is_err());
        assert!(engine.convert(1.0, "JPY", "EUR").unwrap().is_finite());
    }

    #[test]
    fn test_convert_unsupported() {
        let engine = ExchangeEngine::new();
        assert!(matches!(
            engine.convert(1.0, "USD", "XXX"),
            Err(ExchangeError::UnsupportedCurrency(code)) if code == "XXX"
        ));
        assert!(matches!(
            engine.convert(1.0, "XXX", "USD"),
            Err(ExchangeError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_convert_multiple_preserves_order() {
        let engine = ExchangeEngine::new();
        let result = engine
            .convert_multiple(100.0, "USD", &["JPY", "EUR", "GBP", "EUR"])
            .unwrap();

        let codes: Vec<Currency> = result.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes, vec![Currency::JPY, Currency::EUR, Currency::GBP]);
        assert_relative_eq!(result[0].1, 11_000.0);
    }

    #[test]
    fn test_convert_multiple_all_or_nothing() {
        let engine = ExchangeEngine::new();
        let result = engine.convert_multiple(100.0, "USD", &["EUR", "GBP", "XXX"]);
        assert!(matches!(result, Err(ExchangeError::UnsupportedCurrency(_))));
    }

    #[test]
    fn test_get_exchange_rate() {
        let engine = ExchangeEngine::new();
        assert_relative_eq!(engine.get_exchange_rate("USD", "JPY").unwrap(), 110.0);
        assert_relative_eq!(
            engine.get_exchange_rate("GBP", "EUR").unwrap(),
            0.85 / 0.73
        );
        assert_eq!(engine.get_exchange_rate("CHF", "CHF").unwrap(), 1.0);
    }

    #[test]
    fn test_compare_currencies() {
        let engine = ExchangeEngine::new();
        let comparison = engine
            .compare_currencies(1000.0, "USD", &["EUR", "GBP", "SEK"])
            .unwrap();

        assert_eq!(comparison.len(), 3);
        assert_eq!(comparison[0].currency, Currency::EUR);
        assert_relative_eq!(comparison[0].converted_amount, 850.0);
        assert_relative_eq!(comparison[0].rate, 0.85);
        assert_eq!(comparison[0].formatted, "€850.00");
        assert_eq!(comparison[2].formatted, "8,900.00 kr");
    }

    #[test]
    fn test_find_best_exchange() {
        let engine = ExchangeEngine::new();
        let best = engine
            .find_best_exchange(100.0, "USD", &["EUR", "GBP", "JPY"])
            .unwrap();

        assert_eq!(best.currency, Currency::JPY);
        assert_relative_eq!(best.amount, 11_000.0);
        assert_relative_eq!(best.rate, 110.0);
        assert_eq!(best.formatted, "¥11,000.00");
    }

    #[test]
    fn test_find_best_exchange_tie_goes_first() {
        let engine = ExchangeEngine::new();
        // AUD and SGD share the 1.35 sample rate
        let best = engine
            .find_best_exchange(10.0, "USD", &["SGD", "AUD", "EUR"])
            .unwrap();
        assert_eq!(best.currency, Currency::SGD);

        // Zero amount still ranks by rate
        let best = engine
            .find_best_exchange(0.0, "USD", &["EUR", "HUF"])
            .unwrap();
        assert_eq!(best.currency, Currency::HUF);
    }

    #[test]
    fn test_find_best_exchange_empty() {
        let engine = ExchangeEngine::new();
        let empty: [&str; 0] = [];
        assert!(matches!(
            engine.find_best_exchange(100.0, "USD", &empty),
            Err(ExchangeError::EmptyCandidateList)
        ));
    }

    #[test]
    fn test_format_currency() {
        let engine = ExchangeEngine::new();
        assert_eq!(engine.format_currency(1234.56, "EUR").unwrap(), "€1,234.56");
        assert_eq!(engine.format_currency(-1234.56, "USD").unwrap(), "-$1,234.56");
        assert_eq!(engine.format_currency(99.5, "HUF").unwrap(), "99.50 Ft");
        assert!(matches!(
            engine.format_currency(1.0, "XYZ"),
            Err(ExchangeError::UnsupportedCurrency(_))
        ));
        assert!(matches!(
            engine.format_currency(f64::NAN, "USD"),
            Err(ExchangeError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_update_exchange_rate() {
        let mut engine = ExchangeEngine::new();
        let before = engine.last_updated();

        engine.update_exchange_rate("EUR", 0.9).unwrap();
        assert_relative_eq!(engine.convert(100.0, "USD", "EUR").unwrap(), 90.0);
        assert!(engine.last_updated() >= before);

        assert!(matches!(
            engine.update_exchange_rate("EUR", -1.0),
            Err(ExchangeError::InvalidRate { .. })
        ));
        assert_eq!(engine.get_all_rates()[&Currency::EUR], 0.9);
    }

    #[test]
    fn test_update_multiple_rates() {
        let mut engine = ExchangeEngine::new();
        let mut rates = BTreeMap::new();
        rates.insert("EUR".to_string(), 0.9);
        rates.insert("XXX".to_string(), 1.5);

        assert!(engine.update_multiple_rates(&rates).is_err());
        assert_eq!(engine.get_all_rates()[&Currency::EUR], 0.85);

        rates.remove("XXX");
        rates.insert("gbp".to_string(), 0.8);
        engine.update_multiple_rates(&rates).unwrap();
        assert_eq!(engine.get_all_rates()[&Currency::GBP], 0.8);
    }

    #[test]
    fn test_metadata_lookups() {
        let engine = ExchangeEngine::new();
        assert_eq!(engine.supported_currencies().len(), 20);
        assert!(engine.is_valid_currency("usd"));
        assert!(!engine.is_valid_currency("XXX"));
        assert_eq!(engine.currency_name("INR").unwrap(), "Indian Rupee");
        assert_eq!(engine.currency_symbol("KRW").unwrap(), "₩");
        assert_eq!(engine.lookup("CZK").unwrap().symbol, "Kč");
    }
}
