//! Currency amount formatting
//!
//! Fixed convention: `,` groups thousands, `.` is the decimal point. Symbol
//! placement comes from the currency record, so nothing here branches on a
//! particular currency.

use crate::currency::SymbolPlacement;
use crate::rate_table::CurrencyRecord;

const THOUSANDS_SEPARATOR: char = ',';
const DECIMAL_POINT: char = '.';

/// Options for rendering an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Render the symbol; when false the ISO code is appended instead
    pub include_symbol: bool,
    pub decimal_places: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            include_symbol: true,
            decimal_places: 2,
        }
    }
}

/// Group the integer digits of a non-negative decimal string
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

/// Render a finite amount as `1,234.56` with the given precision
pub fn format_number(amount: f64, decimal_places: usize) -> String {
    let fixed = format!("{:.*}", decimal_places, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut rendered = group_thousands(int_part);
    if let Some(frac) = frac_part {
        rendered.push(DECIMAL_POINT);
        rendered.push_str(frac);
    }

    // -0.001 rounds to zero and must not keep its sign
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if amount.is_sign_negative() && !is_zero {
        rendered.insert(0, '-');
    }
    rendered
}

/// Render an amount for a currency record
pub fn format_amount(amount: f64, record: &CurrencyRecord, options: &FormatOptions) -> String {
    let number = format_number(amount, options.decimal_places);
    if !options.include_symbol {
        return format!("{} {}", number, record.code);
    }

    let (sign, magnitude) = match number.strip_prefix('-') {
        Some(magnitude) => ("-", magnitude),
        None => ("", number.as_str()),
    };

    match record.placement {
        SymbolPlacement::Prefix => format!("{}{}{}", sign, record.symbol, magnitude),
        SymbolPlacement::Suffix => format!("{}{} {}", sign, magnitude, record.symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;

    fn record(code: Currency) -> CurrencyRecord {
        CurrencyRecord::new(code, code.default_rate()).unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.56, 2), "1,234.56");
        assert_eq!(format_number(0.0, 2), "0.00");
        assert_eq!(format_number(1_000_000.0, 0), "1,000,000");
        assert_eq!(format_number(-9876.5, 2), "-9,876.50");
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_prefix_symbol() {
        let options = FormatOptions::default();
        assert_eq!(format_amount(1234.56, &record(Currency::EUR), &options), "€1,234.56");
        assert_eq!(format_amount(-50.0, &record(Currency::USD), &options), "-$50.00");
    }

    #[test]
    fn test_suffix_symbol() {
        let options = FormatOptions::default();
        assert_eq!(format_amount(1234.5, &record(Currency::SEK), &options), "1,234.50 kr");
        assert_eq!(format_amount(-10.0, &record(Currency::PLN), &options), "-10.00 zł");
    }

    #[test]
    fn test_without_symbol() {
        let options = FormatOptions {
            include_symbol: false,
            decimal_places: 3,
        };
        assert_eq!(
            format_amount(1234.5678, &record(Currency::GBP), &options),
            "1,234.568 GBP"
        );
    }
}
