//! Property tests for conversion invariants

use fx_exchange::{Currency, ExchangeEngine};
use proptest::prelude::*;

fn currency() -> impl Strategy<Value = Currency> {
    proptest::sample::select(Currency::all())
}

fn relative_diff(a: f64, b: f64) -> f64 {
    if a == b {
        0.0
    } else {
        (a - b).abs() / a.abs().max(b.abs())
    }
}

proptest! {
    #[test]
    fn prop_round_trip(amount in 0.01f64..1e9, a in currency(), b in currency()) {
        let engine = ExchangeEngine::new();
        let there = engine.convert(amount, a.code(), b.code()).unwrap();
        let back = engine.convert(there, b.code(), a.code()).unwrap();
        prop_assert!(relative_diff(back, amount) < 1e-9);
    }

    #[test]
    fn prop_identity(amount in 0.0f64..1e12, code in currency()) {
        let engine = ExchangeEngine::new();
        prop_assert_eq!(engine.convert(amount, code.code(), code.code()).unwrap(), amount);
    }

    #[test]
    fn prop_rate_inverse(a in currency(), b in currency()) {
        let engine = ExchangeEngine::new();
        let forward = engine.get_exchange_rate(a.code(), b.code()).unwrap();
        let backward = engine.get_exchange_rate(b.code(), a.code()).unwrap();
        prop_assert!((forward * backward - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_negative_amount_rejected(amount in -1e9f64..-1e-9, a in currency(), b in currency()) {
        let engine = ExchangeEngine::new();
        prop_assert!(engine.convert(amount, a.code(), b.code()).is_err());
    }
}
