// src/test_util.rs

use std::num::NonZero;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{Ohlcv, Price, Series, Value};

/// Asserts that two `Decimal` values agree to within `1e-12`, or to a
/// tolerance given as the third argument.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (rust_decimal::Decimal, rust_decimal::Decimal) = ($actual, $expected);
        let diff = (a - e).abs();
        assert!(
            diff <= rust_decimal_macros::dec!(0.000000000001),
            "assert_approx failed: actual={a}, expected={e}, diff={diff}",
        );
    }};
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (a, e): (rust_decimal::Decimal, rust_decimal::Decimal) = ($actual, $expected);
        let diff = (a - e).abs();
        assert!(
            diff <= $tolerance,
            "assert_approx failed: actual={a}, expected={e}, diff={diff}",
        );
    }};
}

pub(crate) use assert_approx;

pub fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap()
}

/// Series from integer literals.
pub fn series(values: &[i64]) -> Series {
    values.iter().map(|&v| Decimal::from(v)).collect()
}

#[derive(Clone, Debug)]
pub struct Bar {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Value,
}

impl Bar {
    pub fn new(open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume: dec!(0),
        }
    }
}

/// Convenience: bar with just a close price (OHLC all equal to close).
pub fn bar(close: i64) -> Bar {
    let c = Decimal::from(close);
    Bar::new(c, c, c, c)
}

/// Bars from close prices.
pub fn bars(closes: &[i64]) -> Vec<Bar> {
    closes.iter().map(|&c| bar(c)).collect()
}

/// Bars from `(high, low, close)` triples, open equal to close.
pub fn hlc_bars(values: &[(i64, i64, i64)]) -> Vec<Bar> {
    values
        .iter()
        .map(|&(h, l, c)| {
            let c = Decimal::from(c);
            Bar::new(c, Decimal::from(h), Decimal::from(l), c)
        })
        .collect()
}

impl Ohlcv for Bar {
    fn open(&self) -> Price {
        self.open
    }
    fn high(&self) -> Price {
        self.high
    }
    fn low(&self) -> Price {
        self.low
    }
    fn close(&self) -> Price {
        self.close
    }
    fn volume(&self) -> Value {
        self.volume
    }
}
