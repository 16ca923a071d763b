#![allow(dead_code)]

use quantedge_core::{Context, Ohlcv, Price, Series, Value};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, de::DeserializeOwned};

/// OHLCV bar parsed from the seeded random-walk CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub index: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub close: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
}

impl Ohlcv for RefBar {
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

/// Reference value by bar index.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub index: usize,
    pub expected: f64,
}

/// Reference value with the expected signal name.
#[derive(Debug, Deserialize)]
pub struct RefSignalValue {
    pub index: usize,
    pub expected: f64,
    pub signal: String,
}

/// Reference stochastic lines.
#[derive(Debug, Deserialize)]
pub struct RefStochastic {
    pub index: usize,
    pub fast_k: f64,
    pub fast_d: f64,
    pub slow_d: f64,
}

const OHLCV_PATH: &str = "tests/fixtures/data/ohlcv.csv";

/// Load the reference OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Context over the reference bars.
pub fn reference_context() -> Context {
    Context::from_bars(&load_reference_ohlcvs())
}

/// Load single-value reference data.
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load reference data carrying a signal column.
pub fn load_ref_signals(path: &str) -> Vec<RefSignalValue> {
    load_records(path, "invalid signal reference record")
}

/// Load stochastic reference data (fast K, fast D, slow D).
pub fn load_stochastic_ref(path: &str) -> Vec<RefStochastic> {
    load_records(path, "invalid stochastic reference record")
}

/// Assert a decimal value is within tolerance of a float reference.
pub fn assert_near(actual: Decimal, expected: f64, tolerance: f64, context: &str) {
    let actual = actual
        .to_f64()
        .unwrap_or_else(|| panic!("{context}: {actual} does not fit in f64"));
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert a whole series against reference values, bar by bar.
pub fn assert_series_matches(actual: &Series, reference: &[RefValue], tolerance: f64, name: &str) {
    assert_eq!(
        actual.len(),
        reference.len(),
        "{name}: length mismatch: {} vs {}",
        actual.len(),
        reference.len()
    );

    for r in reference {
        assert_near(
            actual.get(r.index),
            r.expected,
            tolerance,
            &format!("{name} at bar {}", r.index),
        );
    }
}

/// Generate a reference test for one moving average variant.
///
/// Usage: `ma_reference_test!(sma_20, MovingAverage::Simple, 20, "tests/fixtures/data/sma-20-close.csv", 1e-9);`
#[allow(unused_macros)]
macro_rules! ma_reference_test {
    ($name:ident, $kind:expr, $length:expr, $ref_path:expr, $tolerance:expr) => {
        #[test]
        fn $name() {
            let ctx = fixtures::reference_context();
            let reference = fixtures::load_ref_values($ref_path);
            let length = std::num::NonZero::new($length).unwrap();

            let actual = quantedge_core::moving_average(
                $kind,
                length,
                ctx.series(quantedge_core::PriceSource::Close),
            );

            fixtures::assert_series_matches(&actual, &reference, $tolerance, stringify!($name));
        }
    };
}

#[allow(unused_imports)]
pub(crate) use ma_reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
