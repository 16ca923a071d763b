use rust_decimal::Decimal;

/// A single computed or observed value.
///
/// Fixed-precision decimal. Every series in the crate is built from these.
pub type Value = Decimal;

/// A price value.
///
/// Semantic alias for [`Value`]. Documents intent in function signatures
/// where the number is a quote rather than an indicator reading.
pub type Price = Value;

/// OHLCV bar data used as input to a [`Context`](crate::Context).
///
/// Implement this on your own kline/candle type to avoid per-bar
/// conversion. Bars are consumed in slice order; the engine is purely
/// index-based and does not look at timestamps or gaps.
///
/// # Example
///
/// ```
/// use quantedge_core::{Ohlcv, Price};
/// use rust_decimal::Decimal;
///
/// struct MyKline {
///     o: Decimal, h: Decimal, l: Decimal, c: Decimal,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Trade volume during the bar. Defaults to zero.
    ///
    /// Override this for volume-dependent indicators.
    fn volume(&self) -> Value {
        Decimal::ZERO
    }
}
