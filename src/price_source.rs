use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;

use crate::{Error, Ohlcv, Price, Value};

/// Input series an indicator reads from a [`Context`](crate::Context).
///
/// Raw components are stored as bars arrive; derived prices are computed
/// once when the context is built. [`Custom`](PriceSource::Custom) is the
/// primary output of the last indicator applied to the context, which lets
/// one indicator run on another's result.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    #[default]
    Close,
    /// Traded volume.
    Volume,
    /// Typical price: `(high + low + close) / 3`.
    Typical,
    /// Median price: `(high + low) / 2`.
    Median,
    /// Weighted close: `(high + low + close + close) / 4`.
    WeightedClose,
    /// Full typical price: `(open + high + low + close) / 4`.
    FullTypical,
    /// Primary output of the last indicator applied to the context.
    Custom,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for PriceSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "close" => Ok(Self::Close),
            "volume" => Ok(Self::Volume),
            "typical" | "hlc3" => Ok(Self::Typical),
            "median" | "hl2" => Ok(Self::Median),
            "weightedclose" | "hlcc4" => Ok(Self::WeightedClose),
            "fulltypical" | "ohlc4" => Ok(Self::FullTypical),
            "custom" => Ok(Self::Custom),
            _ => Err(Error::invalid_parameter(
                "source",
                format!("unknown price source {s:?}"),
            )),
        }
    }
}

impl PriceSource {
    /// Derived price of a single bar.
    ///
    /// Returns zero for [`Custom`](PriceSource::Custom), which has no
    /// per-bar definition.
    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Low => ohlcv.low(),
            Self::Close => ohlcv.close(),
            Self::Volume => ohlcv.volume(),
            Self::Typical => (ohlcv.high() + ohlcv.low() + ohlcv.close()) / Decimal::from(3),
            Self::Median => (ohlcv.high() + ohlcv.low()) / Decimal::TWO,
            Self::WeightedClose => {
                (ohlcv.high() + ohlcv.low() + ohlcv.close() + ohlcv.close()) / Decimal::from(4)
            }
            Self::FullTypical => {
                (ohlcv.open() + ohlcv.high() + ohlcv.low() + ohlcv.close()) / Decimal::from(4)
            }
            Self::Custom => Decimal::ZERO,
        }
    }
}

/// True range: `max(high - low, |high - prev_close|, |low - prev_close|)`.
///
/// Callers read `prev_close` through the zero-default lookback, so on the
/// first bar the previous close is zero.
#[inline]
#[must_use]
pub fn true_range(high: Price, low: Price, prev_close: Price) -> Value {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}
