//! Technical analysis core for Rust: rolling windows, a moving average
//! dispatcher, signal classification and a pipeline context.
//!
//! Bars implementing [`Ohlcv`] are loaded into a [`Context`], which
//! materializes the price series every indicator reads. Indicators are
//! batch computations over the whole history: each returns named output
//! series and one [`Signal`] per bar, index-aligned with the input. The
//! primary output of one indicator feeds the next through
//! [`PriceSource::Custom`].
//!
//! All arithmetic is [`Decimal`](rust_decimal::Decimal). Division by zero
//! never escapes; degenerate windows produce the documented neutral value.
//!
//! Each indicator type ([`CommodityChannelIndex`], [`Trix`], ...) exposes
//! [`new`](Trix::new) and [`calculate`](Trix::calculate) as inherent
//! methods, no trait import needed. Import [`Indicator`] only for generic
//! code.
//!
//! # Example
//!
//! ```
//! use quantedge_core::{MovingAverage, Series, moving_average};
//! use rust_decimal_macros::dec;
//! use std::num::NonZero;
//!
//! let closes = Series::from(vec![dec!(10), dec!(11), dec!(12), dec!(11)]);
//! let kind: MovingAverage = "sma".parse().unwrap();
//! let sma = moving_average(kind, NonZero::new(3).unwrap(), &closes);
//!
//! assert_eq!(sma.as_slice(), &[dec!(10), dec!(10.5), dec!(11), dec!(34) / dec!(3)]);
//! ```

mod context;
mod error;
mod indicator;
mod indicators;
mod moving_average;
mod ohlcv;
mod price_source;
mod ring_buffer;
mod series;
mod signal;
mod window;

pub use crate::context::Context;
pub use crate::error::{Error, Result, checked_length};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorName, IndicatorOutput};
pub use crate::moving_average::{MovingAverage, moving_average};
pub use crate::ohlcv::{Ohlcv, Price, Value};
pub use crate::price_source::{PriceSource, true_range};
pub use crate::series::Series;
pub use crate::signal::{
    CompareMode, FIBONACCI_VOLATILITY_LEVEL, Signal, Thresholds, band_deltas,
    bullish_bearish_signal, compare_signal, rsi_signal, strict_compare_signal, volatility_signal,
};
pub use crate::window::{
    rolling_average, rolling_extremum_positions, rolling_high_low, rolling_max_min, rolling_sum,
};

pub use crate::indicators::{
    AcConfig, AcceleratorOscillator, AlligatorConfig, AlligatorIndex, AoConfig, AroonConfig,
    AroonOscillator, AwesomeOscillator, CciConfig, ChoppinessConfig, ChoppinessIndex,
    CommodityChannelIndex, IchimokuCloud, IchimokuConfig, JmaRsxClone, RsxConfig,
    StochasticConfig, StochasticOscillator, Trix, TrixConfig, UlcerConfig, UlcerIndex, WilliamsR,
    WilliamsRConfig,
};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::calculate`].
            #[must_use]
            pub fn calculate(&self, ctx: &Context) -> IndicatorOutput {
                <Self as Indicator>::calculate(self, ctx)
            }
        }
    };
}

impl_indicator_methods!(AcceleratorOscillator, AcConfig);
impl_indicator_methods!(AlligatorIndex, AlligatorConfig);
impl_indicator_methods!(AroonOscillator, AroonConfig);
impl_indicator_methods!(AwesomeOscillator, AoConfig);
impl_indicator_methods!(ChoppinessIndex, ChoppinessConfig);
impl_indicator_methods!(CommodityChannelIndex, CciConfig);
impl_indicator_methods!(IchimokuCloud, IchimokuConfig);
impl_indicator_methods!(JmaRsxClone, RsxConfig);
impl_indicator_methods!(StochasticOscillator, StochasticConfig);
impl_indicator_methods!(Trix, TrixConfig);
impl_indicator_methods!(UlcerIndex, UlcerConfig);
impl_indicator_methods!(WilliamsR, WilliamsRConfig);

#[cfg(test)]
mod test_util;
