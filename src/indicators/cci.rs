use std::{fmt::Display, num::NonZero};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{length, slopes};
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, MovingAverage,
    PriceSource, Series, Thresholds, Value, moving_average, rsi_signal,
};

/// Configuration for the [`CommodityChannelIndex`].
///
/// Defaults: length 20, simple average, typical price, constant 0.015,
/// thresholds ±100.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct CciConfig {
    length: NonZero<usize>,
    moving_average: MovingAverage,
    source: PriceSource,
    constant: Value,
    thresholds: Thresholds,
}

impl Default for CciConfig {
    fn default() -> Self {
        Self {
            length: length(20),
            moving_average: MovingAverage::Simple,
            source: PriceSource::Typical,
            constant: dec!(0.015),
            thresholds: Thresholds::preset(dec!(100), dec!(-100)),
        }
    }
}

impl IndicatorConfig for CciConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl CciConfig {
    #[inline]
    #[must_use]
    pub fn length(&self) -> NonZero<usize> {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn moving_average(&self) -> MovingAverage {
        self.moving_average
    }

    /// Scaling constant applied to the mean deviation.
    #[inline]
    #[must_use]
    pub fn constant(&self) -> Value {
        self.constant
    }

    #[must_use]
    pub fn with_length(mut self, length: NonZero<usize>) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn with_moving_average(mut self, moving_average: MovingAverage) -> Self {
        self.moving_average = moving_average;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_constant(mut self, constant: Value) -> Self {
        self.constant = constant;
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

impl Display for CciConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CciConfig({}, {}, {}, {})",
            self.length, self.moving_average, self.source, self.constant
        )
    }
}

/// Commodity Channel Index (CCI).
///
/// Distance of price from its average, in units of mean absolute
/// deviation:
///
/// ```text
/// CCI = (price − MA(price)) / (constant × MA(|price − MA(price)|))
/// ```
///
/// Zero when the mean deviation is zero. Signals cross ±100 or fall back to
/// the slope of the CCI line.
#[derive(Clone, Debug, Default)]
pub struct CommodityChannelIndex {
    config: CciConfig,
}

impl Indicator for CommodityChannelIndex {
    type Config = CciConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let CciConfig {
            length,
            moving_average: kind,
            source,
            constant,
            thresholds,
        } = self.config;

        let input = ctx.series(source);
        let average = moving_average(kind, length, input);
        let deviation = input.zip_with(&average, |x, avg| (x - avg).abs());
        let mean_deviation = moving_average(kind, length, &deviation);

        let cci: Series = (0..ctx.len())
            .map(|i| {
                (input.get(i) - average.get(i))
                    .checked_div(constant * mean_deviation.get(i))
                    .unwrap_or(Decimal::ZERO)
            })
            .collect();

        let signals = (0..ctx.len())
            .map(|i| {
                let (current, previous) = slopes(&cci, i);
                rsi_signal(current, previous, cci.get(i), cci.lookback(i, 1), thresholds)
            })
            .collect();

        IndicatorOutput::new(IndicatorName::CommodityChannelIndex, signals)
            .with_primary("Cci", cci)
    }
}

impl Display for CommodityChannelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CCI({}, {}, {})",
            self.config.length, self.config.moving_average, self.config.source
        )
    }
}
