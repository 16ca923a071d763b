use std::{fmt::Display, num::NonZero};

use rust_decimal::{Decimal, MathematicalOps};

use super::length;
use crate::{
    Context, FIBONACCI_VOLATILITY_LEVEL, Indicator, IndicatorConfig, IndicatorName,
    IndicatorOutput, MovingAverage, PriceSource, Series, Value, moving_average,
    rolling_high_low, rolling_sum, true_range, volatility_signal,
};

/// Configuration for the [`ChoppinessIndex`].
///
/// Defaults: length 14, exponential trend filter, closing price.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct ChoppinessConfig {
    length: NonZero<usize>,
    moving_average: MovingAverage,
    source: PriceSource,
}

impl Default for ChoppinessConfig {
    fn default() -> Self {
        Self {
            length: length(14),
            moving_average: MovingAverage::Exponential,
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfig for ChoppinessConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl ChoppinessConfig {
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
}

impl Display for ChoppinessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ChoppinessConfig({}, {}, {})",
            self.length, self.moving_average, self.source
        )
    }
}

/// Choppiness Index (CI).
///
/// ```text
/// CI = 100 × log10(Σ TR / (highest high − lowest low)) / log10(length)
/// ```
///
/// High values mean a sideways market, low values a trend. Zero when the
/// range is not positive or the length is one. Direction comes from price
/// crossing its moving average; a cross while CI is above 38.2 reports
/// [`VolatilityExpansion`](crate::Signal::VolatilityExpansion).
#[derive(Clone, Debug, Default)]
pub struct ChoppinessIndex {
    config: ChoppinessConfig,
}

fn log10(value: Value) -> Option<Value> {
    if value > Decimal::ZERO {
        value.checked_log10()
    } else {
        None
    }
}

impl Indicator for ChoppinessIndex {
    type Config = ChoppinessConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let ChoppinessConfig {
            length,
            moving_average: kind,
            source,
        } = self.config;

        let input = ctx.series(source);
        let high = ctx.series(PriceSource::High);
        let low = ctx.series(PriceSource::Low);

        let (highest, lowest) = rolling_high_low(high, low, length);
        let trend = moving_average(kind, length, input);
        let tr: Series = (0..ctx.len())
            .map(|i| true_range(high.get(i), low.get(i), input.lookback(i, 1)))
            .collect();
        let tr_sum = rolling_sum(&tr, length);
        let log_length = log10(Decimal::from(length.get())).filter(|l| !l.is_zero());

        let ci: Series = (0..ctx.len())
            .map(|i| {
                let range = highest.get(i) - lowest.get(i);
                if range <= Decimal::ZERO {
                    return Decimal::ZERO;
                }
                match (tr_sum.get(i).checked_div(range).and_then(log10), log_length) {
                    (Some(ratio), Some(log_length)) => {
                        Decimal::ONE_HUNDRED * ratio / log_length
                    }
                    _ => Decimal::ZERO,
                }
            })
            .collect();

        let signals = (0..ctx.len())
            .map(|i| {
                volatility_signal(
                    input.get(i) - trend.get(i),
                    input.lookback(i, 1) - trend.lookback(i, 1),
                    ci.get(i),
                    FIBONACCI_VOLATILITY_LEVEL,
                )
            })
            .collect();

        IndicatorOutput::new(IndicatorName::ChoppinessIndex, signals).with_primary("Ci", ci)
    }
}

impl Display for ChoppinessIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CI({}, {})", self.config.length, self.config.moving_average)
    }
}
