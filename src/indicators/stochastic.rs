use std::{fmt::Display, num::NonZero};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::length;
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, MovingAverage,
    PriceSource, Series, Thresholds, moving_average, rolling_high_low, rsi_signal,
};

/// Configuration for the [`StochasticOscillator`].
///
/// Defaults: length 14, signal length 3, simple average, closing price,
/// thresholds 80 / 20.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct StochasticConfig {
    length: NonZero<usize>,
    signal_length: NonZero<usize>,
    moving_average: MovingAverage,
    source: PriceSource,
    thresholds: Thresholds,
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self {
            length: length(14),
            signal_length: length(3),
            moving_average: MovingAverage::Simple,
            source: PriceSource::Close,
            thresholds: Thresholds::preset(dec!(80), dec!(20)),
        }
    }
}

impl IndicatorConfig for StochasticConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl StochasticConfig {
    #[inline]
    #[must_use]
    pub fn length(&self) -> NonZero<usize> {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn signal_length(&self) -> NonZero<usize> {
        self.signal_length
    }

    #[must_use]
    pub fn with_length(mut self, length: NonZero<usize>) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn with_signal_length(mut self, signal_length: NonZero<usize>) -> Self {
        self.signal_length = signal_length;
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
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

impl Display for StochasticConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StochasticConfig({}, {}, {}, {})",
            self.length, self.signal_length, self.moving_average, self.source
        )
    }
}

/// Stochastic Oscillator.
///
/// `FastK` is the position of price in the rolling high/low range,
/// clamped to 0..100 and zero on a flat range. `FastD` smooths it and
/// `SlowD` smooths `FastD`. Signals read `FastD` against 80 / 20, falling
/// back to `FastD` crossing `SlowD`.
///
/// The primary series is `FastK`.
#[derive(Clone, Debug, Default)]
pub struct StochasticOscillator {
    config: StochasticConfig,
}

impl Indicator for StochasticOscillator {
    type Config = StochasticConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let StochasticConfig {
            length,
            signal_length,
            moving_average: kind,
            source,
            thresholds,
        } = self.config;

        let input = ctx.series(source);
        let (highest, lowest) = rolling_high_low(
            ctx.series(PriceSource::High),
            ctx.series(PriceSource::Low),
            length,
        );

        let fast_k: Series = (0..ctx.len())
            .map(|i| {
                let range = highest.get(i) - lowest.get(i);
                if range.is_zero() {
                    Decimal::ZERO
                } else {
                    ((input.get(i) - lowest.get(i)) / range * Decimal::ONE_HUNDRED)
                        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
                }
            })
            .collect();
        let fast_d = moving_average(kind, signal_length, &fast_k);
        let slow_d = moving_average(kind, signal_length, &fast_d);

        let signals = (0..ctx.len())
            .map(|i| {
                rsi_signal(
                    fast_d.get(i) - slow_d.get(i),
                    fast_d.lookback(i, 1) - slow_d.lookback(i, 1),
                    fast_d.get(i),
                    fast_d.lookback(i, 1),
                    thresholds,
                )
            })
            .collect();

        IndicatorOutput::new(IndicatorName::StochasticOscillator, signals)
            .with_primary("FastK", fast_k)
            .with_output("FastD", fast_d)
            .with_output("SlowD", slow_d)
    }
}

impl Display for StochasticOscillator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "STOCH({}, {}, {})",
            self.config.length, self.config.signal_length, self.config.moving_average
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Signal,
        test_util::{hlc_bars, nz},
    };

    fn stochastic(bars: &[(i64, i64, i64)], length: usize, signal: usize) -> IndicatorOutput {
        let ctx = Context::from_bars(&hlc_bars(bars));
        let config = StochasticConfig::default()
            .with_length(nz(length))
            .with_signal_length(nz(signal));
        StochasticOscillator::new(config).calculate(&ctx)
    }

    #[test]
    fn fast_k_position_in_range() {
        let out = stochastic(&[(10, 0, 2), (10, 0, 10), (10, 0, 0)], 3, 1);
        assert_eq!(out.primary.as_slice(), &[dec!(20), dec!(100), dec!(0)]);
        assert_eq!(out.output("FastK"), Some(&out.primary));
    }

    #[test]
    fn flat_range_is_zero() {
        let out = stochastic(&[(5, 5, 5), (5, 5, 5)], 2, 1);
        assert_eq!(out.primary, Series::filled(Decimal::ZERO, 2));
    }

    #[test]
    fn smoothing_chain() {
        let out = stochastic(&[(10, 0, 0), (10, 0, 10), (10, 0, 5)], 3, 2);
        // FastK [0, 100, 50], FastD = SMA(2) [0, 50, 75], SlowD [0, 25, 62.5]
        assert_eq!(
            out.output("FastD").map(Series::as_slice),
            Some(&[dec!(0), dec!(50), dec!(75)][..])
        );
        assert_eq!(
            out.output("SlowD").map(Series::as_slice),
            Some(&[dec!(0), dec!(25), dec!(62.5)][..])
        );
    }

    #[test]
    fn fast_d_crossing_eighty_is_overbought() {
        let out = stochastic(&[(10, 0, 5), (10, 0, 10)], 2, 1);
        // FastD = FastK with signal length 1: [50, 100]
        assert_eq!(out.signals[1], Signal::Overbought);
    }
}
