use std::{fmt::Display, num::NonZero};

use super::{length, percent_change};
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, MovingAverage,
    PriceSource, Series, compare_signal, moving_average,
};

/// Configuration for [`Trix`].
///
/// Defaults: length 15, signal length 9, exponential average, closing
/// price.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TrixConfig {
    length: NonZero<usize>,
    signal_length: NonZero<usize>,
    moving_average: MovingAverage,
    source: PriceSource,
}

impl Default for TrixConfig {
    fn default() -> Self {
        Self {
            length: length(15),
            signal_length: length(9),
            moving_average: MovingAverage::Exponential,
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfig for TrixConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl TrixConfig {
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
}

impl Display for TrixConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TrixConfig({}, {}, {}, {})",
            self.length, self.signal_length, self.moving_average, self.source
        )
    }
}

/// TRIX: percent change of a triple-smoothed average, with a signal line.
///
/// The first bar and any bar after a zero reading are zero. Signals on
/// TRIX crossing its signal line.
#[derive(Clone, Debug, Default)]
pub struct Trix {
    config: TrixConfig,
}

impl Indicator for Trix {
    type Config = TrixConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let TrixConfig {
            length,
            signal_length,
            moving_average: kind,
            source,
        } = self.config;

        let first = moving_average(kind, length, ctx.series(source));
        let second = moving_average(kind, length, &first);
        let third = moving_average(kind, length, &second);

        let trix: Series = (0..ctx.len())
            .map(|i| percent_change(third.get(i), third.lookback(i, 1)))
            .collect();
        let signal_line = moving_average(kind, signal_length, &trix);

        let signals = (0..ctx.len())
            .map(|i| {
                compare_signal(
                    trix.get(i) - signal_line.get(i),
                    trix.lookback(i, 1) - signal_line.lookback(i, 1),
                )
            })
            .collect();

        IndicatorOutput::new(IndicatorName::Trix, signals).with_primary("Trix", trix)
    }
}

impl Display for Trix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TRIX({}, {}, {})",
            self.config.length, self.config.signal_length, self.config.moving_average
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Signal,
        test_util::{bars, nz},
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn trix(closes: &[i64], config: TrixConfig) -> IndicatorOutput {
        Trix::new(config).calculate(&Context::from_bars(&bars(closes)))
    }

    #[test]
    fn constant_input_has_no_change() {
        let out = trix(&[50; 10], TrixConfig::default());
        assert_eq!(out.primary, Series::filled(Decimal::ZERO, 10));
    }

    #[test]
    fn unsmoothed_is_plain_percent_change() {
        let config = TrixConfig::default()
            .with_length(nz(1))
            .with_signal_length(nz(1));
        let out = trix(&[100, 110, 99], config);
        assert_eq!(out.primary.as_slice(), &[dec!(0), dec!(10), dec!(-10)]);
    }

    #[test]
    fn crossing_signal_line() {
        let config = TrixConfig::default()
            .with_length(nz(1))
            .with_signal_length(nz(2))
            .with_moving_average(MovingAverage::Simple);
        // TRIX [0, 10, −10], signal [0, 5, 0]
        let out = trix(&[100, 110, 99], config);
        assert_eq!(out.signals[1], Signal::None);
        assert_eq!(out.signals[2], Signal::Bearish);
    }
}
