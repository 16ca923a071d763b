use std::{fmt::Display, num::NonZero};

use rust_decimal::Decimal;

use super::length;
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, PriceSource, Series,
    compare_signal, rolling_extremum_positions,
};

/// Configuration for the [`AroonOscillator`].
///
/// Defaults: length 25, closing price.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AroonConfig {
    length: NonZero<usize>,
    source: PriceSource,
}

impl Default for AroonConfig {
    fn default() -> Self {
        Self {
            length: length(25),
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfig for AroonConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl AroonConfig {
    #[must_use]
    pub fn with_length(mut self, length: NonZero<usize>) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Display for AroonConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AroonConfig({}, {})", self.length, self.source)
    }
}

/// Aroon Oscillator: Aroon Up minus Aroon Down.
///
/// ```text
/// up   = (length − bars since highest) / length × 100
/// down = (length − bars since lowest)  / length × 100
/// ```
///
/// Repeated extremes count from their most recent bar. Signals on zero-line
/// crosses.
#[derive(Clone, Debug, Default)]
pub struct AroonOscillator {
    config: AroonConfig,
}

impl Indicator for AroonOscillator {
    type Config = AroonConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let AroonConfig { length, source } = self.config;

        let (max_at, min_at) = rolling_extremum_positions(ctx.series(source), length);
        let span = Decimal::from(length.get());
        let aroon = |since: usize| (span - Decimal::from(since)) / span * Decimal::ONE_HUNDRED;

        let oscillator: Series = max_at
            .iter()
            .zip(&min_at)
            .enumerate()
            .map(|(i, (&max, &min))| aroon(i - max) - aroon(i - min))
            .collect();

        let signals = (0..ctx.len())
            .map(|i| compare_signal(oscillator.get(i), oscillator.lookback(i, 1)))
            .collect();

        IndicatorOutput::new(IndicatorName::AroonOscillator, signals)
            .with_primary("Aroon", oscillator)
    }
}

impl Display for AroonOscillator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AROON({})", self.config.length)
    }
}
