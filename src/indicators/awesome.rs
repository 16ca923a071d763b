use std::{fmt::Display, num::NonZero};

use super::length;
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, MovingAverage,
    PriceSource, Series, compare_signal, moving_average,
};

/// Configuration for the [`AwesomeOscillator`].
///
/// Defaults: fast 5, slow 34, simple average, median price.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AoConfig {
    fast: NonZero<usize>,
    slow: NonZero<usize>,
    moving_average: MovingAverage,
    source: PriceSource,
}

impl Default for AoConfig {
    fn default() -> Self {
        Self {
            fast: length(5),
            slow: length(34),
            moving_average: MovingAverage::Simple,
            source: PriceSource::Median,
        }
    }
}

impl IndicatorConfig for AoConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl AoConfig {
    #[must_use]
    pub fn with_lengths(mut self, fast: NonZero<usize>, slow: NonZero<usize>) -> Self {
        self.fast = fast;
        self.slow = slow;
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

impl Display for AoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AoConfig({}, {}, {}, {})",
            self.fast, self.slow, self.moving_average, self.source
        )
    }
}

/// Awesome Oscillator (AO): fast average minus slow average of the median
/// price. Signals on zero-line crosses.
#[derive(Clone, Debug, Default)]
pub struct AwesomeOscillator {
    config: AoConfig,
}

impl Indicator for AwesomeOscillator {
    type Config = AoConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let AoConfig {
            fast,
            slow,
            moving_average: kind,
            source,
        } = self.config;

        let input = ctx.series(source);
        let ao = moving_average(kind, fast, input)
            .zip_with(&moving_average(kind, slow, input), |f, s| f - s);

        let signals = (0..ctx.len())
            .map(|i| compare_signal(ao.get(i), ao.lookback(i, 1)))
            .collect();

        IndicatorOutput::new(IndicatorName::AwesomeOscillator, signals)
            .with_primary("Ao", ao)
    }
}

impl Display for AwesomeOscillator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AO({}, {})", self.config.fast, self.config.slow)
    }
}

/// Configuration for the [`AcceleratorOscillator`].
///
/// Defaults: the [`AoConfig`] defaults with a smoothing length of 5.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AcConfig {
    awesome: AoConfig,
    smooth: NonZero<usize>,
}

impl Default for AcConfig {
    fn default() -> Self {
        Self {
            awesome: AoConfig::default(),
            smooth: length(5),
        }
    }
}

impl IndicatorConfig for AcConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.awesome.source
    }
}

impl AcConfig {
    #[must_use]
    pub fn with_awesome(mut self, awesome: AoConfig) -> Self {
        self.awesome = awesome;
        self
    }

    #[must_use]
    pub fn with_smooth(mut self, smooth: NonZero<usize>) -> Self {
        self.smooth = smooth;
        self
    }
}

impl Display for AcConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AcConfig({}, {})", self.awesome, self.smooth)
    }
}

/// Accelerator Oscillator (AC): the AO minus its own moving average.
///
/// Reuses the [`AwesomeOscillator`] output instead of recomputing it.
#[derive(Clone, Debug, Default)]
pub struct AcceleratorOscillator {
    config: AcConfig,
}

impl Indicator for AcceleratorOscillator {
    type Config = AcConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let ao = AwesomeOscillator::new(self.config.awesome).calculate(ctx).primary;
        let kind = self.config.awesome.moving_average;
        let smoothed = moving_average(kind, self.config.smooth, &ao);
        let ac: Series = ao.zip_with(&smoothed, |a, s| a - s);

        let signals = (0..ctx.len())
            .map(|i| compare_signal(ac.get(i), ac.lookback(i, 1)))
            .collect();

        IndicatorOutput::new(IndicatorName::AcceleratorOscillator, signals)
            .with_primary("Ac", ac)
    }
}

impl Display for AcceleratorOscillator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AC({}, {}, {})",
            self.config.awesome.fast, self.config.awesome.slow, self.config.smooth
        )
    }
}
