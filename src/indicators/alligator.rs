use std::{fmt::Display, num::NonZero};

use super::length;
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, MovingAverage,
    PriceSource, Series, band_deltas, bullish_bearish_signal, moving_average,
};

/// One displaced average of the [`AlligatorIndex`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
struct Line {
    length: NonZero<usize>,
    offset: usize,
}

impl Line {
    const fn new(length: NonZero<usize>, offset: usize) -> Self {
        Self { length, offset }
    }

    fn displaced(self, kind: MovingAverage, input: &Series) -> Series {
        let average = moving_average(kind, self.length, input);
        (0..input.len())
            .map(|i| average.lookback(i, self.offset))
            .collect()
    }
}

/// Configuration for the [`AlligatorIndex`].
///
/// Defaults: jaw 13 shifted 8, teeth 8 shifted 5, lips 5 shifted 3, Wilder
/// smoothing of the median price.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AlligatorConfig {
    jaw: Line,
    teeth: Line,
    lips: Line,
    moving_average: MovingAverage,
    source: PriceSource,
}

impl Default for AlligatorConfig {
    fn default() -> Self {
        Self {
            jaw: Line::new(length(13), 8),
            teeth: Line::new(length(8), 5),
            lips: Line::new(length(5), 3),
            moving_average: MovingAverage::Wilder,
            source: PriceSource::Median,
        }
    }
}

impl IndicatorConfig for AlligatorConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl AlligatorConfig {
    #[must_use]
    pub fn with_jaw(mut self, length: NonZero<usize>, offset: usize) -> Self {
        self.jaw = Line::new(length, offset);
        self
    }

    #[must_use]
    pub fn with_teeth(mut self, length: NonZero<usize>, offset: usize) -> Self {
        self.teeth = Line::new(length, offset);
        self
    }

    #[must_use]
    pub fn with_lips(mut self, length: NonZero<usize>, offset: usize) -> Self {
        self.lips = Line::new(length, offset);
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

impl Display for AlligatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AlligatorConfig({}/{}, {}/{}, {}/{}, {}, {})",
            self.jaw.length,
            self.jaw.offset,
            self.teeth.length,
            self.teeth.offset,
            self.lips.length,
            self.lips.offset,
            self.moving_average,
            self.source
        )
    }
}

/// Bill Williams' Alligator: three averages shifted forward by their
/// offsets, reading zero until the shift is filled.
///
/// Bullish when the lips break above both jaw and teeth, bearish when they
/// break below both. No primary series is exposed.
#[derive(Clone, Debug, Default)]
pub struct AlligatorIndex {
    config: AlligatorConfig,
}

impl Indicator for AlligatorIndex {
    type Config = AlligatorConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let AlligatorConfig {
            jaw,
            teeth,
            lips,
            moving_average: kind,
            source,
        } = self.config;

        let input = ctx.series(source);
        let jaw = jaw.displaced(kind, input);
        let teeth = teeth.displaced(kind, input);
        let lips = lips.displaced(kind, input);

        let signals = (0..ctx.len())
            .map(|i| {
                let (above, below) = band_deltas(lips.get(i), &[jaw.get(i), teeth.get(i)]);
                let (prev_above, prev_below) = band_deltas(
                    lips.lookback(i, 1),
                    &[jaw.lookback(i, 1), teeth.lookback(i, 1)],
                );
                bullish_bearish_signal(above, prev_above, below, prev_below)
            })
            .collect();

        IndicatorOutput::new(IndicatorName::AlligatorIndex, signals)
            .with_output("Lips", lips)
            .with_output("Teeth", teeth)
            .with_output("Jaws", jaw)
    }
}

impl Display for AlligatorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ALLIGATOR({}, {}, {}, {})",
            self.config.jaw.length,
            self.config.teeth.length,
            self.config.lips.length,
            self.config.moving_average
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
    use rust_decimal_macros::dec;

    fn alligator(closes: &[i64]) -> IndicatorOutput {
        let config = AlligatorConfig::default()
            .with_jaw(nz(3), 2)
            .with_teeth(nz(2), 1)
            .with_lips(nz(1), 0)
            .with_moving_average(MovingAverage::Simple)
            .with_source(PriceSource::Close);
        AlligatorIndex::new(config).calculate(&Context::from_bars(&bars(closes)))
    }

    #[test]
    fn lines_are_shifted_forward() {
        let out = alligator(&[10, 20, 30]);
        let line = |key| out.output(key).map(Series::as_slice).unwrap_or_default();
        assert_eq!(line("Lips"), &[dec!(10), dec!(20), dec!(30)]);
        assert_eq!(line("Teeth"), &[dec!(0), dec!(10), dec!(15)]);
        assert_eq!(line("Jaws"), &[dec!(0), dec!(0), dec!(10)]);
        assert!(out.primary.is_empty());
    }

    #[test]
    fn lips_breaking_out() {
        let out = alligator(&[10, 10, 10, 10, 20, 0]);
        // bar 4: lips 20 over jaw 10 and teeth 10
        assert_eq!(out.signals[3], Signal::None);
        assert_eq!(out.signals[4], Signal::Bullish);
        // bar 5: lips 0 under jaw 10 and teeth 15
        assert_eq!(out.signals[5], Signal::Bearish);
    }
}
