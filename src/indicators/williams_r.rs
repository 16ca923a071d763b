use std::{fmt::Display, num::NonZero};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{length, slopes};
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, PriceSource, Series,
    Thresholds, rolling_high_low, rsi_signal,
};

/// Configuration for [`WilliamsR`].
///
/// Defaults: length 14, closing price, thresholds −20 / −80.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct WilliamsRConfig {
    length: NonZero<usize>,
    source: PriceSource,
    thresholds: Thresholds,
}

impl Default for WilliamsRConfig {
    fn default() -> Self {
        Self {
            length: length(14),
            source: PriceSource::Close,
            thresholds: Thresholds::preset(dec!(-20), dec!(-80)),
        }
    }
}

impl IndicatorConfig for WilliamsRConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl WilliamsRConfig {
    #[inline]
    #[must_use]
    pub fn length(&self) -> NonZero<usize> {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

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

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

impl Display for WilliamsRConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WilliamsRConfig({}, {}, {})",
            self.length, self.source, self.thresholds
        )
    }
}

/// Williams %R: position of price inside the rolling high/low range on a
/// −100..0 scale.
///
/// ```text
/// %R = −100 × (highest high − price) / (highest high − lowest low)
/// ```
///
/// A zero range reads −100.
#[derive(Clone, Debug, Default)]
pub struct WilliamsR {
    config: WilliamsRConfig,
}

impl Indicator for WilliamsR {
    type Config = WilliamsRConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let WilliamsRConfig {
            length,
            source,
            thresholds,
        } = self.config;

        let input = ctx.series(source);
        let (highest, lowest) = rolling_high_low(
            ctx.series(PriceSource::High),
            ctx.series(PriceSource::Low),
            length,
        );

        let r: Series = (0..ctx.len())
            .map(|i| {
                let range = highest.get(i) - lowest.get(i);
                if range.is_zero() {
                    -Decimal::ONE_HUNDRED
                } else {
                    -Decimal::ONE_HUNDRED * (highest.get(i) - input.get(i)) / range
                }
            })
            .collect();

        let signals = (0..ctx.len())
            .map(|i| {
                let (current, previous) = slopes(&r, i);
                rsi_signal(current, previous, r.get(i), r.lookback(i, 1), thresholds)
            })
            .collect();

        IndicatorOutput::new(IndicatorName::WilliamsR, signals).with_primary("Williams%R", r)
    }
}

impl Display for WilliamsR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%R({})", self.config.length)
    }
}
