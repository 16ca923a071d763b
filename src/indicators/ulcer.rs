use std::{fmt::Display, num::NonZero};

use rust_decimal::{Decimal, MathematicalOps};

use super::{length, slopes};
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, PriceSource, Series,
    rolling_average, rolling_max_min, strict_compare_signal,
};

/// Configuration for the [`UlcerIndex`].
///
/// Defaults: length 14, closing price.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct UlcerConfig {
    length: NonZero<usize>,
    source: PriceSource,
}

impl Default for UlcerConfig {
    fn default() -> Self {
        Self {
            length: length(14),
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfig for UlcerConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl UlcerConfig {
    #[inline]
    #[must_use]
    pub fn length(&self) -> NonZero<usize> {
        self.length
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
}

impl Display for UlcerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UlcerConfig({}, {})", self.length, self.source)
    }
}

/// Ulcer Index (UI): root mean square of the percentage drawdown from the
/// rolling high.
///
/// ```text
/// drawdown = (price − highest) / highest × 100
/// UI       = sqrt(average(drawdown²))
/// ```
///
/// A zero high contributes zero drawdown, as does a drawdown whose square
/// leaves the `Decimal` range. Signals on strict slope turns.
#[derive(Clone, Debug, Default)]
pub struct UlcerIndex {
    config: UlcerConfig,
}

impl Indicator for UlcerIndex {
    type Config = UlcerConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let UlcerConfig { length, source } = self.config;

        let input = ctx.series(source);
        let (highest, _) = rolling_max_min(input, length);
        let squared = input.zip_with(&highest, |x, max| {
            (x - max)
                .checked_div(max)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .and_then(|drawdown| drawdown.checked_mul(drawdown))
                .unwrap_or(Decimal::ZERO)
        });
        let ui: Series = rolling_average(&squared, length)
            .map(|mean| mean.sqrt().unwrap_or(Decimal::ZERO));

        let signals = (0..ctx.len())
            .map(|i| {
                let (current, previous) = slopes(&ui, i);
                strict_compare_signal(current, previous)
            })
            .collect();

        IndicatorOutput::new(IndicatorName::UlcerIndex, signals).with_primary("Ui", ui)
    }
}

impl Display for UlcerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UI({}, {})", self.config.length, self.config.source)
    }
}
