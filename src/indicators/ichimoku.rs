use std::{fmt::Display, num::NonZero};

use rust_decimal::Decimal;

use super::length;
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, PriceSource, Series,
    compare_signal, rolling_high_low,
};

/// Configuration for the [`IchimokuCloud`].
///
/// Defaults: 9 / 26 / 52.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct IchimokuConfig {
    tenkan: NonZero<usize>,
    kijun: NonZero<usize>,
    senkou: NonZero<usize>,
}

impl Default for IchimokuConfig {
    fn default() -> Self {
        Self {
            tenkan: length(9),
            kijun: length(26),
            senkou: length(52),
        }
    }
}

impl IndicatorConfig for IchimokuConfig {
    /// Every line is a high/low midpoint.
    #[inline]
    fn source(&self) -> PriceSource {
        PriceSource::Median
    }
}

impl IchimokuConfig {
    #[must_use]
    pub fn with_lengths(
        mut self,
        tenkan: NonZero<usize>,
        kijun: NonZero<usize>,
        senkou: NonZero<usize>,
    ) -> Self {
        self.tenkan = tenkan;
        self.kijun = kijun;
        self.senkou = senkou;
        self
    }
}

impl Display for IchimokuConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IchimokuConfig({}, {}, {})",
            self.tenkan, self.kijun, self.senkou
        )
    }
}

/// Ichimoku Cloud.
///
/// Conversion (`TenkanSen`) and base (`KiiunSen`) lines are midpoints of
/// the rolling high/low range. `SenkouSpanA` averages the two, `SenkouSpanB`
/// is the midpoint over the longest window. Spans are not displaced.
///
/// Signals on the conversion line crossing the base line. No primary
/// series is exposed.
#[derive(Clone, Debug, Default)]
pub struct IchimokuCloud {
    config: IchimokuConfig,
}

fn midpoints(high: &Series, low: &Series, length: NonZero<usize>) -> Series {
    let (highest, lowest) = rolling_high_low(high, low, length);
    highest.zip_with(&lowest, |h, l| (h + l) / Decimal::TWO)
}

impl Indicator for IchimokuCloud {
    type Config = IchimokuConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let IchimokuConfig {
            tenkan,
            kijun,
            senkou,
        } = self.config;

        let high = ctx.series(PriceSource::High);
        let low = ctx.series(PriceSource::Low);

        let conversion = midpoints(high, low, tenkan);
        let base = midpoints(high, low, kijun);
        let span_a = conversion.zip_with(&base, |c, b| (c + b) / Decimal::TWO);
        let span_b = midpoints(high, low, senkou);

        let signals = (0..ctx.len())
            .map(|i| {
                compare_signal(
                    conversion.get(i) - base.get(i),
                    conversion.lookback(i, 1) - base.lookback(i, 1),
                )
            })
            .collect();

        IndicatorOutput::new(IndicatorName::IchimokuCloud, signals)
            .with_output("TenkanSen", conversion)
            .with_output("KiiunSen", base)
            .with_output("SenkouSpanA", span_a)
            .with_output("SenkouSpanB", span_b)
    }
}

impl Display for IchimokuCloud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ICHIMOKU({}, {}, {})",
            self.config.tenkan, self.config.kijun, self.config.senkou
        )
    }
}
