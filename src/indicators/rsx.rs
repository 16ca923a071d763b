use std::{fmt::Display, num::NonZero};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::trace;

use super::{length, slopes};
use crate::{
    Context, Indicator, IndicatorConfig, IndicatorName, IndicatorOutput, PriceSource, Series,
    Thresholds, Value, rsi_signal,
};

const NEUTRAL: Value = dec!(50);
const MIN_WARM_UP: Value = dec!(5);

/// Configuration for the [`JmaRsxClone`].
///
/// Defaults: length 14, closing price, thresholds 70 / 30.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsxConfig {
    length: NonZero<usize>,
    source: PriceSource,
    thresholds: Thresholds,
}

impl Default for RsxConfig {
    fn default() -> Self {
        Self {
            length: length(14),
            source: PriceSource::Close,
            thresholds: Thresholds::rsi(),
        }
    }
}

impl IndicatorConfig for RsxConfig {
    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }
}

impl RsxConfig {
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

impl Display for RsxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RsxConfig({}, {}, {})",
            self.length, self.source, self.thresholds
        )
    }
}

/// Double exponential stage with lag compensation.
#[derive(Clone, Copy, Debug, Default)]
struct Stage {
    fast: Value,
    slow: Value,
}

impl Stage {
    fn push(&mut self, input: Value, alpha: Value, decay: Value) -> Value {
        self.fast = decay * self.fast + alpha * input;
        self.slow = alpha * self.fast + decay * self.slow;
        dec!(1.5) * self.fast - dec!(0.5) * self.slow
    }
}

/// Three chained stages.
#[derive(Clone, Copy, Debug, Default)]
struct Smoother([Stage; 3]);

impl Smoother {
    fn push(&mut self, input: Value, alpha: Value, decay: Value) -> Value {
        self.0
            .iter_mut()
            .fold(input, |value, stage| stage.push(value, alpha, decay))
    }
}

/// Scaled price change fed through the direction and magnitude smoothers.
///
/// The price before the first bar reads as zero, so the first change is the
/// full scaled price.
#[derive(Clone, Copy, Debug, Default)]
struct Momentum {
    previous: Value,
    up: Smoother,
    total: Smoother,
}

impl Momentum {
    /// Returns `(change, smoothed change, smoothed |change|)`.
    fn push(&mut self, price: Value, alpha: Value, decay: Value) -> (Value, Value, Value) {
        let scaled = Decimal::ONE_HUNDRED * price;
        let change = scaled - self.previous;
        self.previous = scaled;

        (
            change,
            self.up.push(change, alpha, decay),
            self.total.push(change.abs(), alpha, decay),
        )
    }
}

/// Bar counter gating the output until the smoothers have warmed up.
#[derive(Clone, Copy, Debug, Default)]
struct WarmUp {
    target: Value,
    counter: Value,
}

impl WarmUp {
    /// Advances one bar; `true` once the counter has passed the target.
    fn advance(&mut self, length: Value, moved: bool) -> bool {
        let counter = if self.counter.is_zero() {
            Decimal::ONE
        } else if self.target <= self.counter {
            self.target + Decimal::ONE
        } else {
            self.counter + Decimal::ONE
        };

        let target = if self.counter.is_zero() && length - Decimal::ONE >= MIN_WARM_UP {
            length - Decimal::ONE
        } else {
            MIN_WARM_UP
        };

        let restart = target >= counter && moved;
        let gate = if target == counter && !restart {
            Decimal::ZERO
        } else {
            counter
        };

        self.target = target;
        self.counter = counter;
        target < gate
    }
}

/// Clone of Jurik's RSX: an RSI computed from triple lag-compensated
/// smoothing of price momentum and its magnitude.
///
/// ```text
/// RSX = clamp((smooth(Δp) / smooth(|Δp|) + 1) × 50, 0, 100)
/// ```
///
/// Reads 50 while warming up and whenever the smoothed magnitude is not
/// positive. Momentum on the first bar is measured from zero.
#[derive(Clone, Debug, Default)]
pub struct JmaRsxClone {
    config: RsxConfig,
}

impl Indicator for JmaRsxClone {
    type Config = RsxConfig;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn calculate(&self, ctx: &Context) -> IndicatorOutput {
        let RsxConfig {
            length,
            source,
            thresholds,
        } = self.config;

        let period = Decimal::from(length.get());
        let alpha = dec!(3) / (period + Decimal::TWO);
        let decay = Decimal::ONE - alpha;

        let mut momentum = Momentum::default();
        let mut warm_up = WarmUp::default();

        let rsx: Series = ctx
            .series(source)
            .iter()
            .map(|&price| {
                let (change, up, total) = momentum.push(price, alpha, decay);
                let ready = warm_up.advance(period, !change.is_zero());

                if ready && total > Decimal::ZERO {
                    ((up / total + Decimal::ONE) * NEUTRAL)
                        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
                } else {
                    if ready {
                        trace!(%price, "rsx without momentum, holding neutral");
                    }
                    NEUTRAL
                }
            })
            .collect();

        let signals = (0..ctx.len())
            .map(|i| {
                let (current, previous) = slopes(&rsx, i);
                rsi_signal(current, previous, rsx.get(i), rsx.lookback(i, 1), thresholds)
            })
            .collect();

        IndicatorOutput::new(IndicatorName::JmaRsxClone, signals).with_primary("Rsx", rsx)
    }
}

impl Display for JmaRsxClone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSX({}, {})", self.config.length, self.config.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Signal,
        test_util::{bars, nz},
    };

    fn rsx(closes: &[i64], length: usize) -> IndicatorOutput {
        let ctx = Context::from_bars(&bars(closes));
        JmaRsxClone::new(RsxConfig::default().with_length(nz(length))).calculate(&ctx)
    }

    #[test]
    fn neutral_while_warming_up() {
        let closes: Vec<i64> = (1..=5).collect();
        let out = rsx(&closes, 14);
        assert_eq!(out.primary, Series::filled(NEUTRAL, 5));
    }

    #[test]
    fn flat_prices_keep_the_opening_step() {
        // the step up from zero before the first bar is the only momentum,
        // so both smoothers see the same input and the ratio is one
        let out = rsx(&[10; 30], 14);
        assert_eq!(out.primary.as_slice()[..5], [NEUTRAL; 5]);
        assert!(out.primary.as_slice()[5..].iter().all(|v| *v == dec!(100)));
        assert_eq!(out.signals[5], Signal::Overbought);
        assert!(out.signals[7..].iter().all(|s| *s == Signal::None));
    }

    #[test]
    fn zero_prices_stay_neutral() {
        let out = rsx(&[0; 20], 14);
        assert_eq!(out.primary, Series::filled(NEUTRAL, 20));
    }

    #[test]
    fn steady_rise_is_overbought() {
        let closes: Vec<i64> = (1..=40).collect();
        let out = rsx(&closes, 5);
        assert!(out.primary.last_or_default() > dec!(99));
        assert!(out.signals.contains(&Signal::Overbought));
    }

    #[test]
    fn steady_fall_is_oversold() {
        let closes: Vec<i64> = (1..=40).rev().collect();
        let out = rsx(&closes, 5);
        assert!(out.primary.last_or_default() < dec!(1));
        assert!(out.signals.contains(&Signal::Oversold));
    }

    #[test]
    fn bounded() {
        let out = rsx(&[10, 30, 5, 40, 2, 50, 1, 60, 3, 45, 7, 33, 2, 70], 3);
        assert!(
            out.primary
                .iter()
                .all(|v| (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(v))
        );
    }

    mod momentum {
        use super::*;

        #[test]
        fn first_two_bars_from_zero_seed() {
            // length 4: alpha = 3 / 6, decay = 1 / 2
            let (alpha, decay) = (dec!(0.5), dec!(0.5));
            let mut momentum = Momentum::default();

            // 100 × 10 − 0 = 1000 through three stages: 625, 390.625, 244.140625
            assert_eq!(
                momentum.push(dec!(10), alpha, decay),
                (dec!(1000), dec!(244.140625), dec!(244.140625))
            );
            // 800 − 1000 = −200; magnitude stages 375, 390.625, 341.796875
            assert_eq!(
                momentum.push(dec!(8), alpha, decay),
                (dec!(-200), dec!(244.140625), dec!(341.796875))
            );
        }
    }

    mod warm_up {
        use super::*;

        #[test]
        fn opens_after_target_bars() {
            let mut warm_up = WarmUp::default();
            let ready: Vec<bool> = (0..8).map(|_| warm_up.advance(dec!(14), true)).collect();
            // target 13 on the first bar, then 5; the counter passes 5 on bar 5
            assert_eq!(
                ready,
                [false, false, false, false, false, true, true, true]
            );
        }

        #[test]
        fn short_length_uses_minimum_target() {
            let mut warm_up = WarmUp::default();
            warm_up.advance(dec!(3), true);
            assert_eq!(warm_up.target, MIN_WARM_UP);
        }
    }
}
