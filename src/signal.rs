//! Signal classification.
//!
//! Every classifier is a pure, total function of the current and previous
//! bar: each input maps to exactly one [`Signal`], and flat or equal inputs
//! map to [`Signal::None`] unless a threshold is crossed.

use std::fmt::Display;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{Error, Result, Value};

/// Per-bar categorical classification of indicator behaviour.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Signal {
    /// Rising after falling, or price crossing above its reference.
    Bullish,
    /// Falling after rising, or price crossing below its reference.
    Bearish,
    /// Value crossed above the overbought level.
    Overbought,
    /// Value crossed below the oversold level.
    Oversold,
    /// Directional move confirmed by a volatility breakout.
    VolatilityExpansion,
    /// Nothing to report.
    #[default]
    None,
}

impl Signal {
    /// `true` for [`Bullish`](Signal::Bullish) and
    /// [`Bearish`](Signal::Bearish).
    #[inline]
    #[must_use]
    pub fn is_directional(self) -> bool {
        matches!(self, Self::Bullish | Self::Bearish)
    }

    /// Mirror image: bullish ↔ bearish, overbought ↔ oversold.
    #[must_use]
    pub fn mirror(self) -> Self {
        match self {
            Self::Bullish => Self::Bearish,
            Self::Bearish => Self::Bullish,
            Self::Overbought => Self::Oversold,
            Self::Oversold => Self::Overbought,
            other => other,
        }
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Choppiness-style level separating trending from ranging markets.
pub const FIBONACCI_VOLATILITY_LEVEL: Value = dec!(38.2);

/// Strictness of a compare signal.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareMode {
    /// A move from negative to zero already counts as a cross.
    #[default]
    Standard,
    /// The current delta must be strictly non-zero to fire.
    Strict,
}

/// Sign change of a delta between the previous and the current bar.
///
/// ```text
/// previous < 0, current >= 0  → Bullish
/// previous > 0, current <= 0  → Bearish
/// otherwise                   → None
/// ```
///
/// # Example
///
/// ```
/// use quantedge_core::{Signal, compare_signal};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(compare_signal(dec!(0.5), dec!(-1)), Signal::Bullish);
/// assert_eq!(compare_signal(dec!(0.5), dec!(0.2)), Signal::None);
/// ```
#[must_use]
pub fn compare_signal(current_delta: Value, previous_delta: Value) -> Signal {
    if previous_delta < Decimal::ZERO && current_delta >= Decimal::ZERO {
        Signal::Bullish
    } else if previous_delta > Decimal::ZERO && current_delta <= Decimal::ZERO {
        Signal::Bearish
    } else {
        Signal::None
    }
}

/// Compare signal that only fires when the current delta is non-zero.
///
/// ```text
/// previous <= 0, current > 0  → Bullish
/// previous >= 0, current < 0  → Bearish
/// otherwise                   → None
/// ```
#[must_use]
pub fn strict_compare_signal(current_delta: Value, previous_delta: Value) -> Signal {
    if previous_delta <= Decimal::ZERO && current_delta > Decimal::ZERO {
        Signal::Bullish
    } else if previous_delta >= Decimal::ZERO && current_delta < Decimal::ZERO {
        Signal::Bearish
    } else {
        Signal::None
    }
}

impl CompareMode {
    /// Classifies with this mode.
    #[inline]
    #[must_use]
    pub fn classify(self, current_delta: Value, previous_delta: Value) -> Signal {
        match self {
            Self::Standard => compare_signal(current_delta, previous_delta),
            Self::Strict => strict_compare_signal(current_delta, previous_delta),
        }
    }
}

/// Overbought and oversold levels for [`rsi_signal`].
///
/// Passed explicitly because scales differ between indicators
/// (0–100, ±100, −100–0, 0–1).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    overbought: Value,
    oversold: Value,
}

impl Thresholds {
    /// # Errors
    ///
    /// Returns [`Error::InvalidThresholds`] unless `overbought > oversold`.
    pub fn new(overbought: Value, oversold: Value) -> Result<Self> {
        if overbought <= oversold {
            tracing::warn!(%overbought, %oversold, "rejected signal thresholds");
            return Err(Error::InvalidThresholds {
                overbought,
                oversold,
            });
        }
        Ok(Self {
            overbought,
            oversold,
        })
    }

    /// Levels placed `distance` above and below `midpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThresholds`] when `distance` is not positive.
    pub fn symmetric(midpoint: Value, distance: Value) -> Result<Self> {
        Self::new(midpoint + distance, midpoint - distance)
    }

    /// Levels known to be ordered at compile time.
    pub(crate) const fn preset(overbought: Value, oversold: Value) -> Self {
        Self {
            overbought,
            oversold,
        }
    }

    /// 70 / 30 on a 0–100 scale.
    #[must_use]
    pub fn rsi() -> Self {
        Self::preset(dec!(70), dec!(30))
    }

    #[inline]
    #[must_use]
    pub fn overbought(&self) -> Value {
        self.overbought
    }

    #[inline]
    #[must_use]
    pub fn oversold(&self) -> Value {
        self.oversold
    }

    #[must_use]
    pub fn midpoint(&self) -> Value {
        (self.overbought + self.oversold) / Decimal::TWO
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::rsi()
    }
}

impl Display for Thresholds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Thresholds({}, {})", self.overbought, self.oversold)
    }
}

/// Threshold crossing, falling back to [`compare_signal`] on the deltas.
///
/// A crossing takes precedence: when the value crosses a level on the same
/// bar as the deltas change sign, the threshold category is reported.
///
/// ```text
/// previous <= overbought < current  → Overbought
/// previous >= oversold   > current  → Oversold
/// otherwise                         → compare_signal(current_delta, previous_delta)
/// ```
///
/// # Example
///
/// ```
/// use quantedge_core::{Signal, Thresholds, rsi_signal};
/// use rust_decimal_macros::dec;
///
/// let levels = Thresholds::rsi();
/// let signal = rsi_signal(dec!(7), dec!(5), dec!(72), dec!(65), levels);
/// assert_eq!(signal, Signal::Overbought);
/// ```
#[must_use]
pub fn rsi_signal(
    current_delta: Value,
    previous_delta: Value,
    current_value: Value,
    previous_value: Value,
    thresholds: Thresholds,
) -> Signal {
    if current_value > thresholds.overbought && previous_value <= thresholds.overbought {
        Signal::Overbought
    } else if current_value < thresholds.oversold && previous_value >= thresholds.oversold {
        Signal::Oversold
    } else {
        compare_signal(current_delta, previous_delta)
    }
}

/// Compare signal confirmed by a volatility level.
///
/// A directional compare signal on the deltas becomes
/// [`VolatilityExpansion`](Signal::VolatilityExpansion) when `value` is above
/// `threshold`; below it the direction is reported as is. Without a
/// direction the result is [`Signal::None`].
#[must_use]
pub fn volatility_signal(
    current_delta: Value,
    previous_delta: Value,
    value: Value,
    threshold: Value,
) -> Signal {
    match compare_signal(current_delta, previous_delta) {
        direction if direction.is_directional() && value > threshold => {
            Signal::VolatilityExpansion
        }
        direction => direction,
    }
}

/// Primary line breaking out of its companion lines.
///
/// `above` deltas are primary minus the highest companion, `below` deltas are
/// primary minus the lowest companion (see [`band_deltas`]).
///
/// ```text
/// previous_above <= 0 < current_above  → Bullish
/// previous_below >= 0 > current_below  → Bearish
/// otherwise                            → None
/// ```
#[must_use]
pub fn bullish_bearish_signal(
    current_above: Value,
    previous_above: Value,
    current_below: Value,
    previous_below: Value,
) -> Signal {
    if current_above > Decimal::ZERO && previous_above <= Decimal::ZERO {
        Signal::Bullish
    } else if current_below < Decimal::ZERO && previous_below >= Decimal::ZERO {
        Signal::Bearish
    } else {
        Signal::None
    }
}

/// `(primary - max(companions), primary - min(companions))`.
///
/// With no companions both deltas are zero.
#[must_use]
pub fn band_deltas(primary: Value, companions: &[Value]) -> (Value, Value) {
    let highest = companions.iter().copied().max();
    let lowest = companions.iter().copied().min();

    match (highest, lowest) {
        (Some(highest), Some(lowest)) => (primary - highest, primary - lowest),
        _ => (Decimal::ZERO, Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod compare {
        use super::*;

        #[test]
        fn rising_after_falling_is_bullish() {
            assert_eq!(compare_signal(dec!(1), dec!(-1)), Signal::Bullish);
        }

        #[test]
        fn falling_after_rising_is_bearish() {
            assert_eq!(compare_signal(dec!(-1), dec!(1)), Signal::Bearish);
        }

        #[test]
        fn continuing_trend_is_none() {
            assert_eq!(compare_signal(dec!(2), dec!(1)), Signal::None);
            assert_eq!(compare_signal(dec!(-2), dec!(-1)), Signal::None);
        }

        #[test]
        fn zero_deltas_are_none() {
            assert_eq!(compare_signal(dec!(0), dec!(0)), Signal::None);
        }

        #[test]
        fn reaching_zero_counts_in_standard_mode() {
            assert_eq!(compare_signal(dec!(0), dec!(-1)), Signal::Bullish);
            assert_eq!(compare_signal(dec!(0), dec!(1)), Signal::Bearish);
        }

        #[test]
        fn leaving_zero_is_none_in_standard_mode() {
            assert_eq!(compare_signal(dec!(1), dec!(0)), Signal::None);
        }
    }

    mod strict {
        use super::*;

        #[test]
        fn reaching_zero_does_not_fire() {
            assert_eq!(strict_compare_signal(dec!(0), dec!(-1)), Signal::None);
            assert_eq!(strict_compare_signal(dec!(0), dec!(1)), Signal::None);
        }

        #[test]
        fn leaving_zero_fires() {
            assert_eq!(strict_compare_signal(dec!(1), dec!(0)), Signal::Bullish);
            assert_eq!(strict_compare_signal(dec!(-1), dec!(0)), Signal::Bearish);
        }

        #[test]
        fn mode_dispatch() {
            assert_eq!(CompareMode::Strict.classify(dec!(0), dec!(-1)), Signal::None);
            assert_eq!(
                CompareMode::Standard.classify(dec!(0), dec!(-1)),
                Signal::Bullish
            );
        }
    }

    mod thresholds {
        use super::*;

        #[test]
        fn rejects_inverted_levels() {
            assert_eq!(
                Thresholds::new(dec!(30), dec!(70)),
                Err(Error::InvalidThresholds {
                    overbought: dec!(30),
                    oversold: dec!(70)
                })
            );
        }

        #[test]
        fn rejects_equal_levels() {
            assert!(Thresholds::new(dec!(50), dec!(50)).is_err());
        }

        #[test]
        fn symmetric_around_midpoint() {
            let t = Thresholds::symmetric(dec!(0), dec!(100)).unwrap();
            assert_eq!(t.overbought(), dec!(100));
            assert_eq!(t.oversold(), dec!(-100));
            assert_eq!(t.midpoint(), dec!(0));
        }

        #[test]
        fn symmetric_rejects_non_positive_distance() {
            assert!(Thresholds::symmetric(dec!(50), dec!(0)).is_err());
        }
    }

    mod rsi {
        use super::*;

        #[test]
        fn crossing_overbought() {
            let s = rsi_signal(dec!(7), dec!(5), dec!(72), dec!(65), Thresholds::rsi());
            assert_eq!(s, Signal::Overbought);
        }

        #[test]
        fn crossing_oversold() {
            let s = rsi_signal(dec!(-7), dec!(-5), dec!(28), dec!(35), Thresholds::rsi());
            assert_eq!(s, Signal::Oversold);
        }

        #[test]
        fn staying_overbought_falls_back_to_compare() {
            let s = rsi_signal(dec!(2), dec!(3), dec!(80), dec!(78), Thresholds::rsi());
            assert_eq!(s, Signal::None);
        }

        #[test]
        fn threshold_takes_precedence_over_compare() {
            // deltas alone would be Bullish
            let s = rsi_signal(dec!(5), dec!(-1), dec!(71), dec!(66), Thresholds::rsi());
            assert_eq!(s, Signal::Overbought);
        }

        #[test]
        fn inside_band_uses_compare() {
            let s = rsi_signal(dec!(1), dec!(-1), dec!(50), dec!(49), Thresholds::rsi());
            assert_eq!(s, Signal::Bullish);
        }

        #[test]
        fn negative_scale() {
            let williams = Thresholds::new(dec!(-20), dec!(-80)).unwrap();
            let s = rsi_signal(dec!(-3), dec!(-1), dec!(-81), dec!(-78), williams);
            assert_eq!(s, Signal::Oversold);
        }
    }

    mod volatility {
        use super::*;

        #[test]
        fn direction_above_level_expands() {
            let s = volatility_signal(dec!(1), dec!(-1), dec!(45), FIBONACCI_VOLATILITY_LEVEL);
            assert_eq!(s, Signal::VolatilityExpansion);
        }

        #[test]
        fn direction_below_level_passes_through() {
            let s = volatility_signal(dec!(-1), dec!(1), dec!(20), FIBONACCI_VOLATILITY_LEVEL);
            assert_eq!(s, Signal::Bearish);
        }

        #[test]
        fn no_direction_is_none_even_above_level() {
            let s = volatility_signal(dec!(1), dec!(1), dec!(90), FIBONACCI_VOLATILITY_LEVEL);
            assert_eq!(s, Signal::None);
        }
    }

    mod bands {
        use super::*;

        #[test]
        fn breaking_above_all_companions() {
            let (cur_above, cur_below) = band_deltas(dec!(12), &[dec!(10), dec!(11)]);
            let (prev_above, prev_below) = band_deltas(dec!(10.5), &[dec!(10), dec!(11)]);
            assert_eq!(
                bullish_bearish_signal(cur_above, prev_above, cur_below, prev_below),
                Signal::Bullish
            );
        }

        #[test]
        fn breaking_below_all_companions() {
            let (cur_above, cur_below) = band_deltas(dec!(9), &[dec!(10), dec!(11)]);
            let (prev_above, prev_below) = band_deltas(dec!(10.5), &[dec!(10), dec!(11)]);
            assert_eq!(
                bullish_bearish_signal(cur_above, prev_above, cur_below, prev_below),
                Signal::Bearish
            );
        }

        #[test]
        fn staying_above_is_none() {
            assert_eq!(
                bullish_bearish_signal(dec!(2), dec!(1), dec!(3), dec!(2)),
                Signal::None
            );
        }

        #[test]
        fn no_companions_gives_zero_deltas() {
            assert_eq!(band_deltas(dec!(5), &[]), (Decimal::ZERO, Decimal::ZERO));
        }
    }

    #[test]
    fn mirror_is_an_involution() {
        for s in [
            Signal::Bullish,
            Signal::Bearish,
            Signal::Overbought,
            Signal::Oversold,
            Signal::VolatilityExpansion,
            Signal::None,
        ] {
            assert_eq!(s.mirror().mirror(), s);
        }
    }
}
