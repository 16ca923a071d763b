//! Moving average dispatcher.
//!
//! [`moving_average`] smooths a [`Series`] with one of the [`MovingAverage`]
//! variants. Output has the same length and alignment as the input, and is
//! defined from the first bar: windowed variants average the partial window,
//! recursive variants seed their state with the first input.

mod adaptive;
mod exponential;
mod jurik;
mod windowed;

use std::{fmt::Display, num::NonZero, str::FromStr};

use rust_decimal_macros::dec;

use crate::{Error, Series, Value};

pub(crate) use exponential::ExponentialFilter;

const KAMA_FAST: NonZero<usize> = NonZero::new(2).unwrap();
const KAMA_SLOW: NonZero<usize> = NonZero::new(30).unwrap();

/// Smoothing algorithm selector.
///
/// Parametric variants carry their own parameters; the window length is
/// passed separately to [`moving_average`]. Constructors with the usual
/// defaults are [`t3`](MovingAverage::t3),
/// [`kaufman_adaptive`](MovingAverage::kaufman_adaptive) and
/// [`jurik`](MovingAverage::jurik).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovingAverage {
    /// Arithmetic mean of the window.
    #[default]
    Simple,
    /// Linearly weighted mean, newest bar heaviest.
    Weighted,
    /// Simple average of a simple average.
    Triangular,
    /// Hull: weighted average of `2·WMA(L/2) − WMA(L)` over `√L` bars.
    Hull,
    /// Exponential, `α = 2 / (L + 1)`.
    Exponential,
    /// Wilder's smoothing, `α = 1 / L`.
    Wilder,
    /// `2·EMA − EMA(EMA)`.
    DoubleExponential,
    /// `3·EMA − 3·EMA² + EMA³`.
    TripleExponential,
    /// EMA of the de-lagged input `2·x[i] − x[i − (L−1)/2]`.
    ZeroLagExponential,
    /// Tillson T3: six cascaded EMAs blended by the volume factor.
    T3 { volume_factor: Value },
    /// Kaufman adaptive: α follows the efficiency ratio between the fast and
    /// slow smoothing constants.
    KaufmanAdaptive {
        fast: NonZero<usize>,
        slow: NonZero<usize>,
    },
    /// Chande's variable index dynamic average: α scaled by `|CMO|`.
    VariableIndexDynamic,
    /// Jurik adaptive filter.
    Jurik { phase: Value, power: Value },
}

impl MovingAverage {
    /// T3 with volume factor `0.7`.
    #[must_use]
    pub fn t3() -> Self {
        Self::T3 {
            volume_factor: dec!(0.7),
        }
    }

    /// KAMA with fast length 2 and slow length 30.
    #[must_use]
    pub fn kaufman_adaptive() -> Self {
        Self::KaufmanAdaptive {
            fast: KAMA_FAST,
            slow: KAMA_SLOW,
        }
    }

    /// JMA with phase 0 and power 2.
    #[must_use]
    pub fn jurik() -> Self {
        Self::Jurik {
            phase: Value::ZERO,
            power: Value::TWO,
        }
    }

    /// `true` when each output depends on the previous output.
    #[must_use]
    pub fn is_recursive(self) -> bool {
        !matches!(
            self,
            Self::Simple | Self::Weighted | Self::Triangular | Self::Hull
        )
    }

    fn tag(self) -> &'static str {
        match self {
            Self::Simple => "SMA",
            Self::Weighted => "WMA",
            Self::Triangular => "TMA",
            Self::Hull => "HMA",
            Self::Exponential => "EMA",
            Self::Wilder => "RMA",
            Self::DoubleExponential => "DEMA",
            Self::TripleExponential => "TEMA",
            Self::ZeroLagExponential => "ZLEMA",
            Self::T3 { .. } => "T3",
            Self::KaufmanAdaptive { .. } => "KAMA",
            Self::VariableIndexDynamic => "VIDYA",
            Self::Jurik { .. } => "JMA",
        }
    }
}

/// Short tag, parameters excluded.
impl Display for MovingAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parses a short tag or a long name, case-insensitively. Parametric
/// variants get their default parameters.
///
/// # Example
///
/// ```
/// use quantedge_core::MovingAverage;
///
/// assert_eq!("ema".parse::<MovingAverage>(), Ok(MovingAverage::Exponential));
/// assert_eq!("Kama".parse::<MovingAverage>(), Ok(MovingAverage::kaufman_adaptive()));
/// assert!("xyz".parse::<MovingAverage>().is_err());
/// ```
impl FromStr for MovingAverage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "sma" | "simple" | "simplemovingaverage" => Ok(Self::Simple),
            "wma" | "weighted" | "weightedmovingaverage" => Ok(Self::Weighted),
            "tma" | "trima" | "triangular" | "triangularmovingaverage" => Ok(Self::Triangular),
            "hma" | "hull" | "hullmovingaverage" => Ok(Self::Hull),
            "ema" | "exponential" | "exponentialmovingaverage" => Ok(Self::Exponential),
            "rma" | "smma" | "wilder" | "wildersmoothingmethod" => Ok(Self::Wilder),
            "dema" | "doubleexponential" | "doubleexponentialmovingaverage" => {
                Ok(Self::DoubleExponential)
            }
            "tema" | "tripleexponential" | "tripleexponentialmovingaverage" => {
                Ok(Self::TripleExponential)
            }
            "zlema" | "zerolagexponential" | "zerolagexponentialmovingaverage" => {
                Ok(Self::ZeroLagExponential)
            }
            "t3" | "tillsont3" | "tillsont3movingaverage" => Ok(Self::t3()),
            "kama" | "kaufmanadaptive" | "kaufmanadaptivemovingaverage" => {
                Ok(Self::kaufman_adaptive())
            }
            "vidya" | "variableindexdynamic" | "variableindexdynamicaverage" => {
                Ok(Self::VariableIndexDynamic)
            }
            "jma" | "jurik" | "jurikmovingaverage" => Ok(Self::jurik()),
            _ => {
                tracing::warn!(tag = s, "rejected moving average tag");
                Err(Error::UnknownMovingAverage(s.to_owned()))
            }
        }
    }
}

/// Smooths `series` with `kind` over `length` bars.
///
/// Pure: calling it twice on the same input gives identical output.
///
/// # Example
///
/// ```
/// use quantedge_core::{MovingAverage, Series, moving_average};
/// use rust_decimal_macros::dec;
/// use std::num::NonZero;
///
/// let closes = Series::from(vec![dec!(1), dec!(2), dec!(3)]);
/// let ema = moving_average(MovingAverage::Exponential, NonZero::new(3).unwrap(), &closes);
///
/// assert_eq!(ema.as_slice(), &[dec!(1), dec!(1.5), dec!(2.25)]);
/// ```
#[must_use]
pub fn moving_average(kind: MovingAverage, length: NonZero<usize>, series: &Series) -> Series {
    match kind {
        MovingAverage::Simple => windowed::simple(series, length),
        MovingAverage::Weighted => windowed::weighted(series, length),
        MovingAverage::Triangular => windowed::triangular(series, length),
        MovingAverage::Hull => windowed::hull(series, length),
        MovingAverage::Exponential => exponential::exponential(series, length),
        MovingAverage::Wilder => exponential::wilder(series, length),
        MovingAverage::DoubleExponential => exponential::double(series, length),
        MovingAverage::TripleExponential => exponential::triple(series, length),
        MovingAverage::ZeroLagExponential => exponential::zero_lag(series, length),
        MovingAverage::T3 { volume_factor } => exponential::t3(series, length, volume_factor),
        MovingAverage::KaufmanAdaptive { fast, slow } => {
            adaptive::kaufman(series, length, fast, slow)
        }
        MovingAverage::VariableIndexDynamic => adaptive::variable_index_dynamic(series, length),
        MovingAverage::Jurik { phase, power } => jurik::jurik(series, length, phase, power),
    }
}

/// Derived sub-length, at least one bar.
#[inline]
fn at_least_one(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap_or(NonZero::<usize>::MIN)
}
