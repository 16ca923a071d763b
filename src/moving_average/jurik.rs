//! Jurik adaptive moving average.
//!
//! The smoothing factor follows a relative volatility measured against a
//! pair of adaptive price bands. Fractional powers are evaluated in `f64`
//! and brought back into `Decimal`; the rest of the state stays in
//! `Decimal`.

use std::num::NonZero;

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rust_decimal_macros::dec;

use crate::{Series, Value, window::RollingSum};

const VOLTY_SUM_LENGTH: NonZero<usize> = NonZero::new(10).unwrap();
const VOLTY_AVG_LENGTH: NonZero<usize> = NonZero::new(65).unwrap();

/// `base^exponent` through `f64`, or `fallback` when the result is not
/// representable.
fn powf(base: Value, exponent: f64, fallback: Value) -> Value {
    base.to_f64()
        .map(|b| b.powf(exponent))
        .and_then(Decimal::from_f64)
        .unwrap_or_else(|| {
            tracing::trace!(%base, exponent, "power out of range, using fallback");
            fallback
        })
}

fn from_f64(value: f64, fallback: Value) -> Value {
    Decimal::from_f64(value).unwrap_or(fallback)
}

/// Per-length constants, computed once per call.
#[derive(Clone, Debug)]
struct JurikParams {
    pow1: f64,
    beta: Value,
    band_factor: Value,
    max_ratio: Value,
    phase_ratio: Value,
    power: f64,
}

impl JurikParams {
    #[allow(clippy::cast_precision_loss)]
    fn new(length: NonZero<usize>, phase: Value, power: Value) -> Self {
        let half = 0.5 * (length.get() as f64 - 1.0);
        let len1 = (half.sqrt().log2() + 2.0).max(0.0);
        let pow1 = (len1 - 2.0).max(0.5);
        let len2 = half.sqrt() * len1;

        let beta = 0.45 * (length.get() as f64 - 1.0);
        let beta = beta / (beta + 2.0);

        let phase_ratio = if phase < dec!(-100) {
            dec!(0.5)
        } else if phase > dec!(100) {
            dec!(2.5)
        } else {
            phase / dec!(100) + dec!(1.5)
        };

        Self {
            pow1,
            beta: from_f64(beta, Decimal::ZERO),
            band_factor: from_f64(len2 / (len2 + 1.0), Decimal::ZERO),
            max_ratio: from_f64(len1.powf(1.0 / pow1), Decimal::ONE).max(Decimal::ONE),
            phase_ratio,
            power: power.to_f64().unwrap_or(2.0),
        }
    }
}

#[derive(Clone, Debug)]
struct JurikState {
    params: JurikParams,
    upper_band: Value,
    lower_band: Value,
    volty_sum: RollingSum,
    volty_avg: RollingSum,
    ma1: Value,
    det0: Value,
    det1: Value,
    jma: Value,
}

impl JurikState {
    fn new(params: JurikParams, first: Value) -> Self {
        Self {
            params,
            upper_band: first,
            lower_band: first,
            volty_sum: RollingSum::new(VOLTY_SUM_LENGTH),
            volty_avg: RollingSum::new(VOLTY_AVG_LENGTH),
            ma1: first,
            det0: Decimal::ZERO,
            det1: Decimal::ZERO,
            jma: first,
        }
    }

    /// Updates the bands and returns the adaptive exponent `ratio^pow1`,
    /// where the relative volatility `ratio` is clamped to `[1, max_ratio]`.
    fn adaptive_exponent(&mut self, price: Value) -> f64 {
        let del1 = price - self.upper_band;
        let del2 = price - self.lower_band;
        let volty = if del1.abs() == del2.abs() {
            Decimal::ZERO
        } else {
            del1.abs().max(del2.abs())
        };

        let v_sum = self.volty_sum.push(volty) / Decimal::from(VOLTY_SUM_LENGTH.get());
        self.volty_avg.push(v_sum);
        let avg_volty = self.volty_avg.average();

        let ratio = if avg_volty.is_zero() {
            tracing::trace!("no volatility history, ratio set to one");
            Decimal::ONE
        } else {
            volty / avg_volty
        };
        let ratio = ratio.clamp(Decimal::ONE, self.params.max_ratio);

        let pow2 = ratio.to_f64().unwrap_or(1.0).powf(self.params.pow1);
        let kv = powf(self.params.band_factor, pow2.sqrt(), self.params.band_factor);
        self.upper_band = if del1 > Decimal::ZERO {
            price
        } else {
            price - kv * del1
        };
        self.lower_band = if del2 < Decimal::ZERO {
            price
        } else {
            price - kv * del2
        };

        pow2
    }

    fn push(&mut self, price: Value) -> Value {
        let pow2 = self.adaptive_exponent(price);
        let alpha = powf(self.params.beta, pow2, self.params.beta);
        let beta = self.params.beta;

        self.ma1 = price + alpha * (self.ma1 - price);
        self.det0 = (price - self.ma1) * (Decimal::ONE - beta) + beta * self.det0;
        let ma2 = self.ma1 + self.params.phase_ratio * self.det0;

        let power = self.params.power;
        let gain = powf(Decimal::ONE - alpha, power, Decimal::ONE - alpha);
        let decay = powf(alpha, power, alpha);
        self.det1 = (ma2 - self.jma) * gain + decay * self.det1;
        self.jma += self.det1;
        self.jma
    }
}

pub(super) fn jurik(series: &Series, length: NonZero<usize>, phase: Value, power: Value) -> Series {
    if length.get() == 1 {
        return series.clone();
    }

    let Some(&first) = series.iter().next() else {
        return Series::new();
    };

    let mut state = JurikState::new(JurikParams::new(length, phase, power), first);
    series.iter().map(|&price| state.push(price)).collect()
}
