use std::num::NonZero;

use rust_decimal::Decimal;

use super::ExponentialFilter;
use crate::{Series, Value, window::RollingSum};

/// Efficiency ratio `|x[i] − x[i−L]| / Σ|x[j] − x[j−1]|` over the partial
/// window. Zero when the window has not moved.
#[derive(Clone, Debug)]
struct EfficiencyRatio {
    length: usize,
    volatility: RollingSum,
}

impl EfficiencyRatio {
    fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            volatility: RollingSum::new(length),
        }
    }

    fn push(&mut self, series: &Series, i: usize) -> Value {
        let step = (series.get(i) - series.get(i.saturating_sub(1))).abs();
        let volatility = self.volatility.push(step);
        let change = (series.get(i) - series.get(i.saturating_sub(self.length))).abs();

        if volatility.is_zero() {
            tracing::trace!(bar = i, "flat window, efficiency ratio set to zero");
            Decimal::ZERO
        } else {
            change / volatility
        }
    }
}

pub(super) fn kaufman(
    series: &Series,
    length: NonZero<usize>,
    fast: NonZero<usize>,
    slow: NonZero<usize>,
) -> Series {
    let fast_alpha = ExponentialFilter::exponential(fast).alpha();
    let slow_alpha = ExponentialFilter::exponential(slow).alpha();

    let mut ratio = EfficiencyRatio::new(length);
    let mut filter = ExponentialFilter::new(slow_alpha);

    (0..series.len())
        .map(|i| {
            let er = ratio.push(series, i);
            let sc = er * (fast_alpha - slow_alpha) + slow_alpha;
            filter.push_with(series.get(i), sc * sc)
        })
        .collect()
}

/// Chande momentum oscillator as a ratio in `[-1, 1]`: net up-moves over
/// total moves in the window. Zero when the window has not moved.
#[derive(Clone, Debug)]
struct ChandeMomentum {
    up: RollingSum,
    down: RollingSum,
}

impl ChandeMomentum {
    fn new(length: NonZero<usize>) -> Self {
        Self {
            up: RollingSum::new(length),
            down: RollingSum::new(length),
        }
    }

    fn push(&mut self, series: &Series, i: usize) -> Value {
        let step = series.get(i) - series.get(i.saturating_sub(1));
        let up = self.up.push(step.max(Decimal::ZERO));
        let down = self.down.push((-step).max(Decimal::ZERO));
        let total = up + down;

        if total.is_zero() {
            tracing::trace!(bar = i, "flat window, momentum set to zero");
            Decimal::ZERO
        } else {
            (up - down) / total
        }
    }
}

pub(super) fn variable_index_dynamic(series: &Series, length: NonZero<usize>) -> Series {
    let mut cmo = ChandeMomentum::new(length);
    let mut filter = ExponentialFilter::exponential(length);

    (0..series.len())
        .map(|i| {
            let alpha = filter.alpha() * cmo.push(series, i).abs();
            filter.push_with(series.get(i), alpha)
        })
        .collect()
}
