use std::num::NonZero;

use rust_decimal::Decimal;

use crate::{Series, Value};

/// Recurrence `out = prev + α·(in − prev)`, seeded with the first input.
///
/// Shared by every exponential variant. Adaptive filters pass a fresh α on
/// each bar through [`push_with`](ExponentialFilter::push_with).
#[derive(Clone, Debug)]
pub(crate) struct ExponentialFilter {
    alpha: Value,
    value: Option<Value>,
}

impl ExponentialFilter {
    pub(crate) fn new(alpha: Value) -> Self {
        Self { alpha, value: None }
    }

    /// `α = 2 / (length + 1)`.
    pub(crate) fn exponential(length: NonZero<usize>) -> Self {
        Self::new(Decimal::TWO / Decimal::from(length.get() + 1))
    }

    /// `α = 1 / length`.
    pub(crate) fn wilder(length: NonZero<usize>) -> Self {
        Self::new(Decimal::ONE / Decimal::from(length.get()))
    }

    #[inline]
    pub(crate) fn alpha(&self) -> Value {
        self.alpha
    }

    #[inline]
    pub(crate) fn push(&mut self, input: Value) -> Value {
        self.push_with(input, self.alpha)
    }

    #[inline]
    pub(crate) fn push_with(&mut self, input: Value, alpha: Value) -> Value {
        let next = match self.value {
            Some(prev) => prev + alpha * (input - prev),
            None => input,
        };
        self.value = Some(next);
        next
    }

    pub(crate) fn smooth(mut self, series: &Series) -> Series {
        series.iter().map(|&v| self.push(v)).collect()
    }
}

pub(super) fn exponential(series: &Series, length: NonZero<usize>) -> Series {
    ExponentialFilter::exponential(length).smooth(series)
}

pub(super) fn wilder(series: &Series, length: NonZero<usize>) -> Series {
    ExponentialFilter::wilder(length).smooth(series)
}

/// `N` EMAs chained, each fed by the output of the one before.
fn cascade<const N: usize>(series: &Series, length: NonZero<usize>) -> [Series; N] {
    let mut previous = series.clone();
    std::array::from_fn(|_| {
        previous = exponential(&previous, length);
        previous.clone()
    })
}

pub(super) fn double(series: &Series, length: NonZero<usize>) -> Series {
    let [e1, e2] = cascade(series, length);
    e1.zip_with(&e2, |a, b| Decimal::TWO * a - b)
}

pub(super) fn triple(series: &Series, length: NonZero<usize>) -> Series {
    let [e1, e2, e3] = cascade(series, length);
    let three = Decimal::from(3);

    (0..series.len())
        .map(|i| three * (e1.get(i) - e2.get(i)) + e3.get(i))
        .collect()
}

pub(super) fn zero_lag(series: &Series, length: NonZero<usize>) -> Series {
    let lag = (length.get() - 1) / 2;
    let delagged: Series = (0..series.len())
        .map(|i| Decimal::TWO * series.get(i) - series.get(i.saturating_sub(lag)))
        .collect();

    exponential(&delagged, length)
}

/// Tillson blend of EMA³ through EMA⁶; the four weights sum to one.
pub(super) fn t3(series: &Series, length: NonZero<usize>, volume_factor: Value) -> Series {
    let [_, _, e3, e4, e5, e6] = cascade(series, length);

    let v = volume_factor;
    let v2 = v * v;
    let v3 = v2 * v;
    let three = Decimal::from(3);
    let six = Decimal::from(6);

    let c1 = -v3;
    let c2 = three * v2 + three * v3;
    let c3 = -six * v2 - three * v - three * v3;
    let c4 = Decimal::ONE + three * v + v3 + three * v2;

    (0..series.len())
        .map(|i| c1 * e6.get(i) + c2 * e5.get(i) + c3 * e4.get(i) + c4 * e3.get(i))
        .collect()
}
