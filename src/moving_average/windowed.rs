use std::num::NonZero;

use rust_decimal::Decimal;

use super::at_least_one;
use crate::{Series, Value, ring_buffer::RingBuffer, window::rolling_average};

pub(super) fn simple(series: &Series, length: NonZero<usize>) -> Series {
    rolling_average(series, length)
}

/// Linearly weighted window: the oldest value has weight 1, the newest has
/// weight `n`, where `n` is the number of values currently in the window.
///
/// While the window fills, existing weights stay and the newcomer gets
/// weight `n`. Once it slides every weight shifts, and the weighted sum is
/// rebuilt from the buffer in window order.
#[derive(Clone, Debug)]
struct WeightedWindow {
    window: RingBuffer,
    weighted_sum: Value,
}

impl WeightedWindow {
    fn new(length: NonZero<usize>) -> Self {
        Self {
            window: RingBuffer::new(length.get()),
            weighted_sum: Decimal::ZERO,
        }
    }

    fn push(&mut self, value: Value) -> Value {
        match self.window.push(value) {
            Some(_) => {
                self.weighted_sum = self
                    .window
                    .iter()
                    .zip(1u64..)
                    .fold(Decimal::ZERO, |acc, (&v, w)| acc + v * Decimal::from(w));
            }
            None => {
                self.weighted_sum += value * Decimal::from(self.window.len());
            }
        }

        let n = self.window.len();
        let denominator = Decimal::from(n * (n + 1) / 2);
        self.weighted_sum / denominator
    }
}

pub(super) fn weighted(series: &Series, length: NonZero<usize>) -> Series {
    let mut window = WeightedWindow::new(length);
    series.iter().map(|&v| window.push(v)).collect()
}

pub(super) fn triangular(series: &Series, length: NonZero<usize>) -> Series {
    let n = length.get();
    // ⌈(L+1)/2⌉ then ⌊(L+1)/2⌋
    let first = at_least_one((n + 2) / 2);
    let second = at_least_one((n + 1) / 2);

    simple(&simple(series, first), second)
}

pub(super) fn hull(series: &Series, length: NonZero<usize>) -> Series {
    let half = at_least_one(length.get() / 2);
    let root = at_least_one(length.get().isqrt());

    let fast = weighted(series, half);
    let slow = weighted(series, length);
    let raw = fast.zip_with(&slow, |f, s| Decimal::TWO * f - s);

    weighted(&raw, root)
}
