//! Rolling window statistics.
//!
//! For bar `i` and length `n` the window is `series[max(0, i-n+1) ..= i]`:
//! it grows until `n` bars have accumulated, then slides. Partial windows at
//! the start of a series produce real partial statistics.
//!
//! Extrema are maintained incrementally with monotonic deques. Sums are
//! accumulated left to right over the window while it fills and re-summed
//! from the ring buffer once it slides, so every statistic is exactly equal
//! to recomputing it from the trailing slice, including values that carry
//! the full 28 digits of `Decimal`.

use std::{collections::VecDeque, num::NonZero};

use rust_decimal::Decimal;

use crate::{Series, Value, ring_buffer::RingBuffer};

/// Running sum over the trailing `length` values.
#[derive(Clone, Debug)]
pub(crate) struct RollingSum {
    window: RingBuffer,
    sum: Value,
}

impl RollingSum {
    pub(crate) fn new(length: NonZero<usize>) -> Self {
        Self {
            window: RingBuffer::new(length.get()),
            sum: Decimal::ZERO,
        }
    }

    /// Adds `value` to the window and returns the updated sum.
    ///
    /// Subtracting the evicted value would round differently from the
    /// trailing sum, so a sliding window is re-summed oldest first.
    #[inline]
    pub(crate) fn push(&mut self, value: Value) -> Value {
        match self.window.push(value) {
            Some(_) => self.sum = self.window.iter().sum(),
            None => self.sum += value,
        }
        self.sum
    }

    /// Number of values in the window (grows to `length`, then stays).
    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.window.len()
    }

    #[inline]
    pub(crate) fn average(&self) -> Value {
        match self.count() {
            0 => Decimal::ZERO,
            n => self.sum / Decimal::from(n),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Extremum {
    Max,
    Min,
}

/// Sliding-window extremum backed by a monotonic deque of `(index, value)`.
///
/// Entries dominated by a newer value (including equal ones) are dropped, so
/// the front always holds the most recent index of the extremum.
#[derive(Clone, Debug)]
pub(crate) struct MonotonicWindow {
    length: usize,
    kind: Extremum,
    deque: VecDeque<(usize, Value)>,
}

impl MonotonicWindow {
    fn new(length: NonZero<usize>, kind: Extremum) -> Self {
        Self {
            length: length.get(),
            kind,
            deque: VecDeque::with_capacity(length.get()),
        }
    }

    pub(crate) fn max(length: NonZero<usize>) -> Self {
        Self::new(length, Extremum::Max)
    }

    pub(crate) fn min(length: NonZero<usize>) -> Self {
        Self::new(length, Extremum::Min)
    }

    /// Adds the value at `index` and returns `(position, value)` of the
    /// window extremum. Indices must be pushed in increasing order.
    #[inline]
    pub(crate) fn push(&mut self, index: usize, value: Value) -> (usize, Value) {
        while let Some(&(_, back)) = self.deque.back() {
            let dominated = match self.kind {
                Extremum::Max => back <= value,
                Extremum::Min => back >= value,
            };
            if !dominated {
                break;
            }
            self.deque.pop_back();
        }
        self.deque.push_back((index, value));

        while let Some(&(front, _)) = self.deque.front() {
            if front + self.length > index {
                break;
            }
            self.deque.pop_front();
        }

        // The value just pushed can only leave by being dominated, which
        // requires a later push, so the deque is non-empty here.
        self.deque.front().copied().unwrap_or((index, value))
    }
}

/// Rolling maximum and minimum of one series.
///
/// # Example
///
/// ```
/// use quantedge_core::{Series, rolling_max_min};
/// use rust_decimal_macros::dec;
/// use std::num::NonZero;
///
/// let s = Series::from(vec![dec!(3), dec!(1), dec!(4), dec!(1), dec!(5)]);
/// let (max, min) = rolling_max_min(&s, NonZero::new(2).unwrap());
///
/// assert_eq!(max.as_slice(), &[dec!(3), dec!(3), dec!(4), dec!(4), dec!(5)]);
/// assert_eq!(min.as_slice(), &[dec!(3), dec!(1), dec!(1), dec!(1), dec!(1)]);
/// ```
#[must_use]
pub fn rolling_max_min(series: &Series, length: NonZero<usize>) -> (Series, Series) {
    rolling_high_low(series, series, length)
}

/// Rolling maximum of `high` and rolling minimum of `low`.
///
/// The usual highest-high / lowest-low pair. Both inputs are read
/// index-aligned; the result length is that of `high`.
#[must_use]
pub fn rolling_high_low(high: &Series, low: &Series, length: NonZero<usize>) -> (Series, Series) {
    let mut max_window = MonotonicWindow::max(length);
    let mut min_window = MonotonicWindow::min(length);
    let mut highest = Series::with_capacity(high.len());
    let mut lowest = Series::with_capacity(high.len());

    for i in 0..high.len() {
        highest.push(max_window.push(i, high.get(i)).1);
        lowest.push(min_window.push(i, low.get(i)).1);
    }

    (highest, lowest)
}

/// Absolute bar index of the rolling maximum and minimum.
///
/// Ties resolve to the most recent index, which is what time-since-extremum
/// indicators (Aroon and friends) expect.
#[must_use]
pub fn rolling_extremum_positions(
    series: &Series,
    length: NonZero<usize>,
) -> (Vec<usize>, Vec<usize>) {
    let mut max_window = MonotonicWindow::max(length);
    let mut min_window = MonotonicWindow::min(length);

    series
        .iter()
        .enumerate()
        .map(|(i, &v)| (max_window.push(i, v).0, min_window.push(i, v).0))
        .unzip()
}

/// Rolling sum over the trailing `length` values.
///
/// # Example
///
/// ```
/// use quantedge_core::{Series, rolling_sum};
/// use rust_decimal_macros::dec;
/// use std::num::NonZero;
///
/// let s = Series::from(vec![dec!(1), dec!(2), dec!(3), dec!(4)]);
/// let sum = rolling_sum(&s, NonZero::new(3).unwrap());
///
/// assert_eq!(sum.as_slice(), &[dec!(1), dec!(3), dec!(6), dec!(9)]);
/// ```
#[must_use]
pub fn rolling_sum(series: &Series, length: NonZero<usize>) -> Series {
    let mut window = RollingSum::new(length);
    series.iter().map(|&v| window.push(v)).collect()
}

/// Rolling mean: the rolling sum divided by the actual number of values in
/// the window, which is below `length` at the start of the series.
#[must_use]
pub fn rolling_average(series: &Series, length: NonZero<usize>) -> Series {
    let mut window = RollingSum::new(length);
    series
        .iter()
        .map(|&v| {
            window.push(v);
            window.average()
        })
        .collect()
}
