use std::fmt::Display;

use rust_decimal::Decimal;

use crate::Value;

/// An ordered, append-only sequence of values aligned by index with the
/// source bars.
///
/// Reads never fail. Any index past the populated length, and any lookback
/// reaching before the first bar, yields zero. Formulas rely on this to read
/// `previous` values at the start of a series without special-casing.
///
/// # Example
///
/// ```
/// use quantedge_core::Series;
/// use rust_decimal_macros::dec;
///
/// let s = Series::from(vec![dec!(1), dec!(2), dec!(3)]);
///
/// assert_eq!(s.get(1), dec!(2));
/// assert_eq!(s.get(10), dec!(0));
/// assert_eq!(s.lookback(0, 1), dec!(0));
/// assert_eq!(s.lookback(2, 2), dec!(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Series(Vec<Value>);

impl Series {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// A series of `len` copies of `value`.
    #[must_use]
    pub fn filled(value: Value, len: usize) -> Self {
        Self(vec![value; len])
    }

    #[inline]
    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index`, or zero when `index` is out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Value {
        self.0.get(index).copied().unwrap_or(Decimal::ZERO)
    }

    /// Value `offset` bars before `index`, or zero when that reaches before
    /// the first bar.
    #[inline]
    #[must_use]
    pub fn lookback(&self, index: usize, offset: usize) -> Value {
        index
            .checked_sub(offset)
            .map_or(Decimal::ZERO, |i| self.get(i))
    }

    /// Last value, or zero for an empty series.
    #[inline]
    #[must_use]
    pub fn last_or_default(&self) -> Value {
        self.0.last().copied().unwrap_or(Decimal::ZERO)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    /// Element-wise combination of two series.
    ///
    /// The result has the length of the longer input; the shorter one reads
    /// as zero past its end.
    #[must_use]
    pub fn zip_with(&self, other: &Series, f: impl Fn(Value, Value) -> Value) -> Series {
        let len = self.len().max(other.len());
        (0..len).map(|i| f(self.get(i), other.get(i))).collect()
    }

    /// Element-wise transform.
    #[must_use]
    pub fn map(&self, f: impl Fn(Value) -> Value) -> Series {
        self.0.iter().map(|&v| f(v)).collect()
    }
}

impl From<Vec<Value>> for Series {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<&[Value]> for Series {
    fn from(values: &[Value]) -> Self {
        Self(values.to_vec())
    }
}

impl FromIterator<Value> for Series {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Series {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Series(len: {})", self.0.len())
    }
}
