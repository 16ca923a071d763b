//! Indicator formulas built on the rolling window engine, the moving average
//! dispatcher and the signal classifier.

mod alligator;
mod aroon;
mod awesome;
mod cci;
mod choppiness;
mod ichimoku;
mod rsx;
mod stochastic;
mod trix;
mod ulcer;
mod williams_r;

pub use alligator::{AlligatorConfig, AlligatorIndex};
pub use aroon::{AroonConfig, AroonOscillator};
pub use awesome::{AcceleratorOscillator, AcConfig, AoConfig, AwesomeOscillator};
pub use cci::{CciConfig, CommodityChannelIndex};
pub use choppiness::{ChoppinessConfig, ChoppinessIndex};
pub use ichimoku::{IchimokuCloud, IchimokuConfig};
pub use rsx::{JmaRsxClone, RsxConfig};
pub use stochastic::{StochasticConfig, StochasticOscillator};
pub use trix::{Trix, TrixConfig};
pub use ulcer::{UlcerConfig, UlcerIndex};
pub use williams_r::{WilliamsR, WilliamsRConfig};

use std::num::NonZero;

use rust_decimal::Decimal;

use crate::{Series, Value};

/// Compile-time window length.
pub(crate) const fn length(n: usize) -> NonZero<usize> {
    match NonZero::new(n) {
        Some(n) => n,
        None => panic!("window length must be at least one"),
    }
}

/// `(x[i] − x[i−1], x[i−1] − x[i−2])`, reading zero before the first bar.
#[inline]
pub(crate) fn slopes(series: &Series, i: usize) -> (Value, Value) {
    let current = series.get(i);
    let previous = series.lookback(i, 1);
    let before = series.lookback(i, 2);
    (current - previous, previous - before)
}

/// `(current − previous) / |previous| · 100`, zero when `previous` is zero
/// or the change does not fit in a `Decimal`.
#[inline]
pub(crate) fn percent_change(current: Value, previous: Value) -> Value {
    current
        .checked_sub(previous)
        .and_then(|change| change.checked_div(previous.abs()))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}
