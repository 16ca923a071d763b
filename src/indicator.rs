use crate::{Context, PriceSource, Series, Signal};

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (lengths, smoothing variant, price source). Configs are value types:
/// cheap to clone, compare, and hash. [`Default`] gives the conventional
/// parameters; chained setters adjust them.
pub trait IndicatorConfig: Sized + Clone + Default + PartialEq + Eq + Hash + Display + Debug {
    /// Price source the indicator reads from the [`Context`].
    fn source(&self) -> PriceSource;
}

/// Designator of the indicator that populated a [`Context`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndicatorName {
    AcceleratorOscillator,
    AlligatorIndex,
    AroonOscillator,
    AwesomeOscillator,
    ChoppinessIndex,
    CommodityChannelIndex,
    IchimokuCloud,
    JmaRsxClone,
    StochasticOscillator,
    Trix,
    UlcerIndex,
    WilliamsR,
}

impl Display for IndicatorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Everything one indicator run produces.
///
/// `outputs` holds every named series; `primary` is the series exposed as
/// [`PriceSource::Custom`] to the next indicator. Multi-line indicators may
/// leave `primary` empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndicatorOutput {
    pub name: IndicatorName,
    pub outputs: BTreeMap<&'static str, Series>,
    pub primary: Series,
    pub signals: Vec<Signal>,
}

impl IndicatorOutput {
    #[must_use]
    pub fn new(name: IndicatorName, signals: Vec<Signal>) -> Self {
        Self {
            name,
            outputs: BTreeMap::new(),
            primary: Series::new(),
            signals,
        }
    }

    /// Adds a named series.
    #[must_use]
    pub fn with_output(mut self, key: &'static str, series: Series) -> Self {
        self.outputs.insert(key, series);
        self
    }

    /// Adds a named series and makes it the primary one.
    #[must_use]
    pub fn with_primary(mut self, key: &'static str, series: Series) -> Self {
        self.primary = series.clone();
        self.outputs.insert(key, series);
        self
    }

    #[must_use]
    pub fn output(&self, key: &str) -> Option<&Series> {
        self.outputs.get(key)
    }
}

/// A technical indicator over a fully materialized [`Context`].
///
/// [`calculate`](Indicator::calculate) is pure: it reads the context and
/// returns a fresh [`IndicatorOutput`] without touching the context.
/// [`Context::apply`] stores the result.
///
/// # Example
///
/// ```
/// use quantedge_core::{AwesomeOscillator, Context, Indicator, IndicatorName};
/// # use quantedge_core::{Ohlcv, Price};
/// # use rust_decimal::Decimal;
/// #
/// # struct Bar(i64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { Decimal::from(self.0) }
/// #     fn high(&self) -> Price { Decimal::from(self.0 + 1) }
/// #     fn low(&self) -> Price { Decimal::from(self.0 - 1) }
/// #     fn close(&self) -> Price { Decimal::from(self.0) }
/// # }
///
/// let bars: Vec<Bar> = (1..=40).map(Bar).collect();
/// let ctx = Context::from_bars(&bars);
///
/// let ao = AwesomeOscillator::default();
/// let output = ao.calculate(&ctx);
///
/// assert_eq!(output.name, IndicatorName::AwesomeOscillator);
/// assert_eq!(output.signals.len(), 40);
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// The config this indicator was created with.
    fn config(&self) -> &Self::Config;

    /// Computes the indicator over every bar of `ctx`.
    fn calculate(&self, ctx: &Context) -> IndicatorOutput;
}
