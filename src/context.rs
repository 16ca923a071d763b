use std::collections::BTreeMap;

use tracing::debug;

use crate::{Indicator, IndicatorName, IndicatorOutput, Ohlcv, PriceSource, Series, Signal};

/// Input series, outputs and signals threaded through an indicator
/// computation.
///
/// Built once from bars. Raw components and derived prices are
/// materialized up front. Each [`apply`](Context::apply) replaces the
/// outputs of the previous indicator, and the primary series it produced
/// becomes readable as [`PriceSource::Custom`], so indicators chain.
///
/// # Example
///
/// ```
/// use quantedge_core::{Context, Indicator, PriceSource, Trix, TrixConfig, WilliamsR};
/// # use quantedge_core::{Ohlcv, Price};
/// # use rust_decimal::Decimal;
/// #
/// # struct Bar(i64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { Decimal::from(self.0) }
/// #     fn high(&self) -> Price { Decimal::from(self.0 + 2) }
/// #     fn low(&self) -> Price { Decimal::from(self.0 - 2) }
/// #     fn close(&self) -> Price { Decimal::from(self.0) }
/// # }
///
/// let bars: Vec<Bar> = (0..30).map(|i| Bar(100 + i % 7)).collect();
/// let mut ctx = Context::from_bars(&bars);
///
/// ctx.apply(&WilliamsR::default());
/// assert!(ctx.output("Williams%R").is_some());
///
/// // TRIX of Williams %R
/// ctx.apply(&Trix::new(TrixConfig::default().with_source(PriceSource::Custom)));
/// assert!(ctx.output("Williams%R").is_none());
/// assert_eq!(ctx.custom().len(), 30);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context {
    open: Series,
    high: Series,
    low: Series,
    close: Series,
    volume: Series,
    typical: Series,
    median: Series,
    weighted_close: Series,
    full_typical: Series,
    outputs: BTreeMap<&'static str, Series>,
    custom: Series,
    signals: Vec<Signal>,
    indicator: Option<IndicatorName>,
}

impl Context {
    #[must_use]
    pub fn from_bars(bars: &[impl Ohlcv]) -> Self {
        let extract = |source: PriceSource| -> Series {
            bars.iter().map(|bar| source.extract(bar)).collect()
        };

        let ctx = Self {
            open: extract(PriceSource::Open),
            high: extract(PriceSource::High),
            low: extract(PriceSource::Low),
            close: extract(PriceSource::Close),
            volume: extract(PriceSource::Volume),
            typical: extract(PriceSource::Typical),
            median: extract(PriceSource::Median),
            weighted_close: extract(PriceSource::WeightedClose),
            full_typical: extract(PriceSource::FullTypical),
            ..Self::default()
        };

        debug!(bars = ctx.len(), "context built");
        ctx
    }

    /// Input series for `source`.
    ///
    /// [`PriceSource::Custom`] reads the primary output of the last applied
    /// indicator, which is empty until something has been applied.
    #[must_use]
    pub fn series(&self, source: PriceSource) -> &Series {
        match source {
            PriceSource::Open => &self.open,
            PriceSource::High => &self.high,
            PriceSource::Low => &self.low,
            PriceSource::Close => &self.close,
            PriceSource::Volume => &self.volume,
            PriceSource::Typical => &self.typical,
            PriceSource::Median => &self.median,
            PriceSource::WeightedClose => &self.weighted_close,
            PriceSource::FullTypical => &self.full_typical,
            PriceSource::Custom => &self.custom,
        }
    }

    /// Runs `indicator` over this context and stores its output.
    pub fn apply(&mut self, indicator: &impl Indicator) -> &mut Self {
        let output = indicator.calculate(self);
        debug!(
            indicator = %output.name,
            config = %indicator,
            outputs = ?output.outputs.keys().collect::<Vec<_>>(),
            "indicator applied"
        );
        self.store(output)
    }

    /// Replaces outputs, primary series, signals and designator with
    /// `output`.
    pub fn store(&mut self, output: IndicatorOutput) -> &mut Self {
        self.outputs = output.outputs;
        self.custom = output.primary;
        self.signals = output.signals;
        self.indicator = Some(output.name);
        self
    }

    /// Writes one named series alongside the current outputs, replacing any
    /// series already stored under `name`.
    ///
    /// The custom source, signals and designator are left as they are, and
    /// the next [`store`](Context::store) clears the series with the rest.
    pub fn set_output(&mut self, name: &'static str, series: Series) -> &mut Self {
        debug!(name, bars = series.len(), "output set");
        self.outputs.insert(name, series);
        self
    }

    /// Named output of the last applied indicator.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&Series> {
        self.outputs.get(name)
    }

    #[must_use]
    pub fn outputs(&self) -> &BTreeMap<&'static str, Series> {
        &self.outputs
    }

    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    #[must_use]
    pub fn indicator(&self) -> Option<IndicatorName> {
        self.indicator
    }

    /// Primary output of the last applied indicator.
    #[must_use]
    pub fn custom(&self) -> &Series {
        &self.custom
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.close.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}
