//! Portfolio struct and core methods.

use std::collections::HashSet;

use bondvar_core::{CombinedTable, Date, MissingPolicy};
use bondvar_risk::distribution::ReturnDistribution;
use bondvar_risk::dv01::{compute_dv01, Dv01Summary};
use bondvar_risk::var::{
    calc_var, validate_confidence, MonteCarloSettings, VarMethod, VarReport, VarResult,
};
use bondvar_risk::RiskResult;
use bondvar_traits::{SeriesField, SeriesSource};

use crate::alignment::build_combined_table;
use crate::hydration::{HydratedSeries, HydrationFailure, PartialHydrationReport};
use crate::instrument::BondIndex;
use crate::state::ComputedState;
use crate::{PortfolioError, PortfolioResult};

/// Default history window, in calendar days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 730;

/// Engine parameters carried by a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskSettings {
    /// Monte Carlo path count and seed.
    pub monte_carlo: MonteCarloSettings,
    /// Cap on the number of instruments DV01 covers; `None` covers all.
    pub dv01_instrument_limit: Option<usize>,
}

/// A named, weighted basket of bond indices over a date window.
///
/// The combined table is built on first use and cached until
/// [`Portfolio::invalidate`] or a hydration that attaches new data.
/// Every operation runs inside the portfolio's `tracing` span.
///
/// # Example
///
/// ```rust
/// use bondvar_core::{Date, TimeSeries};
/// use bondvar_portfolio::{BondIndex, Portfolio};
/// use bondvar_risk::var::VarMethod;
///
/// let d = |day| Date::from_ymd(2024, 1, day).unwrap();
/// let yields: TimeSeries = (2..=6).map(|i| (d(i), 4.0 + f64::from(i) / 100.0)).collect();
/// let prices: TimeSeries = [(d(2), 100.0), (d(3), 98.0), (d(4), 99.0), (d(5), 100.0), (d(6), 102.0)]
///     .into_iter()
///     .collect();
///
/// let index = BondIndex::new("AAA", "Y", "P", 1.0)
///     .with_yield_series(yields)
///     .with_price_series(prices);
/// let mut portfolio = Portfolio::builder("Demo")
///     .start_date(d(1))
///     .end_date(d(31))
///     .instrument(index)
///     .build()
///     .unwrap();
///
/// // four returns: the 80% threshold is the worst one
/// let var = portfolio.calc_portfolio_var(80.0, VarMethod::Historical).unwrap();
/// assert!((var - (-0.02)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Portfolio {
    name: String,
    instruments: Vec<BondIndex>,
    start_date: Date,
    end_date: Date,
    missing_policy: MissingPolicy,
    risk_settings: RiskSettings,
    state: ComputedState,
    span: tracing::Span,
}

impl Portfolio {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> super::PortfolioBuilder {
        super::PortfolioBuilder::new().name(name)
    }

    pub(crate) fn from_parts(
        name: String,
        instruments: Vec<BondIndex>,
        start_date: Date,
        end_date: Date,
        missing_policy: MissingPolicy,
        risk_settings: RiskSettings,
    ) -> PortfolioResult<Self> {
        if instruments.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }
        if start_date > end_date {
            return Err(PortfolioError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        let mut seen = HashSet::new();
        for index in &instruments {
            if !seen.insert(index.name()) {
                return Err(PortfolioError::DuplicateInstrument {
                    name: index.name().to_string(),
                });
            }
            if !index.weight().is_finite() {
                return Err(PortfolioError::InvalidWeight {
                    name: index.name().to_string(),
                    value: index.weight(),
                });
            }
        }

        let span = tracing::info_span!("portfolio", name = %name);
        Ok(Self {
            name,
            instruments,
            start_date,
            end_date,
            missing_policy,
            risk_settings,
            state: ComputedState::Uncomputed,
            span,
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Portfolio name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instruments in portfolio order.
    pub fn instruments(&self) -> &[BondIndex] {
        &self.instruments
    }

    /// Mutable access to the instruments.
    ///
    /// The cached table is left untouched; call [`Self::invalidate`] after
    /// changing weights or series.
    pub fn instruments_mut(&mut self) -> &mut [BondIndex] {
        &mut self.instruments
    }

    /// First date of the history window.
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Last date of the history window.
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// How missing contributions enter the aggregates.
    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing_policy
    }

    /// Engine parameters.
    pub fn risk_settings(&self) -> &RiskSettings {
        &self.risk_settings
    }

    /// The portfolio's logging span.
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    /// Returns true if every instrument has both series attached.
    pub fn is_fully_hydrated(&self) -> bool {
        self.instruments.iter().all(BondIndex::is_hydrated)
    }

    // =========================================================================
    // HYDRATION
    // =========================================================================

    /// Fetches every absent series from `source` for
    /// `[start_date, end_date]`, one at a time.
    ///
    /// A failed fetch is logged and recorded; the remaining fetches still
    /// run. Attaching any new data drops the cached table.
    pub fn hydrate<S: SeriesSource + ?Sized>(&mut self, source: &S) -> PartialHydrationReport {
        let span = self.span.clone();
        let _enter = span.enter();

        let mut report = PartialHydrationReport::default();
        for index in &mut self.instruments {
            for field in [SeriesField::Yield, SeriesField::Price] {
                if index.series(field).is_some() {
                    report.already_present += 1;
                    continue;
                }
                let series_id = index.series_id(field).clone();
                match source.get_series(&series_id, self.start_date, self.end_date) {
                    Ok(series) => {
                        tracing::info!(
                            instrument = index.name(),
                            %field,
                            %series_id,
                            observations = series.len(),
                            "hydrated series"
                        );
                        report.fetched.push(HydratedSeries {
                            instrument: index.name().to_string(),
                            series_id,
                            field,
                            observations: series.len(),
                        });
                        index.attach(field, series);
                    }
                    Err(error) => {
                        tracing::error!(
                            instrument = index.name(),
                            %field,
                            %series_id,
                            %error,
                            "failed to hydrate series"
                        );
                        report.failures.push(HydrationFailure {
                            instrument: index.name().to_string(),
                            series_id,
                            field,
                            error,
                        });
                    }
                }
            }
        }

        if report.attached_any() && self.state.invalidate() {
            tracing::debug!("new series attached, combined table dropped");
        }
        if !report.is_complete() {
            tracing::warn!(
                failures = report.failures.len(),
                "portfolio is only partially hydrated"
            );
        }
        report
    }

    // =========================================================================
    // COMBINED TABLE
    // =========================================================================

    /// Returns the combined table, building it on first use.
    pub fn combined_table(&mut self) -> RiskResult<&CombinedTable> {
        self.table_mut().map(|t| &*t)
    }

    /// Returns the combined table only if it has already been built.
    pub fn cached_table(&self) -> Option<&CombinedTable> {
        self.state.get()
    }

    /// Drops the cached table so the next access rebuilds it.
    pub fn invalidate(&mut self) {
        if self.state.invalidate() {
            let _enter = self.span.enter();
            tracing::debug!("combined table invalidated");
        }
    }

    fn table_mut(&mut self) -> RiskResult<&mut CombinedTable> {
        let span = self.span.clone();
        let _enter = span.enter();

        let instruments = &self.instruments;
        let policy = self.missing_policy;
        Ok(self
            .state
            .get_or_try_init(|| build_combined_table(instruments, policy))?)
    }

    // =========================================================================
    // RISK
    // =========================================================================

    /// Portfolio VaR at `cint` percent: the signed threshold return.
    ///
    /// `cint` is validated before the table is built.
    pub fn calc_portfolio_var(&mut self, cint: f64, method: VarMethod) -> RiskResult<f64> {
        self.calc_portfolio_var_result(cint, method).map(|r| r.value)
    }

    /// Like [`Self::calc_portfolio_var`] with a textual method selector.
    ///
    /// Fails with `InvalidParameter` for a bad `cint` before looking at
    /// the selector, then with `UnsupportedMethod` for an unknown one.
    pub fn calc_portfolio_var_named(&mut self, cint: f64, method: &str) -> RiskResult<f64> {
        validate_confidence(cint)?;
        let method: VarMethod = method.parse()?;
        self.calc_portfolio_var(cint, method)
    }

    /// Portfolio VaR with its metadata.
    pub fn calc_portfolio_var_result(
        &mut self,
        cint: f64,
        method: VarMethod,
    ) -> RiskResult<VarResult> {
        validate_confidence(cint)?;
        let settings = self.risk_settings.monte_carlo;
        let span = self.span.clone();
        let _enter = span.enter();

        let result = calc_var(self.table_mut()?, cint, method, &settings)?;
        tracing::info!(%method, cint, value = result.value, "portfolio VaR");
        Ok(result)
    }

    /// VaR for each confidence level under both methods.
    pub fn var_report(&mut self, confidence_levels: &[f64]) -> RiskResult<VarReport> {
        for &cint in confidence_levels {
            validate_confidence(cint)?;
        }
        let settings = self.risk_settings.monte_carlo;
        let span = self.span.clone();
        let _enter = span.enter();

        VarReport::compute(self.table_mut()?, confidence_levels, &VarMethod::ALL, &settings)
    }

    /// Moments of the aggregate return series.
    pub fn return_distribution(&mut self) -> RiskResult<ReturnDistribution> {
        let span = self.span.clone();
        let _enter = span.enter();
        ReturnDistribution::from_table(self.table_mut()?)
    }

    /// Adds a DV01 column for each instrument (up to the configured cap)
    /// to the cached table. Returns the instruments covered.
    pub fn calc_portfolio_dv01(&mut self) -> RiskResult<Vec<String>> {
        let span = self.span.clone();
        let _enter = span.enter();

        let names: Vec<String> = self.instruments.iter().map(|i| i.name().to_string()).collect();
        let limit = self.risk_settings.dv01_instrument_limit;
        compute_dv01(self.table_mut()?, &names, limit)
    }

    /// Computes DV01 and returns the rows fit for display.
    pub fn dv01_summary(&mut self) -> RiskResult<Dv01Summary> {
        self.calc_portfolio_dv01()?;
        let span = self.span.clone();
        let _enter = span.enter();
        Dv01Summary::from_table(self.table_mut()?)
    }

    // =========================================================================
    // REWEIGHTING
    // =========================================================================

    /// A copy of this portfolio under a new name and weights, sharing the
    /// hydrated series. The copy starts with no cached table.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::WeightCountMismatch` if `weights` does not
    /// have one entry per instrument.
    pub fn with_weights(&self, name: impl Into<String>, weights: &[f64]) -> PortfolioResult<Self> {
        if weights.len() != self.instruments.len() {
            return Err(PortfolioError::WeightCountMismatch {
                expected: self.instruments.len(),
                actual: weights.len(),
            });
        }
        let instruments = self
            .instruments
            .iter()
            .zip(weights)
            .map(|(index, &weight)| {
                let mut index = index.clone();
                index.set_weight(weight);
                index
            })
            .collect();
        Self::from_parts(
            name.into(),
            instruments,
            self.start_date,
            self.end_date,
            self.missing_policy,
            self.risk_settings,
        )
    }
}
