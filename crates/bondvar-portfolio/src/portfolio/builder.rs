//! Portfolio builder for fluent construction.

use bondvar_core::{Date, MissingPolicy};

use super::portfolio::{RiskSettings, DEFAULT_LOOKBACK_DAYS};
use crate::instrument::BondIndex;
use crate::{Portfolio, PortfolioError, PortfolioResult};

/// Builder for constructing a [`Portfolio`].
///
/// The end date defaults to today and the start date to
/// [`DEFAULT_LOOKBACK_DAYS`] before the end date.
///
/// # Example
///
/// ```rust
/// use bondvar_core::{Date, MissingPolicy};
/// use bondvar_portfolio::{BondIndex, PortfolioBuilder};
///
/// let portfolio = PortfolioBuilder::new()
///     .name("Equal Weight")
///     .end_date(Date::from_ymd(2025, 1, 15).unwrap())
///     .instrument(BondIndex::new("AAA", "BAMLC0A1CAAAEY", "BAMLCC0A1AAATRIV", 0.5))
///     .instrument(BondIndex::new("BBB", "BAMLC0A4CBBBEY", "BAMLCC0A4BBBTRIV", 0.5))
///     .missing_policy(MissingPolicy::SkipMissing)
///     .build()
///     .unwrap();
///
/// assert_eq!(portfolio.start_date(), Date::from_ymd(2023, 1, 16).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    name: Option<String>,
    start_date: Option<Date>,
    end_date: Option<Date>,
    lookback_days: Option<i64>,
    instruments: Vec<BondIndex>,
    missing_policy: MissingPolicy,
    risk_settings: RiskSettings,
}

impl PortfolioBuilder {
    /// Creates a new portfolio builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the first date of the history window.
    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the last date of the history window.
    #[must_use]
    pub fn end_date(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the window length used when no start date is given.
    #[must_use]
    pub fn lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = Some(days);
        self
    }

    /// Adds an instrument.
    #[must_use]
    pub fn instrument(mut self, instrument: BondIndex) -> Self {
        self.instruments.push(instrument);
        self
    }

    /// Adds multiple instruments.
    #[must_use]
    pub fn instruments(mut self, instruments: impl IntoIterator<Item = BondIndex>) -> Self {
        self.instruments.extend(instruments);
        self
    }

    /// Sets the missing-value policy for the aggregates.
    #[must_use]
    pub fn missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.missing_policy = policy;
        self
    }

    /// Sets the engine parameters.
    #[must_use]
    pub fn risk_settings(mut self, settings: RiskSettings) -> Self {
        self.risk_settings = settings;
        self
    }

    /// Builds the portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is missing
    /// - There are no instruments, or two share a name
    /// - A weight is not finite
    /// - The start date is after the end date
    pub fn build(self) -> PortfolioResult<Portfolio> {
        let name = self
            .name
            .ok_or_else(|| PortfolioError::missing_field("name"))?;

        let end_date = self.end_date.unwrap_or_else(Date::today);
        let start_date = self.start_date.unwrap_or_else(|| {
            end_date.add_days(-self.lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS))
        });

        Portfolio::from_parts(
            name,
            self.instruments,
            start_date,
            end_date,
            self.missing_policy,
            self.risk_settings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondvar_risk::var::MonteCarloSettings;

    fn index(name: &str, weight: f64) -> BondIndex {
        BondIndex::new(name, format!("{name}Y"), format!("{name}P"), weight)
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_basic_build() {
        let portfolio = PortfolioBuilder::new()
            .name("Test")
            .start_date(date(2024, 1, 1))
            .end_date(date(2024, 6, 30))
            .instrument(index("AAA", 0.6))
            .instrument(index("BBB", 0.4))
            .build()
            .unwrap();

        assert_eq!(portfolio.name(), "Test");
        assert_eq!(portfolio.instruments().len(), 2);
        assert_eq!(portfolio.missing_policy(), MissingPolicy::Propagate);
        assert_eq!(portfolio.risk_settings().monte_carlo, MonteCarloSettings::default());
        assert!(portfolio.cached_table().is_none());
    }

    #[test]
    fn test_default_window() {
        let end = date(2025, 1, 15);
        let portfolio = PortfolioBuilder::new()
            .name("Test")
            .end_date(end)
            .instrument(index("AAA", 1.0))
            .build()
            .unwrap();
        assert_eq!(portfolio.start_date().days_between(&end), 730);

        let portfolio = PortfolioBuilder::new()
            .name("Test")
            .end_date(end)
            .lookback_days(30)
            .instrument(index("AAA", 1.0))
            .build()
            .unwrap();
        assert_eq!(portfolio.start_date(), date(2024, 12, 16));
    }

    #[test]
    fn test_missing_name() {
        let result = PortfolioBuilder::new().instrument(index("AAA", 1.0)).build();
        assert!(result.unwrap_err().to_string().contains("name"));
    }

    #[test]
    fn test_empty_portfolio() {
        let result = PortfolioBuilder::new().name("Empty").build();
        assert_eq!(result.unwrap_err(), PortfolioError::EmptyPortfolio);
    }

    #[test]
    fn test_duplicate_instrument() {
        let result = PortfolioBuilder::new()
            .name("Dup")
            .instruments([index("AAA", 0.5), index("AAA", 0.5)])
            .build();
        assert!(matches!(
            result,
            Err(PortfolioError::DuplicateInstrument { name }) if name == "AAA"
        ));
    }

    #[test]
    fn test_invalid_weight() {
        let result = PortfolioBuilder::new()
            .name("Bad")
            .instrument(index("AAA", f64::NAN))
            .build();
        assert!(matches!(result, Err(PortfolioError::InvalidWeight { .. })));
    }

    #[test]
    fn test_inverted_window() {
        let result = PortfolioBuilder::new()
            .name("Bad")
            .start_date(date(2024, 2, 1))
            .end_date(date(2024, 1, 1))
            .instrument(index("AAA", 1.0))
            .build();
        assert!(matches!(result, Err(PortfolioError::InvalidDateRange { .. })));
    }
}
