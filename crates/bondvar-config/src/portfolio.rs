//! Portfolio and instrument configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use bondvar_core::Date;
use bondvar_portfolio::{BondIndex, PortfolioBuilder, DEFAULT_LOOKBACK_DAYS};

use crate::error::{Validate, ValidationError};
use crate::risk::RiskConfig;

/// One bond index of the basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Instrument name, unique within the portfolio.
    pub name: String,
    /// Series id of the effective yield, in percent.
    pub yield_series: String,
    /// Series id of the total-return price index.
    pub price_series: String,
    /// Portfolio weight.
    pub weight: f64,
}

impl InstrumentConfig {
    /// Creates an instrument configuration.
    pub fn new(
        name: impl Into<String>,
        yield_series: impl Into<String>,
        price_series: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            yield_series: yield_series.into(),
            price_series: price_series.into(),
            weight,
        }
    }

    /// The unhydrated instrument.
    pub fn to_bond_index(&self) -> BondIndex {
        BondIndex::new(
            self.name.as_str(),
            self.yield_series.as_str(),
            self.price_series.as_str(),
            self.weight,
        )
    }
}

impl Validate for InstrumentConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }
        if self.yield_series.is_empty() {
            errors.push(ValidationError::new("yield_series", "Series id cannot be empty"));
        }
        if self.price_series.is_empty() {
            errors.push(ValidationError::new("price_series", "Series id cannot be empty"));
        }
        if !self.weight.is_finite() {
            errors.push(ValidationError::with_rule(
                "weight",
                "Weight must be finite",
                "finite_weight",
            ));
        }

        errors
    }
}

fn default_lookback_days() -> i64 {
    DEFAULT_LOOKBACK_DAYS
}

/// A named basket and its history window.
///
/// Without explicit dates the window ends today and reaches back
/// `lookback_days` calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Portfolio name.
    pub name: String,

    /// First date of the history window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,

    /// Last date of the history window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    /// Window length when `start_date` is absent.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    /// Instruments in portfolio order.
    pub instruments: Vec<InstrumentConfig>,
}

impl PortfolioConfig {
    /// Creates a portfolio configuration with the default window.
    pub fn new(name: impl Into<String>, instruments: Vec<InstrumentConfig>) -> Self {
        Self {
            name: name.into(),
            start_date: None,
            end_date: None,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            instruments,
        }
    }

    /// Builder method to set an explicit window.
    #[must_use]
    pub fn with_window(mut self, start: Date, end: Date) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Weights in instrument order.
    pub fn weights(&self) -> Vec<f64> {
        self.instruments.iter().map(|i| i.weight).collect()
    }

    /// A portfolio builder carrying this basket and `risk`'s settings.
    pub fn builder(&self, risk: &RiskConfig) -> PortfolioBuilder {
        let mut builder = PortfolioBuilder::new()
            .name(self.name.as_str())
            .lookback_days(self.lookback_days)
            .instruments(self.instruments.iter().map(InstrumentConfig::to_bond_index))
            .missing_policy(risk.missing_policy)
            .risk_settings(risk.to_risk_settings());
        if let Some(start) = self.start_date {
            builder = builder.start_date(start);
        }
        if let Some(end) = self.end_date {
            builder = builder.end_date(end);
        }
        builder
    }
}

impl Validate for PortfolioConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        if self.instruments.is_empty() {
            errors.push(ValidationError::with_rule(
                "instruments",
                "At least one instrument is required",
                "non_empty_instruments",
            ));
        }

        let mut seen = HashSet::new();
        for (i, instrument) in self.instruments.iter().enumerate() {
            let parent = format!("instruments[{i}]");
            errors.extend(instrument.validate().into_iter().map(|e| e.nested(&parent)));
            if !seen.insert(instrument.name.as_str()) {
                errors.push(
                    ValidationError::with_rule(
                        "name",
                        format!("Duplicate instrument name '{}'", instrument.name),
                        "unique_names",
                    )
                    .nested(&parent),
                );
            }
        }

        if self.lookback_days <= 0 {
            errors.push(ValidationError::with_rule(
                "lookback_days",
                "Lookback must be positive",
                "positive_lookback",
            ));
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                errors.push(ValidationError::with_rule(
                    "start_date",
                    format!("Start date {start} is after end date {end}"),
                    "ordered_window",
                ));
            }
        }

        errors
    }
}
