//! Top-level configuration document and file loading.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use bondvar_portfolio::{Portfolio, WeightingScenario};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::portfolio::{InstrumentConfig, PortfolioConfig};
use crate::risk::RiskConfig;
use crate::scenario::ScenarioConfig;

/// On-disk configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON (`.json`).
    Json,
    /// TOML (`.toml`).
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension, ignoring case.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Returns the string identifier for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to run an analysis: the basket, the engine settings
/// and the weighting scenarios.
///
/// # Example
///
/// ```rust
/// use bondvar_config::{BondVarConfig, ConfigFormat, Validate};
///
/// let config = BondVarConfig::standard();
/// assert!(config.is_valid());
///
/// let text = config.to_string_as(ConfigFormat::Toml).unwrap();
/// let back = BondVarConfig::from_str_as(&text, ConfigFormat::Toml).unwrap();
/// assert_eq!(back, config);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondVarConfig {
    /// The basket.
    pub portfolio: PortfolioConfig,

    /// Engine settings.
    #[serde(default)]
    pub risk: RiskConfig,

    /// Weighting scenarios, run in order.
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

impl Default for BondVarConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl BondVarConfig {
    /// The ICE BofA AAA / BBB / BB / CCC basket, equally weighted over
    /// the last two years, with the four standard weighting scenarios.
    pub fn standard() -> Self {
        let instruments = vec![
            InstrumentConfig::new("AAA", "BAMLC0A1CAAAEY", "BAMLCC0A1AAATRIV", 0.25),
            InstrumentConfig::new("BBB", "BAMLC0A4CBBBEY", "BAMLCC0A4BBBTRIV", 0.25),
            InstrumentConfig::new("BB", "BAMLH0A1HYBBEY", "BAMLHYH0A1BBTRIV", 0.25),
            InstrumentConfig::new("CCC", "BAMLH0A3HYCEY", "BAMLHYH0A3CMTRIV", 0.25),
        ];
        let scenarios = vec![
            ScenarioConfig::new("Equal Weight", vec![0.25, 0.25, 0.25, 0.25]),
            ScenarioConfig::new("Overweight IG", vec![0.5, 0.25, 0.15, 0.10]),
            ScenarioConfig::new("Overweight HY", vec![0.1, 0.15, 0.25, 0.5]),
            ScenarioConfig::new("Overweight BBB, BB", vec![0.1, 0.4, 0.4, 0.1]),
        ];
        Self {
            portfolio: PortfolioConfig::new("Equal Weight", instruments),
            risk: RiskConfig::standard(),
            scenarios,
        }
    }

    /// Parses a document.
    pub fn from_str_as(text: &str, format: ConfigFormat) -> ConfigResult<Self> {
        Ok(match format {
            ConfigFormat::Json => serde_json::from_str(text)?,
            ConfigFormat::Toml => toml::from_str(text)?,
        })
    }

    /// Serializes the document.
    pub fn to_string_as(&self, format: ConfigFormat) -> ConfigResult<String> {
        Ok(match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        })
    }

    /// Reads and validates a JSON or TOML file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Fails on an unknown extension, an unreadable or malformed file, or
    /// any validation error.
    pub fn load_from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = Self::from_str_as(&text, format)?;
        config.validate_or_error()?;
        tracing::debug!(
            path = %path.display(),
            %format,
            portfolio = %config.portfolio.name,
            scenarios = config.scenarios.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Writes the document as JSON or TOML, chosen by extension.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let text = self.to_string_as(ConfigFormat::from_path(path)?)?;
        fs::write(path, text).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Builds the configured, unhydrated portfolio.
    pub fn build_portfolio(&self) -> ConfigResult<Portfolio> {
        Ok(self.portfolio.builder(&self.risk).build()?)
    }

    /// The runtime weighting scenarios, in order.
    pub fn weighting_scenarios(&self) -> Vec<WeightingScenario> {
        self.scenarios.iter().map(ScenarioConfig::to_scenario).collect()
    }
}

impl Validate for BondVarConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = self
            .portfolio
            .validate()
            .into_iter()
            .map(|e| e.nested("portfolio"))
            .collect();
        errors.extend(self.risk.validate().into_iter().map(|e| e.nested("risk")));

        let expected = self.portfolio.instruments.len();
        for (i, scenario) in self.scenarios.iter().enumerate() {
            let parent = format!("scenarios[{i}]");
            errors.extend(scenario.validate().into_iter().map(|e| e.nested(&parent)));
            if !scenario.weights.is_empty() && scenario.weights.len() != expected {
                errors.push(
                    ValidationError::with_rule(
                        "weights",
                        format!(
                            "Expected {expected} weights, got {}",
                            scenario.weights.len()
                        ),
                        "one_weight_per_instrument",
                    )
                    .nested(&parent),
                );
            }
        }

        errors
    }
}
