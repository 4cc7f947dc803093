use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, Result};
use crate::payment::EXTRA_INTEREST_RATE;

/// Environment variable that overrides [`BaseRateConfig::base_url`].
pub const BASE_URL_ENV_VAR: &str = "BOE_API_URL";

/// Bank of England interactive statistical database.
pub const DEFAULT_BASE_URL: &str = "https://www.bankofengland.co.uk/boeapps/iadb";
/// CSV download page of the statistical database.
pub const DEFAULT_ENDPOINT: &str = "fromshowcolumns.asp";
/// Bank of England official Bank Rate series.
pub const DEFAULT_SERIES_CODE: &str = "IUMABEDR";

/// Settings for a calculation and its base rate lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Percentage points added to the rate for the affordability check.
    pub stress_margin: f64,
    /// Where the published base rate is read from.
    pub base_rate: BaseRateConfig,
}

/// Location of the published base rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseRateConfig {
    /// Root URL of the statistics service, with or without a trailing `/`.
    pub base_url: String,
    /// Path of the CSV download under `base_url`.
    pub endpoint: String,
    /// Statistical series to request. Lines starting with it are CSV headers.
    pub series_code: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            stress_margin: EXTRA_INTEREST_RATE,
            base_rate: BaseRateConfig::default(),
        }
    }
}

impl Default for BaseRateConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            series_code: DEFAULT_SERIES_CODE.to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with overrides taken from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, which maps a variable name to its value.
    /// Blank values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV_VAR).filter(|url| !url.trim().is_empty()) {
            self.base_rate.base_url = url;
        }
        self
    }

    /// Checks that the margin is a non-negative number and the URL and series are set.
    pub fn validate(&self) -> Result<()> {
        if !self.stress_margin.is_finite() || self.stress_margin < 0.0 {
            return Err(MortgageError::Config(format!(
                "stress margin must be a non-negative number, got {}",
                self.stress_margin
            )));
        }
        if self.base_rate.base_url.trim().is_empty() {
            return Err(MortgageError::Config("base rate url cannot be empty".to_string()));
        }
        if self.base_rate.series_code.trim().is_empty() {
            return Err(MortgageError::Config("series code cannot be empty".to_string()));
        }
        Ok(())
    }
}
