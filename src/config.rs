//! Configuration management and validation.
//!
//! Provides the validator configuration: comparison tolerances, progress
//! cadence and the extensible allowed-value sets. Configuration is layered:
//! built-in defaults, then an optional JSON file, then CLI overrides.

use crate::app::models::Severity;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_AMOUNT_TOLERANCE, DEFAULT_ESTIMATE_SAMPLE_BYTES,
    DEFAULT_PROGRESS_INTERVAL, DEFAULT_SHARE_TOLERANCE, allowed,
};
use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Allowed-value sets for whitelisted fields
///
/// These are data, not algorithm: a config file can replace any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowedValues {
    pub profiles: Vec<String>,
    pub commercial_models: Vec<String>,
    pub use_types: Vec<String>,
    pub claim_bases: Vec<String>,
    pub territories: Vec<String>,
    pub currencies: Vec<String>,
}

impl Default for AllowedValues {
    fn default() -> Self {
        Self {
            profiles: to_owned_list(allowed::PROFILES),
            commercial_models: to_owned_list(allowed::COMMERCIAL_MODELS),
            use_types: to_owned_list(allowed::USE_TYPES),
            claim_bases: to_owned_list(allowed::CLAIM_BASES),
            territories: to_owned_list(allowed::TERRITORIES),
            currencies: to_owned_list(allowed::CURRENCIES),
        }
    }
}

impl AllowedValues {
    /// Add territories on top of the current set
    pub fn extend_territories<I, S>(&mut self, territories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.territories, territories);
    }

    /// Add currencies on top of the current set
    pub fn extend_currencies<I, S>(&mut self, currencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.currencies, currencies);
    }

    fn all_sets(&self) -> [(&'static str, &Vec<String>); 6] {
        [
            ("profiles", &self.profiles),
            ("commercial_models", &self.commercial_models),
            ("use_types", &self.use_types),
            ("claim_bases", &self.claim_bases),
            ("territories", &self.territories),
            ("currencies", &self.currencies),
        ]
    }
}

/// Global configuration for claim file validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Absolute tolerance for amount comparisons (inclusive)
    pub amount_tolerance: Decimal,

    /// Absolute tolerance for the blended share comparison (inclusive)
    pub share_tolerance: Decimal,

    /// Records between progress notifications
    pub progress_interval: usize,

    /// Bytes sampled to estimate the total line count for pass 1
    pub estimate_sample_bytes: usize,

    /// Severity for record tags outside the supported set
    pub unsupported_record_severity: Severity,

    /// Whitelists for enumerated fields
    pub allowed_values: AllowedValues,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: parse_default_decimal(DEFAULT_AMOUNT_TOLERANCE),
            share_tolerance: parse_default_decimal(DEFAULT_SHARE_TOLERANCE),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            estimate_sample_bytes: DEFAULT_ESTIMATE_SAMPLE_BYTES,
            unsupported_record_severity: Severity::Warning,
            allowed_values: AllowedValues::default(),
        }
    }
}

impl ValidatorConfig {
    /// Set the amount tolerance
    pub fn with_amount_tolerance(mut self, tolerance: Decimal) -> Self {
        self.amount_tolerance = tolerance;
        self
    }

    /// Set the share tolerance
    pub fn with_share_tolerance(mut self, tolerance: Decimal) -> Self {
        self.share_tolerance = tolerance;
        self
    }

    /// Set the progress notification cadence
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Set the sample size for line count estimation
    pub fn with_estimate_sample_bytes(mut self, bytes: usize) -> Self {
        self.estimate_sample_bytes = bytes;
        self
    }

    /// Replace the allowed-value sets
    pub fn with_allowed_values(mut self, allowed_values: AllowedValues) -> Self {
        self.allowed_values = allowed_values;
        self
    }

    /// Check the configuration for values the validator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.amount_tolerance.is_sign_negative() {
            return Err(Error::configuration(format!(
                "Amount tolerance must not be negative, got {}",
                self.amount_tolerance
            )));
        }

        if self.share_tolerance.is_sign_negative() {
            return Err(Error::configuration(format!(
                "Share tolerance must not be negative, got {}",
                self.share_tolerance
            )));
        }

        if self.progress_interval == 0 {
            return Err(Error::configuration(
                "Progress interval must be greater than 0",
            ));
        }

        for (name, values) in self.allowed_values.all_sets() {
            if values.is_empty() {
                return Err(Error::configuration(format!(
                    "Allowed value set '{}' cannot be empty",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Default config file location (`<config dir>/claim-validator/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::serialization(
                format!("Failed to parse config file {}", path.display()),
                e,
            )
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load with layered approach: explicit file, else default file if present, else defaults
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::load_from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn extend_unique<I, S>(target: &mut Vec<String>, values: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for value in values {
        let value = value.into();
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

fn parse_default_decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_default()
}
