use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The number of best-selling products listed per seller unless configured otherwise.
pub const DEFAULT_TOP_PRODUCTS_LIMIT: usize = 10;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default)]
    pub strategies: Strategies,
    #[serde(default)]
    pub logging: Logging,
}

/// Parameters for the report pipeline itself.
#[derive(Debug, Clone, Deserialize)]
pub struct Analysis {
    /// How many products to keep in each seller's top list.
    #[serde(default = "default_top_products_limit")]
    pub top_products_limit: usize,
}

/// Contains the parameter sets for the pluggable calculation strategies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Strategies {
    #[serde(default)]
    pub bonus_by_profit: BonusByProfitParams,
}

/// Rates for the rank-based bonus policy. Each rate is a fraction of profit (0.15 = 15%).
///
/// Rates left out of a source keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BonusByProfitParams {
    /// Paid to the seller ranked first.
    pub first_place_rate: Decimal,
    /// Paid to the sellers ranked second and third.
    pub podium_rate: Decimal,
    /// Paid to everyone else except the last-ranked seller, who gets nothing.
    pub base_rate: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are additionally written to a daily-rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

fn default_top_products_limit() -> usize {
    DEFAULT_TOP_PRODUCTS_LIMIT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            top_products_limit: DEFAULT_TOP_PRODUCTS_LIMIT,
        }
    }
}

impl Default for BonusByProfitParams {
    fn default() -> Self {
        Self {
            first_place_rate: dec!(0.15),
            podium_rate: dec!(0.10),
            base_rate: dec!(0.05),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

impl Config {
    /// Checks the values that deserialization alone cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.top_products_limit == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.top_products_limit must be greater than 0".to_string(),
            ));
        }

        self.strategies.bonus_by_profit.validate()
    }
}

impl BonusByProfitParams {
    /// Every rate must lie in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, rate) in [
            ("first_place_rate", self.first_place_rate),
            ("podium_rate", self.podium_rate),
            ("base_rate", self.base_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigError::ValidationError(format!(
                    "strategies.bonus_by_profit.{name} must be between 0 and 1, got {rate}"
                )));
            }
        }
        Ok(())
    }
}
