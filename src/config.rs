use serde::Deserialize;

use crate::error::ConfigError;
use crate::services::savings_estimator::{DiscountSchedule, SavingsEstimator, Tariff};

fn default_host() -> String { "0.0.0.0".to_string() }

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub tariff: Tariff,
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PricingConfig {
    #[serde(flatten)]
    pub schedule: DiscountSchedule,
    /// Single discount for all months; overrides the tiered rates when set
    #[serde(default)]
    pub flat_rate: Option<f64>,
}

impl PricingConfig {
    pub fn schedule(&self) -> DiscountSchedule {
        match self.flat_rate {
            Some(rate) => DiscountSchedule::flat(rate),
            None => self.schedule.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(path, &content)
    }

    fn from_json(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn estimator(&self) -> SavingsEstimator {
        SavingsEstimator::new(self.tariff.clone(), self.pricing.schedule())
    }
}
