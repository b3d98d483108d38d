//! Gateway configuration, loadable from JSON.

use crate::domain::fee::FeeSchedule;
use crate::domain::simulation::SimulationProfile;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Latency windows, failure rates and fee table of a gateway.
///
/// Every section is optional in JSON; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub payment: SimulationProfile,
    pub status: SimulationProfile,
    pub refund: SimulationProfile,
    pub fees: FeeSchedule,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            payment: SimulationProfile::payment(),
            status: SimulationProfile::status(),
            refund: SimulationProfile::refund(),
            fees: FeeSchedule::standard(),
        }
    }
}

impl GatewayConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::ConfigError(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
