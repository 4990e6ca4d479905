//! Risk configuration.

use crate::error::{RiskError, RiskResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stop-loss / take-profit derivation parameters.
///
/// Both multipliers are applied to the opening-range height:
/// - Up: `stop = entry - stop_multiplier * height`,
///   `target = entry + target_multiplier * height`
/// - Down: mirrored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default = "default_stop_multiplier")]
    pub stop_multiplier: Decimal,
    #[serde(default = "default_target_multiplier")]
    pub target_multiplier: Decimal,
}

fn default_stop_multiplier() -> Decimal {
    Decimal::new(5, 1) // 0.5
}

fn default_target_multiplier() -> Decimal {
    Decimal::ONE
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            stop_multiplier: default_stop_multiplier(),
            target_multiplier: default_target_multiplier(),
        }
    }
}

impl RiskConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> RiskResult<()> {
        if self.stop_multiplier <= Decimal::ZERO {
            return Err(RiskError::InvalidRiskParameters(format!(
                "stop_multiplier must be > 0, got {}",
                self.stop_multiplier
            )));
        }
        if self.target_multiplier <= Decimal::ZERO {
            return Err(RiskError::InvalidRiskParameters(format!(
                "target_multiplier must be > 0, got {}",
                self.target_multiplier
            )));
        }
        Ok(())
    }
}
