//! Detector configuration.

use crate::error::{DetectorError, DetectorResult};
use serde::{Deserialize, Serialize};

/// Configuration for breakout confirmation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Number of consecutive ticks beyond the boundary required before an
    /// event fires. 1 means the first breaching tick triggers.
    #[serde(default = "default_confirmation_ticks")]
    pub confirmation_ticks: u32,
}

fn default_confirmation_ticks() -> u32 {
    1
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            confirmation_ticks: default_confirmation_ticks(),
        }
    }
}

impl DetectorConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> DetectorResult<()> {
        if self.confirmation_ticks == 0 {
            return Err(DetectorError::InvalidConfig(
                "confirmation_ticks must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
