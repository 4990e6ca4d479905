//! Application configuration.

use crate::error::{EngineError, EngineResult};
use chrono::{NaiveDate, NaiveTime};
use orbs_detector::DetectorConfig;
use orbs_risk::RiskConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session calendar and opening-window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Regular session open (UTC). Default: 13:30 (US equity open).
    #[serde(default = "default_session_open")]
    pub open: NaiveTime,
    /// Regular session close (UTC). Default: 20:00.
    #[serde(default = "default_session_close")]
    pub close: NaiveTime,
    /// Opening-range window length in minutes. Default: 30.
    #[serde(default = "default_opening_window_minutes")]
    pub opening_window_minutes: i64,
    /// Full-day market closures.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

fn default_session_open() -> NaiveTime {
    NaiveTime::from_hms_opt(13, 30, 0).expect("valid time")
}

fn default_session_close() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).expect("valid time")
}

fn default_opening_window_minutes() -> i64 {
    orbs_session::DEFAULT_OPENING_WINDOW_MINUTES
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            open: default_session_open(),
            close: default_session_close(),
            opening_window_minutes: default_opening_window_minutes(),
            holidays: Vec::new(),
        }
    }
}

/// Engine runtime tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-instrument tick queue depth. Default: 1024.
    #[serde(default = "default_tick_queue_capacity")]
    pub tick_queue_capacity: usize,
    /// Alert dispatch queue depth. Default: 256.
    #[serde(default = "default_alert_queue_capacity")]
    pub alert_queue_capacity: usize,
    /// Wall-clock interval for window/close checks (ms). Default: 1,000.
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,
}

fn default_tick_queue_capacity() -> usize {
    1024
}

fn default_alert_queue_capacity() -> usize {
    256
}

fn default_check_interval_ms() -> u64 {
    1_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_queue_capacity: default_tick_queue_capacity(),
            alert_queue_capacity: default_alert_queue_capacity(),
            check_interval_ms: default_check_interval_ms(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load() -> EngineResult<Self> {
        let config_path =
            std::env::var("ORBS_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections.
    pub fn validate(&self) -> EngineResult<()> {
        if self.session.open >= self.session.close {
            return Err(EngineError::Config(format!(
                "session open {} is not before close {}",
                self.session.open, self.session.close
            )));
        }
        if self.session.opening_window_minutes < 1 {
            return Err(EngineError::Config(format!(
                "opening_window_minutes must be at least 1, got {}",
                self.session.opening_window_minutes
            )));
        }
        if self.engine.tick_queue_capacity == 0 || self.engine.alert_queue_capacity == 0 {
            return Err(EngineError::Config(
                "queue capacities must be positive".to_string(),
            ));
        }
        self.detector.validate()?;
        self.risk.validate()?;
        Ok(())
    }
}
