//! Service configuration: JSON file with defaults, plus environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Trained classifier location and output names
    pub model: ModelConfig,
    /// HTTP listener
    pub server: ServerConfig,
    /// Probability → risk level bounds
    pub risk: RiskConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the exported ONNX classifier
    pub path: PathBuf,
    /// Output holding the hard class decision
    pub label_output: String,
    /// Output holding `[P(0), P(1)]` per row
    pub probability_output: String,
    /// Refuse to start when the model cannot be loaded
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Inclusive upper bounds of risk levels 1 to 4; anything above `high_max` is level 5.
///
/// The defaults are the bounds the deployed classifier's levels were calibrated
/// against. Overriding them changes what each level means for that model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub very_low_max: f64,
    pub low_moderate_max: f64,
    pub moderate_max: f64,
    pub high_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("risk bounds must be strictly increasing within (0, 1): {0:?}")]
    RiskBounds([f64; 4]),

    #[error("model output names must not be empty")]
    EmptyOutputName,

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("model.onnx"),
            label_output: "label".to_string(),
            probability_output: "probabilities".to_string(),
            required: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7860,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            very_low_max: 0.30,
            low_moderate_max: 0.45,
            moderate_max: 0.60,
            high_max: 0.80,
        }
    }
}

impl RiskConfig {
    pub fn bounds(&self) -> [f64; 4] {
        [
            self.very_low_max,
            self.low_moderate_max,
            self.moderate_max,
            self.high_max,
        ]
    }

    /// True when the bounds are the calibrated defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = self.bounds();
        let in_range = b.iter().all(|v| *v > 0.0 && *v < 1.0);
        let increasing = b.windows(2).all(|w| w[0] < w[1]);
        if in_range && increasing {
            Ok(())
        } else {
            Err(ConfigError::RiskBounds(b))
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; otherwise return default. A file that
    /// exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `PORT` and `HEALTH_RISK_MODEL_PATH` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = var("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(path) = var("HEALTH_RISK_MODEL_PATH").filter(|p| !p.is_empty()) {
            self.model.path = PathBuf::from(path);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.label_output.is_empty() || self.model.probability_output.is_empty() {
            return Err(ConfigError::EmptyOutputName);
        }
        self.risk.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_take_port_and_model_path() {
        let env: HashMap<&str, &str> =
            [("PORT", "8080"), ("HEALTH_RISK_MODEL_PATH", "/srv/model.onnx")].into();
        let c = ServiceConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(c.server.port, 8080);
        assert_eq!(c.model.path, PathBuf::from("/srv/model.onnx"));
    }

    #[test]
    fn bad_port_override_is_ignored() {
        let c = ServiceConfig::default()
            .with_overrides(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(c.server.port, 7860);
    }

    #[test]
    fn risk_bounds_validation() {
        assert!(RiskConfig::default().validate().is_ok());
        let unordered = RiskConfig {
            moderate_max: 0.40,
            ..RiskConfig::default()
        };
        assert!(unordered.validate().is_err());
        let out_of_range = RiskConfig {
            high_max: 1.0,
            ..RiskConfig::default()
        };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn overridden_bounds_are_detected() {
        assert!(RiskConfig::default().is_default());
        let shifted = RiskConfig {
            very_low_max: 0.25,
            ..RiskConfig::default()
        };
        assert!(shifted.validate().is_ok());
        assert!(!shifted.is_default());
    }
}
