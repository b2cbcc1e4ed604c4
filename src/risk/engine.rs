//! Maps the model's positive-class probability onto five ordinal risk levels.

use crate::config::RiskConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RiskLevel {
    VeryLow = 1,
    LowModerate = 2,
    Moderate = 3,
    High = 4,
    VeryHigh = 5,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::VeryLow,
        RiskLevel::LowModerate,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    /// Bucket test is `p <= bound`, so a boundary value lands in the lower level.
    pub fn from_probability(p: f64, config: &RiskConfig) -> Self {
        if p <= config.very_low_max {
            RiskLevel::VeryLow
        } else if p <= config.low_moderate_max {
            RiskLevel::LowModerate
        } else if p <= config.moderate_max {
            RiskLevel::Moderate
        } else if p <= config.high_max {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::LowModerate => "Low-Moderate",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> u8 {
        level.as_u8()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRiskLevel(pub u8);

impl fmt::Display for InvalidRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "risk level must be 1..=5, got {}", self.0)
    }
}

impl std::error::Error for InvalidRiskLevel {}

impl TryFrom<u8> for RiskLevel {
    type Error = InvalidRiskLevel;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        RiskLevel::ALL
            .get(usize::from(n).wrapping_sub(1))
            .copied()
            .ok_or(InvalidRiskLevel(n))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn level(&self, probability: f64) -> RiskLevel {
        RiskLevel::from_probability(probability, &self.config)
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}
