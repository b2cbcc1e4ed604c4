//! Risk tiering and the classifier facade.

mod classifier;
mod engine;

pub use classifier::{ClassifyError, PredictionResult, RiskClassifier};
pub use engine::{InvalidRiskLevel, RiskEngine, RiskLevel};
