//! Health-risk prediction service.
//!
//! Modular structure:
//! - [`features`]: Canonical feature set, encodings and input normalization
//! - [`model`]: Model provider seam and ONNX backend
//! - [`risk`]: Probability tiering and classifier facade
//! - [`server`]: HTTP routes
//! - [`logging`]: Structured JSON logging

pub mod config;
pub mod features;
pub mod logging;
pub mod model;
pub mod risk;
pub mod server;

pub use config::ServiceConfig;
pub use features::{Feature, FeatureNormalizer, FeatureTable, FeatureVector, InputRecord};
pub use logging::StructuredLogger;
pub use model::{ModelError, ModelHandle, ModelProvider};
pub use risk::{ClassifyError, PredictionResult, RiskClassifier, RiskEngine, RiskLevel};
