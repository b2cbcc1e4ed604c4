//! Risk classifier facade: input record → feature vector → model → risk level.

use super::engine::{RiskEngine, RiskLevel};
use crate::features::{FeatureNormalizer, FeatureVector, InputRecord};
use crate::model::{ModelError, ModelHandle, ModelProvider};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("model not loaded")]
    ModelUnavailable,

    #[error("prediction failed: {0}")]
    PredictionFailure(String),
}

impl From<ModelError> for ClassifyError {
    fn from(e: ModelError) -> Self {
        ClassifyError::PredictionFailure(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probability: f64,
    pub class: u8,
    pub risk_level: RiskLevel,
}

pub struct RiskClassifier {
    normalizer: FeatureNormalizer,
    engine: RiskEngine,
    model: ModelHandle,
}

impl RiskClassifier {
    pub fn new(normalizer: FeatureNormalizer, engine: RiskEngine, model: ModelHandle) -> Self {
        Self {
            normalizer,
            engine,
            model,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    pub fn normalizer(&self) -> &FeatureNormalizer {
        &self.normalizer
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    pub fn classify(&self, input: &InputRecord) -> Result<PredictionResult, ClassifyError> {
        let model = self.model.as_deref().ok_or(ClassifyError::ModelUnavailable)?;

        let vector = self.normalizer.assemble(input);
        info!(vector = ?vector.as_slice(), "input vector");

        let (probability, class) = infer(model, &vector)?;
        let risk_level = self.engine.level(probability);
        info!(class, probability, risk_level = risk_level.as_u8(), "prediction");

        Ok(PredictionResult {
            probability,
            class,
            risk_level,
        })
    }
}

fn infer(model: &dyn ModelProvider, vector: &FeatureVector) -> Result<(f64, u8), ClassifyError> {
    let batch = vector.to_batch();

    let (labels, probs) = model.predict_both(batch.view())?;
    if probs.nrows() < 1 || probs.ncols() < 2 {
        return Err(ClassifyError::PredictionFailure(format!(
            "expected [1, 2] probability output, got {:?}",
            probs.shape()
        )));
    }
    let probability = probs[[0, 1]];
    if !probability.is_finite() {
        return Err(ClassifyError::PredictionFailure(format!(
            "non-finite probability {probability}"
        )));
    }

    let class = match labels.first() {
        Some(&label @ (0 | 1)) => label as u8,
        Some(other) => {
            return Err(ClassifyError::PredictionFailure(format!(
                "class label {other} is not binary"
            )))
        }
        None => {
            return Err(ClassifyError::PredictionFailure(
                "model returned no class label".to_string(),
            ))
        }
    };

    Ok((probability, class))
}
