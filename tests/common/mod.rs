//! Stub model provider shared by the integration tests.

#![allow(dead_code)]

use health_risk::features::FeatureNormalizer;
use health_risk::model::{ModelError, ModelProvider};
use health_risk::risk::{RiskClassifier, RiskEngine};
use ndarray::{Array2, ArrayView2};
use std::sync::{Arc, Mutex};

/// Returns a fixed positive-class probability and records every batch it sees.
pub struct StubModel {
    pub probability: f64,
    pub fail: bool,
    pub seen: Mutex<Vec<Vec<f64>>>,
}

impl StubModel {
    pub fn with_probability(probability: f64) -> Arc<Self> {
        Arc::new(Self {
            probability,
            fail: false,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            probability: 0.0,
            fail: true,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn last_row(&self) -> Vec<f64> {
        self.seen.lock().unwrap().last().cloned().expect("no batch submitted")
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl ModelProvider for StubModel {
    fn predict(&self, batch: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        if self.fail {
            return Err(ModelError::Inference("stub failure".into()));
        }
        Ok(vec![i64::from(self.probability > 0.5); batch.nrows()])
    }

    fn predict_proba(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        if self.fail {
            return Err(ModelError::Shape("stub expects 18 columns".into()));
        }
        self.seen
            .lock()
            .unwrap()
            .extend(batch.rows().into_iter().map(|r| r.to_vec()));
        Ok(Array2::from_shape_fn((batch.nrows(), 2), |(_, j)| {
            if j == 1 {
                self.probability
            } else {
                1.0 - self.probability
            }
        }))
    }
}

pub fn classifier_with(model: Arc<StubModel>) -> RiskClassifier {
    let model: Arc<dyn ModelProvider> = model;
    RiskClassifier::new(FeatureNormalizer::default(), RiskEngine::default(), Some(model))
}

pub fn classifier_without_model() -> RiskClassifier {
    RiskClassifier::new(FeatureNormalizer::default(), RiskEngine::default(), None)
}
