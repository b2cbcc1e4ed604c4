//! Model provider seam: the trained classifier behind `predict` / `predict_proba`.

#[cfg(feature = "onnx")]
mod onnx;

#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;

use crate::config::ModelConfig;
use ndarray::{Array2, ArrayView2};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("unexpected model output: {0}")]
    Shape(String),
}

/// A loaded binary classifier. Implementations must tolerate concurrent calls,
/// serializing internally if the backend needs exclusive access.
pub trait ModelProvider: Send + Sync {
    /// Hard class decision per row.
    fn predict(&self, batch: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError>;

    /// `[P(class 0), P(class 1)]` per row.
    fn predict_proba(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError>;

    /// Class decisions and probabilities for the same batch. Backends that
    /// produce both from one inference pass should override this.
    fn predict_both(
        &self,
        batch: ArrayView2<'_, f64>,
    ) -> Result<(Vec<i64>, Array2<f64>), ModelError> {
        let probs = self.predict_proba(batch)?;
        let labels = self.predict(batch)?;
        Ok((labels, probs))
    }
}

/// Shared, read-only model. `None` means no model was loaded.
pub type ModelHandle = Option<Arc<dyn ModelProvider>>;

/// Load the configured model once at startup. A failed load yields `None`
/// (every prediction then reports the model as unavailable) unless
/// `config.required` is set, in which case the error is returned.
pub fn load(config: &ModelConfig) -> Result<ModelHandle, ModelError> {
    match open(config) {
        Ok(model) => Ok(Some(model)),
        Err(e) if !config.required => {
            error!(path = %config.path.display(), error = %e, "model unavailable; predictions disabled");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(feature = "onnx")]
fn open(config: &ModelConfig) -> Result<Arc<dyn ModelProvider>, ModelError> {
    let model = OnnxModel::load(&config.path, &config.label_output, &config.probability_output)?;
    Ok(Arc::new(model))
}

#[cfg(not(feature = "onnx"))]
fn open(config: &ModelConfig) -> Result<Arc<dyn ModelProvider>, ModelError> {
    if !config.path.exists() {
        return Err(ModelError::NotFound(config.path.clone()));
    }
    Err(ModelError::Load(
        "built without the `onnx` feature; no model backend available".to_string(),
    ))
}
