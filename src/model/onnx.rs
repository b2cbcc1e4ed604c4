//! ONNX Runtime backend for a scikit-learn classifier exported with
//! `zipmap=False`. Input: `[n, 18]` f32. Outputs: an int64 label tensor `[n]`
//! and a float probability tensor `[n, 2]`.

use super::{ModelError, ModelProvider};
use ndarray::{Array2, ArrayView2};
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

pub struct OnnxModel {
    // `Session::run` takes `&mut self`; concurrent requests queue on this lock.
    session: Mutex<Session>,
    input_name: String,
    label_output: String,
    probability_output: String,
}

impl OnnxModel {
    pub fn load(
        path: &Path,
        label_output: &str,
        probability_output: &str,
    ) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let builder = Session::builder().map_err(|e| ModelError::Load(e.to_string()))?;
        let session = builder
            .commit_from_file(path)
            .map_err(|e| ModelError::Load(e.to_string()))?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| "input".to_string());

        info!(path = %path.display(), input = %input_name, "ONNX model loaded");
        Ok(Self {
            session: Mutex::new(session),
            input_name,
            label_output: label_output.to_string(),
            probability_output: probability_output.to_string(),
        })
    }

    fn run(&self, batch: ArrayView2<'_, f64>) -> Result<(Vec<i64>, Array2<f64>), ModelError> {
        let (rows, cols) = batch.dim();
        let data: Vec<f32> = batch.iter().map(|&v| v as f32).collect();
        let input = Tensor::from_array(([rows as i64, cols as i64], data.into_boxed_slice()))
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let labels = outputs
            .get(self.label_output.as_str())
            .ok_or_else(|| ModelError::Shape(format!("missing output '{}'", self.label_output)))?;
        let (_, label_data) = labels
            .try_extract_tensor::<i64>()
            .map_err(|e| ModelError::Shape(format!("{}: {e}", self.label_output)))?;
        let labels = label_data.to_vec();

        let probs = outputs.get(self.probability_output.as_str()).ok_or_else(|| {
            ModelError::Shape(format!("missing output '{}'", self.probability_output))
        })?;
        let (shape, prob_data) = probs
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Shape(format!("{}: {e}", self.probability_output)))?;
        let dims: &[i64] = shape;
        if dims.len() != 2 {
            return Err(ModelError::Shape(format!(
                "probability output has shape {dims:?}, expected [n, classes]"
            )));
        }
        let probs = Array2::from_shape_vec(
            (dims[0] as usize, dims[1] as usize),
            prob_data.iter().map(|&p| f64::from(p)).collect(),
        )
        .map_err(|e| ModelError::Shape(e.to_string()))?;

        Ok((labels, probs))
    }
}

impl ModelProvider for OnnxModel {
    fn predict(&self, batch: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        self.run(batch).map(|(labels, _)| labels)
    }

    fn predict_proba(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        self.run(batch).map(|(_, probs)| probs)
    }

    fn predict_both(
        &self,
        batch: ArrayView2<'_, f64>,
    ) -> Result<(Vec<i64>, Array2<f64>), ModelError> {
        self.run(batch)
    }
}
