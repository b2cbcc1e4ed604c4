//! Classification benchmark: normalization + tiering around a constant-output model.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use health_risk::features::{FeatureNormalizer, InputRecord};
use health_risk::model::{ModelError, ModelProvider};
use health_risk::risk::{RiskClassifier, RiskEngine};
use ndarray::{Array2, ArrayView2};
use serde_json::json;
use std::sync::Arc;

struct Constant(f64);

impl ModelProvider for Constant {
    fn predict(&self, batch: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        Ok(vec![i64::from(self.0 > 0.5); batch.nrows()])
    }

    fn predict_proba(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        Ok(Array2::from_shape_fn((batch.nrows(), 2), |(_, j)| {
            if j == 1 {
                self.0
            } else {
                1.0 - self.0
            }
        }))
    }
}

fn bench_classify(c: &mut Criterion) {
    let model: Arc<dyn ModelProvider> = Arc::new(Constant(0.42));
    let classifier = RiskClassifier::new(
        FeatureNormalizer::default(),
        RiskEngine::default(),
        Some(model),
    );
    let input: InputRecord = [
        ("General_Health", json!("Good")),
        ("Age", json!(47)),
        ("BMI", json!("31.2")),
        ("Sex", json!(0)),
    ]
    .into_iter()
    .collect();

    c.bench_function("classify_constant_model", |b| {
        b.iter(|| classifier.classify(black_box(&input)))
    });

    let engine = RiskEngine::default();
    c.bench_function("risk_level_sweep", |b| {
        b.iter(|| {
            (0..=100)
                .map(|i| engine.level(black_box(i as f64 / 100.0)).as_u8() as u32)
                .sum::<u32>()
        })
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
