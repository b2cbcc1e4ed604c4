//! Normalization benchmark: client record → 18-value feature vector.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use health_risk::features::{FeatureNormalizer, InputRecord};
use serde_json::json;

fn sample_record() -> InputRecord {
    [
        ("General_Health", json!("Very_Good")),
        ("Checkup", json!("1-2 years")),
        ("Exercise", json!(1)),
        ("Skin_Cancer", json!("off")),
        ("Other_Cancer", json!(false)),
        ("Depression", json!("no")),
        ("Diabetes", json!("Borderline")),
        ("Arthritis", json!("on")),
        ("Sex", json!("1")),
        ("Age", json!("54")),
        ("Height", json!(178)),
        ("Weight", json!(84.5)),
        ("BMI", json!(26.7)),
        ("Smoking", json!(0)),
        ("Alcohol", json!(4)),
        ("Fruit", json!(30)),
        ("Green_Vegetables", json!(12)),
        ("Fried_Potato", json!(8)),
    ]
    .into_iter()
    .collect()
}

fn bench_assemble(c: &mut Criterion) {
    let normalizer = FeatureNormalizer::default();
    let full = sample_record();
    let empty = InputRecord::new();

    c.bench_function("assemble_full_record", |b| {
        b.iter(|| normalizer.assemble(black_box(&full)))
    });
    c.bench_function("assemble_empty_record", |b| {
        b.iter(|| normalizer.assemble(black_box(&empty)))
    });
}

fn bench_single_field(c: &mut Criterion) {
    let normalizer = FeatureNormalizer::default();
    let mut g = c.benchmark_group("normalize_field");
    for (field, value) in [
        ("Age", json!(61)),
        ("General_Health", json!("Fair")),
        ("Sex", json!(1.0)),
        ("Depression", json!("yes")),
    ] {
        g.bench_function(field, |b| {
            b.iter(|| normalizer.normalize(black_box(&value), black_box(field)))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_assemble, bench_single_field);
criterion_main!(benches);
