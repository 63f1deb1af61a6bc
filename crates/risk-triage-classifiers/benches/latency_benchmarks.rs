//! Latency benchmarks for the single-shot pipeline
//!
//! Measures vectorization and dual-model prediction over a synthetic
//! vocabulary sized like a small production TF-IDF model.
//!
//! Run with: cargo bench -p risk-triage-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use risk_triage_classifiers::{
    LinearClassifier, LinearModelSpec, LogisticRegressionSpec, MultiClass, RiskPipeline,
    TfidfSpec, TfidfVectorizer,
};
use risk_triage_core::InputText;
use serde_json::json;

const VOCABULARY_SIZE: usize = 5_000;

fn build_pipeline() -> RiskPipeline {
    let vocabulary: serde_json::Map<String, serde_json::Value> = (0..VOCABULARY_SIZE)
        .map(|i| (format!("term{}", i), json!(i)))
        .collect();

    let tfidf: TfidfSpec = serde_json::from_value(json!({
        "vocabulary": vocabulary,
        "idf": vec![1.0f64; VOCABULARY_SIZE],
        "ngram_range": [1, 2]
    }))
    .expect("Failed to build tfidf spec");

    let coef = |rows: usize| -> Vec<Vec<f64>> {
        (0..rows)
            .map(|r| {
                (0..VOCABULARY_SIZE)
                    .map(|c| ((r * 31 + c * 17) % 13) as f64 / 13.0 - 0.5)
                    .collect()
            })
            .collect()
    };

    let risk = LogisticRegressionSpec {
        linear: LinearModelSpec {
            classes: vec!["High".into(), "Low".into(), "Medium".into()],
            coef: coef(3),
            intercept: vec![0.0; 3],
        },
        multi_class: MultiClass::Auto,
    };

    let action = LinearModelSpec {
        classes: vec!["FieldVisit".into(), "LegalAction".into(), "Reminder".into()],
        coef: coef(3),
        intercept: vec![0.1, -0.1, 0.0],
    };

    RiskPipeline::new(
        Box::new(TfidfVectorizer::from_spec("tfidf", tfidf).expect("Failed to build vectorizer")),
        Box::new(LinearClassifier::logistic_regression("risk", risk).expect("Failed to build risk model")),
        Box::new(LinearClassifier::linear_svc("action", action).expect("Failed to build action model")),
    )
}

fn benchmark_pipeline(c: &mut Criterion) {
    let pipeline = build_pipeline();

    let test_cases = vec![
        ("short", "term1 term2 term3".to_string()),
        (
            "medium",
            (0..50).map(|i| format!("term{}", i * 7)).collect::<Vec<_>>().join(" "),
        ),
        (
            "long",
            (0..500).map(|i| format!("term{}", i * 3)).collect::<Vec<_>>().join(" "),
        ),
    ];

    let mut group = c.benchmark_group("Risk_Pipeline");
    group.sample_size(100);

    for (name, text) in test_cases {
        let input = InputText::new(&text).expect("non-empty input");

        group.bench_with_input(BenchmarkId::new("vectorize", name), &input, |b, input| {
            b.iter(|| pipeline.vectorize(black_box(input)).unwrap())
        });

        let features = pipeline.vectorize(&input).unwrap();
        group.bench_with_input(BenchmarkId::new("predict", name), &features, |b, features| {
            b.iter(|| pipeline.predict(black_box(features)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("classify", name), &input, |b, input| {
            b.iter(|| pipeline.classify(black_box(input)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_pipeline);
criterion_main!(benches);
