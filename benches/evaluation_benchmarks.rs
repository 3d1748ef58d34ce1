use criterion::{black_box, criterion_group, criterion_main, Criterion};
use observability_addon::{
    compose, evaluate, FeatureOptions, FeedbackField, FeedbackValue, Fragments, ProbeRegistry,
    ProbeRule, ProbeSpec, ResourceIdentifier,
};

fn evaluation_benchmark(c: &mut Criterion) {
    let registry = ProbeRegistry::new((0..50).map(|i| ProbeSpec {
        identifier: ResourceIdentifier::new("example.io", &format!("kind{}", i), "probe", "default"),
        key: "replicas".to_string(),
        json_path: ".spec.replicas".to_string(),
        rule: ProbeRule::IntegerAtLeast(1),
    }));
    let fields: Vec<FeedbackField> = (0..50)
        .map(|i| {
            FeedbackField::new(ResourceIdentifier::new("example.io", &format!("kind{}", i), "probe", "default"))
                .with_value("replicas", FeedbackValue::Integer(2))
        })
        .collect();

    c.bench_function("evaluate_50_fields", |b| {
        b.iter(|| black_box(evaluate(black_box(&fields), black_box(&registry))))
    });
}

fn compose_benchmark(c: &mut Criterion) {
    let fragments = Fragments::default();
    let opts = FeatureOptions {
        unmanaged_collection_enabled: true,
        default_stack_enabled: true,
        is_hub_cluster: false,
    };

    c.bench_function("compose_values", |b| {
        b.iter(|| black_box(compose(black_box(opts), black_box(&fragments))))
    });
}

criterion_group!(benches, evaluation_benchmark, compose_benchmark);
criterion_main!(benches);
