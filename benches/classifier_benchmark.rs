use criterion::{black_box, criterion_group, criterion_main, Criterion};
use msgclass::{advise, ArtifactStore, Category, Classifier, CountVectorizer, LinearModel, Pipeline, Vectorizer};
use std::path::PathBuf;

fn setup_benchmark_classifier() -> Classifier {
    let store = ArtifactStore::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts"));
    Classifier::load(&store).unwrap()
}

fn bench_vectorization(c: &mut Criterion) {
    let vectorizer = CountVectorizer::from_vocabulary(["otp", "bill", "parcel", "recharge"]).unwrap();
    let mut group = c.benchmark_group("Vectorization");

    // Configure sampling
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("short_text", |b| b.iter(|| {
        vectorizer.transform(black_box("Your OTP is 482913")).unwrap()
    }));

    group.bench_function("long_text", |b| b.iter(|| {
        vectorizer.transform(black_box(
            "Dear customer, your electricity bill for the month of March is now available. \
             Pay before the due date to avoid disconnection. Your parcel has also been \
             dispatched and a recharge offer is waiting for you in the app."
        )).unwrap()
    }));

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Classification");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    let pipeline = Pipeline::new(setup_benchmark_classifier());
    group.bench_function("bundled_artifacts", |b| b.iter(|| {
        pipeline.handle(black_box("Thank you for your purchase. Amount debited from account")).unwrap()
    }));

    group.bench_function("advise_only", |b| b.iter(|| {
        advise(Category::Transactional, black_box("pay your recharge bill"))
    }));

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scaling");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Scaling with vocabulary size
    for &size in &[100usize, 1_000, 10_000] {
        let terms: Vec<String> = (0..size).map(|i| format!("term{}", i)).collect();
        let classifier = Classifier::builder()
            .with_vectorizer(CountVectorizer::from_vocabulary(terms).unwrap())
            .with_model(LinearModel::new(
                (0..7).collect(),
                (0..7).map(|c| (0..size).map(|i| ((i + c) % 7) as f32).collect()).collect(),
                vec![],
            ).unwrap())
            .build()
            .unwrap();

        group.bench_function(format!("vocabulary_{}", size), |b| b.iter(|| {
            classifier.classify(black_box("term1 term42 term99 something else")).unwrap()
        }));
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_vectorization,
    bench_classification,
    bench_scaling
);
criterion_main!(benches);
