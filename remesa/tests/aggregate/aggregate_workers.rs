use std::sync::Arc;
use std::time::Duration;

use remesa_mock::{InFlightGauge, MockProvider, fixtures};

use crate::helpers::{builder_with, d, request};

const NAMES: [&str; 6] = ["p0", "p1", "p2", "p3", "p4", "p5"];

fn gauged(gauge: &InFlightGauge) -> Vec<Arc<MockProvider>> {
    NAMES
        .into_iter()
        .map(|n| {
            MockProvider::builder(n)
                .returns(fixtures::provider_b_quote(d("1000")))
                .delay(Duration::from_millis(40))
                .gauge(gauge.clone())
                .build()
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrency_never_exceeds_max_workers() {
    let gauge = InFlightGauge::new();
    let ps = gauged(&gauge);
    let remesa = builder_with(&ps).build().unwrap();
    let req = request().max_workers(2).use_cache(false).build().unwrap();

    let out = remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(out.all_results.len(), NAMES.len());
    assert!(gauge.peak() <= 2, "peak {}", gauge.peak());
    assert!(gauge.peak() >= 1);
    assert_eq!(gauge.current(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn budget_is_capped_by_provider_count() {
    let gauge = InFlightGauge::new();
    let ps = gauged(&gauge);
    let remesa = builder_with(&ps).build().unwrap();
    let req = request().max_workers(64).use_cache(false).build().unwrap();

    let started = std::time::Instant::now();
    let out = remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(out.all_results.len(), NAMES.len());
    assert!(gauge.peak() <= NAMES.len());
    // Six 40ms calls in parallel finish well before six sequential ones would.
    assert!(started.elapsed() < Duration::from_millis(200));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn single_worker_serializes_calls() {
    let gauge = InFlightGauge::new();
    let ps = gauged(&gauge);
    let remesa = builder_with(&ps).build().unwrap();
    let req = request().max_workers(1).use_cache(false).build().unwrap();

    let out = remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(out.all_results.len(), NAMES.len());
    assert_eq!(gauge.peak(), 1);
}
