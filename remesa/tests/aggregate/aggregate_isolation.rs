use std::sync::Arc;

use remesa::{QuoteProvider, Remesa, SortBy};
use remesa_mock::{MockBehavior, MockProvider, fixtures};

use crate::helpers::{RecordingProvider, builder_with, d, ids, provider_a, provider_b, request, usd_inr};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panicking_provider_becomes_failed_outcome() {
    let boom = MockProvider::builder("boom")
        .behavior(MockBehavior::Panic("index out of bounds".into()))
        .build();
    let remesa = builder_with(&[provider_a(), boom, provider_b()])
        .build()
        .unwrap();
    let req = request().build().unwrap();

    let out = remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(out.all_results.len(), 3);
    assert_eq!(ids(&out.results), vec!["a", "b"]);
    let failed = out.failures().next().unwrap();
    assert_eq!(failed.provider_id, "boom");
    assert_eq!(
        failed.error_message.as_deref(),
        Some("Exception: index out of bounds")
    );
}

#[tokio::test]
async fn logical_failure_is_passed_through() {
    let unsupported = MockProvider::returning(
        "nope",
        remesa::QuoteResult::failure("nope", &usd_inr(), d("1000"), "corridor not supported"),
    );
    let remesa = builder_with(&[unsupported, provider_b()]).build().unwrap();
    let out = remesa
        .get_all_quotes(&request().build().unwrap())
        .await
        .unwrap();

    let failed = out.failures().next().unwrap();
    assert_eq!(failed.error_message.as_deref(), Some("corridor not supported"));
    assert_eq!(ids(&out.results), vec!["b"]);
}

#[tokio::test]
async fn success_without_rate_is_downgraded() {
    let mut bogus = fixtures::provider_a_quote(d("1000"));
    bogus.provider_id = "bogus".into();
    bogus.exchange_rate = None;
    let remesa = builder_with(&[MockProvider::returning("bogus", bogus)])
        .build()
        .unwrap();

    let out = remesa
        .get_all_quotes(&request().sort_by(SortBy::BestRate).build().unwrap())
        .await
        .unwrap();

    assert!(!out.success);
    let q = &out.all_results[0];
    assert!(!q.success);
    assert_eq!(q.error_message.as_deref(), Some("invalid exchange rate"));
}

#[tokio::test]
async fn untagged_results_receive_provider_id() {
    let rec = Arc::new(RecordingProvider::default());
    let remesa = Remesa::builder()
        .with_provider(Arc::clone(&rec) as Arc<dyn QuoteProvider>)
        .build()
        .unwrap();

    let out = remesa
        .get_all_quotes(&request().build().unwrap())
        .await
        .unwrap();

    assert_eq!(ids(&out.results), vec!["recording"]);
}
