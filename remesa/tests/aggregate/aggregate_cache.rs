use std::sync::Arc;
use std::time::Duration;

use remesa::{
    CacheConfig, CacheKey, MemoryQuoteCache, NoopQuoteCache, QuoteCache, QuoteProvider, Remesa,
};
use remesa_mock::{MockBehavior, MockProvider, UnavailableCache, fixtures};

use crate::helpers::{
    RecordingProvider, builder_with, d, ids, provider_a, provider_b, provider_c_raising, request,
    usd_inr,
};

#[tokio::test]
async fn second_call_is_served_from_cache() {
    let a = provider_a();
    let remesa = builder_with(&[Arc::clone(&a)]).build().unwrap();
    let req = request().build().unwrap();

    let first = remesa.get_all_quotes(&req).await.unwrap();
    let second = remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(a.calls(), 1);
    assert_eq!(first.all_results, second.all_results);
    assert_eq!(ids(&second.results), vec!["a"]);
}

#[tokio::test]
async fn cache_hit_survives_provider_change() {
    let a = provider_a();
    let remesa = builder_with(&[Arc::clone(&a)]).build().unwrap();
    let req = request().build().unwrap();

    let first = remesa.get_all_quotes(&req).await.unwrap();
    a.set_behavior(MockBehavior::Return(fixtures::provider_c_quote(d("1000"))))
        .await;
    let second = remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(first.results, second.results);
    assert_eq!(a.calls(), 1);
}

#[tokio::test]
async fn use_cache_false_always_calls_providers() {
    let a = provider_a();
    let remesa = builder_with(&[Arc::clone(&a)]).build().unwrap();
    let req = request().use_cache(false).build().unwrap();

    remesa.get_all_quotes(&req).await.unwrap();
    remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(a.calls(), 2);
}

#[tokio::test]
async fn different_amounts_do_not_share_entries() {
    let a = provider_a();
    let remesa = builder_with(&[Arc::clone(&a)]).build().unwrap();

    let r1 = request().build().unwrap();
    let r2 = remesa::QuoteRequest::builder(usd_inr(), d("500")).build().unwrap();
    remesa.get_all_quotes(&r1).await.unwrap();
    remesa.get_all_quotes(&r2).await.unwrap();

    assert_eq!(a.calls(), 2);
}

#[tokio::test]
async fn failures_are_cached_for_the_failure_ttl() {
    let c = provider_c_raising();
    let cache = Arc::new(MemoryQuoteCache::new(64));
    let remesa = builder_with(&[Arc::clone(&c)])
        .with_cache(Arc::clone(&cache) as Arc<dyn QuoteCache>)
        .cache_config(CacheConfig {
            failure_ttl: Duration::from_millis(100),
            ..CacheConfig::default()
        })
        .build()
        .unwrap();
    let req = request().build().unwrap();

    remesa.get_all_quotes(&req).await.unwrap();
    remesa.get_all_quotes(&req).await.unwrap();
    assert_eq!(c.calls(), 1);

    tokio::time::sleep(Duration::from_millis(250)).await;
    remesa.get_all_quotes(&req).await.unwrap();
    assert_eq!(c.calls(), 2);
}

#[tokio::test]
async fn unavailable_cache_degrades_to_miss() {
    let cache = Arc::new(UnavailableCache::new());
    let a = provider_a();
    let remesa = builder_with(&[Arc::clone(&a), provider_b()])
        .with_cache(Arc::clone(&cache) as Arc<dyn QuoteCache>)
        .build()
        .unwrap();
    let req = request().build().unwrap();

    let out = remesa.get_all_quotes(&req).await.unwrap();
    assert_eq!(ids(&out.results), vec!["a", "b"]);
    remesa.get_all_quotes(&req).await.unwrap();

    assert_eq!(a.calls(), 2);
    assert_eq!(cache.gets(), 4);
    assert_eq!(cache.sets(), 4);
}

#[tokio::test]
async fn late_outcomes_still_populate_the_cache() {
    let slow = MockProvider::builder("slow")
        .returns(fixtures::provider_a_quote(d("1000")))
        .delay(Duration::from_millis(300))
        .build();
    let cache = Arc::new(MemoryQuoteCache::new(64));
    let remesa = builder_with(&[Arc::clone(&slow)])
        .with_cache(Arc::clone(&cache) as Arc<dyn QuoteCache>)
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let req = request().build().unwrap();

    let first = remesa.get_all_quotes(&req).await.unwrap();
    assert!(first.all_results.is_empty());
    assert_eq!(first.providers_called, 1);

    tokio::time::sleep(Duration::from_millis(500)).await;
    let key = CacheKey::new("slow", usd_inr(), d("1000"));
    assert!(cache.get(&key).await.unwrap().is_some());

    let second = remesa.get_all_quotes(&req).await.unwrap();
    assert_eq!(second.all_results.len(), 1);
    assert_eq!(slow.calls(), 1);
}

#[tokio::test]
async fn payment_and_delivery_methods_do_not_share_entries() {
    let rec = Arc::new(RecordingProvider::default());
    let remesa = Remesa::builder()
        .with_provider(Arc::clone(&rec) as Arc<dyn QuoteProvider>)
        .build()
        .unwrap();

    let card = request().payment_method("debit_card").build().unwrap();
    let bank = request().payment_method("bank_transfer").build().unwrap();
    let pickup = request()
        .payment_method("bank_transfer")
        .delivery_method("cash_pickup")
        .build()
        .unwrap();
    for req in [&card, &bank, &pickup, &card] {
        remesa.get_all_quotes(req).await.unwrap();
    }

    let seen = rec.seen.lock().unwrap();
    let methods: Vec<_> = seen
        .iter()
        .map(|a| (a.payment_method.as_deref(), a.delivery_method.as_deref()))
        .collect();
    assert_eq!(
        methods,
        vec![
            (Some("debit_card"), None),
            (Some("bank_transfer"), None),
            (Some("bank_transfer"), Some("cash_pickup")),
        ]
    );
}

#[tokio::test]
async fn noop_cache_always_misses() {
    let a = provider_a();
    let remesa = builder_with(&[Arc::clone(&a)])
        .with_cache(Arc::new(NoopQuoteCache))
        .build()
        .unwrap();
    let req = request().build().unwrap();

    for _ in 0..3 {
        let out = remesa.get_all_quotes(&req).await.unwrap();
        assert_eq!(ids(&out.results), vec!["a"]);
    }
    assert_eq!(a.calls(), 3);

    let key = CacheKey::for_request("a", &req);
    assert_eq!(NoopQuoteCache.get(&key).await.unwrap(), None);
}
