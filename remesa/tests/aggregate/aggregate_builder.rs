use std::sync::Arc;
use std::time::Duration;

use remesa::{QuoteProvider, Remesa, RemesaConfig, RemesaError};
use crate::helpers::{builder_with, d, provider_a, request, usd_inr};

#[test]
fn empty_registry_is_rejected() {
    let err = Remesa::builder().build().unwrap_err();
    assert!(matches!(err, RemesaError::InvalidConfig(_)));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = builder_with(&[provider_a(), provider_a()]).build().unwrap_err();
    assert!(matches!(err, RemesaError::InvalidConfig(msg) if msg.contains("\"a\"")));
}

#[test]
fn zero_timeouts_are_rejected() {
    let err = builder_with(&[provider_a()])
        .request_timeout(Duration::ZERO)
        .build()
        .unwrap_err();
    assert!(err.is_request_error());

    let err = builder_with(&[provider_a()])
        .provider_timeout(Duration::ZERO)
        .build()
        .unwrap_err();
    assert!(matches!(err, RemesaError::InvalidConfig(_)));
}

#[test]
fn config_round_trips_through_builder() {
    let cfg = RemesaConfig {
        request_timeout: Duration::from_secs(3),
        provider_timeout: Some(Duration::from_secs(1)),
        ..RemesaConfig::default()
    };
    let remesa = Remesa::builder()
        .with_provider(provider_a() as Arc<dyn QuoteProvider>)
        .config(cfg.clone())
        .build()
        .unwrap();
    assert_eq!(remesa.config(), &cfg);
}

#[test]
fn invalid_requests_cannot_be_built() {
    assert!(matches!(
        remesa::QuoteRequest::builder(usd_inr(), d("-5")).build(),
        Err(RemesaError::InvalidRequest(_))
    ));
    assert!(request().max_workers(0).build().is_err());
    assert!(request().max_fee(d("-1")).build().is_err());
}

#[tokio::test]
async fn default_builder_uses_memory_cache() {
    let a = provider_a();
    let remesa = builder_with(&[Arc::clone(&a)]).build().unwrap();
    let req = request().build().unwrap();
    remesa.get_all_quotes(&req).await.unwrap();
    remesa.get_all_quotes(&req).await.unwrap();
    assert_eq!(a.calls(), 1);
}

#[tokio::test]
async fn unbounded_timeouts_still_aggregate() {
    let a = provider_a();
    let remesa = builder_with(&[Arc::clone(&a)])
        .request_timeout(Duration::MAX)
        .provider_timeout(Duration::MAX)
        .build()
        .unwrap();

    let out = remesa.get_all_quotes(&request().build().unwrap()).await.unwrap();

    assert!(out.success);
    assert_eq!(out.all_results.len(), 1);
    assert_eq!(a.calls(), 1);
}
