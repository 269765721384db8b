// Shared fixtures for orchestrator tests so each file can `use crate::helpers::*;`
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use remesa::{
    Corridor, Decimal, ProviderCallArgs, QuoteProvider, QuoteRequest, QuoteRequestBuilder,
    QuoteResult, Remesa, RemesaBuilder, RemesaError,
};
use remesa_mock::{MockProvider, fixtures};

pub const AMOUNT: &str = "1000";

/// Parse a decimal literal.
pub fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn usd_inr() -> Corridor {
    fixtures::usd_inr()
}

/// Request builder for 1000 USD → INR with default options.
pub fn request() -> QuoteRequestBuilder {
    QuoteRequest::builder(usd_inr(), d(AMOUNT))
}

/// Provider ids in the order they appear.
pub fn ids(v: &[QuoteResult]) -> Vec<&str> {
    v.iter().map(|q| q.provider_id.as_str()).collect()
}

/// Provider "a": rate 87.19, fee 7.33.
pub fn provider_a() -> Arc<MockProvider> {
    MockProvider::returning("a", fixtures::provider_a_quote(d(AMOUNT)))
}

/// Provider "b": rate 86.65, fee 6.00.
pub fn provider_b() -> Arc<MockProvider> {
    MockProvider::returning("b", fixtures::provider_b_quote(d(AMOUNT)))
}

/// Provider "c": raises on every call.
pub fn provider_c_raising() -> Arc<MockProvider> {
    MockProvider::failing("c", RemesaError::provider("c", "upstream 502"))
}

/// Builder pre-loaded with the given providers.
pub fn builder_with(providers: &[Arc<MockProvider>]) -> RemesaBuilder {
    providers.iter().fold(Remesa::builder(), |b, p| {
        b.with_provider(Arc::clone(p) as Arc<dyn QuoteProvider>)
    })
}

/// Orchestrator over A, B and a raising C.
pub fn abc() -> (Remesa, [Arc<MockProvider>; 3]) {
    let ps = [provider_a(), provider_b(), provider_c_raising()];
    let remesa = builder_with(&ps).build().unwrap();
    (remesa, ps)
}

/// Provider that records the arguments it receives.
#[derive(Default)]
pub struct RecordingProvider {
    pub seen: Mutex<Vec<ProviderCallArgs>>,
}

#[async_trait]
impl QuoteProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn get_quote(&self, args: &ProviderCallArgs) -> Result<QuoteResult, RemesaError> {
        self.seen.lock().unwrap().push(args.clone());
        let corridor = args.corridor()?;
        // Deliberately untagged to exercise provider_id backfill.
        Ok(QuoteResult::success("", &corridor, args.amount, d("80")))
    }
}
