use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use remesa_core::{CallParam, ProviderCallArgs, QuoteProvider, QuoteResult, RemesaError};

use crate::gauge::InFlightGauge;

/// Instruction for how a mock provider answers `get_quote`.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided outcome (success or logical failure).
    Return(QuoteResult),
    /// Fail with the provided error.
    Fail(RemesaError),
    /// Panic with the provided message.
    Panic(String),
    /// Never complete (simulate a stalled upstream).
    Hang,
}

/// Scriptable provider used by tests and examples.
///
/// Counts every `get_quote` invocation, optionally sleeps before answering,
/// and reports its concurrency to a shared [`InFlightGauge`].
#[derive(Debug)]
pub struct MockProvider {
    name: &'static str,
    behavior: Mutex<MockBehavior>,
    delay: Option<Duration>,
    required: &'static [CallParam],
    gauge: Option<InFlightGauge>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl MockProvider {
    /// Start configuring a provider named `name`.
    #[must_use]
    pub fn builder(name: &'static str) -> MockProviderBuilder {
        MockProviderBuilder::new(name)
    }

    /// Provider that always returns `quote`.
    #[must_use]
    pub fn returning(name: &'static str, quote: QuoteResult) -> Arc<Self> {
        Self::builder(name).behavior(MockBehavior::Return(quote)).build()
    }

    /// Provider that always fails with `err`.
    #[must_use]
    pub fn failing(name: &'static str, err: RemesaError) -> Arc<Self> {
        Self::builder(name).behavior(MockBehavior::Fail(err)).build()
    }

    /// Replace the behavior for subsequent calls.
    pub async fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().await = behavior;
    }

    /// Number of times `get_quote` was entered.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of calls that ran to completion (returned `Ok` or `Err`).
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn required_params(&self) -> &'static [CallParam] {
        self.required
    }

    async fn get_quote(&self, _args: &ProviderCallArgs) -> Result<QuoteResult, RemesaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _guard = self.gauge.as_ref().map(InFlightGauge::enter);

        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }

        // Snapshot without holding the lock across the answer.
        let behavior = self.behavior.lock().await.clone();
        let out = match behavior {
            MockBehavior::Return(q) => Ok(q),
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::Panic(msg) => panic!("{msg}"),
            MockBehavior::Hang => std::future::pending().await,
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        out
    }
}

/// Builder for [`MockProvider`].
#[derive(Debug)]
pub struct MockProviderBuilder {
    name: &'static str,
    behavior: MockBehavior,
    delay: Option<Duration>,
    required: &'static [CallParam],
    gauge: Option<InFlightGauge>,
}

impl MockProviderBuilder {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            behavior: MockBehavior::Fail(RemesaError::provider(name, "no behavior configured")),
            delay: None,
            required: CallParam::CANONICAL,
            gauge: None,
        }
    }

    /// Answer with `behavior`.
    #[must_use]
    pub fn behavior(mut self, behavior: MockBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Shorthand for `behavior(MockBehavior::Return(quote))`.
    #[must_use]
    pub fn returns(self, quote: QuoteResult) -> Self {
        self.behavior(MockBehavior::Return(quote))
    }

    /// Sleep this long before answering.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Declare the parameters the provider cannot quote without.
    #[must_use]
    pub const fn required_params(mut self, params: &'static [CallParam]) -> Self {
        self.required = params;
        self
    }

    /// Report concurrency to `gauge`.
    #[must_use]
    pub fn gauge(mut self, gauge: InFlightGauge) -> Self {
        self.gauge = Some(gauge);
        self
    }

    /// Finish the provider.
    #[must_use]
    pub fn build(self) -> Arc<MockProvider> {
        Arc::new(MockProvider {
            name: self.name,
            behavior: Mutex::new(self.behavior),
            delay: self.delay,
            required: self.required,
            gauge: self.gauge,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        })
    }
}
