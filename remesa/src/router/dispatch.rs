use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use remesa_cache::TtlPolicy;
use remesa_core::{CacheKey, QuoteCache, QuoteProvider, QuoteRequest, QuoteResult};
use tokio::sync::{Semaphore, mpsc};
use tokio::time::Instant;

use super::util::{
    collect_until_deadline, exception_outcome, panic_message, tag_provider,
};
use crate::Remesa;
use crate::registry::ProviderRegistry;

// Owned state for one provider task. Tasks may outlive the dispatching call,
// so nothing here borrows from `Remesa`.
#[derive(Clone)]
struct TaskContext {
    req: Arc<QuoteRequest>,
    registry: Arc<ProviderRegistry>,
    cache: Arc<dyn QuoteCache>,
    ttl: TtlPolicy,
    provider_timeout: Option<Duration>,
    permits: Arc<Semaphore>,
}

impl Remesa {
    /// Run every provider concurrently and collect outcomes until all have
    /// reported or the request deadline passes.
    ///
    /// - At most `min(max_workers, providers.len())` calls run at once.
    /// - Outcomes are returned in completion order, one per provider that
    ///   finished in time.
    /// - Tasks still running at the deadline are detached, not aborted.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "remesa::router::dispatch",
            skip(self, providers, req),
            fields(
                providers = providers.len(),
                max_workers = req.max_workers(),
                use_cache = req.use_cache(),
            ),
        )
    )]
    pub(crate) async fn dispatch(
        &self,
        providers: Vec<Arc<dyn QuoteProvider>>,
        req: Arc<QuoteRequest>,
    ) -> Vec<QuoteResult> {
        let expected = providers.len();
        if expected == 0 {
            return vec![];
        }
        let deadline = deadline_after(self.cfg.request_timeout);
        let workers = req.max_workers().min(expected);

        let ctx = TaskContext {
            req,
            registry: Arc::clone(&self.registry),
            cache: Arc::clone(&self.cache),
            ttl: self.ttl,
            provider_timeout: self.cfg.provider_timeout,
            permits: Arc::new(Semaphore::new(workers)),
        };

        let (tx, mut rx) = mpsc::channel(expected);
        for provider in providers {
            tokio::spawn(run_provider(provider, ctx.clone(), tx.clone()));
        }
        drop(tx);

        let (outcomes, outstanding) = collect_until_deadline(&mut rx, expected, deadline).await;
        if outstanding > 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                outstanding,
                timeout_ms = u64::try_from(self.cfg.request_timeout.as_millis()).unwrap_or(u64::MAX),
                "request deadline elapsed; abandoning outstanding providers"
            );
        }
        outcomes
    }
}

// Roughly 30 years; stands in for timeouts too large to add to an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE)
}

async fn run_provider(
    provider: Arc<dyn QuoteProvider>,
    ctx: TaskContext,
    tx: mpsc::Sender<QuoteResult>,
) {
    let name = provider.name();
    let Ok(_permit) = ctx.permits.acquire().await else {
        return;
    };

    let key = CacheKey::for_request(name, &ctx.req);
    if ctx.req.use_cache()
        && let Some(hit) = cache_lookup(ctx.cache.as_ref(), &key).await
    {
        let _ = tx.send(tag_provider(hit, name)).await;
        return;
    }

    let outcome = call_provider(provider.as_ref(), &ctx).await;

    // Written before reporting so late outcomes still reach the cache.
    if ctx.req.use_cache() {
        cache_store(ctx.cache.as_ref(), key, &outcome, ctx.ttl.ttl_for(&outcome)).await;
    }

    if tx.send(outcome).await.is_err() {
        #[cfg(feature = "tracing")]
        tracing::debug!(provider = name, "outcome arrived after deadline; discarded");
    }
}

async fn call_provider(provider: &dyn QuoteProvider, ctx: &TaskContext) -> QuoteResult {
    let name = provider.name();
    let req = ctx.req.as_ref();

    let attempt = AssertUnwindSafe(async {
        let args = match ctx.registry.adapt(name, req) {
            Ok(args) => args,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(provider = name, error = %e, "skipping provider call");
                return QuoteResult::failure(name, req.corridor(), req.amount(), e.to_string());
            }
        };
        let call = provider.get_quote(&args);
        match Remesa::provider_call_with_timeout(name, ctx.provider_timeout, call).await {
            Ok(q) => tag_provider(q, name).normalized(),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(provider = name, error = %e, "provider raised");
                exception_outcome(name, req, &e.to_string())
            }
        }
    })
    .catch_unwind()
    .await;

    attempt.unwrap_or_else(|payload| {
        let msg = panic_message(payload.as_ref());
        #[cfg(feature = "tracing")]
        tracing::warn!(provider = name, panic = %msg, "provider panicked");
        exception_outcome(name, req, &msg)
    })
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
async fn cache_lookup(cache: &dyn QuoteCache, key: &CacheKey) -> Option<QuoteResult> {
    match cache.get(key).await {
        Ok(hit) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(provider = key.provider(), hit = hit.is_some(), "cache lookup");
            hit
        }
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(provider = key.provider(), error = %e, "cache read failed; treating as miss");
            None
        }
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
async fn cache_store(cache: &dyn QuoteCache, key: CacheKey, outcome: &QuoteResult, ttl: Duration) {
    if ttl.is_zero() {
        return;
    }
    #[cfg(feature = "tracing")]
    let provider = key.provider().to_string();
    if let Err(e) = cache.set(key, outcome.clone(), ttl).await {
        #[cfg(feature = "tracing")]
        tracing::warn!(provider = %provider, error = %e, "cache write failed");
    }
}
