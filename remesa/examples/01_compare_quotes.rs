use std::sync::Arc;
use std::time::Duration;

use remesa::{QuoteProvider, QuoteRequest, Remesa, RemesaError, SortBy};
use remesa_mock::{MockBehavior, MockProvider, fixtures};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Log dispatcher events; try RUST_LOG=remesa=debug.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 2. Three mock providers: two quote, one is down.
    let amount = "1000".parse()?;
    let a = MockProvider::builder("a")
        .returns(fixtures::provider_a_quote(amount))
        .delay(Duration::from_millis(120))
        .build();
    let b = MockProvider::returning("b", fixtures::provider_b_quote(amount));
    let c = MockProvider::builder("c")
        .behavior(MockBehavior::Fail(RemesaError::provider("c", "HTTP 503")))
        .build();

    // 3. Build the orchestrator.
    let remesa = Remesa::builder()
        .with_provider(a as Arc<dyn QuoteProvider>)
        .with_provider(b as Arc<dyn QuoteProvider>)
        .with_provider(c as Arc<dyn QuoteProvider>)
        .request_timeout(Duration::from_secs(2))
        .build()?;

    // 4. Compare 1000 USD → INR by composite value.
    let req = QuoteRequest::builder(fixtures::usd_inr(), amount)
        .sort_by(SortBy::BestValue)
        .build()?;
    let report = remesa.get_all_quotes(&req).await?;

    // 5. Print the ranking and any failures.
    println!(
        "{} of {} providers quoted in {:?}",
        report.successful_providers, report.providers_called, report.execution_time
    );
    for (i, q) in report.results.iter().enumerate() {
        println!(
            "{}. {:<3} rate={:?} fee={:?} eta_min={:?}",
            i + 1,
            q.provider_id,
            q.exchange_rate,
            q.fee,
            q.delivery_time_minutes
        );
    }
    for f in report.failures() {
        println!("x  {:<3} {}", f.provider_id, f.error_message.as_deref().unwrap_or(""));
    }

    Ok(())
}
