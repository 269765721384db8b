use std::any::Any;

use remesa_core::{QuoteRequest, QuoteResult};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Failed outcome for a provider whose call raised instead of returning.
pub fn exception_outcome(provider: &str, req: &QuoteRequest, msg: &str) -> QuoteResult {
    QuoteResult::failure(
        provider,
        req.corridor(),
        req.amount(),
        format!("Exception: {msg}"),
    )
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "provider panicked".to_string()
    }
}

/// Fill in `provider_id` when a provider left it blank.
pub fn tag_provider(mut q: QuoteResult, provider: &str) -> QuoteResult {
    if q.provider_id.is_empty() {
        q.provider_id = provider.to_string();
    }
    q
}

/// Receive up to `expected` items, stopping early when every sender is gone
/// or `deadline` passes. Items arrive in completion order.
///
/// Returns the collected items and how many were still outstanding.
pub async fn collect_until_deadline<T>(
    rx: &mut mpsc::Receiver<T>,
    expected: usize,
    deadline: Instant,
) -> (Vec<T>, usize) {
    let mut out = Vec::with_capacity(expected);
    while out.len() < expected {
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some(item)) => out.push(item),
            Ok(None) | Err(_) => break,
        }
    }
    let outstanding = expected - out.len();
    (out, outstanding)
}
