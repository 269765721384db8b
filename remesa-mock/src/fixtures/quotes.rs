use chrono::{DateTime, Utc};
use remesa_core::{Corridor, Decimal, QuoteResult};

const FIXTURE_TS: i64 = 1_735_689_600;

/// United States → India, USD → INR.
#[must_use]
pub fn usd_inr() -> Corridor {
    Corridor::new("US", "IN", "USD", "INR").expect("valid fixture corridor")
}

fn q(
    provider: &str,
    amount: Decimal,
    rate: Decimal,
    fee: Decimal,
    minutes: u32,
    delivery: &str,
) -> QuoteResult {
    let mut out = QuoteResult::success(provider, &usd_inr(), amount, rate)
        .with_fee(fee)
        .with_delivery_time_minutes(minutes)
        .with_payment_method("bank_transfer")
        .with_delivery_method(delivery);
    out.timestamp = DateTime::<Utc>::from_timestamp(FIXTURE_TS, 0).unwrap_or_default();
    out
}

/// Provider "a": best rate, highest fee, next-day delivery.
#[must_use]
pub fn provider_a_quote(amount: Decimal) -> QuoteResult {
    q(
        "a",
        amount,
        Decimal::new(8719, 2),
        Decimal::new(733, 2),
        1440,
        "bank_deposit",
    )
}

/// Provider "b": slightly worse rate, cheaper fee, one-hour delivery.
#[must_use]
pub fn provider_b_quote(amount: Decimal) -> QuoteResult {
    q(
        "b",
        amount,
        Decimal::new(8665, 2),
        Decimal::new(600, 2),
        60,
        "bank_deposit",
    )
}

/// Provider "c": poor rate, no fee, instant cash pickup.
#[must_use]
pub fn provider_c_quote(amount: Decimal) -> QuoteResult {
    q(
        "c",
        amount,
        Decimal::new(8420, 2),
        Decimal::ZERO,
        10,
        "cash_pickup",
    )
}

/// Fixture quote for a provider name, if one exists.
#[must_use]
pub fn by_name(name: &str, amount: Decimal) -> Option<QuoteResult> {
    match name {
        "a" => Some(provider_a_quote(amount)),
        "b" => Some(provider_b_quote(amount)),
        "c" => Some(provider_c_quote(amount)),
        _ => None,
    }
}
