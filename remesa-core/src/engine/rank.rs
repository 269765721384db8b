//! Ordering strategies for filtered quotes.
//!
//! All sorts are stable: quotes that compare equal on the chosen key keep
//! their incoming (dispatcher completion) order.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::{QuoteResult, SortBy};

const RATE_WEIGHT: f64 = 0.5;
const FEE_WEIGHT: f64 = 0.3;
const TIME_WEIGHT: f64 = 0.2;

/// Composite score used by [`SortBy::BestValue`]; higher is better.
///
/// `0.5 * rate + 0.3 * (100 - fee * 10) + 0.2 * (100 - min(100, minutes / 30))`,
/// with a missing rate scored as 0 and a missing fee or delivery time as 0.
#[must_use]
pub fn best_value_score(q: &QuoteResult) -> f64 {
    let rate = q.exchange_rate.and_then(|r| r.to_f64()).unwrap_or(0.0);
    let fee = q.fee.and_then(|f| f.to_f64()).unwrap_or(0.0);
    let minutes = q.delivery_time_minutes.map_or(0.0, f64::from);

    let fee_score = fee.mul_add(-10.0, 100.0);
    let time_score = 100.0 - (minutes / 30.0).min(100.0);

    RATE_WEIGHT.mul_add(rate, FEE_WEIGHT.mul_add(fee_score, TIME_WEIGHT * time_score))
}

/// Sort quotes in place according to `sort_by`.
pub fn rank_quotes(quotes: &mut [QuoteResult], sort_by: SortBy) {
    match sort_by {
        SortBy::BestRate => quotes.sort_by(|a, b| rate_or_zero(b).cmp(&rate_or_zero(a))),
        SortBy::LowestFee => quotes.sort_by(|a, b| missing_last(a.fee, b.fee)),
        SortBy::FastestTime => {
            quotes.sort_by(|a, b| missing_last(a.delivery_time_minutes, b.delivery_time_minutes));
        }
        SortBy::BestValue => quotes.sort_by(|a, b| {
            best_value_score(b)
                .partial_cmp(&best_value_score(a))
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Unsorted => {}
    }
}

/// Consume and return the ranked vector.
#[must_use]
pub fn ranked(mut quotes: Vec<QuoteResult>, sort_by: SortBy) -> Vec<QuoteResult> {
    rank_quotes(&mut quotes, sort_by);
    quotes
}

fn rate_or_zero(q: &QuoteResult) -> Decimal {
    q.exchange_rate.unwrap_or(Decimal::ZERO)
}

// Ascending, with `None` treated as +infinity.
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
