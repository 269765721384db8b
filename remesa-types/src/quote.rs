//! Per-provider quote outcomes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::corridor::Corridor;

/// One provider's outcome for a comparison request.
///
/// Invariant (enforced by [`QuoteResult::normalized`]): a successful result
/// carries a positive `exchange_rate` and no `error_message`; a failed result
/// always carries an `error_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Name of the provider that produced this outcome.
    pub provider_id: String,
    /// Whether the provider produced a usable quote.
    pub success: bool,
    /// Failure description; present iff `success` is false.
    pub error_message: Option<String>,
    /// Amount debited from the sender, in `source_currency`.
    pub send_amount: Decimal,
    /// Sending currency code.
    pub source_currency: String,
    /// Sending country code.
    pub source_country: String,
    /// Amount credited to the recipient, in `destination_currency`.
    pub destination_amount: Option<Decimal>,
    /// Receiving currency code.
    pub destination_currency: String,
    /// Receiving country code.
    pub destination_country: String,
    /// Units of destination currency per unit of source currency.
    pub exchange_rate: Option<Decimal>,
    /// Transfer fee in `source_currency`.
    pub fee: Option<Decimal>,
    /// How the sender pays (e.g. "bank_transfer", "debit_card").
    pub payment_method: Option<String>,
    /// How the recipient is paid (e.g. "bank_deposit", "cash_pickup").
    pub delivery_method: Option<String>,
    /// Estimated delivery time in minutes.
    pub delivery_time_minutes: Option<u32>,
    /// When the outcome was produced.
    pub timestamp: DateTime<Utc>,
}

impl QuoteResult {
    /// Build a successful quote. `destination_amount` defaults to
    /// `send_amount * exchange_rate`; override with [`with_destination_amount`].
    ///
    /// [`with_destination_amount`]: Self::with_destination_amount
    #[must_use]
    pub fn success(
        provider_id: impl Into<String>,
        corridor: &Corridor,
        send_amount: Decimal,
        exchange_rate: Decimal,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            success: true,
            error_message: None,
            send_amount,
            source_currency: corridor.source_currency().to_string(),
            source_country: corridor.source_country().to_string(),
            destination_amount: send_amount.checked_mul(exchange_rate),
            destination_currency: corridor.dest_currency().to_string(),
            destination_country: corridor.dest_country().to_string(),
            exchange_rate: Some(exchange_rate),
            fee: None,
            payment_method: None,
            delivery_method: None,
            delivery_time_minutes: None,
            timestamp: Utc::now(),
        }
    }

    /// Build a failed outcome carrying the request's corridor and amount.
    #[must_use]
    pub fn failure(
        provider_id: impl Into<String>,
        corridor: &Corridor,
        send_amount: Decimal,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            success: false,
            error_message: Some(error_message.into()),
            send_amount,
            source_currency: corridor.source_currency().to_string(),
            source_country: corridor.source_country().to_string(),
            destination_amount: None,
            destination_currency: corridor.dest_currency().to_string(),
            destination_country: corridor.dest_country().to_string(),
            exchange_rate: None,
            fee: None,
            payment_method: None,
            delivery_method: None,
            delivery_time_minutes: None,
            timestamp: Utc::now(),
        }
    }

    /// Set the transfer fee.
    #[must_use]
    pub fn with_fee(mut self, fee: Decimal) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Set the estimated delivery time.
    #[must_use]
    pub fn with_delivery_time_minutes(mut self, minutes: u32) -> Self {
        self.delivery_time_minutes = Some(minutes);
        self
    }

    /// Set the amount credited to the recipient.
    #[must_use]
    pub fn with_destination_amount(mut self, amount: Decimal) -> Self {
        self.destination_amount = Some(amount);
        self
    }

    /// Set the payment method label.
    #[must_use]
    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    /// Set the delivery method label.
    #[must_use]
    pub fn with_delivery_method(mut self, method: impl Into<String>) -> Self {
        self.delivery_method = Some(method.into());
        self
    }

    /// True when the outcome is a success with a positive exchange rate.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.success && self.exchange_rate.is_some_and(|r| r > Decimal::ZERO)
    }

    /// Enforce the success/error invariant on an outcome of unknown origin.
    ///
    /// - success without a positive rate becomes a failure ("invalid exchange rate")
    /// - failure without a message gets "unknown error"
    /// - success drops any stale error message
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.success {
            if self.is_usable() {
                self.error_message = None;
            } else {
                self.success = false;
                self.error_message = Some("invalid exchange rate".to_string());
            }
        } else if self.error_message.as_deref().is_none_or(str::is_empty) {
            self.error_message = Some("unknown error".to_string());
        }
        self
    }
}
