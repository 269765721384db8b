use core::fmt;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Corridor, QuoteRequest, QuoteResult, RemesaError};

/// Canonical call parameters a provider may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallParam {
    /// Amount to send.
    Amount,
    /// Sending currency code.
    SourceCurrency,
    /// Receiving currency code.
    DestCurrency,
    /// Sending country code.
    SourceCountry,
    /// Receiving country code.
    DestCountry,
    /// Payment method label.
    PaymentMethod,
    /// Delivery method label.
    DeliveryMethod,
}

impl CallParam {
    /// Parameters every request always carries.
    pub const CANONICAL: &'static [Self] = &[
        Self::Amount,
        Self::SourceCurrency,
        Self::DestCurrency,
        Self::SourceCountry,
        Self::DestCountry,
    ];

    /// Canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::SourceCurrency => "source_currency",
            Self::DestCurrency => "dest_currency",
            Self::SourceCountry => "source_country",
            Self::DestCountry => "dest_country",
            Self::PaymentMethod => "payment_method",
            Self::DeliveryMethod => "delivery_method",
        }
    }
}

impl fmt::Display for CallParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical argument set passed to [`QuoteProvider::get_quote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCallArgs {
    /// Amount to send.
    pub amount: Decimal,
    /// Sending currency code.
    pub source_currency: String,
    /// Receiving currency code.
    pub dest_currency: String,
    /// Sending country code.
    pub source_country: String,
    /// Receiving country code.
    pub dest_country: String,
    /// Payment method preference.
    pub payment_method: Option<String>,
    /// Delivery method preference.
    pub delivery_method: Option<String>,
}

impl ProviderCallArgs {
    /// Map a request onto the canonical field names.
    #[must_use]
    pub fn canonical(req: &QuoteRequest) -> Self {
        let c = req.corridor();
        Self {
            amount: req.amount(),
            source_currency: c.source_currency().to_string(),
            dest_currency: c.dest_currency().to_string(),
            source_country: c.source_country().to_string(),
            dest_country: c.dest_country().to_string(),
            payment_method: req.payment_method().map(str::to_string),
            delivery_method: req.delivery_method().map(str::to_string),
        }
    }

    /// Whether a parameter has a value.
    #[must_use]
    pub const fn has(&self, param: CallParam) -> bool {
        match param {
            CallParam::PaymentMethod => self.payment_method.is_some(),
            CallParam::DeliveryMethod => self.delivery_method.is_some(),
            _ => true,
        }
    }

    /// Rebuild the corridor these arguments describe.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the codes are malformed.
    pub fn corridor(&self) -> Result<Corridor, RemesaError> {
        Corridor::new(
            &self.source_country,
            &self.dest_country,
            &self.source_currency,
            &self.dest_currency,
        )
    }
}

/// Quote capability implemented by every money-transfer provider.
///
/// Providers report ordinary business failures (unsupported corridor, API
/// error) as `Ok(QuoteResult { success: false, .. })`. An `Err` or a panic is
/// treated as an exception by the dispatcher and isolated to this provider.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Stable provider name, used as `provider_id` and for exclusions.
    fn name(&self) -> &'static str;

    /// Human-readable vendor label.
    fn vendor(&self) -> &'static str {
        self.name()
    }

    /// Parameters this provider cannot quote without.
    fn required_params(&self) -> &'static [CallParam] {
        CallParam::CANONICAL
    }

    /// Translate a request into this provider's call arguments.
    ///
    /// The default maps canonical fields one-to-one and checks
    /// [`required_params`](Self::required_params). Providers with bespoke field
    /// names perform their translation inside [`get_quote`](Self::get_quote).
    ///
    /// # Errors
    /// Returns `MissingParameter` when a required parameter is absent.
    fn adapt(&self, req: &QuoteRequest) -> Result<ProviderCallArgs, RemesaError> {
        let args = ProviderCallArgs::canonical(req);
        if let Some(p) = self.required_params().iter().find(|p| !args.has(**p)) {
            return Err(RemesaError::missing_parameter(self.name(), p.as_str()));
        }
        Ok(args)
    }

    /// Fetch a quote for the given arguments.
    async fn get_quote(&self, args: &ProviderCallArgs) -> Result<QuoteResult, RemesaError>;
}
