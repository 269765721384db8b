//! Directional transfer routes.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RemesaError;

/// A directional transfer route: who sends what, to whom, in which currency.
///
/// Codes are stored upper-cased. Countries are ISO 3166-1 alpha-2 and
/// currencies ISO 4217 alpha-3; only the shape is validated, not membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCorridor")]
pub struct Corridor {
    source_country: String,
    dest_country: String,
    source_currency: String,
    dest_currency: String,
}

impl Corridor {
    /// Build a corridor from raw codes.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if a country code is not two ASCII letters or a
    /// currency code is not three ASCII letters.
    pub fn new(
        source_country: &str,
        dest_country: &str,
        source_currency: &str,
        dest_currency: &str,
    ) -> Result<Self, RemesaError> {
        Ok(Self {
            source_country: code(source_country, 2, "source_country")?,
            dest_country: code(dest_country, 2, "dest_country")?,
            source_currency: code(source_currency, 3, "source_currency")?,
            dest_currency: code(dest_currency, 3, "dest_currency")?,
        })
    }

    /// Sending country code.
    #[must_use]
    pub fn source_country(&self) -> &str {
        &self.source_country
    }

    /// Receiving country code.
    #[must_use]
    pub fn dest_country(&self) -> &str {
        &self.dest_country
    }

    /// Currency debited from the sender.
    #[must_use]
    pub fn source_currency(&self) -> &str {
        &self.source_currency
    }

    /// Currency credited to the recipient.
    #[must_use]
    pub fn dest_currency(&self) -> &str {
        &self.dest_currency
    }
}

// Wire shape; deserialization re-validates through `Corridor::new`.
#[derive(Deserialize)]
struct RawCorridor {
    source_country: String,
    dest_country: String,
    source_currency: String,
    dest_currency: String,
}

impl TryFrom<RawCorridor> for Corridor {
    type Error = RemesaError;

    fn try_from(raw: RawCorridor) -> Result<Self, Self::Error> {
        Self::new(
            &raw.source_country,
            &raw.dest_country,
            &raw.source_currency,
            &raw.dest_currency,
        )
    }
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{} {}/{}",
            self.source_country, self.dest_country, self.source_currency, self.dest_currency
        )
    }
}

fn code(raw: &str, len: usize, field: &str) -> Result<String, RemesaError> {
    let trimmed = raw.trim();
    if trimmed.len() != len || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(RemesaError::invalid_request(format!(
            "{field} must be {len} ASCII letters, got {raw:?}"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}
