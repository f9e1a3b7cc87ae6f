//! Transaction value objects and amount handling.

use std::collections::BTreeMap;

use std::str::FromStr;

use rand::rngs::OsRng;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::MINOR_UNITS_PER_MAJOR;
use crate::enums::TransactionOutcome;

/// Length of generated request codes.
pub const DEFAULT_REQUEST_CODE_LENGTH: usize = 12;

const REQUEST_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random request code of `len` characters from `A-Z0-9`.
///
/// Draws from the OS RNG so codes from concurrent processes do not collide in practice.
pub fn generate_request_code(len: usize) -> String {
    (0..len)
        .map(|_| {
            let i = OsRng.gen_range(0..REQUEST_CODE_ALPHABET.len());
            REQUEST_CODE_ALPHABET[i] as char
        })
        .collect()
}

/// Amount expressed in minor units (hundredths of the major unit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MinorUnit(pub i64);

impl MinorUnit {
    /// Scale a major-unit amount by 100, rounding half-cents away from zero.
    ///
    /// Returns `None` for negative or unrepresentable amounts.
    pub fn from_major(amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return None;
        }
        amount
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
    }

    /// Parse a wire amount, treating anything non-numeric as zero.
    ///
    /// Signed integers are taken as-is; decimal text is rounded to a whole
    /// number of minor units.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        let Some(s) = raw.map(str::trim) else {
            return Self::default();
        };
        s.parse::<i64>()
            .ok()
            .or_else(|| {
                Decimal::from_str(s).ok().and_then(|d| {
                    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                        .to_i64()
                })
            })
            .map(Self)
            .unwrap_or_default()
    }

    pub fn to_major(&self) -> Decimal {
        (Decimal::from(self.0) / Decimal::from(MINOR_UNITS_PER_MAJOR)).normalize()
    }
}

impl std::fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transaction the caller wants to charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Unique per logical transaction. Uniqueness is the caller's responsibility.
    pub request_code: String,

    /// Merchant order reference.
    pub order_code: String,

    /// Amount in major units. Must be non-negative.
    pub amount: Decimal,

    /// Custom data, sent under the `user_` prefix.
    #[serde(default)]
    pub data: BTreeMap<String, String>,

    /// Extra gateway fields, sent under the `vpc_` prefix.
    #[serde(default)]
    pub gateway_data: BTreeMap<String, String>,
}

impl TransactionRequest {
    /// Create a request with a freshly generated request code.
    pub fn new(order_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            request_code: generate_request_code(DEFAULT_REQUEST_CODE_LENGTH),
            order_code: order_code.into(),
            amount,
            data: BTreeMap::new(),
            gateway_data: BTreeMap::new(),
        }
    }

    pub fn with_request_code(mut self, request_code: impl Into<String>) -> Self {
        self.request_code = request_code.into();
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_gateway_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.gateway_data.insert(key.into(), value.into());
        self
    }
}

/// The engine's view of a processed gateway response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub outcome: TransactionOutcome,

    /// Echoed request code.
    pub request_code: String,

    /// Echoed order code.
    pub order_code: String,

    /// Amount in major units, reconstructed from the minor-unit wire value.
    pub amount: Decimal,

    /// Gateway fields, prefix stripped.
    pub gateway_data: BTreeMap<String, String>,

    /// Custom fields, prefix stripped, reserved metadata keys excluded.
    pub data: BTreeMap<String, String>,
}
