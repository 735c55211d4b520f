//! Inbound payment-status notifications.
//!
//! Verification is the trust boundary for the whole notification pipeline:
//! the keyed digest is checked first, unconditionally, before any database
//! mutation. A failed check is a business rejection, never a transport
//! failure - the webhook endpoint still answers 200 so the gateway does not
//! retry a condition that will never resolve.

use serde::Deserialize;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use crate::models::PaymentStatus;

/// Raw webhook payload as delivered by the gateway.
///
/// The four signature fields are required strings; everything else is
/// best-effort. All fields are optional at parse time so that presence can
/// be checked explicitly during verification instead of failing the JSON
/// decode.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub order_id: Option<String>,
    pub status_code: Option<String>,
    pub gross_amount: Option<String>,
    pub signature_key: Option<String>,
    pub transaction_status: Option<String>,
    pub payment_type: Option<String>,
    pub fraud_status: Option<String>,
    pub transaction_id: Option<String>,
}

impl Notification {
    /// Check authenticity: all four required fields present and the
    /// signature equal to the keyed digest. Any absence or mismatch
    /// short-circuits to `false`.
    pub fn verify(&self, server_key: &str) -> bool {
        let (Some(order_id), Some(status_code), Some(gross_amount), Some(signature)) = (
            self.order_id.as_deref(),
            self.status_code.as_deref(),
            self.gross_amount.as_deref(),
            self.signature_key.as_deref(),
        ) else {
            return false;
        };

        let expected = compute_signature(server_key, order_id, status_code, gross_amount);

        // Constant-time comparison; the digest length (128 hex chars) is
        // not secret, so the length check alone may be variable-time.
        expected.as_bytes().len() == signature.as_bytes().len()
            && bool::from(expected.as_bytes().ct_eq(signature.as_bytes()))
    }

    /// Parse `transaction_status` into the raw status sum type.
    /// An absent field is treated as unknown-empty and maps to itself.
    pub fn raw_status(&self) -> RawTransactionStatus {
        RawTransactionStatus::parse(self.transaction_status.as_deref().unwrap_or(""))
    }
}

/// The keyed digest over the canonical ordered field set:
/// `sha512(order_id + status_code + gross_amount + server_key)`, hex-encoded.
pub fn compute_signature(
    server_key: &str,
    order_id: &str,
    status_code: &str,
    gross_amount: &str,
) -> String {
    let mut hasher = Sha512::new();
    hasher.update(order_id.as_bytes());
    hasher.update(status_code.as_bytes());
    hasher.update(gross_amount.as_bytes());
    hasher.update(server_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// The gateway's raw transaction-status vocabulary, one variant per known
/// value plus a pass-through for anything unrecognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTransactionStatus {
    Capture,
    Settlement,
    Pending,
    Deny,
    Cancel,
    Expire,
    Failure,
    Refund,
    Chargeback,
    Unknown(String),
}

impl RawTransactionStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "capture" => Self::Capture,
            "settlement" => Self::Settlement,
            "pending" => Self::Pending,
            "deny" => Self::Deny,
            "cancel" => Self::Cancel,
            "expire" => Self::Expire,
            "failure" => Self::Failure,
            "refund" => Self::Refund,
            "chargeback" => Self::Chargeback,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Translate the gateway's raw status vocabulary into the canonical payment
/// status.
///
/// `capture` is the one compound rule: the fraud verdict decides the
/// outcome, and an unknown or absent fraud status on a captured payment is
/// never treated as success - it maps to `rejected`. Unrecognized raw
/// statuses pass through unchanged.
pub fn map_status(raw: &RawTransactionStatus, fraud_status: Option<&str>) -> PaymentStatus {
    match raw {
        RawTransactionStatus::Capture => match fraud_status {
            Some("accept") => PaymentStatus::Settlement,
            Some("challenge") => PaymentStatus::Challenge,
            _ => PaymentStatus::Rejected,
        },
        RawTransactionStatus::Settlement => PaymentStatus::Settlement,
        RawTransactionStatus::Pending => PaymentStatus::Pending,
        RawTransactionStatus::Deny => PaymentStatus::Deny,
        RawTransactionStatus::Cancel => PaymentStatus::Cancel,
        RawTransactionStatus::Expire => PaymentStatus::Expire,
        RawTransactionStatus::Failure => PaymentStatus::Failure,
        RawTransactionStatus::Refund => PaymentStatus::Refund,
        RawTransactionStatus::Chargeback => PaymentStatus::Chargeback,
        RawTransactionStatus::Unknown(s) => PaymentStatus::Other(s.clone()),
    }
}
