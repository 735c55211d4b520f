use serde::{Deserialize, Serialize};

/// The record of one checkout attempt and its lifecycle, keyed externally
/// by `order_id`. Payments are a financial audit record and are never
/// deleted; their status only moves forward under authenticated gateway
/// notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    /// External-facing correlation key, unique, <= 50 chars, never reused
    pub order_id: String,
    pub plan_id: String,
    pub employer_id: Option<String>,
    pub user_id: Option<String>,
    pub status: PaymentStatus,
    /// Equals the plan amount at creation time (smallest currency unit)
    pub gross_amount: i64,
    pub currency: String,
    /// Payment channel, known only once a notification arrives
    pub method: Option<String>,
    pub transaction_id: Option<String>,
    pub fraud_status: Option<String>,
    /// Gateway-issued token the client uses to open the checkout UI
    pub token: Option<String>,
    pub redirect_url: Option<String>,
    /// Last raw notification payload plus provider tag, kept for audit
    pub meta: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Data required to insert a new pending payment
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub order_id: String,
    pub plan_id: String,
    pub employer_id: Option<String>,
    pub user_id: Option<String>,
    pub gross_amount: i64,
    pub currency: String,
    pub token: Option<String>,
    pub redirect_url: Option<String>,
}

/// Canonical payment status vocabulary.
///
/// `Other` carries gateway statuses we do not recognize: the status mapper
/// passes unrecognized raw values through unchanged rather than guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Settlement,
    /// Captured but flagged for manual fraud review
    Challenge,
    Deny,
    Cancel,
    Expire,
    Failure,
    Refund,
    Chargeback,
    /// Captured with an unknown fraud status - fail-safe, never success
    Rejected,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Settlement => "settlement",
            Self::Challenge => "challenge",
            Self::Deny => "deny",
            Self::Cancel => "cancel",
            Self::Expire => "expire",
            Self::Failure => "failure",
            Self::Refund => "refund",
            Self::Chargeback => "chargeback",
            Self::Rejected => "rejected",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "settlement" => Self::Settlement,
            "challenge" => Self::Challenge,
            "deny" => Self::Deny,
            "cancel" => Self::Cancel,
            "expire" => Self::Expire,
            "failure" => Self::Failure,
            "refund" => Self::Refund,
            "chargeback" => Self::Chargeback,
            "rejected" => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    /// Terminal statuses admit no further transitions at all.
    ///
    /// `Settlement` is semi-terminal: money moved, but it can still be
    /// clawed back by a refund or chargeback.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Deny
                | Self::Cancel
                | Self::Expire
                | Self::Failure
                | Self::Refund
                | Self::Chargeback
                | Self::Rejected
        )
    }

    /// Whether a notification may move a payment from `self` to `next`.
    ///
    /// Re-delivery of the current status is always a benign rewrite.
    /// Non-terminal states (`pending`, `challenge`, unknown) accept any
    /// forward move except a regression back to `pending`; `settlement`
    /// accepts only `refund` and `chargeback`.
    pub fn accepts_transition_to(&self, next: &PaymentStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            Self::Pending => true,
            Self::Challenge | Self::Other(_) => !matches!(next, Self::Pending),
            Self::Settlement => matches!(next, Self::Refund | Self::Chargeback),
            _ => false,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PaymentStatus::parse(&s))
    }
}
