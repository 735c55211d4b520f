use serde::{Deserialize, Serialize};

/// A subscription tier with a fixed price and billing interval.
///
/// Amounts are integers in the smallest currency unit; currency values are
/// never represented as floating point anywhere in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    /// Unique human-readable identifier (e.g., "starter")
    pub slug: String,
    pub name: String,
    /// Price in the smallest currency unit (non-negative)
    pub amount: i64,
    /// ISO 4217 currency code (e.g., "IDR")
    pub currency: String,
    pub interval: BillingInterval,
    /// Inactive plans are hidden from the catalog but keep their payments
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Data required to create a new plan
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlan {
    pub slug: String,
    pub name: String,
    pub amount: i64,
    pub currency: String,
    pub interval: BillingInterval,
}

/// Billing interval for a subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Month,
    Year,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl std::str::FromStr for BillingInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown billing interval: {}", other)),
        }
    }
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
