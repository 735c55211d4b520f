use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Gateway connection settings. Owned by the composition root and injected
/// into `GatewayClient`; nothing in this crate holds a global instance.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server key used both for API auth and notification signatures
    pub server_key: String,
    /// API base, e.g. "https://app.sandbox.midtrans.com/snap/v1"
    pub base_url: String,
}

/// Client for the gateway's Snap-style transaction API.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    config: GatewayConfig,
}

/// Wire request for transaction creation.
#[derive(Debug, Serialize)]
pub struct CheckoutRequest {
    pub transaction_details: TransactionDetails,
    pub item_details: Vec<ItemDetail>,
    pub customer_details: CustomerDetails,
    pub credit_card: CreditCard,
    pub callbacks: Callbacks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_payments: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct TransactionDetails {
    pub order_id: String,
    pub gross_amount: i64,
}

#[derive(Debug, Serialize)]
pub struct ItemDetail {
    pub id: String,
    pub price: i64,
    pub quantity: u32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreditCard {
    pub secure: bool,
}

#[derive(Debug, Serialize)]
pub struct Callbacks {
    pub finish: String,
    pub pending: String,
    pub error: String,
}

/// Successful transaction-creation response.
#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub token: String,
    pub redirect_url: String,
}

/// Gateway error body; `error_messages` carries the diagnostic detail we
/// surface to callers.
#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn server_key(&self) -> &str {
        &self.config.server_key
    }

    /// Create a gateway transaction and return the checkout token and
    /// redirect URL. Exactly one HTTP call; any failure surfaces the
    /// gateway's own diagnostic where extractable and leaves no local state.
    pub async fn create_transaction(&self, request: &CheckoutRequest) -> Result<CheckoutSession> {
        let url = format!("{}/transactions", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.server_key, Some(""))
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("transaction request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<GatewayErrorBody>(&text)
                .ok()
                .filter(|b| !b.error_messages.is_empty())
                .map(|b| b.error_messages.join("; "))
                .unwrap_or(text);
            return Err(AppError::Gateway(format!(
                "transaction rejected ({}): {}",
                status, detail
            )));
        }

        let session: CheckoutSession = response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("failed to parse gateway response: {}", e)))?;

        Ok(session)
    }

    /// Verify a notification's signature against this client's server key.
    pub fn verify_notification(&self, notification: &super::Notification) -> bool {
        notification.verify(&self.config.server_key)
    }
}
