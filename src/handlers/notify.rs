//! Gateway webhook endpoint.
//!
//! The gateway retries any non-2xx response, so this endpoint always
//! answers HTTP 200; the business outcome travels only in the JSON body.
//! Signature verification runs first, unconditionally, before any database
//! access.

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::db::{
    queries::{self, NotificationOutcome, NotificationUpdate},
    AppState,
};
use crate::extractors::Json;
use crate::gateway::{map_status, Notification};

const PROVIDER_TAG: &str = "gateway";

/// Business-level outcome carried in the 200 body.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(rename = "orderId", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl NotifyResponse {
    fn accepted(order_id: String, status: String) -> Self {
        Self {
            ok: true,
            reason: None,
            order_id: Some(order_id),
            status: Some(status),
        }
    }

    fn rejected(reason: &'static str) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
            order_id: None,
            status: None,
        }
    }
}

pub async fn handle_notification(
    State(state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    (StatusCode::OK, Json(process_notification(&state, &body)))
}

fn process_notification(state: &AppState, body: &[u8]) -> NotifyResponse {
    let raw: serde_json::Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Notification rejected: invalid JSON: {}", e);
            return NotifyResponse::rejected("INVALID_PAYLOAD");
        }
    };

    let notification: Notification = match serde_json::from_value(raw.clone()) {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!("Notification rejected: malformed fields: {}", e);
            return NotifyResponse::rejected("INVALID_PAYLOAD");
        }
    };

    // Trust boundary: nothing below runs without a valid signature.
    if !state.gateway.verify_notification(&notification) {
        tracing::warn!(
            "Notification rejected: bad signature for order_id={:?}",
            notification.order_id
        );
        return NotifyResponse::rejected("INVALID_SIGNATURE");
    }

    // Verified above, so the required fields are present.
    let order_id = notification.order_id.clone().unwrap_or_default();

    let status = map_status(&notification.raw_status(), notification.fraud_status.as_deref());

    let meta = serde_json::json!({
        "provider": PROVIDER_TAG,
        "payload": raw,
    })
    .to_string();

    let update = NotificationUpdate {
        status: status.clone(),
        method: notification.payment_type.clone(),
        transaction_id: notification.transaction_id.clone(),
        fraud_status: notification.fraud_status.clone(),
        meta,
    };

    let conn = match state.db.get() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Notification dropped: pool error: {}", e);
            return NotifyResponse::rejected("INTERNAL");
        }
    };

    match queries::apply_notification(&conn, &order_id, &update) {
        Ok(NotificationOutcome::Applied) => {
            tracing::info!("Notification applied: order_id={} status={}", order_id, status);
            NotifyResponse::accepted(order_id, status.to_string())
        }
        Ok(NotificationOutcome::UnknownOrder) => {
            // Either an integration bug or a forgery that somehow passed the
            // signature check; worth an alert either way.
            tracing::warn!("Notification for unknown order_id={}", order_id);
            NotifyResponse::rejected("UNKNOWN_ORDER")
        }
        Ok(NotificationOutcome::Regression { from }) => {
            tracing::warn!(
                "Notification rejected: would regress order_id={} from {} to {}",
                order_id,
                from,
                status
            );
            NotifyResponse::rejected("STATUS_REGRESSION")
        }
        Ok(NotificationOutcome::Conflict) => {
            tracing::warn!(
                "Notification lost a concurrent update race: order_id={}",
                order_id
            );
            NotifyResponse::rejected("CONFLICT")
        }
        Err(e) => {
            tracing::error!("Notification dropped: db error: {}", e);
            NotifyResponse::rejected("INTERNAL")
        }
    }
}
