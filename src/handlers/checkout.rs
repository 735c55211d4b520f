use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use crate::db::{queries, AppState};
use crate::error::{msg, AppError, OptionExt, Result};
use crate::extractors::Json;
use crate::gateway::{
    Callbacks, CheckoutRequest as GatewayCheckout, CreditCard, CustomerDetails, ItemDetail,
    TransactionDetails,
};
use crate::id::generate_order_id;
use crate::models::{CreatePayment, Payment};

/// Checkout request. `plan_id` resolves by plan id first, then slug.
/// Payer references are optional context; customer fields are best-effort
/// display data for the gateway's checkout UI.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub plan_id: String,
    #[serde(default)]
    pub employer_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub customer: Option<CustomerInfo>,
    #[serde(default)]
    pub enabled_payments: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub token: String,
    pub redirect_url: String,
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
}

/// Create a gateway transaction for a plan and persist the pending payment.
///
/// Deliberately not idempotent: every call is a distinct checkout attempt
/// with a fresh order id. The gateway call happens before the insert, so a
/// gateway failure leaves no partial row behind.
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    // The pool slot is released before the gateway round-trip; a slow
    // gateway must not starve notification handling.
    let plan = {
        let conn = state.db.get()?;
        queries::resolve_plan(&conn, &request.plan_id)?.or_not_found(msg::PLAN_NOT_FOUND)?
    };

    if plan.amount <= 0 {
        return Err(AppError::BadRequest(msg::INVALID_PLAN_AMOUNT.into()));
    }

    let order_id = generate_order_id(&plan.id);

    let customer = request.customer.unwrap_or_default();
    let gateway_request = GatewayCheckout {
        transaction_details: TransactionDetails {
            order_id: order_id.clone(),
            gross_amount: plan.amount,
        },
        item_details: vec![ItemDetail {
            id: plan.id.clone(),
            price: plan.amount,
            quantity: 1,
            name: format!("{} subscription ({})", plan.name, plan.interval),
        }],
        customer_details: CustomerDetails {
            first_name: customer.first_name.unwrap_or_else(|| "Guest".to_string()),
            last_name: customer.last_name.unwrap_or_default(),
            email: customer.email,
            phone: customer.phone,
        },
        credit_card: CreditCard { secure: true },
        callbacks: Callbacks {
            finish: format!("{}/payments/finish", state.base_url),
            pending: format!("{}/payments/pending", state.base_url),
            error: format!("{}/payments/error", state.base_url),
        },
        enabled_payments: request.enabled_payments,
    };

    let session = state.gateway.create_transaction(&gateway_request).await?;

    let conn = state.db.get()?;
    let payment = queries::create_payment(
        &conn,
        &CreatePayment {
            order_id,
            plan_id: plan.id,
            employer_id: request.employer_id,
            user_id: request.user_id,
            gross_amount: plan.amount,
            currency: plan.currency,
            token: Some(session.token.clone()),
            redirect_url: Some(session.redirect_url.clone()),
        },
    )?;

    tracing::info!(
        "Checkout created: order_id={} plan={} amount={} {}",
        payment.order_id,
        payment.plan_id,
        payment.gross_amount,
        payment.currency
    );

    Ok(Json(CheckoutResponse {
        token: session.token,
        redirect_url: session.redirect_url,
        order_id: payment.order_id,
        amount: payment.gross_amount,
        currency: payment.currency,
    }))
}

/// Return the full payment record for client-side polling until a terminal
/// status is reached.
pub async fn get_payment(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Payment>> {
    let conn = state.db.get()?;
    let payment = queries::get_payment_by_order_id(&conn, &order_id)?
        .or_not_found(msg::PAYMENT_NOT_FOUND)?;
    Ok(Json(payment))
}
