pub mod checkout;
pub mod notify;
pub mod plans;

pub use checkout::{create_checkout, get_payment};
pub use notify::handle_notification;
pub use plans::list_plans;

use axum::{
    routing::{get, post},
    Router,
};

use crate::db::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plans", get(list_plans))
        .route("/payments/checkout", post(create_checkout))
        .route("/payments/notify", post(handle_notification))
        .route("/payments/{order_id}", get(get_payment))
}
