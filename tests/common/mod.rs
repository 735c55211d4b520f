//! Test utilities and fixtures for Hirebase payments integration tests

#![allow(dead_code)]

use axum::Router;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

pub use hirebase::db::{init_db, queries, AppState};
pub use hirebase::gateway::{compute_signature, GatewayClient, GatewayConfig};
pub use hirebase::models::*;

/// Server key used across notification tests.
pub const TEST_SERVER_KEY: &str = "test-secret";

/// Create an in-memory test database with schema initialized
pub fn setup_test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .expect("Failed to enable foreign keys");
    init_db(&conn).expect("Failed to initialize schema");
    conn
}

/// App state backed by an in-memory pool and a gateway client pointed at a
/// dead endpoint. Good for everything except live checkout calls.
pub fn create_test_app_state() -> AppState {
    create_test_app_state_with("http://127.0.0.1:1/snap/v1", 4)
}

/// App state with an explicit gateway base URL and pool size. Pair with
/// `spawn_stub_gateway` for the checkout success path, or a small pool to
/// exercise contention between handlers.
///
/// Uses a named shared-cache memory database so every pooled connection
/// sees the same data; the pool's idle connections keep it alive.
pub fn create_test_app_state_with(gateway_base_url: &str, pool_size: u32) -> AppState {
    let uri = format!(
        "file:hirebase-test-{}?mode=memory&cache=shared",
        uuid::Uuid::new_v4().as_simple()
    );
    let manager = SqliteConnectionManager::file(uri)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
    let pool = Pool::builder().max_size(pool_size).build(manager).unwrap();
    {
        let conn = pool.get().unwrap();
        init_db(&conn).unwrap();
    }

    AppState {
        db: pool,
        gateway: GatewayClient::new(GatewayConfig {
            server_key: TEST_SERVER_KEY.to_string(),
            base_url: gateway_base_url.to_string(),
        }),
        base_url: "http://localhost:3000".to_string(),
    }
}

/// Spawn a local HTTP server that plays the part of the payment gateway:
/// any transaction request gets a fixed token and redirect URL back.
/// Returns the base URL to hand to `create_test_app_state_with`.
pub async fn spawn_stub_gateway() -> String {
    let app = Router::new().route(
        "/transactions",
        axum::routing::post(|| async {
            axum::Json(serde_json::json!({
                "token": "tok_stub_1",
                "redirect_url": "https://gateway.example/redirect/tok_stub_1",
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub gateway");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Spawn a local server that accepts connections and never responds, so any
/// request to it stays in flight until the caller gives up.
pub async fn spawn_stalled_gateway() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stalled gateway");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            if let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        }
    });
    format!("http://{}", addr)
}

/// Create a Router with all payment endpoints
pub fn payments_app(state: AppState) -> Router {
    hirebase::handlers::router().with_state(state)
}

/// Create a test plan
pub fn create_test_plan(conn: &Connection, slug: &str, amount: i64) -> Plan {
    let input = CreatePlan {
        slug: slug.to_string(),
        name: format!("Test Plan {}", slug),
        amount,
        currency: "IDR".to_string(),
        interval: BillingInterval::Month,
    };
    queries::create_plan(conn, &input).expect("Failed to create test plan")
}

/// Create a pending test payment for a plan
pub fn create_test_payment(conn: &Connection, plan: &Plan, order_id: &str) -> Payment {
    let input = CreatePayment {
        order_id: order_id.to_string(),
        plan_id: plan.id.clone(),
        employer_id: None,
        user_id: None,
        gross_amount: plan.amount,
        currency: plan.currency.clone(),
        token: Some("tok_test".to_string()),
        redirect_url: Some("https://gateway.example/redirect/tok_test".to_string()),
    };
    queries::create_payment(conn, &input).expect("Failed to create test payment")
}

/// Build a signed notification body for the test server key.
pub fn signed_notification(
    order_id: &str,
    transaction_status: &str,
    gross_amount: i64,
) -> serde_json::Value {
    let gross = gross_amount.to_string();
    let signature = compute_signature(TEST_SERVER_KEY, order_id, "200", &gross);
    serde_json::json!({
        "order_id": order_id,
        "status_code": "200",
        "gross_amount": gross,
        "signature_key": signature,
        "transaction_status": transaction_status,
        "payment_type": "bank_transfer",
        "transaction_id": format!("txn-{}", order_id),
    })
}
