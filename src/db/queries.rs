//! Database operations for the plan catalog and the payment store.

use rusqlite::{params, Connection};

use super::from_row::{query_all, query_one, PAYMENT_COLS, PLAN_COLS};
use crate::error::{AppError, Result};
use crate::id::EntityType;
use crate::models::{CreatePayment, CreatePlan, Payment, PaymentStatus, Plan};

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

// ============ Plans ============

pub fn create_plan(conn: &Connection, input: &CreatePlan) -> Result<Plan> {
    let id = EntityType::Plan.gen_id();
    let now = now();

    conn.execute(
        "INSERT INTO plans (id, slug, name, amount, currency, interval, active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)",
        params![
            &id,
            &input.slug,
            &input.name,
            input.amount,
            &input.currency,
            input.interval.as_str(),
            now
        ],
    )?;

    Ok(Plan {
        id,
        slug: input.slug.clone(),
        name: input.name.clone(),
        amount: input.amount,
        currency: input.currency.clone(),
        interval: input.interval,
        active: true,
        created_at: now,
        updated_at: now,
    })
}

pub fn get_plan_by_id(conn: &Connection, id: &str) -> Result<Option<Plan>> {
    query_one(
        conn,
        &format!("SELECT {} FROM plans WHERE id = ?1", PLAN_COLS),
        &[&id],
    )
}

pub fn get_plan_by_slug(conn: &Connection, slug: &str) -> Result<Option<Plan>> {
    query_one(
        conn,
        &format!("SELECT {} FROM plans WHERE slug = ?1", PLAN_COLS),
        &[&slug],
    )
}

/// Resolve a plan reference by id first, then by slug. First match wins.
pub fn resolve_plan(conn: &Connection, plan_ref: &str) -> Result<Option<Plan>> {
    if let Some(plan) = get_plan_by_id(conn, plan_ref)? {
        return Ok(Some(plan));
    }
    get_plan_by_slug(conn, plan_ref)
}

pub fn list_active_plans(conn: &Connection) -> Result<Vec<Plan>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM plans WHERE active = 1 ORDER BY amount ASC",
            PLAN_COLS
        ),
        &[],
    )
}

/// Deactivate a plan without touching its payments. The safe alternative to
/// deletion once a plan has been referenced.
pub fn deactivate_plan(conn: &Connection, id: &str) -> Result<bool> {
    let affected = conn.execute(
        "UPDATE plans SET active = 0, updated_at = ?1 WHERE id = ?2",
        params![now(), id],
    )?;
    Ok(affected > 0)
}

/// Delete a plan. Rejected with a conflict if any payment references it
/// (foreign-key protection); callers should deactivate instead.
pub fn delete_plan(conn: &Connection, id: &str) -> Result<bool> {
    match conn.execute("DELETE FROM plans WHERE id = ?1", params![id]) {
        Ok(affected) => Ok(affected > 0),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(AppError::Conflict(crate::error::msg::PLAN_REFERENCED.into()))
        }
        Err(e) => Err(e.into()),
    }
}

// ============ Payments ============

/// Insert a new payment in `pending` status. Called only after the gateway
/// transaction has been created, so the client-visible checkout flow always
/// has a server-side record to reconcile against.
pub fn create_payment(conn: &Connection, input: &CreatePayment) -> Result<Payment> {
    let id = EntityType::Payment.gen_id();
    let now = now();

    conn.execute(
        "INSERT INTO payments (id, order_id, plan_id, employer_id, user_id, status, gross_amount, currency, token, redirect_url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
        params![
            &id,
            &input.order_id,
            &input.plan_id,
            &input.employer_id,
            &input.user_id,
            PaymentStatus::Pending.as_str(),
            input.gross_amount,
            &input.currency,
            &input.token,
            &input.redirect_url,
            now
        ],
    )?;

    Ok(Payment {
        id,
        order_id: input.order_id.clone(),
        plan_id: input.plan_id.clone(),
        employer_id: input.employer_id.clone(),
        user_id: input.user_id.clone(),
        status: PaymentStatus::Pending,
        gross_amount: input.gross_amount,
        currency: input.currency.clone(),
        method: None,
        transaction_id: None,
        fraud_status: None,
        token: input.token.clone(),
        redirect_url: input.redirect_url.clone(),
        meta: None,
        created_at: now,
        updated_at: now,
    })
}

pub fn get_payment_by_order_id(conn: &Connection, order_id: &str) -> Result<Option<Payment>> {
    query_one(
        conn,
        &format!("SELECT {} FROM payments WHERE order_id = ?1", PAYMENT_COLS),
        &[&order_id],
    )
}

/// Fields carried by an authenticated notification into the payment row.
#[derive(Debug, Clone)]
pub struct NotificationUpdate {
    /// Canonical status computed by the status mapper
    pub status: PaymentStatus,
    pub method: Option<String>,
    pub transaction_id: Option<String>,
    pub fraud_status: Option<String>,
    /// Raw notification payload plus provider tag, stored wholesale
    pub meta: String,
}

/// Outcome of applying a notification to the payment store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// Status moved forward (or was benignly re-written with the same value)
    Applied,
    /// No payment row exists for this order id
    UnknownOrder,
    /// The transition would regress a terminal or settled status
    Regression { from: PaymentStatus },
    /// A concurrent notification changed the row between read and write
    Conflict,
}

/// Apply an authenticated notification to the payment keyed by `order_id`.
///
/// Update-only, never insert. The status state machine rejects regressive
/// transitions; an accepted update overwrites `status` and `meta`, merges
/// `method`/`transaction_id`/`fraud_status` only when present (known values
/// are never overwritten with absence), and re-stamps `updated_at`. The
/// write is compare-and-swap on the previously read status so concurrent
/// deliveries for the same order cannot interleave.
pub fn apply_notification(
    conn: &Connection,
    order_id: &str,
    update: &NotificationUpdate,
) -> Result<NotificationOutcome> {
    let Some(payment) = get_payment_by_order_id(conn, order_id)? else {
        return Ok(NotificationOutcome::UnknownOrder);
    };

    if !payment.status.accepts_transition_to(&update.status) {
        return Ok(NotificationOutcome::Regression {
            from: payment.status,
        });
    }

    let affected = conn.execute(
        "UPDATE payments
         SET status = ?1,
             method = COALESCE(?2, method),
             transaction_id = COALESCE(?3, transaction_id),
             fraud_status = COALESCE(?4, fraud_status),
             meta = ?5,
             updated_at = ?6
         WHERE order_id = ?7 AND status = ?8",
        params![
            update.status.as_str(),
            &update.method,
            &update.transaction_id,
            &update.fraud_status,
            &update.meta,
            now(),
            order_id,
            payment.status.as_str(),
        ],
    )?;

    if affected == 0 {
        return Ok(NotificationOutcome::Conflict);
    }

    Ok(NotificationOutcome::Applied)
}
