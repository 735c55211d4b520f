//! Row mapping trait and helpers for reducing boilerplate in queries.

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::models::{BillingInterval, Payment, PaymentStatus, Plan};

/// Trait for constructing a type from a database row.
///
/// Implementing this trait allows using the `query_one` and `query_all`
/// helper functions, reducing repetitive row mapping closures.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Query for a single optional result.
pub fn query_one<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Option<T>> {
    conn.query_row(sql, params, T::from_row)
        .optional()
        .map_err(Into::into)
}

/// Query for multiple results.
pub fn query_all<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, T::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ============ SQL SELECT Constants ============

pub const PLAN_COLS: &str =
    "id, slug, name, amount, currency, interval, active, created_at, updated_at";

pub const PAYMENT_COLS: &str = "id, order_id, plan_id, employer_id, user_id, status, gross_amount, currency, method, transaction_id, fraud_status, token, redirect_url, meta, created_at, updated_at";

// ============ FromRow Implementations ============

impl FromRow for Plan {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let interval: BillingInterval =
            row.get::<_, String>(5)?.parse().map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    5,
                    "interval".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?;
        Ok(Plan {
            id: row.get(0)?,
            slug: row.get(1)?,
            name: row.get(2)?,
            amount: row.get(3)?,
            currency: row.get(4)?,
            interval,
            active: row.get::<_, i64>(6)? != 0,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

impl FromRow for Payment {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Payment {
            id: row.get(0)?,
            order_id: row.get(1)?,
            plan_id: row.get(2)?,
            employer_id: row.get(3)?,
            user_id: row.get(4)?,
            status: PaymentStatus::parse(&row.get::<_, String>(5)?),
            gross_amount: row.get(6)?,
            currency: row.get(7)?,
            method: row.get(8)?,
            transaction_id: row.get(9)?,
            fraud_status: row.get(10)?,
            token: row.get(11)?,
            redirect_url: row.get(12)?,
            meta: row.get(13)?,
            created_at: row.get(14)?,
            updated_at: row.get(15)?,
        })
    }
}
