use rusqlite::Connection;

/// Initialize the database schema.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        -- Subscription plans (the catalog). Plans referenced by payments are
        -- protected by ON DELETE RESTRICT: deletion is rejected, deactivate
        -- instead.
        CREATE TABLE IF NOT EXISTS plans (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            amount INTEGER NOT NULL CHECK (amount >= 0),
            currency TEXT NOT NULL,
            interval TEXT NOT NULL CHECK (interval IN ('month', 'year')),
            active INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_plans_slug ON plans(slug);
        CREATE INDEX IF NOT EXISTS idx_plans_active ON plans(id) WHERE active = 1;

        -- Payments: one row per checkout attempt, keyed externally by
        -- order_id. Financial audit record - rows are never deleted.
        CREATE TABLE IF NOT EXISTS payments (
            id TEXT PRIMARY KEY,
            order_id TEXT NOT NULL UNIQUE,
            plan_id TEXT NOT NULL REFERENCES plans(id) ON DELETE RESTRICT,
            employer_id TEXT,
            user_id TEXT,
            status TEXT NOT NULL,
            gross_amount INTEGER NOT NULL CHECK (gross_amount >= 0),
            currency TEXT NOT NULL,
            method TEXT,
            transaction_id TEXT,
            fraud_status TEXT,
            token TEXT,
            redirect_url TEXT,
            meta TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_payments_plan ON payments(plan_id);
        CREATE INDEX IF NOT EXISTS idx_payments_employer ON payments(employer_id);
        CREATE INDEX IF NOT EXISTS idx_payments_status ON payments(status);
        "#,
    )?;
    Ok(())
}
