//! Schema setup for the financial records table

use sqlx::PgPool;

/// Create the records table and its indexes if they do not exist.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running financial record migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS financial_records (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            record_type TEXT NOT NULL CHECK (record_type IN ('income', 'expense')),
            member_name TEXT NOT NULL,
            item TEXT NOT NULL,
            details TEXT,
            location TEXT NOT NULL,
            unit_price DOUBLE PRECISION NOT NULL CHECK (unit_price >= 0),
            quantity BIGINT NOT NULL CHECK (quantity >= 1),
            total_amount DOUBLE PRECISION GENERATED ALWAYS AS (unit_price * quantity) STORED,
            record_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            created_by TEXT NOT NULL CHECK (created_by ~ '^[0-9a-f]{24}$'),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_financial_records_listing
            ON financial_records (record_date DESC, created_at DESC)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_financial_records_location
            ON financial_records (location)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_financial_records_type
            ON financial_records (record_type)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Financial record migrations complete");
    Ok(())
}
