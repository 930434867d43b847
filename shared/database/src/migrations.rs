use anyhow::Result;
use sqlx::PgPool;

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<()> {
    tracing::info!("Running PostgreSQL migrations");

    // Append-only: rows are never updated or deleted by the service
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS price_results (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id TEXT NOT NULL,
            manufacturer TEXT NOT NULL,
            part_no TEXT NOT NULL,
            shop TEXT NOT NULL,
            price DOUBLE PRECISION,
            currency VARCHAR(3) NOT NULL DEFAULT 'EUR',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_price_results_user_id ON price_results(user_id)")
        .execute(pool)
        .await?;

    tracing::info!("PostgreSQL migrations completed successfully");
    Ok(())
}
