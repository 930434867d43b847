//! Price Result Repository
//!
//! Append-only writes to the `price_results` table.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::gateway::ResultStore;
use pricecheck_models::{NewPriceResult, PriceResult};
use pricecheck_utils::PriceCheckResult;

pub struct PriceResultRepository {
    pool: PgPool,
}

impl PriceResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one quote record
    pub async fn create(&self, record: &NewPriceResult) -> PriceCheckResult<PriceResult> {
        let stored: PriceResult = sqlx::query_as(
            r#"
            INSERT INTO price_results
                (id, user_id, manufacturer, part_no, shop, price, currency, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, manufacturer, part_no AS part_number,
                      shop, price, currency, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.user_id)
        .bind(&record.manufacturer)
        .bind(&record.part_number)
        .bind(&record.shop)
        .bind(record.price)
        .bind(&record.currency)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }
}

#[async_trait]
impl ResultStore for PriceResultRepository {
    async fn insert(&self, record: &NewPriceResult) -> PriceCheckResult<PriceResult> {
        self.create(record).await
    }
}
