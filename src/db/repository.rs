//! Repository for response record database operations

use async_trait::async_trait;
use sqlx::PgPool;

use super::DbError;
use super::models::{RecordTotalsRow, VerdictTotalsRow, into_stats};
use crate::model::{GuardStats, ResponseRecord};
use crate::service::monitoring::{LogSink, LogSinkError};

/// Repository for response records, used as the PostgreSQL log sink
#[derive(Clone)]
pub struct ResponseRecordRepository {
    pool: PgPool,
}

impl ResponseRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a response record; re-inserting the same id is a no-op
    pub async fn insert(&self, record: &ResponseRecord) -> Result<(), DbError> {
        let record_json =
            serde_json::to_value(record).map_err(|e| DbError::Serialization(e.to_string()))?;
        let claim_count = i32::try_from(record.claims.len()).unwrap_or(i32::MAX);

        sqlx::query(
            r#"
            INSERT INTO response_records (
                id, created_at, query, risk_level, risk_score, claim_count, corrected, record
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(record.id)
        .bind(record.created_at)
        .bind(&record.query)
        .bind(record.risk.risk_level.as_str())
        .bind(record.risk.risk_score)
        .bind(claim_count)
        .bind(record.corrected.is_some())
        .bind(&record_json)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, "Inserted response record");
        Ok(())
    }

    /// Aggregate statistics over all stored records
    pub async fn stats(&self) -> Result<GuardStats, DbError> {
        let totals: RecordTotalsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) AS total_requests,
                COUNT(*) FILTER (WHERE corrected) AS corrections_triggered,
                AVG(risk_score) AS average_risk_score,
                COUNT(*) FILTER (WHERE risk_level = 'Low') AS low,
                COUNT(*) FILTER (WHERE risk_level = 'Medium') AS medium,
                COUNT(*) FILTER (WHERE risk_level = 'High') AS high,
                COALESCE(SUM(claim_count), 0)::BIGINT AS total_claims
            FROM response_records
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let verdicts: VerdictTotalsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE v->>'status' = 'Supported') AS supported,
                COUNT(*) FILTER (WHERE v->>'status' = 'Contradicted') AS contradicted,
                COUNT(*) FILTER (WHERE v->>'status' = 'Unverifiable') AS unverifiable
            FROM response_records,
                 jsonb_array_elements(record->'verification_results') AS v
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(into_stats(totals, verdicts))
    }

    /// Check the connection with a trivial query
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl LogSink for ResponseRecordRepository {
    async fn record(&self, record: &ResponseRecord) -> Result<(), LogSinkError> {
        Ok(self.insert(record).await?)
    }

    async fn stats(&self) -> Result<GuardStats, LogSinkError> {
        Ok(ResponseRecordRepository::stats(self).await?)
    }

    async fn ping(&self) -> Result<(), LogSinkError> {
        Ok(ResponseRecordRepository::ping(self).await?)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
