//! Request logging and analytics sinks

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::db::DbError;
use crate::model::{GuardStats, ResponseRecord, StatsAccumulator};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LogSinkError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Log store unavailable: {0}")]
    Unavailable(String),
}

/// Destination for completed response records
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Store one record
    async fn record(&self, record: &ResponseRecord) -> Result<(), LogSinkError>;

    /// Summarize everything stored so far
    async fn stats(&self) -> Result<GuardStats, LogSinkError>;

    /// Check the sink can accept records
    async fn ping(&self) -> Result<(), LogSinkError> {
        Ok(())
    }

    /// Short name used in logs and health output
    fn name(&self) -> &'static str;
}

/// Process-local log store
///
/// Records are folded into running totals on arrival and then dropped, so
/// memory stays constant however many requests are served.
#[derive(Default)]
pub struct InMemoryLogSink {
    totals: RwLock<StatsAccumulator>,
}

impl InMemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LogSink for InMemoryLogSink {
    async fn record(&self, record: &ResponseRecord) -> Result<(), LogSinkError> {
        self.totals.write().await.add(record);
        Ok(())
    }

    async fn stats(&self) -> Result<GuardStats, LogSinkError> {
        Ok(self.totals.read().await.snapshot())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Hand a record to the sink without waiting for it
///
/// Failures are logged and never reach the caller. The returned handle may be
/// dropped; the write still completes.
pub fn dispatch_record(sink: Arc<dyn LogSink>, record: ResponseRecord) -> JoinHandle<()> {
    tokio::spawn(async move {
        match sink.record(&record).await {
            Ok(()) => {
                tracing::debug!(id = %record.id, sink = sink.name(), "Response record logged");
            }
            Err(e) => {
                tracing::warn!(
                    id = %record.id,
                    sink = sink.name(),
                    error = %e,
                    "Failed to log response record"
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    use super::*;
    use crate::model::{RiskAssessment, RiskLevel};

    fn record(level: RiskLevel, score: f64) -> ResponseRecord {
        ResponseRecord {
            id: Uuid::new_v4(),
            query: "Who wrote Hamlet?".to_string(),
            draft: "William Shakespeare wrote Hamlet.".to_string(),
            claims: vec![],
            verdicts: vec![],
            risk: RiskAssessment {
                risk_level: level,
                risk_score: score,
                contributing_claims: vec![],
            },
            corrected: None,
            warnings: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_in_memory_sink_summarizes_records() {
        let sink = InMemoryLogSink::new();
        sink.record(&record(RiskLevel::Low, 0.0)).await.unwrap();
        sink.record(&record(RiskLevel::High, 1.0)).await.unwrap();

        let stats = sink.stats().await.unwrap();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.risk_levels.low, 1);
        assert_eq!(stats.risk_levels.high, 1);
        assert!((stats.average_risk_score - 0.5).abs() < 1e-9);
        assert!(sink.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_in_memory_sink_totals_after_many_records() {
        let sink = InMemoryLogSink::new();
        for i in 0..1000 {
            let level = if i % 4 == 0 { RiskLevel::High } else { RiskLevel::Low };
            let score = if level == RiskLevel::High { 1.0 } else { 0.0 };
            sink.record(&record(level, score)).await.unwrap();
        }

        let stats = sink.stats().await.unwrap();
        assert_eq!(stats.total_requests, 1000);
        assert_eq!(stats.risk_levels.high, 250);
        assert_eq!(stats.risk_levels.low, 750);
        assert!((stats.average_risk_score - 0.25).abs() < 1e-9);
    }

    /// Sink that rejects every record and reports each attempt
    struct FailingSink(mpsc::UnboundedSender<Uuid>);

    #[async_trait]
    impl LogSink for FailingSink {
        async fn record(&self, record: &ResponseRecord) -> Result<(), LogSinkError> {
            let _ = self.0.send(record.id);
            Err(LogSinkError::Unavailable("disk full".to_string()))
        }

        async fn stats(&self) -> Result<GuardStats, LogSinkError> {
            Err(LogSinkError::Unavailable("disk full".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_dispatch_swallows_sink_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let rec = record(RiskLevel::Low, 0.0);

        let handle = dispatch_record(Arc::new(FailingSink(tx)), rec.clone());

        // the write was attempted and the task ended without panicking
        assert!(handle.await.is_ok());
        assert_eq!(rx.recv().await, Some(rec.id));
    }

    #[tokio::test]
    async fn test_dispatch_delivers_record() {
        let sink = Arc::new(InMemoryLogSink::new());

        dispatch_record(sink.clone(), record(RiskLevel::Medium, 0.5))
            .await
            .unwrap();

        let stats = sink.stats().await.unwrap();
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.risk_levels.medium, 1);
    }
}
