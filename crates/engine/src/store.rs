use std::future::Future;
use std::pin::Pin;

use tokio::sync::Mutex;

use gemval_common::api::records::ValuationRecord;

/// Errors from the valuation record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store HTTP error: {0}")]
    Http(String),

    #[error("Store API error: {0}")]
    Api(String),
}

impl From<StoreError> for gemval_common::GemvalError {
    fn from(e: StoreError) -> Self {
        gemval_common::GemvalError::Store(e.to_string())
    }
}

/// Object-safe seam over valuation persistence (dyn dispatch).
/// Recording is fire-and-forget; failures are logged, never surfaced.
pub trait ValuationStore: Send + Sync {
    fn record(
        &self,
        record: ValuationRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>>;
}

/// In-process store for tests and single-node deployments.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ValuationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<ValuationRecord> {
        self.records.lock().await.clone()
    }
}

impl ValuationStore for MemoryStore {
    fn record(
        &self,
        record: ValuationRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        Box::pin(async move {
            self.records.lock().await.push(record);
            Ok(())
        })
    }
}

/// HTTP client for an external valuation record service.
pub struct HttpValuationStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpValuationStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn post_record(&self, record: ValuationRecord) -> Result<(), StoreError> {
        let url = format!("{}/valuations", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&record)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(format!("{}: {}", status, body)));
        }

        Ok(())
    }
}

impl ValuationStore for HttpValuationStore {
    fn record(
        &self,
        record: ValuationRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        Box::pin(self.post_record(record))
    }
}
