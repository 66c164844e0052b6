use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Connectivity snapshot reported by the diagnostics endpoint
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub database_name: String,
    pub collections: Vec<String>,
}

/// Repository for schemaless audit records grouped in named collections.
///
/// Callers treat every error as non-fatal: a request never fails because
/// its record could not be stored.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a JSON object into `collection` and return its identifier
    async fn create(&self, collection: &str, record: serde_json::Value) -> Result<String, StoreError>;

    /// Report the database name and up to ten collection names
    async fn status(&self) -> Result<StoreStatus, StoreError>;
}
