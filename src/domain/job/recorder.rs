use super::model::Job;
use crate::infrastructure::repositories::DocumentRepository;
use std::sync::Arc;

/// Result of a best-effort persistence attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Stored(String),
    Failed(String),
    /// No document store configured
    Disabled,
}

impl PersistOutcome {
    pub fn job_id(&self) -> Option<&str> {
        match self {
            PersistOutcome::Stored(id) => Some(id),
            _ => None,
        }
    }
}

/// Stores job records without ever failing the request that produced them
#[derive(Clone)]
pub struct JobRecorder {
    store: Option<Arc<dyn DocumentRepository>>,
}

impl JobRecorder {
    pub fn new(store: Option<Arc<dyn DocumentRepository>>) -> Self {
        Self { store }
    }

    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn store(&self) -> Option<&Arc<dyn DocumentRepository>> {
        self.store.as_ref()
    }

    pub async fn record(&self, job: &Job) -> PersistOutcome {
        let Some(store) = &self.store else {
            return PersistOutcome::Disabled;
        };

        let record = match serde_json::to_value(job) {
            Ok(record) => record,
            Err(e) => return PersistOutcome::Failed(format!("could not encode job: {}", e)),
        };

        match store.create(Job::COLLECTION, record).await {
            Ok(id) => PersistOutcome::Stored(id),
            Err(e) => PersistOutcome::Failed(e.to_string()),
        }
    }
}
