use super::document_repository::{DocumentRepository, StoreError, StoreStatus};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

const MAX_LISTED_COLLECTIONS: i64 = 10;

/// Postgres-backed document store: one JSONB row per record
pub struct PgDocumentRepository {
    pool: Arc<DbPool>,
    schema_ready: OnceCell<()>,
}

impl PgDocumentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            schema_ready: OnceCell::new(),
        }
    }

    /// Create the documents table on first use. Retried on the next call if
    /// the database was unreachable.
    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        self.schema_ready
            .get_or_try_init(|| async {
                let pool = self.pool.as_ref();

                sqlx::query(
                    r#"
                    CREATE TABLE IF NOT EXISTS documents (
                        id UUID PRIMARY KEY,
                        collection TEXT NOT NULL,
                        data JSONB NOT NULL,
                        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                    )
                    "#,
                )
                .execute(pool)
                .await?;

                sqlx::query(
                    "CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection)",
                )
                .execute(pool)
                .await?;

                tracing::info!("Document store schema ready");
                Ok::<(), sqlx::Error>(())
            })
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn create(&self, collection: &str, record: serde_json::Value) -> Result<String, StoreError> {
        if !record.is_object() {
            return Err(StoreError::InvalidRecord(
                "documents must be JSON objects".to_string(),
            ));
        }

        self.ensure_schema().await?;

        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, data, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(collection)
        .bind(Json(record))
        .bind(Utc::now())
        .execute(self.pool.as_ref())
        .await?;

        Ok(id.to_string())
    }

    async fn status(&self) -> Result<StoreStatus, StoreError> {
        self.ensure_schema().await?;
        let pool = self.pool.as_ref();

        let database_name = sqlx::query_scalar::<_, String>("SELECT current_database()::text")
            .fetch_one(pool)
            .await?;

        let collections = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT collection
            FROM documents
            ORDER BY collection
            LIMIT $1
            "#,
        )
        .bind(MAX_LISTED_COLLECTIONS)
        .fetch_all(pool)
        .await?;

        Ok(StoreStatus {
            database_name,
            collections,
        })
    }
}
