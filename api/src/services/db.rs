//! Record store: the seam between route handlers and the document database
//!
//! Handlers never talk to the driver directly. They receive an
//! `Arc<dyn RecordStore>` through `AppState`, which is backed by
//! [`MongoStore`] in production and by an in-memory store in tests.
//!
//! # Lifecycle
//!
//! ```ignore
//! let store = MongoStore::open(uri, "emogo_data", timeout).await?;
//! let result = serve(store.clone()).await;
//! store.close().await;
//! result
//! ```
//!
//! `open` pings the server, so a bad connection string or an unreachable
//! cluster fails startup instead of the first request.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{Bson, Document, doc},
    options::ClientOptions,
};
use thiserror::Error;
use tracing::info;

use crate::constants::APP_NAME;
use crate::models::RecordKind;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("failed to encode record: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
}

/// Persistence operations needed by the API: one insert, one capped find.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one document and return the identifier the database assigned.
    async fn insert(&self, kind: RecordKind, document: Document) -> Result<Bson, StoreError>;

    /// Fetch up to `limit` documents in natural order.
    async fn find(&self, kind: RecordKind, limit: i64) -> Result<Vec<Document>, StoreError>;
}

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connect, select `database_name` and verify the server answers a ping.
    pub async fn open(
        uri: &str,
        database_name: &str,
        server_selection_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(server_selection_timeout);

        let client = Client::with_options(options)?;
        let database = client.database(database_name);

        database.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to MongoDB database {}", database_name);

        Ok(Self { client, database })
    }

    /// Release the driver's connections and background tasks.
    pub async fn close(self) {
        self.client.shutdown().await;
        info!("MongoDB connection closed");
    }

    fn collection(&self, kind: RecordKind) -> Collection<Document> {
        self.database.collection(kind.collection_name())
    }
}

#[async_trait]
impl RecordStore for MongoStore {
    async fn insert(&self, kind: RecordKind, document: Document) -> Result<Bson, StoreError> {
        let result = self.collection(kind).insert_one(document).await?;
        Ok(result.inserted_id)
    }

    async fn find(&self, kind: RecordKind, limit: i64) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(kind).find(doc! {}).limit(limit).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs)
    }
}
