//! MongoDB interaction store.
//!
//! Available with the `mongodb` feature.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{self, Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::info;

use crate::error::LogError;
use crate::log::{InteractionLog, InteractionStore};

/// Database holding the interaction log.
pub const DEFAULT_DATABASE: &str = "yoga_wellness_db";

/// Collection holding the interaction log.
pub const DEFAULT_COLLECTION: &str = "queries";

const BACKEND: &str = "mongodb";

/// Inserts one document per interaction.
pub struct MongoInteractionStore {
    collection: Collection<Document>,
}

impl MongoInteractionStore {
    /// Connect to `uri` and verify the server answers a ping.
    ///
    /// Fails fast when the server is unreachable so the caller can fall back
    /// to a disabled logger.
    pub async fn connect(uri: &str) -> Result<Self, LogError> {
        let mut options = ClientOptions::parse(uri).await.map_err(backend_error)?;
        options.server_selection_timeout = Some(Duration::from_secs(3));
        options.app_name = Some("yoga-assistant".to_string());

        let client = Client::with_options(options).map_err(backend_error)?;
        let database = client.database(DEFAULT_DATABASE);
        database.run_command(doc! { "ping": 1 }).await.map_err(backend_error)?;

        info!(database = DEFAULT_DATABASE, collection = DEFAULT_COLLECTION, "connected to MongoDB");
        Ok(Self { collection: database.collection(DEFAULT_COLLECTION) })
    }

    /// Use an existing collection.
    pub fn from_collection(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

fn backend_error(e: mongodb::error::Error) -> LogError {
    LogError::Backend { backend: BACKEND.to_string(), message: e.to_string() }
}

fn to_document(entry: &InteractionLog) -> Document {
    doc! {
        "query": entry.query.as_str(),
        "answer": entry.answer.as_str(),
        "sources": entry.sources.clone(),
        "is_unsafe": entry.is_unsafe,
        "category": entry.category.as_str(),
        "timestamp": bson::DateTime::from_millis(entry.timestamp.timestamp_millis()),
    }
}

#[async_trait]
impl InteractionStore for MongoInteractionStore {
    fn name(&self) -> &str {
        BACKEND
    }

    async fn append(&self, entry: &InteractionLog) -> Result<(), LogError> {
        self.collection.insert_one(to_document(entry)).await.map_err(backend_error)?;
        Ok(())
    }
}
