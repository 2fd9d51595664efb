//! In-memory record store for route and domain tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document, oid::ObjectId};

use super::db::{RecordStore, StoreError};
use crate::models::RecordKind;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<RecordKind, Vec<Document>>>,
}

impl MemoryStore {
    pub fn len(&self, kind: RecordKind) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, kind: RecordKind, document: Document) -> Result<Bson, StoreError> {
        let id = Bson::ObjectId(ObjectId::new());

        let mut stored = Document::new();
        stored.insert("_id", id.clone());
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        self.collections
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push(stored);

        Ok(id)
    }

    async fn find(&self, kind: RecordKind, limit: i64) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().unwrap();
        let docs = collections
            .get(&kind)
            .map(|docs| docs.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default();
        Ok(docs)
    }
}

/// Store whose every call fails as if the database were unreachable
pub struct FailingStore;

fn unreachable_database() -> StoreError {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "database unreachable");
    StoreError::Database(mongodb::error::Error::from(io_err))
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn insert(&self, _kind: RecordKind, _document: Document) -> Result<Bson, StoreError> {
        Err(unreachable_database())
    }

    async fn find(&self, _kind: RecordKind, _limit: i64) -> Result<Vec<Document>, StoreError> {
        Err(unreachable_database())
    }
}
