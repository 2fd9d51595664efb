//! Records domain - create and list operations shared by every record kind
//!
//! Creates encode a typed record into a BSON document and insert it as-is.
//! Lists fetch at most [`LIST_LIMIT`] documents and rewrite the raw `_id`
//! into a string `id` before handing them to clients.

use mongodb::bson::{Bson, Document, to_document};
use serde_json::Value;

use crate::constants::LIST_LIMIT;
use crate::models::{Record, RecordKind};
use crate::services::db::{RecordStore, StoreError};

/// Insert one record into its kind's collection and return the new id.
pub async fn create_record<R: Record>(
    store: &dyn RecordStore,
    record: &R,
) -> Result<String, StoreError> {
    let document = to_document(record)?;
    let inserted_id = store.insert(R::KIND, document).await?;
    Ok(id_to_string(&inserted_id))
}

/// List up to `LIST_LIMIT` records of a kind, rewritten for clients.
pub async fn list_records(
    store: &dyn RecordStore,
    kind: RecordKind,
) -> Result<Vec<Value>, StoreError> {
    let docs = store.find(kind, LIST_LIMIT).await?;
    Ok(docs.into_iter().map(to_client_doc).collect())
}

pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replace `_id` with a string `id` and render the document as JSON.
pub fn to_client_doc(mut doc: Document) -> Value {
    let mut client_doc = Document::new();
    if let Some(raw_id) = doc.remove("_id") {
        client_doc.insert("id", id_to_string(&raw_id));
    }
    for (key, value) in doc {
        // a stored "id" field would shadow the rewritten identifier
        if key != "id" {
            client_doc.insert(key, value);
        }
    }

    Bson::Document(client_doc).into_relaxed_extjson()
}
