//! Record endpoints (/vlogs, /sentiments, /gps)
//!
//! Every kind gets the same pair of handlers: POST inserts one record and
//! returns its id, GET lists up to 1000 records with `_id` rewritten to `id`.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::AppState;
use crate::domain::records;
use crate::models::{LocationRecord, Record, SentimentRecord, VideoRecord};
use crate::services::error::LogErr;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vlogs", get(list::<VideoRecord>).post(create::<VideoRecord>))
        .route(
            "/sentiments",
            get(list::<SentimentRecord>).post(create::<SentimentRecord>),
        )
        .route("/gps", get(list::<LocationRecord>).post(create::<LocationRecord>))
}

#[derive(Serialize)]
pub struct InsertedResponse {
    pub inserted_id: String,
}

async fn create<R: Record>(
    State(state): State<Arc<AppState>>,
    Json(record): Json<R>,
) -> Result<Json<InsertedResponse>, StatusCode> {
    let inserted_id = records::create_record(state.store.as_ref(), &record)
        .await
        .log_500(&format!("Insert into {} error", R::KIND.collection_name()))?;

    Ok(Json(InsertedResponse { inserted_id }))
}

async fn list<R: Record>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let docs = records::list_records(state.store.as_ref(), R::KIND)
        .await
        .log_500(&format!("List {} error", R::KIND.collection_name()))?;

    Ok(Json(docs))
}
