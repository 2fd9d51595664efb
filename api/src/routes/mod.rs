pub mod export;
pub mod records;
pub mod videos;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use crate::constants::STATUS_MESSAGE;

/// Build all routes for the API
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(status))
        .merge(records::routes())
        .merge(videos::routes())
        .merge(export::routes())
}

#[derive(Serialize)]
struct StatusResponse {
    message: &'static str,
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: STATUS_MESSAGE,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, Response},
    };
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::services::db::RecordStore;
    use crate::{AppState, build_app};

    pub fn test_app<S: RecordStore + 'static>(store: Arc<S>, upload_dir: &Path) -> Router {
        build_app(Arc::new(AppState {
            store,
            upload_dir: upload_dir.to_path_buf(),
            max_upload_bytes: 1024 * 1024,
        }))
    }

    pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    pub fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}
