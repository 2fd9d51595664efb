//! Application constants

/// Maximum number of documents returned by a list endpoint
pub const LIST_LIMIT: i64 = 1000;

/// Default request body cap (200 MB), large enough for phone video uploads
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 200 * 1024 * 1024;

/// URL prefix under which uploaded files are served
pub const VIDEOS_ROUTE_PREFIX: &str = "/videos";

/// Message returned by `GET /`
pub const STATUS_MESSAGE: &str = "EmoGo backend is running";

/// Message returned after a successful upload
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Video uploaded successfully";

/// Application name reported to MongoDB
pub const APP_NAME: &str = "emogo-api";
