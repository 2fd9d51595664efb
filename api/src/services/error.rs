//! Error handling utilities for route handlers
//!
//! Handlers return `Result<_, StatusCode>`. Store and storage failures are
//! logged once at the handler boundary with a short context string, then
//! collapsed into a bare status; clients never see error details.
//!
//! ```ignore
//! let docs = records::list_records(state.store.as_ref(), RecordKind::Video)
//!     .await
//!     .log_500("List vlogs for export error")?;
//!
//! multipart.next_field().await.log_status("Multipart field error", StatusCode::BAD_REQUEST)?;
//! ```
//!
//! `log_500` logs at error level; `log_status` is for client faults and
//! logs at warn level.

use axum::http::StatusCode;

/// Extension trait for logging errors and converting to StatusCode
pub trait LogErr<T> {
    /// Log error with context and return INTERNAL_SERVER_ERROR
    fn log_500(self, context: &str) -> Result<T, StatusCode>;

    /// Log error with context and return a custom StatusCode
    fn log_status(self, context: &str, status: StatusCode) -> Result<T, StatusCode>;
}

impl<T, E: std::fmt::Display> LogErr<T> for Result<T, E> {
    fn log_500(self, context: &str) -> Result<T, StatusCode> {
        self.map_err(|e| {
            tracing::error!("{}: {}", context, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
    }

    fn log_status(self, context: &str, status: StatusCode) -> Result<T, StatusCode> {
        self.map_err(|e| {
            tracing::warn!("{}: {}", context, e);
            status
        })
    }
}
