//! HTTP-facing error types
//!
//! Not-found never shows up here: handlers redirect to the listing instead.
//! Everything in [`AppError`] is a real failure and gets a distinct status.

use crate::views::{self, ErrorTemplate};
use audio_records::{RecordError, RecordId};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blob_store::BlobError;
use std::error::Error as _;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("malformed upload")]
    Multipart(#[from] MultipartError),

    #[error("failed to render page")]
    Template(#[from] askama::Error),

    #[error("record store failed")]
    Records(#[from] RecordError),

    #[error("blob store failed")]
    Blobs(#[from] BlobError),

    #[error("record {id} was deleted but its blob {key} could not be removed")]
    OrphanedBlob {
        id: RecordId,
        key: String,
        #[source]
        source: BlobError,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(err) => err.status(),
            AppError::Template(_)
            | AppError::Records(_)
            | AppError::Blobs(_)
            | AppError::OrphanedBlob { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message with the whole source chain, e.g. `blob store failed: failed to upload blob x: ...`
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            detail.push_str(": ");
            detail.push_str(&err.to_string());
            source = err.source();
        }
        detail
    }

    fn log(&self, status: StatusCode) {
        if status.is_server_error() {
            tracing::error!(%status, error = %self.detail(), "request failed");
        } else {
            tracing::warn!(%status, error = %self.detail(), "request rejected");
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.log(status);

        let page = ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message: self.detail(),
        };

        (status, views::render_or_plain(&page)).into_response()
    }
}

/// Error for the JSON endpoints: same classification, JSON body
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        ApiError(AppError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        self.0.log(status);

        let body = serde_json::json!({ "error": self.0.detail() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_includes_source_chain() {
        let err = AppError::from(RecordError::CorruptId("nope".into()));
        assert_eq!(
            err.detail(),
            "record store failed: stored record has a malformed id: nope"
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_is_a_client_error() {
        let err = AppError::Validation("missing file".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "invalid request: missing file");
    }

    #[tokio::test]
    async fn api_error_renders_json() {
        let response = ApiError::from(RecordError::CorruptId("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json["error"],
            "record store failed: stored record has a malformed id: x"
        );
    }
}
