//! Shared fixtures for handler tests

use crate::server::{self, App, AppState};
use async_trait::async_trait;
use audio_records::{AudioRecord, NewAudioRecord, RecordStore, SqliteRecordStore};
use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, Method};
use axum::response::Response;
use blob_store::{BlobError, BlobStore, ObjectBlobStore, StorageKey, StoredBlob};
use bytes::Bytes;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "audio-library-test-boundary";

/// Which store operations the app under test should see failing
#[derive(Debug, Clone, Copy, Default)]
struct Failures {
    put: bool,
    delete: bool,
    records: bool,
}

/// Wraps the real in-memory store so tests can still inspect it
struct FlakyBlobs {
    inner: Arc<ObjectBlobStore>,
    failures: Failures,
}

fn injected(store: &'static str) -> object_store::Error {
    object_store::Error::Generic {
        store,
        source: "injected failure".into(),
    }
}

#[async_trait]
impl BlobStore for FlakyBlobs {
    async fn put(&self, key: StorageKey, bytes: Bytes) -> blob_store::Result<StoredBlob> {
        if self.failures.put {
            return Err(BlobError::Upload {
                key: key.to_string(),
                source: injected("flaky"),
            });
        }
        self.inner.put(key, bytes).await
    }

    async fn delete(&self, key: &str) -> blob_store::Result<()> {
        if self.failures.delete {
            return Err(BlobError::Delete {
                key: key.to_string(),
                source: injected("flaky"),
            });
        }
        self.inner.delete(key).await
    }
}

pub(crate) struct TestApp {
    app: App,
    pub records: Arc<SqliteRecordStore>,
    pub blobs: Arc<ObjectBlobStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(Failures::default()).await
    }

    pub async fn with_failing_blob_puts() -> Self {
        Self::build(Failures {
            put: true,
            ..Failures::default()
        })
        .await
    }

    pub async fn with_failing_blob_deletes() -> Self {
        Self::build(Failures {
            delete: true,
            ..Failures::default()
        })
        .await
    }

    /// Every record store call fails, the pool behind it is closed
    pub async fn with_unavailable_records() -> Self {
        Self::build(Failures {
            records: true,
            ..Failures::default()
        })
        .await
    }

    async fn build(failures: Failures) -> Self {
        let records = Arc::new(SqliteRecordStore::in_memory().await.unwrap());
        if failures.records {
            records.pool().close().await;
        }
        let blobs = Arc::new(ObjectBlobStore::in_memory());

        let state = AppState {
            records: records.clone(),
            blobs: Arc::new(FlakyBlobs {
                inner: blobs.clone(),
                failures,
            }),
        };

        Self {
            app: server::app(state, 1024 * 1024, None),
            records,
            blobs,
        }
    }

    pub async fn send(&self, request: Request) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }
}

/// Store a blob and its record directly, bypassing the upload route
pub(crate) async fn create_record(app: &TestApp, name: &str) -> AudioRecord {
    let stored = app
        .blobs
        .put(
            StorageKey::for_filename(&format!("{name}.wav")),
            Bytes::from_static(b"RIFF"),
        )
        .await
        .unwrap();

    app.records
        .create(NewAudioRecord {
            name: name.to_string(),
            bpm: "120".into(),
            duration: "180".into(),
            key: stored.key.to_string(),
            source: stored.location,
            mime_type: "audio/wav".into(),
        })
        .await
        .unwrap()
}

pub(crate) fn empty_request(method: Method, uri: &str) -> Request {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub(crate) fn form_request(method: Method, uri: &str, body: &str) -> Request {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(crate) fn json_request(method: Method, uri: &str, body: &str) -> Request {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// `POST /new/upload` with an optional `(filename, mime type, bytes)` file part
pub(crate) fn multipart_request(
    file: Option<(&str, &str, Vec<u8>)>,
    fields: &[(&str, &str)],
) -> Request {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((filename, mime_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {mime_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(&bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/new/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub(crate) async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
