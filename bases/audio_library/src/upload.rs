// bases/audio_library/src/upload.rs
//! Upload flow: store the file as a blob, then record its metadata
//!
//! The two writes are not atomic. If the record insert fails after the blob
//! was stored, the blob stays behind and its key is logged.

use crate::error::AppError;
use crate::routes::LISTING;
use crate::server::AppState;
use audio_records::NewAudioRecord;
use axum::extract::{Multipart, State};
use axum::response::Redirect;
use blob_store::StorageKey;
use bytes::Bytes;
use tracing::{debug, error, info};

/// Used when the client does not declare a content type for the file
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug)]
struct UploadedFile {
    filename: String,
    mime_type: String,
    bytes: Bytes,
}

#[derive(Debug, Default)]
struct UploadForm {
    name: String,
    bpm: String,
    duration: String,
    file: Option<UploadedFile>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };

        match field_name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let mime_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_MIME_TYPE)
                    .to_owned();
                let bytes = field.bytes().await?;
                form.file = Some(UploadedFile {
                    filename,
                    mime_type,
                    bytes,
                });
            }
            "name" => form.name = field.text().await?,
            "bpm" => form.bpm = field.text().await?,
            "duration" => form.duration = field.text().await?,
            other => debug!(field = other, "ignoring unexpected upload field"),
        }
    }

    Ok(form)
}

/// Handler for `POST /new/upload`
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let form = read_form(multipart).await?;

    let file = match form.file {
        Some(file) if !file.filename.is_empty() => file,
        _ => return Err(AppError::Validation("no file was uploaded".into())),
    };

    let key = StorageKey::for_filename(&file.filename);
    info!(
        filename = %file.filename,
        %key,
        size = file.bytes.len(),
        "uploading audio file"
    );

    let stored = state.blobs.put(key, file.bytes).await?;

    let record = NewAudioRecord {
        name: form.name,
        bpm: form.bpm,
        duration: form.duration,
        key: stored.key.to_string(),
        source: stored.location,
        mime_type: file.mime_type,
    };

    let created = state.records.create(record).await.map_err(|err| {
        error!(key = %stored.key, "blob stored but its record was not, blob is orphaned");
        AppError::from(err)
    })?;

    info!(id = %created.id, key = %created.key, "created audio record");
    Ok(Redirect::to(LISTING))
}
