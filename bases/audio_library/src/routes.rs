// bases/audio_library/src/routes.rs
use crate::error::{ApiError, AppError};
use crate::payload::UpdatePayload;
use crate::server::AppState;
use crate::views::{render, EditTemplate, IndexTemplate, NewTemplate, ShowTemplate};
use audio_records::{AudioRecord, RecordId};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use tracing::{info, warn};

pub const LISTING: &str = "/";

fn to_listing() -> Redirect {
    Redirect::to(LISTING)
}

/// Ids that are not even UUIDs cannot match anything
fn parse_id(raw: &str) -> Option<RecordId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            warn!(id = raw, "malformed audio id");
            None
        }
    }
}

async fn find(state: &AppState, raw_id: &str) -> Result<Option<AudioRecord>, AppError> {
    let Some(id) = parse_id(raw_id) else {
        return Ok(None);
    };
    Ok(state.records.find_by_id(&id).await?)
}

/// Handler for the listing page
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let audios = state.records.find_all().await?;
    render(&IndexTemplate { audios: &audios })
}

pub async fn new_form() -> Result<Html<String>, AppError> {
    render(&NewTemplate)
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match find(&state, &id).await? {
        Some(audio) => Ok(render(&ShowTemplate { audio: &audio })?.into_response()),
        None => Ok(to_listing().into_response()),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match find(&state, &id).await? {
        Some(audio) => Ok(render(&EditTemplate { audio: &audio })?.into_response()),
        None => Ok(to_listing().into_response()),
    }
}

/// Overwrite whichever fields the body sent
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    UpdatePayload(update): UpdatePayload,
) -> Result<Redirect, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(to_listing());
    };

    match state.records.update_by_id(&id, update).await? {
        Some(audio) => info!(id = %audio.id, name = %audio.name, "updated audio record"),
        None => warn!(%id, "update for unknown audio record"),
    }

    Ok(to_listing())
}

/// Delete the record, then its blob
///
/// The blob is only touched once the record is gone. A blob that cannot be
/// deleted is reported; the record is not restored.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(to_listing());
    };

    let Some(deleted) = state.records.delete_by_id(&id).await? else {
        warn!(%id, "delete for unknown audio record");
        return Ok(to_listing());
    };

    if deleted.key.is_empty() {
        warn!(%id, source = %deleted.source, "deleted record had no storage key, blob left in place");
        return Ok(to_listing());
    }

    state
        .blobs
        .delete(&deleted.key)
        .await
        .map_err(|source| AppError::OrphanedBlob {
            id,
            key: deleted.key.clone(),
            source,
        })?;

    info!(%id, key = %deleted.key, "deleted audio record and blob");
    Ok(to_listing())
}

/// Every record as JSON
pub async fn files(State(state): State<AppState>) -> Result<Json<Vec<AudioRecord>>, ApiError> {
    Ok(Json(state.records.find_all().await?))
}
