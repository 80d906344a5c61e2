// bases/audio_library/src/payload.rs
//! Body of `PUT /audios/:id`
//!
//! Accepted shapes, all mapping onto [`AudioUpdate`]:
//! - urlencoded, flat (`name=...`) or nested (`audio[name]=...`)
//! - JSON, flat (`{"name": ...}`) or nested (`{"audio": {"name": ...}}`)

use crate::error::AppError;
use audio_records::AudioUpdate;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::Deserialize;

/// Update fields as sent by a form, `audio[field]` or bare `field`
#[derive(Debug, Default, Deserialize)]
struct FormFields {
    #[serde(default, rename = "audio[name]", alias = "name")]
    name: Option<String>,
    #[serde(default, rename = "audio[bpm]", alias = "bpm")]
    bpm: Option<String>,
    #[serde(default, rename = "audio[duration]", alias = "duration")]
    duration: Option<String>,
    #[serde(default, rename = "audio[key]", alias = "key")]
    key: Option<String>,
    #[serde(default, rename = "audio[source]", alias = "source")]
    source: Option<String>,
    #[serde(default, rename = "audio[type]", alias = "type")]
    mime_type: Option<String>,
}

impl From<FormFields> for AudioUpdate {
    fn from(fields: FormFields) -> Self {
        AudioUpdate {
            name: fields.name,
            bpm: fields.bpm,
            duration: fields.duration,
            key: fields.key,
            source: fields.source,
            mime_type: fields.mime_type,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonBody {
    // Tried first: a flat body would also match any object
    Nested { audio: AudioUpdate },
    Flat(AudioUpdate),
}

/// Extracts a non-empty [`AudioUpdate`] from a form or JSON body
#[derive(Debug)]
pub struct UpdatePayload(pub AudioUpdate);

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

#[async_trait]
impl<S> FromRequest<S> for UpdatePayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let update = if is_json(&request) {
            let Json(body) = Json::<JsonBody>::from_request(request, state)
                .await
                .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
            match body {
                JsonBody::Nested { audio } => audio,
                JsonBody::Flat(audio) => audio,
            }
        } else {
            let Form(fields) = Form::<FormFields>::from_request(request, state)
                .await
                .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
            fields.into()
        };

        if update.is_empty() {
            return Err(AppError::Validation("no audio fields to update".into()));
        }

        Ok(Self(update))
    }
}
