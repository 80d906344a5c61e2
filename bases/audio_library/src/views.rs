// bases/audio_library/src/views.rs
use crate::error::AppError;
use askama::Template;
use audio_records::AudioRecord;
use axum::response::Html;

/// Listing of every audio record
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub audios: &'a [AudioRecord],
}

/// Upload form
#[derive(Template)]
#[template(path = "new.html")]
pub struct NewTemplate;

#[derive(Template)]
#[template(path = "show.html")]
pub struct ShowTemplate<'a> {
    pub audio: &'a AudioRecord,
}

/// Edit form, pre-filled with the current values
#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate<'a> {
    pub audio: &'a AudioRecord,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub reason: &'static str,
    pub message: String,
}

pub fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// For error pages, which have nowhere left to report a render failure
pub fn render_or_plain(template: &ErrorTemplate) -> Html<String> {
    match template.render() {
        Ok(html) => Html(html),
        Err(err) => {
            tracing::error!(error = %err, "failed to render error page");
            Html(format!("{} {}: {}", template.status, template.reason, template.message))
        }
    }
}
