// bases/audio_library/src/server.rs
use crate::config::Config;
use crate::{method_override, routes, upload};
use audio_records::RecordStore;
use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
    Router, ServiceExt,
};
use blob_store::BlobStore;
use std::path::Path;
use std::sync::Arc;
use tower::util::{MapRequest, MapRequestLayer};
use tower::Layer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// URL prefix under which the local blob backend is served
pub const BLOBS_ROUTE: &str = "/blobs";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub blobs: Arc<dyn BlobStore>,
}

/// The router behind the `_method` override, ready to serve
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Build the full application
///
/// `blob_dir` is served under [`BLOBS_ROUTE`] when blobs live on local disk.
pub fn app(state: AppState, max_upload_bytes: usize, blob_dir: Option<&Path>) -> App {
    let mut router = Router::new()
        .route("/", get(routes::index))
        .route("/new", get(routes::new_form))
        .route(
            "/new/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/audios/:id",
            get(routes::show).put(routes::update).delete(routes::destroy),
        )
        .route("/audios/:id/edit", get(routes::edit_form))
        .route("/files", get(routes::files));

    if let Some(dir) = blob_dir {
        router = router.nest_service(BLOBS_ROUTE, ServeDir::new(dir));
    }

    let router = router.layer(TraceLayer::new_for_http()).with_state(state);

    // Runs before routing so the rewritten method picks the route
    MapRequestLayer::new(method_override::apply as fn(Request) -> Request).layer(router)
}

/// Run the audio library HTTP server
pub async fn run(config: Config, state: AppState) -> color_eyre::Result<()> {
    let app = app(
        state,
        config.max_upload_bytes,
        config.local_blob_dir().map(|dir| dir.as_path()),
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Audio library listening on http://localhost:{}", config.port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
