use crate::middleware::{self, SharedMappings};
use crate::tasks::{self, TaskStore};
use axum::{Router, http::StatusCode};
use std::sync::Arc;

/// Task routes behind the CORS middleware. The explicit fallback keeps
/// unknown paths inside the layer so their preflights are answered too.
pub fn build_router(mappings: SharedMappings, store: Arc<TaskStore>) -> Router {
    let app = tasks::router(store).fallback(|| async { StatusCode::NOT_FOUND });
    middleware::install(app, mappings)
}
