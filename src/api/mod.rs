//! HTTP Boundary Module
//!
//! Thin axum adapter that maps routes onto scheduler and lifecycle operations. It keeps the
//! established wire layout (capitalized JSON field names, form-encoded password).
//!
//! ## Submodules
//! - **`protocol`**: Endpoint paths and request/response DTOs.
//! - **`handlers`**: Route handlers and the `ServiceError` -> HTTP response mapping.

pub mod handlers;
pub mod protocol;

use crate::jobs::scheduler::JobScheduler;
use crate::lifecycle::Lifecycle;

use axum::routing::{get, post};
use axum::{Extension, Router};
use handlers::*;
use protocol::*;
use std::sync::Arc;

pub fn router(scheduler: Arc<JobScheduler>, lifecycle: Arc<Lifecycle>) -> Router {
    Router::new()
        .route(ENDPOINT_HASH, post(handle_create_record))
        .route(ENDPOINT_HASH_BY_ID, get(handle_get_record))
        .route(ENDPOINT_STATS, get(handle_get_stats))
        .route(
            ENDPOINT_SHUTDOWN,
            get(handle_shutdown).post(handle_shutdown),
        )
        .layer(Extension(scheduler))
        .layer(Extension(lifecycle))
}

#[cfg(test)]
mod tests;
