use super::protocol::*;
use crate::error::ServiceError;
use crate::jobs::scheduler::JobScheduler;
use crate::jobs::types::{Record, parse_record_id};
use crate::lifecycle::{Lifecycle, ShutdownState};

use axum::extract::{Extension, Form, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::InvalidIdentifier(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) | ServiceError::NoRecordsYet => StatusCode::NOT_FOUND,
            ServiceError::ShuttingDown | ServiceError::AlreadyShutdown => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServiceError::ShutdownFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn ensure_serving(lifecycle: &Lifecycle) -> Result<(), ServiceError> {
    if lifecycle.state() == ShutdownState::Stopped {
        return Err(ServiceError::ShuttingDown);
    }
    Ok(())
}

/// Picks the password from the form body, falling back to the query string.
///
/// A body that is missing or cannot be decoded counts as no password, so the request
/// fails validation instead of being rejected by the extractor.
fn submitted_password(
    query: Option<Query<CreateRecordRequest>>,
    form: Option<Form<CreateRecordRequest>>,
) -> String {
    match form {
        Some(Form(req)) if !req.password.is_empty() => req.password,
        _ => query.map(|Query(req)| req.password).unwrap_or_default(),
    }
}

pub async fn handle_create_record(
    Extension(scheduler): Extension<Arc<JobScheduler>>,
    Extension(lifecycle): Extension<Arc<Lifecycle>>,
    query: Option<Query<CreateRecordRequest>>,
    form: Option<Form<CreateRecordRequest>>,
) -> Result<Json<RecordResponse>, ServiceError> {
    ensure_serving(&lifecycle)?;

    let password = submitted_password(query, form);
    match scheduler.submit(&password) {
        Ok(id) => Ok(Json(Record::pending(id).into())),
        Err(e) => {
            tracing::debug!("Rejected submission: {}", e);
            Err(e)
        }
    }
}

/// Pending records answer `202 Accepted` with an empty hash.
pub async fn handle_get_record(
    Extension(scheduler): Extension<Arc<JobScheduler>>,
    Extension(lifecycle): Extension<Arc<Lifecycle>>,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, Json<RecordResponse>), ServiceError> {
    ensure_serving(&lifecycle)?;

    let id = parse_record_id(&raw_id)?;
    let record = scheduler.lookup(id).await?;

    let status = if record.pending {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(record.into())))
}

pub async fn handle_get_stats(
    Extension(scheduler): Extension<Arc<JobScheduler>>,
    Extension(lifecycle): Extension<Arc<Lifecycle>>,
) -> Result<Json<StatsResponse>, ServiceError> {
    ensure_serving(&lifecycle)?;

    let stats = scheduler.stats()?;
    Ok(Json(stats.into()))
}

pub async fn handle_shutdown(
    Extension(lifecycle): Extension<Arc<Lifecycle>>,
) -> Result<(StatusCode, &'static str), ServiceError> {
    tracing::info!("Shutdown requested");

    let report = lifecycle.shutdown().await?;
    tracing::info!(
        "Flushed {} record(s) ({} pending)",
        report.records_written,
        report.pending_written
    );

    Ok((StatusCode::OK, SHUTDOWN_MESSAGE))
}
