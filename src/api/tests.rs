//! HTTP Boundary Tests
//!
//! Handlers are plain async functions, so they are exercised directly with `Extension`,
//! `Form`, `Query` and `Path` values instead of through a running server. A body the
//! `Form` extractor rejects arrives as `None`.
//!
//! ## Test Scopes
//! - **Create/Get**: The `abc` walkthrough end to end, pending vs ready status codes.
//! - **Password Source**: Form body first, query string as fallback, neither is empty.
//! - **Errors**: Status codes for every caller-facing error.
//! - **Serialization**: Capitalized field names on the wire.
//! - **Shutdown**: Requests after `Stopped` are refused.

#[cfg(test)]
mod tests {
    use crate::api::handlers::*;
    use crate::api::protocol::*;
    use crate::error::{PasswordError, ServiceError};
    use crate::jobs::scheduler::JobScheduler;
    use crate::jobs::types::History;
    use crate::lifecycle::Lifecycle;
    use crate::storage::{RecordStore, TimeLedger};
    use axum::extract::{Extension, Form, Path, Query};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    const DELAY: Duration = Duration::from_secs(5);

    fn setup() -> (Arc<JobScheduler>, Arc<Lifecycle>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("hashStore.db"));
        let ledger = TimeLedger::new(dir.path().join("time.db"));
        let scheduler = JobScheduler::new(store.clone(), History::default(), DELAY);
        let lifecycle = Lifecycle::new(
            scheduler.clone(),
            store,
            ledger,
            Duration::from_secs(10),
        );
        (scheduler, lifecycle, dir)
    }

    async fn create(
        scheduler: &Arc<JobScheduler>,
        lifecycle: &Arc<Lifecycle>,
        password: &str,
    ) -> Result<RecordResponse, ServiceError> {
        handle_create_record(
            Extension(scheduler.clone()),
            Extension(lifecycle.clone()),
            None,
            Some(Form(CreateRecordRequest {
                password: password.to_string(),
            })),
        )
        .await
        .map(|json| json.0)
    }

    async fn get(
        scheduler: &Arc<JobScheduler>,
        lifecycle: &Arc<Lifecycle>,
        raw_id: &str,
    ) -> Result<(StatusCode, RecordResponse), ServiceError> {
        handle_get_record(
            Extension(scheduler.clone()),
            Extension(lifecycle.clone()),
            Path(raw_id.to_string()),
        )
        .await
        .map(|(status, json)| (status, json.0))
    }

    // ============================================================
    // CREATE / GET
    // ============================================================

    #[tokio::test(start_paused = true)]
    async fn test_abc_scenario() {
        let (scheduler, lifecycle, _dir) = setup();

        // ACT: Submit
        let created = create(&scheduler, &lifecycle, "abc").await.unwrap();
        assert_eq!(
            created,
            RecordResponse {
                id: 1,
                hash: String::new()
            }
        );

        // ASSERT: Immediately pending
        let (status, record) = get(&scheduler, &lifecycle, "1").await.unwrap();
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(record.hash.is_empty());

        tokio::time::sleep(DELAY + Duration::from_secs(1)).await;

        // ASSERT: Ready after the delay
        let (status, record) = get(&scheduler, &lifecycle, "1").await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record.hash, "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=");
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_password_is_rejected_without_state_change() {
        let (scheduler, lifecycle, _dir) = setup();

        let result = create(&scheduler, &lifecycle, "o'reily").await;

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(PasswordError::ContainsQuote)
        ));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(scheduler.job_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_id_is_not_found() {
        let (scheduler, lifecycle, _dir) = setup();

        let err = get(&scheduler, &lifecycle, "999").await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(999)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Cannot find hash for ID: 999");
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_ids_are_invalid_not_missing() {
        let (scheduler, lifecycle, _dir) = setup();

        for raw in ["0", "-1", "abc"] {
            let err = get(&scheduler, &lifecycle, raw).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidIdentifier(_)));
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    // ============================================================
    // PASSWORD SOURCE
    // ============================================================

    fn request(password: &str) -> CreateRecordRequest {
        CreateRecordRequest {
            password: password.to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_string_password_is_accepted() {
        let (scheduler, lifecycle, _dir) = setup();

        let created = handle_create_record(
            Extension(scheduler.clone()),
            Extension(lifecycle),
            Some(Query(request("abc"))),
            None,
        )
        .await
        .unwrap()
        .0;

        assert_eq!(created.id, 1);
        tokio::time::sleep(DELAY + Duration::from_secs(1)).await;
        assert_eq!(
            scheduler.lookup(1).await.unwrap().digest,
            "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_form_body_wins_over_query_string() {
        let (scheduler, lifecycle, _dir) = setup();

        handle_create_record(
            Extension(scheduler.clone()),
            Extension(lifecycle),
            Some(Query(request("fromquery"))),
            Some(Form(request("frombody"))),
        )
        .await
        .unwrap();

        tokio::time::sleep(DELAY + Duration::from_secs(1)).await;
        assert_eq!(
            scheduler.lookup(1).await.unwrap().digest,
            crate::digest::digest("frombody")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_body_falls_back_to_query_string() {
        let (scheduler, lifecycle, _dir) = setup();

        handle_create_record(
            Extension(scheduler.clone()),
            Extension(lifecycle),
            Some(Query(request("abc"))),
            Some(Form(request(""))),
        )
        .await
        .unwrap();

        tokio::time::sleep(DELAY + Duration::from_secs(1)).await;
        assert_eq!(
            scheduler.lookup(1).await.unwrap().digest,
            crate::digest::digest("abc")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_password_anywhere_is_a_validation_error() {
        let (scheduler, lifecycle, _dir) = setup();

        let err = handle_create_record(
            Extension(scheduler.clone()),
            Extension(lifecycle),
            None,
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Validation(PasswordError::Empty)
        ));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(scheduler.job_count(), 0);
    }

    // ============================================================
    // STATS
    // ============================================================

    #[tokio::test(start_paused = true)]
    async fn test_stats_before_any_record() {
        let (scheduler, lifecycle, _dir) = setup();

        let err = handle_get_stats(Extension(scheduler), Extension(lifecycle))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NoRecordsYet));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_reports_total() {
        let (scheduler, lifecycle, _dir) = setup();
        create(&scheduler, &lifecycle, "a").await.unwrap();
        create(&scheduler, &lifecycle, "b").await.unwrap();

        let stats = handle_get_stats(Extension(scheduler), Extension(lifecycle))
            .await
            .unwrap()
            .0;

        assert_eq!(stats.total, 2);
    }

    // ============================================================
    // ERROR RESPONSES & SERIALIZATION
    // ============================================================

    #[test]
    fn test_error_response_status_codes() {
        let cases = [
            (ServiceError::NoRecordsYet, StatusCode::NOT_FOUND),
            (ServiceError::ShuttingDown, StatusCode::SERVICE_UNAVAILABLE),
            (ServiceError::AlreadyShutdown, StatusCode::SERVICE_UNAVAILABLE),
            (
                ServiceError::ShutdownFailed("task cancelled".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::Validation(PasswordError::Empty),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_record_response_uses_capitalized_field_names() {
        let json = serde_json::to_value(RecordResponse {
            id: 3,
            hash: "xyz=".to_string(),
        })
        .unwrap();

        assert_eq!(json, serde_json::json!({"Id": 3, "Hash": "xyz="}));
    }

    #[test]
    fn test_stats_response_uses_capitalized_field_names() {
        let json = serde_json::to_value(StatsResponse {
            total: 10,
            average: 42,
        })
        .unwrap();

        assert_eq!(json, serde_json::json!({"Total": 10, "Average": 42}));
    }

    #[test]
    fn test_missing_password_field_is_empty() {
        let req: CreateRecordRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(req.password, "");
    }

    // ============================================================
    // SHUTDOWN
    // ============================================================

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_then_requests_are_refused() {
        let (scheduler, lifecycle, _dir) = setup();
        create(&scheduler, &lifecycle, "abc").await.unwrap();

        let (status, message) = handle_shutdown(Extension(lifecycle.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message, SHUTDOWN_MESSAGE);

        assert!(matches!(
            create(&scheduler, &lifecycle, "late").await,
            Err(ServiceError::ShuttingDown)
        ));
        assert!(matches!(
            get(&scheduler, &lifecycle, "1").await,
            Err(ServiceError::ShuttingDown)
        ));

        let again = handle_shutdown(Extension(lifecycle)).await.unwrap_err();
        assert!(matches!(again, ServiceError::AlreadyShutdown));
    }
}
