use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::PersonSubmission;
use super::repository::PersonRepository;
use super::service::{IntakeError, PersonIntakeService};

/// Router builder exposing the intake and lookup endpoints, plus a custom
/// 404 fallback so unknown paths never surface framework diagnostics.
pub fn person_router<R>(service: Arc<PersonIntakeService<R>>) -> Router
where
    R: PersonRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/people",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/people/search/:name", get(search_handler::<R>))
        .fallback(not_found_handler)
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<PersonIntakeService<R>>>,
    axum::Json(submission): axum::Json<PersonSubmission>,
) -> Response
where
    R: PersonRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            // The original form re-renders the full table after an insert,
            // so the response carries the refreshed listing alongside the
            // new record.
            match service.list() {
                Ok(people) => {
                    let payload = json!({ "person": record, "people": people });
                    (StatusCode::CREATED, axum::Json(payload)).into_response()
                }
                Err(err) => internal_failure(err),
            }
        }
        Err(IntakeError::Rejected(violations)) => {
            let payload = json!({ "errors": violations });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_failure(other),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<PersonIntakeService<R>>>,
) -> Response
where
    R: PersonRepository + 'static,
{
    match service.list() {
        Ok(people) => (StatusCode::OK, axum::Json(people)).into_response(),
        Err(err) => internal_failure(err),
    }
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<PersonIntakeService<R>>>,
    Path(name): Path<String>,
) -> Response
where
    R: PersonRepository + 'static,
{
    match service.find_by_first_name(&name) {
        Ok(matches) if matches.is_empty() => {
            (StatusCode::OK, "No records found".to_string()).into_response()
        }
        Ok(matches) => {
            let listing = matches
                .iter()
                .map(|record| record.display_line())
                .collect::<Vec<_>>()
                .join("\n");
            (StatusCode::OK, listing).into_response()
        }
        Err(err) => internal_failure(err),
    }
}

pub(crate) async fn not_found_handler() -> Response {
    let payload = json!({ "error": "resource not found" });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_failure(err: IntakeError) -> Response {
    // Log the real cause; the response body stays generic.
    error!(%err, "intake request failed");
    let payload = json!({ "error": "internal failure" });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
