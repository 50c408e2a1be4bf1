use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::committer::CommitError;
use super::domain::{AssignmentOptions, CandidateId, RequestId};
use super::repository::{
    AssignmentEventPublisher, CandidateDirectory, RepositoryError, RequestRepository,
};
use super::service::{AssignmentServiceError, MaintenanceAssignmentService};

/// Router builder exposing the suggestion and assignment endpoints.
pub fn assignment_router<R, C, P>(service: Arc<MaintenanceAssignmentService<R, C, P>>) -> Router
where
    R: RequestRepository + 'static,
    C: CandidateDirectory + 'static,
    P: AssignmentEventPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/maintenance/requests/:request_id/suggestions",
            get(suggestions_handler::<R, C, P>),
        )
        .route(
            "/api/v1/maintenance/requests/:request_id/assignment",
            post(assign_handler::<R, C, P>),
        )
        .route(
            "/api/v1/maintenance/requests/:request_id/assignment/auto",
            post(auto_assign_handler::<R, C, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignRequestBody {
    candidate_id: String,
    #[serde(flatten)]
    options: AssignmentOptions,
}

pub(crate) async fn suggestions_handler<R, C, P>(
    State(service): State<Arc<MaintenanceAssignmentService<R, C, P>>>,
    Path(request_id): Path<String>,
) -> Response
where
    R: RequestRepository + 'static,
    C: CandidateDirectory + 'static,
    P: AssignmentEventPublisher + 'static,
{
    let id = RequestId(request_id);
    match service.suggestions(&id) {
        Ok(suggestions) => {
            let payload = json!({
                "request_id": id.0,
                "suggestions": suggestions,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assign_handler<R, C, P>(
    State(service): State<Arc<MaintenanceAssignmentService<R, C, P>>>,
    Path(request_id): Path<String>,
    axum::Json(body): axum::Json<AssignRequestBody>,
) -> Response
where
    R: RequestRepository + 'static,
    C: CandidateDirectory + 'static,
    P: AssignmentEventPublisher + 'static,
{
    let id = RequestId(request_id);
    let candidate_id = CandidateId(body.candidate_id);
    match service.assign(&id, &candidate_id, body.options) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn auto_assign_handler<R, C, P>(
    State(service): State<Arc<MaintenanceAssignmentService<R, C, P>>>,
    Path(request_id): Path<String>,
    axum::Json(options): axum::Json<AssignmentOptions>,
) -> Response
where
    R: RequestRepository + 'static,
    C: CandidateDirectory + 'static,
    P: AssignmentEventPublisher + 'static,
{
    let id = RequestId(request_id);
    match service.auto_assign(&id, options) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssignmentServiceError) -> Response {
    let status = match &error {
        AssignmentServiceError::Commit(CommitError::InvalidState { .. }) => StatusCode::CONFLICT,
        AssignmentServiceError::Commit(
            CommitError::UnknownCandidate(_)
            | CommitError::InvalidSchedule { .. }
            | CommitError::InvalidPriority(_)
            | CommitError::NoEligibleCandidate,
        ) => StatusCode::UNPROCESSABLE_ENTITY,
        AssignmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssignmentServiceError::Repository(_)
        | AssignmentServiceError::Directory(_)
        | AssignmentServiceError::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
