//! Request handlers

use super::state::AppState;
use crate::output::html::{error_page, index_page, solution_page};
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::{Value, json};
use solver_application::{FailureStage, ImageUpload, Submission};
use solver_domain::{SolveErrorKind, SolveResult};
use std::any::Any;
use tracing::{error, info, instrument, warn};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `GET /`
pub async fn index() -> Html<String> {
    Html(index_page(None, ""))
}

/// `POST /solve`: multipart form with `question` and `image_file`
#[instrument(skip_all)]
pub async fn solve_form(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!("Could not read form submission: {}", e);
            return flash(
                StatusCode::BAD_REQUEST,
                "Could not read the submitted form. Please try again.",
                "",
            );
        }
    };

    let typed = submission.text.clone();
    let outcome = state.submissions.execute(submission).await;

    match outcome.result {
        SolveResult::Success {
            solution,
            raw_response,
        } => {
            let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
            Html(solution_page(&solution, &raw_response, &timestamp)).into_response()
        }
        SolveResult::Failure { kind, error, .. } => {
            let message = match outcome.failed_at {
                Some(FailureStage::Transcription) => format!("Error processing image: {}", error),
                Some(FailureStage::Solve) => format!("Error solving problem: {}", error),
                Some(FailureStage::Input) | None => error,
            };
            flash(page_status(kind), &message, &typed)
        }
    }
}

/// `POST /api/solve`: JSON `{"question": "..."}`
#[instrument(skip_all)]
pub async fn api_solve(State(state): State<AppState>, payload: Option<Json<Value>>) -> Response {
    let question = payload
        .as_ref()
        .and_then(|Json(body)| body.get("question"))
        .and_then(Value::as_str);

    let Some(question) = question else {
        return api_error(StatusCode::BAD_REQUEST, "Question is required");
    };
    if question.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "Question cannot be empty");
    }

    let outcome = state.submissions.execute(Submission::text(question)).await;
    let result = outcome.result;

    match (outcome.failed_at, result.error_kind()) {
        (None, _) => Json(result).into_response(),
        (Some(FailureStage::Input), _) => {
            api_error(StatusCode::BAD_REQUEST, result.error().unwrap_or_default())
        }
        (Some(_), kind) => {
            let status = kind.map(api_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(result)).into_response()
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "JEE Math Solver"}))
}

/// Fallback for unknown routes
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(error_page("Page not found"))).into_response()
}

/// Response for a panicking handler
pub fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(error_page("Internal server error")),
    )
        .into_response()
}

/// Status for a failed form submission
pub fn page_status(kind: SolveErrorKind) -> StatusCode {
    match kind {
        k if k.is_client_error() => StatusCode::BAD_REQUEST,
        SolveErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Status for a failed JSON API call
pub fn api_status(kind: SolveErrorKind) -> StatusCode {
    match kind {
        k if k.is_client_error() => StatusCode::BAD_REQUEST,
        SolveErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Re-render the form with a one-time error message
fn flash(status: StatusCode, message: &str, question: &str) -> Response {
    (status, Html(index_page(Some(message), question))).into_response()
}

fn api_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}

/// Collect the `question` text and the optional `image_file` upload.
///
/// A file part with an empty filename means no file was chosen.
async fn read_submission(mut multipart: Multipart) -> Result<Submission, String> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "question" => {
                submission.text = field.text().await.map_err(|e| e.to_string())?;
            }
            "image_file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    continue;
                }
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                info!("Received upload {} ({} bytes)", filename, bytes.len());
                submission.image = Some(ImageUpload::new(filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(submission)
}
