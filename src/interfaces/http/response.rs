use crate::domain::outcome::{Outcome, OutcomeCode};
use axum::http::header::{ALLOW, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Body returned for a submission that was dispatched.
pub const SUCCESS_MESSAGE: &str = "Email sent successfully!";

pub fn status_for(code: OutcomeCode) -> StatusCode {
    match code {
        OutcomeCode::Ok => StatusCode::OK,
        OutcomeCode::BadRequest => StatusCode::BAD_REQUEST,
        OutcomeCode::Unauthorized => StatusCode::UNAUTHORIZED,
        OutcomeCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        OutcomeCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            // The composed body stays server side.
            Outcome::Sent { .. } => (StatusCode::OK, SUCCESS_MESSAGE).into_response(),
            Outcome::Rejected(rejection) => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                );
                headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
                if let Some(allow) = rejection.allow {
                    headers.insert(ALLOW, HeaderValue::from_static(allow));
                }
                (
                    status_for(rejection.code),
                    headers,
                    format!("{}\n", rejection.message),
                )
                    .into_response()
            }
        }
    }
}
