//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use shipyard_lib::{Error as LibError, ShipId};

/// Problem type URI for ship ids that are not in the catalog.
pub const PROBLEM_SHIP_NOT_FOUND: &str = "/problems/ship-not-found";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for service unavailable (e.g., a poisoned store).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use shipyard_service_shared::{ProblemDetails, PROBLEM_SHIP_NOT_FOUND};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_SHIP_NOT_FOUND,
///     "Ship Not Found",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("Ship 42 does not exist")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (the request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// HTTP status as a [`StatusCode`], falling back to 500 for out-of-range values.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// 400 Bad Request for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 Not Found for an id with no stored ship.
    pub fn ship_not_found(id: ShipId, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SHIP_NOT_FOUND,
            "Ship Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("Ship {} does not exist", id))
        .with_request_id(request_id)
    }

    /// 500 Internal Server Error.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 503 Service Unavailable.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        *response.status_mut() = status;
        response
    }
}

/// Handlers return `Result<_, Box<ProblemDetails>>` so the error arm stays small.
impl IntoResponse for Box<ProblemDetails> {
    fn into_response(self) -> Response {
        (*self).into_response()
    }
}

/// Convert library errors to ProblemDetails.
///
/// Missing ships never reach here: the catalog reports them as `None`/`false`.
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::StorePoisoned => ProblemDetails::service_unavailable(
            "Ship store is unavailable after a failed write",
            request_id,
        ),
        LibError::Sqlite(_) | LibError::Io(_) => {
            ProblemDetails::internal_error("Ship store failure", request_id)
        }
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_SHIP_NOT_FOUND,
            "Ship Not Found",
            StatusCode::NOT_FOUND,
        );
        assert_eq!(problem.type_uri, PROBLEM_SHIP_NOT_FOUND);
        assert_eq!(problem.status, 404);
        assert!(problem.detail.is_none());
    }

    #[test]
    fn test_problem_details_bad_request() {
        let problem = ProblemDetails::bad_request("Invalid JSON", "req-123");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_ship_not_found_mentions_id() {
        let problem = ProblemDetails::ship_not_found(42, "req-456");
        assert_eq!(problem.status_code(), StatusCode::NOT_FOUND);
        assert!(problem.detail.as_deref().unwrap().contains("42"));
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"title\":\"Invalid Request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"detail\":\"Test error\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_into_response_sets_problem_content_type() {
        let response = Box::new(ProblemDetails::ship_not_found(7, "req-7")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            PROBLEM_CONTENT_TYPE
        );
    }

    #[test]
    fn test_from_lib_error_poisoned_store() {
        let problem = from_lib_error(&LibError::StorePoisoned, "req-lib");
        assert_eq!(problem.type_uri, PROBLEM_SERVICE_UNAVAILABLE);
        assert_eq!(problem.status, 503);
    }

    #[test]
    fn test_from_lib_error_hides_io_detail() {
        let error = LibError::Io(std::io::Error::other("disk on fire"));
        let problem = from_lib_error(&error, "req-io");
        assert_eq!(problem.status, 500);
        assert!(!problem.detail.as_deref().unwrap().contains("disk"));
    }
}
