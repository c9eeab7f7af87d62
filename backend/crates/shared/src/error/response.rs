//! HTTP rendering
//!
//! [`AppError`] becomes an RFC 7807 problem document with the kind's status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::app_error::AppError;

/// `application/problem+json` body
#[derive(Debug, Serialize)]
pub struct Problem<'a> {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: &'static str,
    pub status: u16,
    pub detail: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'a str>,
}

impl<'a> From<&'a AppError> for Problem<'a> {
    fn from(err: &'a AppError) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", err.status_code()),
            title: err.kind().as_str(),
            status: err.status_code(),
            detail: err.message(),
            action: err.action(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, Json(Problem::from(&self))).into_response();
        response.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_problem_document() {
        let response = AppError::forbidden("Access denied")
            .with_action("Ask an administrator")
            .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "application/problem+json"
        );

        let body = body_of(response).await;
        assert_eq!(body["type"], "https://httpstatuses.io/403");
        assert_eq!(body["status"], 403);
        assert_eq!(body["title"], "Forbidden");
        assert_eq!(body["detail"], "Access denied");
        assert_eq!(body["action"], "Ask an administrator");
    }

    #[tokio::test]
    async fn test_action_omitted_when_absent() {
        let body = body_of(AppError::new(ErrorKind::NotFound, "Account not found").into_response())
            .await;
        assert!(body.get("action").is_none());
        assert_eq!(body["status"], 404);
    }
}
