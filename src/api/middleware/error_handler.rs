//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure leaves the API as `{status: false, message, errors?}`.
//! Internal details are logged, never returned.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Summary line for a set of field errors: the first message, plus a count
/// of the rest.
fn validation_summary(error: &AppError) -> String {
    let messages: Vec<String> = error
        .field_errors()
        .map(|fields| fields.into_values().flatten().collect())
        .unwrap_or_default();

    match messages.split_first() {
        None => "The given data was invalid.".to_string(),
        Some((first, [])) => first.clone(),
        Some((first, rest)) if rest.len() == 1 => format!("{first} (and 1 more error)"),
        Some((first, rest)) => format!("{first} (and {} more errors)", rest.len()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        let body = match &self {
            AppError::NotFound { entity, field, value } => {
                ErrorResponse::new(format!("{} with {field} {value} not found", capitalize(entity)))
            }
            AppError::Validation { .. } | AppError::ValidationErrors { .. } => {
                let mut body = ErrorResponse::new(validation_summary(&self));
                if let Some(errors) = self.field_errors() {
                    body = body.with_errors(errors);
                }
                body
            }
            AppError::BadRequest { message } => ErrorResponse::new(format!("Malformed request body: {message}")),
            AppError::UnprocessableContent { message } => ErrorResponse::new(message.clone()),
            AppError::Database { operation, source } => {
                tracing::error!(operation = %operation, error = ?source, "Database operation failed");
                ErrorResponse::new("Internal server error")
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = ?source, "Configuration error");
                ErrorResponse::new("Internal server error")
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = ?source, "Database connection unavailable");
                ErrorResponse::new("Storage unavailable")
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Unhandled internal error");
                ErrorResponse::new("Internal server error")
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::UnprocessableContent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::ConnectionPool { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn default_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad request",
        StatusCode::NOT_FOUND => "The requested resource was not found",
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint",
        StatusCode::REQUEST_TIMEOUT => "Request timeout",
        StatusCode::PAYLOAD_TOO_LARGE => "Request payload too large",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported media type",
        s if s.is_server_error() => "Internal server error",
        _ => "Request failed",
    }
}

/// Rewrites error responses that did not come from `AppError` (router
/// fallbacks, 405s, timeouts) into the error envelope.
///
/// Responses that are already JSON pass through untouched.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (mut parts, _body) = response.into_parts();
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);

    let body = Json(ErrorResponse::new(default_message(status)));
    (parts, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            error_to_status_code(&AppError::not_found("category", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_to_status_code(&AppError::invalid_field("name", "x")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_to_status_code(&AppError::BadRequest {
                message: "x".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status_code(&AppError::connection_pool("timed out")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, body) = body_json(AppError::not_found("category", 99)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], "Category with id 99 not found");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_validation_envelope() {
        let error = AppError::ValidationErrors {
            errors: vec![
                ValidationFieldError::new("price", "The price field must be a number."),
                ValidationFieldError::new("quantity", "The quantity field is required."),
            ],
        };
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "The price field must be a number. (and 1 more error)");
        assert_eq!(body["errors"]["price"][0], "The price field must be a number.");
        assert_eq!(body["errors"]["quantity"][0], "The quantity field is required.");
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("secret connection string"),
        };
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }
}
