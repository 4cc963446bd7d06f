use crate::error::{AppError, AppResult};
use axum::extract::{
    Form, FromRequest, FromRequestParts, Json, Path, Request,
    rejection::{FormRejection, JsonRejection},
};
use axum::http::{header, request::Parts};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Body extractor that accepts JSON or urlencoded forms and runs `validate()`.
///
/// The body is read as a form when the content type says so and as JSON
/// otherwise, so clients that omit the header still get JSON parsing. An
/// empty body reads as `{}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedInput<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

impl<T, S> FromRequest<S> for ValidatedInput<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let value = if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            value
        } else {
            let bytes = axum::body::Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest {
                    message: e.body_text(),
                })?;
            let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
                axum::body::Bytes::from_static(b"{}")
            } else {
                bytes
            };
            let Json(value) = Json::<T>::from_bytes(&bytes).map_err(AppError::from)?;
            value
        };

        value.validate()?;
        Ok(ValidatedInput(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => AppError::UnprocessableContent {
                message: err.body_text(),
            },
            other => AppError::BadRequest {
                message: other.body_text(),
            },
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        match rejection {
            FormRejection::FailedToDeserializeFormBody(err) => AppError::UnprocessableContent {
                message: err.body_text(),
            },
            other => AppError::BadRequest {
                message: other.body_text(),
            },
        }
    }
}

/// Numeric path id.
///
/// Anything other than ASCII digits that fit in `i32` answers 404, the same
/// as an id with no record behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i32);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest {
                message: e.body_text(),
            })?;

        parse_record_id(&raw).map(RecordId).ok_or(AppError::NotFound {
            entity: "resource".to_string(),
            field: "id".to_string(),
            value: raw,
        })
    }
}

fn parse_record_id(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Method;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestInput {
        #[validate(required, length(max = 10))]
        name: Option<String>,
        count: Option<i32>,
    }

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder().method(Method::POST).uri("/test");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_json_body() {
        let req = request(Some("application/json"), r#"{"name":"pens","count":3}"#);
        let ValidatedInput(input) = ValidatedInput::<TestInput>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(input.name.as_deref(), Some("pens"));
        assert_eq!(input.count, Some(3));
    }

    #[tokio::test]
    async fn test_json_without_content_type() {
        let req = request(None, r#"{"name":"pens"}"#);
        let result = ValidatedInput::<TestInput>::from_request(req, &()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_empty_body_reads_as_empty_object() {
        let req = request(None, "");
        let error = ValidatedInput::<TestInput>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::ValidationErrors { .. }));
    }

    #[tokio::test]
    async fn test_form_body() {
        let req = request(Some("application/x-www-form-urlencoded"), "name=ink");
        let ValidatedInput(input) = ValidatedInput::<TestInput>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(input.name.as_deref(), Some("ink"));
        assert_eq!(input.count, None);
    }

    #[tokio::test]
    async fn test_validation_failure() {
        let req = request(Some("application/json"), r#"{"count":1}"#);
        let error = ValidatedInput::<TestInput>::from_request(req, &())
            .await
            .unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "The name field is required.");
            }
            other => panic!("Expected ValidationErrors error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = request(Some("application/json"), "{not json");
        let error = ValidatedInput::<TestInput>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_unprocessable() {
        let req = request(Some("application/json"), r#"{"name":"a","count":"three"}"#);
        let error = ValidatedInput::<TestInput>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::UnprocessableContent { .. }));
    }

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("42"), Some(42));
        assert_eq!(parse_record_id("007"), Some(7));
        assert_eq!(parse_record_id("abc"), None);
        assert_eq!(parse_record_id("-1"), None);
        assert_eq!(parse_record_id("1.5"), None);
        assert_eq!(parse_record_id(""), None);
        assert_eq!(parse_record_id("99999999999"), None);
    }
}
