use crate::error::DatabaseErrorConverter;
use std::collections::BTreeMap;
use thiserror::Error;

/// A single failed rule on a single request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl ValidationFieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-wide error type that represents all possible errors in the system.
///
/// Handlers return it directly; the HTTP layer maps every variant onto the
/// `{status: false, message, errors?}` envelope.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error on a single field
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Validation errors collected across the whole request
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Malformed request body
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Well-formed body whose values have the wrong shape
    #[error("Unprocessable content: {message}")]
    UnprocessableContent { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Shorthand for a lookup by primary key that found nothing.
    pub fn not_found(entity: &str, id: i32) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        }
    }

    /// Wraps a pool checkout failure.
    ///
    /// bb8 errors are generic over the connection error type, so only their
    /// display form is kept.
    pub fn connection_pool(error: impl std::fmt::Display) -> Self {
        AppError::ConnectionPool {
            source: anyhow::anyhow!("{error}"),
        }
    }

    /// A single-field validation failure reported in the `errors` map.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        AppError::ValidationErrors {
            errors: vec![ValidationFieldError::new(field, message)],
        }
    }

    /// Groups field errors by field name, keeping rule order within a field.
    pub fn field_errors(&self) -> Option<BTreeMap<String, Vec<String>>> {
        match self {
            AppError::Validation { field, reason } => {
                Some(BTreeMap::from([(field.clone(), vec![reason.clone()])]))
            }
            AppError::ValidationErrors { errors } => {
                let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for error in errors {
                    grouped
                        .entry(error.field.clone())
                        .or_default()
                        .push(error.message.clone());
                }
                Some(grouped)
            }
            _ => None,
        }
    }
}

/// Renders a request field the way it reads in a sentence: `category_id` -> `category id`.
pub(crate) fn field_label(field: &str) -> String {
    field.replace('_', " ")
}

fn message_for_rule(field: &str, error: &validator::ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let label = field_label(field);
    match error.code.as_ref() {
        "required" => format!("The {label} field is required."),
        "length" => match error.params.get("max") {
            Some(max) => format!("The {label} field must not be greater than {max} characters."),
            None => format!("The {label} field has an invalid length."),
        },
        "string" => format!("The {label} field must be a string."),
        "numeric" => format!("The {label} field must be a number."),
        "integer" => format!("The {label} field must be an integer."),
        _ => format!("The {label} field is invalid."),
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        let errors = fields
            .into_iter()
            .flat_map(|(field, rules)| {
                rules
                    .iter()
                    .map(|rule| ValidationFieldError::new(field.as_ref(), message_for_rule(&field, rule)))
                    .collect::<Vec<_>>()
            })
            .collect();

        AppError::ValidationErrors { errors }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(error: crate::config::ConfigError) -> Self {
        let key = error.field().unwrap_or("settings").to_string();
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
