use crate::error::app_error::field_label;
use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint violations the client can fix become validation errors keyed
/// by the offending column. Everything else becomes `AppError::Database`.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let full_message = match info.details() {
            Some(details) => format!("{message}\n{details}"),
            None => message.to_string(),
        };

        let parsed = match kind {
            DatabaseErrorKind::NotNullViolation => info
                .column_name()
                .map(str::to_string)
                .or_else(|| {
                    ConstraintParser::parse_not_null_violation(&full_message).map(|(_, field)| field)
                })
                .map(|field| {
                    let reason = format!("The {} field is required.", field_label(&field));
                    AppError::Validation { field, reason }
                }),
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(&full_message, info.constraint_name())
                    .map(|(_, field, _)| {
                        let reason = format!("The selected {} is invalid.", field_label(&field));
                        AppError::Validation { field, reason }
                    })
            }
            _ => None,
        };

        parsed.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{kind:?}: {message}"),
        })
    }
}
