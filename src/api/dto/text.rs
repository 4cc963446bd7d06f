//! Lenient text request values.
//!
//! A `name` sent as a JSON number is stored as its text form; booleans,
//! arrays and objects are reported against the field like any other
//! validation failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidationError;

/// Longest name a `VARCHAR(255)` column holds.
pub const MAX_TEXT_CHARS: usize = 255;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TextInput(pub Value);

impl TextInput {
    pub fn is_blank(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text, `None` for values that have no text form.
    pub fn to_text(&self) -> Option<String> {
        match &self.0 {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

pub fn validate_text(value: &TextInput) -> Result<(), ValidationError> {
    if value.is_blank() {
        return Err(ValidationError::new("required"));
    }
    let Some(text) = value.to_text() else {
        return Err(ValidationError::new("string"));
    };
    if text.chars().count() > MAX_TEXT_CHARS {
        let mut error = ValidationError::new("length");
        error.add_param("max".into(), &MAX_TEXT_CHARS);
        return Err(error);
    }
    Ok(())
}
