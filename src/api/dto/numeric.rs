//! Lenient numeric request values.
//!
//! Clients send prices and quantities either as JSON numbers or as numeric
//! strings (`"12.50"`); form bodies only ever carry strings. Values are kept
//! raw until validation so a malformed one is reported against its field
//! instead of failing the whole body.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidationError;

/// Largest magnitude a `NUMERIC(10,2)` column holds.
const MAX_PRICE: &str = "99999999.99";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct NumericInput(pub Value);

impl NumericInput {
    /// True for `null`, empty and whitespace-only strings.
    pub fn is_blank(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn to_decimal(&self) -> Option<BigDecimal> {
        match &self.0 {
            Value::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
            Value::String(s) => BigDecimal::from_str(s.trim()).ok(),
            _ => None,
        }
    }

    /// Whole numbers that fit in `i32`. `"4.0"` counts, `"4.5"` does not.
    pub fn to_i32(&self) -> Option<i32> {
        let value = self.to_decimal()?;
        if !value.is_integer() {
            return None;
        }
        value.to_i32()
    }

    /// The value for an `INTEGER` column: rounded half-up (away from zero)
    /// to a whole number, `None` outside the `i32` range.
    pub fn to_quantity(&self) -> Option<i32> {
        self.to_decimal()
            .map(|value| value.with_scale_round(0, RoundingMode::HalfUp))
            .and_then(|value| value.to_i32())
    }

    /// The value as a `NUMERIC(10,2)` amount, rounded half-up to cents.
    pub fn to_price(&self) -> Option<BigDecimal> {
        self.to_decimal()
            .map(|value| value.with_scale_round(2, RoundingMode::HalfUp))
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput(Value::from(value))
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput(Value::from(value))
    }
}

fn failure(code: &'static str) -> ValidationError {
    ValidationError::new(code)
}

pub fn validate_numeric(value: &NumericInput) -> Result<(), ValidationError> {
    if value.is_blank() {
        return Err(failure("required"));
    }
    if value.to_decimal().is_none() {
        return Err(failure("numeric"));
    }
    Ok(())
}

pub fn validate_price(value: &NumericInput) -> Result<(), ValidationError> {
    validate_numeric(value)?;

    let max = BigDecimal::from_str(MAX_PRICE).map_err(|_| failure("numeric"))?;
    match value.to_price() {
        Some(price) if price.abs() <= max => Ok(()),
        _ => Err(failure("price_range").with_message(
            format!("The price field must be between -{MAX_PRICE} and {MAX_PRICE}.").into(),
        )),
    }
}

/// Any number is accepted; fractions are rounded when stored.
pub fn validate_quantity(value: &NumericInput) -> Result<(), ValidationError> {
    validate_numeric(value)?;
    if value.to_quantity().is_none() {
        return Err(failure("quantity_range").with_message(
            format!(
                "The quantity field must be between {} and {}.",
                i32::MIN,
                i32::MAX
            )
            .into(),
        ));
    }
    Ok(())
}

pub fn validate_integer(value: &NumericInput) -> Result<(), ValidationError> {
    validate_numeric(value)?;
    if value.to_i32().is_none() {
        return Err(failure("integer"));
    }
    Ok(())
}

/// A category reference must be a whole number before it is looked up.
pub fn validate_category_reference(value: &NumericInput) -> Result<(), ValidationError> {
    if value.is_blank() {
        return Err(failure("required"));
    }
    if value.to_i32().is_none() {
        return Err(failure("exists")
            .with_message("The selected category id is invalid.".into()));
    }
    Ok(())
}
