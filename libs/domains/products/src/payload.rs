//! Request body validation for create and update.
//!
//! Bodies are read into [`ProductPayload`], which keeps absent keys apart from
//! explicit `null`s and accepts values of any JSON type. The rules then run per
//! field and every failing field is reported in one 422 response, each with the
//! message of the first rule it broke.

use std::borrow::Cow;

use axum_helpers::FromPayload;
use observability::ProductMetrics;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use crate::models::{
    CreateProduct, DecimalError, MAX_NAME_LENGTH, MAX_PRICE_DIGITS, UpdateProduct, parse_decimal,
};

/// Raw product body. `None` means the key was absent, `Some(Value::Null)` an
/// explicit null.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub stock: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Strings are trimmed and blank strings count as null.
fn normalize(value: Option<Value>) -> Option<Value> {
    value.map(|value| match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Null
            } else if trimmed.len() == s.len() {
                Value::String(s)
            } else {
                Value::String(trimmed.to_string())
            }
        }
        other => other,
    })
}

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn required(field: &str) -> ValidationError {
    rule_error("required", format!("The {} field is required.", field))
}

fn string(field: &str, value: Value) -> Result<String, ValidationError> {
    let Value::String(s) = value else {
        return Err(rule_error(
            "string",
            format!("The {} field must be a string.", field),
        ));
    };

    if s.chars().count() > MAX_NAME_LENGTH {
        return Err(rule_error(
            "max",
            format!(
                "The {} field must not be greater than {} characters.",
                field, MAX_NAME_LENGTH
            ),
        ));
    }
    Ok(s)
}

fn numeric(field: &str, value: Value) -> Result<Decimal, ValidationError> {
    let parsed = match &value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => Err(DecimalError::Invalid),
    };
    parsed.map_err(|e| match e {
        DecimalError::Invalid => {
            rule_error("numeric", format!("The {} field must be a number.", field))
        }
        DecimalError::TooManyDigits => rule_error(
            "max_digits",
            format!(
                "The {} field must not have more than {} digits.",
                field, MAX_PRICE_DIGITS
            ),
        ),
    })
}

/// JSON integers, whole-valued JSON numbers (`10.0`) and integer strings, all
/// within the i32 range.
fn integer(field: &str, value: Value) -> Result<i32, ValidationError> {
    let parsed = match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        rule_error(
            "integer",
            format!("The {} field must be an integer.", field),
        )
    })
}

/// `required` rule: absent or null fails before the type rule runs.
fn require<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<Value>,
    rule: fn(&str, Value) -> Result<T, ValidationError>,
) -> Option<T> {
    match normalize(value) {
        None | Some(Value::Null) => {
            errors.add(field, required(field));
            None
        }
        Some(value) => sometimes(errors, field, Some(value), rule),
    }
}

/// `sometimes` rule: only a present key is checked. A present null fails the
/// type rule.
fn sometimes<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<Value>,
    rule: fn(&str, Value) -> Result<T, ValidationError>,
) -> Option<T> {
    let value = normalize(value)?;
    match rule(field, value) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            errors.add(field, error);
            None
        }
    }
}

fn reject<T>(operation: &'static str, errors: ValidationErrors) -> Result<T, ValidationErrors> {
    ProductMetrics::record_validation_failure(operation, errors.field_errors().len());
    Err(errors)
}

impl FromPayload for CreateProduct {
    type Payload = ProductPayload;

    fn from_payload(payload: ProductPayload) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = require(&mut errors, "name", payload.name, string);
        let price = require(&mut errors, "price", payload.price, numeric);
        let stock = require(&mut errors, "stock", payload.stock, integer);

        match (name, price, stock) {
            (Some(name), Some(price), Some(stock)) if errors.is_empty() => {
                Ok(CreateProduct { name, price, stock })
            }
            _ => reject("create", errors),
        }
    }
}

impl FromPayload for UpdateProduct {
    type Payload = ProductPayload;

    fn from_payload(payload: ProductPayload) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let input = UpdateProduct {
            name: sometimes(&mut errors, "name", payload.name, string),
            price: sometimes(&mut errors, "price", payload.price, numeric),
            stock: sometimes(&mut errors, "stock", payload.stock, integer),
        };

        if errors.is_empty() {
            Ok(input)
        } else {
            reject("update", errors)
        }
    }
}
