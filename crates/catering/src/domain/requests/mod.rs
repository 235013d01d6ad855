pub mod auth;
pub mod order;
pub mod schedule;

use serde::{Deserialize, Deserializer};
use shared::{
    errors::ServiceError,
    utils::{parse_date, parse_time},
};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

pub const DEFAULT_PAGE: i32 = 1;
pub const DEFAULT_PAGE_SIZE: i32 = 10;

pub(crate) fn default_page() -> i32 {
    DEFAULT_PAGE
}

pub(crate) fn default_page_size() -> i32 {
    DEFAULT_PAGE_SIZE
}

/// Text fields are stored trimmed, so length rules must see the trimmed value.
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}

pub(crate) fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| value.map(|v| v.trim().to_string()))
}

/// Absent field stays `None`; an explicit `null` becomes `Some(None)`.
pub(crate) fn nullable_trimmed<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    trimmed_opt(deserializer).map(Some)
}

pub(crate) fn trim_opt(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_string())
}

pub(crate) fn validate_date(value: &str) -> Result<(), ValidationError> {
    match parse_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("date")
            .with_message(Cow::Borrowed("must be a date in YYYY-MM-DD format"))),
    }
}

pub(crate) fn validate_time(value: &str) -> Result<(), ValidationError> {
    match parse_time(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("time")
            .with_message(Cow::Borrowed("must be a time in HH:MM format"))),
    }
}

/// Runs the derived rules and converts failures into a `ServiceError::Validation`.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), ServiceError> {
    req.validate()
        .map_err(|errors| ServiceError::Validation(validation_messages(&errors)))
}

/// Flattens nested validation errors into sorted `path: message` lines,
/// e.g. `items[0].quantity: Value out of range`.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect_messages("", errors, &mut out);
    out.sort();
    out
}

fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.push(format!("{path}: {}", describe(&path, error)));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect_messages(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

pub(crate) fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "email" => "Invalid email format".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            "must_match" => "Values do not match".to_string(),
            _ => format!("Invalid {field}"),
        },
    }
}
