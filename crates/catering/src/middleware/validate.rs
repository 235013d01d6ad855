use crate::domain::requests::{describe, validation_messages};
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationErrors};

pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(json_value) =
            axum::Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    let payload = json!({
                        "status": "fail",
                        "message": format!("Invalid JSON: {}", rejection.body_text()),
                    });
                    (rejection.status(), axum::Json(payload))
                })?;

        json_value.validate().map_err(|validation_errors| {
            let payload = json!({
                "status": "fail",
                "message": format!(
                    "Validation failed: {}",
                    validation_messages(&validation_errors).join("; ")
                ),
                "details": field_details(&validation_errors),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload))
        })?;

        Ok(Self(json_value))
    }
}

/// `Path` whose rejection uses the JSON error envelope.
pub struct JsonPath<T>(pub T);

impl<S, T> FromRequestParts<S> for JsonPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                fail(
                    rejection.status(),
                    format!("Invalid path parameter: {}", rejection.body_text()),
                )
            })?;

        Ok(Self(value))
    }
}

/// `Query` whose rejection uses the JSON error envelope.
pub struct JsonQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for JsonQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                fail(
                    rejection.status(),
                    format!("Invalid query string: {}", rejection.body_text()),
                )
            })?;

        Ok(Self(value))
    }
}

fn fail(status: StatusCode, message: String) -> (StatusCode, axum::Json<Value>) {
    (
        status,
        axum::Json(json!({ "status": "fail", "message": message })),
    )
}

/// Top-level field errors keyed by field name.
fn field_details(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|error| describe(&field, error))
            .collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    json!(error_map)
}
