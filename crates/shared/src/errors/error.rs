use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: "fail".into(),
            message: message.into(),
        }
    }
}
