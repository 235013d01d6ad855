use super::{trim_opt, trimmed, trimmed_opt};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30))]
    #[serde(deserialize_with = "trimmed")]
    pub username: String,

    #[validate(email)]
    #[serde(deserialize_with = "trimmed")]
    pub email: String,

    #[validate(length(min = 7, max = 20))]
    #[serde(deserialize_with = "trimmed")]
    pub phone: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    #[serde(rename = "confirm_password", alias = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 30))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub username: Option<String>,

    #[validate(email)]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub email: Option<String>,

    #[validate(length(min = 7, max = 20))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub phone: Option<String>,
}

impl RegisterRequest {
    /// Copy with the stored text fields trimmed; passwords are kept verbatim.
    pub fn normalized(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            ..self.clone()
        }
    }
}

impl UpdateProfileRequest {
    pub fn normalized(&self) -> Self {
        Self {
            username: trim_opt(&self.username),
            email: trim_opt(&self.email),
            phone: trim_opt(&self.phone),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserRecordRequest {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct UpdateUserRecordRequest {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub phone: String,
}
