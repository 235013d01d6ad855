use crate::domain::response::user::UserResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}
