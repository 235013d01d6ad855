use crate::model::user::User as UserModel;
use serde::{Deserialize, Serialize};
use shared::utils::format_timestamp;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<UserModel> for UserResponse {
    fn from(value: UserModel) -> Self {
        UserResponse {
            id: value.user_id,
            username: value.username,
            email: value.email,
            phone: value.phone,
            role: value.role,
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}
