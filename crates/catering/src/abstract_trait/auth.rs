use crate::domain::{
    requests::auth::{LoginRequest, RegisterRequest, UpdateProfileRequest},
    response::{auth::AuthResponse, user::UserResponse},
};
use anyhow::Result;
use async_trait::async_trait;
use shared::{domain::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynRegisterService = Arc<dyn RegisterServiceTrait + Send + Sync>;
pub type DynLoginService = Arc<dyn LoginServiceTrait + Send + Sync>;
pub type DynIdentityService = Arc<dyn IdentityServiceTrait + Send + Sync>;

#[async_trait]
pub trait RegisterServiceTrait {
    async fn register(&self, req: &RegisterRequest)
    -> Result<ApiResponse<AuthResponse>, ServiceError>;
}

#[async_trait]
pub trait LoginServiceTrait {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<AuthResponse>, ServiceError>;
}

#[async_trait]
pub trait IdentityServiceTrait {
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    /// Fails with `Forbidden` unless the stored role of `user_id` is admin.
    async fn ensure_admin(&self, user_id: i32) -> Result<(), ServiceError>;
}
