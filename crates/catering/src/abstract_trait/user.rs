use crate::{
    domain::requests::auth::{CreateUserRecordRequest, UpdateUserRecordRequest},
    model::user::{Role, User as UserModel},
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;
pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError>;
}

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_user(&self, req: &CreateUserRecordRequest)
    -> Result<UserModel, RepositoryError>;
    async fn update_user(&self, req: &UpdateUserRecordRequest)
    -> Result<UserModel, RepositoryError>;
    /// Returns `None` when no user has that email.
    async fn update_role_by_email(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<UserModel>, RepositoryError>;
}
