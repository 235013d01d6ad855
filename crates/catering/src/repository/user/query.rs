use crate::{abstract_trait::user::UserQueryRepositoryTrait, model::user::User as UserModel};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to find user {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to find user by username {}: {:?}", username, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to find user by email {}: {:?}", email, e);
                RepositoryError::from(e)
            })
    }
}
