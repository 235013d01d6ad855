use crate::{
    abstract_trait::user::UserCommandRepositoryTrait,
    domain::requests::auth::{CreateUserRecordRequest, UpdateUserRecordRequest},
    model::user::{Role, User as UserModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(
        &self,
        req: &CreateUserRecordRequest,
    ) -> Result<UserModel, RepositoryError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (username, email, phone, password, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(&req.username)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.password)
        .bind(Role::User.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create user {}: {:?}", req.username, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created user ID {}", user.user_id);
        Ok(user)
    }

    async fn update_user(
        &self,
        req: &UpdateUserRecordRequest,
    ) -> Result<UserModel, RepositoryError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET username   = $2,
                email      = $3,
                phone      = $4,
                updated_at = current_timestamp
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(req.user_id)
        .bind(&req.username)
        .bind(&req.email)
        .bind(&req.phone)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update user {}: {:?}", req.user_id, e);
            RepositoryError::from(e)
        })?;

        info!("🔄 Updated user ID {}", user.user_id);
        Ok(user)
    }

    async fn update_role_by_email(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<UserModel>, RepositoryError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET role       = $2,
                updated_at = current_timestamp
            WHERE email = $1
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(role.as_str())
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to set role {} for {}: {:?}", role, email, e);
            RepositoryError::from(e)
        })?;

        if let Some(user) = &user {
            info!("🛡️ User ID {} now has role {}", user.user_id, role);
        }

        Ok(user)
    }
}
