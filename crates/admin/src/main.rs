use anyhow::{Context, Result, bail};
use catering::{
    abstract_trait::user::UserCommandRepositoryTrait, model::user::Role,
    repository::user::UserCommandRepository,
};
use dotenv::dotenv;
use shared::config::ConnectionManager;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Promotes an existing account to the admin role: `make-admin <email>`.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Some(email) = std::env::args().nth(1) else {
        bail!("Usage: make-admin <email>");
    };
    let email = email.trim().to_lowercase();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = ConnectionManager::new_pool(&database_url, 1, 1).await?;

    let repository = UserCommandRepository::new(pool);
    let Some(user) = repository
        .update_role_by_email(&email, Role::Admin)
        .await
        .context("Failed to update user role")?
    else {
        bail!("No user registered with email {email}");
    };

    info!("👑 User {} ({}) is now an admin", user.username, user.email);
    println!("✅ {} is now an admin", user.email);

    Ok(())
}
