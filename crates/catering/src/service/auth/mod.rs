mod identity;
mod login;
mod register;

pub use self::identity::{IdentityService, IdentityServiceDeps};
pub use self::login::{LoginService, LoginServiceDeps, MAX_LOGIN_ATTEMPTS};
pub use self::register::{RegisterService, RegisterServiceDeps};

use shared::errors::{RepositoryError, ServiceError};

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Translates a unique-constraint violation on `users` into the matching conflict.
pub(crate) fn user_conflict(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(constraint) if constraint.contains("email") => {
            ServiceError::Conflict("Email is already registered".into())
        }
        RepositoryError::AlreadyExists(_) => {
            ServiceError::Conflict("Username is already taken".into())
        }
        other => ServiceError::Repo(other),
    }
}
