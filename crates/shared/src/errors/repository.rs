use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique constraint");
                return RepositoryError::AlreadyExists(constraint.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKey(db_err.message().to_string());
            }
        }

        match err {
            SqlxError::RowNotFound => RepositoryError::NotFound,
            other => RepositoryError::Sqlx(other),
        }
    }
}
