//! Error types returned by the repository and service layers.

use sea_orm::DbErr;

/// Errors raised while reading or mutating subuser records.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    RecordNotFound,

    #[error("User {user_id} is already a subuser of server {server_id}")]
    SubuserExists { user_id: i32, server_id: i32 },

    #[error("User {user_id} owns server {server_id} and cannot be added as a subuser")]
    UserIsServerOwner { user_id: i32, server_id: i32 },

    #[error("Unknown permission: {0}")]
    InvalidPermission(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl RepositoryError {
    /// True for the not-found case, so callers can branch without matching.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound)
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
