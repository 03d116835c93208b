use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("invalid stored password hash: {0}")]
    InvalidHash(String),

    #[error("user store error: {0}")]
    UserStoreError(String),
}
