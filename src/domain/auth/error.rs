use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account blocked")]
    AccountBlocked,
}

impl From<AppError> for AuthServiceError {
    fn from(err: AppError) -> Self {
        AuthServiceError::Dependency(err.to_string())
    }
}

impl From<AuthServiceError> for AppError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::InvalidCredentials => {
                AppError::Unauthorized("Invalid login credentials".to_string())
            }
            AuthServiceError::AccountBlocked => {
                AppError::Unauthorized("This account has been blocked".to_string())
            }
            AuthServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
