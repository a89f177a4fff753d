use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum GalleryServiceError {
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<AppError> for GalleryServiceError {
    fn from(err: AppError) -> Self {
        GalleryServiceError::Persistence(err.to_string())
    }
}

impl From<GalleryServiceError> for AppError {
    fn from(err: GalleryServiceError) -> Self {
        match err {
            GalleryServiceError::Persistence(msg) => AppError::Internal(msg),
        }
    }
}
