use thiserror::Error;

use crate::domain::product_draft::{DraftError, REQUIRED_FIELDS_MESSAGE};
use crate::repository::RepositoryError;

pub mod drafts;

/// Errors returned by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The submitted form was rejected; the message is shown to the user.
    #[error("form error: {0}")]
    Form(String),
    /// The draft referenced by the session no longer exists.
    #[error("draft not found")]
    NotFound,
    /// The draft was already submitted and cannot change any more.
    #[error("draft is no longer editable")]
    Conflict,
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<DraftError> for ServiceError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::NotEditing => ServiceError::Conflict,
            DraftError::MissingRequiredFields(_) => {
                ServiceError::Form(REQUIRED_FIELDS_MESSAGE.to_string())
            }
            other => ServiceError::Form(other.to_string()),
        }
    }
}
