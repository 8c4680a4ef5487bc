use thiserror::Error;

use messmate_core::DomainError;
use messmate_infra::{ExportError, StorageError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to persist roster: {0}")]
    Storage(#[from] StorageError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}
