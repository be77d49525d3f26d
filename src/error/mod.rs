use crate::config::ConfigPathError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    ConfigPath(#[from] ConfigPathError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
