//! Provider errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to connect to container runtime: {0}")]
    ConnectionError(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Exec failed: {0}")]
    ExecError(String),

    #[error("Container runtime error: {0}")]
    RuntimeError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<bollard::errors::Error> for ProviderError {
    fn from(err: bollard::errors::Error) -> Self {
        use bollard::errors::Error;
        match err {
            Error::DockerResponseServerError {
                status_code: 404,
                message,
            } => Self::ContainerNotFound(message),
            Error::DockerResponseServerError {
                status_code: 409,
                message,
            } => Self::RuntimeError(format!("conflict: {}", message)),
            other => Self::RuntimeError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
