//! Error types for whaletui-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{0}")]
    Provider(#[from] whaletui_provider::ProviderError),

    /// The command ran but exited non-zero; `output` is whatever it printed
    #[error("command exited with status {code}")]
    ExitStatus { code: i64, output: String },

    #[error("command execution not available")]
    Unavailable,
}

impl CoreError {
    /// Output produced before the failure, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::ExitStatus { output, .. } if !output.is_empty() => Some(output),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
