#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown theme: {id}")]
    UnknownTheme { id: String },

    #[error("no home directory available; set ATELIER_CONFIG_DIR")]
    NoConfigDir,
}

impl AppError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownTheme { .. } => 2,
            _ => 1,
        }
    }
}
