use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid {name} parameter: {value}")]
    InvalidParameter { name: &'static str, value: String },
    #[error("{0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecordsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;
