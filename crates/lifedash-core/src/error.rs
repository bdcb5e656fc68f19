use lifedash_domain::Table;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{table} record not found: {id}")]
    NotFound { table: Table, id: Uuid },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Object store error: {0}")]
    ObjectStore(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}

impl CoreError {
    pub fn not_found(table: Table, id: Uuid) -> Self {
        CoreError::NotFound { table, id }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}
