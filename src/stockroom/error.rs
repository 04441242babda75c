use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Duplicate key in {collection}: {key}")]
    DuplicateKey {
        collection: &'static str,
        key: String,
    },

    #[error("Empty input: no rows to import")]
    EmptyInput,

    #[error("Invalid identity: {0:?}")]
    InvalidIdentity(String),

    #[error("Invalid numeric value for {field}: {value:?}")]
    InvalidNumeric { field: &'static str, value: String },

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl StockError {
    /// Errors caused by the caller's input rather than by the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StockError::EmptyInput
                | StockError::InvalidIdentity(_)
                | StockError::InvalidNumeric { .. }
                | StockError::Upload(_)
                | StockError::Api(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StockError>;
