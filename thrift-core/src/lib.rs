pub mod completion;
pub mod search;
pub mod sku;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Internal service error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
