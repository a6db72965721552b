use thiserror::Error;

pub type Result<T> = std::result::Result<T, PayoutError>;

#[derive(Error, Debug)]
pub enum PayoutError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    StorageError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Click {0} not found")]
    ClickNotFound(u32),
    #[error("Click {id} is not attributable: {reason}")]
    ClickNotAttributable { id: u32, reason: String },
    #[error("Offer {0} not found")]
    OfferNotFound(u32),
    #[error("Offer {0} has expired")]
    OfferExpired(u32),
    #[error("Offer {id} cannot be accepted: {reason}")]
    OfferNotPending { id: u32, reason: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PayoutError {
    fn from(err: rocksdb::Error) -> Self {
        PayoutError::StorageError(Box::new(err))
    }
}
