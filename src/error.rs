use miette::Diagnostic;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug, Diagnostic)]
pub enum ShopError {
    /// A username, account id or item id did not resolve.
    #[error("{0} not found")]
    #[diagnostic(code(shopcart::not_found))]
    NotFound(String),
    #[error("Validation failed: {0}")]
    #[diagnostic(code(shopcart::validation))]
    ValidationFailed(String),
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
    /// Opaque failure reported by a persistence adapter.
    #[error("Storage failure: {0}")]
    #[diagnostic(code(shopcart::storage))]
    StorageFailure(#[source] BoxError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShopError {
    pub fn storage<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::StorageFailure(error.into())
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(error: serde_json::Error) -> Self {
        Self::storage(error)
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for ShopError {
    fn from(error: rocksdb::Error) -> Self {
        Self::storage(error)
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
