//! Resolution errors

use thiserror::Error;

use crate::store::StoreError;

/// Errors that abort an environment lookup
///
/// Document parse failures are not listed here: they only drop the offending
/// row and are reported through the repository's logger.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Store access failed: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RepositoryError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
