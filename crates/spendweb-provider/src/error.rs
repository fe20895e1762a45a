//! Error types for spendweb-provider

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid record {id}: {message}")]
    InvalidRecord { id: String, message: String },

    #[error("Duplicate record id: {id}")]
    DuplicateId { id: String },

    #[error("Fixture error: {message}")]
    FixtureError { message: String },

    #[error("JSON error")]
    JsonError(#[from] serde_json::Error),
}
