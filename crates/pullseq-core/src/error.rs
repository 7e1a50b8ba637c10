use thiserror::Error;

use crate::registry::Namespace;

/// Top-level error type for the pullseq library.
#[derive(Debug, Error)]
pub enum SeqError {
    #[error("Invalid source: {0}")]
    InvalidSource(#[from] SourceError),

    #[error("Producer error: {0}")]
    Producer(String),

    #[error("Callback error: {0}")]
    Callback(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Raised by the construction adapter when its input cannot be pulled from.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("expected array or iterator-like object, got null")]
    Null,

    #[error("expected array or iterator-like object, got {found}")]
    Unsupported { found: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Capability '{name}' is not installed on {namespace}")]
    UnknownCapability { namespace: Namespace, name: String },
}

pub type Result<T> = std::result::Result<T, SeqError>;
