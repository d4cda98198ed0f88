//! Error types for catalog loading and validation

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, parsing or validating an intent catalog
///
/// Matching itself never fails; these only surface from the loader, which
/// callers usually route through [`crate::catalog::load_or_builtin`].
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid `{"intents": [...]}` JSON document
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog holds no intents at all
    #[error("Catalog contains no intents")]
    Empty,

    /// Two intents share a tag
    #[error("Duplicate intent tag: {0}")]
    DuplicateTag(String),

    /// No intent carries the fallback tag
    #[error("Catalog has no fallback intent tagged '{0}'")]
    MissingFallback(String),

    /// A regular intent has nothing to match against
    #[error("Intent '{0}' has no patterns")]
    NoPatterns(String),

    /// An intent has nothing to reply with
    #[error("Intent '{0}' has no responses")]
    NoResponses(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
