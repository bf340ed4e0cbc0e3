//! Error types for the upload pipeline (made by FontLab https://www.fontlab.com/)

use std::io;

use thiserror::Error;

/// Why an upload did not produce font metadata.
///
/// Each variant maps to a distinct response on the HTTP boundary, and none of
/// them is fatal to the process: the user fixes the input or simply retries.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The submission itself is malformed: missing file, wrong type, too large.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The bytes did not yield a usable font or family name.
    #[error("Invalid font file")]
    Parse(#[source] ParseError),

    /// The object store refused or failed the write.
    #[error("Error uploading file")]
    Storage(#[source] StoreError),
}

impl UploadError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        UploadError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Short machine-readable discriminator used in response payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::Validation { .. } => "validation",
            UploadError::Parse(_) => "parse",
            UploadError::Storage(_) => "storage",
        }
    }
}

/// Failure reported by a [`FontIntrospector`](crate::introspect::FontIntrospector).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized font data: {0}")]
    Malformed(String),

    #[error("font collection has no members")]
    EmptyCollection,

    #[error("no collection member carries a family name")]
    NoFamily,

    #[error("collection member for family {0:?} could not be resolved")]
    UnresolvedFamily(String),
}

/// Failure reported by an [`ObjectStore`](crate::storage::ObjectStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid object key {0:?}")]
    InvalidKey(String),

    #[error("object {0:?} not found")]
    NotFound(String),

    #[error("{0} is not supported by this store")]
    Unsupported(&'static str),

    #[error("i/o error for object {key:?}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("corrupt object metadata for {key:?}")]
    Metadata {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reported by a [`KeyValueStore`](crate::cache::KeyValueStore).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("i/o error for cache key {key:?}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("could not serialize cached font metadata")]
    Encode(#[from] serde_json::Error),
}

/// An [`UploadStatus`](crate::status::UploadStatus) call that does not fit the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("cannot move from {from} to {to}")]
    IllegalTransition {
        from: crate::status::UploadStage,
        to: crate::status::UploadStage,
    },

    #[error("progress updates are not accepted while {0}")]
    NotAnimating(crate::status::UploadStage),
}
