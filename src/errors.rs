//! Crate-wide error taxonomy.
//!
//! Every fallible operation in the library returns [`StoreResult`]. Argument
//! validation failures are always raised before any I/O is attempted; remote
//! failures carry the HTTP-equivalent status reported by the collaborating
//! client so callers can branch on it if they need to.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A caller-supplied argument was empty, out of range, or otherwise
    /// unusable. Raised locally, never retried.
    #[error("argument `{name}` is invalid: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A value did not parse: a malformed segment suffix, a bad version
    /// string, an unreadable listing record.
    #[error("cannot parse `{value}`: {reason}")]
    Format { value: String, reason: String },

    /// The remote service answered with a non-success status. The status is
    /// preserved verbatim; the library interprets it only for the single
    /// not-found-means-create case during segment-folder resolution.
    #[error("remote operation failed with status {status}: {message}")]
    Remote { status: u16, message: String },

    /// A folder listing produced zero entries. A folder exists only by
    /// virtue of holding at least one object or subdir marker.
    #[error("folder `{0}` has no entries")]
    FolderNotFound(String),

    /// The content stream was closed or otherwise unusable mid-operation.
    #[error("content stream is closed")]
    StreamClosed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Shortcut for an invalid-argument failure.
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Shortcut for a parse failure naming the malformed value.
    pub fn format(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Shortcut for a remote failure with an HTTP-equivalent status.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// True for the one remote condition the core reacts to: 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote { status: 404, .. })
    }
}
