//! Client error type.

use thiserror::Error;

/// Errors the client can report. None of them are retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The representation offers no operation with this name.
    #[error("unknown operation {0:?}")]
    UnknownOperation(String),

    /// A templated payload needs a value the caller did not supply.
    /// Raised before anything is sent.
    #[error("operation {operation:?} needs a value for {field:?}")]
    MissingSubstitution { operation: String, field: String },

    /// The resource map served at the root lacks an expected entry.
    #[error("resource map has no {0:?} entry")]
    MissingResource(String),

    /// A navigation call got a non-success status. Carries the response
    /// body, which is usually an error document.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Transport failure or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
