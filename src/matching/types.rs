//! Error taxonomy for URL matching.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The submitted URL batch is unusable.
///
/// Always the caller's fault; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No request body at all.
    #[error("Request body is empty; expected a JSON object with an 'urls' item.")]
    MissingBody,

    /// The body is not parseable JSON.
    #[error("Request data is not a valid JSON: {0}")]
    MalformedJson(String),

    /// The body is JSON but has no usable `urls` item (absent or null).
    #[error("Item 'urls' cannot be found from request JSON.")]
    MissingUrls,

    /// `urls` is present but is not a list of strings.
    #[error("Item 'urls' must be a list of strings: {0}")]
    InvalidUrls(String),

    /// `urls` is an empty list.
    #[error("Item 'urls' must contain at least one URL.")]
    EmptyUrls,
}

/// Errors surfaced by the matching core.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The host list could not be read. Fatal for the request.
    ///
    /// `path` is `None` when the list came from a stream rather than a file.
    #[error("Host list unavailable{}: {source}", location(path.as_deref()))]
    SourceUnavailable {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn location(path: Option<&Path>) -> String {
    path.map(|path| format!(" at {}", path.display())).unwrap_or_default()
}
