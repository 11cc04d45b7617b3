//! Error types threaded through each generation stage.

use std::path::PathBuf;

/// A single GET failed (transport error, non-2xx status, or non-UTF-8 body).
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("GET {url}: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u32 },
    #[error("GET {url}: response body is not valid UTF-8")]
    Utf8 { url: String },
}

/// The icon manifest could not be fetched or parsed.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("fetching icon metadata failed")]
    Fetch(#[from] HttpError),
    #[error("metadata body too short ({len} chars) to hold the JSON preamble")]
    TooShort { len: usize },
    #[error("metadata is not valid JSON")]
    Json(#[from] serde_json::Error),
}

/// A generated file could not be written.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("writing {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Run-level failure. Per-icon failures never surface here; they are
/// collected into the run report instead.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("cannot generate icons without metadata")]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("fetch worker panicked: {0}")]
    Join(String),
}

/// `outer: inner: root` rendering of an error and its sources.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    anyhow::Chain::new(err)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
