//! Icon manifest: fetch, strip the anti-hijacking preamble, parse.

use crate::error::MetadataError;
use crate::http::HttpClient;
use serde::Deserialize;

/// Number of characters (`)]}'` plus newline) prepended to the JSON body.
pub const PREAMBLE_LEN: usize = 5;

/// The fetched manifest. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    /// Host serving the per-icon SVGs (e.g. `fonts.gstatic.com`).
    pub host: String,
    /// All family names, symbol and legacy alike.
    pub families: Vec<String>,
    /// Icon records in manifest order.
    pub icons: Vec<RawIcon>,
}

/// One icon as listed in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIcon {
    pub name: String,
    pub version: i64,
    #[serde(default)]
    pub unsupported_families: Vec<String>,
}

/// Parses a raw manifest body, skipping the fixed preamble.
pub fn parse_metadata(body: &str) -> Result<Metadata, MetadataError> {
    let json = body
        .char_indices()
        .nth(PREAMBLE_LEN)
        .map(|(idx, _)| &body[idx..])
        .ok_or_else(|| MetadataError::TooShort {
            len: body.chars().count(),
        })?;
    Ok(serde_json::from_str(json)?)
}

/// Issues one GET against `url` and parses the manifest.
pub fn fetch_metadata(client: &HttpClient, url: &str) -> Result<Metadata, MetadataError> {
    tracing::debug!(url, "fetching icon metadata");
    let body = client.get_text(url)?;
    let metadata = parse_metadata(&body)?;
    tracing::info!(
        host = %metadata.host,
        families = metadata.families.len(),
        icons = metadata.icons.len(),
        "icon metadata loaded"
    );
    Ok(metadata)
}
