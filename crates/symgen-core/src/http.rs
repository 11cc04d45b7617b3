//! Blocking HTTP GET on top of libcurl.
//!
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

use crate::config::GeneratorConfig;
use crate::error::HttpError;
use std::time::Duration;

/// Request settings shared by every GET of a run.
#[derive(Debug, Clone)]
pub struct HttpClient {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

impl HttpClient {
    pub fn from_config(cfg: &GeneratorConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.request_timeout_secs),
            user_agent: format!("symgen/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// GETs `url` and returns the body as text. Follows redirects; non-2xx is an error.
    pub fn get_text(&self, url: &str) -> Result<String, HttpError> {
        let curl_err = |source| HttpError::Curl {
            url: url.to_string(),
            source,
        };

        let mut body: Vec<u8> = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.follow_location(true).map_err(curl_err)?;
        easy.max_redirections(10).map_err(curl_err)?;
        easy.useragent(&self.user_agent).map_err(curl_err)?;
        easy.connect_timeout(self.connect_timeout).map_err(curl_err)?;
        easy.timeout(self.timeout).map_err(curl_err)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_err)?;
            transfer.perform().map_err(curl_err)?;
        }

        let code = easy.response_code().map_err(curl_err)?;
        if !(200..300).contains(&code) {
            return Err(HttpError::Status {
                url: url.to_string(),
                code,
            });
        }

        String::from_utf8(body).map_err(|_| HttpError::Utf8 {
            url: url.to_string(),
        })
    }
}
