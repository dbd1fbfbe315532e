/// HTTP transport seam.
///
/// The adapters speak to providers through this one-method trait so the
/// pipeline can be exercised against a recording fake. The production
/// implementation wraps a blocking `reqwest` client; every provider call is
/// a plain GET that blocks until the response or failure arrives - no
/// retries, no timeouts beyond the client's defaults.

use crate::model::GaugeError;

/// A completed HTTP exchange: status plus the raw body, regardless of status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub trait HttpGet {
    /// Issues a GET. `provider` is diagnostic context carried into errors;
    /// a non-success status is returned as a response, not an error - the
    /// caller decides what a given status means.
    fn get(&self, provider: &str, url: &str) -> Result<HttpResponse, GaugeError>;
}

/// Blocking reqwest-backed transport.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        ReqwestTransport {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        ReqwestTransport::new()
    }
}

impl HttpGet for ReqwestTransport {
    fn get(&self, provider: &str, url: &str) -> Result<HttpResponse, GaugeError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| GaugeError::Transport {
                provider: provider.to_string(),
                detail: e.to_string(),
            })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| GaugeError::Transport {
            provider: provider.to_string(),
            detail: format!("failed reading response body: {e}"),
        })?;
        Ok(HttpResponse { status, body })
    }
}
