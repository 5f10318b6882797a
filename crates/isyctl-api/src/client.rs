// REST HTTP client
//
// Wraps `reqwest::Client` with controller URL construction, basic auth,
// status-code mapping, and XML decoding. Endpoint methods live in
// `nodes.rs` as inherent methods so this module stays focused on
// transport mechanics.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the controller's `/rest` API.
///
/// Stateless apart from the read-only connection details, and cheap to
/// clone (the underlying connection pool is shared), so it is safe to use
/// from concurrent requests.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    timeout: Option<Duration>,
}

impl RestClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the controller root, e.g. `http://192.168.1.20`.
    pub fn new(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username: username.into(),
            password,
            timeout: Some(transport.timeout),
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username: username.into(),
            password,
            timeout: None,
        }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The basic-auth user name.
    pub fn username(&self) -> &str {
        &self.username
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/rest/{path}`.
    ///
    /// Addresses are expected to be path-escaped already (`12%20AB%203%201`);
    /// existing escapes are preserved.
    pub(crate) fn rest_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/rest/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET `/rest/{path}` and decode the XML body into `T`.
    pub async fn get_document<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.rest_url(path)?;
        let body = self.fetch(url).await?;
        decode(&body)
    }

    /// GET `/rest/{path}` and return the raw body.
    pub async fn get_text(&self, path: &str) -> Result<String, Error> {
        let url = self.rest_url(path)?;
        self.fetch(url).await
    }

    /// Single authenticated GET. No retries.
    async fn fetch(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: format!("controller rejected credentials for user '{}'", self.username),
            });
        }
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.text().await.map_err(|e| self.map_transport(e))
    }

    fn map_transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.map_or(0, |t| t.as_secs()),
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Decode an XML document, keeping the body on failure for diagnostics.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    quick_xml::de::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> RestClient {
        RestClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            "admin",
            SecretString::from("hunter2".to_string()),
        )
    }

    #[test]
    fn rest_url_joins_without_double_slash() {
        let c = client("http://isy.local/");
        let url = c.rest_url("nodes").unwrap();
        assert_eq!(url.as_str(), "http://isy.local/rest/nodes");
    }

    #[test]
    fn rest_url_preserves_escaped_address() {
        let c = client("http://isy.local");
        let url = c.rest_url("/status/12%20AB%203%201").unwrap();
        assert_eq!(url.as_str(), "http://isy.local/rest/status/12%20AB%203%201");
    }

    #[test]
    fn debug_output_redacts_password() {
        let c = client("http://isy.local");
        let rendered = format!("{c:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
