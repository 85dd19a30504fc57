//! The connection to a running gateway.

use serde::Serialize;

use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: url::Url,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl InventoryClient {
    /// A client for the gateway at `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = url::Url::parse(base_url)?;
        // relative joins replace the last segment unless the path ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(InventoryClient {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn url(&self, path: &str) -> Result<url::Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Exchange a username and password for a session.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let request = self
            .http
            .post(self.url("api/auth/login")?)
            .json(&Credentials { username, password });
        self.send(request).await
    }

    pub(crate) fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        Ok(self.http.request(method, self.url(path)?))
    }

    /// Send a request; a non-success status becomes [`ClientError::Api`].
    pub(crate) async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let body: serde_json::Value =
                serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
            let message = body
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error"))
                .to_string();
            tracing::debug!(status = status.as_u16(), %message, "gateway returned an error");
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
