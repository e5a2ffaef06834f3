use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::errors::{Error, Result};

pub use reqwest::Method;

/// Host every endpoint is resolved against unless overridden.
pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com";

/// A fully resolved request, ready to be put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Complete `Authorization` header value, `Bearer <token>`.
    pub authorization: String,
}

/// Sends one request and decodes the JSON body.
///
/// The production implementation is [`ReqwestTransport`]; tests plug in fakes
/// to observe the exact requests issued.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// [`Transport`] backed by a `reqwest` client. No timeout and no retries.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(http: reqwest::Client) -> Self {
        ReqwestTransport { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let response = self
            .http
            .request(request.method, &request.url)
            .header(AUTHORIZATION, request.authorization)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

/// Authenticated access to the Web API.
///
/// Holds the bearer token for the lifetime of the client; nothing else is
/// kept between calls.
pub struct ApiClient {
    transport: Box<dyn Transport>,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(
        transport: Box<dyn Transport>,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        ApiClient {
            transport,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Client talking to [`DEFAULT_BASE_URL`] over `reqwest`.
    pub fn with_token(token: impl Into<String>) -> Self {
        ApiClient::new(Box::new(ReqwestTransport::default()), DEFAULT_BASE_URL, token)
    }

    /// Resolve `endpoint` against the base URL and attach the credential.
    pub fn request(&self, endpoint: &str, method: Method) -> ApiRequest {
        ApiRequest {
            method,
            url: format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            ),
            authorization: format!("Bearer {}", self.token),
        }
    }

    /// Issue a single request and return the decoded body as-is.
    pub async fn fetch_resource(&self, endpoint: &str, method: Method) -> Result<Value> {
        let request = self.request(endpoint, method);
        debug!("{} {}", request.method, request.url);
        self.transport.send(request).await
    }

    /// Same as [`ApiClient::fetch_resource`], decoding the body into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, method: Method) -> Result<T> {
        let body = self.fetch_resource(endpoint, method).await?;
        Ok(serde_json::from_value(body)?)
    }
}
