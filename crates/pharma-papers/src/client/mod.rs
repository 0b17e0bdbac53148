//! HTTP clients for the literature database and the company data sources.
//!
//! Provides:
//! - A shared [`HttpClient`] with connection pooling, retry middleware and
//!   status-code mapping to [`ClientError`]
//! - [`PubMedClient`] for E-utilities search and record fetching

mod middleware;
mod pubmed;
pub mod xml;

pub use pubmed::PubMedClient;

use reqwest::Client;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};

/// Thin JSON/text HTTP client shared by every remote collaborator.
#[derive(Clone)]
pub struct HttpClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,
}

impl HttpClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let user_agent =
            format!("{}/{} (mailto:{})", api::TOOL_NAME, env!("CARGO_PKG_VERSION"), config.email);

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client: middleware::with_retries(client, config.max_retries),
        })
    }

    /// GET a JSON document.
    pub async fn get_json<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.get_json_accepting(url, params, "application/json").await
    }

    /// GET a JSON document with a specific `Accept` media type.
    pub async fn get_json_accepting<T>(
        &self,
        url: &str,
        params: &[(String, String)],
        accept: &str,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let body = self.send(url, params, accept).await?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// GET a response body as text.
    pub async fn get_text(&self, url: &str, params: &[(String, String)]) -> ClientResult<String> {
        self.send(url, params, "*/*").await
    }

    async fn send(
        &self,
        url: &str,
        params: &[(String, String)],
        accept: &str,
    ) -> ClientResult<String> {
        tracing::debug!(url, params = params.len(), "GET");

        let response = self
            .client
            .get(url)
            .query(params)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;

        let response = Self::handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    message: text,
                })
            }
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}
