pub(crate) mod auth;
pub(crate) mod stream;
pub(crate) mod trends;

use std::sync::Arc;

use thiserror::Error;

pub use stream::{MessageSplitter, StatusStream, split_messages};
pub use trends::Trend;

/// The OAuth 1.0a user context credentials used to sign every request.
#[derive(Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token_key: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token_key", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

/// The base url for the REST api
pub(crate) const API_URL: &str = "https://api.twitter.com/1.1";
/// The base url for the streaming api
pub(crate) const STREAM_URL: &str = "https://stream.twitter.com/1.1";

#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("twitter request failed with status {status_code}: {body}")]
    Request { status_code: u16, body: String },
    #[error("unable to reach twitter: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unable to decode twitter response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unable to sign twitter request: {0}")]
    Signature(String),
}

#[derive(Clone, Debug)]
pub struct TwitterClient {
    /// The inner client used to make requests
    inner: reqwest::Client,
    credentials: Arc<Credentials>,
}

impl TwitterClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            inner: reqwest::Client::new(),
            credentials: Arc::new(credentials),
        }
    }

    /// Fetches the trending topics for a yahoo where-on-earth id
    #[tracing::instrument(skip(self))]
    pub async fn place_trends(&self, woeid: &str) -> Result<Vec<Trend>, TwitterError> {
        trends::place_trends(self, woeid).await
    }

    /// Opens a filtered status stream tracking `track`.
    /// The stream yields one json message per item and ends when twitter closes the connection.
    #[tracing::instrument(skip(self))]
    pub async fn filter(&self, track: &str) -> Result<StatusStream, TwitterError> {
        stream::filter(self, track).await
    }

    fn authorization(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, TwitterError> {
        auth::authorization_header(
            &self.credentials,
            method,
            url,
            params,
            &auth::nonce(),
            chrono::Utc::now().timestamp(),
        )
    }
}

/// Turns a non 2xx response into a [TwitterError::Request] carrying the body
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, TwitterError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!(status_code = status.as_u16(), body = %body, "twitter request failed");

    Err(TwitterError::Request {
        status_code: status.as_u16(),
        body,
    })
}
