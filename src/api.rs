//! Twitter v1.1 REST client (OAuth 1.0a user context)
//!
//! Only the five calls the deleter needs: timeline and favorites pages,
//! status deletion, and like removal.

use reqwest::{Client, Response};
use reqwest_oauth1::{OAuthClientProvider, Secrets};
use serde::Deserialize;
use tracing::debug;

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::record::{RawTweet, Record};

/// The platform operations the paginator and destroyer depend on.
#[allow(async_fn_in_trait)]
pub trait PlatformApi {
    /// Most recent tweets of the authenticated user, newest first.
    async fn user_timeline(&self, count: u32, max_id: Option<u64>) -> Result<Vec<Record>>;

    /// Tweets liked by the authenticated user, newest first.
    async fn favorites(&self, count: u32, max_id: Option<u64>) -> Result<Vec<Record>>;

    async fn destroy_status(&self, id: &str) -> Result<()>;

    async fn destroy_favorite(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: Client,
    credentials: Credentials,
    base_url: String,
}

impl TwitterClient {
    /// Create client against `base_url` (the public API or a config override).
    pub fn with_base_url<S: Into<String>>(credentials: Credentials, base_url: S) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("deletetweets/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn secrets(&self) -> Secrets<'_> {
        Secrets::new(
            self.credentials.consumer_key.as_str(),
            self.credentials.consumer_secret.as_str(),
        )
        .token(
            self.credentials.access_token.as_str(),
            self.credentials.access_token_secret.as_str(),
        )
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get_page(&self, endpoint: &str, count: u32, max_id: Option<u64>) -> Result<Vec<Record>> {
        let mut query = vec![
            ("count", count.to_string()),
            ("tweet_mode", "extended".to_string()),
        ];
        if let Some(max_id) = max_id {
            query.push(("max_id", max_id.to_string()));
        }

        debug!(endpoint, count, ?max_id, "Fetching page");

        let response = self
            .http
            .clone()
            .oauth1(self.secrets())
            .get(self.url(endpoint))
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::ConnectionError(format!("GET {} failed: {}", endpoint, e)))?;

        let text = read_success_body(response).await?;
        let statuses: Vec<RawTweet> = serde_json::from_str(&text).map_err(|e| {
            Error::InvalidResponse(format!("{} returned unexpected JSON: {}", endpoint, e))
        })?;

        statuses.into_iter().map(Record::try_from).collect()
    }

    async fn post(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<()> {
        let response = self
            .http
            .clone()
            .oauth1(self.secrets())
            .post(self.url(endpoint))
            .query(query)
            .send()
            .await
            .map_err(|e| Error::ConnectionError(format!("POST {} failed: {}", endpoint, e)))?;

        read_success_body(response).await.map(|_| ())
    }
}

impl PlatformApi for TwitterClient {
    async fn user_timeline(&self, count: u32, max_id: Option<u64>) -> Result<Vec<Record>> {
        self.get_page("statuses/user_timeline.json", count, max_id)
            .await
    }

    async fn favorites(&self, count: u32, max_id: Option<u64>) -> Result<Vec<Record>> {
        self.get_page("favorites/list.json", count, max_id).await
    }

    async fn destroy_status(&self, id: &str) -> Result<()> {
        self.post(&format!("statuses/destroy/{}.json", id), &[])
            .await
    }

    async fn destroy_favorite(&self, id: &str) -> Result<()> {
        self.post("favorites/destroy.json", &[("id", id)]).await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Return the body of a 2xx response, or the provider's error messages.
async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| Error::ConnectionError(format!("Failed to read response: {}", e)))?;

    if status.is_success() {
        return Ok(text);
    }

    let message = match serde_json::from_str::<ErrorEnvelope>(&text) {
        Ok(envelope) if !envelope.errors.is_empty() => envelope
            .errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{} (code {})", e.message, code),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => text,
    };

    Err(Error::TwitterError(format!(
        "HTTP {}: {}",
        status.as_u16(),
        message
    )))
}
