//! Review HTTP Client
//!
//! A simple, type-safe HTTP client for the design review API.
//!
//! The client is an explicitly constructed handle: create one per API base URL
//! and share it (it is cheap to clone) between the CLI and the pollers.
//!
//! # Example
//!
//! ```no_run
//! use review_client::ReviewClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ReviewClient::new("http://localhost:8000/api");
//!
//!     let questions = client.get_questions(12).await?;
//!     println!("{} question(s) generated", questions.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod candidates;
mod evaluation;
mod questions;
mod reviews;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default base URL of the review API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// HTTP client for the design review API
///
/// Methods are organized into logical groups:
/// - Candidate management
/// - Design review submission and management
/// - Probing questions and answers
/// - Evaluation trigger and results
#[derive(Debug, Clone)]
pub struct ReviewClient {
    /// Base URL of the API (e.g., "http://localhost:8000/api")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ReviewClient {
    /// Create a new review client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the review API (e.g., "http://localhost:8000/api")
    ///
    /// # Example
    /// ```
    /// use review_client::ReviewClient;
    ///
    /// let client = ReviewClient::new("http://localhost:8000/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new review client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use review_client::ReviewClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ReviewClient::with_client("http://localhost:8000/api", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute URL for an API path such as `/candidate/`
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Map a non-success response to a [`ClientError`]
    ///
    /// 404 becomes [`ClientError::NotFound`]; anything else becomes an
    /// `HTTP {status}: {reason}` API error.
    async fn error_for_status(response: Response) -> ClientError {
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        debug!("{} {} returned body: {}", status.as_u16(), url, body);

        if status == reqwest::StatusCode::NOT_FOUND {
            return ClientError::NotFound(url);
        }

        let reason = status.canonical_reason().unwrap_or("Unknown error");
        ClientError::api_error(status.as_u16(), reason)
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is not needed
    async fn handle_empty_response(&self, response: Response) -> Result<()> {
        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        Ok(())
    }
}
