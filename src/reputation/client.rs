//! HTTP client for the reputation API.

use reqwest::{Client, StatusCode};

use super::parse::{parse_report, QueryKind};
use super::ReputationReport;
use crate::config::{NOT_AVAILABLE, VIRUSTOTAL_API_BASE, VT_API_KEY_ENV};
use crate::error_handling::ReputationError;

/// VirusTotal client holding the API key for the whole run.
#[derive(Debug, Clone)]
pub struct ReputationClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl ReputationClient {
    /// Creates a client against the public API.
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: VIRUSTOTAL_API_BASE.to_string(),
        }
    }

    /// Creates a client using the key from the `VT_API_KEY` environment variable.
    pub fn from_env(client: Client) -> Self {
        Self::new(client, std::env::var(VT_API_KEY_ENV).ok())
    }

    /// Points the client at another API root (no trailing slash).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches and interprets the report for an address or domain.
    ///
    /// # Errors
    ///
    /// - `ReputationError::MissingApiKey` if no key is configured
    /// - `ReputationError::HttpStatus` for any non-2xx answer
    /// - `ReputationError::Request` if the request fails
    /// - `ReputationError::Decode` if the body is not valid JSON
    pub async fn fetch_report(&self, key: &str) -> Result<ReputationReport, ReputationError> {
        if key == NOT_AVAILABLE {
            return Ok(ReputationReport::unavailable());
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ReputationError::MissingApiKey(VT_API_KEY_ENV))?;

        let kind = QueryKind::of(key);
        let url = format!("{}/{}/{}", self.base_url, kind.collection(), key);
        log::debug!("Querying reputation API for {key}");

        let response = self
            .client
            .get(&url)
            .header("x-apikey", api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            report_status(status, key);
            return Err(ReputationError::HttpStatus(status));
        }

        let body = response.text().await?;
        Ok(parse_report(&body, kind)?)
    }
}

fn report_status(status: StatusCode, key: &str) {
    match status {
        StatusCode::UNAUTHORIZED => log::error!("Authentication failed. Check your API key."),
        StatusCode::FORBIDDEN => log::error!("Access denied. Check your API key permissions."),
        StatusCode::NOT_FOUND => log::warn!("No reputation data found for {key}"),
        StatusCode::TOO_MANY_REQUESTS => log::error!("API request quota exceeded."),
        _ => log::warn!("Error getting data from VirusTotal: {status}"),
    }
}
