//! HTTP client initialization.

use crate::config::HTTP_USER_AGENT;
use crate::error_handling::InitializationError;
use reqwest::ClientBuilder;

/// Initializes the HTTP client used for reputation lookups.
///
/// No request timeout is configured: a lookup blocks until the transport
/// gives up on its own.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client() -> Result<reqwest::Client, InitializationError> {
    Ok(ClientBuilder::new().user_agent(HTTP_USER_AGENT).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_builds() {
        assert!(init_client().is_ok());
    }
}
