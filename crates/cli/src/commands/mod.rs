//! CLI commands.

pub mod orders;
pub mod session;

use std::time::Duration;

use thiserror::Error;
use url::Url;

use sellerdesk_core::Email;
use sellerdesk_panel::config::UpstreamConfig;
use sellerdesk_panel::marketplace::{MarketplaceClient, MarketplaceError, SellerSession};

/// Default upstream timeout for CLI calls.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that can occur in CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Environment variable holds an invalid value.
    #[error("Invalid {0}: {1}")]
    InvalidEnvVar(&'static str, String),

    /// Invalid command argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Upstream API error.
    #[error("Marketplace error: {0}")]
    Marketplace(#[from] MarketplaceError),
}

/// Build the upstream client from `SELLERDESK_UPSTREAM_URL`.
pub fn client_from_env() -> Result<MarketplaceClient, CliError> {
    let raw = std::env::var("SELLERDESK_UPSTREAM_URL")
        .map_err(|_| CliError::MissingEnvVar("SELLERDESK_UPSTREAM_URL"))?;
    let base_url = Url::parse(&raw)
        .map_err(|e| CliError::InvalidEnvVar("SELLERDESK_UPSTREAM_URL", e.to_string()))?;
    Ok(MarketplaceClient::new(&UpstreamConfig::new(
        base_url,
        UPSTREAM_TIMEOUT,
    ))?)
}

/// Resolve the password from the flag or `SELLERDESK_PASSWORD`.
pub fn resolve_password(flag: Option<&str>) -> Result<String, CliError> {
    if let Some(password) = flag {
        return Ok(password.to_string());
    }
    std::env::var("SELLERDESK_PASSWORD").map_err(|_| CliError::MissingEnvVar("SELLERDESK_PASSWORD"))
}

/// Log in and return the client plus the merged seller session.
pub async fn authenticate(
    email: &str,
    password: Option<&str>,
) -> Result<(MarketplaceClient, SellerSession), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let password = resolve_password(password)?;

    let client = client_from_env()?;
    let session = client.login(&email, &password).await?;
    Ok((client, session))
}
