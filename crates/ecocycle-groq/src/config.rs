//! Groq client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Base URL of the Groq OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Value shipped in sample `.env` files; never a usable credential.
pub const PLACEHOLDER_API_KEY: &str = "your_groq_api_key_here";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Groq client.
///
/// Request deadlines are not part of the client configuration: every
/// [`VisionRequest`](ecocycle_core::VisionRequest) carries its own.
#[derive(Clone, Builder, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[builder(
    name = "GroqConfigBuilder",
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct GroqConfig {
    /// Groq API key sent as a bearer token.
    #[cfg_attr(
        feature = "config",
        arg(long = "groq-api-key", env = "GROQ_API_KEY", hide_env_values = true)
    )]
    #[serde(skip_serializing, default)]
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API.
    #[cfg_attr(
        feature = "config",
        arg(long = "groq-base-url", env = "GROQ_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[builder(setter(custom), default = "DEFAULT_BASE_URL.to_owned()")]
    pub base_url: String,

    /// TCP connect timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "groq-connect-timeout", env = "GROQ_CONNECT_TIMEOUT", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)
    )]
    #[builder(default = "DEFAULT_CONNECT_TIMEOUT_SECS")]
    pub connect_timeout_secs: u64,
}

impl fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl GroqConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GroqConfigBuilder {
        GroqConfigBuilder::default()
    }

    /// Returns the connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the chat completions endpoint derived from the base URL.
    pub fn endpoint(&self) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}/chat/completions"))
            .map_err(|e| Error::InvalidConfig(format!("Invalid base URL '{}': {e}", self.base_url)))
    }

    /// Checks the configuration, including values that bypassed the builder.
    pub fn validate(&self) -> Result<()> {
        check_api_key(&self.api_key).map_err(Error::InvalidConfig)?;
        check_connect_timeout(self.connect_timeout_secs).map_err(Error::InvalidConfig)?;

        let endpoint = self.endpoint()?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "Base URL must use http or https, got '{}'",
                endpoint.scheme()
            )));
        }

        Ok(())
    }
}

impl GroqConfigBuilder {
    /// Sets the base URL of the API.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        Url::parse(url)
            .map_err(|e| Error::InvalidConfig(format!("Invalid base URL '{url}': {e}")))?;
        self.base_url = Some(url.to_owned());
        Ok(self)
    }

    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(api_key) = &self.api_key {
            check_api_key(api_key)?;
        }

        if let Some(connect_timeout) = self.connect_timeout_secs {
            check_connect_timeout(connect_timeout)?;
        }

        Ok(())
    }
}

fn check_api_key(api_key: &str) -> std::result::Result<(), String> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err("GROQ_API_KEY is not set".to_owned());
    }
    if api_key == PLACEHOLDER_API_KEY {
        return Err("GROQ_API_KEY still holds the placeholder value".to_owned());
    }
    Ok(())
}

fn check_connect_timeout(secs: u64) -> std::result::Result<(), String> {
    if secs == 0 {
        return Err("Connect timeout must be greater than 0".to_owned());
    }
    Ok(())
}
