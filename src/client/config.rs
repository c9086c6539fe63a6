use std::time::Duration;

use url::Url;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use super::ValidatorError;
use crate::syntax::SyntaxMode;

pub const DEFAULT_ENDPOINT: &str = "http://apilayer.net/api/check";
pub const SECURE_ENDPOINT: &str = "https://apilayer.net/api/check";

/// Transport and pre-check settings for a [`Validator`](super::Validator).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub endpoint: Url,
    pub timeout_ms: u64,
    pub user_agent: String,
    pub syntax_mode: SyntaxMode,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(DEFAULT_ENDPOINT),
            timeout_ms: 10_000,
            user_agent: concat!("mailboxlayer/", env!("CARGO_PKG_VERSION")).to_string(),
            syntax_mode: SyntaxMode::Ascii,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// HTTPS endpoint (paid plans only).
    pub fn secure() -> Self {
        Self {
            endpoint: default_endpoint(SECURE_ENDPOINT),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Like [`with_endpoint`](Self::with_endpoint) for a URL given as text.
    pub fn with_endpoint_str(self, endpoint: &str) -> Result<Self, ValidatorError> {
        let endpoint = Url::parse(endpoint).map_err(ValidatorError::invalid_endpoint)?;
        Ok(self.with_endpoint(endpoint))
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_syntax_mode(mut self, mode: SyntaxMode) -> Self {
        self.syntax_mode = mode;
        self
    }

    /// Request timeout. A zero timeout leaves the HTTP client without one.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }
}

fn default_endpoint(raw: &str) -> Url {
    Url::parse(raw).expect("built-in endpoint is a valid URL")
}
