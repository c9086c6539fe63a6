use thiserror::Error;

/// Failure raised by an [`HttpGet`](super::HttpGet) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(source: reqwest::Error) -> Self {
        Self::Request { source }
    }
}

/// Errors returned by [`Validator::validate`](super::Validator::validate).
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("not an email address: {}", .reasons.join("; "))]
    InvalidInput {
        address: String,
        reasons: Vec<String>,
    },
    #[error("{info} ({error_type})")]
    Api {
        code: i64,
        error_type: String,
        info: String,
    },
    #[error("transport error: {source}")]
    Transport {
        #[source]
        source: TransportError,
    },
    #[error("response body is not valid JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
    #[error("expected a JSON object in the response, found {found}")]
    UnexpectedResponse { found: &'static str },
    #[error("invalid API endpoint: {source}")]
    InvalidEndpoint {
        #[source]
        source: url::ParseError,
    },
}

impl ValidatorError {
    pub(crate) fn invalid_input(address: &str, reasons: Vec<String>) -> Self {
        Self::InvalidInput {
            address: address.to_string(),
            reasons,
        }
    }

    pub(crate) fn api(code: i64, error_type: impl Into<String>, info: impl Into<String>) -> Self {
        Self::Api {
            code,
            error_type: error_type.into(),
            info: info.into(),
        }
    }

    pub(crate) fn transport(source: impl Into<TransportError>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    pub(crate) fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    pub(crate) fn invalid_endpoint(source: url::ParseError) -> Self {
        Self::InvalidEndpoint { source }
    }

    /// Provider error code, for [`ValidatorError::Api`] only.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Provider message as `"<info> (<type>)"`, for [`ValidatorError::Api`] only.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Api { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}
