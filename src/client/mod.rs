//! mailboxlayer check endpoint client.
//!
//! [`Validator`] pre-checks the address locally, then issues one GET per
//! distinct address and memoizes the decoded [`ValidationResult`] for its
//! own lifetime. Failures are never cached and never retried.

mod config;
mod error;
mod options;
mod response;
mod result;
mod transport;

pub use config::{DEFAULT_ENDPOINT, SECURE_ENDPOINT, ValidatorConfig};
pub use error::{TransportError, ValidatorError};
pub use options::{ApiOptions, OptionKey, OptionValue};
pub use result::ValidationResult;
pub use transport::{HttpGet, HttpTransport};

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use crate::syntax::check_syntax;
use response::parse_response;

pub struct Validator<T = HttpTransport> {
    api_key: String,
    options: ApiOptions,
    config: ValidatorConfig,
    transport: T,
    cache: Mutex<HashMap<String, Arc<ValidationResult>>>,
}

impl Validator<HttpTransport> {
    /// Client with the default flags: SMTP check on, compact JSON, no
    /// catch-all check.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ValidatorError> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> ValidatorBuilder {
        ValidatorBuilder::new(api_key)
    }
}

impl<T: HttpGet> Validator<T> {
    /// Client with the default flags over a caller supplied transport.
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        ValidatorBuilder::new(api_key).build_with_transport(transport)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn options(&self) -> &ApiOptions {
        &self.options
    }

    /// Sets a request option. Only `access_key`, `format`, `smtp` and
    /// `catch_all` are recognised; any other key is ignored. Returns whether
    /// the key was recognised.
    pub fn set_option(&mut self, key: &str, value: impl Into<OptionValue>) -> bool {
        match key.parse::<OptionKey>() {
            Ok(key) => {
                self.options.set(key, value.into());
                true
            }
            Err(()) => false,
        }
    }

    /// Validates `address` after the local syntax pre-check.
    pub fn validate(&self, address: &str) -> Result<Arc<ValidationResult>, ValidatorError> {
        self.validate_with(address, false)
    }

    /// Same as [`validate`](Self::validate); `bypass_local_check` skips the
    /// local pre-check but never the request.
    pub fn validate_with(
        &self,
        address: &str,
        bypass_local_check: bool,
    ) -> Result<Arc<ValidationResult>, ValidatorError> {
        if !bypass_local_check {
            let report = check_syntax(address, self.config.syntax_mode);
            if !report.ok {
                return Err(ValidatorError::invalid_input(address, report.reasons));
            }
        }

        if let Some(hit) = self.cached(address) {
            #[cfg(feature = "with-tracing")]
            tracing::debug!(email = address, "cache hit");
            return Ok(hit);
        }

        let url = self.request_url(address);
        #[cfg(feature = "with-tracing")]
        tracing::debug!(
            email = address,
            endpoint = %self.config.endpoint,
            "requesting address check"
        );

        let body = self
            .transport
            .get(&url)
            .map_err(ValidatorError::transport)?;

        let result = match parse_response(&body) {
            Ok(result) => Arc::new(result),
            Err(err) => {
                #[cfg(feature = "with-tracing")]
                tracing::debug!(email = address, error = %err, "address check failed");
                return Err(err);
            }
        };

        self.cache
            .lock()
            .insert(address.to_string(), Arc::clone(&result));
        Ok(result)
    }

    /// Previously validated result for `address`, if any (exact match).
    pub fn cached(&self, address: &str) -> Option<Arc<ValidationResult>> {
        self.cache.lock().get(address).cloned()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// The check URL for `address`: the current options followed by `email`.
    pub fn request_url(&self, address: &str) -> Url {
        let mut url = self.config.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in self.options.iter() {
                query.append_pair(key.as_str(), &value.to_string());
            }
            query.append_pair("email", address);
        }
        url
    }
}

/// Builder for [`Validator`], mirroring the provider's request flags.
#[derive(Debug, Clone)]
pub struct ValidatorBuilder {
    api_key: String,
    smtp_check: bool,
    pretty_format: bool,
    catch_all_check: bool,
    config: ValidatorConfig,
}

impl ValidatorBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            smtp_check: true,
            pretty_format: false,
            catch_all_check: false,
            config: ValidatorConfig::default(),
        }
    }

    pub fn smtp_check(mut self, value: bool) -> Self {
        self.smtp_check = value;
        self
    }

    pub fn pretty_format(mut self, value: bool) -> Self {
        self.pretty_format = value;
        self
    }

    pub fn catch_all_check(mut self, value: bool) -> Self {
        self.catch_all_check = value;
        self
    }

    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds a validator over a `reqwest` transport configured from the
    /// builder's [`ValidatorConfig`].
    pub fn build(self) -> Result<Validator<HttpTransport>, ValidatorError> {
        let transport = HttpTransport::new(&self.config).map_err(ValidatorError::transport)?;
        Ok(self.build_with_transport(transport))
    }

    pub fn build_with_transport<T: HttpGet>(self, transport: T) -> Validator<T> {
        let options = ApiOptions::new(
            &self.api_key,
            self.smtp_check,
            self.pretty_format,
            self.catch_all_check,
        );
        Validator {
            api_key: self.api_key,
            options,
            config: self.config,
            transport,
            cache: Mutex::new(HashMap::new()),
        }
    }
}
