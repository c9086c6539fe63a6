#![forbid(unsafe_code)]
//! mailboxlayer: client for the mailboxlayer email check API, with a local
//! syntax pre-check and a per-client result cache.
//!
//! ```no_run
//! use mailboxlayer::Validator;
//!
//! # fn main() -> Result<(), mailboxlayer::ValidatorError> {
//! let validator = Validator::builder("YOUR_ACCESS_KEY")
//!     .catch_all_check(true)
//!     .build()?;
//! let result = validator.validate("paul@company.com")?;
//! if result.is_valid() {
//!     println!("{} looks deliverable ({:.2})", result.email(), result.quality_score());
//! } else if let Some(suggestion) = result.suggestion() {
//!     println!("did you mean {suggestion}?");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod syntax;

pub use client::{
    ApiOptions, DEFAULT_ENDPOINT, HttpGet, HttpTransport, OptionKey, OptionValue,
    SECURE_ENDPOINT, TransportError, ValidationResult, Validator, ValidatorBuilder,
    ValidatorConfig, ValidatorError,
};
pub use syntax::{SyntaxMode, SyntaxReport, check_syntax, is_valid_address};
