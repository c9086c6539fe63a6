use serde_json::{Map, Value};

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Verdict returned by the check endpoint for one address.
///
/// Built once from the decoded response and read-only afterwards.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    email: String,
    user: String,
    domain: Option<String>,
    did_you_mean: Option<String>,
    format_valid: bool,
    mx_found: Option<bool>,
    smtp_check: bool,
    catch_all: Option<bool>,
    role: bool,
    disposable: bool,
    free: bool,
    score: f64,
}

impl ValidationResult {
    /// Maps the response fields one by one. Missing keys, `null` and values
    /// of the wrong JSON type all leave the field at its zero value.
    pub fn from_response(fields: &Map<String, Value>) -> Self {
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
        let flag = |key: &str| fields.get(key).and_then(Value::as_bool);

        Self {
            email: text("email").unwrap_or_default(),
            user: text("user").unwrap_or_default(),
            domain: text("domain"),
            did_you_mean: text("did_you_mean").filter(|s| !s.is_empty()),
            format_valid: flag("format_valid").unwrap_or(false),
            mx_found: flag("mx_found"),
            smtp_check: flag("smtp_check").unwrap_or(false),
            catch_all: flag("catch_all"),
            role: flag("role").unwrap_or(false),
            disposable: flag("disposable").unwrap_or(false),
            free: flag("free").unwrap_or(false),
            score: fields.get("score").and_then(Value::as_f64).unwrap_or(0.0),
        }
    }

    /// The exact address that was requested.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Local part, e.g. `paul` in `paul@company.com`.
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Did-you-mean suggestion when the provider detected a likely typo.
    pub fn suggestion(&self) -> Option<&str> {
        self.did_you_mean.as_deref()
    }

    /// Quality score between 0 (bad) and 1 (good).
    pub fn quality_score(&self) -> f64 {
        self.score
    }

    pub fn is_format_valid(&self) -> bool {
        self.format_valid
    }

    /// `false` when the provider did not report MX records at all.
    pub fn is_mx_found(&self) -> bool {
        self.mx_found.unwrap_or(false)
    }

    pub fn is_smtp_valid(&self) -> bool {
        self.smtp_check
    }

    /// `None` when the catch-all check was not requested or was inconclusive.
    pub fn is_catch_all(&self) -> Option<bool> {
        self.catch_all
    }

    /// Role address such as `support@` or `postmaster@`.
    pub fn is_role(&self) -> bool {
        self.role
    }

    /// Address on a disposable mail provider.
    pub fn is_disposable(&self) -> bool {
        self.disposable
    }

    /// Address on a free mail provider.
    pub fn is_free(&self) -> bool {
        self.free
    }

    /// Format, MX and SMTP checks all passed. Catch-all and score are
    /// informational only.
    pub fn is_valid(&self) -> bool {
        self.is_mx_found() && self.is_format_valid() && self.is_smtp_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_from(value: Value) -> ValidationResult {
        match value {
            Value::Object(map) => ValidationResult::from_response(&map),
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn valid_when_all_three_checks_pass() {
        let r = result_from(json!({
            "email": "a@b.com",
            "format_valid": true,
            "mx_found": true,
            "smtp_check": true,
            "score": 0.9
        }));
        assert!(r.is_valid());
        assert_eq!(r.quality_score(), 0.9);
        assert_eq!(r.email(), "a@b.com");
    }

    #[test]
    fn invalid_when_checks_fail() {
        let r = result_from(json!({
            "format_valid": false,
            "mx_found": false,
            "smtp_check": false
        }));
        assert!(!r.is_valid());
    }

    #[test]
    fn missing_mx_found_means_not_found() {
        let r = result_from(json!({
            "format_valid": true,
            "mx_found": null,
            "smtp_check": true
        }));
        assert!(!r.is_mx_found());
        assert!(!r.is_valid());
    }

    #[test]
    fn empty_suggestion_is_absent() {
        let r = result_from(json!({ "did_you_mean": "" }));
        assert_eq!(r.suggestion(), None);

        let r = result_from(json!({ "did_you_mean": "user@company.com" }));
        assert_eq!(r.suggestion(), Some("user@company.com"));
    }

    #[test]
    fn catch_all_is_tri_state() {
        assert_eq!(result_from(json!({})).is_catch_all(), None);
        assert_eq!(
            result_from(json!({ "catch_all": false })).is_catch_all(),
            Some(false)
        );
        assert_eq!(
            result_from(json!({ "catch_all": true })).is_catch_all(),
            Some(true)
        );
    }

    #[test]
    fn unknown_and_mistyped_keys_fall_back_to_zero_values() {
        let r = result_from(json!({
            "user": 42,
            "free": "yes",
            "score": "high",
            "unexpected": [1, 2, 3]
        }));
        assert_eq!(r, ValidationResult::default());
    }

    #[test]
    fn classification_flags_and_parts() {
        let r = result_from(json!({
            "email": "support@mailinator.com",
            "user": "support",
            "domain": "mailinator.com",
            "role": true,
            "disposable": true,
            "free": false
        }));
        assert_eq!(r.user(), "support");
        assert_eq!(r.domain(), Some("mailinator.com"));
        assert!(r.is_role());
        assert!(r.is_disposable());
        assert!(!r.is_free());
    }
}
