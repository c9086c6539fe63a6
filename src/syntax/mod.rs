//! Local, best-effort address syntax check.
//!
//! This runs before any API call so that obviously malformed input is
//! rejected without spending a request. It is not a substitute for the
//! provider's own `format_valid` verdict.

mod domain;
mod local;
mod types;

pub use types::{SyntaxMode, SyntaxReport};

use domain::check_domain;
use local::is_local_part;

const MAX_ADDRESS_LEN: usize = 320;
const MAX_LOCAL_LEN: usize = 64;

/// Runs the local grammar check on `address` as given (no trimming).
pub fn check_syntax(address: &str, mode: SyntaxMode) -> SyntaxReport {
    let mut reasons = Vec::new();

    if address.len() > MAX_ADDRESS_LEN {
        reasons.push(format!(
            "total length {} > {}",
            address.len(),
            MAX_ADDRESS_LEN
        ));
    }

    // quoted local parts may contain '@', the domain never does
    let Some((local, domain)) = address.rsplit_once('@') else {
        reasons.push("missing '@'".to_string());
        return SyntaxReport::from_reasons(reasons);
    };

    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        reasons.push(format!(
            "local part length {} invalid (1..={})",
            local.len(),
            MAX_LOCAL_LEN
        ));
    } else if !is_local_part(local, mode) {
        reasons.push("invalid local part".to_string());
    }

    check_domain(domain, mode, &mut reasons);

    SyntaxReport::from_reasons(reasons)
}

pub fn is_valid_address(address: &str, mode: SyntaxMode) -> bool {
    check_syntax(address, mode).ok
}
