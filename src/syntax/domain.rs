use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

use super::SyntaxMode;

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("hostname label pattern is valid")
});

/// Checks the part after the last `@`: an address literal or a hostname.
/// Pushes the invalidating reasons into `reasons`.
pub(crate) fn check_domain(domain: &str, mode: SyntaxMode, reasons: &mut Vec<String>) {
    if domain.is_empty() {
        reasons.push("domain is empty".to_string());
        return;
    }

    if let Some(literal) = domain.strip_prefix('[') {
        check_address_literal(literal, reasons);
        return;
    }

    let ascii = match mode {
        SyntaxMode::Ascii => {
            if !domain.is_ascii() {
                reasons.push("domain has non-ASCII characters".to_string());
                return;
            }
            domain.to_string()
        }
        SyntaxMode::Unicode => match idna::domain_to_ascii(domain) {
            Ok(d) => d,
            Err(_) => {
                reasons.push("domain punycode conversion failed".to_string());
                return;
            }
        },
    };

    check_hostname(&ascii, reasons);
}

fn check_hostname(host: &str, reasons: &mut Vec<String>) {
    if host.len() > 253 {
        reasons.push(format!("domain length {} > 253", host.len()));
    }

    if !host.contains('.') {
        reasons.push("domain must contain at least one dot".to_string());
    }

    for label in host.split('.') {
        if label.is_empty() {
            reasons.push("empty domain label".to_string());
        } else if label.len() > 63 {
            reasons.push(format!(
                "domain label '{}' length {} > 63",
                label,
                label.len()
            ));
        } else if !LABEL.is_match(label) {
            reasons.push(format!("domain label '{}' is not a valid hostname label", label));
        }
    }
}

fn check_address_literal(literal: &str, reasons: &mut Vec<String>) {
    let Some(inner) = literal.strip_suffix(']') else {
        reasons.push("address literal is missing its closing ']'".to_string());
        return;
    };

    let parsed = match inner.strip_prefix("IPv6:") {
        Some(v6) => v6.parse::<Ipv6Addr>().is_ok(),
        None => inner.parse::<Ipv4Addr>().is_ok(),
    };
    if !parsed {
        reasons.push(format!("address literal '[{}]' is not an IP address", inner));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reasons_for(domain: &str, mode: SyntaxMode) -> Vec<String> {
        let mut reasons = vec![];
        check_domain(domain, mode, &mut reasons);
        reasons
    }

    #[test]
    fn basic_domain_ok() {
        let reasons = reasons_for("example.com", SyntaxMode::Ascii);
        assert!(reasons.is_empty(), "{:?}", reasons);
    }

    #[test]
    fn single_label_rejected() {
        assert!(!reasons_for("localhost", SyntaxMode::Ascii).is_empty());
    }

    #[test]
    fn label_too_long() {
        let long = "a".repeat(64);
        assert!(!reasons_for(&format!("{}.com", long), SyntaxMode::Ascii).is_empty());
    }

    #[test]
    fn hyphen_edges_rejected() {
        assert!(!reasons_for("-example.com", SyntaxMode::Ascii).is_empty());
        assert!(!reasons_for("example-.com", SyntaxMode::Ascii).is_empty());
        assert!(reasons_for("ex-ample.com", SyntaxMode::Ascii).is_empty());
    }

    #[test]
    fn address_literals() {
        assert!(reasons_for("[192.0.2.1]", SyntaxMode::Ascii).is_empty());
        assert!(reasons_for("[IPv6:2001:db8::1]", SyntaxMode::Ascii).is_empty());
        assert!(!reasons_for("[999.0.2.1]", SyntaxMode::Ascii).is_empty());
        assert!(!reasons_for("[192.0.2.1", SyntaxMode::Ascii).is_empty());
    }

    #[test]
    fn idn_needs_unicode_mode() {
        assert!(!reasons_for("exämple.com", SyntaxMode::Ascii).is_empty());
        let reasons = reasons_for("exämple.com", SyntaxMode::Unicode);
        assert!(reasons.is_empty(), "{:?}", reasons);
    }
}
