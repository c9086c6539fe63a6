use super::SyntaxMode;

/// Dot-atom: atext runs separated by single dots, no dot at either end.
pub(crate) fn is_dot_atom(s: &str, mode: SyntaxMode) -> bool {
    if s.is_empty() || s.starts_with('.') || s.ends_with('.') || s.contains("..") {
        return false;
    }
    s.chars().all(|c| c == '.' || is_atext(c, mode))
}

fn is_atext(c: char, mode: SyntaxMode) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric()
            || matches!(
                c,
                '!' | '#'
                    | '$'
                    | '%'
                    | '&'
                    | '\''
                    | '*'
                    | '+'
                    | '-'
                    | '/'
                    | '='
                    | '?'
                    | '^'
                    | '_'
                    | '`'
                    | '{'
                    | '|'
                    | '}'
                    | '~'
            );
    }
    mode == SyntaxMode::Unicode && !c.is_control() && !c.is_whitespace()
}

/// Quoted string: printable ASCII between double quotes, where `"` and `\`
/// only appear escaped by a backslash.
pub(crate) fn is_quoted_string(s: &str) -> bool {
    let Some(inner) = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };

    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) if escaped == ' ' || escaped.is_ascii_graphic() => {}
                _ => return false,
            },
            '"' => return false,
            ' ' => {}
            c if c.is_ascii_graphic() => {}
            _ => return false,
        }
    }
    true
}

pub(crate) fn is_local_part(s: &str, mode: SyntaxMode) -> bool {
    if s.starts_with('"') {
        is_quoted_string(s)
    } else {
        is_dot_atom(s, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_rules() {
        assert!(!is_dot_atom(".abc", SyntaxMode::Ascii));
        assert!(!is_dot_atom("abc.", SyntaxMode::Ascii));
        assert!(!is_dot_atom("a..b", SyntaxMode::Ascii));
        assert!(is_dot_atom("a.b", SyntaxMode::Ascii));
        assert!(is_dot_atom("first+tag", SyntaxMode::Ascii));
    }

    #[test]
    fn unicode_atext_needs_unicode_mode() {
        assert!(!is_dot_atom("josé", SyntaxMode::Ascii));
        assert!(is_dot_atom("josé", SyntaxMode::Unicode));
        assert!(!is_dot_atom("jo sé", SyntaxMode::Unicode));
    }

    #[test]
    fn quoted_strings() {
        assert!(is_quoted_string("\"a b\""));
        assert!(is_quoted_string("\"a@b\""));
        assert!(is_quoted_string("\"a\\\"b\""));
        assert!(!is_quoted_string("\"a\"b\""));
        assert!(!is_quoted_string("\"unterminated"));
        assert!(!is_quoted_string("\""));
        assert!(!is_quoted_string("\"tab\there\""));
    }
}
