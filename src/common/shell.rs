//! Shell utility functions
//!
//! Quoting helpers for values interpolated into the generated launcher
//! scripts.

/// Escape a string for use in a shell command
///
/// Quotes the string only if necessary (i.e., if it contains characters that
/// have special meaning in the shell). Uses single quotes for safety.
pub fn shell_quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }

    if s.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '=' | '/' | '.' | ':' | ','))
    {
        return s.to_string();
    }

    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("app.py"), "app.py");
        assert_eq!(shell_quote("app/app.py"), "app/app.py");
        assert_eq!(shell_quote("foo bar"), "'foo bar'");
        assert_eq!(shell_quote("foo'bar"), "'foo'\\''bar'");
        assert_eq!(shell_quote("--flag=value"), "--flag=value");
    }
}
