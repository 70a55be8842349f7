//! Line sanitization ahead of classification.

use std::fmt;
use std::ops::Deref;

const ESCAPED_QUOTE: &str = "\\\"";

/// A trimmed line with escaped quotes collapsed.
///
/// Only [`sanitize`] constructs this, so the classifier can rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedLine(String);

impl SanitizedLine {
    /// Borrow the sanitized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for SanitizedLine {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim a raw line and normalize `\"` to `"`.
///
/// The substitution runs twice so quotes escaped two levels deep come out
/// as plain quotes.
pub fn sanitize(raw: &str) -> SanitizedLine {
    let once = raw.trim().replace(ESCAPED_QUOTE, "\"");
    SanitizedLine(once.replace(ESCAPED_QUOTE, "\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(sanitize("").as_str(), "");
        assert_eq!(sanitize("   \t ").as_str(), "");
    }

    #[test]
    fn test_trims() {
        assert_eq!(sanitize("  hello world \r").as_str(), "hello world");
    }

    #[test]
    fn test_unescapes_quotes() {
        assert_eq!(
            sanitize(r#"message: \"hi\""#).as_str(),
            r#"message: "hi""#
        );
    }

    #[test]
    fn test_double_escaped_quotes() {
        assert_eq!(sanitize(r#"a \\"b\\" c"#).as_str(), r#"a "b" c"#);
    }

    #[test]
    fn test_plain_backslash_kept() {
        assert_eq!(sanitize(r"C:\path\to").as_str(), r"C:\path\to");
    }

    #[test]
    fn test_deref() {
        let line = sanitize(" TEST-PASS ");
        assert!(line.contains("PASS"));
        assert_eq!(line.to_string(), "TEST-PASS");
    }
}
