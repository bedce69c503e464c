//! Delimiter token resolution.

use crate::error::{PrepError, Result};

/// Resolve a user-supplied delimiter token to the byte handed to the CSV reader.
///
/// Accepts keywords (`tab`, `tabs`, `\t`, `space`, `\s`, `comma`, `csv`,
/// `pipe`, `bar`, case-insensitive) or any single ASCII character. The token
/// may be wrapped in one pair of single or double quotes.
pub fn resolve_delimiter(token: &str) -> Result<u8> {
    // a lone tab or space is a literal delimiter, not padding
    if let [b] = token.as_bytes() {
        return Ok(*b);
    }
    let trimmed = token.trim();
    let raw = strip_quotes(trimmed);

    let resolved = match raw.to_lowercase().as_str() {
        "\\t" | "tab" | "tabs" => b'\t',
        "space" | "\\s" => b' ',
        "comma" | "csv" => b',',
        "pipe" | "bar" => b'|',
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => c as u8,
                _ => {
                    return Err(PrepError::InvalidDelimiter {
                        value: token.to_string(),
                    });
                }
            }
        }
    };
    Ok(resolved)
}

fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_synonyms() {
        for token in ["tab", "TAB", "\\t", "tabs", "'tab'"] {
            assert_eq!(resolve_delimiter(token).unwrap(), b'\t', "token {token:?}");
        }
    }

    #[test]
    fn test_comma_synonyms() {
        assert_eq!(resolve_delimiter("csv").unwrap(), b',');
        assert_eq!(resolve_delimiter(",").unwrap(), b',');
        assert_eq!(resolve_delimiter("Comma").unwrap(), b',');
    }

    #[test]
    fn test_space_and_pipe() {
        assert_eq!(resolve_delimiter("space").unwrap(), b' ');
        assert_eq!(resolve_delimiter("\\s").unwrap(), b' ');
        assert_eq!(resolve_delimiter("\" \"").unwrap(), b' ');
        assert_eq!(resolve_delimiter("pipe").unwrap(), b'|');
        assert_eq!(resolve_delimiter("BAR").unwrap(), b'|');
    }

    #[test]
    fn test_single_literal_character() {
        assert_eq!(resolve_delimiter(";").unwrap(), b';');
        assert_eq!(resolve_delimiter("'|'").unwrap(), b'|');
    }

    #[test]
    fn test_literal_whitespace_characters() {
        assert_eq!(resolve_delimiter("\t").unwrap(), b'\t');
        assert_eq!(resolve_delimiter(" ").unwrap(), b' ');
    }

    #[test]
    fn test_unrecognized_token_names_value() {
        let err = resolve_delimiter("xy").unwrap_err();
        match err {
            PrepError::InvalidDelimiter { value } => assert_eq!(value, "xy"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_and_non_ascii_rejected() {
        assert!(resolve_delimiter("").is_err());
        assert!(resolve_delimiter("  ").is_err());
        assert!(resolve_delimiter(" \t ").is_err());
        assert!(resolve_delimiter("§").is_err());
    }
}
