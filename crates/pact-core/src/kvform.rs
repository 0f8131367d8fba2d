//! Line-oriented `key:value` wire codec.
//!
//! Format: one `key:value` pair per line, newline-terminated, order
//! significant. The strict mode refuses any value that cannot round-trip;
//! the non-strict mode encodes it anyway and logs a warning.

use crate::{Error, Result};

/// Reports a lossy input: an error in strict mode, a warning otherwise.
fn lossy(strict: bool, detail: String) -> Result<()> {
    if strict {
        Err(Error::Encoding(detail))
    } else {
        tracing::warn!(%detail, "encoding key-value form lossily");
        Ok(())
    }
}

/// Encode an ordered pair sequence as newline-terminated `key:value` lines.
///
/// A newline inside a key never round-trips and is rejected in both modes.
/// A colon or surrounding whitespace in a key, or a newline or surrounding
/// whitespace in a value, is rejected in strict mode only.
pub fn encode(pairs: &[(String, String)], strict: bool) -> Result<Vec<u8>> {
    let mut out = String::new();

    for (key, value) in pairs {
        if key.contains('\n') {
            return Err(Error::Encoding(format!("key {key:?} contains a newline")));
        }
        if key.contains(':') {
            lossy(strict, format!("key {key:?} contains a colon"))?;
        }
        if key.trim() != key {
            lossy(strict, format!("key {key:?} has surrounding whitespace"))?;
        }
        if value.contains('\n') {
            lossy(strict, format!("value for key {key:?} contains a newline"))?;
        }
        if value.trim() != value {
            lossy(
                strict,
                format!("value for key {key:?} has surrounding whitespace"),
            )?;
        }

        out.push_str(key);
        out.push(':');
        out.push_str(value);
        out.push('\n');
    }

    Ok(out.into_bytes())
}

/// Decode `key:value` lines back into an ordered pair sequence.
///
/// A line without a colon is a format error. Missing trailing newlines and
/// whitespace around keys or values are tolerated with a warning.
pub fn decode(bytes: &[u8]) -> Result<Vec<(String, String)>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::Format(format!("input is not valid utf-8: {e}")))?;

    let mut lines: Vec<&str> = text.split('\n').collect();
    // A well-formed document ends in a newline, leaving one empty segment.
    match lines.last() {
        Some(&"") => {
            lines.pop();
        }
        Some(last) => {
            tracing::warn!(line = *last, "key-value form does not end in a newline");
        }
        None => {}
    }

    let mut pairs = Vec::with_capacity(lines.len());
    for (num, line) in lines.iter().enumerate() {
        let (key, value) = line.split_once(':').ok_or_else(|| {
            Error::Format(format!("line {} does not contain a colon: {line:?}", num + 1))
        })?;

        let trimmed_key = key.trim();
        let trimmed_value = value.trim();
        if trimmed_key != key {
            tracing::warn!(key, "key has surrounding whitespace");
        }
        if trimmed_value != value {
            tracing::warn!(value, "value has surrounding whitespace");
        }

        pairs.push((trimmed_key.to_string(), trimmed_value.to_string()));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_preserves_order() {
        let encoded = encode(&pairs(&[("b", "2"), ("a", "1")]), true).unwrap();
        assert_eq!(encoded, b"b:2\na:1\n");
    }

    #[test]
    fn test_roundtrip() {
        let input = pairs(&[("handle", "h1"), ("mode", "associate"), ("empty", "")]);
        let decoded = decode(&encode(&input, true).unwrap()).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_newline_in_key_always_rejected() {
        let input = pairs(&[("bad\nkey", "v")]);
        assert!(matches!(encode(&input, true), Err(Error::Encoding(_))));
        assert!(matches!(encode(&input, false), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_strict_rejects_newline_in_value() {
        let input = pairs(&[("key", "line1\nline2")]);
        assert!(matches!(encode(&input, true), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_non_strict_encodes_newline_in_value() {
        let input = pairs(&[("key", "line1\nline2")]);
        let encoded = encode(&input, false).unwrap();
        assert_eq!(encoded, b"key:line1\nline2\n");
    }

    #[test]
    fn test_strict_rejects_colon_in_key() {
        let input = pairs(&[("a:b", "v")]);
        assert!(matches!(encode(&input, true), Err(Error::Encoding(_))));
        assert!(encode(&input, false).is_ok());
    }

    #[test]
    fn test_colon_in_value_roundtrips() {
        let input = pairs(&[("url", "https://example.com/")]);
        let decoded = decode(&encode(&input, true).unwrap()).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_decode_rejects_colonless_line() {
        assert!(matches!(decode(b"no colon here\n"), Err(Error::Format(_))));
    }

    #[test]
    fn test_decode_tolerates_missing_trailing_newline() {
        let decoded = decode(b"a:1\nb:2").unwrap();
        assert_eq!(decoded, pairs(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let decoded = decode(b" a : 1 \n").unwrap();
        assert_eq!(decoded, pairs(&[("a", "1")]));
    }

    #[test]
    fn test_empty_input() {
        assert!(decode(b"").unwrap().is_empty());
        assert_eq!(encode(&[], true).unwrap(), b"");
    }
}
