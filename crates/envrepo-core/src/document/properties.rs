//! Java properties parsing

use crate::types::RowBatch;

use super::error::ParseError;

/// Parse Java properties text into ordered key/value pairs.
///
/// Supports `#`/`!` comment lines, `=`, `:` or whitespace separators, line
/// continuations with a trailing backslash, and the `\t \n \r \f \uXXXX`
/// escapes. A key repeated later in the text replaces the earlier value but
/// keeps the earlier position.
pub fn parse_properties(text: &str) -> Result<RowBatch, ParseError> {
    let mut result = RowBatch::new();
    for (line_no, line) in logical_lines(text) {
        let (key, value) = split_entry(&line, line_no)?;
        result.insert(key, value);
    }
    Ok(result)
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Join continued lines, dropping comments and blank lines. Each entry keeps
/// the number of the line it started on.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in normalized.split(|c: char| c == '\n' || c == '\r').enumerate() {
        let trimmed = raw.trim_start_matches(is_blank);
        let (start, mut acc) = match pending.take() {
            Some(open) => open,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        if continues(trimmed) {
            acc.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some((start, acc));
        } else {
            acc.push_str(trimmed);
            lines.push((start, acc));
        }
    }

    if let Some(open) = pending {
        lines.push(open);
    }
    lines
}

fn split_entry(line: &str, line_no: usize) -> Result<(String, String), ParseError> {
    let chars: Vec<char> = line.chars().collect();

    let mut key_end = chars.len();
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let mut value_start = key_end;
    while value_start < chars.len() && is_blank(chars[value_start]) {
        value_start += 1;
    }
    if value_start < chars.len() && (chars[value_start] == '=' || chars[value_start] == ':') {
        value_start += 1;
    }
    while value_start < chars.len() && is_blank(chars[value_start]) {
        value_start += 1;
    }

    let key = unescape(&chars[..key_end], line_no)?;
    let value = unescape(&chars[value_start..], line_no)?;
    Ok((key, value))
}

fn unescape(chars: &[char], line_no: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(chars.len());
    // \u escapes are UTF-16 code units; surrogate pairs span two escapes
    let mut units: Vec<u16> = Vec::new();
    let mut iter = chars.iter().copied();

    while let Some(c) = iter.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out, line_no)?;
            out.push(c);
            continue;
        }
        match iter.next() {
            Some('u') => {
                let hex: String = iter.by_ref().take(4).collect();
                if hex.chars().count() != 4 {
                    return Err(ParseError::escape(line_no, format!("truncated \\u{}", hex)));
                }
                let unit = u16::from_str_radix(&hex, 16)
                    .map_err(|_| ParseError::escape(line_no, format!("malformed \\u{}", hex)))?;
                units.push(unit);
            }
            Some(other) => {
                flush_units(&mut units, &mut out, line_no)?;
                out.push(match other {
                    't' => '\t',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\x0c',
                    literal => literal,
                });
            }
            None => {}
        }
    }
    flush_units(&mut units, &mut out, line_no)?;
    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String, line_no: usize) -> Result<(), ParseError> {
    if units.is_empty() {
        return Ok(());
    }
    for decoded in char::decode_utf16(units.drain(..)) {
        let c = decoded.map_err(|e| {
            ParseError::escape(line_no, format!("unpaired surrogate {:#06x}", e.unpaired_surrogate()))
        })?;
        out.push(c);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<(String, String)> {
        parse_properties(text).unwrap().into_iter().collect()
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_separators() {
        let text = "a=1\nb: 2\nc 3\nd   =   4\ne\n";
        assert_eq!(
            parse(text),
            vec![pair("a", "1"), pair("b", "2"), pair("c", "3"), pair("d", "4"), pair("e", "")]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "# comment\n! also comment\n\n   \n  key = value\n";
        assert_eq!(parse(text), vec![pair("key", "value")]);
    }

    #[test]
    fn test_continuation() {
        let text = "fruits = apple, \\\n         banana, \\\n         pear\nnext=1\n";
        assert_eq!(
            parse(text),
            vec![pair("fruits", "apple, banana, pear"), pair("next", "1")]
        );
    }

    #[test]
    fn test_escaped_backslash_does_not_continue() {
        let text = "path=c:\\\\dir\\\\\nother=x\n";
        assert_eq!(parse(text), vec![pair("path", "c:\\dir\\"), pair("other", "x")]);
    }

    #[test]
    fn test_escapes() {
        let text = "tab=a\\tb\nkey\\ with\\ spaces=v\\=w\nuni=caf\\u00e9\nemoji=\\uD83D\\uDE00\n";
        let map = parse_properties(text).unwrap();
        assert_eq!(map["tab"], "a\tb");
        assert_eq!(map["key with spaces"], "v=w");
        assert_eq!(map["uni"], "café");
        assert_eq!(map["emoji"], "😀");
    }

    #[test]
    fn test_crlf_and_duplicates() {
        let text = "a=1\r\nb=2\r\na=3\r\n";
        assert_eq!(parse(text), vec![pair("a", "3"), pair("b", "2")]);
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = parse_properties("ok=1\nbad=\\u12G4\n").unwrap_err();
        assert!(matches!(err, ParseError::Escape { line: 2, .. }));
        assert!(parse_properties("bad=\\u12").is_err());
        assert!(parse_properties("bad=\\uD83D").is_err());
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_properties("").unwrap().is_empty());
    }
}
