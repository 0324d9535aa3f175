//! Flat `key=value` parsing for `.properties` and `.env` sources
//!
//! The accepted syntax follows the conventional properties dialect:
//!
//! ```text
//! # comment            ! also a comment
//! key=value            key: value          key value
//! multi = first \
//!         second       (continuation, leading whitespace dropped)
//! escaped\ key = tab\there \u00e9
//! ```
//!
//! `.env` sources use [`Dialect::Env`], which additionally accepts an
//! `export ` prefix and strips one pair of matching quotes from the value.
//! Single-quoted env values are taken literally.

/// Characters that count as whitespace between tokens.
const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Syntax variant applied to a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Properties,
    Env,
}

/// A syntax error with the 1-based line where the entry started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Parse `content` into entries, in file order.
///
/// Duplicate keys are all returned; merging them into a store lets the last
/// one win.
pub fn parse(content: &str, dialect: Dialect) -> Result<Vec<(String, String)>, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut entries = Vec::new();
    let mut physical = content.lines().enumerate();

    while let Some((idx, raw)) = physical.next() {
        let line = idx + 1;
        let trimmed = raw.trim_start_matches(WHITESPACE);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = String::new();
        let mut current = trimmed;
        loop {
            if ends_with_continuation(current) {
                logical.push_str(&current[..current.len() - 1]);
                match physical.next() {
                    Some((_, next)) => current = next.trim_start_matches(WHITESPACE),
                    None => break,
                }
            } else {
                logical.push_str(current);
                break;
            }
        }

        entries.push(parse_entry(&logical, line, dialect)?);
    }

    Ok(entries)
}

/// A line continues when it ends in an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn parse_entry(logical: &str, line: usize, dialect: Dialect) -> Result<(String, String), ParseError> {
    let logical = match dialect {
        Dialect::Env => strip_export(logical),
        Dialect::Properties => logical,
    };

    let (raw_key, raw_value) = split_key_value(logical);
    let key = unescape(raw_key, line)?;

    let value = match dialect {
        Dialect::Properties => unescape(raw_value, line)?,
        Dialect::Env => env_value(raw_value, line)?,
    };

    Ok((key, value))
}

fn strip_export(logical: &str) -> &str {
    match logical.strip_prefix("export") {
        Some(rest) if rest.starts_with(WHITESPACE) => rest.trim_start_matches(WHITESPACE),
        _ => logical,
    }
}

/// Split a logical line at the first unescaped separator.
///
/// The key ends at `=`, `:` or whitespace. Whitespace around the separator is
/// skipped, and at most one `=`/`:` is consumed after whitespace.
fn split_key_value(logical: &str) -> (&str, &str) {
    let mut key_end = logical.len();
    let mut value_start = logical.len();
    let mut has_separator = false;
    let mut preceding_backslash = false;

    for (idx, c) in logical.char_indices() {
        if !preceding_backslash {
            if c == '=' || c == ':' {
                key_end = idx;
                value_start = idx + c.len_utf8();
                has_separator = true;
                break;
            }
            if WHITESPACE.contains(&c) {
                key_end = idx;
                value_start = idx + c.len_utf8();
                break;
            }
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
    }

    let rest = &logical[value_start..];
    let mut skip = 0;
    for (idx, c) in rest.char_indices() {
        if WHITESPACE.contains(&c) {
            skip = idx + c.len_utf8();
            continue;
        }
        if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            skip = idx + c.len_utf8();
            continue;
        }
        break;
    }

    (&logical[..key_end], &rest[skip..])
}

fn env_value(raw: &str, line: usize) -> Result<String, ParseError> {
    let trimmed = raw.trim_end_matches(WHITESPACE);
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            let inner = &trimmed[1..trimmed.len() - 1];
            return if quote == '\'' {
                Ok(inner.to_string())
            } else {
                unescape(inner, line)
            };
        }
    }
    unescape(raw, line)
}

fn unescape(raw: &str, line: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(unicode_escape(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Decode the hex digits after `\u`, joining UTF-16 surrogate pairs.
fn unicode_escape(chars: &mut std::str::Chars<'_>, line: usize) -> Result<char, ParseError> {
    let high = read_hex4(chars).ok_or_else(|| ParseError::new(line, "Malformed \\uxxxx encoding"))?;

    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high)
            .ok_or_else(|| ParseError::new(line, format!("Unpaired surrogate \\u{high:04X}")));
    }

    let mut lookahead = chars.clone();
    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
        if let Some(low) = read_hex4(&mut lookahead) {
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                if let Some(decoded) = char::from_u32(combined) {
                    return Ok(decoded);
                }
            }
        }
    }

    Err(ParseError::new(
        line,
        format!("Unpaired surrogate \\u{high:04X}"),
    ))
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0;
    for _ in 0..4 {
        let digit = chars.next()?.to_digit(16)?;
        value = value * 16 + digit;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn props(content: &str) -> Vec<(String, String)> {
        parse(content, Dialect::Properties).unwrap()
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[rstest]
    #[case("key=value", "key", "value")]
    #[case("key = value", "key", "value")]
    #[case("key:value", "key", "value")]
    #[case("key value", "key", "value")]
    #[case("key   =   value", "key", "value")]
    #[case("   indented=yes", "indented", "yes")]
    #[case("key=", "key", "")]
    #[case("lonely", "lonely", "")]
    #[case("key==double", "key", "=double")]
    #[case("url=https://repo.example/x?a=b", "url", "https://repo.example/x?a=b")]
    #[case("trailing=kept  ", "trailing", "kept  ")]
    fn separators(#[case] line: &str, #[case] key: &str, #[case] value: &str) {
        assert_eq!(props(line), vec![pair(key, value)]);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let content = "# header\n\n! bang comment\n   # indented comment\nA=1\n";
        assert_eq!(props(content), vec![pair("A", "1")]);
    }

    #[test]
    fn continuation_lines_are_joined() {
        let content = "list = one, \\\n       two, \\\n       three\nNEXT=x\n";
        assert_eq!(
            props(content),
            vec![pair("list", "one, two, three"), pair("NEXT", "x")]
        );
    }

    #[test]
    fn even_backslashes_do_not_continue() {
        let content = "path=C:\\\\\nNEXT=x\n";
        assert_eq!(props(content), vec![pair("path", "C:\\"), pair("NEXT", "x")]);
    }

    #[test]
    fn continuation_at_eof_is_tolerated() {
        assert_eq!(props("A=1\\"), vec![pair("A", "1")]);
    }

    #[test]
    fn escapes_are_decoded() {
        let content = "escaped\\ key\\=x = tab\\there\\nnew \\u00e9 \\q\n";
        assert_eq!(
            props(content),
            vec![pair("escaped key=x", "tab\there\nnew \u{e9} q")]
        );
    }

    #[test]
    fn surrogate_pairs_are_joined() {
        assert_eq!(props("emoji=\\uD83D\\uDE00"), vec![pair("emoji", "\u{1F600}")]);
    }

    #[rstest]
    #[case("bad=\\u12")]
    #[case("bad=\\uzzzz")]
    #[case("bad=\\uD83D")]
    #[case("bad=\\uDE00")]
    fn malformed_unicode_escapes_fail(#[case] line: &str) {
        let content = format!("OK=1\n{line}\n");
        let err = parse(&content, Dialect::Properties).unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn error_line_is_where_entry_starts() {
        let content = "A=1\nB=start \\\n  \\u00\n";
        let err = parse(content, Dialect::Properties).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("Malformed"));
    }

    #[test]
    fn duplicates_are_all_returned_in_order() {
        assert_eq!(props("K=1\nK=2\n"), vec![pair("K", "1"), pair("K", "2")]);
    }

    #[test]
    fn bom_is_ignored() {
        assert_eq!(props("\u{feff}A=1"), vec![pair("A", "1")]);
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(props("A=1\r\nB=2\r\n"), vec![pair("A", "1"), pair("B", "2")]);
    }

    #[rstest]
    #[case("export TOKEN=abc", "TOKEN", "abc")]
    #[case("export\tTOKEN=abc", "TOKEN", "abc")]
    #[case("exported=1", "exported", "1")]
    #[case("NAME=\"quoted value\"", "NAME", "quoted value")]
    #[case("NAME='literal \\n'", "NAME", "literal \\n")]
    #[case("NAME=\"tab\\tinside\"  ", "NAME", "tab\tinside")]
    #[case("NAME=\"unbalanced", "NAME", "\"unbalanced")]
    #[case("NAME=plain", "NAME", "plain")]
    fn env_dialect(#[case] line: &str, #[case] key: &str, #[case] value: &str) {
        assert_eq!(parse(line, Dialect::Env).unwrap(), vec![pair(key, value)]);
    }

    #[test]
    fn properties_dialect_keeps_quotes_and_export() {
        assert_eq!(
            props("export A=\"x\""),
            vec![pair("export", "A=\"x\"")]
        );
    }
}
