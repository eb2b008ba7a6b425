//! Readers for scalar values. Each reads the token under the cursor and
//! advances past it.

use crate::types::bounded;

use super::cursor::Cursor;
use super::error::{ParseErrorKind, ParseResult};
use super::tokenizer::TokenKind;

/// Decode a string token, truncated to the bounded string length.
pub fn read_string(cursor: &mut Cursor<'_>) -> ParseResult<String> {
    let value = bounded(&cursor.string()?);
    cursor.advance();
    Ok(value)
}

/// Read a numeric primitive.
///
/// Parses the longest numeric prefix. Text with no numeric prefix reads
/// as `0.0`, the same as a literal zero.
pub fn read_f32(cursor: &mut Cursor<'_>) -> ParseResult<f32> {
    cursor.expect(TokenKind::Primitive)?;
    let value = parse_float_prefix(cursor.text()?);
    cursor.advance();
    Ok(value)
}

/// Read an unsigned integer stored as a quoted numeral.
///
/// Leading digits are parsed; no digits reads as `0`, overflow saturates.
pub fn read_u64(cursor: &mut Cursor<'_>) -> ParseResult<u64> {
    cursor.expect(TokenKind::String)?;
    let value = cursor
        .text()?
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        });
    cursor.advance();
    Ok(value)
}

/// Read `true` or `false`.
pub fn read_bool(cursor: &mut Cursor<'_>) -> ParseResult<bool> {
    cursor.expect(TokenKind::Primitive)?;
    let value = match cursor.text()? {
        "true" => true,
        "false" => false,
        _ => return Err(cursor.error(ParseErrorKind::InvalidBoolean)),
    };
    cursor.advance();
    Ok(value)
}

/// Length of the longest prefix of `text` shaped like a decimal float.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut end = int_end;
    let mut has_digits = int_end > i;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}

fn parse_float_prefix(text: &str) -> f32 {
    let len = numeric_prefix_len(text);
    text[..len].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenizer::{tokenize, DEFAULT_MAX_TOKENS};

    fn with_cursor<T>(source: &str, read: impl FnOnce(&mut Cursor<'_>) -> T) -> T {
        let tokens = tokenize(source, DEFAULT_MAX_TOKENS).unwrap();
        let mut cursor = Cursor::new(source, &tokens);
        read(&mut cursor)
    }

    #[test]
    fn test_float_prefix() {
        assert_eq!(parse_float_prefix("0.5"), 0.5);
        assert_eq!(parse_float_prefix("-1.25e1"), -12.5);
        assert_eq!(parse_float_prefix("1."), 1.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert_eq!(parse_float_prefix("3.5junk"), 3.5);
        assert_eq!(parse_float_prefix("true"), 0.0);
        assert_eq!(parse_float_prefix("-"), 0.0);
    }

    #[test]
    fn test_read_f32_advances() {
        let value = with_cursor("0.25", |cursor| {
            let value = read_f32(cursor).unwrap();
            assert!(cursor.is_eof());
            value
        });
        assert_eq!(value, 0.25);
    }

    #[test]
    fn test_read_f32_rejects_strings() {
        let err = with_cursor(r#""0.25""#, |cursor| read_f32(cursor).unwrap_err());
        assert_eq!(err.kind, ParseErrorKind::TypeMismatch);
    }

    #[test]
    fn test_read_u64() {
        assert_eq!(with_cursor(r#""1700000000""#, |c| read_u64(c).unwrap()), 1_700_000_000);
        assert_eq!(with_cursor(r#""12abc""#, |c| read_u64(c).unwrap()), 12);
        assert_eq!(with_cursor(r#""abc""#, |c| read_u64(c).unwrap()), 0);
        assert_eq!(
            with_cursor(r#""99999999999999999999999""#, |c| read_u64(c).unwrap()),
            u64::MAX
        );
    }

    #[test]
    fn test_read_bool() {
        assert!(with_cursor("true", |c| read_bool(c).unwrap()));
        assert!(!with_cursor("false", |c| read_bool(c).unwrap()));

        let err = with_cursor("null", |c| read_bool(c).unwrap_err());
        assert_eq!(err.kind, ParseErrorKind::InvalidBoolean);
    }

    #[test]
    fn test_read_string_truncates() {
        let source = format!("\"{}\"", "n".repeat(60));
        let value = with_cursor(&source, |c| read_string(c).unwrap());
        assert_eq!(value.len(), 47);
    }
}
