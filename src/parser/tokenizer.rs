//! Flat JSON tokenizer.
//!
//! Produces a vector of typed spans in document order. Containers enclose
//! their children by byte range, and `size` records the child count (keys
//! for objects, elements for arrays). Nothing is decoded: string spans are
//! the raw bytes between the quotes.

use super::error::{ParseError, ParseErrorKind, ParseResult};

/// Default token budget for one document.
pub const DEFAULT_MAX_TOKENS: usize = 8192;

/// The kind of value a token spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Object,
    Array,
    String,
    /// Numbers, `true`, `false` and `null`.
    Primitive,
}

/// A typed span of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// First byte. For strings, the byte after the opening quote.
    pub start: usize,
    /// One past the last byte. For strings, the closing quote.
    pub end: usize,
    /// Child count; 1 for a string used as an object key.
    pub size: usize,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            size: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Value,
    ValueOrClose,
    KeyOrClose,
    Key,
    Colon,
    CommaOrClose,
    End,
}

struct Tokenizer<'a> {
    bytes: &'a [u8],
    tokens: Vec<Token>,
    open: Vec<usize>,
    max_tokens: usize,
    expect: Expect,
}

/// Split `source` into tokens, failing once more than `max_tokens` would
/// be produced.
pub fn tokenize(source: &str, max_tokens: usize) -> ParseResult<Vec<Token>> {
    let mut tokenizer = Tokenizer {
        bytes: source.as_bytes(),
        tokens: Vec::with_capacity(max_tokens.min(source.len() / 2 + 1)),
        open: Vec::new(),
        max_tokens,
        expect: Expect::Value,
    };
    tokenizer.run()?;
    Ok(tokenizer.tokens)
}

impl<'a> Tokenizer<'a> {
    fn run(&mut self) -> ParseResult<()> {
        let mut pos = 0;
        while pos < self.bytes.len() {
            let byte = self.bytes[pos];
            if matches!(byte, b' ' | b'\t' | b'\r' | b'\n') {
                pos += 1;
                continue;
            }

            pos = match (self.expect, byte) {
                (Expect::ValueOrClose, b']') => self.close(TokenKind::Array, pos)?,
                (Expect::Value | Expect::ValueOrClose, _) => self.value(pos)?,
                (Expect::KeyOrClose, b'}') => self.close(TokenKind::Object, pos)?,
                (Expect::KeyOrClose | Expect::Key, b'"') => self.key(pos)?,
                (Expect::Colon, b':') => {
                    self.expect = Expect::Value;
                    pos + 1
                }
                (Expect::CommaOrClose, b',') => {
                    self.expect = match self.parent_kind() {
                        Some(TokenKind::Object) => Expect::Key,
                        _ => Expect::Value,
                    };
                    pos + 1
                }
                (Expect::CommaOrClose, b'}') => self.close(TokenKind::Object, pos)?,
                (Expect::CommaOrClose, b']') => self.close(TokenKind::Array, pos)?,
                _ => return Err(invalid(pos)),
            };
        }

        if self.expect != Expect::End {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEnd,
                self.bytes.len(),
            ));
        }
        Ok(())
    }

    fn parent_kind(&self) -> Option<TokenKind> {
        self.open.last().map(|&index| self.tokens[index].kind)
    }

    fn push(&mut self, token: Token) -> ParseResult<usize> {
        if self.tokens.len() >= self.max_tokens {
            return Err(ParseError::new(ParseErrorKind::TooManyTokens, token.start));
        }
        self.tokens.push(token);
        Ok(self.tokens.len() - 1)
    }

    fn value_done(&mut self) {
        self.expect = if self.open.is_empty() {
            Expect::End
        } else {
            Expect::CommaOrClose
        };
    }

    fn value(&mut self, pos: usize) -> ParseResult<usize> {
        let byte = self.bytes[pos];

        let kind = match byte {
            b'{' => TokenKind::Object,
            b'[' => TokenKind::Array,
            b'"' => TokenKind::String,
            b'-' | b'0'..=b'9' | b't' | b'f' | b'n' => TokenKind::Primitive,
            _ => return Err(invalid(pos)),
        };

        if let Some(&parent) = self.open.last() {
            if self.tokens[parent].kind == TokenKind::Array {
                self.tokens[parent].size += 1;
            }
        }

        match kind {
            TokenKind::Object | TokenKind::Array => {
                let index = self.push(Token::new(kind, pos, pos))?;
                self.open.push(index);
                self.expect = if kind == TokenKind::Object {
                    Expect::KeyOrClose
                } else {
                    Expect::ValueOrClose
                };
                Ok(pos + 1)
            }
            TokenKind::String => {
                let end = self.string_end(pos)?;
                self.push(Token::new(kind, pos + 1, end))?;
                self.value_done();
                Ok(end + 1)
            }
            TokenKind::Primitive => {
                let end = self.primitive_end(pos)?;
                self.push(Token::new(kind, pos, end))?;
                self.value_done();
                Ok(end)
            }
        }
    }

    fn key(&mut self, pos: usize) -> ParseResult<usize> {
        let end = self.string_end(pos)?;
        let mut token = Token::new(TokenKind::String, pos + 1, end);
        token.size = 1;
        self.push(token)?;

        if let Some(&parent) = self.open.last() {
            self.tokens[parent].size += 1;
        }
        self.expect = Expect::Colon;
        Ok(end + 1)
    }

    fn close(&mut self, kind: TokenKind, pos: usize) -> ParseResult<usize> {
        let index = match self.open.last() {
            Some(&index) if self.tokens[index].kind == kind => index,
            _ => return Err(invalid(pos)),
        };
        self.open.pop();
        self.tokens[index].end = pos + 1;
        self.value_done();
        Ok(pos + 1)
    }

    /// Offset of the closing quote of the string opening at `pos`.
    fn string_end(&self, pos: usize) -> ParseResult<usize> {
        let bytes = self.bytes;
        let mut i = pos + 1;
        loop {
            let Some(&byte) = bytes.get(i) else {
                return Err(ParseError::new(ParseErrorKind::UnexpectedEnd, bytes.len()));
            };
            match byte {
                b'"' => return Ok(i),
                b'\\' => {
                    let Some(&escape) = bytes.get(i + 1) else {
                        return Err(ParseError::new(ParseErrorKind::UnexpectedEnd, bytes.len()));
                    };
                    match escape {
                        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => i += 2,
                        b'u' => {
                            let digits = bytes.get(i + 2..i + 6).ok_or_else(|| {
                                ParseError::new(ParseErrorKind::UnexpectedEnd, bytes.len())
                            })?;
                            if !digits.iter().all(u8::is_ascii_hexdigit) {
                                return Err(invalid(i));
                            }
                            i += 6;
                        }
                        _ => return Err(invalid(i)),
                    }
                }
                0x00..=0x1f => return Err(invalid(i)),
                _ => i += 1,
            }
        }
    }

    /// Offset one past the primitive starting at `pos`.
    fn primitive_end(&self, pos: usize) -> ParseResult<usize> {
        let mut i = pos;
        while let Some(&byte) = self.bytes.get(i) {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' | b',' | b']' | b'}' | b':' => break,
                b'"' => return Err(invalid(i)),
                0x20..=0x7e => i += 1,
                _ => return Err(invalid(i)),
            }
        }
        Ok(i)
    }
}

fn invalid(offset: usize) -> ParseError {
    ParseError::new(ParseErrorKind::InvalidJson, offset)
}
