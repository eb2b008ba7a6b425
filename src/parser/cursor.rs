//! A cursor over a flat token stream.
//!
//! Nesting is tracked purely by byte containment: a token belongs to a
//! container while its start offset is below the container's end offset.

use std::borrow::Cow;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::tokenizer::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The token under the cursor.
    pub fn current(&self) -> ParseResult<Token> {
        self.tokens
            .get(self.pos)
            .copied()
            .ok_or_else(|| ParseError::new(ParseErrorKind::OutOfTokens, self.source.len()))
    }

    /// Source text of the current token.
    pub fn text(&self) -> ParseResult<&'a str> {
        let token = self.current()?;
        Ok(&self.source[token.start..token.end])
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Step past the current value and everything nested inside it.
    pub fn skip_value(&mut self) -> ParseResult<()> {
        let end = self.current()?.end;
        self.pos += 1;
        while self.tokens.get(self.pos).is_some_and(|t| t.start < end) {
            self.pos += 1;
        }
        Ok(())
    }

    /// The current key, unescaped. Anything other than a string is
    /// `UnrecognizedKey`.
    pub fn key(&self) -> ParseResult<Cow<'a, str>> {
        if self.current()?.kind != TokenKind::String {
            return Err(self.error(ParseErrorKind::UnrecognizedKey));
        }
        self.string()
    }

    /// The current string token with its escapes decoded. Text without a
    /// backslash is borrowed from the source.
    pub fn string(&self) -> ParseResult<Cow<'a, str>> {
        let token = self.expect(TokenKind::String)?;
        let raw = &self.source[token.start..token.end];
        if !raw.contains('\\') {
            return Ok(Cow::Borrowed(raw));
        }

        // The token span sits between the quotes.
        let quoted = &self.source[token.start - 1..token.end + 1];
        serde_json::from_str::<String>(quoted)
            .map(Cow::Owned)
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidJson, token.start))
    }

    /// Require the current token to be of `kind`.
    pub fn expect(&self, kind: TokenKind) -> ParseResult<Token> {
        let token = self.current()?;
        if token.kind != kind {
            return Err(ParseError::new(ParseErrorKind::TypeMismatch, token.start));
        }
        Ok(token)
    }

    /// Step inside a container of `kind`, returning its end offset for use
    /// with [`Cursor::within`].
    pub fn enter(&mut self, kind: TokenKind) -> ParseResult<usize> {
        let token = self.expect(kind)?;
        self.pos += 1;
        Ok(token.end)
    }

    /// True while the cursor is still inside a container ending at `end`.
    pub fn within(&self, end: usize) -> bool {
        self.tokens.get(self.pos).is_some_and(|t| t.start < end)
    }

    /// An error of `kind` at the current token's offset.
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        let offset = self
            .tokens
            .get(self.pos)
            .map_or(self.source.len(), |t| t.start);
        ParseError::new(kind, offset)
    }
}
