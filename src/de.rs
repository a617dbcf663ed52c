//! ROD decoding.
//!
//! This module provides the [`Decoder`], which builds a [`RodValue`] from the
//! token stream of a [`Lexer`].
//!
//! ## Overview
//!
//! - **Single pass**: one token of lookahead, no backtracking
//! - **Trivia skipped**: whitespace, comments and annotations never reach
//!   the tree
//! - **Fail fast**: the first error aborts the decode; no partial tree is
//!   returned
//! - **Bounded nesting**: composite values deeper than
//!   [`DecodeOptions::max_depth`] are rejected before they are built
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use rod::{from_str, RodValue};
//!
//! let value = from_str("# A comment.\n<note> [1, 2, 3,]").unwrap();
//! assert_eq!(
//!     value,
//!     RodValue::from(vec![RodValue::from(1), RodValue::from(2), RodValue::from(3)])
//! );
//! ```
//!
//! ## Direct Decoder Usage
//!
//! ```rust
//! use rod::{Decoder, DecodeOptions, DecodeError};
//!
//! let options = DecodeOptions::new().with_max_depth(2);
//! let err = Decoder::with_options("[[[]]]", options).decode().unwrap_err();
//! assert!(matches!(err, DecodeError::DepthLimit { limit: 2, .. }));
//! ```

use tracing::{debug, trace};

use crate::error::DecodeError;
use crate::lexer::{describe_char, describe_text, Lexer, Token, TokenKind};
use crate::options::{DecodeOptions, DuplicatePolicy};
use crate::{RodMap, RodStruct, RodValue};

/// Builds one [`RodValue`] from ROD text.
///
/// A decoder is used once: [`Decoder::decode`] consumes it.
pub struct Decoder<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token<'a>>,
    options: DecodeOptions,
    depth: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder with the default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, DecodeOptions::default())
    }

    #[must_use]
    pub fn with_options(input: &'a str, options: DecodeOptions) -> Self {
        Decoder {
            lexer: Lexer::new(input).with_blob_concatenation(options.concat_blobs),
            peeked: None,
            options,
            depth: 0,
        }
    }

    /// Decodes the document: exactly one value, surrounded by optional trivia.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] found in the input.
    pub fn decode(mut self) -> Result<RodValue, DecodeError> {
        debug!(len = self.lexer.input().len(), "decoding document");
        let result = self.document();
        match &result {
            Ok(value) => trace!(kind = value.kind(), "decoded document"),
            Err(err) => debug!(error = %err, "decoding failed"),
        }
        result
    }

    fn document(&mut self) -> Result<RodValue, DecodeError> {
        let value = self.value()?;
        let token = self.next()?;
        if token.kind != TokenKind::Eof {
            return Err(unexpected(&token, "end of file"));
        }
        Ok(value)
    }

    /// Returns the next non-trivia token.
    fn next(&mut self) -> Result<Token<'a>, DecodeError> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        loop {
            match self.lexer.next() {
                Some(Ok(token)) if token.kind.is_trivia() => continue,
                Some(Ok(token)) => return Ok(token),
                Some(Err(err)) => return Err(err),
                None => {
                    let at = self.lexer.position();
                    return Err(DecodeError::unexpected_eof(at.line, at.column, "value"));
                }
            }
        }
    }

    fn peek(&mut self) -> Result<Token<'a>, DecodeError> {
        let token = match self.peeked {
            Some(token) => token,
            None => self.next()?,
        };
        self.peeked = Some(token);
        Ok(token)
    }

    /// Consumes the next token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Result<bool, DecodeError> {
        if self.peek()?.kind == kind {
            self.peeked = None;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'a>, DecodeError> {
        let token = self.next()?;
        if token.kind != kind {
            return Err(unexpected(&token, expected));
        }
        Ok(token)
    }

    fn value(&mut self) -> Result<RodValue, DecodeError> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Null => Ok(RodValue::Null),
            TokenKind::True => Ok(RodValue::Bool(true)),
            TokenKind::False => Ok(RodValue::Bool(false)),
            TokenKind::Inf => Ok(RodValue::Float(f64::INFINITY)),
            TokenKind::NaN => Ok(RodValue::Float(f64::NAN)),
            TokenKind::Pos => self.signed(false),
            TokenKind::Neg => self.signed(true),
            TokenKind::Integer => integer(&token, false),
            TokenKind::Float => float(&token, false),
            TokenKind::String => string(&token).map(RodValue::String),
            TokenKind::BlobOpen => self.blob(),
            TokenKind::ArrayOpen => {
                self.enter(&token)?;
                let value = self.array();
                self.depth -= 1;
                value
            }
            TokenKind::MapOpen => {
                self.enter(&token)?;
                let value = self.map();
                self.depth -= 1;
                value
            }
            TokenKind::StructOpen => {
                self.enter(&token)?;
                let value = self.structure();
                self.depth -= 1;
                value
            }
            _ => Err(unexpected(&token, "value")),
        }
    }

    fn enter(&mut self, token: &Token<'a>) -> Result<(), DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::DepthLimit {
                line: token.position.line,
                column: token.position.column,
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        trace!(depth = self.depth, kind = %token.kind, "entering composite");
        Ok(())
    }

    fn signed(&mut self, negative: bool) -> Result<RodValue, DecodeError> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Inf if negative => Ok(RodValue::Float(f64::NEG_INFINITY)),
            TokenKind::Inf => Ok(RodValue::Float(f64::INFINITY)),
            TokenKind::Integer => integer(&token, negative),
            TokenKind::Float => float(&token, negative),
            _ => Err(unexpected(&token, "digit")),
        }
    }

    fn blob(&mut self) -> Result<RodValue, DecodeError> {
        let mut bytes = Vec::new();
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::Byte => {
                    let mut byte = [0u8; 1];
                    hex::decode_to_slice(token.text, &mut byte).map_err(|_| {
                        unexpected(&token, "hexadecimal digit")
                    })?;
                    bytes.push(byte[0]);
                }
                TokenKind::BlobClose => {
                    if self.options.concat_blobs && self.eat(TokenKind::BlobOpen)? {
                        continue;
                    }
                    return Ok(RodValue::Blob(bytes));
                }
                _ => return Err(unexpected(&token, "byte or '|'")),
            }
        }
    }

    fn array(&mut self) -> Result<RodValue, DecodeError> {
        let mut items = Vec::new();
        loop {
            if self.eat(TokenKind::ArrayClose)? {
                break;
            }
            items.push(self.value()?);
            let token = self.next()?;
            match token.kind {
                TokenKind::Sep => continue,
                TokenKind::ArrayClose => break,
                _ => return Err(unexpected(&token, "',' or ']'")),
            }
        }
        Ok(RodValue::Array(items))
    }

    fn map(&mut self) -> Result<RodValue, DecodeError> {
        let mut map = RodMap::new();
        loop {
            if self.eat(TokenKind::MapClose)? {
                break;
            }
            let at = self.peek()?.position;
            let key = self.value()?;
            if !key.is_primitive() {
                return Err(DecodeError::InvalidMapKey {
                    line: at.line,
                    column: at.column,
                    got: key.kind().to_string(),
                });
            }
            if self.options.duplicates == DuplicatePolicy::Reject && map.contains_key(&key) {
                return Err(DecodeError::DuplicateKey {
                    line: at.line,
                    column: at.column,
                    key: key.to_string(),
                });
            }
            self.expect(TokenKind::Assoc, "':'")?;
            let value = self.value()?;
            map.insert(key, value);

            let token = self.next()?;
            match token.kind {
                TokenKind::Sep => continue,
                TokenKind::MapClose => break,
                _ => return Err(unexpected(&token, "',' or ')'")),
            }
        }
        Ok(RodValue::Map(map))
    }

    fn structure(&mut self) -> Result<RodValue, DecodeError> {
        let mut fields = RodStruct::new();
        loop {
            let name = self.next()?;
            match name.kind {
                TokenKind::StructClose => break,
                TokenKind::Ident => {}
                _ => return Err(unexpected(&name, "field or '}'")),
            }
            if self.options.duplicates == DuplicatePolicy::Reject && fields.contains_key(name.text) {
                return Err(DecodeError::DuplicateField {
                    line: name.position.line,
                    column: name.position.column,
                    field: name.text.to_string(),
                });
            }
            self.expect(TokenKind::Assoc, "':'")?;
            let value = self.value()?;
            fields.insert(name.text, value);

            let token = self.next()?;
            match token.kind {
                TokenKind::Sep => continue,
                TokenKind::StructClose => break,
                _ => return Err(unexpected(&token, "',' or '}'")),
            }
        }
        Ok(RodValue::Struct(fields))
    }
}

fn unexpected(token: &Token<'_>, expected: &str) -> DecodeError {
    let at = token.position;
    if token.kind == TokenKind::Eof {
        return DecodeError::unexpected_eof(at.line, at.column, expected);
    }
    DecodeError::syntax(at.line, at.column, expected, &describe_text(token.text))
}

fn integer(token: &Token<'_>, negative: bool) -> Result<RodValue, DecodeError> {
    // i128 holds every 19-digit magnitude, including |i64::MIN|.
    let value = token
        .text
        .parse::<i128>()
        .ok()
        .map(|magnitude| if negative { -magnitude } else { magnitude })
        .and_then(|n| i64::try_from(n).ok());
    match value {
        Some(n) => Ok(RodValue::Int(n)),
        None => {
            let sign = if negative { "-" } else { "" };
            let at = token.position;
            Err(DecodeError::syntax(
                at.line,
                at.column,
                "64-bit integer",
                &describe_text(&format!("{sign}{}", token.text)),
            ))
        }
    }
}

fn float(token: &Token<'_>, negative: bool) -> Result<RodValue, DecodeError> {
    let value: f64 = token
        .text
        .parse()
        .map_err(|_| unexpected(token, "float"))?;
    Ok(RodValue::Float(if negative { -value } else { value }))
}

/// Resolves the escapes of a string token, quotes included.
///
/// `\r` escapes are dropped, and CRs directly before a line feed (raw or
/// escaped) are removed, so a decoded string never contains CR LF and
/// re-encoding it is stable.
fn string(token: &Token<'_>) -> Result<String, DecodeError> {
    let text = token.text;
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut line = token.position.line;
    let mut column = token.position.column + 1;
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                match chars.next() {
                    Some('\\') => out.push('\\'),
                    Some('"') => out.push('"'),
                    Some('n') => push_line_feed(&mut out),
                    Some('r') => {}
                    Some(other) => {
                        return Err(DecodeError::syntax(
                            line,
                            column + 1,
                            "escape character",
                            &describe_char(other),
                        ));
                    }
                    None => {
                        return Err(DecodeError::unexpected_eof(
                            line,
                            column + 1,
                            "escape character",
                        ));
                    }
                }
                column += 2;
            }
            '\n' => {
                push_line_feed(&mut out);
                line += 1;
                column = 1;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    Ok(out)
}

fn push_line_feed(out: &mut String) {
    while out.ends_with('\r') {
        out.pop();
    }
    out.push('\n');
}
