//! ROD tokenizer.
//!
//! [`Lexer`] turns a `&str` into a lazy stream of [`Token`]s. It checks the
//! whole grammar while it goes, so the tokens it yields always form a
//! well-shaped document prefix. The decoder only has to build values and
//! enforce the rules that need the values themselves (integer range, string
//! escapes, duplicate keys).
//!
//! ## State machine
//!
//! Scanning is driven by a `State` tag and an explicit continuation stack.
//! A state consumes some input, emits zero or more tokens, and names the
//! next state. States that open a nested value push the states that resume
//! the enclosing one, so nesting depth lives on the heap rather than the
//! call stack.
//!
//! ## Usage
//!
//! ```rust
//! use rod::lexer::{Lexer, TokenKind};
//!
//! let kinds: Vec<TokenKind> = Lexer::new("[1, <note> -2.5]")
//!     .map(|token| token.unwrap().kind)
//!     .filter(|kind| !kind.is_trivia())
//!     .collect();
//!
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::ArrayOpen,
//!         TokenKind::Integer,
//!         TokenKind::Sep,
//!         TokenKind::Neg,
//!         TokenKind::Float,
//!         TokenKind::ArrayClose,
//!         TokenKind::Eof,
//!     ]
//! );
//! ```
//!
//! ## Errors
//!
//! The first mismatch ends the stream with a single error. Running out of
//! input produces [`DecodeError::UnexpectedEof`]; anything else is
//! [`DecodeError::Syntax`] naming what was expected and what was found.

use std::collections::VecDeque;
use std::fmt;

use tracing::trace;

use crate::error::DecodeError;
use crate::position::{LineIndex, Position, Span};

/// The kind of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of whitespace.
    Space,
    /// `#` up to the end of the line.
    InlineComment,
    /// `#<` up to the next `>`.
    BlockComment,
    /// `<` up to the next `>`.
    Annotation,
    /// A struct field name.
    Ident,
    Null,
    True,
    False,
    Inf,
    NaN,
    /// A `+` sign before a number.
    Pos,
    /// A `-` sign before a number.
    Neg,
    Integer,
    Float,
    /// A complete string literal, quotes and escapes included.
    String,
    /// The `|` opening a blob.
    BlobOpen,
    /// Two hexadecimal digits inside a blob.
    Byte,
    /// The `|` closing a blob.
    BlobClose,
    Sep,
    Assoc,
    ArrayOpen,
    ArrayClose,
    MapOpen,
    MapClose,
    StructOpen,
    StructClose,
    /// End of input. Always the last token.
    Eof,
}

impl TokenKind {
    /// Returns `true` for tokens that carry no data: whitespace, comments and
    /// annotations.
    #[inline]
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Space
                | TokenKind::InlineComment
                | TokenKind::BlockComment
                | TokenKind::Annotation
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Space => "Space",
            TokenKind::InlineComment => "InlineComment",
            TokenKind::BlockComment => "BlockComment",
            TokenKind::Annotation => "Annotation",
            TokenKind::Ident => "Ident",
            TokenKind::Null => "Null",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Inf => "Inf",
            TokenKind::NaN => "NaN",
            TokenKind::Pos => "Pos",
            TokenKind::Neg => "Neg",
            TokenKind::Integer => "Integer",
            TokenKind::Float => "Float",
            TokenKind::String => "String",
            TokenKind::BlobOpen => "BlobOpen",
            TokenKind::Byte => "Byte",
            TokenKind::BlobClose => "BlobClose",
            TokenKind::Sep => "Sep",
            TokenKind::Assoc => "Assoc",
            TokenKind::ArrayOpen => "ArrayOpen",
            TokenKind::ArrayClose => "ArrayClose",
            TokenKind::MapOpen => "MapOpen",
            TokenKind::MapClose => "MapClose",
            TokenKind::StructOpen => "StructOpen",
            TokenKind::StructClose => "StructClose",
            TokenKind::Eof => "Eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token borrowed from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub text: &'a str,
    pub span: Span,
    /// Where the token starts.
    pub position: Position,
}

const KEYWORDS: [(&str, TokenKind); 5] = [
    ("null", TokenKind::Null),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("inf", TokenKind::Inf),
    ("nan", TokenKind::NaN),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Main,
    Space,
    Annotation,
    Value,
    Key,
    Number,
    String,
    Blob,
    BlobJoin,
    Element,
    ElementNext,
    Entry,
    EntryNext,
    Field,
    FieldNext,
    Ident,
    Assoc,
    Eof,
}

type Step = Result<Option<State>, DecodeError>;

/// A pull-based tokenizer over a complete ROD document.
///
/// Yields `Ok(token)` until the [`TokenKind::Eof`] token or the first error,
/// then `None`.
pub struct Lexer<'a> {
    input: &'a str,
    // Start of the pending token.
    start: usize,
    start_at: Position,
    pos: usize,
    // Line and char column of `pos`, kept up to date by `bump`.
    line: usize,
    column: usize,
    lines: LineIndex,
    state: Option<State>,
    stack: Vec<State>,
    queue: VecDeque<Token<'a>>,
    failed: Option<DecodeError>,
    concat_blobs: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            start: 0,
            start_at: Position {
                offset: 0,
                line: 1,
                column: 1,
            },
            pos: 0,
            line: 1,
            column: 1,
            lines: LineIndex::new(),
            state: Some(State::Main),
            stack: Vec::new(),
            queue: VecDeque::new(),
            failed: None,
            concat_blobs: false,
        }
    }

    /// Accepts further `|...|` groups directly after a blob.
    #[must_use]
    pub fn with_blob_concatenation(mut self, enabled: bool) -> Self {
        self.concat_blobs = enabled;
        self
    }

    /// The input being scanned.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// The position of the cursor, just past the last scanned character.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    /// Converts any byte offset up to the cursor into a [`Position`].
    ///
    /// Unlike [`Lexer::position`], this scans the line holding `offset`.
    #[must_use]
    pub fn locate(&self, offset: usize) -> Position {
        self.lines.locate(self.input, offset.min(self.pos))
    }

    /// Current continuation stack depth. Grows with the nesting of the value
    /// being scanned.
    #[inline]
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.lines.record_line_start(self.pos);
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    // Only used for ASCII keywords, which never contain a newline.
    fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            self.column += expected.len();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, accept: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if !accept(ch) {
                break;
            }
            self.bump();
            count += 1;
        }
        count
    }

    // Consumes up to and including `end`.
    fn scan_until(&mut self, end: char) -> Result<(), DecodeError> {
        loop {
            match self.bump() {
                Some(ch) if ch == end => return Ok(()),
                Some(_) => {}
                None => return Err(self.expected(&format!("{end:?}"))),
            }
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let token = Token {
            kind,
            text: &self.input[self.start..self.pos],
            span: Span::new(self.start, self.pos),
            position: self.start_at,
        };
        trace!(kind = %kind, at = %token.position, "token");
        self.queue.push_back(token);
        self.start = self.pos;
        self.start_at = Lexer::position(self);
    }

    /// Schedules `states` to run in order once the current state returns
    /// through [`Lexer::pop`].
    fn push(&mut self, states: &[State]) {
        self.stack.extend(states.iter().rev());
    }

    fn pop(&mut self) -> Step {
        Ok(self.stack.pop())
    }

    /// Runs `first` next, followed by `then`.
    fn then(&mut self, first: State, then: &[State]) -> Step {
        self.push(then);
        Ok(Some(first))
    }

    /// Describes the character at the cursor as the offending input.
    fn expected(&self, expected: &str) -> DecodeError {
        let at = self.position();
        match self.peek() {
            None => DecodeError::unexpected_eof(at.line, at.column, expected),
            Some(ch) => DecodeError::syntax(at.line, at.column, expected, &describe_char(ch)),
        }
    }

    /// Describes the pending token text as the offending input.
    fn expected_pending(&self, expected: &str) -> DecodeError {
        let at = self.start_at;
        let got = describe_text(&self.input[self.start..self.pos]);
        DecodeError::syntax(at.line, at.column, expected, &got)
    }

    fn step(&mut self, state: State) -> Step {
        match state {
            State::Main => {
                if self.at_eof() {
                    return Err(self.expected("value"));
                }
                self.then(
                    State::Space,
                    &[
                        State::Annotation,
                        State::Space,
                        State::Value,
                        State::Space,
                        State::Eof,
                    ],
                )
            }
            State::Space => self.lex_space(),
            State::Annotation => {
                if self.eat('<') {
                    self.scan_until('>')?;
                    self.emit(TokenKind::Annotation);
                }
                self.pop()
            }
            State::Value => {
                if self.primitive() {
                    return self.pop();
                }
                if self.eat('[') {
                    self.emit(TokenKind::ArrayOpen);
                    self.then(State::Space, &[State::Element])
                } else if self.eat('(') {
                    self.emit(TokenKind::MapOpen);
                    self.then(State::Space, &[State::Entry])
                } else if self.eat('{') {
                    self.emit(TokenKind::StructOpen);
                    self.then(State::Space, &[State::Field])
                } else {
                    Err(self.expected("value"))
                }
            }
            State::Key => {
                if self.primitive() {
                    return self.pop();
                }
                match self.peek() {
                    Some(ch @ ('[' | '(' | '{')) => {
                        let at = Lexer::position(self);
                        Err(DecodeError::InvalidMapKey {
                            line: at.line,
                            column: at.column,
                            got: describe_char(ch),
                        })
                    }
                    _ => Err(self.expected("primitive value")),
                }
            }
            State::Number => self.lex_number(),
            State::String => self.lex_string(),
            State::Blob => self.lex_blob(),
            State::BlobJoin => {
                if self.eat('|') {
                    self.emit(TokenKind::BlobOpen);
                    return self.then(State::Space, &[State::Blob]);
                }
                self.pop()
            }
            State::Element => {
                if self.eat(']') {
                    self.emit(TokenKind::ArrayClose);
                    return self.pop();
                }
                if self.at_eof() {
                    return Err(self.expected("element or ']'"));
                }
                self.then(
                    State::Annotation,
                    &[State::Space, State::Value, State::Space, State::ElementNext],
                )
            }
            State::ElementNext => {
                if self.eat(',') {
                    self.emit(TokenKind::Sep);
                    self.then(State::Space, &[State::Element])
                } else if self.eat(']') {
                    self.emit(TokenKind::ArrayClose);
                    self.pop()
                } else {
                    Err(self.expected("',' or ']'"))
                }
            }
            State::Entry => {
                if self.eat(')') {
                    self.emit(TokenKind::MapClose);
                    return self.pop();
                }
                if self.at_eof() {
                    return Err(self.expected("entry or ')'"));
                }
                self.then(
                    State::Annotation,
                    &[
                        State::Space,
                        State::Key,
                        State::Space,
                        State::Assoc,
                        State::Space,
                        State::Annotation,
                        State::Space,
                        State::Value,
                        State::Space,
                        State::EntryNext,
                    ],
                )
            }
            State::EntryNext => {
                if self.eat(',') {
                    self.emit(TokenKind::Sep);
                    self.then(State::Space, &[State::Entry])
                } else if self.eat(')') {
                    self.emit(TokenKind::MapClose);
                    self.pop()
                } else {
                    Err(self.expected("',' or ')'"))
                }
            }
            State::Field => {
                if self.eat('}') {
                    self.emit(TokenKind::StructClose);
                    return self.pop();
                }
                if self.at_eof() {
                    return Err(self.expected("field or '}'"));
                }
                self.then(
                    State::Ident,
                    &[
                        State::Space,
                        State::Assoc,
                        State::Space,
                        State::Annotation,
                        State::Space,
                        State::Value,
                        State::Space,
                        State::FieldNext,
                    ],
                )
            }
            State::FieldNext => {
                if self.eat(',') {
                    self.emit(TokenKind::Sep);
                    self.then(State::Space, &[State::Field])
                } else if self.eat('}') {
                    self.emit(TokenKind::StructClose);
                    self.pop()
                } else {
                    Err(self.expected("',' or '}'"))
                }
            }
            State::Ident => match self.peek() {
                Some(ch) if is_ident_start(ch) => {
                    self.eat_while(is_ident_char);
                    self.emit(TokenKind::Ident);
                    self.pop()
                }
                _ => Err(self.expected("identifier")),
            },
            State::Assoc => {
                if !self.eat(':') {
                    return Err(self.expected("':'"));
                }
                self.emit(TokenKind::Assoc);
                self.pop()
            }
            State::Eof => {
                if !self.at_eof() {
                    return Err(self.expected("end of file"));
                }
                self.emit(TokenKind::Eof);
                Ok(None)
            }
        }
    }

    fn lex_space(&mut self) -> Step {
        loop {
            self.eat_while(char::is_whitespace);
            if self.pos > self.start {
                self.emit(TokenKind::Space);
            }
            if self.eat_str("#<") {
                self.scan_until('>')?;
                self.emit(TokenKind::BlockComment);
            } else if self.eat('#') {
                self.eat_while(|ch| ch != '\n');
                self.emit(TokenKind::InlineComment);
            } else {
                return self.pop();
            }
        }
    }

    // Scans the start of a primitive, scheduling the states that finish it.
    // Returns false without consuming anything if no primitive starts here.
    fn primitive(&mut self) -> bool {
        match self.peek() {
            Some('+') => {
                self.bump();
                self.emit(TokenKind::Pos);
                self.push(&[State::Number]);
            }
            Some('-') => {
                self.bump();
                self.emit(TokenKind::Neg);
                self.push(&[State::Number]);
            }
            Some('"') => {
                self.bump();
                self.push(&[State::String]);
            }
            Some('|') => {
                self.bump();
                self.emit(TokenKind::BlobOpen);
                self.push(&[State::Space, State::Blob]);
            }
            Some(ch) if ch.is_ascii_digit() => self.push(&[State::Number]),
            _ => {
                for (keyword, kind) in KEYWORDS {
                    if self.eat_str(keyword) {
                        self.emit(kind);
                        return true;
                    }
                }
                return false;
            }
        }
        true
    }

    fn lex_number(&mut self) -> Step {
        if self.eat_str("inf") {
            self.emit(TokenKind::Inf);
            return self.pop();
        }
        if self.eat_while(|ch| ch.is_ascii_digit()) == 0 {
            return Err(self.expected("digit"));
        }
        if self.eat('.') {
            if self.eat_while(|ch| ch.is_ascii_digit()) == 0 {
                return Err(self.expected("digit"));
            }
            self.emit(TokenKind::Float);
        } else {
            self.emit(TokenKind::Integer);
        }
        self.pop()
    }

    fn lex_string(&mut self) -> Step {
        loop {
            match self.bump() {
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(self.expected("'\"'"));
                    }
                }
                Some('"') => {
                    self.emit(TokenKind::String);
                    return self.pop();
                }
                Some(_) => {}
                None => return Err(self.expected("'\"'")),
            }
        }
    }

    fn lex_blob(&mut self) -> Step {
        match self.peek() {
            Some(ch) if ch.is_ascii_hexdigit() => {
                self.bump();
                match self.peek() {
                    Some(ch) if ch.is_ascii_hexdigit() => {
                        self.bump();
                        self.emit(TokenKind::Byte);
                        self.then(State::Space, &[State::Blob])
                    }
                    Some(_) => {
                        self.bump();
                        Err(self.expected_pending("hexadecimal digit"))
                    }
                    None => Err(self.expected("hexadecimal digit")),
                }
            }
            Some('|') => {
                self.bump();
                self.emit(TokenKind::BlobClose);
                if self.concat_blobs {
                    return self.then(State::Space, &[State::BlobJoin]);
                }
                self.pop()
            }
            _ => Err(self.expected("byte or '|'")),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(Ok(token));
            }
            if let Some(err) = self.failed.take() {
                return Some(Err(err));
            }
            let state = self.state.take()?;
            match self.step(state) {
                Ok(next) => self.state = next,
                Err(err) => self.failed = Some(err),
            }
        }
    }
}

/// Returns `true` if `ch` may start a struct field name.
#[inline]
pub(crate) fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Returns `true` if `ch` may continue a struct field name.
#[inline]
pub(crate) fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub(crate) fn describe_char(ch: char) -> String {
    format!("{ch:?}")
}

pub(crate) fn describe_text(text: &str) -> String {
    if text.contains('`') {
        format!("{text:?}")
    } else {
        format!("`{text}`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .map(|token| token.unwrap().kind)
            .filter(|kind| !kind.is_trivia())
            .collect()
    }

    fn error(input: &str) -> DecodeError {
        Lexer::new(input)
            .find_map(|token| token.err())
            .unwrap_or_else(|| panic!("expected an error for {input:?}"))
    }

    #[test]
    fn test_primitives() {
        use TokenKind::*;
        assert_eq!(kinds("null"), vec![Null, Eof]);
        assert_eq!(kinds("true"), vec![True, Eof]);
        assert_eq!(kinds("false"), vec![False, Eof]);
        assert_eq!(kinds("nan"), vec![NaN, Eof]);
        assert_eq!(kinds("inf"), vec![Inf, Eof]);
        assert_eq!(kinds("-inf"), vec![Neg, Inf, Eof]);
        assert_eq!(kinds("+42"), vec![Pos, Integer, Eof]);
        assert_eq!(kinds("3.25"), vec![Float, Eof]);
        assert_eq!(kinds("\"a\\\"b\""), vec![String, Eof]);
        assert_eq!(kinds("| 01 fF |"), vec![BlobOpen, Byte, Byte, BlobClose, Eof]);
    }

    #[test]
    fn test_composites() {
        use TokenKind::*;
        assert_eq!(
            kinds("( 1: [], \"k\": {A: ()}, )"),
            vec![
                MapOpen, Integer, Assoc, ArrayOpen, ArrayClose, Sep, String, Assoc, StructOpen,
                Ident, Assoc, MapOpen, MapClose, StructClose, Sep, MapClose, Eof
            ]
        );
    }

    #[test]
    fn test_trivia_tokens() {
        let tokens: Vec<Token> = Lexer::new("#<block> <ann> 1 # tail")
            .map(|token| token.unwrap())
            .collect();
        let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::BlockComment,
                TokenKind::Space,
                TokenKind::Annotation,
                TokenKind::Space,
                TokenKind::Integer,
                TokenKind::Space,
                TokenKind::InlineComment,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[0].text, "#<block>");
        assert_eq!(tokens[2].text, "<ann>");
        assert_eq!(tokens[6].text, "# tail");
    }

    #[test]
    fn test_token_positions() {
        let tokens: Vec<Token> = Lexer::new("[\n\t\"x\",\n]")
            .map(|token| token.unwrap())
            .filter(|token| !token.kind.is_trivia())
            .collect();
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].span, Span::new(3, 6));
        assert_eq!(tokens[1].position.to_string(), "2:2");
        assert_eq!(tokens[3].position.to_string(), "3:1");
    }

    #[test]
    fn test_positions_match_line_index() {
        let input = "# größe\n{\n\tA: \"日本\", B: <ñ> [\r\n\t\ttrue, #<ü> |ff|, 1.5,\n],\n}";
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        for token in lexer.by_ref() {
            tokens.push(token.unwrap());
        }
        assert!(tokens.len() > 10);
        for token in &tokens {
            assert_eq!(token.position, lexer.locate(token.span.start), "{token:?}");
        }
        assert_eq!(lexer.position(), lexer.locate(input.len()));
    }

    #[test]
    fn test_long_line_error_column() {
        let count = 200_000;
        let mut input = String::from("[");
        for _ in 0..count {
            input.push_str("1,");
        }
        input.push('?');
        let err = error(&input);
        let column = 1 + 1 + count * 2;
        assert_eq!(
            err.to_string(),
            format!("1:{column}: expected value, got '?'")
        );
    }

    #[test]
    fn test_keyword_prefix_matching() {
        let err = error("truely");
        assert_eq!(err.to_string(), "1:5: expected end of file, got 'l'");
    }

    #[test]
    fn test_number_errors() {
        assert_eq!(error("+e3").to_string(), "1:2: expected digit, got 'e'");
        assert_eq!(error("+nan").to_string(), "1:2: expected digit, got 'n'");
        assert_eq!(error("1e3").to_string(), "1:2: expected end of file, got 'e'");
        assert_eq!(error("1.").to_string(), "1:3: expected digit, got end of file");
        assert!(error("-").is_eof());
    }

    #[test]
    fn test_blob_errors() {
        assert_eq!(error("|X0|").to_string(), "1:2: expected byte or '|', got 'X'");
        assert_eq!(
            error("|0X|").to_string(),
            "1:2: expected hexadecimal digit, got `0X`"
        );
        assert_eq!(
            error("| | | |").to_string(),
            "1:5: expected end of file, got '|'"
        );
    }

    #[test]
    fn test_blob_concatenation() {
        use TokenKind::*;
        let kinds: Vec<TokenKind> = Lexer::new("| 80 | | FF |")
            .with_blob_concatenation(true)
            .map(|token| token.unwrap().kind)
            .filter(|kind| !kind.is_trivia())
            .collect();
        assert_eq!(
            kinds,
            vec![BlobOpen, Byte, BlobClose, BlobOpen, Byte, BlobClose, Eof]
        );
    }

    #[test]
    fn test_unterminated() {
        let err = error("\"abc");
        assert!(err.is_eof());
        assert_eq!(err.to_string(), "1:5: expected '\"', got end of file");
        assert_eq!(error("#< open").to_string(), "1:8: expected '>', got end of file");
        assert_eq!(error("<open").to_string(), "1:6: expected '>', got end of file");
    }

    #[test]
    fn test_composite_key_is_invalid() {
        let err = error("([1]: 2)");
        assert!(matches!(err, DecodeError::InvalidMapKey { .. }));
        assert_eq!(err.to_string(), "1:2: expected primitive value, got '['");
    }

    #[test]
    fn test_stops_after_error() {
        let mut lexer = Lexer::new("[1 2]");
        let results: Vec<_> = lexer.by_ref().collect();
        assert!(results.last().unwrap().is_err());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_deep_nesting_uses_heap_stack() {
        let depth = 10_000;
        let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let count = Lexer::new(&input).filter(|token| token.is_ok()).count();
        assert_eq!(count, depth * 2 + 1);
    }

    #[test]
    fn test_stack_follows_nesting() {
        let mut shallow = Lexer::new("[1]");
        let mut deep = Lexer::new("[[[1]]]");
        while let Some(Ok(token)) = shallow.next() {
            if token.kind == TokenKind::Integer {
                break;
            }
        }
        while let Some(Ok(token)) = deep.next() {
            if token.kind == TokenKind::Integer {
                break;
            }
        }
        assert!(deep.stack_depth() > shallow.stack_depth());
    }
}
