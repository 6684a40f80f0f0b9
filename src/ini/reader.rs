use std::fmt;
use std::io::{self, BufRead};

use log::{debug, trace};

use super::scanner::LineScanner;
use super::scope::SectionScope;
use super::{
    is_comment_marker, Error, Token, TokenKind, QUOTE, SECTION_END, SECTION_START, SEPARATOR,
};

type ParseResult<T> = Result<T, ParseError>;

/// A structurally malformed line, with the 1-based position it was detected at.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{line}:{col} {kind}")]
pub struct ParseError {
    pub(crate) line: usize,
    pub(crate) col: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: usize, col: usize, kind: ParseErrorKind) -> Self {
        Self { line, col, kind }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected ']' as end of section header, but found end of line")]
    UnterminatedSection,
    #[error("expected '\"' as end of quoted value, but found end of line")]
    UnterminatedQuote,
    #[error("expected '=' after key, but found end of line")]
    MissingEquals,
    #[error("section {0:?} already defined")]
    DuplicateSectionName(String),
    #[error("key {0:?} already defined in this section")]
    DuplicateKeyName(String),
}

/// Lifecycle of an [`IniReader`]. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReadState {
    #[default]
    Initial,
    Interactive,
    EndOfFile,
}

/// 1-based line and column
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Pull-based tokenizer over a line-sequential character stream.
///
/// Every successful [`read()`](Self::read) classifies one line and replaces
/// the current [`Token`]. A [`ParseError`] only aborts the line it was found
/// on: the reader has already moved past it, so the next `read()` continues
/// with the following line.
#[derive(Debug)]
pub struct IniReader<R> {
    source: Option<R>,
    buf: Vec<u8>,
    token: Token,
    state: ReadState,
    line: usize,
    column: usize,
    scope: SectionScope,
    ignore_comments: bool,
}

impl<R: BufRead> IniReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source: Some(source),
            buf: Vec::new(),
            token: Token::default(),
            state: ReadState::Initial,
            line: 1,
            column: 1,
            scope: SectionScope::default(),
            ignore_comments: false,
        }
    }

    /// Advances to the next line.
    ///
    /// Returns `Ok(false)` once the stream is exhausted (or the reader was
    /// closed), and keeps doing so on every further call. A line that isn't
    /// valid UTF-8 fails with an [`io::ErrorKind::InvalidData`] error and is
    /// skipped like a malformed one. Any other stream failure ends the reader.
    pub fn read(&mut self) -> Result<bool, Error> {
        if self.state == ReadState::EndOfFile {
            return Ok(false);
        }

        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        let res = self.read_line(&mut buf);
        self.buf = buf;

        res
    }

    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<bool, Error> {
        let Some(source) = self.source.as_mut() else {
            self.state = ReadState::EndOfFile;
            return Ok(false);
        };

        let read = match source.read_until(b'\n', buf) {
            Ok(read) => read,
            Err(e) => {
                debug!("Stream failed at {}, stopping: {e}", Self::position(self));
                self.state = ReadState::EndOfFile;
                return Err(e.into());
            }
        };
        if read == 0 {
            debug!("Reached end of stream at {}", Self::position(self));
            self.state = ReadState::EndOfFile;
            return Ok(false);
        }

        let (content, terminated) = match buf.strip_suffix(b"\n") {
            Some(content) => (content.strip_suffix(b"\r").unwrap_or(content), true),
            None => (buf.as_slice(), false),
        };

        let content = match std::str::from_utf8(content) {
            Ok(content) => content,
            Err(e) => {
                let err = io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("line {} is not valid UTF-8: {e}", self.line),
                );
                self.finish_line(terminated, 1);
                return Err(err.into());
            }
        };

        let mut scanner = LineScanner::new(content);
        let res = self.parse_line(&mut scanner);

        // move past the line, whether it was well-formed or not
        self.finish_line(terminated, scanner.column());

        let mut token = res.inspect_err(|e| debug!("Failed reading line: {e}"))?;
        if self.ignore_comments {
            token.comment = None;
        }
        trace!("Read {token:?}");

        self.token = token;
        if self.state == ReadState::Initial {
            self.state = ReadState::Interactive;
        }

        Ok(true)
    }

    fn finish_line(&mut self, terminated: bool, column: usize) {
        if terminated {
            self.line += 1;
            self.column = 1;
        } else {
            self.column = column;
        }
    }

    #[cold]
    fn error(&self, scanner: &LineScanner<'_>, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.line, scanner.column(), kind)
    }

    // LINE      = BLANK | COMMENT | SECTION | KEY_VALUE
    // COMMENT   = WS* (';' | '#') ANY*
    fn parse_line(&mut self, scanner: &mut LineScanner<'_>) -> ParseResult<Token> {
        scanner.skip_whitespace();

        match scanner.peek() {
            None => Ok(Token::empty(None)),
            Some(c) if is_comment_marker(c) => Ok(Token::empty(scanner.parse_trailing_comment())),
            Some(SECTION_START) => self.parse_section(scanner),
            Some(_) => self.parse_key_value(scanner),
        }
    }

    // SECTION   = '[' NAME ']' WS* COMMENT?
    fn parse_section(&mut self, scanner: &mut LineScanner<'_>) -> ParseResult<Token> {
        scanner.bump();

        let name = scanner.parse_until_any_of(&[SECTION_END]);
        if scanner.peek() != Some(SECTION_END) {
            scanner.bump();
            return Err(self.error(scanner, ParseErrorKind::UnterminatedSection));
        }

        let name = name.trim();
        if self.scope.has_section(name) {
            return Err(self.error(
                scanner,
                ParseErrorKind::DuplicateSectionName(name.to_owned()),
            ));
        }
        scanner.bump();

        let comment = scanner.parse_trailing_comment();
        self.scope.enter_section(name);

        Ok(Token::section(name, comment))
    }

    // KEY_VALUE = NAME WS* '=' WS* VALUE WS* COMMENT?
    fn parse_key_value(&mut self, scanner: &mut LineScanner<'_>) -> ParseResult<Token> {
        let name = scanner.parse_unquoted_until(|c| c == SEPARATOR);
        if scanner.peek().is_none() {
            scanner.bump();
            return Err(self.error(scanner, ParseErrorKind::MissingEquals));
        }

        let name = name.trim();
        if self.scope.has_key(name) {
            return Err(self.error(scanner, ParseErrorKind::DuplicateKeyName(name.to_owned())));
        }
        scanner.bump();
        scanner.skip_whitespace();

        let (value, comment) = if scanner.peek() == Some(QUOTE) {
            self.parse_quoted_value(scanner)?
        } else {
            let value = scanner.parse_unquoted_until(is_comment_marker);
            (value.trim().to_owned(), scanner.parse_trailing_comment())
        };
        self.scope.add_key(name);

        Ok(Token::key(name, value, comment))
    }

    // VALUE     = '"' ANY* '"' | ANY*
    fn parse_quoted_value(
        &self,
        scanner: &mut LineScanner<'_>,
    ) -> ParseResult<(String, Option<String>)> {
        scanner.bump();

        // taken verbatim, no trimming
        let value = scanner.parse_until_any_of(&[QUOTE]);
        if scanner.bump() != Some(QUOTE) {
            return Err(self.error(scanner, ParseErrorKind::UnterminatedQuote));
        }

        Ok((value, scanner.parse_trailing_comment()))
    }

    /// Reads until a section header was read.
    ///
    /// Returns `Ok(false)` if the stream ended first.
    pub fn skip_to_next_section(&mut self) -> Result<bool, Error> {
        while self.read()? {
            if self.token.kind == TokenKind::Section {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Reads until a key was read, but stops at the next section header.
    ///
    /// Returns `Ok(false)` when a section header or the end of the stream
    /// comes first. The section header is consumed and becomes the current
    /// token, so calling this again continues with the keys of that section.
    pub fn skip_to_next_key(&mut self) -> Result<bool, Error> {
        while self.read()? {
            match self.token.kind {
                TokenKind::Key => return Ok(true),
                TokenKind::Section => return Ok(false),
                TokenKind::Empty => {}
            }
        }

        Ok(false)
    }

    /// Releases the underlying stream. Calling it again does nothing.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            debug!("Closed reader at {}", Self::position(self));
        }
        self.state = ReadState::EndOfFile;
    }
}

impl<R> IniReader<R> {
    pub fn read_state(&self) -> ReadState {
        self.state
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    pub fn name(&self) -> &str {
        self.token.name()
    }

    pub fn value(&self) -> &str {
        self.token.value()
    }

    pub fn comment(&self) -> Option<&str> {
        self.token.comment()
    }

    pub fn ignore_comments(&self) -> bool {
        self.ignore_comments
    }

    /// Report every token read from now on without a comment.
    pub fn set_ignore_comments(&mut self, ignore: bool) {
        self.ignore_comments = ignore;
    }

    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn line_position(&self) -> usize {
        self.column
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }
}

impl<R: BufRead> Iterator for IniReader<R> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read() {
            Ok(true) => Some(Ok(self.token.clone())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
