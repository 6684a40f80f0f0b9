use std::str::Chars;

use super::{is_comment_marker, QUOTE};

/// Character cursor over the content of one line, terminator excluded.
///
/// `column` is 1-based and advances once for every character read, whatever
/// the caller does with it. Reading past the last character reads the line
/// terminator, which advances it exactly once more.
#[derive(Debug)]
pub(crate) struct LineScanner<'a> {
    cur: Option<char>,
    buf: Chars<'a>,
    column: usize,
    read_terminator: bool,
}

impl<'a> LineScanner<'a> {
    pub(crate) fn new(line: &'a str) -> Self {
        let mut buf = line.chars();
        Self {
            cur: buf.next(),
            buf,
            column: 1,
            read_terminator: false,
        }
    }

    pub(crate) fn column(&self) -> usize {
        self.column
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.cur
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.cur;
        match c {
            Some(..) => {
                self.cur = self.buf.next();
                self.column += 1;
            }
            None if !self.read_terminator => {
                self.read_terminator = true;
                self.column += 1;
            }
            None => {}
        }
        c
    }

    // stops in front of the first char matching `is_end`, or at the end of the line
    fn parse_until<F: Fn(char) -> bool>(&mut self, is_end: F) -> String {
        let mut s = String::new();

        while let Some(c) = self.cur {
            if is_end(c) {
                break;
            }
            s.push(c);
            self.bump();
        }

        s
    }

    pub(crate) fn parse_until_any_of(&mut self, end: &[char]) -> String {
        self.parse_until(|c| end.contains(&c))
    }

    /// Like `parse_until_any_of`, but chars between a pair of `"` never end
    /// the text. The quotes are kept.
    pub(crate) fn parse_unquoted_until<F: Fn(char) -> bool>(&mut self, is_end: F) -> String {
        let mut s = String::new();
        let mut quoted = false;

        while let Some(c) = self.cur {
            if !quoted && is_end(c) {
                break;
            }
            if c == QUOTE {
                quoted = !quoted;
            }
            s.push(c);
            self.bump();
        }

        s
    }

    pub(crate) fn parse_rest(&mut self) -> String {
        self.parse_until(|_| false)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(c) = self.cur {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    /// Text after the next comment marker, trimmed. Anything in front of the
    /// marker is dropped.
    pub(crate) fn parse_trailing_comment(&mut self) -> Option<String> {
        self.parse_until(is_comment_marker);
        self.bump()?;
        Some(self.parse_rest().trim().to_owned())
    }
}
