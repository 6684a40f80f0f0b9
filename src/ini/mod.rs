mod reader;
mod scanner;
mod scope;
mod token;

pub use self::reader::*;
pub use self::token::*;

use std::io;

const COMMENT_MARKERS: [char; 2] = [';', '#'];
const QUOTE: char = '"';
const SEPARATOR: char = '=';
const SECTION_START: char = '[';
const SECTION_END: char = ']';

/// Everything that can go wrong while advancing an [`IniReader`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying stream failed; passed through untouched.
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The current line is structurally malformed.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// The structural error, if this isn't a stream failure
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Io(_) => None,
        }
    }
}

fn is_comment_marker(c: char) -> bool {
    COMMENT_MARKERS.contains(&c)
}
