//! A streaming, pull-based reader for INI documents.
//!
//! ```
//! use ini_reader::{IniReader, TokenKind};
//!
//! let mut reader = IniReader::new("[Logging] ; logging section\nlevel = debug\n".as_bytes());
//!
//! assert!(reader.read().unwrap());
//! assert_eq!(reader.kind(), TokenKind::Section);
//! assert_eq!(reader.name(), "Logging");
//! assert_eq!(reader.comment(), Some("logging section"));
//!
//! assert!(reader.read().unwrap());
//! assert_eq!(reader.kind(), TokenKind::Key);
//! assert_eq!(reader.value(), "debug");
//!
//! assert!(!reader.read().unwrap());
//! ```

mod ini;

pub use self::ini::*;
