/// What kind of line a [`Token`] was produced from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TokenKind {
    /// A blank or comment-only line
    #[default]
    Empty,
    /// `[name]`
    Section,
    /// `name = value`
    Key,
}

/// The most recently produced structural event of an [`IniReader`](super::IniReader).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) comment: Option<String>,
}

impl Token {
    pub(crate) fn empty(comment: Option<String>) -> Self {
        Self {
            comment,
            ..Self::default()
        }
    }

    pub(crate) fn section<S: Into<String>>(name: S, comment: Option<String>) -> Self {
        Self {
            kind: TokenKind::Section,
            name: name.into(),
            value: String::new(),
            comment,
        }
    }

    pub(crate) fn key<K, V>(name: K, value: V, comment: Option<String>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            kind: TokenKind::Key,
            name: name.into(),
            value: value.into(),
            comment,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Section or key name; `""` for [`TokenKind::Empty`]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key value; `""` for sections and empty lines
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Text after a comment marker, trimmed.
    ///
    /// `Some("")` for a bare marker, `None` if the line had no comment at all.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod impl_default {
        use super::*;

        #[test]
        fn values() {
            let token = Token::default();

            assert_eq!(token.kind(), TokenKind::Empty);
            assert_eq!(token.name(), "");
            assert_eq!(token.value(), "");
            assert_eq!(token.comment(), None);
        }
    }

    mod section {
        use super::*;

        #[test]
        fn has_empty_value() {
            let token = Token::section("Pets", Some("pets comment".into()));

            assert_eq!(token.kind(), TokenKind::Section);
            assert_eq!(token.name(), "Pets");
            assert_eq!(token.value(), "");
            assert_eq!(token.comment(), Some("pets comment"));
        }
    }
}
