use std::fmt::Display;

use crate::base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

/// Represents an error that occurred during the lexical analysis of the source code.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum Error {
    #[error("Comment is not terminated.")]
    UnterminatedDelimitedComment(#[from] UnterminatedDelimitedComment),
    #[error("String literal is not terminated.")]
    UnterminatedStringLiteral(#[from] UnterminatedStringLiteral),
    #[error("Character is not valid in the source code.")]
    InvalidCharacter(#[from] InvalidCharacter),
}

/// Source code contains an unclosed `/*` comment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub struct UnterminatedDelimitedComment {
    /// Span of the unclosed `/*` that starts the comment.
    pub span: Span,
}

impl Display for UnterminatedDelimitedComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unclosed `/*` comment"),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// Source code contains an unclosed `"` string literal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub struct UnterminatedStringLiteral {
    /// Span of the `"` that starts the literal.
    pub span: Span,
}

impl Display for UnterminatedStringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unclosed `\"` string literal"),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// Source code contains a character that cannot start any token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub struct InvalidCharacter {
    /// Span of the offending character.
    pub span: Span,
}

impl Display for InvalidCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found a character that cannot start a token"),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}
