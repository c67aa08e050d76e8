//! Contains the [`TokenSource`] struct, the narrow interface between the lexical
//! analyzer and the reduction pass.

use std::fmt::Debug;

use crate::base::{
    source_file::{SourceFile, SourceIterator},
    Handler,
};
use std::sync::Arc;

use super::{
    token::{Token, TokenizeError},
    Error,
};

/// A cursor over a source file that yields one [`Token`] per request.
///
/// Tokens are lexed on demand; the reduction pass pulls them one at a time and
/// never looks further ahead than the single token it has requested.
pub struct TokenSource<'a> {
    iter: SourceIterator<'a>,
    last: Option<Token>,
}

impl Debug for TokenSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSource")
            .field("source_file", self.iter.source_file())
            .field("last", &self.last)
            .finish()
    }
}

impl<'a> TokenSource<'a> {
    /// Creates a new [`TokenSource`] positioned at the start of the given source file.
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>) -> Self {
        Self {
            iter: source_file.iter(),
            last: None,
        }
    }

    /// Advances the cursor and returns the next token.
    ///
    /// Returns `Ok(None)` once the end of the source code is reached.
    ///
    /// # Errors
    /// - [`TokenizeError::FatalLexicalError`] - A fatal lexical error occurred. The
    ///   specific error has already been reported to the handler.
    pub fn next_token(
        &mut self,
        handler: &impl Handler<Error>,
    ) -> Result<Option<Token>, TokenizeError> {
        match Token::tokenize(&mut self.iter, handler) {
            Ok(token) => {
                self.last = Some(token.clone());
                Ok(Some(token))
            }
            Err(TokenizeError::EndOfSourceCodeIteratorArgument) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Returns the source file the cursor reads from.
    #[must_use]
    pub fn source_file(&self) -> &'a Arc<SourceFile> {
        self.iter.source_file()
    }

    /// Returns the text of the most recently returned token, if any.
    #[must_use]
    pub fn last_lexeme(&self) -> Option<&str> {
        self.last.as_ref().map(|token| token.span().str())
    }

    /// Rewinds the cursor to the start of the source file for reuse by later passes.
    pub fn reset(&mut self) {
        self.iter = self.iter.source_file().iter();
        self.last = None;
    }
}
