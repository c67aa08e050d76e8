//! Frontend for a QuakeC-like language.
//!
//! The crate lexes a source file into raw tokens and reduces them in a single
//! pass into a flat sequence of tagged parse nodes, collecting `typedef`
//! aliases along the way. Later compilation stages consume the sequence and
//! the alias table; neither grammar validation nor code generation happens
//! here.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod lexical;
pub mod syntax;

use std::path::Path;

use base::{source_file::SourceFile, FileProvider, Handler, Result};
use lexical::{token::Token, token_source::TokenSource};
use syntax::reducer::{Reducer, Reduction};

/// Converts the given source file to tokens.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If a fatal lexical error occurs.
pub fn tokenize(
    handler: &impl Handler<lexical::Error>,
    provider: &impl FileProvider,
    path: &Path,
) -> Result<Vec<Token>> {
    let source_file = SourceFile::load(path, provider)?;
    let mut source = TokenSource::new(&source_file);

    let mut tokens = Vec::new();
    while let Some(token) = source.next_token(handler)? {
        tokens.push(token);
    }

    Ok(tokens)
}

/// Runs the reduction pass over the given source file.
///
/// Recoverable syntax errors are reported to the handler without failing the
/// pass; inspect the handler afterwards to distinguish a clean run from a
/// reported one.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If a fatal lexical error occurs.
pub fn parse<H>(handler: &H, provider: &impl FileProvider, path: &Path) -> Result<Reduction>
where
    H: Handler<lexical::Error> + Handler<syntax::error::Error>,
{
    let source_file = SourceFile::load(path, provider)?;
    let mut reducer = Reducer::new(&source_file);

    reducer.reduce(handler)
}
