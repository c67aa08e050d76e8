//! The lexical module contains the lexical analyzer for the language.

pub mod token;
pub mod token_source;

mod error;
#[doc(inline)]
pub use error::Error;
