//! The base module contains functionality shared by all compilation stages.

pub mod source_file;

mod error;
#[doc(inline)]
pub use error::{Error, Result};

mod diagnostic;
pub use diagnostic::{Handler, PrintHandler, SilentHandler, VoidHandler};

mod file_provider;
pub use file_provider::{FileProvider, FsProvider, MemoryProvider};

pub mod log;
