//! This module contains the parse-node sequence and the reduction pass for the language.

pub mod error;
pub mod parse_tree;
pub mod reducer;
pub mod typedef;
