//! Contains the [`TypedefTable`] mapping type aliases to their underlying type names.

use std::collections::HashMap;

/// A table of `typedef` declarations collected during one reduction pass.
///
/// Entries are created by the reducer and never removed; later compilation
/// stages query the table to resolve alias names. Registration performs no
/// duplicate detection and no validation that the underlying name denotes a
/// real type; a later registration for the same alias simply wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypedefTable {
    aliases: HashMap<String, String>,
}

impl TypedefTable {
    /// Creates an empty [`TypedefTable`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an alias for the given underlying type name.
    pub fn register<A, U>(&mut self, alias: A, underlying: U)
    where
        A: Into<String>,
        U: Into<String>,
    {
        self.aliases.insert(alias.into(), underlying.into());
    }

    /// Looks up the underlying type name for the given alias.
    #[must_use]
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// The number of registered aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether the table contains no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
