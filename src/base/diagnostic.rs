use std::{cell::Cell, fmt::Display};

/// Represents a trait responsible for handling diagnostics in the compiler.
pub trait Handler<T> {
    /// Receive an error and handles it.
    fn receive(&self, error: T);
}

/// A [`Handler`] that prints every received error to stderr.
#[derive(Debug, Default)]
pub struct PrintHandler {
    printed: Cell<bool>,
}

impl PrintHandler {
    /// Creates a new [`PrintHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any error has been printed so far.
    #[must_use]
    pub fn has_printed(&self) -> bool {
        self.printed.get()
    }
}

impl<E: Display> Handler<E> for PrintHandler {
    fn receive(&self, error: E) {
        eprintln!("{error}");
        self.printed.set(true);
    }
}

/// A [`Handler`] that only records whether an error has been received.
#[derive(Debug, Default)]
pub struct SilentHandler {
    received: Cell<bool>,
}

impl SilentHandler {
    /// Creates a new [`SilentHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any error has been received so far.
    #[must_use]
    pub fn has_received(&self) -> bool {
        self.received.get()
    }
}

impl<E> Handler<E> for SilentHandler {
    fn receive(&self, _error: E) {
        self.received.set(true);
    }
}

/// A [`Handler`] that ignores every received error.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidHandler;

impl<E> Handler<E> for VoidHandler {
    fn receive(&self, _error: E) {}
}
