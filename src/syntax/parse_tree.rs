//! Contains the [`ParseTree`] sequence and its node types.
//!
//! Despite the name, the parse tree is not hierarchical: it is a flat,
//! append-only sequence of tagged nodes in emission order. Later stages walk
//! it front to back; nothing may delete or reorder nodes once appended.

use std::fmt::Write;

use getset::CopyGetters;
use strum_macros::EnumIter;

/// The closed enumeration of tags a parse node can carry.
///
/// [`ParseKind::Sentinel`] is reserved for the root node that every sequence
/// starts with; it is never emitted for source code and consumers walking the
/// sequence for content must skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum ParseKind {
    Sentinel,
    Do,
    Else,
    If,
    While,
    Break,
    Continue,
    Return,
    Goto,
    For,
    Void,
    String,
    Float,
    Vector,
    Entity,
    LogicalAnd,
    LogicalOr,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    NotEqual,
    Comma,
    LogicalNot,
    Star,
    Divide,
    OpenParen,
    CloseParen,
    Minus,
    Add,
    Assign,
    OpenSubscript,
    CloseSubscript,
    OpenBlock,
    CloseBlock,
    Ellipsis,
    Dot,
    Less,
    Greater,
    BitAnd,
    BitOr,
    Done,
}

impl ParseKind {
    /// The fixed dump line for this tag, or [`None`] for tags the dumper has
    /// no classification for.
    ///
    /// The texts (including the `SEPERATOR` spelling) are kept verbatim for
    /// compatibility with existing tooling that scrapes the dump output.
    #[must_use]
    pub const fn classification(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("OPERATOR:  ADD"),
            Self::BitAnd => Some("OPERATOR:  BITAND"),
            Self::BitOr => Some("OPERATOR:  BITOR"),
            Self::Comma => Some("OPERATOR:  SEPERATOR"),
            Self::Dot => Some("OPERATOR:  DOT"),
            Self::Divide => Some("OPERATOR:  DIVIDE"),
            Self::Assign => Some("OPERATOR:  ASSIGNMENT"),

            Self::Break => Some("STATEMENT: BREAK"),
            Self::Continue => Some("STATEMENT: CONTINUE"),
            Self::Goto => Some("STATEMENT: GOTO"),

            Self::Ellipsis => Some("DECLTYPE:  VALIST"),
            Self::Entity => Some("DECLTYPE:  ENTITY"),
            Self::Float => Some("DECLTYPE:  FLOAT"),

            Self::Greater => Some("TEST:      GREATER THAN"),
            Self::Less => Some("TEST:      LESS THAN"),
            Self::GreaterEqual => Some("TEST:      GREATER THAN OR EQUAL"),
            Self::LessEqual => Some("TEST:      LESS THAN OR EQUAL"),
            Self::NotEqual => Some("TEST:      NOT EQUAL"),
            Self::EqualEqual => Some("TEST:      EQUAL-EQUAL"),

            Self::OpenBlock => Some("BLOCK:     BEG"),
            Self::CloseBlock => Some("BLOCK:     END"),
            Self::Else => Some("BLOCK:     ELSE"),
            Self::If => Some("BLOCK:     IF"),

            Self::LogicalAnd => Some("LOGICAL:   AND"),
            Self::LogicalNot => Some("LOGICAL:   NOT"),
            Self::LogicalOr => Some("LOGICAL:   OR"),

            Self::OpenParen => Some("PARTH:     BEG"),
            Self::CloseParen => Some("PARTH:     END"),

            Self::For => Some("LOOP:      FOR"),
            Self::Do => Some("LOOP:      DO"),

            Self::Sentinel
            | Self::While
            | Self::Return
            | Self::Void
            | Self::String
            | Self::Vector
            | Self::Minus
            | Self::Star
            | Self::OpenSubscript
            | Self::CloseSubscript
            | Self::Done => None,
        }
    }
}

/// The atomic unit of reduction output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, CopyGetters)]
pub struct ParseNode {
    /// Get the tag of the node. Immutable once the node is appended.
    #[get_copy = "pub"]
    kind: ParseKind,
}

/// An append-only sequence of [`ParseNode`]s with a sentinel root.
///
/// The root node exists before any token is read and carries
/// [`ParseKind::Sentinel`]; it is not semantic content. Nodes keep their tag
/// and their position relative to their siblings for the lifetime of the
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
}

impl Default for ParseTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseTree {
    /// Creates a sequence containing only the sentinel root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![ParseNode {
                kind: ParseKind::Sentinel,
            }],
        }
    }

    /// Appends a node with the given tag to the end of the sequence.
    pub fn push(&mut self, kind: ParseKind) {
        self.nodes.push(ParseNode { kind });
    }

    /// All nodes in emission order, including the sentinel root.
    #[must_use]
    pub fn nodes(&self) -> &[ParseNode] {
        &self.nodes
    }

    /// Iterates over the content nodes in emission order, skipping sentinels.
    pub fn content(&self) -> impl Iterator<Item = &ParseNode> {
        self.nodes
            .iter()
            .filter(|node| node.kind() != ParseKind::Sentinel)
    }

    /// The number of content nodes in the sequence (the sentinel root excluded).
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.content().count()
    }

    /// Renders the diagnostic dump of the sequence.
    ///
    /// One fixed line is printed per classified content node; sentinel nodes
    /// and nodes without a registered classification are skipped silently.
    /// The sequence itself is never mutated.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut output = String::new();

        for node in self.content() {
            if let Some(line) = node.kind().classification() {
                writeln!(output, "{line}").expect("writing to a string cannot fail");
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::ParseKind;

    const CATEGORIES: [&str; 8] = [
        "OPERATOR:",
        "STATEMENT:",
        "DECLTYPE:",
        "TEST:",
        "BLOCK:",
        "LOGICAL:",
        "PARTH:",
        "LOOP:",
    ];

    #[test]
    fn classifications_use_known_categories() {
        for kind in ParseKind::iter() {
            if let Some(line) = kind.classification() {
                assert!(
                    CATEGORIES
                        .iter()
                        .any(|category| line.starts_with(category)),
                    "unknown category for {kind:?}: {line}"
                );
            }
        }
    }

    #[test]
    fn sentinel_is_never_classified() {
        assert!(ParseKind::Sentinel.classification().is_none());
    }
}
