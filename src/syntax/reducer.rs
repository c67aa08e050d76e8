//! Contains the [`Reducer`], the single-pass reduction driver that turns the
//! token stream into a flat [`ParseTree`].

use std::sync::Arc;

use getset::Getters;

use crate::{
    base::{self, source_file::SourceFile, Handler},
    lexical::{
        self,
        token::{KeywordKind, Token, TokenizeError},
        token_source::TokenSource,
    },
    syntax::error::{Error, SyntaxKind, UnexpectedSyntax},
};

use super::{
    parse_tree::{ParseKind, ParseTree},
    typedef::TypedefTable,
};

/// The output of one reduction pass over one source file.
#[derive(Debug, Getters)]
pub struct Reduction {
    /// Get the parse-node sequence produced by the pass.
    #[get = "pub"]
    tree: ParseTree,

    /// Get the `typedef` aliases collected during the pass.
    #[get = "pub"]
    typedefs: TypedefTable,
}

impl Reduction {
    /// Dissolves the [`Reduction`] into its components.
    #[must_use]
    pub fn dissolve(self) -> (ParseTree, TypedefTable) {
        (self.tree, self.typedefs)
    }
}

/// The single-pass reduction driver.
///
/// The driver pulls tokens from its [`TokenSource`] one at a time, dispatches
/// on the token kind and appends tagged nodes to the parse tree. It performs
/// no grammar validation beyond the checks described on [`Reducer::reduce`];
/// tokens with no registered reduction fall through silently.
#[derive(Debug)]
pub struct Reducer<'a> {
    source: TokenSource<'a>,
}

impl<'a> Reducer<'a> {
    /// Creates a new [`Reducer`] over the given source file.
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>) -> Self {
        Self {
            source: TokenSource::new(source_file),
        }
    }

    /// Runs the reduction pass to completion.
    ///
    /// The pass consumes the token source until end-of-input or a fatal
    /// lexical error. Recoverable syntax errors (an `if` without a following
    /// `(`, a malformed `typedef` run) are reported to the handler and do not
    /// stop the pass. The tree dump is rendered and the token source is
    /// rewound on every exit path, so later passes always observe a source
    /// positioned at the start.
    ///
    /// # Errors
    /// - [`base::Error::TokenizeError`] - A fatal lexical error terminated the pass.
    #[tracing::instrument(level = "debug", skip_all, fields(source_file = %self.source.source_file().path().display()))]
    pub fn reduce<H>(&mut self, handler: &H) -> base::Result<Reduction>
    where
        H: Handler<lexical::Error> + Handler<Error>,
    {
        let mut tree = ParseTree::new();
        let mut typedefs = TypedefTable::new();

        let outcome = self.run(&mut tree, &mut typedefs, handler);

        // Dump and rewind happen regardless of how the loop exited.
        tracing::debug!("parse tree dump:\n{}", tree.dump());
        self.source.reset();

        outcome?;

        Ok(Reduction { tree, typedefs })
    }

    /// The main reduction loop. At the top of every iteration exactly one
    /// freshly requested token is pending dispatch.
    fn run<H>(
        &mut self,
        tree: &mut ParseTree,
        typedefs: &mut TypedefTable,
        handler: &H,
    ) -> base::Result<()>
    where
        H: Handler<lexical::Error> + Handler<Error>,
    {
        while let Some(token) = self.source.next_token(handler)? {
            match token {
                Token::Keyword(keyword) => match keyword.keyword {
                    KeywordKind::If => self.reduce_structural(tree, ParseKind::If, true, handler)?,
                    KeywordKind::Else => {
                        self.reduce_structural(tree, ParseKind::Else, false, handler)?;
                    }
                    KeywordKind::For => {
                        self.reduce_structural(tree, ParseKind::For, false, handler)?;
                    }
                    KeywordKind::Typedef => self.reduce_typedef(typedefs, handler)?,
                    simple => self.reduce_simple(tree, simple_keyword_kind(simple), handler)?,
                },
                Token::Identifier(identifier) => {
                    // No node for identifiers; the lexeme only goes out on the
                    // diagnostic side channel. The following token is consumed
                    // uninspected.
                    tracing::debug!(identifier = identifier.span.str(), "skipping identifier");
                    let _ = self.source.next_token(handler)?;
                }
                Token::Punctuation(punctuation) => match punctuation.punctuation {
                    '&' => self.reduce_compound(
                        tree,
                        '&',
                        ParseKind::LogicalAnd,
                        ParseKind::BitAnd,
                        handler,
                    )?,
                    '|' => self.reduce_compound(
                        tree,
                        '|',
                        ParseKind::LogicalOr,
                        ParseKind::BitOr,
                        handler,
                    )?,
                    '!' => self.reduce_compound(
                        tree,
                        '=',
                        ParseKind::NotEqual,
                        ParseKind::LogicalNot,
                        handler,
                    )?,
                    '<' => self.reduce_compound(
                        tree,
                        '=',
                        ParseKind::LessEqual,
                        ParseKind::Less,
                        handler,
                    )?,
                    '>' => self.reduce_compound(
                        tree,
                        '=',
                        ParseKind::GreaterEqual,
                        ParseKind::Greater,
                        handler,
                    )?,
                    '=' => self.reduce_compound(
                        tree,
                        '=',
                        ParseKind::EqualEqual,
                        ParseKind::Assign,
                        handler,
                    )?,
                    ';' => self.reduce_single(tree, ParseKind::Done, handler)?,
                    '-' => self.reduce_single(tree, ParseKind::Minus, handler)?,
                    '+' => self.reduce_single(tree, ParseKind::Add, handler)?,
                    '(' => self.reduce_single(tree, ParseKind::OpenParen, handler)?,
                    ')' => self.reduce_single(tree, ParseKind::CloseParen, handler)?,
                    '{' => self.reduce_single(tree, ParseKind::OpenBlock, handler)?,
                    '}' => self.reduce_single(tree, ParseKind::CloseBlock, handler)?,
                    other => {
                        tracing::trace!(punctuation = %other, "no reduction for punctuation");
                    }
                },
                // Deliberate laxity: tokens with no reduction fall through
                // without a node and without a report.
                other => tracing::trace!(token = ?other, "no reduction for token"),
            }
        }

        Ok(())
    }

    /// Reduces a structural keyword (`if`, `else`, `for`).
    ///
    /// Whitespace following the keyword is skipped. When `require_paren` is
    /// set the first non-whitespace token must be `(`; a mismatch is reported
    /// but the keyword node is appended either way, and the checked token is
    /// consumed without emission.
    fn reduce_structural<H>(
        &mut self,
        tree: &mut ParseTree,
        kind: ParseKind,
        require_paren: bool,
        handler: &H,
    ) -> Result<(), TokenizeError>
    where
        H: Handler<lexical::Error> + Handler<Error>,
    {
        let mut token = self.source.next_token(handler)?;
        while matches!(&token, Some(Token::WhiteSpaces(_))) {
            token = self.source.next_token(handler)?;
        }

        if require_paren
            && !matches!(&token, Some(Token::Punctuation(p)) if p.punctuation == '(')
        {
            handler.receive(Error::UnexpectedSyntax(UnexpectedSyntax {
                expected: SyntaxKind::Punctuation('('),
                found: token,
            }));
        }

        tree.push(kind);
        Ok(())
    }

    /// Reduces a simple keyword: the token immediately following the keyword
    /// is consumed uninspected and the keyword node is appended.
    fn reduce_simple(
        &mut self,
        tree: &mut ParseTree,
        kind: ParseKind,
        handler: &impl Handler<lexical::Error>,
    ) -> Result<(), TokenizeError> {
        let _ = self.source.next_token(handler)?;
        tree.push(kind);
        Ok(())
    }

    /// Reduces a single-character punctuation with no compound form: one more
    /// token is consumed and the node is appended.
    fn reduce_single(
        &mut self,
        tree: &mut ParseTree,
        kind: ParseKind,
        handler: &impl Handler<lexical::Error>,
    ) -> Result<(), TokenizeError> {
        let _ = self.source.next_token(handler)?;
        tree.push(kind);
        Ok(())
    }

    /// Disambiguates a punctuation character with a possible two-character
    /// form using exactly one token of lookahead.
    ///
    /// The lookahead token is consumed whether or not it completes the
    /// compound operator; a non-matching lookahead is never handed back to
    /// the outer dispatch. A completed compound consumes one further token to
    /// advance past the operator.
    fn reduce_compound(
        &mut self,
        tree: &mut ParseTree,
        continuation: char,
        compound: ParseKind,
        single: ParseKind,
        handler: &impl Handler<lexical::Error>,
    ) -> Result<(), TokenizeError> {
        let lookahead = self.source.next_token(handler)?;

        if matches!(&lookahead, Some(Token::Punctuation(p)) if p.punctuation == continuation) {
            let _ = self.source.next_token(handler)?;
            tree.push(compound);
        } else {
            tree.push(single);
        }

        Ok(())
    }

    /// Reduces a `typedef` declaration with the local rule
    /// `'typedef' IDENT (IDENT | TYPE_KEYWORD) ';'`, skipping whitespace and
    /// comments between significant tokens.
    ///
    /// Token kinds are validated before any name is bound: on a mismatch the
    /// error is reported, nothing is registered and the pass continues. No
    /// node is appended for the declaration; the trailing `;` belongs to the
    /// rule and does not produce a statement-end node.
    fn reduce_typedef<H>(
        &mut self,
        typedefs: &mut TypedefTable,
        handler: &H,
    ) -> Result<(), TokenizeError>
    where
        H: Handler<lexical::Error> + Handler<Error>,
    {
        let alias = match self.next_significant(handler)? {
            Some(Token::Identifier(identifier)) => identifier,
            found => {
                handler.receive(Error::UnexpectedSyntax(UnexpectedSyntax {
                    expected: SyntaxKind::Identifier,
                    found,
                }));
                return Ok(());
            }
        };

        // The underlying name is either an identifier (an earlier alias) or
        // one of the built-in type keywords.
        let underlying = match self.next_significant(handler)? {
            Some(Token::Identifier(identifier)) => identifier.span,
            Some(Token::Keyword(keyword)) if keyword.keyword.is_type() => keyword.span,
            found => {
                handler.receive(Error::UnexpectedSyntax(UnexpectedSyntax {
                    expected: SyntaxKind::Identifier,
                    found,
                }));
                return Ok(());
            }
        };

        match self.next_significant(handler)? {
            Some(Token::Punctuation(p)) if p.punctuation == ';' => {
                typedefs.register(alias.span.str(), underlying.str());
            }
            found => {
                handler.receive(Error::UnexpectedSyntax(UnexpectedSyntax {
                    expected: SyntaxKind::Punctuation(';'),
                    found,
                }));
            }
        }

        Ok(())
    }

    /// Requests tokens until one that is neither whitespace nor a comment is
    /// found.
    fn next_significant(
        &mut self,
        handler: &impl Handler<lexical::Error>,
    ) -> Result<Option<Token>, TokenizeError> {
        loop {
            match self.source.next_token(handler)? {
                Some(Token::WhiteSpaces(_) | Token::Comment(_)) => {}
                other => return Ok(other),
            }
        }
    }
}

/// Maps a simple keyword to its parse tag.
fn simple_keyword_kind(keyword: KeywordKind) -> ParseKind {
    match keyword {
        KeywordKind::Do => ParseKind::Do,
        KeywordKind::While => ParseKind::While,
        KeywordKind::Break => ParseKind::Break,
        KeywordKind::Continue => ParseKind::Continue,
        KeywordKind::Return => ParseKind::Return,
        KeywordKind::Goto => ParseKind::Goto,
        KeywordKind::Void => ParseKind::Void,
        KeywordKind::String => ParseKind::String,
        KeywordKind::Float => ParseKind::Float,
        KeywordKind::Vector => ParseKind::Vector,
        KeywordKind::Entity => ParseKind::Entity,
        KeywordKind::If | KeywordKind::Else | KeywordKind::For | KeywordKind::Typedef => {
            unreachable!("handled by dedicated reductions")
        }
    }
}
