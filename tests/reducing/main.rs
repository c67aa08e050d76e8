use std::path::Path;

use qcparse::{
    base::{source_file::SourceFile, Error, MemoryProvider, SilentHandler},
    lexical::token::TokenizeError,
    syntax::{
        parse_tree::{ParseKind, ParseTree},
        reducer::{Reducer, Reduction},
    },
};

fn reduce_source(source: &str) -> (Reduction, SilentHandler) {
    let mut provider = MemoryProvider::new();
    provider.add_file("test.qc", source);

    let handler = SilentHandler::new();
    let reduction =
        qcparse::parse(&handler, &provider, Path::new("test.qc")).expect("Failed to reduce");

    (reduction, handler)
}

fn content_kinds(tree: &ParseTree) -> Vec<ParseKind> {
    tree.content().map(|node| node.kind()).collect()
}

#[test]
fn reducing_test1() {
    let source = include_str!("./test1.qc");
    let (reduction, handler) = reduce_source(source);

    assert!(!handler.has_received());

    assert_eq!(
        content_kinds(reduction.tree()),
        [
            ParseKind::Void,
            ParseKind::CloseParen,
            ParseKind::OpenBlock,
            ParseKind::Float,
            ParseKind::If,
            ParseKind::Less,
            ParseKind::CloseParen,
            ParseKind::OpenBlock,
            ParseKind::Return,
            ParseKind::CloseBlock,
            ParseKind::CloseBlock,
        ]
    );

    assert_eq!(reduction.typedefs().resolve("flt"), Some("float"));
    assert_eq!(reduction.typedefs().len(), 1);

    assert_eq!(
        reduction.tree().dump(),
        "PARTH:     END\n\
         BLOCK:     BEG\n\
         DECLTYPE:  FLOAT\n\
         BLOCK:     IF\n\
         TEST:      LESS THAN\n\
         PARTH:     END\n\
         BLOCK:     BEG\n\
         BLOCK:     END\n\
         BLOCK:     END\n"
    );
}

#[test]
fn sequence_starts_with_sentinel_root() {
    let (reduction, _) = reduce_source(";");

    let nodes = reduction.tree().nodes();
    assert_eq!(nodes[0].kind(), ParseKind::Sentinel);
    assert_eq!(nodes.len(), reduction.tree().content_len() + 1);
}

#[test]
fn spaced_single_punctuation_counts() {
    let (reduction, handler) = reduce_source("; - + ( ) { }");

    assert!(!handler.has_received());
    assert_eq!(
        content_kinds(reduction.tree()),
        [
            ParseKind::Done,
            ParseKind::Minus,
            ParseKind::Add,
            ParseKind::OpenParen,
            ParseKind::CloseParen,
            ParseKind::OpenBlock,
            ParseKind::CloseBlock,
        ]
    );
    assert_eq!(reduction.tree().content_len(), 7);
}

#[test]
fn single_punctuation_swallows_following_token() {
    // The reduction for `;` unconditionally consumes the next token, so an
    // immediately adjacent `}` never reaches the dispatch.
    let (reduction, _) = reduce_source(";}");

    assert_eq!(content_kinds(reduction.tree()), [ParseKind::Done]);
}

#[test]
fn compound_and_reduces_to_one_node() {
    let (reduction, _) = reduce_source("&&");

    assert_eq!(content_kinds(reduction.tree()), [ParseKind::LogicalAnd]);
}

#[test]
fn compound_lookahead_is_consumed_either_way() {
    // `-` is the lookahead for `&`; it does not complete a compound operator
    // and is never handed back to the outer dispatch, so no Minus node.
    let (reduction, _) = reduce_source("&-");
    assert_eq!(content_kinds(reduction.tree()), [ParseKind::BitAnd]);

    // A completed compound consumes one further token to advance past the
    // operator, so the `;` is swallowed too.
    let (reduction, _) = reduce_source("&&;");
    assert_eq!(content_kinds(reduction.tree()), [ParseKind::LogicalAnd]);
}

#[test]
fn all_compound_forms() {
    let (reduction, _) = reduce_source("!= <= >= == || &&");

    assert_eq!(
        content_kinds(reduction.tree()),
        [
            ParseKind::NotEqual,
            ParseKind::LessEqual,
            ParseKind::GreaterEqual,
            ParseKind::EqualEqual,
            ParseKind::LogicalOr,
            ParseKind::LogicalAnd,
        ]
    );
}

#[test]
fn all_single_forms() {
    let (reduction, _) = reduce_source("! < > = | &");

    assert_eq!(
        content_kinds(reduction.tree()),
        [
            ParseKind::LogicalNot,
            ParseKind::Less,
            ParseKind::Greater,
            ParseKind::Assign,
            ParseKind::BitOr,
            ParseKind::BitAnd,
        ]
    );
}

#[test]
fn if_without_paren_reports_but_still_appends() {
    let (reduction, handler) = reduce_source("if x");

    assert!(handler.has_received());
    assert_eq!(content_kinds(reduction.tree()), [ParseKind::If]);
}

#[test]
fn if_with_paren_is_clean() {
    let (reduction, handler) = reduce_source("if (");

    assert!(!handler.has_received());
    // The checked `(` is consumed without a node of its own.
    assert_eq!(content_kinds(reduction.tree()), [ParseKind::If]);
}

#[test]
fn else_and_for_need_no_paren() {
    let (reduction, handler) = reduce_source("else {");
    assert!(!handler.has_received());
    assert_eq!(content_kinds(reduction.tree()), [ParseKind::Else]);

    let (reduction, handler) = reduce_source("for (;;)");
    assert!(!handler.has_received());
    assert_eq!(
        content_kinds(reduction.tree()),
        [ParseKind::For, ParseKind::Done, ParseKind::CloseParen]
    );
}

#[test]
fn simple_keyword_consumes_following_token() {
    // `break` swallows the adjacent `;`, so no statement-end node follows.
    let (reduction, _) = reduce_source("break;");
    assert_eq!(content_kinds(reduction.tree()), [ParseKind::Break]);

    // With whitespace in between only the whitespace is swallowed.
    let (reduction, _) = reduce_source("return 1;");
    assert_eq!(
        content_kinds(reduction.tree()),
        [ParseKind::Return, ParseKind::Done]
    );
}

#[test]
fn identifiers_produce_no_nodes() {
    let (reduction, handler) = reduce_source("foo;");

    assert!(!handler.has_received());
    // The identifier consumes the `;` uninspected.
    assert_eq!(reduction.tree().content_len(), 0);
}

#[test]
fn typedef_registers_alias() {
    let (reduction, handler) = reduce_source("typedef flt float;");

    assert!(!handler.has_received());
    assert_eq!(reduction.typedefs().resolve("flt"), Some("float"));
    // A typedef declaration emits no nodes, including for its trailing `;`.
    assert_eq!(reduction.tree().content_len(), 0);
}

#[test]
fn typedef_chains_through_aliases() {
    let (reduction, handler) = reduce_source("typedef flt float;\ntypedef number flt;");

    assert!(!handler.has_received());
    assert_eq!(reduction.typedefs().resolve("flt"), Some("float"));
    assert_eq!(reduction.typedefs().resolve("number"), Some("flt"));
    assert_eq!(reduction.typedefs().len(), 2);
}

#[test]
fn malformed_typedef_reports_and_registers_nothing() {
    // `=` is not a valid underlying name; the run is reported and skipped.
    let (reduction, handler) = reduce_source("typedef a = b;");

    assert!(handler.has_received());
    assert!(reduction.typedefs().is_empty());

    // A keyword cannot be an alias name either.
    let (reduction, handler) = reduce_source("typedef float x;");

    assert!(handler.has_received());
    assert!(reduction.typedefs().is_empty());
}

#[test]
fn do_gets_a_loop_dump_line() {
    let (reduction, _) = reduce_source("do ;");

    assert_eq!(
        content_kinds(reduction.tree()),
        [ParseKind::Do, ParseKind::Done]
    );
    // `Done` has no classification, so only the loop line appears.
    assert_eq!(reduction.tree().dump(), "LOOP:      DO\n");
}

#[test]
fn dumper_skips_unclassified_kinds() {
    let mut tree = ParseTree::new();
    tree.push(ParseKind::While);
    tree.push(ParseKind::Return);
    tree.push(ParseKind::Done);

    assert_eq!(tree.dump(), "");

    tree.push(ParseKind::Comma);
    assert_eq!(tree.dump(), "OPERATOR:  SEPERATOR\n");
}

#[test]
fn reduction_rewinds_the_source_for_later_passes() {
    let mut provider = MemoryProvider::new();
    provider.add_file("test.qc", "if (x) { return; }");

    let source_file =
        SourceFile::load(Path::new("test.qc"), &provider).expect("Failed to load source");
    let mut reducer = Reducer::new(&source_file);
    let handler = SilentHandler::new();

    let first = reducer.reduce(&handler).expect("Failed to reduce");
    assert!(first.tree().content_len() > 0);

    // The same reducer runs again from the start of the source.
    let second = reducer.reduce(&handler).expect("Failed to reduce");
    assert_eq!(content_kinds(second.tree()), content_kinds(first.tree()));
}

#[test]
fn fatal_lexical_error_terminates_the_pass() {
    let mut provider = MemoryProvider::new();
    provider.add_file("test.qc", "break /*");
    let handler = SilentHandler::new();

    let result = qcparse::parse(&handler, &provider, Path::new("test.qc"));

    assert!(handler.has_received());
    assert_eq!(
        result.unwrap_err(),
        Error::TokenizeError(TokenizeError::FatalLexicalError)
    );
}

#[test]
fn unmatched_tokens_fall_through_silently() {
    let (reduction, handler) = reduce_source("1 2.5 \"s\" , * . [ ]");

    assert!(!handler.has_received());
    assert_eq!(reduction.tree().content_len(), 0);
}
