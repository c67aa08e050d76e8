use std::path::Path;

use qcparse::{
    base::{
        source_file::SourceFile, Error, MemoryProvider, PrintHandler, SilentHandler, VoidHandler,
    },
    lexical::token::{CommentKind, KeywordKind, Token, TokenizeError},
    lexical::token_source::TokenSource,
};

fn provider_with(source: &str) -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    provider.add_file("test1.qc", source);
    provider
}

#[test]
fn lexing_test1() {
    let source = include_str!("./test1.qc");
    let provider = provider_with(source);

    let tokens = qcparse::tokenize(
        &PrintHandler::default(),
        &provider,
        Path::new("test1.qc"),
    )
    .expect("Failed to tokenize");

    let comment = tokens
        .first()
        .and_then(Token::as_comment)
        .expect("Expected leading comment");
    assert_eq!(comment.kind, CommentKind::Line);
    assert_eq!(comment.span.str(), "// entry point");

    let keyword = tokens
        .get(1)
        .and_then(Token::as_keyword)
        .expect("Expected keyword after comment");
    assert_eq!(keyword.keyword, KeywordKind::Void);

    let identifier = tokens
        .get(3)
        .and_then(Token::as_identifier)
        .expect("Expected function name");
    assert_eq!(identifier.span.str(), "main");

    assert!(tokens
        .iter()
        .any(|token| matches!(token, Token::Numeric(numeric) if numeric.span.str() == "100")));

    let string = tokens
        .iter()
        .find_map(Token::as_string_literal)
        .expect("Expected string literal");
    assert_eq!(string.str_content(), "done");
}

#[test]
fn compound_operators_stay_single_tokens() {
    let provider = provider_with("&&");

    let tokens = qcparse::tokenize(
        &PrintHandler::default(),
        &provider,
        Path::new("test1.qc"),
    )
    .expect("Failed to tokenize");

    assert_eq!(tokens.len(), 2);
    for token in &tokens {
        let punctuation = token.as_punctuation().expect("Expected punctuation");
        assert_eq!(punctuation.punctuation, '&');
    }
}

#[test]
fn keyword_requires_exact_word() {
    let provider = provider_with("typedef typedefs");

    let tokens = qcparse::tokenize(
        &PrintHandler::default(),
        &provider,
        Path::new("test1.qc"),
    )
    .expect("Failed to tokenize");

    assert_eq!(
        tokens
            .first()
            .and_then(Token::as_keyword)
            .map(|keyword| keyword.keyword),
        Some(KeywordKind::Typedef)
    );
    assert_eq!(
        tokens
            .get(2)
            .and_then(Token::as_identifier)
            .map(|identifier| identifier.span.str()),
        Some("typedefs")
    );
}

#[test]
fn unterminated_comment_is_fatal() {
    let provider = provider_with("/* never closed");
    let handler = SilentHandler::new();

    let result = qcparse::tokenize(&handler, &provider, Path::new("test1.qc"));

    assert!(handler.has_received());
    assert_eq!(
        result,
        Err(Error::TokenizeError(TokenizeError::FatalLexicalError))
    );
}

#[test]
fn unterminated_string_is_fatal() {
    let provider = provider_with("\"never closed");
    let handler = SilentHandler::new();

    let result = qcparse::tokenize(&handler, &provider, Path::new("test1.qc"));

    assert!(handler.has_received());
    assert_eq!(
        result,
        Err(Error::TokenizeError(TokenizeError::FatalLexicalError))
    );
}

#[test]
fn token_source_tracks_last_lexeme_and_resets() {
    let provider = provider_with("float health;");
    let source_file =
        SourceFile::load(Path::new("test1.qc"), &provider).expect("Failed to load source");
    let mut source = TokenSource::new(&source_file);

    assert!(source.last_lexeme().is_none());

    source
        .next_token(&VoidHandler)
        .expect("Failed to lex")
        .expect("Expected a token");
    assert_eq!(source.last_lexeme(), Some("float"));

    source
        .next_token(&VoidHandler)
        .expect("Failed to lex")
        .expect("Expected a token");
    assert_eq!(source.last_lexeme(), Some(" "));

    source.reset();
    assert!(source.last_lexeme().is_none());

    // After a rewind the first token comes out again.
    source
        .next_token(&VoidHandler)
        .expect("Failed to lex")
        .expect("Expected a token");
    assert_eq!(source.last_lexeme(), Some("float"));
}
