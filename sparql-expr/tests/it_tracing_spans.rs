//! Verifies the spans opened by the expression and path parsers.

mod support;

use sparql_expr::{parse_expression_str, parse_path_str, ExpressionParser, PathParser, TokenQueue};
use support::span_capture;

#[test]
fn expression_parse_opens_one_span() {
    let (store, _guard) = span_capture::init_test_tracing();

    let config = support::sparql11();
    let expr = parse_expression_str("?a + 1 > ?b", &config);
    assert!(expr.is_ok(), "{:?}", expr.err());

    let spans = store.find_spans("sparql_expr_parse");
    assert_eq!(spans.len(), 1, "{:?}", store.span_names());
    let span = &spans[0];
    assert_eq!(span.level, tracing::Level::DEBUG);
    assert_eq!(span.fields.get("tokens").map(String::as_str), Some("5"));
    assert_eq!(span.fields.get("syntax").map(String::as_str), Some("sparql11"));
}

#[test]
fn bracketed_arguments_do_not_open_spans() {
    let (store, _guard) = span_capture::init_test_tracing();

    let config = support::sparql11();
    let mut tokens = TokenQueue::tokenize("CONCAT(STR(?a), \"-\", LCASE(?b))").unwrap();
    ExpressionParser::new(&config).parse(&mut tokens).unwrap();

    assert_eq!(store.span_names(), vec!["sparql_expr_parse"]);
}

#[test]
fn path_parse_opens_one_span() {
    let (store, _guard) = span_capture::init_test_tracing();

    let config = support::extended();
    parse_path_str("ex:a/(ex:b|^ex:c)*", &config).unwrap();

    let spans = store.find_spans("sparql_path_parse");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].fields.get("syntax").map(String::as_str), Some("extended"));
    assert!(store.find_spans("sparql_expr_parse").is_empty());
}

#[test]
fn path_span_counts_the_whole_queue() {
    let (store, _guard) = span_capture::init_test_tracing();

    let config = support::sparql11();
    let mut tokens = TokenQueue::tokenize("ex:p+ ?o .").unwrap();
    PathParser::new(&config).parse(&mut tokens).unwrap();
    assert_eq!(tokens.len(), 2);

    let spans = store.find_spans("sparql_path_parse");
    assert_eq!(spans[0].fields.get("tokens").map(String::as_str), Some("4"));
}

#[test]
fn failed_parse_still_records_span() {
    let (store, _guard) = span_capture::init_test_tracing();

    let config = support::sparql11();
    assert!(parse_expression_str("?a +", &config).is_err());
    assert_eq!(store.find_spans("sparql_expr_parse").len(), 1);
}
