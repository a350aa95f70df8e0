use super::*;

use pretty_assertions::assert_eq;

fn check_src(src: &str, path: &[&str], operator: &str, literal: &str) {
    let clause = extract_clause(src, 0).unwrap();

    assert_eq!(path, clause.path.segments());
    assert_eq!(operator, clause.operator);
    assert_eq!(literal, clause.literal);
}

fn check_defect(src: &str, expected: ClauseDefect) {
    match extract_clause(src, 0) {
        Err(ParseError::MalformedClause { reason, .. }) => assert_eq!(expected, reason),
        other => panic!("expected malformed clause, got {:?}", other),
    }
}

#[test]
fn simple() {
    check_src("Age gt 5", &["Age"], "gt", "5");
}

#[test]
fn surrounding_whitespace() {
    check_src("  Firstname eq Hossein ", &["Firstname"], "eq", "Hossein");
}

#[test]
fn repeated_whitespace() {
    check_src("Age \t gt   5", &["Age"], "gt", "5");
}

#[test]
fn nested_path() {
    check_src("Address.Number cn 1", &["Address", "Number"], "cn", "1");
}

#[test]
fn quoted_literal() {
    check_src("Fullname cn 'Hossein S'", &["Fullname"], "cn", "Hossein S");
}

#[test]
fn quoted_literal_keeps_inner_quotes() {
    check_src("Name eq 'O'Brien'", &["Name"], "eq", "O'Brien");
}

#[test]
fn quoted_literal_keeps_padding() {
    check_src("Name eq ' padded '", &["Name"], "eq", " padded ");
}

#[test]
fn empty_quoted_literal() {
    check_src("Name eq ''", &["Name"], "eq", "");
}

#[test]
fn span_skips_leading_whitespace() {
    let clause = extract_clause("   Age gt 5  ", 10).unwrap();
    assert_eq!(Span::new(13, 8), clause.span);
}

#[test]
fn too_few_tokens() {
    check_defect("Age gt", ClauseDefect::TokenCount { expected: 3, found: 2 });
}

#[test]
fn too_many_tokens() {
    check_defect("Fullname cn John Doe", ClauseDefect::TokenCount { expected: 3, found: 4 });
}

#[test]
fn empty_clause() {
    check_defect("   ", ClauseDefect::TokenCount { expected: 3, found: 0 });
}

#[test]
fn quoted_missing_operator() {
    check_defect("Fullname 'John D'", ClauseDefect::TokenCount { expected: 2, found: 1 });
}

#[test]
fn single_quote() {
    check_defect("Fullname cn John'", ClauseDefect::UnclosedQuote);
}

#[test]
fn text_after_quote_is_ignored() {
    check_src("Fullname cn 'John' D", &["Fullname"], "cn", "John");
    check_src("Fullname cn 'John D' extra", &["Fullname"], "cn", "John D");
}

#[test]
fn empty_path_segment() {
    check_defect("Address..Number eq 1", ClauseDefect::EmptyPathSegment);
    check_defect(".Number eq 1", ClauseDefect::EmptyPathSegment);
}

#[test]
fn deserialized_paths_are_checked() {
    let path: PropertyPath = serde_json::from_str(r#"["Address","Number"]"#).unwrap();
    assert_eq!(PropertyPath::parse("Address.Number"), Some(path.clone()));
    assert_eq!(r#"["Address","Number"]"#, serde_json::to_string(&path).unwrap());

    assert!(serde_json::from_str::<PropertyPath>("[]").is_err());
    assert!(serde_json::from_str::<PropertyPath>(r#"["Address",""]"#).is_err());
}

#[test]
fn operator_aliases() {
    assert_eq!(Some(Operator::Equal), Operator::from_alias("eq"));
    assert_eq!(Some(Operator::Contains), Operator::from_alias("CN"));
    assert_eq!(Some(Operator::GreaterOrEqual), Operator::from_alias("Ge"));
    assert_eq!(None, Operator::from_alias("ne"));
    assert_eq!(None, Operator::from_alias("=="));

    assert_eq!("le", Operator::LessOrEqual.to_string());
}
