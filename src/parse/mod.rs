mod error;
mod grammar;
mod lexer;

pub use error::{ParseError, ParseErrorKind};

use crate::{AnalysisConfig, Expr};

/// Parse condition text into an [`Expr`] using the default nesting limit.
///
/// Surrounding whitespace is ignored; error positions refer to the trimmed
/// text.
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not a complete, valid condition.
///
/// # Example
///
/// ```
/// use condlint::{parse, Expr};
///
/// let expr = parse(r#"request.verb = "GET" and proxy.pathsuffix ~/ "/orders/*""#).unwrap();
/// assert!(matches!(expr, Expr::And(ref args) if args.len() == 2));
/// ```
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    parse_with(input, &AnalysisConfig::default())
}

/// Parse condition text with the nesting limit from `config`.
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not a complete, valid condition or
/// nests deeper than [`AnalysisConfig::max_depth`].
pub fn parse_with(input: &str, config: &AnalysisConfig) -> Result<Expr, ParseError> {
    let source = input.trim();
    let tokens = lexer::tokenize(source)?;
    grammar::Grammar::new(source, &tokens, config.max_depth()).parse_condition()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompareOp, Term, Value};

    fn compare(op: CompareOp, left: Term, right: Term) -> Expr {
        Expr::Compare { op, left, right }
    }

    fn v(name: &str) -> Term {
        Term::Variable(name.to_owned())
    }

    fn lit(value: impl Into<Value>) -> Term {
        Term::Literal(value.into())
    }

    #[test]
    fn parse_single_comparison() {
        let expr = parse(r#"request.verb = "GET""#).unwrap();
        assert_eq!(expr, compare(CompareOp::Eq, v("request.verb"), lit("GET")));
    }

    #[test]
    fn parse_bare_variable_and_literal() {
        assert_eq!(parse("flag").unwrap(), Expr::Variable("flag".into()));
        assert_eq!(parse("true").unwrap(), Expr::Literal(Value::Bool(true)));
        assert_eq!(parse(" 42 ").unwrap(), Expr::Literal(Value::Int(42)));
    }

    #[test]
    fn parse_literal_on_both_sides() {
        assert_eq!(parse("1 = 1").unwrap(), compare(CompareOp::Eq, lit(1), lit(1)));
    }

    #[test]
    fn parse_word_operators() {
        let expr = parse(r#"proxy.pathsuffix MatchesPath "/a/**""#).unwrap();
        assert_eq!(
            expr,
            compare(CompareOp::MatchesPath, v("proxy.pathsuffix"), lit("/a/**"))
        );
        let expr = parse("a IsNot null").unwrap();
        assert_eq!(expr, compare(CompareOp::Neq, v("a"), Term::Literal(Value::Null)));
    }

    #[test]
    fn parse_symbolic_connectives() {
        let expr = parse("a && !b || c").unwrap();
        match expr {
            Expr::Or(args) => {
                assert!(matches!(args[0], Expr::And(_)));
                assert_eq!(args[1], Expr::Variable("c".into()));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn parse_precedence_and_before_or() {
        match parse("a or b and c").unwrap() {
            Expr::Or(args) => {
                assert_eq!(args[0], Expr::Variable("a".into()));
                assert!(matches!(args[1], Expr::And(_)));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn parse_parenthesized_grouping() {
        match parse("(a or b) and c").unwrap() {
            Expr::And(args) => {
                assert!(matches!(args[0], Expr::Or(_)));
                assert_eq!(args[1], Expr::Variable("c".into()));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn parse_not_binds_tighter_than_and() {
        match parse("not a and b").unwrap() {
            Expr::And(args) => assert!(matches!(args[0], Expr::Not(_))),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn parse_implies_is_lowest_and_right_associative() {
        match parse("a or b implies c implies d").unwrap() {
            Expr::Implies(left, right) => {
                assert!(matches!(*left, Expr::Or(_)));
                assert!(matches!(*right, Expr::Implies(_, _)));
            }
            other => panic!("expected Implies, got {other:?}"),
        }
    }

    #[test]
    fn chain_is_one_node() {
        match parse("a and b and c").unwrap() {
            Expr::And(args) => {
                assert_eq!(args.len(), 3);
                assert_eq!(args[2], Expr::Variable("c".into()));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn mixed_chain_groups_by_precedence() {
        match parse("a or b and c and d or e").unwrap() {
            Expr::Or(args) => {
                assert_eq!(args.len(), 3);
                assert!(matches!(&args[1], Expr::And(inner) if inner.len() == 3));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn dangling_operator_points_after_operator() {
        let err = parse("a = ").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::UnexpectedEnd { .. }));
        assert_eq!(err.column(), 4);
    }

    #[test]
    fn empty_expression() {
        let err = parse("   ").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::UnexpectedEnd { .. }));
        assert_eq!(err.column(), 1);
    }

    #[test]
    fn unbalanced_parentheses() {
        let err = parse("(a = 1").unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::UnexpectedEnd {
                expected: "')'".into()
            }
        );
        assert_eq!(err.column(), 7);

        let err = parse("a = 1)").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::TrailingInput { .. }));
        assert_eq!(err.column(), 6);
    }

    #[test]
    fn operator_on_parenthesized_expression() {
        let err = parse("(a) = 1").unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::OperatorOnExpression { op: "=".into() }
        );
        assert_eq!(err.column(), 5);
    }

    #[test]
    fn sub_expression_as_right_operand() {
        let err = parse("a = (b)").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::UnexpectedToken { .. }));
        assert_eq!(err.column(), 5);
    }

    #[test]
    fn chained_comparison_is_trailing_input() {
        let err = parse("a = 1 = 2").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::TrailingInput { .. }));
        assert_eq!(err.column(), 7);
    }

    #[test]
    fn column_is_relative_to_trimmed_text() {
        let err = parse("   a = ").unwrap_err();
        assert_eq!(err.column(), 4);
    }

    #[test]
    fn nesting_limit() {
        let config = AnalysisConfig::new().with_max_depth(4);
        assert!(parse_with("((((a))))", &config).is_ok());
        let err = parse_with("(((((a)))))", &config).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::TooDeep { limit: 4 });
        assert_eq!(err.column(), 5);
    }

    #[test]
    fn wide_chain_does_not_count_as_nesting() {
        let config = AnalysisConfig::new().with_max_depth(3);
        let text = (0..1_000).map(|i| format!("x{i}")).collect::<Vec<_>>().join(" or ");
        assert!(parse_with(&text, &config).is_ok());
    }

    #[test]
    fn nested_connectives_count_as_nesting() {
        let config = AnalysisConfig::new().with_max_depth(3);
        assert!(parse_with("a and (b or c)", &config).is_ok());
        let err = parse_with("a and (b or (c and d))", &config).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::TooDeep { limit: 3 });
        assert_eq!(err.column(), 1);
    }
}
