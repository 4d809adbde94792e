use crate::Expr;

/// Count the logical nodes of `expr`: connectives, comparisons and
/// standalone literals or variables. The two operands inside a comparison
/// are not counted separately. A chain of `k` operands joined by one
/// connective counts as `k - 1` connectives.
///
/// ```
/// use condlint::{count_nodes, parse};
///
/// let expr = parse("a = 1 and b = 2 and c = 3").unwrap();
/// assert_eq!(count_nodes(&expr), 5);
/// ```
#[must_use]
pub fn count_nodes(expr: &Expr) -> usize {
    let mut count = 0;
    let mut stack = vec![expr];
    while let Some(node) = stack.pop() {
        match node {
            Expr::Literal(_) | Expr::Variable(_) | Expr::Compare { .. } => count += 1,
            Expr::Not(inner) => {
                count += 1;
                stack.push(inner);
            }
            Expr::And(args) | Expr::Or(args) => {
                count += args.len().saturating_sub(1);
                stack.extend(args.iter().rev());
            }
            Expr::Implies(a, b) => {
                count += 1;
                stack.push(b);
                stack.push(a);
            }
        }
    }
    count
}

/// `true` if a literal is used as a predicate: the whole condition, or a
/// direct operand of `and`, `or`, `not` or `implies`. Literals on either
/// side of a comparison do not count.
///
/// The search is depth-first and stops at the first hit.
#[must_use]
pub fn has_bare_literal(expr: &Expr) -> bool {
    let mut stack = vec![expr];
    while let Some(node) = stack.pop() {
        match node {
            Expr::Literal(_) => return true,
            Expr::Variable(_) | Expr::Compare { .. } => {}
            Expr::Not(inner) => stack.push(inner),
            Expr::And(args) | Expr::Or(args) => stack.extend(args.iter().rev()),
            Expr::Implies(a, b) => {
                stack.push(b);
                stack.push(a);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, var};

    #[test]
    fn count_leaves() {
        assert_eq!(count_nodes(&parse("true").unwrap()), 1);
        assert_eq!(count_nodes(&parse("flag").unwrap()), 1);
        assert_eq!(count_nodes(&parse(r#"request.verb = "GET""#).unwrap()), 1);
    }

    #[test]
    fn count_connectives_and_comparisons() {
        assert_eq!(count_nodes(&parse("a = 1 and b = 2 and c = 3").unwrap()), 5);
        assert_eq!(count_nodes(&parse("not (a or b)").unwrap()), 4);
        assert_eq!(count_nodes(&parse("a implies b").unwrap()), 3);
    }

    #[test]
    fn chain_counts_each_joining_connective() {
        let text = (0..40).map(|i| format!("x{i}")).collect::<Vec<_>>().join(" and ");
        assert_eq!(count_nodes(&parse(&text).unwrap()), 40 + 39);
        // grouping changes the shape, not the count
        let grouped = parse("(a and b) and c").unwrap();
        assert_eq!(count_nodes(&grouped), 5);
    }

    #[test]
    fn bare_literal_deep_in_chain() {
        let expr = parse("a = 1 or b = 2 or c = 3 or 0").unwrap();
        assert!(has_bare_literal(&expr));
    }

    #[test]
    fn parentheses_add_nothing() {
        let plain = parse("a = 1 or b = 2").unwrap();
        let wrapped = parse("((a = 1) or ((b = 2)))").unwrap();
        assert_eq!(count_nodes(&plain), count_nodes(&wrapped));
    }

    #[test]
    fn count_deep_tree_without_recursion() {
        let mut expr = var("x").truthy();
        for _ in 0..100_000 {
            expr = !expr;
        }
        assert_eq!(count_nodes(&expr), 100_001);
        assert!(!has_bare_literal(&expr));
        // drop iteratively to keep the test's stack shallow
        let mut node = expr;
        while let Expr::Not(inner) = node {
            node = *inner;
        }
    }

    #[test]
    fn bare_literal_in_conjunction() {
        assert!(has_bare_literal(
            &parse(r#"true and request.verb = "GET""#).unwrap()
        ));
    }

    #[test]
    fn literal_inside_comparison_is_not_bare() {
        assert!(!has_bare_literal(&parse(r#"request.verb = "true""#).unwrap()));
        assert!(!has_bare_literal(&parse("1 = 1").unwrap()));
    }

    #[test]
    fn bare_literal_positions() {
        assert!(has_bare_literal(&parse("false").unwrap()));
        assert!(has_bare_literal(&parse("not 0").unwrap()));
        assert!(has_bare_literal(&parse("a or (b and \"x\")").unwrap()));
        assert!(has_bare_literal(&parse("a implies null").unwrap()));
        assert!(!has_bare_literal(&parse("a or (b and c)").unwrap()));
    }
}
