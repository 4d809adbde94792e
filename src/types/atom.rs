use std::fmt;

use super::expr::{CompareOp, Term};
use super::value::Value;

/// A boolean unit the classifier varies independently: a comparison that
/// involves at least one variable (or cannot be decided statically), or a
/// variable used on its own as a truthiness test.
///
/// Structurally equal atoms are the same proposition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Atom {
    Comparison { op: CompareOp, left: Term, right: Term },
    Truthy(String),
}

impl Atom {
    /// `(variable, value, is_equals)` for `=`/`!=` between one variable and
    /// one literal, in either order.
    pub(crate) fn equality(&self) -> Option<(&str, &Value, bool)> {
        let Atom::Comparison { op, left, right } = self else {
            return None;
        };
        let is_eq = match op {
            CompareOp::Eq => true,
            CompareOp::Neq => false,
            _ => return None,
        };
        match (left, right) {
            (Term::Variable(name), Term::Literal(value))
            | (Term::Literal(value), Term::Variable(name)) => Some((name.as_str(), value, is_eq)),
            _ => None,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Comparison { op, left, right } => write!(f, "{left} {op} {right}"),
            Atom::Truthy(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(op: CompareOp, left: Term, right: Term) -> Atom {
        Atom::Comparison { op, left, right }
    }

    #[test]
    fn equality_either_side() {
        let a = cmp(
            CompareOp::Eq,
            Term::Variable("x".into()),
            Term::Literal(Value::Int(1)),
        );
        assert_eq!(a.equality(), Some(("x", &Value::Int(1), true)));

        let b = cmp(
            CompareOp::Neq,
            Term::Literal(Value::Int(1)),
            Term::Variable("x".into()),
        );
        assert_eq!(b.equality(), Some(("x", &Value::Int(1), false)));
    }

    #[test]
    fn no_equality_for_other_shapes() {
        let gt = cmp(
            CompareOp::Gt,
            Term::Variable("x".into()),
            Term::Literal(Value::Int(1)),
        );
        assert_eq!(gt.equality(), None);

        let vars = cmp(
            CompareOp::Eq,
            Term::Variable("x".into()),
            Term::Variable("y".into()),
        );
        assert_eq!(vars.equality(), None);
        assert_eq!(Atom::Truthy("x".into()).equality(), None);
    }

    #[test]
    fn display() {
        let a = cmp(
            CompareOp::Eq,
            Term::Variable("request.verb".into()),
            Term::Literal(Value::String("GET".into())),
        );
        assert_eq!(a.to_string(), "request.verb = \"GET\"");
        assert_eq!(Atom::Truthy("flag".into()).to_string(), "flag");
    }
}
