use std::fmt;
use std::ops::Not;

use super::Value;

/// Comparison operators of the condition language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    /// `=`, `==`, `Equals`, `Is`
    Eq,
    /// `!=`, `NotEquals`, `IsNot`
    Neq,
    /// `:=`, `EqualsCaseInsensitive`
    EqIgnoreCase,
    /// `>`, `GreaterThan`
    Gt,
    /// `>=`, `GreaterThanOrEquals`
    Gte,
    /// `<`, `LesserThan`
    Lt,
    /// `<=`, `LesserThanOrEquals`
    Lte,
    /// `=|`, `StartsWith`
    StartsWith,
    /// `~`, `Matches`, `Like`
    Matches,
    /// `~/`, `MatchesPath`, `LikePath`
    MatchesPath,
    /// `~~`, `JavaRegex`
    JavaRegex,
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Term {
    /// A flow variable such as `request.verb`.
    Variable(String),
    Literal(Value),
}

/// Condition syntax tree.
///
/// A run of the same connective at one nesting level is a single node, so
/// `a and b and c` is `And([a, b, c])` while `(a and b) and c` keeps the
/// inner group: `And([And([a, b]), c])`. `And` and `Or` produced by the
/// parser or the builders always hold at least two operands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A constant used as a predicate.
    Literal(Value),
    /// A variable used without comparison (implicit truthiness test).
    Variable(String),
    Compare {
        op: CompareOp,
        left: Term,
        right: Term,
    },
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    /// `p implies q`, true unless `p` holds and `q` does not.
    Implies(Box<Expr>, Box<Expr>),
}

impl CompareOp {
    /// Canonical symbol used when rendering an expression.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "!=",
            CompareOp::EqIgnoreCase => ":=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::StartsWith => "=|",
            CompareOp::Matches => "~",
            CompareOp::MatchesPath => "~/",
            CompareOp::JavaRegex => "~~",
        }
    }

    /// Resolve a word operator, ignoring case.
    pub(crate) fn from_word(word: &str) -> Option<CompareOp> {
        let op = match word.to_ascii_lowercase().as_str() {
            "equals" | "is" => CompareOp::Eq,
            "notequals" | "isnot" => CompareOp::Neq,
            "equalscaseinsensitive" => CompareOp::EqIgnoreCase,
            "greaterthan" => CompareOp::Gt,
            "greaterthanorequals" => CompareOp::Gte,
            "lesserthan" | "lessthan" => CompareOp::Lt,
            "lesserthanorequals" | "lessthanorequals" => CompareOp::Lte,
            "startswith" => CompareOp::StartsWith,
            "matches" | "like" => CompareOp::Matches,
            "matchespath" | "likepath" => CompareOp::MatchesPath,
            "javaregex" => CompareOp::JavaRegex,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "{name}"),
            Term::Literal(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Compare { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Not(inner) => write!(f, "(not {inner})"),
            Expr::And(args) => write_chain(f, args, "and"),
            Expr::Or(args) => write_chain(f, args, "or"),
            Expr::Implies(a, b) => write!(f, "({a} implies {b})"),
        }
    }
}

fn write_chain(f: &mut fmt::Formatter<'_>, args: &[Expr], connective: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, " {connective} ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}

impl Expr {
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Expr {
        Expr::Literal(value.into())
    }

    /// Conjunction. Chained calls extend one node, matching how
    /// `a and b and c` parses.
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        match self {
            Expr::And(mut args) => {
                args.push(other);
                Expr::And(args)
            }
            first => Expr::And(vec![first, other]),
        }
    }

    /// Disjunction. Chained calls extend one node.
    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        match self {
            Expr::Or(mut args) => {
                args.push(other);
                Expr::Or(args)
            }
            first => Expr::Or(vec![first, other]),
        }
    }

    #[must_use]
    pub fn implies(self, other: Expr) -> Expr {
        Expr::Implies(Box::new(self), Box::new(other))
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

/// Builder for comparisons against a variable. Created by [`var()`].
///
/// Used as an expression on its own it becomes a truthiness test via
/// [`VarExpr::truthy`].
#[derive(Debug, Clone)]
pub struct VarExpr {
    name: String,
}

impl VarExpr {
    #[must_use]
    pub fn compare(self, op: CompareOp, value: impl Into<Value>) -> Expr {
        Expr::Compare {
            op,
            left: Term::Variable(self.name),
            right: Term::Literal(value.into()),
        }
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Eq, value)
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Neq, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Gte, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Lte, value)
    }

    #[must_use]
    pub fn matches_path(self, pattern: &str) -> Expr {
        self.compare(CompareOp::MatchesPath, pattern)
    }

    /// Compare against another variable rather than a constant.
    #[must_use]
    pub fn eq_var(self, other: &str) -> Expr {
        Expr::Compare {
            op: CompareOp::Eq,
            left: Term::Variable(self.name),
            right: Term::Variable(other.to_owned()),
        }
    }

    #[must_use]
    pub fn truthy(self) -> Expr {
        Expr::Variable(self.name)
    }
}

#[must_use]
pub fn var(name: &str) -> VarExpr {
    VarExpr {
        name: name.to_owned(),
    }
}
