//! Static analysis for the boolean condition language of API proxy
//! configurations.
//!
//! Conditions are parsed into an [`Expr`] tree and then checked for
//! logical validity: tautologies, contradictions, literals misused as
//! predicates, and overall complexity.
//!
//! ```
//! use condlint::{Condition, Location, Verdict};
//!
//! let cond = Condition::new(r#"request.verb = "GET" or request.verb != "GET""#, Location::new(1, 1));
//! assert_eq!(cond.verdict(), Ok(Verdict::Tautology));
//! ```

mod analyze;
mod compile;
mod error;
mod evaluate;
pub mod lint;
pub mod parse;
mod types;

pub use analyze::{count_nodes, has_bare_literal};
pub use compile::extract_atoms;
pub use error::Error;
pub use evaluate::{classify, classify_with};
pub use parse::{parse, parse_with, ParseError, ParseErrorKind};
pub use types::{
    AnalysisConfig, Atom, Classification, CompareOp, Condition, EqualityModel, Expr, Location,
    Term, Value, VarExpr, Verdict, ATOM_CEILING_LIMIT, DEFAULT_MAX_ATOMS, DEFAULT_MAX_DEPTH, var,
};
