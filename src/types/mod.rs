mod atom;
mod condition;
mod config;
mod expr;
mod value;
mod verdict;

pub use atom::Atom;
pub use condition::{Condition, Location};
pub use config::{
    AnalysisConfig, EqualityModel, ATOM_CEILING_LIMIT, DEFAULT_MAX_ATOMS, DEFAULT_MAX_DEPTH,
};
pub use expr::{CompareOp, Expr, Term, VarExpr, var};
pub use value::Value;
pub use verdict::{Classification, Verdict};
