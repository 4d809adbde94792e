use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use globset::GlobBuilder;
use regex::Regex;

use super::expr::CompareOp;

/// Constant values that may appear in a condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A UTF-8 string.
    String(String),
    /// The `null` keyword.
    Null,
}

impl Value {
    /// Statically compare this value to another using the given operator.
    ///
    /// Returns `None` when the outcome cannot be decided without runtime
    /// coercion: incompatible types, ordering on bools or null, pattern
    /// operators on non-strings, or an invalid regular expression.
    #[must_use]
    pub fn compare(&self, op: CompareOp, other: &Value) -> Option<bool> {
        match op {
            CompareOp::Eq => self.equals(other),
            CompareOp::Neq => self.equals(other).map(|eq| !eq),
            CompareOp::EqIgnoreCase => match (self, other) {
                (Value::String(a), Value::String(b)) => {
                    Some(a.to_lowercase() == b.to_lowercase())
                }
                _ => self.equals(other),
            },
            CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte => {
                let ord = self.ordering(other)?;
                Some(match op {
                    CompareOp::Gt => ord == Ordering::Greater,
                    CompareOp::Gte => ord != Ordering::Less,
                    CompareOp::Lt => ord == Ordering::Less,
                    _ => ord != Ordering::Greater,
                })
            }
            CompareOp::StartsWith => {
                let (text, prefix) = self.string_pair(other)?;
                Some(text.starts_with(prefix))
            }
            CompareOp::Matches => {
                let (text, pattern) = self.string_pair(other)?;
                glob_match(pattern, text, false)
            }
            CompareOp::MatchesPath => {
                let (text, pattern) = self.string_pair(other)?;
                glob_match(pattern, text, true)
            }
            CompareOp::JavaRegex => {
                let (text, pattern) = self.string_pair(other)?;
                let re = Regex::new(&format!("^(?:{pattern})$")).ok()?;
                Some(re.is_match(text))
            }
        }
    }

    /// Truth value of this constant when it is used directly as a predicate.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Static equality. `None` when the two values are of kinds that a
    /// gateway would coerce at runtime (e.g. a number against a string).
    pub(crate) fn equals(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(true),
            (Value::Null, _) | (_, Value::Null) => Some(false),
            (Value::Bool(a), Value::Bool(b)) => Some(a == b),
            (Value::String(a), Value::String(b)) => Some(a == b),
            _ => self.ordering(other).map(|ord| ord == Ordering::Equal),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn ordering(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }

    fn string_pair<'a>(&'a self, other: &'a Value) -> Option<(&'a str, &'a str)> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }
}

/// Glob match where `*` spans any run of characters. With `path_aware`,
/// a single `*` stops at `/` and a `/**` component crosses segments.
///
/// Only `*` is a wildcard in conditions, so every other glob
/// metacharacter is matched literally.
fn glob_match(pattern: &str, text: &str, path_aware: bool) -> Option<bool> {
    let glob = GlobBuilder::new(&escape_glob(pattern))
        .literal_separator(path_aware)
        .backslash_escape(false)
        .build()
        .ok()?;
    Some(glob.compile_matcher().is_match(text))
}

fn escape_glob(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '?' | '[' | ']' | '{' | '}') {
            escaped.push('[');
            escaped.push(c);
            escaped.push(']');
        } else {
            escaped.push(c);
        }
    }
    escaped
}

// Literals the lexer produces are finite, so the float bit pattern is a
// sound key. `0.0 == -0.0` must hash alike.
impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Int(i) => i.hash(state),
            Value::Float(f) => {
                let f = if *f == 0.0 { 0.0_f64 } else { *f };
                f.to_bits().hash(state);
            }
            Value::Bool(b) => b.hash(state),
            Value::String(s) => s.hash(state),
            Value::Null => {}
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Null => write!(f, "null"),
            Value::String(v) => {
                write!(f, "\"")?;
                for c in v.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")
            }
        }
    }
}
