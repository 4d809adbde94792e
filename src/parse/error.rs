use std::fmt;

use thiserror::Error;

/// What went wrong while parsing a condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken { found: String, expected: String },

    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("unexpected {found} after complete expression")]
    TrailingInput { found: String },

    #[error("comparison operator '{op}' must follow a variable or literal, not a parenthesized expression")]
    OperatorOnExpression { op: String },

    #[error("expression nesting exceeds the maximum depth of {limit}")]
    TooDeep { limit: usize },
}

/// A located parse failure.
///
/// Positions refer to the trimmed expression text. `offset` is a 0-based
/// character offset; `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: usize,
    line: usize,
    column: usize,
}

impl ParseError {
    /// Build an error at byte offset `at` of `source`.
    pub(crate) fn at(source: &str, at: usize, kind: ParseErrorKind) -> Self {
        let prefix = source.get(..at).unwrap_or(source);
        let offset = prefix.chars().count();
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let column = prefix[line_start..].chars().count() + 1;
        Self {
            kind,
            offset,
            line,
            column,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Human-readable description without position.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at {}:{}: {}",
            self.line, self.column, self.kind
        )
    }
}

impl std::error::Error for ParseError {}
