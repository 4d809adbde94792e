use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

use super::config::AnalysisConfig;
use super::expr::Expr;
use super::verdict::{Classification, Verdict};
use crate::parse::ParseError;

/// Line and column (1-based) of the configuration element that owns a
/// condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One condition expression found in a proxy configuration.
///
/// The text is fixed at construction. The parse result and every analysis
/// derived from it are computed on first request and memoized, so several
/// checks can consult the same condition cheaply. A `Condition` is
/// `Send + Sync` and may be shared across threads.
///
/// # Example
///
/// ```
/// use condlint::{Condition, Location, Verdict};
///
/// let cond = Condition::new(r#"true and request.verb = "GET""#, Location::new(12, 5));
/// assert_eq!(cond.verdict(), Ok(Verdict::Normal));
/// assert_eq!(cond.has_bare_literal(), Ok(true));
/// assert_eq!(cond.complexity(), Ok(3));
/// ```
#[derive(Debug)]
pub struct Condition {
    expression: String,
    location: Location,
    config: AnalysisConfig,
    parsed: OnceLock<Result<Expr, ParseError>>,
    classification: OnceLock<Classification>,
    complexity: OnceLock<usize>,
    bare_literal: OnceLock<bool>,
}

impl Condition {
    #[must_use]
    pub fn new(expression: impl Into<String>, location: Location) -> Self {
        Self::with_config(expression, location, AnalysisConfig::default())
    }

    #[must_use]
    pub fn with_config(
        expression: impl Into<String>,
        location: Location,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            expression: expression.into(),
            location,
            config,
            parsed: OnceLock::new(),
            classification: OnceLock::new(),
            complexity: OnceLock::new(),
            bare_literal: OnceLock::new(),
        }
    }

    /// The raw condition text as it appeared in the configuration.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse the expression (once).
    ///
    /// # Errors
    ///
    /// Returns the memoized [`ParseError`] if the text is not a valid
    /// condition.
    pub fn parse(&self) -> Result<&Expr, &ParseError> {
        self.parsed
            .get_or_init(|| {
                let result = crate::parse::parse_with(&self.expression, &self.config);
                match &result {
                    Ok(_) => debug!(location = %self.location, "condition parsed"),
                    Err(err) => debug!(location = %self.location, %err, "condition failed to parse"),
                }
                result
            })
            .as_ref()
    }

    /// Truth-table classification with its enumeration statistics.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] if the expression does not parse.
    pub fn classification(&self) -> Result<Classification, &ParseError> {
        let expr = self.parse()?;
        Ok(*self
            .classification
            .get_or_init(|| crate::evaluate::classify_with(expr, &self.config)))
    }

    /// # Errors
    ///
    /// Returns the [`ParseError`] if the expression does not parse.
    pub fn verdict(&self) -> Result<Verdict, &ParseError> {
        self.classification().map(|c| c.verdict())
    }

    /// Node count as computed by [`count_nodes`](crate::count_nodes).
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] if the expression does not parse.
    pub fn complexity(&self) -> Result<usize, &ParseError> {
        let expr = self.parse()?;
        Ok(*self
            .complexity
            .get_or_init(|| crate::analyze::count_nodes(expr)))
    }

    /// # Errors
    ///
    /// Returns the [`ParseError`] if the expression does not parse.
    pub fn has_bare_literal(&self) -> Result<bool, &ParseError> {
        let expr = self.parse()?;
        Ok(*self
            .bare_literal
            .get_or_init(|| crate::analyze::has_bare_literal(expr)))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.expression.trim(), self.location)
    }
}
