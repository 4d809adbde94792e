//! Condition checks built on the analysis engine, and extraction of
//! conditions from proxy XML.

mod finding;
mod xml;

pub use finding::{Check, Finding, Severity};
pub use xml::{conditions_from_xml, lint_file, lint_xml};

use crate::{AnalysisConfig, Condition, Verdict};

/// Default complexity above which a condition is reported.
pub const DEFAULT_COMPLEXITY_THRESHOLD: usize = 12;

/// Thresholds for the condition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LintConfig {
    analysis: AnalysisConfig,
    complexity_threshold: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            complexity_threshold: DEFAULT_COMPLEXITY_THRESHOLD,
        }
    }
}

impl LintConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    /// Conditions with more nodes than this are reported.
    #[must_use]
    pub fn with_complexity_threshold(mut self, threshold: usize) -> Self {
        self.complexity_threshold = threshold;
        self
    }

    #[must_use]
    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    #[must_use]
    pub fn complexity_threshold(&self) -> usize {
        self.complexity_threshold
    }
}

/// Run every condition check against `condition`.
///
/// A condition that fails to parse yields a single [`Check::Syntax`]
/// finding; the semantic checks only run on parsed conditions.
///
/// ```
/// use condlint::lint::{check, Check, LintConfig};
/// use condlint::{Condition, Location};
///
/// let cond = Condition::new("1 = 1", Location::new(4, 3));
/// let findings = check(&cond, &LintConfig::default());
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].check(), Check::Tautology);
/// ```
#[must_use]
pub fn check(condition: &Condition, config: &LintConfig) -> Vec<Finding> {
    let location = condition.location();
    let expression = condition.expression().trim();

    if let Err(err) = condition.parse() {
        return vec![Finding::new(
            Check::Syntax,
            format!(
                "condition '{expression}' cannot be parsed at {}:{}: {}",
                err.line(),
                err.column(),
                err.kind()
            ),
            location,
        )];
    }

    let mut findings = Vec::new();

    if condition.has_bare_literal() == Ok(true) {
        findings.push(Finding::new(
            Check::BareLiteral,
            format!("condition '{expression}' uses a literal as a predicate"),
            location,
        ));
    }

    if let Ok(complexity) = condition.complexity() {
        if complexity > config.complexity_threshold {
            findings.push(Finding::new(
                Check::Complexity,
                format!(
                    "condition '{expression}' has complexity {complexity}, above the limit of {}",
                    config.complexity_threshold
                ),
                location,
            ));
        }
    }

    match condition.verdict() {
        Ok(Verdict::Tautology) => findings.push(Finding::new(
            Check::Tautology,
            format!("condition '{expression}' is always true"),
            location,
        )),
        Ok(Verdict::Contradiction) => findings.push(Finding::new(
            Check::Contradiction,
            format!("condition '{expression}' is never true"),
            location,
        )),
        Ok(Verdict::Normal) | Err(_) => {}
    }

    findings
}
