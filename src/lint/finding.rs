use std::fmt;

use crate::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Warning,
    Error,
}

/// The check that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Check {
    Syntax,
    BareLiteral,
    Complexity,
    Tautology,
    Contradiction,
}

impl Check {
    /// Stable identifier used in reports.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Check::Syntax => "CND001",
            Check::BareLiteral => "CND002",
            Check::Complexity => "CND003",
            Check::Tautology => "CND004",
            Check::Contradiction => "CND005",
        }
    }

    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Check::Syntax => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// A reported problem with one condition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Finding {
    check: Check,
    severity: Severity,
    message: String,
    location: Location,
}

impl Finding {
    pub(crate) fn new(check: Check, message: String, location: Location) -> Self {
        Self {
            check,
            severity: check.severity(),
            message,
            location,
        }
    }

    #[must_use]
    pub fn check(&self) -> Check {
        self.check
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location of the owning `<Condition>` element.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}[{}]: {}",
            self.location,
            self.severity,
            self.check.code(),
            self.message
        )
    }
}
