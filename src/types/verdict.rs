use std::fmt;

/// Logical classification of a condition over all truth assignments to its
/// atomic propositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// True under every assignment.
    Tautology,
    /// False under every assignment.
    Contradiction,
    /// Both outcomes occur, or no claim could be made.
    Normal,
}

impl Verdict {
    #[must_use]
    pub fn is_normal(self) -> bool {
        self == Verdict::Normal
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Tautology => write!(f, "tautology"),
            Verdict::Contradiction => write!(f, "contradiction"),
            Verdict::Normal => write!(f, "normal"),
        }
    }
}

/// Detailed result of [`classify_with()`](crate::classify_with).
///
/// Besides the verdict it records how much of the truth table was looked
/// at, so the atom-ceiling fallback is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Classification {
    verdict: Verdict,
    atom_count: usize,
    rows_evaluated: u64,
    rows_skipped: u64,
    enumerated: bool,
}

impl Classification {
    pub(crate) fn new(
        verdict: Verdict,
        atom_count: usize,
        rows_evaluated: u64,
        rows_skipped: u64,
        enumerated: bool,
    ) -> Self {
        Self {
            verdict,
            atom_count,
            rows_evaluated,
            rows_skipped,
            enumerated,
        }
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Number of distinct atomic propositions in the condition.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    /// Truth-table rows the formula was evaluated on.
    #[must_use]
    pub fn rows_evaluated(&self) -> u64 {
        self.rows_evaluated
    }

    /// Rows discarded as impossible under the equality model.
    #[must_use]
    pub fn rows_skipped(&self) -> u64 {
        self.rows_skipped
    }

    /// `false` when the atom count exceeded the ceiling and the verdict is
    /// `Normal` by default rather than by enumeration.
    #[must_use]
    pub fn enumerated(&self) -> bool {
        self.enumerated
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} atoms", self.verdict, self.atom_count)?;
        if self.enumerated {
            write!(
                f,
                ", {} rows evaluated, {} skipped)",
                self.rows_evaluated, self.rows_skipped
            )
        } else {
            write!(f, ", not enumerated)")
        }
    }
}
