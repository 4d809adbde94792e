/// Default limit on parenthesis/`not` nesting and AST height.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default number of distinct atoms up to which the truth table is enumerated.
pub const DEFAULT_MAX_ATOMS: usize = 20;

/// Hard cap on [`AnalysisConfig::max_atoms`]; 2^30 rows is the most the
/// classifier will ever attempt.
pub const ATOM_CEILING_LIMIT: usize = 30;

/// How `=`/`!=` comparisons on the same variable relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EqualityModel {
    /// A variable holds one value at a time: `a = 1 and a = 2` is a
    /// contradiction, `a = 1 or a != 1` a tautology.
    #[default]
    Exclusive,
    /// Every comparison is an unrelated boolean.
    Independent,
}

/// Limits and semantic switches for parsing and classification.
///
/// # Example
///
/// ```
/// use condlint::{AnalysisConfig, EqualityModel};
///
/// let config = AnalysisConfig::new()
///     .with_max_atoms(12)
///     .with_equality(EqualityModel::Independent);
/// assert_eq!(config.max_atoms(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    max_depth: usize,
    max_atoms: usize,
    equality: EqualityModel,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_atoms: DEFAULT_MAX_ATOMS,
            equality: EqualityModel::default(),
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nesting depth accepted by the parser. Values below 1 are
    /// raised to 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Atom ceiling for truth-table enumeration, clamped to
    /// [`ATOM_CEILING_LIMIT`].
    #[must_use]
    pub fn with_max_atoms(mut self, max_atoms: usize) -> Self {
        self.max_atoms = max_atoms.min(ATOM_CEILING_LIMIT);
        self
    }

    #[must_use]
    pub fn with_equality(mut self, equality: EqualityModel) -> Self {
        self.equality = equality;
        self
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth.max(1)
    }

    #[must_use]
    pub fn max_atoms(&self) -> usize {
        self.max_atoms.min(ATOM_CEILING_LIMIT)
    }

    #[must_use]
    pub fn equality(&self) -> EqualityModel {
        self.equality
    }
}
