use tracing::{debug, trace};

use crate::compile::Formula;
use crate::{AnalysisConfig, Atom, Classification, EqualityModel, Expr, Verdict};

/// A pair of atom values that cannot hold together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Exclusion {
    a: usize,
    a_val: bool,
    b: usize,
    b_val: bool,
}

impl Exclusion {
    fn excludes(&self, row: u64) -> bool {
        bit(row, self.a) == self.a_val && bit(row, self.b) == self.b_val
    }
}

fn bit(row: u64, i: usize) -> bool {
    (row >> i) & 1 == 1
}

/// Classify `expr` as a tautology, contradiction or normal predicate using
/// the default [`AnalysisConfig`].
///
/// # Example
///
/// ```
/// use condlint::{classify, parse, Verdict};
///
/// assert_eq!(classify(&parse("1 = 1").unwrap()), Verdict::Tautology);
/// assert_eq!(classify(&parse(r#"request.verb = "GET""#).unwrap()), Verdict::Normal);
/// ```
pub fn classify(expr: &Expr) -> Verdict {
    classify_with(expr, &AnalysisConfig::default()).verdict()
}

/// Enumerate the truth table of `expr` and report the verdict along with how
/// much work was done.
///
/// When the number of distinct atoms exceeds [`AnalysisConfig::max_atoms`]
/// no rows are evaluated and the verdict is [`Verdict::Normal`], with
/// [`Classification::enumerated`] returning `false`.
pub fn classify_with(expr: &Expr, config: &AnalysisConfig) -> Classification {
    let formula = Formula::compile(expr);
    let atom_count = formula.atoms.len();

    if atom_count > config.max_atoms() {
        debug!(
            atoms = atom_count,
            ceiling = config.max_atoms(),
            "atom ceiling exceeded, truth table not enumerated"
        );
        return Classification::new(Verdict::Normal, atom_count, 0, 0, false);
    }

    let exclusions = match config.equality() {
        EqualityModel::Exclusive => exclusions(&formula.atoms),
        EqualityModel::Independent => Vec::new(),
    };

    let mut seen_true = false;
    let mut seen_false = false;
    let mut rows_evaluated = 0_u64;
    let mut rows_skipped = 0_u64;
    let mut stack = Vec::with_capacity(formula.program.len());

    for row in 0..(1_u64 << atom_count) {
        if exclusions.iter().any(|e| e.excludes(row)) {
            rows_skipped += 1;
            continue;
        }
        rows_evaluated += 1;
        if formula.eval(row, &mut stack) {
            seen_true = true;
        } else {
            seen_false = true;
        }
        if seen_true && seen_false {
            break;
        }
    }

    let verdict = match (seen_true, seen_false) {
        (true, false) => Verdict::Tautology,
        (false, true) => Verdict::Contradiction,
        _ => Verdict::Normal,
    };
    trace!(
        %verdict,
        atoms = atom_count,
        rows_evaluated,
        rows_skipped,
        "truth table classified"
    );
    Classification::new(verdict, atom_count, rows_evaluated, rows_skipped, true)
}

/// Pairwise constraints between `=`/`!=` atoms on the same variable.
///
/// A variable holds a single value, so for literals `v1 != v2`:
/// `x = v1` and `x = v2` are never both true, `x = v1` forces `x != v2`,
/// and `x != v1`, `x != v2` are never both false. `x = v` and `x != v`
/// always disagree. Pairs whose literals cannot be compared statically are
/// left unconstrained.
fn exclusions(atoms: &[Atom]) -> Vec<Exclusion> {
    let facts: Vec<_> = atoms.iter().map(Atom::equality).collect();
    let mut out = Vec::new();
    let mut forbid = |a: usize, a_val: bool, b: usize, b_val: bool| {
        out.push(Exclusion { a, a_val, b, b_val });
    };

    for i in 0..facts.len() {
        let Some((var_i, val_i, eq_i)) = facts[i] else {
            continue;
        };
        for j in (i + 1)..facts.len() {
            let Some((var_j, val_j, eq_j)) = facts[j] else {
                continue;
            };
            if var_i != var_j {
                continue;
            }
            let Some(same_value) = val_i.equals(val_j) else {
                continue;
            };
            match (eq_i, eq_j, same_value) {
                // x = v1, x = v2
                (true, true, false) => forbid(i, true, j, true),
                // x != v1, x != v2
                (false, false, false) => forbid(i, false, j, false),
                // x = v1, x != v2
                (true, false, false) => forbid(i, true, j, false),
                (false, true, false) => forbid(i, false, j, true),
                // same value, same operator: equivalent atoms
                (true, true, true) | (false, false, true) => {
                    forbid(i, true, j, false);
                    forbid(i, false, j, true);
                }
                // same value, opposite operators: complementary atoms
                (true, false, true) | (false, true, true) => {
                    forbid(i, true, j, true);
                    forbid(i, false, j, false);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, var};

    fn verdict(text: &str) -> Verdict {
        classify(&parse(text).unwrap())
    }

    fn independent(text: &str) -> Verdict {
        let config = AnalysisConfig::new().with_equality(EqualityModel::Independent);
        classify_with(&parse(text).unwrap(), &config).verdict()
    }

    #[test]
    fn literals() {
        assert_eq!(verdict("true"), Verdict::Tautology);
        assert_eq!(verdict("false"), Verdict::Contradiction);
        assert_eq!(verdict("null"), Verdict::Contradiction);
        assert_eq!(verdict(r#""x""#), Verdict::Tautology);
    }

    #[test]
    fn constant_comparisons() {
        assert_eq!(verdict("1 = 1"), Verdict::Tautology);
        assert_eq!(verdict("1 = 2"), Verdict::Contradiction);
        assert_eq!(verdict(r#""/v1/a" =| "/v1""#), Verdict::Tautology);
        assert_eq!(verdict(r#""abc" ~~ "a.c""#), Verdict::Tautology);
        assert_eq!(verdict(r#""/a/b" ~/ "/a/*""#), Verdict::Tautology);
    }

    #[test]
    fn single_comparison_is_normal() {
        assert_eq!(verdict(r#"request.verb = "GET""#), Verdict::Normal);
        assert_eq!(verdict("flag"), Verdict::Normal);
    }

    #[test]
    fn excluded_middle_and_contradiction() {
        assert_eq!(verdict("a or not a"), Verdict::Tautology);
        assert_eq!(verdict("a and not a"), Verdict::Contradiction);
        assert_eq!(verdict("a = 1 or !(a = 1)"), Verdict::Tautology);
        assert_eq!(verdict("a implies a"), Verdict::Tautology);
    }

    #[test]
    fn literal_absorbed_by_connective() {
        assert_eq!(verdict("true or a"), Verdict::Tautology);
        assert_eq!(verdict("false and a"), Verdict::Contradiction);
        assert_eq!(verdict("true and a"), Verdict::Normal);
    }

    #[test]
    fn conflicting_equalities_on_same_variable() {
        assert_eq!(verdict("a = 1 and a = 2"), Verdict::Contradiction);
        assert_eq!(verdict("a = 1 or a != 1"), Verdict::Tautology);
        assert_eq!(verdict("a != 1 or a != 2"), Verdict::Tautology);
        assert_eq!(verdict(r#"a = "x" and a != "y""#), Verdict::Normal);
        assert_eq!(verdict("a = 1 and b = 2"), Verdict::Normal);
    }

    #[test]
    fn independent_model_does_not_relate_equalities() {
        assert_eq!(independent("a = 1 and a = 2"), Verdict::Normal);
        assert_eq!(independent("a = 1 or a != 1"), Verdict::Normal);
        assert_eq!(independent("a and not a"), Verdict::Contradiction);
    }

    #[test]
    fn incomparable_literals_are_not_related() {
        assert_eq!(verdict(r#"a = 1 and a = "2""#), Verdict::Normal);
    }

    #[test]
    fn exclusions_for_same_variable() {
        let expr = parse("a = 1 and a = 2 and b = 1").unwrap();
        let formula = Formula::compile(&expr);
        let ex = exclusions(&formula.atoms);
        assert_eq!(
            ex,
            vec![Exclusion {
                a: 0,
                a_val: true,
                b: 1,
                b_val: true
            }]
        );
    }

    #[test]
    fn ceiling_falls_back_to_normal() {
        let mut expr = var("v0").eq(0);
        for i in 1..=21 {
            expr = expr.and(var(&format!("v{i}")).eq(i));
        }
        // a contradiction the ceiling prevents us from proving
        expr = expr.and(Expr::literal(false));

        let result = classify_with(&expr, &AnalysisConfig::default());
        assert_eq!(result.verdict(), Verdict::Normal);
        assert_eq!(result.atom_count(), 22);
        assert!(!result.enumerated());
        assert_eq!(result.rows_evaluated(), 0);
    }

    #[test]
    fn enumeration_stops_once_both_outcomes_seen() {
        let expr = parse("a and b and c").unwrap();
        let result = classify_with(&expr, &AnalysisConfig::default());
        assert_eq!(result.verdict(), Verdict::Normal);
        assert!(result.enumerated());
        // row 0 is false; rows 1..6 are false; row 7 (all true) is the first true
        assert_eq!(result.rows_evaluated(), 8);
    }

    #[test]
    fn skipped_rows_are_counted() {
        let result = classify_with(&parse("a = 1 and a = 2").unwrap(), &AnalysisConfig::default());
        assert_eq!(result.verdict(), Verdict::Contradiction);
        assert_eq!(result.rows_evaluated(), 3);
        assert_eq!(result.rows_skipped(), 1);
    }
}
