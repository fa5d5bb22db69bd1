use snafu::ensure;

use crate::cnf::{Clause, Formula};
use crate::engine::{MatchTooShortSnafu, Result};
use crate::model::Match;
use crate::value::Value;

/// Evaluate a clause: `True` if some literal is true, `False` if all are false,
/// `Unassigned` otherwise.
pub fn eval_clause(clause: &Clause, assignment: &Match) -> Value {
    let mut undecided = false;
    for &lit in clause {
        match assignment.value_of(lit) {
            Value::True => return Value::True,
            Value::False => {}
            Value::Unassigned => undecided = true,
        }
    }
    if undecided {
        Value::Unassigned
    } else {
        Value::False
    }
}

/// Check that `assignment` satisfies every clause of `formula`.
///
/// An unassigned literal does not satisfy its clause.
/// Fails when the match does not cover all variables of the formula.
pub fn check_match(formula: &Formula, assignment: &Match) -> Result<bool> {
    ensure!(
        assignment.len() >= formula.variable_count(),
        MatchTooShortSnafu {
            len: assignment.len(),
            variable_count: formula.variable_count(),
        }
    );
    Ok(formula
        .iter()
        .all(|clause| eval_clause(clause, assignment) == Value::True))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;

    fn assignment(values: &[Option<bool>]) -> Match {
        values.iter().map(|&v| Value::from(v)).collect()
    }

    #[test]
    fn test_check_match_conjunction_of_clauses() -> color_eyre::Result<()> {
        let formula = Formula::from([vec![1, -2], vec![2, 3]]);
        let m = Match::from(vec![true, true, false]);
        // (1 or -2) = true, (2 or 3) = true
        assert!(check_match(&formula, &m)?);

        let m = Match::from(vec![false, true, false]);
        // (1 or -2) = false
        assert!(!check_match(&formula, &m)?);
        Ok(())
    }

    #[test]
    fn test_check_match_too_short() {
        let formula = Formula::from([vec![1, -2], vec![2, 3]]);
        let m = Match::from(vec![true, true]);
        let err = check_match(&formula, &m).unwrap_err();
        assert!(matches!(err, EngineError::MatchTooShort { len: 2, variable_count: 3 }));
    }

    #[test]
    fn test_check_match_longer_is_fine() -> color_eyre::Result<()> {
        let formula = Formula::from([[1]]);
        assert!(check_match(&formula, &Match::from(vec![true, false, false]))?);
        Ok(())
    }

    #[test]
    fn test_unassigned_does_not_satisfy() -> color_eyre::Result<()> {
        let formula = Formula::from([vec![1, 2]]);
        assert!(!check_match(&formula, &assignment(&[None, None]))?);
        assert!(check_match(&formula, &assignment(&[None, Some(true)]))?);
        Ok(())
    }

    #[test]
    fn test_empty_formula_and_empty_clause() -> color_eyre::Result<()> {
        assert!(check_match(&Formula::new(), &Match::new())?);
        let formula = Formula::from_clauses(vec![Clause::default()]);
        assert!(!check_match(&formula, &Match::new())?);
        Ok(())
    }

    #[test]
    fn test_eval_clause() {
        let clause = Clause::from([1, -2]);
        assert_eq!(eval_clause(&clause, &assignment(&[Some(false), None])), Value::Unassigned);
        assert_eq!(eval_clause(&clause, &assignment(&[Some(false), Some(true)])), Value::False);
        assert_eq!(eval_clause(&clause, &assignment(&[None, Some(false)])), Value::True);
    }
}
