use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use log::{debug, trace};
use snafu::{ensure, ResultExt};

use crate::cnf::{Clause, Formula};
use crate::lit::Lit;
use crate::model::Match;
use crate::options::{Options, DEFAULT_OPTIONS};
use crate::value::Value;

use super::types::*;
use super::Engine;

#[derive(Debug, Copy, Clone)]
struct Decision {
    lit: Lit,
    trail_start: usize,
    flipped: bool,
}

#[derive(Debug, Copy, Clone)]
enum ClauseState {
    Satisfied,
    Conflict,
    Unit(Lit),
    Unresolved(Lit),
}

/// Chronological-backtracking DPLL with unit propagation.
#[derive(Debug)]
pub struct Dpll {
    options: Options,
    assignment: Vec<Value>, // {var: value}, index 0 is unused
    trail: Vec<Lit>,
    decisions: Vec<Decision>,
    stats: Stats,
}

impl Dpll {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_OPTIONS)
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            assignment: Vec::new(),
            trail: Vec::new(),
            decisions: Vec::new(),
            stats: Stats::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl Default for Dpll {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Dpll {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

fn reserve_values(num_vars: usize, len: usize) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    values.try_reserve_exact(len).context(OutOfMemorySnafu { num_vars })?;
    Ok(values)
}

impl Dpll {
    fn value(&self, lit: Lit) -> Value {
        self.assignment[lit.var() as usize] ^ lit.is_negated()
    }

    fn assign(&mut self, lit: Lit) {
        debug_assert_eq!(self.value(lit), Value::Unassigned);
        self.assignment[lit.var() as usize] = Value::from(!lit.is_negated());
        self.trail.push(lit);
    }

    /// Unassign everything on the trail past `len`.
    fn undo(&mut self, len: usize) {
        for lit in self.trail.drain(len..) {
            self.assignment[lit.var() as usize] = Value::Unassigned;
        }
    }

    fn clause_state(&self, clause: &Clause) -> ClauseState {
        let mut first_free = None;
        let mut num_free = 0;
        for &lit in clause {
            match self.value(lit) {
                Value::True => return ClauseState::Satisfied,
                Value::False => {}
                Value::Unassigned => {
                    first_free.get_or_insert(lit);
                    num_free += 1;
                }
            }
        }
        match first_free {
            None => ClauseState::Conflict,
            Some(lit) if num_free == 1 => ClauseState::Unit(lit),
            Some(lit) => ClauseState::Unresolved(lit),
        }
    }

    /// Assign unit literals until fixpoint. Returns `false` on conflict.
    fn propagate(&mut self, formula: &Formula) -> bool {
        loop {
            let mut changed = false;
            for clause in formula {
                match self.clause_state(clause) {
                    ClauseState::Satisfied | ClauseState::Unresolved(_) => {}
                    ClauseState::Conflict => {
                        self.stats.conflicts += 1;
                        return false;
                    }
                    ClauseState::Unit(lit) => {
                        self.assign(lit);
                        self.stats.propagations += 1;
                        changed = true;
                    }
                }
            }
            if !changed {
                return true;
            }
        }
    }

    fn pick_branching_literal(&self, formula: &Formula) -> Option<Lit> {
        formula.iter().find_map(|clause| match self.clause_state(clause) {
            ClauseState::Unresolved(lit) => {
                let pos = Lit::new(lit.var() as i32);
                Some(if self.options.phase { pos } else { -pos })
            }
            _ => None,
        })
    }

    /// Undo decisions up to the latest one not yet flipped, and flip it.
    /// Returns `false` when the search space is exhausted.
    fn backtrack(&mut self) -> bool {
        while let Some(decision) = self.decisions.pop() {
            self.undo(decision.trail_start);
            if !decision.flipped {
                trace!("flip {} at level {}", decision.lit, self.decisions.len() + 1);
                self.decisions.push(Decision {
                    lit: -decision.lit,
                    trail_start: self.trail.len(),
                    flipped: true,
                });
                self.assign(-decision.lit);
                return true;
            }
        }
        false
    }

    fn search(&mut self, formula: &Formula) -> Result<bool> {
        loop {
            if !self.propagate(formula) {
                if !self.backtrack() {
                    return Ok(false);
                }
                continue;
            }

            let Some(lit) = self.pick_branching_literal(formula) else {
                return Ok(true);
            };

            if let Some(limit) = self.options.max_decisions {
                ensure!(self.stats.decisions < limit, BudgetExhaustedSnafu { limit });
            }
            self.stats.decisions += 1;
            trace!("decide {} at level {}", lit, self.decisions.len() + 1);
            self.decisions.push(Decision {
                lit,
                trail_start: self.trail.len(),
                flipped: false,
            });
            self.assign(lit);
        }
    }

    fn model(&self, num_vars: usize) -> Result<Match> {
        let fill = self.options.fill_unassigned.then_some(Value::from(self.options.phase));
        let mut values = reserve_values(num_vars, num_vars)?;
        values.extend(self.assignment[1..=num_vars].iter().map(|&value| match (value, fill) {
            (Value::Unassigned, Some(default)) => default,
            _ => value,
        }));
        Ok(Match::from_values(values))
    }

    fn clear_search(&mut self) {
        self.assignment.clear();
        self.trail.clear();
        self.decisions.clear();
    }
}

impl Engine for Dpll {
    fn signature(&self) -> Cow<'_, str> {
        "dpll".into()
    }

    fn reset(&mut self) {
        self.clear_search();
        self.stats = Stats::default();
    }

    fn solve(&mut self, formula: &Formula) -> Result<Solution> {
        self.reset();

        let num_vars = formula.variable_count();
        self.assignment = reserve_values(num_vars, num_vars + 1)?;
        self.assignment.resize(num_vars + 1, Value::Unassigned);

        if formula.iter().any(Clause::is_empty) {
            debug!("Formula contains an empty clause");
            self.clear_search();
            return Ok(Solution::Unsat);
        }

        let result = self.search(formula).and_then(|sat| {
            if sat {
                self.model(num_vars).map(Solution::Sat)
            } else {
                Ok(Solution::Unsat)
            }
        });
        let solution = match result {
            Ok(solution) => solution,
            Err(e) => {
                debug!("Search aborted: {}", e);
                self.clear_search();
                return Err(e);
            }
        };
        debug!(
            "{} after {} decisions, {} propagations, {} conflicts",
            solution, self.stats.decisions, self.stats.propagations, self.stats.conflicts
        );
        self.clear_search();
        Ok(solution)
    }

    fn stats(&self) -> Stats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::eval::check_match;

    fn solve(formula: &Formula) -> Result<Solution> {
        Dpll::new().solve(formula)
    }

    #[test]
    fn test_empty_formula_is_sat() -> color_eyre::Result<()> {
        let solution = solve(&Formula::new())?;
        assert_eq!(solution, Solution::Sat(Match::new()));
        Ok(())
    }

    #[test]
    fn test_empty_clause_is_unsat() -> color_eyre::Result<()> {
        let formula = Formula::from_clauses(vec![Clause::from([1]), Clause::default()]);
        assert_eq!(solve(&formula)?, Solution::Unsat);
        Ok(())
    }

    #[test]
    fn test_simple_sat() -> color_eyre::Result<()> {
        let formula = Formula::from([vec![1, -2], vec![2, 3]]);
        let Solution::Sat(model) = solve(&formula)? else {
            panic!("expected SAT");
        };
        assert_eq!(model.len(), 3);
        assert!(check_match(&formula, &model)?);
        Ok(())
    }

    #[test]
    fn test_simple_unsat() -> color_eyre::Result<()> {
        // (1 or 2) and (-1 or 2) and (1 or -2) and (-1 or -2)
        let formula = Formula::from([[1, 2], [-1, 2], [1, -2], [-1, -2]]);
        assert_eq!(solve(&formula)?, Solution::Unsat);
        Ok(())
    }

    #[test]
    fn test_units_propagate() -> color_eyre::Result<()> {
        let formula = Formula::from([vec![1], vec![-1, 2], vec![-2, -3]]);
        let mut dpll = Dpll::new();
        let solution = dpll.solve(&formula)?;
        let expected = Match::from(vec![true, true, false]);
        assert_eq!(solution, Solution::Sat(expected));
        assert_eq!(dpll.stats().decisions, 0);
        assert_eq!(dpll.stats().propagations, 3);
        Ok(())
    }

    #[test]
    fn test_dont_care_variables() -> color_eyre::Result<()> {
        // Variable 2 is never constrained once 1 is forced.
        let formula = Formula::from([vec![1], vec![1, 2]]);
        let solution = Dpll::new().solve(&formula)?;
        assert_eq!(solution, Solution::Sat([Value::True, Value::Unassigned].into_iter().collect()));

        let options = Options {
            fill_unassigned: true,
            phase: true,
            ..DEFAULT_OPTIONS
        };
        let solution = Dpll::with_options(options).solve(&formula)?;
        assert_eq!(solution, Solution::Sat(Match::from(vec![true, true])));
        Ok(())
    }

    #[test]
    fn test_phase_selects_polarity() -> color_eyre::Result<()> {
        let formula = Formula::from([[1, 2]]);
        let negative = Dpll::new().solve(&formula)?;
        assert_eq!(negative, Solution::Sat(Match::from(vec![false, true])));

        let options = Options { phase: true, ..DEFAULT_OPTIONS };
        let positive = Dpll::with_options(options).solve(&formula)?;
        assert_eq!(positive, Solution::Sat([Value::True, Value::Unassigned].into_iter().collect()));
        Ok(())
    }

    #[test]
    fn test_pigeonhole_unsat() -> color_eyre::Result<()> {
        // 3 pigeons, 2 holes: p(i, j) = 2*i + j + 1
        let p = |i: i32, j: i32| 2 * i + j + 1;
        let mut formula = Formula::new();
        for i in 0..3 {
            formula.add_clause([p(i, 0), p(i, 1)]);
        }
        for j in 0..2 {
            for a in 0..3 {
                for b in (a + 1)..3 {
                    formula.add_clause([-p(a, j), -p(b, j)]);
                }
            }
        }
        let mut dpll = Dpll::new();
        assert_eq!(dpll.solve(&formula)?, Solution::Unsat);
        assert!(dpll.stats().conflicts > 0);
        Ok(())
    }

    #[test]
    fn test_budget_exhausted() {
        let formula = Formula::from([vec![1, 2, 3], vec![-1, -2], vec![-2, -3], vec![-1, -3], vec![4, 5]]);
        let options = Options {
            max_decisions: Some(0),
            ..DEFAULT_OPTIONS
        };
        let mut dpll = Dpll::with_options(options);
        let err = dpll.solve(&formula).unwrap_err();
        assert!(matches!(err, EngineError::BudgetExhausted { limit: 0 }));

        // Nothing from the aborted search survives.
        assert!(dpll.assignment.is_empty());
        assert!(dpll.trail.is_empty());
    }

    #[test]
    fn test_unreservable_values_are_reported() {
        let err = reserve_values(usize::MAX, usize::MAX).unwrap_err();
        assert!(matches!(err, EngineError::OutOfMemory { num_vars: usize::MAX, .. }));
    }

    #[test]
    fn test_solve_does_not_leak_between_calls() -> color_eyre::Result<()> {
        let mut dpll = Dpll::new();
        let first = Formula::from([[1, 2], [-1, 2], [1, -2], [-1, -2]]);
        assert_eq!(dpll.solve(&first)?, Solution::Unsat);
        let second = Formula::from([[-1]]);
        assert_eq!(dpll.solve(&second)?, Solution::Sat(Match::from(vec![false])));
        Ok(())
    }
}
