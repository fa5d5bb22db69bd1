use std::borrow::Cow;

use log::debug;

use crate::cnf::Formula;
use crate::engine::{Dpll, Engine, Result, Solution, Stats};
use crate::model::Match;

#[derive(Debug)]
struct Outcome {
    satisfiable: bool,
    model: Match,
}

/// One engine bound to one formula.
///
/// Solving is lazy: the engine runs on the first result request and the
/// outcome is cached until the handle is rebound.
#[derive(Debug)]
pub struct Handle<E: Engine = Dpll> {
    engine: E,
    formula: Formula,
    outcome: Option<Outcome>,
}

impl<E: Engine> Handle<E> {
    pub fn construct(formula: Formula, engine: E) -> Self {
        debug!(
            "Constructing handle: {} clauses over {} variables, engine '{}'",
            formula.num_clauses(),
            formula.variable_count(),
            engine.signature()
        );
        Self {
            engine,
            formula,
            outcome: None,
        }
    }

    /// Drop the held formula and match, and take `formula` instead.
    pub fn rebind(&mut self, formula: Formula) {
        debug!(
            "Rebinding handle: {} clauses over {} variables",
            formula.num_clauses(),
            formula.variable_count()
        );
        self.outcome = None;
        self.engine.reset();
        self.formula = formula;
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn variable_count(&self) -> usize {
        self.formula.variable_count()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn signature(&self) -> Cow<'_, str> {
        self.engine.signature()
    }

    pub fn stats(&self) -> Stats {
        self.engine.stats()
    }

    /// Whether the engine already ran on the current formula.
    pub fn is_solved(&self) -> bool {
        self.outcome.is_some()
    }

    fn outcome(&mut self) -> Result<&Outcome> {
        let outcome = match self.outcome.take() {
            Some(outcome) => outcome,
            None => match self.engine.solve(&self.formula)? {
                Solution::Sat(model) => Outcome { satisfiable: true, model },
                Solution::Unsat => Outcome {
                    satisfiable: false,
                    model: Match::new(),
                },
            },
        };
        Ok(self.outcome.insert(outcome))
    }

    /// The assignment found for the held formula, empty if there is none.
    pub fn current_match(&mut self) -> Result<&Match> {
        Ok(&self.outcome()?.model)
    }

    pub fn is_satisfiable(&mut self) -> Result<bool> {
        Ok(self.outcome()?.satisfiable)
    }

    /// Check `assignment` against the held formula.
    pub fn verify(&self, assignment: &Match) -> Result<bool> {
        self.engine.verify(&self.formula, assignment)
    }

    /// Release the formula, the match and the engine.
    pub fn destroy(self) {
        debug!("Destroying handle over {} clauses", self.formula.num_clauses());
    }
}
