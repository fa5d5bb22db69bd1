use std::collections::TryReserveError;
use std::fmt::{Display, Formatter};

use snafu::Snafu;

use crate::model::Match;

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

/// Abnormal engine failures, distinct from "no solution" and from a `false` verdict.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EngineError {
    #[snafu(display("Match has {} values, but the formula has {} variables", len, variable_count))]
    MatchTooShort { len: usize, variable_count: usize },

    #[snafu(display("Decision budget of {} exhausted", limit))]
    BudgetExhausted { limit: usize },

    #[snafu(display("Could not allocate assignment for {} variables: {}", num_vars, source))]
    OutOfMemory { num_vars: usize, source: TryReserveError },

    #[snafu(display("Engine failure: {}", message))]
    Internal { message: String },
}

/// Outcome of a completed search.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Solution {
    Sat(Match),
    Unsat,
}

impl Solution {
    pub fn is_sat(&self) -> bool {
        matches!(self, Solution::Sat(_))
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Solution::Sat(_) => write!(f, "SAT"),
            Solution::Unsat => write!(f, "UNSAT"),
        }
    }
}

/// Search counters of the last `solve` call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Stats {
    pub decisions: usize,
    pub propagations: usize,
    pub conflicts: usize,
}
