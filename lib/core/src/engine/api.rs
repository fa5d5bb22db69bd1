use std::borrow::Cow;

use crate::cnf::Formula;
use crate::eval::check_match;
use crate::model::Match;

use super::types::*;

/// The solving engine a [Handle][crate::handle::Handle] delegates to.
///
/// Engines never mutate the formula or the match they are given.
pub trait Engine {
    /// Return the signature of the engine.
    fn signature(&self) -> Cow<'_, str>;

    /// Forget everything learned about the previous formula.
    fn reset(&mut self);

    /// Search for a satisfying assignment of `formula`.
    fn solve(&mut self, formula: &Formula) -> Result<Solution>;

    /// Check whether `assignment` satisfies `formula`.
    ///
    /// `Ok(false)` is a regular verdict; `Err` means the check could not be completed.
    fn verify(&self, formula: &Formula, assignment: &Match) -> Result<bool> {
        check_match(formula, assignment)
    }

    /// Counters of the last search.
    fn stats(&self) -> Stats;
}
