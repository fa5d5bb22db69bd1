use std::fmt::{Debug, Display, Formatter};
use std::slice::Iter;

pub use clause::Clause;

pub mod clause;

/// Conjunction of clauses: a SAT instance.
///
/// The variable count is derived from the clauses and is kept up to date on
/// every insertion, so the fields are private.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    max_var: usize,
    clauses: Vec<Clause>,
}

impl Formula {
    pub const fn new() -> Self {
        Self {
            max_var: 0,
            clauses: Vec::new(),
        }
    }

    /// Builds a formula from already decoded clauses, computing the variable count.
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        let max_var = clauses.iter().map(Clause::max_var).max().unwrap_or(0);
        Self { max_var, clauses }
    }

    pub fn iter(&self) -> Iter<'_, Clause> {
        self.clauses.iter()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Maximum literal magnitude across all clauses.
    pub fn variable_count(&self) -> usize {
        self.max_var
    }

    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        let clause = clause.into();
        self.max_var = self.max_var.max(clause.max_var());
        self.clauses.push(clause);
    }

    pub fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }
}

impl<I> From<I> for Formula
where
    I: IntoIterator,
    I::Item: Into<Clause>,
{
    fn from(iter: I) -> Self {
        let mut formula = Self::new();
        for clause in iter.into_iter() {
            formula.add_clause(clause)
        }
        formula
    }
}

impl<'a> IntoIterator for &'a Formula {
    type Item = &'a Clause;
    type IntoIter = Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for clause in self.clauses.iter() {
            list.entry(&format_args!("{}", clause));
        }
        list.finish()
    }
}
