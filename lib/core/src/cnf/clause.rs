use std::fmt::{Display, Formatter};
use std::slice::Iter;

use itertools::Itertools;

use crate::lit::Lit;

/// Disjunction of literals.
///
/// Literal order is kept as given, so equality is order-sensitive.
/// An empty clause is allowed and can never be satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Clause {
    pub lits: Vec<Lit>,
}

impl Clause {
    pub fn new(lits: Vec<Lit>) -> Self {
        Clause { lits }
    }

    pub fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// Largest variable index in this clause, `0` for an empty clause.
    pub fn max_var(&self) -> usize {
        self.lits.iter().map(|lit| lit.var() as usize).max().unwrap_or(0)
    }
}

impl<I> From<I> for Clause
where
    I: IntoIterator,
    I::Item: Into<Lit>,
{
    fn from(iter: I) -> Self {
        Self::new(iter.into_iter().map_into::<Lit>().collect())
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for lit in self.lits.iter() {
            list.entry(&format_args!("{}", lit));
        }
        list.finish()
    }
}
