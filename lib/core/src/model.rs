use std::fmt::{Display, Formatter};
use std::ops::Index;
use std::slice::Iter;

use crate::lit::Lit;
use crate::value::Value;

/// Assignment of values to variables: `values[i]` belongs to variable `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Match {
    values: Vec<Value>,
}

impl Match {
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Value> {
        self.values.iter()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of variable `var` (1-based), `Unassigned` when out of range.
    pub fn value_var(&self, var: u32) -> Value {
        match (var as usize).checked_sub(1) {
            Some(index) => self.values.get(index).copied().unwrap_or_default(),
            None => Value::Unassigned,
        }
    }

    /// Value of the literal under this match.
    pub fn value_of(&self, lit: Lit) -> Value {
        self.value_var(lit.var()) ^ lit.is_negated()
    }
}

impl FromIterator<Value> for Match {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().collect())
    }
}

impl From<Vec<bool>> for Match {
    fn from(values: Vec<bool>) -> Self {
        values.into_iter().map(Value::from).collect()
    }
}

// match[index], 0-based
impl Index<usize> for Match {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<'a> IntoIterator for &'a Match {
    type Item = &'a Value;
    type IntoIter = Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Match {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for value in self.values.iter() {
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of_literals() {
        let m = Match::from(vec![true, false]);
        assert_eq!(m.value_of(Lit::new(1)), Value::True);
        assert_eq!(m.value_of(Lit::new(-1)), Value::False);
        assert_eq!(m.value_of(Lit::new(2)), Value::False);
        assert_eq!(m.value_of(Lit::new(-2)), Value::True);
    }

    #[test]
    fn test_out_of_range_is_unassigned() {
        let m = Match::from(vec![true]);
        assert_eq!(m.value_of(Lit::new(5)), Value::Unassigned);
        assert_eq!(m.value_of(Lit::new(-5)), Value::Unassigned);
        assert_eq!(m.value_var(0), Value::Unassigned);
    }

    #[test]
    fn test_display() {
        let m: Match = [Value::True, Value::Unassigned, Value::False].into_iter().collect();
        assert_eq!(m.to_string(), "1X0");
        assert_eq!(m.len(), 3);
    }
}
