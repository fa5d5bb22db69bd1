use std::fmt::{Display, Formatter};
use std::ops::BitXor;

/// Three-valued truth assignment of a single variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Value {
    True,
    False,
    #[default]
    Unassigned,
}

impl Value {
    pub const fn is_assigned(self) -> bool {
        !matches!(self, Value::Unassigned)
    }

    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Value::True => Some(true),
            Value::False => Some(false),
            Value::Unassigned => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

impl From<Option<bool>> for Value {
    fn from(b: Option<bool>) -> Self {
        b.map_or(Value::Unassigned, Value::from)
    }
}

// Into<Option<bool>>
impl From<Value> for Option<bool> {
    fn from(value: Value) -> Self {
        value.as_bool()
    }
}

// Value ^ bool
impl BitXor<bool> for Value {
    type Output = Value;

    fn bitxor(self, rhs: bool) -> Self::Output {
        match self {
            Value::True => Value::from(!rhs),
            Value::False => Value::from(rhs),
            Value::Unassigned => Value::Unassigned,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::True => write!(f, "1"),
            Value::False => write!(f, "0"),
            Value::Unassigned => write!(f, "X"),
        }
    }
}
