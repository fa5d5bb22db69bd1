use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// A literal: nonzero signed integer, magnitude is the variable, sign is the polarity.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Lit(i32);

impl Lit {
    pub const fn new(val: i32) -> Self {
        debug_assert!(val != 0 && val != i32::MIN, "literal must be nonzero and negatable");
        Lit(val)
    }

    /// Returns `None` for zero and for `i32::MIN`, whose negation does not fit.
    pub const fn try_new(val: i32) -> Option<Self> {
        if val == 0 || val == i32::MIN {
            None
        } else {
            Some(Lit(val))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn var(self) -> u32 {
        self.get().unsigned_abs()
    }

    pub const fn sign(self) -> i32 {
        self.get().signum()
    }

    pub const fn is_negated(self) -> bool {
        self.0 < 0
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl<L> From<&L> for Lit
where
    L: Into<Lit> + Copy,
{
    fn from(val: &L) -> Self {
        (*val).into()
    }
}

impl From<i32> for Lit {
    fn from(val: i32) -> Self {
        Self::new(val)
    }
}

// Into<i32>
impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.get()
    }
}

// -Lit
impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
