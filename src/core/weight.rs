use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

/// Weight of an edge. Weights are non-negative integers.
pub type Weight = u64;

/// Length of a path from the source vertex, or "infinity" for vertices not
/// (yet) reached.
///
/// The largest `u64` value is reserved as the infinity sentinel. Additions
/// saturate, so adding anything to infinity is still infinity and a sum that
/// would not fit collapses to infinity instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(u64);

impl Distance {
    pub const ZERO: Distance = Distance(0);
    pub const INFINITY: Distance = Distance(u64::MAX);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn is_finite(&self) -> bool {
        *self != Self::INFINITY
    }

    /// Returns the distance as an integer, or `None` for infinity.
    pub fn get(&self) -> Option<u64> {
        self.is_finite().then_some(self.0)
    }
}

impl From<u64> for Distance {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl Add<Weight> for Distance {
    type Output = Distance;

    fn add(self, weight: Weight) -> Self::Output {
        Distance(self.0.saturating_add(weight))
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Self::Output {
        Distance(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, other: Distance) {
        *self = *self + other;
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Distance::ZERO, Add::add)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("inf"),
        }
    }
}
