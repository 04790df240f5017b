use std::{
    fmt::{Display, Formatter},
    ops::Add,
};

use serde::Serialize;

/// Low and high end of an estimate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[must_use]
pub struct Bounds<T> {
    pub low: T,
    pub high: T,
}

impl<T> Bounds<T> {
    pub const fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Bounds<U> {
        Bounds { low: f(self.low), high: f(self.high) }
    }

    /// Pair the low ends together and the high ends together.
    pub fn zip<U>(self, other: Bounds<U>) -> Bounds<(T, U)> {
        Bounds { low: (self.low, other.low), high: (self.high, other.high) }
    }
}

impl<T: Copy> Bounds<T> {
    /// Both ends are the same value.
    pub const fn flat(value: T) -> Self {
        Self { low: value, high: value }
    }
}

impl<T: PartialOrd> Bounds<T> {
    pub fn is_flat(&self) -> bool {
        self.low == self.high
    }

    pub fn is_ordered(&self) -> bool {
        self.low <= self.high
    }
}

impl<T: Add<Output = T>> Add for Bounds<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { low: self.low + rhs.low, high: self.high + rhs.high }
    }
}

impl<T: Display> Display for Bounds<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*} to {:.*}", precision, self.low, precision, self.high),
            None => write!(f, "{} to {}", self.low, self.high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::currency::Pounds;

    #[test]
    fn test_add() {
        let total = Bounds::new(Pounds(1.0), Pounds(2.0)) + Bounds::new(Pounds(10.0), Pounds(20.0));
        assert_eq!(total, Bounds::new(Pounds(11.0), Pounds(22.0)));
    }

    #[test]
    fn test_zip() {
        let zipped = Bounds::new(1, 2).zip(Bounds::new('a', 'b'));
        assert_eq!(zipped, Bounds::new((1, 'a'), (2, 'b')));
    }

    #[test]
    fn test_display() {
        let bounds = Bounds::new(Pounds(876.0), Pounds(2336.0));
        assert_eq!(bounds.to_string(), "£876.00 to £2336.00");
        assert_eq!(format!("{bounds:.0}"), "£876 to £2336");
    }
}
