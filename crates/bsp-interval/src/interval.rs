//! Closed intervals of the real line.

use bsp_region::Location;

/// A closed, possibly unbounded interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// Creates the interval `[lower, upper]`; either bound may be infinite.
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper, "inverted interval bounds");
        Self { lower, upper }
    }

    /// Lower bound.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Length of the interval.
    pub fn size(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the interval.
    pub fn barycenter(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Classifies `point` against the interval, within `tolerance`.
    pub fn check_point(&self, point: f64, tolerance: f64) -> Location {
        if point < self.lower - tolerance || point > self.upper + tolerance {
            Location::Outside
        } else if point > self.lower + tolerance && point < self.upper - tolerance {
            Location::Inside
        } else {
            Location::Boundary
        }
    }
}
