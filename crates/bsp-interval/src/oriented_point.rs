//! Oriented points: the hyperplanes of the real line.

use bsp_region::{Hyperplane, Split, SubHyperplane};

/// A hyperplane of the one-dimensional real line: a point with an
/// orientation.
///
/// With `direct == true` the plus half-line extends toward positive
/// infinity, otherwise toward negative infinity. An oriented point at `l`
/// with `direct == false` therefore keeps `x >= l` on its minus side, which
/// is the side convex construction retains.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedPoint {
    location: f64,
    direct: bool,
    tolerance: f64,
}

impl OrientedPoint {
    /// Creates an oriented point at `location`.
    pub fn new(location: f64, direct: bool, tolerance: f64) -> Self {
        Self {
            location,
            direct,
            tolerance,
        }
    }

    /// Coordinate of the point.
    #[inline]
    pub fn location(&self) -> f64 {
        self.location
    }

    /// `true` when the plus side extends toward positive infinity.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.direct
    }

    /// Returns the same point with the opposite orientation.
    pub fn reversed(&self) -> Self {
        Self {
            location: self.location,
            direct: !self.direct,
            tolerance: self.tolerance,
        }
    }
}

impl Hyperplane for OrientedPoint {
    type Point = f64;
    type Sub = SubOrientedPoint;

    fn offset(&self, point: &f64) -> f64 {
        if self.direct {
            point - self.location
        } else {
            self.location - point
        }
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direct == other.direct
    }

    fn whole_hyperplane(&self) -> SubOrientedPoint {
        SubOrientedPoint::new(self.clone())
    }
}

/// The sub-hyperplane of an [`OrientedPoint`]: the point itself, since a
/// zero-dimensional hyperplane cannot be subdivided.
#[derive(Debug, Clone)]
pub struct SubOrientedPoint {
    hyperplane: OrientedPoint,
}

impl SubOrientedPoint {
    fn new(hyperplane: OrientedPoint) -> Self {
        Self { hyperplane }
    }

    /// Coordinate of the underlying point.
    #[inline]
    pub fn location(&self) -> f64 {
        self.hyperplane.location()
    }
}

impl SubHyperplane for SubOrientedPoint {
    type Hyperplane = OrientedPoint;

    fn hyperplane(&self) -> &OrientedPoint {
        &self.hyperplane
    }

    fn is_empty(&self) -> bool {
        false
    }

    /// A point has zero measure, so a split lands wholly on one side or on
    /// the splitter itself; `Both` never occurs in one dimension.
    fn split(&self, splitter: &OrientedPoint) -> Split<Self> {
        let offset = splitter.offset(&self.hyperplane.location);
        if offset < -splitter.tolerance() {
            Split::Minus(self.clone())
        } else if offset > splitter.tolerance() {
            Split::Plus(self.clone())
        } else {
            Split::Coincident
        }
    }
}
