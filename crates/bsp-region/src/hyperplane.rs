//! Half-space primitives consumed by the BSP tree.
//!
//! The tree core never does point arithmetic itself. Concrete spaces plug in
//! through these two traits: a [`Hyperplane`] separates space into a *plus*
//! and a *minus* half-space via signed offsets, and a [`SubHyperplane`] is a
//! piece of a hyperplane small enough to serve as the cut of a single tree
//! cell.

use std::fmt::Debug;

/// An oriented hyperplane of dimension n-1 in an n-dimensional space.
///
/// Points with positive offset lie on the plus side, points with negative
/// offset on the minus side. Offsets smaller in magnitude than the tolerance
/// count as lying on the hyperplane itself.
pub trait Hyperplane: Clone + Debug + Sized {
    /// Point type of the underlying space.
    type Point: Clone + Debug;

    /// Sub-hyperplane type stored as tree cuts.
    type Sub: SubHyperplane<Hyperplane = Self>;

    /// Signed distance from the point to the hyperplane.
    fn offset(&self, point: &Self::Point) -> f64;

    /// Distance below which points are merged with the hyperplane.
    fn tolerance(&self) -> f64;

    /// Checks whether `other`, assumed coincident with this hyperplane, has
    /// the same orientation (the plus half-spaces overlap).
    fn same_orientation_as(&self, other: &Self) -> bool;

    /// Returns the sub-hyperplane covering this whole hyperplane.
    fn whole_hyperplane(&self) -> Self::Sub;
}

/// A region of a hyperplane, used as the cut of an internal tree node.
pub trait SubHyperplane: Clone + Debug + Sized {
    /// The hyperplane type this piece belongs to.
    type Hyperplane;

    /// Returns the underlying (unbounded) hyperplane.
    fn hyperplane(&self) -> &Self::Hyperplane;

    /// Returns `true` if this piece covers nothing.
    fn is_empty(&self) -> bool;

    /// Splits this piece by another hyperplane.
    fn split(&self, splitter: &Self::Hyperplane) -> Split<Self>;
}

/// Outcome of splitting a sub-hyperplane by a hyperplane.
#[derive(Debug, Clone)]
pub enum Split<S> {
    /// The piece lies entirely on the plus side of the splitter.
    Plus(S),
    /// The piece lies entirely on the minus side of the splitter.
    Minus(S),
    /// The piece straddles the splitter.
    Both {
        /// Part on the plus side.
        plus: S,
        /// Part on the minus side.
        minus: S,
    },
    /// The piece lies on the splitter's own hyperplane.
    Coincident,
}

impl<S> Split<S> {
    /// Extracts the part on the plus side of the splitter, if any.
    pub fn into_plus(self) -> Option<S> {
        match self {
            Split::Plus(piece) => Some(piece),
            Split::Both { plus, .. } => Some(plus),
            Split::Minus(_) | Split::Coincident => None,
        }
    }

    /// Extracts the part on the minus side of the splitter, if any.
    pub fn into_minus(self) -> Option<S> {
        match self {
            Split::Minus(piece) => Some(piece),
            Split::Both { minus, .. } => Some(minus),
            Split::Plus(_) | Split::Coincident => None,
        }
    }

    /// Returns `true` when the piece lies on the splitter's hyperplane.
    pub fn is_coincident(&self) -> bool {
        matches!(self, Split::Coincident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestPoint;

    #[test]
    fn split_side_extraction() {
        let cut = TestPoint::new(2.0, true).whole_hyperplane();
        let plus = Split::Plus(cut.clone());
        assert!(plus.into_plus().is_some());

        let minus = Split::Minus(cut.clone());
        assert!(minus.into_plus().is_none());

        let coincident = Split::Coincident::<()>;
        assert!(coincident.is_coincident());
        assert!(Split::Coincident::<()>.into_minus().is_none());
    }

    #[test]
    fn both_splits_into_either_side() {
        let cut = TestPoint::new(0.0, true).whole_hyperplane();
        let both = Split::Both {
            plus: cut.clone(),
            minus: cut.clone(),
        };
        assert!(both.clone().into_plus().is_some());
        assert!(both.into_minus().is_some());
    }
}
