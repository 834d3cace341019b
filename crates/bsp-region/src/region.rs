//! Region abstraction over a BSP tree.

use crate::bsp::{BspTree, NodeKey};
use crate::hyperplane::Hyperplane;

/// Classification of a point against a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The point lies strictly within the region.
    Inside,
    /// The point lies strictly outside of the region.
    Outside,
    /// The point lies on the region boundary, within tolerance.
    Boundary,
}

/// Point type of a region's space.
pub type PointOf<R> = <<R as Region>::Hyperplane as Hyperplane>::Point;

/// A geometric region of space backed by a BSP tree.
///
/// Implementations wrap a tree whose leaves carry inside/outside attributes
/// and add the dimension-specific queries the core cannot provide, the
/// barycenter in particular. Regions combine through the operators in
/// [`crate::ops`]; the four merge operators consume their operands.
pub trait Region: Sized {
    /// Hyperplane type bounding the cells of this region's space.
    type Hyperplane: Hyperplane;

    /// Builds a region of this type around an existing tree.
    fn from_tree(tree: BspTree<Self::Hyperplane>) -> Self;

    /// The underlying tree.
    fn tree(&self) -> &BspTree<Self::Hyperplane>;

    /// Extracts the underlying tree, consuming the region.
    fn into_tree(self) -> BspTree<Self::Hyperplane>;

    /// A representative interior point of the region.
    fn barycenter(&self) -> PointOf<Self>;

    /// Classifies a point with respect to the region.
    fn check_point(&self, point: &PointOf<Self>) -> Location {
        let tree = self.tree();
        check_point_at(tree, tree.root(), point)
    }

    /// Independent deep copy of the region.
    fn copy_self(&self) -> Self {
        Self::from_tree(self.tree().clone())
    }
}

/// Classifies `point` against the sub-region below `node`.
///
/// Descends to the smallest cell containing the point. A point ending on the
/// cut of an internal cell is on the boundary exactly when the cells on the
/// two sides of the cut disagree about it.
pub fn check_point_at<H: Hyperplane>(
    tree: &BspTree<H>,
    node: NodeKey,
    point: &H::Point,
) -> Location {
    let cell = tree.cell(node, point);
    match tree.children(cell) {
        None => {
            if tree.leaf_value(cell) == Some(true) {
                Location::Inside
            } else {
                Location::Outside
            }
        }
        Some((plus, minus)) => {
            let minus_location = check_point_at(tree, minus, point);
            let plus_location = check_point_at(tree, plus, point);
            if minus_location == plus_location {
                minus_location
            } else {
                Location::Boundary
            }
        }
    }
}
