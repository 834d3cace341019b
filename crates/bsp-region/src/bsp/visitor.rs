//! Visitor-based traversal of BSP trees.

use crate::hyperplane::Hyperplane;

use super::node::{Attribute, NodeKey};
use super::tree::BspTree;

/// Order in which an internal node ("sub", its cut) and its two children are
/// visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOrder {
    /// Plus child, minus child, then the node.
    PlusMinusSub,
    /// Plus child, the node, then the minus child.
    PlusSubMinus,
    /// Minus child, plus child, then the node.
    MinusPlusSub,
    /// Minus child, the node, then the plus child.
    MinusSubPlus,
    /// The node, then the plus child, then the minus child.
    SubPlusMinus,
    /// The node, then the minus child, then the plus child.
    SubMinusPlus,
}

/// Visitor processing nodes during a [`BspTree::visit`] traversal.
pub trait TreeVisitor<H: Hyperplane> {
    /// Chooses the traversal order below `node`.
    fn visit_order(&mut self, tree: &BspTree<H>, node: NodeKey) -> VisitOrder;

    /// Called once per internal node.
    fn visit_internal(&mut self, tree: &mut BspTree<H>, node: NodeKey);

    /// Called once per leaf.
    fn visit_leaf(&mut self, tree: &mut BspTree<H>, node: NodeKey);
}

/// Visitor resetting every internal node attribute to [`Attribute::Unset`].
///
/// The merge operators run this once the structural work is done, so
/// transient markers never survive into a finished tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeCleaner;

impl<H: Hyperplane> TreeVisitor<H> for AttributeCleaner {
    fn visit_order(&mut self, _tree: &BspTree<H>, _node: NodeKey) -> VisitOrder {
        VisitOrder::PlusSubMinus
    }

    fn visit_internal(&mut self, tree: &mut BspTree<H>, node: NodeKey) {
        tree.set_attribute(node, Attribute::Unset);
    }

    fn visit_leaf(&mut self, _tree: &mut BspTree<H>, _node: NodeKey) {}
}
