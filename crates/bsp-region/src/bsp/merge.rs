//! Strategy seams of the pairwise tree merge.

use crate::hyperplane::Hyperplane;

use super::node::{Attribute, NodeKey};
use super::tree::BspTree;

/// Leaf-combination rule of [`BspTree::merge`].
///
/// Invoked whenever one operand bottoms out at `leaf` while the other
/// operand contributes `subtree` (a leaf or a whole subtree) over the same
/// cell. The rule splices its pick below `parent` (usually through
/// [`BspTree::insert_in_tree`]) and returns the node now occupying the cell.
/// `leaf_from_first` tells which operand the leaf came from, for rules that
/// are not symmetric.
pub trait LeafMerger<H: Hyperplane> {
    /// Combines a leaf of one operand with the facing subtree of the other.
    fn merge_leaves(
        &mut self,
        tree: &mut BspTree<H>,
        leaf: NodeKey,
        subtree: NodeKey,
        parent: Option<NodeKey>,
        is_plus_child: bool,
        leaf_from_first: bool,
    ) -> NodeKey;
}

/// Resolution rule for cuts that vanish while a subtree is being restricted
/// to a smaller cell.
///
/// When chopping leaves an internal node without any cut, the tree asks the
/// handler for a detached replacement and grafts its content onto the
/// degenerate node, preserving that node's identity (and therefore any
/// splitter references to it).
pub trait VanishingCutHandler<H: Hyperplane> {
    /// Builds a replacement for the degenerate internal node `node`.
    fn fix_node(&mut self, tree: &mut BspTree<H>, node: NodeKey) -> NodeKey;
}

/// Fixed-default vanishing-cut resolution.
///
/// A node whose two children are leaves with the same flag collapses to that
/// flag; anything ambiguous collapses to the configured default.
#[derive(Debug, Clone, Copy)]
pub struct VanishingToLeaf {
    inside: bool,
}

impl VanishingToLeaf {
    /// Creates a handler defaulting ambiguous nodes to `inside`.
    pub fn new(inside: bool) -> Self {
        Self { inside }
    }
}

impl<H: Hyperplane> VanishingCutHandler<H> for VanishingToLeaf {
    fn fix_node(&mut self, tree: &mut BspTree<H>, node: NodeKey) -> NodeKey {
        let value = match tree.children(node) {
            Some((plus, minus)) => match (tree.leaf_value(plus), tree.leaf_value(minus)) {
                (Some(p), Some(m)) if p == m => p,
                _ => self.inside,
            },
            None => self.inside,
        };
        tree.new_leaf(Attribute::from_leaf_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::{Attribute, BspTree};
    use crate::testing::TestPoint;

    #[test]
    fn vanishing_to_leaf_prefers_an_unambiguous_value() {
        let mut tree: BspTree<TestPoint> = BspTree::new();
        let root = tree.root();
        assert!(tree.insert_cut(root, &TestPoint::new(0.0, true)));
        let (plus, minus) = tree.children(root).unwrap();
        tree.set_attribute(plus, Attribute::Outside);
        tree.set_attribute(minus, Attribute::Outside);

        let mut handler = VanishingToLeaf::new(true);
        let fixed = VanishingCutHandler::<TestPoint>::fix_node(&mut handler, &mut tree, root);
        assert_eq!(tree.leaf_value(fixed), Some(false));
    }

    #[test]
    fn vanishing_to_leaf_falls_back_to_the_default() {
        let mut tree: BspTree<TestPoint> = BspTree::new();
        let root = tree.root();
        assert!(tree.insert_cut(root, &TestPoint::new(0.0, true)));
        let (plus, minus) = tree.children(root).unwrap();
        tree.set_attribute(plus, Attribute::Inside);
        tree.set_attribute(minus, Attribute::Outside);

        let mut handler = VanishingToLeaf::new(true);
        let fixed = VanishingCutHandler::<TestPoint>::fix_node(&mut handler, &mut tree, root);
        assert_eq!(tree.leaf_value(fixed), Some(true));
    }
}
