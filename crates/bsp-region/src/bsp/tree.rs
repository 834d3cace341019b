//! The BSP tree container and its structural operations.

use slotmap::{SecondaryMap, SlotMap};

use crate::hyperplane::{Hyperplane, Split, SubHyperplane};

use super::merge::{LeafMerger, VanishingCutHandler};
use super::node::{Attribute, Node, NodeKey, NodeKind};
use super::visitor::{TreeVisitor, VisitOrder};

/// A BSP tree over hyperplanes of type `H`.
///
/// Nodes live in an arena and reference each other by [`NodeKey`]; the tree
/// itself is the arena plus the key of the root. Each node represents a
/// convex cell of space: the root covers the whole space, an internal node's
/// cut splits its cell into the cells of its two children. Leaves carry the
/// inside/outside attribute that makes the tree a region description.
#[derive(Debug, Clone)]
pub struct BspTree<H: Hyperplane> {
    nodes: SlotMap<NodeKey, Node<H>>,
    root: NodeKey,
}

impl<H: Hyperplane> Default for BspTree<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hyperplane> BspTree<H> {
    /// Creates a tree made of a single unattributed leaf covering the whole
    /// space.
    pub fn new() -> Self {
        Self::leaf(Attribute::Unset)
    }

    /// Creates a single-leaf tree with the given attribute.
    pub fn leaf(attribute: Attribute<H>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            parent: None,
            kind: NodeKind::Leaf,
            attribute,
        });
        Self { nodes, root }
    }

    /// Creates a tree whose root cell is split by `cut`, with `plus` and
    /// `minus` as the subtrees on either side.
    pub fn internal(cut: H::Sub, plus: BspTree<H>, minus: BspTree<H>) -> Self {
        let mut tree = plus;
        let plus_root = tree.root;
        let minus_root = tree.absorb(minus);
        let root = tree.alloc_internal(cut, plus_root, minus_root, Attribute::Unset, None);
        tree.root = root;
        tree
    }

    /// The root node key.
    #[inline]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of live nodes in the arena.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if `node` is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeKey) -> bool {
        matches!(self.nodes[node].kind, NodeKind::Leaf)
    }

    /// The parent of `node`, if it has one.
    #[inline]
    pub fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes[node].parent
    }

    /// The cut of an internal node.
    pub fn cut(&self, node: NodeKey) -> Option<&H::Sub> {
        match &self.nodes[node].kind {
            NodeKind::Internal { cut, .. } => Some(cut),
            NodeKind::Leaf => None,
        }
    }

    /// The `(plus, minus)` children of an internal node.
    pub fn children(&self, node: NodeKey) -> Option<(NodeKey, NodeKey)> {
        match &self.nodes[node].kind {
            NodeKind::Internal { plus, minus, .. } => Some((*plus, *minus)),
            NodeKind::Leaf => None,
        }
    }

    /// The attribute of `node`.
    #[inline]
    pub fn attribute(&self, node: NodeKey) -> &Attribute<H> {
        &self.nodes[node].attribute
    }

    /// Mutable access to the attribute of `node`.
    #[inline]
    pub fn attribute_mut(&mut self, node: NodeKey) -> &mut Attribute<H> {
        &mut self.nodes[node].attribute
    }

    /// Replaces the attribute of `node`.
    #[inline]
    pub fn set_attribute(&mut self, node: NodeKey, attribute: Attribute<H>) {
        self.nodes[node].attribute = attribute;
    }

    /// The inside/outside flag of a leaf, if one is set.
    pub fn leaf_value(&self, node: NodeKey) -> Option<bool> {
        self.nodes[node].attribute.leaf_value()
    }

    /// Depth of the tree: 1 for a single leaf.
    pub fn depth(&self) -> usize {
        self.depth_below(self.root)
    }

    fn depth_below(&self, node: NodeKey) -> usize {
        match self.children(node) {
            None => 1,
            Some((plus, minus)) => {
                1 + self.depth_below(plus).max(self.depth_below(minus))
            }
        }
    }

    /// Creates a detached leaf in the arena, for later splicing.
    ///
    /// Merge strategies use this to manufacture replacement nodes; a node
    /// created here is invisible until linked into the tree.
    pub fn new_leaf(&mut self, attribute: Attribute<H>) -> NodeKey {
        self.alloc_leaf(attribute, None)
    }

    fn alloc_leaf(&mut self, attribute: Attribute<H>, parent: Option<NodeKey>) -> NodeKey {
        self.nodes.insert(Node {
            parent,
            kind: NodeKind::Leaf,
            attribute,
        })
    }

    /// Creates a detached internal node adopting `plus` and `minus`.
    pub(crate) fn new_internal(
        &mut self,
        cut: H::Sub,
        plus: NodeKey,
        minus: NodeKey,
        attribute: Attribute<H>,
    ) -> NodeKey {
        self.alloc_internal(cut, plus, minus, attribute, None)
    }

    fn alloc_internal(
        &mut self,
        cut: H::Sub,
        plus: NodeKey,
        minus: NodeKey,
        attribute: Attribute<H>,
        parent: Option<NodeKey>,
    ) -> NodeKey {
        let key = self.nodes.insert(Node {
            parent,
            kind: NodeKind::Internal { cut, plus, minus },
            attribute,
        });
        self.nodes[plus].parent = Some(key);
        self.nodes[minus].parent = Some(key);
        key
    }

    /// Re-roots the tree at `node` and drops everything unreachable.
    pub(crate) fn set_root(&mut self, node: NodeKey) {
        self.root = node;
        self.nodes[node].parent = None;
        self.sweep();
    }

    fn is_plus_child(&self, node: NodeKey) -> bool {
        match self.parent(node).and_then(|parent| self.children(parent)) {
            Some((plus, _)) => plus == node,
            None => false,
        }
    }

    fn set_cut(&mut self, node: NodeKey, new_cut: H::Sub) {
        if let NodeKind::Internal { cut, .. } = &mut self.nodes[node].kind {
            *cut = new_cut;
        }
    }

    /// Makes `child` the plus or minus child of `parent` and links both ways.
    fn attach(&mut self, parent: NodeKey, is_plus: bool, child: NodeKey) {
        if let NodeKind::Internal { plus, minus, .. } = &mut self.nodes[parent].kind {
            if is_plus {
                *plus = child;
            } else {
                *minus = child;
            }
        }
        self.nodes[child].parent = Some(parent);
    }

    /// Replaces the content of `node` with the content of `source`, keeping
    /// `node`'s identity and parent link. `source` is left detached.
    fn graft(&mut self, node: NodeKey, source: NodeKey) {
        let (kind, attribute) = {
            let src = &mut self.nodes[source];
            (
                std::mem::replace(&mut src.kind, NodeKind::Leaf),
                std::mem::take(&mut src.attribute),
            )
        };
        if let NodeKind::Internal { plus, minus, .. } = &kind {
            self.nodes[*plus].parent = Some(node);
            self.nodes[*minus].parent = Some(node);
        }
        let target = &mut self.nodes[node];
        target.kind = kind;
        target.attribute = attribute;
    }

    /// Tries to split the convex cell of `node` with a cut on `hyperplane`.
    ///
    /// The cut is clipped against every ancestor cut first; on success the
    /// node becomes an internal node with two fresh unattributed leaves and
    /// `true` is returned. When nothing of the hyperplane remains inside the
    /// cell the node is left as a leaf and `false` is returned; the caller
    /// decides whether the hyperplane was redundant, squeezed the cell away,
    /// or contradicted it (see [`crate::ops::build_convex`]).
    pub fn insert_cut(&mut self, node: NodeKey, hyperplane: &H) -> bool {
        // a previous cut at this node is discarded together with its subtrees
        if let Some((plus, minus)) = self.children(node) {
            self.nodes[plus].parent = None;
            self.nodes[minus].parent = None;
            self.nodes[node].kind = NodeKind::Leaf;
        }
        match self.fit_to_cell(node, hyperplane.whole_hyperplane()) {
            Some(chopped) if !chopped.is_empty() => {
                let plus = self.alloc_leaf(Attribute::Unset, Some(node));
                let minus = self.alloc_leaf(Attribute::Unset, Some(node));
                self.nodes[node].kind = NodeKind::Internal {
                    cut: chopped,
                    plus,
                    minus,
                };
                true
            }
            _ => false,
        }
    }

    /// Clips `sub` to the convex cell bounded by the ancestor cuts of `node`.
    fn fit_to_cell(&self, node: NodeKey, sub: H::Sub) -> Option<H::Sub> {
        let mut piece = sub;
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            let split = match self.cut(parent) {
                Some(cut) => piece.split(cut.hyperplane()),
                // parents are internal nodes by construction
                None => return Some(piece),
            };
            let clipped = if self.is_plus_child(current) {
                split.into_plus()
            } else {
                split.into_minus()
            };
            piece = clipped?;
            current = parent;
        }
        Some(piece)
    }

    /// Finds the smallest cell containing `point`, starting from `node`.
    ///
    /// Descends by the sign of the point's offset against each cut; stops at
    /// an internal node when the point lies within tolerance of its cut.
    pub fn cell(&self, node: NodeKey, point: &H::Point) -> NodeKey {
        match &self.nodes[node].kind {
            NodeKind::Leaf => node,
            NodeKind::Internal { cut, plus, minus } => {
                let hyperplane = cut.hyperplane();
                let offset = hyperplane.offset(point);
                if offset.abs() < hyperplane.tolerance() {
                    node
                } else if offset <= 0.0 {
                    self.cell(*minus, point)
                } else {
                    self.cell(*plus, point)
                }
            }
        }
    }

    /// Deep-copies the subtree below `node`, returning the detached copy's
    /// root. Boundary splitters in copied attributes are not remapped.
    fn copy_subtree(&mut self, node: NodeKey) -> NodeKey {
        let attribute = self.nodes[node].attribute.clone();
        match self.children(node) {
            None => self.alloc_leaf(attribute, None),
            Some((plus, minus)) => {
                let Some(cut) = self.cut(node).cloned() else {
                    return self.alloc_leaf(attribute, None);
                };
                let new_plus = self.copy_subtree(plus);
                let new_minus = self.copy_subtree(minus);
                self.alloc_internal(cut, new_plus, new_minus, attribute, None)
            }
        }
    }

    /// Collapses `node` into a leaf when both children are leaves carrying
    /// the same attribute.
    fn condense(&mut self, node: NodeKey) {
        let Some((plus, minus)) = self.children(node) else {
            return;
        };
        if !self.is_leaf(plus) || !self.is_leaf(minus) {
            return;
        }
        let merged = match (&self.nodes[plus].attribute, &self.nodes[minus].attribute) {
            (Attribute::Unset, Attribute::Unset) => Some(Attribute::Unset),
            (a, b) => match (a.leaf_value(), b.leaf_value()) {
                (Some(p), Some(m)) if p == m => Some(Attribute::from_leaf_value(p)),
                _ => None,
            },
        };
        if let Some(attribute) = merged {
            self.nodes[plus].parent = None;
            self.nodes[minus].parent = None;
            self.nodes[node].kind = NodeKind::Leaf;
            self.nodes[node].attribute = attribute;
        }
    }

    /// Replaces the cut of `node`, or collapses `node` toward its plus child
    /// when the replacement vanished entirely.
    fn replace_cut(&mut self, node: NodeKey, cut: Option<H::Sub>) {
        match cut {
            Some(sub) => self.set_cut(node, sub),
            None => {
                if let Some((plus, _minus)) = self.children(node) {
                    self.graft(node, plus);
                }
            }
        }
    }

    /// Splits the subtree below `node` by the sub-hyperplane `sub`, building
    /// a detached subtree whose root cut lies on `sub`'s hyperplane.
    ///
    /// This is the alignment step of [`merge`](Self::merge): before two
    /// internal nodes can be descended in lock-step, one of them is re-rooted
    /// on the other's cut. Pieces of the original subtree are copied as
    /// needed; the original stays in the arena until swept.
    fn split_subtree(&mut self, node: NodeKey, sub: H::Sub) -> NodeKey {
        let attribute = self.nodes[node].attribute.clone();
        let Some((node_plus, node_minus)) = self.children(node) else {
            // a leaf covers both sides of the new cut
            let copy = self.copy_subtree(node);
            let twin = self.alloc_leaf(attribute, None);
            return self.alloc_internal(sub, copy, twin, Attribute::Unset, None);
        };
        let Some(cut) = self.cut(node).cloned() else {
            return self.copy_subtree(node);
        };
        let cut_hyperplane = cut.hyperplane().clone();
        let sub_hyperplane = sub.hyperplane().clone();

        match sub.split(&cut_hyperplane) {
            Split::Plus(piece) => {
                let split = self.split_subtree(node_plus, piece);
                let Some((split_plus, split_minus)) = self.children(split) else {
                    return split;
                };
                let minus_copy = self.copy_subtree(node_minus);
                let cut_on_plus =
                    matches!(cut.split(&sub_hyperplane), Split::Plus(_));
                if cut_on_plus {
                    let child =
                        self.alloc_internal(cut, split_plus, minus_copy, attribute, None);
                    self.attach(split, true, child);
                    self.condense(child);
                } else {
                    let child =
                        self.alloc_internal(cut, split_minus, minus_copy, attribute, None);
                    self.attach(split, false, child);
                    self.condense(child);
                }
                split
            }
            Split::Minus(piece) => {
                let split = self.split_subtree(node_minus, piece);
                let Some((split_plus, split_minus)) = self.children(split) else {
                    return split;
                };
                let plus_copy = self.copy_subtree(node_plus);
                let cut_on_plus =
                    matches!(cut.split(&sub_hyperplane), Split::Plus(_));
                if cut_on_plus {
                    let child =
                        self.alloc_internal(cut, plus_copy, split_plus, attribute, None);
                    self.attach(split, true, child);
                    self.condense(child);
                } else {
                    let child =
                        self.alloc_internal(cut, plus_copy, split_minus, attribute, None);
                    self.attach(split, false, child);
                    self.condense(child);
                }
                split
            }
            Split::Both { plus, minus } => {
                let (cut_plus, cut_minus) = match cut.split(&sub_hyperplane) {
                    Split::Both { plus, minus } => (Some(plus), Some(minus)),
                    Split::Plus(piece) => (Some(piece), None),
                    Split::Minus(piece) => (None, Some(piece)),
                    Split::Coincident => (None, None),
                };
                let plus_side = self.split_subtree(node_plus, plus);
                let minus_side = self.split_subtree(node_minus, minus);
                let split =
                    self.alloc_internal(sub, plus_side, minus_side, Attribute::Unset, None);
                // both children are rooted on sub's hyperplane; exchange the
                // middle grandchildren and re-cut the children on the pieces
                // of the original cut
                let Some((_, plus_side_minus)) = self.children(plus_side) else {
                    return split;
                };
                let Some((minus_side_plus, _)) = self.children(minus_side) else {
                    return split;
                };
                self.attach(plus_side, false, minus_side_plus);
                self.attach(minus_side, true, plus_side_minus);
                self.replace_cut(plus_side, cut_plus);
                self.replace_cut(minus_side, cut_minus);
                self.condense(plus_side);
                self.condense(minus_side);
                split
            }
            Split::Coincident => {
                let plus_copy = self.copy_subtree(node_plus);
                let minus_copy = self.copy_subtree(node_minus);
                if cut_hyperplane.same_orientation_as(&sub_hyperplane) {
                    self.alloc_internal(sub, plus_copy, minus_copy, attribute, None)
                } else {
                    self.alloc_internal(sub, minus_copy, plus_copy, attribute, None)
                }
            }
        }
    }

    /// Merges this tree with `other` under the given leaf-combination
    /// strategy, consuming both.
    ///
    /// Corresponding cells of the two trees are descended in lock-step,
    /// re-splitting `other`'s subtrees under this tree's cuts as needed so
    /// every recursion step works below a shared cut. Whenever one side
    /// bottoms out at a leaf, the strategy picks the subtree occupying that
    /// cell in the result. Unreachable arena nodes are swept before
    /// returning.
    pub fn merge<M: LeafMerger<H>>(mut self, other: BspTree<H>, merger: &mut M) -> BspTree<H> {
        let other_root = self.absorb(other);
        let root = self.merge_nodes(self.root, other_root, merger, None, false);
        self.set_root(root);
        self
    }

    fn merge_nodes<M: LeafMerger<H>>(
        &mut self,
        first: NodeKey,
        second: NodeKey,
        merger: &mut M,
        parent: Option<NodeKey>,
        is_plus_child: bool,
    ) -> NodeKey {
        if self.is_leaf(first) {
            return merger.merge_leaves(self, first, second, parent, is_plus_child, true);
        }
        if self.is_leaf(second) {
            return merger.merge_leaves(self, second, first, parent, is_plus_child, false);
        }
        let Some(cut) = self.cut(first).cloned() else {
            return second;
        };
        let merged = self.split_subtree(second, cut);
        if let Some(parent) = parent {
            self.attach(parent, is_plus_child, merged);
        }
        let Some((merged_plus, merged_minus)) = self.children(merged) else {
            return merged;
        };
        let Some((first_plus, first_minus)) = self.children(first) else {
            return merged;
        };
        self.merge_nodes(first_plus, merged_plus, merger, Some(merged), true);
        self.merge_nodes(first_minus, merged_minus, merger, Some(merged), false);
        self.condense(merged);
        if let Some(whole) = self
            .cut(merged)
            .map(|cut| cut.hyperplane().whole_hyperplane())
        {
            let refitted = self.fit_to_cell(merged, whole);
            self.replace_cut(merged, refitted);
        }
        merged
    }

    /// Splices `node` (with its whole subtree) in place of the `is_plus`
    /// child of `parent`, then chops off every part of the subtree sticking
    /// out of the cell its new ancestors define. Cuts that vanish entirely
    /// during the chop are resolved through `handler`.
    pub fn insert_in_tree<V: VanishingCutHandler<H>>(
        &mut self,
        node: NodeKey,
        parent: Option<NodeKey>,
        is_plus: bool,
        handler: &mut V,
    ) {
        match parent {
            Some(parent) => self.attach(parent, is_plus, node),
            None => self.nodes[node].parent = None,
        }
        if self.is_leaf(node) {
            return;
        }

        let mut current = node;
        while let Some(ancestor) = self.parent(current) {
            let Some(hyperplane) = self.cut(ancestor).map(|cut| cut.hyperplane().clone())
            else {
                break;
            };
            let on_plus_side = self.is_plus_child(current);
            let Some(cut) = self.cut(node).cloned() else {
                break;
            };
            let Some((plus, minus)) = self.children(node) else {
                break;
            };
            let chopped = if on_plus_side {
                cut.split(&hyperplane).into_plus()
            } else {
                cut.split(&hyperplane).into_minus()
            };
            if on_plus_side {
                self.chop_off_minus(plus, &hyperplane, handler);
                self.chop_off_minus(minus, &hyperplane, handler);
            } else {
                self.chop_off_plus(plus, &hyperplane, handler);
                self.chop_off_plus(minus, &hyperplane, handler);
            }
            match chopped {
                Some(piece) => self.set_cut(node, piece),
                None => {
                    // the cut does not reach the destination cell at all
                    let fixed = handler.fix_node(self, node);
                    self.graft(node, fixed);
                    if self.is_leaf(node) {
                        break;
                    }
                }
            }
            current = ancestor;
        }
        self.condense(node);
    }

    /// Removes the part of the subtree below `node` lying on the minus side
    /// of `hyperplane`.
    fn chop_off_minus<V: VanishingCutHandler<H>>(
        &mut self,
        node: NodeKey,
        hyperplane: &H,
        handler: &mut V,
    ) {
        let Some(cut) = self.cut(node).cloned() else {
            return;
        };
        let Some((plus, minus)) = self.children(node) else {
            return;
        };
        let chopped = cut.split(hyperplane).into_plus();
        self.chop_off_minus(plus, hyperplane, handler);
        self.chop_off_minus(minus, hyperplane, handler);
        match chopped {
            Some(piece) => self.set_cut(node, piece),
            None => {
                let fixed = handler.fix_node(self, node);
                self.graft(node, fixed);
            }
        }
    }

    /// Removes the part of the subtree below `node` lying on the plus side
    /// of `hyperplane`.
    fn chop_off_plus<V: VanishingCutHandler<H>>(
        &mut self,
        node: NodeKey,
        hyperplane: &H,
        handler: &mut V,
    ) {
        let Some(cut) = self.cut(node).cloned() else {
            return;
        };
        let Some((plus, minus)) = self.children(node) else {
            return;
        };
        let chopped = cut.split(hyperplane).into_minus();
        self.chop_off_plus(plus, hyperplane, handler);
        self.chop_off_plus(minus, hyperplane, handler);
        match chopped {
            Some(piece) => self.set_cut(node, piece),
            None => {
                let fixed = handler.fix_node(self, node);
                self.graft(node, fixed);
            }
        }
    }

    /// Rebuilds the minimal tree isolating the convex cell of `node`: the
    /// cell leaf carries `cell_attribute`, every sibling cell along the
    /// ancestor chain carries a clone of `outside_attribute`.
    pub fn prune_around_convex_cell(
        &self,
        node: NodeKey,
        cell_attribute: Attribute<H>,
        outside_attribute: &Attribute<H>,
    ) -> BspTree<H> {
        let mut pruned = BspTree::leaf(cell_attribute);
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            let Some(cut) = self.cut(parent).cloned() else {
                break;
            };
            let sibling = pruned.alloc_leaf(outside_attribute.clone(), None);
            let cell_side = pruned.root;
            let root = if self.is_plus_child(current) {
                pruned.alloc_internal(cut, cell_side, sibling, Attribute::Unset, None)
            } else {
                pruned.alloc_internal(cut, sibling, cell_side, Attribute::Unset, None)
            };
            pruned.root = root;
            current = parent;
        }
        pruned
    }

    /// Traverses the tree, letting `visitor` pick the order around each
    /// internal node.
    pub fn visit<V: TreeVisitor<H>>(&mut self, visitor: &mut V) {
        self.visit_node(self.root, visitor);
    }

    fn visit_node<V: TreeVisitor<H>>(&mut self, node: NodeKey, visitor: &mut V) {
        let Some((plus, minus)) = self.children(node) else {
            visitor.visit_leaf(self, node);
            return;
        };
        match visitor.visit_order(self, node) {
            VisitOrder::PlusMinusSub => {
                self.visit_node(plus, visitor);
                self.visit_node(minus, visitor);
                visitor.visit_internal(self, node);
            }
            VisitOrder::PlusSubMinus => {
                self.visit_node(plus, visitor);
                visitor.visit_internal(self, node);
                self.visit_node(minus, visitor);
            }
            VisitOrder::MinusPlusSub => {
                self.visit_node(minus, visitor);
                self.visit_node(plus, visitor);
                visitor.visit_internal(self, node);
            }
            VisitOrder::MinusSubPlus => {
                self.visit_node(minus, visitor);
                visitor.visit_internal(self, node);
                self.visit_node(plus, visitor);
            }
            VisitOrder::SubPlusMinus => {
                visitor.visit_internal(self, node);
                self.visit_node(plus, visitor);
                self.visit_node(minus, visitor);
            }
            VisitOrder::SubMinusPlus => {
                visitor.visit_internal(self, node);
                self.visit_node(minus, visitor);
                self.visit_node(plus, visitor);
            }
        }
    }

    /// Moves every node of `other` into this arena, returning the new key of
    /// `other`'s root. Parent/child links and boundary splitters are
    /// remapped to the new keys.
    fn absorb(&mut self, other: BspTree<H>) -> NodeKey {
        let other_root = other.root;
        let mut map: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::new();
        let mut moved = Vec::with_capacity(other.nodes.len());
        for (old_key, node) in other.nodes {
            let new_key = self.nodes.insert(node);
            map.insert(old_key, new_key);
            moved.push(new_key);
        }
        for key in moved {
            let node = &mut self.nodes[key];
            if let Some(parent) = node.parent {
                node.parent = map.get(parent).copied();
            }
            if let NodeKind::Internal { plus, minus, .. } = &mut node.kind {
                if let Some(&new_plus) = map.get(*plus) {
                    *plus = new_plus;
                }
                if let Some(&new_minus) = map.get(*minus) {
                    *minus = new_minus;
                }
            }
            if let Attribute::Boundary(boundary) = &mut node.attribute {
                for splitter in &mut boundary.splitters {
                    if let Some(&new_splitter) = map.get(*splitter) {
                        *splitter = new_splitter;
                    }
                }
            }
        }
        map[other_root]
    }

    /// Drops arena nodes no longer reachable from the root.
    fn sweep(&mut self) {
        let mut live: SecondaryMap<NodeKey, ()> = SecondaryMap::new();
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            if live.insert(key, ()).is_some() {
                continue;
            }
            if let Some((plus, minus)) = self.children(key) {
                stack.push(plus);
                stack.push(minus);
            }
        }
        self.nodes.retain(|key, _| live.contains_key(key));
    }
}
