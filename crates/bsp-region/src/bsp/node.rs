//! Arena-backed BSP tree nodes and their attributes.

use slotmap::new_key_type;

use crate::hyperplane::Hyperplane;

new_key_type! {
    /// Key addressing a node inside a [`BspTree`](super::BspTree) arena.
    pub struct NodeKey;
}

/// Structural payload of a node.
///
/// Every internal node has exactly two children; there is no one-child state.
#[derive(Debug, Clone)]
pub(crate) enum NodeKind<H: Hyperplane> {
    /// Terminal convex cell.
    Leaf,
    /// Cell split in two by `cut`.
    Internal {
        cut: H::Sub,
        plus: NodeKey,
        minus: NodeKey,
    },
}

/// A single node: parent back-link, structure, and attribute.
#[derive(Debug, Clone)]
pub(crate) struct Node<H: Hyperplane> {
    pub(crate) parent: Option<NodeKey>,
    pub(crate) kind: NodeKind<H>,
    pub(crate) attribute: Attribute<H>,
}

/// Semantic payload attached to a node.
///
/// Leaves of a finished tree are `Inside` or `Outside`; `Unset` appears on
/// freshly created leaves and on internal nodes after the cleanup traversal.
/// `Boundary` is only ever carried by internal nodes.
#[derive(Debug, Clone)]
pub enum Attribute<H: Hyperplane> {
    /// No information attached.
    Unset,
    /// The cell is part of the region.
    Inside,
    /// The cell is not part of the region.
    Outside,
    /// The cut of this internal node touches the region boundary.
    Boundary(BoundaryAttribute<H>),
}

impl<H: Hyperplane> Attribute<H> {
    /// Interprets the attribute as a leaf inside/outside flag.
    pub fn leaf_value(&self) -> Option<bool> {
        match self {
            Attribute::Inside => Some(true),
            Attribute::Outside => Some(false),
            Attribute::Unset | Attribute::Boundary(_) => None,
        }
    }

    /// Builds the leaf attribute for an inside/outside flag.
    pub fn from_leaf_value(inside: bool) -> Self {
        if inside {
            Attribute::Inside
        } else {
            Attribute::Outside
        }
    }
}

impl<H: Hyperplane> Default for Attribute<H> {
    fn default() -> Self {
        Attribute::Unset
    }
}

/// Boundary metadata of an internal node whose cut touches the region
/// boundary.
#[derive(Debug, Clone)]
pub struct BoundaryAttribute<H: Hyperplane> {
    /// Piece of the cut whose plus side is outside the region.
    pub plus_outside: Option<H::Sub>,
    /// Piece of the cut whose plus side is inside the region.
    pub plus_inside: Option<H::Sub>,
    /// Nodes whose cuts split the boundary pieces above.
    ///
    /// Splitters always reference nodes of the tree the attribute lives in;
    /// structural copies remap them through the identity map collected
    /// during the copy.
    pub splitters: Vec<NodeKey>,
}

impl<H: Hyperplane> BoundaryAttribute<H> {
    /// Creates a boundary attribute with no splitters recorded yet.
    pub fn new(plus_outside: Option<H::Sub>, plus_inside: Option<H::Sub>) -> Self {
        Self {
            plus_outside,
            plus_inside,
            splitters: Vec::new(),
        }
    }
}
