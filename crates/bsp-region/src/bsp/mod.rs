//! The BSP tree core.
//!
//! A [`BspTree`] stores nodes in an arena keyed by [`NodeKey`]; every node
//! represents a convex cell of space and internal nodes split their cell with
//! a sub-hyperplane cut. On top of the structure the module provides:
//!
//! - cut insertion with ancestor clipping ([`BspTree::insert_cut`]),
//! - the pairwise merge primitive with pluggable leaf-combination and
//!   vanishing-cut strategies ([`BspTree::merge`], [`LeafMerger`],
//!   [`VanishingCutHandler`]),
//! - visitor traversal in six orders ([`BspTree::visit`], [`TreeVisitor`]).

mod merge;
mod node;
mod tree;
mod visitor;

pub use merge::{LeafMerger, VanishingCutHandler, VanishingToLeaf};
pub use node::{Attribute, BoundaryAttribute, NodeKey};
pub use tree::BspTree;
pub use visitor::{AttributeCleaner, TreeVisitor, VisitOrder};
