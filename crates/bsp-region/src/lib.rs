//! Boolean algebra over geometric regions represented as BSP trees.
//!
//! A region of an n-dimensional space is described by a Binary Space
//! Partitioning tree: internal nodes cut their convex cell with a piece of a
//! hyperplane, leaves record whether their cell is inside or outside the
//! region. This crate is dimension-agnostic; spaces plug in by implementing
//! [`Hyperplane`] and [`SubHyperplane`] for their primitives and [`Region`]
//! for the wrapper type, and get the whole algebra in return:
//!
//! - [`ops::build_convex`] assembles a convex region from bounding
//!   hyperplanes,
//! - [`ops::union`], [`ops::intersection`], [`ops::xor`] and
//!   [`ops::difference`] merge two regions (consuming both),
//! - [`ops::complement`] flips a region without touching it.
//!
//! The [`bsp`] module exposes the underlying tree for code that needs to
//! build or traverse structures directly.

mod error;
mod hyperplane;
mod region;

pub mod bsp;
pub mod ops;

#[cfg(test)]
pub(crate) mod testing;

pub use bsp::{Attribute, BspTree, NodeKey};
pub use error::{RegionError, Result};
pub use hyperplane::{Hyperplane, Split, SubHyperplane};
pub use region::{Location, PointOf, Region, check_point_at};
