//! One-dimensional regions built on [`bsp_region`].
//!
//! The real line is the smallest space with a full BSP algebra: hyperplanes
//! are single [`OrientedPoint`]s and regions are finite unions of intervals.
//! [`IntervalsSet`] implements [`bsp_region::Region`], so the operators in
//! [`bsp_region::ops`] apply directly:
//!
//! ```
//! use bsp_interval::IntervalsSet;
//! use bsp_region::ops::union;
//! use bsp_region::{Location, Region};
//!
//! let set = union(
//!     IntervalsSet::interval(1.0, 2.0, 1.0e-10),
//!     IntervalsSet::interval(3.0, 4.0, 1.0e-10),
//! );
//! assert_eq!(set.check_point(&1.5), Location::Inside);
//! assert_eq!(set.check_point(&2.5), Location::Outside);
//! ```

mod interval;
mod intervals_set;
mod oriented_point;

pub use interval::Interval;
pub use intervals_set::IntervalsSet;
pub use oriented_point::{OrientedPoint, SubOrientedPoint};
