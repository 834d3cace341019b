//! Regions of the real line: finite unions of disjoint intervals.

use bsp_region::bsp::{Attribute, BspTree, NodeKey};
use bsp_region::{Hyperplane, Region, SubHyperplane};

use crate::interval::Interval;
use crate::oriented_point::OrientedPoint;

/// A region of the one-dimensional real line.
///
/// Backed by a BSP tree over [`OrientedPoint`] cuts, so any finite union of
/// intervals (bounded or not) can be represented. Sets combine through the
/// operators in [`bsp_region::ops`]; remember that the merge operators
/// consume their operands.
#[derive(Debug, Clone)]
pub struct IntervalsSet {
    tree: BspTree<OrientedPoint>,
}

impl IntervalsSet {
    /// The whole real line.
    pub fn whole_line() -> Self {
        Self {
            tree: BspTree::leaf(Attribute::Inside),
        }
    }

    /// The empty set.
    pub fn empty() -> Self {
        Self {
            tree: BspTree::leaf(Attribute::Outside),
        }
    }

    /// The interval `[lower, upper]`; either bound may be infinite.
    pub fn interval(lower: f64, upper: f64, tolerance: f64) -> Self {
        Self {
            tree: interval_tree(lower, upper, tolerance),
        }
    }

    /// The ordered list of disjoint intervals making up the set.
    pub fn as_intervals(&self) -> Vec<Interval> {
        let mut items = Vec::new();
        collect_ordered(&self.tree, self.tree.root(), &mut items);

        let mut intervals = Vec::new();
        let mut previous = f64::NEG_INFINITY;
        let mut start: Option<f64> = None;
        for item in items {
            match item {
                Ordered::Cut(location) => previous = location,
                Ordered::Leaf(inside) => {
                    if inside {
                        if start.is_none() {
                            start = Some(previous);
                        }
                    } else if let Some(lower) = start.take() {
                        intervals.push(Interval::new(lower, previous));
                    }
                }
            }
        }
        if let Some(lower) = start {
            intervals.push(Interval::new(lower, f64::INFINITY));
        }
        intervals
    }

    /// Total length of the set.
    pub fn size(&self) -> f64 {
        self.as_intervals()
            .iter()
            .map(Interval::size)
            .sum()
    }

    fn root_cut_location(&self) -> f64 {
        self.tree
            .cut(self.tree.root())
            .map_or(f64::NAN, |cut| cut.hyperplane().location())
    }
}

impl Region for IntervalsSet {
    type Hyperplane = OrientedPoint;

    fn from_tree(tree: BspTree<OrientedPoint>) -> Self {
        Self { tree }
    }

    fn tree(&self) -> &BspTree<OrientedPoint> {
        &self.tree
    }

    fn into_tree(self) -> BspTree<OrientedPoint> {
        self.tree
    }

    /// Length-weighted midpoint of the interval list.
    ///
    /// NaN for sets of infinite size; a set thinner than the smallest
    /// positive float falls back to its root cut location, which is where
    /// the whole set collapsed.
    fn barycenter(&self) -> f64 {
        let intervals = self.as_intervals();
        if intervals.is_empty() {
            return self.root_cut_location();
        }
        let mut size = 0.0;
        let mut weighted = 0.0;
        for interval in &intervals {
            size += interval.size();
            weighted += interval.size() * interval.barycenter();
        }
        if size.is_infinite() {
            f64::NAN
        } else if size >= f64::MIN_POSITIVE {
            weighted / size
        } else {
            self.root_cut_location()
        }
    }
}

/// Direct tree assembly for a single interval: at most two cuts, the inside
/// leaf nested below the minus sides of both.
fn interval_tree(lower: f64, upper: f64, tolerance: f64) -> BspTree<OrientedPoint> {
    debug_assert!(lower <= upper, "inverted interval bounds");
    let lower_cut =
        lower.is_finite().then(|| OrientedPoint::new(lower, false, tolerance).whole_hyperplane());
    let upper_cut =
        upper.is_finite().then(|| OrientedPoint::new(upper, true, tolerance).whole_hyperplane());
    match (lower_cut, upper_cut) {
        (None, None) => BspTree::leaf(Attribute::Inside),
        (None, Some(upper_cut)) => BspTree::internal(
            upper_cut,
            BspTree::leaf(Attribute::Outside),
            BspTree::leaf(Attribute::Inside),
        ),
        (Some(lower_cut), None) => BspTree::internal(
            lower_cut,
            BspTree::leaf(Attribute::Outside),
            BspTree::leaf(Attribute::Inside),
        ),
        (Some(lower_cut), Some(upper_cut)) => {
            let above_lower = BspTree::internal(
                upper_cut,
                BspTree::leaf(Attribute::Outside),
                BspTree::leaf(Attribute::Inside),
            );
            BspTree::internal(lower_cut, BspTree::leaf(Attribute::Outside), above_lower)
        }
    }
}

enum Ordered {
    Leaf(bool),
    Cut(f64),
}

/// In-order traversal by ascending coordinate. Which child covers the lower
/// coordinates depends on the cut orientation.
fn collect_ordered(tree: &BspTree<OrientedPoint>, node: NodeKey, out: &mut Vec<Ordered>) {
    match tree.children(node) {
        None => out.push(Ordered::Leaf(tree.leaf_value(node) == Some(true))),
        Some((plus, minus)) => {
            let Some(cut) = tree.cut(node) else {
                return;
            };
            let hyperplane = cut.hyperplane();
            let location = hyperplane.location();
            let (low, high) = if hyperplane.is_direct() {
                (minus, plus)
            } else {
                (plus, minus)
            };
            collect_ordered(tree, low, out);
            out.push(Ordered::Cut(location));
            collect_ordered(tree, high, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bsp_region::ops::{build_convex, complement, difference, intersection, union, xor};
    use bsp_region::{Location, Region, RegionError};
    use proptest::prelude::*;

    const TOL: f64 = 1.0e-10;

    fn interval(lower: f64, upper: f64) -> IntervalsSet {
        IntervalsSet::interval(lower, upper, TOL)
    }

    /// Sample grid of points keeping clear of every listed boundary.
    fn sample_points(boundaries: &[f64]) -> Vec<f64> {
        let mut points = Vec::new();
        let mut x = -12.0;
        while x <= 12.0 {
            if boundaries.iter().all(|b| (x - b).abs() > 1.0e-3) {
                points.push(x);
            }
            x += 0.25;
        }
        points
    }

    #[test]
    fn constructors_classify_points() {
        let whole = IntervalsSet::whole_line();
        let empty = IntervalsSet::empty();
        let unit = interval(0.0, 1.0);
        for x in [-3.0, 0.5, 42.0] {
            assert_eq!(whole.check_point(&x), Location::Inside);
            assert_eq!(empty.check_point(&x), Location::Outside);
        }
        assert_eq!(unit.check_point(&0.5), Location::Inside);
        assert_eq!(unit.check_point(&-0.5), Location::Outside);
        assert_eq!(unit.check_point(&0.0), Location::Boundary);
        assert_eq!(unit.check_point(&1.0), Location::Boundary);
    }

    #[test]
    fn semi_infinite_intervals() {
        let ray = interval(2.0, f64::INFINITY);
        assert_eq!(ray.check_point(&1.0e6), Location::Inside);
        assert_eq!(ray.check_point(&1.0), Location::Outside);
        assert_eq!(ray.check_point(&2.0), Location::Boundary);
        assert!(ray.size().is_infinite());
        assert!(ray.barycenter().is_nan());

        let lower_ray = interval(f64::NEG_INFINITY, 2.0);
        assert_eq!(lower_ray.check_point(&-1.0e6), Location::Inside);
        assert_eq!(lower_ray.check_point(&3.0), Location::Outside);
    }

    #[test]
    fn measures_of_a_bounded_interval() {
        let set = interval(1.0, 4.0);
        assert_relative_eq!(set.size(), 3.0);
        assert_relative_eq!(set.barycenter(), 2.5);
    }

    #[test]
    fn build_convex_matches_direct_assembly() {
        let built: Option<IntervalsSet> = build_convex(vec![
            OrientedPoint::new(1.0, false, TOL),
            OrientedPoint::new(2.0, true, TOL),
        ])
        .unwrap();
        let built = built.unwrap();
        let direct = interval(1.0, 2.0);
        for x in sample_points(&[1.0, 2.0]) {
            assert_eq!(built.check_point(&x), direct.check_point(&x));
        }
    }

    #[test]
    fn build_convex_of_nothing_is_none() {
        let built: Option<IntervalsSet> = build_convex(Vec::new()).unwrap();
        assert!(built.is_none());
    }

    #[test]
    fn contradictory_half_lines_are_rejected() {
        // x >= 1 and x <= 0
        let built: Result<Option<IntervalsSet>, _> = build_convex(vec![
            OrientedPoint::new(1.0, false, TOL),
            OrientedPoint::new(0.0, true, TOL),
        ]);
        assert_eq!(built.unwrap_err(), RegionError::InconsistentHyperplanes);
    }

    #[test]
    fn build_convex_is_input_order_insensitive() {
        let forward: Option<IntervalsSet> = build_convex(vec![
            OrientedPoint::new(1.0, false, TOL),
            OrientedPoint::new(2.0, true, TOL),
        ])
        .unwrap();
        let backward: Option<IntervalsSet> = build_convex(vec![
            OrientedPoint::new(2.0, true, TOL),
            OrientedPoint::new(1.0, false, TOL),
        ])
        .unwrap();
        let with_duplicate: Option<IntervalsSet> = build_convex(vec![
            OrientedPoint::new(1.0, false, TOL),
            OrientedPoint::new(2.0, true, TOL),
            OrientedPoint::new(1.0, false, TOL),
        ])
        .unwrap();
        let forward = forward.unwrap();
        let backward = backward.unwrap();
        let with_duplicate = with_duplicate.unwrap();
        for x in sample_points(&[1.0, 2.0]) {
            assert_eq!(forward.check_point(&x), backward.check_point(&x));
            assert_eq!(forward.check_point(&x), with_duplicate.check_point(&x));
        }
    }

    #[test]
    fn opposed_coincident_hyperplanes_give_the_empty_set() {
        let built: Option<IntervalsSet> = build_convex(vec![
            OrientedPoint::new(1.0, false, TOL),
            OrientedPoint::new(1.0, true, TOL),
        ])
        .unwrap();
        let region = built.unwrap();
        for x in [-2.0, 1.0, 3.0] {
            assert_eq!(region.check_point(&x), Location::Outside);
        }
    }

    #[test]
    fn union_of_disjoint_intervals() {
        let merged = union(interval(1.0, 2.0), interval(3.0, 4.0));
        assert_eq!(merged.check_point(&2.5), Location::Outside);
        assert_eq!(merged.check_point(&1.5), Location::Inside);
        assert_eq!(merged.check_point(&1.0), Location::Boundary);
        assert_eq!(
            merged.as_intervals(),
            vec![Interval::new(1.0, 2.0), Interval::new(3.0, 4.0)]
        );
        assert_relative_eq!(merged.size(), 2.0);
        assert_relative_eq!(merged.barycenter(), 2.5);
    }

    #[test]
    fn union_of_overlapping_intervals_coalesces() {
        let merged = union(interval(1.0, 3.0), interval(2.0, 4.0));
        assert_eq!(merged.as_intervals(), vec![Interval::new(1.0, 4.0)]);
        assert_eq!(merged.check_point(&2.0), Location::Inside);
        assert_eq!(merged.check_point(&3.0), Location::Inside);
    }

    #[test]
    fn intersection_keeps_the_overlap() {
        let merged = intersection(interval(1.0, 3.0), interval(2.0, 4.0));
        assert_eq!(merged.as_intervals(), vec![Interval::new(2.0, 3.0)]);
    }

    #[test]
    fn intersection_of_disjoint_intervals_is_empty() {
        let merged = intersection(interval(1.0, 2.0), interval(3.0, 4.0));
        assert!(merged.as_intervals().is_empty());
        assert_relative_eq!(merged.size(), 0.0);
    }

    #[test]
    fn difference_carves_a_hole() {
        let merged = difference(interval(1.0, 4.0), interval(2.0, 3.0));
        assert_eq!(
            merged.as_intervals(),
            vec![Interval::new(1.0, 2.0), Interval::new(3.0, 4.0)]
        );
    }

    #[test]
    fn xor_keeps_the_symmetric_difference() {
        let merged = xor(interval(1.0, 3.0), interval(2.0, 4.0));
        assert_eq!(
            merged.as_intervals(),
            vec![Interval::new(1.0, 2.0), Interval::new(3.0, 4.0)]
        );
    }

    #[test]
    fn complement_of_the_whole_line_is_empty() {
        let flipped = complement(&IntervalsSet::whole_line());
        for x in [-7.0, 0.0, 11.5] {
            assert_eq!(flipped.check_point(&x), Location::Outside);
        }
        assert!(flipped.as_intervals().is_empty());
    }

    #[test]
    fn complement_of_an_interval() {
        let set = interval(1.0, 2.0);
        let flipped = complement(&set);
        assert_eq!(flipped.check_point(&1.5), Location::Outside);
        assert_eq!(flipped.check_point(&0.0), Location::Inside);
        assert_eq!(flipped.check_point(&3.0), Location::Inside);
        assert_eq!(
            flipped.as_intervals(),
            vec![
                Interval::new(f64::NEG_INFINITY, 1.0),
                Interval::new(2.0, f64::INFINITY),
            ]
        );
        // the source set is untouched
        assert_eq!(set.check_point(&1.5), Location::Inside);
    }

    #[test]
    fn union_is_idempotent() {
        let set = interval(1.0, 2.0);
        let merged = union(set.copy_self(), set.copy_self());
        for x in sample_points(&[1.0, 2.0]) {
            assert_eq!(merged.check_point(&x), set.check_point(&x));
        }
    }

    #[test]
    fn binary_operators_commute() {
        let boundaries = [1.0, 3.0, 2.0, 4.0];
        let a = || interval(1.0, 3.0);
        let b = || interval(2.0, 4.0);
        let union_ab = union(a(), b());
        let union_ba = union(b(), a());
        let inter_ab = intersection(a(), b());
        let inter_ba = intersection(b(), a());
        let xor_ab = xor(a(), b());
        let xor_ba = xor(b(), a());
        for x in sample_points(&boundaries) {
            assert_eq!(union_ab.check_point(&x), union_ba.check_point(&x));
            assert_eq!(inter_ab.check_point(&x), inter_ba.check_point(&x));
            assert_eq!(xor_ab.check_point(&x), xor_ba.check_point(&x));
        }
    }

    #[test]
    fn complement_is_an_involution() {
        let set = union(interval(1.0, 2.0), interval(3.0, 4.0));
        let back = complement(&complement(&set));
        for x in sample_points(&[1.0, 2.0, 3.0, 4.0]) {
            assert_eq!(back.check_point(&x), set.check_point(&x));
        }
    }

    #[test]
    fn de_morgan_laws() {
        let boundaries = [1.0, 3.0, 2.0, 4.0];
        let a = || interval(1.0, 3.0);
        let b = || interval(2.0, 4.0);

        let not_union = complement(&union(a(), b()));
        let inter_of_nots = intersection(complement(&a()), complement(&b()));
        let not_inter = complement(&intersection(a(), b()));
        let union_of_nots = union(complement(&a()), complement(&b()));
        for x in sample_points(&boundaries) {
            assert_eq!(not_union.check_point(&x), inter_of_nots.check_point(&x));
            assert_eq!(not_inter.check_point(&x), union_of_nots.check_point(&x));
        }
    }

    #[test]
    fn difference_is_intersection_with_the_complement() {
        let boundaries = [1.0, 4.0, 2.0, 3.0];
        let a = || interval(1.0, 4.0);
        let b = || interval(2.0, 3.0);
        let diff = difference(a(), b());
        let inter = intersection(a(), complement(&b()));
        for x in sample_points(&boundaries) {
            assert_eq!(diff.check_point(&x), inter.check_point(&x));
        }
    }

    #[test]
    fn xor_means_exactly_one() {
        let boundaries = [1.0, 3.0, 2.0, 4.0];
        let a = interval(1.0, 3.0);
        let b = interval(2.0, 4.0);
        let merged = xor(a.copy_self(), b.copy_self());
        for x in sample_points(&boundaries) {
            let in_a = a.check_point(&x) == Location::Inside;
            let in_b = b.check_point(&x) == Location::Inside;
            let in_xor = merged.check_point(&x) == Location::Inside;
            assert_eq!(in_xor, in_a ^ in_b, "at {x}");
        }
    }

    /// Strategy for a bounded interval with comfortably separated endpoints.
    fn arb_interval() -> impl Strategy<Value = (f64, f64)> {
        (-10.0..10.0f64, 0.5..5.0f64).prop_map(|(lower, length)| (lower, lower + length))
    }

    proptest! {
        #[test]
        fn prop_union_commutes((a1, a2) in arb_interval(), (b1, b2) in arb_interval()) {
            let ab = union(interval(a1, a2), interval(b1, b2));
            let ba = union(interval(b1, b2), interval(a1, a2));
            for x in sample_points(&[a1, a2, b1, b2]) {
                prop_assert_eq!(ab.check_point(&x), ba.check_point(&x));
            }
        }

        #[test]
        fn prop_union_against_naive_membership((a1, a2) in arb_interval(), (b1, b2) in arb_interval()) {
            let merged = union(interval(a1, a2), interval(b1, b2));
            for x in sample_points(&[a1, a2, b1, b2]) {
                let expected = (x > a1 && x < a2) || (x > b1 && x < b2);
                prop_assert_eq!(merged.check_point(&x) == Location::Inside, expected, "at {}", x);
            }
        }

        #[test]
        fn prop_intersection_against_naive_membership((a1, a2) in arb_interval(), (b1, b2) in arb_interval()) {
            let merged = intersection(interval(a1, a2), interval(b1, b2));
            for x in sample_points(&[a1, a2, b1, b2]) {
                let expected = (x > a1 && x < a2) && (x > b1 && x < b2);
                prop_assert_eq!(merged.check_point(&x) == Location::Inside, expected, "at {}", x);
            }
        }

        #[test]
        fn prop_difference_matches_complement_form((a1, a2) in arb_interval(), (b1, b2) in arb_interval()) {
            let diff = difference(interval(a1, a2), interval(b1, b2));
            let via_complement = intersection(interval(a1, a2), complement(&interval(b1, b2)));
            for x in sample_points(&[a1, a2, b1, b2]) {
                prop_assert_eq!(diff.check_point(&x), via_complement.check_point(&x));
            }
        }

        #[test]
        fn prop_convex_construction_ignores_input_order((a1, a2) in arb_interval()) {
            let forward: Option<IntervalsSet> = build_convex(vec![
                OrientedPoint::new(a1, false, TOL),
                OrientedPoint::new(a2, true, TOL),
            ]).unwrap();
            let backward: Option<IntervalsSet> = build_convex(vec![
                OrientedPoint::new(a2, true, TOL),
                OrientedPoint::new(a1, false, TOL),
            ]).unwrap();
            let forward = forward.unwrap();
            let backward = backward.unwrap();
            for x in sample_points(&[a1, a2]) {
                prop_assert_eq!(forward.check_point(&x), backward.check_point(&x));
            }
        }
    }
}
