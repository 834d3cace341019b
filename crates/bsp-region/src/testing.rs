//! Minimal one-dimensional fixtures shared by the unit tests.
//!
//! A hyperplane of the real line is a single oriented point; that is the
//! smallest geometry exercising every code path of the tree, so the core
//! tests all run on it.

use crate::bsp::BspTree;
use crate::hyperplane::{Hyperplane, Split, SubHyperplane};
use crate::region::{Location, Region};

const TOLERANCE: f64 = 1.0e-10;

/// Oriented point on the real line; the plus side extends toward positive
/// infinity when `direct`.
#[derive(Debug, Clone)]
pub(crate) struct TestPoint {
    location: f64,
    direct: bool,
}

impl TestPoint {
    pub(crate) fn new(location: f64, direct: bool) -> Self {
        Self { location, direct }
    }

    pub(crate) fn location(&self) -> f64 {
        self.location
    }
}

impl Hyperplane for TestPoint {
    type Point = f64;
    type Sub = TestCut;

    fn offset(&self, point: &f64) -> f64 {
        if self.direct {
            point - self.location
        } else {
            self.location - point
        }
    }

    fn tolerance(&self) -> f64 {
        TOLERANCE
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direct == other.direct
    }

    fn whole_hyperplane(&self) -> TestCut {
        TestCut {
            hyperplane: self.clone(),
        }
    }
}

/// The sub-hyperplane of a [`TestPoint`]: the point itself.
#[derive(Debug, Clone)]
pub(crate) struct TestCut {
    hyperplane: TestPoint,
}

impl SubHyperplane for TestCut {
    type Hyperplane = TestPoint;

    fn hyperplane(&self) -> &TestPoint {
        &self.hyperplane
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn split(&self, splitter: &TestPoint) -> Split<Self> {
        let offset = splitter.offset(&self.hyperplane.location);
        if offset < -splitter.tolerance() {
            Split::Minus(self.clone())
        } else if offset > splitter.tolerance() {
            Split::Plus(self.clone())
        } else {
            Split::Coincident
        }
    }
}

/// Region of the real line used by the algebra tests.
#[derive(Debug, Clone)]
pub(crate) struct TestRegion {
    tree: BspTree<TestPoint>,
}

impl Region for TestRegion {
    type Hyperplane = TestPoint;

    fn from_tree(tree: BspTree<TestPoint>) -> Self {
        Self { tree }
    }

    fn tree(&self) -> &BspTree<TestPoint> {
        &self.tree
    }

    fn into_tree(self) -> BspTree<TestPoint> {
        self.tree
    }

    /// Picks any interior point: good enough for test sampling.
    fn barycenter(&self) -> f64 {
        let mut cuts = Vec::new();
        collect_cut_locations(&self.tree, self.tree.root(), &mut cuts);
        cuts.sort_by(f64::total_cmp);

        let mut candidates = Vec::new();
        if let Some(first) = cuts.first() {
            candidates.push(first - 1.0);
        }
        for pair in cuts.windows(2) {
            candidates.push(0.5 * (pair[0] + pair[1]));
        }
        if let Some(last) = cuts.last() {
            candidates.push(last + 1.0);
        }
        candidates.push(0.0);
        candidates
            .into_iter()
            .find(|point| self.check_point(point) == Location::Inside)
            .unwrap_or(0.0)
    }
}

fn collect_cut_locations(tree: &BspTree<TestPoint>, node: crate::bsp::NodeKey, out: &mut Vec<f64>) {
    if let Some((plus, minus)) = tree.children(node) {
        if let Some(cut) = tree.cut(node) {
            out.push(cut.hyperplane().location());
        }
        collect_cut_locations(tree, plus, out);
        collect_cut_locations(tree, minus, out);
    }
}
