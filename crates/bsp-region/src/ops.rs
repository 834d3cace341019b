//! Boolean algebra over regions: convex construction, the four merge
//! operators, and complement.
//!
//! The merge operators ([`union`], [`intersection`], [`xor`], [`difference`])
//! splice parts of both operand trees into the result, so they take their
//! operands by value; keep a [`Region::copy_self`] around if an operand is
//! still needed afterwards. [`complement`] is the only non-destructive
//! operator.

use slotmap::SecondaryMap;

use crate::bsp::{
    Attribute, AttributeCleaner, BoundaryAttribute, BspTree, LeafMerger, NodeKey,
    VanishingCutHandler, VanishingToLeaf,
};
use crate::error::{RegionError, Result};
use crate::hyperplane::{Hyperplane, Split, SubHyperplane};
use crate::region::{Location, Region};

/// Builds a convex region bounded by the given hyperplanes.
///
/// Returns `Ok(None)` for an empty collection. Each hyperplane chops the
/// cell carved out by the previous ones, keeping the minus side; the inside
/// of the result is the intersection of all minus half-spaces. A hyperplane
/// coincident with an earlier one and oriented the same way is redundant and
/// ignored; oriented the opposite way it squeezes the cell below tolerance
/// and the whole region is empty. A hyperplane lying strictly outside the
/// cell carved so far cannot bound it, and construction fails with
/// [`RegionError::InconsistentHyperplanes`].
pub fn build_convex<R: Region>(
    hyperplanes: impl IntoIterator<Item = R::Hyperplane>,
) -> Result<Option<R>> {
    let mut tree: BspTree<R::Hyperplane> = BspTree::leaf(Attribute::Inside);
    let mut node = tree.root();
    let mut bounded = false;
    for hyperplane in hyperplanes {
        bounded = true;
        if tree.insert_cut(node, &hyperplane) {
            tree.set_attribute(node, Attribute::Unset);
            let Some((plus, minus)) = tree.children(node) else {
                continue;
            };
            tree.set_attribute(plus, Attribute::Outside);
            node = minus;
            tree.set_attribute(node, Attribute::Inside);
        } else {
            // the hyperplane did not reach the frontier cell; walk the
            // ancestors to find out why
            let piece = hyperplane.whole_hyperplane();
            let mut remainder = Some(piece);
            let mut current = node;
            while let Some(parent) = tree.parent(current) {
                let Some(piece) = remainder else {
                    break;
                };
                let Some(other) = tree.cut(parent).map(|cut| cut.hyperplane().clone()) else {
                    break;
                };
                match piece.split(&other) {
                    Split::Coincident => {
                        if !hyperplane.same_orientation_as(&other) {
                            // opposed twin of an earlier hyperplane: the cell
                            // is thinner than the tolerance
                            return Ok(Some(R::from_tree(BspTree::leaf(Attribute::Outside))));
                        }
                        // an extension of an earlier hyperplane; harmless
                        remainder = Some(piece);
                    }
                    Split::Plus(_) => return Err(RegionError::InconsistentHyperplanes),
                    split => remainder = split.into_minus(),
                }
                current = parent;
            }
        }
    }
    if bounded {
        Ok(Some(R::from_tree(tree)))
    } else {
        Ok(None)
    }
}

/// Computes the union of two regions, consuming both.
pub fn union<R: Region>(region1: R, region2: R) -> R {
    let mut merger = RegionMerger::<R>::Union;
    rebuild(region1.into_tree().merge(region2.into_tree(), &mut merger))
}

/// Computes the intersection of two regions, consuming both.
pub fn intersection<R: Region>(region1: R, region2: R) -> R {
    let mut merger = RegionMerger::Intersection {
        first: region1.copy_self(),
        second: region2.copy_self(),
    };
    rebuild(region1.into_tree().merge(region2.into_tree(), &mut merger))
}

/// Computes the symmetric difference of two regions, consuming both.
pub fn xor<R: Region>(region1: R, region2: R) -> R {
    let mut merger = RegionMerger::<R>::Xor;
    rebuild(region1.into_tree().merge(region2.into_tree(), &mut merger))
}

/// Computes `region1` minus `region2`, consuming both.
pub fn difference<R: Region>(region1: R, region2: R) -> R {
    let mut merger = RegionMerger::Difference {
        first: region1.copy_self(),
        second: region2.copy_self(),
    };
    rebuild(region1.into_tree().merge(region2.into_tree(), &mut merger))
}

/// Builds the complement of a region without modifying it.
///
/// The tree is copied with the same cut topology, every leaf flag flipped
/// and boundary sides swapped; splitter cross-references are then remapped
/// through the identity map collected during the copy, so the new tree's
/// boundary metadata never points into the source structure.
pub fn complement<R: Region>(region: &R) -> R {
    let mut tree = region.tree().clone();
    let root = tree.root();
    let root = complement_subtree(&mut tree, root);
    tree.set_root(root);
    R::from_tree(tree)
}

fn rebuild<R: Region>(mut tree: BspTree<R::Hyperplane>) -> R {
    tree.visit(&mut AttributeCleaner);
    R::from_tree(tree)
}

/// The leaf-combination strategies of the four operators.
///
/// Intersection and difference carry pristine copies of their operands, so
/// cells whose cut vanished during splicing can be re-classified by sampling
/// a representative point.
enum RegionMerger<R: Region> {
    Union,
    Intersection { first: R, second: R },
    Xor,
    Difference { first: R, second: R },
}

impl<R: Region> LeafMerger<R::Hyperplane> for RegionMerger<R> {
    fn merge_leaves(
        &mut self,
        tree: &mut BspTree<R::Hyperplane>,
        leaf: NodeKey,
        subtree: NodeKey,
        parent: Option<NodeKey>,
        is_plus_child: bool,
        leaf_from_first: bool,
    ) -> NodeKey {
        let leaf_inside = tree.leaf_value(leaf) == Some(true);
        match self {
            RegionMerger::Union => {
                // an inside leaf swallows whatever faces it
                let kept = if leaf_inside { leaf } else { subtree };
                let mut handler = VanishingToLeaf::new(leaf_inside);
                tree.insert_in_tree(kept, parent, is_plus_child, &mut handler);
                kept
            }
            RegionMerger::Intersection { first, second } => {
                // an outside leaf swallows whatever faces it
                let kept = if leaf_inside { subtree } else { leaf };
                let mut handler = CellSampler {
                    first: &*first,
                    second: &*second,
                    rule: inside_both,
                };
                tree.insert_in_tree(kept, parent, is_plus_child, &mut handler);
                kept
            }
            RegionMerger::Xor => {
                // an inside leaf flips the facing subtree
                let kept = if leaf_inside {
                    complement_subtree(tree, subtree)
                } else {
                    subtree
                };
                let mut handler = VanishingToLeaf::new(true);
                tree.insert_in_tree(kept, parent, is_plus_child, &mut handler);
                kept
            }
            RegionMerger::Difference { first, second } => {
                let kept = if leaf_inside {
                    // inside the first operand: keep the flipped second side
                    let from_second = if leaf_from_first { subtree } else { leaf };
                    complement_subtree(tree, from_second)
                } else if leaf_from_first {
                    leaf
                } else {
                    subtree
                };
                let mut handler = CellSampler {
                    first: &*first,
                    second: &*second,
                    rule: inside_first_only,
                };
                tree.insert_in_tree(kept, parent, is_plus_child, &mut handler);
                kept
            }
        }
    }
}

fn inside_both(first: Location, second: Location) -> bool {
    !(first == Location::Outside || second == Location::Outside)
}

fn inside_first_only(first: Location, second: Location) -> bool {
    first == Location::Inside && second == Location::Outside
}

/// Vanishing-cut resolution by sampling the degenerate cell.
///
/// A representative point of the cell is classified against the two operand
/// copies and the operator's truth rule decides the replacement leaf.
struct CellSampler<'a, R: Region> {
    first: &'a R,
    second: &'a R,
    rule: fn(Location, Location) -> bool,
}

impl<R: Region> VanishingCutHandler<R::Hyperplane> for CellSampler<'_, R> {
    fn fix_node(&mut self, tree: &mut BspTree<R::Hyperplane>, node: NodeKey) -> NodeKey {
        let cell = tree.prune_around_convex_cell(node, Attribute::Inside, &Attribute::Outside);
        let point = R::from_tree(cell).barycenter();
        let inside = (self.rule)(
            self.first.check_point(&point),
            self.second.check_point(&point),
        );
        tree.new_leaf(Attribute::from_leaf_value(inside))
    }
}

/// Copies the subtree below `node` with every leaf flag flipped and boundary
/// sides swapped, returning the detached copy's root.
fn complement_subtree<H: Hyperplane>(tree: &mut BspTree<H>, node: NodeKey) -> NodeKey {
    let mut map: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::new();
    let copy = recurse_complement(tree, node, &mut map);

    // remap splitters now that every copied node is known
    let pairs: Vec<(NodeKey, NodeKey)> = map.iter().map(|(old, &new)| (old, new)).collect();
    for (old, new) in pairs {
        let splitters: Vec<NodeKey> = match tree.attribute(old) {
            Attribute::Boundary(boundary) => boundary
                .splitters
                .iter()
                .filter_map(|splitter| map.get(*splitter).copied())
                .collect(),
            _ => continue,
        };
        if let Attribute::Boundary(boundary) = tree.attribute_mut(new) {
            boundary.splitters = splitters;
        }
    }
    copy
}

fn recurse_complement<H: Hyperplane>(
    tree: &mut BspTree<H>,
    node: NodeKey,
    map: &mut SecondaryMap<NodeKey, NodeKey>,
) -> NodeKey {
    let copy = match tree.children(node) {
        None => {
            let flipped = match tree.leaf_value(node) {
                Some(inside) => Attribute::from_leaf_value(!inside),
                None => Attribute::Unset,
            };
            tree.new_leaf(flipped)
        }
        Some((plus, minus)) => {
            let Some(cut) = tree.cut(node).cloned() else {
                return tree.new_leaf(Attribute::Unset);
            };
            let attribute = match tree.attribute(node) {
                Attribute::Boundary(boundary) => {
                    // the complement swaps which side of the cut faces the
                    // inside; splitters are filled in afterwards
                    Attribute::Boundary(BoundaryAttribute::new(
                        boundary.plus_inside.clone(),
                        boundary.plus_outside.clone(),
                    ))
                }
                other => other.clone(),
            };
            let new_plus = recurse_complement(tree, plus, map);
            let new_minus = recurse_complement(tree, minus, map);
            tree.new_internal(cut, new_plus, new_minus, attribute)
        }
    };
    map.insert(node, copy);
    copy
}
