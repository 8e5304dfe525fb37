//! Exhaustive canonical labeling and automorphism search.

use super::{compare_representations, EdgeMask, EdgeModel};
use crate::tools::Permutator;
use std::{cmp::Ordering, collections::BTreeSet};

/// Everything derived from searching all relabelings of a pattern.
///
/// Permutations are stored as position tables: `perm[p]` is the node of the
/// pattern placed at position `p`.
#[derive(Clone, Debug)]
pub(crate) struct Symmetry {
    pub canonical: String,
    pub is_canonical: bool,
    /// Canonical position `p` holds pattern node `labeling[p]`.
    pub labeling: Vec<usize>,
    pub automorphisms: Vec<Vec<usize>>,
    /// The orbit of every node, indexed by node.
    pub orbits: Vec<BTreeSet<usize>>,
    pub cosets: Vec<BTreeSet<usize>>,
}

fn swap_nodes(adjacency: &mut [Vec<EdgeMask>], a: usize, b: usize) {
    adjacency.swap(a, b);
    for row in adjacency.iter_mut() {
        row.swap(a, b);
    }
}

impl Symmetry {
    /// Searches every arrangement of the nodes that are not fixed. With
    /// `orbit_rep` node 0 stays in place.
    pub fn search<M: EdgeModel>(model: &M, adjacency: &[Vec<EdgeMask>], orbit_rep: bool) -> Self {
        let order = adjacency.len();
        let original = model.encode(adjacency);
        let identity: Vec<usize> = (0..order).collect();
        let mut canonical = original.clone();
        let mut labeling = identity.clone();
        let mut automorphisms = vec![identity.clone()];
        let fixed = if orbit_rep { order.min(1) } else { 0 };
        if order - fixed > 1 {
            let mut work = adjacency.to_vec();
            let mut perm = identity;
            for k in Permutator::new(order - fixed) {
                let (a, b) = (fixed + k, fixed + k + 1);
                swap_nodes(&mut work, a, b);
                perm.swap(a, b);
                let repr = model.encode(&work);
                if repr == original {
                    automorphisms.push(perm.clone());
                } else if compare_representations(&repr, &canonical) == Ordering::Less {
                    canonical = repr;
                    labeling = perm.clone();
                }
            }
        }
        let orbits: Vec<BTreeSet<usize>> = (0..order)
            .map(|node| automorphisms.iter().map(|perm| perm[node]).collect())
            .collect();
        let cosets = coset_representatives(order, &automorphisms);
        Symmetry {
            is_canonical: canonical == original,
            canonical,
            labeling,
            automorphisms,
            orbits,
            cosets,
        }
    }
}

/// Stabilizer chain: the images of node `i` under the automorphisms fixing
/// every node before `i`.
fn coset_representatives(order: usize, automorphisms: &[Vec<usize>]) -> Vec<BTreeSet<usize>> {
    let mut remaining: Vec<&Vec<usize>> = automorphisms.iter().collect();
    (0..order)
        .map(|node| {
            let images: BTreeSet<usize> = remaining.iter().map(|perm| perm[node]).collect();
            remaining.retain(|perm| perm[node] == node);
            images
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Directed, PatternFactory, Simple};

    fn set(nodes: &[usize]) -> BTreeSet<usize> {
        nodes.iter().copied().collect()
    }

    #[test]
    fn test_path() {
        let factory = PatternFactory::new(Simple, false);
        let path = factory.from_string("101").unwrap();
        let symmetry = Symmetry::search(path.model(), path.adjacency(), false);
        assert_eq!(symmetry.canonical, "011");
        assert!(!symmetry.is_canonical);
        assert_eq!(symmetry.automorphisms.len(), 2);
        assert_eq!(symmetry.orbits[0], set(&[0, 2]));
        assert_eq!(symmetry.orbits[1], set(&[1]));
        assert_eq!(symmetry.cosets[0], set(&[0, 2]));
        assert_eq!(symmetry.cosets[1], set(&[1]));
        assert_eq!(symmetry.cosets[2], set(&[2]));
    }

    #[test]
    fn test_triangle_cosets() {
        let factory = PatternFactory::new(Simple, false);
        let triangle = factory.from_string("111").unwrap();
        let symmetry = Symmetry::search(triangle.model(), triangle.adjacency(), false);
        assert_eq!(symmetry.automorphisms.len(), 6);
        let sizes: Vec<usize> = symmetry.cosets.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
    }

    #[test]
    fn test_orbit_rep_fixes_root() {
        let factory = PatternFactory::new(Simple, true);
        // 0 is the center of a star with three leaves
        let star = factory.from_string("110100").unwrap();
        let symmetry = Symmetry::search(star.model(), star.adjacency(), true);
        assert_eq!(symmetry.automorphisms.len(), 6);
        assert!(symmetry.automorphisms.iter().all(|perm| perm[0] == 0));
        assert_eq!(symmetry.orbits[0].len(), 1);
        assert_eq!(symmetry.orbits[3].len(), 3);
    }

    #[test]
    fn test_directed_cycle() {
        let factory = PatternFactory::new(Directed, false);
        // 0 -> 1 -> 2 -> 0
        let cycle = factory.from_string("100110").unwrap();
        let symmetry = Symmetry::search(cycle.model(), cycle.adjacency(), false);
        assert_eq!(symmetry.automorphisms.len(), 3);
        assert!(symmetry.orbits.iter().all(|orbit| orbit.len() == 3));
    }
}
