use super::{Equation, Term};
use crate::{
    data::AdjacencyGraph,
    executor::SingleGraphletWalker,
    pattern::{compare_representations, EdgeMask, EdgeModel, Pattern, PatternFactory},
    tree::{AddNode, DecisionTree},
};
use itertools::Itertools;
use log::{debug, info};
use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    iter,
    time::Instant,
};

/// Derives every candidate equation from the leaves of a tree.
pub struct EquationGenerator<'a, M: EdgeModel> {
    factory: &'a PatternFactory<M>,
    tree: &'a DecisionTree<M::Edge>,
    combinations: Vec<EdgeMask>,
}

impl<'a, M: EdgeModel> EquationGenerator<'a, M> {
    pub fn new(factory: &'a PatternFactory<M>, tree: &'a DecisionTree<M::Edge>) -> Self {
        assert_eq!(factory.is_orbit_rep(), tree.is_orbit_rep());
        Self {
            factory,
            tree,
            combinations: factory.valid_combinations(),
        }
    }

    /// One equation per leaf and orbit of terms over it.
    pub fn generate(&self) -> Vec<Equation<M::Edge>> {
        let start_time = Instant::now();
        let equations: Vec<_> = self
            .tree
            .leaves()
            .flat_map(|leaf| self.leaf_equations(leaf))
            .collect();
        info!(
            "generated {} equations for order {} in {} ms",
            equations.len(),
            self.tree.order() + 1,
            start_time.elapsed().as_millis()
        );
        equations
    }

    fn leaf_equations(&self, leaf: &AddNode<M::Edge>) -> Vec<Equation<M::Edge>> {
        let pattern = self
            .factory
            .from_string(leaf.canonical())
            .expect("canonical strings decode");
        let walker = SingleGraphletWalker::new(self.tree, leaf.pattern());
        let mut seen = HashSet::new();
        let mut equations = vec![];
        for term in self.terms(pattern.order()) {
            if seen.contains(&term) {
                continue;
            }
            let orbit: BTreeSet<Term> = pattern
                .automorphisms()
                .iter()
                .map(|perm| image(&term, perm))
                .collect();
            seen.extend(orbit.iter().cloned());
            let terms: Vec<Term> = orbit.into_iter().collect();
            let minus = minus(&pattern, &term);
            let lhs = self.lhs(&pattern, &term, &walker, &terms, minus);
            equations.push(Equation::new(lhs, leaf.canonical().to_owned(), terms, minus));
        }
        debug!("[{}]: {} equations", leaf.canonical(), equations.len());
        equations
    }

    /// Every non-empty term over `order` nodes.
    fn terms(&self, order: usize) -> impl Iterator<Item = Term> + '_ {
        let options: Vec<Option<EdgeMask>> = iter::once(None)
            .chain(self.combinations.iter().copied().map(Some))
            .collect();
        iter::repeat(options)
            .take(order)
            .multi_cartesian_product()
            .map(|choice| {
                choice
                    .into_iter()
                    .enumerate()
                    .filter_map(|(node, mask)| mask.map(|mask| (node, mask)))
                    .collect::<Term>()
            })
            .filter(|term| !term.is_empty())
    }

    /// The patterns one node larger that join the new node per `term`, with
    /// their multiplicities.
    fn lhs(
        &self,
        pattern: &Pattern<M>,
        term: &[(usize, EdgeMask)],
        walker: &SingleGraphletWalker<M::Edge>,
        terms: &[Term],
        minus: u64,
    ) -> Vec<(String, u64)> {
        let options: Vec<Vec<EdgeMask>> = (0..pattern.order())
            .map(|node| match term.iter().find(|&&(other, _)| other == node) {
                Some(&(_, mask)) => self
                    .combinations
                    .iter()
                    .copied()
                    .filter(|&combination| mask.is_subset(combination))
                    .collect(),
                None => iter::once(EdgeMask::EMPTY)
                    .chain(self.combinations.iter().copied())
                    .collect(),
            })
            .collect();
        let mut extensions = BTreeMap::new();
        for choice in options.into_iter().multi_cartesian_product() {
            let mut extended = pattern.clone();
            let new = extended.add_node();
            for (node, mask) in choice.into_iter().enumerate() {
                for edge in mask.edges::<M::Edge>() {
                    extended
                        .add_edge(node, new, edge)
                        .expect("valid combinations are legal");
                }
            }
            extensions
                .entry(extended.canonical().to_owned())
                .or_insert(extended);
        }
        let mut lhs: Vec<(String, u64)> = extensions
            .into_iter()
            .map(|(canonical, extended)| {
                let host = AdjacencyGraph::from_pattern(&extended);
                let starts = if extended.is_orbit_rep() { 1 } else { extended.order() };
                (canonical, walker.sum(&host, 0..starts, terms, minus))
            })
            .collect();
        lhs.sort_by(|a, b| compare_representations(&a.0, &b.0));
        lhs
    }
}

/// The term moved by the automorphism `perm`.
fn image(term: &[(usize, EdgeMask)], perm: &[usize]) -> Term {
    let mut image: Term = term.iter().map(|&(node, mask)| (perm[node], mask)).collect();
    image.sort_unstable();
    image
}

/// Nodes of the pattern itself that satisfy the term.
fn minus<M: EdgeModel>(pattern: &Pattern<M>, term: &[(usize, EdgeMask)]) -> u64 {
    (0..pattern.order())
        .filter(|&other| {
            term.iter()
                .all(|&(node, mask)| mask.is_subset(pattern.edges(node, other)))
        })
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pattern::{Directed, Simple},
        tree::TreeGenerator,
    };

    #[test]
    fn test_edge_equations() {
        let factory = PatternFactory::new(Simple, false);
        let tree = TreeGenerator::new(&factory, 2).generate();
        let equations = EquationGenerator::new(&factory, &tree).generate();
        let shown: Vec<String> = equations.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            shown,
            vec![
                "2·[011] + 6·[111] = Σ[1] {0:-} {1:-} − 1",
                "3·[111] = Σ[1] {0:-,1:-}",
            ]
        );
    }

    #[test]
    fn test_node_equations() {
        let factory = PatternFactory::new(Directed, false);
        let tree = TreeGenerator::new(&factory, 1).generate();
        let equations = EquationGenerator::new(&factory, &tree).generate();
        // out-degrees, in-degrees and mutual degrees
        assert_eq!(equations.len(), 3);
        assert!(equations.iter().all(|e| e.rhs().is_empty() && e.minus() == 0));
        let mutual = equations.iter().find(|e| e.lhs().len() == 1).unwrap();
        assert_eq!(mutual.lhs(), &[("11".to_owned(), 2)]);
    }

    #[test]
    fn test_every_pattern_is_solved() {
        let factory = PatternFactory::new(Simple, true);
        let tree = TreeGenerator::new(&factory, 3).generate();
        let solved: BTreeSet<String> = EquationGenerator::new(&factory, &tree)
            .generate()
            .iter()
            .map(|e| e.solves().to_owned())
            .collect();
        let expected: BTreeSet<String> = crate::pattern::PatternIterator::new(&factory, 4)
            .map(|p| p.representation())
            .collect();
        assert_eq!(solved, expected);
        assert_eq!(solved.len(), 11);
    }
}
