use super::{Merge, Visitor};
use crate::{
    pattern::EdgeType,
    tree::{AddNode, DecisionTree},
};

/// Walks per pattern id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tally {
    walks: Vec<u64>,
}

impl Tally {
    pub fn new<E: EdgeType>(tree: &DecisionTree<E>) -> Self {
        Self {
            walks: vec![0; tree.num_patterns()],
        }
    }

    pub fn walks(&self) -> &[u64] {
        &self.walks
    }

    /// Instances per pattern id: the walks divided by the symmetry factor.
    pub fn counts<E: EdgeType>(&self, tree: &DecisionTree<E>) -> Vec<u64> {
        self.walks
            .iter()
            .zip(tree.patterns())
            .map(|(&walks, pattern)| {
                let factor = pattern.symmetry_factor();
                debug_assert_eq!(walks % factor, 0, "{}", pattern.canonical());
                walks / factor
            })
            .collect()
    }
}

impl<E: EdgeType> Visitor<E> for Tally {
    fn visit(&mut self, node: &AddNode<E>, _instance: &[usize]) {
        self.walks[node.pattern()] += 1;
    }
}

impl Merge for Tally {
    fn merge(mut self, other: Self) -> Self {
        for (walks, other) in self.walks.iter_mut().zip(other.walks) {
            *walks += other;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::AdjacencyGraph,
        executor::TreeWalker,
        pattern::{PatternFactory, Simple},
        tree::TreeGenerator,
    };

    #[test]
    fn test_star() {
        let factory = PatternFactory::new(Simple, false);
        let tree = TreeGenerator::new(&factory, 3).generate();
        // a star with center 0 and three leaves
        let graph = AdjacencyGraph::from_pattern(&factory.from_string("110100").unwrap());
        let mut tallies = (0..4).map(|start| {
            let mut walker = TreeWalker::new(&tree, &graph, Tally::new(&tree));
            walker.run(start);
            walker.into_visitor()
        });
        let first = tallies.next().unwrap();
        let tally = tallies.fold(first, Merge::merge);
        let counts = tally.counts(&tree);
        let count = |canonical: &str| counts[tree.find(canonical).unwrap().pattern()];
        assert_eq!(count(""), 4);
        assert_eq!(count("1"), 3);
        assert_eq!(count("011"), 3);
        assert_eq!(count("111"), 0);
        assert_eq!(tally.walks()[tree.find("1").unwrap().pattern()], 6);
    }
}
