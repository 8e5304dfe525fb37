use super::{TreeWalker, Visitor};
use crate::{
    data::Graph,
    equation::{contribution, CommonNeighbors, DirectCommons, Term},
    pattern::EdgeType,
    tree::{AddNode, DecisionTree, TreeRef},
};

/// Replays the build sequence of one pattern only, summing an equation's
/// right-hand side over its instances.
pub struct SingleGraphletWalker<'a, E: EdgeType> {
    tree: &'a DecisionTree<E>,
    pattern: usize,
    on_path: Vec<bool>,
}

impl<'a, E: EdgeType> SingleGraphletWalker<'a, E> {
    pub fn new(tree: &'a DecisionTree<E>, pattern: usize) -> Self {
        let mut on_path = vec![false; tree.len()];
        for node in tree.path_to(tree.pattern_ref(pattern)) {
            on_path[node] = true;
        }
        Self {
            tree,
            pattern,
            on_path,
        }
    }

    /// `Σ (commons(T) − minus)` over the instances rooted at `starts` and the
    /// `terms`, given over canonical positions of the pattern.
    pub fn sum<G, I>(&self, graph: &G, starts: I, terms: &[Term], minus: u64) -> u64
    where
        G: Graph<E>,
        I: IntoIterator<Item = usize>,
    {
        let commons = DirectCommons::<E, G>::new(graph);
        let visitor = PathSum {
            on_path: &self.on_path,
            pattern: self.pattern,
            terms,
            minus,
            commons: &commons,
            total: 0,
        };
        let mut walker = TreeWalker::new(self.tree, graph, visitor);
        for start in starts {
            walker.run(start);
        }
        walker.into_visitor().total
    }
}

struct PathSum<'a, C> {
    on_path: &'a [bool],
    pattern: usize,
    terms: &'a [Term],
    minus: u64,
    commons: &'a C,
    total: u64,
}

impl<'a, E: EdgeType, C: CommonNeighbors> Visitor<E> for PathSum<'a, C> {
    fn enters(&self, node: TreeRef) -> bool {
        self.on_path[node]
    }

    fn visit(&mut self, node: &AddNode<E>, instance: &[usize]) {
        if node.pattern() == self.pattern {
            self.total += contribution(
                self.terms,
                self.minus,
                node.canonical_labeling(),
                instance,
                self.commons,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::AdjacencyGraph,
        pattern::{EdgeMask, Link, PatternFactory, Simple},
        tree::TreeGenerator,
    };

    #[test]
    fn test_edge_degrees() {
        let factory = PatternFactory::new(Simple, false);
        let tree = TreeGenerator::new(&factory, 2).generate();
        let edge = tree.find("1").unwrap().pattern();
        let walker = SingleGraphletWalker::new(&tree, edge);
        let terms = vec![vec![(0, EdgeMask::of(Link))], vec![(1, EdgeMask::of(Link))]];
        let path = AdjacencyGraph::from_pattern(&factory.from_string("011").unwrap());
        assert_eq!(walker.sum(&path, 0..3, &terms, 1), 2);
        let triangle = AdjacencyGraph::from_pattern(&factory.from_string("111").unwrap());
        assert_eq!(walker.sum(&triangle, 0..3, &terms, 1), 6);
        assert_eq!(walker.sum(&triangle, 0..3, &terms[..1], 1), 3);
        let both = vec![vec![(0, EdgeMask::of(Link)), (1, EdgeMask::of(Link))]];
        assert_eq!(walker.sum(&triangle, 0..3, &both, 0), 3);
        assert_eq!(walker.sum(&path, 0..3, &both, 0), 0);
    }
}
