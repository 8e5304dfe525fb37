use super::{Merge, Tally, Visitor};
use crate::{
    equation::{CommonNeighbors, EquationSet},
    pattern::EdgeType,
    tree::{AddNode, DecisionTree},
};

/// Counts the tree's patterns and sums the right-hand side of every equation
/// whose pattern the walk reaches.
pub struct EquationTally<'a, E: EdgeType, C> {
    tally: Tally,
    equations: &'a EquationSet<E>,
    commons: &'a C,
    by_pattern: Vec<Vec<usize>>,
    raw: Vec<u64>,
}

impl<'a, E: EdgeType, C: CommonNeighbors> EquationTally<'a, E, C> {
    pub fn new(tree: &DecisionTree<E>, equations: &'a EquationSet<E>, commons: &'a C) -> Self {
        assert_eq!(equations.order(), tree.order() + 1, "equations do not extend the tree");
        assert_eq!(equations.is_orbit_rep(), tree.is_orbit_rep());
        let mut by_pattern = vec![vec![]; tree.num_patterns()];
        for (i, equation) in equations.equations().iter().enumerate() {
            let node = tree
                .find(equation.rhs())
                .unwrap_or_else(|| panic!("{} is not in the tree", equation.rhs()));
            by_pattern[node.pattern()].push(i);
        }
        Self {
            tally: Tally::new(tree),
            equations,
            commons,
            by_pattern,
            raw: vec![0; equations.len()],
        }
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// The summed right-hand side of each equation.
    pub fn raw(&self) -> &[u64] {
        &self.raw
    }

    /// The count of each pattern the equations solve, in equation order.
    pub fn solve(&self) -> Vec<u64> {
        self.equations.solve(&self.raw)
    }
}

impl<'a, E: EdgeType, C> Clone for EquationTally<'a, E, C> {
    fn clone(&self) -> Self {
        Self {
            tally: self.tally.clone(),
            equations: self.equations,
            commons: self.commons,
            by_pattern: self.by_pattern.clone(),
            raw: self.raw.clone(),
        }
    }
}

impl<'a, E: EdgeType, C: CommonNeighbors> Visitor<E> for EquationTally<'a, E, C> {
    fn visit(&mut self, node: &AddNode<E>, instance: &[usize]) {
        self.tally.visit(node, instance);
        for &i in &self.by_pattern[node.pattern()] {
            self.raw[i] += self.equations.equations()[i].evaluate(
                node.canonical_labeling(),
                instance,
                self.commons,
            );
        }
    }
}

impl<'a, E: EdgeType, C> Merge for EquationTally<'a, E, C> {
    fn merge(mut self, other: Self) -> Self {
        self.tally = self.tally.merge(other.tally);
        for (raw, other) in self.raw.iter_mut().zip(other.raw) {
            *raw += other;
        }
        self
    }
}
