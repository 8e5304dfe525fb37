//! The executor: walking a decision tree over a host graph.

pub use count::Tally;
pub use equation::EquationTally;
pub use single::SingleGraphletWalker;
pub use walker::TreeWalker;

use crate::{
    pattern::EdgeType,
    tree::{AddNode, TreeRef},
};

mod count;
mod equation;
mod single;
mod walker;

/// Receives every instance the walk reaches.
pub trait Visitor<E: EdgeType> {
    /// Whether the walk descends into `node` at all.
    fn enters(&self, _node: TreeRef) -> bool {
        true
    }

    /// `instance[i]` is the host node matched to node `i` of the build
    /// sequence leading to `node`.
    fn visit(&mut self, node: &AddNode<E>, instance: &[usize]);
}

/// Combines the tallies of two workers.
pub trait Merge {
    fn merge(self, other: Self) -> Self;
}
