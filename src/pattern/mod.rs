//! Small patterns, their edge models and the canonicalization engine.

pub use factory::{PatternFactory, PatternIterator};
pub use graph::Pattern;
pub use models::{Arc, Color, Colored, Directed, Link, Signed, SignedArc, Simple};

use derive_more::Display;
use std::{
    cmp::Ordering,
    fmt::{Debug, Display as FmtDisplay},
    hash::Hash,
};

mod factory;
mod graph;
mod models;
mod symmetry;

/// The kind of one directed half of an edge.
///
/// Pattern and host adjacency store, for the ordered pair `(i, j)`, the types
/// `t` such that `j` is a `t`-neighbor of `i`. The pair `(j, i)` then holds
/// `t.inverse()`.
pub trait EdgeType: Copy + Eq + Ord + Hash + Debug + FmtDisplay + Send + Sync + 'static {
    /// Dense position of this type in its model's catalog.
    fn index(self) -> usize;

    fn from_index(index: usize) -> Self;

    /// The same edge seen from its other endpoint.
    fn inverse(self) -> Self;
}

/// A set of edge types, stored as bits indexed by [`EdgeType::index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeMask(u32);

impl EdgeMask {
    pub const EMPTY: EdgeMask = EdgeMask(0);

    pub fn of<E: EdgeType>(edge: E) -> Self {
        EdgeMask(1 << edge.index())
    }

    pub fn from_edges<E: EdgeType, I: IntoIterator<Item = E>>(edges: I) -> Self {
        edges
            .into_iter()
            .fold(EdgeMask::EMPTY, |mask, edge| mask.with(edge))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains<E: EdgeType>(self, edge: E) -> bool {
        self.0 & (1 << edge.index()) != 0
    }

    pub fn with<E: EdgeType>(self, edge: E) -> Self {
        EdgeMask(self.0 | (1 << edge.index()))
    }

    pub fn without<E: EdgeType>(self, edge: E) -> Self {
        EdgeMask(self.0 & !(1 << edge.index()))
    }

    pub fn union(self, other: EdgeMask) -> Self {
        EdgeMask(self.0 | other.0)
    }

    pub fn is_subset(self, other: EdgeMask) -> bool {
        self.0 & !other.0 == 0
    }

    /// The member types in catalog order.
    pub fn edges<E: EdgeType>(self) -> impl Iterator<Item = E> {
        (0..32)
            .filter(move |i| self.0 & (1 << i) != 0)
            .map(E::from_index)
    }

    pub fn inverse<E: EdgeType>(self) -> Self {
        EdgeMask::from_edges(self.edges::<E>().map(E::inverse))
    }
}

/// One family of patterns: its edge-type catalog, the combinations of types
/// allowed between one ordered node pair, and its representation strings.
pub trait EdgeModel: Clone + Debug + Send + Sync + 'static {
    type Edge: EdgeType;

    fn name(&self) -> String;

    /// All edge types in catalog order.
    fn edge_types(&self) -> Vec<Self::Edge>;

    /// Every non-empty set of types that may coexist on one ordered pair.
    fn valid_combinations(&self) -> Vec<EdgeMask>;

    /// Whether `mask` may sit on one ordered pair. The empty mask is legal.
    fn is_legal(&self, mask: EdgeMask) -> bool;

    fn representation_length(&self, order: usize) -> usize;

    /// Characters other than `'0'` that may appear in a representation.
    fn alphabet(&self) -> Vec<char>;

    fn encode(&self, adjacency: &[Vec<EdgeMask>]) -> String;

    /// Edges `(from, to, type)` described by a representation of `order`
    /// nodes. The caller guarantees the length matches.
    fn decode(&self, order: usize, repr: &str) -> Result<Vec<(usize, usize, Self::Edge)>, PatternError>;

    /// Maps an integer label of an input file onto an edge type, as seen from
    /// the source node of the input edge.
    fn edge_from_label(&self, label: i64) -> Option<Self::Edge>;

    fn order_of(&self, length: usize) -> Option<usize> {
        (1..)
            .map(|order| (order, self.representation_length(order)))
            .take_while(|&(_, len)| len <= length)
            .find(|&(_, len)| len == length)
            .map(|(order, _)| order)
    }
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum IllegalAction {
    #[display(fmt = "self-loop on node {}", _0)]
    SelfLoop(usize),
    #[display(fmt = "node {} is out of range", _0)]
    NodeOutOfRange(usize),
    #[display(fmt = "illegal edge between {} and {}", _0, _1)]
    IllegalEdge(usize, usize),
    #[display(fmt = "no such edge between {} and {}", _0, _1)]
    MissingEdge(usize, usize),
}

impl std::error::Error for IllegalAction {}

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum PatternError {
    #[display(fmt = "no pattern has a representation of length {}", _0)]
    InvalidLength(usize),
    #[display(fmt = "invalid character {:?} at position {}", _0, _1)]
    InvalidCharacter(char, usize),
    #[display(fmt = "{}", _0)]
    Illegal(IllegalAction),
}

impl std::error::Error for PatternError {}

/// The order on representation strings: shorter first, then at the first
/// differing character `'0'` is lowest and other characters compare as bytes.
pub fn compare_representations(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        a.bytes()
            .zip(b.bytes())
            .find(|(x, y)| x != y)
            .map_or(Ordering::Equal, |(x, y)| match (x, y) {
                (b'0', _) => Ordering::Less,
                (_, b'0') => Ordering::Greater,
                _ => x.cmp(&y),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_representations() {
        assert_eq!(compare_representations("", "0"), Ordering::Less);
        assert_eq!(compare_representations("011", "101"), Ordering::Less);
        assert_eq!(compare_representations("0+", "0-"), Ordering::Less);
        assert_eq!(compare_representations("0+", "00"), Ordering::Greater);
        assert_eq!(compare_representations("111", "01111"), Ordering::Less);
        assert_eq!(compare_representations("1-0", "1-0"), Ordering::Equal);
    }

    #[test]
    fn test_edge_mask() {
        let mask = EdgeMask::from_edges(vec![Arc::Out]);
        assert!(mask.contains(Arc::Out));
        assert!(!mask.contains(Arc::In));
        assert_eq!(mask.inverse::<Arc>(), EdgeMask::of(Arc::In));
        let both = mask.with(Arc::In);
        assert_eq!(both.len(), 2);
        assert!(mask.is_subset(both));
        assert!(!both.is_subset(mask));
        assert_eq!(both.edges::<Arc>().collect::<Vec<_>>(), vec![Arc::Out, Arc::In]);
        assert_eq!(both.without(Arc::Out), EdgeMask::of(Arc::In));
        assert!(EdgeMask::EMPTY.is_empty());
    }
}
