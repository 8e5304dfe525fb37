//! The decision tree: every connected canonical pattern up to one order as an
//! incremental build sequence.

pub use generator::TreeGenerator;

use crate::pattern::EdgeType;
use std::{collections::BTreeMap, fmt};

mod generator;

/// Index of a node in the tree arena.
pub type TreeRef = usize;

/// A complete pattern; its children attach one more node.
#[derive(Clone, Debug)]
pub struct AddNode<E> {
    pattern: usize,
    canonical: String,
    order: usize,
    symmetry_factor: u64,
    canonical_labeling: Vec<usize>,
    children: BTreeMap<(usize, E), TreeRef>,
}

impl<E: EdgeType> AddNode<E> {
    /// Dense id of the pattern, in `0..tree.num_patterns()`.
    pub fn pattern(&self) -> usize {
        self.pattern
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// How many walks reach one instance: the automorphism count of the
    /// pattern, or 1 below condition nodes.
    pub fn symmetry_factor(&self) -> u64 {
        self.symmetry_factor
    }

    /// Canonical position `p` is pattern node `canonical_labeling()[p]` of
    /// the build sequence leading here.
    pub fn canonical_labeling(&self) -> &[usize] {
        &self.canonical_labeling
    }

    /// Keyed by `(node, edge)`: the new node is an `edge`-neighbor of `node`.
    pub fn children(&self) -> &BTreeMap<(usize, E), TreeRef> {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Checks whether the newest node is an `edge`-neighbor of `node`.
#[derive(Clone, Debug)]
pub struct AddEdge<E> {
    node: usize,
    edge: E,
    present: Option<TreeRef>,
    absent: Option<TreeRef>,
}

impl<E: EdgeType> AddEdge<E> {
    pub fn node(&self) -> usize {
        self.node
    }

    pub fn edge(&self) -> E {
        self.edge
    }

    pub fn present(&self) -> Option<TreeRef> {
        self.present
    }

    pub fn absent(&self) -> Option<TreeRef> {
        self.absent
    }
}

/// Continues only if `instance[first] < instance[second]`.
#[derive(Clone, Debug)]
pub struct Condition {
    first: usize,
    second: usize,
    child: TreeRef,
}

impl Condition {
    pub fn first(&self) -> usize {
        self.first
    }

    pub fn second(&self) -> usize {
        self.second
    }

    pub fn child(&self) -> TreeRef {
        self.child
    }
}

#[derive(Clone, Debug)]
pub enum TreeNode<E> {
    AddNode(AddNode<E>),
    AddEdge(AddEdge<E>),
    Condition(Condition),
}

impl<E: EdgeType> TreeNode<E> {
    pub fn children(&self) -> Vec<TreeRef> {
        match self {
            TreeNode::AddNode(node) => node.children.values().copied().collect(),
            TreeNode::AddEdge(edge) => edge.present.iter().chain(edge.absent.iter()).copied().collect(),
            TreeNode::Condition(condition) => vec![condition.child],
        }
    }
}

#[derive(Clone, Debug)]
pub struct DecisionTree<E> {
    nodes: Vec<TreeNode<E>>,
    parents: Vec<Option<TreeRef>>,
    patterns: Vec<TreeRef>,
    root: TreeRef,
    order: usize,
    orbit_rep: bool,
    edge_types: Vec<E>,
}

impl<E: EdgeType> DecisionTree<E> {
    pub fn root(&self) -> TreeRef {
        self.root
    }

    pub fn node(&self, node: TreeRef) -> &TreeNode<E> {
        &self.nodes[node]
    }

    pub fn parent(&self, node: TreeRef) -> Option<TreeRef> {
        self.parents[node]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The largest pattern order; leaves have this order.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn is_orbit_rep(&self) -> bool {
        self.orbit_rep
    }

    pub fn edge_types(&self) -> &[E] {
        &self.edge_types
    }

    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    /// The AddNode of pattern `id`.
    pub fn pattern(&self, id: usize) -> &AddNode<E> {
        match &self.nodes[self.patterns[id]] {
            TreeNode::AddNode(node) => node,
            _ => unreachable!(),
        }
    }

    pub fn pattern_ref(&self, id: usize) -> TreeRef {
        self.patterns[id]
    }

    /// All AddNodes, in pattern id order.
    pub fn patterns(&self) -> impl Iterator<Item = &AddNode<E>> + '_ {
        (0..self.patterns.len()).map(move |id| self.pattern(id))
    }

    /// The AddNodes of the largest order.
    pub fn leaves(&self) -> impl Iterator<Item = &AddNode<E>> + '_ {
        self.patterns().filter(move |node| node.order == self.order)
    }

    pub fn find(&self, canonical: &str) -> Option<&AddNode<E>> {
        self.patterns().find(|node| node.canonical == canonical)
    }

    /// The nodes from the root down to `node`, both included.
    pub fn path_to(&self, node: TreeRef) -> Vec<TreeRef> {
        let mut path = vec![node];
        while let Some(parent) = self.parents[*path.last().unwrap()] {
            path.push(parent);
        }
        path.reverse();
        path
    }
}

// private methods
impl<E: EdgeType> DecisionTree<E> {
    fn fmt_node(&self, f: &mut fmt::Formatter, node: TreeRef, depth: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = 2 * depth)?;
        match &self.nodes[node] {
            TreeNode::AddNode(add_node) => {
                writeln!(
                    f,
                    "node [{}] /{}",
                    add_node.canonical, add_node.symmetry_factor
                )?;
                for (&(from, edge), &child) in &add_node.children {
                    write!(f, "{:width$}", "", width = 2 * depth + 2)?;
                    writeln!(f, "{} {}", from, edge)?;
                    self.fmt_node(f, child, depth + 2)?;
                }
            }
            TreeNode::AddEdge(add_edge) => {
                writeln!(f, "edge {} {}", add_edge.node, add_edge.edge)?;
                for (label, child) in [("yes", add_edge.present), ("no", add_edge.absent)] {
                    if let Some(child) = child {
                        write!(f, "{:width$}", "", width = 2 * depth + 2)?;
                        writeln!(f, "{}", label)?;
                        self.fmt_node(f, child, depth + 2)?;
                    }
                }
            }
            TreeNode::Condition(condition) => {
                writeln!(f, "if {} < {}", condition.first, condition.second)?;
                self.fmt_node(f, condition.child, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl<E: EdgeType> fmt::Display for DecisionTree<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}
