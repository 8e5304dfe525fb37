use super::{AddEdge, AddNode, Condition, DecisionTree, TreeNode, TreeRef};
use crate::pattern::{EdgeModel, Pattern, PatternFactory};
use log::{debug, info};
use std::collections::{BTreeMap, HashSet};

/// One-shot builder of a [`DecisionTree`].
///
/// A new node `k` is attached through its lowest present connection slot,
/// slots being ordered by (earlier node, edge type index); only the lowest
/// node of every orbit is tried as attachment point. Earlier slots are
/// checked absent, later slots branch. The first build sequence that reaches
/// a canonical pattern keeps it; later ones are pruned.
pub struct TreeGenerator<'a, M: EdgeModel> {
    factory: &'a PatternFactory<M>,
    order: usize,
    edge_types: Vec<M::Edge>,
    seen: HashSet<String>,
    nodes: Vec<TreeNode<M::Edge>>,
    parents: Vec<Option<TreeRef>>,
    patterns: Vec<TreeRef>,
    pruned: usize,
}

impl<'a, M: EdgeModel> TreeGenerator<'a, M> {
    pub fn new(factory: &'a PatternFactory<M>, order: usize) -> Self {
        assert!(order >= 1, "patterns have at least one node");
        Self {
            factory,
            order,
            edge_types: factory.edge_types(),
            seen: HashSet::new(),
            nodes: vec![],
            parents: vec![],
            patterns: vec![],
            pruned: 0,
        }
    }

    pub fn generate(mut self) -> DecisionTree<M::Edge> {
        info!(
            "generating the {} tree of order {}{}",
            self.factory.model().name(),
            self.order,
            if self.factory.is_orbit_rep() { " (orbits)" } else { "" }
        );
        let root = self
            .expand_pattern(self.factory.one_node_pattern())
            .expect("the one-node pattern is never pruned");
        debug!("pruned {} duplicate build sequences", self.pruned);
        let tree = DecisionTree {
            nodes: self.nodes,
            parents: self.parents,
            patterns: self.patterns,
            root,
            order: self.order,
            orbit_rep: self.factory.is_orbit_rep(),
            edge_types: self.edge_types,
        };
        info!(
            "tree has {} nodes, {} patterns, {} of order {}",
            tree.len(),
            tree.num_patterns(),
            tree.leaves().count(),
            tree.order()
        );
        tree
    }
}

// private methods
impl<'a, M: EdgeModel> TreeGenerator<'a, M> {
    fn alloc(&mut self, node: TreeNode<M::Edge>) -> TreeRef {
        let id = self.nodes.len();
        for child in node.children() {
            self.parents[child] = Some(id);
        }
        self.nodes.push(node);
        self.parents.push(None);
        id
    }

    fn alloc_add_node(
        &mut self,
        pattern: &Pattern<M>,
        symmetry_factor: u64,
        children: BTreeMap<(usize, M::Edge), TreeRef>,
    ) -> TreeRef {
        let id = self.alloc(TreeNode::AddNode(AddNode {
            pattern: self.patterns.len(),
            canonical: pattern.canonical().to_owned(),
            order: pattern.order(),
            symmetry_factor,
            canonical_labeling: pattern.canonical_labeling().to_vec(),
            children,
        }));
        self.patterns.push(id);
        id
    }

    /// The subtree below a completed pattern, or `None` if an earlier build
    /// sequence already produced it.
    fn expand_pattern(&mut self, pattern: Pattern<M>) -> Option<TreeRef> {
        if !self.seen.insert(pattern.canonical().to_owned()) {
            self.pruned += 1;
            return None;
        }
        if pattern.order() == self.order {
            return Some(self.leaf(&pattern));
        }
        let mut extended = pattern.clone();
        let new = extended.add_node();
        let mut children = BTreeMap::new();
        for node in pattern.orbit_representatives() {
            for index in 0..self.edge_types.len() {
                let edge = self.edge_types[index];
                let mut attached = extended.clone();
                if attached.add_edge(node, new, edge).is_err() {
                    continue;
                }
                let attach = node * self.edge_types.len() + index;
                if let Some(child) = self.expand_slots(attached, 0, attach) {
                    children.insert((node, edge), child);
                }
            }
        }
        Some(self.alloc_add_node(&pattern, pattern.symmetry_factor(), children))
    }

    /// Decides the connection slots from `slot` on between the newest node
    /// and the earlier ones. `attach` is the slot the newest node was
    /// attached through.
    fn expand_slots(&mut self, pattern: Pattern<M>, slot: usize, attach: usize) -> Option<TreeRef> {
        let new = pattern.order() - 1;
        let types = self.edge_types.len();
        for slot in slot..new * types {
            let (node, edge) = (slot / types, self.edge_types[slot % types]);
            if slot == attach || !pattern.can_add_edge(node, new, edge) {
                continue;
            }
            let present = if slot > attach {
                let mut connected = pattern.clone();
                match connected.add_edge(node, new, edge) {
                    Ok(()) => self.expand_slots(connected, slot + 1, attach),
                    Err(_) => None,
                }
            } else {
                None
            };
            let absent = self.expand_slots(pattern, slot + 1, attach);
            if present.is_none() && absent.is_none() {
                return None;
            }
            return Some(self.alloc(TreeNode::AddEdge(AddEdge {
                node,
                edge,
                present,
                absent,
            })));
        }
        self.expand_pattern(pattern)
    }

    /// A pattern of the target order behind one condition per non-trivial
    /// coset representative, so each instance passes exactly once.
    fn leaf(&mut self, pattern: &Pattern<M>) -> TreeRef {
        let conditions: Vec<(usize, usize)> = pattern
            .coset_representatives()
            .iter()
            .enumerate()
            .flat_map(|(first, reps)| {
                reps.iter()
                    .filter(move |&&second| second != first)
                    .map(move |&second| (first, second))
            })
            .collect();
        let mut top = self.alloc_add_node(pattern, 1, BTreeMap::new());
        for &(first, second) in conditions.iter().rev() {
            top = self.alloc(TreeNode::Condition(Condition {
                first,
                second,
                child: top,
            }));
        }
        top
    }
}
