use super::Graph;
use crate::pattern::{EdgeMask, EdgeModel, EdgeType, IllegalAction, Pattern};

/// Sorted neighbor lists per node and edge type.
#[derive(Clone, Debug)]
pub struct AdjacencyGraph<M: EdgeModel> {
    model: M,
    edge_types: Vec<M::Edge>,
    valid_combinations: Vec<EdgeMask>,
    neighbors: Vec<Vec<Vec<usize>>>,
    size: usize,
}

impl<M: EdgeModel> AdjacencyGraph<M> {
    pub fn new(model: M, order: usize) -> Self {
        let edge_types = model.edge_types();
        let valid_combinations = model.valid_combinations();
        let neighbors = vec![vec![vec![]; edge_types.len()]; order];
        Self {
            model,
            edge_types,
            valid_combinations,
            neighbors,
            size: 0,
        }
    }

    /// A host graph with the nodes and edges of `pattern`.
    pub fn from_pattern(pattern: &Pattern<M>) -> Self {
        let mut graph = Self::new(pattern.model().clone(), pattern.order());
        for node in 0..pattern.order() {
            for edge in graph.edge_types.clone() {
                graph.neighbors[node][edge.index()] = pattern.neighbors(node, edge).collect();
            }
        }
        graph.size = pattern.size();
        graph
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The mask of types `t` such that `to` is a `t`-neighbor of `from`.
    pub fn edges(&self, from: usize, to: usize) -> EdgeMask {
        EdgeMask::from_edges(
            self.edge_types
                .iter()
                .copied()
                .filter(|&edge| self.has_edge(from, to, edge)),
        )
    }

    pub fn add_edge(&mut self, from: usize, to: usize, edge: M::Edge) -> Result<(), IllegalAction> {
        for node in [from, to] {
            if node >= self.order() {
                return Err(IllegalAction::NodeOutOfRange(node));
            }
        }
        if from == to {
            return Err(IllegalAction::SelfLoop(from));
        }
        let mask = self.edges(from, to);
        if mask.contains(edge) || !self.model.is_legal(mask.with(edge)) {
            return Err(IllegalAction::IllegalEdge(from, to));
        }
        insert_sorted(&mut self.neighbors[from][edge.index()], to);
        insert_sorted(&mut self.neighbors[to][edge.inverse().index()], from);
        self.size += 1;
        Ok(())
    }

    /// The pattern induced by `nodes`; `nodes[p]` becomes pattern node `p`.
    pub fn induced_pattern(&self, nodes: &[usize], orbit_rep: bool) -> Pattern<M> {
        let mut pattern = Pattern::new(self.model.clone(), nodes.len(), orbit_rep);
        for (p, &from) in nodes.iter().enumerate() {
            for (q, &to) in nodes.iter().enumerate().skip(p + 1) {
                for edge in self.edges(from, to).edges::<M::Edge>() {
                    pattern
                        .add_edge(p, q, edge)
                        .expect("host edges form legal combinations");
                }
            }
        }
        pattern
    }
}

fn insert_sorted(list: &mut Vec<usize>, node: usize) {
    if let Err(pos) = list.binary_search(&node) {
        list.insert(pos, node);
    }
}

impl<M: EdgeModel> Graph<M::Edge> for AdjacencyGraph<M> {
    fn order(&self) -> usize {
        self.neighbors.len()
    }

    fn neighbors(&self, node: usize, edge: M::Edge) -> &[usize] {
        &self.neighbors[node][edge.index()]
    }

    fn edge_types(&self) -> &[M::Edge] {
        &self.edge_types
    }

    fn valid_combinations(&self) -> &[EdgeMask] {
        &self.valid_combinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Arc, PatternFactory, Signed, SignedArc};

    #[test]
    fn test_add_edge() {
        let mut graph = AdjacencyGraph::new(Signed, 4);
        graph.add_edge(0, 1, SignedArc::PositiveOut).unwrap();
        graph.add_edge(1, 0, SignedArc::NegativeOut).unwrap();
        graph.add_edge(3, 1, SignedArc::PositiveOut).unwrap();
        assert_eq!(graph.neighbors(1, SignedArc::PositiveIn), &[0, 3]);
        assert_eq!(graph.neighbors(1, SignedArc::NegativeOut), &[0]);
        assert_eq!(graph.neighbors(0, SignedArc::NegativeIn), &[1]);
        assert_eq!(
            graph.add_edge(0, 1, SignedArc::NegativeOut),
            Err(IllegalAction::IllegalEdge(0, 1))
        );
        assert_eq!(
            graph.add_edge(2, 2, SignedArc::NegativeOut),
            Err(IllegalAction::SelfLoop(2))
        );
        assert_eq!(
            graph.add_edge(2, 4, SignedArc::NegativeOut),
            Err(IllegalAction::NodeOutOfRange(4))
        );
        assert_eq!(graph.size(), 3);
    }

    #[test]
    fn test_pattern_round_trip() {
        let factory = PatternFactory::new(crate::pattern::Directed, false);
        let pattern = factory.from_string("110001000110").unwrap();
        let graph = AdjacencyGraph::from_pattern(&pattern);
        assert_eq!(graph.size(), pattern.size());
        assert_eq!(graph.neighbors(0, Arc::Out), &[1, 2]);
        let induced = graph.induced_pattern(&[0, 1, 2, 3], false);
        assert_eq!(induced.representation(), pattern.representation());
        assert_eq!(induced.size(), pattern.size());
        let sub = graph.induced_pattern(&[2, 0], false);
        assert_eq!(sub.representation(), "01");
    }
}
