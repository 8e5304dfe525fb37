use super::Term;
use crate::{
    data::Graph,
    pattern::{EdgeMask, EdgeType},
};
use log::info;
use std::{collections::HashMap, marker::PhantomData, time::Instant};

/// The number of host nodes joined to every node of a term under every edge
/// type the term names for it.
pub trait CommonNeighbors {
    fn common_neighbors(&self, term: &[(usize, EdgeMask)]) -> u64;
}

/// The nodes in `previous` (or all of them when `None`) that are
/// `mask`-neighbors of `node`.
fn intersect<E: EdgeType, G: Graph<E>>(graph: &G, node: usize, mask: EdgeMask, previous: Option<&[usize]>) -> Vec<usize> {
    let mut edges = mask.edges::<E>();
    let mut common = match (edges.next(), previous) {
        (None, _) => return previous.map_or_else(Vec::new, <[usize]>::to_vec),
        (Some(edge), None) => graph.neighbors(node, edge).to_vec(),
        (Some(edge), Some(previous)) => {
            let neighbors = graph.neighbors(node, edge);
            previous
                .iter()
                .copied()
                .filter(|other| neighbors.binary_search(other).is_ok())
                .collect()
        }
    };
    for edge in edges {
        let neighbors = graph.neighbors(node, edge);
        common.retain(|other| neighbors.binary_search(other).is_ok());
    }
    common
}

/// Every non-zero common-neighbor count of terms with up to `max_nodes`
/// nodes, computed once per host graph.
#[derive(Clone, Debug, Default)]
pub struct CommonsCounter {
    counts: HashMap<Term, u64>,
}

impl CommonsCounter {
    pub fn new<E: EdgeType, G: Graph<E>>(graph: &G, max_nodes: usize) -> Self {
        let start_time = Instant::now();
        let combinations = graph.valid_combinations().to_vec();
        let mut counts = HashMap::new();
        let mut term: Term = vec![];
        let mut intersections: Vec<Vec<usize>> = vec![];
        let mut candidates: Vec<Vec<usize>> = vec![(0..graph.order()).collect()];
        let mut counters: Vec<usize> = vec![0];
        while let Some(counter) = counters.last_mut() {
            let level = candidates.len() - 1;
            let position = *counter;
            *counter += 1;
            if position >= candidates[level].len() * combinations.len() {
                counters.pop();
                candidates.pop();
                if term.pop().is_some() {
                    intersections.pop();
                }
                continue;
            }
            let node = candidates[level][position / combinations.len()];
            let mask = combinations[position % combinations.len()];
            let common = intersect::<E, G>(graph, node, mask, intersections.last().map(Vec::as_slice));
            if common.is_empty() {
                continue;
            }
            term.push((node, mask));
            counts.insert(term.clone(), common.len() as u64);
            if term.len() < max_nodes {
                candidates.push(next_candidates::<E, G>(graph, node, &common));
                intersections.push(common);
                counters.push(0);
            } else {
                term.pop();
            }
        }
        info!(
            "counted common neighbors of {} terms in {} ms",
            counts.len(),
            start_time.elapsed().as_millis()
        );
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Nodes above `node` that share a neighbor in `common`.
fn next_candidates<E: EdgeType, G: Graph<E>>(graph: &G, node: usize, common: &[usize]) -> Vec<usize> {
    let mut candidates: Vec<usize> = common
        .iter()
        .flat_map(|&other| {
            graph
                .edge_types()
                .iter()
                .flat_map(move |&edge| graph.neighbors(other, edge).iter().copied())
        })
        .filter(|&candidate| candidate > node)
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

impl CommonNeighbors for CommonsCounter {
    fn common_neighbors(&self, term: &[(usize, EdgeMask)]) -> u64 {
        self.counts.get(term).copied().unwrap_or(0)
    }
}

/// Intersects neighbor lists on every call; for small hosts.
pub struct DirectCommons<'a, E, G> {
    graph: &'a G,
    _edge: PhantomData<E>,
}

impl<'a, E: EdgeType, G: Graph<E>> DirectCommons<'a, E, G> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            _edge: PhantomData,
        }
    }
}

impl<'a, E: EdgeType, G: Graph<E>> CommonNeighbors for DirectCommons<'a, E, G> {
    fn common_neighbors(&self, term: &[(usize, EdgeMask)]) -> u64 {
        let mut common: Option<Vec<usize>> = None;
        for &(node, mask) in term {
            let next = intersect::<E, G>(self.graph, node, mask, common.as_deref());
            if next.is_empty() {
                return 0;
            }
            common = Some(next);
        }
        common.map_or(0, |common| common.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::AdjacencyGraph,
        pattern::{Arc, Directed, Link, PatternFactory, Simple},
    };

    fn link(node: usize) -> (usize, EdgeMask) {
        (node, EdgeMask::of(Link))
    }

    #[test]
    fn test_simple() {
        let factory = PatternFactory::new(Simple, false);
        // a triangle 0-1-2 with a pendant 3 on node 2
        let graph = AdjacencyGraph::from_pattern(&factory.from_string("111001").unwrap());
        let counter = CommonsCounter::new(&graph, 3);
        let direct = DirectCommons::<Link, _>::new(&graph);
        let cases: Vec<(Term, u64)> = vec![
            (vec![link(2)], 3),
            (vec![link(0), link(1)], 1),
            (vec![link(0), link(3)], 1),
            (vec![link(0), link(1), link(3)], 1),
            (vec![link(0), link(2)], 1),
            (vec![link(2), link(3)], 0),
            (vec![link(0), link(1), link(2)], 0),
        ];
        for (term, expected) in cases {
            assert_eq!(counter.common_neighbors(&term), expected, "{:?}", term);
            assert_eq!(direct.common_neighbors(&term), expected, "{:?}", term);
        }
        // four single nodes, five pairs and one triple
        assert_eq!(counter.len(), 4 + 5 + 1);
    }

    #[test]
    fn test_directed_combinations() {
        let factory = PatternFactory::new(Directed, false);
        // 0 -> 1, 1 -> 0, 2 -> 1
        let graph = AdjacencyGraph::from_pattern(&factory.from_string("101001").unwrap());
        let counter = CommonsCounter::new(&graph, 2);
        let out = EdgeMask::of(Arc::Out);
        let mutual = out.with(Arc::In);
        assert_eq!(counter.common_neighbors(&[(0, mutual)]), 1);
        assert_eq!(counter.common_neighbors(&[(0, out)]), 1);
        assert_eq!(counter.common_neighbors(&[(1, EdgeMask::of(Arc::In))]), 2);
        assert_eq!(counter.common_neighbors(&[(2, EdgeMask::of(Arc::In))]), 0);
        assert_eq!(counter.common_neighbors(&[(0, out), (2, out)]), 1);
        assert_eq!(counter.common_neighbors(&[(0, mutual), (2, out)]), 1);
        assert_eq!(counter.common_neighbors(&[(0, mutual), (1, out)]), 0);
    }
}
