//! Brute-force counting by induced subgraphs, shared by the integration
//! tests.

#![allow(dead_code)]

use graphlets::{
    data::{AdjacencyGraph, Graph},
    pattern::EdgeModel,
    task::{Counts, PatternCount},
};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Connected induced subgraphs of `order` nodes, per canonical string.
pub fn brute_force<M: EdgeModel>(graph: &AdjacencyGraph<M>, order: usize) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for nodes in (0..graph.order()).combinations(order) {
        let pattern = graph.induced_pattern(&nodes, false);
        if pattern.is_connected() {
            *counts.entry(pattern.canonical().to_owned()).or_insert(0) += 1;
        }
    }
    counts
}

/// Connected induced subgraphs of `order` nodes containing each node, per
/// canonical string of the subgraph rooted at that node.
pub fn brute_force_rooted<M: EdgeModel>(graph: &AdjacencyGraph<M>, order: usize) -> Vec<BTreeMap<String, u64>> {
    (0..graph.order())
        .map(|root| {
            let mut counts = BTreeMap::new();
            let others: Vec<usize> = (0..graph.order()).filter(|&node| node != root).collect();
            for rest in others.into_iter().combinations(order - 1) {
                let nodes: Vec<usize> = std::iter::once(root).chain(rest).collect();
                let pattern = graph.induced_pattern(&nodes, true);
                if pattern.is_connected() {
                    *counts.entry(pattern.canonical().to_owned()).or_insert(0) += 1;
                }
            }
            counts
        })
        .collect()
}

fn assert_row(row: &[PatternCount], expected: &dyn Fn(usize) -> BTreeMap<String, u64>, context: &str) {
    for (order, group) in &row.iter().group_by(|count| count.order) {
        let expected = expected(order);
        let found: BTreeMap<String, u64> = group
            .filter(|count| count.count > 0)
            .map(|count| (count.canonical.clone(), count.count))
            .collect();
        assert_eq!(found, expected, "{} order {}", context, order);
    }
}

/// Checks every order present in `counts` against brute force.
pub fn assert_brute_force<M: EdgeModel>(counts: &Counts, graph: &AdjacencyGraph<M>) {
    match counts {
        Counts::Total(row) => assert_row(row, &|order| brute_force(graph, order), "total"),
        Counts::PerNode { rows, .. } => {
            assert_eq!(rows.len(), graph.order());
            let by_order: Vec<Vec<BTreeMap<String, u64>>> = (0..=max_order(counts))
                .map(|order| {
                    if order == 0 {
                        vec![]
                    } else {
                        brute_force_rooted(graph, order)
                    }
                })
                .collect();
            for (node, row) in rows.iter().enumerate() {
                assert_row(row, &|order| by_order[order][node].clone(), &format!("node {}", node));
            }
        }
    }
}

fn max_order(counts: &Counts) -> usize {
    let rows: Vec<&Vec<PatternCount>> = match counts {
        Counts::Total(row) => vec![row],
        Counts::PerNode { rows, .. } => rows.iter().collect(),
    };
    rows.iter()
        .flat_map(|row| row.iter().map(|count| count.order))
        .max()
        .unwrap_or(0)
}

/// A deterministic host: `edges` attempts at random pairs, drawing one of
/// `edge_types` per attempt. Illegal draws are skipped.
pub fn host<M: EdgeModel>(model: M, order: usize, edges: usize, seed: u64) -> AdjacencyGraph<M> {
    let edge_types = model.edge_types();
    let mut graph = AdjacencyGraph::new(model, order);
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move |bound: usize| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % bound as u64) as usize
    };
    for _ in 0..edges {
        let (from, to) = (next(order), next(order));
        let edge = edge_types[next(edge_types.len())];
        let _ = graph.add_edge(from, to, edge);
    }
    graph
}

/// Two hosts side by side, the second one's nodes shifted.
pub fn disjoint_union<M: EdgeModel>(a: &AdjacencyGraph<M>, b: &AdjacencyGraph<M>) -> AdjacencyGraph<M> {
    let mut graph = AdjacencyGraph::new(a.model().clone(), a.order() + b.order());
    for (offset, part) in [(0, a), (a.order(), b)] {
        for from in 0..part.order() {
            for &edge in part.edge_types() {
                for &to in part.neighbors(from, edge) {
                    let _ = graph.add_edge(from + offset, to + offset, edge);
                }
            }
        }
    }
    graph
}
