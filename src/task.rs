use crate::{
    data::Graph,
    equation::{select_equations, CommonsCounter, EquationGenerator, EquationSet},
    executor::{EquationTally, Merge, Tally, TreeWalker, Visitor},
    pattern::{compare_representations, EdgeModel, EdgeType, PatternFactory},
    tools::GroupBy,
    tree::{DecisionTree, TreeGenerator},
};
use log::info;
use rayon::prelude::*;
use std::{fmt, time::Instant};

pub fn build_tree<M: EdgeModel>(factory: &PatternFactory<M>, order: usize) -> DecisionTree<M::Edge> {
    let start_time = Instant::now();
    let tree = TreeGenerator::new(factory, order).generate();
    info!("tree_time: {}", start_time.elapsed().as_millis());
    tree
}

/// Equations deriving the patterns of `order` from a tree one order smaller.
pub fn build_equations<M: EdgeModel>(
    factory: &PatternFactory<M>,
    order: usize,
    tree: &DecisionTree<M::Edge>,
) -> EquationSet<M::Edge> {
    assert_eq!(order, tree.order() + 1, "equations extend the tree by one node");
    let start_time = Instant::now();
    let candidates = EquationGenerator::new(factory, tree).generate();
    let equations = select_equations(order, factory.is_orbit_rep(), candidates);
    info!("equation_time: {}", start_time.elapsed().as_millis());
    equations
}

/// Counts every pattern of the tree in `graph`, and with `equations` every
/// pattern one order larger too.
pub fn count_all_patterns<E, G>(tree: &DecisionTree<E>, equations: Option<&EquationSet<E>>, graph: &G) -> Counts
where
    E: EdgeType,
    G: Graph<E> + Sync,
{
    let start_time = Instant::now();
    let counts = match equations {
        None => {
            let tallies = walk(tree, graph, Tally::new(tree));
            let rows = tallies.iter().map(|tally| pattern_counts(tree, tally, None, &[]));
            Counts::new(tree, None, rows.collect())
        }
        Some(equations) => {
            let commons = CommonsCounter::new::<E, G>(graph, tree.order());
            let tallies = walk(tree, graph, EquationTally::new(tree, equations, &commons));
            let rows = tallies
                .iter()
                .map(|tally| pattern_counts(tree, tally.tally(), Some(equations), &tally.solve()));
            Counts::new(tree, Some(equations), rows.collect())
        }
    };
    info!("count_time: {}", start_time.elapsed().as_millis());
    counts
}

/// One tally for the whole graph, or one per node for orbit trees.
fn walk<E, G, V>(tree: &DecisionTree<E>, graph: &G, visitor: V) -> Vec<V>
where
    E: EdgeType,
    G: Graph<E> + Sync,
    V: Visitor<E> + Merge + Clone + Send + Sync,
{
    if tree.is_orbit_rep() {
        (0..graph.order())
            .into_par_iter()
            .map(|start| {
                let mut walker = TreeWalker::new(tree, graph, visitor.clone());
                walker.run(start);
                walker.into_visitor()
            })
            .collect()
    } else {
        let total = (0..graph.order())
            .into_par_iter()
            .fold(
                || TreeWalker::new(tree, graph, visitor.clone()),
                |mut walker, start| {
                    walker.run(start);
                    walker
                },
            )
            .map(TreeWalker::into_visitor)
            .reduce(|| visitor.clone(), Merge::merge);
        vec![total]
    }
}

fn pattern_counts<E: EdgeType>(
    tree: &DecisionTree<E>,
    tally: &Tally,
    equations: Option<&EquationSet<E>>,
    solved: &[u64],
) -> Vec<PatternCount> {
    let mut counts: Vec<PatternCount> = tree
        .patterns()
        .zip(tally.counts(tree))
        .map(|(pattern, count)| PatternCount {
            canonical: pattern.canonical().to_owned(),
            order: pattern.order(),
            count,
        })
        .collect();
    if let Some(equations) = equations {
        counts.extend(
            equations
                .equations()
                .iter()
                .zip(solved)
                .map(|(equation, &count)| PatternCount {
                    canonical: equation.solves().to_owned(),
                    order: equations.order(),
                    count,
                }),
        );
    }
    counts.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| compare_representations(&a.canonical, &b.canonical))
    });
    counts
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternCount {
    pub canonical: String,
    pub order: usize,
    pub count: u64,
}

/// Pattern counts sorted by order, then representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Counts {
    Total(Vec<PatternCount>),
    /// Indexed by host node; the patterns are rooted at that node.
    PerNode {
        patterns: Vec<String>,
        rows: Vec<Vec<PatternCount>>,
    },
}

impl Counts {
    fn new<E: EdgeType>(
        tree: &DecisionTree<E>,
        equations: Option<&EquationSet<E>>,
        mut rows: Vec<Vec<PatternCount>>,
    ) -> Self {
        if tree.is_orbit_rep() {
            let solved = vec![0; equations.map_or(0, EquationSet::len)];
            let patterns = pattern_counts(tree, &Tally::new(tree), equations, &solved)
                .into_iter()
                .map(|count| count.canonical)
                .collect();
            Counts::PerNode { patterns, rows }
        } else {
            Counts::Total(rows.pop().unwrap_or_default())
        }
    }

    /// The count of one pattern over the whole graph. Rooted counts are summed
    /// over all nodes.
    pub fn total(&self, canonical: &str) -> Option<u64> {
        match self {
            Counts::Total(counts) => find(counts, canonical),
            Counts::PerNode { patterns, rows } => {
                if !patterns.iter().any(|pattern| pattern == canonical) {
                    return None;
                }
                Some(rows.iter().filter_map(|counts| find(counts, canonical)).sum())
            }
        }
    }

    /// The count of one rooted pattern at `node`.
    pub fn at(&self, node: usize, canonical: &str) -> Option<u64> {
        match self {
            Counts::Total(_) => None,
            Counts::PerNode { rows, .. } => rows.get(node).and_then(|counts| find(counts, canonical)),
        }
    }

    /// The patterns counted, in output order.
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Counts::Total(counts) => counts.iter().map(|count| count.canonical.as_str()).collect(),
            Counts::PerNode { patterns, .. } => patterns.iter().map(String::as_str).collect(),
        }
    }
}

fn find(counts: &[PatternCount], canonical: &str) -> Option<u64> {
    counts
        .iter()
        .find(|count| count.canonical == canonical)
        .map(|count| count.count)
}

fn fmt_counts(f: &mut fmt::Formatter, counts: &[PatternCount], indent: usize) -> fmt::Result {
    for (order, group) in GroupBy::new(counts, |count| count.order) {
        writeln!(f, "{:indent$}order {}:", "", order, indent = indent)?;
        for count in group {
            writeln!(
                f,
                "{:indent$}[{}]: {}",
                "",
                count.canonical,
                count.count,
                indent = indent + 2
            )?;
        }
    }
    Ok(())
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Counts::Total(counts) => fmt_counts(f, counts, 0),
            Counts::PerNode { rows, .. } => {
                for (node, counts) in rows.iter().enumerate() {
                    writeln!(f, "node {}:", node)?;
                    fmt_counts(f, counts, 2)?;
                }
                Ok(())
            }
        }
    }
}

/// A counting job: which patterns, prepared once and reused across hosts.
pub struct Task<'a, M: EdgeModel> {
    factory: &'a PatternFactory<M>,
    order: usize,
    equations: bool,
}

impl<'a, M: EdgeModel> Task<'a, M> {
    pub fn new(factory: &'a PatternFactory<M>, order: usize) -> Self {
        Self {
            factory,
            order,
            equations: false,
        }
    }

    /// Counts the largest order through equations on a smaller tree.
    pub fn equations(mut self, equations: bool) -> Self {
        self.equations = equations;
        self
    }

    pub fn prepare(self) -> Prepared<M::Edge> {
        if self.equations && self.order > 1 {
            let tree = build_tree(self.factory, self.order - 1);
            let equations = build_equations(self.factory, self.order, &tree);
            Prepared {
                tree,
                equations: Some(equations),
            }
        } else {
            Prepared {
                tree: build_tree(self.factory, self.order),
                equations: None,
            }
        }
    }
}

pub struct Prepared<E> {
    tree: DecisionTree<E>,
    equations: Option<EquationSet<E>>,
}

impl<E: EdgeType> Prepared<E> {
    pub fn tree(&self) -> &DecisionTree<E> {
        &self.tree
    }

    pub fn equations(&self) -> Option<&EquationSet<E>> {
        self.equations.as_ref()
    }

    pub fn count<G: Graph<E> + Sync>(&self, graph: &G) -> Counts {
        count_all_patterns(&self.tree, self.equations.as_ref(), graph)
    }
}
