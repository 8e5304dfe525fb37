use super::{symmetry::Symmetry, EdgeMask, EdgeModel, EdgeType, IllegalAction};
use std::{cell::OnceCell, collections::BTreeSet, fmt};

/// A small graph over nodes `0..order` of one edge model.
///
/// The symmetry record (canonical string, automorphisms, orbits) is computed
/// on first use and dropped by every mutation.
#[derive(Clone, Debug)]
pub struct Pattern<M: EdgeModel> {
    model: M,
    adjacency: Vec<Vec<EdgeMask>>,
    size: usize,
    orbit_rep: bool,
    symmetry: OnceCell<Symmetry>,
}

impl<M: EdgeModel> Pattern<M> {
    /// A pattern with `order` nodes and no edges.
    pub fn new(model: M, order: usize, orbit_rep: bool) -> Self {
        Self {
            model,
            adjacency: vec![vec![EdgeMask::EMPTY; order]; order],
            size: 0,
            orbit_rep,
            symmetry: OnceCell::new(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn order(&self) -> usize {
        self.adjacency.len()
    }

    /// The number of edges; an edge and its inverse count once.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_orbit_rep(&self) -> bool {
        self.orbit_rep
    }

    /// The types `t` such that `to` is a `t`-neighbor of `from`.
    pub fn edges(&self, from: usize, to: usize) -> EdgeMask {
        self.adjacency[from][to]
    }

    pub fn has_edge(&self, from: usize, to: usize, edge: M::Edge) -> bool {
        self.adjacency[from][to].contains(edge)
    }

    pub fn neighbors(&self, node: usize, edge: M::Edge) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[node]
            .iter()
            .enumerate()
            .filter(move |(_, mask)| mask.contains(edge))
            .map(|(other, _)| other)
    }

    pub fn can_add_edge(&self, from: usize, to: usize, edge: M::Edge) -> bool {
        self.check_edge(from, to, edge).is_ok()
    }

    pub fn is_connected(&self) -> bool {
        let order = self.order();
        if order <= 1 {
            return true;
        }
        let mut seen = vec![false; order];
        let mut stack = vec![0];
        seen[0] = true;
        while let Some(node) = stack.pop() {
            for (other, mask) in self.adjacency[node].iter().enumerate() {
                if !mask.is_empty() && !seen[other] {
                    seen[other] = true;
                    stack.push(other);
                }
            }
        }
        seen.into_iter().all(|x| x)
    }

    /// No edge of any type can be added anywhere.
    pub fn is_complete(&self) -> bool {
        let edge_types = self.model.edge_types();
        (0..self.order()).all(|from| {
            (0..self.order()).all(|to| {
                from == to || edge_types.iter().all(|&e| !self.can_add_edge(from, to, e))
            })
        })
    }

    /// Appends an isolated node and returns its index.
    pub fn add_node(&mut self) -> usize {
        self.invalidate();
        for row in self.adjacency.iter_mut() {
            row.push(EdgeMask::EMPTY);
        }
        self.adjacency.push(vec![EdgeMask::EMPTY; self.adjacency.len() + 1]);
        self.adjacency.len() - 1
    }

    /// Removes `node` with its edges. Nodes above it move down by one; the
    /// returned table maps every old index to its new one.
    pub fn remove_node(&mut self, node: usize) -> Result<Vec<Option<usize>>, IllegalAction> {
        let order = self.order();
        if node >= order {
            return Err(IllegalAction::NodeOutOfRange(node));
        }
        self.invalidate();
        self.size -= self.adjacency[node].iter().map(|mask| mask.len()).sum::<usize>();
        self.adjacency.remove(node);
        for row in self.adjacency.iter_mut() {
            row.remove(node);
        }
        Ok((0..order)
            .map(|old| match old.cmp(&node) {
                std::cmp::Ordering::Less => Some(old),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(old - 1),
            })
            .collect())
    }

    /// Makes `to` an `edge`-neighbor of `from` (and `from` an
    /// `edge.inverse()`-neighbor of `to`).
    pub fn add_edge(&mut self, from: usize, to: usize, edge: M::Edge) -> Result<(), IllegalAction> {
        self.check_edge(from, to, edge)?;
        self.invalidate();
        self.adjacency[from][to] = self.adjacency[from][to].with(edge);
        self.adjacency[to][from] = self.adjacency[to][from].with(edge.inverse());
        self.size += 1;
        Ok(())
    }

    pub fn remove_edge(&mut self, from: usize, to: usize, edge: M::Edge) -> Result<(), IllegalAction> {
        self.check_node(from)?;
        self.check_node(to)?;
        if !self.adjacency[from][to].contains(edge) {
            return Err(IllegalAction::MissingEdge(from, to));
        }
        self.invalidate();
        self.adjacency[from][to] = self.adjacency[from][to].without(edge);
        self.adjacency[to][from] = self.adjacency[to][from].without(edge.inverse());
        self.size -= 1;
        Ok(())
    }

    /// Exchanges the labels of two nodes.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.invalidate();
        self.adjacency.swap(a, b);
        for row in self.adjacency.iter_mut() {
            row.swap(a, b);
        }
    }

    /// A copy where node `p` is node `labels[p]` of `self`.
    pub fn relabeled(&self, labels: &[usize]) -> Self {
        let adjacency: Vec<Vec<EdgeMask>> = labels
            .iter()
            .map(|&from| labels.iter().map(|&to| self.adjacency[from][to]).collect())
            .collect();
        Self {
            model: self.model.clone(),
            adjacency,
            size: self.size,
            orbit_rep: self.orbit_rep,
            symmetry: OnceCell::new(),
        }
    }

    pub fn representation(&self) -> String {
        self.model.encode(&self.adjacency)
    }

    pub fn canonical(&self) -> &str {
        &self.symmetry().canonical
    }

    pub fn is_canonical(&self) -> bool {
        self.symmetry().is_canonical
    }

    /// Every automorphism as a position table, the identity first.
    pub fn automorphisms(&self) -> &[Vec<usize>] {
        &self.symmetry().automorphisms
    }

    pub fn symmetry_factor(&self) -> u64 {
        self.automorphisms().len() as u64
    }

    /// Canonical position `p` holds node `canonical_labeling()[p]`.
    pub fn canonical_labeling(&self) -> &[usize] {
        &self.symmetry().labeling
    }

    pub fn orbit_of(&self, node: usize) -> &BTreeSet<usize> {
        &self.symmetry().orbits[node]
    }

    /// The orbit partition, ordered by lowest member.
    pub fn orbits(&self) -> Vec<&BTreeSet<usize>> {
        self.symmetry()
            .orbits
            .iter()
            .enumerate()
            .filter(|(node, orbit)| orbit.iter().next() == Some(node))
            .map(|(_, orbit)| orbit)
            .collect()
    }

    /// The lowest node of every orbit, ascending.
    pub fn orbit_representatives(&self) -> Vec<usize> {
        self.orbits()
            .into_iter()
            .filter_map(|orbit| orbit.iter().next().copied())
            .collect()
    }

    /// For every node `i`, the nodes `j` such that requiring
    /// `instance[i] < instance[j]` for `j != i` keeps one instance per
    /// automorphism class.
    pub fn coset_representatives(&self) -> &[BTreeSet<usize>] {
        &self.symmetry().cosets
    }

    pub(crate) fn adjacency(&self) -> &[Vec<EdgeMask>] {
        &self.adjacency
    }
}

// private methods
impl<M: EdgeModel> Pattern<M> {
    fn symmetry(&self) -> &Symmetry {
        self.symmetry
            .get_or_init(|| Symmetry::search(&self.model, &self.adjacency, self.orbit_rep))
    }

    fn invalidate(&mut self) {
        self.symmetry = OnceCell::new();
    }

    fn check_node(&self, node: usize) -> Result<(), IllegalAction> {
        if node < self.order() {
            Ok(())
        } else {
            Err(IllegalAction::NodeOutOfRange(node))
        }
    }

    fn check_edge(&self, from: usize, to: usize, edge: M::Edge) -> Result<(), IllegalAction> {
        self.check_node(from)?;
        self.check_node(to)?;
        if from == to {
            return Err(IllegalAction::SelfLoop(from));
        }
        let mask = self.adjacency[from][to];
        if mask.contains(edge) || !self.model.is_legal(mask.with(edge)) {
            return Err(IllegalAction::IllegalEdge(from, to));
        }
        Ok(())
    }
}

impl<M: EdgeModel> fmt::Display for Pattern<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.representation())
    }
}
