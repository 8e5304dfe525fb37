//! Linear relations between pattern counts of consecutive orders.
//!
//! An equation of target order `k + 1` states, for one pattern `G` of order
//! `k` and one orbit of terms over `G`,
//!
//! ```text
//! Σ m(H)·count(H) = Σ over instances of G Σ over terms T (commons(T) − minus)
//! ```
//!
//! where `commons(T)` counts the host nodes joined to every node of `T` under
//! its edge types. Counting the order `k` tree with these right-hand sides
//! recovers every order `k + 1` count by back-substitution.

pub use commons::{CommonNeighbors, CommonsCounter, DirectCommons};
pub use generator::EquationGenerator;
pub use selecter::select_equations;

use crate::pattern::{compare_representations, EdgeMask, EdgeType};
use itertools::Itertools;
use std::{collections::HashMap, fmt, marker::PhantomData};

mod commons;
mod generator;
mod selecter;

/// Sorted `(node, edge types)` pairs: the nodes a further node must be joined
/// to, and under which types.
pub type Term = Vec<(usize, EdgeMask)>;

/// Maps a term over canonical positions onto the host nodes of one instance.
pub(crate) fn host_term(term: &[(usize, EdgeMask)], labeling: &[usize], instance: &[usize]) -> Term {
    let mut host: Term = term
        .iter()
        .map(|&(position, mask)| (instance[labeling[position]], mask))
        .collect();
    host.sort_unstable();
    host
}

/// `Σ (commons(T) − minus)` over `terms` for one instance.
pub(crate) fn contribution<C: CommonNeighbors>(
    terms: &[Term],
    minus: u64,
    labeling: &[usize],
    instance: &[usize],
    commons: &C,
) -> u64 {
    terms
        .iter()
        .map(|term| {
            let found = commons.common_neighbors(&host_term(term, labeling, instance));
            debug_assert!(found >= minus);
            found - minus
        })
        .sum()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equation<E> {
    lhs: Vec<(String, u64)>,
    rhs: String,
    terms: Vec<Term>,
    minus: u64,
    _edge: PhantomData<E>,
}

impl<E: EdgeType> Equation<E> {
    /// `lhs` is sorted by representation; its first pattern is the one solved.
    pub fn new(lhs: Vec<(String, u64)>, rhs: String, terms: Vec<Term>, minus: u64) -> Self {
        assert!(!lhs.is_empty() && !terms.is_empty());
        debug_assert!(lhs
            .windows(2)
            .all(|w| compare_representations(&w[0].0, &w[1].0).is_lt()));
        Self {
            lhs,
            rhs,
            terms,
            minus,
            _edge: PhantomData,
        }
    }

    pub fn lhs(&self) -> &[(String, u64)] {
        &self.lhs
    }

    /// The canonical string of the pattern this equation solves.
    pub fn solves(&self) -> &str {
        &self.lhs[0].0
    }

    pub fn rhs(&self) -> &str {
        &self.rhs
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn minus(&self) -> u64 {
        self.minus
    }

    /// The right-hand side contribution of one instance of the RHS pattern.
    pub fn evaluate<C: CommonNeighbors>(&self, labeling: &[usize], instance: &[usize], commons: &C) -> u64 {
        contribution(&self.terms, self.minus, labeling, instance, commons)
    }
}

impl<E: EdgeType> fmt::Display for Equation<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} = Σ[{}]",
            self.lhs
                .iter()
                .map(|(canonical, factor)| format!("{}·[{}]", factor, canonical))
                .join(" + "),
            self.rhs
        )?;
        for term in &self.terms {
            write!(
                f,
                " {{{}}}",
                term.iter()
                    .map(|(node, mask)| format!("{}:{}", node, mask.edges::<E>().join("")))
                    .join(",")
            )?;
        }
        if self.minus > 0 {
            write!(f, " − {}", self.minus)?;
        }
        Ok(())
    }
}

/// One equation per pattern of the target order, sorted by the pattern solved.
#[derive(Clone, Debug)]
pub struct EquationSet<E> {
    order: usize,
    orbit_rep: bool,
    equations: Vec<Equation<E>>,
    index: HashMap<String, usize>,
}

impl<E: EdgeType> EquationSet<E> {
    pub fn new(order: usize, orbit_rep: bool, mut equations: Vec<Equation<E>>) -> Self {
        equations.sort_by(|a, b| compare_representations(a.solves(), b.solves()));
        let index: HashMap<String, usize> = equations
            .iter()
            .enumerate()
            .map(|(i, equation)| (equation.solves().to_owned(), i))
            .collect();
        assert_eq!(index.len(), equations.len(), "one equation per pattern");
        for equation in &equations {
            for (canonical, _) in equation.lhs() {
                assert!(index.contains_key(canonical), "no equation solves {}", canonical);
            }
        }
        Self {
            order,
            orbit_rep,
            equations,
            index,
        }
    }

    /// The order of the patterns these equations solve.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn is_orbit_rep(&self) -> bool {
        self.orbit_rep
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    pub fn equations(&self) -> &[Equation<E>] {
        &self.equations
    }

    pub fn get(&self, canonical: &str) -> Option<&Equation<E>> {
        self.index.get(canonical).map(|&i| &self.equations[i])
    }

    /// Turns the summed right-hand sides, one per equation, into the count of
    /// each solved pattern.
    pub fn solve(&self, raw: &[u64]) -> Vec<u64> {
        assert_eq!(raw.len(), self.equations.len());
        let mut counts = vec![0; self.equations.len()];
        for (i, equation) in self.equations.iter().enumerate().rev() {
            let (_, factor) = equation.lhs[0];
            assert!(factor > 0, "zero multiplicity in {}", equation);
            let known: u64 = equation.lhs[1..]
                .iter()
                .map(|(canonical, m)| m * counts[self.index[canonical]])
                .sum();
            assert!(known <= raw[i], "inconsistent counts for {}", equation);
            let rest = raw[i] - known;
            debug_assert_eq!(rest % factor, 0, "{}", equation);
            counts[i] = rest / factor;
        }
        counts
    }
}

impl<E: EdgeType> fmt::Display for EquationSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for equation in &self.equations {
            writeln!(f, "{}", equation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Link;

    fn term(nodes: &[usize]) -> Term {
        nodes.iter().map(|&node| (node, EdgeMask::of(Link))).collect()
    }

    fn set() -> EquationSet<Link> {
        // on an edge: 2·paths + 6·triangles = Σ over edges of (deg − 1) at both ends
        let p3 = Equation::new(
            vec![("011".to_owned(), 2), ("111".to_owned(), 6)],
            "1".to_owned(),
            vec![term(&[0]), term(&[1])],
            1,
        );
        let triangle = Equation::new(
            vec![("111".to_owned(), 3)],
            "1".to_owned(),
            vec![term(&[0, 1])],
            0,
        );
        EquationSet::new(3, false, vec![triangle, p3])
    }

    #[test]
    fn test_solve() {
        let set = set();
        assert_eq!(set.equations()[0].solves(), "011");
        // a triangle with a pendant edge: two induced paths, one triangle
        assert_eq!(set.solve(&[10, 3]), vec![2, 1]);
        assert_eq!(set.get("111").unwrap().lhs()[0].1, 3);
        assert!(set.get("110").is_none());
    }

    #[test]
    #[should_panic]
    fn test_inconsistent() {
        set().solve(&[0, 3]);
    }

    #[test]
    fn test_display() {
        let set = set();
        assert_eq!(
            set.equations()[0].to_string(),
            "2·[011] + 6·[111] = Σ[1] {0:-} {1:-} − 1"
        );
        assert_eq!(set.to_string().lines().count(), 2);
    }

    #[test]
    fn test_host_term() {
        assert_eq!(host_term(&term(&[0, 2]), &[1, 2, 0], &[7, 3, 5]), term(&[3, 7]));
    }
}
