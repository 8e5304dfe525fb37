use super::{Equation, EquationSet};
use crate::pattern::{compare_representations, EdgeType};
use log::info;
use std::{
    cmp::Ordering,
    collections::{hash_map::Entry, HashMap},
};

/// Keeps one equation per solved pattern: the one with the smallest
/// right-hand side pattern, then the smallest terms, then the smallest
/// correction.
pub fn select_equations<E: EdgeType>(order: usize, orbit_rep: bool, candidates: Vec<Equation<E>>) -> EquationSet<E> {
    let total = candidates.len();
    let mut best: HashMap<String, Equation<E>> = HashMap::new();
    for equation in candidates {
        match best.entry(equation.solves().to_owned()) {
            Entry::Vacant(entry) => {
                entry.insert(equation);
            }
            Entry::Occupied(mut entry) => {
                if preference(&equation, entry.get()) == Ordering::Less {
                    entry.insert(equation);
                }
            }
        }
    }
    info!("selected {} of {} equations", best.len(), total);
    EquationSet::new(order, orbit_rep, best.into_values().collect())
}

fn preference<E: EdgeType>(a: &Equation<E>, b: &Equation<E>) -> Ordering {
    compare_representations(a.rhs(), b.rhs())
        .then_with(|| a.terms().cmp(b.terms()))
        .then_with(|| a.minus().cmp(&b.minus()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        equation::EquationGenerator,
        pattern::{PatternFactory, Simple},
        tree::TreeGenerator,
    };

    #[test]
    fn test_select_order_four() {
        let factory = PatternFactory::new(Simple, false);
        let tree = TreeGenerator::new(&factory, 3).generate();
        let candidates = EquationGenerator::new(&factory, &tree).generate();
        let set = select_equations(4, false, candidates.clone());
        assert_eq!(set.len(), 6);
        for equation in set.equations() {
            // no other candidate solving the same pattern is preferred
            assert!(candidates
                .iter()
                .filter(|c| c.solves() == equation.solves())
                .all(|c| preference(equation, c) != Ordering::Greater));
        }
        // the 4-clique is solved from the triangle with the term joining all
        let clique = set.get("111111").unwrap();
        assert_eq!(clique.rhs(), "111");
        assert_eq!(clique.terms().len(), 1);
        assert_eq!(clique.lhs(), &[("111111".to_owned(), 4)]);
    }
}
