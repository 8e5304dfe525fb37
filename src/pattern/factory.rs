use super::{EdgeMask, EdgeModel, Pattern, PatternError};

/// Creates patterns of one edge model, all rooted or all unrooted.
#[derive(Clone, Debug)]
pub struct PatternFactory<M: EdgeModel> {
    model: M,
    orbit_rep: bool,
}

impl<M: EdgeModel> PatternFactory<M> {
    /// With `orbit_rep`, node 0 of every pattern is fixed during
    /// canonicalization, so a pattern stands for one of its orbits.
    pub fn new(model: M, orbit_rep: bool) -> Self {
        Self { model, orbit_rep }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_orbit_rep(&self) -> bool {
        self.orbit_rep
    }

    pub fn from_string(&self, repr: &str) -> Result<Pattern<M>, PatternError> {
        let length = repr.chars().count();
        let order = self
            .model
            .order_of(length)
            .ok_or(PatternError::InvalidLength(length))?;
        let mut pattern = Pattern::new(self.model.clone(), order, self.orbit_rep);
        for (from, to, edge) in self.model.decode(order, repr)? {
            pattern
                .add_edge(from, to, edge)
                .map_err(PatternError::Illegal)?;
        }
        Ok(pattern)
    }

    pub fn copy(&self, pattern: &Pattern<M>) -> Pattern<M> {
        pattern.clone()
    }

    pub fn canonical_copy(&self, pattern: &Pattern<M>) -> Pattern<M> {
        pattern.relabeled(pattern.canonical_labeling())
    }

    pub fn representation_length(&self, order: usize) -> usize {
        self.model.representation_length(order)
    }

    pub fn one_node_pattern(&self) -> Pattern<M> {
        Pattern::new(self.model.clone(), 1, self.orbit_rep)
    }

    pub fn edge_types(&self) -> Vec<M::Edge> {
        self.model.edge_types()
    }

    pub fn valid_combinations(&self) -> Vec<EdgeMask> {
        self.model.valid_combinations()
    }
}

/// Brute-force enumeration of the connected canonical patterns of one order,
/// by counting through every representation string.
pub struct PatternIterator<'a, M: EdgeModel> {
    factory: &'a PatternFactory<M>,
    alphabet: Vec<char>,
    digits: Option<Vec<usize>>,
}

impl<'a, M: EdgeModel> PatternIterator<'a, M> {
    pub fn new(factory: &'a PatternFactory<M>, order: usize) -> Self {
        assert!(order >= 1, "patterns have at least one node");
        let mut alphabet = vec!['0'];
        alphabet.extend(factory.model().alphabet());
        Self {
            factory,
            alphabet,
            digits: Some(vec![0; factory.representation_length(order)]),
        }
    }

    fn advance(&mut self) {
        if let Some(digits) = self.digits.as_mut() {
            let radix = self.alphabet.len();
            for digit in digits.iter_mut().rev() {
                *digit += 1;
                if *digit < radix {
                    return;
                }
                *digit = 0;
            }
        }
        self.digits = None;
    }
}

impl<'a, M: EdgeModel> Iterator for PatternIterator<'a, M> {
    type Item = Pattern<M>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let repr: String = self
                .digits
                .as_ref()?
                .iter()
                .map(|&digit| self.alphabet[digit])
                .collect();
            self.advance();
            if let Ok(pattern) = self.factory.from_string(&repr) {
                if pattern.is_connected() && pattern.is_canonical() {
                    return Some(pattern);
                }
            }
        }
    }
}
