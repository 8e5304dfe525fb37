//! Small iterators shared by the pattern engine and the output code.

/// Plain changes (Steinhaus–Johnson–Trotter) over `n` items.
///
/// Each item is the position `k` of an adjacent transposition: swapping the
/// elements at `k` and `k + 1` of the current arrangement yields the next
/// permutation. Starting from the identity, the `n! - 1` transpositions visit
/// every permutation exactly once; the last arrangement is one swap of
/// positions `0` and `1` away from the identity.
pub struct Permutator {
    values: Vec<usize>,
    left: Vec<bool>,
}

impl Permutator {
    pub fn new(n: usize) -> Self {
        Permutator {
            values: (0..n).collect(),
            left: vec![true; n],
        }
    }

    /// The arrangement reached by the transpositions emitted so far.
    pub fn current(&self) -> &[usize] {
        &self.values
    }

    fn target(&self, pos: usize) -> Option<usize> {
        if self.left[pos] {
            pos.checked_sub(1)
        } else if pos + 1 < self.values.len() {
            Some(pos + 1)
        } else {
            None
        }
    }
}

impl Iterator for Permutator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let mut mobile: Option<usize> = None;
        for pos in 0..self.values.len() {
            if let Some(target) = self.target(pos) {
                if self.values[target] < self.values[pos]
                    && mobile.map_or(true, |m| self.values[m] < self.values[pos])
                {
                    mobile = Some(pos);
                }
            }
        }
        let pos = mobile?;
        let target = self.target(pos)?;
        let value = self.values[pos];
        self.values.swap(pos, target);
        self.left.swap(pos, target);
        for (v, left) in self.values.iter().zip(self.left.iter_mut()) {
            if *v > value {
                *left = !*left;
            }
        }
        Some(pos.min(target))
    }
}

/// Splits a slice into maximal runs sharing the same key.
pub struct GroupBy<'a, T, F, K>
where
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    slice: &'a [T],
    key: F,
}

impl<'a, T, F, K> GroupBy<'a, T, F, K>
where
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    pub fn new(slice: &'a [T], key: F) -> Self {
        GroupBy { slice, key }
    }
}

impl<'a, T, F, K> Iterator for GroupBy<'a, T, F, K>
where
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    type Item = (K, &'a [T]);

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.slice.first()?;
        let key = (self.key)(first);
        let len = 1 + self.slice[1..]
            .iter()
            .take_while(|x| (self.key)(x) == key)
            .count();
        let (head, tail) = self.slice.split_at(len);
        self.slice = tail;
        Some((key, head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_permutator_visits_all() {
        for n in 0..6 {
            let mut permutator = Permutator::new(n);
            let mut arrangement: Vec<usize> = (0..n).collect();
            let mut seen = HashSet::new();
            seen.insert(arrangement.clone());
            while let Some(k) = permutator.next() {
                arrangement.swap(k, k + 1);
                assert_eq!(arrangement, permutator.current());
                assert!(seen.insert(arrangement.clone()));
            }
            assert_eq!(seen.len(), (1..=n).product::<usize>());
            if n > 1 {
                arrangement.swap(0, 1);
                assert_eq!(arrangement, (0..n).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_permutator_three() {
        assert_eq!(Permutator::new(3).collect::<Vec<_>>(), vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_group_by() {
        let v = [(1, 'a'), (1, 'b'), (2, 'c'), (3, 'd'), (3, 'e')];
        assert_eq!(
            GroupBy::new(&v, |x| x.0).collect::<Vec<_>>(),
            vec![
                (1, &v[0..2]),
                (2, &v[2..3]),
                (3, &v[3..5]),
            ]
        );
        assert_eq!(GroupBy::new(&[] as &[(i32, char)], |x| x.0).count(), 0);
    }
}
