//! The four edge models: undirected, directed, colored and signed-directed.

use super::{EdgeMask, EdgeModel, EdgeType, PatternError};
use std::fmt;

/// Pairs `(i, j)` with `j < i`, row by row.
fn lower_triangle(order: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..order).flat_map(|i| (0..i).map(move |j| (i, j)))
}

/// Pairs `(i, j)` with `j != i`, row by row.
fn off_diagonal(order: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..order).flat_map(move |i| (0..order).filter(move |&j| j != i).map(move |j| (i, j)))
}

/// Decodes one character per pair; `edge` returns `None` for characters the
/// model does not know and `Some(None)` for "no edge".
fn decode_pairs<E, I, F>(pairs: I, repr: &str, edge: F) -> Result<Vec<(usize, usize, E)>, PatternError>
where
    I: Iterator<Item = (usize, usize)>,
    F: Fn(char) -> Option<Option<E>>,
{
    let mut edges = vec![];
    for (pos, ((i, j), c)) in pairs.zip(repr.chars()).enumerate() {
        match edge(c) {
            Some(Some(e)) => edges.push((i, j, e)),
            Some(None) => {}
            None => return Err(PatternError::InvalidCharacter(c, pos)),
        }
    }
    Ok(edges)
}

/// The single type of an undirected edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Link;

impl EdgeType for Link {
    fn index(self) -> usize {
        0
    }

    fn from_index(_index: usize) -> Self {
        Link
    }

    fn inverse(self) -> Self {
        Link
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-")
    }
}

/// Undirected simple graphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Simple;

impl EdgeModel for Simple {
    type Edge = Link;

    fn name(&self) -> String {
        String::from("simple")
    }

    fn edge_types(&self) -> Vec<Link> {
        vec![Link]
    }

    fn valid_combinations(&self) -> Vec<EdgeMask> {
        vec![EdgeMask::of(Link)]
    }

    fn is_legal(&self, mask: EdgeMask) -> bool {
        mask.bits() <= 1
    }

    fn representation_length(&self, order: usize) -> usize {
        order * order.saturating_sub(1) / 2
    }

    fn alphabet(&self) -> Vec<char> {
        vec!['1']
    }

    fn encode(&self, adjacency: &[Vec<EdgeMask>]) -> String {
        lower_triangle(adjacency.len())
            .map(|(i, j)| if adjacency[i][j].is_empty() { '0' } else { '1' })
            .collect()
    }

    fn decode(&self, order: usize, repr: &str) -> Result<Vec<(usize, usize, Link)>, PatternError> {
        decode_pairs(lower_triangle(order), repr, |c| match c {
            '0' => Some(None),
            '1' => Some(Some(Link)),
            _ => None,
        })
    }

    fn edge_from_label(&self, _label: i64) -> Option<Link> {
        Some(Link)
    }
}

/// Direction of an arc as seen from the first node of the pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Arc {
    Out,
    In,
}

impl EdgeType for Arc {
    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => Arc::Out,
            _ => Arc::In,
        }
    }

    fn inverse(self) -> Self {
        match self {
            Arc::Out => Arc::In,
            Arc::In => Arc::Out,
        }
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arc::Out => write!(f, "->"),
            Arc::In => write!(f, "<-"),
        }
    }
}

/// Directed graphs without self-loops; both arcs of a pair may be present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Directed;

impl EdgeModel for Directed {
    type Edge = Arc;

    fn name(&self) -> String {
        String::from("directed")
    }

    fn edge_types(&self) -> Vec<Arc> {
        vec![Arc::Out, Arc::In]
    }

    fn valid_combinations(&self) -> Vec<EdgeMask> {
        vec![
            EdgeMask::of(Arc::Out),
            EdgeMask::of(Arc::In),
            EdgeMask::from_edges(vec![Arc::Out, Arc::In]),
        ]
    }

    fn is_legal(&self, mask: EdgeMask) -> bool {
        mask.bits() <= 0b11
    }

    fn representation_length(&self, order: usize) -> usize {
        order * order.saturating_sub(1)
    }

    fn alphabet(&self) -> Vec<char> {
        vec!['1']
    }

    fn encode(&self, adjacency: &[Vec<EdgeMask>]) -> String {
        off_diagonal(adjacency.len())
            .map(|(i, j)| if adjacency[i][j].contains(Arc::Out) { '1' } else { '0' })
            .collect()
    }

    fn decode(&self, order: usize, repr: &str) -> Result<Vec<(usize, usize, Arc)>, PatternError> {
        decode_pairs(off_diagonal(order), repr, |c| match c {
            '0' => Some(None),
            '1' => Some(Some(Arc::Out)),
            _ => None,
        })
    }

    fn edge_from_label(&self, _label: i64) -> Option<Arc> {
        Some(Arc::Out)
    }
}

/// An undirected edge color, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color(pub u8);

impl EdgeType for Color {
    fn index(self) -> usize {
        self.0 as usize - 1
    }

    fn from_index(index: usize) -> Self {
        Color(index as u8 + 1)
    }

    fn inverse(self) -> Self {
        self
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Undirected graphs whose edges carry one of `colors` colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colored {
    colors: u8,
}

impl Colored {
    /// Representations use one digit per pair, so at most 9 colors.
    pub fn new(colors: u8) -> Self {
        assert!((1..=9).contains(&colors), "between 1 and 9 colors");
        Colored { colors }
    }

    pub fn colors(&self) -> u8 {
        self.colors
    }
}

impl EdgeModel for Colored {
    type Edge = Color;

    fn name(&self) -> String {
        format!("colored({})", self.colors)
    }

    fn edge_types(&self) -> Vec<Color> {
        (1..=self.colors).map(Color).collect()
    }

    fn valid_combinations(&self) -> Vec<EdgeMask> {
        self.edge_types().into_iter().map(EdgeMask::of).collect()
    }

    fn is_legal(&self, mask: EdgeMask) -> bool {
        mask.len() <= 1 && mask.bits() < 1 << self.colors
    }

    fn representation_length(&self, order: usize) -> usize {
        order * order.saturating_sub(1) / 2
    }

    fn alphabet(&self) -> Vec<char> {
        (1..=self.colors).map(|c| char::from(b'0' + c)).collect()
    }

    fn encode(&self, adjacency: &[Vec<EdgeMask>]) -> String {
        lower_triangle(adjacency.len())
            .map(|(i, j)| match adjacency[i][j].edges::<Color>().next() {
                Some(Color(c)) => char::from(b'0' + c),
                None => '0',
            })
            .collect()
    }

    fn decode(&self, order: usize, repr: &str) -> Result<Vec<(usize, usize, Color)>, PatternError> {
        let colors = self.colors;
        decode_pairs(lower_triangle(order), repr, |c| match c.to_digit(10) {
            Some(0) => Some(None),
            Some(d) if d <= colors as u32 => Some(Some(Color(d as u8))),
            _ => None,
        })
    }

    fn edge_from_label(&self, label: i64) -> Option<Color> {
        if 1 <= label && label <= self.colors as i64 {
            Some(Color(label as u8))
        } else {
            None
        }
    }
}

/// A signed arc as seen from the first node of the pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignedArc {
    PositiveOut,
    PositiveIn,
    NegativeOut,
    NegativeIn,
}

impl EdgeType for SignedArc {
    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => SignedArc::PositiveOut,
            1 => SignedArc::PositiveIn,
            2 => SignedArc::NegativeOut,
            _ => SignedArc::NegativeIn,
        }
    }

    fn inverse(self) -> Self {
        match self {
            SignedArc::PositiveOut => SignedArc::PositiveIn,
            SignedArc::PositiveIn => SignedArc::PositiveOut,
            SignedArc::NegativeOut => SignedArc::NegativeIn,
            SignedArc::NegativeIn => SignedArc::NegativeOut,
        }
    }
}

impl fmt::Display for SignedArc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SignedArc::PositiveOut => write!(f, "+>"),
            SignedArc::PositiveIn => write!(f, "<+"),
            SignedArc::NegativeOut => write!(f, "->"),
            SignedArc::NegativeIn => write!(f, "<-"),
        }
    }
}

/// Directed graphs whose arcs are positive or negative; each direction of a
/// pair carries at most one arc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signed;

impl EdgeModel for Signed {
    type Edge = SignedArc;

    fn name(&self) -> String {
        String::from("signed")
    }

    fn edge_types(&self) -> Vec<SignedArc> {
        (0..4).map(SignedArc::from_index).collect()
    }

    fn valid_combinations(&self) -> Vec<EdgeMask> {
        use SignedArc::*;
        vec![
            EdgeMask::of(PositiveOut),
            EdgeMask::of(PositiveIn),
            EdgeMask::of(NegativeOut),
            EdgeMask::of(NegativeIn),
            EdgeMask::from_edges(vec![PositiveOut, PositiveIn]),
            EdgeMask::from_edges(vec![PositiveOut, NegativeIn]),
            EdgeMask::from_edges(vec![NegativeOut, PositiveIn]),
            EdgeMask::from_edges(vec![NegativeOut, NegativeIn]),
        ]
    }

    fn is_legal(&self, mask: EdgeMask) -> bool {
        use SignedArc::*;
        mask.bits() < 1 << 4
            && !(mask.contains(PositiveOut) && mask.contains(NegativeOut))
            && !(mask.contains(PositiveIn) && mask.contains(NegativeIn))
    }

    fn representation_length(&self, order: usize) -> usize {
        order * order.saturating_sub(1)
    }

    fn alphabet(&self) -> Vec<char> {
        vec!['+', '-']
    }

    fn encode(&self, adjacency: &[Vec<EdgeMask>]) -> String {
        off_diagonal(adjacency.len())
            .map(|(i, j)| {
                if adjacency[i][j].contains(SignedArc::PositiveOut) {
                    '+'
                } else if adjacency[i][j].contains(SignedArc::NegativeOut) {
                    '-'
                } else {
                    '0'
                }
            })
            .collect()
    }

    fn decode(&self, order: usize, repr: &str) -> Result<Vec<(usize, usize, SignedArc)>, PatternError> {
        decode_pairs(off_diagonal(order), repr, |c| match c {
            '0' => Some(None),
            '+' => Some(Some(SignedArc::PositiveOut)),
            '-' => Some(Some(SignedArc::NegativeOut)),
            _ => None,
        })
    }

    fn edge_from_label(&self, label: i64) -> Option<SignedArc> {
        match label.signum() {
            1 => Some(SignedArc::PositiveOut),
            -1 => Some(SignedArc::NegativeOut),
            _ => None,
        }
    }
}
