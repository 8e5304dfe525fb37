//! Host graphs: the capability the counter needs, one in-memory storage and
//! its loaders.

pub use adjacency::AdjacencyGraph;
pub use parser::{parse_edge_list, read_edge_list, EdgeListRule};
pub use sqlite::from_sqlite;

use crate::pattern::{EdgeMask, EdgeModel, EdgeType, IllegalAction};
use derive_more::{Display, From};
use log::warn;

mod adjacency;
mod parser;
mod sqlite;

pub trait Graph<E: EdgeType> {
    fn order(&self) -> usize;

    /// The `edge`-neighbors of `node`, ascending.
    fn neighbors(&self, node: usize, edge: E) -> &[usize];

    fn has_edge(&self, from: usize, to: usize, edge: E) -> bool {
        self.neighbors(from, edge).binary_search(&to).is_ok()
    }

    fn edge_types(&self) -> &[E];

    fn valid_combinations(&self) -> &[EdgeMask];
}

#[derive(Debug, Display, From)]
pub enum LoadError {
    #[display(fmt = "{}", _0)]
    Io(std::io::Error),
    #[display(fmt = "{}", _0)]
    Parse(pest::error::Error<EdgeListRule>),
    #[display(fmt = "{}", _0)]
    Sqlite(rusqlite::Error),
    #[display(fmt = "{}", _0)]
    Illegal(IllegalAction),
    #[display(fmt = "unknown edge label {}", _0)]
    #[from(ignore)]
    UnknownLabel(i64),
    #[display(fmt = "negative node id {}", _0)]
    #[from(ignore)]
    NegativeNode(i64),
}

impl std::error::Error for LoadError {}

/// Adds one input edge. Edges the model rejects are skipped with a warning;
/// unknown labels and nodes outside the graph are errors.
fn add_input_edge<M: EdgeModel>(
    graph: &mut AdjacencyGraph<M>,
    src: usize,
    dst: usize,
    label: i64,
) -> Result<(), LoadError> {
    let edge = graph
        .model()
        .edge_from_label(label)
        .ok_or(LoadError::UnknownLabel(label))?;
    match graph.add_edge(src, dst, edge) {
        Ok(()) => Ok(()),
        Err(IllegalAction::NodeOutOfRange(node)) => Err(IllegalAction::NodeOutOfRange(node).into()),
        Err(e) => {
            warn!("skipping edge ({}, {}): {}", src, dst, e);
            Ok(())
        }
    }
}
