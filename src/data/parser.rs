//! A plain edge-list format:
//!
//! ```text
//! # comments start with '#'
//! 4        # the number of nodes
//! 0 1      # an edge from 0 to 1
//! 1 2 -1   # an edge with a label (an integer, '+' or '-')
//! ```

use super::{add_input_edge, AdjacencyGraph, Graph, LoadError};
use crate::pattern::EdgeModel;
use log::info;
use pest::Parser;
use pest_derive::Parser;
use std::path::Path;

pub type EdgeListRule = Rule;

#[derive(Parser)]
#[grammar = "data/grammar.pest"]
struct EdgeListParser;

/// Builds a host graph of `model` from the text of an edge list. Missing
/// labels read as 1.
pub fn parse_edge_list<M: EdgeModel>(model: M, input: &str) -> Result<AdjacencyGraph<M>, LoadError> {
    let mut pairs = EdgeListParser::parse(Rule::graph, input)?
        .next()
        .unwrap()
        .into_inner();
    let order = parse_node(pairs.next().unwrap().into_inner().next().unwrap())?;
    let mut graph = AdjacencyGraph::new(model, order);
    for pair in pairs {
        match pair.as_rule() {
            Rule::edge => {
                let mut inner = pair.into_inner();
                let src = parse_node(inner.next().unwrap())?;
                let dst = parse_node(inner.next().unwrap())?;
                let label = match inner.next() {
                    Some(label) => parse_label(label)?,
                    None => 1,
                };
                add_input_edge(&mut graph, src, dst, label)?;
            }
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }
    Ok(graph)
}

pub fn read_edge_list<M: EdgeModel, P: AsRef<Path>>(model: M, path: P) -> Result<AdjacencyGraph<M>, LoadError> {
    let input = std::fs::read_to_string(path.as_ref())?;
    let graph = parse_edge_list(model, &input)?;
    info!(
        "loaded {}: {} nodes, {} edges",
        path.as_ref().display(),
        graph.order(),
        graph.size()
    );
    Ok(graph)
}

fn parse_node(pair: pest::iterators::Pair<Rule>) -> Result<usize, LoadError> {
    pair.as_str().parse().map_err(|_| out_of_range(pair).into())
}

fn parse_label(pair: pest::iterators::Pair<Rule>) -> Result<i64, LoadError> {
    match pair.as_str() {
        "+" => Ok(1),
        "-" => Ok(-1),
        number => number.parse().map_err(|_| out_of_range(pair).into()),
    }
}

fn out_of_range(pair: pest::iterators::Pair<Rule>) -> pest::error::Error<Rule> {
    pest::error::Error::new_from_span(
        pest::error::ErrorVariant::CustomError {
            message: String::from("number out of range"),
        },
        pair.as_span(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::Graph,
        pattern::{Arc, Color, Colored, Directed, IllegalAction, Signed, SignedArc, Simple},
    };

    #[test]
    fn test_parse_directed() {
        let graph = parse_edge_list(Directed, "# a triangle\n3\n0 1\n1 2 # second\n\n2 0\n").unwrap();
        assert_eq!(graph.order(), 3);
        assert_eq!(graph.size(), 3);
        assert_eq!(graph.neighbors(0, Arc::Out), &[1]);
        assert_eq!(graph.neighbors(0, Arc::In), &[2]);
    }

    #[test]
    fn test_parse_labels() {
        let signed = parse_edge_list(Signed, "3\n0 1 +\n1 2 -\n2 0 -4").unwrap();
        assert_eq!(signed.neighbors(1, SignedArc::NegativeOut), &[2]);
        assert_eq!(signed.neighbors(0, SignedArc::NegativeIn), &[2]);
        let colored = parse_edge_list(Colored::new(2), "2\n0 1 2\n").unwrap();
        assert_eq!(colored.neighbors(1, Color(2)), &[0]);
        assert!(matches!(
            parse_edge_list(Colored::new(2), "2\n0 1 3\n"),
            Err(LoadError::UnknownLabel(3))
        ));
    }

    #[test]
    fn test_parse_skips_duplicates() {
        let graph = parse_edge_list(Simple, "3\n0 1\n1 0\n1 1\n").unwrap();
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_edge_list(Simple, "2\n0 2\n"),
            Err(LoadError::Illegal(IllegalAction::NodeOutOfRange(2)))
        ));
        assert!(matches!(
            parse_edge_list(Simple, "2\n0 x\n"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_oversized_numbers() {
        assert!(matches!(
            parse_edge_list(Simple, "3\n0 99999999999999999999999\n"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            parse_edge_list(Simple, "99999999999999999999999\n"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            parse_edge_list(Signed, "2\n0 1 -99999999999999999999999\n"),
            Err(LoadError::Parse(_))
        ));
    }
}
