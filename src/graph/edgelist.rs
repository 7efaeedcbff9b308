//! Weighted edge-list format.
//!
//! One edge per line as `from,to,weight`, read and written with `csv`.
//! Blank lines and lines starting with `#` are ignored and fields may carry
//! surrounding whitespace. Node identifiers are non-negative integers and the
//! depot is node `0`.

use std::io::{Read, Write};

use super::model::{Edge, Graph};
use crate::error::{Result, RouteError};

/// Field separator used by the format.
pub const DELIMITER: u8 = b',';

/// Parses an in-memory edge list.
///
/// # Examples
///
/// ```
/// use u_arcroute::graph::edgelist::parse_edge_list;
///
/// let edges = parse_edge_list("0,1,3\n1,2,4.5\n").unwrap();
/// assert_eq!(edges.len(), 2);
/// assert_eq!(edges[1].weight, 4.5);
/// ```
pub fn parse_edge_list(text: &str) -> Result<Vec<Edge>> {
    read_edges(text.as_bytes())
}

/// Reads an edge list and builds a [`Graph`], running the depot-distance
/// precomputation on the way.
pub fn read_graph<R: Read>(reader: R) -> Result<Graph> {
    Graph::from_edges(read_edges(reader)?)
}

/// Writes the graph's edges in insertion order.
pub fn write_edge_list<W: Write>(graph: &Graph, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    for e in graph.edges() {
        writer.write_record([e.from.to_string(), e.to.to_string(), e.weight.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn read_edges<R: Read>(reader: R) -> Result<Vec<Edge>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut edges = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| {
            let line = err.position().map_or(0, |p| p.line() as usize);
            parse_error(line, err)
        })?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        if record.len() != 3 {
            return Err(RouteError::Parse {
                line,
                message: format!("expected 3 fields, found {}", record.len()),
            });
        }
        let (from, to, weight): (usize, usize, f64) = record
            .deserialize(None)
            .map_err(|err| parse_error(line, err))?;
        edges.push(Edge::new(from, to, weight));
    }
    Ok(edges)
}

fn parse_error(line: usize, err: csv::Error) -> RouteError {
    match err.into_kind() {
        csv::ErrorKind::Io(source) => RouteError::Io { source },
        csv::ErrorKind::Deserialize { err, .. } => RouteError::Parse {
            line,
            message: err.to_string(),
        },
        kind => RouteError::Parse {
            line,
            message: format!("{kind:?}"),
        },
    }
}
