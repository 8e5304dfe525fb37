use super::{add_input_edge, AdjacencyGraph, Graph, LoadError};
use crate::pattern::EdgeModel;
use log::info;

/// Reads a host graph stored in SQLite3 with the schema
///
/// ```sql
/// CREATE TABLE vertices (vid INT, vlabel INT);
/// CREATE TABLE edges (src INT, dst INT, elabel INT);
/// ```
///
/// Vertex ids are dense from 0; vertex labels are ignored and edge labels
/// are interpreted by `model`.
pub fn from_sqlite<M: EdgeModel>(model: M, conn: &rusqlite::Connection) -> Result<AdjacencyGraph<M>, LoadError> {
    let (min, order): (i64, i64) = conn
        .prepare("SELECT COALESCE(MIN(vid), 0), COALESCE(MAX(vid) + 1, 0) FROM vertices")?
        .query_row([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    node(min)?;
    let mut graph = AdjacencyGraph::new(model, node(order)?);
    let mut edges_stmt = conn.prepare("SELECT src, dst, elabel FROM edges")?;
    let edges = edges_stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?))
    })?;
    for edge in edges {
        let (src, dst, elabel) = edge?;
        add_input_edge(&mut graph, node(src)?, node(dst)?, elabel)?;
    }
    info!("loaded {} nodes, {} edges from sqlite", graph.order(), graph.size());
    Ok(graph)
}

fn node(vid: i64) -> Result<usize, LoadError> {
    usize::try_from(vid).map_err(|_| LoadError::NegativeNode(vid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Arc, Directed};
    use rusqlite::params;

    fn create_db(edges: &[(i64, i64, i64)]) -> rusqlite::Connection {
        create_db_with(&[0, 1, 2, 3], edges)
    }

    fn create_db_with(vids: &[i64], edges: &[(i64, i64, i64)]) -> rusqlite::Connection {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE vertices (vid INT, vlabel INT)", [])
            .unwrap();
        conn.execute("CREATE TABLE edges (src INT, dst INT, elabel INT)", [])
            .unwrap();
        for &vid in vids {
            conn.execute("INSERT INTO vertices VALUES (?1, ?2)", params![vid, 0])
                .unwrap();
        }
        for &(src, dst, elabel) in edges {
            conn.execute(
                "INSERT INTO edges VALUES (?1, ?2, ?3)",
                params![src, dst, elabel],
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_from_sqlite() {
        let conn = create_db(&[(0, 1, 0), (1, 2, 0), (2, 1, 0), (3, 0, 0)]);
        let graph = from_sqlite(Directed, &conn).unwrap();
        assert_eq!(graph.order(), 4);
        assert_eq!(graph.size(), 4);
        assert_eq!(graph.neighbors(1, Arc::Out), &[2]);
        assert_eq!(graph.neighbors(1, Arc::In), &[0, 2]);
    }

    #[test]
    fn test_from_sqlite_out_of_range() {
        let conn = create_db(&[(0, 9, 0)]);
        assert!(matches!(
            from_sqlite(Directed, &conn),
            Err(LoadError::Illegal(_))
        ));
    }

    #[test]
    fn test_from_sqlite_negative_ids() {
        let conn = create_db_with(&[-3], &[]);
        assert!(matches!(
            from_sqlite(Directed, &conn),
            Err(LoadError::NegativeNode(-3))
        ));
        let conn = create_db_with(&[-1, 0, 1], &[]);
        assert!(matches!(
            from_sqlite(Directed, &conn),
            Err(LoadError::NegativeNode(-1))
        ));
        let conn = create_db(&[(0, 1, 0), (-2, 1, 0)]);
        assert!(matches!(
            from_sqlite(Directed, &conn),
            Err(LoadError::NegativeNode(-2))
        ));
    }

    #[test]
    fn test_from_sqlite_empty() {
        let conn = create_db_with(&[], &[]);
        assert_eq!(from_sqlite(Directed, &conn).unwrap().order(), 0);
    }
}
