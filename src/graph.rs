//! Implementation of a simple, undirected graph data structure that keeps both an adjacency
//! matrix and sorted adjacency lists. Self-loops are allowed.

use fxhash::FxHashSet;
use std::io::BufRead;
use crate::cust_error::ImportError;
use rand::Rng;

/// A simple undirected graph datastructure. Edges are only ever added, all algorithms of this
/// crate borrow a finished graph immutably.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct UGraph {
    n: usize,
    /// Row major `n * n` matrix.
    adj_matrix: Vec<bool>,
    /// Ascending neighbors of each node, a self-loop lists the node itself.
    adj_list: Vec<Vec<usize>>,
    num_edges: usize,
}

// Static functions
impl UGraph {

    /// Creates a graph with `n` nodes and no edges.
    pub fn new(n: usize) -> Self {
        UGraph {
            n,
            adj_matrix: vec![false; n * n],
            adj_list: vec![Vec::new(); n],
            num_edges: 0,
        }
    }

    /// Returns an `Iterator` over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item=usize> {
        0..self.n
    }

    /// Returns the number of nodes of `self`.
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// Returns the number of edges of `self`. A self-loop counts as one edge.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns the ascending neighbors of `node`.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adj_list[node]
    }

    /// Returns the degree of `node`. A self-loop adds one.
    pub fn degree(&self, node: usize) -> usize {
        self.adj_list[node].len()
    }

    /// Returns the flat, row major adjacency matrix.
    pub fn adj_matrix(&self) -> &[bool] {
        &self.adj_matrix
    }

    /// Checks if `edge` exists.
    pub fn edge_exists(&self, edge: (usize, usize)) -> bool {
        self.adj_matrix[edge.0 * self.n + edge.1]
    }

    pub fn has_self_loop(&self, node: usize) -> bool {
        self.edge_exists((node, node))
    }

    /// Returns an iterator over all edges `(u, v)` with `u <= v`.
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize)> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .flat_map(|(u, neighs)| {
                neighs.iter()
                    .filter(move |v| u <= **v)
                    .map(move |v| (u, *v))
            })
    }

    /// Returns the complement of `self`: `(u, v)` with `u != v` is an edge iff it is not an edge
    /// of `self`. Self-loops of `self` are dropped.
    pub fn complement(&self) -> Self {
        let mut complement = UGraph::new(self.n);
        for u in 0..self.n {
            for v in (u + 1)..self.n {
                if !self.edge_exists((u, v)) {
                    complement.add_edge(u, v);
                }
            }
        }
        complement
    }

    /// Checks if every edge of `self` has at least one endpoint in `set`.
    pub fn is_vertex_cover(&self, set: &FxHashSet<usize>) -> bool {
        self.edges().all(|(u, v)| set.contains(&u) || set.contains(&v))
    }

    /// Checks if `node_set` is a clique in `self`.
    pub fn is_clique(&self, node_set: &FxHashSet<usize>) -> bool {
        if node_set.iter().any(|node| *node >= self.n) {
            return false
        }
        node_set.iter()
            .all(|u| node_set.iter().all(|v| u == v || self.edge_exists((*u, *v))))
    }

}

// Construction
impl UGraph {

    /// Inserts the undirected edge `{u, v}`. Inserting an existing edge does nothing.
    ///
    /// Panics if `u` or `v` is not a node of `self`.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(u < self.n && v < self.n, "edge ({}, {}) out of range for {} nodes", u, v, self.n);
        if self.adj_matrix[u * self.n + v] {
            return
        }
        self.adj_matrix[u * self.n + v] = true;
        self.adj_matrix[v * self.n + u] = true;
        Self::insert_sorted(&mut self.adj_list[u], v);
        if u != v {
            Self::insert_sorted(&mut self.adj_list[v], u);
        }
        self.num_edges += 1;
    }

    fn insert_sorted(neighs: &mut Vec<usize>, node: usize) {
        if let Err(pos) = neighs.binary_search(&node) {
            neighs.insert(pos, node);
        }
    }

    /// Generates a random graph with `n` nodes where every pair of distinct nodes is connected
    /// with probability `density` (clamped to `[0, 1]`, NaN counts as `0`).
    pub fn random<R: Rng + ?Sized>(n: usize, density: f64, rng: &mut R) -> Self {
        let p = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let mut graph = UGraph::new(n);
        for u in 0..n {
            for v in (u + 1)..n {
                if rng.gen_bool(p) {
                    graph.add_edge(u, v);
                }
            }
        }
        graph
    }

}

impl UGraph {

    /// Reads a batch of adjacency matrix instances.
    ///
    /// Each instance is a line holding the number of nodes `n` followed by `n` rows of `n`
    /// entries `0`/`1`, either whitespace separated or written without separators. Empty lines
    /// between instances are skipped.
    ///
    /// Returns an `ImportError` if reading fails, otherwise one result per instance. A malformed
    /// instance is reported in place and does not stop the remaining ones from being read.
    pub fn read_matrix_batch<R: BufRead>(input: R) -> Result<Vec<Result<Self, ImportError>>, ImportError> {
        let lines = input.lines().collect::<Result<Vec<String>, _>>()?;
        let mut instances = Vec::new();
        let mut pos = 0;
        while pos < lines.len() {
            let header = lines[pos].trim();
            pos += 1;
            if header.is_empty() {
                continue
            }
            let n = match header.parse::<usize>() {
                Ok(n) => n,
                Err(e) => {
                    instances.push(Err(e.into()));
                    pos = Self::skip_orphaned_rows(&lines, pos);
                    continue
                }
            };
            // The declared rows are consumed even if one of them is malformed, so that the
            // next instance starts at its header.
            let available = n.min(lines.len() - pos);
            let rows = &lines[pos..pos + available];
            pos += available;
            instances.push(Self::from_rows(n, rows));
        }
        Ok(instances)
    }

    /// Skips the rows of an instance whose header could not be read. The row width of the first
    /// line decides how many rows of that width belong to the instance.
    fn skip_orphaned_rows(lines: &[String], mut pos: usize) -> usize {
        let width = match lines.get(pos).and_then(|line| Self::row_width(line)) {
            Some(width) => width,
            None => return pos,
        };
        let mut skipped = 0;
        while skipped < width && pos < lines.len() && Self::row_width(&lines[pos]) == Some(width) {
            pos += 1;
            skipped += 1;
        }
        pos
    }

    /// Returns the number of entries of `line` if it only holds `0`/`1` entries.
    fn row_width(line: &str) -> Option<usize> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() || !tokens.iter().all(|token| token.chars().all(|c| c == '0' || c == '1')) {
            return None
        }
        match tokens.as_slice() {
            [single] => Some(single.len()),
            _ if tokens.iter().all(|token| token.len() == 1) => Some(tokens.len()),
            _ => None,
        }
    }

    fn from_rows(n: usize, rows: &[String]) -> Result<Self, ImportError> {
        if rows.len() != n {
            return Err(ImportError::FormatError(
                format!("expected {} rows, found {}", n, rows.len())))
        }
        let mut graph = UGraph::new(n);
        for (u, row) in rows.iter().enumerate() {
            for (v, entry) in Self::parse_row(row, n, u)?.into_iter().enumerate() {
                if entry {
                    graph.add_edge(u, v);
                }
            }
        }
        Ok(graph)
    }

    fn parse_row(row: &str, n: usize, index: usize) -> Result<Vec<bool>, ImportError> {
        let tokens: Vec<&str> = row.split_whitespace().collect();
        let entries: Vec<&str> = if tokens.len() == 1 && n > 1 {
            // fixed width row without separators
            let token = tokens[0];
            (0..token.len()).filter_map(|i| token.get(i..i + 1)).collect()
        } else {
            tokens
        };
        if entries.len() != n {
            return Err(ImportError::FormatError(
                format!("row {} has {} entries, expected {}", index, entries.len(), n)))
        }
        entries.into_iter()
            .map(|entry| match entry {
                "0" => Ok(false),
                "1" => Ok(true),
                other => Err(ImportError::FormatError(
                    format!("row {} holds `{}`, expected 0 or 1", index, other))),
            })
            .collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn add_edge_test() {
        let mut graph = UGraph::new(4);
        graph.add_edge(2, 0);
        graph.add_edge(0, 2);
        graph.add_edge(0, 1);
        graph.add_edge(3, 3);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(2), &[0]);
        assert_eq!(graph.neighbors(3), &[3]);
        assert!(graph.edge_exists((2, 0)));
        assert!(graph.has_self_loop(3));
        assert!(!graph.has_self_loop(0));
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (3, 3)]);
    }

    #[test]
    fn complement_test() {
        let mut graph = UGraph::new(3);
        graph.add_edge(0, 1);
        graph.add_edge(2, 2);
        let complement = graph.complement();
        assert_eq!(complement.num_edges(), 2);
        assert!(complement.edge_exists((0, 2)));
        assert!(complement.edge_exists((1, 2)));
        assert!(!complement.edge_exists((0, 1)));
        assert!(!complement.has_self_loop(2));
    }

    #[test]
    fn validation_test() {
        let mut graph = UGraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(0, 2);
        graph.add_edge(3, 3);
        assert!(graph.is_clique(&vec![0, 1, 2].into_iter().collect()));
        assert!(!graph.is_clique(&vec![0, 1, 3].into_iter().collect()));
        assert!(!graph.is_clique(&vec![7].into_iter().collect()));
        assert!(graph.is_vertex_cover(&vec![0, 1, 3].into_iter().collect()));
        // the self-loop needs its node
        assert!(!graph.is_vertex_cover(&vec![0, 1].into_iter().collect()));
    }

    #[test]
    fn read_matrix_batch_test() {
        let input = Cursor::new("3\n0 1 1\n1 0 0\n1 0 0\n\n4\n0110\n1001\n1001\n0110\n1\n1\n");
        let graphs = UGraph::read_matrix_batch(input).unwrap();
        assert_eq!(graphs.len(), 3);
        let g1 = graphs[0].as_ref().unwrap();
        assert_eq!(g1.num_nodes(), 3);
        assert_eq!(g1.num_edges(), 2);
        let g2 = graphs[1].as_ref().unwrap();
        assert_eq!(g2.num_edges(), 4);
        assert!(g2.edge_exists((3, 2)));
        let g3 = graphs[2].as_ref().unwrap();
        assert!(g3.has_self_loop(0));
    }

    #[test]
    fn read_malformed_batch_test() {
        let input = Cursor::new("3\n0 1 1\n1 0\n1 0 0\nx\n2\n0 2\n2 0\n2\n0 1\n1 0\n3\n0 1 1\n");
        let graphs = UGraph::read_matrix_batch(input).unwrap();
        assert_eq!(graphs.len(), 5);
        assert!(matches!(graphs[0], Err(ImportError::FormatError(_))));
        assert!(matches!(graphs[1], Err(ImportError::BadIntError(_))));
        assert!(matches!(graphs[2], Err(ImportError::FormatError(_))));
        assert_eq!(graphs[3].as_ref().unwrap().num_edges(), 1);
        // truncated at the end of the input
        assert!(matches!(graphs[4], Err(ImportError::FormatError(_))));
    }

    #[test]
    fn bad_header_skips_its_rows_test() {
        let graphs = UGraph::read_matrix_batch(Cursor::new("3x\n011\n101\n110\n2\n01\n10\n")).unwrap();
        assert_eq!(graphs.len(), 2);
        assert!(matches!(graphs[0], Err(ImportError::BadIntError(_))));
        let graph = graphs[1].as_ref().unwrap();
        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.num_edges(), 1);
        // a following single node instance has a different row width and is kept
        let graphs = UGraph::read_matrix_batch(Cursor::new("2y\n0 1\n1 0\n1\n1\n")).unwrap();
        assert_eq!(graphs.len(), 2);
        assert!(graphs[1].as_ref().unwrap().has_self_loop(0));
    }

    #[test]
    fn random_test() {
        let g1 = UGraph::random(10, 0.5, &mut StdRng::seed_from_u64(7));
        let g2 = UGraph::random(10, 0.5, &mut StdRng::seed_from_u64(7));
        assert_eq!(g1, g2);
        let full = UGraph::random(6, 1.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(full.num_edges(), 15);
        let empty = UGraph::random(6, 0.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(empty.num_edges(), 0);
        let nan = UGraph::random(6, f64::NAN, &mut StdRng::seed_from_u64(1));
        assert_eq!(nan.num_edges(), 0);
    }

}
