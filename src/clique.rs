//! Maximum and k-cliques via the reduction to vertex cover.
//!
//! `graph` has a clique of size `s` iff its complement has a vertex cover of size `|V| - s`: the
//! nodes outside of a cover of the complement are pairwise adjacent in `graph`.

use crate::graph::UGraph;
use crate::bounded_search::{min_vertex_cover, k_vertex_cover};
use fxhash::FxHashSet;
use log::debug;

/// Returns the nodes of `graph` that are not in `cover`.
fn outside_of(graph: &UGraph, cover: &FxHashSet<usize>) -> FxHashSet<usize> {
    graph.nodes()
        .filter(|node| !cover.contains(node))
        .collect()
}

/// Computes a maximum clique of `graph` from a minimum vertex cover of its complement.
/// Self-loops of `graph` are ignored.
pub fn max_clique(graph: &UGraph) -> FxHashSet<usize> {
    let complement = graph.complement();
    let cover = min_vertex_cover(&complement);
    let clique = outside_of(graph, &cover);
    debug!("max_clique: |V|={} complement |E|={} clique size={}",
           graph.num_nodes(), complement.num_edges(), clique.len());
    clique
}

/// Looks for a clique with at least `k` nodes in `graph` by searching a vertex cover of size at
/// most `|V| - k` in its complement.
///
/// Returns the clique found, which may be larger than `k`. If `graph` has no clique of size `k`,
/// the result has less than `k` nodes; it is empty if `k > |V|`.
pub fn k_clique(graph: &UGraph, k: usize) -> FxHashSet<usize> {
    if k > graph.num_nodes() {
        return FxHashSet::default()
    }
    let u = graph.num_nodes() - k;
    let complement = graph.complement();
    let cover = k_vertex_cover(&complement, u);
    let clique = outside_of(graph, &cover);
    debug!("k_clique: |V|={} k={} cover bound={} clique size={}",
           graph.num_nodes(), k, u, clique.len());
    clique
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;
    use std::io::Cursor;
    use rand::{rngs::StdRng, SeedableRng};

    fn brute_force_max_clique(graph: &UGraph) -> usize {
        let n = graph.num_nodes();
        (0u32..(1 << n))
            .filter(|&mask| {
                (0..n).all(|u| (0..n).all(|v| {
                    u == v || mask & (1 << u) == 0 || mask & (1 << v) == 0 || graph.edge_exists((u, v))
                }))
            })
            .map(|mask| mask.count_ones() as usize)
            .max()
            .expect("the empty set is a clique")
    }

    #[test]
    fn triangle_clique_test() {
        let graphs = UGraph::read_matrix_batch(Cursor::new("3\n011\n101\n110\n")).unwrap();
        let graph = graphs[0].as_ref().unwrap();
        let expected: FxHashSet<usize> = vec![0, 1, 2].into_iter().collect();
        assert_eq!(max_clique(graph), expected);
        assert_eq!(k_clique(graph, 3), expected);
    }

    #[test]
    fn two_cliques_test() {
        // a triangle and a disjoint 4-clique whose node 3 also carries a self-loop
        let mut graph = UGraph::new(7);
        for (u, v) in [(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (3, 6), (4, 5), (4, 6), (5, 6), (3, 3)] {
            graph.add_edge(u, v);
        }
        let clique = max_clique(&graph);
        let expected: FxHashSet<usize> = vec![3, 4, 5, 6].into_iter().collect();
        assert_eq!(clique, expected);
        let clique = k_clique(&graph, 3);
        assert!(clique.len() >= 3);
        assert!(graph.is_clique(&clique));
        assert!(k_clique(&graph, 5).len() < 5);
        assert!(k_clique(&graph, 8).is_empty());
    }

    #[test]
    fn edgeless_graph_test() {
        let graph = UGraph::new(4);
        assert_eq!(max_clique(&graph).len(), 1);
        assert_eq!(k_clique(&graph, 1).len(), 1);
        assert!(k_clique(&graph, 2).len() < 2);
        assert!(max_clique(&UGraph::new(0)).is_empty());
    }

    #[test]
    fn random_duality_test() {
        let mut rng = StdRng::seed_from_u64(1040);
        for round in 0..50 {
            let n = 1 + round % 11;
            let graph = UGraph::random(n, [0.3, 0.6, 0.9][round % 3], &mut rng);
            let clique = max_clique(&graph);
            assert!(graph.is_clique(&clique), "round {}", round);
            assert_eq!(clique.len(), brute_force_max_clique(&graph), "round {}", round);
            // the other direction: a minimum cover of the complement has |V| - s nodes
            let cover = min_vertex_cover(&graph.complement());
            assert_eq!(cover.len(), n - clique.len(), "round {}", round);
            let s = clique.len();
            let found = k_clique(&graph, s);
            assert!(found.len() >= s && graph.is_clique(&found), "round {}", round);
            assert!(k_clique(&graph, s + 1).len() < s + 1, "round {}", round);
        }
    }

}
