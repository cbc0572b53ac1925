//! Implementation of the exclusion based search tree algorithm for vertex covers.

use crate::graph::UGraph;
use crate::vc_instance::{VCInstance, repair_redundant};
use fxhash::FxHashSet;
use log::debug;

impl<'a> VCInstance<'a> {

    /// Searches the cover candidates of `self.graph` by excluding nodes from an otherwise full
    /// cover. For every start node `i` in ascending order, a depth first branch does the
    /// following for a node `v` (starting with `v = i`):
    /// 1. If excluding `v` would leave an edge with both endpoints outside the cover, `v` stays
    ///    in the cover and the branch ends.
    /// 2. Otherwise `v` is excluded. The resulting cover is valid and compared against the
    ///    current best, then the search continues with every node `w > v`. Afterwards `v` is
    ///    reinstated.
    ///
    /// Every independent set is visited this way, so the best cover found is a minimum one.
    /// Among minimum covers the one with the highest degree sum is kept, ties beyond that go to
    /// the first one found. Subtrees are cut when excluding all remaining nodes could not beat
    /// the current best, and if `self.target` is set, the whole search stops once the target
    /// size was reached.
    pub fn exclusion_search(&mut self) {
        for start in self.graph.nodes() {
            if self.target_reached() {
                break
            }
            // isolated nodes are outside of the cover already
            if self.cover[start] {
                self.exclusion_search_inner(start);
            }
        }
    }

    fn exclusion_search_inner(&mut self, node: usize) {
        if self.target_reached() {
            return
        }
        self.explored += 1;
        if self.would_uncover(node) {
            return
        }
        self.exclude(node);
        self.update_current_best();
        // Only nodes after `node` can still be excluded in this branch.
        if self.may_improve(self.cover_size - self.remaining_from(node + 1)) {
            for next in (node + 1)..self.graph.num_nodes() {
                if self.target_reached() {
                    break
                }
                if self.cover[next] {
                    self.exclusion_search_inner(next);
                }
            }
        }
        self.reinstate(node);
    }

}

/// Computes a minimum vertex cover of `graph`.
///
/// Nodes with a self-loop are always part of the result, isolated nodes never are. After the
/// search, `repair_redundant` runs as a best-effort correction step.
///
/// Among minimum covers the one with the highest degree sum wins. To find it, subtrees that can
/// only reach the current best size are still searched, which costs pruning on graphs with many
/// minimum covers.
pub fn min_vertex_cover(graph: &UGraph) -> FxHashSet<usize> {
    let mut instance = VCInstance::new(graph);
    instance.exclusion_search();
    let repaired = repair_redundant(graph, &mut instance.current_best);
    let solution = instance.best_solution();
    debug!(
        "min_vertex_cover: |V|={} |E|={} size={} explored={} repaired={}",
        graph.num_nodes(),
        graph.num_edges(),
        solution.len(),
        instance.explored,
        repaired
    );
    solution
}

/// Looks for a vertex cover of `graph` with at most `k` nodes.
///
/// Returns the first such cover found in index order. If none exists, the whole search space is
/// exhausted and the smallest cover found is returned instead, so callers have to compare the
/// size of the result with `k`.
pub fn k_vertex_cover(graph: &UGraph, k: usize) -> FxHashSet<usize> {
    let mut instance = VCInstance::with_target(graph, k);
    instance.exclusion_search();
    let solution = instance.best_solution();
    debug!(
        "k_vertex_cover: |V|={} |E|={} k={} size={} explored={}",
        graph.num_nodes(),
        graph.num_edges(),
        k,
        solution.len(),
        instance.explored
    );
    solution
}
