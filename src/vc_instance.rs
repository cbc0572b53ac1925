use crate::graph::UGraph;
use fxhash::FxHashSet;

/// The state of one vertex cover search over a borrowed graph.
///
/// A `VCInstance` is created per search call and dropped once its result was extracted, it must
/// never be shared between two searches.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct VCInstance<'a> {
    pub graph: &'a UGraph,
    /// `cover[v]` is `true` iff `v` is currently part of the cover candidate.
    pub cover: Vec<bool>,
    pub cover_size: usize,
    /// Sum of the degrees of all nodes in the cover candidate.
    pub cover_degree: usize,
    /// Best valid cover found so far, its size and its degree sum.
    pub current_best: Vec<bool>,
    pub upper_bound: usize,
    pub best_degree: usize,
    /// If set, the search stops as soon as a cover of at most this size was found.
    pub target: Option<usize>,
    /// Number of non-isolated nodes with an index `>= v`, at position `v`.
    remaining: Vec<usize>,
    /// Number of visited search tree nodes.
    pub explored: usize,
}

impl<'a> VCInstance<'a> {

    /// Creates a fresh instance whose cover candidate holds every node with at least one edge.
    /// Isolated nodes start outside the cover and are never added to it.
    pub fn new(graph: &'a UGraph) -> Self {
        let n = graph.num_nodes();
        let cover: Vec<bool> = graph.nodes().map(|node| graph.degree(node) > 0).collect();
        let cover_size = cover.iter().filter(|c| **c).count();
        let cover_degree = graph.nodes().map(|node| graph.degree(node)).sum();
        let mut remaining = vec![0; n + 1];
        for node in (0..n).rev() {
            remaining[node] = remaining[node + 1] + cover[node] as usize;
        }
        VCInstance {
            graph,
            current_best: cover.clone(),
            upper_bound: cover_size,
            best_degree: cover_degree,
            cover,
            cover_size,
            cover_degree,
            target: None,
            remaining,
            explored: 0,
        }
    }

    /// Creates a fresh instance that stops once a cover of size at most `k` was found.
    pub fn with_target(graph: &'a UGraph, k: usize) -> Self {
        let mut instance = VCInstance::new(graph);
        instance.target = Some(k);
        instance
    }

    /// Checks if removing `node` from the cover candidate would leave an edge with both
    /// endpoints outside of it. A self-loop always counts as such an edge.
    pub fn would_uncover(&self, node: usize) -> bool {
        self.graph
            .neighbors(node)
            .iter()
            .any(|neigh| *neigh == node || !self.cover[*neigh])
    }

    /// Removes `node` from the cover candidate.
    pub(crate) fn exclude(&mut self, node: usize) {
        debug_assert!(self.cover[node]);
        self.cover[node] = false;
        self.cover_size -= 1;
        self.cover_degree -= self.graph.degree(node);
    }

    /// Puts `node` back into the cover candidate.
    pub(crate) fn reinstate(&mut self, node: usize) {
        debug_assert!(!self.cover[node]);
        self.cover[node] = true;
        self.cover_size += 1;
        self.cover_degree += self.graph.degree(node);
    }

    /// Number of nodes with index `>= node` that could still be excluded.
    pub(crate) fn remaining_from(&self, node: usize) -> usize {
        self.remaining[node.min(self.remaining.len() - 1)]
    }

    /// Checks if the cover candidate would replace the current best one.
    ///
    /// Smaller covers always win. Without a target, a cover of the same size wins if its degree
    /// sum is higher, so that high degree nodes are preferred among minimum covers.
    pub fn improves(&self) -> bool {
        self.cover_size < self.upper_bound
            || (self.target.is_none()
                && self.cover_size == self.upper_bound
                && self.cover_degree > self.best_degree)
    }

    /// Checks if a cover with `size` nodes could still replace the current best one.
    pub fn may_improve(&self, size: usize) -> bool {
        if self.target.is_none() {
            size <= self.upper_bound
        } else {
            size < self.upper_bound
        }
    }

    /// Updates the current best solution and the upper bound, if the cover candidate improves it.
    /// The candidate is only copied on improvement.
    pub fn update_current_best(&mut self) -> bool {
        if self.improves() {
            self.current_best.copy_from_slice(&self.cover);
            self.upper_bound = self.cover_size;
            self.best_degree = self.cover_degree;
            return true
        }
        false
    }

    /// Checks if the target size of a bounded search was reached.
    pub fn target_reached(&self) -> bool {
        matches!(self.target, Some(k) if self.upper_bound <= k)
    }

    /// Returns the current best solution as a set of nodes.
    pub fn best_solution(&self) -> FxHashSet<usize> {
        Self::to_set(&self.current_best)
    }

    pub(crate) fn to_set(membership: &[bool]) -> FxHashSet<usize> {
        membership.iter()
            .enumerate()
            .filter_map(|(node, inside)| if *inside { Some(node) } else { None })
            .collect()
    }

}

/// Best-effort correction step for a cover given as membership vector.
///
/// Looks for covered nodes whose only neighbor is covered as well. Such a node covers nothing
/// its neighbor does not cover already, so it is dropped, unless that would uncover an edge.
/// Returns the number of removed nodes. This does not guarantee minimality of the result.
pub fn repair_redundant(graph: &UGraph, cover: &mut [bool]) -> usize {
    let mut removed = 0;
    for node in graph.nodes() {
        if !cover[node] {
            continue
        }
        if let [neigh] = graph.neighbors(node) {
            if *neigh != node && cover[*neigh] {
                cover[node] = false;
                removed += 1;
            }
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(n: usize, edges: &[(usize, usize)]) -> UGraph {
        let mut graph = UGraph::new(n);
        for (u, v) in edges {
            graph.add_edge(*u, *v);
        }
        graph
    }

    fn path(n: usize) -> UGraph {
        let edges: Vec<_> = (1..n).map(|u| (u - 1, u)).collect();
        graph_from(n, &edges)
    }

    #[test]
    fn new_instance_test() {
        let graph = graph_from(5, &[(0, 1), (1, 2), (4, 4)]);
        let ins = VCInstance::new(&graph);
        assert_eq!(ins.cover, vec![true, true, true, false, true]);
        assert_eq!(ins.cover_size, 4);
        assert_eq!(ins.upper_bound, 4);
        assert_eq!(ins.remaining_from(0), 4);
        assert_eq!(ins.remaining_from(3), 1);
        assert_eq!(ins.remaining_from(5), 0);
        assert!(ins.would_uncover(4));
        assert!(!ins.would_uncover(0));
    }

    #[test]
    fn exclude_update_test() {
        let graph = path(4);
        let mut ins = VCInstance::new(&graph);
        ins.exclude(0);
        assert!(ins.would_uncover(1));
        assert!(ins.update_current_best());
        assert_eq!(ins.upper_bound, 3);
        ins.exclude(3);
        assert!(ins.update_current_best());
        ins.reinstate(3);
        assert!(!ins.update_current_best());
        let expected: FxHashSet<usize> = vec![1, 2].into_iter().collect();
        assert_eq!(ins.best_solution(), expected);
    }

    #[test]
    fn tie_break_test() {
        let graph = path(4);
        let mut ins = VCInstance::new(&graph);
        ins.exclude(0);
        ins.exclude(2);
        assert!(ins.update_current_best());
        assert_eq!(ins.best_degree, 3);
        ins.reinstate(2);
        ins.exclude(3);
        // {1, 2} has the same size as {1, 3} but touches more edge endpoints
        assert!(ins.update_current_best());
        assert_eq!(ins.best_degree, 4);
        let mut bounded = VCInstance::with_target(&graph, 1);
        bounded.exclude(0);
        bounded.exclude(2);
        assert!(bounded.update_current_best());
        bounded.reinstate(2);
        bounded.exclude(3);
        assert!(!bounded.update_current_best());
        assert!(!bounded.may_improve(2));
        assert!(ins.may_improve(2));
    }

    #[test]
    fn target_test() {
        let graph = path(4);
        let mut ins = VCInstance::with_target(&graph, 2);
        assert!(!ins.target_reached());
        ins.exclude(0);
        ins.exclude(3);
        ins.update_current_best();
        assert!(ins.target_reached());
        assert!(!VCInstance::new(&graph).target_reached());
    }

    #[test]
    fn repair_redundant_test() {
        // 0 - 1 - 2 plus a pendant 3 on 1
        let graph = graph_from(4, &[(0, 1), (1, 2), (1, 3)]);
        let mut cover = vec![true, true, false, true];
        assert_eq!(repair_redundant(&graph, &mut cover), 2);
        assert_eq!(cover, vec![false, true, false, false]);
        assert!(graph.is_vertex_cover(&VCInstance::to_set(&cover)));
    }

    #[test]
    fn repair_keeps_self_loops_and_pairs_test() {
        let graph = graph_from(4, &[(0, 0), (2, 3)]);
        let mut cover = vec![true, false, true, false];
        assert_eq!(repair_redundant(&graph, &mut cover), 0);
        assert_eq!(cover, vec![true, false, true, false]);
        // a single edge covered twice loses exactly one endpoint
        let mut cover = vec![true, false, true, true];
        assert_eq!(repair_redundant(&graph, &mut cover), 1);
        assert!(graph.is_vertex_cover(&VCInstance::to_set(&cover)));
    }

}
