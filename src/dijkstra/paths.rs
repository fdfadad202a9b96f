// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Result of a single-source shortest path search.
///
/// Every node of the searched [Graph](crate::Graph) has a distance, which is
/// [f64::INFINITY] for unreachable nodes. Every reached node other than the
/// source has a predecessor - the previous node on its shortest path.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    pub(super) source: i64,
    pub(super) distances: HashMap<i64, f64>,
    pub(super) predecessors: HashMap<i64, i64>,
}

impl ShortestPaths {
    pub fn source(&self) -> i64 {
        self.source
    }

    /// Returns the shortest known distance from the source to the given node,
    /// or `None` if the node is not part of the searched graph.
    pub fn distance(&self, id: i64) -> Option<f64> {
        self.distances.get(&id).cloned()
    }

    /// Returns the node preceding `id` on its shortest path from the source.
    pub fn predecessor(&self, id: i64) -> Option<i64> {
        self.predecessors.get(&id).cloned()
    }

    pub fn is_reachable(&self, id: i64) -> bool {
        self.distance(id).is_some_and(f64::is_finite)
    }

    pub fn distances(&self) -> &HashMap<i64, f64> {
        &self.distances
    }

    pub fn predecessors(&self) -> &HashMap<i64, i64> {
        &self.predecessors
    }

    /// Reconstructs the shortest path from the source to `target`, by following
    /// predecessors backwards. The returned path starts with the source and ends with `target`.
    ///
    /// Returns `None` if there is no path to `target`.
    pub fn path_to(&self, target: i64) -> Option<Vec<i64>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target];
        let mut last = target;

        while let Some(&nd) = self.predecessors.get(&last) {
            path.push(nd);
            last = nd;
        }

        if last != self.source {
            return None;
        }

        path.reverse();
        Some(path)
    }
}
