// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use super::{DijkstraError, ShortestPaths};
use crate::{Graph, IndexedMinHeap};

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the shortest distances from `source` to every node of the provided graph.
///
/// All edge weights must be non-negative, otherwise the returned distances are
/// meaningless. The graph is only read, so multiple searches may run over the same
/// graph concurrently.
///
/// Returns [DijkstraError::UnknownSource] if `source` is neither the start nor the end
/// of any edge.
pub fn shortest_paths(g: &Graph, source: i64) -> Result<ShortestPaths, DijkstraError> {
    search(g, source, None)
}

/// Same as [shortest_paths], but stops as soon as the shortest distance to `target`
/// is known. Only the distance and the path to `target` are guaranteed to be final;
/// nodes which were not yet settled may have larger distances than in a full search.
pub fn shortest_paths_until(
    g: &Graph,
    source: i64,
    target: i64,
) -> Result<ShortestPaths, DijkstraError> {
    search(g, source, Some(target))
}

/// Finds the shortest route between two nodes in the provided graph,
/// returning the sequence of node ids from `from_id` to `to_id`.
///
/// Returns an empty vector if there is no route between the two nodes.
pub fn find_route(g: &Graph, from_id: i64, to_id: i64) -> Result<Vec<i64>, DijkstraError> {
    let paths = shortest_paths_until(g, from_id, to_id)?;
    Ok(paths.path_to(to_id).unwrap_or_default())
}

fn search(g: &Graph, source: i64, target: Option<i64>) -> Result<ShortestPaths, DijkstraError> {
    let mut distances: HashMap<i64, f64> = g
        .node_ids()
        .into_iter()
        .map(|id| (id, f64::INFINITY))
        .collect();

    if !distances.contains_key(&source) {
        return Err(DijkstraError::UnknownSource(source));
    }
    if let Some(target) = target {
        if !distances.contains_key(&target) {
            return Err(DijkstraError::UnknownTarget(target));
        }
    }

    let mut predecessors: HashMap<i64, i64> = HashMap::default();
    let mut finalized: HashSet<i64> = HashSet::default();
    let mut queue = IndexedMinHeap::with_capacity(distances.len());

    distances.insert(source, 0.0);
    queue.push(source, 0.0)?;

    while let Some((at, at_distance)) = queue.pop_min() {
        // Guard against stale entries - a settled node is never expanded again
        if !finalized.insert(at) {
            continue;
        }

        log::trace!("settled node {} (distance = {})", at, at_distance);

        if target == Some(at) {
            break;
        }

        let at_distance = distances.get(&at).cloned().unwrap_or(at_distance);

        for edge in g.get_edges(at) {
            let candidate = at_distance + edge.weight;
            let known = distances.get(&edge.to).cloned().unwrap_or(f64::INFINITY);
            if candidate >= known {
                continue;
            }

            distances.insert(edge.to, candidate);
            predecessors.insert(edge.to, at);

            if queue.contains(edge.to) {
                queue.decrease_key(edge.to, candidate)?;
            } else {
                queue.push(edge.to, candidate)?;
            }
        }
    }

    log::debug!(
        "search from {}: settled {} of {} nodes",
        source,
        finalized.len(),
        distances.len()
    );

    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}
