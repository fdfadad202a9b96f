// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};
use std::collections::BTreeSet;

use crate::{earth_distance, Edge, GeoNode};

/// Represents a road network as a set of directed, weighted [Edges](Edge),
/// grouped by their starting node.
///
/// A node id may appear only as a source of edges, only as a target (a dead-end),
/// or both. Coordinates are kept for every node which had them when its edges were
/// added; hand-built graphs may consist of edges alone.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    edges: BTreeMap<i64, BTreeMap<i64, Edge>>,
    nodes: BTreeMap<i64, GeoNode>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes with at least one outgoing edge.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|e| e.len()).sum()
    }

    /// Returns the ids of all nodes present in the graph - both those with outgoing
    /// edges and those only reachable as edge targets, in ascending order.
    pub fn node_ids(&self) -> BTreeSet<i64> {
        let mut ids = BTreeSet::default();
        for (&from, edges) in &self.edges {
            ids.insert(from);
            ids.extend(edges.keys().cloned());
        }
        ids
    }

    /// Checks if a node with the provided id is the start or the end of any edge.
    pub fn contains_node(&self, id: i64) -> bool {
        self.edges.contains_key(&id) || self.edges.values().any(|e| e.contains_key(&id))
    }

    /// Retrieves the coordinates of a node with the provided id.
    pub fn get_node(&self, id: i64) -> Option<GeoNode> {
        self.nodes.get(&id).cloned()
    }

    /// Creates or updates the coordinates of `node.id`.
    ///
    /// Updating a node's position does not update the weight of its edges.
    pub fn set_node(&mut self, node: GeoNode) {
        match self.nodes.entry(node.id) {
            Entry::Vacant(e) => {
                e.insert(node);
            }
            Entry::Occupied(mut e) => {
                *e.get_mut() = node;
            }
        }
    }

    /// Finds the closest [GeoNode] with known coordinates to the given position.
    ///
    /// This function requires computing the distance to every node in the graph,
    /// and is not suitable for large graphs.
    pub fn find_nearest_node(&self, lat: f64, lon: f64) -> Option<GeoNode> {
        self.nodes
            .values()
            .map(|&nd| (earth_distance(lat, lon, nd.lat, nd.lon), nd))
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.total_cmp(b_dist))
            .map(|(_, nd)| nd)
    }

    /// Returns an iterator over all outgoing [Edges](Edge) from a node with a given id,
    /// ordered by target id.
    pub fn get_edges(&self, from_id: i64) -> impl Iterator<Item = &Edge> {
        self.edges.get(&from_id).into_iter().flat_map(|e| e.values())
    }

    /// Retrieves the [Edge] from one node to another.
    pub fn get_edge(&self, from_id: i64, to_id: i64) -> Option<&Edge> {
        self.edges.get(&from_id).and_then(|e| e.get(&to_id))
    }

    /// Gets the weight of an [Edge] from one node to another.
    /// If such an edge doesn't exist, returns [f64::INFINITY].
    pub fn get_weight(&self, from_id: i64, to_id: i64) -> f64 {
        self.get_edge(from_id, to_id)
            .map(|e| e.weight)
            .unwrap_or(f64::INFINITY)
    }

    /// Creates or replaces the [Edge] between `edge.from` and `edge.to`.
    ///
    /// Edge weights must be finite and not less than zero; shortest path search
    /// relies on that.
    pub fn set_edge(&mut self, edge: Edge) {
        debug_assert!(edge.weight.is_finite() && edge.weight >= 0.0);
        self.edges
            .entry(edge.from)
            .or_default()
            .insert(edge.to, edge);
    }
}
