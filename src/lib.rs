// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest paths over [OpenStreetMap](https://www.openstreetmap.org/) road networks.
//!
//! Routable OSM ways are converted into a weighted directed [Graph], with edge weights
//! equal to the great-circle distance (in kilometers) between consecutive nodes.
//! One-way streets produce a single directed edge, all other roads produce an edge
//! in both directions. [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
//! backed by an [indexed binary heap](IndexedMinHeap) with decrease-key support,
//! computes shortest distances and predecessors from a single source node.
//!
//! # Example
//!
//! ```no_run
//! let options = highways::osm::Options {
//!     file_format: highways::osm::FileFormat::Unknown,
//!     bbox: [0.0; 4],
//! };
//! let network = highways::osm::load_from_file(&options, "path/to/monaco.osm")
//!     .expect("failed to load monaco.osm");
//! let g = network.build_graph();
//!
//! let start_node = g.find_nearest_node(43.7384, 7.4246).unwrap();
//! let end_node = g.find_nearest_node(43.7478, 7.4323).unwrap();
//! let route = highways::find_route(&g, start_node.id, end_node.id)
//!     .expect("failed to find route");
//!
//! println!("Route: {:?}", route);
//! ```

use std::collections::HashMap;

mod builder;
mod dijkstra;
mod distance;
mod graph;
pub mod osm;
mod queue;

pub use builder::{add_way, build_graph};
pub use dijkstra::{
    find_route, shortest_paths, shortest_paths_until, DijkstraError, ShortestPaths,
};
pub use distance::{earth_distance, EARTH_RADIUS};
pub use graph::Graph;
pub use queue::{IndexedMinHeap, QueueError};

/// Represents a geographic node - a single point with a unique id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

/// Lookup table of all known [GeoNodes](GeoNode), keyed by their ids.
pub type NodeTable = HashMap<i64, GeoNode>;

/// Represents a way - an ordered sequence of node references, with
/// flags derived from its tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Way {
    pub id: i64,

    /// Ids of the nodes making up this way, in order.
    /// References to unknown nodes are permitted.
    pub node_refs: Vec<i64>,

    /// Only routable ways are converted into [Edges](Edge).
    pub is_routable: bool,

    /// One-way ways may only be traversed in the order of `node_refs`.
    pub is_one_way: bool,

    pub name: Option<String>,
}

/// Represents a directed connection between two nodes.
///
/// `weight` is the great-circle distance between the nodes in kilometers,
/// and must be finite and not less than zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: i64,
    pub to: i64,
    pub weight: f64,
    pub name: Option<String>,
}
