// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Edge, GeoNode, Graph, NodeTable, Way};

/// Counters collected while converting [Ways](Way) into [Edges](Edge).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BuildStats {
    ways_used: usize,
    ways_discarded: usize,
    edges_created: usize,
    dangling_pairs: usize,
}

/// Builds a new [Graph] from a node table and a list of ways.
///
/// Non-routable ways are ignored. Every pair of consecutive nodes of a routable way
/// produces an edge weighted by the [great-circle distance](earth_distance) between the nodes,
/// plus the reverse edge unless the way is one-way. Pairs referencing nodes missing
/// from the table are skipped. When multiple ways connect the same two nodes,
/// the last one wins.
pub fn build_graph<'w, I: IntoIterator<Item = &'w Way>>(nodes: &NodeTable, ways: I) -> Graph {
    let mut g = Graph::default();
    let mut stats = BuildStats::default();

    for w in ways {
        add_way_impl(&mut g, nodes, w, &mut stats);
    }

    log::debug!(
        "built graph: {} ways used, {} discarded, {} edges, {} dangling node pairs skipped",
        stats.ways_used,
        stats.ways_discarded,
        stats.edges_created,
        stats.dangling_pairs,
    );

    g
}

/// Adds the edges of a single [Way] to an existing [Graph], following the same rules
/// as [build_graph].
pub fn add_way(g: &mut Graph, nodes: &NodeTable, w: &Way) {
    add_way_impl(g, nodes, w, &mut BuildStats::default());
}

fn add_way_impl(g: &mut Graph, nodes: &NodeTable, w: &Way, stats: &mut BuildStats) {
    if !w.is_routable {
        stats.ways_discarded += 1;
        return;
    }
    stats.ways_used += 1;

    for pair in w.node_refs.windows(2) {
        let (left, right) = match (nodes.get(&pair[0]), nodes.get(&pair[1])) {
            // Edges follow the way's refs, even if the table stores a node under another key
            (Some(&left), Some(&right)) => (
                GeoNode { id: pair[0], ..left },
                GeoNode { id: pair[1], ..right },
            ),
            _ => {
                log::trace!(
                    "way {}: skipping {} -> {} - unknown node",
                    w.id,
                    pair[0],
                    pair[1]
                );
                stats.dangling_pairs += 1;
                continue;
            }
        };

        let weight = earth_distance(left.lat, left.lon, right.lat, right.lon);

        g.set_node(left);
        g.set_node(right);

        g.set_edge(Edge {
            from: left.id,
            to: right.id,
            weight,
            name: w.name.clone(),
        });
        stats.edges_created += 1;

        if !w.is_one_way {
            g.set_edge(Edge {
                from: right.id,
                to: left.id,
                weight,
                name: w.name.clone(),
            });
            stats.edges_created += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_table(nodes: &[(i64, f64, f64)]) -> NodeTable {
        nodes
            .iter()
            .map(|&(id, lat, lon)| (id, GeoNode { id, lat, lon }))
            .collect()
    }

    fn way(id: i64, node_refs: &[i64], is_one_way: bool) -> Way {
        Way {
            id,
            node_refs: node_refs.to_vec(),
            is_routable: true,
            is_one_way,
            name: None,
        }
    }

    fn abc_nodes() -> NodeTable {
        node_table(&[(1, 50.0, 20.0), (2, 50.01, 20.0), (3, 50.01, 20.01)])
    }

    #[test]
    fn one_way() {
        let g = build_graph(&abc_nodes(), &[way(100, &[1, 2, 3], true)]);

        assert!(g.get_edge(1, 2).is_some());
        assert!(g.get_edge(2, 3).is_some());
        assert!(g.get_edge(2, 1).is_none());
        assert!(g.get_edge(3, 2).is_none());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn two_way() {
        let g = build_graph(&abc_nodes(), &[way(100, &[1, 2, 3], false)]);

        assert!(g.get_edge(1, 2).is_some());
        assert!(g.get_edge(2, 3).is_some());
        assert!(g.get_edge(2, 1).is_some());
        assert!(g.get_edge(3, 2).is_some());
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.get_weight(1, 2), g.get_weight(2, 1));
        assert_eq!(g.get_weight(2, 3), g.get_weight(3, 2));
    }

    #[test]
    fn weights_are_haversine_distances() {
        let nodes = abc_nodes();
        let g = build_graph(&nodes, &[way(100, &[1, 2], false)]);

        let expected = earth_distance(50.0, 20.0, 50.01, 20.0);
        assert_eq!(g.get_weight(1, 2), expected);
        assert!((expected - 1.1119).abs() < 1e-3);
    }

    #[test]
    fn non_routable_ways_are_discarded() {
        let mut w = way(100, &[1, 2, 3], false);
        w.is_routable = false;
        let g = build_graph(&abc_nodes(), &[w]);

        assert!(g.is_empty());
        assert!(g.iter_nodes().next().is_none());
    }

    #[test]
    fn short_ways_produce_no_edges() {
        let g = build_graph(&abc_nodes(), &[way(100, &[1], false), way(101, &[], false)]);
        assert!(g.is_empty());
    }

    #[test]
    fn dangling_references_are_skipped() {
        let nodes = node_table(&[(10, 50.0, 20.0), (11, 50.01, 20.0), (12, 50.02, 20.0)]);
        let g = build_graph(&nodes, &[way(100, &[10, 99, 11, 12], false)]);

        assert!(!g.contains_node(99));
        assert!(g.get_edge(10, 11).is_none());
        assert!(g.get_edge(11, 12).is_some());
        assert!(g.get_edge(12, 11).is_some());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn only_dangling_references() {
        let nodes = node_table(&[(10, 50.0, 20.0), (11, 50.01, 20.0)]);
        let g = build_graph(&nodes, &[way(100, &[10, 99, 11], false)]);

        assert!(g.is_empty());
        assert!(!g.contains_node(99));
    }

    #[test]
    fn parallel_ways_last_write_wins() {
        let nodes = abc_nodes();
        let mut first = way(100, &[1, 2], false);
        first.name = Some("First Street".to_string());
        let mut second = way(101, &[1, 2], true);
        second.name = Some("Second Street".to_string());

        let g = build_graph(&nodes, &[first, second]);

        assert_eq!(
            g.get_edge(1, 2).and_then(|e| e.name.as_deref()),
            Some("Second Street")
        );
        // The reverse edge only comes from the first (two-way) way
        assert_eq!(
            g.get_edge(2, 1).and_then(|e| e.name.as_deref()),
            Some("First Street")
        );
    }

    #[test]
    fn names_are_copied_to_both_directions() {
        let mut w = way(100, &[1, 2], false);
        w.name = Some("Main Street".to_string());
        let g = build_graph(&abc_nodes(), &[w]);

        assert_eq!(g.get_edge(1, 2).unwrap().name.as_deref(), Some("Main Street"));
        assert_eq!(g.get_edge(2, 1).unwrap().name.as_deref(), Some("Main Street"));
    }

    #[test]
    fn coordinates_are_kept() {
        let g = build_graph(&abc_nodes(), &[way(100, &[1, 2], false)]);

        assert_eq!(g.get_node(1).map(|n| (n.lat, n.lon)), Some((50.0, 20.0)));
        assert_eq!(g.get_node(2).map(|n| (n.lat, n.lon)), Some((50.01, 20.0)));
        assert_eq!(g.get_node(3), None);
    }

    #[test]
    fn add_way_extends_graph() {
        let nodes = abc_nodes();
        let mut g = build_graph(&nodes, &[way(100, &[1, 2], true)]);
        add_way(&mut g, &nodes, &way(101, &[2, 3], true));

        assert!(g.get_edge(1, 2).is_some());
        assert!(g.get_edge(2, 3).is_some());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn repeated_node_creates_zero_weight_self_edge() {
        let g = build_graph(&abc_nodes(), &[way(100, &[1, 1, 2], true)]);
        assert_eq!(g.get_weight(1, 1), 0.0);
        assert!(g.get_edge(1, 2).is_some());
    }

    #[test]
    fn edges_follow_way_refs() {
        let mut nodes = abc_nodes();
        nodes.insert(
            4,
            GeoNode {
                id: 99,
                lat: 50.02,
                lon: 20.0,
            },
        );

        let g = build_graph(&nodes, &[way(100, &[2, 4], false)]);

        assert!(g.get_edge(2, 4).is_some());
        assert!(g.get_edge(4, 2).is_some());
        assert!(!g.contains_node(99));
        assert_eq!(g.get_node(4).map(|n| n.id), Some(4));
    }
}
