// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::Way;

/// Direction in which a way may be traversed, relative to the order of its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Both,
    Forward,
    Backward,
}

/// Checks if a way with given tags can be used for routing -
/// only ways with a [highway](https://wiki.openstreetmap.org/wiki/Key:highway) tag are.
pub fn is_routable(tags: &HashMap<String, String>) -> bool {
    tags.contains_key("highway")
}

/// Determines in which direction a way may be traversed, by investigating its
/// [oneway](https://wiki.openstreetmap.org/wiki/Key:oneway) tag.
///
/// Some ways (highway=motorway, highway=motorway_link, junction=roundabout and
/// junction=circular) default to being one-way, except if overridden by the oneway tag.
pub fn way_direction(tags: &HashMap<String, String>) -> Direction {
    let mut direction = Direction::Both;

    match tags.get("highway").map(|s| s.as_str()).unwrap_or("") {
        "motorway" | "motorway_link" => direction = Direction::Forward,
        _ => {}
    }

    match tags.get("junction").map(|s| s.as_str()).unwrap_or("") {
        "roundabout" | "circular" => direction = Direction::Forward,
        _ => {}
    }

    match tags.get("oneway").map(|s| s.as_str()).unwrap_or("") {
        "yes" | "true" | "1" => Direction::Forward,
        "-1" | "reverse" => Direction::Backward,
        "no" | "false" | "0" => Direction::Both,
        _ => direction,
    }
}

/// Returns the name of a way, ignoring empty names.
pub fn way_name(tags: &HashMap<String, String>) -> Option<String> {
    tags.get("name")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Converts a raw OSM way into a [Way].
///
/// Ways traversable only against their node order get their nodes reversed,
/// so that every one-way [Way] is traversable in the order of its `node_refs`.
pub fn to_way(id: i64, mut node_refs: Vec<i64>, tags: &HashMap<String, String>) -> Way {
    let direction = way_direction(tags);
    if direction == Direction::Backward {
        node_refs.reverse();
    }

    Way {
        id,
        node_refs,
        is_routable: is_routable(tags),
        is_one_way: direction != Direction::Both,
        name: way_name(tags),
    }
}
