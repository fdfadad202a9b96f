// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::GeoNode;
use std::collections::HashMap;

/// Represents an [OSM way](https://wiki.openstreetmap.org/wiki/Way), before its tags
/// are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<i64>,
    pub tags: HashMap<String, String>,
}

/// Union over all [OSM features/elements](https://wiki.openstreetmap.org/wiki/Elements)
/// relevant for routing. Relations are not read, as turn restrictions are not supported.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Node(GeoNode),
    Way(Way),
}
