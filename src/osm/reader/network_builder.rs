// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::osm::tags;
use crate::GeoNode;

use super::{model, FeatureReader, Network, Options};

/// Helper object used for storing state related to collecting [OSM features](super::model::Feature)
/// into a [Network].
pub(super) struct NetworkBuilder<'a> {
    options: &'a Options,
    network: Network,
    ignore_bbox: bool,
    nodes_outside_bbox: usize,
}

impl<'a> NetworkBuilder<'a> {
    /// Create a new, empty network builder.
    pub(super) fn new(options: &'a Options) -> Self {
        let ignore_bbox =
            options.bbox.iter().all(|&x| x == 0.0) || options.bbox.iter().any(|x| !x.is_finite());

        if !ignore_bbox && !Self::is_valid_bbox(options.bbox) {
            log::warn!(
                "bounding box {:?} is empty - all nodes will be discarded",
                options.bbox
            );
        }

        Self {
            options,
            network: Network::default(),
            ignore_bbox,
            nodes_outside_bbox: 0,
        }
    }

    fn is_valid_bbox(bbox: [f64; 4]) -> bool {
        let [min_lon, min_lat, max_lon, max_lat] = bbox;
        min_lon <= max_lon && min_lat <= max_lat
    }

    /// Add all features from the provided [FeatureReader] and return the collected [Network].
    pub(super) fn add_features<F: FeatureReader>(
        mut self,
        mut features: F,
    ) -> Result<Network, F::Error> {
        while let Some(f) = features.next_feature()? {
            self.add_feature(f);
        }

        log::info!(
            "loaded {} nodes and {} ways ({} routable)",
            self.network.nodes.len(),
            self.network.ways.len(),
            self.network.ways.iter().filter(|w| w.is_routable).count(),
        );
        if self.nodes_outside_bbox > 0 {
            log::debug!(
                "discarded {} nodes outside of the bounding box",
                self.nodes_outside_bbox
            );
        }

        Ok(self.network)
    }

    fn add_feature(&mut self, f: model::Feature) {
        match f {
            model::Feature::Node(n) => self.add_node(n),
            model::Feature::Way(w) => self.add_way(w),
        }
    }

    fn add_node(&mut self, n: GeoNode) {
        if !self.is_in_bbox(n.lat, n.lon) {
            self.nodes_outside_bbox += 1;
            return;
        }

        if self.network.nodes.insert(n.id, n).is_some() {
            log::warn!("duplicate node {} - using the last definition", n.id);
        }
    }

    fn is_in_bbox(&self, lat: f64, lon: f64) -> bool {
        if self.ignore_bbox {
            return true;
        }
        let [min_lon, min_lat, max_lon, max_lat] = self.options.bbox;
        lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
    }

    fn add_way(&mut self, w: model::Way) {
        let way = tags::to_way(w.id, w.nodes, &w.tags);
        if way.is_routable && way.node_refs.len() < 2 {
            log::debug!("way {} has less than 2 nodes", way.id);
        }
        self.network.ways.push(way);
    }
}
